//! Closure parameter and closure return inference.
//!
//! A closure passed to a method takes its parameter types from the method
//! the call resolved to: the extension's [`ClosureShape`], or the single
//! abstract method of a functional interface parameter. Generic results
//! such as `List<T> collect(..., Closure<T>)` are completed from the
//! closure's body once the call is resolved.

use crate::catalog::ClosureShape;
use crate::inference::adapters::ScriptTypeSystem;
use crate::inference::context::{CallSelection, InferContext};
use crate::inference::core::subtyping::sam_method;
use crate::inference::core::type_system::{GroovyTypeSystem, TypeProvider};
use crate::inference::core::types::TypeRefExt;
use crate::inference::core::unification::{Substitution, bind};
use crate::parser::{CompilationUnit, ExprId, ExprKind, StmtKind};
use groovyscope_api::{Confidence, LookupOrigin, TypeBinding, TypeRef, names};

/// What iterating over a value yields.
#[derive(Debug, Clone, PartialEq)]
pub enum Elements {
    Items(TypeRef),
    /// Maps iterate entries, or keys and values
    Entries { key: TypeRef, value: TypeRef },
    Unknown,
}

impl Elements {
    /// The element as a single value (`Map$Entry<K,V>` for maps).
    pub fn single(&self) -> TypeRef {
        match self {
            Elements::Items(item) => item.clone(),
            Elements::Entries { key, value } => {
                TypeRef::generic(names::MAP_ENTRY, vec![key.clone(), value.clone()])
            }
            Elements::Unknown => TypeRef::Unknown,
        }
    }
}

/// Element type of arrays, maps, iterables, iterators and strings. Any
/// other object iterates over itself.
pub fn elements(ts: &ScriptTypeSystem, ty: &TypeRef) -> Elements {
    if ty.is_unknown() {
        return Elements::Unknown;
    }
    if let Some(component) = ty.component() {
        return Elements::Items(component.boxed());
    }
    if let Some(map) = ts.as_super(ty, names::MAP) {
        let arg = |i: usize| {
            map.type_args()
                .get(i)
                .map(TypeRefExt::upper_bound)
                .unwrap_or(TypeRef::Unknown)
        };
        return Elements::Entries {
            key: arg(0),
            value: arg(1),
        };
    }
    for sequence in [names::ITERABLE, names::ITERATOR] {
        if let Some(view) = ts.as_super(ty, sequence) {
            return match view.type_args().first() {
                Some(arg) if !arg.is_unknown() => Elements::Items(arg.upper_bound()),
                _ => Elements::Unknown,
            };
        }
    }
    if ts.as_super(ty, names::CHAR_SEQUENCE).is_some() {
        return Elements::Items(TypeRef::string());
    }
    Elements::Items(ty.boxed())
}

/// Binding of parameter `index` of a closure literal.
pub fn param_binding(ctx: &InferContext<'_>, closure: ExprId, index: usize) -> TypeBinding {
    let ExprKind::Closure {
        params,
        explicit_params,
        ..
    } = &ctx.unit.expr(closure).kind
    else {
        return TypeBinding::unknown();
    };
    let count = if *explicit_params { params.len() } else { 1 };
    let Some((call, arg)) = enclosing_call(ctx.unit, closure) else {
        return TypeBinding::unknown();
    };
    let Some(selection) = ctx.selection(call) else {
        return TypeBinding::unknown();
    };
    match param_types(ctx, &selection, arg, count).into_iter().nth(index) {
        Some(ty) if !ty.is_unknown() => {
            TypeBinding::of_type(ty, LookupOrigin::Structural, Confidence::Inferred)
        }
        _ => TypeBinding::unknown(),
    }
}

/// The call a closure literal is an argument of, and its position.
pub(crate) fn enclosing_call(unit: &CompilationUnit, closure: ExprId) -> Option<(ExprId, usize)> {
    let mut child = closure;
    let mut parent = unit.parent(closure)?;
    while let ExprKind::Paren(_) = unit.expr(parent).kind {
        child = parent;
        parent = unit.parent(parent)?;
    }
    match &unit.expr(parent).kind {
        ExprKind::Call { args, .. } => {
            let position = args.iter().position(|a| *a == child)?;
            Some((parent, position))
        }
        _ => None,
    }
}

/// Parameter types of a closure with `count` parameters passed as argument
/// `arg` of the selected method.
fn param_types(
    ctx: &InferContext<'_>,
    selection: &CallSelection,
    arg: usize,
    count: usize,
) -> Vec<TypeRef> {
    let fill = |types: Vec<TypeRef>| {
        let mut types = types;
        types.resize(count.max(types.len()), TypeRef::Unknown);
        types
    };
    let elements = || elements(ctx.ts, &selection.receiver);

    match &selection.shape {
        ClosureShape::None => sam_param_types(ctx.ts, selection, arg),
        ClosureShape::Receiver => vec![selection.receiver.clone(); count],
        ClosureShape::FirstParam => fill(vec![
            selection.method.param_type(0).unwrap_or(TypeRef::Unknown),
        ]),
        ClosureShape::Element => match elements() {
            Elements::Entries { key, value } if count >= 2 => fill(vec![key, value]),
            other => fill(vec![other.single()]),
        },
        ClosureShape::Comparator => vec![elements().single(); count],
        ClosureShape::WithIndex => {
            let index = TypeRef::id(names::INTEGER);
            match elements() {
                Elements::Entries { key, value } if count >= 3 => fill(vec![key, value, index]),
                other => fill(vec![other.single(), index]),
            }
        }
        ClosureShape::Inject => {
            let elements = elements();
            let acc = if selection.method.member.params().len() > 2 {
                selection.method.param_type(1).unwrap_or(TypeRef::Unknown)
            } else {
                elements.single()
            };
            match elements {
                Elements::Entries { key, value } if count == 2 => vec![key, value],
                Elements::Entries { key, value } => fill(vec![acc, key, value]),
                other => fill(vec![acc, other.single()]),
            }
        }
        ClosureShape::Simple(types) => fill(types.clone()),
    }
}

/// Parameters of the single abstract method of a functional interface
/// parameter, with the interface's type arguments applied.
fn sam_param_types(ts: &ScriptTypeSystem, selection: &CallSelection, arg: usize) -> Vec<TypeRef> {
    let Some(param) = selection.arg_param_type(arg) else {
        return Vec::new();
    };
    let Some(fqn) = param.fqn() else {
        return Vec::new();
    };
    if fqn == names::CLOSURE {
        return Vec::new();
    }
    let Some(sam) = sam_method(fqn, ts) else {
        return Vec::new();
    };

    // `? super T` and `? extends T` both read as `T` for a lambda parameter
    let param = match &param {
        TypeRef::Generic { base, args } => TypeRef::Generic {
            base: base.clone(),
            args: args.iter().map(lambda_arg).collect(),
        },
        other => other.clone(),
    };
    let subst = ts
        .as_super(&param, &sam.declaring_type)
        .zip(ts.get_type_info(&sam.declaring_type))
        .map(|(view, info)| {
            Substitution::from_pairs(info.type_parameters.iter().enumerate().map(|(i, p)| {
                let arg = view.type_args().get(i).cloned().unwrap_or(TypeRef::Unknown);
                (p.name.clone(), arg)
            }))
        })
        .unwrap_or_default();
    sam.params()
        .iter()
        .map(|p| subst.apply(&p.type_ref))
        .map(|t| if matches!(t, TypeRef::Var(_)) { TypeRef::Unknown } else { t })
        .collect()
}

fn lambda_arg(arg: &TypeRef) -> TypeRef {
    match arg {
        TypeRef::Wildcard {
            bound: Some(bound), ..
        } => bound.as_ref().clone(),
        TypeRef::Wildcard { bound: None, .. } => TypeRef::object(),
        other => other.clone(),
    }
}

/// Binding of what a closure literal returns: its last statement, or an
/// explicit `return` there. An empty body returns `Object`.
pub fn body_binding(ctx: &InferContext<'_>, closure: ExprId) -> TypeBinding {
    let ExprKind::Closure { body, .. } = &ctx.unit.expr(closure).kind else {
        return TypeBinding::unknown();
    };
    let last = body.last().map(|s| &ctx.unit.stmt(*s).kind);
    match last {
        Some(StmtKind::Expr(e)) | Some(StmtKind::Return(Some(e))) => ctx.infer(*e),
        _ => TypeBinding::of_type(
            TypeRef::object(),
            LookupOrigin::Structural,
            Confidence::Inferred,
        ),
    }
}

/// Finish a resolved call: bind method type variables that only the
/// closure arguments determine, then settle a bare unbound result.
pub fn complete_call(
    ctx: &InferContext<'_>,
    call: ExprId,
    selection: &CallSelection,
    mut binding: TypeBinding,
) -> TypeBinding {
    let member = &selection.method.member;
    let pending: Vec<String> = binding
        .type_ref
        .type_vars()
        .into_iter()
        .filter(|v| member.type_parameters.iter().any(|p| p.name == *v))
        .collect();

    if !pending.is_empty() {
        let vars: Vec<&str> = pending.iter().map(String::as_str).collect();
        let mut subst = Substitution::new();
        let args: &[ExprId] = match &ctx.unit.expr(call).kind {
            ExprKind::Call { args, .. } => args.as_slice(),
            _ => &[],
        };
        for (i, arg) in args.iter().enumerate() {
            let arg = ctx.unit.unparen(*arg);
            if !matches!(ctx.unit.expr(arg).kind, ExprKind::Closure { .. }) {
                continue;
            }
            let Some(param) = selection.arg_param_type(i) else {
                continue;
            };
            let closure = ctx.infer(arg);
            if closure.confidence == Confidence::Exact && !closure.type_ref.type_args().is_empty() {
                bind(ctx.ts, &param, &closure.type_ref, &vars, &mut subst);
            }
        }
        binding.type_ref = subst.apply(&binding.type_ref);
    }

    if let TypeRef::Var(name) = &binding.type_ref {
        let bound = member
            .type_parameters
            .iter()
            .find(|p| p.name == *name)
            .and_then(|p| p.bounds.first().cloned())
            .unwrap_or_else(TypeRef::object);
        tracing::trace!("Unbound result {} of {} settles on {}", name, member.fqn(), bound);
        binding.type_ref = bound;
        binding.confidence = binding.confidence.min(Confidence::Inferred);
    }
    binding
}
