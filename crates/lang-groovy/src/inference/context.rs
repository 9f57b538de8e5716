//! Context for type inference.
//!
//! Holds what one query needs: the parsed unit, the type system, the
//! extension catalog and the scopes, plus the per-query memo.

use crate::catalog::{ClosureShape, ExtensionCatalog};
use crate::inference::adapters::ScriptTypeSystem;
use crate::inference::chain;
use crate::inference::closure;
use crate::inference::core::type_system::MethodMatch;
use crate::inference::scope::{ScopeManager, Symbol, SymbolRef};
use crate::parser::{CompilationUnit, ExprId, ExprKind};
use groovyscope_api::{Confidence, TypeBinding, TypeRef, names};
use groovyscope_core::GroovyscopeConfig;
use std::cell::RefCell;
use std::collections::HashMap;

/// Tunables of the inference engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InferenceOptions {
    /// Nested inference requests deeper than this resolve to unknown
    pub max_inference_depth: usize,
    /// Class name given to top-level script code
    pub script_class: String,
}

impl Default for InferenceOptions {
    fn default() -> Self {
        Self {
            max_inference_depth: 64,
            script_class: "Script".to_string(),
        }
    }
}

impl From<&GroovyscopeConfig> for InferenceOptions {
    fn from(config: &GroovyscopeConfig) -> Self {
        Self {
            max_inference_depth: config.max_inference_depth,
            script_class: config.script_class.clone(),
        }
    }
}

/// The method a call resolved to, kept so closure arguments can be typed.
#[derive(Debug, Clone, PartialEq)]
pub struct CallSelection {
    pub method: MethodMatch,
    /// The receiver as the selected method sees it
    pub receiver: TypeRef,
    pub shape: ClosureShape,
    /// 1 for extension and category methods, whose `self` comes first
    pub self_offset: usize,
}

impl CallSelection {
    pub fn new(method: MethodMatch, receiver: TypeRef) -> Self {
        Self {
            method,
            receiver,
            shape: ClosureShape::None,
            self_offset: 0,
        }
    }

    /// Parameter type receiving call argument `arg`, after substitution.
    pub fn arg_param_type(&self, arg: usize) -> Option<TypeRef> {
        let index = arg + self.self_offset;
        let params = self.method.member.params();
        match params.last() {
            Some(last) if last.is_varargs && index + 1 >= params.len() => {
                let last_index = params.len() - 1;
                let ty = self.method.param_type(last_index)?;
                if index == last_index {
                    Some(ty)
                } else {
                    ty.component()
                }
            }
            _ => self.method.param_type(index),
        }
    }
}

/// What a strategy found for an expression.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupResult {
    pub binding: TypeBinding,
    /// Set when the expression is a call resolved to a method
    pub call: Option<CallSelection>,
}

impl LookupResult {
    pub fn new(binding: TypeBinding) -> Self {
        Self {
            binding,
            call: None,
        }
    }

    pub fn call(binding: TypeBinding, selection: CallSelection) -> Self {
        Self {
            binding,
            call: Some(selection),
        }
    }

    /// An exact binding ends the lookup chain.
    pub fn stops_chain(&self) -> bool {
        self.binding.confidence == Confidence::Exact
    }
}

pub struct InferContext<'a> {
    pub unit: &'a CompilationUnit,
    pub ts: &'a ScriptTypeSystem,
    pub catalog: &'a ExtensionCatalog,
    pub scopes: &'a ScopeManager,
    pub options: &'a InferenceOptions,
    memo: RefCell<HashMap<ExprId, TypeBinding>>,
    selections: RefCell<HashMap<ExprId, CallSelection>>,
    in_progress: RefCell<Vec<ExprId>>,
}

impl<'a> InferContext<'a> {
    pub fn new(
        unit: &'a CompilationUnit,
        ts: &'a ScriptTypeSystem,
        catalog: &'a ExtensionCatalog,
        scopes: &'a ScopeManager,
        options: &'a InferenceOptions,
    ) -> Self {
        Self {
            unit,
            ts,
            catalog,
            scopes,
            options,
            memo: RefCell::new(HashMap::new()),
            selections: RefCell::new(HashMap::new()),
            in_progress: RefCell::new(Vec::new()),
        }
    }

    /// Infer the type of `expr`.
    ///
    /// Re-entering an expression that is already being inferred, or going
    /// deeper than `max_inference_depth`, gives unknown.
    pub fn infer(&self, expr: ExprId) -> TypeBinding {
        if let Some(binding) = self.memo.borrow().get(&expr) {
            return binding.clone();
        }
        {
            let stack = self.in_progress.borrow();
            if stack.contains(&expr) {
                tracing::trace!("Inference cycle at expression {:?}", expr);
                return TypeBinding::unknown();
            }
            if stack.len() >= self.options.max_inference_depth {
                tracing::debug!(
                    "Inference depth limit {} reached at expression {:?}",
                    self.options.max_inference_depth,
                    expr
                );
                return TypeBinding::unknown();
            }
        }

        self.in_progress.borrow_mut().push(expr);
        let binding = match chain::resolve(expr, self) {
            Some(LookupResult {
                binding,
                call: Some(selection),
            }) => {
                self.selections
                    .borrow_mut()
                    .insert(expr, selection.clone());
                closure::complete_call(self, expr, &selection, binding)
            }
            Some(result) => result.binding,
            None => TypeBinding::unknown(),
        };
        self.in_progress.borrow_mut().pop();

        self.memo.borrow_mut().insert(expr, binding.clone());
        binding
    }

    /// The method selected for call `call`, inferring the call if needed.
    pub fn selection(&self, call: ExprId) -> Option<CallSelection> {
        if let Some(selection) = self.selections.borrow().get(&call) {
            return Some(selection.clone());
        }
        self.infer(call);
        self.selections.borrow().get(&call).cloned()
    }

    /// The variable `name` refers to at `expr`.
    pub fn symbol(&self, expr: ExprId, name: &str) -> Option<(SymbolRef, &'a Symbol)> {
        self.scopes.lookup_at(self.unit, expr, name)
    }

    /// The type `this` means at `expr`.
    pub fn owner_type(&self, expr: ExprId) -> TypeRef {
        let fqn = self
            .scopes
            .owner_of(expr)
            .map(|o| o.fqn)
            .unwrap_or_else(|| self.ts.script_type().to_string());
        TypeRef::Id(fqn)
    }

    /// Argument types for overload resolution. Closure literals count as
    /// raw `Closure`: their parameters depend on the method being chosen.
    pub fn arg_types(&self, args: &[ExprId]) -> Vec<TypeRef> {
        args.iter()
            .map(|arg| {
                let arg = self.unit.unparen(*arg);
                if matches!(self.unit.expr(arg).kind, ExprKind::Closure { .. }) {
                    return TypeRef::id(names::CLOSURE);
                }
                let binding = self.infer(arg);
                if binding.is_unknown() {
                    TypeRef::Unknown
                } else {
                    binding.type_ref
                }
            })
            .collect()
    }
}
