//! Walks a compilation unit once and records its scopes.

use super::manager::{DeclTarget, MetaclassAddition, ScopeIndex, ScopeKind, ScopeManager};
use super::table::{Symbol, SymbolKind};
use crate::inference::adapters::ScriptTypeSystem;
use crate::parser::ast::{ClassDecl, MethodDecl, Param};
use crate::parser::{CompilationUnit, ExprId, ExprKind, StmtId, StmtKind};
use groovyscope_api::{Span, TypeRef};

/// An assignment to an undeclared name, maybe a script binding variable.
struct PendingBinding {
    name: String,
    span: Span,
    value: ExprId,
    scope: ScopeIndex,
}

pub struct ScopeBuilder<'a> {
    unit: &'a CompilationUnit,
    ts: &'a ScriptTypeSystem,
    manager: &'a mut ScopeManager,
    pending: Vec<PendingBinding>,
}

impl<'a> ScopeBuilder<'a> {
    pub fn new(
        unit: &'a CompilationUnit,
        ts: &'a ScriptTypeSystem,
        manager: &'a mut ScopeManager,
    ) -> Self {
        Self {
            unit,
            ts,
            manager,
            pending: Vec::new(),
        }
    }

    pub fn build(mut self) {
        let root = self
            .manager
            .push_scope(None, ScopeKind::Script(self.ts.script_type().to_string()));
        for stmt in &self.unit.top_level {
            self.visit_stmt(*stmt, root, &[]);
        }
        self.resolve_bindings();
    }

    fn declare(&mut self, scope: ScopeIndex, name: &str, span: Span, kind: SymbolKind, from: usize) {
        let symbol = Symbol {
            name: name.to_string(),
            span,
            kind,
            visible_from: from,
        };
        let r = self.manager.add_symbol(scope, symbol);
        if !span.is_empty() {
            self.manager.add_decl_site(span, DeclTarget::Symbol(r));
        }
    }

    fn block(&mut self, stmts: &[StmtId], parent: ScopeIndex, vars: &[String]) {
        let scope = self.manager.push_scope(Some(parent), ScopeKind::Block);
        for stmt in stmts {
            self.visit_stmt(*stmt, scope, vars);
        }
    }

    fn visit_stmt(&mut self, id: StmtId, scope: ScopeIndex, vars: &[String]) {
        let unit = self.unit;
        let stmt = unit.stmt(id);
        match &stmt.kind {
            StmtKind::Expr(e) | StmtKind::Throw(e) | StmtKind::Return(Some(e)) => {
                self.visit_expr(*e, scope, vars)
            }
            StmtKind::VarDecl {
                ty,
                name,
                name_span,
                init,
            } => {
                if let Some(init) = init {
                    self.visit_expr(*init, scope, vars);
                }
                let kind = match (ty, init) {
                    (Some(ty), _) => SymbolKind::Declared(self.ts.resolve_type(ty, vars)),
                    (None, Some(init)) => SymbolKind::Initializer(*init),
                    (None, None) => SymbolKind::Untyped,
                };
                self.declare(scope, name, *name_span, kind, stmt.span.end);
            }
            StmtKind::Method(method) => {
                let owner = self.ts.script_type().to_string();
                self.method(method, &owner, scope, vars);
            }
            StmtKind::Class(class) => self.class(class, scope),
            StmtKind::If {
                cond,
                then,
                otherwise,
            } => {
                self.visit_expr(*cond, scope, vars);
                self.block(then, scope, vars);
                self.block(otherwise, scope, vars);
            }
            StmtKind::ForIn {
                var,
                iterable,
                body,
            } => {
                self.visit_expr(*iterable, scope, vars);
                let inner = self.manager.push_scope(Some(scope), ScopeKind::Block);
                let kind = match &var.ty {
                    Some(ty) => SymbolKind::Declared(self.ts.resolve_type(ty, vars)),
                    None => SymbolKind::ForIn(*iterable),
                };
                self.declare(inner, &var.name, var.name_span, kind, var.span.start);
                for stmt in body {
                    self.visit_stmt(*stmt, inner, vars);
                }
            }
            StmtKind::ForClassic {
                init,
                cond,
                update,
                body,
            } => {
                let inner = self.manager.push_scope(Some(scope), ScopeKind::Block);
                for stmt in init {
                    self.visit_stmt(*stmt, inner, vars);
                }
                for e in cond.iter().chain(update.iter()) {
                    self.visit_expr(*e, inner, vars);
                }
                self.block(body, inner, vars);
            }
            StmtKind::While { cond, body } => {
                self.visit_expr(*cond, scope, vars);
                self.block(body, scope, vars);
            }
            StmtKind::Try {
                body,
                catches,
                finally,
            } => {
                self.block(body, scope, vars);
                for catch in catches {
                    let inner = self.manager.push_scope(Some(scope), ScopeKind::Block);
                    let ty = match &catch.param.ty {
                        Some(ty) => self.ts.resolve_type(ty, vars),
                        None => TypeRef::id("java.lang.Exception"),
                    };
                    self.declare(
                        inner,
                        &catch.param.name,
                        catch.param.name_span,
                        SymbolKind::Declared(ty),
                        catch.param.span.start,
                    );
                    for stmt in &catch.body {
                        self.visit_stmt(*stmt, inner, vars);
                    }
                }
                self.block(finally, scope, vars);
            }
            StmtKind::Block(stmts) => self.block(stmts, scope, vars),
            StmtKind::Return(None) | StmtKind::Jump | StmtKind::Error => {}
        }
    }

    fn class(&mut self, class: &ClassDecl, parent: ScopeIndex) {
        let Some(fqn) = self.ts.resolve_name(&class.name) else {
            return;
        };
        let scope = self
            .manager
            .push_scope(Some(parent), ScopeKind::Class(fqn.clone()));
        let vars = &class.type_params;
        for field in &class.fields {
            self.manager.add_decl_site(
                field.name_span,
                DeclTarget::Member {
                    owner: fqn.clone(),
                    name: field.name.clone(),
                },
            );
            if let Some(init) = field.init {
                self.visit_expr(init, scope, vars);
            }
        }
        for method in &class.methods {
            self.method(method, &fqn, scope, vars);
        }
    }

    fn method(&mut self, method: &MethodDecl, owner: &str, parent: ScopeIndex, vars: &[String]) {
        if !method.is_constructor {
            self.manager.add_decl_site(
                method.name_span,
                DeclTarget::Member {
                    owner: owner.to_string(),
                    name: method.name.clone(),
                },
            );
        }
        let scope = self.manager.push_scope(
            Some(parent),
            ScopeKind::Method {
                owner: owner.to_string(),
                is_static: method.is_static,
            },
        );
        let vars: Vec<String> = vars.iter().chain(&method.type_params).cloned().collect();
        for param in &method.params {
            let kind = match &param.ty {
                Some(_) => SymbolKind::Declared(self.param_type(param, &vars)),
                None if param.varargs => SymbolKind::Declared(self.param_type(param, &vars)),
                None => SymbolKind::Untyped,
            };
            if let Some(default) = param.default {
                self.visit_expr(default, scope, &vars);
            }
            self.declare(scope, &param.name, param.name_span, kind, method.span.start);
        }
        for stmt in &method.body {
            self.visit_stmt(*stmt, scope, &vars);
        }
    }

    fn param_type(&self, param: &Param, vars: &[String]) -> TypeRef {
        let ty = self.ts.declared_or_object(param.ty.as_ref(), vars);
        if param.varargs {
            TypeRef::array_of(ty)
        } else {
            ty
        }
    }

    fn visit_expr(&mut self, id: ExprId, scope: ScopeIndex, vars: &[String]) {
        let unit = self.unit;
        let expr = unit.expr(id);
        self.manager.set_scope(id, scope);
        match &expr.kind {
            ExprKind::Closure {
                params,
                explicit_params,
                body,
            } => {
                let inner = self.manager.push_scope(Some(scope), ScopeKind::Closure(id));
                let from = expr.span.start;
                if *explicit_params {
                    for (index, param) in params.iter().enumerate() {
                        let kind = match &param.ty {
                            Some(_) => SymbolKind::Declared(self.param_type(param, vars)),
                            None => SymbolKind::ClosureParam { closure: id, index },
                        };
                        if let Some(default) = param.default {
                            self.visit_expr(default, inner, vars);
                        }
                        self.declare(inner, &param.name, param.name_span, kind, from);
                    }
                } else {
                    let kind = SymbolKind::ClosureParam {
                        closure: id,
                        index: 0,
                    };
                    self.declare(inner, "it", Span::new(from, from), kind, from);
                }
                for stmt in body {
                    self.visit_stmt(*stmt, inner, vars);
                }
            }
            ExprKind::Assign {
                op: None,
                target,
                value,
            } => {
                self.visit_expr(*target, scope, vars);
                self.visit_expr(*value, scope, vars);
                self.record_assignment(*target, *value, scope);
            }
            kind => {
                for child in kind.children() {
                    self.visit_expr(child, scope, vars);
                }
            }
        }
    }

    fn record_assignment(&mut self, target: ExprId, value: ExprId, scope: ScopeIndex) {
        let unit = self.unit;
        let target_expr = unit.expr(target);
        match &target_expr.kind {
            ExprKind::Ident(name) => self.pending.push(PendingBinding {
                name: name.clone(),
                span: target_expr.span,
                value,
                scope,
            }),
            ExprKind::Property { receiver, name, .. } => {
                if let Some((receiver, is_static)) = metaclass_receiver(unit, *receiver) {
                    tracing::trace!("Metaclass addition '{}'", name);
                    self.manager.add_metaclass_addition(MetaclassAddition {
                        receiver,
                        name: name.clone(),
                        value,
                        is_static,
                    });
                }
            }
            _ => {}
        }
    }

    /// Undeclared names assigned in script code become binding variables,
    /// declared at their first assignment.
    fn resolve_bindings(&mut self) {
        for pending in std::mem::take(&mut self.pending) {
            let in_script = self
                .manager
                .owner(pending.scope)
                .is_some_and(|o| o.fqn == self.ts.script_type());
            if !in_script {
                continue;
            }
            if self
                .manager
                .lookup(&pending.name, pending.scope, pending.span.start)
                .is_some()
            {
                continue;
            }
            self.declare(
                ScopeIndex::ROOT,
                &pending.name,
                pending.span,
                SymbolKind::Binding(pending.value),
                pending.span.start,
            );
        }
    }
}

/// `X.metaClass` or `X.metaClass.static`: the `X` expression.
fn metaclass_receiver(unit: &CompilationUnit, id: ExprId) -> Option<(ExprId, bool)> {
    match &unit.expr(id).kind {
        ExprKind::Property { receiver, name, .. } if name == "metaClass" => Some((*receiver, false)),
        ExprKind::Property { receiver, name, .. } if name == "static" => {
            match &unit.expr(*receiver).kind {
                ExprKind::Property {
                    receiver: inner,
                    name,
                    ..
                } if name == "metaClass" => Some((*inner, true)),
                _ => None,
            }
        }
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse;

    fn build(source: &str) -> (CompilationUnit, ScopeManager) {
        let unit = parse(source);
        let ts = ScriptTypeSystem::new(&unit, "Script");
        let scopes = ScopeManager::build(&unit, &ts);
        (unit, scopes)
    }

    fn ident(unit: &CompilationUnit, name: &str, nth: usize) -> ExprId {
        unit.expr_ids()
            .filter(|id| matches!(&unit.expr(*id).kind, ExprKind::Ident(n) if n == name))
            .nth(nth)
            .unwrap()
    }

    #[test]
    fn test_locals_and_closure_params() {
        let (unit, scopes) = build("String s = 'a'\n[1].each { x -> s + x }\n[2].each { it }\n");
        let s = ident(&unit, "s", 0);
        let (_, sym) = scopes.lookup_at(&unit, s, "s").unwrap();
        assert_eq!(sym.kind, SymbolKind::Declared(TypeRef::string()));

        let x = ident(&unit, "x", 0);
        let (_, sym) = scopes.lookup_at(&unit, x, "x").unwrap();
        assert!(matches!(sym.kind, SymbolKind::ClosureParam { index: 0, .. }));

        let it = ident(&unit, "it", 0);
        assert!(scopes.lookup_at(&unit, it, "it").is_some());
    }

    #[test]
    fn test_binding_variables_reach_methods() {
        let (unit, scopes) = build("count = 1\ndef local = 2\ndef show() { count + local }\n");
        let count = ident(&unit, "count", 1);
        let (_, sym) = scopes.lookup_at(&unit, count, "count").unwrap();
        assert!(matches!(sym.kind, SymbolKind::Binding(_)));

        let local = ident(&unit, "local", 0);
        assert!(scopes.lookup_at(&unit, local, "local").is_none());
    }

    #[test]
    fn test_metaclass_additions_are_recorded() {
        let (_, scopes) = build("String.metaClass.shout = { -> 'x' }\nInteger.metaClass.static.zero = { 0 }\n");
        let additions = scopes.metaclass_additions();
        assert_eq!(additions.len(), 2);
        assert_eq!(additions[0].name, "shout");
        assert!(!additions[0].is_static);
        assert!(additions[1].is_static);
    }

    #[test]
    fn test_owner_of_class_members() {
        let (unit, scopes) = build("class Foo { def bar() { this } }\nthis\n");
        let this: Vec<ExprId> = unit
            .expr_ids()
            .filter(|id| unit.expr(*id).kind == ExprKind::This)
            .collect();
        assert_eq!(scopes.owner_of(this[0]).unwrap().fqn, "Foo");
        assert_eq!(scopes.owner_of(this[1]).unwrap().fqn, "Script");
    }
}
