use crate::inference::scope::{DeclTarget, ScopeManager};
use crate::parser::{CompilationUnit, ExprId};
use groovyscope_api::Span;
use std::cmp::Reverse;

/// What a source range refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum Target {
    Expr(ExprId),
    /// A declared name: variable, parameter, field or method
    Decl(DeclTarget),
    Nothing,
}

/// Find the node `span` refers to.
///
/// An expression whose span, or member name span, equals the range wins
/// (the smallest, then the deepest); then a declared name at exactly that
/// range; then the innermost expression covering it.
pub fn locate(unit: &CompilationUnit, scopes: &ScopeManager, span: Span) -> Target {
    let innermost = |matches: &dyn Fn(ExprId) -> bool| {
        unit.expr_ids()
            .filter(|id| matches(*id))
            .min_by_key(|id| (unit.expr(*id).span.len(), Reverse(depth(unit, *id))))
    };

    let exact = innermost(&|id| {
        let expr = unit.expr(id);
        expr.span == span || expr.kind.name_span() == Some(span)
    });
    if let Some(id) = exact {
        return Target::Expr(id);
    }
    if let Some(site) = scopes.decl_sites().iter().find(|site| site.span == span) {
        return Target::Decl(site.target.clone());
    }
    match innermost(&|id| unit.expr(id).span.covers(span)) {
        Some(id) => Target::Expr(id),
        None => {
            tracing::debug!("No expression at {}..{}", span.start, span.end);
            Target::Nothing
        }
    }
}

fn depth(unit: &CompilationUnit, id: ExprId) -> usize {
    std::iter::successors(unit.parent(id), |p| unit.parent(*p)).count()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::inference::adapters::ScriptTypeSystem;
    use crate::parser::{self, ExprKind};

    fn setup(source: &str) -> (CompilationUnit, ScopeManager) {
        let unit = parser::parse(source);
        let ts = ScriptTypeSystem::new(&unit, "Script");
        let scopes = ScopeManager::build(&unit, &ts);
        (unit, scopes)
    }

    fn span_of(source: &str, text: &str) -> Span {
        let start = source.find(text).unwrap();
        Span::new(start, start + text.len())
    }

    #[test]
    fn test_method_name_selects_the_call() {
        let source = "def s = 'a'\ns.toUpperCase()\n";
        let (unit, scopes) = setup(source);
        let Target::Expr(id) = locate(&unit, &scopes, span_of(source, "toUpperCase")) else {
            panic!("expected an expression");
        };
        assert!(matches!(unit.expr(id).kind, ExprKind::Call { .. }));
    }

    #[test]
    fn test_declared_name_selects_the_declaration() {
        let source = "def count = 1\n";
        let (unit, scopes) = setup(source);
        assert!(matches!(
            locate(&unit, &scopes, span_of(source, "count")),
            Target::Decl(DeclTarget::Symbol(_))
        ));
    }

    #[test]
    fn test_partial_range_falls_back_to_covering_expression() {
        let source = "println 'hello'\n";
        let (unit, scopes) = setup(source);
        let Target::Expr(id) = locate(&unit, &scopes, span_of(source, "ell")) else {
            panic!("expected an expression");
        };
        assert_eq!(unit.expr(id).kind, ExprKind::Literal(crate::parser::ast::LiteralKind::String));
    }

    #[test]
    fn test_range_outside_any_expression() {
        let source = "def x = 1\n\n\n";
        let (unit, scopes) = setup(source);
        assert_eq!(locate(&unit, &scopes, Span::new(11, 12)), Target::Nothing);
    }
}
