//! Symbol table for a single scope.

use crate::parser::ExprId;
use groovyscope_api::{Span, TypeRef};

/// How a variable gets its type.
#[derive(Debug, Clone, PartialEq)]
pub enum SymbolKind {
    /// Explicitly typed locals, parameters and catch variables
    Declared(TypeRef),
    /// `def x = expr`
    Initializer(ExprId),
    /// Script binding variable: assigned at script level without a declaration
    Binding(ExprId),
    /// `def x` with no initialiser, untyped method parameters
    Untyped,
    /// Untyped `for (x in xs)` variable, an element of `xs`
    ForIn(ExprId),
    /// Untyped closure parameter; the implicit `it` is index 0
    ClosureParam { closure: ExprId, index: usize },
}

#[derive(Debug, Clone, PartialEq)]
pub struct Symbol {
    pub name: String,
    /// Span of the declared name (empty for the implicit `it`)
    pub span: Span,
    pub kind: SymbolKind,
    /// Byte offset from which the name is in scope
    pub visible_from: usize,
}

/// A symbol table mapping variable names to their declarations.
///
/// Later declarations shadow earlier ones once they are visible.
#[derive(Debug, Default, Clone)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
}

impl SymbolTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a symbol, returning its index in this table.
    pub fn insert(&mut self, symbol: Symbol) -> usize {
        self.symbols.push(symbol);
        self.symbols.len() - 1
    }

    /// The latest declaration of `name` visible at `offset`.
    pub fn get(&self, name: &str, offset: usize) -> Option<(usize, &Symbol)> {
        self.symbols
            .iter()
            .enumerate()
            .rev()
            .find(|(_, s)| s.name == name && s.visible_from <= offset)
    }

    pub fn at(&self, index: usize) -> Option<&Symbol> {
        self.symbols.get(index)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Symbol> {
        self.symbols.iter()
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sym(name: &str, from: usize, kind: SymbolKind) -> Symbol {
        Symbol {
            name: name.to_string(),
            span: Span::default(),
            kind,
            visible_from: from,
        }
    }

    #[test]
    fn test_later_declarations_shadow_once_visible() {
        let mut table = SymbolTable::new();
        table.insert(sym("x", 0, SymbolKind::Untyped));
        table.insert(sym("x", 10, SymbolKind::Declared(TypeRef::string())));

        assert_eq!(table.get("x", 5).map(|(i, _)| i), Some(0));
        let (_, later) = table.get("x", 12).unwrap();
        assert_eq!(later.kind, SymbolKind::Declared(TypeRef::string()));
        assert!(table.get("y", 12).is_none());
    }
}
