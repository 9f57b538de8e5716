//! Scope manager for handling variable scopes.

use super::builder::ScopeBuilder;
use super::table::{Symbol, SymbolKind, SymbolTable};
use crate::inference::adapters::ScriptTypeSystem;
use crate::parser::{CompilationUnit, ExprId};
use groovyscope_api::Span;
use std::collections::HashMap;

/// Identifier for a scope.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeIndex(pub u32);

impl ScopeIndex {
    pub const ROOT: ScopeIndex = ScopeIndex(0);

    fn index(self) -> usize {
        self.0 as usize
    }
}

/// Kind of scope
#[derive(Debug, Clone, PartialEq)]
pub enum ScopeKind {
    /// Top-level script code, owned by the script class (FQN)
    Script(String),
    Class(String),
    Method { owner: String, is_static: bool },
    Closure(ExprId),
    Block,
}

/// A scope containing symbols and a reference to its parent.
#[derive(Debug, Clone)]
pub struct Scope {
    pub id: ScopeIndex,
    pub parent: Option<ScopeIndex>,
    pub symbols: SymbolTable,
    pub kind: ScopeKind,
}

/// Address of one symbol.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolRef {
    pub scope: ScopeIndex,
    pub index: usize,
}

/// What a declared name in the source refers to.
#[derive(Debug, Clone, PartialEq)]
pub enum DeclTarget {
    Symbol(SymbolRef),
    /// A field or method declared by `owner`
    Member { owner: String, name: String },
}

#[derive(Debug, Clone, PartialEq)]
pub struct DeclSite {
    pub span: Span,
    pub target: DeclTarget,
}

/// `Type.metaClass.name = value`, or `Type.metaClass.static.name = value`.
#[derive(Debug, Clone, PartialEq)]
pub struct MetaclassAddition {
    /// The expression naming the extended type
    pub receiver: ExprId,
    pub name: String,
    pub value: ExprId,
    pub is_static: bool,
}

/// The type that `this` refers to at some point of the source.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Owner {
    pub fqn: String,
    pub is_static: bool,
}

/// Manages scopes and symbol tables for a file.
#[derive(Debug, Default, Clone)]
pub struct ScopeManager {
    scopes: Vec<Scope>,
    /// Innermost scope of every visited expression
    expr_scopes: HashMap<ExprId, ScopeIndex>,
    decl_sites: Vec<DeclSite>,
    metaclass: Vec<MetaclassAddition>,
}

impl ScopeManager {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the scopes of a whole compilation unit.
    pub fn build(unit: &CompilationUnit, ts: &ScriptTypeSystem) -> Self {
        let mut manager = ScopeManager::new();
        ScopeBuilder::new(unit, ts, &mut manager).build();
        tracing::trace!(
            "Built {} scopes, {} declaration sites",
            manager.scopes.len(),
            manager.decl_sites.len()
        );
        manager
    }

    /// Register a new scope under `parent`.
    pub fn push_scope(&mut self, parent: Option<ScopeIndex>, kind: ScopeKind) -> ScopeIndex {
        let id = ScopeIndex(self.scopes.len() as u32);
        self.scopes.push(Scope {
            id,
            parent,
            symbols: SymbolTable::new(),
            kind,
        });
        id
    }

    pub fn add_symbol(&mut self, scope: ScopeIndex, symbol: Symbol) -> SymbolRef {
        let index = self.scopes[scope.index()].symbols.insert(symbol);
        SymbolRef { scope, index }
    }

    pub fn set_scope(&mut self, expr: ExprId, scope: ScopeIndex) {
        self.expr_scopes.insert(expr, scope);
    }

    pub fn add_decl_site(&mut self, span: Span, target: DeclTarget) {
        self.decl_sites.push(DeclSite { span, target });
    }

    pub fn add_metaclass_addition(&mut self, addition: MetaclassAddition) {
        self.metaclass.push(addition);
    }

    pub fn scope(&self, id: ScopeIndex) -> Option<&Scope> {
        self.scopes.get(id.index())
    }

    /// Innermost scope of `expr`; the script scope for unvisited expressions.
    pub fn scope_of(&self, expr: ExprId) -> ScopeIndex {
        self.expr_scopes
            .get(&expr)
            .copied()
            .unwrap_or(ScopeIndex::ROOT)
    }

    /// Scopes from `scope` outwards.
    pub fn ancestors(&self, scope: ScopeIndex) -> impl Iterator<Item = &Scope> + '_ {
        std::iter::successors(self.scope(scope), move |s| s.parent.and_then(|p| self.scope(p)))
    }

    /// Look up `name` from `scope` at `offset`, walking outwards.
    ///
    /// Method and class bodies cannot see script locals; only script
    /// binding variables reach into them.
    pub fn lookup(&self, name: &str, scope: ScopeIndex, offset: usize) -> Option<(SymbolRef, &Symbol)> {
        let mut sealed = false;
        for s in self.ancestors(scope) {
            let found = if sealed {
                s.symbols
                    .iter()
                    .enumerate()
                    .find(|(_, sym)| sym.name == name && matches!(sym.kind, SymbolKind::Binding(_)))
            } else {
                s.symbols.get(name, offset)
            };
            if let Some((index, symbol)) = found {
                return Some((SymbolRef { scope: s.id, index }, symbol));
            }
            if matches!(s.kind, ScopeKind::Method { .. } | ScopeKind::Class(_)) {
                sealed = true;
            }
        }
        None
    }

    /// The symbol `name` refers to where `expr` starts.
    pub fn lookup_at(&self, unit: &CompilationUnit, expr: ExprId, name: &str) -> Option<(SymbolRef, &Symbol)> {
        self.lookup(name, self.scope_of(expr), unit.expr(expr).span.start)
    }

    pub fn symbol(&self, r: SymbolRef) -> Option<&Symbol> {
        self.scope(r.scope)?.symbols.at(r.index)
    }

    /// The type `this` means inside `scope`.
    pub fn owner(&self, scope: ScopeIndex) -> Option<Owner> {
        self.ancestors(scope).find_map(|s| match &s.kind {
            ScopeKind::Script(fqn) | ScopeKind::Class(fqn) => Some(Owner {
                fqn: fqn.clone(),
                is_static: false,
            }),
            ScopeKind::Method { owner, is_static } => Some(Owner {
                fqn: owner.clone(),
                is_static: *is_static,
            }),
            ScopeKind::Closure(_) | ScopeKind::Block => None,
        })
    }

    pub fn owner_of(&self, expr: ExprId) -> Option<Owner> {
        self.owner(self.scope_of(expr))
    }

    pub fn decl_sites(&self) -> &[DeclSite] {
        &self.decl_sites
    }

    pub fn metaclass_additions(&self) -> &[MetaclassAddition] {
        &self.metaclass
    }

    pub fn len(&self) -> usize {
        self.scopes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.scopes.is_empty()
    }
}
