//! Arena AST for a parsed Groovy source unit.
//!
//! Expressions and statements live in flat vectors addressed by [`ExprId`] and
//! [`StmtId`]. Every expression records its parent expression and the closure
//! it is nested in, which is what closure-parameter inference walks.

use super::ParseError;
use groovyscope_api::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ExprId(pub u32);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StmtId(pub u32);

impl ExprId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl StmtId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A type as written in source, before name resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeNode {
    /// Dotted name as written (`String`, `java.util.regex.Pattern`, `?`)
    pub name: String,
    pub args: Vec<TypeNode>,
    pub dims: usize,
    /// `? extends X` / `? super X`
    pub bound: Option<(Box<TypeNode>, bool)>,
    pub span: Span,
}

impl TypeNode {
    pub fn simple(name: impl Into<String>, span: Span) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            dims: 0,
            bound: None,
            span,
        }
    }

    pub fn is_wildcard(&self) -> bool {
        self.name == "?"
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub name_span: Span,
    /// `None` for untyped and `def` parameters
    pub ty: Option<TypeNode>,
    pub varargs: bool,
    pub default: Option<ExprId>,
    pub span: Span,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LiteralKind {
    Integer,
    Long,
    BigInteger,
    BigDecimal,
    Double,
    Float,
    String,
    GString,
    Boolean,
    Null,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    Or,
    And,
    BitOr,
    BitXor,
    BitAnd,
    Eq,
    NotEq,
    Compare,
    RegexFind,
    RegexMatch,
    Lt,
    LtEq,
    Gt,
    GtEq,
    In,
    Instanceof,
    LeftShift,
    RightShift,
    Range,
    RangeExclusive,
    Plus,
    Minus,
    Multiply,
    Divide,
    Modulo,
    Power,
}

impl BinaryOp {
    /// The method an operator dispatches to when operands are not builtin.
    pub fn method_name(self) -> Option<&'static str> {
        let name = match self {
            BinaryOp::Plus => "plus",
            BinaryOp::Minus => "minus",
            BinaryOp::Multiply => "multiply",
            BinaryOp::Divide => "div",
            BinaryOp::Modulo => "mod",
            BinaryOp::Power => "power",
            BinaryOp::LeftShift => "leftShift",
            BinaryOp::RightShift => "rightShift",
            BinaryOp::BitOr => "or",
            BinaryOp::BitAnd => "and",
            BinaryOp::BitXor => "xor",
            _ => return None,
        };
        Some(name)
    }

    pub fn is_boolean(self) -> bool {
        matches!(
            self,
            BinaryOp::Or
                | BinaryOp::And
                | BinaryOp::Eq
                | BinaryOp::NotEq
                | BinaryOp::RegexMatch
                | BinaryOp::Lt
                | BinaryOp::LtEq
                | BinaryOp::Gt
                | BinaryOp::GtEq
                | BinaryOp::In
                | BinaryOp::Instanceof
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Negate,
    Plus,
    Not,
    BitwiseNegate,
    Increment,
    Decrement,
}

#[derive(Debug, Clone, PartialEq)]
pub enum MapKey {
    /// `name: value` with a bare or quoted key
    Name(String),
    /// `(expr): value` or a non-string literal key
    Expr(ExprId),
}

#[derive(Debug, Clone, PartialEq)]
pub struct MapEntry {
    pub key: MapKey,
    pub key_span: Span,
    pub value: ExprId,
}

#[derive(Debug, Clone, PartialEq)]
pub enum ExprKind {
    Literal(LiteralKind),
    List(Vec<ExprId>),
    Map(Vec<MapEntry>),
    Ident(String),
    This,
    Super,
    Property {
        receiver: ExprId,
        name: String,
        name_span: Span,
        safe: bool,
        spread: bool,
    },
    /// A method call; `receiver` is `None` for unqualified calls. Named
    /// arguments are gathered into a leading map literal, trailing closures
    /// are appended to `args`.
    Call {
        receiver: Option<ExprId>,
        name: String,
        name_span: Span,
        args: Vec<ExprId>,
        safe: bool,
        spread: bool,
    },
    New {
        ty: TypeNode,
        args: Vec<ExprId>,
    },
    Closure {
        params: Vec<Param>,
        /// False when the closure relies on the implicit `it`
        explicit_params: bool,
        body: Vec<StmtId>,
    },
    Binary {
        op: BinaryOp,
        lhs: ExprId,
        rhs: ExprId,
    },
    Unary {
        op: UnaryOp,
        operand: ExprId,
        prefix: bool,
    },
    Assign {
        op: Option<BinaryOp>,
        target: ExprId,
        value: ExprId,
    },
    Index {
        receiver: ExprId,
        index: ExprId,
        safe: bool,
    },
    Cast {
        ty: TypeNode,
        expr: ExprId,
    },
    Paren(ExprId),
    /// `cond ? a : b`; `then` is `None` for the elvis form `cond ?: b`
    Ternary {
        cond: ExprId,
        then: Option<ExprId>,
        otherwise: ExprId,
    },
    Error,
}

impl ExprKind {
    pub fn children(&self) -> Vec<ExprId> {
        match self {
            ExprKind::List(items) => items.clone(),
            ExprKind::Map(entries) => entries
                .iter()
                .flat_map(|e| {
                    let key = match e.key {
                        MapKey::Expr(k) => Some(k),
                        MapKey::Name(_) => None,
                    };
                    key.into_iter().chain(std::iter::once(e.value))
                })
                .collect(),
            ExprKind::Property { receiver, .. } => vec![*receiver],
            ExprKind::Call { receiver, args, .. } => {
                receiver.iter().copied().chain(args.iter().copied()).collect()
            }
            ExprKind::New { args, .. } => args.clone(),
            ExprKind::Binary { lhs, rhs, .. } => vec![*lhs, *rhs],
            ExprKind::Unary { operand, .. } => vec![*operand],
            ExprKind::Assign { target, value, .. } => vec![*target, *value],
            ExprKind::Index {
                receiver, index, ..
            } => vec![*receiver, *index],
            ExprKind::Cast { expr, .. } => vec![*expr],
            ExprKind::Paren(inner) => vec![*inner],
            ExprKind::Ternary {
                cond,
                then,
                otherwise,
            } => std::iter::once(*cond)
                .chain(then.iter().copied())
                .chain(std::iter::once(*otherwise))
                .collect(),
            ExprKind::Closure { params, .. } => params.iter().filter_map(|p| p.default).collect(),
            ExprKind::Literal(_)
            | ExprKind::Ident(_)
            | ExprKind::This
            | ExprKind::Super
            | ExprKind::Error => Vec::new(),
        }
    }

    /// Span of the member name for calls and property accesses.
    pub fn name_span(&self) -> Option<Span> {
        match self {
            ExprKind::Property { name_span, .. } | ExprKind::Call { name_span, .. } => {
                Some(*name_span)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Expr {
    pub kind: ExprKind,
    pub span: Span,
    pub parent: Option<ExprId>,
    pub enclosing_closure: Option<ExprId>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    Class,
    Interface,
    Trait,
    Enum,
}

#[derive(Debug, Clone, PartialEq)]
pub struct MethodDecl {
    pub name: String,
    pub name_span: Span,
    /// `None` for `def` and constructors
    pub return_type: Option<TypeNode>,
    pub type_params: Vec<String>,
    pub params: Vec<Param>,
    pub body: Vec<StmtId>,
    pub is_static: bool,
    pub is_constructor: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FieldDecl {
    pub name: String,
    pub name_span: Span,
    pub ty: Option<TypeNode>,
    pub init: Option<ExprId>,
    pub is_static: bool,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ClassDecl {
    pub name: String,
    pub name_span: Span,
    pub kind: ClassKind,
    pub type_params: Vec<String>,
    pub extends: Vec<TypeNode>,
    pub implements: Vec<TypeNode>,
    pub fields: Vec<FieldDecl>,
    pub methods: Vec<MethodDecl>,
    pub enum_constants: Vec<(String, Span)>,
    pub span: Span,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ImportDecl {
    pub path: String,
    pub is_static: bool,
    pub is_star: bool,
    pub alias: Option<String>,
    pub span: Span,
}

impl ImportDecl {
    /// Simple name this import makes visible, for single-type imports.
    pub fn visible_name(&self) -> Option<&str> {
        if self.is_star {
            return None;
        }
        self.alias
            .as_deref()
            .or_else(|| self.path.rsplit('.').next())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CatchClause {
    pub param: Param,
    pub body: Vec<StmtId>,
}

#[derive(Debug, Clone, PartialEq)]
pub enum StmtKind {
    Expr(ExprId),
    VarDecl {
        /// `None` for `def`/`var`
        ty: Option<TypeNode>,
        name: String,
        name_span: Span,
        init: Option<ExprId>,
    },
    Method(MethodDecl),
    Class(ClassDecl),
    Return(Option<ExprId>),
    If {
        cond: ExprId,
        then: Vec<StmtId>,
        otherwise: Vec<StmtId>,
    },
    ForIn {
        var: Param,
        iterable: ExprId,
        body: Vec<StmtId>,
    },
    ForClassic {
        init: Vec<StmtId>,
        cond: Option<ExprId>,
        update: Option<ExprId>,
        body: Vec<StmtId>,
    },
    While {
        cond: ExprId,
        body: Vec<StmtId>,
    },
    Try {
        body: Vec<StmtId>,
        catches: Vec<CatchClause>,
        finally: Vec<StmtId>,
    },
    Throw(ExprId),
    Block(Vec<StmtId>),
    Jump,
    Error,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Stmt {
    pub kind: StmtKind,
    pub span: Span,
}

/// The parsed form of one source text.
#[derive(Debug, Clone, Default)]
pub struct CompilationUnit {
    pub exprs: Vec<Expr>,
    pub stmts: Vec<Stmt>,
    /// Top-level statements in source order
    pub top_level: Vec<StmtId>,
    pub package: Option<String>,
    pub imports: Vec<ImportDecl>,
    pub errors: Vec<ParseError>,
}

impl CompilationUnit {
    pub fn expr(&self, id: ExprId) -> &Expr {
        &self.exprs[id.index()]
    }

    pub fn stmt(&self, id: StmtId) -> &Stmt {
        &self.stmts[id.index()]
    }

    pub fn expr_ids(&self) -> impl Iterator<Item = ExprId> + '_ {
        (0..self.exprs.len() as u32).map(ExprId)
    }

    pub fn stmt_ids(&self) -> impl Iterator<Item = StmtId> + '_ {
        (0..self.stmts.len() as u32).map(StmtId)
    }

    pub fn parent(&self, id: ExprId) -> Option<ExprId> {
        self.expr(id).parent
    }

    /// Skip through parentheses to the wrapped expression.
    pub fn unparen(&self, mut id: ExprId) -> ExprId {
        while let ExprKind::Paren(inner) = self.expr(id).kind {
            id = inner;
        }
        id
    }

    /// Enclosing closures of `id`, innermost first.
    pub fn enclosing_closures(&self, id: ExprId) -> impl Iterator<Item = ExprId> + '_ {
        std::iter::successors(self.expr(id).enclosing_closure, move |c| {
            self.expr(*c).enclosing_closure
        })
    }

    /// Dotted name for `a.b.C` style expressions made only of identifiers
    /// and property accesses.
    pub fn dotted_name(&self, id: ExprId) -> Option<String> {
        match &self.expr(id).kind {
            ExprKind::Ident(name) => Some(name.clone()),
            ExprKind::Property {
                receiver,
                name,
                safe: false,
                spread: false,
                ..
            } => {
                let prefix = self.dotted_name(*receiver)?;
                Some(format!("{prefix}.{name}"))
            }
            _ => None,
        }
    }

    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}
