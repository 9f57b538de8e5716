use super::ParseError;
use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use groovyscope_api::Span;

/// Deepest nesting of expressions, statements and types the parser follows.
/// Anything nested deeper is reported and skipped as one `Error` node.
pub const MAX_NESTING: usize = 256;

const PRIMITIVE_NAMES: &[&str] = &[
    "int", "long", "short", "byte", "float", "double", "boolean", "char", "void",
];

/// Declarations shared by statement and class-member parsing.
enum Decl {
    Vars {
        ty: Option<TypeNode>,
        is_static: bool,
        declarators: Vec<(String, Span, Option<ExprId>)>,
    },
    Method(MethodDecl),
    Class(ClassDecl),
}

/// Recursive-descent parser with a Pratt loop for binary operators.
///
/// Newline significance is tracked on a stack: parentheses and brackets make
/// newlines insignificant, braces make them significant again.
pub struct Parser<'src> {
    source: &'src str,
    tokens: Vec<Token>,
    pos: usize,
    last_end: usize,
    newline_modes: Vec<bool>,
    closure_stack: Vec<ExprId>,
    depth: usize,
    unit: CompilationUnit,
}

impl<'src> Parser<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            tokens: Lexer::tokenize(source),
            pos: 0,
            last_end: 0,
            newline_modes: vec![true],
            closure_stack: Vec::new(),
            depth: 0,
            unit: CompilationUnit::default(),
        }
    }

    pub fn parse(mut self) -> CompilationUnit {
        let mut top = Vec::new();
        loop {
            self.skip_separators();
            match self.peek().kind {
                TokenKind::Eof => break,
                TokenKind::RBrace => {
                    let tok = self.bump();
                    self.error("unmatched '}'", tok.span);
                }
                _ => self.parse_statement_into(&mut top),
            }
        }
        self.unit.top_level = top;
        self.link_parents();
        self.unit
    }

    // ---------------------------------------------------------------------
    // Token access
    // ---------------------------------------------------------------------

    fn newlines_significant(&self) -> bool {
        self.newline_modes.last().copied().unwrap_or(true)
    }

    fn token_at(&self, index: usize) -> Token {
        let last = self.tokens.len().saturating_sub(1);
        self.tokens[index.min(last)]
    }

    fn peek_index(&self) -> usize {
        let mut i = self.pos;
        if !self.newlines_significant() {
            while self.token_at(i).kind == TokenKind::Newline {
                i += 1;
            }
        }
        i
    }

    /// Next token, honouring the current newline mode.
    fn peek(&self) -> Token {
        self.token_at(self.peek_index())
    }

    fn peek_kind(&self) -> TokenKind {
        self.peek().kind
    }

    /// Next token without skipping newlines.
    fn raw(&self) -> Token {
        self.token_at(self.pos)
    }

    /// The `n`-th upcoming token ignoring newlines.
    fn look(&self, n: usize) -> Token {
        let mut i = self.pos;
        let mut seen = 0;
        loop {
            let tok = self.token_at(i);
            if tok.kind == TokenKind::Eof {
                return tok;
            }
            if tok.kind != TokenKind::Newline {
                if seen == n {
                    return tok;
                }
                seen += 1;
            }
            i += 1;
        }
    }

    fn bump(&mut self) -> Token {
        let i = self.peek_index();
        let tok = self.token_at(i);
        if tok.kind != TokenKind::Eof {
            self.pos = i + 1;
            self.last_end = tok.span.end;
        } else {
            self.pos = i;
        }
        tok
    }

    fn at(&self, kind: TokenKind) -> bool {
        self.peek_kind() == kind
    }

    fn eat(&mut self, kind: TokenKind) -> bool {
        if self.at(kind) {
            self.bump();
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: TokenKind, what: &str) -> bool {
        if self.eat(kind) {
            return true;
        }
        let tok = self.peek();
        self.error(format!("expected {what}"), tok.span);
        false
    }

    fn skip_newlines(&mut self) {
        while self.raw().kind == TokenKind::Newline {
            self.pos += 1;
        }
    }

    fn skip_separators(&mut self) {
        while matches!(self.raw().kind, TokenKind::Newline | TokenKind::Semi) {
            self.pos += 1;
        }
    }

    fn text(&self, tok: Token) -> &'src str {
        tok.text(self.source)
    }

    fn error(&mut self, message: impl Into<String>, span: Span) {
        self.unit.errors.push(ParseError {
            message: message.into(),
            span,
        });
    }

    fn span_from(&self, start: usize) -> Span {
        Span::new(start, self.last_end.max(start))
    }

    fn checkpoint(&self) -> (usize, usize) {
        (self.pos, self.last_end)
    }

    fn rewind(&mut self, (pos, last_end): (usize, usize)) {
        self.pos = pos;
        self.last_end = last_end;
    }

    fn with_newlines<T>(&mut self, significant: bool, f: impl FnOnce(&mut Self) -> T) -> T {
        self.newline_modes.push(significant);
        let out = f(self);
        self.newline_modes.pop();
        out
    }

    /// Enter one nesting level, or report that the input nests too deeply.
    fn enter(&mut self) -> bool {
        if self.depth >= MAX_NESTING {
            let span = self.peek().span;
            self.error(format!("nesting deeper than {MAX_NESTING} levels"), span);
            return false;
        }
        self.depth += 1;
        true
    }

    fn leave(&mut self) {
        self.depth -= 1;
    }

    /// Skip the rest of a too deeply nested construct: up to the first
    /// closing bracket that it did not open, or the end of input.
    fn skip_nested(&mut self) {
        let mut open = 0usize;
        loop {
            let tok = self.raw();
            match tok.kind {
                TokenKind::Eof => return,
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => open += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    if open == 0 {
                        return;
                    }
                    open -= 1;
                }
                _ => {}
            }
            self.pos += 1;
            self.last_end = tok.span.end;
        }
    }

    fn alloc(&mut self, kind: ExprKind, span: Span) -> ExprId {
        let id = ExprId(self.unit.exprs.len() as u32);
        self.unit.exprs.push(Expr {
            kind,
            span,
            parent: None,
            enclosing_closure: self.closure_stack.last().copied(),
        });
        id
    }

    fn alloc_stmt(&mut self, kind: StmtKind, span: Span) -> StmtId {
        let id = StmtId(self.unit.stmts.len() as u32);
        self.unit.stmts.push(Stmt { kind, span });
        id
    }

    fn set_kind(&mut self, id: ExprId, kind: ExprKind, span: Span) {
        let expr = &mut self.unit.exprs[id.index()];
        expr.kind = kind;
        expr.span = span;
    }

    fn link_parents(&mut self) {
        let links: Vec<(ExprId, ExprId)> = self
            .unit
            .expr_ids()
            .flat_map(|id| {
                self.unit
                    .expr(id)
                    .kind
                    .children()
                    .into_iter()
                    .map(move |child| (child, id))
            })
            .collect();
        for (child, parent) in links {
            self.unit.exprs[child.index()].parent = Some(parent);
        }
    }

    // ---------------------------------------------------------------------
    // Statements
    // ---------------------------------------------------------------------

    fn parse_statement_into(&mut self, out: &mut Vec<StmtId>) {
        let start_pos = self.pos;
        if !self.enter() {
            self.skip_nested();
            if self.pos == start_pos {
                self.bump();
            }
            return;
        }
        self.parse_statement_inner(out);
        self.leave();
        self.finish_statement();
        if self.pos == start_pos {
            let tok = self.bump();
            self.error("unexpected token", tok.span);
        }
    }

    /// Statements end at a newline, `;`, `}` or end of input. Anything else
    /// is reported and skipped.
    fn finish_statement(&mut self) {
        let tok = self.raw();
        match tok.kind {
            TokenKind::Newline | TokenKind::Semi => {
                self.pos += 1;
            }
            TokenKind::RBrace | TokenKind::Eof => {}
            _ => {
                self.error("expected end of statement", tok.span);
                self.recover();
            }
        }
    }

    fn recover(&mut self) {
        let mut depth = 0usize;
        loop {
            let tok = self.raw();
            match tok.kind {
                TokenKind::Eof => return,
                TokenKind::Newline | TokenKind::Semi if depth == 0 => return,
                TokenKind::RBrace if depth == 0 => return,
                TokenKind::LBrace | TokenKind::LParen | TokenKind::LBracket => depth += 1,
                TokenKind::RBrace | TokenKind::RParen | TokenKind::RBracket => {
                    depth = depth.saturating_sub(1)
                }
                _ => {}
            }
            self.pos += 1;
            self.last_end = tok.span.end;
        }
    }

    fn parse_statement_inner(&mut self, out: &mut Vec<StmtId>) {
        self.skip_annotations();
        let tok = self.peek();
        let start = tok.span.start;
        match tok.kind {
            TokenKind::Import => self.parse_import(),
            TokenKind::Package => {
                self.bump();
                let name = self.parse_dotted_name();
                self.unit.package = Some(name);
            }
            TokenKind::If => {
                let id = self.parse_if();
                out.push(id);
            }
            TokenKind::For => {
                let id = self.parse_for();
                out.push(id);
            }
            TokenKind::While => {
                self.bump();
                self.expect(TokenKind::LParen, "'('");
                let cond = self.with_newlines(false, |p| p.parse_expr());
                self.expect(TokenKind::RParen, "')'");
                let body = self.parse_body();
                let id = self.alloc_stmt(StmtKind::While { cond, body }, self.span_from(start));
                out.push(id);
            }
            TokenKind::Return => {
                self.bump();
                let value = if self.at_statement_end() {
                    None
                } else {
                    Some(self.parse_expr())
                };
                let id = self.alloc_stmt(StmtKind::Return(value), self.span_from(start));
                out.push(id);
            }
            TokenKind::Throw => {
                self.bump();
                let value = self.parse_expr();
                let id = self.alloc_stmt(StmtKind::Throw(value), self.span_from(start));
                out.push(id);
            }
            TokenKind::Break | TokenKind::Continue => {
                self.bump();
                if self.raw().kind == TokenKind::Ident {
                    self.bump();
                }
                let id = self.alloc_stmt(StmtKind::Jump, self.span_from(start));
                out.push(id);
            }
            TokenKind::Try => {
                let id = self.parse_try();
                out.push(id);
            }
            TokenKind::LBrace => {
                let body = self.parse_block();
                let id = self.alloc_stmt(StmtKind::Block(body), self.span_from(start));
                out.push(id);
            }
            _ => {
                if let Some(decl) = self.try_parse_declaration(None) {
                    self.push_decl(decl, out);
                } else {
                    let expr = self.parse_expression_statement();
                    let span = self.unit.expr(expr).span;
                    let id = self.alloc_stmt(StmtKind::Expr(expr), span);
                    out.push(id);
                }
            }
        }
    }

    fn push_decl(&mut self, decl: Decl, out: &mut Vec<StmtId>) {
        match decl {
            Decl::Vars {
                ty, declarators, ..
            } => {
                for (name, name_span, init) in declarators {
                    let end = init
                        .map(|i| self.unit.expr(i).span.end)
                        .unwrap_or(name_span.end);
                    let start = ty.as_ref().map(|t| t.span.start).unwrap_or(name_span.start);
                    let kind = StmtKind::VarDecl {
                        ty: ty.clone(),
                        name,
                        name_span,
                        init,
                    };
                    let id = self.alloc_stmt(kind, Span::new(start, end));
                    out.push(id);
                }
            }
            Decl::Method(method) => {
                let span = method.span;
                let id = self.alloc_stmt(StmtKind::Method(method), span);
                out.push(id);
            }
            Decl::Class(class) => {
                let span = class.span;
                let id = self.alloc_stmt(StmtKind::Class(class), span);
                out.push(id);
            }
        }
    }

    fn at_statement_end(&self) -> bool {
        matches!(
            self.raw().kind,
            TokenKind::Newline | TokenKind::Semi | TokenKind::RBrace | TokenKind::Eof
        )
    }

    fn parse_import(&mut self) {
        let start = self.bump().span.start;
        let is_static = self.eat(TokenKind::Static);
        let path = self.parse_dotted_name();
        let mut is_star = false;
        if self.raw().kind == TokenKind::Dot && self.token_at(self.pos + 1).kind == TokenKind::Star
        {
            self.bump();
            self.bump();
            is_star = true;
        }
        let alias = if self.eat(TokenKind::As) {
            let tok = self.bump();
            Some(self.text(tok).to_string())
        } else {
            None
        };
        let span = self.span_from(start);
        self.unit.imports.push(ImportDecl {
            path,
            is_static,
            is_star,
            alias,
            span,
        });
    }

    fn parse_dotted_name(&mut self) -> String {
        let mut name = String::new();
        let tok = self.peek();
        if tok.kind != TokenKind::Ident && !tok.kind.is_keyword() {
            self.error("expected name", tok.span);
            return name;
        }
        self.bump();
        name.push_str(self.text(tok));
        while self.raw().kind == TokenKind::Dot {
            let next = self.token_at(self.pos + 1);
            if next.kind != TokenKind::Ident && !next.kind.is_keyword() {
                break;
            }
            self.bump();
            self.bump();
            name.push('.');
            name.push_str(self.text(next));
        }
        name
    }

    fn skip_annotations(&mut self) {
        while self.at(TokenKind::At) && self.look(1).kind == TokenKind::Ident {
            self.bump();
            self.parse_dotted_name();
            if self.raw().kind == TokenKind::LParen {
                self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
            }
            self.skip_newlines();
        }
    }

    fn skip_balanced(&mut self, open: TokenKind, close: TokenKind) {
        let mut depth = 0usize;
        loop {
            let tok = self.raw();
            self.pos += 1;
            self.last_end = tok.span.end;
            if tok.kind == open {
                depth += 1;
            } else if tok.kind == close {
                depth = depth.saturating_sub(1);
                if depth == 0 {
                    return;
                }
            } else if tok.kind == TokenKind::Eof {
                self.pos -= 1;
                return;
            }
        }
    }

    fn parse_block(&mut self) -> Vec<StmtId> {
        let mut body = Vec::new();
        if !self.expect(TokenKind::LBrace, "'{'") {
            return body;
        }
        self.with_newlines(true, |p| {
            loop {
                p.skip_separators();
                match p.raw().kind {
                    TokenKind::RBrace | TokenKind::Eof => break,
                    _ => p.parse_statement_into(&mut body),
                }
            }
        });
        self.expect(TokenKind::RBrace, "'}'");
        body
    }

    /// A braced block, or a single statement for `if (x) foo()`.
    fn parse_body(&mut self) -> Vec<StmtId> {
        self.skip_newlines();
        if self.at(TokenKind::LBrace) {
            return self.parse_block();
        }
        let mut body = Vec::new();
        self.with_newlines(true, |p| p.parse_statement_inner(&mut body));
        body
    }

    fn parse_if(&mut self) -> StmtId {
        let start = self.bump().span.start;
        self.expect(TokenKind::LParen, "'('");
        let cond = self.with_newlines(false, |p| p.parse_expr());
        self.expect(TokenKind::RParen, "')'");
        let then = self.parse_body();

        // `else` may sit on the next line
        let save = self.pos;
        self.skip_separators();
        let otherwise = if self.eat(TokenKind::Else) {
            self.skip_newlines();
            if self.at(TokenKind::If) {
                vec![self.parse_if()]
            } else {
                self.parse_body()
            }
        } else {
            self.pos = save;
            Vec::new()
        };
        self.alloc_stmt(
            StmtKind::If {
                cond,
                then,
                otherwise,
            },
            self.span_from(start),
        )
    }

    fn parse_for(&mut self) -> StmtId {
        let start = self.bump().span.start;
        self.expect(TokenKind::LParen, "'('");

        let is_for_in = {
            let mut i = 0;
            loop {
                let kind = self.look(i).kind;
                match kind {
                    TokenKind::In | TokenKind::Colon => break true,
                    TokenKind::Semi
                    | TokenKind::RParen
                    | TokenKind::Eof
                    | TokenKind::Eq
                    | TokenKind::LBrace => break false,
                    _ => i += 1,
                }
            }
        };

        let kind = self.with_newlines(false, |p| {
            if is_for_in {
                let var = p.parse_param(&[TokenKind::In, TokenKind::Colon]);
                if !p.eat(TokenKind::In) {
                    p.expect(TokenKind::Colon, "'in' or ':'");
                }
                let iterable = p.parse_expr();
                p.expect(TokenKind::RParen, "')'");
                (Some((var, iterable)), Vec::new(), None, None)
            } else {
                let mut init = Vec::new();
                if !p.at(TokenKind::Semi) {
                    p.parse_statement_inner(&mut init);
                }
                p.expect(TokenKind::Semi, "';'");
                let cond = (!p.at(TokenKind::Semi)).then(|| p.parse_expr());
                p.expect(TokenKind::Semi, "';'");
                let update = (!p.at(TokenKind::RParen)).then(|| p.parse_expr());
                p.expect(TokenKind::RParen, "')'");
                (None, init, cond, update)
            }
        });

        let body = self.parse_body();
        let stmt = match kind {
            (Some((var, iterable)), ..) => StmtKind::ForIn {
                var,
                iterable,
                body,
            },
            (None, init, cond, update) => StmtKind::ForClassic {
                init,
                cond,
                update,
                body,
            },
        };
        self.alloc_stmt(stmt, self.span_from(start))
    }

    fn parse_try(&mut self) -> StmtId {
        let start = self.bump().span.start;
        // try-with-resources
        if self.at(TokenKind::LParen) {
            self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
        }
        let body = self.parse_block();
        let mut catches = Vec::new();
        let mut finally = Vec::new();
        loop {
            let save = self.pos;
            self.skip_separators();
            if self.eat(TokenKind::Catch) {
                self.expect(TokenKind::LParen, "'('");
                let param = self.with_newlines(false, |p| {
                    let mut param = p.parse_param(&[TokenKind::RParen, TokenKind::Pipe]);
                    // multi-catch keeps the first alternative
                    while p.eat(TokenKind::Pipe) {
                        let rest = p.parse_param(&[TokenKind::RParen, TokenKind::Pipe]);
                        param.name = rest.name;
                        param.name_span = rest.name_span;
                    }
                    param
                });
                self.expect(TokenKind::RParen, "')'");
                let body = self.parse_block();
                catches.push(CatchClause { param, body });
            } else if self.eat(TokenKind::Finally) {
                finally = self.parse_block();
            } else {
                self.pos = save;
                break;
            }
        }
        self.alloc_stmt(
            StmtKind::Try {
                body,
                catches,
                finally,
            },
            self.span_from(start),
        )
    }

    // ---------------------------------------------------------------------
    // Declarations
    // ---------------------------------------------------------------------

    fn is_modifier(kind: TokenKind) -> bool {
        matches!(
            kind,
            TokenKind::Static
                | TokenKind::Final
                | TokenKind::Public
                | TokenKind::Private
                | TokenKind::Protected
                | TokenKind::Abstract
        )
    }

    /// Parse a class, method or variable declaration if one starts here.
    /// Restores the position and returns `None` otherwise.
    fn try_parse_declaration(&mut self, class_name: Option<&str>) -> Option<Decl> {
        let save = self.checkpoint();
        let start = self.peek().span.start;
        let mut is_static = false;
        let mut has_modifiers = false;
        let mut has_def = false;
        loop {
            let kind = self.peek_kind();
            if Self::is_modifier(kind) {
                is_static |= kind == TokenKind::Static;
                has_modifiers = true;
                self.bump();
            } else if matches!(kind, TokenKind::Def | TokenKind::Var) {
                has_def = true;
                self.bump();
            } else if kind == TokenKind::At {
                self.skip_annotations();
            } else {
                break;
            }
        }

        if matches!(
            self.peek_kind(),
            TokenKind::Class | TokenKind::Interface | TokenKind::Trait | TokenKind::Enum
        ) {
            return Some(Decl::Class(self.parse_class(start)));
        }

        let type_params = if self.at(TokenKind::Lt) {
            self.parse_type_params()
        } else {
            Vec::new()
        };

        if self.peek_kind() == TokenKind::Ident {
            let tok = self.peek();
            let follow = self.token_at(self.peek_index() + 1).kind;
            let is_constructor = follow == TokenKind::LParen
                && class_name.is_some_and(|name| self.text(tok) == name);
            if is_constructor
                || ((has_def || has_modifiers) && follow == TokenKind::LParen)
            {
                return Some(Decl::Method(self.parse_method_rest(
                    start,
                    None,
                    type_params,
                    is_static,
                    is_constructor,
                )));
            }
            if (has_def || has_modifiers) && is_decl_follow(follow) {
                return Some(self.parse_var_declarators(None, is_static));
            }
        }
        if has_def && self.at(TokenKind::LParen) {
            return Some(self.parse_multi_assign());
        }
        if has_modifiers && self.at(TokenKind::LBrace) {
            // static initializer
            self.parse_block();
            return Some(Decl::Vars {
                ty: None,
                is_static,
                declarators: Vec::new(),
            });
        }

        let type_pos = self.checkpoint();
        if let Some(ty) = self.parse_type() {
            let plausible = has_modifiers || has_def || is_plausible_type(&ty);
            if plausible && self.raw().kind == TokenKind::Ident {
                let follow = self.token_at(self.pos + 1).kind;
                if follow == TokenKind::LParen {
                    return Some(Decl::Method(self.parse_method_rest(
                        start,
                        Some(ty),
                        type_params,
                        is_static,
                        false,
                    )));
                }
                if is_decl_follow(follow) {
                    return Some(self.parse_var_declarators(Some(ty), is_static));
                }
            }
        }

        if has_modifiers || has_def {
            // the caller parses whatever follows the modifiers as an expression
            self.rewind(type_pos);
            let tok = self.peek();
            self.error("expected declaration", tok.span);
        } else {
            self.rewind(save);
        }
        None
    }

    fn parse_type_params(&mut self) -> Vec<String> {
        let mut params = Vec::new();
        self.bump();
        self.with_newlines(false, |p| {
            while !p.at(TokenKind::Gt) && !p.at(TokenKind::Eof) {
                let tok = p.bump();
                if tok.kind == TokenKind::Ident {
                    params.push(p.text(tok).to_string());
                }
                if p.eat(TokenKind::Extends) {
                    p.parse_type();
                    while p.eat(TokenKind::Amp) {
                        p.parse_type();
                    }
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::Gt, "'>'");
        });
        params
    }

    fn parse_var_declarators(&mut self, ty: Option<TypeNode>, is_static: bool) -> Decl {
        let mut declarators = Vec::new();
        loop {
            let tok = self.peek();
            if tok.kind != TokenKind::Ident {
                self.error("expected variable name", tok.span);
                break;
            }
            self.bump();
            let name = self.text(tok).to_string();
            let init = if self.eat(TokenKind::Eq) {
                self.skip_newlines();
                Some(self.parse_expr())
            } else {
                None
            };
            declarators.push((name, tok.span, init));
            if self.raw().kind == TokenKind::Comma {
                self.bump();
                self.skip_newlines();
            } else {
                break;
            }
        }
        Decl::Vars {
            ty,
            is_static,
            declarators,
        }
    }

    /// `def (a, b) = expr`
    fn parse_multi_assign(&mut self) -> Decl {
        self.bump();
        let mut names = Vec::new();
        self.with_newlines(false, |p| {
            while !p.at(TokenKind::RParen) && !p.at(TokenKind::Eof) {
                let param = p.parse_param(&[TokenKind::Comma, TokenKind::RParen]);
                names.push((param.name, param.name_span, None));
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RParen, "')'");
        });
        if self.eat(TokenKind::Eq) {
            self.parse_expr();
        }
        Decl::Vars {
            ty: None,
            is_static: false,
            declarators: names,
        }
    }

    fn parse_method_rest(
        &mut self,
        start: usize,
        return_type: Option<TypeNode>,
        type_params: Vec<String>,
        is_static: bool,
        is_constructor: bool,
    ) -> MethodDecl {
        let name_tok = self.bump();
        let name = self.text(name_tok).to_string();
        let params = self.parse_param_list();
        if self.eat(TokenKind::Throws) {
            loop {
                self.parse_type();
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }
        let save = self.pos;
        self.skip_newlines();
        let body = if self.at(TokenKind::LBrace) {
            self.parse_block()
        } else {
            // abstract or interface method
            self.pos = save;
            Vec::new()
        };
        MethodDecl {
            name,
            name_span: name_tok.span,
            return_type,
            type_params,
            params,
            body,
            is_static,
            is_constructor,
            span: self.span_from(start),
        }
    }

    fn parse_param_list(&mut self) -> Vec<Param> {
        let mut params = Vec::new();
        self.expect(TokenKind::LParen, "'('");
        self.with_newlines(false, |p| {
            while !p.at(TokenKind::RParen) && !p.at(TokenKind::Eof) {
                let mut param = p.parse_param(&[TokenKind::Comma, TokenKind::RParen, TokenKind::Eq]);
                if p.eat(TokenKind::Eq) {
                    param.default = Some(p.parse_expr());
                }
                params.push(param);
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RParen, "')'");
        });
        params
    }

    /// One parameter: `name`, `def name`, `Type name` or `Type... name`.
    /// `follow` lists the tokens that may come right after the name.
    fn parse_param(&mut self, follow: &[TokenKind]) -> Param {
        self.skip_annotations();
        let start = self.peek().span.start;
        while matches!(self.peek_kind(), TokenKind::Final | TokenKind::Def | TokenKind::Var) {
            self.bump();
        }
        let untyped = self.peek_kind() == TokenKind::Ident
            && (follow.contains(&self.look(1).kind) || self.look(1).kind == TokenKind::Arrow);
        let (ty, varargs) = if untyped {
            (None, false)
        } else {
            let ty = self.parse_type();
            let varargs = self.eat(TokenKind::Ellipsis);
            (ty, varargs)
        };
        let name_tok = self.peek();
        let name = if name_tok.kind == TokenKind::Ident {
            self.bump();
            self.text(name_tok).to_string()
        } else {
            self.error("expected parameter name", name_tok.span);
            String::new()
        };
        Param {
            name,
            name_span: name_tok.span,
            ty,
            varargs,
            default: None,
            span: self.span_from(start),
        }
    }

    fn parse_class(&mut self, start: usize) -> ClassDecl {
        let kind = match self.bump().kind {
            TokenKind::Interface => ClassKind::Interface,
            TokenKind::Trait => ClassKind::Trait,
            TokenKind::Enum => ClassKind::Enum,
            _ => ClassKind::Class,
        };
        let name_tok = self.peek();
        let name = if name_tok.kind == TokenKind::Ident {
            self.bump();
            self.text(name_tok).to_string()
        } else {
            self.error("expected class name", name_tok.span);
            String::new()
        };
        let type_params = if self.at(TokenKind::Lt) {
            self.parse_type_params()
        } else {
            Vec::new()
        };

        let mut extends = Vec::new();
        let mut implements = Vec::new();
        loop {
            self.skip_newlines();
            let target = if self.eat(TokenKind::Extends) {
                &mut extends
            } else if self.eat(TokenKind::Implements) {
                &mut implements
            } else {
                break;
            };
            loop {
                if let Some(ty) = self.parse_type() {
                    target.push(ty);
                }
                if !self.eat(TokenKind::Comma) {
                    break;
                }
            }
        }

        let mut class = ClassDecl {
            name: name.clone(),
            name_span: name_tok.span,
            kind,
            type_params,
            extends,
            implements,
            fields: Vec::new(),
            methods: Vec::new(),
            enum_constants: Vec::new(),
            span: Span::default(),
        };

        if self.expect(TokenKind::LBrace, "'{'") {
            self.with_newlines(true, |p| {
                if kind == ClassKind::Enum {
                    p.parse_enum_constants(&mut class);
                }
                loop {
                    p.skip_separators();
                    match p.raw().kind {
                        TokenKind::RBrace | TokenKind::Eof => break,
                        _ => {}
                    }
                    let member_start = p.pos;
                    match p.try_parse_declaration(Some(&name)) {
                        Some(Decl::Vars {
                            ty,
                            is_static,
                            declarators,
                            ..
                        }) => {
                            for (field_name, name_span, init) in declarators {
                                let span_start =
                                    ty.as_ref().map(|t| t.span.start).unwrap_or(name_span.start);
                                class.fields.push(FieldDecl {
                                    name: field_name,
                                    name_span,
                                    ty: ty.clone(),
                                    init,
                                    is_static,
                                    span: p.span_from(span_start),
                                });
                            }
                        }
                        Some(Decl::Method(method)) => class.methods.push(method),
                        // nested classes are flattened away
                        Some(Decl::Class(_)) => {}
                        None => {
                            let tok = p.peek();
                            p.error("expected class member", tok.span);
                            p.recover();
                        }
                    }
                    p.finish_statement();
                    if p.pos == member_start {
                        p.bump();
                    }
                }
            });
            self.expect(TokenKind::RBrace, "'}'");
        }
        class.span = self.span_from(start);
        class
    }

    fn parse_enum_constants(&mut self, class: &mut ClassDecl) {
        self.skip_separators();
        loop {
            let tok = self.peek();
            let next = self.token_at(self.peek_index() + 1).kind;
            let is_constant = tok.kind == TokenKind::Ident
                && matches!(
                    next,
                    TokenKind::Comma
                        | TokenKind::Semi
                        | TokenKind::RBrace
                        | TokenKind::Newline
                        | TokenKind::LParen
                        | TokenKind::LBrace
                );
            if !is_constant {
                return;
            }
            self.bump();
            class
                .enum_constants
                .push((self.text(tok).to_string(), tok.span));
            if self.raw().kind == TokenKind::LParen {
                self.skip_balanced(TokenKind::LParen, TokenKind::RParen);
            }
            if self.raw().kind == TokenKind::LBrace {
                self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
            }
            self.skip_newlines();
            if self.raw().kind == TokenKind::Comma {
                self.bump();
                self.skip_newlines();
                continue;
            }
            if self.raw().kind == TokenKind::Semi {
                self.bump();
            }
            return;
        }
    }

    // ---------------------------------------------------------------------
    // Types
    // ---------------------------------------------------------------------

    /// Parse a type reference. Records no errors, so callers may use it
    /// speculatively and rewind.
    fn parse_type(&mut self) -> Option<TypeNode> {
        if !self.enter() {
            return None;
        }
        let ty = self.parse_type_inner();
        self.leave();
        ty
    }

    fn parse_type_inner(&mut self) -> Option<TypeNode> {
        let tok = self.peek();
        let start = tok.span.start;
        if tok.kind == TokenKind::Question {
            self.bump();
            let mut node = TypeNode::simple("?", tok.span);
            let upper = match self.peek_kind() {
                TokenKind::Extends => Some(true),
                TokenKind::Super => Some(false),
                _ => None,
            };
            if let Some(upper) = upper {
                self.bump();
                let bound = self.parse_type()?;
                node.bound = Some((Box::new(bound), upper));
            }
            node.span = self.span_from(start);
            return Some(node);
        }
        if tok.kind != TokenKind::Ident {
            return None;
        }
        self.bump();
        let mut name = self.text(tok).to_string();
        while self.raw().kind == TokenKind::Dot
            && self.token_at(self.pos + 1).kind == TokenKind::Ident
        {
            self.bump();
            let part = self.bump();
            name.push('.');
            name.push_str(self.text(part));
        }

        let mut args = Vec::new();
        if self.raw().kind == TokenKind::Lt {
            self.bump();
            if self.raw().kind != TokenKind::Gt {
                loop {
                    args.push(self.parse_type()?);
                    if self.raw().kind != TokenKind::Comma {
                        break;
                    }
                    self.bump();
                }
            }
            if self.raw().kind != TokenKind::Gt {
                return None;
            }
            self.bump();
        }

        let mut dims = 0;
        while self.raw().kind == TokenKind::LBracket
            && self.token_at(self.pos + 1).kind == TokenKind::RBracket
        {
            self.bump();
            self.bump();
            dims += 1;
        }

        Some(TypeNode {
            name,
            args,
            dims,
            bound: None,
            span: self.span_from(start),
        })
    }

    // ---------------------------------------------------------------------
    // Expressions
    // ---------------------------------------------------------------------

    /// An expression statement, turning `foo a, b` and `x.foo a` into calls.
    fn parse_expression_statement(&mut self) -> ExprId {
        let expr = self.parse_expr();
        let convertible = matches!(
            self.unit.expr(expr).kind,
            ExprKind::Ident(_) | ExprKind::Property { .. }
        );
        if convertible && self.starts_command_arg() {
            let args = self.parse_command_args();
            self.convert_to_call(expr, args);
        }
        expr
    }

    fn starts_command_arg(&self) -> bool {
        let tok = self.raw();
        tok.kind.is_literal()
            || matches!(
                tok.kind,
                TokenKind::Ident
                    | TokenKind::True
                    | TokenKind::False
                    | TokenKind::Null
                    | TokenKind::New
                    | TokenKind::This
                    | TokenKind::Super
            )
    }

    fn parse_command_args(&mut self) -> Vec<ExprId> {
        let mut positional = Vec::new();
        let mut named = Vec::new();
        let start = self.peek().span.start;
        loop {
            self.parse_argument(&mut positional, &mut named);
            if self.raw().kind != TokenKind::Comma {
                break;
            }
            self.bump();
            self.skip_newlines();
        }
        self.assemble_args(start, positional, named)
    }

    fn convert_to_call(&mut self, id: ExprId, args: Vec<ExprId>) {
        let expr = self.unit.expr(id);
        let end = args
            .last()
            .map(|a| self.unit.expr(*a).span.end)
            .unwrap_or(expr.span.end);
        let span = Span::new(expr.span.start, end.max(expr.span.end));
        let kind = match &expr.kind {
            ExprKind::Ident(name) => ExprKind::Call {
                receiver: None,
                name: name.clone(),
                name_span: expr.span,
                args,
                safe: false,
                spread: false,
            },
            ExprKind::Property {
                receiver,
                name,
                name_span,
                safe,
                spread,
            } => ExprKind::Call {
                receiver: Some(*receiver),
                name: name.clone(),
                name_span: *name_span,
                args,
                safe: *safe,
                spread: *spread,
            },
            ExprKind::Call {
                receiver,
                name,
                name_span,
                args: existing,
                safe,
                spread,
            } => {
                let mut all = existing.clone();
                all.extend(args);
                ExprKind::Call {
                    receiver: *receiver,
                    name: name.clone(),
                    name_span: *name_span,
                    args: all,
                    safe: *safe,
                    spread: *spread,
                }
            }
            _ => return,
        };
        self.set_kind(id, kind, span);
    }

    pub(crate) fn parse_expr(&mut self) -> ExprId {
        self.parse_assignment()
    }

    fn parse_assignment(&mut self) -> ExprId {
        let target = self.parse_ternary();
        let op = match self.peek_kind() {
            TokenKind::Eq => None,
            TokenKind::PlusEq => Some(BinaryOp::Plus),
            TokenKind::MinusEq => Some(BinaryOp::Minus),
            TokenKind::StarEq => Some(BinaryOp::Multiply),
            TokenKind::SlashEq => Some(BinaryOp::Divide),
            _ => return target,
        };
        self.bump();
        self.skip_newlines();
        let value = self.parse_assignment();
        let span = self.unit.expr(target).span.join(self.unit.expr(value).span);
        self.alloc(ExprKind::Assign { op, target, value }, span)
    }

    fn parse_ternary(&mut self) -> ExprId {
        let cond = self.parse_binary(0);
        match self.peek_kind() {
            TokenKind::Question => {
                self.bump();
                self.skip_newlines();
                let then = self.parse_ternary();
                self.skip_newlines_if_next(TokenKind::Colon);
                self.expect(TokenKind::Colon, "':'");
                self.skip_newlines();
                let otherwise = self.parse_ternary();
                let span = self.unit.expr(cond).span.join(self.unit.expr(otherwise).span);
                self.alloc(
                    ExprKind::Ternary {
                        cond,
                        then: Some(then),
                        otherwise,
                    },
                    span,
                )
            }
            TokenKind::Elvis => {
                self.bump();
                self.skip_newlines();
                let otherwise = self.parse_ternary();
                let span = self.unit.expr(cond).span.join(self.unit.expr(otherwise).span);
                self.alloc(
                    ExprKind::Ternary {
                        cond,
                        then: None,
                        otherwise,
                    },
                    span,
                )
            }
            _ => cond,
        }
    }

    fn skip_newlines_if_next(&mut self, kind: TokenKind) {
        if self.look(0).kind == kind {
            self.skip_newlines();
        }
    }

    /// Binding powers `(left, right)` of the infix operator at the cursor,
    /// with the number of tokens it spans.
    fn infix_op(&self) -> Option<(BinaryOp, u8, u8, usize)> {
        let tok = self.peek();
        let (op, l, r) = match tok.kind {
            TokenKind::PipePipe => (BinaryOp::Or, 3, 4),
            TokenKind::AmpAmp => (BinaryOp::And, 5, 6),
            TokenKind::Pipe => (BinaryOp::BitOr, 7, 8),
            TokenKind::Caret => (BinaryOp::BitXor, 9, 10),
            TokenKind::Amp => (BinaryOp::BitAnd, 11, 12),
            TokenKind::EqEq => (BinaryOp::Eq, 13, 14),
            TokenKind::NotEq => (BinaryOp::NotEq, 13, 14),
            TokenKind::Spaceship => (BinaryOp::Compare, 13, 14),
            TokenKind::RegexFind => (BinaryOp::RegexFind, 13, 14),
            TokenKind::RegexMatch => (BinaryOp::RegexMatch, 13, 14),
            TokenKind::Lt => (BinaryOp::Lt, 15, 16),
            TokenKind::LtEq => (BinaryOp::LtEq, 15, 16),
            TokenKind::Gt => {
                let next = self.token_at(self.peek_index() + 1);
                if next.kind == TokenKind::Gt && next.span.start == tok.span.end {
                    return Some((BinaryOp::RightShift, 17, 18, 2));
                }
                (BinaryOp::Gt, 15, 16)
            }
            TokenKind::GtEq => (BinaryOp::GtEq, 15, 16),
            TokenKind::In => (BinaryOp::In, 15, 16),
            TokenKind::Instanceof => (BinaryOp::Instanceof, 15, 16),
            TokenKind::LShift => (BinaryOp::LeftShift, 17, 18),
            TokenKind::DotDot => (BinaryOp::Range, 19, 20),
            TokenKind::DotDotLt => (BinaryOp::RangeExclusive, 19, 20),
            TokenKind::Plus => (BinaryOp::Plus, 21, 22),
            TokenKind::Minus => (BinaryOp::Minus, 21, 22),
            TokenKind::Star => (BinaryOp::Multiply, 23, 24),
            TokenKind::Slash => (BinaryOp::Divide, 23, 24),
            TokenKind::Percent => (BinaryOp::Modulo, 23, 24),
            TokenKind::StarStar => (BinaryOp::Power, 28, 27),
            _ => return None,
        };
        Some((op, l, r, 1))
    }

    fn parse_binary(&mut self, min_bp: u8) -> ExprId {
        let start = self.peek().span.start;
        if !self.enter() {
            self.skip_nested();
            return self.alloc(ExprKind::Error, self.span_from(start));
        }
        let expr = self.parse_binary_inner(min_bp);
        self.leave();
        expr
    }

    fn parse_binary_inner(&mut self, min_bp: u8) -> ExprId {
        let mut lhs = self.parse_unary();
        loop {
            // `as` binds like the relational operators and takes a type
            if self.at(TokenKind::As) {
                if 15 < min_bp {
                    break;
                }
                self.bump();
                let ty = self.parse_type().unwrap_or_else(|| {
                    let span = self.peek().span;
                    TypeNode::simple("java.lang.Object", span)
                });
                let span = self.unit.expr(lhs).span.join(ty.span);
                lhs = self.alloc(ExprKind::Cast { ty, expr: lhs }, span);
                continue;
            }

            let Some((op, l_bp, r_bp, width)) = self.infix_op() else {
                break;
            };
            if l_bp < min_bp {
                break;
            }
            for _ in 0..width {
                self.bump();
            }
            self.skip_newlines();

            let rhs = if op == BinaryOp::Instanceof {
                let ty_tok = self.peek();
                match self.parse_type() {
                    Some(ty) => self.alloc(ExprKind::Ident(ty.name), ty.span),
                    None => {
                        self.error("expected type", ty_tok.span);
                        self.alloc(ExprKind::Error, ty_tok.span)
                    }
                }
            } else {
                self.parse_binary(r_bp)
            };
            let span = self.unit.expr(lhs).span.join(self.unit.expr(rhs).span);
            lhs = self.alloc(ExprKind::Binary { op, lhs, rhs }, span);
        }
        lhs
    }

    fn parse_unary(&mut self) -> ExprId {
        self.skip_newlines();
        let tok = self.peek();
        let op = match tok.kind {
            TokenKind::Minus => UnaryOp::Negate,
            TokenKind::Plus => UnaryOp::Plus,
            TokenKind::Bang => UnaryOp::Not,
            TokenKind::Tilde => UnaryOp::BitwiseNegate,
            TokenKind::PlusPlus => UnaryOp::Increment,
            TokenKind::MinusMinus => UnaryOp::Decrement,
            _ => return self.parse_postfix(),
        };
        self.bump();
        let operand = self.parse_binary(25);
        let span = tok.span.join(self.unit.expr(operand).span);
        self.alloc(
            ExprKind::Unary {
                op,
                operand,
                prefix: true,
            },
            span,
        )
    }

    fn parse_postfix(&mut self) -> ExprId {
        let mut expr = self.parse_primary();
        loop {
            // a line starting with `.` continues the previous expression
            if self.raw().kind == TokenKind::Newline
                && matches!(
                    self.look(0).kind,
                    TokenKind::Dot | TokenKind::SafeDot | TokenKind::SpreadDot
                )
            {
                self.skip_newlines();
            }

            let tok = self.peek();
            let adjacent = self.raw().kind == tok.kind;
            match tok.kind {
                TokenKind::Dot | TokenKind::SafeDot | TokenKind::SpreadDot => {
                    self.bump();
                    expr = self.parse_member(expr, tok.kind);
                }
                TokenKind::LParen if adjacent => {
                    // `closureVar(args)` calls the closure
                    let args = self.parse_call_args();
                    let start = self.unit.expr(expr).span.start;
                    let name_span = self.unit.expr(expr).span;
                    expr = self.alloc(
                        ExprKind::Call {
                            receiver: Some(expr),
                            name: "call".to_string(),
                            name_span,
                            args,
                            safe: false,
                            spread: false,
                        },
                        self.span_from(start),
                    );
                }
                TokenKind::LBracket if adjacent => {
                    self.bump();
                    let index = self.with_newlines(false, |p| {
                        let index = p.parse_expr();
                        p.expect(TokenKind::RBracket, "']'");
                        index
                    });
                    let start = self.unit.expr(expr).span.start;
                    expr = self.alloc(
                        ExprKind::Index {
                            receiver: expr,
                            index,
                            safe: false,
                        },
                        self.span_from(start),
                    );
                }
                TokenKind::PlusPlus | TokenKind::MinusMinus if adjacent => {
                    self.bump();
                    let op = if tok.kind == TokenKind::PlusPlus {
                        UnaryOp::Increment
                    } else {
                        UnaryOp::Decrement
                    };
                    let start = self.unit.expr(expr).span.start;
                    expr = self.alloc(
                        ExprKind::Unary {
                            op,
                            operand: expr,
                            prefix: false,
                        },
                        self.span_from(start),
                    );
                }
                TokenKind::LBrace if adjacent && self.is_closure_callee(expr) => {
                    let closure = self.parse_closure();
                    self.convert_to_call(expr, vec![closure]);
                }
                _ => break,
            }
        }
        expr
    }

    fn is_closure_callee(&self, id: ExprId) -> bool {
        matches!(
            self.unit.expr(id).kind,
            ExprKind::Call { .. } | ExprKind::Property { .. }
        )
    }

    fn parse_member(&mut self, receiver: ExprId, access: TokenKind) -> ExprId {
        self.skip_newlines();
        // method pointers and direct field access
        if matches!(self.peek_kind(), TokenKind::Amp | TokenKind::At) {
            self.bump();
        }
        let tok = self.peek();
        let name = match tok.kind {
            TokenKind::Ident => self.text(tok).to_string(),
            TokenKind::StringLit => unquote(self.text(tok)).to_string(),
            kind if kind.is_keyword() => self.text(tok).to_string(),
            _ => {
                self.error("expected member name", tok.span);
                let span = self.unit.expr(receiver).span;
                return self.alloc(ExprKind::Error, span);
            }
        };
        self.bump();
        let safe = access == TokenKind::SafeDot;
        let spread = access == TokenKind::SpreadDot;
        let start = self.unit.expr(receiver).span.start;

        let next = self.raw().kind;
        if next == TokenKind::LParen {
            let args = self.parse_call_args();
            return self.alloc(
                ExprKind::Call {
                    receiver: Some(receiver),
                    name,
                    name_span: tok.span,
                    args,
                    safe,
                    spread,
                },
                self.span_from(start),
            );
        }
        self.alloc(
            ExprKind::Property {
                receiver,
                name,
                name_span: tok.span,
                safe,
                spread,
            },
            self.span_from(start),
        )
    }

    /// `(args)` followed by any closures on the same line.
    fn parse_call_args(&mut self) -> Vec<ExprId> {
        let start = self.bump().span.start;
        let mut positional = Vec::new();
        let mut named = Vec::new();
        self.with_newlines(false, |p| {
            while !p.at(TokenKind::RParen) && !p.at(TokenKind::Eof) {
                p.parse_argument(&mut positional, &mut named);
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RParen, "')'");
        });
        let mut args = self.assemble_args(start, positional, named);
        while self.raw().kind == TokenKind::LBrace {
            args.push(self.parse_closure());
        }
        args
    }

    fn parse_argument(&mut self, positional: &mut Vec<ExprId>, named: &mut Vec<MapEntry>) {
        let tok = self.peek();
        let is_named = matches!(tok.kind, TokenKind::Ident | TokenKind::StringLit)
            || tok.kind.is_keyword();
        if is_named && self.look(1).kind == TokenKind::Colon {
            self.bump();
            self.bump();
            self.skip_newlines();
            let value = self.parse_expr();
            let key = match tok.kind {
                TokenKind::StringLit => unquote(self.text(tok)).to_string(),
                _ => self.text(tok).to_string(),
            };
            named.push(MapEntry {
                key: MapKey::Name(key),
                key_span: tok.span,
                value,
            });
        } else {
            positional.push(self.parse_expr());
        }
    }

    /// Named arguments become a leading map literal.
    fn assemble_args(
        &mut self,
        start: usize,
        positional: Vec<ExprId>,
        named: Vec<MapEntry>,
    ) -> Vec<ExprId> {
        if named.is_empty() {
            return positional;
        }
        let first = named[0].key_span.start.max(start);
        let end = named
            .last()
            .map(|e| self.unit.expr(e.value).span.end)
            .unwrap_or(first);
        let map = self.alloc(ExprKind::Map(named), Span::new(first, end));
        std::iter::once(map).chain(positional).collect()
    }

    fn parse_primary(&mut self) -> ExprId {
        let tok = self.peek();
        let start = tok.span.start;
        match tok.kind {
            TokenKind::IntegerLit => self.literal(LiteralKind::Integer),
            TokenKind::LongLit => self.literal(LiteralKind::Long),
            TokenKind::BigIntegerLit => self.literal(LiteralKind::BigInteger),
            TokenKind::BigDecimalLit => self.literal(LiteralKind::BigDecimal),
            TokenKind::DoubleLit => self.literal(LiteralKind::Double),
            TokenKind::FloatLit => self.literal(LiteralKind::Float),
            TokenKind::StringLit | TokenKind::SlashyLit => self.literal(LiteralKind::String),
            TokenKind::GStringLit => self.literal(LiteralKind::GString),
            TokenKind::True | TokenKind::False => self.literal(LiteralKind::Boolean),
            TokenKind::Null => self.literal(LiteralKind::Null),
            TokenKind::This => {
                self.bump();
                self.alloc(ExprKind::This, tok.span)
            }
            TokenKind::Super => {
                self.bump();
                self.alloc(ExprKind::Super, tok.span)
            }
            TokenKind::Ident => {
                self.bump();
                let name = self.text(tok).to_string();
                match self.raw().kind {
                    TokenKind::LParen => {
                        let args = self.parse_call_args();
                        self.alloc(
                            ExprKind::Call {
                                receiver: None,
                                name,
                                name_span: tok.span,
                                args,
                                safe: false,
                                spread: false,
                            },
                            self.span_from(start),
                        )
                    }
                    TokenKind::LBrace => {
                        let mut args = Vec::new();
                        while self.raw().kind == TokenKind::LBrace {
                            args.push(self.parse_closure());
                        }
                        self.alloc(
                            ExprKind::Call {
                                receiver: None,
                                name,
                                name_span: tok.span,
                                args,
                                safe: false,
                                spread: false,
                            },
                            self.span_from(start),
                        )
                    }
                    _ => self.alloc(ExprKind::Ident(name), tok.span),
                }
            }
            TokenKind::LParen => {
                if let Some(cast) = self.try_java_cast() {
                    return cast;
                }
                self.bump();
                let inner = self.with_newlines(false, |p| {
                    let inner = p.parse_expr();
                    p.expect(TokenKind::RParen, "')'");
                    inner
                });
                self.alloc(ExprKind::Paren(inner), self.span_from(start))
            }
            TokenKind::LBracket => self.parse_list_or_map(),
            TokenKind::LBrace => self.parse_closure(),
            TokenKind::New => self.parse_new(),
            _ => {
                self.error("expected expression", tok.span);
                if !matches!(
                    tok.kind,
                    TokenKind::RParen
                        | TokenKind::RBracket
                        | TokenKind::RBrace
                        | TokenKind::Newline
                        | TokenKind::Semi
                        | TokenKind::Eof
                ) {
                    self.bump();
                }
                self.alloc(ExprKind::Error, tok.span)
            }
        }
    }

    fn literal(&mut self, kind: LiteralKind) -> ExprId {
        let tok = self.bump();
        self.alloc(ExprKind::Literal(kind), tok.span)
    }

    /// `(Type) expr`, only when the parenthesised part reads as a type and
    /// an operand follows.
    fn try_java_cast(&mut self) -> Option<ExprId> {
        let save = self.checkpoint();
        let start = self.bump().span.start;
        let ty = self.parse_type();
        let is_cast = match &ty {
            Some(ty) => {
                is_plausible_type(ty)
                    && self.raw().kind == TokenKind::RParen
                    && {
                        let next = self.token_at(self.pos + 1).kind;
                        next.is_literal()
                            || matches!(
                                next,
                                TokenKind::Ident
                                    | TokenKind::LParen
                                    | TokenKind::LBracket
                                    | TokenKind::New
                                    | TokenKind::This
                                    | TokenKind::Null
                                    | TokenKind::True
                                    | TokenKind::False
                                    | TokenKind::Bang
                            )
                    }
            }
            None => false,
        };
        match (is_cast, ty) {
            (true, Some(ty)) => {
                self.bump();
                let expr = self.parse_unary();
                Some(self.alloc(ExprKind::Cast { ty, expr }, self.span_from(start)))
            }
            _ => {
                self.rewind(save);
                None
            }
        }
    }

    fn parse_list_or_map(&mut self) -> ExprId {
        let start = self.bump().span.start;
        let kind = self.with_newlines(false, |p| {
            // `[:]`
            if p.at(TokenKind::Colon) && p.look(1).kind == TokenKind::RBracket {
                p.bump();
                p.bump();
                return ExprKind::Map(Vec::new());
            }
            let mut items = Vec::new();
            let mut entries = Vec::new();
            let mut is_map = false;
            while !p.at(TokenKind::RBracket) && !p.at(TokenKind::Eof) {
                if let Some(entry) = p.try_map_entry() {
                    is_map = true;
                    entries.push(entry);
                } else {
                    items.push(p.parse_expr());
                }
                if !p.eat(TokenKind::Comma) {
                    break;
                }
            }
            p.expect(TokenKind::RBracket, "']'");
            if is_map {
                ExprKind::Map(entries)
            } else {
                ExprKind::List(items)
            }
        });
        self.alloc(kind, self.span_from(start))
    }

    fn try_map_entry(&mut self) -> Option<MapEntry> {
        let tok = self.peek();
        let simple_key = matches!(tok.kind, TokenKind::Ident | TokenKind::StringLit)
            || tok.kind.is_keyword();
        if simple_key && self.look(1).kind == TokenKind::Colon {
            self.bump();
            self.bump();
            let key = match tok.kind {
                TokenKind::StringLit => unquote(self.text(tok)).to_string(),
                _ => self.text(tok).to_string(),
            };
            let value = self.parse_expr();
            return Some(MapEntry {
                key: MapKey::Name(key),
                key_span: tok.span,
                value,
            });
        }

        // `(expr): value`, `1: value`, `"$x": value`
        let save = self.checkpoint();
        let marks = (
            self.unit.exprs.len(),
            self.unit.stmts.len(),
            self.unit.errors.len(),
        );
        let key = self.parse_ternary();
        if self.at(TokenKind::Colon) {
            self.bump();
            let value = self.parse_expr();
            return Some(MapEntry {
                key: MapKey::Expr(key),
                key_span: Span::new(tok.span.start, self.unit.expr(key).span.end),
                value,
            });
        }
        // not a map entry; the caller reparses it as a list element
        self.rewind(save);
        self.unit.exprs.truncate(marks.0);
        self.unit.stmts.truncate(marks.1);
        self.unit.errors.truncate(marks.2);
        None
    }

    fn parse_new(&mut self) -> ExprId {
        let start = self.bump().span.start;
        let Some(mut ty) = self.parse_type() else {
            let tok = self.peek();
            self.error("expected type after 'new'", tok.span);
            return self.alloc(ExprKind::Error, self.span_from(start));
        };
        let mut args = Vec::new();
        match self.raw().kind {
            TokenKind::LParen => {
                args = self.parse_call_args();
                // anonymous inner class bodies are skipped
                if matches!(args.last(), Some(a) if matches!(self.unit.expr(*a).kind, ExprKind::Closure { .. }))
                {
                    args.pop();
                }
            }
            TokenKind::LBracket => {
                while self.raw().kind == TokenKind::LBracket {
                    self.bump();
                    self.with_newlines(false, |p| {
                        if !p.at(TokenKind::RBracket) {
                            p.parse_expr();
                        }
                        p.expect(TokenKind::RBracket, "']'");
                    });
                    ty.dims += 1;
                }
                if self.raw().kind == TokenKind::LBrace {
                    self.skip_balanced(TokenKind::LBrace, TokenKind::RBrace);
                }
            }
            _ => {}
        }
        self.alloc(ExprKind::New { ty, args }, self.span_from(start))
    }

    fn parse_closure(&mut self) -> ExprId {
        let start = self.peek().span.start;
        let id = self.alloc(ExprKind::Error, Span::new(start, start));
        self.bump();
        self.closure_stack.push(id);

        let (params, explicit_params, body) = self.with_newlines(true, |p| {
            let mut params = Vec::new();
            let explicit = p.closure_has_params();
            if explicit {
                p.with_newlines(false, |p| {
                    while !p.at(TokenKind::Arrow) && !p.at(TokenKind::Eof) {
                        params.push(p.parse_param(&[TokenKind::Comma, TokenKind::Arrow]));
                        if !p.eat(TokenKind::Comma) {
                            break;
                        }
                    }
                    p.expect(TokenKind::Arrow, "'->'");
                });
            }
            let mut body = Vec::new();
            loop {
                p.skip_separators();
                match p.raw().kind {
                    TokenKind::RBrace | TokenKind::Eof => break,
                    _ => p.parse_statement_into(&mut body),
                }
            }
            (params, explicit, body)
        });
        self.expect(TokenKind::RBrace, "'}'");
        self.closure_stack.pop();

        let span = self.span_from(start);
        self.set_kind(
            id,
            ExprKind::Closure {
                params,
                explicit_params,
                body,
            },
            span,
        );
        id
    }

    /// Scan ahead for `->` before anything that cannot be part of a
    /// parameter list.
    fn closure_has_params(&self) -> bool {
        let mut i = 0;
        loop {
            match self.look(i).kind {
                TokenKind::Arrow => return true,
                TokenKind::Ident
                | TokenKind::Comma
                | TokenKind::Dot
                | TokenKind::Lt
                | TokenKind::Gt
                | TokenKind::Question
                | TokenKind::LBracket
                | TokenKind::RBracket
                | TokenKind::Ellipsis
                | TokenKind::Def
                | TokenKind::Final
                | TokenKind::Extends
                | TokenKind::Super => i += 1,
                _ => return false,
            }
        }
    }
}

fn is_decl_follow(kind: TokenKind) -> bool {
    matches!(
        kind,
        TokenKind::Eq
            | TokenKind::Newline
            | TokenKind::Semi
            | TokenKind::Eof
            | TokenKind::RBrace
            | TokenKind::Comma
    )
}

/// Whether a parsed type reads like a type rather than an expression:
/// primitives, generics, arrays and capitalised names.
fn is_plausible_type(ty: &TypeNode) -> bool {
    if PRIMITIVE_NAMES.contains(&ty.name.as_str()) || !ty.args.is_empty() || ty.dims > 0 {
        return true;
    }
    ty.name
        .rsplit('.')
        .next()
        .and_then(|last| last.chars().next())
        .is_some_and(char::is_uppercase)
}

/// Strip the quotes from a string literal's source text.
pub(crate) fn unquote(text: &str) -> &str {
    for quote in ["'''", "\"\"\"", "'", "\"", "/"] {
        if text.len() >= 2 * quote.len() && text.starts_with(quote) && text.ends_with(quote) {
            return &text[quote.len()..text.len() - quote.len()];
        }
    }
    text
}

#[cfg(test)]
mod tests {
    use super::super::parse;
    use super::*;

    fn top_expr(unit: &CompilationUnit, index: usize) -> &Expr {
        match &unit.stmt(unit.top_level[index]).kind {
            StmtKind::Expr(id) => unit.expr(*id),
            other => panic!("expected expression statement, got {other:?}"),
        }
    }

    #[test]
    fn test_command_call_with_string_arg() {
        let unit = parse("println 'hi'");
        assert!(unit.errors.is_empty(), "{:?}", unit.errors);
        match &top_expr(&unit, 0).kind {
            ExprKind::Call {
                receiver: None,
                name,
                args,
                ..
            } => {
                assert_eq!(name, "println");
                assert_eq!(args.len(), 1);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn test_trailing_closure_and_params() {
        let unit = parse("[1, 2].each { a, b -> a }");
        assert!(unit.errors.is_empty(), "{:?}", unit.errors);
        let ExprKind::Call { name, args, .. } = &top_expr(&unit, 0).kind else {
            panic!("expected call");
        };
        assert_eq!(name, "each");
        let closure = unit.expr(args[0]);
        let ExprKind::Closure {
            params,
            explicit_params,
            ..
        } = &closure.kind
        else {
            panic!("expected closure");
        };
        assert!(*explicit_params);
        assert_eq!(params.len(), 2);
        let StmtKind::Expr(call) = unit.stmt(unit.top_level[0]).kind else {
            panic!("expected expression statement");
        };
        assert_eq!(closure.parent, Some(call));
    }

    #[test]
    fn test_typed_declaration_then_member_call() {
        let unit = parse("Writer w\nw.leftShift");
        assert!(unit.errors.is_empty(), "{:?}", unit.errors);
        assert!(matches!(
            &unit.stmt(unit.top_level[0]).kind,
            StmtKind::VarDecl { ty: Some(t), name, .. } if t.name == "Writer" && name == "w"
        ));
        assert!(matches!(
            &top_expr(&unit, 1).kind,
            ExprKind::Property { name, .. } if name == "leftShift"
        ));
    }

    #[test]
    fn test_named_arguments_become_leading_map() {
        let unit = parse("foo(1, a: 2)");
        let ExprKind::Call { args, .. } = &top_expr(&unit, 0).kind else {
            panic!("expected call");
        };
        assert!(matches!(unit.expr(args[0]).kind, ExprKind::Map(_)));
        assert!(matches!(
            unit.expr(args[1]).kind,
            ExprKind::Literal(LiteralKind::Integer)
        ));
    }

    #[test]
    fn test_leading_dot_continuation() {
        let unit = parse("[1]\n  .collect { it }\n  .size()");
        assert!(unit.errors.is_empty(), "{:?}", unit.errors);
        assert_eq!(unit.top_level.len(), 1);
        assert!(matches!(
            &top_expr(&unit, 0).kind,
            ExprKind::Call { name, .. } if name == "size"
        ));
    }

    #[test]
    fn test_power_binds_tighter_than_negation() {
        let unit = parse("-2 ** 2");
        let ExprKind::Unary { operand, .. } = top_expr(&unit, 0).kind else {
            panic!("expected unary");
        };
        assert!(matches!(
            unit.expr(operand).kind,
            ExprKind::Binary {
                op: BinaryOp::Power,
                ..
            }
        ));
    }

    #[test]
    fn test_maps_and_casts() {
        let unit = parse("def m = [a: 1, (k): 2]\ndef e = [:]\ndef s = (String) x\ndef t = y as int[]");
        assert!(unit.errors.is_empty(), "{:?}", unit.errors);
        let init = |i: usize| match &unit.stmt(unit.top_level[i]).kind {
            StmtKind::VarDecl { init: Some(e), .. } => unit.expr(*e).kind.clone(),
            other => panic!("unexpected {other:?}"),
        };
        assert!(matches!(init(0), ExprKind::Map(entries) if entries.len() == 2));
        assert!(matches!(init(1), ExprKind::Map(entries) if entries.is_empty()));
        assert!(matches!(init(2), ExprKind::Cast { ty, .. } if ty.name == "String"));
        assert!(matches!(init(3), ExprKind::Cast { ty, .. } if ty.dims == 1));
    }

    #[test]
    fn test_class_with_members() {
        let source = "class Foo<T> extends Bar implements Baz {\n  String name = 'x'\n  static int count\n  Foo(int a) {}\n  def <U> U convert(T value, U... rest) { null }\n}";
        let unit = parse(source);
        assert!(unit.errors.is_empty(), "{:?}", unit.errors);
        let StmtKind::Class(class) = &unit.stmt(unit.top_level[0]).kind else {
            panic!("expected class");
        };
        assert_eq!(class.type_params, vec!["T".to_string()]);
        assert_eq!(class.fields.len(), 2);
        assert!(class.fields[1].is_static);
        assert_eq!(class.methods.len(), 2);
        assert!(class.methods[0].is_constructor);
        assert!(class.methods[1].params[1].varargs);
    }

    #[test]
    fn test_errors_are_collected_without_stalling() {
        let unit = parse("def x = \nfoo(]\nprintln 1");
        assert!(unit.has_errors());
        assert!(unit.top_level.len() >= 2);
    }

    #[test]
    fn test_deep_nesting_is_an_error_not_a_crash() {
        let depth = 10_000;
        let source = format!("{}1{}\nprintln 2", "(".repeat(depth), ")".repeat(depth));
        let unit = parse(&source);
        assert!(unit.errors.iter().any(|e| e.message.contains("nesting")));
        assert_eq!(unit.top_level.len(), 2);

        let unit = parse(&"[1].each { ".repeat(depth));
        assert!(unit.has_errors());

        let unit = parse(&format!("{}x", "-".repeat(depth)));
        assert!(unit.has_errors());

        let shallow = format!("{}1{}", "(".repeat(100), ")".repeat(100));
        assert!(parse(&shallow).errors.is_empty());
    }

    #[test]
    fn test_imports() {
        let unit = parse("import java.util.regex.*\nimport groovy.io.FileType as FT\nimport static java.lang.Math.max");
        assert_eq!(unit.imports.len(), 3);
        assert!(unit.imports[0].is_star);
        assert_eq!(unit.imports[0].path, "java.util.regex");
        assert_eq!(unit.imports[1].visible_name(), Some("FT"));
        assert!(unit.imports[2].is_static);
    }

    #[test]
    fn test_for_loops() {
        let unit = parse("for (x in [1]) { x }\nfor (int i = 0; i < 3; i++) {}\nfor (String s : list) {}");
        assert!(unit.errors.is_empty(), "{:?}", unit.errors);
        assert!(matches!(unit.stmt(unit.top_level[0]).kind, StmtKind::ForIn { .. }));
        assert!(matches!(unit.stmt(unit.top_level[1]).kind, StmtKind::ForClassic { .. }));
        assert!(matches!(
            &unit.stmt(unit.top_level[2]).kind,
            StmtKind::ForIn { var, .. } if var.ty.as_ref().is_some_and(|t| t.name == "String")
        ));
    }
}
