//! Tokenizer for the supported Groovy subset.
//!
//! Newlines are significant in Groovy, so they are emitted as tokens and the
//! parser decides where they terminate a statement. A `/` starts a slashy
//! string only where an operand is expected.

use groovyscope_api::Span;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TokenKind {
    Ident,

    // Literals
    IntegerLit,
    LongLit,
    BigIntegerLit,
    BigDecimalLit,
    DoubleLit,
    FloatLit,
    StringLit,
    GStringLit,
    SlashyLit,

    // Keywords
    Def,
    Var,
    Class,
    Interface,
    Trait,
    Enum,
    Extends,
    Implements,
    Import,
    Package,
    Return,
    If,
    Else,
    For,
    In,
    While,
    New,
    True,
    False,
    Null,
    This,
    Super,
    As,
    Instanceof,
    Try,
    Catch,
    Finally,
    Throw,
    Throws,
    Break,
    Continue,
    Static,
    Final,
    Public,
    Private,
    Protected,
    Abstract,

    // Delimiters
    LParen,
    RParen,
    LBracket,
    RBracket,
    LBrace,
    RBrace,
    Comma,
    Semi,
    Colon,
    At,

    // Member access
    Dot,
    SafeDot,
    SpreadDot,
    DotDot,
    DotDotLt,
    Ellipsis,
    Arrow,

    // Operators
    Question,
    Elvis,
    Eq,
    PlusEq,
    MinusEq,
    StarEq,
    SlashEq,
    EqEq,
    NotEq,
    Lt,
    LtEq,
    Gt,
    GtEq,
    Spaceship,
    RegexFind,
    RegexMatch,
    Plus,
    Minus,
    Star,
    StarStar,
    Slash,
    Percent,
    PlusPlus,
    MinusMinus,
    Bang,
    Tilde,
    AmpAmp,
    PipePipe,
    Amp,
    Pipe,
    Caret,
    LShift,

    Newline,
    Error,
    Eof,
}

impl TokenKind {
    /// Tokens after which a `/` is a division operator rather than a slashy string.
    fn ends_operand(self) -> bool {
        matches!(
            self,
            TokenKind::Ident
                | TokenKind::IntegerLit
                | TokenKind::LongLit
                | TokenKind::BigIntegerLit
                | TokenKind::BigDecimalLit
                | TokenKind::DoubleLit
                | TokenKind::FloatLit
                | TokenKind::StringLit
                | TokenKind::GStringLit
                | TokenKind::SlashyLit
                | TokenKind::RParen
                | TokenKind::RBracket
                | TokenKind::RBrace
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::PlusPlus
                | TokenKind::MinusMinus
        )
    }

    pub fn is_literal(self) -> bool {
        matches!(
            self,
            TokenKind::IntegerLit
                | TokenKind::LongLit
                | TokenKind::BigIntegerLit
                | TokenKind::BigDecimalLit
                | TokenKind::DoubleLit
                | TokenKind::FloatLit
                | TokenKind::StringLit
                | TokenKind::GStringLit
                | TokenKind::SlashyLit
        )
    }

    /// Keywords that may still appear as member names after a dot.
    pub fn is_keyword(self) -> bool {
        matches!(
            self,
            TokenKind::Def
                | TokenKind::Var
                | TokenKind::Class
                | TokenKind::Interface
                | TokenKind::Trait
                | TokenKind::Enum
                | TokenKind::Extends
                | TokenKind::Implements
                | TokenKind::Import
                | TokenKind::Package
                | TokenKind::Return
                | TokenKind::If
                | TokenKind::Else
                | TokenKind::For
                | TokenKind::In
                | TokenKind::While
                | TokenKind::New
                | TokenKind::True
                | TokenKind::False
                | TokenKind::Null
                | TokenKind::This
                | TokenKind::Super
                | TokenKind::As
                | TokenKind::Instanceof
                | TokenKind::Try
                | TokenKind::Catch
                | TokenKind::Finally
                | TokenKind::Throw
                | TokenKind::Throws
                | TokenKind::Break
                | TokenKind::Continue
                | TokenKind::Static
                | TokenKind::Final
                | TokenKind::Public
                | TokenKind::Private
                | TokenKind::Protected
                | TokenKind::Abstract
        )
    }
}

fn keyword(text: &str) -> Option<TokenKind> {
    let kind = match text {
        "def" => TokenKind::Def,
        "var" => TokenKind::Var,
        "class" => TokenKind::Class,
        "interface" => TokenKind::Interface,
        "trait" => TokenKind::Trait,
        "enum" => TokenKind::Enum,
        "extends" => TokenKind::Extends,
        "implements" => TokenKind::Implements,
        "import" => TokenKind::Import,
        "package" => TokenKind::Package,
        "return" => TokenKind::Return,
        "if" => TokenKind::If,
        "else" => TokenKind::Else,
        "for" => TokenKind::For,
        "in" => TokenKind::In,
        "while" => TokenKind::While,
        "new" => TokenKind::New,
        "true" => TokenKind::True,
        "false" => TokenKind::False,
        "null" => TokenKind::Null,
        "this" => TokenKind::This,
        "super" => TokenKind::Super,
        "as" => TokenKind::As,
        "instanceof" => TokenKind::Instanceof,
        "try" => TokenKind::Try,
        "catch" => TokenKind::Catch,
        "finally" => TokenKind::Finally,
        "throw" => TokenKind::Throw,
        "throws" => TokenKind::Throws,
        "break" => TokenKind::Break,
        "continue" => TokenKind::Continue,
        "static" => TokenKind::Static,
        "final" => TokenKind::Final,
        "public" => TokenKind::Public,
        "private" => TokenKind::Private,
        "protected" => TokenKind::Protected,
        "abstract" => TokenKind::Abstract,
        _ => return None,
    };
    Some(kind)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, start: usize, end: usize) -> Self {
        Self {
            kind,
            span: Span::new(start, end),
        }
    }

    pub fn text<'s>(&self, source: &'s str) -> &'s str {
        source.get(self.span.start..self.span.end).unwrap_or("")
    }
}

pub struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    last: Option<TokenKind>,
    emitted_eof: bool,
}

impl<'src> Lexer<'src> {
    pub fn new(source: &'src str) -> Self {
        Self {
            source,
            pos: 0,
            last: None,
            emitted_eof: false,
        }
    }

    /// Tokenize the whole source; the result always ends with `Eof`.
    pub fn tokenize(source: &str) -> Vec<Token> {
        Lexer::new(source).collect()
    }

    fn peek(&self) -> Option<char> {
        self.source[self.pos..].chars().next()
    }

    fn peek_nth(&self, n: usize) -> Option<char> {
        self.source[self.pos..].chars().nth(n)
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn eat(&mut self, c: char) -> bool {
        if self.peek() == Some(c) {
            self.pos += c.len_utf8();
            true
        } else {
            false
        }
    }

    fn eat_while(&mut self, pred: impl Fn(char) -> bool) {
        while let Some(c) = self.peek() {
            if !pred(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
    }

    fn token(&self, kind: TokenKind, start: usize) -> Token {
        Token::new(kind, start, self.pos)
    }

    /// Skip spaces, comments and line continuations. Newlines are kept.
    fn skip_trivia(&mut self) {
        loop {
            match self.peek() {
                Some(' ' | '\t' | '\r' | '\u{feff}') => {
                    self.bump();
                }
                Some('\\') if matches!(self.peek_nth(1), Some('\n')) => {
                    self.pos += 2;
                }
                Some('/') if self.peek_nth(1) == Some('/') => {
                    self.eat_while(|c| c != '\n');
                }
                Some('/') if self.peek_nth(1) == Some('*') => {
                    self.pos += 2;
                    match self.source[self.pos..].find("*/") {
                        Some(end) => self.pos += end + 2,
                        None => self.pos = self.source.len(),
                    }
                }
                Some('#') if self.pos == 0 && self.peek_nth(1) == Some('!') => {
                    self.eat_while(|c| c != '\n');
                }
                _ => break,
            }
        }
    }

    fn next_token(&mut self) -> Token {
        self.skip_trivia();
        let start = self.pos;

        let Some(c) = self.bump() else {
            return self.token(TokenKind::Eof, start);
        };

        match c {
            '\n' => self.token(TokenKind::Newline, start),
            '(' => self.token(TokenKind::LParen, start),
            ')' => self.token(TokenKind::RParen, start),
            '[' => self.token(TokenKind::LBracket, start),
            ']' => self.token(TokenKind::RBracket, start),
            '{' => self.token(TokenKind::LBrace, start),
            '}' => self.token(TokenKind::RBrace, start),
            ',' => self.token(TokenKind::Comma, start),
            ';' => self.token(TokenKind::Semi, start),
            '@' => self.token(TokenKind::At, start),
            '^' => self.token(TokenKind::Caret, start),
            '~' => self.token(TokenKind::Tilde, start),
            '%' => self.token(TokenKind::Percent, start),
            ':' => self.token(TokenKind::Colon, start),
            '.' => self.lex_dot(start),
            '?' => {
                let kind = if self.eat('.') {
                    TokenKind::SafeDot
                } else if self.eat(':') {
                    TokenKind::Elvis
                } else {
                    TokenKind::Question
                };
                self.token(kind, start)
            }
            '*' => {
                let kind = if self.eat('.') {
                    TokenKind::SpreadDot
                } else if self.eat('*') {
                    TokenKind::StarStar
                } else if self.eat('=') {
                    TokenKind::StarEq
                } else {
                    TokenKind::Star
                };
                self.token(kind, start)
            }
            '+' => {
                let kind = if self.eat('+') {
                    TokenKind::PlusPlus
                } else if self.eat('=') {
                    TokenKind::PlusEq
                } else {
                    TokenKind::Plus
                };
                self.token(kind, start)
            }
            '-' => {
                let kind = if self.eat('>') {
                    TokenKind::Arrow
                } else if self.eat('-') {
                    TokenKind::MinusMinus
                } else if self.eat('=') {
                    TokenKind::MinusEq
                } else {
                    TokenKind::Minus
                };
                self.token(kind, start)
            }
            '=' => {
                let kind = if self.eat('=') {
                    if self.eat('~') {
                        TokenKind::RegexMatch
                    } else {
                        TokenKind::EqEq
                    }
                } else if self.eat('~') {
                    TokenKind::RegexFind
                } else {
                    TokenKind::Eq
                };
                self.token(kind, start)
            }
            '!' => {
                let kind = if self.eat('=') {
                    TokenKind::NotEq
                } else {
                    TokenKind::Bang
                };
                self.token(kind, start)
            }
            '<' => {
                let kind = if self.eat('=') {
                    if self.eat('>') {
                        TokenKind::Spaceship
                    } else {
                        TokenKind::LtEq
                    }
                } else if self.eat('<') {
                    TokenKind::LShift
                } else {
                    TokenKind::Lt
                };
                self.token(kind, start)
            }
            // `>>` is left as two tokens so nested generics close cleanly.
            '>' => {
                let kind = if self.eat('=') {
                    TokenKind::GtEq
                } else {
                    TokenKind::Gt
                };
                self.token(kind, start)
            }
            '&' => {
                let kind = if self.eat('&') {
                    TokenKind::AmpAmp
                } else {
                    TokenKind::Amp
                };
                self.token(kind, start)
            }
            '|' => {
                let kind = if self.eat('|') {
                    TokenKind::PipePipe
                } else {
                    TokenKind::Pipe
                };
                self.token(kind, start)
            }
            '/' => {
                if self.last.is_some_and(TokenKind::ends_operand) {
                    let kind = if self.eat('=') {
                        TokenKind::SlashEq
                    } else {
                        TokenKind::Slash
                    };
                    self.token(kind, start)
                } else {
                    self.lex_slashy(start)
                }
            }
            '\'' | '"' => self.lex_string(c, start),
            '0'..='9' => self.lex_number(start),
            c if is_ident_start(c) => {
                self.eat_while(is_ident_continue);
                let text = &self.source[start..self.pos];
                self.token(keyword(text).unwrap_or(TokenKind::Ident), start)
            }
            _ => self.token(TokenKind::Error, start),
        }
    }

    fn lex_dot(&mut self, start: usize) -> Token {
        let kind = if self.eat('.') {
            if self.eat('.') {
                TokenKind::Ellipsis
            } else if self.eat('<') {
                TokenKind::DotDotLt
            } else {
                TokenKind::DotDot
            }
        } else {
            TokenKind::Dot
        };
        self.token(kind, start)
    }

    fn lex_slashy(&mut self, start: usize) -> Token {
        loop {
            match self.bump() {
                None => return self.token(TokenKind::Error, start),
                Some('\\') => {
                    self.bump();
                }
                Some('/') => return self.token(TokenKind::SlashyLit, start),
                Some(_) => {}
            }
        }
    }

    /// Single, double and triple quoted strings. Double quoted strings with
    /// a `$` placeholder become GStrings.
    fn lex_string(&mut self, quote: char, start: usize) -> Token {
        let triple = self.peek() == Some(quote) && self.peek_nth(1) == Some(quote);
        if triple {
            self.pos += 2 * quote.len_utf8();
        } else if self.peek() == Some(quote) {
            // empty string
            self.bump();
            return self.token(TokenKind::StringLit, start);
        }

        let mut interpolated = false;
        loop {
            let Some(c) = self.bump() else {
                return self.token(TokenKind::Error, start);
            };
            match c {
                '\\' => {
                    self.bump();
                }
                '\n' if !triple => {
                    self.pos -= 1;
                    return self.token(TokenKind::Error, start);
                }
                '$' if quote == '"' => {
                    if self.peek() == Some('{') {
                        interpolated = true;
                        self.skip_placeholder();
                    } else if self.peek().is_some_and(is_ident_start) {
                        interpolated = true;
                    }
                }
                c if c == quote => {
                    if !triple {
                        break;
                    }
                    if self.peek() == Some(quote) && self.peek_nth(1) == Some(quote) {
                        self.pos += 2 * quote.len_utf8();
                        break;
                    }
                }
                _ => {}
            }
        }

        let kind = if interpolated {
            TokenKind::GStringLit
        } else {
            TokenKind::StringLit
        };
        self.token(kind, start)
    }

    fn skip_placeholder(&mut self) {
        let mut depth = 0usize;
        while let Some(c) = self.bump() {
            match c {
                '{' => depth += 1,
                '}' => {
                    depth = depth.saturating_sub(1);
                    if depth == 0 {
                        return;
                    }
                }
                _ => {}
            }
        }
    }

    fn lex_number(&mut self, start: usize) -> Token {
        let first = self.source[start..].chars().next();
        if first == Some('0') && matches!(self.peek(), Some('x' | 'X')) {
            self.bump();
            self.eat_while(|c| c.is_ascii_hexdigit() || c == '_');
            return self.integer_suffix(start, 16);
        }

        self.eat_while(|c| c.is_ascii_digit() || c == '_');
        let mut decimal = false;

        if self.peek() == Some('.') && self.peek_nth(1).is_some_and(|c| c.is_ascii_digit()) {
            decimal = true;
            self.bump();
            self.eat_while(|c| c.is_ascii_digit() || c == '_');
        }

        if matches!(self.peek(), Some('e' | 'E')) {
            let exponent = match self.peek_nth(1) {
                Some(c) if c.is_ascii_digit() => true,
                Some('+' | '-') => self.peek_nth(2).is_some_and(|c| c.is_ascii_digit()),
                _ => false,
            };
            if exponent {
                decimal = true;
                self.bump();
                self.eat('+');
                self.eat('-');
                self.eat_while(|c| c.is_ascii_digit());
            }
        }

        if decimal {
            let kind = match self.peek() {
                Some('d' | 'D') => TokenKind::DoubleLit,
                Some('f' | 'F') => TokenKind::FloatLit,
                Some('g' | 'G') => TokenKind::BigDecimalLit,
                _ => return self.token(TokenKind::BigDecimalLit, start),
            };
            self.bump();
            return self.token(kind, start);
        }

        match self.peek() {
            Some('d' | 'D') => {
                self.bump();
                self.token(TokenKind::DoubleLit, start)
            }
            Some('f' | 'F') => {
                self.bump();
                self.token(TokenKind::FloatLit, start)
            }
            _ => self.integer_suffix(start, 10),
        }
    }

    fn integer_suffix(&mut self, start: usize, radix: u32) -> Token {
        let kind = match self.peek() {
            Some('l' | 'L') => TokenKind::LongLit,
            Some('g' | 'G') => TokenKind::BigIntegerLit,
            Some('i' | 'I') => TokenKind::IntegerLit,
            _ => {
                // Unsuffixed literals widen to fit their value.
                let digits: String = self.source[start..self.pos]
                    .trim_start_matches("0x")
                    .trim_start_matches("0X")
                    .chars()
                    .filter(|c| *c != '_')
                    .collect();
                return match u128::from_str_radix(&digits, radix) {
                    Ok(v) if v <= i32::MAX as u128 => self.token(TokenKind::IntegerLit, start),
                    Ok(v) if v <= i64::MAX as u128 => self.token(TokenKind::LongLit, start),
                    _ => self.token(TokenKind::BigIntegerLit, start),
                };
            }
        };
        self.bump();
        self.token(kind, start)
    }
}

impl Iterator for Lexer<'_> {
    type Item = Token;

    fn next(&mut self) -> Option<Token> {
        if self.emitted_eof {
            return None;
        }
        let token = self.next_token();
        if token.kind == TokenKind::Eof {
            self.emitted_eof = true;
        }
        self.last = Some(token.kind);
        Some(token)
    }
}

pub fn is_ident_start(c: char) -> bool {
    c.is_alphabetic() || c == '_' || c == '$'
}

pub fn is_ident_continue(c: char) -> bool {
    c.is_alphanumeric() || c == '_' || c == '$'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(source: &str) -> Vec<TokenKind> {
        Lexer::tokenize(source).into_iter().map(|t| t.kind).collect()
    }

    #[test]
    fn test_number_suffixes() {
        assert_eq!(
            kinds("1 1L 1.5 2d 3f 4G 5.0g"),
            vec![
                TokenKind::IntegerLit,
                TokenKind::LongLit,
                TokenKind::BigDecimalLit,
                TokenKind::DoubleLit,
                TokenKind::FloatLit,
                TokenKind::BigIntegerLit,
                TokenKind::BigDecimalLit,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_large_literal_widens() {
        assert_eq!(kinds("3000000000")[0], TokenKind::LongLit);
    }

    #[test]
    fn test_range_is_not_decimal() {
        assert_eq!(
            kinds("1..3"),
            vec![
                TokenKind::IntegerLit,
                TokenKind::DotDot,
                TokenKind::IntegerLit,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_slashy_versus_division() {
        assert_eq!(
            kinds("~/one/"),
            vec![TokenKind::Tilde, TokenKind::SlashyLit, TokenKind::Eof]
        );
        assert_eq!(
            kinds("a / b"),
            vec![
                TokenKind::Ident,
                TokenKind::Slash,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_gstring_detection() {
        assert_eq!(kinds(r#""plain""#)[0], TokenKind::StringLit);
        assert_eq!(kinds(r#""hi $name""#)[0], TokenKind::GStringLit);
        assert_eq!(kinds(r#""${a.b}""#)[0], TokenKind::GStringLit);
        assert_eq!(kinds(r#"'$x'"#)[0], TokenKind::StringLit);
        assert_eq!(kinds("\"\"\"a\nb\"\"\"")[0], TokenKind::StringLit);
    }

    #[test]
    fn test_comments_and_newlines() {
        assert_eq!(
            kinds("a // c\n/* x */ b"),
            vec![
                TokenKind::Ident,
                TokenKind::Newline,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }

    #[test]
    fn test_safe_navigation_and_elvis() {
        assert_eq!(
            kinds("a?.b ?: c"),
            vec![
                TokenKind::Ident,
                TokenKind::SafeDot,
                TokenKind::Ident,
                TokenKind::Elvis,
                TokenKind::Ident,
                TokenKind::Eof
            ]
        );
    }
}
