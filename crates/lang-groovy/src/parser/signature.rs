//! Parser for the compact Java-like signatures used by the builtin type
//! table and by extension class descriptors.
//!
//! ```text
//! class java.util.ArrayList<E> extends java.util.AbstractList<E> implements List<E>
//! static <T> T with(U self, Closure<T> closure)
//! default void sort(Comparator<? super E> c)
//! static groovy.io.FileType FILES
//! new(String path)
//! ```

use crate::inference::core::types::{
    MemberInfo, MemberKind, ParameterInfo, TypeInfo, TypeKind, TypeParameter,
};
use groovyscope_api::TypeRef;
use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum SignatureError {
    #[error("unexpected end of signature '{0}'")]
    UnexpectedEnd(String),
    #[error("unexpected '{found}' in signature '{text}'")]
    Unexpected { found: String, text: String },
    #[error("unknown type '{name}' in signature '{text}'")]
    UnknownType { name: String, text: String },
}

/// Maps a simple or qualified name to a fully qualified one.
pub type NameResolver<'a> = &'a dyn Fn(&str) -> Option<String>;

#[derive(Debug, Clone, PartialEq, Eq)]
enum Tok {
    Ident(String),
    Punct(char),
    Ellipsis,
}

fn tokenize(text: &str) -> Vec<Tok> {
    let mut tokens = Vec::new();
    let mut chars = text.char_indices().peekable();
    while let Some((i, c)) = chars.next() {
        match c {
            c if c.is_whitespace() => {}
            '.' if text[i..].starts_with("...") => {
                chars.next();
                chars.next();
                tokens.push(Tok::Ellipsis);
            }
            '<' | '>' | ',' | '(' | ')' | '[' | ']' | '?' | '&' => tokens.push(Tok::Punct(c)),
            _ => {
                let mut end = i + c.len_utf8();
                while let Some(&(j, n)) = chars.peek() {
                    let dotted = n == '.' && !text[j..].starts_with("...");
                    if n.is_alphanumeric() || n == '_' || n == '$' || dotted {
                        end = j + n.len_utf8();
                        chars.next();
                    } else {
                        break;
                    }
                }
                tokens.push(Tok::Ident(text[i..end].to_string()));
            }
        }
    }
    tokens
}

struct SigParser<'a> {
    text: &'a str,
    tokens: Vec<Tok>,
    pos: usize,
    type_vars: Vec<String>,
    resolve: NameResolver<'a>,
}

impl<'a> SigParser<'a> {
    fn new(text: &'a str, type_vars: &[String], resolve: NameResolver<'a>) -> Self {
        Self {
            text,
            tokens: tokenize(text),
            pos: 0,
            type_vars: type_vars.to_vec(),
            resolve,
        }
    }

    fn peek(&self) -> Option<&Tok> {
        self.tokens.get(self.pos)
    }

    fn peek_ident(&self) -> Option<&str> {
        match self.peek() {
            Some(Tok::Ident(s)) => Some(s),
            _ => None,
        }
    }

    fn next(&mut self) -> Result<Tok, SignatureError> {
        let tok = self
            .tokens
            .get(self.pos)
            .cloned()
            .ok_or_else(|| SignatureError::UnexpectedEnd(self.text.to_string()))?;
        self.pos += 1;
        Ok(tok)
    }

    fn eat_punct(&mut self, c: char) -> bool {
        if self.peek() == Some(&Tok::Punct(c)) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn eat_keyword(&mut self, kw: &str) -> bool {
        if self.peek_ident() == Some(kw) {
            self.pos += 1;
            true
        } else {
            false
        }
    }

    fn expect_punct(&mut self, c: char) -> Result<(), SignatureError> {
        if self.eat_punct(c) {
            Ok(())
        } else {
            Err(self.unexpected())
        }
    }

    fn ident(&mut self) -> Result<String, SignatureError> {
        match self.next()? {
            Tok::Ident(s) => Ok(s),
            _ => {
                self.pos -= 1;
                Err(self.unexpected())
            }
        }
    }

    fn unexpected(&self) -> SignatureError {
        match self.peek() {
            None => SignatureError::UnexpectedEnd(self.text.to_string()),
            Some(tok) => SignatureError::Unexpected {
                found: match tok {
                    Tok::Ident(s) => s.clone(),
                    Tok::Punct(c) => c.to_string(),
                    Tok::Ellipsis => "...".to_string(),
                },
                text: self.text.to_string(),
            },
        }
    }

    fn finish(&self) -> Result<(), SignatureError> {
        if self.pos < self.tokens.len() {
            Err(self.unexpected())
        } else {
            Ok(())
        }
    }

    /// `<T, U extends Comparable<U>>`; the names are in scope as soon as
    /// they are declared.
    fn type_params(&mut self) -> Result<Vec<TypeParameter>, SignatureError> {
        let mut params = Vec::new();
        if !self.eat_punct('<') {
            return Ok(params);
        }
        loop {
            let name = self.ident()?;
            self.type_vars.push(name.clone());
            let mut param = TypeParameter::new(name);
            if self.eat_keyword("extends") {
                param.bounds.push(self.type_ref()?);
                while self.eat_punct('&') {
                    param.bounds.push(self.type_ref()?);
                }
            }
            params.push(param);
            if !self.eat_punct(',') {
                break;
            }
        }
        self.expect_punct('>')?;
        Ok(params)
    }

    fn type_ref(&mut self) -> Result<TypeRef, SignatureError> {
        if self.eat_punct('?') {
            let upper = if self.eat_keyword("extends") {
                Some(true)
            } else if self.eat_keyword("super") {
                Some(false)
            } else {
                None
            };
            return Ok(match upper {
                Some(is_upper_bound) => TypeRef::Wildcard {
                    bound: Some(Box::new(self.type_ref()?)),
                    is_upper_bound,
                },
                None => TypeRef::Wildcard {
                    bound: None,
                    is_upper_bound: true,
                },
            });
        }

        let name = self.ident()?;
        let mut ty = self.named_type(&name)?;
        if self.eat_punct('<') {
            let mut args = Vec::new();
            loop {
                args.push(self.type_ref()?);
                if !self.eat_punct(',') {
                    break;
                }
            }
            self.expect_punct('>')?;
            ty = TypeRef::Generic {
                base: Box::new(ty),
                args,
            };
        }
        while self.peek() == Some(&Tok::Punct('[')) {
            self.pos += 1;
            self.expect_punct(']')?;
            ty = TypeRef::array_of(ty);
        }
        Ok(ty)
    }

    fn named_type(&self, name: &str) -> Result<TypeRef, SignatureError> {
        if TypeRef::is_primitive_name(name) {
            return Ok(TypeRef::raw(name));
        }
        if self.type_vars.iter().any(|v| v == name) {
            return Ok(TypeRef::var(name));
        }
        if let Some(fqn) = (self.resolve)(name) {
            return Ok(TypeRef::id(fqn));
        }
        if name.contains('.') {
            return Ok(TypeRef::id(name));
        }
        Err(SignatureError::UnknownType {
            name: name.to_string(),
            text: self.text.to_string(),
        })
    }

    fn type_list(&mut self) -> Result<Vec<TypeRef>, SignatureError> {
        let mut types = vec![self.type_ref()?];
        while self.eat_punct(',') {
            types.push(self.type_ref()?);
        }
        Ok(types)
    }

    fn parameters(&mut self) -> Result<Vec<ParameterInfo>, SignatureError> {
        let mut params = Vec::new();
        self.expect_punct('(')?;
        if self.eat_punct(')') {
            return Ok(params);
        }
        loop {
            let mut type_ref = self.type_ref()?;
            let is_varargs = self.peek() == Some(&Tok::Ellipsis);
            if is_varargs {
                self.pos += 1;
                type_ref = TypeRef::array_of(type_ref);
            }
            let name = match self.peek_ident() {
                Some(_) => self.ident()?,
                None => format!("arg{}", params.len()),
            };
            params.push(ParameterInfo {
                name,
                type_ref,
                is_varargs,
            });
            if !self.eat_punct(',') {
                break;
            }
        }
        self.expect_punct(')')?;
        Ok(params)
    }
}

/// Modifiers allowed before the kind keyword of a type header.
pub const TYPE_MODIFIERS: &[&str] = &["public", "abstract", "final", "static", "sealed"];

/// Parse a type header such as
/// `interface java.util.List<E> extends java.util.Collection<E>`.
/// Leading modifiers are skipped.
pub fn parse_type_header(text: &str, resolve: NameResolver<'_>) -> Result<TypeInfo, SignatureError> {
    let mut p = SigParser::new(text, &[], resolve);
    while p
        .peek_ident()
        .is_some_and(|w| TYPE_MODIFIERS.contains(&w))
    {
        p.pos += 1;
    }
    let kind = match p.ident()?.as_str() {
        "class" => TypeKind::Class,
        "interface" => TypeKind::Interface,
        "trait" => TypeKind::Trait,
        "enum" => TypeKind::Enum,
        _ => {
            p.pos -= 1;
            return Err(p.unexpected());
        }
    };
    let fqn = p.ident()?;
    let mut info = TypeInfo::new(fqn, kind);
    info.type_parameters = p.type_params()?;

    if p.eat_keyword("extends") {
        let types = p.type_list()?;
        if info.is_interface() {
            info.interfaces.extend(types);
        } else {
            info.superclass = types.into_iter().next();
        }
    }
    if p.eat_keyword("implements") {
        info.interfaces.extend(p.type_list()?);
    }
    p.finish()?;
    Ok(info)
}

/// Parse a method, constructor (`new(...)`) or field signature declared by
/// `declaring_type`. `class_type_params` are in scope for instance members.
pub fn parse_member(
    text: &str,
    declaring_type: &str,
    class_type_params: &[String],
    resolve: NameResolver<'_>,
) -> Result<MemberInfo, SignatureError> {
    let mut p = SigParser::new(text, class_type_params, resolve);
    let mut modifiers = Vec::new();
    while let Some(m) = p.peek_ident() {
        if matches!(m, "static" | "default" | "final" | "abstract") {
            modifiers.push(m.to_string());
            p.pos += 1;
        } else {
            break;
        }
    }
    let type_parameters = p.type_params()?;

    if p.peek_ident() == Some("new") && p.tokens.get(p.pos + 1) == Some(&Tok::Punct('(')) {
        p.pos += 1;
        let parameters = p.parameters()?;
        p.finish()?;
        let owner = if class_type_params.is_empty() {
            TypeRef::id(declaring_type)
        } else {
            TypeRef::generic(
                declaring_type,
                class_type_params.iter().map(TypeRef::var).collect(),
            )
        };
        return Ok(MemberInfo {
            name: "<init>".to_string(),
            kind: MemberKind::Constructor,
            declaring_type: declaring_type.to_string(),
            type_ref: owner,
            parameters: Some(parameters),
            modifiers,
            type_parameters,
        });
    }

    let type_ref = p.type_ref()?;
    let name = p.ident()?;
    let (kind, parameters) = if p.peek() == Some(&Tok::Punct('(')) {
        (MemberKind::Method, Some(p.parameters()?))
    } else {
        (MemberKind::Field, None)
    };
    p.finish()?;
    Ok(MemberInfo {
        name,
        kind,
        declaring_type: declaring_type.to_string(),
        type_ref,
        parameters,
        modifiers,
        type_parameters,
    })
}

/// Parse a standalone type such as `java.util.Map$Entry<K, V>`.
pub fn parse_type_ref(
    text: &str,
    type_vars: &[String],
    resolve: NameResolver<'_>,
) -> Result<TypeRef, SignatureError> {
    let mut p = SigParser::new(text, type_vars, resolve);
    let ty = p.type_ref()?;
    p.finish()?;
    Ok(ty)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn resolver(name: &str) -> Option<String> {
        match name {
            "String" => Some("java.lang.String".into()),
            "Object" => Some("java.lang.Object".into()),
            "Closure" => Some("groovy.lang.Closure".into()),
            "Comparator" => Some("java.util.Comparator".into()),
            "Collection" => Some("java.util.Collection".into()),
            _ => None,
        }
    }

    #[test]
    fn test_generic_static_method() {
        let m = parse_member(
            "static <T, U> T with(U self, Closure<T> closure)",
            "org.codehaus.groovy.runtime.DefaultGroovyMethods",
            &[],
            &resolver,
        )
        .unwrap();
        assert!(m.is_static());
        assert_eq!(m.name, "with");
        assert_eq!(m.type_ref, TypeRef::var("T"));
        assert_eq!(m.type_parameters.len(), 2);
        let params = m.parameters.unwrap();
        assert_eq!(params[0].type_ref, TypeRef::var("U"));
        assert_eq!(params[1].type_ref.to_string(), "groovy.lang.Closure<T>");
    }

    #[test]
    fn test_varargs_wildcards_and_defaults() {
        let m = parse_member(
            "default void sort(Comparator<? super E> c, Object... rest)",
            "java.util.List",
            &["E".to_string()],
            &resolver,
        )
        .unwrap();
        assert!(m.is_default());
        let params = m.parameters.unwrap();
        assert_eq!(params[0].type_ref.to_string(), "java.util.Comparator<? super E>");
        assert!(params[1].is_varargs);
        assert_eq!(params[1].type_ref.to_string(), "java.lang.Object[]");
        assert_eq!(params[1].name, "rest");
    }

    #[test]
    fn test_interface_header_extends_become_interfaces() {
        let info = parse_type_header(
            "interface java.util.List<E> extends Collection<E>",
            &resolver,
        )
        .unwrap();
        assert_eq!(info.kind, TypeKind::Interface);
        assert!(info.superclass.is_none());
        assert_eq!(info.interfaces[0].to_string(), "java.util.Collection<E>");
    }

    #[test]
    fn test_header_modifiers_are_skipped() {
        let info = parse_type_header(
            "abstract class java.io.Writer implements java.io.Closeable",
            &resolver,
        )
        .unwrap();
        assert_eq!(info.kind, TypeKind::Class);
        assert_eq!(info.fqn, "java.io.Writer");
        assert_eq!(info.interfaces[0].to_string(), "java.io.Closeable");

        let info = parse_type_header("public final class a.B", &resolver).unwrap();
        assert_eq!(info.fqn, "a.B");
    }

    #[test]
    fn test_field_and_constructor() {
        let f = parse_member("static String NAME", "a.B", &[], &resolver).unwrap();
        assert_eq!(f.kind, MemberKind::Field);
        let c = parse_member("new(String path)", "java.io.File", &[], &resolver).unwrap();
        assert_eq!(c.kind, MemberKind::Constructor);
        assert_eq!(c.type_ref, TypeRef::id("java.io.File"));
    }

    #[test]
    fn test_unknown_simple_name_is_an_error() {
        let err = parse_type_ref("Frobnicator", &[], &resolver).unwrap_err();
        assert!(matches!(err, SignatureError::UnknownType { .. }));
        assert!(parse_type_ref("com.acme.Frobnicator[]", &[], &resolver).is_ok());
    }
}
