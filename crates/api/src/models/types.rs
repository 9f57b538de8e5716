use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Well-known type names used across the engine.
pub mod names {
    pub const OBJECT: &str = "java.lang.Object";
    pub const STRING: &str = "java.lang.String";
    pub const INTEGER: &str = "java.lang.Integer";
    pub const LONG: &str = "java.lang.Long";
    pub const BOOLEAN: &str = "java.lang.Boolean";
    pub const VOID: &str = "java.lang.Void";
    pub const CLASS: &str = "java.lang.Class";
    pub const BIG_DECIMAL: &str = "java.math.BigDecimal";
    pub const BIG_INTEGER: &str = "java.math.BigInteger";
    pub const LIST: &str = "java.util.List";
    pub const MAP: &str = "java.util.Map";
    pub const MAP_ENTRY: &str = "java.util.Map$Entry";
    pub const LINKED_HASH_MAP: &str = "java.util.LinkedHashMap";
    pub const ITERABLE: &str = "java.lang.Iterable";
    pub const ITERATOR: &str = "java.util.Iterator";
    pub const CHAR_SEQUENCE: &str = "java.lang.CharSequence";
    pub const PATTERN: &str = "java.util.regex.Pattern";
    pub const CLOSURE: &str = "groovy.lang.Closure";
    pub const GSTRING: &str = "groovy.lang.GString";
    pub const RANGE: &str = "groovy.lang.Range";
    pub const SCRIPT: &str = "groovy.lang.Script";
}

/// A reference to a type, resolved or not.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq, Hash, JsonSchema)]
#[serde(tag = "kind", content = "data")]
pub enum TypeRef {
    /// Primitive type name (e.g., "int", "void")
    Raw(String),

    /// Class reference by FQN (nested types use `$`, e.g. `java.util.Map$Entry`)
    Id(String),

    /// Type variable (e.g., `T` in `<T> List<T> collect(...)`)
    Var(String),

    /// Generic instantiation (e.g., List<String>)
    Generic {
        base: Box<TypeRef>,
        args: Vec<TypeRef>,
    },

    /// Array type (e.g., String[]); `element` is never itself an array
    Array {
        element: Box<TypeRef>,
        dimensions: usize,
    },

    /// Wildcard type (e.g., ? extends Number)
    Wildcard {
        bound: Option<Box<TypeRef>>,
        is_upper_bound: bool, // true: extends, false: super
    },

    Unknown,
}

const PRIMITIVES: &[(&str, &str)] = &[
    ("int", "java.lang.Integer"),
    ("long", "java.lang.Long"),
    ("short", "java.lang.Short"),
    ("byte", "java.lang.Byte"),
    ("float", "java.lang.Float"),
    ("double", "java.lang.Double"),
    ("boolean", "java.lang.Boolean"),
    ("char", "java.lang.Character"),
    ("void", "java.lang.Void"),
];

impl TypeRef {
    /// Helper to create a Raw type
    pub fn raw(s: impl Into<String>) -> Self {
        TypeRef::Raw(s.into())
    }

    /// Helper to create an Id type
    pub fn id(s: impl Into<String>) -> Self {
        TypeRef::Id(s.into())
    }

    pub fn var(s: impl Into<String>) -> Self {
        TypeRef::Var(s.into())
    }

    pub fn generic(base: impl Into<String>, args: Vec<TypeRef>) -> Self {
        TypeRef::Generic {
            base: Box::new(TypeRef::Id(base.into())),
            args,
        }
    }

    /// Wrap `element` in one more array dimension.
    pub fn array_of(element: TypeRef) -> Self {
        match element {
            TypeRef::Array {
                element,
                dimensions,
            } => TypeRef::Array {
                element,
                dimensions: dimensions + 1,
            },
            other => TypeRef::Array {
                element: Box::new(other),
                dimensions: 1,
            },
        }
    }

    pub fn object() -> Self {
        TypeRef::Id(names::OBJECT.to_string())
    }

    pub fn string() -> Self {
        TypeRef::Id(names::STRING.to_string())
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, TypeRef::Unknown)
    }

    pub fn is_primitive(&self) -> bool {
        matches!(self, TypeRef::Raw(_))
    }

    pub fn is_array(&self) -> bool {
        matches!(self, TypeRef::Array { .. })
    }

    /// True for `int[]`, `boolean[][]`, ...
    pub fn is_primitive_array(&self) -> bool {
        matches!(self, TypeRef::Array { element, .. } if element.is_primitive())
    }

    /// The class name this type refers to, ignoring type arguments.
    pub fn fqn(&self) -> Option<&str> {
        match self {
            TypeRef::Id(fqn) => Some(fqn),
            TypeRef::Generic { base, .. } => base.fqn(),
            _ => None,
        }
    }

    /// Type arguments of a generic instantiation (empty otherwise).
    pub fn type_args(&self) -> &[TypeRef] {
        match self {
            TypeRef::Generic { args, .. } => args,
            _ => &[],
        }
    }

    /// Component type of an array, one dimension down.
    pub fn component(&self) -> Option<TypeRef> {
        match self {
            TypeRef::Array {
                element,
                dimensions,
            } if *dimensions > 1 => Some(TypeRef::Array {
                element: element.clone(),
                dimensions: dimensions - 1,
            }),
            TypeRef::Array { element, .. } => Some(element.as_ref().clone()),
            _ => None,
        }
    }

    /// Drop type arguments (`List<String>` -> `List`).
    pub fn erasure(&self) -> TypeRef {
        match self {
            TypeRef::Generic { base, .. } => base.erasure(),
            TypeRef::Array {
                element,
                dimensions,
            } => TypeRef::Array {
                element: Box::new(element.erasure()),
                dimensions: *dimensions,
            },
            TypeRef::Wildcard {
                bound: Some(bound),
                is_upper_bound: true,
            } => bound.erasure(),
            TypeRef::Wildcard { .. } | TypeRef::Var(_) | TypeRef::Unknown => TypeRef::object(),
            other => other.clone(),
        }
    }

    /// Box a primitive (`int` -> `java.lang.Integer`); other types are returned unchanged.
    pub fn boxed(&self) -> TypeRef {
        match self {
            TypeRef::Raw(name) => PRIMITIVES
                .iter()
                .find(|(p, _)| p == name)
                .map(|(_, boxed)| TypeRef::id(*boxed))
                .unwrap_or_else(|| self.clone()),
            _ => self.clone(),
        }
    }

    /// Unbox a wrapper class (`java.lang.Integer` -> `int`).
    pub fn unboxed(&self) -> Option<TypeRef> {
        let fqn = self.fqn()?;
        PRIMITIVES
            .iter()
            .find(|(_, boxed)| *boxed == fqn)
            .map(|(p, _)| TypeRef::raw(*p))
    }

    /// Collect the type variables mentioned anywhere in this type.
    pub fn type_vars(&self) -> Vec<String> {
        let mut out = Vec::new();
        self.collect_vars(&mut out);
        out
    }

    fn collect_vars(&self, out: &mut Vec<String>) {
        match self {
            TypeRef::Var(name) => {
                if !out.contains(name) {
                    out.push(name.clone());
                }
            }
            TypeRef::Generic { base, args } => {
                base.collect_vars(out);
                for arg in args {
                    arg.collect_vars(out);
                }
            }
            TypeRef::Array { element, .. } => element.collect_vars(out),
            TypeRef::Wildcard { bound: Some(b), .. } => b.collect_vars(out),
            _ => {}
        }
    }

    pub fn is_primitive_name(name: &str) -> bool {
        PRIMITIVES.iter().any(|(p, _)| *p == name)
    }
}

impl Default for TypeRef {
    fn default() -> Self {
        TypeRef::Unknown
    }
}

impl fmt::Display for TypeRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeRef::Raw(name) | TypeRef::Id(name) | TypeRef::Var(name) => f.write_str(name),
            TypeRef::Generic { base, args } => {
                write!(f, "{}<", base)?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{}", arg)?;
                }
                f.write_str(">")
            }
            TypeRef::Array {
                element,
                dimensions,
            } => write!(f, "{}{}", element, "[]".repeat(*dimensions)),
            TypeRef::Wildcard {
                bound: None,
                is_upper_bound: _,
            } => f.write_str("?"),
            TypeRef::Wildcard {
                bound: Some(bound),
                is_upper_bound,
            } => write!(
                f,
                "? {} {}",
                if *is_upper_bound { "extends" } else { "super" },
                bound
            ),
            TypeRef::Unknown => f.write_str(names::OBJECT),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_nested_generic() {
        let entry = TypeRef::generic(
            names::MAP_ENTRY,
            vec![TypeRef::string(), TypeRef::id(names::INTEGER)],
        );
        assert_eq!(
            entry.to_string(),
            "java.util.Map$Entry<java.lang.String,java.lang.Integer>"
        );
    }

    #[test]
    fn test_array_of_collapses_dimensions() {
        let ints = TypeRef::array_of(TypeRef::array_of(TypeRef::raw("int")));
        assert_eq!(ints.to_string(), "int[][]");
        assert!(ints.is_primitive_array());
        assert_eq!(ints.component().unwrap().to_string(), "int[]");
    }

    #[test]
    fn test_boxing_roundtrip() {
        let int = TypeRef::raw("int");
        assert_eq!(int.boxed(), TypeRef::id(names::INTEGER));
        assert_eq!(TypeRef::id(names::INTEGER).unboxed(), Some(int));
        assert_eq!(TypeRef::string().unboxed(), None);
    }

    #[test]
    fn test_erasure_and_vars() {
        let list = TypeRef::generic(names::LIST, vec![TypeRef::var("T")]);
        assert_eq!(list.erasure(), TypeRef::id(names::LIST));
        assert_eq!(list.type_vars(), vec!["T".to_string()]);
        assert_eq!(list.to_string(), "java.util.List<T>");
    }
}
