use super::types::{TypeRef, names};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;

/// How certain a type resolution is.
///
/// Ordered so that `Exact > Inferred > Unknown`.
#[derive(
    Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, JsonSchema,
)]
#[serde(rename_all = "lowercase")]
pub enum Confidence {
    Unknown,
    Inferred,
    Exact,
}

impl Confidence {
    /// The weaker of two confidences.
    pub fn min(self, other: Confidence) -> Confidence {
        std::cmp::min(self, other)
    }
}

impl fmt::Display for Confidence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Confidence::Unknown => "unknown",
            Confidence::Inferred => "inferred",
            Confidence::Exact => "exact",
        };
        f.write_str(s)
    }
}

/// The lookup strategy that produced a binding.
#[derive(Serialize, Deserialize, Debug, Clone, Copy, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "lowercase")]
pub enum LookupOrigin {
    /// Literals, constructors, operators, closure parameters
    Structural,
    /// Locals, parameters, declared and JDK members
    Declared,
    /// Default Groovy methods and extension modules
    Extension,
    /// `use(...)` categories and metaclass additions
    Category,
    /// No strategy produced a binding
    Unresolved,
}

impl fmt::Display for LookupOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            LookupOrigin::Structural => "structural",
            LookupOrigin::Declared => "declared",
            LookupOrigin::Extension => "extension",
            LookupOrigin::Category => "category",
            LookupOrigin::Unresolved => "unresolved",
        };
        f.write_str(s)
    }
}

/// The answer to "what is the type of the expression here".
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, JsonSchema)]
pub struct TypeBinding {
    pub type_ref: TypeRef,
    /// FQN reported as the origin of the member, for navigation
    pub declaring_type: String,
    pub origin: LookupOrigin,
    pub confidence: Confidence,
}

impl TypeBinding {
    pub fn new(
        type_ref: TypeRef,
        declaring_type: impl Into<String>,
        origin: LookupOrigin,
        confidence: Confidence,
    ) -> Self {
        Self {
            type_ref,
            declaring_type: declaring_type.into(),
            origin,
            confidence,
        }
    }

    pub fn exact(type_ref: TypeRef, declaring_type: impl Into<String>, origin: LookupOrigin) -> Self {
        Self::new(type_ref, declaring_type, origin, Confidence::Exact)
    }

    pub fn inferred(
        type_ref: TypeRef,
        declaring_type: impl Into<String>,
        origin: LookupOrigin,
    ) -> Self {
        Self::new(type_ref, declaring_type, origin, Confidence::Inferred)
    }

    /// A binding whose declaring type is the type itself (literals, locals).
    pub fn of_type(type_ref: TypeRef, origin: LookupOrigin, confidence: Confidence) -> Self {
        let declaring = type_ref.fqn().unwrap_or(names::OBJECT).to_string();
        Self::new(type_ref, declaring, origin, confidence)
    }

    /// `java.lang.Object` with unknown confidence.
    pub fn unknown() -> Self {
        Self::new(
            TypeRef::object(),
            names::OBJECT,
            LookupOrigin::Unresolved,
            Confidence::Unknown,
        )
    }

    pub fn is_unknown(&self) -> bool {
        self.confidence == Confidence::Unknown
    }

    pub fn with_confidence(mut self, confidence: Confidence) -> Self {
        self.confidence = confidence;
        self
    }

    /// Display name of the bound type.
    pub fn type_name(&self) -> String {
        self.type_ref.to_string()
    }
}

impl Default for TypeBinding {
    fn default() -> Self {
        Self::unknown()
    }
}

impl fmt::Display for TypeBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} (declared by {}, {} via {})",
            self.type_ref, self.declaring_type, self.confidence, self.origin
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_confidence_ordering() {
        assert!(Confidence::Exact > Confidence::Inferred);
        assert!(Confidence::Inferred > Confidence::Unknown);
        assert_eq!(Confidence::Exact.min(Confidence::Inferred), Confidence::Inferred);
    }

    #[test]
    fn test_unknown_binding_is_object() {
        let b = TypeBinding::unknown();
        assert!(b.is_unknown());
        assert_eq!(b.type_name(), "java.lang.Object");
        assert_eq!(b.declaring_type, "java.lang.Object");
    }

    #[test]
    fn test_binding_serializes_lowercase_tags() {
        let b = TypeBinding::of_type(TypeRef::string(), LookupOrigin::Structural, Confidence::Exact);
        let json = serde_json::to_string(&b).unwrap();
        assert!(json.contains("\"confidence\":\"exact\""));
        assert!(json.contains("\"origin\":\"structural\""));
    }
}
