use crate::error::SchemaError;
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::fmt;

///
/// FieldKind
///
/// Closed set of schema field types. Aliases accept the names used by
/// IDD-style schema sources (`alpha`, `object_list`, `external_list`).
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, Ord, PartialEq, PartialOrd, Serialize)]
#[serde(rename_all = "snake_case")]
#[remain::sorted]
pub enum FieldKind {
    Choice,
    Handle,
    Integer,
    #[serde(alias = "external_list")]
    NodeReference,
    #[serde(alias = "object_list")]
    ObjectReference,
    Real,
    #[serde(alias = "alpha")]
    String,
}

impl FieldKind {
    pub const ALL: [Self; 7] = [
        Self::Choice,
        Self::Handle,
        Self::Integer,
        Self::NodeReference,
        Self::ObjectReference,
        Self::Real,
        Self::String,
    ];

    /// Resolve a kind name, ignoring case and separators.
    #[must_use]
    pub fn from_name(kind: &str) -> Option<Self> {
        let normalized: String = kind
            .chars()
            .filter(|c| c.is_ascii_alphanumeric())
            .map(|c| c.to_ascii_lowercase())
            .collect();

        match normalized.as_str() {
            "choice" => Some(Self::Choice),
            "handle" => Some(Self::Handle),
            "integer" | "int" => Some(Self::Integer),
            "nodereference" | "externallist" => Some(Self::NodeReference),
            "objectreference" | "objectlist" => Some(Self::ObjectReference),
            "real" | "double" => Some(Self::Real),
            "string" | "alpha" => Some(Self::String),
            _ => None,
        }
    }

    /// Parse a kind name on behalf of `field`, reporting unknown names as a
    /// classification failure for that field.
    pub fn parse(field: &str, kind: &str) -> Result<Self, SchemaError> {
        Self::from_name(kind).ok_or_else(|| SchemaError::UnknownKind {
            field: field.to_string(),
            kind: kind.to_string(),
        })
    }

    #[must_use]
    pub const fn is_numeric(self) -> bool {
        matches!(self, Self::Integer | Self::Real)
    }

    #[must_use]
    pub const fn is_reference(self) -> bool {
        matches!(self, Self::ObjectReference | Self::NodeReference)
    }
}

///
/// Category
///
/// Semantic category assigned by classification. `Choice` fields whose two
/// values form a recognized yes/no or true/false pair become `BooleanChoice`.
///

#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum Category {
    BooleanChoice,
    Choice,
    Handle,
    Integer,
    NodeReference,
    ObjectReference,
    Real,
    String,
}

impl Category {
    #[must_use]
    pub const fn family(self) -> Family {
        match self {
            Self::Integer | Self::Real => Family::Numeric,
            Self::BooleanChoice
            | Self::Choice
            | Self::NodeReference
            | Self::ObjectReference
            | Self::String => Family::Textual,
            Self::Handle => Family::Identity,
        }
    }
}

///
/// Family
///
/// Coarse grouping that decides which kind of default satisfies
/// non-optionality.
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq)]
pub enum Family {
    Identity,
    Numeric,
    Textual,
}

///
/// DeclaredKind
///
/// A kind exactly as a schema source wrote it. Unknown names survive
/// loading and fail classification of their own field.
///

#[derive(Clone, Debug, Deserialize, Eq, PartialEq, Serialize)]
#[serde(from = "String", into = "String")]
pub enum DeclaredKind {
    Known(FieldKind),
    Unknown(String),
}

impl DeclaredKind {
    /// Resolve on behalf of `field`.
    pub fn resolve(&self, field: &str) -> Result<FieldKind, SchemaError> {
        match self {
            Self::Known(kind) => Ok(*kind),
            Self::Unknown(raw) => FieldKind::parse(field, raw),
        }
    }

    #[must_use]
    pub const fn known(&self) -> Option<FieldKind> {
        match self {
            Self::Known(kind) => Some(*kind),
            Self::Unknown(_) => None,
        }
    }
}

impl From<FieldKind> for DeclaredKind {
    fn from(kind: FieldKind) -> Self {
        Self::Known(kind)
    }
}

impl From<String> for DeclaredKind {
    fn from(raw: String) -> Self {
        FieldKind::from_name(&raw).map_or(Self::Unknown(raw), Self::Known)
    }
}

impl From<DeclaredKind> for String {
    fn from(kind: DeclaredKind) -> Self {
        match kind {
            DeclaredKind::Known(kind) => kind.to_string(),
            DeclaredKind::Unknown(raw) => raw,
        }
    }
}

///
/// DefaultValue
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(untagged)]
pub enum DefaultValue {
    Number(f64),
    Text(String),
}

impl DefaultValue {
    #[must_use]
    pub const fn is_numeric(&self) -> bool {
        matches!(self, Self::Number(_))
    }

    #[must_use]
    pub const fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            Self::Text(_) => None,
        }
    }
}

impl fmt::Display for DefaultValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::Text(s) => f.write_str(s),
        }
    }
}

impl From<f64> for DefaultValue {
    fn from(n: f64) -> Self {
        Self::Number(n)
    }
}

impl From<&str> for DefaultValue {
    fn from(s: &str) -> Self {
        Self::Text(s.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_accepts_idd_aliases() {
        assert_eq!(FieldKind::parse("f", "Alpha"), Ok(FieldKind::String));
        assert_eq!(
            FieldKind::parse("f", "object-list"),
            Ok(FieldKind::ObjectReference)
        );
        assert_eq!(
            FieldKind::parse("f", "ExternalList"),
            Ok(FieldKind::NodeReference)
        );
        assert_eq!(FieldKind::parse("f", "REAL"), Ok(FieldKind::Real));
    }

    #[test]
    fn parse_rejects_unknown_kind_naming_the_field() {
        let err = FieldKind::parse("Fan Efficiency", "Complex").unwrap_err();

        assert_eq!(
            err,
            SchemaError::UnknownKind {
                field: "Fan Efficiency".to_string(),
                kind: "Complex".to_string(),
            }
        );
        assert_eq!(err.field(), Some("Fan Efficiency"));
    }

    #[test]
    fn every_kind_round_trips_through_parse() {
        for kind in FieldKind::ALL {
            assert_eq!(FieldKind::parse("f", &kind.to_string()), Ok(kind));
        }
    }

    #[test]
    fn declared_kinds_keep_unknown_names() {
        let known: DeclaredKind = serde_json::from_str("\"object_list\"").unwrap();
        let unknown: DeclaredKind = serde_json::from_str("\"polygon\"").unwrap();

        assert_eq!(known, DeclaredKind::Known(FieldKind::ObjectReference));
        assert_eq!(unknown.known(), None);
        assert_eq!(
            unknown.resolve("Shape"),
            Err(SchemaError::UnknownKind {
                field: "Shape".to_string(),
                kind: "polygon".to_string(),
            })
        );
        assert_eq!(serde_json::to_string(&unknown).unwrap(), "\"polygon\"");
    }

    #[test]
    fn untagged_default_keeps_numeric_and_text_apart() {
        let n: DefaultValue = serde_json::from_str("0.7").unwrap();
        let t: DefaultValue = serde_json::from_str("\"Autosize\"").unwrap();

        assert!(n.is_numeric());
        assert!(!t.is_numeric());
        assert_eq!(t.to_string(), "Autosize");
    }
}
