use thiserror::Error as ThisError;

///
/// SchemaError
///
/// A field descriptor or object schema is malformed or contradicts itself.
/// Raised during classification; always fails the whole unit.
///

#[derive(Clone, Debug, PartialEq, ThisError)]
pub enum SchemaError {
    #[error("field '{field}' has unknown kind '{kind}'")]
    UnknownKind { field: String, kind: String },

    #[error("field name is empty")]
    EmptyName,

    #[error("choice field '{field}' has no choice values")]
    EmptyChoices { field: String },

    #[error("choice field '{field}' lists value '{value}' more than once")]
    DuplicateChoice { field: String, value: String },

    #[error("object reference field '{field}' has no referenced kinds")]
    EmptyReferences { field: String },

    #[error("field '{field}' of kind {kind} cannot carry {constraint}")]
    MisplacedConstraint {
        field: String,
        kind: String,
        constraint: &'static str,
    },

    #[error("field '{field}' has min bound {min} above max bound {max}")]
    InvertedBounds { field: String, min: f64, max: f64 },

    #[error("field '{field}' has non-finite bound {bound}")]
    NonFiniteBound { field: String, bound: f64 },

    #[error("field '{field}' appears more than once")]
    DuplicateField { field: String },

    #[error("object name '{name}' is invalid: {reason}")]
    InvalidObjectName { name: String, reason: String },

    #[error("object '{object}' has no base type")]
    MissingBase { object: String },
}

impl SchemaError {
    /// Name of the offending field, when the error is field-scoped.
    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::UnknownKind { field, .. }
            | Self::EmptyChoices { field }
            | Self::DuplicateChoice { field, .. }
            | Self::EmptyReferences { field }
            | Self::MisplacedConstraint { field, .. }
            | Self::InvertedBounds { field, .. }
            | Self::NonFiniteBound { field, .. }
            | Self::DuplicateField { field } => Some(field),

            Self::EmptyName | Self::InvalidObjectName { .. } | Self::MissingBase { .. } => None,
        }
    }
}
