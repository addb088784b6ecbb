use crate::emit::FragmentSlot;
use modelgen_schema::{error::SchemaError, types::Category};
use std::{io, path::PathBuf};
use thiserror::Error as ThisError;

///
/// PlanningError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum PlanningError {
    #[error("field '{field}' of category {category} has no accessor contract")]
    NoAccessorContract { field: String, category: Category },

    #[error("field '{field}' yields an empty identifier")]
    EmptyIdentifier { field: String },

    #[error("reference field '{field}' names no usable class")]
    MissingReferenceClass { field: String },
}

impl PlanningError {
    #[must_use]
    pub fn field(&self) -> &str {
        match self {
            Self::NoAccessorContract { field, .. }
            | Self::EmptyIdentifier { field }
            | Self::MissingReferenceClass { field } => field,
        }
    }
}

///
/// EmissionError
///

#[derive(Clone, Debug, Eq, PartialEq, ThisError)]
pub enum EmissionError {
    #[error("unit '{object}' is missing fragment slot '{slot}'")]
    MissingSlot { object: String, slot: FragmentSlot },

    #[error("unit '{object}' carries fragment slot '{slot}' outside the emission order")]
    UnexpectedSlot { object: String, slot: FragmentSlot },
}

///
/// GenerateError
///
/// Unit-level failure. Schema and planning failures name the field that
/// stopped the unit; sink failures name the unit that could not be written.
///

#[derive(Debug, ThisError)]
pub enum GenerateError {
    #[error("object '{object}': {source}")]
    Schema {
        object: String,
        field: Option<String>,
        source: SchemaError,
    },

    #[error("object '{object}': {source}")]
    Planning {
        object: String,
        field: String,
        source: PlanningError,
    },

    #[error(transparent)]
    Emission(#[from] EmissionError),

    #[error("object '{object}': {source}")]
    Sink { object: String, source: SinkError },
}

impl GenerateError {
    pub(crate) fn schema(object: &str, source: SchemaError) -> Self {
        Self::Schema {
            object: object.to_string(),
            field: source.field().map(ToString::to_string),
            source,
        }
    }

    pub(crate) fn planning(object: &str, source: PlanningError) -> Self {
        Self::Planning {
            object: object.to_string(),
            field: source.field().to_string(),
            source,
        }
    }

    pub(crate) fn sink(object: &str, source: SinkError) -> Self {
        Self::Sink {
            object: object.to_string(),
            source,
        }
    }

    #[must_use]
    pub fn object(&self) -> &str {
        match self {
            Self::Schema { object, .. }
            | Self::Planning { object, .. }
            | Self::Sink { object, .. }
            | Self::Emission(
                EmissionError::MissingSlot { object, .. }
                | EmissionError::UnexpectedSlot { object, .. },
            ) => object,
        }
    }

    #[must_use]
    pub fn field(&self) -> Option<&str> {
        match self {
            Self::Schema { field, .. } => field.as_deref(),
            Self::Planning { field, .. } => Some(field),
            Self::Emission(_) | Self::Sink { .. } => None,
        }
    }
}

///
/// SinkError
///

#[derive(Debug, ThisError)]
pub enum SinkError {
    #[error("failed to write '{}': {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("refusing to overwrite '{}'", path.display())]
    Exists { path: PathBuf },
}

impl SinkError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
