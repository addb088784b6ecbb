//! ## Crate layout
//! - `types`: closed enums shared by every stage (kinds, categories, defaults).
//! - `field`: the immutable `FieldDescriptor` and its derived facts.
//! - `classify`: pure classification of descriptors into semantic categories.
//! - `object`: object-level schema (name, base, role, flags, fields).
//! - `error`: `SchemaError`, raised for malformed or self-contradictory input.

pub mod classify;
pub mod error;
pub mod field;
pub mod object;
pub mod types;

/// Maximum length for generated class names.
pub const MAX_OBJECT_NAME_LEN: usize = 96;

/// Referenced-kind suffix stripped when deriving a reference class name.
pub const REFERENCE_LIST_SUFFIX: &str = "Names";

/// Reference class that carries schedule semantics.
pub const SCHEDULE_CLASS: &str = "Schedule";

///
/// Prelude
///

pub mod prelude {
    pub use crate::{
        classify::{ClassifiedField, FieldFacts, classify},
        error::SchemaError,
        field::{BooleanChoice, FieldDescriptor},
        object::{ObjectFlags, ObjectRole, ObjectSchema, SchemaDocument},
        types::{Category, DeclaredKind, DefaultValue, Family, FieldKind},
    };
    pub use serde::{Deserialize, Serialize};
}
