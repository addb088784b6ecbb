//! Pure classification of field descriptors.
//!
//! Classification validates a descriptor, assigns it a `Category`, and
//! derives the facts every later stage reads. The two decision tables
//! (`optional_on_read`, `setter_can_fail`) are plain functions so they can
//! be tested independently of any text rendering.

use crate::{
    error::SchemaError,
    field::{BooleanChoice, FieldDescriptor},
    types::{Category, Family, FieldKind},
};
use serde::Serialize;
use std::collections::HashSet;

///
/// FieldFacts
///

#[derive(Clone, Debug, Eq, PartialEq, Serialize)]
pub struct FieldFacts {
    pub has_default: bool,
    pub auto_derivable: bool,
    pub optional: bool,
    pub setter_can_fail: bool,
    pub resettable: bool,
    pub boolean_choice: Option<BooleanChoice>,
}

///
/// ClassifiedField
///

#[derive(Clone, Debug, PartialEq)]
pub struct ClassifiedField {
    descriptor: FieldDescriptor,
    category: Category,
    facts: FieldFacts,
}

impl ClassifiedField {
    #[must_use]
    pub const fn descriptor(&self) -> &FieldDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub const fn category(&self) -> Category {
        self.category
    }

    #[must_use]
    pub const fn facts(&self) -> &FieldFacts {
        &self.facts
    }

    #[must_use]
    pub fn name(&self) -> &str {
        self.descriptor.name()
    }
}

/// Classify a descriptor, rejecting malformed input.
pub fn classify(descriptor: &FieldDescriptor) -> Result<ClassifiedField, SchemaError> {
    let kind = validate(descriptor)?;

    let boolean_choice = descriptor.boolean_choice().cloned();
    let category = category_of(kind, boolean_choice.is_some());
    let family = category.family();

    let family_default = match family {
        Family::Numeric => descriptor.has_numeric_default(),
        Family::Textual => descriptor.has_default(),
        Family::Identity => false,
    };
    let auto_derivable = descriptor.is_auto_derivable();

    let optional = match family {
        Family::Identity => false,
        Family::Numeric | Family::Textual => optional_on_read(
            descriptor.is_required(),
            family_default,
            auto_derivable,
        ),
    };

    let facts = FieldFacts {
        has_default: descriptor.has_default(),
        auto_derivable,
        optional,
        setter_can_fail: setter_can_fail(category, descriptor.is_bounded()),
        resettable: !descriptor.is_required() && family != Family::Identity,
        boolean_choice,
    };

    Ok(ClassifiedField {
        descriptor: descriptor.clone(),
        category,
        facts,
    })
}

/// Map a kind onto its category. Total over `FieldKind`.
#[must_use]
pub const fn category_of(kind: FieldKind, boolean_choice: bool) -> Category {
    match kind {
        FieldKind::Choice if boolean_choice => Category::BooleanChoice,
        FieldKind::Choice => Category::Choice,
        FieldKind::Handle => Category::Handle,
        FieldKind::Integer => Category::Integer,
        FieldKind::NodeReference => Category::NodeReference,
        FieldKind::ObjectReference => Category::ObjectReference,
        FieldKind::Real => Category::Real,
        FieldKind::String => Category::String,
    }
}

/// Whether a getter may find no value.
///
/// A value is guaranteed when the field is required or defaulted, unless it
/// can be auto-derived, in which case the resolved value only exists after
/// a separate computation.
#[must_use]
pub const fn optional_on_read(required: bool, has_default: bool, auto_derivable: bool) -> bool {
    auto_derivable || !(required || has_default)
}

/// Whether a setter must report success.
#[must_use]
pub const fn setter_can_fail(category: Category, bounded: bool) -> bool {
    match category {
        Category::Integer | Category::Real => bounded,
        Category::Choice | Category::NodeReference | Category::ObjectReference => true,
        Category::BooleanChoice | Category::Handle | Category::String => false,
    }
}

// validate
// resolves the kind; auxiliary data must match it
fn validate(descriptor: &FieldDescriptor) -> Result<FieldKind, SchemaError> {
    let field = descriptor.name();
    if field.trim().is_empty() {
        return Err(SchemaError::EmptyName);
    }
    let kind = descriptor.kind()?;

    let misplaced = |constraint: &'static str| SchemaError::MisplacedConstraint {
        field: field.to_string(),
        kind: kind.to_string(),
        constraint,
    };

    if !kind.is_numeric() {
        if descriptor.is_bounded() {
            return Err(misplaced("numeric bounds"));
        }
        if descriptor.is_auto_derivable() {
            return Err(misplaced("autosize or autocalculate"));
        }
    }

    for bound in [descriptor.min_bound(), descriptor.max_bound()]
        .into_iter()
        .flatten()
    {
        if !bound.is_finite() {
            return Err(SchemaError::NonFiniteBound {
                field: field.to_string(),
                bound,
            });
        }
    }

    if let (Some(min), Some(max)) = (descriptor.min_bound(), descriptor.max_bound())
        && min > max
    {
        return Err(SchemaError::InvertedBounds {
            field: field.to_string(),
            min,
            max,
        });
    }

    match kind {
        FieldKind::Choice => {
            if descriptor.choice_values().is_empty() {
                return Err(SchemaError::EmptyChoices {
                    field: field.to_string(),
                });
            }

            let mut seen = HashSet::new();
            for value in descriptor.choice_values() {
                if !seen.insert(value.to_ascii_lowercase()) {
                    return Err(SchemaError::DuplicateChoice {
                        field: field.to_string(),
                        value: value.clone(),
                    });
                }
            }
        }
        _ if !descriptor.choice_values().is_empty() => {
            return Err(misplaced("choice values"));
        }
        _ => {}
    }

    match kind {
        FieldKind::ObjectReference => {
            if descriptor.reference_class().is_none() {
                return Err(SchemaError::EmptyReferences {
                    field: field.to_string(),
                });
            }
        }
        _ if !descriptor.referenced_kinds().is_empty() => {
            return Err(misplaced("referenced kinds"));
        }
        _ => {}
    }

    Ok(kind)
}
