use crate::{
    REFERENCE_LIST_SUFFIX, SCHEDULE_CLASS,
    error::SchemaError,
    types::{DeclaredKind, DefaultValue, FieldKind},
};
use serde::{Deserialize, Serialize};
use std::sync::OnceLock;

///
/// BooleanChoice
///
/// The literals a two-valued choice field uses for `true` and `false`.
///

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct BooleanChoice {
    pub true_literal: String,
    pub false_literal: String,
}

// recognized (true, false) vocabularies, compared case-insensitively
const BOOLEAN_VOCABULARY: [(&str, &str); 2] = [("yes", "no"), ("true", "false")];

impl BooleanChoice {
    /// Recognize a yes/no or true/false pair in either order.
    ///
    /// Both positions must belong to the same pair; a single matching
    /// literal is not enough.
    #[must_use]
    pub fn recognize(values: &[String]) -> Option<Self> {
        let [first, second] = values else {
            return None;
        };

        for (t, f) in BOOLEAN_VOCABULARY {
            if first.eq_ignore_ascii_case(t) && second.eq_ignore_ascii_case(f) {
                return Some(Self {
                    true_literal: first.clone(),
                    false_literal: second.clone(),
                });
            }
            if first.eq_ignore_ascii_case(f) && second.eq_ignore_ascii_case(t) {
                return Some(Self {
                    true_literal: second.clone(),
                    false_literal: first.clone(),
                });
            }
        }

        None
    }
}

///
/// FieldDescriptor
///
/// One field of a schema object. Constructed once per generation pass and
/// never mutated; the `with_*` methods consume and return the descriptor so
/// construction reads as a single expression.
///

#[derive(Clone, Debug, Deserialize, Serialize)]
pub struct FieldDescriptor {
    name: String,
    kind: DeclaredKind,

    #[serde(default)]
    required: bool,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    default: Option<DefaultValue>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    min_bound: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    max_bound: Option<f64>,

    #[serde(default)]
    autosizable: bool,

    #[serde(default)]
    autocalculable: bool,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    referenced_kinds: Vec<String>,

    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    choice_values: Vec<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    units: Option<String>,

    #[serde(skip)]
    boolean_choice: OnceLock<Option<BooleanChoice>>,
}

impl FieldDescriptor {
    #[must_use]
    pub fn new(name: impl Into<String>, kind: FieldKind) -> Self {
        Self {
            name: name.into(),
            kind: DeclaredKind::Known(kind),
            required: false,
            default: None,
            min_bound: None,
            max_bound: None,
            autosizable: false,
            autocalculable: false,
            referenced_kinds: Vec::new(),
            choice_values: Vec::new(),
            units: None,
            boolean_choice: OnceLock::new(),
        }
    }

    /// Build a descriptor from a raw kind name supplied by a schema source.
    pub fn parse(name: impl Into<String>, kind: &str) -> Result<Self, SchemaError> {
        let name = name.into();
        let kind = FieldKind::parse(&name, kind)?;

        Ok(Self::new(name, kind))
    }

    //
    // construction
    //

    #[must_use]
    pub fn required(mut self) -> Self {
        self.required = true;
        self
    }

    #[must_use]
    pub fn with_default(mut self, default: impl Into<DefaultValue>) -> Self {
        self.default = Some(default.into());
        self
    }

    #[must_use]
    pub fn with_min(mut self, min: f64) -> Self {
        self.min_bound = Some(min);
        self
    }

    #[must_use]
    pub fn with_max(mut self, max: f64) -> Self {
        self.max_bound = Some(max);
        self
    }

    #[must_use]
    pub fn with_bounds(self, min: f64, max: f64) -> Self {
        self.with_min(min).with_max(max)
    }

    #[must_use]
    pub fn autosizable(mut self) -> Self {
        self.autosizable = true;
        self
    }

    #[must_use]
    pub fn autocalculable(mut self) -> Self {
        self.autocalculable = true;
        self
    }

    #[must_use]
    pub fn with_choices<I, S>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.choice_values = values.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_references<I, S>(mut self, kinds: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.referenced_kinds = kinds.into_iter().map(Into::into).collect();
        self
    }

    #[must_use]
    pub fn with_units(mut self, units: impl Into<String>) -> Self {
        self.units = Some(units.into());
        self
    }

    //
    // attributes
    //

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The resolved kind; a name no kind answers to fails for this field.
    pub fn kind(&self) -> Result<FieldKind, SchemaError> {
        self.kind.resolve(&self.name)
    }

    #[must_use]
    pub const fn declared_kind(&self) -> &DeclaredKind {
        &self.kind
    }

    #[must_use]
    pub const fn is_required(&self) -> bool {
        self.required
    }

    #[must_use]
    pub const fn default_value(&self) -> Option<&DefaultValue> {
        self.default.as_ref()
    }

    #[must_use]
    pub const fn min_bound(&self) -> Option<f64> {
        self.min_bound
    }

    #[must_use]
    pub const fn max_bound(&self) -> Option<f64> {
        self.max_bound
    }

    #[must_use]
    pub const fn is_autosizable(&self) -> bool {
        self.autosizable
    }

    #[must_use]
    pub const fn is_autocalculable(&self) -> bool {
        self.autocalculable
    }

    #[must_use]
    pub fn referenced_kinds(&self) -> &[String] {
        &self.referenced_kinds
    }

    #[must_use]
    pub fn choice_values(&self) -> &[String] {
        &self.choice_values
    }

    #[must_use]
    pub fn units(&self) -> Option<&str> {
        self.units.as_deref()
    }

    //
    // derived facts
    //

    #[must_use]
    pub const fn has_default(&self) -> bool {
        self.default.is_some()
    }

    #[must_use]
    pub const fn has_numeric_default(&self) -> bool {
        matches!(self.default, Some(DefaultValue::Number(_)))
    }

    #[must_use]
    pub const fn is_bounded(&self) -> bool {
        self.min_bound.is_some() || self.max_bound.is_some()
    }

    #[must_use]
    pub const fn is_auto_derivable(&self) -> bool {
        self.autosizable || self.autocalculable
    }

    /// The object's own name field; owned by the base type.
    #[must_use]
    pub fn is_name_field(&self) -> bool {
        self.kind.known() == Some(FieldKind::String) && self.name.eq_ignore_ascii_case("name")
    }

    /// Boolean literals for a two-valued choice, computed on first access.
    #[must_use]
    pub fn boolean_choice(&self) -> Option<&BooleanChoice> {
        self.boolean_choice
            .get_or_init(|| {
                if self.kind.known() == Some(FieldKind::Choice) {
                    BooleanChoice::recognize(&self.choice_values)
                } else {
                    None
                }
            })
            .as_ref()
    }

    /// Class name of the first referenced kind, with any list suffix removed.
    #[must_use]
    pub fn reference_class(&self) -> Option<String> {
        self.referenced_kinds
            .iter()
            .map(|kind| strip_list_suffix(kind))
            .find(|class| !class.is_empty())
    }

    /// Every referenced class name, in schema order.
    #[must_use]
    pub fn candidate_reference_classes(&self) -> Vec<String> {
        self.referenced_kinds
            .iter()
            .map(|kind| strip_list_suffix(kind))
            .collect()
    }

    #[must_use]
    pub fn is_schedule(&self) -> bool {
        self.kind.known() == Some(FieldKind::ObjectReference)
            && self
                .referenced_kinds
                .iter()
                .any(|kind| strip_list_suffix(kind) == SCHEDULE_CLASS)
    }
}

impl PartialEq for FieldDescriptor {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name
            && self.kind == other.kind
            && self.required == other.required
            && self.default == other.default
            && self.min_bound == other.min_bound
            && self.max_bound == other.max_bound
            && self.autosizable == other.autosizable
            && self.autocalculable == other.autocalculable
            && self.referenced_kinds == other.referenced_kinds
            && self.choice_values == other.choice_values
            && self.units == other.units
    }
}

// strip_list_suffix
fn strip_list_suffix(kind: &str) -> String {
    kind.replace(REFERENCE_LIST_SUFFIX, "")
}
