//! Accessor planning.
//!
//! A plan is the complete accessor contract for one classified field:
//! every operation name, the getter's return type, how the setter takes
//! its argument, and which operations can fail. Rendering reads plans and
//! nothing else from the field.

use crate::{error::PlanningError, naming::NamingConvention, unit::RoleStrategyExt};
use modelgen_schema::{
    classify::ClassifiedField,
    field::BooleanChoice,
    object::ObjectRole,
    types::{Category, DefaultValue},
};
use serde::Serialize;
use std::fmt;

///
/// ValueType
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum ValueType {
    Bool,
    Integer,
    Real,
    Reference(String),
    String,
}

impl ValueType {
    #[must_use]
    pub fn cpp(&self) -> &str {
        match self {
            Self::Bool => "bool",
            Self::Integer => "int",
            Self::Real => "double",
            Self::Reference(class) => class,
            Self::String => "std::string",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.cpp())
    }
}

///
/// ReturnType
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum ReturnType {
    Optional(ValueType),
    Value(ValueType),
}

impl ReturnType {
    #[must_use]
    pub const fn value_type(&self) -> &ValueType {
        match self {
            Self::Optional(ty) | Self::Value(ty) => ty,
        }
    }

    #[must_use]
    pub const fn is_optional(&self) -> bool {
        matches!(self, Self::Optional(_))
    }
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Optional(ty) => write!(f, "boost::optional<{ty}>"),
            Self::Value(ty) => write!(f, "{ty}"),
        }
    }
}

///
/// Passing
///

#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq, Serialize)]
pub enum Passing {
    ConstRef,
    MutRef,
    Value,
}

///
/// SetterArgument
///

#[derive(Clone, Debug, Eq, Hash, PartialEq, Serialize)]
pub struct SetterArgument {
    pub name: String,
    pub ty: ValueType,
    pub passing: Passing,
}

impl SetterArgument {
    /// Parameter type as written in a signature.
    #[must_use]
    pub fn type_decl(&self) -> String {
        match self.passing {
            Passing::ConstRef => format!("const {}&", self.ty),
            Passing::MutRef => format!("{}&", self.ty),
            Passing::Value => self.ty.to_string(),
        }
    }
}

impl fmt::Display for SetterArgument {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.type_decl(), self.name)
    }
}

///
/// AccessorPlan
///

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AccessorPlan {
    pub field_name: String,
    pub field_ident: String,
    pub category: Category,

    pub return_type: ReturnType,
    pub getter_name: String,
    pub setter_name: String,
    pub setter_argument: SetterArgument,

    pub reset_name: Option<String>,
    pub autosize_name: Option<String>,
    pub autocalculate_name: Option<String>,
    pub is_autosized_name: Option<String>,
    pub is_autocalculated_name: Option<String>,
    pub is_defaulted_name: Option<String>,
    pub values_name: Option<String>,
    pub optional_getter_name: Option<String>,

    pub setter_can_fail: bool,
    pub getter_can_fail: bool,
    pub is_optional: bool,
    pub is_required: bool,

    pub boolean_choice: Option<BooleanChoice>,
    pub choice_values: Vec<String>,
    pub reference_candidates: Vec<String>,
    pub is_schedule: bool,
    pub schedule_display_name: Option<String>,

    pub min_bound: Option<f64>,
    pub max_bound: Option<f64>,
    pub default: Option<DefaultValue>,
    pub units: Option<String>,
}

impl AccessorPlan {
    /// The value type behind the getter, ignoring optionality.
    #[must_use]
    pub const fn value_type(&self) -> &ValueType {
        self.return_type.value_type()
    }
}

///
/// AccessorPlanner
///

pub struct AccessorPlanner<'n> {
    naming: &'n dyn NamingConvention,
}

impl<'n> AccessorPlanner<'n> {
    #[must_use]
    pub const fn new(naming: &'n dyn NamingConvention) -> Self {
        Self { naming }
    }

    /// Compute the accessor contract for one field.
    pub fn plan(
        &self,
        field: &ClassifiedField,
        role: &ObjectRole,
    ) -> Result<AccessorPlan, PlanningError> {
        let descriptor = field.descriptor();
        let facts = field.facts();
        let category = field.category();
        let name = descriptor.name();

        let value_type = match category {
            Category::BooleanChoice => ValueType::Bool,
            Category::Choice | Category::NodeReference | Category::String => ValueType::String,
            Category::Integer => ValueType::Integer,
            Category::Real => ValueType::Real,
            Category::ObjectReference => {
                let class = descriptor.reference_class().ok_or_else(|| {
                    PlanningError::MissingReferenceClass {
                        field: name.to_string(),
                    }
                })?;
                ValueType::Reference(class)
            }
            Category::Handle => {
                return Err(PlanningError::NoAccessorContract {
                    field: name.to_string(),
                    category,
                });
            }
        };

        let field_ident = self.naming.identifier(name);
        if field_ident.is_empty() {
            return Err(PlanningError::EmptyIdentifier {
                field: name.to_string(),
            });
        }

        let getter_name = self.getter_name(&field_ident, category);
        let suffix = self.naming.upper_camel(&getter_name);
        let op = |cond: bool, prefix: &str, tail: &str| {
            cond.then(|| format!("{prefix}{suffix}{tail}"))
        };

        let setter_argument =
            self.setter_argument(&getter_name, &value_type, descriptor.is_schedule(), role);
        let is_reference = category == Category::ObjectReference;

        Ok(AccessorPlan {
            field_name: name.to_string(),
            category,
            return_type: if facts.optional {
                ReturnType::Optional(value_type)
            } else {
                ReturnType::Value(value_type)
            },
            setter_name: format!("set{suffix}"),
            setter_argument,

            reset_name: op(facts.resettable, "reset", ""),
            autosize_name: op(descriptor.is_autosizable(), "autosize", ""),
            autocalculate_name: op(descriptor.is_autocalculable(), "autocalculate", ""),
            is_autosized_name: op(descriptor.is_autosizable(), "isAutosized", ""),
            is_autocalculated_name: op(descriptor.is_autocalculable(), "isAutocalculated", ""),
            is_defaulted_name: op(facts.has_default, "is", "Defaulted"),
            values_name: (category == Category::Choice).then(|| format!("{getter_name}Values")),
            optional_getter_name: op(is_reference && !facts.optional, "optional", ""),

            setter_can_fail: facts.setter_can_fail,
            getter_can_fail: is_reference && !facts.optional,
            is_optional: facts.optional,
            is_required: descriptor.is_required(),

            boolean_choice: facts.boolean_choice.clone(),
            choice_values: descriptor.choice_values().to_vec(),
            reference_candidates: descriptor.candidate_reference_classes(),
            is_schedule: descriptor.is_schedule(),
            schedule_display_name: descriptor
                .is_schedule()
                .then(|| schedule_display_name(name))
                .flatten(),

            min_bound: descriptor.min_bound(),
            max_bound: descriptor.max_bound(),
            default: descriptor.default_value().cloned(),
            units: descriptor.units().map(ToString::to_string),

            getter_name,
            field_ident,
        })
    }

    // getter_name
    // object references drop every "Name" so "Schedule Name" reads as `schedule`
    fn getter_name(&self, field_ident: &str, category: Category) -> String {
        let getter = self.naming.lower_camel(field_ident);

        if category == Category::ObjectReference {
            let stripped = getter.replace("Name", "");
            if !stripped.is_empty() {
                return self.naming.lower_camel(&stripped);
            }
        }

        getter
    }

    fn setter_argument(
        &self,
        getter_name: &str,
        value_type: &ValueType,
        is_schedule: bool,
        role: &ObjectRole,
    ) -> SetterArgument {
        let (name, passing) = match value_type {
            ValueType::Reference(class) => {
                let passing = if is_schedule && role.strategy().schedule_registry {
                    Passing::MutRef
                } else {
                    Passing::ConstRef
                };
                (self.naming.lower_camel(class), passing)
            }
            ValueType::String => (getter_name.to_string(), Passing::ConstRef),
            ValueType::Bool | ValueType::Integer | ValueType::Real => {
                (getter_name.to_string(), Passing::Value)
            }
        };

        SetterArgument {
            name,
            ty: value_type.clone(),
            passing,
        }
    }
}

// schedule_display_name
// "Availability Schedule Name" -> "Availability"; None when nothing is left
fn schedule_display_name(field_name: &str) -> Option<String> {
    const NEEDLE: &str = "schedule name";

    let lower = field_name.to_ascii_lowercase();
    let mut out = String::with_capacity(field_name.len());
    let mut rest = 0;
    for (start, _) in lower.match_indices(NEEDLE) {
        out.push_str(&field_name[rest..start]);
        rest = start + NEEDLE.len();
    }
    out.push_str(&field_name[rest..]);

    let trimmed = out.split_whitespace().collect::<Vec<_>>().join(" ");
    (!trimmed.is_empty()).then_some(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::naming::CamelCaseNaming;
    use modelgen_schema::{classify::classify, field::FieldDescriptor, types::FieldKind};

    fn plan(field: &FieldDescriptor, role: &ObjectRole) -> Result<AccessorPlan, PlanningError> {
        let classified = classify(field).unwrap();
        AccessorPlanner::new(&CamelCaseNaming).plan(&classified, role)
    }

    fn plan_data(field: &FieldDescriptor) -> AccessorPlan {
        plan(field, &ObjectRole::DataObject).unwrap()
    }

    #[test]
    fn required_bounded_real_has_plain_getter_and_failing_setter() {
        let field = FieldDescriptor::new("Fan Efficiency", FieldKind::Real)
            .required()
            .with_bounds(0.0, 1.0);
        let plan = plan_data(&field);

        assert_eq!(plan.getter_name, "fanEfficiency");
        assert_eq!(plan.setter_name, "setFanEfficiency");
        assert_eq!(plan.return_type.to_string(), "double");
        assert_eq!(plan.setter_argument.to_string(), "double fanEfficiency");
        assert!(plan.setter_can_fail);
        assert!(plan.reset_name.is_none());
    }

    #[test]
    fn autosizable_real_gets_every_auto_operation() {
        let field = FieldDescriptor::new("Maximum Flow Rate", FieldKind::Real)
            .autosizable()
            .with_default("Autosize");
        let plan = plan_data(&field);

        assert_eq!(plan.return_type.to_string(), "boost::optional<double>");
        assert_eq!(plan.autosize_name.as_deref(), Some("autosizeMaximumFlowRate"));
        assert_eq!(
            plan.is_autosized_name.as_deref(),
            Some("isAutosizedMaximumFlowRate")
        );
        assert_eq!(
            plan.is_defaulted_name.as_deref(),
            Some("isMaximumFlowRateDefaulted")
        );
        assert_eq!(plan.reset_name.as_deref(), Some("resetMaximumFlowRate"));
        assert!(plan.autocalculate_name.is_none());
    }

    #[test]
    fn autocalculable_field_gets_autocalculate_operations() {
        let field = FieldDescriptor::new("Design Size", FieldKind::Real).autocalculable();
        let plan = plan_data(&field);

        assert_eq!(
            plan.autocalculate_name.as_deref(),
            Some("autocalculateDesignSize")
        );
        assert_eq!(
            plan.is_autocalculated_name.as_deref(),
            Some("isAutocalculatedDesignSize")
        );
    }

    #[test]
    fn schedule_reference_strips_name_and_passes_by_mutable_reference() {
        let field = FieldDescriptor::new("Availability Schedule Name", FieldKind::ObjectReference)
            .required()
            .with_references(["ScheduleNames"]);
        let plan = plan_data(&field);

        assert_eq!(plan.getter_name, "availabilitySchedule");
        assert_eq!(plan.return_type.to_string(), "Schedule");
        assert_eq!(plan.setter_argument.to_string(), "Schedule& schedule");
        assert_eq!(
            plan.optional_getter_name.as_deref(),
            Some("optionalAvailabilitySchedule")
        );
        assert_eq!(plan.schedule_display_name.as_deref(), Some("Availability"));
        assert!(plan.getter_can_fail);
    }

    #[test]
    fn schedule_reference_is_const_outside_data_objects() {
        let field = FieldDescriptor::new("Schedule Name", FieldKind::ObjectReference)
            .with_references(["ScheduleNames"]);
        let role = ObjectRole::ObjectRecord {
            serialized: "Widget".to_string(),
        };
        let plan = plan(&field, &role).unwrap();

        assert_eq!(plan.getter_name, "schedule");
        assert_eq!(plan.setter_argument.passing, Passing::ConstRef);
        assert_eq!(plan.schedule_display_name, None);
        assert!(!plan.getter_can_fail);
    }

    #[test]
    fn non_schedule_reference_is_passed_by_const_reference() {
        let field = FieldDescriptor::new("Inlet Node Name", FieldKind::ObjectReference)
            .with_references(["ConnectionNames"]);
        let plan = plan_data(&field);

        assert_eq!(plan.getter_name, "inletNode");
        assert_eq!(plan.setter_argument.to_string(), "const Connection& connection");
        assert_eq!(plan.return_type.to_string(), "boost::optional<Connection>");
    }

    #[test]
    fn strings_pass_by_const_reference_and_choices_list_values() {
        let field = FieldDescriptor::new("Control Type", FieldKind::Choice)
            .with_choices(["Continuous", "Stepped"])
            .with_default("Continuous");
        let plan = plan_data(&field);

        assert_eq!(plan.setter_argument.to_string(), "const std::string& controlType");
        assert_eq!(plan.values_name.as_deref(), Some("controlTypeValues"));
        assert_eq!(plan.return_type.to_string(), "std::string");
    }

    #[test]
    fn boolean_choice_plans_a_bool_without_values_accessor() {
        let field = FieldDescriptor::new("Motor In Airstream", FieldKind::Choice)
            .with_choices(["No", "Yes"])
            .required();
        let plan = plan_data(&field);

        assert_eq!(plan.value_type(), &ValueType::Bool);
        assert_eq!(plan.setter_argument.to_string(), "bool motorInAirstream");
        assert!(plan.values_name.is_none());
        assert!(!plan.setter_can_fail);
    }

    #[test]
    fn handle_fields_have_no_contract() {
        let field = FieldDescriptor::new("Handle", FieldKind::Handle);

        assert!(matches!(
            plan(&field, &ObjectRole::DataObject),
            Err(PlanningError::NoAccessorContract { .. })
        ));
    }

    #[test]
    fn punctuation_only_names_are_rejected() {
        let field = FieldDescriptor::new("--", FieldKind::Integer);

        assert_eq!(
            plan(&field, &ObjectRole::DataObject),
            Err(PlanningError::EmptyIdentifier {
                field: "--".to_string()
            })
        );
    }

    #[test]
    fn reference_named_only_name_keeps_its_getter() {
        let field = FieldDescriptor::new("Name", FieldKind::ObjectReference)
            .with_references(["ZoneNames"]);
        let plan = plan_data(&field);

        assert_eq!(plan.getter_name, "name");
        assert_eq!(plan.setter_argument.name, "zone");
    }
}
