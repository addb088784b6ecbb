//! Unit generation.
//!
//! One pipeline for every role, shaped as a typestate so a unit can only
//! be assembled after every field has been classified and planned:
//!
//! `UnitGenerator::new` → `classify` → `plan` → `assemble` → `GeneratedUnit`
//!
//! Role differences live in `RoleStrategy`; each concern module below reads
//! the strategy and writes its fragments into the unit.

mod accessors;
mod analysis;
mod constructors;
mod includes;
mod records;
mod scaffold;
mod schedules;
mod strategy;
mod values;

pub use strategy::{ConstructorStyle, RoleStrategy, RoleStrategyExt};

use crate::{
    emit::{FRAGMENT_ORDER, FragmentSlot, Section, Surface},
    error::GenerateError,
    naming::NamingConvention,
    plan::{AccessorPlan, AccessorPlanner, ValueType},
};
use modelgen_schema::{
    classify::{ClassifiedField, classify},
    object::{ObjectRole, ObjectSchema},
    types::Category,
};
use std::collections::BTreeMap;

///
/// UnitHeader
///
/// The only inputs the emission frame may depend on.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnitHeader {
    pub class_name: String,
    pub base_name: String,
    pub namespace: String,
    pub api_macro: String,
}

impl UnitHeader {
    /// Export-macro header, e.g. `ModelAPI.hpp`.
    #[must_use]
    pub fn api_header(&self) -> String {
        let mut chars = self.namespace.chars();
        let ns: String = chars
            .next()
            .map(|c| c.to_ascii_uppercase())
            .into_iter()
            .chain(chars)
            .collect();

        format!("{ns}API.hpp")
    }

    /// Include-guard stem, e.g. `MODEL_FANCONSTANTVOLUME`.
    #[must_use]
    pub fn guard(&self) -> String {
        format!(
            "{}_{}",
            self.namespace.to_ascii_uppercase(),
            self.class_name.to_ascii_uppercase()
        )
    }
}

///
/// GeneratedUnit
///
/// Fragment text keyed by slot. Iterates in emission order.
///

#[derive(Clone, Debug, Eq, PartialEq)]
pub struct GeneratedUnit {
    header: UnitHeader,
    slots: BTreeMap<FragmentSlot, String>,
}

impl GeneratedUnit {
    /// An empty unit with no slots.
    #[must_use]
    pub const fn new(header: UnitHeader) -> Self {
        Self {
            header,
            slots: BTreeMap::new(),
        }
    }

    // with_all_slots
    // every slot of the emission order, empty
    fn with_all_slots(header: UnitHeader) -> Self {
        let slots = FRAGMENT_ORDER
            .iter()
            .map(|slot| (*slot, String::new()))
            .collect();

        Self { header, slots }
    }

    #[must_use]
    pub const fn header(&self) -> &UnitHeader {
        &self.header
    }

    #[must_use]
    pub const fn slots(&self) -> &BTreeMap<FragmentSlot, String> {
        &self.slots
    }

    #[must_use]
    pub fn get(&self, surface: Surface, section: Section) -> Option<&str> {
        self.slots
            .get(&FragmentSlot::new(surface, section))
            .map(String::as_str)
    }

    pub fn insert(&mut self, slot: FragmentSlot, text: String) -> Option<String> {
        self.slots.insert(slot, text)
    }

    pub fn remove(&mut self, slot: &FragmentSlot) -> Option<String> {
        self.slots.remove(slot)
    }

    #[must_use]
    pub fn into_slots(self) -> BTreeMap<FragmentSlot, String> {
        self.slots
    }

    // push
    // append to a slot, creating it if needed
    fn push(&mut self, surface: Surface, section: Section, text: &str) {
        self.slots
            .entry(FragmentSlot::new(surface, section))
            .or_default()
            .push_str(text);
    }
}

///
/// Lines
///
/// Line-oriented buffer used by the concern modules.
///

#[derive(Debug, Default)]
pub(crate) struct Lines(String);

impl Lines {
    pub(crate) fn line(&mut self, text: impl AsRef<str>) -> &mut Self {
        self.0.push_str(text.as_ref());
        self.0.push('\n');
        self
    }

    pub(crate) fn blank(&mut self) -> &mut Self {
        self.0.push('\n');
        self
    }

    pub(crate) fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub(crate) fn as_str(&self) -> &str {
        &self.0
    }
}

///
/// UnitContext
///
/// Read-only view handed to every concern module.
///

pub(crate) struct UnitContext<'a> {
    pub schema: &'a ObjectSchema,
    pub header: &'a UnitHeader,
    pub role: &'a ObjectRole,
    pub strategy: RoleStrategy,
    pub plans: &'a [AccessorPlan],
    pub naming: &'a dyn NamingConvention,
}

impl UnitContext<'_> {
    pub fn class(&self) -> &str {
        &self.header.class_name
    }

    pub fn base(&self) -> &str {
        &self.header.base_name
    }

    pub fn namespace(&self) -> &str {
        &self.header.namespace
    }

    /// Lower camel instance name of the class, e.g. `fanConstantVolume`.
    pub fn instance(&self) -> String {
        self.naming.lower_camel(self.class())
    }

    pub fn display_name(&self) -> String {
        self.naming.display_name(self.class())
    }

    /// Field-index enumerator for a plan, e.g. `OS_WidgetFields::Rate`.
    pub fn field_enum(&self, plan: &AccessorPlan) -> String {
        format!("{}Fields::{}", self.schema.object_type(), plan.field_ident)
    }

    /// Reference classes in first-use order, without repeats.
    pub fn referenced_classes(&self) -> Vec<&str> {
        let mut classes: Vec<&str> = Vec::new();
        for plan in self.plans {
            if let ValueType::Reference(class) = plan.value_type()
                && !classes.contains(&class.as_str())
            {
                classes.push(class);
            }
        }

        classes
    }

    pub fn has_real_fields(&self) -> bool {
        self.plans.iter().any(|p| p.category == Category::Real)
    }

    pub fn schedule_plans(&self) -> impl Iterator<Item = &AccessorPlan> {
        self.plans.iter().filter(|p| p.is_schedule)
    }

    /// Display name used when registering a schedule field.
    pub fn schedule_display_name(&self, plan: &AccessorPlan) -> String {
        plan.schedule_display_name
            .clone()
            .unwrap_or_else(|| self.display_name())
    }
}

///
/// Typestate markers
///

pub struct Initialized;

pub struct FieldsClassified {
    fields: Vec<ClassifiedField>,
}

pub struct AccessorsPlanned {
    plans: Vec<AccessorPlan>,
}

///
/// UnitGenerator
///

pub struct UnitGenerator<'a, S> {
    schema: &'a ObjectSchema,
    naming: &'a dyn NamingConvention,
    role: ObjectRole,
    state: S,
}

impl<'a> UnitGenerator<'a, Initialized> {
    #[must_use]
    pub fn new(schema: &'a ObjectSchema, naming: &'a dyn NamingConvention) -> Self {
        Self {
            schema,
            naming,
            role: schema.role(),
            state: Initialized,
        }
    }

    /// Validate the object and classify every field.
    #[tracing::instrument(level = "debug", skip_all, fields(object = %self.schema.name()))]
    pub fn classify(self) -> Result<UnitGenerator<'a, FieldsClassified>, GenerateError> {
        let object = self.schema.name();

        self.schema
            .validate()
            .map_err(|e| GenerateError::schema(object, e))?;

        let fields = self
            .schema
            .fields()
            .iter()
            .map(classify)
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| GenerateError::schema(object, e))?;

        tracing::debug!(fields = fields.len(), role = %self.role, "classified fields");

        Ok(UnitGenerator {
            schema: self.schema,
            naming: self.naming,
            role: self.role,
            state: FieldsClassified { fields },
        })
    }
}

impl<'a> UnitGenerator<'a, FieldsClassified> {
    #[must_use]
    pub fn fields(&self) -> &[ClassifiedField] {
        &self.state.fields
    }

    /// Plan accessors for every field the class owns. Handle and name
    /// fields belong to the base type and are skipped.
    #[tracing::instrument(level = "debug", skip_all, fields(object = %self.schema.name()))]
    pub fn plan(self) -> Result<UnitGenerator<'a, AccessorsPlanned>, GenerateError> {
        let planner = AccessorPlanner::new(self.naming);

        let plans = self
            .state
            .fields
            .iter()
            .filter(|field| {
                field.category() != Category::Handle && !field.descriptor().is_name_field()
            })
            .map(|field| planner.plan(field, &self.role))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| GenerateError::planning(self.schema.name(), e))?;

        tracing::debug!(plans = plans.len(), "planned accessors");

        Ok(UnitGenerator {
            schema: self.schema,
            naming: self.naming,
            role: self.role,
            state: AccessorsPlanned { plans },
        })
    }
}

impl UnitGenerator<'_, AccessorsPlanned> {
    #[must_use]
    pub fn plans(&self) -> &[AccessorPlan] {
        &self.state.plans
    }

    /// Fill every fragment slot.
    #[must_use]
    pub fn assemble(self) -> GeneratedUnit {
        let strategy = self.role.strategy();
        let header = UnitHeader {
            class_name: self.schema.name().to_string(),
            base_name: self.schema.base(),
            namespace: strategy.namespace.to_string(),
            api_macro: strategy.api_macro.to_string(),
        };

        let ctx = UnitContext {
            schema: self.schema,
            header: &header,
            role: &self.role,
            strategy,
            plans: &self.state.plans,
            naming: self.naming,
        };

        let mut unit = GeneratedUnit::with_all_slots(header.clone());
        includes::generate(&ctx, &mut unit);
        constructors::generate(&ctx, &mut unit);
        accessors::generate(&ctx, &mut unit);
        records::generate(&ctx, &mut unit);
        analysis::generate(&ctx, &mut unit);
        includes::document(&ctx, &mut unit);
        scaffold::generate(&ctx, &mut unit);

        tracing::debug!(object = %header.class_name, "assembled unit");

        unit
    }
}
