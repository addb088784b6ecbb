//! Getter/setter exercise tests for data objects.

use crate::{
    emit::FragmentSlot,
    plan::{AccessorPlan, ValueType},
    unit::{GeneratedUnit, Lines, UnitContext},
};
use modelgen_schema::types::Category;

const OUT_OF_BOUNDS: f64 = 10.0;

pub(super) fn generate(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    if !ctx.strategy.test_scaffold {
        return;
    }

    let class = ctx.class();
    let instance = ctx.instance();
    let has_schedules = ctx.schedule_plans().next().is_some();

    let mut lines = Lines::default();
    lines
        .line("#include <gtest/gtest.h>")
        .blank()
        .line("#include \"ModelFixture.hpp\"")
        .blank()
        .line(format!("#include \"../{class}.hpp\""))
        .line(format!("#include \"../{class}_Impl.hpp\""));
    if has_schedules {
        lines.line("#include \"../ScheduleConstant.hpp\"");
    }
    lines
        .blank()
        .line("using namespace openstudio;")
        .line("using namespace openstudio::model;")
        .blank()
        .line(format!("TEST_F(ModelFixture, {class}_GettersSetters) {{"))
        .line("  Model m;");
    if ctx.schema.flags().unique {
        lines.line(format!(
            "  {class} {instance} = m.getUniqueModelObject<{class}>();"
        ));
    } else {
        lines.line(format!("  {class} {instance}(m);"));
    }
    if has_schedules {
        lines.line("  ScheduleConstant sch(m);");
    }
    lines.blank();

    for plan in ctx.plans {
        exercise(&instance, plan, &mut lines);
    }
    lines.line("}");

    unit.insert(FragmentSlot::TEST_SCAFFOLD, lines.as_str().to_string());
}

// sample
// an in-bounds value: midpoint, one step inside a single bound, or 1
fn sample(plan: &AccessorPlan) -> f64 {
    match (plan.min_bound, plan.max_bound) {
        (Some(min), Some(max)) => (min + max) / 2.0,
        (Some(min), None) => min + 1.0,
        (None, Some(max)) => max - 1.0,
        (None, None) => 1.0,
    }
}

fn literal(ty: &ValueType, value: f64) -> String {
    match ty {
        ValueType::Integer => format!("{:.0}", value.floor()),
        _ => format!("{value:?}"),
    }
}

// check
// assertions that the getter now returns `expected`
fn check(instance: &str, plan: &AccessorPlan, expected: &str, lines: &mut Lines) {
    let getter = format!("{instance}.{}()", plan.getter_name);
    let value = if plan.is_optional {
        lines.line(format!("  ASSERT_TRUE({getter});"));
        format!("{getter}.get()")
    } else {
        getter
    };

    let assert = match plan.value_type() {
        ValueType::Real => "EXPECT_DOUBLE_EQ",
        _ => "EXPECT_EQ",
    };
    lines.line(format!("  {assert}({expected}, {value});"));
}

// set
// a setter call, asserted when it reports success
fn set(instance: &str, plan: &AccessorPlan, arg: &str, expect: Option<bool>) -> String {
    let call = format!("{instance}.{}({arg})", plan.setter_name);

    match (plan.setter_can_fail, expect) {
        (true, Some(true)) => format!("  EXPECT_TRUE({call});"),
        (true, Some(false)) => format!("  EXPECT_FALSE({call});"),
        _ => format!("  {call};"),
    }
}

fn exercise(instance: &str, plan: &AccessorPlan, lines: &mut Lines) {
    lines.line(format!("  // {}", plan.field_name));

    match (plan.category, plan.value_type()) {
        (Category::BooleanChoice, _) => {
            let getter = format!("{instance}.{}()", plan.getter_name);
            let value = if plan.is_optional {
                format!("{getter}.get()")
            } else {
                getter
            };
            lines
                .line(set(instance, plan, "true", Some(true)))
                .line(format!("  EXPECT_TRUE({value});"))
                .line(set(instance, plan, "false", Some(true)))
                .line(format!("  EXPECT_FALSE({value});"));
        }
        (Category::Choice, _) => {
            if let Some(first) = plan.choice_values.first() {
                let first = format!("\"{first}\"");
                lines.line(set(instance, plan, &first, Some(true)));
                check(instance, plan, &first, lines);
                lines.line(set(instance, plan, "\"BadChoice\"", Some(false)));
                check(instance, plan, &first, lines);
            }
        }
        (Category::Integer | Category::Real, ty) => {
            let good = literal(ty, sample(plan));
            lines.line(set(instance, plan, &good, Some(true)));
            check(instance, plan, &good, lines);

            for bad in [
                plan.min_bound.map(|min| min - OUT_OF_BOUNDS),
                plan.max_bound.map(|max| max + OUT_OF_BOUNDS),
            ]
            .into_iter()
            .flatten()
            {
                lines.line(set(instance, plan, &literal(ty, bad), Some(false)));
                check(instance, plan, &good, lines);
            }
        }
        (Category::String, _) => {
            let value = "\"Test String\"";
            lines.line(set(instance, plan, value, Some(true)));
            check(instance, plan, value, lines);
        }
        (Category::ObjectReference, _) if plan.is_schedule => {
            lines.line(set(instance, plan, "sch", Some(true)));
            check(instance, plan, "sch", lines);
        }
        (_, ty) => {
            lines.line(format!(
                "  // {} takes a {ty}; create one in the model to exercise it.",
                plan.setter_name
            ));
        }
    }

    for (action, flag) in [
        (&plan.autosize_name, &plan.is_autosized_name),
        (&plan.autocalculate_name, &plan.is_autocalculated_name),
    ] {
        if let (Some(action), Some(flag)) = (action, flag) {
            lines
                .line(format!("  {instance}.{action}();"))
                .line(format!("  EXPECT_TRUE({instance}.{flag}());"));
        }
    }
    if let Some(reset) = &plan.reset_name {
        lines.line(format!("  {instance}.{reset}();"));
        if let Some(defaulted) = &plan.is_defaulted_name {
            lines.line(format!("  EXPECT_TRUE({instance}.{defaulted}());"));
        }
    }
    lines.blank();
}

#[cfg(test)]
mod tests {
    use crate::{
        emit::FragmentSlot,
        naming::CamelCaseNaming,
        unit::{GeneratedUnit, UnitGenerator},
    };
    use modelgen_schema::{
        field::FieldDescriptor,
        object::{ObjectFlags, ObjectRole, ObjectSchema},
        types::FieldKind,
    };

    fn assemble(schema: &ObjectSchema) -> GeneratedUnit {
        UnitGenerator::new(schema, &CamelCaseNaming)
            .classify()
            .unwrap()
            .plan()
            .unwrap()
            .assemble()
    }

    fn scaffold(schema: &ObjectSchema) -> String {
        assemble(schema)
            .slots()
            .get(&FragmentSlot::TEST_SCAFFOLD)
            .cloned()
            .unwrap_or_default()
    }

    #[test]
    fn numeric_fields_are_set_in_and_out_of_bounds() {
        let schema = ObjectSchema::new("Fan").with_fields([
            FieldDescriptor::new("Fan Efficiency", FieldKind::Real)
                .required()
                .with_bounds(0.0, 1.0),
            FieldDescriptor::new("Stages", FieldKind::Integer)
                .required()
                .with_min(1.0),
        ]);
        let text = scaffold(&schema);

        assert!(text.contains("TEST_F(ModelFixture, Fan_GettersSetters) {"));
        assert!(text.contains("  Fan fan(m);"));
        assert!(text.contains("  EXPECT_TRUE(fan.setFanEfficiency(0.5));"));
        assert!(text.contains("  EXPECT_DOUBLE_EQ(0.5, fan.fanEfficiency());"));
        assert!(text.contains("  EXPECT_FALSE(fan.setFanEfficiency(-10.0));"));
        assert!(text.contains("  EXPECT_FALSE(fan.setFanEfficiency(11.0));"));
        assert!(text.contains("  EXPECT_TRUE(fan.setStages(2));"));
        assert!(text.contains("  EXPECT_EQ(2, fan.stages());"));
        assert!(text.contains("  EXPECT_FALSE(fan.setStages(-9));"));
    }

    #[test]
    fn choices_booleans_and_schedules_are_exercised() {
        let schema = ObjectSchema::new("Fan").with_fields([
            FieldDescriptor::new("Control Type", FieldKind::Choice)
                .required()
                .with_choices(["Continuous", "Stepped"]),
            FieldDescriptor::new("Motor In Airstream", FieldKind::Choice)
                .required()
                .with_choices(["Yes", "No"]),
            FieldDescriptor::new("Availability Schedule Name", FieldKind::ObjectReference)
                .required()
                .with_references(["ScheduleNames"]),
        ]);
        let text = scaffold(&schema);

        assert!(text.contains("#include \"../ScheduleConstant.hpp\""));
        assert!(text.contains("  EXPECT_TRUE(fan.setControlType(\"Continuous\"));"));
        assert!(text.contains("  EXPECT_FALSE(fan.setControlType(\"BadChoice\"));"));
        assert!(text.contains("  fan.setMotorInAirstream(true);\n  EXPECT_TRUE(fan.motorInAirstream());"));
        assert!(text.contains("  EXPECT_TRUE(fan.setAvailabilitySchedule(sch));"));
    }

    #[test]
    fn auto_and_reset_operations_are_checked() {
        let schema = ObjectSchema::new("Fan").with_field(
            FieldDescriptor::new("Maximum Flow Rate", FieldKind::Real)
                .autosizable()
                .with_default("Autosize"),
        );
        let text = scaffold(&schema);

        assert!(text.contains("  ASSERT_TRUE(fan.maximumFlowRate());"));
        assert!(text.contains("  fan.autosizeMaximumFlowRate();\n  EXPECT_TRUE(fan.isAutosizedMaximumFlowRate());"));
        assert!(text.contains("  fan.resetMaximumFlowRate();\n  EXPECT_TRUE(fan.isMaximumFlowRateDefaulted());"));
    }

    #[test]
    fn unique_objects_come_from_the_model() {
        let schema = ObjectSchema::new("SiteWater").with_flags(ObjectFlags {
            unique: true,
            ..ObjectFlags::default()
        });

        assert!(scaffold(&schema).contains("  SiteWater siteWater = m.getUniqueModelObject<SiteWater>();"));
    }

    #[test]
    fn records_have_no_scaffold() {
        let schema = ObjectSchema::new("Optimizer").with_role(ObjectRole::AnalysisObject);

        assert!(scaffold(&schema).is_empty());
    }
}
