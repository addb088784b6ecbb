//! Schedule-type registration for data objects with schedule fields.

use crate::unit::{Lines, UnitContext};

pub(super) fn includes(lines: &mut Lines) {
    lines
        .line("#include \"ScheduleTypeLimits.hpp\"")
        .line("#include \"ScheduleTypeRegistry.hpp\"");
}

pub(super) fn declare_type_keys(lines: &mut Lines) {
    lines
        .line("    virtual std::vector<ScheduleTypeKey> getScheduleTypeKeys(const Schedule& schedule) const;")
        .blank();
}

// define_type_keys
// one registry key per schedule field, matched by source field index
pub(super) fn define_type_keys(ctx: &UnitContext, lines: &mut Lines) {
    let class = ctx.class();

    lines
        .line(format!(
            "  std::vector<ScheduleTypeKey> {class}_Impl::getScheduleTypeKeys(const Schedule& schedule) const"
        ))
        .line("  {")
        .line("    std::vector<ScheduleTypeKey> result;")
        .line("    UnsignedVector fieldIndices = getSourceIndices(schedule.handle());")
        .line("    UnsignedVector::const_iterator b(fieldIndices.begin()), e(fieldIndices.end());");
    for plan in ctx.schedule_plans() {
        lines
            .line(format!("    if (std::find(b,e,{}) != e)", ctx.field_enum(plan)))
            .line("    {")
            .line(format!(
                "      result.push_back(ScheduleTypeKey(\"{class}\",\"{}\"));",
                ctx.schedule_display_name(plan)
            ))
            .line("    }");
    }
    lines.line("    return result;").line("  }").blank();
}

// registry_snippet
// starter rows for the schedule type registry, emitted as a comment block
pub(super) fn registry_snippet(ctx: &UnitContext, lines: &mut Lines) {
    let class = ctx.class();

    lines
        .line("// Starter rows for the ScheduleTypeRegistrySingleton constructor in")
        .line("// ScheduleTypeRegistry.cpp. Fill in the ScheduleTypeLimits columns.")
        .line("/*");
    for plan in ctx.schedule_plans() {
        lines.line(format!(
            "    {{\"{class}\",\"{}\",\"{}\",,,,}},",
            ctx.schedule_display_name(plan),
            plan.getter_name
        ));
    }
    lines.line("*/").blank();
}
