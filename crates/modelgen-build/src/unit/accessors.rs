//! Per-field accessors for data objects.
//!
//! The public class forwards every call to its implementation class; the
//! implementation reads and writes the wrapped schema object by field index.

use crate::{
    emit::{Section, Surface},
    plan::{AccessorPlan, Passing, ValueType},
    unit::{GeneratedUnit, Lines, UnitContext, schedules},
};

pub(super) fn generate(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    if !ctx.strategy.per_field_accessors {
        return;
    }

    declarations(ctx, unit);
    impl_definitions(ctx, unit);
    definitions(ctx, unit);

    if ctx.schedule_plans().next().is_some() {
        let mut snippet = Lines::default();
        schedules::registry_snippet(ctx, &mut snippet);
        unit.push(Surface::Definition, Section::PostClass, snippet.as_str());
    }
}

///
/// Signatures
///
/// Getter and setter declarations, shared by both headers. Each entry is
/// written without indentation or trailing `;`.
///

struct Signatures {
    getters: Vec<String>,
    setters: Vec<String>,
}

impl Signatures {
    fn new(ctx: &UnitContext) -> Self {
        let mut getters = Vec::new();
        let mut setters = Vec::new();

        for plan in ctx.plans {
            if plan.reference_candidates.len() > 1 {
                getters.push(format!(
                    "// Candidate classes for this reference: {}.",
                    plan.reference_candidates.join(", ")
                ));
            }
            getters.push(format!("{} {}() const", plan.return_type, plan.getter_name));
            for name in [
                &plan.is_defaulted_name,
                &plan.is_autosized_name,
                &plan.is_autocalculated_name,
            ]
            .into_iter()
            .flatten()
            {
                getters.push(format!("bool {name}() const"));
            }

            setters.push(setter_signature(plan, None));
            for name in [
                &plan.reset_name,
                &plan.autosize_name,
                &plan.autocalculate_name,
            ]
            .into_iter()
            .flatten()
            {
                setters.push(format!("void {name}()"));
            }
        }

        Self { getters, setters }
    }

    fn render(&self, ctx: &UnitContext, indent: &str, lines: &mut Lines) {
        let extensible = ctx.schema.flags().extensible;

        for (title, entries) in [("Getters", &self.getters), ("Setters", &self.setters)] {
            lines
                .line(format!("{indent}/** @name {title} */"))
                .line(format!("{indent}//@{{"))
                .blank();
            for entry in entries {
                if entry.starts_with("//") {
                    lines.line(format!("{indent}{entry}"));
                } else {
                    lines.line(format!("{indent}{entry};")).blank();
                }
            }
            if extensible {
                lines
                    .line(format!(
                        "{indent}// Extensible fields are not generated; add their accessors by hand."
                    ))
                    .blank();
            }
            lines.line(format!("{indent}//@}}"));
        }

        lines
            .line(format!("{indent}/** @name Other */"))
            .line(format!("{indent}//@{{"))
            .blank()
            .line(format!("{indent}//@}}"));
    }
}

// setter_signature
// qualified with `owner::` when defining out of line
fn setter_signature(plan: &AccessorPlan, owner: Option<&str>) -> String {
    let ret = if plan.setter_can_fail { "bool" } else { "void" };
    let owner = owner.map(|o| format!("{o}::")).unwrap_or_default();

    format!(
        "{ret} {owner}{}({})",
        plan.setter_name, plan.setter_argument
    )
}

fn declarations(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    let signatures = Signatures::new(ctx);

    // public class
    let mut decl = Lines::default();
    decl.line("  /** @name Static Methods */")
        .line("  //@{")
        .blank()
        .line("  static IddObjectType iddObjectType();")
        .blank();
    for plan in ctx.plans {
        if let Some(values) = &plan.values_name {
            decl.line(format!("  static std::vector<std::string> {values}();"))
                .blank();
        }
    }
    decl.line("  //@}");
    signatures.render(ctx, "  ", &mut decl);
    unit.push(Surface::Declaration, Section::PublicMethods, decl.as_str());

    // implementation class
    let mut decl = Lines::default();
    decl.line("    /** @name Virtual Methods */")
        .line("    //@{")
        .blank()
        .line("    virtual const std::vector<std::string>& outputVariableNames() const;")
        .blank()
        .line("    virtual IddObjectType iddObjectType() const;")
        .blank();
    if ctx.schedule_plans().next().is_some() {
        schedules::declare_type_keys(&mut decl);
    }
    decl.line("    //@}");
    signatures.render(ctx, "    ", &mut decl);
    unit.push(Surface::ImplDeclaration, Section::PublicMethods, decl.as_str());

    let mut private = Lines::default();
    for plan in ctx.plans {
        if let Some(name) = &plan.optional_getter_name {
            private.line(format!(
                "    boost::optional<{}> {name}() const;",
                plan.value_type()
            ));
        }
    }
    if !private.is_empty() {
        unit.push(
            Surface::ImplDeclaration,
            Section::Private,
            "\n    // Optional getters for required references, usable when the reference is missing.\n",
        );
        unit.push(Surface::ImplDeclaration, Section::Private, private.as_str());
    }
}

fn impl_definitions(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let mut def = Lines::default();

    def.line(format!(
        "  const std::vector<std::string>& {class}_Impl::outputVariableNames() const"
    ))
    .line("  {")
    .line("    static std::vector<std::string> result;")
    .line("    if (result.empty()){")
    .line("    }")
    .line("    return result;")
    .line("  }")
    .blank()
    .line(format!("  IddObjectType {class}_Impl::iddObjectType() const {{"))
    .line(format!("    return {class}::iddObjectType();"))
    .line("  }")
    .blank();

    if ctx.schedule_plans().next().is_some() {
        schedules::define_type_keys(ctx, &mut def);
    }

    for plan in ctx.plans {
        getter_body(ctx, plan, &mut def);
        flag_bodies(ctx, plan, &mut def);
    }
    for plan in ctx.plans {
        setter_body(ctx, plan, &mut def);
        reset_bodies(ctx, plan, &mut def);
    }
    unit.push(Surface::ImplDefinition, Section::PublicMethods, def.as_str());

    let mut private = Lines::default();
    for plan in ctx.plans {
        if let Some(name) = &plan.optional_getter_name {
            private
                .line(format!(
                    "  boost::optional<{}> {class}_Impl::{name}() const {{",
                    plan.value_type()
                ))
                .line(format!(
                    "    return {}({});",
                    getter_accessor(plan.value_type()),
                    ctx.field_enum(plan)
                ))
                .line("  }")
                .blank();
        }
    }
    unit.push(Surface::ImplDefinition, Section::Private, private.as_str());
}

fn getter_accessor(ty: &ValueType) -> String {
    match ty {
        ValueType::Integer => "getInt".to_string(),
        ValueType::Real => "getDouble".to_string(),
        ValueType::Bool | ValueType::String => "getString".to_string(),
        ValueType::Reference(class) => {
            format!("getObject<ModelObject>().getModelObjectTarget<{class}>")
        }
    }
}

const fn setter_accessor(ty: &ValueType) -> &'static str {
    match ty {
        ValueType::Integer => "setInt",
        ValueType::Real => "setDouble",
        ValueType::Bool | ValueType::String => "setString",
        ValueType::Reference(_) => "setPointer",
    }
}

fn getter_body(ctx: &UnitContext, plan: &AccessorPlan, def: &mut Lines) {
    let class = ctx.class();
    let field = ctx.field_enum(plan);
    let ty = plan.value_type();
    let accessor = getter_accessor(ty);

    def.line(format!(
        "  {} {class}_Impl::{}() const {{",
        plan.return_type, plan.getter_name
    ));

    match (&plan.boolean_choice, ty, plan.is_optional) {
        (Some(choice), _, true) => {
            def.line("    boost::optional<bool> result;")
                .line(format!(
                    "    boost::optional<std::string> value = {accessor}({field},true);"
                ))
                .line("    if (value) {")
                .line(format!(
                    "      result = openstudio::istringEqual(value.get(), \"{}\");",
                    choice.true_literal
                ))
                .line("    }")
                .line("    return result;");
        }
        (Some(choice), _, false) => {
            def.line(format!(
                "    boost::optional<std::string> value = {accessor}({field},true);"
            ))
            .line("    OS_ASSERT(value);")
            .line(format!(
                "    return openstudio::istringEqual(value.get(), \"{}\");",
                choice.true_literal
            ));
        }
        (None, ValueType::Reference(_), true) => {
            def.line(format!("    return {accessor}({field});"));
        }
        (None, ValueType::Reference(_), false) => {
            let optional = plan.optional_getter_name.as_deref().unwrap_or_default();
            let description = ctx
                .naming
                .display_name(&ctx.naming.upper_camel(&plan.getter_name));

            def.line(format!("    boost::optional<{ty}> value = {optional}();"))
                .line("    if (!value) {")
                .line(format!(
                    "      LOG_AND_THROW(briefDescription() << \" does not have an {description} attached.\");"
                ))
                .line("    }")
                .line("    return value.get();");
        }
        (None, _, true) => {
            def.line(format!("    return {accessor}({field},true);"));
        }
        (None, _, false) => {
            def.line(format!(
                "    boost::optional<{ty}> value = {accessor}({field},true);"
            ))
            .line("    OS_ASSERT(value);")
            .line("    return value.get();");
        }
    }

    def.line("  }").blank();
}

// flag_bodies
// isDefaulted, isAutosized and isAutocalculated
fn flag_bodies(ctx: &UnitContext, plan: &AccessorPlan, def: &mut Lines) {
    let class = ctx.class();
    let field = ctx.field_enum(plan);

    if let Some(name) = &plan.is_defaulted_name {
        def.line(format!("  bool {class}_Impl::{name}() const {{"))
            .line(format!("    return isEmpty({field});"))
            .line("  }")
            .blank();
    }

    for (name, keyword) in [
        (&plan.is_autosized_name, "autosize"),
        (&plan.is_autocalculated_name, "autocalculate"),
    ] {
        let Some(name) = name else { continue };

        def.line(format!("  bool {class}_Impl::{name}() const {{"))
            .line("    bool result = false;")
            .line(format!(
                "    boost::optional<std::string> value = getString({field}, true);"
            ))
            .line("    if (value) {")
            .line(format!(
                "      result = openstudio::istringEqual(value.get(), \"{keyword}\");"
            ))
            .line("    }")
            .line("    return result;")
            .line("  }")
            .blank();
    }
}

fn setter_body(ctx: &UnitContext, plan: &AccessorPlan, def: &mut Lines) {
    let class = ctx.class();
    let field = ctx.field_enum(plan);
    let arg = &plan.setter_argument.name;
    let owner = format!("{class}_Impl");

    def.line(format!(
        "  {} {{",
        setter_signature(plan, Some(&owner))
    ));

    if let Some(choice) = &plan.boolean_choice {
        def.line("    bool result = false;")
            .line(format!("    if ({arg}) {{"))
            .line(format!(
                "      result = setString({field}, \"{}\");",
                choice.true_literal
            ))
            .line("    } else {")
            .line(format!(
                "      result = setString({field}, \"{}\");",
                choice.false_literal
            ))
            .line("    }");
    } else if plan.is_schedule && plan.setter_argument.passing == Passing::MutRef {
        let lead = "    bool result = setSchedule(";
        let indent = " ".repeat(lead.len());
        def.line(format!("{lead}{field},"))
            .line(format!("{indent}\"{class}\","))
            .line(format!("{indent}\"{}\",", ctx.schedule_display_name(plan)))
            .line(format!("{indent}{arg});"));
    } else {
        let value = match plan.value_type() {
            ValueType::Reference(_) => format!("{arg}.handle()"),
            _ => arg.clone(),
        };
        def.line(format!(
            "    bool result = {}({field}, {value});",
            setter_accessor(plan.value_type())
        ));
    }

    if plan.setter_can_fail {
        def.line("    return result;");
    } else {
        def.line("    OS_ASSERT(result);");
    }
    def.line("  }").blank();
}

// reset_bodies
// reset, autosize and autocalculate write a fixed string to the field
fn reset_bodies(ctx: &UnitContext, plan: &AccessorPlan, def: &mut Lines) {
    let class = ctx.class();
    let field = ctx.field_enum(plan);

    for (name, value) in [
        (&plan.reset_name, ""),
        (&plan.autosize_name, "autosize"),
        (&plan.autocalculate_name, "autocalculate"),
    ] {
        let Some(name) = name else { continue };

        def.line(format!("  void {class}_Impl::{name}() {{"))
            .line(format!("    bool result = setString({field}, \"{value}\");"))
            .line("    OS_ASSERT(result);")
            .line("  }")
            .blank();
    }
}

// definitions
// static members and forwarding bodies of the public class
fn definitions(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let object_type = ctx.schema.object_type();
    let forward = format!("getImpl<detail::{class}_Impl>()->");

    let mut def = Lines::default();
    def.line(format!("IddObjectType {class}::iddObjectType() {{"))
        .line(format!("  return IddObjectType(IddObjectType::{object_type});"))
        .line("}")
        .blank();

    for plan in ctx.plans {
        if let Some(values) = &plan.values_name {
            def.line(format!("std::vector<std::string> {class}::{values}() {{"))
                .line("  return getIddKeyNames(IddFactory::instance().getObject(iddObjectType()).get(),")
                .line(format!("                        {});", ctx.field_enum(plan)))
                .line("}")
                .blank();
        }
    }

    for plan in ctx.plans {
        def.line(format!(
            "{} {class}::{}() const {{",
            plan.return_type, plan.getter_name
        ))
        .line(format!("  return {forward}{}();", plan.getter_name))
        .line("}")
        .blank();

        for name in [
            &plan.is_defaulted_name,
            &plan.is_autosized_name,
            &plan.is_autocalculated_name,
        ]
        .into_iter()
        .flatten()
        {
            def.line(format!("bool {class}::{name}() const {{"))
                .line(format!("  return {forward}{name}();"))
                .line("}")
                .blank();
        }
    }

    for plan in ctx.plans {
        let call = format!("{forward}{}({})", plan.setter_name, plan.setter_argument.name);
        def.line(format!("{} {{", setter_signature(plan, Some(class))));
        if plan.setter_can_fail {
            def.line(format!("  return {call};"));
        } else {
            def.line(format!("  {call};"));
        }
        def.line("}").blank();

        for name in [
            &plan.reset_name,
            &plan.autosize_name,
            &plan.autocalculate_name,
        ]
        .into_iter()
        .flatten()
        {
            def.line(format!("void {class}::{name}() {{"))
                .line(format!("  {forward}{name}();"))
                .line("}")
                .blank();
        }
    }

    unit.push(Surface::Definition, Section::PublicMethods, def.as_str());
}

#[cfg(test)]
mod tests {
    use crate::{
        emit::{Section, Surface},
        naming::CamelCaseNaming,
        unit::{GeneratedUnit, UnitGenerator},
    };
    use modelgen_schema::{
        field::FieldDescriptor,
        object::{ObjectFlags, ObjectSchema},
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

    fn fan() -> ObjectSchema {
        ObjectSchema::new("FanConstantVolume")
            .with_base("StraightComponent")
            .with_flags(ObjectFlags {
                object_type: Some("OS_Fan_ConstantVolume".to_string()),
                ..ObjectFlags::default()
            })
            .with_fields([
                FieldDescriptor::new("Handle", FieldKind::Handle),
                FieldDescriptor::new("Name", FieldKind::String).required(),
                FieldDescriptor::new("Availability Schedule Name", FieldKind::ObjectReference)
                    .required()
                    .with_references(["ScheduleNames"]),
                FieldDescriptor::new("Fan Efficiency", FieldKind::Real)
                    .with_bounds(0.0, 1.0)
                    .with_default(0.7),
                FieldDescriptor::new("Maximum Flow Rate", FieldKind::Real).autosizable(),
                FieldDescriptor::new("Motor In Airstream", FieldKind::Choice)
                    .with_choices(["No", "Yes"])
                    .required(),
                FieldDescriptor::new("End Use Subcategory", FieldKind::String)
                    .with_default("General"),
            ])
    }

    #[test]
    fn public_header_declares_every_operation() {
        let unit = assemble(&fan());
        let decl = unit.get(Surface::Declaration, Section::PublicMethods).unwrap();

        for expected in [
            "  static IddObjectType iddObjectType();",
            "  Schedule availabilitySchedule() const;",
            "  double fanEfficiency() const;",
            "  bool isFanEfficiencyDefaulted() const;",
            "  boost::optional<double> maximumFlowRate() const;",
            "  bool isAutosizedMaximumFlowRate() const;",
            "  bool motorInAirstream() const;",
            "  bool setAvailabilitySchedule(Schedule& schedule);",
            "  bool setFanEfficiency(double fanEfficiency);",
            "  void resetFanEfficiency();",
            "  void autosizeMaximumFlowRate();",
            "  void setMotorInAirstream(bool motorInAirstream);",
            "  void setEndUseSubcategory(const std::string& endUseSubcategory);",
        ] {
            assert!(decl.contains(expected), "missing `{expected}`");
        }
    }

    #[test]
    fn implementation_reads_and_writes_by_field_index() {
        let unit = assemble(&fan());
        let def = unit.get(Surface::ImplDefinition, Section::PublicMethods).unwrap();

        assert!(def.contains(
            "    boost::optional<double> value = getDouble(OS_Fan_ConstantVolumeFields::FanEfficiency,true);"
        ));
        assert!(def.contains(
            "    return openstudio::istringEqual(value.get(), \"Yes\");"
        ));
        assert!(def.contains(
            "    bool result = setSchedule(OS_Fan_ConstantVolumeFields::AvailabilityScheduleName,"
        ));
        assert!(def.contains("does not have an Availability Schedule attached."));
        assert!(def.contains(
            "    bool result = setString(OS_Fan_ConstantVolumeFields::MaximumFlowRate, \"autosize\");"
        ));
        assert!(def.contains(
            "std::vector<ScheduleTypeKey> FanConstantVolume_Impl::getScheduleTypeKeys(const Schedule& schedule) const"
        ));
    }

    #[test]
    fn public_class_forwards_to_implementation() {
        let unit = assemble(&fan());
        let def = unit.get(Surface::Definition, Section::PublicMethods).unwrap();

        assert!(def.contains(
            "bool FanConstantVolume::setFanEfficiency(double fanEfficiency) {\n  return getImpl<detail::FanConstantVolume_Impl>()->setFanEfficiency(fanEfficiency);\n}"
        ));
        assert!(def.contains(
            "void FanConstantVolume::setMotorInAirstream(bool motorInAirstream) {\n  getImpl<detail::FanConstantVolume_Impl>()->setMotorInAirstream(motorInAirstream);\n}"
        ));
        assert!(def.contains("  return IddObjectType(IddObjectType::OS_Fan_ConstantVolume);"));
    }

    #[test]
    fn required_reference_gets_private_optional_getter() {
        let unit = assemble(&fan());
        let private = unit.get(Surface::ImplDeclaration, Section::Private).unwrap();

        assert!(private.contains("    boost::optional<Schedule> optionalAvailabilitySchedule() const;"));
    }

    #[test]
    fn schedule_registry_snippet_follows_the_class() {
        let unit = assemble(&fan());
        let post = unit.get(Surface::Definition, Section::PostClass).unwrap();

        assert!(post.contains(
            "    {\"FanConstantVolume\",\"Availability\",\"availabilitySchedule\",,,,},"
        ));
    }

    #[test]
    fn extensible_objects_get_a_note() {
        let schema = fan().with_flags(ObjectFlags {
            extensible: true,
            ..ObjectFlags::default()
        });
        let unit = assemble(&schema);
        let decl = unit.get(Surface::Declaration, Section::PublicMethods).unwrap();

        assert_eq!(decl.matches("Extensible fields are not generated").count(), 2);
    }
}
