//! Analysis objects: data members, cloning, and variant serialization.

use crate::{
    emit::{Section, Surface},
    plan::AccessorPlan,
    unit::{GeneratedUnit, Lines, UnitContext, values},
};

pub(super) fn generate(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    if !ctx.strategy.serialization {
        return;
    }

    declarations(ctx, unit);
    impl_definitions(ctx, unit);
    definitions(ctx, unit);
}

fn setter(plan: &AccessorPlan, owner: &str) -> String {
    format!("void {owner}{}({})", plan.setter_name, values::parameter(plan))
}

fn member_methods(ctx: &UnitContext, indent: &str, lines: &mut Lines) {
    lines
        .line(format!("{indent}/** @name Getters */"))
        .line(format!("{indent}//@{{"))
        .blank();
    for plan in ctx.plans {
        lines
            .line(format!(
                "{indent}{} {}() const;",
                values::stored_type(plan),
                plan.getter_name
            ))
            .blank();
    }
    lines
        .line(format!("{indent}//@}}"))
        .line(format!("{indent}/** @name Setters */"))
        .line(format!("{indent}//@{{"))
        .blank();
    for plan in ctx.plans {
        lines.line(format!("{indent}{};", setter(plan, ""))).blank();
    }
    lines.line(format!("{indent}//@}}"));
}

fn declarations(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    let class = ctx.class();

    let mut decl = Lines::default();
    member_methods(ctx, "  ", &mut decl);
    unit.push(Surface::Declaration, Section::PublicMethods, decl.as_str());

    let mut decl = Lines::default();
    decl.line("    /** @name Virtual Methods */")
        .line("    //@{")
        .blank()
        .line(format!("    virtual {} clone() const;", ctx.base()))
        .blank()
        .line("    virtual QVariant toVariant() const;")
        .blank()
        .line("    //@}");
    member_methods(ctx, "    ", &mut decl);
    decl.line("    /** @name Absent or Protected in Public Class */")
        .line("    //@{")
        .blank()
        .line(format!(
            "    static {class} fromVariant(const QVariant& variant, const VersionString& version);"
        ))
        .blank()
        .line("    //@}");
    unit.push(Surface::ImplDeclaration, Section::PublicMethods, decl.as_str());

    if !ctx.plans.is_empty() {
        let mut private = Lines::default();
        private.blank();
        for plan in ctx.plans {
            private.line(format!(
                "    {} {};",
                values::stored_type(plan),
                values::member(plan)
            ));
        }
        unit.push(Surface::ImplDeclaration, Section::Private, private.as_str());
    }
}

fn impl_definitions(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let base = ctx.base();
    let data = format!("{}Data", ctx.instance());

    let mut def = Lines::default();
    def.line(format!("  {base} {class}_Impl::clone() const {{"))
        .line(format!(
            "    std::shared_ptr<{class}_Impl> impl(new {class}_Impl(*this));"
        ))
        .line(format!("    return {class}(impl);"))
        .line("  }")
        .blank();

    def.line(format!("  QVariant {class}_Impl::toVariant() const {{"))
        .line(format!(
            "    QVariantMap {data} = {base}_Impl::toVariant().toMap();"
        ))
        .blank();
    for plan in ctx.plans {
        let ty = values::stored_type(plan);
        let key = ctx.naming.key_name(&plan.getter_name);
        let member = values::member(plan);

        if ty.is_optional() {
            let value = values::to_variant(ty.value_type(), &format!("*{member}"));
            def.line(format!("    if ({member}) {{"))
                .line(format!("      {data}[\"{key}\"] = QVariant({value});"))
                .line("    }");
        } else {
            let value = values::to_variant(ty.value_type(), &member);
            def.line(format!("    {data}[\"{key}\"] = QVariant({value});"));
        }
    }
    def.blank()
        .line(format!("    return QVariant({data});"))
        .line("  }")
        .blank();

    for plan in ctx.plans {
        let member = values::member(plan);
        def.line(format!(
            "  {} {class}_Impl::{}() const {{",
            values::stored_type(plan),
            plan.getter_name
        ))
        .line(format!("    return {member};"))
        .line("  }")
        .blank()
        .line(format!("  {} {{", setter(plan, &format!("{class}_Impl::"))))
        .line(format!("    {member} = {};", plan.getter_name))
        .line("    onChange(AnalysisObject_Impl::Benign);")
        .line("  }")
        .blank();
    }

    from_variant(ctx, &mut def);
    unit.push(Surface::ImplDefinition, Section::PublicMethods, def.as_str());
}

// from_variant
// rebuild through the deserialization constructor; optional keys may be absent
fn from_variant(ctx: &UnitContext, def: &mut Lines) {
    let class = ctx.class();

    def.line(format!(
        "  {class} {class}_Impl::fromVariant(const QVariant& variant, const VersionString& version) {{"
    ))
    .line("    QVariantMap map = variant.toMap();")
    .blank();

    for plan in ctx.plans {
        let ty = values::stored_type(plan);
        let key = ctx.naming.key_name(&plan.getter_name);
        let convert = values::from_variant(ty.value_type(), &format!("map[\"{key}\"]"));
        let name = &plan.getter_name;

        if ty.is_optional() {
            def.line(format!("    {ty} {name};"))
                .line(format!("    if (map.contains(\"{key}\")) {{"))
                .line(format!("      {name} = {convert};"))
                .line("    }");
        } else {
            def.line(format!("    {ty} {name} = {convert};"));
        }
    }
    if !ctx.plans.is_empty() {
        def.blank();
    }

    let lead = format!("    return {class}(");
    let indent = " ".repeat(lead.len());
    let text = |key: &str| {
        format!(
            "map.contains(\"{key}\") ? map[\"{key}\"].toString().toStdString() : std::string()"
        )
    };
    let args: Vec<String> = [
        "toUUID(map[\"uuid\"].toString().toStdString())".to_string(),
        "toUUID(map[\"version_uuid\"].toString().toStdString())".to_string(),
        text("name"),
        text("display_name"),
        text("description"),
    ]
    .into_iter()
    .chain(ctx.plans.iter().map(|p| p.getter_name.clone()))
    .collect();

    def.line(format!("{lead}{});", args.join(&format!(",\n{indent}"))))
        .line("  }")
        .blank();
}

fn definitions(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let forward = format!("getImpl<detail::{class}_Impl>()->");

    let mut def = Lines::default();
    for plan in ctx.plans {
        def.line(format!(
            "{} {class}::{}() const {{",
            values::stored_type(plan),
            plan.getter_name
        ))
        .line(format!("  return {forward}{}();", plan.getter_name))
        .line("}")
        .blank()
        .line(format!("{} {{", setter(plan, &format!("{class}::"))))
        .line(format!("  {forward}{}({});", plan.setter_name, plan.getter_name))
        .line("}")
        .blank();
    }
    unit.push(Surface::Definition, Section::PublicMethods, def.as_str());
}
