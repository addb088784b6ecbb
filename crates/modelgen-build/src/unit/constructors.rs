use crate::{
    emit::{Section, Surface},
    plan::{AccessorPlan, ValueType},
    unit::{ConstructorStyle, GeneratedUnit, Lines, UnitContext, records, values},
};
use modelgen_schema::object::ObjectRole;

// generate
// pImpl plumbing shared by every role, then the role's constructor set
pub(super) fn generate(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    common(ctx, unit);

    match ctx.strategy.constructors {
        ConstructorStyle::Named => named(ctx, unit),
        ConstructorStyle::ReferencedPair => {
            if let ObjectRole::JoinRecord { left, right } = ctx.role {
                referenced_pair(ctx, left, right, unit);
            }
        }
        ConstructorStyle::RequiredFields => required_fields(ctx, unit),
        ConstructorStyle::SerializedObject => {
            if let ObjectRole::ObjectRecord { serialized } = ctx.role {
                serialized_object(ctx, serialized, unit);
            }
        }
    }
}

fn common(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let logger = format!("REGISTER_LOGGER(\"openstudio.{}.{class}\");", ctx.namespace());

    unit.push(
        Surface::Declaration,
        Section::TypeAliases,
        &format!("  typedef detail::{class}_Impl ImplType;\n\n"),
    );
    unit.push(Surface::Declaration, Section::Private, &format!("  {logger}\n"));
    unit.push(Surface::ImplDeclaration, Section::Private, &format!("    {logger}\n"));

    let mut post = Lines::default();
    post.line(format!("/** \\relates {class}*/"))
        .line(format!("typedef boost::optional<{class}> Optional{class};"))
        .blank()
        .line(format!("/** \\relates {class}*/"))
        .line(format!("typedef std::vector<{class}> {class}Vector;"))
        .blank();
    unit.push(Surface::Declaration, Section::PostClass, post.as_str());
}

// impl_head
// "  X_Impl::X_Impl(" and the indent that aligns continuation lines with it
fn impl_head(class: &str) -> (String, String) {
    let head = format!("  {class}_Impl::{class}_Impl(");
    let indent = " ".repeat(head.len());
    (head, indent)
}

// from_impl
// protected construction from an implementation pointer
fn from_impl(ctx: &UnitContext, unit: &mut GeneratedUnit, extra: Option<&str>) {
    let class = ctx.class();
    let base = ctx.base();

    let mut decl = Lines::default();
    decl.line("  /// @cond");
    match extra {
        Some(arg) => {
            decl.line(format!(
                "  {class}(std::shared_ptr<detail::{class}_Impl> impl,"
            ))
            .line(format!("  {} {arg});", " ".repeat(class.len())));
        }
        None => {
            decl.line(format!(
                "  explicit {class}(std::shared_ptr<detail::{class}_Impl> impl);"
            ));
        }
    }
    decl.blank()
        .line(format!("  friend class detail::{class}_Impl;"));
    unit.push(Surface::Declaration, Section::Protected, decl.as_str());

    let mut def = Lines::default();
    def.line("/// @cond");
    match extra {
        Some(arg) => {
            let name = arg.rsplit(' ').next().unwrap_or(arg);
            def.line(format!(
                "{class}::{class}(std::shared_ptr<detail::{class}_Impl> impl,"
            ))
            .line(format!("{} {arg})", " ".repeat(class.len() * 2 + 2)))
            .line(format!("  : {base}(std::move(impl), {name})"))
            .line("{")
            .line(format!("  OS_ASSERT(getImpl<detail::{class}_Impl>());"))
            .line("}");
        }
        None => {
            def.line(format!(
                "{class}::{class}(std::shared_ptr<detail::{class}_Impl> impl)"
            ))
            .line(format!("  : {base}(std::move(impl))"))
            .line("{}");
        }
    }
    def.line("/// @endcond").blank();
    unit.push(Surface::Definition, Section::Protected, def.as_str());
}

fn required_fields(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let base = ctx.base();
    let unique = ctx.schema.flags().unique;

    // public class
    if !unique {
        unit.push(
            Surface::Declaration,
            Section::Constructors,
            &format!("  explicit {class}(const Model& model);\n\n"),
        );
    }

    from_impl(ctx, unit, None);
    let mut friends = Lines::default();
    friends
        .line("  friend class Model;")
        .line("  friend class IdfObject;")
        .line("  friend class openstudio::detail::IdfObject_Impl;");
    if unique {
        friends
            .blank()
            .line(format!("  explicit {class}(Model& model);"));
    }
    friends.line("  /// @endcond");
    unit.push(Surface::Declaration, Section::Protected, friends.as_str());

    let mut def = Lines::default();
    if unique {
        def.line(format!("{class}::{class}(Model& model)"))
            .line(format!("  : {base}({class}::iddObjectType(),model)"))
            .line("{}")
            .blank();
        unit.push(Surface::Definition, Section::Protected, def.as_str());
    } else {
        def.line(format!("{class}::{class}(const Model& model)"))
            .line(format!("  : {base}({class}::iddObjectType(),model)"))
            .line("{")
            .line(format!("  OS_ASSERT(getImpl<detail::{class}_Impl>());"))
            .blank();
        set_required_fields(ctx, &mut def);
        def.line("}").blank();
        unit.push(Surface::Definition, Section::Constructors, def.as_str());
    }

    // implementation class, constructed from a persisted identity
    let mut decl = Lines::default();
    let (head, indent) = impl_head(class);
    let decl_head = format!("    {class}_Impl(");
    let decl_indent = " ".repeat(decl_head.len());
    for first in [
        "const IdfObject& idfObject,".to_string(),
        "const openstudio::detail::WorkspaceObject_Impl& other,".to_string(),
        format!("const {class}_Impl& other,"),
    ] {
        decl.line(format!("{decl_head}{first}"))
            .line(format!("{decl_indent}Model_Impl* model,"))
            .line(format!("{decl_indent}bool keepHandle);"))
            .blank();
    }
    unit.push(Surface::ImplDeclaration, Section::Constructors, decl.as_str());

    let mut def = Lines::default();
    for (first, source, check) in [
        ("const IdfObject& idfObject,".to_string(), "idfObject", true),
        (
            "const openstudio::detail::WorkspaceObject_Impl& other,".to_string(),
            "other",
            true,
        ),
        (format!("const {class}_Impl& other,"), "other", false),
    ] {
        def.line(format!("{head}{first}"))
            .line(format!("{indent}Model_Impl* model,"))
            .line(format!("{indent}bool keepHandle)"))
            .line(format!("    : {base}_Impl({source},model,keepHandle)"));
        if check {
            def.line("  {").line(format!(
                "    OS_ASSERT({source}.iddObject().type() == {class}::iddObjectType());"
            ));
            def.line("  }");
        } else {
            def.line("  {}");
        }
        def.blank();
    }
    unit.push(Surface::ImplDefinition, Section::Constructors, def.as_str());
}

// set_required_fields
// commented setter calls for every required field, asserting the ones that can fail
fn set_required_fields(ctx: &UnitContext, def: &mut Lines) {
    let required: Vec<_> = ctx.plans.iter().filter(|p| p.is_required).collect();

    let references: Vec<_> = required
        .iter()
        .filter(|p| matches!(p.value_type(), ValueType::Reference(_)))
        .collect();
    if !references.is_empty() {
        def.line("  // Required object references, set these before use:");
        for plan in references {
            def.line(format!("  //     {}", ctx.field_enum(plan)));
        }
    }

    let mut declared = false;
    for plan in required {
        if plan.setter_can_fail {
            if !declared {
                def.line("  bool ok = true;");
                declared = true;
            }
            def.line(format!("  // ok = {}();", plan.setter_name))
                .line("  OS_ASSERT(ok);");
        } else {
            def.line(format!("  // {}();", plan.setter_name));
        }
    }
}

fn serialized_object(ctx: &UnitContext, serialized: &str, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let base = ctx.base();
    let arg = ctx.naming.lower_camel(serialized);
    let object_record = base == "ObjectRecord";

    let mut decl = Lines::default();
    decl.line(format!(
        "  {class}(const {serialized}& {arg}, ProjectDatabase& database);"
    ))
    .blank()
    .line(format!(
        "  {class}(const QSqlQuery& query, ProjectDatabase& database);"
    ))
    .blank();
    unit.push(Surface::Declaration, Section::Constructors, decl.as_str());

    let mut decl = Lines::default();
    decl.line(format!(
        "    {class}_Impl(const {serialized}& {arg}, ProjectDatabase& database);"
    ))
    .blank()
    .line("    /** Constructor from query. Throws if bad query. */")
    .line(format!(
        "    {class}_Impl(const QSqlQuery& query, ProjectDatabase& database);"
    ))
    .blank();
    unit.push(Surface::ImplDeclaration, Section::Constructors, decl.as_str());

    // implementation
    let (head, _) = impl_head(class);
    let mut def = Lines::default();
    def.line(format!(
        "{head}const {serialized}& {arg}, ProjectDatabase& database)"
    ));
    if object_record {
        def.line(format!(
            "    : {base}_Impl(database,{arg}.uuid(),{arg}.name(),{arg}.displayName(),{arg}.description(),{arg}.versionUUID())"
        ));
    } else {
        def.line(format!("    : {base}_Impl({arg}, database)"));
    }
    def.line("  {");
    copy_from_serialized(ctx, &arg, &mut def);
    def.line("  }").blank();

    def.line(format!(
        "{head}const QSqlQuery& query, ProjectDatabase& database)"
    ));
    if object_record {
        def.line(format!("    : {base}_Impl(database, query)"));
    } else {
        def.line(format!("    : {base}_Impl(query, database)"));
    }
    def.line("  {")
        .line("    OS_ASSERT(query.isValid());")
        .line("    OS_ASSERT(query.isActive());")
        .line("    OS_ASSERT(query.isSelect());");
    if ctx.strategy.column_enum && !ctx.plans.is_empty() {
        def.blank().line("    QVariant value;").blank();
        records::read_query(ctx, &mut def, false);
    }
    def.line("  }").blank();
    unit.push(Surface::ImplDefinition, Section::Constructors, def.as_str());

    // public class
    let mut def = Lines::default();
    for (params, args) in [
        (
            format!("const {serialized}& {arg}, ProjectDatabase& database"),
            format!("{arg}, database"),
        ),
        (
            "const QSqlQuery& query, ProjectDatabase& database".to_string(),
            "query, database".to_string(),
        ),
    ] {
        def.line(format!("{class}::{class}({params})"))
            .line(format!("  : {base}(std::shared_ptr<detail::{class}_Impl>("))
            .line(format!("        new detail::{class}_Impl({args})),"))
            .line("        database)")
            .line("{")
            .line(format!("  OS_ASSERT(getImpl<detail::{class}_Impl>());"))
            .line("}")
            .blank();
    }
    unit.push(Surface::Definition, Section::Constructors, def.as_str());

    from_impl(ctx, unit, Some("ProjectDatabase database"));
    record_friends(unit);
}

// copy_from_serialized
// initialize data members from the serialized object; references keep their name
fn copy_from_serialized(ctx: &UnitContext, arg: &str, def: &mut Lines) {
    if !ctx.strategy.column_enum {
        return;
    }

    for plan in ctx.plans {
        let member = values::member(plan);
        let getter = &plan.getter_name;

        match (plan.value_type(), plan.is_optional) {
            (ValueType::Reference(class), true) => {
                def.line(format!(
                    "    if (boost::optional<{class}> value = {arg}.{getter}()) {{"
                ))
                .line(format!("      {member} = value->name();"))
                .line("    }");
            }
            (ValueType::Reference(_), false) => {
                def.line(format!("    {member} = {arg}.{getter}().name();"));
            }
            _ => {
                def.line(format!("    {member} = {arg}.{getter}();"));
            }
        }
    }
}

fn record_friends(unit: &mut GeneratedUnit) {
    unit.push(
        Surface::Declaration,
        Section::Protected,
        "  friend class Record;\n  friend class ProjectDatabase;\n  /// @endcond\n",
    );
}

fn referenced_pair(ctx: &UnitContext, left: &str, right: &str, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let base = ctx.base();
    let left_arg = records::record_argument(ctx, left);
    let right_arg = records::record_argument(ctx, right);
    let pair = format!("const {left}Record& {left_arg}, const {right}Record& {right_arg}");

    let mut decl = Lines::default();
    decl.line(format!("  {class}({pair});"))
        .blank()
        .line(format!(
            "  {class}(const QSqlQuery& query, ProjectDatabase& database);"
        ))
        .blank();
    unit.push(Surface::Declaration, Section::Constructors, decl.as_str());

    let mut decl = Lines::default();
    decl.line(format!("    {class}_Impl({pair});"))
        .blank()
        .line("    /** Constructor from query. Throws if bad query. */")
        .line(format!(
            "    {class}_Impl(const QSqlQuery& query, ProjectDatabase& database);"
        ))
        .blank();
    unit.push(Surface::ImplDeclaration, Section::Constructors, decl.as_str());

    let (head, indent) = impl_head(class);
    let mut def = Lines::default();
    def.line(format!("{head}const {left}Record& {left_arg},"))
        .line(format!("{indent}const {right}Record& {right_arg})"))
        .line(format!(
            "    : {base}_Impl({left_arg}.id(), {left_arg}.handle(), {right_arg}.id(), {right_arg}.handle(), {left_arg}.projectDatabase())"
        ))
        .line("  {")
        .line(format!(
            "    OS_ASSERT({left_arg}.projectDatabase().handle() == {right_arg}.projectDatabase().handle());"
        ))
        .line("  }")
        .blank()
        .line(format!("{head}const QSqlQuery& query, ProjectDatabase& database)"))
        .line(format!("    : {base}_Impl(query, database)"))
        .line("  {}")
        .blank();
    unit.push(Surface::ImplDefinition, Section::Constructors, def.as_str());

    let public_indent = " ".repeat(class.len() * 2 + 3);
    let mut def = Lines::default();
    def.line(format!("{class}::{class}(const {left}Record& {left_arg},"))
        .line(format!("{public_indent}const {right}Record& {right_arg})"))
        .line(format!("  : {base}(std::shared_ptr<detail::{class}_Impl>("))
        .line(format!(
            "        new detail::{class}_Impl({left_arg}, {right_arg})),"
        ))
        .line(format!("        {left_arg}.projectDatabase())"))
        .line("{")
        .line(format!("  OS_ASSERT(getImpl<detail::{class}_Impl>());"))
        .line("}")
        .blank()
        .line(format!(
            "{class}::{class}(const QSqlQuery& query, ProjectDatabase& database)"
        ))
        .line(format!("  : {base}(std::shared_ptr<detail::{class}_Impl>("))
        .line(format!("        new detail::{class}_Impl(query, database)),"))
        .line("        database)")
        .line("{")
        .line(format!("  OS_ASSERT(getImpl<detail::{class}_Impl>());"))
        .line("}")
        .blank();
    unit.push(Surface::Definition, Section::Constructors, def.as_str());

    from_impl(ctx, unit, Some("ProjectDatabase database"));
    record_friends(unit);
}

fn named(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let base = ctx.base();

    let identity = [
        "const UUID& uuid",
        "const UUID& versionUUID",
        "const std::string& name",
        "const std::string& displayName",
        "const std::string& description",
    ];
    let params: Vec<String> = identity
        .iter()
        .map(ToString::to_string)
        .chain(ctx.plans.iter().map(values::parameter))
        .collect();
    let args: Vec<&str> = ["uuid", "versionUUID", "name", "displayName", "description"]
        .into_iter()
        .chain(ctx.plans.iter().map(|p| p.getter_name.as_str()))
        .collect();

    // declarations
    let signature = |lead: &str| {
        let indent = " ".repeat(lead.len());
        let mut text = String::from(lead);
        text.push_str(&params.join(&format!(",\n{indent}")));
        text.push_str(");\n");
        text
    };

    let mut decl = Lines::default();
    decl.line(format!("  explicit {class}(const std::string& name);"))
        .blank()
        .line("  /** Constructor provided for deserialization; not for general use. */");
    let mut text = decl.as_str().to_string();
    text.push_str(&signature(&format!("  {class}(")));
    text.push('\n');
    unit.push(Surface::Declaration, Section::Constructors, &text);

    let mut decl = Lines::default();
    decl.line(format!("    explicit {class}_Impl(const std::string& name);"))
        .blank();
    let mut text = decl.as_str().to_string();
    text.push_str(&signature(&format!("    {class}_Impl(")));
    text.push('\n');
    text.push_str(&format!("    {class}_Impl(const {class}_Impl& other);\n\n"));
    unit.push(Surface::ImplDeclaration, Section::Constructors, &text);

    // implementation
    let (head, indent) = impl_head(class);
    let mut def = Lines::default();
    def.line(format!("{head}const std::string& name)"))
        .line(format!("    : {base}_Impl(name)"))
        .line("  {}")
        .blank();

    def.line(format!(
        "{head}{})",
        params.join(&format!(",\n{indent}"))
    ))
    .line(format!(
        "    : {base}_Impl(uuid, versionUUID, name, displayName, description){}",
        if ctx.plans.is_empty() { "" } else { "," }
    ));
    initializers(ctx, &mut def, |plan| plan.getter_name.clone());
    def.line("  {}").blank();

    def.line(format!("{head}const {class}_Impl& other)"))
        .line(format!(
            "    : {base}_Impl(other){}",
            if ctx.plans.is_empty() { "" } else { "," }
        ));
    initializers(ctx, &mut def, |plan| format!("other.{}", values::member(plan)));
    def.line("  {}").blank();
    unit.push(Surface::ImplDefinition, Section::Constructors, def.as_str());

    // public class
    let public_head = format!("{class}::{class}(");
    let public_indent = " ".repeat(public_head.len());
    let mut def = Lines::default();
    def.line(format!("{public_head}const std::string& name)"))
        .line(format!("  : {base}(std::shared_ptr<detail::{class}_Impl>("))
        .line(format!("        new detail::{class}_Impl(name)))"))
        .line("{}")
        .blank()
        .line(format!(
            "{public_head}{})",
            params.join(&format!(",\n{public_indent}"))
        ))
        .line(format!("  : {base}(std::shared_ptr<detail::{class}_Impl>("))
        .line(format!(
            "        new detail::{class}_Impl({})))",
            args.join(",\n                                 ")
        ))
        .line("{}")
        .blank();
    unit.push(Surface::Definition, Section::Constructors, def.as_str());

    from_impl(ctx, unit, None);
    unit.push(
        Surface::Declaration,
        Section::Protected,
        &format!("  friend class {base};\n  friend class detail::{base}_Impl;\n  /// @endcond\n"),
    );
}

// initializers
// one member initializer per field, comma separated
fn initializers(
    ctx: &UnitContext,
    def: &mut Lines,
    value: impl Fn(&AccessorPlan) -> String,
) {
    let last = ctx.plans.len().saturating_sub(1);
    for (i, plan) in ctx.plans.iter().enumerate() {
        let sep = if i == last { "" } else { "," };
        def.line(format!(
            "      {}({}){sep}",
            values::member(plan),
            value(plan)
        ));
    }
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

    #[test]
    fn data_object_sets_required_fields_in_public_constructor() {
        let schema = ObjectSchema::new("Fan").with_fields([
            FieldDescriptor::new("Fan Efficiency", FieldKind::Real)
                .required()
                .with_bounds(0.0, 1.0),
            FieldDescriptor::new("Label", FieldKind::String).required(),
        ]);
        let unit = assemble(&schema);
        let def = unit.get(Surface::Definition, Section::Constructors).unwrap();

        assert!(def.contains("Fan::Fan(const Model& model)\n  : ModelObject(Fan::iddObjectType(),model)"));
        assert!(def.contains("  bool ok = true;\n  // ok = setFanEfficiency();\n  OS_ASSERT(ok);"));
        assert!(def.contains("  // setLabel();"));

        let impl_def = unit.get(Surface::ImplDefinition, Section::Constructors).unwrap();
        assert_eq!(impl_def.matches("Fan_Impl::Fan_Impl(").count(), 3);
        assert!(impl_def.contains("OS_ASSERT(idfObject.iddObject().type() == Fan::iddObjectType());"));
    }

    #[test]
    fn unique_data_object_constructor_is_protected() {
        let schema = ObjectSchema::new("SiteWater").with_flags(ObjectFlags {
            unique: true,
            ..ObjectFlags::default()
        });
        let unit = assemble(&schema);

        assert_eq!(unit.get(Surface::Declaration, Section::Constructors), Some(""));
        let protected = unit.get(Surface::Declaration, Section::Protected).unwrap();
        assert!(protected.contains("explicit SiteWater(Model& model);"));
    }

    #[test]
    fn object_record_reads_members_from_the_query() {
        let schema = ObjectSchema::new("WidgetRecord").with_fields([
            FieldDescriptor::new("Rate", FieldKind::Real).required(),
            FieldDescriptor::new("Label", FieldKind::String),
        ]);
        let unit = assemble(&schema);
        let def = unit.get(Surface::ImplDefinition, Section::Constructors).unwrap();

        assert!(def.contains("WidgetRecord_Impl::WidgetRecord_Impl(const Widget& widget, ProjectDatabase& database)"));
        assert!(def.contains("    m_rate = widget.rate();"));
        assert!(def.contains("    m_rate = value.toDouble();"));
        assert!(def.contains("      m_label = value.toString().toStdString();"));
    }

    #[test]
    fn join_record_constructs_from_both_records() {
        let schema = ObjectSchema::new("Widget_Gadget_JoinRecord");
        let unit = assemble(&schema);
        let decl = unit.get(Surface::Declaration, Section::Constructors).unwrap();

        assert!(decl.contains(
            "Widget_Gadget_JoinRecord(const WidgetRecord& widgetRecord, const GadgetRecord& gadgetRecord);"
        ));
    }

    #[test]
    fn analysis_object_deserialization_takes_every_field() {
        let schema = ObjectSchema::new("Optimizer")
            .with_role(ObjectRole::AnalysisObject)
            .with_fields([
                FieldDescriptor::new("Tolerance", FieldKind::Real).required(),
                FieldDescriptor::new("Method", FieldKind::String).required(),
            ]);
        let unit = assemble(&schema);
        let decl = unit.get(Surface::Declaration, Section::Constructors).unwrap();

        assert!(decl.contains("explicit Optimizer(const std::string& name);"));
        assert!(decl.contains("double tolerance,"));
        assert!(decl.contains("const std::string& method);"));

        let impl_def = unit.get(Surface::ImplDefinition, Section::Constructors).unwrap();
        assert!(impl_def.contains("      m_tolerance(tolerance),\n      m_method(method)\n  {}"));
        assert!(impl_def.contains("      m_method(other.m_method)\n  {}"));
    }
}
