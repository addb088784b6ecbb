//! Tabular persistence for object and join records.

use crate::{
    emit::{Section, Surface},
    plan::AccessorPlan,
    unit::{GeneratedUnit, Lines, UnitContext, values},
};
use modelgen_schema::object::ObjectRole;

/// Columns every object record table starts with.
const STANDARD_COLUMNS: [(&str, &str); 8] = [
    ("id", "INTEGER PRIMARY KEY"),
    ("handle", "TEXT"),
    ("name", "TEXT"),
    ("displayName", "TEXT"),
    ("description", "TEXT"),
    ("timestampCreate", "TEXT"),
    ("timestampLast", "TEXT"),
    ("uuidLast", "TEXT"),
];

pub(super) fn generate(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    if !ctx.strategy.record_statics {
        return;
    }

    match ctx.role {
        ObjectRole::ObjectRecord { serialized } => object_record(ctx, serialized, unit),
        ObjectRole::JoinRecord { left, right } => join_record(ctx, left, right, unit),
        ObjectRole::AnalysisObject | ObjectRole::DataObject => {}
    }
}

/// Argument name for a record of `class`, e.g. `widgetRecord`.
pub(super) fn record_argument(ctx: &UnitContext, class: &str) -> String {
    format!("{}Record", ctx.naming.lower_camel(class))
}

fn column(ctx: &UnitContext, plan: &AccessorPlan) -> String {
    format!("{}::ColumnsType::{}", ctx.class(), plan.getter_name)
}

// read_query
// assign each data member from the current row; `last` targets the saved copies
pub(super) fn read_query(ctx: &UnitContext, lines: &mut Lines, last: bool) {
    for plan in ctx.plans {
        let ty = values::stored_type(plan);
        let member = if last {
            values::last_member(plan, ctx.naming)
        } else {
            values::member(plan)
        };
        let convert = values::from_variant(ty.value_type(), "value");

        lines.line(format!("    value = query.value({});", column(ctx, plan)));
        if ty.is_optional() {
            lines
                .line("    if (value.isValid() && !value.isNull()) {")
                .line(format!("      {member} = {convert};"))
                .line("    }");
            if last {
                lines
                    .line("    else {")
                    .line(format!("      {member}.reset();"))
                    .line("    }");
            }
        } else {
            lines
                .line("    OS_ASSERT(value.isValid() && !value.isNull());")
                .line(format!("    {member} = {convert};"));
        }
        lines.blank();
    }
}

fn object_record(ctx: &UnitContext, serialized: &str, unit: &mut GeneratedUnit) {
    let class = ctx.class();

    if ctx.strategy.column_enum {
        unit.push(Surface::Declaration, Section::Preamble, &column_enum(ctx));
        unit.push(
            Surface::Declaration,
            Section::TypeAliases,
            &format!("  typedef {class}Columns ColumnsType;\n  typedef {class} ObjectRecordType;\n\n"),
        );
    }

    object_declarations(ctx, serialized, unit);
    object_impl_definitions(ctx, serialized, unit);
    object_definitions(ctx, serialized, unit);
    members(ctx, unit);
}

fn column_enum(ctx: &UnitContext) -> String {
    let class = ctx.class();
    let mut lines = Lines::default();

    lines
        .line(format!("/** \\class {class}Columns"))
        .line(format!(" *  \\brief Column definitions for the {class}s table."))
        .line(" *")
        .line(format!(" *  \\relates {class} */"))
        .line(format!("OPENSTUDIO_ENUM({class}Columns,"));

    let standard = STANDARD_COLUMNS
        .iter()
        .map(|(name, ty)| ((*name).to_string(), *ty));
    let fields = ctx.plans.iter().map(|plan| {
        let ty = values::stored_type(plan);
        (plan.getter_name.clone(), values::sql_type(ty.value_type()))
    });
    for (index, (name, ty)) in standard.chain(fields).enumerate() {
        lines.line(format!("  (({name})({ty})({index}))"));
    }
    lines.line(");").blank();

    lines.as_str().to_string()
}

fn object_declarations(ctx: &UnitContext, serialized: &str, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let arg = ctx.naming.lower_camel(serialized);
    let path_indent = " ".repeat("  static void updatePathData(".len());

    let mut decl = Lines::default();
    decl.line("  static std::string databaseTableName();")
        .blank()
        .line("  static void updatePathData(ProjectDatabase database,")
        .line(format!("{path_indent}const openstudio::path& originalBase,"))
        .line(format!("{path_indent}const openstudio::path& newBase);"))
        .blank()
        .line(format!("  /** Get {class} from query. Returned object will be of the correct"))
        .line("   *  derived type. */")
        .line(format!(
            "  static boost::optional<{class}> factoryFromQuery(const QSqlQuery& query, ProjectDatabase& database);"
        ))
        .blank()
        .line(format!(
            "  static {class} factoryFrom{serialized}(const {serialized}& {arg}, ProjectDatabase& database);"
        ))
        .blank()
        .line(format!(
            "  static std::vector<{class}> get{class}s(ProjectDatabase& database);"
        ))
        .blank()
        .line(format!(
            "  static boost::optional<{class}> get{class}(int id, ProjectDatabase& database);"
        ))
        .blank()
        .line("  /** @name Getters */")
        .line("  //@{")
        .blank()
        .line(format!("  {serialized} {arg}() const;"))
        .blank();
    for plan in ctx.plans {
        decl.line(format!(
            "  {} {}() const;",
            values::stored_type(plan),
            plan.getter_name
        ))
        .blank();
    }
    decl.line("  //@}");
    unit.push(Surface::Declaration, Section::PublicMethods, decl.as_str());

    let mut decl = Lines::default();
    decl.line("    /** @name Virtual Methods */")
        .line("    //@{")
        .blank()
        .line("    /** Get the name of the database table for this record. Should be implemented by the base")
        .line("     *  class for the table. */")
        .line("    virtual std::string databaseTableName() const;")
        .blank()
        .line("    /** Returns the direct parent of this object, if it exists. */")
        .line("    virtual boost::optional<ObjectRecord> parent() const;")
        .blank()
        .line("    /** Returns objects directly owned by this Record. Children are removed when this Record")
        .line("     *  is removed. */")
        .line("    virtual std::vector<ObjectRecord> children() const;")
        .blank()
        .line("    /** Returns objects referenced, but not owned, by this Record. */")
        .line("    virtual std::vector<ObjectRecord> resources() const;")
        .blank()
        .line("    /** Returns join relationships between this object and others. Such relationships will be")
        .line("     *  removed when either record in the relationship is removed. */")
        .line("    virtual std::vector<JoinRecord> joinRecords() const;")
        .blank()
        .line("    /** Save the row that corresponds to this record in projectDatabase. */")
        .line("    virtual void saveRow(ProjectDatabase& projectDatabase);")
        .blank()
        .line("    //@}")
        .line("    /** @name Getters */")
        .line("    //@{")
        .blank()
        .line(format!("    {serialized} {arg}() const;"))
        .blank();
    for plan in ctx.plans {
        decl.line(format!(
            "    {} {}() const;",
            values::stored_type(plan),
            plan.getter_name
        ))
        .blank();
    }
    decl.line("    //@}");
    unit.push(Surface::ImplDeclaration, Section::PublicMethods, decl.as_str());

    let mut protected = Lines::default();
    for (doc, signature) in [
        (
            "Bind data member values to a query for saving.",
            "void bindValues(QSqlQuery& query) const",
        ),
        (
            "Set the last state of this object from the query (including id).",
            "void setLastValues(const QSqlQuery& query, ProjectDatabase& projectDatabase)",
        ),
        (
            "Check that values (except id) are same as query.",
            "bool compareValues(const QSqlQuery& query) const",
        ),
        ("Save values to last state.", "void saveLastValues()"),
        ("Revert values back to last state.", "void revertToLastValues()"),
    ] {
        protected
            .line(format!("    /** {doc} */"))
            .line(format!("    virtual {signature};"))
            .blank();
    }
    unit.push(Surface::ImplDeclaration, Section::Protected, protected.as_str());
}

fn object_impl_definitions(ctx: &UnitContext, serialized: &str, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let base = ctx.base();
    let arg = ctx.naming.lower_camel(serialized);

    let mut def = Lines::default();
    def.line(format!("  std::string {class}_Impl::databaseTableName() const {{"))
        .line(format!("    return {class}::databaseTableName();"))
        .line("  }")
        .blank()
        .line(format!("  boost::optional<ObjectRecord> {class}_Impl::parent() const {{"))
        .line("    return boost::none;")
        .line("  }")
        .blank();
    for (method, ty) in [
        ("children", "ObjectRecord"),
        ("resources", "ObjectRecord"),
        ("joinRecords", "JoinRecord"),
    ] {
        def.line(format!("  std::vector<{ty}> {class}_Impl::{method}() const {{"))
            .line(format!("    {ty}Vector result;"))
            .line("    return result;")
            .line("  }")
            .blank();
    }
    save_row(class, &mut def);

    def.line(format!("  {serialized} {class}_Impl::{arg}() const {{"))
        .line(format!(
            "    LOG_AND_THROW(\"Rebuilding a {serialized} from its record is not implemented.\");"
        ))
        .line("  }")
        .blank();
    for plan in ctx.plans {
        def.line(format!(
            "  {} {class}_Impl::{}() const {{",
            values::stored_type(plan),
            plan.getter_name
        ))
        .line(format!("    return {};", values::member(plan)))
        .line("  }")
        .blank();
    }
    unit.push(Surface::ImplDefinition, Section::PublicMethods, def.as_str());

    let mut def = Lines::default();
    def.line(format!("  void {class}_Impl::bindValues(QSqlQuery& query) const {{"))
        .line(format!("    {base}_Impl::bindValues(query);"))
        .blank();
    for plan in ctx.plans {
        bind_value(ctx, plan, &mut def);
    }
    def.line("  }").blank();

    def.line(format!(
        "  void {class}_Impl::setLastValues(const QSqlQuery& query, ProjectDatabase& projectDatabase) {{"
    ));
    assert_select(&mut def);
    def.line(format!("    {base}_Impl::setLastValues(query,projectDatabase);"))
        .blank()
        .line("    QVariant value;")
        .blank();
    read_query(ctx, &mut def, true);
    def.line("  }").blank();

    def.line(format!(
        "  bool {class}_Impl::compareValues(const QSqlQuery& query) const {{"
    ));
    assert_select(&mut def);
    def.line(format!("    bool result = {base}_Impl::compareValues(query);"))
        .blank()
        .line("    QVariant value;")
        .blank();
    for plan in ctx.plans {
        compare_value(ctx, plan, &mut def);
    }
    def.line("    return result;").line("  }").blank();

    for (method, copy_to_last) in [("saveLastValues", true), ("revertToLastValues", false)] {
        def.line(format!("  void {class}_Impl::{method}() {{"))
            .line(format!("    {base}_Impl::{method}();"))
            .blank();
        for plan in ctx.plans {
            let member = values::member(plan);
            let last = values::last_member(plan, ctx.naming);
            if copy_to_last {
                def.line(format!("    {last} = {member};"));
            } else {
                def.line(format!("    {member} = {last};"));
            }
        }
        def.line("  }").blank();
    }
    unit.push(Surface::ImplDefinition, Section::Protected, def.as_str());
}

fn assert_select(def: &mut Lines) {
    def.line("    OS_ASSERT(query.isValid());")
        .line("    OS_ASSERT(query.isActive());")
        .line("    OS_ASSERT(query.isSelect());")
        .blank();
}

fn save_row(class: &str, def: &mut Lines) {
    def.line(format!(
        "  void {class}_Impl::saveRow(ProjectDatabase& projectDatabase) {{"
    ))
    .line("    QSqlQuery query(*(projectDatabase.qSqlDatabase()));")
    .line(format!("    this->makeUpdateByIdQuery<{class}>(query);"))
    .line("    this->bindValues(query);")
    .line("    assertExec(query);")
    .line("  }")
    .blank();
}

fn bind_value(ctx: &UnitContext, plan: &AccessorPlan, def: &mut Lines) {
    let ty = values::stored_type(plan);
    let column = column(ctx, plan);
    let member = values::member(plan);

    if ty.is_optional() {
        let value = values::to_variant(ty.value_type(), &format!("*{member}"));
        def.line(format!("    if ({member}) {{"))
            .line(format!("      query.bindValue({column},{value});"))
            .line("    }")
            .line("    else {")
            .line(format!(
                "      query.bindValue({column},QVariant({}));",
                values::variant_type(ty.value_type())
            ))
            .line("    }");
    } else {
        let value = values::to_variant(ty.value_type(), &member);
        def.line(format!("    query.bindValue({column},{value});"));
    }
}

fn compare_value(ctx: &UnitContext, plan: &AccessorPlan, def: &mut Lines) {
    let ty = values::stored_type(plan);
    let member = values::member(plan);
    let convert = values::from_variant(ty.value_type(), "value");

    def.line(format!("    value = query.value({});", column(ctx, plan)));
    if ty.is_optional() {
        def.line("    if (value.isValid() && !value.isNull()) {")
            .line(format!(
                "      result = result && {member} && (*{member} == {convert});"
            ))
            .line("    }")
            .line("    else {")
            .line(format!("      result = result && !{member};"))
            .line("    }");
    } else {
        def.line("    OS_ASSERT(value.isValid() && !value.isNull());")
            .line(format!("    result = result && ({member} == {convert});"));
    }
    def.blank();
}

fn object_definitions(ctx: &UnitContext, serialized: &str, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let instance = ctx.instance();
    let arg = ctx.naming.lower_camel(serialized);
    let path_indent = " ".repeat(format!("void {class}::updatePathData(").len());

    let mut def = Lines::default();
    def.line(format!("std::string {class}::databaseTableName() {{"))
        .line(format!("  return \"{class}s\";"))
        .line("}")
        .blank()
        .line(format!("void {class}::updatePathData(ProjectDatabase database,"))
        .line(format!("{path_indent}const openstudio::path& originalBase,"))
        .line(format!("{path_indent}const openstudio::path& newBase)"))
        .line("{")
        .line(format!("  {class}Vector records = get{class}s(database);"))
        .line(format!("  for ({class}& record : records) {{"))
        .line(format!(
            "    record.getImpl<detail::{class}_Impl>()->updatePathData(originalBase,newBase);"
        ))
        .line("  }")
        .line("}")
        .blank()
        .line(format!(
            "boost::optional<{class}> {class}::factoryFromQuery(const QSqlQuery& query, ProjectDatabase& database)"
        ))
        .line("{")
        .line(format!("  Optional{class} result;"))
        .blank()
        .line("  try {")
        .line(format!("    result = {class}(query,database);"))
        .line("  }")
        .line("  catch (const std::exception& e) {")
        .line(format!("    LOG(Error,\"Unable to construct {class} from query, because '\""))
        .line("        << e.what() << \"'.\");")
        .line("  }")
        .blank()
        .line("  return result;")
        .line("}")
        .blank()
        .line(format!(
            "{class} {class}::factoryFrom{serialized}(const {serialized}& {arg}, ProjectDatabase& database)"
        ))
        .line("{")
        .line(format!("  return {class}({arg}, database);"))
        .line("}")
        .blank()
        .line(format!(
            "std::vector<{class}> {class}::get{class}s(ProjectDatabase& database) {{"
        ))
        .line(format!("  std::vector<{class}> result;"))
        .blank()
        .line("  QSqlQuery query(*(database.qSqlDatabase()));")
        .line(format!(
            "  query.prepare(toQString(\"SELECT * FROM \" + {class}::databaseTableName()));"
        ))
        .line("  assertExec(query);")
        .line("  while (query.next()) {")
        .line(format!(
            "    Optional{class} {instance} = {class}::factoryFromQuery(query, database);"
        ))
        .line(format!("    if ({instance}) {{"))
        .line(format!("      result.push_back(*{instance});"))
        .line("    }")
        .line("  }")
        .blank()
        .line("  return result;")
        .line("}")
        .blank()
        .line(format!(
            "boost::optional<{class}> {class}::get{class}(int id, ProjectDatabase& database) {{"
        ))
        .line(format!("  boost::optional<{class}> result;"))
        .blank()
        .line("  QSqlQuery query(*(database.qSqlDatabase()));")
        .line(format!(
            "  query.prepare(toQString(\"SELECT * FROM \" + {class}::databaseTableName() + \" WHERE id=:id\"));"
        ))
        .line("  query.bindValue(\":id\",id);")
        .line("  assertExec(query);")
        .line("  if (query.first()) {")
        .line(format!("    result = {class}::factoryFromQuery(query, database);"))
        .line("  }")
        .blank()
        .line("  return result;")
        .line("}")
        .blank();

    let forward = format!("getImpl<detail::{class}_Impl>()->");
    def.line(format!("{serialized} {class}::{arg}() const {{"))
        .line(format!("  return {forward}{arg}();"))
        .line("}")
        .blank();
    for plan in ctx.plans {
        def.line(format!(
            "{} {class}::{}() const {{",
            values::stored_type(plan),
            plan.getter_name
        ))
        .line(format!("  return {forward}{}();", plan.getter_name))
        .line("}")
        .blank();
    }
    unit.push(Surface::Definition, Section::PublicMethods, def.as_str());
}

// members
// current and last-saved copy of every field
fn members(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    if ctx.plans.is_empty() {
        return;
    }

    let mut private = Lines::default();
    private.blank();
    for plan in ctx.plans {
        private.line(format!(
            "    {} {};",
            values::stored_type(plan),
            values::member(plan)
        ));
    }
    private.blank();
    for plan in ctx.plans {
        private.line(format!(
            "    {} {};",
            values::stored_type(plan),
            values::last_member(plan, ctx.naming)
        ));
    }
    unit.push(Surface::ImplDeclaration, Section::Private, private.as_str());
}

fn join_record(ctx: &UnitContext, left: &str, right: &str, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let left_arg = record_argument(ctx, left);
    let right_arg = record_argument(ctx, right);

    unit.push(
        Surface::Declaration,
        Section::TypeAliases,
        "  typedef JoinRecordColumns ColumnsType;\n\n",
    );

    let mut decl = Lines::default();
    decl.line("  static std::string databaseTableName();")
        .blank()
        .line(format!(
            "  static std::vector<{right}Record> get{right}Records(const {left}Record& {left_arg});"
        ))
        .blank()
        .line(format!(
            "  static std::vector<{left}Record> get{left}Records(const {right}Record& {right_arg});"
        ))
        .blank()
        .line("  /** @name Getters */")
        .line("  //@{")
        .blank()
        .line(format!("  {left}Record {left_arg}() const;"))
        .blank()
        .line(format!("  {right}Record {right_arg}() const;"))
        .blank()
        .line("  //@}");
    unit.push(Surface::Declaration, Section::PublicMethods, decl.as_str());

    let mut decl = Lines::default();
    decl.line("    /** @name Virtual Methods */")
        .line("    //@{")
        .blank()
        .line("    virtual std::string databaseTableName() const;")
        .blank()
        .line("    /** Save the row that corresponds to this record in projectDatabase. */")
        .line("    virtual void saveRow(ProjectDatabase& projectDatabase);")
        .blank()
        .line("    //@}")
        .line("    /** @name Getters */")
        .line("    //@{")
        .blank()
        .line("    virtual ObjectRecord leftObject() const;")
        .blank()
        .line("    virtual ObjectRecord rightObject() const;")
        .blank()
        .line(format!("    {left}Record {left_arg}() const;"))
        .blank()
        .line(format!("    {right}Record {right_arg}() const;"))
        .blank()
        .line("    //@}");
    unit.push(Surface::ImplDeclaration, Section::PublicMethods, decl.as_str());

    // implementation
    let mut def = Lines::default();
    def.line(format!("  std::string {class}_Impl::databaseTableName() const {{"))
        .line(format!("    return {class}::databaseTableName();"))
        .line("  }")
        .blank();
    save_row(class, &mut def);
    for (side, arg) in [("leftObject", &left_arg), ("rightObject", &right_arg)] {
        def.line(format!("  ObjectRecord {class}_Impl::{side}() const {{"))
            .line(format!("    return this->{arg}();"))
            .line("  }")
            .blank();
    }
    for (record, arg, id) in [(left, &left_arg, "leftId"), (right, &right_arg, "rightId")] {
        def.line(format!("  {record}Record {class}_Impl::{arg}() const {{"))
            .line("    ProjectDatabase database = this->projectDatabase();")
            .line(format!(
                "    boost::optional<{record}Record> {arg} = {record}Record::get{record}Record(this->{id}(),database);"
            ))
            .line(format!("    OS_ASSERT({arg});"))
            .line(format!("    return *{arg};"))
            .line("  }")
            .blank();
    }
    unit.push(Surface::ImplDefinition, Section::PublicMethods, def.as_str());

    // public class
    let mut def = Lines::default();
    def.line(format!("std::string {class}::databaseTableName() {{"))
        .line(format!("  return \"{class}s\";"))
        .line("}")
        .blank();
    for (from, from_arg, from_column, to, to_arg, to_column) in [
        (left, &left_arg, "leftId", right, &right_arg, "rightId"),
        (right, &right_arg, "rightId", left, &left_arg, "leftId"),
    ] {
        def.line(format!(
            "std::vector<{to}Record> {class}::get{to}Records(const {from}Record& {from_arg}) {{"
        ))
        .line(format!("  ProjectDatabase database = {from_arg}.projectDatabase();"))
        .blank()
        .line(format!("  std::vector<{to}Record> result;"))
        .line(format!("  std::vector<int> {to_arg}Ids;"))
        .blank()
        .line("  QSqlQuery query(*(database.qSqlDatabase()));")
        .line(format!(
            "  query.prepare(toQString(\"SELECT * FROM \" + {class}::databaseTableName() + \" WHERE {from_column}=:{from_column}\"));"
        ))
        .line(format!("  query.bindValue(\":{from_column}\", {from_arg}.id());"))
        .line("  assertExec(query);")
        .line("  while (query.next()) {")
        .line("    QVariant value;")
        .line(format!("    value = query.value(JoinRecordColumns::{to_column});"))
        .line("    OS_ASSERT(value.isValid() && !value.isNull());")
        .line(format!("    {to_arg}Ids.push_back(value.toInt());"))
        .line("  }")
        .blank()
        .line(format!("  for (int id : {to_arg}Ids) {{"))
        .line(format!(
            "    boost::optional<{to}Record> {to_arg} = {to}Record::get{to}Record(id,database);"
        ))
        .line(format!("    OS_ASSERT({to_arg});"))
        .line(format!("    result.push_back(*{to_arg});"))
        .line("  }")
        .blank()
        .line("  return result;")
        .line("}")
        .blank();
    }
    for (record, arg) in [(left, &left_arg), (right, &right_arg)] {
        def.line(format!("{record}Record {class}::{arg}() const {{"))
            .line(format!(
                "  return getImpl<detail::{class}_Impl>()->{arg}();"
            ))
            .line("}")
            .blank();
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
    use modelgen_schema::{field::FieldDescriptor, object::ObjectSchema, types::FieldKind};

    fn assemble(schema: &ObjectSchema) -> GeneratedUnit {
        UnitGenerator::new(schema, &CamelCaseNaming)
            .classify()
            .unwrap()
            .plan()
            .unwrap()
            .assemble()
    }

    fn widget_record() -> ObjectSchema {
        ObjectSchema::new("WidgetRecord").with_fields([
            FieldDescriptor::new("Rate", FieldKind::Real).required(),
            FieldDescriptor::new("Label", FieldKind::String),
            FieldDescriptor::new("Count", FieldKind::Integer).required(),
        ])
    }

    #[test]
    fn column_enum_follows_the_standard_columns() {
        let unit = assemble(&widget_record());
        let preamble = unit.get(Surface::Declaration, Section::Preamble).unwrap();

        assert!(preamble.starts_with("/** \\class WidgetRecordColumns\n"));
        assert!(preamble.contains("  ((id)(INTEGER PRIMARY KEY)(0))\n"));
        assert!(preamble.contains("  ((uuidLast)(TEXT)(7))\n  ((rate)(REAL)(8))\n"));
        assert!(preamble.contains("  ((label)(TEXT)(9))\n  ((count)(INTEGER)(10))\n);"));
    }

    #[test]
    fn class_doc_comes_after_the_column_enum() {
        let unit = assemble(&widget_record());
        let preamble = unit.get(Surface::Declaration, Section::Preamble).unwrap();

        let columns = preamble.find("OPENSTUDIO_ENUM").unwrap();
        let doc = preamble.find("/** WidgetRecord is a ObjectRecord").unwrap();
        assert!(columns < doc);
    }

    #[test]
    fn statics_cover_table_factory_and_lookup() {
        let unit = assemble(&widget_record());
        let decl = unit.get(Surface::Declaration, Section::PublicMethods).unwrap();

        for expected in [
            "static std::string databaseTableName();",
            "static void updatePathData(ProjectDatabase database,",
            "static boost::optional<WidgetRecord> factoryFromQuery(const QSqlQuery& query, ProjectDatabase& database);",
            "static WidgetRecord factoryFromWidget(const Widget& widget, ProjectDatabase& database);",
            "static std::vector<WidgetRecord> getWidgetRecords(ProjectDatabase& database);",
            "static boost::optional<WidgetRecord> getWidgetRecord(int id, ProjectDatabase& database);",
            "  boost::optional<std::string> label() const;",
        ] {
            assert!(decl.contains(expected), "missing `{expected}`");
        }

        let def = unit.get(Surface::Definition, Section::PublicMethods).unwrap();
        assert!(def.contains("  return \"WidgetRecords\";"));
    }

    #[test]
    fn persistence_hooks_handle_optional_members() {
        let unit = assemble(&widget_record());
        let def = unit.get(Surface::ImplDefinition, Section::Protected).unwrap();

        assert!(def.contains("    query.bindValue(WidgetRecord::ColumnsType::rate,m_rate);"));
        assert!(def.contains(
            "      query.bindValue(WidgetRecord::ColumnsType::label,toQString(*m_label));"
        ));
        assert!(def.contains(
            "      query.bindValue(WidgetRecord::ColumnsType::label,QVariant(QVariant::String));"
        ));
        assert!(def.contains("      m_lastLabel.reset();"));
        assert!(def.contains("    m_lastCount = m_count;"));
        assert!(def.contains("    m_count = m_lastCount;"));
        assert!(def.contains("    result = result && (m_rate == value.toDouble());"));
    }

    #[test]
    fn join_record_looks_up_both_sides() {
        let unit = assemble(&ObjectSchema::new("Widget_Gadget_JoinRecord"));
        let def = unit.get(Surface::Definition, Section::PublicMethods).unwrap();

        assert!(def.contains(
            "std::vector<GadgetRecord> Widget_Gadget_JoinRecord::getGadgetRecords(const WidgetRecord& widgetRecord) {"
        ));
        assert!(def.contains(
            "std::vector<WidgetRecord> Widget_Gadget_JoinRecord::getWidgetRecords(const GadgetRecord& gadgetRecord) {"
        ));

        let impl_def = unit.get(Surface::ImplDefinition, Section::PublicMethods).unwrap();
        assert!(impl_def.contains("  ObjectRecord Widget_Gadget_JoinRecord_Impl::leftObject() const {\n    return this->widgetRecord();"));
        assert_eq!(unit.get(Surface::Declaration, Section::Preamble).map(|p| p.contains("OPENSTUDIO_ENUM")), Some(false));
    }
}
