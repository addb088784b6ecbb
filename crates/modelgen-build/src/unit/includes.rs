use crate::{
    emit::{Section, Surface},
    unit::{GeneratedUnit, Lines, UnitContext, schedules},
};
use modelgen_schema::{object::ObjectRole, types::Category};

// generate
// includes and forward declarations for every role
pub(super) fn generate(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    match ctx.role {
        ObjectRole::DataObject => data_object(ctx, unit),
        ObjectRole::JoinRecord { left, right } => join_record(left, right, unit),
        ObjectRole::ObjectRecord { .. } => object_record(unit),
        ObjectRole::AnalysisObject => analysis_object(unit),
    }
}

// document
// class doc comments, last in the preamble so they sit directly on the class
pub(super) fn document(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    let class = ctx.class();
    let base = ctx.base();

    let summary = match ctx.role {
        ObjectRole::DataObject => format!(
            "/** {class} is a {base} that wraps the OpenStudio IDD object '{}'. */\n",
            ctx.schema.object_type()
        ),
        ObjectRole::ObjectRecord { serialized } => format!(
            "/** {class} is a {base} that persists {serialized} objects in a ProjectDatabase. */\n"
        ),
        ObjectRole::JoinRecord { left, right } => format!(
            "/** {class} is a {base} that relates {left}Record to {right}Record. */\n"
        ),
        ObjectRole::AnalysisObject => format!(
            "/** {class} is a {base} named '{}'. */\n",
            ctx.display_name()
        ),
    };

    unit.push(Surface::Declaration, Section::Preamble, &summary);
    unit.push(
        Surface::ImplDeclaration,
        Section::Preamble,
        &format!(
            "  /** {class}_Impl is a {base}_Impl that is the implementation class for {class}.*/\n"
        ),
    );
}

fn data_object(ctx: &UnitContext, unit: &mut GeneratedUnit) {
    let referenced = ctx.referenced_classes();

    let mut forward = Lines::default();
    for class in &referenced {
        forward.line(format!("class {class};"));
    }
    if !forward.is_empty() {
        forward.blank();
    }
    unit.push(Surface::Declaration, Section::ForwardDeclarations, forward.as_str());
    unit.push(Surface::ImplDeclaration, Section::ForwardDeclarations, forward.as_str());

    let mut lines = Lines::default();
    for class in &referenced {
        lines.line(format!("#include \"{class}.hpp\""));
        lines.line(format!("#include \"{class}_Impl.hpp\""));
    }
    if ctx.schedule_plans().next().is_some() {
        schedules::includes(&mut lines);
    }
    if !lines.is_empty() {
        lines.blank();
    }

    let non_boolean_choice = ctx.plans.iter().any(|p| p.category == Category::Choice);
    if non_boolean_choice {
        lines.line("#include <utilities/idd/IddFactory.hxx>");
    }
    lines.line("#include <utilities/idd/IddEnums.hxx>");
    lines.line(format!(
        "#include <utilities/idd/{}_FieldEnums.hxx>",
        ctx.schema.object_type()
    ));
    lines.blank();

    if ctx.has_real_fields() {
        lines.line("#include \"../utilities/units/Unit.hpp\"").blank();
    }
    lines.line("#include \"../utilities/core/Assert.hpp\"").blank();

    unit.push(Surface::ImplDefinition, Section::Includes, lines.as_str());
}

fn join_record(left: &str, right: &str, unit: &mut GeneratedUnit) {
    let forward = format!("class {left}Record;\nclass {right}Record;\n\n");
    unit.push(Surface::Declaration, Section::ForwardDeclarations, &forward);
    unit.push(Surface::ImplDeclaration, Section::ForwardDeclarations, &forward);

    let mut lines = Lines::default();
    lines
        .line(format!("#include \"{left}Record.hpp\""))
        .line(format!("#include \"{right}Record.hpp\""))
        .line("#include \"ProjectDatabase.hpp\"")
        .blank()
        .line("#include \"../utilities/core/Assert.hpp\"")
        .blank();
    unit.push(Surface::ImplDefinition, Section::Includes, lines.as_str());
}

fn object_record(unit: &mut GeneratedUnit) {
    let mut lines = Lines::default();
    lines
        .line("#include \"JoinRecord.hpp\"")
        .line("#include \"ProjectDatabase.hpp\"")
        .blank()
        .line("#include \"../utilities/core/Assert.hpp\"")
        .blank();
    unit.push(Surface::ImplDefinition, Section::Includes, lines.as_str());
}

fn analysis_object(unit: &mut GeneratedUnit) {
    unit.push(
        Surface::Declaration,
        Section::Includes,
        "\n#include \"../utilities/core/UUID.hpp\"\n",
    );

    let mut lines = Lines::default();
    lines
        .line("#include \"../utilities/core/Assert.hpp\"")
        .line("#include \"../utilities/core/Json.hpp\"")
        .blank();
    unit.push(Surface::ImplDefinition, Section::Includes, lines.as_str());
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

    #[test]
    fn data_objects_include_their_field_enums() {
        let schema = ObjectSchema::new("Pump").with_fields([
            FieldDescriptor::new("Rated Flow Rate", FieldKind::Real),
            FieldDescriptor::new("Pump Curve Name", FieldKind::ObjectReference)
                .with_references(["CurveNames"]),
        ]);
        let unit = assemble(&schema);

        let includes = unit.get(Surface::ImplDefinition, Section::Includes).unwrap();
        assert!(includes.contains("#include \"Curve.hpp\"\n#include \"Curve_Impl.hpp\"\n"));
        assert!(includes.contains("#include <utilities/idd/OS_Pump_FieldEnums.hxx>"));
        assert!(includes.contains("#include \"../utilities/units/Unit.hpp\""));
        assert!(!includes.contains("IddFactory"));

        let forward = unit.get(Surface::Declaration, Section::ForwardDeclarations).unwrap();
        assert_eq!(forward, "class Curve;\n\n");
    }

    #[test]
    fn join_records_forward_declare_both_sides() {
        let unit = assemble(&ObjectSchema::new("Attribute_Variable_JoinRecord"));

        let forward = unit
            .get(Surface::ImplDeclaration, Section::ForwardDeclarations)
            .unwrap();
        assert_eq!(forward, "class AttributeRecord;\nclass VariableRecord;\n\n");
    }
}
