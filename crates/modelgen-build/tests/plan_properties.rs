use modelgen_build::prelude::*;
use modelgen_schema::prelude::*;
use proptest::prelude::*;

fn arb_kind() -> impl Strategy<Value = FieldKind> {
    prop::sample::select(FieldKind::ALL.to_vec())
}

fn arb_role() -> impl Strategy<Value = ObjectRole> {
    prop_oneof![
        Just(ObjectRole::DataObject),
        Just(ObjectRole::AnalysisObject),
        Just(ObjectRole::ObjectRecord {
            serialized: "Attribute".to_string(),
        }),
        Just(ObjectRole::JoinRecord {
            left: "Attribute".to_string(),
            right: "Variable".to_string(),
        }),
    ]
}

// arb_descriptor
// well-formed descriptors only; malformed input is covered by the schema crate
fn arb_descriptor() -> impl Strategy<Value = FieldDescriptor> {
    (
        "[A-Z][a-z]{1,6}( [A-Z][a-z]{1,6}){0,3}",
        arb_kind(),
        any::<bool>(),
        any::<bool>(),
        prop::option::of((-100.0f64..0.0, 0.0f64..100.0)),
        prop_oneof![
            Just(vec!["Yes", "No"]),
            Just(vec!["On", "Off"]),
            Just(vec!["Red", "Green", "Blue"]),
        ],
    )
        .prop_map(|(name, kind, required, auto, bounds, choices)| {
            let mut field = FieldDescriptor::new(name, kind);
            if required {
                field = field.required();
            }
            match kind {
                FieldKind::Integer | FieldKind::Real => {
                    if let Some((min, max)) = bounds {
                        field = field.with_bounds(min, max);
                    }
                    if auto {
                        field = field.autosizable();
                    }
                }
                FieldKind::Choice => field = field.with_choices(choices),
                FieldKind::ObjectReference => {
                    field = field.with_references(["ScheduleNames", "CurveNames"]);
                }
                FieldKind::Handle | FieldKind::NodeReference | FieldKind::String => {}
            }
            field
        })
}

proptest! {
    #[test]
    fn planning_is_referentially_transparent(field in arb_descriptor(), role in arb_role()) {
        let classified = classify(&field).unwrap();
        let planner = AccessorPlanner::new(&CamelCaseNaming);

        let first = planner.plan(&classified, &role);
        let second = planner.plan(&classify(&field).unwrap(), &role);

        prop_assert_eq!(first, second);
    }

    #[test]
    fn generated_units_are_deterministic(fields in prop::collection::vec(arb_descriptor(), 0..6)) {
        let mut seen = std::collections::HashSet::new();
        let fields: Vec<FieldDescriptor> = fields
            .into_iter()
            .filter(|f| seen.insert(f.name().to_ascii_lowercase()))
            .collect();
        let schema = ObjectSchema::new("Widget").with_fields(fields);
        let generator = Generator::new(EmitOptions::default());

        let first = generator.emit_unit(&schema).map(|u| u.artifacts);
        let second = generator.emit_unit(&schema).map(|u| u.artifacts);

        match (first, second) {
            (Ok(a), Ok(b)) => prop_assert_eq!(a, b),
            (Err(a), Err(b)) => prop_assert_eq!(a.to_string(), b.to_string()),
            _ => prop_assert!(false, "outcome changed between runs"),
        }
    }
}
