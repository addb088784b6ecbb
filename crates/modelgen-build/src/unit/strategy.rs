use derive_more::Display;
use modelgen_schema::object::ObjectRole;
use serde::Serialize;

///
/// ConstructorStyle
///

#[derive(Clone, Copy, Debug, Display, Eq, Hash, PartialEq, Serialize)]
#[remain::sorted]
pub enum ConstructorStyle {
    /// Minimal named construction plus full deserialization.
    Named,

    /// From the two joined records, and from a persisted query.
    ReferencedPair,

    /// From the owning model with required fields set, and from a
    /// persisted identity.
    RequiredFields,

    /// From the serialized object, and from a persisted query.
    SerializedObject,
}

///
/// RoleStrategy
///
/// Everything that varies between roles, as data. The unit pipeline is
/// shared and consults these switches instead of branching on the role.
///

#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
pub struct RoleStrategy {
    pub constructors: ConstructorStyle,
    pub per_field_accessors: bool,
    pub left_right_accessors: bool,
    pub column_enum: bool,
    pub record_statics: bool,
    pub serialization: bool,
    pub schedule_registry: bool,
    pub test_scaffold: bool,
    pub namespace: &'static str,
    pub api_macro: &'static str,
}

const DATA_OBJECT: RoleStrategy = RoleStrategy {
    constructors: ConstructorStyle::RequiredFields,
    per_field_accessors: true,
    left_right_accessors: false,
    column_enum: false,
    record_statics: false,
    serialization: false,
    schedule_registry: true,
    test_scaffold: true,
    namespace: "model",
    api_macro: "MODEL_API",
};

const OBJECT_RECORD: RoleStrategy = RoleStrategy {
    constructors: ConstructorStyle::SerializedObject,
    per_field_accessors: false,
    left_right_accessors: false,
    column_enum: true,
    record_statics: true,
    serialization: false,
    schedule_registry: false,
    test_scaffold: false,
    namespace: "project",
    api_macro: "PROJECT_API",
};

const JOIN_RECORD: RoleStrategy = RoleStrategy {
    constructors: ConstructorStyle::ReferencedPair,
    left_right_accessors: true,
    column_enum: false,
    ..OBJECT_RECORD
};

const ANALYSIS_OBJECT: RoleStrategy = RoleStrategy {
    constructors: ConstructorStyle::Named,
    per_field_accessors: false,
    left_right_accessors: false,
    column_enum: false,
    record_statics: false,
    serialization: true,
    schedule_registry: false,
    test_scaffold: false,
    namespace: "analysis",
    api_macro: "ANALYSIS_API",
};

///
/// RoleStrategyExt
///

pub trait RoleStrategyExt {
    fn strategy(&self) -> RoleStrategy;
}

impl RoleStrategyExt for ObjectRole {
    fn strategy(&self) -> RoleStrategy {
        match self {
            Self::AnalysisObject => ANALYSIS_OBJECT,
            Self::DataObject => DATA_OBJECT,
            Self::JoinRecord { .. } => JOIN_RECORD,
            Self::ObjectRecord { .. } => OBJECT_RECORD,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_data_objects_get_field_accessors_and_tests() {
        let roles = [
            ObjectRole::AnalysisObject,
            ObjectRole::DataObject,
            ObjectRole::JoinRecord {
                left: "A".to_string(),
                right: "B".to_string(),
            },
            ObjectRole::ObjectRecord {
                serialized: "A".to_string(),
            },
        ];

        for role in roles {
            let strategy = role.strategy();
            let data = role == ObjectRole::DataObject;

            assert_eq!(strategy.per_field_accessors, data, "{role}");
            assert_eq!(strategy.test_scaffold, data, "{role}");
            assert_eq!(strategy.schedule_registry, data, "{role}");
        }
    }

    #[test]
    fn join_records_share_record_statics_but_not_columns() {
        let join = ObjectRole::JoinRecord {
            left: "A".to_string(),
            right: "B".to_string(),
        }
        .strategy();

        assert!(join.record_statics);
        assert!(join.left_right_accessors);
        assert!(!join.column_enum);
        assert_eq!(join.namespace, "project");
    }
}
