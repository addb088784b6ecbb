use crate::{MAX_OBJECT_NAME_LEN, error::SchemaError, field::FieldDescriptor};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

///
/// ObjectRole
///
/// What kind of class a schema object becomes. Records carry the names of
/// the classes they persist or join.
///

#[derive(Clone, Debug, Deserialize, Display, Eq, Hash, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
#[remain::sorted]
pub enum ObjectRole {
    #[display("AnalysisObject")]
    AnalysisObject,

    #[display("DataObject")]
    DataObject,

    #[display("JoinRecord({left}, {right})")]
    JoinRecord { left: String, right: String },

    #[display("ObjectRecord({serialized})")]
    ObjectRecord { serialized: String },
}

impl ObjectRole {
    /// Infer the role from a class name.
    ///
    /// `<Left>_<Right>_JoinRecord` joins two record classes, `<X>Record`
    /// persists `X`, and anything else is a plain data object. Analysis
    /// objects are never inferred.
    #[must_use]
    pub fn infer(class_name: &str) -> Self {
        if let Some(stem) = class_name.strip_suffix("_JoinRecord")
            && let Some((left, right)) = stem.split_once('_')
            && !left.is_empty()
            && !right.is_empty()
        {
            return Self::JoinRecord {
                left: left.to_string(),
                right: right.to_string(),
            };
        }

        if let Some(serialized) = class_name.strip_suffix("Record")
            && !serialized.is_empty()
        {
            return Self::ObjectRecord {
                serialized: serialized.to_string(),
            };
        }

        Self::DataObject
    }

    /// Base class used when the schema names none.
    #[must_use]
    pub const fn default_base(&self) -> &'static str {
        match self {
            Self::AnalysisObject => "AnalysisObject",
            Self::DataObject => "ModelObject",
            Self::JoinRecord { .. } => "JoinRecord",
            Self::ObjectRecord { .. } => "ObjectRecord",
        }
    }

    #[must_use]
    pub const fn is_record(&self) -> bool {
        matches!(self, Self::JoinRecord { .. } | Self::ObjectRecord { .. })
    }
}

///
/// ObjectFlags
///

#[derive(Clone, Debug, Default, Deserialize, Eq, PartialEq, Serialize)]
pub struct ObjectFlags {
    #[serde(default)]
    pub unique: bool,

    #[serde(default)]
    pub extensible: bool,

    /// Schema object type wrapped by a data object, e.g. `OS_Fan_ConstantVolume`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub object_type: Option<String>,
}

///
/// ObjectSchema
///

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct ObjectSchema {
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    base: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    role: Option<ObjectRole>,

    #[serde(default)]
    flags: ObjectFlags,

    #[serde(default)]
    fields: Vec<FieldDescriptor>,
}

impl ObjectSchema {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            base: None,
            role: None,
            flags: ObjectFlags::default(),
            fields: Vec::new(),
        }
    }

    #[must_use]
    pub fn with_base(mut self, base: impl Into<String>) -> Self {
        self.base = Some(base.into());
        self
    }

    #[must_use]
    pub fn with_role(mut self, role: ObjectRole) -> Self {
        self.role = Some(role);
        self
    }

    #[must_use]
    pub fn with_flags(mut self, flags: ObjectFlags) -> Self {
        self.flags = flags;
        self
    }

    #[must_use]
    pub fn with_field(mut self, field: FieldDescriptor) -> Self {
        self.fields.push(field);
        self
    }

    #[must_use]
    pub fn with_fields(mut self, fields: impl IntoIterator<Item = FieldDescriptor>) -> Self {
        self.fields.extend(fields);
        self
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Explicit role, or the one inferred from the class name.
    #[must_use]
    pub fn role(&self) -> ObjectRole {
        self.role
            .clone()
            .unwrap_or_else(|| ObjectRole::infer(&self.name))
    }

    #[must_use]
    pub fn base(&self) -> String {
        self.base
            .clone()
            .unwrap_or_else(|| self.role().default_base().to_string())
    }

    #[must_use]
    pub const fn flags(&self) -> &ObjectFlags {
        &self.flags
    }

    #[must_use]
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    #[must_use]
    pub fn object_type(&self) -> String {
        self.flags
            .object_type
            .clone()
            .unwrap_or_else(|| format!("OS_{}", self.name))
    }

    /// Check object-level structure. Field-level checks happen during
    /// classification.
    pub fn validate(&self) -> Result<(), SchemaError> {
        validate_class_name(&self.name)?;

        if let Some(base) = &self.base
            && base.trim().is_empty()
        {
            return Err(SchemaError::MissingBase {
                object: self.name.clone(),
            });
        }

        match self.role() {
            ObjectRole::JoinRecord { left, right } => {
                validate_class_name(&left)?;
                validate_class_name(&right)?;
            }
            ObjectRole::ObjectRecord { serialized } => validate_class_name(&serialized)?,
            ObjectRole::AnalysisObject | ObjectRole::DataObject => {}
        }

        let mut seen = HashSet::new();
        for field in &self.fields {
            if !seen.insert(field.name().to_ascii_lowercase()) {
                return Err(SchemaError::DuplicateField {
                    field: field.name().to_string(),
                });
            }
        }

        Ok(())
    }
}

// validate_class_name
// generated names must be usable as identifiers and file stems
fn validate_class_name(name: &str) -> Result<(), SchemaError> {
    let invalid = |reason: &str| SchemaError::InvalidObjectName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    let Some(first) = name.chars().next() else {
        return Err(invalid("name is empty"));
    };
    if name.len() > MAX_OBJECT_NAME_LEN {
        return Err(invalid(&format!(
            "longer than {MAX_OBJECT_NAME_LEN} characters"
        )));
    }
    if !first.is_ascii_alphabetic() {
        return Err(invalid("must start with an ASCII letter"));
    }
    if !name.chars().all(|c| c.is_ascii_alphanumeric() || c == '_') {
        return Err(invalid("may only contain ASCII letters, digits and '_'"));
    }

    Ok(())
}

///
/// SchemaDocument
///
/// A JSON document holding the objects of one generation run.
///

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct SchemaDocument {
    #[serde(default)]
    pub objects: Vec<ObjectSchema>,
}

impl SchemaDocument {
    pub fn from_json_str(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{DeclaredKind, FieldKind};

    #[test]
    fn join_record_names_infer_both_sides() {
        assert_eq!(
            ObjectRole::infer("Attribute_Variable_JoinRecord"),
            ObjectRole::JoinRecord {
                left: "Attribute".to_string(),
                right: "Variable".to_string(),
            }
        );
    }

    #[test]
    fn record_suffix_infers_object_record() {
        assert_eq!(
            ObjectRole::infer("AttributeRecord"),
            ObjectRole::ObjectRecord {
                serialized: "Attribute".to_string(),
            }
        );
    }

    #[test]
    fn plain_names_infer_data_objects() {
        assert_eq!(ObjectRole::infer("FanConstantVolume"), ObjectRole::DataObject);
        assert_eq!(ObjectRole::infer("Record"), ObjectRole::DataObject);
    }

    #[test]
    fn explicit_role_wins_over_inference() {
        let schema = ObjectSchema::new("OptimizationRecord").with_role(ObjectRole::AnalysisObject);

        assert_eq!(schema.role(), ObjectRole::AnalysisObject);
        assert_eq!(schema.base(), "AnalysisObject");
    }

    #[test]
    fn duplicate_field_names_are_rejected() {
        let schema = ObjectSchema::new("Widget")
            .with_field(FieldDescriptor::new("Rate", FieldKind::Real))
            .with_field(FieldDescriptor::new("rate", FieldKind::Integer));

        assert_eq!(
            schema.validate(),
            Err(SchemaError::DuplicateField {
                field: "rate".to_string()
            })
        );
    }

    #[test]
    fn class_names_must_be_identifiers() {
        for name in ["", "9Lives", "Fan Coil", "Fan-Coil"] {
            assert!(matches!(
                ObjectSchema::new(name).validate(),
                Err(SchemaError::InvalidObjectName { .. })
            ));
        }
        assert!(ObjectSchema::new("x".repeat(MAX_OBJECT_NAME_LEN + 1)).validate().is_err());
    }

    #[test]
    fn blank_base_is_rejected() {
        let schema = ObjectSchema::new("Widget").with_base("  ");

        assert!(matches!(
            schema.validate(),
            Err(SchemaError::MissingBase { .. })
        ));
    }

    #[test]
    fn document_parses_roles_flags_and_fields() {
        let json = r#"{
            "objects": [
                {
                    "name": "FanConstantVolume",
                    "base": "StraightComponent",
                    "flags": { "unique": false, "object_type": "OS_Fan_ConstantVolume" },
                    "fields": [
                        { "name": "Fan Efficiency", "kind": "real", "required": true, "default": 0.7,
                          "min_bound": 0.0, "max_bound": 1.0 },
                        { "name": "Availability Schedule Name", "kind": "object_list",
                          "required": true, "referenced_kinds": ["ScheduleNames"] }
                    ]
                },
                {
                    "name": "Algorithm_Variable_JoinRecord",
                    "role": { "kind": "join_record", "left": "Algorithm", "right": "Variable" }
                }
            ]
        }"#;

        let doc = SchemaDocument::from_json_str(json).unwrap();
        let fan = &doc.objects[0];

        assert_eq!(fan.base(), "StraightComponent");
        assert_eq!(fan.role(), ObjectRole::DataObject);
        assert_eq!(fan.object_type(), "OS_Fan_ConstantVolume");
        assert_eq!(fan.fields()[1].kind(), Ok(FieldKind::ObjectReference));
        assert!(fan.fields()[1].is_schedule());
        assert!(fan.validate().is_ok());

        assert_eq!(doc.objects[1].base(), "JoinRecord");
        assert!(doc.objects[1].role().is_record());
    }

    #[test]
    fn unknown_kind_survives_document_parsing() {
        let json = r#"{ "objects": [
            { "name": "Widget",
              "fields": [ { "name": "Shape", "kind": "polygon" } ] },
            { "name": "Gadget",
              "fields": [ { "name": "Name", "kind": "alpha" } ] } ] }"#;

        let doc = SchemaDocument::from_json_str(json).unwrap();
        let shape = &doc.objects[0].fields()[0];

        assert_eq!(doc.objects.len(), 2);
        assert_eq!(
            shape.declared_kind(),
            &DeclaredKind::Unknown("polygon".to_string())
        );
        assert!(matches!(
            shape.kind(),
            Err(SchemaError::UnknownKind { field, .. }) if field == "Shape"
        ));
        assert_eq!(doc.objects[1].fields()[0].kind(), Ok(FieldKind::String));
    }
}
