//! Persisted value helpers shared by record and analysis objects.
//!
//! Those roles keep fields as data members rather than forwarding to a
//! schema object, so references are stored by name.

use crate::{
    naming::NamingConvention,
    plan::{AccessorPlan, ReturnType, ValueType},
};

/// Member type of a field kept as data.
pub(crate) fn stored_type(plan: &AccessorPlan) -> ReturnType {
    let ty = match plan.value_type() {
        ValueType::Reference(_) => ValueType::String,
        other => other.clone(),
    };

    if plan.is_optional {
        ReturnType::Optional(ty)
    } else {
        ReturnType::Value(ty)
    }
}

/// Data member holding the current value, e.g. `m_fanEfficiency`.
pub(crate) fn member(plan: &AccessorPlan) -> String {
    format!("m_{}", plan.getter_name)
}

/// Data member holding the last saved value, e.g. `m_lastFanEfficiency`.
pub(crate) fn last_member(plan: &AccessorPlan, naming: &dyn NamingConvention) -> String {
    format!("m_last{}", naming.upper_camel(&plan.getter_name))
}

/// Constructor parameter for a stored field.
pub(crate) fn parameter(plan: &AccessorPlan) -> String {
    match stored_type(plan) {
        ReturnType::Value(ty @ (ValueType::Bool | ValueType::Integer | ValueType::Real)) => {
            format!("{ty} {}", plan.getter_name)
        }
        other => format!("const {other}& {}", plan.getter_name),
    }
}

/// SQL column type.
pub(crate) const fn sql_type(ty: &ValueType) -> &'static str {
    match ty {
        ValueType::Bool | ValueType::Integer => "INTEGER",
        ValueType::Real => "REAL",
        ValueType::Reference(_) | ValueType::String => "TEXT",
    }
}

/// `QVariant::Type` used for a null value of this type.
pub(crate) const fn variant_type(ty: &ValueType) -> &'static str {
    match ty {
        ValueType::Bool => "QVariant::Bool",
        ValueType::Integer => "QVariant::Int",
        ValueType::Real => "QVariant::Double",
        ValueType::Reference(_) | ValueType::String => "QVariant::String",
    }
}

/// Expression converting a `QVariant` named `value` to the member type.
pub(crate) fn from_variant(ty: &ValueType, value: &str) -> String {
    match ty {
        ValueType::Bool => format!("{value}.toBool()"),
        ValueType::Integer => format!("{value}.toInt()"),
        ValueType::Real => format!("{value}.toDouble()"),
        ValueType::Reference(_) | ValueType::String => {
            format!("{value}.toString().toStdString()")
        }
    }
}

/// Expression wrapping a member value for a `QVariant`.
pub(crate) fn to_variant(ty: &ValueType, value: &str) -> String {
    match ty {
        ValueType::Reference(_) | ValueType::String => format!("toQString({value})"),
        ValueType::Bool | ValueType::Integer | ValueType::Real => value.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn conversions_cover_strings_and_numbers() {
        assert_eq!(from_variant(&ValueType::Real, "value"), "value.toDouble()");
        assert_eq!(
            from_variant(&ValueType::String, "value"),
            "value.toString().toStdString()"
        );
        assert_eq!(to_variant(&ValueType::String, "m_label"), "toQString(m_label)");
        assert_eq!(to_variant(&ValueType::Integer, "m_count"), "m_count");
        assert_eq!(sql_type(&ValueType::Bool), "INTEGER");
        assert_eq!(variant_type(&ValueType::Real), "QVariant::Double");
    }
}
