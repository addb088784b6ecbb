use convert_case::{Case, Casing};

///
/// NamingConvention
///
/// Turns schema names into generated identifiers. Injected into the
/// planner and the unit generator so callers can swap the casing rules
/// without touching either.
///

pub trait NamingConvention {
    /// Upper camel identifier for a free-form schema name,
    /// e.g. `"Fan Efficiency"` becomes `FanEfficiency`.
    fn identifier(&self, name: &str) -> String;

    /// Lower the first character of an identifier.
    fn lower_camel(&self, ident: &str) -> String {
        let mut chars = ident.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_lowercase().chain(chars).collect()
        })
    }

    /// Raise the first character of an identifier.
    fn upper_camel(&self, ident: &str) -> String {
        let mut chars = ident.chars();
        chars.next().map_or_else(String::new, |first| {
            first.to_uppercase().chain(chars).collect()
        })
    }

    /// Human-readable form of a class name, e.g. `FanConstantVolume`
    /// becomes `Fan Constant Volume`.
    fn display_name(&self, ident: &str) -> String;

    /// Snake-case key used in serialized maps, e.g. `fanEfficiency`
    /// becomes `fan_efficiency`.
    fn key_name(&self, ident: &str) -> String;
}

///
/// CamelCaseNaming
///

#[derive(Clone, Copy, Debug, Default)]
pub struct CamelCaseNaming;

impl NamingConvention for CamelCaseNaming {
    fn identifier(&self, name: &str) -> String {
        let cleaned: String = name
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() { c } else { ' ' })
            .collect();

        cleaned.to_case(Case::Pascal)
    }

    fn display_name(&self, ident: &str) -> String {
        ident.to_case(Case::Title)
    }

    fn key_name(&self, ident: &str) -> String {
        ident.to_case(Case::Snake)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifier_joins_words() {
        let naming = CamelCaseNaming;

        assert_eq!(naming.identifier("Fan Efficiency"), "FanEfficiency");
        assert_eq!(
            naming.identifier("Availability Schedule Name"),
            "AvailabilityScheduleName"
        );
        assert_eq!(naming.identifier("pressure rise"), "PressureRise");
    }

    #[test]
    fn identifier_drops_punctuation() {
        assert_eq!(
            CamelCaseNaming.identifier("Motor In Airstream Fraction (dimensionless)"),
            "MotorInAirstreamFractionDimensionless"
        );
    }

    #[test]
    fn camel_helpers_only_touch_the_first_character() {
        let naming = CamelCaseNaming;

        assert_eq!(naming.lower_camel("FanEfficiency"), "fanEfficiency");
        assert_eq!(naming.upper_camel("fanEfficiency"), "FanEfficiency");
        assert_eq!(naming.lower_camel(""), "");
    }

    #[test]
    fn display_name_splits_camel_case() {
        assert_eq!(
            CamelCaseNaming.display_name("FanConstantVolume"),
            "Fan Constant Volume"
        );
    }

    #[test]
    fn key_name_is_snake_case() {
        assert_eq!(CamelCaseNaming.key_name("fanEfficiency"), "fan_efficiency");
    }
}
