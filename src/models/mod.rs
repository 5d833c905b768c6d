//! Shared data models: the document value type, reserved codes and keys,
//! and validation warnings.

pub mod document;

use serde::Serialize;
use std::fmt;

pub use document::{key_text, Mapping, Yaml};

/// Placeholder region code used when a location has no region specified.
/// Must not match any ISO 3166-2 subdivision code.
pub const UNKNOWN_REGION_CODE: &str = ".NONE";
pub const DEFAULT_OUTPUT_BASENAME: &str = "country";
/// Attribute carrying hints for the generation tooling.
pub const PARSER_HINT_TAG: &str = "flags";
pub const TODO_MARKER: &str = "(TODO)";
pub const PROJECT_HOMEPAGE: &str = "https://github.com/sergeuz/locode";
pub const VERSION_STRING: &str = env!("CARGO_PKG_VERSION");

pub const PARSER_HINT_PRESERVE: &str = "preserve";
/// Reserved; not recognized by any logic yet.
pub const PARSER_HINT_ODD: &str = "odd";

pub const COUNTRY_KEY: &str = "country";
pub const REGION_KEY: &str = "region";
pub const CITY_KEY: &str = "city";

/// Keys emitted first, in this order, when present.
pub const HEAD_KEYS: [&str; 3] = ["name", "default", PARSER_HINT_TAG];
/// Keys emitted last, in this order, when present.
pub const TAIL_KEYS: [&str; 3] = [REGION_KEY, CITY_KEY, UNKNOWN_REGION_CODE];

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "code", rename_all = "kebab-case")]
/// Advisory finding. Never stops processing.
pub enum Warning {
    NoCountryData,
    InvalidCountryCode(String),
    MixedCaseCountryCode(String),
    MixedCaseRegionCode(String),
    MixedCaseCityCode(String),
}

impl fmt::Display for Warning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Warning::NoCountryData => write!(f, "No country data found, skipping file"),
            Warning::InvalidCountryCode(c) => write!(f, "Invalid country code: {}", c),
            Warning::MixedCaseCountryCode(c) => {
                write!(f, "Country code contains mixed case letters: {}", c)
            }
            Warning::MixedCaseRegionCode(c) => {
                write!(f, "Region code contains mixed case letters: {}", c)
            }
            Warning::MixedCaseCityCode(c) => {
                write!(f, "City code contains mixed case letters: {}", c)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_warning_messages() {
        assert_eq!(
            Warning::InvalidCountryCode("USA".into()).to_string(),
            "Invalid country code: USA"
        );
        assert_eq!(
            Warning::MixedCaseCityCode("Abc".into()).to_string(),
            "City code contains mixed case letters: Abc"
        );
    }

    #[test]
    fn test_warning_json_shape() {
        let v = serde_json::to_value(Warning::MixedCaseRegionCode("by".into())).unwrap();
        assert_eq!(v["kind"], "mixed-case-region-code");
        assert_eq!(v["code"], "by");
        let v = serde_json::to_value(Warning::NoCountryData).unwrap();
        assert_eq!(v["kind"], "no-country-data");
    }
}
