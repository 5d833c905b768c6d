//! Code casing and length checks on a parsed document.
//!
//! All findings are advisory. Unquoted codes that a YAML parser reads as
//! something other than the intended upper-case string show up here as
//! mixed-case warnings, which is mostly what this pass is for.

use crate::models::document::child_mapping;
use crate::models::{key_text, Warning, Yaml, CITY_KEY, COUNTRY_KEY, REGION_KEY};

/// True when every alphabetic character of `s` is upper or title case.
/// Lower-case and caseless letters fail; non-alphabetic characters never
/// falsify the check.
pub fn is_upper_str(s: &str) -> bool {
    s.chars()
        .all(|c| !c.is_alphabetic() || c.is_uppercase() || is_titlecase(c))
}

/// Unicode general category Lt (digraphs such as `ǅ` and Greek letters with
/// prosgegrammeni).
fn is_titlecase(c: char) -> bool {
    matches!(
        c,
        '\u{01C5}'
            | '\u{01C8}'
            | '\u{01CB}'
            | '\u{01F2}'
            | '\u{1F88}'..='\u{1F8F}'
            | '\u{1F98}'..='\u{1F9F}'
            | '\u{1FA8}'..='\u{1FAF}'
            | '\u{1FBC}'
            | '\u{1FCC}'
            | '\u{1FFC}'
    )
}

/// Scan `doc` and return one warning per anomaly, in document order.
///
/// A country entry whose code is not exactly two characters long yields a
/// single `InvalidCountryCode` and its regions and cities are not inspected.
pub fn validate(doc: &Yaml) -> Vec<Warning> {
    let mut warnings = Vec::new();
    let Some(countries) = child_mapping(doc, COUNTRY_KEY) else {
        return warnings;
    };
    for (code, country) in countries {
        let code = key_text(code);
        if code.chars().count() != 2 {
            warnings.push(Warning::InvalidCountryCode(code.into_owned()));
            continue;
        }
        if !is_upper_str(&code) {
            warnings.push(Warning::MixedCaseCountryCode(code.into_owned()));
        }
        let Some(regions) = child_mapping(country, REGION_KEY) else {
            continue;
        };
        for (region_code, region) in regions {
            let region_code = key_text(region_code);
            if !is_upper_str(&region_code) {
                warnings.push(Warning::MixedCaseRegionCode(region_code.into_owned()));
            }
            if let Some(cities) = child_mapping(region, CITY_KEY) {
                for city_code in cities.keys() {
                    let city_code = key_text(city_code);
                    if !is_upper_str(&city_code) {
                        warnings.push(Warning::MixedCaseCityCode(city_code.into_owned()));
                    }
                }
            }
        }
    }
    warnings
}
