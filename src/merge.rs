//! Loading source documents and merging them into one accumulator.
//!
//! Merge depth is exactly one level: attributes of a country entry are
//! updated key by key, while a colliding `region` (or any other nested)
//! attribute is replaced as a whole by the later source.

use crate::error::{LocodeError, Result};
use crate::models::document::{child_mapping, child_mapping_mut, ensure_mapping};
use crate::models::{key_text, Mapping, Warning, Yaml, COUNTRY_KEY};
use crate::utils::Console;
use crate::validate::validate;
use std::collections::BTreeSet;
use std::fs;
use std::io::{BufReader, Read};
use std::path::Path;

/// Allow-list of country codes. Empty means "merge everything".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CountryFilter {
    codes: BTreeSet<String>,
}

impl CountryFilter {
    pub fn new<I, S>(codes: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CountryFilter {
            codes: codes.into_iter().map(Into::into).collect(),
        }
    }

    /// Parse a comma or whitespace separated list such as `"DE, FR"`.
    /// Codes are matched exactly, upper case expected.
    pub fn parse(list: &str) -> Self {
        Self::new(
            list.split(|c: char| c == ',' || c.is_whitespace())
                .map(str::trim)
                .filter(|s| !s.is_empty()),
        )
    }

    pub fn is_empty(&self) -> bool {
        self.codes.is_empty()
    }

    pub fn contains(&self, code: &str) -> bool {
        self.codes.contains(code)
    }

    pub fn codes(&self) -> impl Iterator<Item = &str> {
        self.codes.iter().map(String::as_str)
    }
}

/// Parse one document from an already opened stream.
pub fn load_document<R: Read>(reader: R) -> Result<Yaml> {
    Ok(serde_yaml::from_reader(reader)?)
}

/// Merge `src` into `dest`, validating `src` along the way.
///
/// Every warning is written to stderr through `console` and also returned.
/// A source without a `country` mapping is a no-op. Country codes that are
/// not exactly two characters long are skipped; codes outside a non-empty
/// `filter` are dropped silently.
pub fn merge(
    dest: &mut Yaml,
    src: &Yaml,
    filter: &CountryFilter,
    console: &Console,
) -> Vec<Warning> {
    let Some(src_countries) = child_mapping(src, COUNTRY_KEY) else {
        return Vec::new();
    };
    let warnings = validate(src);
    for w in &warnings {
        console.warn(w.to_string());
    }

    let dest_root = ensure_mapping(dest);
    if filter.is_empty() {
        // Other top-level keys travel along with the country data.
        if let Some(src_root) = src.as_mapping() {
            for (k, v) in src_root {
                if key_text(k) != COUNTRY_KEY {
                    dest_root.insert(k.clone(), v.clone());
                }
            }
        }
    }
    let dest_countries = child_mapping_mut(dest_root, COUNTRY_KEY);
    for (code, entry) in src_countries {
        let text = key_text(code);
        if text.chars().count() != 2 {
            continue;
        }
        if !filter.is_empty() && !filter.contains(&text) {
            continue;
        }
        let slot = dest_countries
            .entry(code.clone())
            .or_insert_with(|| Yaml::Mapping(Mapping::new()));
        update_entry(ensure_mapping(slot), entry);
    }
    warnings
}

/// Shallow update: keys of `incoming` overwrite those of `target`, others are kept.
fn update_entry(target: &mut Mapping, incoming: &Yaml) {
    if let Some(attrs) = incoming.as_mapping() {
        for (k, v) in attrs {
            target.insert(k.clone(), v.clone());
        }
    }
}

/// Load `path` and merge it into `dest`.
///
/// A file without top-level country data is reported and skipped.
pub fn load_file(
    path: &Path,
    dest: &mut Yaml,
    filter: &CountryFilter,
    console: &Console,
) -> Result<Vec<Warning>> {
    console.info(format!("Loading file: {}", path.display()));
    let file = fs::File::open(path).map_err(|e| LocodeError::io(path, e))?;
    let src = load_document(BufReader::new(file)).map_err(|e| match e {
        LocodeError::Yaml(source) => LocodeError::Parse {
            path: path.to_path_buf(),
            source,
        },
        other => other,
    })?;
    if child_mapping(&src, COUNTRY_KEY).is_none() {
        let w = Warning::NoCountryData;
        console.warn(w.to_string());
        return Ok(vec![w]);
    }
    let warnings = merge(dest, &src, filter, console);
    console.detail(format!(
        "Merged {} ({} warning(s))",
        path.display(),
        warnings.len()
    ));
    Ok(warnings)
}
