//! Document value type.
//!
//! A parsed document is a plain `serde_yaml::Value`. Its `Mapping` keeps
//! insertion order, which is what the serializer emits, so ordering is done
//! by rebuilding mappings rather than by hooking into the emitter.

use std::borrow::Cow;

pub use serde_yaml::{Mapping, Value as Yaml};

/// Text of a mapping key, used for code checks and lexicographic ordering.
///
/// Non-string scalars render the way they would be written (`12`, `true`,
/// `~`); sequences, mappings and tagged values render as an empty string.
pub fn key_text(key: &Yaml) -> Cow<'_, str> {
    match key {
        Yaml::String(s) => Cow::Borrowed(s.as_str()),
        Yaml::Number(n) => Cow::Owned(n.to_string()),
        Yaml::Bool(b) => Cow::Owned(b.to_string()),
        Yaml::Null => Cow::Borrowed("~"),
        Yaml::Sequence(_) | Yaml::Mapping(_) | Yaml::Tagged(_) => Cow::Borrowed(""),
    }
}

/// Borrow `node[key]` as a mapping, if it is one.
pub fn child_mapping<'a>(node: &'a Yaml, key: &str) -> Option<&'a Mapping> {
    node.as_mapping()?.get(key)?.as_mapping()
}

/// Coerce `node` into a mapping in place, discarding any other content.
pub fn ensure_mapping(node: &mut Yaml) -> &mut Mapping {
    if !node.is_mapping() {
        *node = Yaml::Mapping(Mapping::new());
    }
    match node {
        Yaml::Mapping(m) => m,
        _ => unreachable!("node was just replaced by a mapping"),
    }
}

/// Borrow `map[key]` as a mapping, inserting an empty one when absent or not a mapping.
pub fn child_mapping_mut<'a>(map: &'a mut Mapping, key: &str) -> &'a mut Mapping {
    let slot = map
        .entry(Yaml::String(key.to_string()))
        .or_insert_with(|| Yaml::Mapping(Mapping::new()));
    ensure_mapping(slot)
}
