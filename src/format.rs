//! Deterministic YAML output.
//!
//! Two pieces:
//! - `arrange` rebuilds every mapping with a fixed key order: `name`,
//!   `default` and the parser hint tag first, the remaining keys in
//!   lexicographic order, then `region`, `city` and the unknown-region code.
//! - `to_yaml_string`/`write_document` emit the result in block style, in
//!   mapping insertion order, with non-ASCII text left unescaped.
//!
//! The emitter walks the tree itself and only asks `serde_yaml` how to
//! render individual string scalars. Words that YAML 1.1 loaders read as
//! booleans or null (`NO`, `yes`, `off`, `~`...) are always single-quoted,
//! so a country code such as `NO` survives a round trip through those
//! loaders as a string.
//!
//! Sequences and tagged values are passed through untouched by `arrange`,
//! including any mappings nested inside them.

use crate::error::{LocodeError, Result};
use crate::models::{key_text, Mapping, Yaml, HEAD_KEYS, TAIL_KEYS};
use std::cmp::Ordering;
use std::io::Write;

const INDENT: usize = 2;

/// Plain scalars that YAML 1.1 resolves to a boolean or null.
const YAML11_RESERVED: [&str; 10] = [
    "y", "n", "yes", "no", "on", "off", "true", "false", "null", "~",
];

/// Reorder the keys of every mapping reachable through mappings.
pub fn arrange(node: Yaml) -> Yaml {
    match node {
        Yaml::Mapping(map) => Yaml::Mapping(arrange_mapping(map)),
        other => other,
    }
}

fn arrange_mapping(mut map: Mapping) -> Mapping {
    let mut out = Mapping::with_capacity(map.len());
    for key in HEAD_KEYS {
        if let Some(v) = map.shift_remove(key) {
            out.insert(Yaml::from(key), arrange(v));
        }
    }
    let mut tail = Vec::new();
    for key in TAIL_KEYS {
        if let Some(v) = map.shift_remove(key) {
            tail.push((Yaml::from(key), v));
        }
    }
    let mut rest: Vec<(Yaml, Yaml)> = map.into_iter().collect();
    rest.sort_by(|(a, _), (b, _)| compare_keys(a, b));
    for (k, v) in rest.into_iter().chain(tail) {
        out.insert(k, arrange(v));
    }
    out
}

/// Lexicographic by key text. Keys with the same text are ranked by kind,
/// then by their rendered YAML, which gives collection keys a total order.
fn compare_keys(a: &Yaml, b: &Yaml) -> Ordering {
    key_text(a)
        .cmp(&key_text(b))
        .then_with(|| kind_rank(a).cmp(&kind_rank(b)))
        .then_with(|| {
            let ra = to_yaml_string(a).unwrap_or_default();
            let rb = to_yaml_string(b).unwrap_or_default();
            ra.cmp(&rb)
        })
}

fn kind_rank(v: &Yaml) -> u8 {
    match v {
        Yaml::Null => 0,
        Yaml::Bool(_) => 1,
        Yaml::Number(_) => 2,
        Yaml::String(_) => 3,
        Yaml::Sequence(_) | Yaml::Mapping(_) | Yaml::Tagged(_) => 4,
    }
}

/// Render `node` as-is, in its current key order.
pub fn to_yaml_string(node: &Yaml) -> Result<String> {
    let mut out = String::new();
    match node {
        Yaml::Mapping(m) if !m.is_empty() => emit_mapping(&mut out, m, 0)?,
        Yaml::Sequence(s) if !s.is_empty() => emit_sequence(&mut out, s, 0)?,
        Yaml::Tagged(t) => {
            out.push_str(&t.tag.to_string());
            emit_value(&mut out, &t.value, 0)?;
        }
        scalar => {
            out.push_str(&render_scalar(scalar)?);
            out.push('\n');
        }
    }
    Ok(out)
}

/// Arrange `root` and write it to `out`.
pub fn write_document<W: Write>(root: &Yaml, mut out: W) -> Result<()> {
    let text = to_yaml_string(&arrange(root.clone()))?;
    out.write_all(text.as_bytes())
        .map_err(|e| LocodeError::io("<output>", e))
}

fn pad(out: &mut String, indent: usize) {
    out.extend(std::iter::repeat(' ').take(indent));
}

fn emit_mapping(out: &mut String, map: &Mapping, indent: usize) -> Result<()> {
    for (k, v) in map {
        pad(out, indent);
        match k {
            Yaml::Mapping(m) if !m.is_empty() => {
                out.push('?');
                emit_compact(out, k, indent)?;
                pad(out, indent);
            }
            Yaml::Sequence(s) if !s.is_empty() => {
                out.push('?');
                emit_compact(out, k, indent)?;
                pad(out, indent);
            }
            _ => out.push_str(&render_scalar(k)?),
        }
        out.push(':');
        emit_value(out, v, indent)?;
    }
    Ok(())
}

/// Sequences under a mapping key sit at the key's indentation.
fn emit_sequence(out: &mut String, seq: &[Yaml], indent: usize) -> Result<()> {
    for item in seq {
        pad(out, indent);
        out.push('-');
        emit_compact(out, item, indent)?;
    }
    Ok(())
}

/// Value following `key:`, starting right after the colon.
fn emit_value(out: &mut String, v: &Yaml, indent: usize) -> Result<()> {
    match v {
        Yaml::Mapping(m) if !m.is_empty() => {
            out.push('\n');
            emit_mapping(out, m, indent + INDENT)
        }
        Yaml::Sequence(s) if !s.is_empty() => {
            out.push('\n');
            emit_sequence(out, s, indent)
        }
        Yaml::Tagged(t) => {
            out.push(' ');
            out.push_str(&t.tag.to_string());
            match &t.value {
                Yaml::Sequence(s) if !s.is_empty() => {
                    out.push('\n');
                    emit_sequence(out, s, indent + INDENT)
                }
                inner => emit_value(out, inner, indent),
            }
        }
        scalar => {
            out.push(' ');
            out.push_str(&render_scalar(scalar)?);
            out.push('\n');
            Ok(())
        }
    }
}

/// Node following `-` or `?`, with a nested collection starting on the same line.
fn emit_compact(out: &mut String, v: &Yaml, indent: usize) -> Result<()> {
    let inner = indent + INDENT;
    let mut buf = String::new();
    match v {
        Yaml::Mapping(m) if !m.is_empty() => emit_mapping(&mut buf, m, inner)?,
        Yaml::Sequence(s) if !s.is_empty() => emit_sequence(&mut buf, s, inner)?,
        _ => return emit_value(out, v, indent),
    }
    out.push(' ');
    out.push_str(&buf[inner..]);
    Ok(())
}

fn render_scalar(v: &Yaml) -> Result<String> {
    Ok(match v {
        Yaml::Null => "null".to_string(),
        Yaml::Bool(b) => b.to_string(),
        Yaml::Number(n) => n.to_string(),
        Yaml::String(s) => render_str(s)?,
        Yaml::Sequence(_) => "[]".to_string(),
        Yaml::Mapping(_) => "{}".to_string(),
        Yaml::Tagged(t) => format!("{} {}", t.tag, render_scalar(&t.value)?),
    })
}

fn render_str(s: &str) -> Result<String> {
    if YAML11_RESERVED.iter().any(|w| w.eq_ignore_ascii_case(s)) {
        return Ok(format!("'{}'", s.replace('\'', "''")));
    }
    let rendered = serde_yaml::to_string(s)?;
    let rendered = rendered.strip_suffix('\n').unwrap_or(&rendered);
    if rendered.contains('\n') {
        // multi-line text would come back as a block scalar
        Ok(double_quoted(s))
    } else {
        Ok(rendered.to_string())
    }
}

fn double_quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04X}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn doc(s: &str) -> Yaml {
        serde_yaml::from_str(s).unwrap()
    }

    fn keys(node: &Yaml) -> Vec<String> {
        node.as_mapping()
            .unwrap()
            .keys()
            .map(|k| key_text(k).into_owned())
            .collect()
    }

    fn raw_keys(node: &Yaml) -> Vec<Yaml> {
        node.as_mapping().unwrap().keys().cloned().collect()
    }

    #[test]
    fn test_arrange_head_then_sorted_then_tail() {
        let out = arrange(doc("{city: {}, b: 1, a: 2, name: X}"));
        assert_eq!(keys(&out), vec!["name", "a", "b", "city"]);
    }

    #[test]
    fn test_arrange_full_head_and_tail_order() {
        let out = arrange(doc(
            "{.NONE: {}, z: 1, city: {}, flags: preserve, region: {}, default: D, name: N, m: 2}",
        ));
        assert_eq!(
            keys(&out),
            vec!["name", "default", "flags", "m", "z", "region", "city", ".NONE"]
        );
    }

    #[test]
    fn test_arrange_recurses_into_mappings_only() {
        let out = arrange(doc(
            r#"
region:
  IDF:
    zone: 1
    name: Paris
list:
  - {b: 1, a: 2}
"#,
        ));
        assert_eq!(keys(&out), vec!["list", "region"]);
        assert_eq!(keys(&out["region"]["IDF"]), vec!["name", "zone"]);
        // mappings inside sequences keep their original order
        assert_eq!(keys(&out["list"][0]), vec!["b", "a"]);
    }

    #[test]
    fn test_arrange_is_idempotent_and_preserves_keys() {
        let input = doc("{c: 3, 10: x, name: n, .NONE: {y: 1, x: 2}, B: 1, a: {region: 1, default: 2}}");
        let once = arrange(input.clone());
        let twice = arrange(once.clone());
        assert_eq!(keys(&once), keys(&twice));
        assert_eq!(keys(&once[".NONE"]), keys(&twice[".NONE"]));
        let mut before = keys(&input);
        let mut after = keys(&once);
        before.sort();
        after.sort();
        assert_eq!(before, after);
        assert_eq!(once, input); // mapping equality ignores order
    }

    #[test]
    fn test_arrange_collection_keys_have_stable_order() {
        for src in [
            "{? [1] : a, ? [2] : b, name: x}",
            "{? [2] : b, name: x, ? [1] : a}",
        ] {
            let once = arrange(doc(src));
            let twice = arrange(once.clone());
            assert_eq!(raw_keys(&once), raw_keys(&twice));
            assert_eq!(
                raw_keys(&once),
                vec![Yaml::from("name"), doc("[1]"), doc("[2]")]
            );
        }
    }

    #[test]
    fn test_serialize_quotes_yaml11_booleans() {
        let arranged = arrange(doc("country: {NO: {name: Norge, y: 'yes', z: Off}}"));
        let s = to_yaml_string(&arranged).unwrap();
        assert_eq!(
            s,
            "country:\n  'NO':\n    name: Norge\n    'y': 'yes'\n    z: 'Off'\n"
        );
        let reparsed: Yaml = serde_yaml::from_str(&s).unwrap();
        assert_eq!(reparsed, arranged);
    }

    #[test]
    fn test_serialize_nested_sequences_and_complex_keys() {
        let input = doc(
            r#"
list:
  - {b: 1, a: 2}
  - [x, "line one\nline two"]
  - ~
? [k]
: v
"#,
        );
        let s = to_yaml_string(&input).unwrap();
        assert!(s.contains("- b: 1\n  a: 2\n"));
        assert!(s.contains("- - x\n  - \"line one\\nline two\"\n"));
        assert!(s.contains("? - k\n: v\n"));
        let reparsed: Yaml = serde_yaml::from_str(&s).unwrap();
        assert_eq!(reparsed, input);
    }

    #[test]
    fn test_arrange_scalars_and_sequences_unchanged() {
        assert_eq!(arrange(Yaml::from("FR")), Yaml::from("FR"));
        let seq = doc("[3, 1, 2]");
        assert_eq!(arrange(seq.clone()), seq);
    }

    #[test]
    fn test_serialize_keeps_arranged_order_and_unicode() {
        let arranged = arrange(doc(
            "{region: {IDF: {name: Île-de-France}}, iso: FR, name: France}",
        ));
        let s = to_yaml_string(&arranged).unwrap();
        assert_eq!(
            s,
            "name: France\niso: FR\nregion:\n  IDF:\n    name: Île-de-France\n"
        );
    }

    #[test]
    fn test_serialize_uses_block_sequences() {
        let s = to_yaml_string(&doc("{a: [1, 2]}")).unwrap();
        assert!(s.contains("- 1\n"));
        assert!(!s.contains('['));
    }

    #[test]
    fn test_write_document_round_trip() {
        let input = doc(
            r#"
country:
  NO:
    region:
      .NONE:
        city:
          OSL: {name: Oslo}
    name: Norway
"#,
        );
        let mut buf = Vec::new();
        write_document(&input, &mut buf).unwrap();
        let text = String::from_utf8(buf).unwrap();
        let reparsed: Yaml = serde_yaml::from_str(&text).unwrap();
        assert_eq!(reparsed, input);
        assert!(text.find("name: Norway").unwrap() < text.find("region:").unwrap());
    }
}
