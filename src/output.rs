//! Output rendering for merge and install commands.
//!
//! Supports `human` (default) and `json` reports. The JSON form includes
//! per-item fields and a top-level summary.

use crate::models::Warning;
use crate::transact::{CopyAction, CopyStatus};
use crate::utils::use_colors;
use owo_colors::OwoColorize;
use serde_json::json;
use serde_json::Value as JsonVal;

/// What a `merge` run did.
#[derive(Debug, Default)]
pub struct MergeSummary {
    pub files: Vec<String>,
    pub skipped: Vec<String>,
    pub countries: usize,
    pub warnings: Vec<Warning>,
    /// `None` when the document went to stdout.
    pub output: Option<String>,
}

/// Print the merge summary. Human output goes to stderr when the document
/// itself was written to stdout, so the two never interleave.
pub fn print_merge(summary: &MergeSummary, format: &str) {
    match format {
        "json" => {
            let out = compose_merge_json(summary);
            let text = serde_json::to_string_pretty(&out).unwrap_or_default();
            if summary.output.is_some() {
                println!("{}", text);
            } else {
                eprintln!("{}", text);
            }
        }
        _ => {
            let line = format!(
                "— Summary — files={} skipped={} countries={} warnings={}",
                summary.files.len(),
                summary.skipped.len(),
                summary.countries,
                summary.warnings.len()
            );
            let line = if use_colors(format) {
                line.bold().to_string()
            } else {
                line
            };
            match &summary.output {
                Some(path) => {
                    let label = if use_colors(format) {
                        "📝 written:".green().bold().to_string()
                    } else {
                        "📝 written:".to_string()
                    };
                    println!("{} {}", label, path);
                    println!("{}", line);
                }
                None => eprintln!("{}", line),
            }
        }
    }
}

/// Print install actions. Human mode only adds a summary; per-file lines
/// were already emitted while copying.
pub fn print_install(actions: &[CopyAction], format: &str) {
    match format {
        "json" => {
            let out = compose_install_json(actions);
            println!("{}", serde_json::to_string_pretty(&out).unwrap_or_default());
        }
        _ => {
            let line = format!("— Summary — files={}", actions.len());
            if use_colors(format) {
                println!("{}", line.bold());
            } else {
                println!("{}", line);
            }
        }
    }
}

/// Compose merge JSON object (pure) for testing/snapshot purposes.
pub fn compose_merge_json(summary: &MergeSummary) -> JsonVal {
    json!({
        "results": {
            "files": summary.files,
            "skipped": summary.skipped,
            "warnings": summary.warnings,
            "output": summary.output,
        },
        "summary": {
            "files": summary.files.len(),
            "skipped": summary.skipped.len(),
            "countries": summary.countries,
            "warnings": summary.warnings.len(),
        }
    })
}

/// Compose install JSON object (pure) for testing/snapshot purposes.
pub fn compose_install_json(actions: &[CopyAction]) -> JsonVal {
    let count = |s: CopyStatus| actions.iter().filter(|a| a.status == s).count();
    json!({
        "results": actions,
        "summary": {
            "created": count(CopyStatus::Created),
            "replaced": count(CopyStatus::Replaced),
            "updated": count(CopyStatus::Updated),
            "saved": count(CopyStatus::Saved),
            "total": actions.len(),
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compose_merge_json_shape() {
        let summary = MergeSummary {
            files: vec!["a.yml".into(), "b.yml".into()],
            skipped: vec!["b.yml".into()],
            countries: 3,
            warnings: vec![Warning::InvalidCountryCode("USA".into())],
            output: None,
        };
        let out = compose_merge_json(&summary);
        assert_eq!(out["summary"]["files"], 2);
        assert_eq!(out["summary"]["countries"], 3);
        assert_eq!(out["results"]["warnings"][0]["kind"], "invalid-country-code");
        assert_eq!(out["results"]["warnings"][0]["code"], "USA");
        assert!(out["results"]["output"].is_null());
    }

    #[test]
    fn test_compose_install_json_counts() {
        let actions = vec![
            CopyAction {
                source: "s/a".into(),
                target: "d/a".into(),
                status: CopyStatus::Created,
            },
            CopyAction {
                source: "s/b".into(),
                target: "d/b".into(),
                status: CopyStatus::Replaced,
            },
        ];
        let out = compose_install_json(&actions);
        assert_eq!(out["summary"]["created"], 1);
        assert_eq!(out["summary"]["replaced"], 1);
        assert_eq!(out["summary"]["total"], 2);
        assert_eq!(out["results"][1]["status"], "replaced");
    }
}
