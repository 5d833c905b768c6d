//! All-or-nothing directory copy used to install generated files.
//!
//! Every destination is checked before the first byte is written; a single
//! unwritable target aborts the whole operation.

use crate::error::{LocodeError, Result};
use crate::utils::Console;
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};

/// How status lines describe files that already exist at the destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CopyMode {
    Replace,
    /// Existing files are still overwritten; only the wording differs.
    Update,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum CopyStatus {
    Created,
    Replaced,
    Updated,
    Saved,
}

impl CopyStatus {
    fn label(self) -> &'static str {
        match self {
            CopyStatus::Created => "Creating file:",
            CopyStatus::Replaced => "Replacing file:",
            CopyStatus::Updated => "Updating file:",
            CopyStatus::Saved => "Saving file:",
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CopyAction {
    pub source: String,
    pub target: String,
    pub status: CopyStatus,
}

/// Copy every regular file directly under `src_dir` into `dest_dir`.
///
/// Files are processed in name order. Fails with `Unwritable` before any
/// copy when a destination exists and is not a writable regular file.
pub fn transact_copy(
    src_dir: &Path,
    dest_dir: &Path,
    mode: Option<CopyMode>,
    console: &Console,
) -> Result<Vec<CopyAction>> {
    if !src_dir.is_dir() {
        return Err(LocodeError::NotADirectory(src_dir.to_path_buf()));
    }
    let entries = fs::read_dir(src_dir).map_err(|e| LocodeError::io(src_dir, e))?;
    let mut names = Vec::new();
    for entry in entries {
        let entry = entry.map_err(|e| LocodeError::io(src_dir, e))?;
        if entry.path().is_file() {
            names.push(entry.file_name());
        }
    }
    names.sort();

    let mut plan: Vec<(PathBuf, PathBuf)> = Vec::with_capacity(names.len());
    for name in names {
        let src = src_dir.join(&name);
        let dst = dest_dir.join(&name);
        if !is_writable_target(&dst) {
            return Err(LocodeError::Unwritable(dst));
        }
        plan.push((src, dst));
    }

    let mut actions = Vec::with_capacity(plan.len());
    for (src, dst) in plan {
        let status = match mode {
            Some(m) if dst.exists() => match m {
                CopyMode::Replace => CopyStatus::Replaced,
                CopyMode::Update => CopyStatus::Updated,
            },
            Some(_) => CopyStatus::Created,
            None => CopyStatus::Saved,
        };
        console.info(format!("{} {}", status.label(), dst.display()));
        fs::copy(&src, &dst).map_err(|e| LocodeError::io(&dst, e))?;
        actions.push(CopyAction {
            source: src.to_string_lossy().to_string(),
            target: dst.to_string_lossy().to_string(),
            status,
        });
    }
    Ok(actions)
}

/// A target is acceptable when absent, or a regular file not marked read-only.
fn is_writable_target(p: &Path) -> bool {
    match fs::metadata(p) {
        Ok(meta) => meta.is_file() && !meta.permissions().readonly(),
        Err(_) => !p.exists(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::utils::Verbosity;
    use tempfile::tempdir;

    fn quiet() -> Console {
        Console::new(Verbosity::Quiet)
    }

    #[test]
    fn test_transact_copy_reports_created_and_replaced() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(src.join("nested")).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("b.yml"), "b: 1\n").unwrap();
        fs::write(src.join("a.yml"), "a: 1\n").unwrap();
        fs::write(dst.join("b.yml"), "old\n").unwrap();

        let actions = transact_copy(&src, &dst, Some(CopyMode::Replace), &quiet()).unwrap();
        let statuses: Vec<_> = actions.iter().map(|a| a.status).collect();
        assert_eq!(statuses, vec![CopyStatus::Created, CopyStatus::Replaced]);
        assert_eq!(fs::read_to_string(dst.join("b.yml")).unwrap(), "b: 1\n");
        // directories are not copied
        assert!(!dst.join("nested").exists());
    }

    #[test]
    fn test_transact_copy_update_and_generic_wording() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::create_dir_all(&dst).unwrap();
        fs::write(src.join("a.yml"), "new\n").unwrap();
        fs::write(dst.join("a.yml"), "old\n").unwrap();

        let actions = transact_copy(&src, &dst, Some(CopyMode::Update), &quiet()).unwrap();
        assert_eq!(actions[0].status, CopyStatus::Updated);
        assert_eq!(fs::read_to_string(dst.join("a.yml")).unwrap(), "new\n");

        let actions = transact_copy(&src, &dst, None, &quiet()).unwrap();
        assert_eq!(actions[0].status, CopyStatus::Saved);
    }

    #[test]
    fn test_transact_copy_aborts_before_any_write() {
        let tmp = tempdir().unwrap();
        let src = tmp.path().join("src");
        let dst = tmp.path().join("dst");
        fs::create_dir_all(&src).unwrap();
        fs::write(src.join("a.yml"), "a\n").unwrap();
        fs::write(src.join("b.yml"), "b\n").unwrap();
        // a directory where a file should go makes b.yml unwritable
        fs::create_dir_all(dst.join("b.yml")).unwrap();

        let err = transact_copy(&src, &dst, Some(CopyMode::Replace), &quiet()).unwrap_err();
        assert!(matches!(err, LocodeError::Unwritable(p) if p.ends_with("b.yml")));
        assert!(!dst.join("a.yml").exists());
    }

    #[test]
    fn test_transact_copy_rejects_missing_source_dir() {
        let tmp = tempdir().unwrap();
        let err = transact_copy(&tmp.path().join("none"), tmp.path(), None, &quiet()).unwrap_err();
        assert!(matches!(err, LocodeError::NotADirectory(_)));
    }
}
