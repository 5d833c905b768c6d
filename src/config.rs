//! Configuration discovery and effective settings resolution.
//!
//! `locode.toml|yaml|yml` is read from the working directory or its closest
//! ancestor and merged with CLI flags into an `Effective` config.
//! Defaults:
//! - `output`: none (write to stdout)
//! - `countries`: empty (no filtering)
//! - `quiet`/`verbose`: false
//! - `report`: `human`
//! - `install.replace`: false
//!
//! Overrides precedence: CLI > config file > defaults.

use crate::error::{LocodeError, Result};
use crate::merge::CountryFilter;
use crate::utils::Verbosity;
use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_NAMES: [&str; 3] = ["locode.toml", "locode.yaml", "locode.yml"];

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
/// Root configuration loaded from `locode.toml|yaml`.
pub struct LocodeConfig {
    pub output: Option<String>,
    #[serde(default)]
    pub countries: Option<Vec<String>>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub report: Option<String>,
    #[serde(default)]
    pub install: Option<InstallCfg>,
}

#[derive(Debug, Default, Deserialize, Clone, PartialEq)]
/// Section `[install]`.
pub struct InstallCfg {
    pub dest: Option<String>,
    pub replace: Option<bool>,
}

#[derive(Debug, Clone)]
/// Fully-resolved configuration used by commands after applying precedence.
pub struct Effective {
    pub root: PathBuf,
    pub output: Option<PathBuf>,
    pub filter: CountryFilter,
    pub verbosity: Verbosity,
    pub report: String,
    pub install_dest: Option<PathBuf>,
    pub replace: bool,
}

/// Overrides collected from the command line; `None` defers to config.
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub output: Option<String>,
    pub countries: Option<String>,
    pub quiet: Option<bool>,
    pub verbose: Option<bool>,
    pub report: Option<String>,
    pub install_dest: Option<String>,
    pub replace: Option<bool>,
}

/// Walk upward from `start` to the directory holding a config file or `.git`.
pub fn detect_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if CONFIG_NAMES.iter().any(|n| cur.join(n).exists()) || cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `LocodeConfig` from `root`, if a config file is present.
///
/// Returns `Ok(None)` when no file exists and `Err` when one exists but
/// cannot be read or parsed.
pub fn load_config(root: &Path) -> Result<Option<LocodeConfig>> {
    for name in CONFIG_NAMES {
        let p = root.join(name);
        if !p.exists() {
            continue;
        }
        let s = fs::read_to_string(&p).map_err(|e| LocodeError::io(&p, e))?;
        let parsed = if name.ends_with(".toml") {
            toml::from_str::<LocodeConfig>(&s).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str::<LocodeConfig>(&s).map_err(|e| e.to_string())
        };
        return parsed.map(Some).map_err(|message| LocodeError::Config { path: p, message });
    }
    Ok(None)
}

/// Resolve `Effective` from CLI overrides, the config under `root`, and defaults.
pub fn resolve_effective(root: &Path, cfg: LocodeConfig, cli: CliOverrides) -> Effective {
    // CLI paths are taken as given; config paths are relative to the config root.
    let output = cli
        .output
        .map(PathBuf::from)
        .or_else(|| cfg.output.map(|o| root.join(o)));

    let filter = match cli.countries {
        Some(list) => CountryFilter::parse(&list),
        None => CountryFilter::new(cfg.countries.unwrap_or_default()),
    };

    let quiet = cli.quiet.or(cfg.quiet).unwrap_or(false);
    let verbose = cli.verbose.or(cfg.verbose).unwrap_or(false);

    let report = cli
        .report
        .or(cfg.report)
        .unwrap_or_else(|| "human".to_string());

    let install = cfg.install.unwrap_or_default();
    let install_dest = cli
        .install_dest
        .map(PathBuf::from)
        .or_else(|| install.dest.map(|d| root.join(d)));
    let replace = cli.replace.or(install.replace).unwrap_or(false);

    Effective {
        root: root.to_path_buf(),
        output,
        filter,
        verbosity: Verbosity::from_flags(quiet, verbose),
        report,
        install_dest,
        replace,
    }
}
