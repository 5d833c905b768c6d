//! locode CLI binary entry point.
//! Resolves configuration, delegates to the library and prints results.

use clap::Parser;
use locode::cli::{Cli, Commands};
use locode::config::{self, CliOverrides, Effective};
use locode::models::document::child_mapping;
use locode::models::{Yaml, COUNTRY_KEY, PROJECT_HOMEPAGE, VERSION_STRING};
use locode::output::{self, MergeSummary};
use locode::utils::{error_prefix, info_prefix, note_prefix, Console, Verbosity};
use locode::{format, merge, transact, LocodeError, Warning};
use std::fs;
use std::io::{self, BufWriter, Write};
use std::path::Path;

fn main() {
    let cli = Cli::parse();
    let flag = |b: bool| if b { Some(true) } else { None };
    let mut overrides = CliOverrides {
        quiet: flag(cli.quiet),
        verbose: flag(cli.verbose),
        report: cli.report.clone(),
        ..CliOverrides::default()
    };
    match &cli.cmd {
        Commands::Version => {
            println!("locode {} ({})", VERSION_STRING, PROJECT_HOMEPAGE);
        }
        Commands::Merge {
            files,
            country,
            output,
        } => {
            overrides.countries = country.clone();
            overrides.output = output.clone();
            let eff = effective(overrides);
            if let Err(e) = run_merge(files, &eff) {
                fail(e);
            }
        }
        Commands::Install {
            src_dir,
            dest_dir,
            replace,
            update,
        } => {
            overrides.install_dest = dest_dir.clone();
            overrides.replace = if *replace {
                Some(true)
            } else if *update {
                Some(false)
            } else {
                None
            };
            let eff = effective(overrides);
            let Some(dest) = eff.install_dest.as_deref() else {
                eprintln!(
                    "{} {}",
                    error_prefix(),
                    "Destination is not configured. Pass DEST_DIR or set [install].dest."
                );
                std::process::exit(2);
            };
            let mode = if eff.replace {
                transact::CopyMode::Replace
            } else {
                transact::CopyMode::Update
            };
            let console = Console::new(eff.verbosity);
            match transact::transact_copy(Path::new(src_dir), dest, Some(mode), &console) {
                Ok(actions) => output::print_install(&actions, &eff.report),
                Err(e) => fail(e),
            }
        }
    }
}

/// Discover config next to the working directory and apply CLI overrides.
fn effective(overrides: CliOverrides) -> Effective {
    let cwd = std::env::current_dir().unwrap_or_else(|_| ".".into());
    let root = config::detect_root(&cwd);
    let (cfg, found) = match config::load_config(&root) {
        Ok(Some(c)) => (c, true),
        Ok(None) => (Default::default(), false),
        Err(e) => {
            eprintln!("{} {}; using defaults.", note_prefix(), e);
            (Default::default(), false)
        }
    };
    let eff = config::resolve_effective(&root, cfg, overrides);
    if found && eff.verbosity == Verbosity::Verbose {
        eprintln!(
            "{} Using configuration under {}",
            info_prefix(),
            eff.root.display()
        );
    }
    eff
}

fn run_merge(files: &[String], eff: &Effective) -> locode::Result<()> {
    let console = Console::new(eff.verbosity).with_status_to_stderr(eff.output.is_none());
    let mut doc = Yaml::Null;
    let mut summary = MergeSummary::default();
    for f in files {
        let warnings = merge::load_file(Path::new(f), &mut doc, &eff.filter, &console)?;
        if warnings.contains(&Warning::NoCountryData) {
            summary.skipped.push(f.clone());
        }
        summary.files.push(f.clone());
        summary.warnings.extend(warnings);
    }
    summary.countries = child_mapping(&doc, COUNTRY_KEY).map_or(0, |m| m.len());

    match &eff.output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent).map_err(|e| LocodeError::io(parent, e))?;
            }
            let file = fs::File::create(path).map_err(|e| LocodeError::io(path, e))?;
            let mut w = BufWriter::new(file);
            format::write_document(&doc, &mut w)?;
            w.flush().map_err(|e| LocodeError::io(path, e))?;
            console.info(format!("Saving file: {}", path.display()));
            summary.output = Some(path.to_string_lossy().to_string());
        }
        None => {
            let stdout = io::stdout();
            let mut lock = stdout.lock();
            format::write_document(&doc, &mut lock)?;
            lock.flush().map_err(|e| LocodeError::io("<stdout>", e))?;
        }
    }
    if console.verbosity != locode::Verbosity::Quiet {
        output::print_merge(&summary, &eff.report);
    }
    Ok(())
}

fn fail(e: LocodeError) -> ! {
    eprintln!("{} {}", error_prefix(), e);
    std::process::exit(2);
}
