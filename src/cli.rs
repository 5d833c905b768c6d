//! CLI argument parsing via `clap`.

use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(
    name = "locode",
    version,
    about = "Merge and normalize location code YAML documents",
    long_about = "locode — merge country/region/city code documents into one YAML file with deterministic key order.\n\nConfiguration precedence: CLI > locode.toml > defaults.",
    after_help = "Examples:\n  locode merge data/*.yml --output country.yml\n  locode merge data/*.yml --country DE,FR\n  locode install build/ share/locode --replace",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue, help = "Suppress status output")]
    pub quiet: bool,
    #[arg(short, long, global = true, action = clap::ArgAction::SetTrue, help = "Print extra detail")]
    pub verbose: bool,
    #[arg(long, global = true, help = "Report style: human|json (default: human)")]
    pub report: Option<String>,
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Supported subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current locode version and homepage.")]
    Version,
    /// Merge documents into one
    #[command(
        about = "Merge documents",
        long_about = "Load each file in order, merge country entries into one document, reorder keys and write YAML. Later files update attributes of earlier ones.",
        after_help = "Examples:\n  locode merge a.yml b.yml\n  locode merge a.yml --country DE --output de.yml"
    )]
    Merge {
        #[arg(required = true, help = "Source YAML files, merged in order")]
        files: Vec<String>,
        #[arg(short, long, help = "Comma-separated country codes to keep (e.g. DE,FR)")]
        country: Option<String>,
        #[arg(short, long, help = "Output file (default: stdout)")]
        output: Option<String>,
    },
    /// Copy generated files into place
    #[command(
        about = "Install files",
        long_about = "Copy every file of SRC_DIR into DEST_DIR. All destinations are checked before anything is written.",
        after_help = "Examples:\n  locode install build share/locode --replace"
    )]
    Install {
        #[arg(help = "Directory holding the files to copy")]
        src_dir: String,
        #[arg(help = "Target directory (default: [install].dest from config)")]
        dest_dir: Option<String>,
        #[arg(long, action = clap::ArgAction::SetTrue, conflicts_with = "update", help = "Report existing files as replaced")]
        replace: bool,
        #[arg(long, action = clap::ArgAction::SetTrue, help = "Report existing files as updated")]
        update: bool,
    },
}
