//! Console helpers: colored prefixes, verbosity-gated printing, small string utilities.

use owo_colors::OwoColorize;

/// Whether colored output should be used for the given report format.
pub fn use_colors(format: &str) -> bool {
    format != "json" && std::env::var_os("NO_COLOR").is_none()
}

fn prefix(label: &str, paint: fn(&str) -> String) -> String {
    if use_colors("human") {
        paint(label)
    } else {
        label.to_string()
    }
}

pub fn error_prefix() -> String {
    prefix("error:", |s| s.red().bold().to_string())
}

pub fn warn_prefix() -> String {
    prefix("warning:", |s| s.yellow().bold().to_string())
}

pub fn note_prefix() -> String {
    prefix("note:", |s| s.cyan().bold().to_string())
}

pub fn info_prefix() -> String {
    prefix("info:", |s| s.blue().bold().to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    Quiet,
    #[default]
    Normal,
    Verbose,
}

impl Verbosity {
    /// Combine `--quiet`/`--verbose` style flags; quiet wins.
    pub fn from_flags(quiet: bool, verbose: bool) -> Self {
        if quiet {
            Verbosity::Quiet
        } else if verbose {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        }
    }
}

/// Diagnostic channel passed explicitly to everything that reports progress.
#[derive(Debug, Clone, Copy, Default)]
pub struct Console {
    pub verbosity: Verbosity,
    /// Send status lines to stderr, keeping stdout free for document output.
    pub status_to_stderr: bool,
}

impl Console {
    pub fn new(verbosity: Verbosity) -> Self {
        Console {
            verbosity,
            status_to_stderr: false,
        }
    }

    pub fn with_status_to_stderr(mut self, on: bool) -> Self {
        self.status_to_stderr = on;
        self
    }

    fn status(&self, msg: &str) {
        if self.status_to_stderr {
            eprintln!("{}", msg);
        } else {
            println!("{}", msg);
        }
    }

    /// Status line, suppressed when quiet.
    pub fn info(&self, msg: impl AsRef<str>) {
        if self.verbosity != Verbosity::Quiet {
            self.status(msg.as_ref());
        }
    }

    /// Extra detail, only when verbose.
    pub fn detail(&self, msg: impl AsRef<str>) {
        if self.verbosity == Verbosity::Verbose {
            self.status(msg.as_ref());
        }
    }

    /// Warning on stderr. Printed regardless of verbosity.
    pub fn warn(&self, msg: impl AsRef<str>) {
        eprintln!("{} {}", warn_prefix(), msg.as_ref());
    }
}

/// Collapse runs of whitespace into single spaces and trim both ends.
pub fn simplify_str(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}
