//! locode core library.
//!
//! Merges hierarchical location-code documents (country → region → city)
//! into one normalized YAML document with deterministic key order.
//!
//! High-level modules:
//! - `validate`: Advisory casing/length checks on country, region and city codes.
//! - `merge`: Loading documents and merging them into an accumulator.
//! - `format`: Key ordering and YAML emission.
//! - `transact`: All-or-nothing directory copy for installing output.
//! - `config`: Discovery and effective configuration resolution.
//! - `cli`: CLI argument parsing (binary uses this).
//! - `output`: Human/JSON printers for command results.
//! - `models`: Document value type, reserved codes and warnings.
//! - `utils`: Console and string helpers.
pub mod cli;
pub mod config;
pub mod error;
pub mod format;
pub mod merge;
pub mod models;
pub mod output;
pub mod transact;
pub mod utils;
pub mod validate;

pub use error::{LocodeError, Result};
pub use format::{arrange, to_yaml_string, write_document};
pub use merge::{load_document, load_file, merge, CountryFilter};
pub use models::{Warning, Yaml};
pub use transact::{transact_copy, CopyAction, CopyMode};
pub use utils::{Console, Verbosity};
pub use validate::{is_upper_str, validate};
