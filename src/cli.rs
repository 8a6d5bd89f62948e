//! CLI argument parsing module
//!
//! Handles command-line argument parsing using `clap` derive macros.
//! This module defines the `Mode` enum for operation modes and the `Args` struct
//! containing all CLI arguments with validation logic.

use clap::{Parser, ValueEnum};
use std::path::PathBuf;

/// Operation mode for line-csv.
///
/// - **Decode**: Read a CSV file and print each row as a JSON line
/// - **Encode**: Read JSON lines (arrays of strings) and write CSV
/// - **Check**: Report malformed or non-canonical lines
/// - **Normalize**: Rewrite a CSV file in canonical escaping
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Mode {
    /// Decode CSV lines into JSON rows
    Decode,
    /// Encode JSON rows into CSV lines
    Encode,
    /// Check CSV lines for malformed or non-canonical quoting
    Check,
    /// Rewrite a CSV file in canonical form
    Normalize,
}

/// Command-line arguments for line-csv.
///
/// Use the `validate()` method after parsing to ensure argument combinations are valid.
///
/// # Example
///
/// ```rust,ignore
/// use clap::Parser;
/// use line_csv::cli::Args;
///
/// let args = Args::parse();
/// args.validate()?;
/// ```
#[derive(Parser, Debug)]
#[command(name = "line-csv")]
#[command(about = "Decode, encode, check and normalize line-oriented CSV files")]
#[command(version)]
pub struct Args {
    /// Operation mode
    #[arg(long, value_enum)]
    pub mode: Mode,

    /// Input file (CSV, or JSON lines for encode mode)
    #[arg(long)]
    pub file: PathBuf,

    /// Output file (defaults to stdout for decode/encode, required for normalize)
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Required number of fields per line in check mode
    #[arg(long)]
    pub expected_fields: Option<usize>,

    /// Omit blank lines when normalizing
    #[arg(long, default_value = "false")]
    pub drop_blank_lines: bool,

    /// Log level filter (overridden by RUST_LOG)
    #[arg(long, default_value = "warn")]
    pub log_level: String,
}

impl Args {
    /// Validate argument combinations.
    ///
    /// - `--output` is required for normalize mode
    /// - `--output` must differ from `--file` in every mode that writes it
    /// - `--expected-fields` is only meaningful in check mode and must be non-zero
    /// - `--drop-blank-lines` is only meaningful in normalize mode
    /// - `--log-level` must be a known level
    pub fn validate(&self) -> Result<(), String> {
        const LEVELS: [&str; 6] = ["off", "error", "warn", "info", "debug", "trace"];
        if !LEVELS.contains(&self.log_level.to_ascii_lowercase().as_str()) {
            return Err(format!(
                "Invalid log level: {}. Must be one of: {}.",
                self.log_level,
                LEVELS.join(", ")
            ));
        }

        if self.mode == Mode::Normalize && self.output.is_none() {
            return Err("--output is required for normalize mode".to_string());
        }

        // The output is created (truncated) before the input is read.
        if self.mode != Mode::Check && self.output.as_ref() == Some(&self.file) {
            return Err("--output must differ from --file".to_string());
        }

        if let Some(expected) = self.expected_fields {
            if self.mode != Mode::Check {
                return Err("--expected-fields can only be used with --mode check".to_string());
            }
            if expected == 0 {
                return Err("--expected-fields must be at least 1".to_string());
            }
        }

        if self.drop_blank_lines && self.mode != Mode::Normalize {
            return Err("--drop-blank-lines can only be used with --mode normalize".to_string());
        }

        Ok(())
    }
}
