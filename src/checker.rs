//! CSV Checking Module
//!
//! Reports lines that the lenient decoder had to repair, lines whose quoting
//! is not the canonical form the encoder would produce, and (optionally)
//! lines with an unexpected number of fields.
//!
//! # Overview
//!
//! Decoding never fails, so a file with broken quoting reads back silently
//! with some text dropped or merged. The checker makes those repairs
//! visible without changing how lines decode:
//! - **Malformed**: unterminated quotes, text after a closing quote, or
//!   stray quotes in unquoted fields
//! - **Non-canonical**: decodes cleanly but re-encodes differently, e.g.
//!   `"abc"` where `abc` needs no quotes
//! - **Field count**: the row width differs from `--expected-fields`
//!
//! # Example
//!
//! ```rust,ignore
//! use line_csv::checker::CsvChecker;
//! use std::path::Path;
//!
//! let mut checker = CsvChecker::new(Some(3));
//! let stats = checker.check(Path::new("data.csv"))?;
//!
//! println!("Problem lines: {}", stats.problem_lines);
//! ```

use std::fmt;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::codec::{
    decode_line_with_issues, encode_row, BufReadLines, CsvRow, DecodeIssue, LineSupplier,
};
use crate::error::Result;

/// Maximum number of problem lines kept in [`CheckStats::problems`].
pub const MAX_REPORTED_PROBLEMS: usize = 100;

/// Result of checking a single line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LineCheck {
    /// The line is exactly what the encoder would produce for its fields.
    Canonical,

    /// The line is empty, or holds a single empty field that encodes to an
    /// empty line.
    Blank,

    /// The decoder had to repair the line.
    Malformed(Vec<DecodeIssue>),

    /// The line decodes cleanly but its quoting differs from the encoder's.
    NonCanonical {
        /// The line as the encoder would write it.
        canonical: String,
    },

    /// The line has the wrong number of fields.
    FieldCount {
        /// The configured field count.
        expected: usize,
        /// The number of fields found.
        actual: usize,
    },
}

impl LineCheck {
    /// Returns true for lines that count as problems in a report.
    pub fn is_problem(&self) -> bool {
        !matches!(self, LineCheck::Canonical | LineCheck::Blank)
    }
}

impl fmt::Display for LineCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LineCheck::Canonical => write!(f, "Canonical"),
            LineCheck::Blank => write!(f, "Blank"),
            LineCheck::Malformed(issues) => {
                write!(f, "Malformed: ")?;
                for (i, issue) in issues.iter().enumerate() {
                    if i > 0 {
                        write!(f, "; ")?;
                    }
                    write!(f, "{}", issue)?;
                }
                Ok(())
            }
            LineCheck::NonCanonical { canonical } => {
                write!(f, "Non-canonical quoting, expected: {}", canonical)
            }
            LineCheck::FieldCount { expected, actual } => write!(
                f,
                "Invalid field count: expected {} fields, found {}",
                expected, actual
            ),
        }
    }
}

/// A problem line with its 1-indexed line number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LineProblem {
    pub line_number: u64,
    pub check: LineCheck,
}

impl fmt::Display for LineProblem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Line {}: {}", self.line_number, self.check)
    }
}

/// Statistics collected while checking a file.
#[derive(Debug, Default, Clone)]
pub struct CheckStats {
    /// Total number of physical lines read.
    pub total_lines: u64,
    /// Lines already in canonical form.
    pub canonical_lines: u64,
    /// Empty lines.
    pub blank_lines: u64,
    /// Lines with any problem.
    pub problem_lines: u64,
    /// Lines the decoder had to repair.
    pub malformed_lines: u64,
    /// Lines with redundant or otherwise non-canonical quoting.
    pub non_canonical_lines: u64,
    /// Lines with an unexpected field count.
    pub field_count_mismatches: u64,
    /// Widest row seen.
    pub max_fields: usize,
    /// The first [`MAX_REPORTED_PROBLEMS`] problem lines.
    pub problems: Vec<LineProblem>,
}

impl CheckStats {
    /// Returns true if no problem lines were found.
    pub fn is_clean(&self) -> bool {
        self.problem_lines == 0
    }

    fn record(&mut self, line_number: u64, fields: usize, check: LineCheck) {
        self.total_lines += 1;
        self.max_fields = self.max_fields.max(fields);

        match &check {
            LineCheck::Canonical => self.canonical_lines += 1,
            LineCheck::Blank => self.blank_lines += 1,
            LineCheck::Malformed(_) => self.malformed_lines += 1,
            LineCheck::NonCanonical { .. } => self.non_canonical_lines += 1,
            LineCheck::FieldCount { .. } => self.field_count_mismatches += 1,
        }

        if check.is_problem() {
            self.problem_lines += 1;
            if self.problems.len() < MAX_REPORTED_PROBLEMS {
                self.problems.push(LineProblem { line_number, check });
            }
        }
    }
}

impl fmt::Display for CheckStats {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "CSV Check Report")?;
        writeln!(f, "================")?;
        writeln!(
            f,
            "Status: {}",
            if self.is_clean() { "PASSED" } else { "FAILED" }
        )?;
        writeln!(f)?;
        writeln!(f, "Statistics:")?;
        writeln!(f, "  Total lines:       {:>10}", self.total_lines)?;
        writeln!(f, "  Canonical lines:   {:>10}", self.canonical_lines)?;
        writeln!(f, "  Blank lines:       {:>10}", self.blank_lines)?;
        writeln!(f, "  Malformed lines:   {:>10}", self.malformed_lines)?;
        writeln!(f, "  Non-canonical:     {:>10}", self.non_canonical_lines)?;
        writeln!(f, "  Field count errors:{:>10}", self.field_count_mismatches)?;
        writeln!(f, "  Widest row:        {:>10} fields", self.max_fields)?;

        if !self.problems.is_empty() {
            writeln!(f)?;
            writeln!(f, "Problems:")?;
            for problem in &self.problems {
                writeln!(f, "  {}", problem)?;
            }
            let hidden = self.problem_lines - self.problems.len() as u64;
            if hidden > 0 {
                writeln!(f, "  ... and {} more", hidden)?;
            }
        }

        Ok(())
    }
}

/// Line-by-line CSV checker.
pub struct CsvChecker {
    /// Required number of fields per non-blank line, if any.
    expected_fields: Option<usize>,
    row: CsvRow,
    canonical: CsvRow,
    issues: Vec<DecodeIssue>,
}

impl CsvChecker {
    pub fn new(expected_fields: Option<usize>) -> Self {
        Self {
            expected_fields,
            row: CsvRow::new(),
            canonical: CsvRow::new(),
            issues: Vec::new(),
        }
    }

    /// Checks the file at `path`.
    pub fn check(&mut self, path: &Path) -> Result<CheckStats> {
        let file = File::open(path)?;
        let stats = self.check_lines(BufReadLines::new(BufReader::new(file)))?;
        tracing::info!(
            path = %path.display(),
            total = stats.total_lines,
            problems = stats.problem_lines,
            "check finished"
        );
        Ok(stats)
    }

    /// Checks every line produced by `supplier`.
    pub fn check_lines<S: LineSupplier>(&mut self, mut supplier: S) -> Result<CheckStats> {
        let mut stats = CheckStats::default();
        let mut line_number = 0;

        while let Some(line) = supplier.next_line()? {
            line_number += 1;
            let check = self.check_line(line);
            if check.is_problem() {
                tracing::debug!(line = line_number, problem = %check, "problem line");
            }
            stats.record(line_number, self.row.len(), check);
        }

        Ok(stats)
    }

    /// Classifies a single line.
    pub fn check_line(&mut self, line: &str) -> LineCheck {
        self.issues.clear();
        if !decode_line_with_issues(Some(line), &mut self.row, &mut self.issues) {
            return LineCheck::Blank;
        }
        if !self.issues.is_empty() {
            return LineCheck::Malformed(self.issues.clone());
        }
        if self.row.len() == 1 && self.row[0].is_empty() {
            return LineCheck::Blank;
        }
        if let Some(expected) = self.expected_fields {
            if self.row.len() != expected {
                return LineCheck::FieldCount {
                    expected,
                    actual: self.row.len(),
                };
            }
        }

        self.canonical.set_fields(self.row.iter());
        let canonical = encode_row(&mut self.canonical);
        if canonical == line {
            LineCheck::Canonical
        } else {
            LineCheck::NonCanonical {
                canonical: canonical.to_string(),
            }
        }
    }
}
