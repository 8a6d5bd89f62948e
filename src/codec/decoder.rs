//! Line to row decoding.
//!
//! The scanner is total: every input line produces some field split and no
//! input is rejected. Malformed quoting is repaired leniently; callers that
//! want to know about those repairs use [`decode_line_with_issues`].

use std::fmt;

use super::row::CsvRow;

const QUOTE: u8 = b'"';
const COMMA: u8 = b',';

/// A lenient repair the decoder made while scanning a line.
///
/// Reporting an issue never changes the decoded fields. `field` is the
/// 0-based field index and `column` the 1-based byte offset in the line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecodeIssue {
    /// A quoted field was never closed; the rest of the line became its value.
    UnterminatedQuote { field: usize, column: usize },
    /// Text between a closing quote and the next comma was skipped.
    DiscardedText {
        field: usize,
        column: usize,
        len: usize,
    },
    /// A quote character appeared inside an unquoted field and was kept verbatim.
    StrayQuote { field: usize, column: usize },
}

impl fmt::Display for DecodeIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DecodeIssue::UnterminatedQuote { field, column } => write!(
                f,
                "field {}: quote opened at column {} is never closed",
                field, column
            ),
            DecodeIssue::DiscardedText { field, column, len } => write!(
                f,
                "field {}: {} byte(s) after closing quote at column {} discarded",
                field, len, column
            ),
            DecodeIssue::StrayQuote { field, column } => write!(
                f,
                "field {}: unescaped quote at column {} in unquoted field",
                field, column
            ),
        }
    }
}

/// Decodes one line into `row`, reusing its field slots.
///
/// Returns `false` and leaves `row` with zero fields when `line` is absent or
/// empty; end-of-input and a blank line are indistinguishable here. Otherwise
/// returns `true` with `row.len()` equal to the number of fields found.
///
/// # Examples
///
/// ```
/// use line_csv::codec::{decode_line, CsvRow};
///
/// let mut row = CsvRow::new();
/// assert!(decode_line(Some(r#"plain,"say ""hi""","a,b""#), &mut row));
/// assert_eq!(row.fields(), ["plain", "say \"hi\"", "a,b"]);
///
/// assert!(!decode_line(None, &mut row));
/// assert!(row.is_empty());
/// ```
pub fn decode_line(line: Option<&str>, row: &mut CsvRow) -> bool {
    scan(line, row, &mut |_: DecodeIssue| {})
}

/// Decodes one line like [`decode_line`] and appends any lenient repairs
/// made along the way to `issues`.
pub fn decode_line_with_issues(
    line: Option<&str>,
    row: &mut CsvRow,
    issues: &mut Vec<DecodeIssue>,
) -> bool {
    scan(line, row, &mut |issue: DecodeIssue| issues.push(issue))
}

fn scan(line: Option<&str>, row: &mut CsvRow, report: &mut dyn FnMut(DecodeIssue)) -> bool {
    row.line_text.clear();
    let line = match line {
        Some(line) if !line.is_empty() => line,
        _ => {
            row.truncate(0);
            return false;
        }
    };
    row.line_text.push_str(line);

    let bytes = line.as_bytes();
    let mut pos = 0;
    let mut count = 0;

    loop {
        let slot = row.slot(count);

        if bytes.get(pos) == Some(&QUOTE) {
            let open = pos;
            pos += 1;
            let mut start = pos;
            let mut closed = false;

            while pos < bytes.len() {
                if bytes[pos] == QUOTE {
                    if bytes.get(pos + 1) == Some(&QUOTE) {
                        // Keep one quote of the doubled pair.
                        slot.push_str(&line[start..=pos]);
                        pos += 2;
                        start = pos;
                        continue;
                    }
                    closed = true;
                    break;
                }
                pos += 1;
            }
            slot.push_str(&line[start..pos]);

            if closed {
                pos += 1;
                let skipped_from = pos;
                while pos < bytes.len() && bytes[pos] != COMMA {
                    pos += 1;
                }
                if pos > skipped_from {
                    report(DecodeIssue::DiscardedText {
                        field: count,
                        column: skipped_from + 1,
                        len: pos - skipped_from,
                    });
                }
            } else {
                report(DecodeIssue::UnterminatedQuote {
                    field: count,
                    column: open + 1,
                });
            }
        } else {
            let start = pos;
            while pos < bytes.len() && bytes[pos] != COMMA {
                if bytes[pos] == QUOTE {
                    report(DecodeIssue::StrayQuote {
                        field: count,
                        column: pos + 1,
                    });
                }
                pos += 1;
            }
            slot.push_str(&line[start..pos]);
        }

        count += 1;

        // A comma always introduces another field, even at end of line.
        if pos < bytes.len() {
            pos += 1;
        } else {
            break;
        }
    }

    row.truncate(count);
    !row.is_empty()
}
