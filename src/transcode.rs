//! JSON transcoding for CSV rows.
//!
//! `decode` mode writes one JSON object per non-blank CSV line:
//!
//! ```text
//! {"line":3,"fields":["hello","wor\"ld","a,b"]}
//! ```
//!
//! `encode` mode reads one JSON value per line, either a plain array of
//! strings or an object in the `decode` output shape, and writes one CSV
//! line for each. Feeding `decode` output back through `encode` reproduces
//! the canonical form of the original file, minus blank lines.

use std::io::{BufRead, Write};

use serde::{Deserialize, Serialize};

use crate::codec::{CsvFileReader, CsvFileWriter, CsvRow, LineSink, LineSupplier};
use crate::error::{LineCsvError, Result};

/// A decoded CSV line as written by [`decode_to_json`].
#[derive(Debug, Serialize)]
pub struct DecodedLine<'a> {
    pub line: u64,
    pub fields: &'a [String],
}

/// Accepted shapes for one line of `encode` input.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum JsonRow {
    Fields(Vec<String>),
    Decoded { fields: Vec<String> },
}

impl JsonRow {
    fn into_fields(self) -> Vec<String> {
        match self {
            JsonRow::Fields(fields) | JsonRow::Decoded { fields } => fields,
        }
    }
}

/// Writes every non-blank row of `reader` to `out` as a JSON line.
///
/// Returns the number of rows written.
pub fn decode_to_json<S, W>(reader: &mut CsvFileReader<S>, mut out: W) -> Result<u64>
where
    S: LineSupplier,
    W: Write,
{
    let mut row = CsvRow::new();
    let mut written = 0;

    loop {
        let found = reader.read_row(&mut row)?;
        if reader.is_at_end() {
            break;
        }
        if !found {
            continue;
        }

        let decoded = DecodedLine {
            line: reader.line_number(),
            fields: row.fields(),
        };
        serde_json::to_writer(&mut out, &decoded)?;
        out.write_all(b"\n")?;
        written += 1;
    }

    out.flush()?;
    Ok(written)
}

/// Encodes each non-blank JSON line of `input` as a CSV line.
///
/// Returns the number of rows written. A line that is not an array of
/// strings (or a `{"fields": [...]}` object) fails with
/// [`LineCsvError::InvalidInput`] naming its line number.
pub fn encode_from_json<R, K>(input: R, writer: &mut CsvFileWriter<K>) -> Result<u64>
where
    R: BufRead,
    K: LineSink,
{
    let mut written = 0;

    for (index, line) in input.lines().enumerate() {
        let line = line?;
        if line.trim().is_empty() {
            continue;
        }

        let row: JsonRow =
            serde_json::from_str(&line).map_err(|e| LineCsvError::InvalidInput {
                line: index as u64 + 1,
                reason: format!("expected a JSON array of strings: {}", e),
            })?;
        writer.write_fields(row.into_fields().as_slice())?;
        written += 1;
    }

    writer.flush()?;
    Ok(written)
}
