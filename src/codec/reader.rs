use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use super::decoder::decode_line;
use super::lines::{BufReadLines, LineSupplier};
use super::row::CsvRow;
use crate::error::Result;

/// CSV reader binding the decoder to a [`LineSupplier`].
///
/// Each call to [`read_row`](Self::read_row) pulls one physical line from
/// the supplier and decodes it into a caller-owned [`CsvRow`].
///
/// # Blank lines and end of input
///
/// `read_row` returns `false` both for a blank line and at end of input,
/// matching [`decode_line`]. Callers that need to keep going past blank
/// lines check [`is_at_end`](Self::is_at_end), which reflects the supplier's
/// own end-of-input signal.
///
/// # Example
///
/// ```
/// use line_csv::codec::{CsvFileReader, CsvRow};
///
/// let mut reader = CsvFileReader::from_reader("a,b\n\"c,d\",e\n".as_bytes());
/// let mut row = CsvRow::new();
///
/// assert!(reader.read_row(&mut row).unwrap());
/// assert_eq!(row.fields(), ["a", "b"]);
/// assert!(reader.read_row(&mut row).unwrap());
/// assert_eq!(row.fields(), ["c,d", "e"]);
/// assert!(!reader.read_row(&mut row).unwrap());
/// assert!(reader.is_at_end());
/// ```
pub struct CsvFileReader<S> {
    /// Source of physical lines.
    supplier: S,
    /// Number of lines pulled from the supplier so far (1-indexed once reading starts).
    line_number: u64,
    /// Set once the supplier has reported end of input.
    at_end: bool,
}

impl CsvFileReader<BufReadLines<BufReader<File>>> {
    /// Opens the file at `path` for reading.
    pub fn open(path: &Path) -> Result<Self> {
        let file = File::open(path)?;
        tracing::debug!(path = %path.display(), "opened CSV file for reading");
        Ok(Self::new(BufReadLines::new(BufReader::new(file))))
    }
}

impl<R: Read> CsvFileReader<BufReadLines<BufReader<R>>> {
    /// Reads lines from any byte stream.
    pub fn from_reader(reader: R) -> Self {
        Self::new(BufReadLines::new(BufReader::new(reader)))
    }
}

impl<S: LineSupplier> CsvFileReader<S> {
    /// Creates a reader over an existing line supplier.
    pub fn new(supplier: S) -> Self {
        Self {
            supplier,
            line_number: 0,
            at_end: false,
        }
    }

    /// Reads the next line into `row`.
    ///
    /// Returns `Ok(true)` when the line held at least one field, `Ok(false)`
    /// for a blank line or end of input. Errors come only from the supplier.
    pub fn read_row(&mut self, row: &mut CsvRow) -> Result<bool> {
        let line = self.supplier.next_line()?;
        match line {
            Some(_) => self.line_number += 1,
            None => self.at_end = true,
        }

        let found = decode_line(line, row);
        if found {
            tracing::debug!(
                line = self.line_number,
                fields = row.len(),
                "decoded row"
            );
        }
        Ok(found)
    }

    /// Number of lines read so far; the line number of the last row read.
    pub fn line_number(&self) -> u64 {
        self.line_number
    }

    /// Returns true once the supplier has signalled end of input.
    pub fn is_at_end(&self) -> bool {
        self.at_end
    }

    /// Consumes the reader, returning the supplier.
    pub fn into_inner(self) -> S {
        self.supplier
    }
}

impl<S: LineSupplier> Iterator for CsvFileReader<S> {
    type Item = Result<CsvRow>;

    /// Yields owned rows until end of input. Blank lines yield empty rows.
    fn next(&mut self) -> Option<Self::Item> {
        if self.at_end {
            return None;
        }
        let mut row = CsvRow::new();
        match self.read_row(&mut row) {
            Ok(_) if self.at_end => None,
            Ok(_) => Some(Ok(row)),
            Err(e) => Some(Err(e)),
        }
    }
}
