use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use super::encoder::{encode_row, needs_quoting};
use super::lines::{LineSink, WriteLines};
use super::row::CsvRow;
use crate::error::Result;

/// Statistics for rows written by a [`CsvFileWriter`].
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteStats {
    /// Total number of rows written.
    pub rows_written: u64,
    /// Number of fields that had to be quoted.
    pub quoted_fields: u64,
    /// Number of fields written with an embedded newline.
    ///
    /// Such fields are emitted unescaped and will split into several physical
    /// lines; they cannot be read back intact.
    pub fields_with_newline: u64,
}

/// CSV writer binding the encoder to a [`LineSink`].
///
/// # Example
///
/// ```
/// use line_csv::codec::{CsvFileWriter, CsvRow};
///
/// let mut writer = CsvFileWriter::from_writer(Vec::new());
/// let mut row = CsvRow::from(vec!["hello", "a,b"]);
/// writer.write_row(&mut row).unwrap();
///
/// assert_eq!(row.line_text(), "hello,\"a,b\"");
/// assert_eq!(writer.into_inner().into_inner(), b"hello,\"a,b\"\n");
/// ```
pub struct CsvFileWriter<K> {
    /// Destination for encoded lines.
    sink: K,
    /// Reused line buffer for [`write_fields`](Self::write_fields).
    scratch: CsvRow,
    /// Statistics for written rows.
    stats: WriteStats,
}

impl CsvFileWriter<WriteLines<BufWriter<File>>> {
    /// Creates (or truncates) the file at `path` for writing.
    pub fn create(path: &Path) -> Result<Self> {
        let file = File::create(path)?;
        tracing::debug!(path = %path.display(), "created CSV file for writing");
        Ok(Self::new(WriteLines::new(BufWriter::new(file))))
    }
}

impl<W: Write> CsvFileWriter<WriteLines<W>> {
    /// Writes lines to any byte stream.
    pub fn from_writer(writer: W) -> Self {
        Self::new(WriteLines::new(writer))
    }
}

impl<K: LineSink> CsvFileWriter<K> {
    /// Creates a writer over an existing line sink.
    pub fn new(sink: K) -> Self {
        Self {
            sink,
            scratch: CsvRow::new(),
            stats: WriteStats::default(),
        }
    }

    /// Encodes `row`, records the text on the row and writes it as one line.
    pub fn write_row(&mut self, row: &mut CsvRow) -> Result<()> {
        self.record_fields(row);
        let line = encode_row(row);
        self.sink.write_line(line)?;
        self.stats.rows_written += 1;
        Ok(())
    }

    /// Encodes and writes `fields` as one line without a caller-owned row.
    pub fn write_fields<S: AsRef<str>>(&mut self, fields: &[S]) -> Result<()> {
        let mut scratch = std::mem::take(&mut self.scratch);
        scratch.set_fields(fields);
        let result = self.write_row(&mut scratch);
        self.scratch = scratch;
        result
    }

    /// Flushes buffered lines to the underlying resource.
    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    /// Returns a reference to the current write statistics.
    pub fn stats(&self) -> &WriteStats {
        &self.stats
    }

    /// Consumes the writer, returning the sink. Buffered data is not flushed.
    pub fn into_inner(self) -> K {
        self.sink
    }

    fn record_fields(&mut self, row: &CsvRow) {
        for (index, value) in row.iter().enumerate() {
            if needs_quoting(value) {
                self.stats.quoted_fields += 1;
            }
            if value.contains(['\n', '\r']) {
                self.stats.fields_with_newline += 1;
                tracing::warn!(
                    row = self.stats.rows_written + 1,
                    field = index,
                    "field contains a line break and will not round-trip"
                );
            }
        }
    }
}
