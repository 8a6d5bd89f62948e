//! CSV codec module
//!
//! Converts physical lines into rows of fields and back. The decoder and
//! encoder are plain functions over a caller-owned [`CsvRow`]; the file
//! reader and writer bind them to [`LineSupplier`] / [`LineSink`]
//! collaborators.

pub mod decoder;
pub mod encoder;
pub mod lines;
pub mod reader;
pub mod row;
pub mod writer;

pub use decoder::{decode_line, decode_line_with_issues, DecodeIssue};
pub use encoder::{encode_fields, encode_row, needs_quoting};
pub use lines::{BufReadLines, IterLines, LineSink, LineSupplier, WriteLines};
pub use reader::CsvFileReader;
pub use row::CsvRow;
pub use writer::{CsvFileWriter, WriteStats};
