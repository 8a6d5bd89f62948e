//! Reusable row buffer shared by the encoder and decoder.

use std::ops::Index;

/// An ordered, mutable sequence of field values plus the raw line text.
///
/// A `CsvRow` is meant to be created once and reused across many
/// [`decode_line`](super::decode_line) / [`encode_row`](super::encode_row)
/// calls. Decoding overwrites existing field slots in place (keeping their
/// `String` allocations), appends slots only when the new line has more
/// fields, and truncates any stale trailing slots afterwards.
///
/// Field values are always held unescaped; the raw `line_text` holds the
/// exact physical line the row was parsed from or rendered to.
///
/// # Example
///
/// ```
/// use line_csv::codec::{decode_line, encode_row, CsvRow};
///
/// let mut row = CsvRow::from(vec!["hello", "a,b"]);
/// assert_eq!(encode_row(&mut row), "hello,\"a,b\"");
///
/// assert!(decode_line(Some("x,y,z"), &mut row));
/// assert_eq!(row.fields(), ["x", "y", "z"]);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CsvRow {
    pub(crate) fields: Vec<String>,
    pub(crate) line_text: String,
}

impl CsvRow {
    /// Creates an empty row.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty row with room for `fields` values.
    pub fn with_capacity(fields: usize) -> Self {
        Self {
            fields: Vec::with_capacity(fields),
            line_text: String::new(),
        }
    }

    /// Number of fields currently held.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true when the row holds no fields.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The unescaped field values.
    pub fn fields(&self) -> &[String] {
        &self.fields
    }

    /// Returns the field at `index`, if present.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.fields.get(index).map(String::as_str)
    }

    /// Iterates over the field values as string slices.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.fields.iter().map(String::as_str)
    }

    /// Appends a field value.
    pub fn push(&mut self, value: impl Into<String>) {
        self.fields.push(value.into());
    }

    /// Replaces all fields with `values`, reusing existing slots.
    pub fn set_fields<I, S>(&mut self, values: I)
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut count = 0;
        for value in values {
            self.slot(count).push_str(value.as_ref());
            count += 1;
        }
        self.fields.truncate(count);
    }

    /// Removes every field and the raw line text, keeping capacity.
    pub fn clear(&mut self) {
        self.fields.clear();
        self.line_text.clear();
    }

    /// The raw text of the line this row was last decoded from or encoded to.
    pub fn line_text(&self) -> &str {
        &self.line_text
    }

    /// Consumes the row, returning its field values.
    pub fn into_fields(self) -> Vec<String> {
        self.fields
    }

    /// Returns a cleared slot for field `index`, appending one if the row is
    /// shorter. Slots before `index` must already exist.
    pub(crate) fn slot(&mut self, index: usize) -> &mut String {
        debug_assert!(index <= self.fields.len());
        if index == self.fields.len() {
            self.fields.push(String::new());
        } else {
            self.fields[index].clear();
        }
        &mut self.fields[index]
    }

    /// Drops every slot at or beyond `len`.
    pub(crate) fn truncate(&mut self, len: usize) {
        self.fields.truncate(len);
    }
}

impl Index<usize> for CsvRow {
    type Output = str;

    fn index(&self, index: usize) -> &str {
        &self.fields[index]
    }
}

impl<S: Into<String>> From<Vec<S>> for CsvRow {
    fn from(values: Vec<S>) -> Self {
        values.into_iter().collect()
    }
}

impl<S: Into<String>> FromIterator<S> for CsvRow {
    fn from_iter<T: IntoIterator<Item = S>>(iter: T) -> Self {
        Self {
            fields: iter.into_iter().map(Into::into).collect(),
            line_text: String::new(),
        }
    }
}

impl<'a> IntoIterator for &'a CsvRow {
    type Item = &'a String;
    type IntoIter = std::slice::Iter<'a, String>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
