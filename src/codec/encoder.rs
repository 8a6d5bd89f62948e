//! Row to line encoding.

use super::row::CsvRow;

/// Returns true when `value` must be wrapped in quotes on the wire.
///
/// Only a comma or a double quote forces quoting. Embedded newlines do not,
/// which means a field containing one cannot survive a line-oriented round
/// trip.
#[inline]
pub fn needs_quoting(value: &str) -> bool {
    value.bytes().any(|b| b == b'"' || b == b',')
}

/// Appends the escaped form of `value` to `out`.
fn push_field(out: &mut String, value: &str) {
    if !needs_quoting(value) {
        out.push_str(value);
        return;
    }

    out.reserve(value.len() + 2);
    out.push('"');
    let mut rest = value;
    while let Some(idx) = rest.find('"') {
        out.push_str(&rest[..=idx]);
        out.push('"');
        rest = &rest[idx + 1..];
    }
    out.push_str(rest);
    out.push('"');
}

/// Encodes `fields` as one line appended to `out`.
///
/// ```
/// use line_csv::codec::encode_fields;
///
/// let mut line = String::new();
/// encode_fields(["hello", "wor\"ld", "a,b"], &mut line);
/// assert_eq!(line, r#"hello,"wor""ld","a,b""#);
/// ```
pub fn encode_fields<I, S>(fields: I, out: &mut String)
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    for (i, value) in fields.into_iter().enumerate() {
        if i > 0 {
            out.push(',');
        }
        push_field(out, value.as_ref());
    }
}

/// Encodes the fields of `row` into one line, records it as the row's raw
/// line text and returns it.
///
/// The row's `line_text` buffer is reused; no terminator is appended.
pub fn encode_row(row: &mut CsvRow) -> &str {
    row.line_text.clear();
    encode_fields(&row.fields, &mut row.line_text);
    &row.line_text
}
