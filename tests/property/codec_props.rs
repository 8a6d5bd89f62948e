//! Property-based tests for the CSV codec
//!
//! Exercises the decoder and encoder with generated field values, and
//! cross-checks encoder output against the `csv` crate's reader.

use proptest::prelude::*;

use line_csv::codec::{
    decode_line, decode_line_with_issues, encode_fields, encode_row, needs_quoting, CsvRow,
};

/// Strategy for a single field without line breaks, biased toward the
/// characters that drive quoting.
fn field_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        // Plain alphanumeric fields
        "[a-zA-Z0-9 ]{0,12}".prop_map(|s| s),
        // Fields dense in commas and quotes
        "[a-z,\" ]{0,12}".prop_map(|s| s),
        // Arbitrary text without line breaks
        "[^\r\n]{0,12}".prop_map(|s| s),
        // Edge values
        Just(String::new()),
        Just("\"".to_string()),
        Just(",".to_string()),
        Just("\"\"".to_string()),
    ]
}

/// Strategy for a row that survives a line round trip.
///
/// A row of exactly one empty field encodes to an empty line, which decodes
/// as "no row"; that case is excluded.
fn row_strategy() -> impl Strategy<Value = Vec<String>> {
    prop::collection::vec(field_strategy(), 1..8)
        .prop_filter("single empty field encodes to a blank line", |fields| {
            !(fields.len() == 1 && fields[0].is_empty())
        })
}

/// Strategy for arbitrary single physical lines, malformed ones included.
fn line_strategy() -> impl Strategy<Value = String> {
    prop_oneof![
        "[a-z,\"]{0,24}".prop_map(|s| s),
        "[^\r\n]{0,24}".prop_map(|s| s),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    // Decoding the encoder's output reproduces the original fields exactly.
    #[test]
    fn encode_then_decode_roundtrip(fields in row_strategy()) {
        let mut row = CsvRow::from(fields.clone());
        let line = encode_row(&mut row).to_string();

        let mut decoded = CsvRow::new();
        prop_assert!(decode_line(Some(&line), &mut decoded));
        prop_assert_eq!(decoded.fields(), fields.as_slice());
        prop_assert_eq!(decoded.line_text(), line.as_str());
    }

    // The csv crate reads the encoder's output as the same record.
    #[test]
    fn encoder_output_matches_csv_crate(fields in row_strategy()) {
        let mut line = String::new();
        encode_fields(&fields, &mut line);

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .flexible(true)
            .from_reader(line.as_bytes());
        let records: Vec<csv::StringRecord> = reader
            .records()
            .collect::<Result<_, _>>()
            .expect("csv crate should parse encoder output");

        prop_assert_eq!(records.len(), 1);
        let parsed: Vec<&str> = records[0].iter().collect();
        prop_assert_eq!(parsed, fields.iter().map(String::as_str).collect::<Vec<_>>());
    }

    // Fields without commas or quotes are written verbatim, never quoted.
    #[test]
    fn plain_fields_are_not_quoted(value in "[^,\"\r\n]{0,20}") {
        prop_assert!(!needs_quoting(&value));
        let mut line = String::new();
        encode_fields([value.as_str()], &mut line);
        prop_assert_eq!(line, value);
    }

    // Quoted fields are wrapped once and every inner quote is doubled.
    #[test]
    fn quoted_fields_double_inner_quotes(value in "[a-z]{0,5}[,\"][a-z,\"]{0,10}") {
        let mut line = String::new();
        encode_fields([value.as_str()], &mut line);

        prop_assert!(line.starts_with('"') && line.ends_with('"'));
        let inner = &line[1..line.len() - 1];
        prop_assert_eq!(inner.replace("\"\"", "\""), value.clone());
        prop_assert_eq!(inner.matches('"').count(), 2 * value.matches('"').count());
    }

    // Decoding is total and reporting issues never changes the result.
    #[test]
    fn issue_reporting_does_not_change_decoding(line in line_strategy()) {
        let mut plain = CsvRow::new();
        let mut reported = CsvRow::new();
        let mut issues = Vec::new();

        let found_plain = decode_line(Some(&line), &mut plain);
        let found_reported = decode_line_with_issues(Some(&line), &mut reported, &mut issues);

        prop_assert_eq!(found_plain, found_reported);
        prop_assert_eq!(plain, reported);
        prop_assert_eq!(found_plain, !line.is_empty());
    }

    // A line decodes to at most one more field than it has commas.
    #[test]
    fn field_count_bounded_by_commas(line in line_strategy()) {
        let mut row = CsvRow::new();
        decode_line(Some(&line), &mut row);
        if line.is_empty() {
            prop_assert_eq!(row.len(), 0);
        } else {
            prop_assert!(row.len() >= 1);
            prop_assert!(row.len() <= line.matches(',').count() + 1);
        }
    }

    // Re-encoding decoded text is stable: canonical lines stay canonical.
    #[test]
    fn canonical_form_is_idempotent(line in line_strategy()) {
        let mut row = CsvRow::new();
        decode_line(Some(&line), &mut row);
        let once = encode_row(&mut row).to_string();

        decode_line(Some(&once), &mut row);
        let twice = encode_row(&mut row).to_string();

        prop_assert_eq!(once, twice);
    }

    // Reusing a row buffer never leaves stale trailing fields.
    #[test]
    fn buffer_reuse_matches_fresh_decode(first in row_strategy(), second in row_strategy()) {
        let mut first_line = String::new();
        encode_fields(&first, &mut first_line);
        let mut second_line = String::new();
        encode_fields(&second, &mut second_line);

        let mut reused = CsvRow::new();
        decode_line(Some(&first_line), &mut reused);
        decode_line(Some(&second_line), &mut reused);

        let mut fresh = CsvRow::new();
        decode_line(Some(&second_line), &mut fresh);

        prop_assert_eq!(reused.len(), second.len());
        prop_assert_eq!(reused, fresh);
    }
}
