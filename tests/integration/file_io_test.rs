//! Integration tests for reading and writing CSV files through the codec

use std::io::Write;

use line_csv::codec::{decode_line, encode_row, CsvFileReader, CsvFileWriter, CsvRow};
use tempfile::tempdir;

/// Helper: write raw text to a file in `dir` and return its path
fn write_file(dir: &tempfile::TempDir, name: &str, content: &str) -> std::path::PathBuf {
    let path = dir.path().join(name);
    let mut file = std::fs::File::create(&path).expect("create file");
    file.write_all(content.as_bytes()).expect("write file");
    path
}

#[test]
fn test_end_to_end_row_roundtrip() {
    let mut row = CsvRow::from(vec!["hello", "wor\"ld", "a,b"]);
    let line = encode_row(&mut row).to_string();
    assert_eq!(line, r#"hello,"wor""ld","a,b""#);

    let mut decoded = CsvRow::new();
    assert!(decode_line(Some(&line), &mut decoded));
    assert_eq!(decoded.fields(), ["hello", "wor\"ld", "a,b"]);
}

#[test]
fn test_escaping_examples() {
    let mut row = CsvRow::from(vec!["plain", "a,b", "say \"hi\""]);
    assert_eq!(encode_row(&mut row), r#"plain,"a,b","say ""hi""""#);
}

#[test]
fn test_empty_and_absent_input_yield_no_row() {
    let mut row = CsvRow::from(vec!["x", "y"]);
    assert!(!decode_line(Some(""), &mut row));
    assert_eq!(row.len(), 0);

    let mut row = CsvRow::from(vec!["x"]);
    assert!(!decode_line(None, &mut row));
    assert_eq!(row.len(), 0);
}

#[test]
fn test_trailing_comma_and_buffer_shrink() {
    let mut row = CsvRow::new();
    assert!(decode_line(Some("1,2,3,4,5"), &mut row));
    assert_eq!(row.len(), 5);

    assert!(decode_line(Some("a,b,"), &mut row));
    assert_eq!(row.fields(), ["a", "b", ""]);

    assert!(decode_line(Some("c,d"), &mut row));
    assert_eq!(row.fields(), ["c", "d"]);
}

#[test]
fn test_write_then_read_file_with_reused_rows() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let file_path = temp_dir.path().join("rows.csv");

    let rows: Vec<Vec<&str>> = vec![
        vec!["id", "name", "comment"],
        vec!["1", "alice", "likes \"quotes\""],
        vec!["2", "bob", "a, b, and c"],
        vec!["3", "", ""],
    ];

    {
        let mut writer = CsvFileWriter::create(&file_path).expect("Failed to create writer");
        let mut row = CsvRow::new();
        for values in &rows {
            row.set_fields(values);
            writer.write_row(&mut row).expect("Failed to write row");
        }
        writer.flush().expect("Failed to flush writer");

        assert_eq!(writer.stats().rows_written, 4);
        assert_eq!(writer.stats().quoted_fields, 2);
    }

    let mut reader = CsvFileReader::open(&file_path).expect("Failed to open reader");
    let mut row = CsvRow::new();
    for values in &rows {
        assert!(reader.read_row(&mut row).expect("Failed to read row"));
        assert_eq!(row.iter().collect::<Vec<_>>(), *values);
    }
    assert!(!reader.read_row(&mut row).expect("Failed to read row"));
    assert!(reader.is_at_end());
}

#[test]
fn test_reader_handles_crlf_files() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(&temp_dir, "crlf.csv", "a,\"b,c\"\r\nd,e\r\n");

    let rows: Vec<CsvRow> = CsvFileReader::open(&path)
        .expect("Failed to open reader")
        .collect::<Result<_, _>>()
        .expect("Failed to read rows");

    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].fields(), ["a", "b,c"]);
    assert_eq!(rows[1].fields(), ["d", "e"]);
    assert_eq!(rows[1].line_text(), "d,e");
}

#[test]
fn test_reader_continues_past_blank_lines() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(&temp_dir, "blank.csv", "a\n\nb\n");

    let mut reader = CsvFileReader::open(&path).expect("Failed to open reader");
    let mut row = CsvRow::new();
    let mut seen = Vec::new();

    while !reader.is_at_end() {
        if reader.read_row(&mut row).expect("Failed to read row") {
            seen.push((reader.line_number(), row[0].to_string()));
        }
    }

    assert_eq!(seen, [(1, "a".to_string()), (3, "b".to_string())]);
}

#[test]
fn test_lenient_decoding_of_malformed_file() {
    let temp_dir = tempdir().expect("Failed to create temp dir");
    let path = write_file(&temp_dir, "bad.csv", "\"ab\"junk,c\nx,\"never closed\n");

    let rows: Vec<CsvRow> = CsvFileReader::open(&path)
        .expect("Failed to open reader")
        .collect::<Result<_, _>>()
        .expect("Failed to read rows");

    assert_eq!(rows[0].fields(), ["ab", "c"]);
    assert_eq!(rows[1].fields(), ["x", "never closed"]);
}
