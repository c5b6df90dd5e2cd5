use std::io::Write;

use fastaflow_formats::fasta::{parse, parse_path, FastaRecord};
use fastaflow_formats::ParseError;
use pretty_assertions::assert_eq;

#[test]
fn parses_headers_and_concatenates_body_lines() {
    let input = "\
>NM_001 Homo sapiens test transcript
ATGGCC
  TTAA
GGCC

>NM_002
atgc
";
    let records = parse(input);
    assert_eq!(
        records,
        vec![
            FastaRecord {
                id: "NM_001".to_string(),
                description: ">NM_001 Homo sapiens test transcript".to_string(),
                sequence: "ATGGCCTTAAGGCC".to_string(),
            },
            FastaRecord {
                id: "NM_002".to_string(),
                description: ">NM_002".to_string(),
                sequence: "atgc".to_string(),
            },
        ]
    );
}

#[test]
fn lines_before_first_header_are_ignored() {
    let input = "; stray comment\nATGATG\n>seq1\nGGCC\n";
    let records = parse(input);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].sequence, "GGCC");
}

#[test]
fn zero_headers_parse_to_zero_records() {
    assert_eq!(parse("just some text\nwith no headers\n"), vec![]);
}

#[test]
fn identifier_stops_at_first_whitespace() {
    let records = parse(">sp|P12345|TEST description here\nMKVL\n");
    assert_eq!(records[0].id, "sp|P12345|TEST");
    assert_eq!(records[0].description, ">sp|P12345|TEST description here");
}

#[test]
fn reads_records_from_disk() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    write!(file, ">seq1\nATGC\n>seq2\nGGTT\n").unwrap();

    let records = parse_path(file.path()).unwrap();
    assert_eq!(records.len(), 2);
    assert_eq!(records[0].id, "seq1");
    assert_eq!(records[1].sequence, "GGTT");
}

#[test]
fn missing_file_is_an_io_error() {
    let err = parse_path("/definitely/not/here.fasta").unwrap_err();
    assert!(matches!(err, ParseError::Io(_)));
}
