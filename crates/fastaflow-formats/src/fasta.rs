use std::fs;
use std::path::Path;

use crate::ParseError;

/// One record parsed out of a FASTA document, before persistence
/// attaches provenance to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FastaRecord {
    /// Text after `>` up to the first whitespace of the header.
    pub id: String,
    /// The entire header line, including the leading `>`.
    pub description: String,
    /// Body lines concatenated in order, each trimmed.
    pub sequence: String,
}

/// Parse FASTA text into records.
///
/// A line starting with `>` opens a new record; everything up to the
/// next header (or end of input) forms its sequence, with each line
/// stripped of surrounding whitespace. Lines before the first header
/// are ignored. Sequence characters are not validated or case-folded:
/// whatever the file contains is passed through unchanged.
///
/// Input without a single header parses to an empty vec; that is a
/// normal "nothing to import" outcome, not an error. Records with an
/// empty identifier or no sequence characters are dropped with a
/// warning.
pub fn parse(input: &str) -> Vec<FastaRecord> {
    let mut records = Vec::new();
    let mut current: Option<FastaRecord> = None;

    for line in input.lines() {
        let trimmed = line.trim();

        if trimmed.starts_with('>') {
            flush(&mut records, current.take());
            let id: String = trimmed[1..]
                .chars()
                .take_while(|c| !c.is_whitespace())
                .collect();
            current = Some(FastaRecord {
                id,
                description: trimmed.to_string(),
                sequence: String::new(),
            });
        } else if let Some(record) = current.as_mut() {
            // Whitespace-only lines contribute nothing.
            record.sequence.push_str(trimmed);
        }
    }

    flush(&mut records, current);
    records
}

fn flush(records: &mut Vec<FastaRecord>, record: Option<FastaRecord>) {
    let Some(record) = record else { return };
    if record.id.is_empty() {
        log::warn!("skipping record with empty identifier: {:?}", record.description);
        return;
    }
    if record.sequence.is_empty() {
        log::warn!("skipping record {} without sequence data", record.id);
        return;
    }
    records.push(record);
}

/// Read the file at `path` and parse its contents.
pub fn parse_path(path: impl AsRef<Path>) -> Result<Vec<FastaRecord>, ParseError> {
    let content = fs::read_to_string(path)?;
    Ok(parse(&content))
}
