use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A single FASTA record as persisted across uploads.
///
/// The identifier parsed from the header line is the primary key:
/// re-uploading a file that contains an already-stored identifier
/// reuses the existing record. Statistics live in the optional fields
/// and are absent until an analysis pass fills them, always as a
/// complete group.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SequenceRecord {
    /// Text after `>` up to the first whitespace in the header line.
    pub id: String,
    /// The entire header line, including the leading `>`.
    pub description: String,
    /// Concatenated body lines, each stripped of surrounding whitespace.
    pub sequence: String,
    /// Provenance pointer to the source upload; opaque to this crate.
    pub filepath: String,
    /// Set once when the record is first created.
    pub upload_date: DateTime<Utc>,
    #[serde(default)]
    pub sequence_length: Option<usize>,
    #[serde(default)]
    pub gc_content: Option<f64>,
    #[serde(default)]
    pub nuc_freq: Option<BTreeMap<char, f64>>,
    #[serde(default)]
    pub codon_freq: Option<BTreeMap<String, f64>>,
    #[serde(default)]
    pub protein_seq: Option<String>,
}

impl SequenceRecord {
    pub fn new(
        id: impl Into<String>,
        description: impl Into<String>,
        sequence: impl Into<String>,
        filepath: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            description: description.into(),
            sequence: sequence.into(),
            filepath: filepath.into(),
            upload_date: Utc::now(),
            sequence_length: None,
            gc_content: None,
            nuc_freq: None,
            codon_freq: None,
            protein_seq: None,
        }
    }

    /// Whether an analysis pass has populated the derived fields.
    /// They are filled as a group, so checking one suffices.
    pub fn is_analyzed(&self) -> bool {
        self.sequence_length.is_some()
    }

    /// Populate every derived field from one analysis bundle.
    pub fn apply(&mut self, analysis: Analysis) {
        self.sequence_length = Some(analysis.sequence_length);
        self.gc_content = Some(analysis.gc_content);
        self.nuc_freq = Some(analysis.nuc_freq);
        self.codon_freq = Some(analysis.codon_freq);
        self.protein_seq = Some(analysis.protein_seq);
    }
}

/// The result of one statistics pass over a sequence.
///
/// Computed as an immutable value and written back to the store in a
/// separate explicit step, rather than mutated through a live record
/// handle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Analysis {
    pub sequence_length: usize,
    pub gc_content: f64,
    pub nuc_freq: BTreeMap<char, f64>,
    pub codon_freq: BTreeMap<String, f64>,
    pub protein_seq: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_record_has_no_derived_fields() {
        let record = SequenceRecord::new("seq1", ">seq1 test", "ATGC", "/tmp/u.fasta");
        assert!(!record.is_analyzed());
        assert!(record.gc_content.is_none());
        assert!(record.nuc_freq.is_none());
        assert!(record.codon_freq.is_none());
        assert!(record.protein_seq.is_none());
    }

    #[test]
    fn test_apply_fills_all_fields_together() {
        let mut record = SequenceRecord::new("seq1", ">seq1", "ATGAAA", "/tmp/u.fasta");
        record.apply(Analysis {
            sequence_length: 6,
            gc_content: 16.67,
            nuc_freq: BTreeMap::from([('A', 66.67), ('G', 16.67), ('T', 16.67)]),
            codon_freq: BTreeMap::from([("ATG".to_string(), 50.0), ("AAA".to_string(), 50.0)]),
            protein_seq: "MK".to_string(),
        });
        assert!(record.is_analyzed());
        assert_eq!(record.sequence_length, Some(6));
        assert_eq!(record.protein_seq.as_deref(), Some("MK"));
    }
}
