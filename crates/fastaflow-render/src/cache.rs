use std::collections::HashMap;

use fastaflow_core::{stats, SequenceRecord};

use crate::chart::{bar_chart, gc_line_chart, pie_chart, RenderedChart};

/// The chart set rendered for one analyzed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordCharts {
    /// Pie chart of the stored nucleotide frequency table.
    pub nuc_freq: RenderedChart,
    /// Bar chart of amino-acid frequencies, computed at render time
    /// from the stored protein translation.
    pub amino_freq: RenderedChart,
    /// Running GC percentage over the raw sequence.
    pub gc_content: RenderedChart,
}

/// Render the full chart set for a record. Returns `None` until the
/// record has been through an analysis pass; derived fields are
/// populated as a group, so the stored frequency table and protein are
/// either both present or both absent.
pub fn charts_for_record(record: &SequenceRecord) -> Option<RecordCharts> {
    let nuc_freq = record.nuc_freq.as_ref()?;
    let protein_seq = record.protein_seq.as_deref()?;
    let header = &record.description;

    Some(RecordCharts {
        nuc_freq: pie_chart(&format!("Nucleotide frequencies for {header}"), nuc_freq),
        amino_freq: bar_chart(
            &format!("Amino acid frequencies for {header}"),
            &stats::amino_acid_frequency(protein_seq),
        ),
        gc_content: gc_line_chart(&format!("GC content for {header}"), &record.sequence),
    })
}

/// Rendered charts keyed by record description, filled on demand.
/// Cleared wholesale when the store is reset, via the reset workflow's
/// callback.
#[derive(Debug, Default)]
pub struct ChartCache {
    entries: HashMap<String, RecordCharts>,
}

impl ChartCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Cached charts for `record`, rendering them on first request.
    /// Returns `None` for records without analysis results.
    pub fn get_or_render(&mut self, record: &SequenceRecord) -> Option<&RecordCharts> {
        if !self.entries.contains_key(&record.description) {
            let charts = charts_for_record(record)?;
            self.entries.insert(record.description.clone(), charts);
        }
        self.entries.get(&record.description)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Drop every cached chart.
    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn analyzed_record() -> SequenceRecord {
        let mut record =
            SequenceRecord::new("seq1", ">seq1 test", "ATGAAATAG", "/tmp/upload.fasta");
        record.apply(stats::analyze("ATGAAATAG"));
        record
    }

    #[test]
    fn test_unanalyzed_record_has_no_charts() {
        let record = SequenceRecord::new("seq1", ">seq1", "ATGC", "f");
        assert!(charts_for_record(&record).is_none());

        let mut cache = ChartCache::new();
        assert!(cache.get_or_render(&record).is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_charts_for_analyzed_record() {
        let charts = charts_for_record(&analyzed_record()).unwrap();
        assert_eq!(charts.nuc_freq.title, "Nucleotide frequencies for >seq1 test");
        assert_eq!(charts.amino_freq.title, "Amino acid frequencies for >seq1 test");
        assert_eq!(charts.gc_content.title, "GC content for >seq1 test");
        assert!(charts.gc_content.svg.contains("<path"));
    }

    #[test]
    fn test_cache_renders_once_per_description() {
        let record = analyzed_record();
        let mut cache = ChartCache::new();

        let first = cache.get_or_render(&record).unwrap().clone();
        let second = cache.get_or_render(&record).unwrap();
        assert_eq!(&first, second);
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_clear_discards_everything() {
        let mut cache = ChartCache::new();
        cache.get_or_render(&analyzed_record()).unwrap();
        assert_eq!(cache.len(), 1);

        cache.clear();
        assert!(cache.is_empty());
    }
}
