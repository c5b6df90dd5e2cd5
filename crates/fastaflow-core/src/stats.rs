//! Pure statistics over sequence strings.
//!
//! Every function here is deterministic and free of hidden state, so
//! results can be recomputed and compared byte-for-byte. Percentages
//! are `(count / total) * 100` rounded half-away-from-zero to two
//! decimal places; each table entry rounds independently, so a table
//! need not sum to exactly 100.00.

use std::collections::BTreeMap;

use crate::codon::CodonTable;
use crate::record::Analysis;

/// Round to two decimal places, half away from zero (`f64::round`).
fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Percentage table over pre-counted occurrences.
fn percentages<K: Ord>(counts: BTreeMap<K, usize>, total: usize) -> BTreeMap<K, f64> {
    counts
        .into_iter()
        .map(|(key, count)| (key, round2(count as f64 / total as f64 * 100.0)))
        .collect()
}

/// Per-character frequency table. Keys are exactly the distinct
/// characters observed; an empty input yields an empty table.
fn char_frequency(seq: &str) -> BTreeMap<char, f64> {
    let total = seq.chars().count();
    if total == 0 {
        return BTreeMap::new();
    }
    let mut counts = BTreeMap::new();
    for c in seq.chars() {
        *counts.entry(c).or_insert(0usize) += 1;
    }
    percentages(counts, total)
}

/// GC content as a percentage of characters that are literally `G` or
/// `C`. No case folding is performed. An empty sequence is 0.0, not an
/// error.
pub fn gc_content(seq: &str) -> f64 {
    let total = seq.chars().count();
    if total == 0 {
        return 0.0;
    }
    let gc = seq.chars().filter(|c| matches!(c, 'G' | 'C')).count();
    round2(gc as f64 / total as f64 * 100.0)
}

/// Frequency of each distinct character in `seq`, as percentages.
/// Not restricted to A/T/G/C: ambiguity codes and any other character
/// that made it through parsing are counted as-is.
pub fn nucleotide_frequency(seq: &str) -> BTreeMap<char, f64> {
    char_frequency(seq)
}

/// Frequency of each distinct full frame-0 triplet among all full
/// triplets. A trailing partial triplet is not counted; a sequence
/// shorter than one codon yields an empty table.
pub fn codon_frequency(seq: &str) -> BTreeMap<String, f64> {
    let bases: Vec<char> = seq.chars().collect();
    let mut counts = BTreeMap::new();
    let mut total = 0usize;
    for chunk in bases.chunks(3) {
        if chunk.len() == 3 {
            let codon: String = chunk.iter().collect();
            *counts.entry(codon).or_insert(0usize) += 1;
            total += 1;
        }
    }
    if total == 0 {
        return BTreeMap::new();
    }
    percentages(counts, total)
}

/// Sequence length in characters.
pub fn sequence_length(seq: &str) -> usize {
    seq.chars().count()
}

/// Translate a DNA sequence to protein: consecutive non-overlapping
/// triplets from position 0, a trailing partial triplet silently
/// dropped. Stop codons become `*`; any triplet absent from the
/// standard table becomes `?` rather than an error.
pub fn translate_to_protein(seq: &str) -> String {
    let table = CodonTable::standard();
    let bases: Vec<char> = seq.chars().collect();
    let mut protein = String::with_capacity(bases.len() / 3);

    for chunk in bases.chunks(3) {
        if chunk.len() == 3 {
            let codon: String = chunk.iter().collect();
            protein.push(table.translate_codon(&codon));
        }
    }

    protein
}

/// Frequency of each amino acid in a translated protein string, the
/// same algorithm as [`nucleotide_frequency`]. `*` and `?` count like
/// any other character; an empty protein yields an empty table.
pub fn amino_acid_frequency(protein_seq: &str) -> BTreeMap<char, f64> {
    char_frequency(protein_seq)
}

/// Cumulative GC percentage by position: for each prefix `seq[..i]`
/// with `i` in `1..=len`, the share of `G`/`C` characters seen so far.
/// Unrounded; this is the positional series behind the GC line chart.
pub fn gc_running(seq: &str) -> Vec<f64> {
    let mut series = Vec::with_capacity(seq.len());
    let mut gc = 0usize;
    for (i, c) in seq.chars().enumerate() {
        if matches!(c, 'G' | 'C') {
            gc += 1;
        }
        series.push(gc as f64 / (i + 1) as f64 * 100.0);
    }
    series
}

/// One full statistics pass over a sequence. The returned bundle is
/// applied to a record as a unit, keeping derived fields all-or-nothing.
pub fn analyze(seq: &str) -> Analysis {
    Analysis {
        sequence_length: sequence_length(seq),
        gc_content: gc_content(seq),
        nuc_freq: nucleotide_frequency(seq),
        codon_freq: codon_frequency(seq),
        protein_seq: translate_to_protein(seq),
    }
}
