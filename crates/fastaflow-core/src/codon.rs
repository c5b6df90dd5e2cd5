use std::collections::HashMap;
use std::sync::OnceLock;

/// The standard genetic code (NCBI table 1): all 64 uppercase DNA
/// triplets over {A,C,G,T}, each mapping to an amino-acid single-letter
/// code or `*` for stop.
pub struct CodonTable {
    table: HashMap<&'static str, char>,
}

impl CodonTable {
    /// Shared process-wide table. Initialized on first use, read-only
    /// afterwards.
    pub fn standard() -> &'static CodonTable {
        static STANDARD: OnceLock<CodonTable> = OnceLock::new();
        STANDARD.get_or_init(|| {
            let codons = [
                ("TTT", 'F'), ("TTC", 'F'), ("TTA", 'L'), ("TTG", 'L'),
                ("CTT", 'L'), ("CTC", 'L'), ("CTA", 'L'), ("CTG", 'L'),
                ("ATT", 'I'), ("ATC", 'I'), ("ATA", 'I'), ("ATG", 'M'),
                ("GTT", 'V'), ("GTC", 'V'), ("GTA", 'V'), ("GTG", 'V'),
                ("TCT", 'S'), ("TCC", 'S'), ("TCA", 'S'), ("TCG", 'S'),
                ("CCT", 'P'), ("CCC", 'P'), ("CCA", 'P'), ("CCG", 'P'),
                ("ACT", 'T'), ("ACC", 'T'), ("ACA", 'T'), ("ACG", 'T'),
                ("GCT", 'A'), ("GCC", 'A'), ("GCA", 'A'), ("GCG", 'A'),
                ("TAT", 'Y'), ("TAC", 'Y'), ("TAA", '*'), ("TAG", '*'),
                ("CAT", 'H'), ("CAC", 'H'), ("CAA", 'Q'), ("CAG", 'Q'),
                ("AAT", 'N'), ("AAC", 'N'), ("AAA", 'K'), ("AAG", 'K'),
                ("GAT", 'D'), ("GAC", 'D'), ("GAA", 'E'), ("GAG", 'E'),
                ("TGT", 'C'), ("TGC", 'C'), ("TGA", '*'), ("TGG", 'W'),
                ("CGT", 'R'), ("CGC", 'R'), ("CGA", 'R'), ("CGG", 'R'),
                ("AGT", 'S'), ("AGC", 'S'), ("AGA", 'R'), ("AGG", 'R'),
                ("GGT", 'G'), ("GGC", 'G'), ("GGA", 'G'), ("GGG", 'G'),
            ];

            CodonTable {
                table: codons.into_iter().collect(),
            }
        })
    }

    /// Translate a single codon to an amino acid, `*` for stop.
    /// Lookup is case-sensitive against the uppercase keys; any triplet
    /// not in the table yields `?`.
    pub fn translate_codon(&self, codon: &str) -> char {
        self.table.get(codon).copied().unwrap_or('?')
    }
}
