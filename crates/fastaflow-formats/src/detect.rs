/// Upload extensions accepted as FASTA content.
pub const ALLOWED_EXTENSIONS: [&str; 8] = [
    "fasta", "fas", "fa", "fna", "ffn", "faa", "mpfa", "frn",
];

/// Maximum accepted upload size in bytes. The upload layer enforces
/// this before any file reaches the parser.
pub const MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Check a declared filename against the FASTA extension allow-list.
/// The comparison is case-insensitive on the suffix after the last `.`;
/// names without an extension are rejected.
pub fn allowed_file(filename: &str) -> bool {
    let Some((_, ext)) = filename.rsplit_once('.') else {
        return false;
    };
    let ext = ext.to_ascii_lowercase();
    ALLOWED_EXTENSIONS.contains(&ext.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_allowed_extensions() {
        assert!(allowed_file("genome.fasta"));
        assert!(allowed_file("reads.fa"));
        assert!(allowed_file("proteins.faa"));
        assert!(allowed_file("dir.with.dots/upload.fna"));
    }

    #[test]
    fn test_extension_check_is_case_insensitive() {
        assert!(allowed_file("genome.FASTA"));
        assert!(allowed_file("reads.Fa"));
    }

    #[test]
    fn test_rejected_filenames() {
        assert!(!allowed_file("notes.txt"));
        assert!(!allowed_file("no_extension"));
        // Only the suffix after the last dot counts.
        assert!(!allowed_file("archive.fasta.gz"));
    }
}
