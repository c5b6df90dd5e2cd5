//! Upload, analysis and reset workflows over the record store.

use std::path::Path;

use fastaflow_core::{stats, SequenceRecord};
use fastaflow_formats::fasta;
use rusqlite::Connection;

use crate::{db, StoreError};

/// Parse the FASTA file at `path` and upsert every record, all inside
/// one transaction: a persistence failure rolls the whole import back.
/// Identifiers seen in earlier uploads reuse their stored rows. A file
/// without headers imports nothing and returns an empty vec.
pub fn store_fasta_file(
    conn: &Connection,
    path: impl AsRef<Path>,
) -> Result<Vec<SequenceRecord>, StoreError> {
    let path = path.as_ref();
    let parsed = fasta::parse_path(path)?;
    let filepath = path.to_string_lossy();

    let tx = conn.unchecked_transaction()?;
    let mut records = Vec::with_capacity(parsed.len());
    for rec in &parsed {
        records.push(db::upsert(&tx, &rec.id, &rec.description, &rec.sequence, &filepath)?);
    }
    tx.commit()?;

    log::info!("stored {} sequences from {}", records.len(), path.display());
    Ok(records)
}

/// Run the statistics engine over the selected records and write each
/// result bundle back on its own: a failure on one record leaves the
/// ones already updated in place. Identifiers with no stored record
/// are skipped silently; records not selected are untouched. Returns
/// the updated records.
pub fn analyze_selected(
    conn: &Connection,
    ids: &[String],
) -> Result<Vec<SequenceRecord>, StoreError> {
    let mut records = db::get_by_ids(conn, ids)?;
    for record in &mut records {
        let analysis = stats::analyze(&record.sequence);
        db::apply_analysis(conn, &record.id, &analysis)?;
        record.apply(analysis);
    }
    Ok(records)
}

/// Delete every stored record and notify the rendering side, so cached
/// chart images are discarded together with the records they belong
/// to. Returns the number of records removed.
pub fn reset(conn: &Connection, discard_rendered: impl FnOnce()) -> Result<usize, StoreError> {
    let removed = db::clear_all(conn)?;
    discard_rendered();
    log::info!("reset removed {removed} stored sequences");
    Ok(removed)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn test_db() -> Connection {
        let conn = Connection::open_in_memory().unwrap();
        db::init_db(&conn).unwrap();
        conn
    }

    fn fasta_file(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "{content}").unwrap();
        file
    }

    #[test]
    fn test_store_fasta_file() {
        let conn = test_db();
        let file = fasta_file(">seq1 first\nATGC\n>seq2 second\nGGCC\n");

        let records = store_fasta_file(&conn, file.path()).unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].id, "seq1");
        assert_eq!(records[0].description, ">seq1 first");
        assert_eq!(records[1].sequence, "GGCC");
        assert_eq!(records[0].filepath, file.path().to_string_lossy());
    }

    #[test]
    fn test_reimport_reuses_records() {
        let conn = test_db();
        let file = fasta_file(">seq1\nATGC\n");

        let first = store_fasta_file(&conn, file.path()).unwrap();
        let second = store_fasta_file(&conn, file.path()).unwrap();
        assert_eq!(first, second);
        assert_eq!(db::get_by_ids(&conn, &["seq1".to_string()]).unwrap().len(), 1);
    }

    #[test]
    fn test_file_without_headers_imports_nothing() {
        let conn = test_db();
        let file = fasta_file("no fasta content here\n");
        assert!(store_fasta_file(&conn, file.path()).unwrap().is_empty());
    }

    #[test]
    fn test_missing_file_fails_with_parse_error() {
        let conn = test_db();
        let err = store_fasta_file(&conn, "/no/such/upload.fasta").unwrap_err();
        assert!(matches!(err, StoreError::Parse(_)));
    }

    #[test]
    fn test_analyze_selected_updates_only_selection() {
        let conn = test_db();
        let file = fasta_file(">seq1\nATGAAATAG\n>seq2\nGGCC\n");
        store_fasta_file(&conn, file.path()).unwrap();

        let ids = vec!["seq1".to_string(), "missing".to_string()];
        let updated = analyze_selected(&conn, &ids).unwrap();
        assert_eq!(updated.len(), 1);
        assert_eq!(updated[0].protein_seq.as_deref(), Some("MK*"));
        assert_eq!(updated[0].sequence_length, Some(9));

        // The unselected record is left completely untouched.
        let others = db::get_by_ids(&conn, &["seq2".to_string()]).unwrap();
        assert!(!others[0].is_analyzed());
    }

    #[test]
    fn test_analyze_selected_matches_stored_state() {
        let conn = test_db();
        let file = fasta_file(">seq1\nATGAAATAG\n");
        store_fasta_file(&conn, file.path()).unwrap();

        let updated = analyze_selected(&conn, &["seq1".to_string()]).unwrap();
        let stored = db::get_by_ids(&conn, &["seq1".to_string()]).unwrap();
        assert_eq!(updated, stored);
    }

    #[test]
    fn test_reset_clears_store_and_signals_renderer() {
        let conn = test_db();
        let file = fasta_file(">seq1\nATGC\n>seq2\nGGCC\n");
        store_fasta_file(&conn, file.path()).unwrap();

        let mut discarded = false;
        let removed = reset(&conn, || discarded = true).unwrap();
        assert_eq!(removed, 2);
        assert!(discarded);
        assert!(db::get_by_ids(&conn, &["seq1".to_string()]).unwrap().is_empty());
    }
}
