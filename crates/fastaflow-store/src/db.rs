use std::fs;
use std::path::Path;

use chrono::{DateTime, Utc};
use fastaflow_core::record::{Analysis, SequenceRecord};
use rusqlite::types::Type;
use rusqlite::{params, params_from_iter, Connection, Result as SqlResult};

use crate::StoreError;

const RECORD_COLUMNS: &str = "id, description, sequence, filepath, \
     sequence_length, gc_content, nuc_freq, codon_freq, protein_seq, upload_date";

/// Open (or create) the sequence database at `path` and ensure the
/// schema exists. Parent directories are created as needed.
pub fn open_db(path: impl AsRef<Path>) -> Result<Connection, StoreError> {
    let path = path.as_ref();
    if let Some(dir) = path.parent() {
        if !dir.as_os_str().is_empty() {
            fs::create_dir_all(dir)?;
        }
    }
    let conn = Connection::open(path)?;
    init_db(&conn)?;
    Ok(conn)
}

/// Create the sequences table if it does not exist.
pub fn init_db(conn: &Connection) -> SqlResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS sequences (
            id              TEXT PRIMARY KEY,
            description     TEXT NOT NULL,
            sequence        TEXT NOT NULL,
            filepath        TEXT NOT NULL,
            sequence_length INTEGER,
            gc_content      REAL,
            nuc_freq        TEXT,
            codon_freq      TEXT,
            protein_seq     TEXT,
            upload_date     TEXT NOT NULL
        );
        CREATE INDEX IF NOT EXISTS idx_sequences_description ON sequences(description);",
    )
}

/// Insert a record for `id` unless one is already stored, then return
/// the surviving row. An existing record is returned unchanged: its
/// description, sequence and filepath are never overwritten. The
/// insert is a single `INSERT OR IGNORE`, so two callers racing on the
/// same identifier converge on one row and the loser reads it back.
pub fn upsert(
    conn: &Connection,
    id: &str,
    description: &str,
    sequence: &str,
    filepath: &str,
) -> SqlResult<SequenceRecord> {
    let changed = conn.execute(
        "INSERT OR IGNORE INTO sequences (id, description, sequence, filepath, upload_date)
         VALUES (?1, ?2, ?3, ?4, ?5)",
        params![id, description, sequence, filepath, Utc::now().to_rfc3339()],
    )?;
    if changed == 0 {
        log::info!("sequence {id} already stored, reusing existing entry");
    }
    get_by_id(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)
}

fn get_by_id(conn: &Connection, id: &str) -> SqlResult<Option<SequenceRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM sequences WHERE id = ?1"
    ))?;
    let mut rows = stmt.query_map(params![id], row_to_record)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Fetch all records whose id is in `ids`. Identifiers with no stored
/// record are simply absent from the result; order is unspecified.
pub fn get_by_ids(conn: &Connection, ids: &[String]) -> SqlResult<Vec<SequenceRecord>> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let placeholders = vec!["?"; ids.len()].join(", ");
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM sequences WHERE id IN ({placeholders})"
    ))?;
    let rows = stmt.query_map(params_from_iter(ids.iter()), row_to_record)?;
    let mut records = Vec::new();
    for row in rows {
        records.push(row?);
    }
    Ok(records)
}

/// Point lookup by full header line, used when rendering charts for a
/// single record.
pub fn get_by_description(conn: &Connection, description: &str) -> SqlResult<Option<SequenceRecord>> {
    let mut stmt = conn.prepare(&format!(
        "SELECT {RECORD_COLUMNS} FROM sequences WHERE description = ?1"
    ))?;
    let mut rows = stmt.query_map(params![description], row_to_record)?;
    match rows.next() {
        Some(row) => Ok(Some(row?)),
        None => Ok(None),
    }
}

/// Write one analysis bundle back to its record. All derived columns
/// are set in a single statement, keeping them populated as a group.
/// Returns false when `id` is not in the store.
pub fn apply_analysis(conn: &Connection, id: &str, analysis: &Analysis) -> Result<bool, StoreError> {
    let nuc_freq = serde_json::to_string(&analysis.nuc_freq)?;
    let codon_freq = serde_json::to_string(&analysis.codon_freq)?;
    let changed = conn.execute(
        "UPDATE sequences
         SET sequence_length = ?1, gc_content = ?2, nuc_freq = ?3,
             codon_freq = ?4, protein_seq = ?5
         WHERE id = ?6",
        params![
            analysis.sequence_length as i64,
            analysis.gc_content,
            nuc_freq,
            codon_freq,
            analysis.protein_seq,
            id,
        ],
    )?;
    Ok(changed > 0)
}

/// Delete every stored record. Returns the number of rows removed.
/// Discarding externally cached chart images is the caller's side of
/// the contract; see [`crate::ingest::reset`].
pub fn clear_all(conn: &Connection) -> SqlResult<usize> {
    conn.execute("DELETE FROM sequences", [])
}

fn row_to_record(row: &rusqlite::Row) -> SqlResult<SequenceRecord> {
    let raw_date: String = row.get(9)?;
    let upload_date = DateTime::parse_from_rfc3339(&raw_date)
        .map(|dt| dt.with_timezone(&Utc))
        .map_err(|e| rusqlite::Error::FromSqlConversionFailure(9, Type::Text, Box::new(e)))?;

    Ok(SequenceRecord {
        id: row.get(0)?,
        description: row.get(1)?,
        sequence: row.get(2)?,
        filepath: row.get(3)?,
        sequence_length: row.get::<_, Option<i64>>(4)?.map(|n| n as usize),
        gc_content: row.get(5)?,
        nuc_freq: json_column(row, 6)?,
        codon_freq: json_column(row, 7)?,
        protein_seq: row.get(8)?,
        upload_date,
    })
}

fn json_column<T: serde::de::DeserializeOwned>(
    row: &rusqlite::Row,
    idx: usize,
) -> SqlResult<Option<T>> {
    let raw: Option<String> = row.get(idx)?;
    match raw {
        Some(text) => serde_json::from_str(&text)
            .map(Some)
            .map_err(|e| rusqlite::Error::FromSqlConversionFailure(idx, Type::Text, Box::new(e))),
        None => Ok(None),
    }
}
