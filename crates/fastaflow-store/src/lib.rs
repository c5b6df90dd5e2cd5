pub mod db;
pub mod ingest;

use thiserror::Error;

/// Failures crossing the store boundary. Callers get a classified
/// kind; turning it into a user-visible message is the presentation
/// layer's job.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("database error: {0}")]
    Sql(#[from] rusqlite::Error),
    #[error("failed to read FASTA input: {0}")]
    Parse(#[from] fastaflow_formats::ParseError),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("failed to encode analysis results: {0}")]
    Json(#[from] serde_json::Error),
}

pub use db::{
    apply_analysis, clear_all, get_by_description, get_by_ids, init_db, open_db, upsert,
};
pub use ingest::{analyze_selected, reset, store_fasta_file};
