pub mod detect;
pub mod fasta;

use thiserror::Error;

/// Failure while obtaining FASTA text. Content itself never fails to
/// parse: malformed input simply yields fewer (or zero) records, and
/// the caller decides how to react.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub use fasta::{parse, parse_path, FastaRecord};
