//! Error types for loading the street table and parsing addresses

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum LoadError {
    #[error("source unavailable: cannot open {}: {source}", .path.display())]
    SourceUnavailable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("source unavailable: read failed: {0}")]
    Read(#[from] std::io::Error),

    #[error("malformed row at line {line}: {reason}")]
    MalformedRow { line: u64, reason: String },
}

impl LoadError {
    /// Whether the data could not be opened or read at all, as opposed to a
    /// bad row.
    pub fn is_source_unavailable(&self) -> bool {
        matches!(
            self,
            LoadError::SourceUnavailable { .. } | LoadError::Read(_)
        )
    }
}

#[derive(Error, Debug, PartialEq, Eq)]
pub enum AddressParseError {
    #[error("empty address")]
    Empty,

    #[error("invalid house number: {0:?}")]
    HouseNumber(String),

    #[error("missing street name in {0:?}")]
    MissingStreet(String),
}
