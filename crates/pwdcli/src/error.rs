//! Store errors

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by the record store and query engine
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Could not determine home directory")]
    HomeDirUnavailable,

    #[error("IO error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Malformed store {}: {source}", path.display())]
    Format {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("index out of range: {index} (store holds {len} entries)")]
    IndexOutOfRange { index: i64, len: usize },
}

impl StoreError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Missing, unreadable or unwritable store, or no home directory
    pub fn is_io(&self) -> bool {
        matches!(self, Self::Io { .. } | Self::HomeDirUnavailable)
    }

    /// Store content is not an array of records
    pub fn is_format(&self) -> bool {
        matches!(self, Self::Format { .. })
    }
}

pub type Result<T> = std::result::Result<T, StoreError>;
