//! # Storage Error Types
//!
//! Errors raised by snapshot slots.
//!
//! ## Error Flow
//! ```text
//! std::io::Error ──► StorageError::Io ──► ApiError (STORAGE_ERROR)
//! bad key        ──► StorageError::InvalidKey
//! ```
//!
//! The cart store treats every one of these as best-effort: it logs and
//! keeps its in-memory state.

use std::path::PathBuf;

use thiserror::Error;

/// Snapshot storage errors.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the backing file failed.
    ///
    /// ## When This Occurs
    /// - Data directory not writable
    /// - Disk full
    /// - File removed between write and rename
    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The key cannot be used as a slot name.
    ///
    /// Keys must be non-empty and limited to ASCII letters, digits, `-`,
    /// `_` and `.` (not starting with `.`) so they map to a single file.
    #[error("Invalid storage key: {0:?}")]
    InvalidKey(String),

    /// A slot's content is not valid UTF-8.
    #[error("Slot {key} does not hold UTF-8 text")]
    NotText { key: String },
}

impl StorageError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StorageError::Io {
            path: path.into(),
            source,
        }
    }
}

/// Convenience type alias for Results with StorageError.
pub type StorageResult<T> = Result<T, StorageError>;
