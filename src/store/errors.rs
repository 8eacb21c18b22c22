//! # CSV Store Errors

use thiserror::Error;

/// Result type for store operations
pub type StoreResult<T> = Result<T, StoreError>;

/// CSV store errors
///
/// File absence on read is not an error: `CsvStore::read` maps it to an
/// empty record sequence, because absence is normal startup state.
#[derive(Debug, Clone, Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(String),
}

impl StoreError {
    /// Get HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            StoreError::Io(_) => 500,
        }
    }
}
