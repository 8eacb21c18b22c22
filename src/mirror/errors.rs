//! # Mirror Sink Errors

use thiserror::Error;

/// Result type for mirror operations
pub type MirrorResult<T> = Result<T, MirrorError>;

/// Mirror sink errors. Never propagated past the write path; logged only.
#[derive(Debug, Clone, Error)]
pub enum MirrorError {
    #[error("Publish failed: {0}")]
    Publish(String),
}
