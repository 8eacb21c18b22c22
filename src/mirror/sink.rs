//! # Mirror Sink Trait

use std::path::Path;

use super::errors::MirrorResult;

/// Collaborator notified after a successful write
///
/// Implementations push the file at `path` to a remote host, using `message`
/// as the change description. Callers treat the result as log-only.
pub trait MirrorSink: Send + Sync + std::fmt::Debug {
    fn publish(&self, path: &Path, message: &str) -> MirrorResult<()>;
}
