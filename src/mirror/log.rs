//! # Log-only and No-op Sinks

use std::path::Path;

use super::errors::MirrorResult;
use super::sink::MirrorSink;

/// Sink that records each publish in the log. Server default.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogSink;

impl MirrorSink for LogSink {
    fn publish(&self, path: &Path, message: &str) -> MirrorResult<()> {
        tracing::info!("mirror: {} ({})", message, path.display());
        Ok(())
    }
}

/// Sink that does nothing at all
#[derive(Debug, Clone, Copy, Default)]
pub struct NullSink;

impl MirrorSink for NullSink {
    fn publish(&self, _path: &Path, _message: &str) -> MirrorResult<()> {
        Ok(())
    }
}
