//! # Mirror Sink
//!
//! Optional collaborator notified after a successful write so the file's
//! content can be pushed to a remote host. Publishes are best-effort: a
//! failing sink is logged and swallowed, never surfacing to the HTTP caller.

pub mod errors;
pub mod log;
pub mod sink;

pub use errors::{MirrorError, MirrorResult};
pub use log::{LogSink, NullSink};
pub use sink::MirrorSink;
