//! # CSV Store
//!
//! Converts between CSV text and ordered key→value records, and binds a
//! resource's file path to read/write/append operations.
//!
//! The format is deliberately the dashboard's flat dialect: comma-separated,
//! header row first, no quoting or escaping. Cell values must not contain
//! literal commas or newlines.

pub mod codec;
pub mod errors;
pub mod file;
pub mod record;

pub use errors::{StoreError, StoreResult};
pub use file::CsvStore;
pub use record::Record;
