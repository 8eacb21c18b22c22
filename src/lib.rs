//! csvboard - a CSV-backed dashboard API server
//!
//! Named resources map to flat CSV files. Each resource gets a GET endpoint
//! that returns the file's rows as JSON records and a POST endpoint that
//! overwrites (or appends to) the file from a JSON record array. A mirror
//! sink collaborator is notified after each successful write, best-effort.

pub mod cli;
pub mod config;
pub mod http_server;
pub mod mirror;
pub mod store;
