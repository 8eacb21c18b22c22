//! # HTTP Server Module
//!
//! Axum router and handlers for the dashboard API: one GET/POST endpoint
//! pair per configured resource, a health check, permissive CORS, and a
//! JSON `{ success, ... }` envelope on every response.

pub mod errors;
pub mod resource_routes;
pub mod server;

pub use errors::{ApiError, ErrorResponse};
pub use server::HttpServer;
