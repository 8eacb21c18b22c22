//! # HTTP Server
//!
//! Assembles the resource routes, health route, CORS and request tracing
//! into the served axum application.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use serde::Serialize;
use tokio::net::TcpListener;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::config::Config;
use crate::mirror::{LogSink, MirrorSink};

use super::resource_routes::{not_found_handler, resource_routes, ApiState};

/// HTTP server for the dashboard API
pub struct HttpServer {
    config: Config,
    router: Router,
}

impl HttpServer {
    /// Create a server with the default log-only mirror sink
    pub fn with_config(config: Config) -> Self {
        Self::with_mirror(config, Arc::new(LogSink))
    }

    /// Create a server with an injected mirror sink
    pub fn with_mirror(config: Config, mirror: Arc<dyn MirrorSink>) -> Self {
        let router = Self::build_router(&config, mirror);
        Self { config, router }
    }

    /// Build the combined router with all endpoints
    fn build_router(config: &Config, mirror: Arc<dyn MirrorSink>) -> Router {
        let state = Arc::new(ApiState::from_config(config, mirror));

        // The dashboard pages are served from a different origin than the
        // API, so preflight OPTIONS and permissive headers are required.
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            use tower_http::cors::AllowOrigin;
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(resource_routes(config, state))
            .fallback(not_found_handler)
            .layer(TraceLayer::new_for_http())
            .layer(cors)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Start the HTTP server (async)
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address: {}", e),
            )
        })?;

        tracing::info!("starting csvboard server on http://{}", addr);
        for resource in &self.config.resources {
            tracing::info!(
                "  {}: GET {}  POST {}",
                resource.name,
                resource.data_path(),
                resource.save_path()
            );
        }

        let listener = TcpListener::bind(addr).await?;
        axum::serve(listener, self.router)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        Ok(())
    }
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("failed to listen for shutdown signal: {}", e);
        return std::future::pending().await;
    }
    tracing::info!("shutdown signal received, stopping server");
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Health check route at the root level
pub fn health_routes() -> Router {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}
