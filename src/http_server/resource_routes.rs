//! Resource HTTP Routes
//!
//! One GET/POST endpoint pair per configured resource, plus the JSON 404
//! fallback for everything outside the route table. Handlers are stateless:
//! every GET reads the file fresh, every POST rewrites it whole.

use std::collections::HashMap;
use std::sync::Arc;

use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde::Serialize;
use serde_json::Value;

use crate::config::{Config, WriteMode};
use crate::mirror::MirrorSink;
use crate::store::{CsvStore, Record};

use super::errors::{ApiError, ApiResult, ErrorResponse};

// ==================
// Shared State
// ==================

/// One configured resource bound to its store
pub struct ResourceHandle {
    pub file: String,
    pub mode: WriteMode,
    pub store: CsvStore,
}

/// API state shared across handlers
pub struct ApiState {
    resources: HashMap<String, ResourceHandle>,
    mirror: Arc<dyn MirrorSink>,
}

impl ApiState {
    pub fn from_config(config: &Config, mirror: Arc<dyn MirrorSink>) -> Self {
        let resources = config
            .resources
            .iter()
            .map(|resource| {
                let handle = ResourceHandle {
                    file: resource.file.clone(),
                    mode: resource.mode,
                    store: CsvStore::new(resource.file_path(&config.data_dir)),
                };
                (resource.name.clone(), handle)
            })
            .collect();

        Self { resources, mirror }
    }

    fn resource(&self, name: &str) -> ApiResult<&ResourceHandle> {
        self.resources
            .get(name)
            .ok_or_else(|| ApiError::UnknownResource(name.to_string()))
    }

    /// Best-effort mirror notification. Failures are logged, never returned.
    fn notify_mirror(&self, handle: &ResourceHandle) {
        let message = format!("Update {} via server", handle.file);
        if let Err(e) = self.mirror.publish(handle.store.path(), &message) {
            tracing::warn!("mirror publish failed for {}: {}", handle.file, e);
        }
    }
}

// ==================
// Response Types
// ==================

#[derive(Debug, Serialize)]
pub struct DataResponse {
    pub success: bool,
    pub data: Vec<Record>,
}

#[derive(Debug, Serialize)]
pub struct SaveResponse {
    pub success: bool,
    pub message: String,
}

// ==================
// Resource Routes
// ==================

/// Create one GET/POST route pair per configured resource
pub fn resource_routes(config: &Config, state: Arc<ApiState>) -> Router {
    let mut router: Router<Arc<ApiState>> = Router::new();

    for resource in &config.resources {
        let get_name = resource.name.clone();
        let post_name = resource.name.clone();

        router = router
            .route(
                &resource.data_path(),
                get(move |state: State<Arc<ApiState>>| read_resource(state, get_name.clone())),
            )
            .route(
                &resource.save_path(),
                post(move |state: State<Arc<ApiState>>, body: Bytes| {
                    save_resource(state, post_name.clone(), body)
                }),
            );
    }

    router.with_state(state)
}

/// JSON 404 for anything outside the route table
pub async fn not_found_handler() -> (StatusCode, Json<ErrorResponse>) {
    (
        StatusCode::NOT_FOUND,
        Json(ErrorResponse {
            success: false,
            error: "Not found".to_string(),
        }),
    )
}

// ==================
// Handlers
// ==================

async fn read_resource(
    State(state): State<Arc<ApiState>>,
    name: String,
) -> ApiResult<Json<DataResponse>> {
    let handle = state.resource(&name)?;
    let records = handle.store.read()?;
    tracing::debug!("read {} rows from {}", records.len(), handle.file);

    Ok(Json(DataResponse {
        success: true,
        data: records,
    }))
}

async fn save_resource(
    State(state): State<Arc<ApiState>>,
    name: String,
    body: Bytes,
) -> ApiResult<Json<SaveResponse>> {
    let handle = state.resource(&name)?;
    let records = parse_save_body(&body)?;

    match handle.mode {
        WriteMode::Replace => handle.store.write(&records)?,
        WriteMode::Append => handle.store.append_and_merge(&records)?,
    }
    tracing::debug!("saved {} rows to {}", records.len(), handle.file);

    state.notify_mirror(handle);

    Ok(Json(SaveResponse {
        success: true,
        message: "Data saved successfully".to_string(),
    }))
}

/// Parse a `{ "data": [...] }` request body into records
///
/// The body must be valid JSON carrying a `data` array of objects; anything
/// else is rejected before the file is touched.
fn parse_save_body(body: &[u8]) -> ApiResult<Vec<Record>> {
    let payload: Value =
        serde_json::from_slice(body).map_err(|e| ApiError::Parse(e.to_string()))?;

    let data = payload
        .get("data")
        .cloned()
        .ok_or_else(|| ApiError::Validation("Request body is missing the `data` field".to_string()))?;

    if !data.is_array() {
        return Err(ApiError::Validation("Data must be an array".to_string()));
    }

    serde_json::from_value(data)
        .map_err(|_| ApiError::Validation("Data must be an array of objects".to_string()))
}
