//! HTTP service exposing the config store and the lint runner.
//!
//! - `GET /config` -> `{ contents }`
//! - `PUT /config` -> `{ message, contents }` (contents re-read from disk)
//! - `GET /lint`   -> `{ summary, fullOutput }`
//!
//! Every other path is served from the UI bundle directory, falling back
//! to its `index.html`.

use axum::{
    body::Bytes,
    extract::State,
    routing::get,
    Json, Router,
};
use serde_json::Value;
use std::path::Path;
use std::sync::Arc;
use tower_http::services::{ServeDir, ServeFile};
use tower_http::trace::TraceLayer;

use crate::error::{ApiError, StoreError};
use crate::lint::LintRunner;
use crate::models::document::json_kind;
use crate::models::{ConfigResponse, LintReport, UpdateResponse};
use crate::store::ConfigStore;

pub const UPDATE_MESSAGE: &str = "Config updated successfully";

pub struct AppState {
    pub store: ConfigStore,
    pub runner: LintRunner,
}

impl AppState {
    pub fn new(store: ConfigStore, runner: LintRunner) -> Self {
        Self { store, runner }
    }
}

/// Build the router. Static assets are mounted only when `dist` is given.
pub fn router(state: Arc<AppState>, dist: Option<&Path>) -> Router {
    let app = Router::new()
        .route("/config", get(get_config).put(put_config))
        .route("/lint", get(get_lint));
    let app = match dist {
        Some(dir) => {
            let assets = ServeDir::new(dir).fallback(ServeFile::new(dir.join("index.html")));
            app.fallback_service(assets)
        }
        None => app,
    };
    app.layer(TraceLayer::new_for_http()).with_state(state)
}

/// Run a blocking store operation off the async executor.
async fn with_store<T, F>(state: &Arc<AppState>, f: F) -> Result<T, ApiError>
where
    T: Send + 'static,
    F: FnOnce(&ConfigStore) -> T + Send + 'static,
{
    let store = state.store.clone();
    tokio::task::spawn_blocking(move || f(&store))
        .await
        .map_err(|e| ApiError::Internal(format!("store task failed: {}", e)))
}

pub async fn get_config(
    State(state): State<Arc<AppState>>,
) -> Result<Json<ConfigResponse>, ApiError> {
    let contents = with_store(&state, |s| s.read())
        .await?
        .map_err(|source| ApiError::ReadConfig {
            file: state.store.file_name(),
            source,
        })?;
    Ok(Json(ConfigResponse {
        contents: Some(contents),
    }))
}

pub async fn put_config(
    State(state): State<Arc<AppState>>,
    body: Bytes,
) -> Result<Json<UpdateResponse>, ApiError> {
    let value: Value = serde_json::from_slice(&body)
        .map_err(|e| ApiError::InvalidRequest(format!("body is not valid JSON: {}", e)))?;
    if !value.is_object() {
        let kind = json_kind(&value);
        return Err(ApiError::InvalidRequest(
            StoreError::InvalidDocument(kind).to_string(),
        ));
    }
    let contents = with_store(&state, move |s| s.write(&value))
        .await?
        .map_err(|e| match e {
            StoreError::InvalidDocument(_) => ApiError::InvalidRequest(e.to_string()),
            other => ApiError::WriteConfig(other),
        })?;
    tracing::info!(path = %state.store.path().display(), "config updated");
    Ok(Json(UpdateResponse {
        message: UPDATE_MESSAGE.to_string(),
        contents,
    }))
}

/// Always answers 200; a spawn failure is reported in the `error` field.
pub async fn get_lint(State(state): State<Arc<AppState>>) -> Json<LintReport> {
    match state.runner.run().await {
        Ok(report) => Json(report),
        Err(e) => {
            tracing::error!("Lint run failed: {}", e);
            Json(LintReport::spawn_failed(e.to_string()))
        }
    }
}
