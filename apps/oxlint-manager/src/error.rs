//! Error types for the store, the lint runner, the HTTP service and the client.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use std::path::PathBuf;
use thiserror::Error;

use crate::models::ErrorBody;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("could not read {}: {source}", .path.display())]
    Unreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{} is not valid JSON: {source}", .path.display())]
    Unparsable {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    #[error("{} holds a JSON {kind}, expected an object", .path.display())]
    NotAnObject { path: PathBuf, kind: &'static str },

    #[error("config must be a JSON object, got {0}")]
    InvalidDocument(&'static str),

    #[error("could not write {}: {source}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl StoreError {
    /// True for the read-side failures (missing file, bad JSON, wrong shape).
    pub fn is_unreadable(&self) -> bool {
        matches!(
            self,
            StoreError::Unreadable { .. }
                | StoreError::Unparsable { .. }
                | StoreError::NotAnObject { .. }
        )
    }
}

#[derive(Debug, Error)]
pub enum RunnerError {
    #[error("failed to start lint command '{program}': {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Could not read {file}")]
    ReadConfig {
        file: String,
        #[source]
        source: StoreError,
    },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Could not write config: {0}")]
    WriteConfig(#[source] StoreError),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            ApiError::ReadConfig { source, .. } => {
                tracing::error!("Config read failed: {}", source);
                let body = Json(ErrorBody {
                    error: self.to_string(),
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
            ApiError::InvalidRequest(msg) => {
                tracing::warn!("Rejected config update: {}", msg);
                (StatusCode::BAD_REQUEST, self.to_string()).into_response()
            }
            ApiError::WriteConfig(e) => {
                tracing::error!("Config write failed: {}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()).into_response()
            }
            ApiError::Internal(msg) => {
                tracing::error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string()).into_response()
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("unexpected response: {0}")]
    Decode(String),
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ControllerError {
    #[error("another operation is in progress")]
    Busy,
}
