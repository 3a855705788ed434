//! Shared data models: the config document and the HTTP payloads built on it.

pub mod document;

pub use document::{Category, ConfigDocument, Severity};

use serde::{Deserialize, Serialize};

/// Summary used when the lint output carries no recognizable summary line.
pub const NO_SUMMARY: &str = "No summary found";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
/// Result of one lint run, as served by `GET /lint`.
pub struct LintReport {
    pub summary: String,
    pub full_output: String,
    /// Set only when the lint command could not be started.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl LintReport {
    /// Report served when the lint command fails to spawn.
    pub fn spawn_failed(message: impl Into<String>) -> Self {
        Self {
            summary: String::new(),
            full_output: String::new(),
            error: Some(message.into()),
        }
    }

    /// Parse the `Found N warnings and M errors` summary into counts.
    pub fn counts(&self) -> Option<(u64, u64)> {
        crate::lint::parse_counts(&self.summary)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of `GET /config`.
pub struct ConfigResponse {
    #[serde(default)]
    pub contents: Option<ConfigDocument>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Body of a successful `PUT /config`.
pub struct UpdateResponse {
    pub message: String,
    pub contents: ConfigDocument,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// JSON error body used by `GET /config` failures.
pub struct ErrorBody {
    pub error: String,
}
