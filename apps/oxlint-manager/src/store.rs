//! Read and atomically overwrite the linter config file on disk.
//!
//! `write` never returns its own payload: after persisting it re-reads the
//! file, so callers always see what storage actually holds. There is no
//! locking between writers; the last rename wins.

use crate::error::StoreError;
use crate::models::document::json_kind;
use crate::models::ConfigDocument;
use serde_json::Value as Json;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// File name used in user-facing messages.
    pub fn file_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.path.to_string_lossy().to_string())
    }

    /// Load the current document.
    pub fn read(&self) -> Result<ConfigDocument, StoreError> {
        let data = fs::read_to_string(&self.path).map_err(|source| StoreError::Unreadable {
            path: self.path.clone(),
            source,
        })?;
        let value: Json = serde_json::from_str(&data).map_err(|source| StoreError::Unparsable {
            path: self.path.clone(),
            source,
        })?;
        ConfigDocument::from_value(value).map_err(|kind| StoreError::NotAnObject {
            path: self.path.clone(),
            kind,
        })
    }

    /// Replace the stored document with `doc`, then return a fresh `read()`.
    ///
    /// Non-objects are rejected before anything touches the disk.
    pub fn write(&self, doc: &Json) -> Result<ConfigDocument, StoreError> {
        if !doc.is_object() {
            return Err(StoreError::InvalidDocument(json_kind(doc)));
        }
        let out = serde_json::to_string_pretty(doc).map_err(|e| StoreError::Write {
            path: self.path.clone(),
            source: e.into(),
        })?;
        self.persist(out.as_bytes())
            .map_err(|source| StoreError::Write {
                path: self.path.clone(),
                source,
            })?;
        tracing::debug!(path = %self.path.display(), bytes = out.len(), "config written");
        self.read()
    }

    /// Write through a sibling temp file and rename it over the target,
    /// keeping the target's permissions when it already exists.
    fn persist(&self, bytes: &[u8]) -> std::io::Result<()> {
        let dir = match self.path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let mut tmp = tempfile::NamedTempFile::new_in(dir)?;
        tmp.write_all(bytes)?;
        if let Ok(meta) = fs::metadata(&self.path) {
            tmp.as_file().set_permissions(meta.permissions())?;
        }
        tmp.as_file().sync_all()?;
        tmp.persist(&self.path).map_err(|e| e.error)?;
        Ok(())
    }
}
