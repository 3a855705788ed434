//! oxlint-manager core library.
//!
//! This crate backs a small local web UI that edits an oxlint configuration
//! file (`.oxlintrc.json`) and shows the linter's warning/error summary.
//!
//! High-level modules:
//! - `cli`: CLI argument parsing (binary uses this).
//! - `config`: Settings discovery and effective settings resolution.
//! - `store`: Read / atomic overwrite of the config file, read-after-write.
//! - `lint`: Lint command runner and summary extraction.
//! - `server`: axum router for `/config`, `/lint` and the UI bundle.
//! - `controller`: Client-side state machine that drives edits over HTTP.
//! - `catalog`: Rule-to-category table used for cascades and selectors.
//! - `models`: Config document and HTTP payload types.
//! - `output`: Human/JSON printers for CLI commands.
//! - `error`: Error enums for every layer.
//! - `utils`: Supporting helpers.
pub mod catalog;
pub mod cli;
pub mod config;
pub mod controller;
pub mod error;
pub mod lint;
pub mod models;
pub mod output;
pub mod server;
pub mod store;
pub mod utils;
