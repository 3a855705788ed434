//! CLI argument parsing via `clap`.

use crate::models::{Category, Severity};
use clap::{Parser, Subcommand};

pub const DEFAULT_URL: &str = "http://127.0.0.1:3000";

#[derive(Parser)]
#[command(
    name = "oxlint-manager",
    version,
    about = "Local web UI backend for editing .oxlintrc.json",
    long_about = "oxlint-manager — serves a small API to read and edit an oxlint config file and to re-run the linter.\n\nSettings precedence: CLI > oxlint-manager.toml > defaults.",
    after_help = "Examples:\n  oxlint-manager serve --port 3000\n  oxlint-manager lint --output json\n  oxlint-manager set-category style warn\n  oxlint-manager set-rule no-console off --url http://127.0.0.1:3000",
    arg_required_else_help = true
)]
/// Top-level CLI options and subcommands.
pub struct Cli {
    #[command(subcommand)]
    pub cmd: Commands,
}

#[derive(Subcommand)]
/// Server, one-shot lint, and client subcommands.
pub enum Commands {
    /// Show version
    #[command(about = "Show version", long_about = "Print the current oxlint-manager version.")]
    Version,
    /// Run the HTTP service
    #[command(
        about = "Start the config/lint service",
        long_about = "Serve GET/PUT /config, GET /lint and the UI bundle. The lint command comes from settings only.",
        after_help = "Examples:\n  oxlint-manager serve\n  oxlint-manager serve --config .oxlintrc.json --dist web/dist --port 4000"
    )]
    Serve {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Config file relative to repo root (default: .oxlintrc.json)")]
        config: Option<String>,
        #[arg(long, help = "UI bundle directory relative to repo root (default: dist)")]
        dist: Option<String>,
        #[arg(long, help = "Bind host (default: 127.0.0.1)")]
        host: Option<String>,
        #[arg(long, help = "Bind port (default: 3000)")]
        port: Option<u16>,
    },
    /// Run the lint command once and print its summary
    #[command(
        about = "Run lint once",
        long_about = "Run the configured lint command and print the extracted summary. Exits 1 when errors are reported.",
        after_help = "Examples:\n  oxlint-manager lint\n  oxlint-manager lint --output json"
    )]
    Lint {
        #[arg(long, help = "Repository root (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Print current selectors from a running service
    #[command(
        about = "Show categories and rules",
        long_about = "Load the config from a running service and print every category and rule severity."
    )]
    Show {
        #[arg(long, default_value = DEFAULT_URL, help = "Service base URL")]
        url: String,
        #[arg(long, help = "Repository root used to read [catalog] (default: current dir)")]
        repo_root: Option<String>,
        #[arg(long, help = "Output mode: human|json (default: human)")]
        output: Option<String>,
    },
    /// Change one rule's severity through a running service
    #[command(
        about = "Set a rule severity",
        after_help = "Examples:\n  oxlint-manager set-rule eqeqeq error"
    )]
    SetRule {
        #[arg(help = "Rule name, e.g. no-console")]
        rule: String,
        #[arg(value_enum)]
        severity: Severity,
        #[arg(long, default_value = DEFAULT_URL, help = "Service base URL")]
        url: String,
        #[arg(long, help = "Repository root used to read [catalog] (default: current dir)")]
        repo_root: Option<String>,
    },
    /// Change a category's severity (cascades to its rules)
    #[command(
        about = "Set a category severity",
        long_about = "Set a category severity. Every catalog rule in the category is rewritten to the same severity.",
        after_help = "Examples:\n  oxlint-manager set-category pedantic warn"
    )]
    SetCategory {
        #[arg(value_enum)]
        category: Category,
        #[arg(value_enum)]
        severity: Severity,
        #[arg(long, default_value = DEFAULT_URL, help = "Service base URL")]
        url: String,
        #[arg(long, help = "Repository root used to read [catalog] (default: current dir)")]
        repo_root: Option<String>,
    },
}
