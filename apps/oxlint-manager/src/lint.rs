//! Lint runner: spawns the configured lint command and scrapes its summary.
//!
//! The command is fixed by server settings (program plus argument list, no
//! shell), so nothing from an HTTP request can reach the process arguments.
//! Output is stdout followed by stderr. The exit status is ignored; only a
//! failure to spawn is an error.

use crate::error::RunnerError;
use crate::models::{LintReport, NO_SUMMARY};
use regex::Regex;
use std::path::PathBuf;
use std::sync::LazyLock;
use tokio::process::Command;

static SUMMARY_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"Found ([0-9]+) warnings? and ([0-9]+) errors?").expect("summary pattern is valid")
});

#[derive(Debug, Clone, PartialEq, Eq)]
/// Program and arguments for the external linter.
pub struct LintCommand {
    pub program: String,
    pub args: Vec<String>,
}

impl Default for LintCommand {
    fn default() -> Self {
        Self {
            program: "npx".to_string(),
            args: vec!["oxlint".to_string()],
        }
    }
}

impl LintCommand {
    /// Render for log lines and CLI notes.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

#[derive(Debug, Clone)]
pub struct LintRunner {
    command: LintCommand,
    workdir: PathBuf,
}

impl LintRunner {
    pub fn new(command: LintCommand, workdir: impl Into<PathBuf>) -> Self {
        Self {
            command,
            workdir: workdir.into(),
        }
    }

    pub fn command(&self) -> &LintCommand {
        &self.command
    }

    /// Run the lint command to completion and extract its summary.
    pub async fn run(&self) -> Result<LintReport, RunnerError> {
        tracing::debug!(command = %self.command.display(), "running lint");
        let output = Command::new(&self.command.program)
            .args(&self.command.args)
            .current_dir(&self.workdir)
            .kill_on_drop(true)
            .output()
            .await
            .map_err(|source| RunnerError::Spawn {
                program: self.command.program.clone(),
                source,
            })?;

        let mut full_output = String::from_utf8_lossy(&output.stdout).into_owned();
        full_output.push_str(&String::from_utf8_lossy(&output.stderr));
        let summary = extract_summary(&full_output);
        tracing::info!(status = ?output.status.code(), summary = %summary, "lint finished");
        Ok(LintReport {
            summary,
            full_output,
            error: None,
        })
    }
}

/// First `Found N warning(s) and M error(s)` in `output`, or `No summary found`.
pub fn extract_summary(output: &str) -> String {
    SUMMARY_RE
        .find(output)
        .map(|m| m.as_str().to_string())
        .unwrap_or_else(|| NO_SUMMARY.to_string())
}

/// Warning and error counts from a summary line. Counts too large for a
/// `u64` saturate.
pub fn parse_counts(summary: &str) -> Option<(u64, u64)> {
    let caps = SUMMARY_RE.captures(summary)?;
    let count = |i: usize| caps.get(i).map(|m| m.as_str().parse().unwrap_or(u64::MAX));
    Some((count(1)?, count(2)?))
}
