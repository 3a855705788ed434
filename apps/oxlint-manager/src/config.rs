//! Settings discovery and effective settings resolution.
//!
//! oxlint-manager reads `oxlint-manager.toml|yaml|yml` from the repository
//! root (or closest ancestor) and merges it with CLI flags to produce an
//! `Effective` config.
//! Defaults:
//! - `config`: `.oxlintrc.json`
//! - `dist`: `dist`
//! - `output`: `human`
//! - `server.host`: `127.0.0.1`, `server.port`: `3000`
//! - `lint.command`: `npx`, `lint.args`: `["oxlint"]`
//! - `catalog`: built-in rule lists
//!
//! Overrides precedence: CLI > settings file > defaults.

use crate::catalog::Catalog;
use crate::lint::LintCommand;
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

pub const SETTINGS_FILES: [&str; 3] = [
    "oxlint-manager.toml",
    "oxlint-manager.yaml",
    "oxlint-manager.yml",
];
pub const DEFAULT_CONFIG_FILE: &str = ".oxlintrc.json";
pub const DEFAULT_DIST_DIR: &str = "dist";
pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 3000;

#[derive(Debug, Default, Deserialize, Clone)]
/// `[server]` section.
pub struct ServerCfg {
    pub host: Option<String>,
    pub port: Option<u16>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// `[lint]` section: the external lint command, fixed at startup.
pub struct LintCfg {
    pub command: Option<String>,
    pub args: Option<Vec<String>>,
}

#[derive(Debug, Default, Deserialize, Clone)]
/// Root settings loaded from `oxlint-manager.toml|yaml`.
pub struct ManagerConfig {
    pub config: Option<String>,
    pub dist: Option<String>,
    pub output: Option<String>,
    #[serde(default)]
    pub server: Option<ServerCfg>,
    #[serde(default)]
    pub lint: Option<LintCfg>,
    /// `[catalog] <category> = ["rule", ...]`
    #[serde(default)]
    pub catalog: Option<HashMap<String, Vec<String>>>,
}

#[derive(Debug, Clone, Default)]
/// CLI-level overrides; `None` falls through to the settings file.
pub struct Overrides<'a> {
    pub repo_root: Option<&'a str>,
    pub config: Option<&'a str>,
    pub dist: Option<&'a str>,
    pub output: Option<&'a str>,
    pub host: Option<&'a str>,
    pub port: Option<u16>,
}

#[derive(Debug, Clone)]
/// Fully-resolved settings used by commands after applying precedence.
pub struct Effective {
    pub repo_root: PathBuf,
    pub config_path: PathBuf,
    pub dist_dir: PathBuf,
    pub output: String,
    pub host: String,
    pub port: u16,
    pub lint: LintCommand,
    pub catalog: Catalog,
    pub settings_found: bool,
}

/// Walk upward from `start` to detect the repository root.
///
/// Stops when a settings file or a `.git` directory is found.
pub fn detect_repo_root(start: &Path) -> PathBuf {
    let mut cur = start;
    loop {
        if SETTINGS_FILES.iter().any(|f| cur.join(f).exists()) {
            return cur.to_path_buf();
        }
        if cur.join(".git").exists() {
            return cur.to_path_buf();
        }
        match cur.parent() {
            Some(p) => cur = p,
            None => return start.to_path_buf(),
        }
    }
}

/// Load `ManagerConfig` from the first settings file present under `root`.
///
/// Returns `Ok(None)` when no settings file exists and `Err` when one exists
/// but cannot be read or parsed.
pub fn load_config(root: &Path) -> Result<Option<ManagerConfig>, String> {
    for name in SETTINGS_FILES {
        let p = root.join(name);
        if !p.exists() {
            continue;
        }
        let s = fs::read_to_string(&p).map_err(|e| format!("{}: {}", p.display(), e))?;
        let cfg = if name.ends_with(".toml") {
            toml::from_str::<ManagerConfig>(&s).map_err(|e| format!("{}: {}", p.display(), e))?
        } else {
            serde_yaml::from_str::<ManagerConfig>(&s)
                .map_err(|e| format!("{}: {}", p.display(), e))?
        };
        return Ok(Some(cfg));
    }
    Ok(None)
}

/// Resolve `Effective` by merging CLI flags, discovered settings, and defaults.
pub fn resolve_effective(cli: &Overrides<'_>) -> Result<Effective, String> {
    let start = PathBuf::from(cli.repo_root.unwrap_or("."));
    let start = fs::canonicalize(&start).unwrap_or(start);
    let repo_root = detect_repo_root(&start);
    let loaded = load_config(&repo_root)?;
    let settings_found = loaded.is_some();
    let cfg = loaded.unwrap_or_default();

    let config_rel = cli
        .config
        .map(|s| s.to_string())
        .or(cfg.config)
        .unwrap_or_else(|| DEFAULT_CONFIG_FILE.to_string());
    let dist_rel = cli
        .dist
        .map(|s| s.to_string())
        .or(cfg.dist)
        .unwrap_or_else(|| DEFAULT_DIST_DIR.to_string());

    let output = cli
        .output
        .map(|s| s.to_string())
        .or(cfg.output)
        .unwrap_or_else(|| "human".to_string());

    let server = cfg.server.unwrap_or_default();
    let host = cli
        .host
        .map(|s| s.to_string())
        .or(server.host)
        .unwrap_or_else(|| DEFAULT_HOST.to_string());
    let port = cli.port.or(server.port).unwrap_or(DEFAULT_PORT);

    let lint_cfg = cfg.lint.unwrap_or_default();
    let defaults = LintCommand::default();
    let lint = match lint_cfg.command {
        // A custom program does not inherit the default `oxlint` argument.
        Some(program) => LintCommand {
            program,
            args: lint_cfg.args.unwrap_or_default(),
        },
        None => LintCommand {
            program: defaults.program,
            args: lint_cfg.args.unwrap_or(defaults.args),
        },
    };

    let catalog = match cfg.catalog.as_ref() {
        Some(ov) => Catalog::with_overrides(ov).map_err(|e| format!("[catalog]: {}", e))?,
        None => Catalog::builtin(),
    };

    Ok(Effective {
        config_path: repo_root.join(config_rel),
        dist_dir: repo_root.join(dist_rel),
        repo_root,
        output,
        host,
        port,
        lint,
        catalog,
        settings_found,
    })
}
