//! Small shared helpers: colored message prefixes and path display.

use owo_colors::OwoColorize;
use std::path::Path;

fn colors_enabled() -> bool {
    std::env::var_os("NO_COLOR").is_none()
}

pub fn error_prefix() -> String {
    if colors_enabled() {
        "error:".red().bold().to_string()
    } else {
        "error:".to_string()
    }
}

pub fn note_prefix() -> String {
    if colors_enabled() {
        "note:".cyan().bold().to_string()
    } else {
        "note:".to_string()
    }
}

pub fn info_prefix() -> String {
    if colors_enabled() {
        "info:".blue().bold().to_string()
    } else {
        "info:".to_string()
    }
}

/// Path relative to the current working directory when possible.
pub fn rel_to_wd(p: &Path) -> String {
    std::env::current_dir()
        .ok()
        .and_then(|cwd| pathdiff::diff_paths(p, cwd))
        .filter(|rel| !rel.as_os_str().is_empty())
        .unwrap_or_else(|| p.to_path_buf())
        .to_string_lossy()
        .to_string()
}
