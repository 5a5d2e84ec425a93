//! XDG Base Directory utilities for config and session state.

use crate::error::ApiError;
use std::path::{Component, Path, PathBuf};

/// Get the user's home directory from `$HOME`
pub fn home_dir() -> Result<PathBuf, ApiError> {
    std::env::var("HOME")
        .map(PathBuf::from)
        .map_err(|_| ApiError::ConfigError("HOME not set".to_string()))
}

/// Get XDG config home directory
///
/// Returns `$XDG_CONFIG_HOME` if set, otherwise defaults to `$HOME/.config`
/// Follows XDG Base Directory Specification
pub fn config_home() -> Result<PathBuf, ApiError> {
    if let Ok(xdg_config_home) = std::env::var("XDG_CONFIG_HOME") {
        if !xdg_config_home.is_empty() {
            return Ok(PathBuf::from(xdg_config_home));
        }
    }

    let home = home_dir().map_err(|_| {
        ApiError::ConfigError(
            "Could not determine XDG config home directory (HOME not set)".to_string(),
        )
    })?;

    Ok(home.join(".config"))
}

/// Returns `$XDG_CONFIG_HOME/pkm-mode/config.toml`
pub fn global_config_path() -> Result<PathBuf, ApiError> {
    Ok(config_home()?.join("pkm-mode").join("config.toml"))
}

/// Platform state directory for pkm-mode (session logs, log files).
pub fn state_dir() -> Result<PathBuf, ApiError> {
    let project_dirs = directories::ProjectDirs::from("", "pkm-mode", "pkm-mode").ok_or_else(
        || ApiError::ConfigError("Could not determine platform state directory".to_string()),
    )?;
    // macOS and Windows have no state dir; the local data dir stands in.
    Ok(project_dirs
        .state_dir()
        .unwrap_or_else(|| project_dirs.data_local_dir())
        .to_path_buf())
}

/// Get the state directory for a specific workspace
///
/// The canonical workspace path is mirrored under the state directory, so
/// `/home/user/notes` becomes `<state_dir>/home/user/notes/`.
pub fn workspace_state_dir(workspace_root: &Path) -> Result<PathBuf, ApiError> {
    let canonical = workspace_root.canonicalize().map_err(|e| {
        ApiError::ConfigError(format!("Failed to canonicalize workspace path: {}", e))
    })?;

    let mut dir = state_dir()?;
    for component in canonical.components() {
        if let Component::Normal(name) = component {
            dir = dir.join(name);
        }
    }
    Ok(dir)
}
