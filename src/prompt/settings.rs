//! Notes-path lookup in JSON settings files.
//!
//! Project settings take precedence over user settings. Within one file,
//! `pkmPath` takes precedence over `pkm_path`.

use super::path::resolve_prompt_path;
use serde_json::Value;
use std::path::{Path, PathBuf};

/// Accepted key spellings, highest precedence first.
pub const PATH_KEYS: [&str; 2] = ["pkmPath", "pkm_path"];

/// One settings file and the directory its relative paths resolve against.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsFile {
    pub path: PathBuf,
    pub base_dir: PathBuf,
}

impl SettingsFile {
    pub fn new(path: impl Into<PathBuf>, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            base_dir: base_dir.into(),
        }
    }

    /// Raw path value from this file, if present and non-empty.
    fn path_value(&self) -> Option<String> {
        let content = match std::fs::read_to_string(&self.path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Skipping settings file {}: {}", self.path.display(), e);
                return None;
            }
        };
        let settings: Value = match serde_json::from_str(&content) {
            Ok(value) => value,
            Err(e) => {
                tracing::debug!("Ignoring unparseable settings {}: {}", self.path.display(), e);
                return None;
            }
        };
        PATH_KEYS.iter().find_map(|key| {
            settings
                .get(key)
                .and_then(Value::as_str)
                .map(str::trim)
                .filter(|value| !value.is_empty())
                .map(str::to_string)
        })
    }
}

/// Project and user settings files, searched in that order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsLookup {
    pub project: SettingsFile,
    pub global: Option<SettingsFile>,
}

impl SettingsLookup {
    /// Default locations: `<workspace>/.pi/settings.json` and `~/.pi/agent/settings.json`.
    pub fn for_workspace(workspace_root: &Path) -> Self {
        let global = crate::config::xdg::home_dir().ok().map(|home| {
            SettingsFile::new(home.join(".pi").join("agent").join("settings.json"), home)
        });
        Self {
            project: SettingsFile::new(
                workspace_root.join(".pi").join("settings.json"),
                workspace_root,
            ),
            global,
        }
    }

    /// Resolve the notes path. Never fails; `None` when no file supplies one.
    pub fn lookup_path(&self) -> Option<PathBuf> {
        std::iter::once(&self.project)
            .chain(self.global.iter())
            .find_map(|file| {
                let value = file.path_value()?;
                match resolve_prompt_path(&value, &file.base_dir) {
                    Ok(path) => Some(path),
                    Err(e) => {
                        tracing::debug!("Cannot resolve notes path '{}': {}", value, e);
                        None
                    }
                }
            })
    }
}
