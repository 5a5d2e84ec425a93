//! Prompt path resolution and mtime-keyed file cache.

use crate::error::ApiError;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::time::SystemTime;

/// Resolve a prompt-related path with support for absolute, tilde, and relative paths
///
/// Path resolution priority:
/// 1. Absolute path (if starts with `/`)
/// 2. Tilde expansion (if starts with `~/`, or is exactly `~`)
/// 3. Relative to current directory (if starts with `./`)
/// 4. Relative to base_dir
pub fn resolve_prompt_path(path: &str, base_dir: &Path) -> Result<PathBuf, ApiError> {
    let path = path.trim();
    if path.is_empty() {
        return Err(ApiError::ConfigError("Empty path".to_string()));
    }
    if Path::new(path).is_absolute() {
        return Ok(PathBuf::from(path));
    }
    if path == "~" || path.starts_with("~/") {
        let home = crate::config::xdg::home_dir()?;
        return Ok(match path.strip_prefix("~/") {
            Some(rest) => home.join(rest),
            None => home,
        });
    }
    if let Some(rest) = path.strip_prefix("./") {
        let current_dir = std::env::current_dir().map_err(|e| {
            ApiError::ConfigError(format!("Failed to get current directory: {}", e))
        })?;
        return Ok(current_dir.join(rest));
    }
    Ok(base_dir.join(path))
}

/// Prompt file cache with modification time tracking
#[derive(Debug, Default)]
pub struct PromptCache {
    cache: HashMap<PathBuf, (String, SystemTime)>,
}

impl PromptCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load file content, reusing the cached copy while the mtime is unchanged
    pub fn load(&mut self, path: &Path) -> Result<String, ApiError> {
        let metadata = std::fs::metadata(path).map_err(|e| {
            ApiError::ConfigError(format!("Failed to read prompt file {}: {}", path.display(), e))
        })?;
        if !metadata.is_file() {
            return Err(ApiError::ConfigError(format!(
                "Prompt source {} is not a file",
                path.display()
            )));
        }
        let mtime = metadata.modified().map_err(|e| {
            ApiError::ConfigError(format!(
                "Failed to get modification time for {}: {}",
                path.display(),
                e
            ))
        })?;
        if let Some((cached_content, cached_mtime)) = self.cache.get(path) {
            if *cached_mtime == mtime {
                return Ok(cached_content.clone());
            }
        }
        let content = std::fs::read_to_string(path).map_err(|e| {
            ApiError::ConfigError(format!("Failed to read prompt file {}: {}", path.display(), e))
        })?;
        if content.trim().is_empty() {
            return Err(ApiError::ConfigError(format!(
                "Prompt file {} is empty",
                path.display()
            )));
        }
        self.cache.insert(path.to_path_buf(), (content.clone(), mtime));
        Ok(content)
    }

    pub fn len(&self) -> usize {
        self.cache.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cache.is_empty()
    }
}
