//! Configuration
//!
//! Layered configuration for the mode controller: defaults, the global
//! config file, a workspace file, and `PKM_MODE__*` environment variables.

mod facade;
pub mod merge;
pub mod paths;
pub mod sources;

pub use facade::ConfigLoader;
pub use paths::xdg_root as xdg;

use crate::logging::LoggingConfig;
use serde::{Deserialize, Serialize};

/// Top-level configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModeConfig {
    #[serde(default)]
    pub logging: LoggingConfig,

    #[serde(default)]
    pub prompt: PromptConfig,
}

/// Which prompt resolution policy the controller uses.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PromptPolicyKind {
    /// Fixed built-in text.
    #[default]
    Builtin,
    /// Scan an ordered list of candidate files for a quoted prompt block.
    Candidates,
    /// Built-in text plus a notes path looked up in JSON settings files.
    Settings,
}

/// Prompt resolution settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptConfig {
    #[serde(default)]
    pub policy: PromptPolicyKind,

    /// Candidate prompt source files, tried in order
    #[serde(default)]
    pub candidates: Vec<String>,

    /// Assignment names whose quoted block is preferred over the first block found
    #[serde(default = "default_hints")]
    pub hints: Vec<String>,

    /// Path tried before every candidate (the `pkm-prompt` flag wins over this)
    #[serde(default)]
    pub override_path: Option<String>,

    /// Project settings file; defaults to `<workspace>/.pi/settings.json`
    #[serde(default)]
    pub project_settings: Option<String>,

    /// User settings file; defaults to `~/.pi/agent/settings.json`. Relative notes
    /// paths in a configured file resolve against that file's directory, in the
    /// default file against `$HOME`.
    #[serde(default)]
    pub global_settings: Option<String>,
}

pub fn default_hints() -> Vec<String> {
    ["PKM_PROMPT", "PKM_SYSTEM_PROMPT", "pkmPrompt", "pkmSystemPrompt"]
        .iter()
        .map(|s| s.to_string())
        .collect()
}

impl Default for PromptConfig {
    fn default() -> Self {
        Self {
            policy: PromptPolicyKind::default(),
            candidates: Vec::new(),
            hints: default_hints(),
            override_path: None,
            project_settings: None,
            global_settings: None,
        }
    }
}
