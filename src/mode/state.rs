//! In-memory mode state and the system prompt transformation.

use crate::prompt::{PromptSource, ResolvedPrompt};
use std::path::{Path, PathBuf};

/// Separator between the host's system prompt and appended blocks
pub const PROMPT_SEPARATOR: &str = "\n\n";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ModeState {
    enabled: bool,
    prompt_text: String,
    prompt_source: PromptSource,
    supplementary_path: Option<PathBuf>,
}

impl ModeState {
    /// Disabled state carrying `prompt`.
    pub fn new(prompt: ResolvedPrompt) -> Self {
        let mut state = Self {
            enabled: false,
            prompt_text: String::new(),
            prompt_source: PromptSource::Builtin,
            supplementary_path: None,
        };
        state.apply_prompt(prompt);
        state
    }

    pub fn enabled(&self) -> bool {
        self.enabled
    }

    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn prompt_text(&self) -> &str {
        &self.prompt_text
    }

    pub fn prompt_source(&self) -> &PromptSource {
        &self.prompt_source
    }

    pub fn supplementary_path(&self) -> Option<&Path> {
        self.supplementary_path.as_deref()
    }

    /// Adopt a resolution result. Blank text falls back to the built-in prompt.
    pub fn apply_prompt(&mut self, prompt: ResolvedPrompt) {
        let ResolvedPrompt {
            text,
            source,
            supplementary_path,
        } = prompt;
        if text.trim().is_empty() {
            let builtin = ResolvedPrompt::builtin();
            self.prompt_text = builtin.text;
            self.prompt_source = builtin.source;
        } else {
            self.prompt_text = text;
            self.prompt_source = source;
        }
        self.supplementary_path = supplementary_path;
    }

    /// e.g. `PKM mode enabled. Prompt: builtin-default`
    pub fn status_line(&self) -> String {
        format!(
            "PKM mode {}. Prompt: {}",
            if self.enabled { "enabled" } else { "disabled" },
            self.prompt_source
        )
    }

    /// Pure: disabled returns the input unchanged; enabled appends the prompt
    /// text and, when a notes path is known, a pointer to it.
    pub fn extend_system_prompt(&self, system_prompt: &str) -> String {
        if !self.enabled {
            return system_prompt.to_string();
        }
        let mut blocks = vec![system_prompt.to_string(), self.prompt_text.clone()];
        if let Some(path) = &self.supplementary_path {
            blocks.push(format!("PKM notes are stored in {}.", path.display()));
        }
        blocks.join(PROMPT_SEPARATOR)
    }
}

impl Default for ModeState {
    fn default() -> Self {
        Self::new(ResolvedPrompt::builtin())
    }
}
