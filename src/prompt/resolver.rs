//! Prompt resolution policy.
//!
//! Resolution never fails: unreadable, empty, or unparseable sources are
//! skipped and the built-in prompt is the last resort.

use super::builtin::{BUILTIN_SOURCE, DEFAULT_PKM_PROMPT};
use super::extract::{dedent, extract_block};
use super::path::{resolve_prompt_path, PromptCache};
use super::settings::{SettingsFile, SettingsLookup};
use crate::config::{default_hints, PromptConfig, PromptPolicyKind};
use std::fmt;
use std::path::{Path, PathBuf};

/// Extensions whose whole content is the prompt
const PLAIN_TEXT_EXTENSIONS: &[&str] = &["md", "markdown", "txt"];

/// Where the active prompt text came from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptSource {
    Builtin,
    File(PathBuf),
}

impl fmt::Display for PromptSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PromptSource::Builtin => f.write_str(BUILTIN_SOURCE),
            PromptSource::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Result of one resolution pass.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPrompt {
    pub text: String,
    pub source: PromptSource,
    /// Notes location mentioned alongside the prompt
    pub supplementary_path: Option<PathBuf>,
}

impl ResolvedPrompt {
    pub fn builtin() -> Self {
        Self {
            text: DEFAULT_PKM_PROMPT.to_string(),
            source: PromptSource::Builtin,
            supplementary_path: None,
        }
    }
}

impl Default for ResolvedPrompt {
    fn default() -> Self {
        Self::builtin()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PromptPolicy {
    /// Always the built-in prompt.
    Builtin,
    /// First candidate file that yields a prompt block.
    Candidates(Vec<PathBuf>),
    /// Built-in prompt plus a notes path from settings files.
    Settings(SettingsLookup),
}

/// Resolves prompt text, provenance, and the optional notes path.
#[derive(Debug)]
pub struct PromptResolver {
    policy: PromptPolicy,
    hints: Vec<String>,
    base_dir: PathBuf,
    configured_override: Option<String>,
    cache: PromptCache,
}

impl PromptResolver {
    pub fn new(policy: PromptPolicy, base_dir: impl Into<PathBuf>) -> Self {
        Self {
            policy,
            hints: default_hints(),
            base_dir: base_dir.into(),
            configured_override: None,
            cache: PromptCache::new(),
        }
    }

    /// Built-in prompt only; relative override paths resolve against the current directory.
    pub fn builtin() -> Self {
        Self::new(PromptPolicy::Builtin, std::env::current_dir().unwrap_or_default())
    }

    pub fn with_hints(mut self, hints: Vec<String>) -> Self {
        self.hints = hints;
        self
    }

    pub fn with_override(mut self, path: Option<String>) -> Self {
        self.configured_override = path.filter(|p| !p.trim().is_empty());
        self
    }

    /// Build a resolver from configuration; relative paths resolve against the workspace.
    pub fn from_config(config: &PromptConfig, workspace_root: &Path) -> Self {
        let policy = match config.policy {
            PromptPolicyKind::Builtin => PromptPolicy::Builtin,
            PromptPolicyKind::Candidates => PromptPolicy::Candidates(
                config
                    .candidates
                    .iter()
                    .filter_map(|candidate| match resolve_prompt_path(candidate, workspace_root) {
                        Ok(path) => Some(path),
                        Err(e) => {
                            tracing::debug!("Dropping prompt candidate '{}': {}", candidate, e);
                            None
                        }
                    })
                    .collect(),
            ),
            PromptPolicyKind::Settings => {
                PromptPolicy::Settings(settings_lookup(config, workspace_root))
            }
        };
        Self::new(policy, workspace_root)
            .with_hints(config.hints.clone())
            .with_override(config.override_path.clone())
    }

    pub fn policy(&self) -> &PromptPolicy {
        &self.policy
    }

    /// Resolve the prompt. `override_path` (the startup flag) wins over the
    /// configured override; either is tried before the policy's candidates.
    pub fn resolve(&mut self, override_path: Option<&str>) -> ResolvedPrompt {
        let supplementary_path = match &self.policy {
            PromptPolicy::Settings(lookup) => lookup.lookup_path(),
            _ => None,
        };

        let override_path = override_path
            .filter(|p| !p.trim().is_empty())
            .map(str::to_string)
            .or_else(|| self.configured_override.clone());
        let mut candidates: Vec<PathBuf> = Vec::new();
        if let Some(path) = override_path {
            match resolve_prompt_path(&path, &self.base_dir) {
                Ok(path) => candidates.push(path),
                Err(e) => tracing::debug!("Ignoring prompt override '{}': {}", path, e),
            }
        }
        if let PromptPolicy::Candidates(paths) = &self.policy {
            candidates.extend(paths.iter().cloned());
        }

        for path in candidates {
            if let Some(text) = self.read_candidate(&path) {
                tracing::debug!("Resolved PKM prompt from {}", path.display());
                return ResolvedPrompt {
                    text,
                    source: PromptSource::File(path),
                    supplementary_path,
                };
            }
        }

        ResolvedPrompt {
            supplementary_path,
            ..ResolvedPrompt::builtin()
        }
    }

    fn read_candidate(&mut self, path: &Path) -> Option<String> {
        let content = match self.cache.load(path) {
            Ok(content) => content,
            Err(e) => {
                tracing::debug!("Skipping prompt candidate: {}", e);
                return None;
            }
        };
        let plain = path
            .extension()
            .and_then(|ext| ext.to_str())
            .map(|ext| PLAIN_TEXT_EXTENSIONS.contains(&ext.to_ascii_lowercase().as_str()))
            .unwrap_or(false);
        let text = if plain {
            Some(dedent(&content))
        } else {
            extract_block(&content, &self.hints)
        };
        text.filter(|t| !t.is_empty())
    }
}

fn settings_lookup(config: &PromptConfig, workspace_root: &Path) -> SettingsLookup {
    let mut lookup = SettingsLookup::for_workspace(workspace_root);
    if let Some(project) = &config.project_settings {
        if let Ok(path) = resolve_prompt_path(project, workspace_root) {
            lookup.project = SettingsFile::new(path, workspace_root);
        }
    }
    if let Some(global) = &config.global_settings {
        if let Ok(path) = resolve_prompt_path(global, workspace_root) {
            let base_dir = path
                .parent()
                .map(Path::to_path_buf)
                .unwrap_or_else(|| workspace_root.to_path_buf());
            lookup.global = Some(SettingsFile::new(path, base_dir));
        }
    }
    lookup
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_policy_resolves_default() {
        let mut resolver = PromptResolver::builtin();
        let resolved = resolver.resolve(None);
        assert_eq!(resolved, ResolvedPrompt::builtin());
        assert_eq!(resolved.source.to_string(), "builtin-default");
    }

    #[test]
    fn test_candidates_fall_back_to_default() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("broken.ts"), "export const x = 1;").unwrap();
        let policy = PromptPolicy::Candidates(vec![
            temp.path().join("missing.ts"),
            temp.path().join("broken.ts"),
        ]);
        let mut resolver = PromptResolver::new(policy, temp.path());

        let resolved = resolver.resolve(None);
        assert_eq!(resolved.text, DEFAULT_PKM_PROMPT);
        assert_eq!(resolved.source, PromptSource::Builtin);
    }

    #[test]
    fn test_first_matching_candidate_wins() {
        let temp = tempfile::tempdir().unwrap();
        let second = temp.path().join("pkm.ts");
        let third = temp.path().join("prompt.md");
        std::fs::write(&second, "const PKM_PROMPT = `\n  From source.\n`;").unwrap();
        std::fs::write(&third, "From markdown.").unwrap();
        let policy = PromptPolicy::Candidates(vec![temp.path().join("nope.ts"), second.clone(), third]);
        let mut resolver = PromptResolver::new(policy, temp.path());

        let first = resolver.resolve(None);
        assert_eq!(first.text, "From source.");
        assert_eq!(first.source, PromptSource::File(second));
        assert_eq!(resolver.resolve(None), first);
    }

    #[test]
    fn test_override_tried_before_candidates() {
        let temp = tempfile::tempdir().unwrap();
        std::fs::write(temp.path().join("override.md"), "\n  Override text.\n").unwrap();
        std::fs::write(temp.path().join("configured.md"), "Configured text.").unwrap();
        let mut resolver = PromptResolver::new(PromptPolicy::Builtin, temp.path())
            .with_override(Some("configured.md".to_string()));

        assert_eq!(resolver.resolve(None).text, "Configured text.");
        assert_eq!(resolver.resolve(Some("override.md")).text, "Override text.");
        assert_eq!(resolver.resolve(Some("")).text, "Configured text.");
    }

    #[test]
    fn test_settings_policy_attaches_notes_path() {
        let temp = tempfile::tempdir().unwrap();
        let settings = temp.path().join(".pi").join("settings.json");
        std::fs::create_dir_all(settings.parent().unwrap()).unwrap();
        std::fs::write(&settings, r#"{"pkmPath": "vault"}"#).unwrap();
        let lookup = SettingsLookup {
            project: SettingsFile::new(settings, temp.path()),
            global: None,
        };
        let mut resolver = PromptResolver::new(PromptPolicy::Settings(lookup), temp.path());

        let resolved = resolver.resolve(None);
        assert_eq!(resolved.source, PromptSource::Builtin);
        assert_eq!(resolved.supplementary_path, Some(temp.path().join("vault")));
    }

    #[test]
    fn test_configured_global_settings_resolve_against_their_directory() {
        let temp = tempfile::tempdir().unwrap();
        let workspace = temp.path().join("workspace");
        let settings = temp.path().join("shared").join("settings.json");
        std::fs::create_dir_all(settings.parent().unwrap()).unwrap();
        std::fs::create_dir_all(&workspace).unwrap();
        std::fs::write(&settings, r#"{"pkm_path": "vault"}"#).unwrap();
        let config = PromptConfig {
            policy: PromptPolicyKind::Settings,
            global_settings: Some(settings.display().to_string()),
            ..PromptConfig::default()
        };

        let mut resolver = PromptResolver::from_config(&config, &workspace);
        assert_eq!(
            resolver.resolve(None).supplementary_path,
            Some(temp.path().join("shared").join("vault"))
        );
    }

    #[test]
    fn test_from_config_candidates_relative_to_workspace() {
        let temp = tempfile::tempdir().unwrap();
        let config = PromptConfig {
            policy: PromptPolicyKind::Candidates,
            candidates: vec!["prompts/pkm.md".to_string()],
            ..PromptConfig::default()
        };
        let resolver = PromptResolver::from_config(&config, temp.path());
        assert_eq!(
            resolver.policy(),
            &PromptPolicy::Candidates(vec![temp.path().join("prompts/pkm.md")])
        );
    }
}
