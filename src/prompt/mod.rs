//! PKM prompt resolution
//!
//! Owns the built-in instructions and the policies for finding replacement
//! instructions in external files and a notes path in settings files.

pub mod builtin;
pub mod extract;
pub mod path;
mod resolver;
pub mod settings;

pub use builtin::{BUILTIN_SOURCE, DEFAULT_PKM_PROMPT};
pub use path::{resolve_prompt_path, PromptCache};
pub use resolver::{PromptPolicy, PromptResolver, PromptSource, ResolvedPrompt};
pub use settings::{SettingsFile, SettingsLookup};
