//! pkm-mode: Personal Knowledge Management Mode
//!
//! A mode toggle for coding-agent hosts. While PKM mode is on, extra
//! note-taking instructions are appended to the agent's system prompt. The
//! on/off flag is persisted as a record in the host's session log and
//! replayed at every session start.

pub mod config;
pub mod error;
pub mod host;
pub mod logging;
pub mod mode;
pub mod prompt;
pub mod tooling;

pub use error::ApiError;
pub use host::{LocalHost, ModeHost};
pub use mode::{ModeController, ModeState};
pub use prompt::{PromptResolver, PromptSource, ResolvedPrompt};
