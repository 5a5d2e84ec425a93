//! PKM mode
//!
//! The mode controller and its parts: the in-memory state, `pkm` command
//! parsing, and the single-boolean record replayed from the session log.

pub mod command;
mod controller;
pub mod journal;
pub mod state;

pub use command::ModeCommand;
pub use controller::{
    CommandOutcome, ModeController, COMMAND_NAME, ENABLE_FLAG, PROMPT_FLAG, STATUS_KEY,
    STATUS_TEXT,
};
pub use journal::{latest_enabled, ModeRecord, CUSTOM_TYPE};
pub use state::ModeState;
