//! Host capability boundary
//!
//! The controller never talks to an agent runtime directly. Everything it
//! needs from the host (command and flag registration, flag values, user
//! notifications, a status indicator, the session entry log, and message
//! forwarding) goes through [`ModeHost`].

pub mod entry_log;
pub mod local;

pub use entry_log::{EntryLog, JsonlEntryLog, MemoryEntryLog};
pub use local::{HostOutput, LocalHost};

use crate::error::ApiError;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Entry type used for extension-owned records in the session log
pub const CUSTOM_ENTRY_TYPE: &str = "custom";

/// A user command the extension contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub description: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlagKind {
    Bool,
    String,
}

/// A startup flag the extension contributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSpec {
    pub name: String,
    pub description: String,
    pub kind: FlagKind,
}

/// Value of a startup flag as parsed by the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FlagValue {
    Bool(bool),
    Text(String),
}

impl FlagValue {
    /// Truthiness for boolean flags; hosts that only pass strings send "true"/"1".
    pub fn as_bool(&self) -> bool {
        match self {
            FlagValue::Bool(value) => *value,
            FlagValue::Text(text) => matches!(
                text.trim().to_ascii_lowercase().as_str(),
                "true" | "1" | "yes" | "on"
            ),
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            FlagValue::Text(text) => Some(text.as_str()),
            FlagValue::Bool(_) => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum NotifyLevel {
    Info,
    Warning,
    Error,
}

/// One record of the host's append-only session log.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionEntry {
    #[serde(rename = "type")]
    pub entry_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_type: Option<String>,
    #[serde(default)]
    pub data: Option<Value>,
    /// Hosts may omit it; replay order is line order
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timestamp: Option<DateTime<Utc>>,
}

impl SessionEntry {
    pub fn custom(custom_type: impl Into<String>, data: Value) -> Self {
        Self {
            entry_type: CUSTOM_ENTRY_TYPE.to_string(),
            custom_type: Some(custom_type.into()),
            data: Some(data),
            timestamp: Some(Utc::now()),
        }
    }

    pub fn is_custom(&self, custom_type: &str) -> bool {
        self.entry_type == CUSTOM_ENTRY_TYPE && self.custom_type.as_deref() == Some(custom_type)
    }
}

/// Capabilities the mode controller consumes from its host.
pub trait ModeHost {
    fn register_command(&mut self, command: CommandSpec);

    fn register_flag(&mut self, flag: FlagSpec);

    /// Value of a startup flag, if the user passed one.
    fn flag(&self, name: &str) -> Option<FlagValue>;

    fn notify(&mut self, message: &str, level: NotifyLevel);

    /// Set (`Some`) or clear (`None`) a keyed status indicator.
    fn set_status(&mut self, key: &str, text: Option<&str>);

    /// Append a custom record to the session log.
    fn append_entry(&mut self, custom_type: &str, data: Value) -> Result<(), ApiError>;

    /// All session log entries, oldest first.
    fn entries(&self) -> Result<Vec<SessionEntry>, ApiError>;

    /// Queue `text` as a new user message to the agent. Fire-and-forget.
    fn send_user_message(&mut self, text: &str);
}
