//! Persisted mode record and replay over the session log.

use crate::host::SessionEntry;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Custom entry type of the persisted record
pub const CUSTOM_TYPE: &str = "pkm-mode";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ModeRecord {
    pub enabled: bool,
}

impl ModeRecord {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }

    pub fn to_value(self) -> Value {
        serde_json::json!({ "enabled": self.enabled })
    }

    /// Parse a record from a log entry; `None` for foreign or malformed entries.
    pub fn from_entry(entry: &SessionEntry) -> Option<Self> {
        if !entry.is_custom(CUSTOM_TYPE) {
            return None;
        }
        let data = entry.data.as_ref()?;
        match serde_json::from_value::<ModeRecord>(data.clone()) {
            Ok(record) => Some(record),
            Err(e) => {
                tracing::debug!("Ignoring malformed {} entry: {}", CUSTOM_TYPE, e);
                None
            }
        }
    }
}

/// Replay the log: the last well-formed record wins.
pub fn latest_enabled<'a, I>(entries: I) -> Option<bool>
where
    I: IntoIterator<Item = &'a SessionEntry>,
{
    entries
        .into_iter()
        .fold(None, |latest, entry| match ModeRecord::from_entry(entry) {
            Some(record) => Some(record.enabled),
            None => latest,
        })
}
