//! In-process host used by the CLI and by tests.

use super::{
    CommandSpec, EntryLog, FlagSpec, FlagValue, MemoryEntryLog, ModeHost, NotifyLevel,
    SessionEntry,
};
use crate::error::ApiError;
use serde_json::Value;
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;

/// Something the controller asked the host to show or send.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostOutput {
    Notice { message: String, level: NotifyLevel },
    Status { key: String, text: Option<String> },
    UserMessage(String),
}

/// Host backed by an [`EntryLog`] that records every output in an outbox.
pub struct LocalHost {
    log: Arc<dyn EntryLog>,
    flags: HashMap<String, FlagValue>,
    commands: Vec<CommandSpec>,
    flag_specs: Vec<FlagSpec>,
    status: BTreeMap<String, String>,
    outbox: Vec<HostOutput>,
}

impl LocalHost {
    pub fn new(log: Arc<dyn EntryLog>) -> Self {
        Self {
            log,
            flags: HashMap::new(),
            commands: Vec::new(),
            flag_specs: Vec::new(),
            status: BTreeMap::new(),
            outbox: Vec::new(),
        }
    }

    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemoryEntryLog::new()))
    }

    pub fn with_flag(mut self, name: &str, value: FlagValue) -> Self {
        self.set_flag(name, value);
        self
    }

    pub fn set_flag(&mut self, name: &str, value: FlagValue) {
        self.flags.insert(name.to_string(), value);
    }

    pub fn log(&self) -> &Arc<dyn EntryLog> {
        &self.log
    }

    pub fn commands(&self) -> &[CommandSpec] {
        &self.commands
    }

    pub fn flag_specs(&self) -> &[FlagSpec] {
        &self.flag_specs
    }

    /// Current text of a status indicator.
    pub fn status(&self, key: &str) -> Option<&str> {
        self.status.get(key).map(String::as_str)
    }

    pub fn outbox(&self) -> &[HostOutput] {
        &self.outbox
    }

    pub fn drain_outbox(&mut self) -> Vec<HostOutput> {
        std::mem::take(&mut self.outbox)
    }

    pub fn notices(&self) -> Vec<&str> {
        self.outbox
            .iter()
            .filter_map(|output| match output {
                HostOutput::Notice { message, .. } => Some(message.as_str()),
                _ => None,
            })
            .collect()
    }

    pub fn user_messages(&self) -> Vec<&str> {
        self.outbox
            .iter()
            .filter_map(|output| match output {
                HostOutput::UserMessage(text) => Some(text.as_str()),
                _ => None,
            })
            .collect()
    }
}

impl ModeHost for LocalHost {
    fn register_command(&mut self, command: CommandSpec) {
        self.commands.retain(|existing| existing.name != command.name);
        self.commands.push(command);
    }

    fn register_flag(&mut self, flag: FlagSpec) {
        self.flag_specs.retain(|existing| existing.name != flag.name);
        self.flag_specs.push(flag);
    }

    fn flag(&self, name: &str) -> Option<FlagValue> {
        self.flags.get(name).cloned()
    }

    fn notify(&mut self, message: &str, level: NotifyLevel) {
        self.outbox.push(HostOutput::Notice {
            message: message.to_string(),
            level,
        });
    }

    fn set_status(&mut self, key: &str, text: Option<&str>) {
        match text {
            Some(text) => self.status.insert(key.to_string(), text.to_string()),
            None => self.status.remove(key),
        };
        self.outbox.push(HostOutput::Status {
            key: key.to_string(),
            text: text.map(str::to_string),
        });
    }

    fn append_entry(&mut self, custom_type: &str, data: Value) -> Result<(), ApiError> {
        self.log.append(&SessionEntry::custom(custom_type, data))
    }

    fn entries(&self) -> Result<Vec<SessionEntry>, ApiError> {
        self.log.load()
    }

    fn send_user_message(&mut self, text: &str) {
        self.outbox.push(HostOutput::UserMessage(text.to_string()));
    }
}
