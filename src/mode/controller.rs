//! Mode controller: one handler per host event.
//!
//! - `pkm <args>` command: [`ModeController::handle_command`]
//! - session start: [`ModeController::on_session_start`]
//! - system prompt construction: [`ModeController::before_agent_start`]
//!
//! Handlers never fail. Log and entry-log errors are traced and the
//! handler carries on with what it has.

use super::command::ModeCommand;
use super::journal::{latest_enabled, ModeRecord, CUSTOM_TYPE};
use super::state::ModeState;
use crate::host::{CommandSpec, FlagKind, FlagSpec, ModeHost, NotifyLevel};
use crate::prompt::PromptResolver;

pub const COMMAND_NAME: &str = "pkm";
/// Boolean startup flag that seeds the mode as enabled
pub const ENABLE_FLAG: &str = "pkm";
/// String startup flag overriding the prompt source path
pub const PROMPT_FLAG: &str = "pkm-prompt";
pub const STATUS_KEY: &str = "pkm";
pub const STATUS_TEXT: &str = "PKM";

/// Result of one `pkm` invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutcome {
    pub command: ModeCommand,
    pub enabled: bool,
    /// A record was appended to the session log
    pub persisted: bool,
    /// Text sent to the agent as a user message
    pub forwarded: Option<String>,
}

pub struct ModeController {
    state: ModeState,
    resolver: PromptResolver,
}

impl ModeController {
    /// Starts disabled with the built-in prompt; sources resolve at session start.
    pub fn new(resolver: PromptResolver) -> Self {
        Self {
            state: ModeState::default(),
            resolver,
        }
    }

    pub fn state(&self) -> &ModeState {
        &self.state
    }

    /// Register the `pkm` command and startup flags with the host.
    pub fn register(&self, host: &mut dyn ModeHost) {
        host.register_flag(FlagSpec {
            name: ENABLE_FLAG.to_string(),
            description: "Start with PKM mode enabled".to_string(),
            kind: FlagKind::Bool,
        });
        host.register_flag(FlagSpec {
            name: PROMPT_FLAG.to_string(),
            description: "File to read the PKM prompt from".to_string(),
            kind: FlagKind::String,
        });
        host.register_command(CommandSpec {
            name: COMMAND_NAME.to_string(),
            description: "Toggle PKM mode (on|off|status|<message>)".to_string(),
        });
    }

    pub fn handle_command(&mut self, args: &str, host: &mut dyn ModeHost) -> CommandOutcome {
        let command = ModeCommand::parse(args);
        let enabled = match &command {
            ModeCommand::Status => {
                host.notify(&self.state.status_line(), NotifyLevel::Info);
                return CommandOutcome {
                    command,
                    enabled: self.state.enabled(),
                    persisted: false,
                    forwarded: None,
                };
            }
            ModeCommand::Enable | ModeCommand::Forward(_) => true,
            ModeCommand::Disable => false,
            ModeCommand::Toggle => !self.state.enabled(),
        };

        self.state.set_enabled(enabled);
        // Re-persisting an unchanged value (e.g. free text while enabled) is kept.
        let persisted = self.persist(host);
        self.sync_status(host);
        host.notify(&self.state.status_line(), NotifyLevel::Info);
        tracing::info!(enabled, command = ?command, "PKM mode updated");

        let forwarded = match &command {
            ModeCommand::Forward(text) => {
                host.send_user_message(text);
                Some(text.clone())
            }
            _ => None,
        };

        CommandOutcome {
            command,
            enabled,
            persisted,
            forwarded,
        }
    }

    /// Reconcile state for a new session.
    ///
    /// The startup flag seeds `enabled`; the latest persisted record, when
    /// one exists, overrides it.
    pub fn on_session_start(&mut self, host: &mut dyn ModeHost) {
        let override_path = host
            .flag(PROMPT_FLAG)
            .and_then(|value| value.as_text().map(str::to_string));
        let resolved = self.resolver.resolve(override_path.as_deref());
        self.state.apply_prompt(resolved);

        if host.flag(ENABLE_FLAG).map(|v| v.as_bool()).unwrap_or(false) {
            self.state.set_enabled(true);
        }

        match host.entries() {
            Ok(entries) => {
                if let Some(enabled) = latest_enabled(&entries) {
                    self.state.set_enabled(enabled);
                }
            }
            Err(e) => tracing::warn!("Cannot read session entries, keeping startup state: {}", e),
        }

        self.sync_status(host);
        tracing::debug!(
            enabled = self.state.enabled(),
            source = %self.state.prompt_source(),
            "PKM session reconciled"
        );
    }

    /// Transform the system prompt for the next agent turn.
    pub fn before_agent_start(&self, system_prompt: &str) -> String {
        self.state.extend_system_prompt(system_prompt)
    }

    fn persist(&self, host: &mut dyn ModeHost) -> bool {
        let record = ModeRecord::new(self.state.enabled());
        match host.append_entry(CUSTOM_TYPE, record.to_value()) {
            Ok(()) => true,
            Err(e) => {
                tracing::warn!("Failed to persist PKM mode: {}", e);
                false
            }
        }
    }

    fn sync_status(&self, host: &mut dyn ModeHost) {
        let text = self.state.enabled().then_some(STATUS_TEXT);
        host.set_status(STATUS_KEY, text);
    }
}
