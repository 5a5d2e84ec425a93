//! Parsing of `pkm <args>` into a command.

/// What a `pkm` invocation asks for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ModeCommand {
    Status,
    Enable,
    Disable,
    Toggle,
    /// Enable, then send the text to the agent as a user message
    Forward(String),
}

impl ModeCommand {
    /// Verbs match case-insensitively after trimming; anything else non-empty
    /// is forwarded with its inner text untouched.
    pub fn parse(args: &str) -> Self {
        let trimmed = args.trim();
        match trimmed.to_ascii_lowercase().as_str() {
            "" => ModeCommand::Toggle,
            "status" => ModeCommand::Status,
            "on" | "enable" | "enabled" => ModeCommand::Enable,
            "off" | "disable" | "disabled" => ModeCommand::Disable,
            _ => ModeCommand::Forward(trimmed.to_string()),
        }
    }

    /// Whether running the command changes (and persists) the mode.
    pub fn changes_state(&self) -> bool {
        !matches!(self, ModeCommand::Status)
    }
}
