//! CLI Tooling
//!
//! Each invocation is one host session: the controller registers with a
//! [`LocalHost`], reconciles from the session log, then handles the
//! requested event.

use crate::config::{xdg, ConfigLoader, ModeConfig};
use crate::error::ApiError;
use crate::host::{EntryLog, FlagValue, HostOutput, JsonlEntryLog, LocalHost, NotifyLevel};
use crate::logging::LoggingConfig;
use crate::mode::{ModeController, ENABLE_FLAG, PROMPT_FLAG};
use crate::prompt::PromptResolver;
use clap::{Parser, Subcommand};
use serde_json::json;
use std::path::PathBuf;
use std::sync::Arc;

/// pkm-mode CLI - PKM mode toggle for coding-agent sessions
#[derive(Parser, Debug)]
#[command(name = "pkm-mode")]
#[command(about = "Toggle PKM mode and inspect the system prompt it produces")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Workspace root directory
    #[arg(long, default_value = ".")]
    pub workspace: PathBuf,

    /// Configuration file path (overrides default config loading)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Session log file (JSON Lines); defaults to a per-workspace file in the state directory
    #[arg(long)]
    pub session: Option<PathBuf>,

    /// Start the session with PKM mode enabled
    #[arg(long)]
    pub pkm: bool,

    /// File to read the PKM prompt from
    #[arg(long, value_name = "PATH")]
    pub pkm_prompt: Option<String>,

    /// Log level (trace, debug, info, warn, error, off)
    #[arg(long)]
    pub log_level: Option<String>,

    /// Log format (json, text)
    #[arg(long)]
    pub log_format: Option<String>,

    /// Log output (stdout, stderr, file, file+stderr)
    #[arg(long)]
    pub log_output: Option<String>,

    /// Log file path (if output includes "file")
    #[arg(long)]
    pub log_file: Option<PathBuf>,
}

impl Cli {
    /// Fold CLI logging flags over the configured logging settings.
    ///
    /// `--log-file` is not folded in; it is passed to
    /// [`init_logging`](crate::logging::init_logging) so it keeps precedence
    /// over `PKM_MODE_LOG_FILE`.
    pub fn logging_config(&self, base: &LoggingConfig) -> LoggingConfig {
        let mut config = base.clone();
        if let Some(level) = &self.log_level {
            config.level = level.clone();
        }
        if let Some(format) = &self.log_format {
            config.format = format.clone();
        }
        if let Some(output) = &self.log_output {
            config.output = output.clone();
        }
        config
    }

    pub fn startup_flags(&self) -> StartupFlags {
        StartupFlags {
            pkm: self.pkm,
            pkm_prompt: self.pkm_prompt.clone(),
        }
    }
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Run the pkm command: on, off, status, a message to send, or nothing to toggle
    Pkm {
        #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
        args: Vec<String>,
    },
    /// Print the system prompt as the agent would receive it
    Prompt {
        /// Base system prompt to extend
        #[arg(long, default_value = "")]
        system: String,
    },
    /// Show the reconciled mode state
    State {
        /// Output format (text or json)
        #[arg(long, default_value = "text")]
        format: String,
    },
}

/// Startup flags forwarded to the host's flag table.
#[derive(Debug, Clone, Default)]
pub struct StartupFlags {
    pub pkm: bool,
    pub pkm_prompt: Option<String>,
}

/// CLI context: workspace, configuration, and session log location.
pub struct CliContext {
    workspace: PathBuf,
    config: ModeConfig,
    session_path: PathBuf,
    startup: StartupFlags,
}

impl CliContext {
    pub fn new(workspace: PathBuf, config_path: Option<PathBuf>) -> Result<Self, ApiError> {
        let config = match &config_path {
            Some(path) => ConfigLoader::load_from_file(path)?,
            None => ConfigLoader::load(&workspace)?,
        };
        let session_path = xdg::workspace_state_dir(&workspace)?.join("session.jsonl");
        Ok(Self {
            workspace,
            config,
            session_path,
            startup: StartupFlags::default(),
        })
    }

    pub fn with_session_path(mut self, session_path: Option<PathBuf>) -> Self {
        if let Some(path) = session_path {
            self.session_path = path;
        }
        self
    }

    pub fn with_startup(mut self, startup: StartupFlags) -> Self {
        self.startup = startup;
        self
    }

    pub fn config(&self) -> &ModeConfig {
        &self.config
    }

    pub fn session_path(&self) -> &PathBuf {
        &self.session_path
    }

    fn start_session(&self) -> (ModeController, LocalHost) {
        let log: Arc<dyn EntryLog> = Arc::new(JsonlEntryLog::new(&self.session_path));
        let mut host = LocalHost::new(log);
        if self.startup.pkm {
            host.set_flag(ENABLE_FLAG, FlagValue::Bool(true));
        }
        if let Some(path) = &self.startup.pkm_prompt {
            host.set_flag(PROMPT_FLAG, FlagValue::Text(path.clone()));
        }

        let resolver = PromptResolver::from_config(&self.config.prompt, &self.workspace);
        let mut controller = ModeController::new(resolver);
        controller.register(&mut host);
        controller.on_session_start(&mut host);
        (controller, host)
    }

    /// Execute one command and return its printable output.
    pub fn execute(&self, command: &Commands) -> Result<String, ApiError> {
        let (mut controller, mut host) = self.start_session();
        match command {
            Commands::Pkm { args } => {
                host.drain_outbox();
                controller.handle_command(&args.join(" "), &mut host);
                Ok(render_outputs(host.outbox()).join("\n"))
            }
            Commands::Prompt { system } => Ok(controller.before_agent_start(system)),
            Commands::State { format } => {
                let state = controller.state();
                match format.as_str() {
                    "json" => {
                        let value = json!({
                            "enabled": state.enabled(),
                            "prompt_source": state.prompt_source().to_string(),
                            "prompt_text": state.prompt_text(),
                            "supplementary_path": state
                                .supplementary_path()
                                .map(|p| p.display().to_string()),
                            "session_log": self.session_path.display().to_string(),
                        });
                        Ok(serde_json::to_string_pretty(&value)?)
                    }
                    "text" => {
                        let notes = state
                            .supplementary_path()
                            .map(|p| p.display().to_string())
                            .unwrap_or_else(|| "(none)".to_string());
                        Ok(format!(
                            "PKM mode: {}\nPrompt source: {}\nNotes path: {}\nSession log: {}",
                            if state.enabled() { "enabled" } else { "disabled" },
                            state.prompt_source(),
                            notes,
                            self.session_path.display()
                        ))
                    }
                    other => Err(ApiError::ConfigError(format!(
                        "Invalid format: {} (must be 'text' or 'json')",
                        other
                    ))),
                }
            }
        }
    }
}

/// One line per host output, in the order the controller produced them.
pub fn render_outputs(outputs: &[HostOutput]) -> Vec<String> {
    outputs
        .iter()
        .map(|output| match output {
            HostOutput::Notice { message, level } => {
                let label = match level {
                    NotifyLevel::Info => "info",
                    NotifyLevel::Warning => "warning",
                    NotifyLevel::Error => "error",
                };
                format!("[{}] {}", label, message)
            }
            HostOutput::Status {
                key,
                text: Some(text),
            } => format!("[status] {}: {}", key, text),
            HostOutput::Status { key, text: None } => format!("[status] {} cleared", key),
            HostOutput::UserMessage(text) => format!("> {}", text),
        })
        .collect()
}
