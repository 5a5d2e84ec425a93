//! Integration tests for pkm-mode

mod cli_session;
mod config_layers;
mod prompt_sources;
mod session_persistence;
mod support;
