//! pkm-mode CLI Binary
//!
//! Runs one host session per invocation against a JSON Lines session log.

use anyhow::Context;
use clap::Parser;
use pkm_mode::logging::init_logging;
use pkm_mode::tooling::cli::{Cli, CliContext};
use std::process;

fn run(cli: &Cli) -> anyhow::Result<String> {
    let context = CliContext::new(cli.workspace.clone(), cli.config.clone())
        .context("Error initializing workspace")?
        .with_session_path(cli.session.clone())
        .with_startup(cli.startup_flags());

    let logging = cli.logging_config(&context.config().logging);
    init_logging(Some(&logging), cli.log_file.clone()).context("Error initializing logging")?;

    Ok(context.execute(&cli.command)?)
}

fn main() {
    let cli = Cli::parse();

    match run(&cli) {
        Ok(output) => {
            if !output.is_empty() {
                println!("{}", output);
            }
        }
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
