use pkm_mode::prompt::DEFAULT_PKM_PROMPT;
use pkm_mode::tooling::cli::{Commands, StartupFlags};
use pkm_mode::ApiError;

use crate::support::TestWorkspace;

fn pkm(args: &[&str]) -> Commands {
    Commands::Pkm {
        args: args.iter().map(|a| a.to_string()).collect(),
    }
}

fn state_json(output: &str) -> serde_json::Value {
    serde_json::from_str(output).unwrap()
}

#[test]
fn pkm_on_reports_and_persists() {
    let ws = TestWorkspace::new();
    let cli = ws.context(StartupFlags::default());

    let output = cli.execute(&pkm(&["on"])).unwrap();
    assert_eq!(
        output,
        "[status] pkm: PKM\n[info] PKM mode enabled. Prompt: builtin-default"
    );

    let state = state_json(
        &cli.execute(&Commands::State {
            format: "json".to_string(),
        })
        .unwrap(),
    );
    assert_eq!(state["enabled"], true);
    assert_eq!(state["prompt_source"], "builtin-default");
    assert!(state["supplementary_path"].is_null());

    let log = std::fs::read_to_string(ws.session_path()).unwrap();
    assert_eq!(log.lines().count(), 1);
    assert!(log.contains(r#""customType":"pkm-mode""#));
}

#[test]
fn empty_pkm_toggles_across_sessions() {
    let ws = TestWorkspace::new();
    let cli = ws.context(StartupFlags::default());

    assert!(cli.execute(&pkm(&[])).unwrap().contains("PKM mode enabled."));
    assert!(cli.execute(&pkm(&[])).unwrap().contains("PKM mode disabled."));
    let state = state_json(
        &cli.execute(&Commands::State {
            format: "json".to_string(),
        })
        .unwrap(),
    );
    assert_eq!(state["enabled"], false);
}

#[test]
fn free_text_enables_and_forwards_message() {
    let ws = TestWorkspace::new();
    let cli = ws.context(StartupFlags::default());

    let output = cli
        .execute(&pkm(&["file", "this", "under", "Reading"]))
        .unwrap();
    let lines: Vec<&str> = output.lines().collect();
    assert_eq!(
        lines,
        vec![
            "[status] pkm: PKM",
            "[info] PKM mode enabled. Prompt: builtin-default",
            "> file this under Reading",
        ]
    );
}

#[test]
fn status_does_not_touch_session_log() {
    let ws = TestWorkspace::new();
    let cli = ws.context(StartupFlags::default());

    let output = cli.execute(&pkm(&["status"])).unwrap();
    assert_eq!(output, "[info] PKM mode disabled. Prompt: builtin-default");
    assert!(!ws.session_path().exists());
}

#[test]
fn prompt_is_extended_only_while_enabled() {
    let ws = TestWorkspace::new();
    let cli = ws.context(StartupFlags::default());
    let prompt = Commands::Prompt {
        system: "You are a coding agent.".to_string(),
    };

    assert_eq!(cli.execute(&prompt).unwrap(), "You are a coding agent.");
    cli.execute(&pkm(&["enable"])).unwrap();
    assert_eq!(
        cli.execute(&prompt).unwrap(),
        format!("You are a coding agent.\n\n{}", DEFAULT_PKM_PROMPT)
    );
}

#[test]
fn startup_flag_seeds_but_log_overrides() {
    let ws = TestWorkspace::new();
    let seeded = ws.context(StartupFlags {
        pkm: true,
        pkm_prompt: None,
    });
    let state_cmd = Commands::State {
        format: "text".to_string(),
    };

    assert!(seeded
        .execute(&state_cmd)
        .unwrap()
        .starts_with("PKM mode: enabled"));

    ws.context(StartupFlags::default())
        .execute(&pkm(&["off"]))
        .unwrap();
    assert!(seeded
        .execute(&state_cmd)
        .unwrap()
        .starts_with("PKM mode: disabled"));
}

#[test]
fn invalid_state_format_is_rejected() {
    let ws = TestWorkspace::new();
    let result = ws.context(StartupFlags::default()).execute(&Commands::State {
        format: "yaml".to_string(),
    });
    assert!(matches!(result, Err(ApiError::ConfigError(_))));
}
