use pkm_mode::tooling::cli::{Commands, StartupFlags};

use crate::support::{write_file, TestWorkspace};

fn state(ws: &TestWorkspace, startup: StartupFlags) -> serde_json::Value {
    let output = ws
        .context(startup)
        .execute(&Commands::State {
            format: "json".to_string(),
        })
        .unwrap();
    serde_json::from_str(&output).unwrap()
}

#[test]
fn candidate_source_file_supplies_prompt() {
    let ws = TestWorkspace::new();
    ws.write_config(
        r#"
[prompt]
policy = "candidates"
candidates = ["missing/pkm.ts", "extensions/pkm.ts"]
"#,
    );
    let source = ws.write(
        "extensions/pkm.ts",
        "const HELP = `\n  usage\n`;\nexport const PKM_PROMPT = `\n    Keep notes atomic.\n    Link them.\n`;\n",
    );

    let state = state(&ws, StartupFlags::default());
    assert_eq!(state["prompt_text"], "Keep notes atomic.\nLink them.");
    assert_eq!(state["prompt_source"], source.display().to_string());
}

#[test]
fn unreadable_candidates_fall_back_to_builtin() {
    let ws = TestWorkspace::new();
    ws.write_config(
        r#"
[prompt]
policy = "candidates"
candidates = ["extensions/empty.ts", "extensions/"]
"#,
    );
    ws.write("extensions/empty.ts", "");

    let state = state(&ws, StartupFlags::default());
    assert_eq!(state["prompt_source"], "builtin-default");
    assert_eq!(state["prompt_text"], pkm_mode::prompt::DEFAULT_PKM_PROMPT);
}

#[test]
fn prompt_flag_wins_over_candidates() {
    let ws = TestWorkspace::new();
    ws.write_config(
        r#"
[prompt]
policy = "candidates"
candidates = ["prompts/configured.md"]
"#,
    );
    ws.write("prompts/configured.md", "Configured.");
    ws.write("prompts/flag.md", "From the flag.");

    let state = state(
        &ws,
        StartupFlags {
            pkm: false,
            pkm_prompt: Some("prompts/flag.md".to_string()),
        },
    );
    assert_eq!(state["prompt_text"], "From the flag.");
}

#[test]
fn settings_policy_adds_notes_pointer() {
    let ws = TestWorkspace::new();
    let global = ws.temp.path().join("home").join("settings.json");
    write_file(&global, r#"{"pkmPath": "/global/vault"}"#);
    ws.write_config(&format!(
        "[prompt]\npolicy = \"settings\"\nglobal_settings = \"{}\"\n",
        global.display()
    ));

    let global_only = state(&ws, StartupFlags::default());
    assert_eq!(global_only["supplementary_path"], "/global/vault");

    ws.write(".pi/settings.json", r#"{"pkm_path": "notes"}"#);
    let cli = ws.context(StartupFlags { pkm: true, pkm_prompt: None });
    let prompt = cli
        .execute(&Commands::Prompt {
            system: "Base.".to_string(),
        })
        .unwrap();
    let expected_pointer = format!("PKM notes are stored in {}.", ws.root().join("notes").display());
    assert!(prompt.starts_with("Base.\n\n"));
    assert!(prompt.ends_with(&expected_pointer), "{prompt}");
}
