use pkm_mode::config::{ConfigLoader, PromptPolicyKind};

use crate::support::TestWorkspace;

#[test]
fn workspace_file_is_layered_over_defaults() {
    let ws = TestWorkspace::new();
    ws.write(
        ".pkm-mode.toml",
        "[prompt]\npolicy = \"settings\"\n\n[logging]\nformat = \"json\"\n",
    );

    let config = ConfigLoader::load(&ws.root()).unwrap();
    assert_eq!(config.prompt.policy, PromptPolicyKind::Settings);
    assert_eq!(config.logging.format, "json");
    assert_eq!(config.logging.level, "info");
    assert!(!config.prompt.hints.is_empty());
}

#[test]
fn explicit_config_file_must_exist() {
    let ws = TestWorkspace::new();
    let result = ConfigLoader::load_from_file(&ws.temp.path().join("nope.toml"));
    assert!(result.is_err());
}

#[test]
fn explicit_config_file_is_loaded() {
    let ws = TestWorkspace::new();
    ws.write_config("[prompt]\ncandidates = [\"a.md\", \"b.md\"]\n");

    let config = ConfigLoader::load_from_file(&ws.config_path()).unwrap();
    assert_eq!(config.prompt.policy, PromptPolicyKind::Builtin);
    assert_eq!(config.prompt.candidates, vec!["a.md", "b.md"]);
}
