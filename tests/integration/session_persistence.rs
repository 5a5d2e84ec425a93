use pkm_mode::host::{EntryLog, FlagValue, JsonlEntryLog, LocalHost, SessionEntry};
use pkm_mode::mode::{latest_enabled, ModeController, CUSTOM_TYPE, ENABLE_FLAG};
use pkm_mode::PromptResolver;
use serde_json::json;
use std::sync::Arc;

use crate::support::TestWorkspace;

fn session(log: &Arc<JsonlEntryLog>, seed: bool) -> (ModeController, LocalHost) {
    let mut host = LocalHost::new(log.clone());
    if seed {
        host.set_flag(ENABLE_FLAG, FlagValue::Bool(true));
    }
    let mut controller = ModeController::new(PromptResolver::builtin());
    controller.register(&mut host);
    controller.on_session_start(&mut host);
    (controller, host)
}

#[test]
fn state_survives_restart() {
    let ws = TestWorkspace::new();
    let log = Arc::new(JsonlEntryLog::new(ws.session_path()));

    let (mut first, mut host) = session(&log, false);
    assert!(!first.state().enabled());
    first.handle_command("on", &mut host);

    let (second, _) = session(&log, false);
    assert!(second.state().enabled());
}

#[test]
fn persisted_disable_beats_startup_flag() {
    let ws = TestWorkspace::new();
    let log = Arc::new(JsonlEntryLog::new(ws.session_path()));
    log.append(&SessionEntry::custom(CUSTOM_TYPE, json!({"enabled": false})))
        .unwrap();

    let (controller, host) = session(&log, true);
    assert!(!controller.state().enabled());
    assert_eq!(host.status("pkm"), None);
}

#[test]
fn foreign_and_corrupt_lines_are_ignored() {
    let ws = TestWorkspace::new();
    let log = Arc::new(JsonlEntryLog::new(ws.session_path()));
    log.append(&SessionEntry::custom(CUSTOM_TYPE, json!({"enabled": true})))
        .unwrap();
    log.append(&SessionEntry::custom("todo-list", json!({"enabled": false})))
        .unwrap();
    let mut raw = std::fs::read_to_string(ws.session_path()).unwrap();
    raw.push_str("not json at all\n");
    raw.push_str(r#"{"type":"custom","customType":"pkm-mode","data":{"on":false},"timestamp":"2026-03-01T00:00:00Z"}"#);
    raw.push('\n');
    std::fs::write(ws.session_path(), raw).unwrap();

    let entries = log.load().unwrap();
    assert_eq!(entries.len(), 3);
    assert_eq!(latest_enabled(&entries), Some(true));

    let (controller, _) = session(&log, false);
    assert!(controller.state().enabled());
}

#[test]
fn untimestamped_record_still_counts() {
    let ws = TestWorkspace::new();
    let log = Arc::new(JsonlEntryLog::new(ws.session_path()));
    log.append(&SessionEntry::custom(CUSTOM_TYPE, json!({"enabled": true})))
        .unwrap();
    let mut raw = std::fs::read_to_string(ws.session_path()).unwrap();
    raw.push_str(r#"{"type":"custom","customType":"pkm-mode","data":{"enabled":false}}"#);
    raw.push('\n');
    std::fs::write(ws.session_path(), raw).unwrap();

    let entries = log.load().unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(latest_enabled(&entries), Some(false));

    let (controller, host) = session(&log, false);
    assert!(!controller.state().enabled());
    assert_eq!(host.status("pkm"), None);
}
