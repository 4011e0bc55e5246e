#![allow(dead_code)]

// Logging is auto-installed for every test binary that declares `mod common;`
#[ctor::ctor]
fn init_logging() {
    narrator_test_support::logging::init();
}

use narrator::{HistoryEntry, NightEngine};
use serde_json::Value;

/// Most recent `night_action` entry written by `role_id`.
pub fn last_action_of<'a, S: narrator::IntentSink>(
    engine: &'a NightEngine<'_, S>,
    role_id: &str,
) -> &'a HistoryEntry {
    engine
        .game()
        .history
        .entries()
        .iter()
        .rev()
        .find(|e| e.data.get("roleId").and_then(Value::as_str) == Some(role_id))
        .unwrap_or_else(|| panic!("no entry for {role_id}"))
}
