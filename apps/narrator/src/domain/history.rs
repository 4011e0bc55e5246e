//! Append-only game history.
//!
//! Every resolved action and phase boundary is recorded here. Abilities
//! answer "what happened recently" questions by scanning this log instead of
//! keeping their own trackers.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;
use time::OffsetDateTime;

use crate::domain::state::GameState;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HistoryKind {
    GameStarted,
    NightStarted,
    DayStarted,
    Execution,
    NightAction,
    GameEnded,
}

/// Localized text reference. The engine never inspects the content.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Message {
    pub key: String,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub params: BTreeMap<String, String>,
}

impl Message {
    pub fn new(key: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, name: impl Into<String>, value: impl ToString) -> Self {
        self.params.insert(name.into(), value.to_string());
        self
    }
}

/// An entry as produced by action logic, before the log stamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PendingEntry {
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub message: Vec<Message>,
    #[serde(default)]
    pub data: JsonValue,
}

impl PendingEntry {
    pub fn new(kind: HistoryKind, message: Message, data: JsonValue) -> Self {
        Self {
            kind,
            message: vec![message],
            data,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HistoryEntry {
    pub id: u64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
    #[serde(rename = "type")]
    pub kind: HistoryKind,
    pub message: Vec<Message>,
    #[serde(default)]
    pub data: JsonValue,
    pub state_after: GameState,
}

impl HistoryEntry {
    /// Reads a string field out of the payload, if present.
    pub fn data_str(&self, field: &str) -> Option<&str> {
        self.data.get(field)?.as_str()
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct History {
    entries: Vec<HistoryEntry>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    /// Stamp and append an entry. Ids are strictly increasing.
    pub fn append(&mut self, pending: PendingEntry, state_after: &GameState) -> &HistoryEntry {
        let id = self.entries.last().map_or(1, |e| e.id + 1);
        self.entries.push(HistoryEntry {
            id,
            timestamp: OffsetDateTime::now_utc(),
            kind: pending.kind,
            message: pending.message,
            data: pending.data,
            state_after: state_after.clone(),
        });
        &self.entries[self.entries.len() - 1]
    }

    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn last(&self) -> Option<&HistoryEntry> {
        self.entries.last()
    }

    /// State snapshot recorded by the most recent entry.
    pub fn latest_snapshot(&self) -> Option<&GameState> {
        self.entries.last().map(|e| &e.state_after)
    }

    /// Entries from the most recent `boundary` (inclusive) to the end.
    ///
    /// With no boundary in the log the window is the whole log.
    pub fn window_since_last(&self, boundary: HistoryKind) -> &[HistoryEntry] {
        let start = self
            .entries
            .iter()
            .rposition(|e| e.kind == boundary)
            .unwrap_or(0);
        &self.entries[start..]
    }

    /// First `target` entry at or after the most recent `boundary`.
    pub fn since_last(&self, boundary: HistoryKind, target: HistoryKind) -> Option<&HistoryEntry> {
        self.window_since_last(boundary)
            .iter()
            .find(|e| e.kind == target)
    }

    /// Player executed since the current day began, if any.
    pub fn executed_player_since_last_day(&self) -> Option<&str> {
        self.since_last(HistoryKind::DayStarted, HistoryKind::Execution)?
            .data_str("playerId")
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn push(history: &mut History, kind: HistoryKind, data: JsonValue) {
        history.append(
            PendingEntry::new(kind, Message::new("test"), data),
            &GameState::default(),
        );
    }

    #[test]
    fn ids_are_monotonic() {
        let mut h = History::new();
        push(&mut h, HistoryKind::GameStarted, JsonValue::Null);
        push(&mut h, HistoryKind::NightStarted, JsonValue::Null);
        let ids: Vec<u64> = h.entries().iter().map(|e| e.id).collect();
        assert_eq!(ids, vec![1, 2]);
    }

    #[test]
    fn execution_lookup_uses_latest_day() {
        let mut h = History::new();
        push(&mut h, HistoryKind::DayStarted, json!({"round": 1}));
        push(&mut h, HistoryKind::Execution, json!({"playerId": "A"}));
        push(&mut h, HistoryKind::NightAction, json!({}));
        push(&mut h, HistoryKind::DayStarted, json!({"round": 2}));
        push(&mut h, HistoryKind::Execution, json!({"playerId": "B"}));

        assert_eq!(h.executed_player_since_last_day(), Some("B"));
    }

    #[test]
    fn no_execution_in_current_day() {
        let mut h = History::new();
        push(&mut h, HistoryKind::DayStarted, json!({}));
        push(&mut h, HistoryKind::Execution, json!({"playerId": "A"}));
        push(&mut h, HistoryKind::DayStarted, json!({}));
        push(&mut h, HistoryKind::NightStarted, json!({}));

        assert_eq!(h.executed_player_since_last_day(), None);
    }

    #[test]
    fn missing_boundary_searches_whole_log() {
        let mut h = History::new();
        push(&mut h, HistoryKind::Execution, json!({"playerId": "A"}));
        push(&mut h, HistoryKind::Execution, json!({"playerId": "B"}));

        assert_eq!(h.executed_player_since_last_day(), Some("A"));
        assert_eq!(h.window_since_last(HistoryKind::DayStarted).len(), 2);
    }

    #[test]
    fn boundary_is_inclusive() {
        let mut h = History::new();
        push(&mut h, HistoryKind::NightAction, json!({"n": 1}));
        push(&mut h, HistoryKind::NightStarted, json!({"n": 2}));

        let found = h
            .since_last(HistoryKind::NightStarted, HistoryKind::NightStarted)
            .map(|e| e.id);
        assert_eq!(found, Some(2));
    }

    #[test]
    fn empty_log_has_no_answers() {
        let h = History::new();
        assert!(h.since_last(HistoryKind::DayStarted, HistoryKind::Execution).is_none());
        assert!(h.latest_snapshot().is_none());
    }
}
