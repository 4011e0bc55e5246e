use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::domain::effects::EffectToAdd;
use crate::domain::history::PendingEntry;
use crate::domain::state::{GamePhase, GameState, PlayerId, PlayerState};
use crate::domain::teams::Alignment;
use crate::night::pipeline::Intent;

/// Top-level GameState fields to replace. Absent fields are left alone.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateUpdates {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub round: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phase: Option<GamePhase>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub players: Option<Vec<PlayerState>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Alignment>,
}

impl StateUpdates {
    /// Shallow merge into `state`.
    pub fn merge_into(self, state: &mut GameState) {
        if let Some(round) = self.round {
            state.round = round;
        }
        if let Some(phase) = self.phase {
            state.phase = phase;
        }
        if let Some(players) = self.players {
            state.players = players;
        }
        if let Some(winner) = self.winner {
            state.winner = Some(winner);
        }
    }
}

/// Output of a role's night action, consumed once by result application.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightActionResult {
    pub entries: Vec<PendingEntry>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state_updates: Option<StateUpdates>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub add_effects: BTreeMap<PlayerId, Vec<EffectToAdd>>,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub remove_effects: BTreeMap<PlayerId, Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intent: Option<Intent>,
}

impl NightActionResult {
    pub fn with_entry(entry: PendingEntry) -> Self {
        Self {
            entries: vec![entry],
            ..Default::default()
        }
    }
}
