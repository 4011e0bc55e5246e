//! Per-player effect collections.
//!
//! Effects are only created by applying a night action result (or the
//! initial effects granted at game start) and only destroyed by explicit
//! removal or by crossing the phase boundary named by their expiry.

use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::state::{Effect, Expiry, GameState};

/// Effect description carried by a night action result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EffectToAdd {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<Expiry>,
}

impl EffectToAdd {
    pub fn new(kind: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            data: None,
            expires_at: None,
        }
    }

    pub fn data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }

    pub fn expires(mut self, expires_at: Expiry) -> Self {
        self.expires_at = Some(expires_at);
        self
    }

    pub fn into_effect(self) -> Effect {
        Effect {
            kind: self.kind,
            data: self.data,
            expires_at: self.expires_at.unwrap_or_default(),
        }
    }
}

/// Append effects to a player. Duplicate types are kept side by side.
///
/// Returns `false` when the player does not exist (nothing is applied).
pub fn add_effects<I>(state: &mut GameState, player_id: &str, effects: I) -> bool
where
    I: IntoIterator<Item = Effect>,
{
    let Some(player) = state.player_mut(player_id) else {
        return false;
    };
    player.effects.extend(effects);
    true
}

/// Remove every effect of the given types from a player.
///
/// Removing an absent type is a no-op. Returns how many effects were dropped.
pub fn remove_effect_types<S: AsRef<str>>(state: &mut GameState, player_id: &str, kinds: &[S]) -> usize {
    let Some(player) = state.player_mut(player_id) else {
        return 0;
    };
    let before = player.effects.len();
    player
        .effects
        .retain(|e| !kinds.iter().any(|k| k.as_ref() == e.kind));
    before - player.effects.len()
}

/// Drop every effect whose expiry class matches the boundary being crossed.
pub fn expire_effects(state: &mut GameState, boundary: Expiry) -> usize {
    if boundary == Expiry::Never {
        return 0;
    }
    let mut removed = 0;
    for player in &mut state.players {
        let before = player.effects.len();
        player.effects.retain(|e| e.expires_at != boundary);
        removed += before - player.effects.len();
    }
    removed
}

/// Effects currently attached to a player (empty for unknown players).
pub fn effects_of<'a>(state: &'a GameState, player_id: &str) -> &'a [Effect] {
    state
        .player(player_id)
        .map(|p| p.effects.as_slice())
        .unwrap_or(&[])
}

/// True if any player carries an effect of `kind` whose payload field
/// `field` equals `value`.
pub fn any_player_has_effect_with(state: &GameState, kind: &str, field: &str, value: &str) -> bool {
    state.players.iter().any(|p| {
        p.effects
            .iter()
            .any(|e| e.kind == kind && e.data_str(field) == Some(value))
    })
}
