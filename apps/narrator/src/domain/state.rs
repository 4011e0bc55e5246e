use serde::{Deserialize, Serialize};
use serde_json::Value as JsonValue;

use crate::domain::teams::Alignment;
use crate::errors::domain::{DomainError, NotFoundKind};

pub type PlayerId = String;
pub type RoleId = String;

/// Phase boundary an effect lives until.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expiry {
    /// Removed when the following day starts.
    EndOfNight,
    /// Removed when the following night starts.
    EndOfDay,
    #[default]
    Never,
}

/// Tagged modifier attached to a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Effect {
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<JsonValue>,
    #[serde(default)]
    pub expires_at: Expiry,
}

impl Effect {
    pub fn new(kind: impl Into<String>, expires_at: Expiry) -> Self {
        Self {
            kind: kind.into(),
            data: None,
            expires_at,
        }
    }

    pub fn with_data(mut self, data: JsonValue) -> Self {
        self.data = Some(data);
        self
    }

    /// Reads a string field out of the payload, if present.
    pub fn data_str(&self, field: &str) -> Option<&str> {
        self.data.as_ref()?.get(field)?.as_str()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerState {
    pub id: PlayerId,
    pub name: String,
    pub role_id: RoleId,
    pub alive: bool,
    #[serde(default)]
    pub effects: Vec<Effect>,
}

impl PlayerState {
    pub fn new(id: impl Into<PlayerId>, name: impl Into<String>, role_id: impl Into<RoleId>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            role_id: role_id.into(),
            alive: true,
            effects: Vec::new(),
        }
    }

    #[inline]
    pub fn is_alive(&self) -> bool {
        self.alive
    }

    pub fn has_effect(&self, kind: &str) -> bool {
        self.effects.iter().any(|e| e.kind == kind)
    }
}

/// Overall game progression phases.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GamePhase {
    /// Roles assigned, first night not yet begun.
    #[default]
    Setup,
    Night,
    Day,
    /// A win condition matched.
    Ended,
}

/// Entire game container, sufficient for pure domain operations.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameState {
    /// Night number; 0 before the first night, 1 during and after it.
    pub round: u32,
    pub phase: GamePhase,
    /// Players in seating order.
    pub players: Vec<PlayerState>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub winner: Option<Alignment>,
}

impl GameState {
    pub fn new(players: Vec<PlayerState>) -> Self {
        Self {
            players,
            ..Default::default()
        }
    }

    pub fn player(&self, id: &str) -> Option<&PlayerState> {
        self.players.iter().find(|p| p.id == id)
    }

    pub fn player_mut(&mut self, id: &str) -> Option<&mut PlayerState> {
        self.players.iter_mut().find(|p| p.id == id)
    }

    pub fn alive_players(&self) -> impl Iterator<Item = &PlayerState> {
        self.players.iter().filter(|p| p.is_alive())
    }

    /// Display name for a player, falling back to the raw id.
    pub fn player_name<'a>(&'a self, id: &'a str) -> &'a str {
        self.player(id).map(|p| p.name.as_str()).unwrap_or(id)
    }
}

pub fn require_player<'a>(state: &'a GameState, id: &str) -> Result<&'a PlayerState, DomainError> {
    state
        .player(id)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, id))
}

pub fn require_player_mut<'a>(
    state: &'a mut GameState,
    id: &str,
) -> Result<&'a mut PlayerState, DomainError> {
    state
        .player_mut(id)
        .ok_or_else(|| DomainError::not_found(NotFoundKind::Player, id))
}
