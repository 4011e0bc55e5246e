//! Game container and the phase transitions that bracket a night.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, info};
use ulid::Ulid;

use crate::domain::effects::{add_effects, expire_effects};
use crate::domain::history::{History, HistoryEntry, HistoryKind, Message, PendingEntry};
use crate::domain::state::{require_player_mut, Expiry, GamePhase, GameState, PlayerState};
use crate::domain::win::WinOutcome;
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::roles::RoleCatalog;

/// One game instance: its state and its history. Never shared across games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    pub state: GameState,
    pub history: History,
}

impl Game {
    pub fn new(players: Vec<PlayerState>) -> Self {
        Self::with_id(Ulid::new().to_string(), players)
    }

    pub fn with_id(id: impl Into<String>, players: Vec<PlayerState>) -> Self {
        Self {
            id: id.into(),
            state: GameState::new(players),
            history: History::new(),
        }
    }

    /// Round as seen by the latest history snapshot.
    ///
    /// Wake predicates read this so they observe everything recorded so far
    /// this night.
    pub fn current_round(&self) -> u32 {
        self.history
            .latest_snapshot()
            .map_or(self.state.round, |s| s.round)
    }

    pub fn is_first_night(&self) -> bool {
        self.current_round() == 1
    }

    /// Append an entry stamped with the current state.
    pub fn record(&mut self, pending: PendingEntry) -> &HistoryEntry {
        self.history.append(pending, &self.state)
    }

    /// Grant initial effects and record the start of the game.
    pub fn start(&mut self, catalog: &RoleCatalog) -> Result<(), DomainError> {
        if self.state.phase != GamePhase::Setup || !self.history.is_empty() {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Game already started",
            ));
        }

        let mut ids = HashSet::new();
        for player in &self.state.players {
            if !ids.insert(player.id.as_str()) {
                return Err(DomainError::conflict(
                    ConflictKind::DuplicatePlayerId,
                    format!("player id '{}' seated twice", player.id),
                ));
            }
        }

        let grants: Vec<(String, Vec<_>)> = self
            .state
            .players
            .iter()
            .filter_map(|p| {
                let role = catalog.role_of(p)?;
                if role.initial_effects.is_empty() {
                    return None;
                }
                let effects = role
                    .initial_effects
                    .iter()
                    .map(|e| e.to_effect().into_effect())
                    .collect();
                Some((p.id.clone(), effects))
            })
            .collect();
        for (player_id, effects) in grants {
            add_effects(&mut self.state, &player_id, effects);
        }

        info!(game_id = %self.id, players = self.state.players.len(), "Game started");
        self.record(PendingEntry::new(
            HistoryKind::GameStarted,
            Message::new("game.history.started").param("players", self.state.players.len()),
            json!({ "players": self.state.players.len() }),
        ));
        Ok(())
    }

    /// Advance to the next night. Effects lasting until end of day expire.
    pub fn start_night(&mut self) -> Result<u32, DomainError> {
        self.require_not_ended()?;
        let ready = match self.state.phase {
            GamePhase::Setup => !self.history.is_empty(),
            GamePhase::Day => true,
            _ => false,
        };
        if !ready {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Night can only start after setup or a day",
            ));
        }

        let expired = expire_effects(&mut self.state, Expiry::EndOfDay);
        self.state.round += 1;
        self.state.phase = GamePhase::Night;
        let round = self.state.round;

        debug!(game_id = %self.id, round, expired, "Night started");
        self.record(PendingEntry::new(
            HistoryKind::NightStarted,
            Message::new("game.history.nightStarted").param("round", round),
            json!({ "round": round }),
        ));
        Ok(round)
    }

    /// Advance to day. Effects lasting until end of night expire.
    pub fn start_day(&mut self) -> Result<(), DomainError> {
        self.require_not_ended()?;
        if self.state.phase != GamePhase::Night {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Day can only start after a night",
            ));
        }

        let expired = expire_effects(&mut self.state, Expiry::EndOfNight);
        self.state.phase = GamePhase::Day;
        let round = self.state.round;

        debug!(game_id = %self.id, round, expired, "Day started");
        self.record(PendingEntry::new(
            HistoryKind::DayStarted,
            Message::new("game.history.dayStarted").param("round", round),
            json!({ "round": round }),
        ));
        Ok(())
    }

    /// Execute a living player during the day.
    pub fn execute(&mut self, player_id: &str) -> Result<(), DomainError> {
        self.require_not_ended()?;
        if self.state.phase != GamePhase::Day {
            return Err(DomainError::validation(
                ValidationKind::PhaseMismatch,
                "Executions only happen during the day",
            ));
        }

        let player = require_player_mut(&mut self.state, player_id)?;
        if !player.alive {
            return Err(DomainError::validation(
                ValidationKind::PlayerDead,
                format!("player '{player_id}' is already dead"),
            ));
        }
        player.alive = false;
        let role_id = player.role_id.clone();

        info!(game_id = %self.id, player_id, "Player executed");
        self.record(PendingEntry::new(
            HistoryKind::Execution,
            Message::new("game.history.execution").param("player", player_id),
            json!({ "playerId": player_id, "roleId": role_id }),
        ));
        Ok(())
    }

    /// Liveness change driven by an outside resolver (e.g. a demon attack).
    ///
    /// Returns `false` for unknown players.
    pub fn mark_dead(&mut self, player_id: &str) -> bool {
        match self.state.player_mut(player_id) {
            Some(player) => {
                player.alive = false;
                true
            }
            None => false,
        }
    }

    /// Close the game with the given outcome.
    pub fn end(&mut self, outcome: &WinOutcome) {
        self.state.phase = GamePhase::Ended;
        self.state.winner = Some(outcome.winner);

        info!(
            game_id = %self.id,
            winner = ?outcome.winner,
            condition = %outcome.condition_id,
            "Game ended"
        );
        self.record(PendingEntry::new(
            HistoryKind::GameEnded,
            Message::new("game.history.ended").param("condition", &outcome.condition_id),
            json!({
                "winner": outcome.winner,
                "conditionId": outcome.condition_id,
                "roleId": outcome.role_id,
            }),
        ));
    }

    fn require_not_ended(&self) -> Result<(), DomainError> {
        if self.state.phase == GamePhase::Ended {
            return Err(DomainError::validation(
                ValidationKind::GameEnded,
                "Game has ended",
            ));
        }
        Ok(())
    }
}
