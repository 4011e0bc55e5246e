//! Engine facade: drives one game through nights, days and executions.
//!
//! The engine owns the [`Game`], the in-flight [`NightSchedule`] and the
//! intent sink. Shells talk to it through prompts and Narrator inputs only.

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info};

use crate::config::EngineConfig;
use crate::domain::game::Game;
use crate::domain::persist::{self, SavedGame};
use crate::domain::state::{GamePhase, PlayerState};
use crate::domain::win::{self, WinOutcome};
use crate::error::EngineError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::night::apply::{apply_night_action_result, AppliedResult};
use crate::night::pipeline::IntentSink;
use crate::night::result::NightActionResult;
use crate::night::scheduler::NightSchedule;
use crate::night::session::{AbilityContext, ActionPrompt, ActionSession, NarratorInput, NightAbility};
use crate::roles::{RoleCatalog, RoleReveal};

/// What completing an action changed, and whether it ended the game.
#[derive(Debug, Clone, PartialEq)]
pub struct ActionOutcome {
    pub role_id: String,
    pub player_id: String,
    pub applied: AppliedResult,
    pub ended: Option<WinOutcome>,
}

pub struct NightEngine<'c, S: IntentSink> {
    catalog: &'c RoleCatalog,
    game: Game,
    night: Option<NightSchedule>,
    sink: S,
    rng: ChaCha8Rng,
}

fn no_active_action() -> DomainError {
    DomainError::validation(ValidationKind::NoActiveAction, "No night action is open")
}

impl<'c, S: IntentSink> NightEngine<'c, S> {
    pub fn new(catalog: &'c RoleCatalog, game: Game, sink: S, config: &EngineConfig) -> Self {
        Self {
            catalog,
            game,
            night: None,
            sink,
            rng: config.rng(),
        }
    }

    /// Continue a saved game, including a night left half-way.
    pub fn resume(catalog: &'c RoleCatalog, saved: SavedGame, sink: S, config: &EngineConfig) -> Self {
        let mut engine = Self::new(catalog, saved.game, sink, config);
        engine.night = saved.night;
        engine
    }

    pub fn save(&self) -> Result<String, EngineError> {
        persist::to_json(&self.game, self.night.as_ref())
    }

    pub fn game(&self) -> &Game {
        &self.game
    }

    pub fn catalog(&self) -> &'c RoleCatalog {
        self.catalog
    }

    pub fn schedule(&self) -> Option<&NightSchedule> {
        self.night.as_ref()
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn sink_mut(&mut self) -> &mut S {
        &mut self.sink
    }

    pub fn into_parts(self) -> (Game, S) {
        (self.game, self.sink)
    }

    pub fn reveal(&self, player_id: &str) -> Option<RoleReveal> {
        let player = self.game.state.player(player_id)?;
        Some(self.catalog.role_of(player)?.reveal(player))
    }

    pub fn start_game(&mut self) -> Result<(), DomainError> {
        self.game.start(self.catalog)
    }

    /// Start the next night and build its acting order.
    pub fn begin_night(&mut self) -> Result<u32, DomainError> {
        if self.night.is_some() {
            return Err(DomainError::validation(
                ValidationKind::NightInProgress,
                "A night is already in progress",
            ));
        }
        let round = self.game.start_night()?;
        let schedule = NightSchedule::build(self.catalog, &self.game.state);
        info!(game_id = %self.game.id, round, slots = schedule.slots().len(), "Night begins");
        self.night = Some(schedule);
        Ok(round)
    }

    /// Open the next role that wakes and return its prompt. `None` means
    /// the night has nobody left to act.
    pub fn next_action(&mut self) -> Option<ActionPrompt> {
        if self.game.state.phase == GamePhase::Ended {
            return None;
        }
        let night = self.night.as_mut()?;
        night.advance(self.catalog, &self.game);
        self.prompt()
    }

    /// Prompt for the open action, if any.
    pub fn prompt(&self) -> Option<ActionPrompt> {
        let session = self.night.as_ref()?.session()?;
        let (ability, player) = self.resolve(session)?;
        let cx = AbilityContext {
            catalog: self.catalog,
            game: &self.game,
            player,
        };
        Some(ActionPrompt {
            role_id: session.role_id.clone(),
            player_id: session.player_id.clone(),
            phase: session.phase,
            view: ability.view(&cx, session),
            can_proceed: ability.can_proceed(&cx, session),
        })
    }

    /// Feed one Narrator input to the open action. `Ok(false)` means the
    /// input was refused and nothing changed.
    pub fn input(&mut self, input: &NarratorInput) -> Result<bool, DomainError> {
        let catalog = self.catalog;
        let session = self
            .night
            .as_mut()
            .and_then(NightSchedule::session_mut)
            .ok_or_else(no_active_action)?;

        if let NarratorInput::ReturnTo { phase } = input {
            return Ok(session.return_to(*phase));
        }

        let Some(ability) = catalog.get(&session.role_id).and_then(|r| r.night_action) else {
            return Ok(false);
        };
        let Some(player) = self.game.state.player(&session.player_id) else {
            return Ok(false);
        };
        let cx = AbilityContext {
            catalog,
            game: &self.game,
            player,
        };
        let accepted = ability.handle(&cx, session, input, &mut self.rng);
        debug!(
            game_id = %self.game.id,
            role_id = %session.role_id,
            phase = ?session.phase,
            accepted,
            "Narrator input"
        );
        Ok(accepted)
    }

    /// Finish the open action and apply its result. `Ok(None)` means the
    /// action is not ready and stays open.
    pub fn complete(&mut self) -> Result<Option<ActionOutcome>, DomainError> {
        let catalog = self.catalog;
        let night = self.night.as_mut().ok_or_else(no_active_action)?;
        let session = night.session().ok_or_else(no_active_action)?;

        let result = match Self::resolve_in(catalog, &self.game, session) {
            Some((ability, player)) => {
                let cx = AbilityContext {
                    catalog,
                    game: &self.game,
                    player,
                };
                ability.complete(&cx, session)
            }
            None => Some(NightActionResult::default()),
        };
        let Some(result) = result else {
            return Ok(None);
        };
        let Some(session) = night.finish_active() else {
            return Err(no_active_action());
        };

        let applied = apply_night_action_result(&mut self.game, result, &mut self.sink);
        info!(
            game_id = %self.game.id,
            role_id = %session.role_id,
            player_id = %session.player_id,
            entries = applied.entry_ids.len(),
            "Night action applied"
        );
        let ended = self.evaluate_win();
        Ok(Some(ActionOutcome {
            role_id: session.role_id,
            player_id: session.player_id,
            applied,
            ended,
        }))
    }

    /// Close the night and start the day. Fails while any role still has to
    /// act; call [`Self::next_action`] until it returns `None` first.
    pub fn end_night(&mut self) -> Result<Option<WinOutcome>, DomainError> {
        if let Some(night) = &self.night {
            if !night.is_finished() {
                return Err(DomainError::validation(
                    ValidationKind::NightInProgress,
                    "Night still has actions to resolve",
                ));
            }
        }
        self.game.start_day()?;
        self.night = None;
        Ok(self.evaluate_win())
    }

    pub fn execute(&mut self, player_id: &str) -> Result<Option<WinOutcome>, DomainError> {
        self.game.execute(player_id)?;
        Ok(self.evaluate_win())
    }

    /// Liveness change reported by the action pipeline.
    pub fn mark_dead(&mut self, player_id: &str) -> Result<Option<WinOutcome>, DomainError> {
        if self.game.state.phase == GamePhase::Ended {
            return Err(DomainError::validation(ValidationKind::GameEnded, "Game has ended"));
        }
        if !self.game.mark_dead(player_id) {
            return Err(DomainError::not_found(
                NotFoundKind::Player,
                format!("player '{player_id}' is not seated"),
            ));
        }
        Ok(self.evaluate_win())
    }

    /// End the game if a win condition holds.
    pub fn evaluate_win(&mut self) -> Option<WinOutcome> {
        if self.game.state.phase == GamePhase::Ended {
            return None;
        }
        let outcome = win::evaluate(self.catalog, &self.game.state)?;
        self.game.end(&outcome);
        self.night = None;
        Some(outcome)
    }

    fn resolve<'a>(
        &'a self,
        session: &ActionSession,
    ) -> Option<(&'static dyn NightAbility, &'a PlayerState)> {
        Self::resolve_in(self.catalog, &self.game, session)
    }

    fn resolve_in<'a>(
        catalog: &RoleCatalog,
        game: &'a Game,
        session: &ActionSession,
    ) -> Option<(&'static dyn NightAbility, &'a PlayerState)> {
        let ability = catalog.get(&session.role_id)?.night_action?;
        let player = game.state.player(&session.player_id)?;
        Some((ability, player))
    }
}
