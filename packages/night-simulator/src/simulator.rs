//! In-memory game runner: seats a setup, plays nights and days with a random
//! Narrator, and resolves demon attacks the way the action pipeline would.

use narrator::domain::effects::effects_of;
use narrator::roles::trouble_brewing::{monk, SAFE_FROM_DEMON};
use narrator::{
    Alignment, DomainError, EngineConfig, EngineError, Game, Intent, NightEngine, PlayerState,
    RoleCatalog, Team, WinOutcome,
};
use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::Serialize;
use tracing::{debug, info};

use crate::random_narrator::RandomNarrator;

/// Chance that the town executes someone on a given day.
const EXECUTION_CHANCE: f64 = 0.7;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GameRecord {
    pub game_num: u32,
    pub seed: u64,
    pub roles: Vec<String>,
    pub winner: Option<Alignment>,
    pub condition: Option<String>,
    pub rounds: u32,
    pub kills: u32,
    pub executions: u32,
    pub game: Game,
}

pub struct Simulator<'c> {
    catalog: &'c RoleCatalog,
    players: usize,
    max_rounds: u32,
}

impl<'c> Simulator<'c> {
    pub fn new(catalog: &'c RoleCatalog, players: usize, max_rounds: u32) -> Self {
        Self {
            catalog,
            players,
            max_rounds,
        }
    }

    pub fn simulate_game(
        &self,
        game_num: u32,
        seed: u64,
        setup: Option<&[String]>,
    ) -> Result<GameRecord, EngineError> {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let roles = match setup {
            Some(roles) => self.validate_setup(roles)?,
            None => self.random_setup(&mut rng)?,
        };
        let players = roles
            .iter()
            .enumerate()
            .map(|(i, role)| PlayerState::new(format!("P{}", i + 1), format!("Player {}", i + 1), role))
            .collect();

        let mut engine = NightEngine::new(
            self.catalog,
            Game::new(players),
            Vec::new(),
            &EngineConfig::seeded(seed),
        );
        let mut narrator = RandomNarrator::new(ChaCha8Rng::from_rng(&mut rng));
        let mut stats = Stats::default();
        engine.start_game()?;

        let mut ended = None;
        while ended.is_none() && engine.game().state.round < self.max_rounds {
            ended = self.play_night(&mut engine, &mut narrator, &mut stats)?;
            if ended.is_some() {
                break;
            }
            ended = self.play_day(&mut engine, &mut rng, &mut stats)?;
        }

        let (game, _) = engine.into_parts();
        info!(
            game_num,
            game_id = %game.id,
            rounds = game.state.round,
            winner = ?game.state.winner,
            "Game finished"
        );
        Ok(GameRecord {
            game_num,
            seed,
            roles,
            winner: game.state.winner,
            condition: ended.map(|o| o.condition_id),
            rounds: game.state.round,
            kills: stats.kills,
            executions: stats.executions,
            game,
        })
    }

    fn play_night<R: Rng>(
        &self,
        engine: &mut NightEngine<'_, Vec<Intent>>,
        narrator: &mut RandomNarrator<R>,
        stats: &mut Stats,
    ) -> Result<Option<WinOutcome>, DomainError> {
        engine.begin_night()?;
        while engine.next_action().is_some() {
            let Some(outcome) = narrator.resolve(engine)? else {
                return Err(DomainError::validation_other("narrator could not finish an action"));
            };
            if let Some(ended) = outcome.ended {
                return Ok(Some(ended));
            }
            if let Some(ended) = resolve_intents(engine, stats)? {
                return Ok(Some(ended));
            }
        }
        engine.end_night()
    }

    fn play_day(
        &self,
        engine: &mut NightEngine<'_, Vec<Intent>>,
        rng: &mut ChaCha8Rng,
        stats: &mut Stats,
    ) -> Result<Option<WinOutcome>, DomainError> {
        if !rng.random_bool(EXECUTION_CHANCE) {
            return Ok(None);
        }
        let alive: Vec<String> = engine
            .game()
            .state
            .alive_players()
            .map(|p| p.id.clone())
            .collect();
        let Some(target) = alive.choose(rng) else {
            return Ok(None);
        };
        stats.executions += 1;
        engine.execute(target)
    }

    fn validate_setup(&self, roles: &[String]) -> Result<Vec<String>, EngineError> {
        if let Some(unknown) = roles.iter().find(|r| self.catalog.get(r).is_none()) {
            return Err(EngineError::config(format!("unknown role '{unknown}'")));
        }
        Ok(roles.to_vec())
    }

    /// One demon, one minion from seven players, one outsider, the rest
    /// townsfolk; seats shuffled.
    fn random_setup(&self, rng: &mut ChaCha8Rng) -> Result<Vec<String>, EngineError> {
        if self.players < 3 {
            return Err(EngineError::config("at least 3 players are needed"));
        }
        let of_team = |team: Team| -> Vec<&'static str> {
            self.catalog
                .roles()
                .iter()
                .filter(|r| r.team == team)
                .map(|r| r.id)
                .collect()
        };

        let mut roles: Vec<String> = Vec::with_capacity(self.players);
        let mut draw = |team: Team, count: usize, rng: &mut ChaCha8Rng| -> Result<(), EngineError> {
            let pool = of_team(team);
            if pool.is_empty() && count > 0 {
                return Err(EngineError::config(format!("catalog has no {team} role")));
            }
            for _ in 0..count {
                if let Some(id) = pool.choose(rng) {
                    roles.push((*id).to_string());
                }
            }
            Ok(())
        };

        let minions = usize::from(self.players >= 7);
        let outsiders = usize::from(self.players >= 5);
        draw(Team::Demon, 1, rng)?;
        draw(Team::Minion, minions, rng)?;
        draw(Team::Outsider, outsiders, rng)?;
        draw(Team::Townsfolk, self.players - 1 - minions - outsiders, rng)?;

        roles.shuffle(rng);
        debug!(?roles, "Random setup");
        Ok(roles)
    }
}

#[derive(Debug, Default)]
struct Stats {
    kills: u32,
    executions: u32,
}

/// Resolve forwarded intents: an attack kills its target unless the target
/// is already dead, protected tonight, or safe from the demon.
fn resolve_intents(
    engine: &mut NightEngine<'_, Vec<Intent>>,
    stats: &mut Stats,
) -> Result<Option<WinOutcome>, DomainError> {
    let intents = std::mem::take(engine.sink_mut());
    for intent in intents {
        match intent {
            Intent::Kill { source_id, target_id } => {
                let state = &engine.game().state;
                let alive = state.player(&target_id).is_some_and(|p| p.alive);
                let shielded = effects_of(state, &target_id)
                    .iter()
                    .any(|e| e.kind == monk::PROTECTED || e.kind == SAFE_FROM_DEMON);
                debug!(%source_id, %target_id, alive, shielded, "Attack");
                if alive && !shielded {
                    stats.kills += 1;
                    if let Some(ended) = engine.mark_dead(&target_id)? {
                        return Ok(Some(ended));
                    }
                }
            }
        }
    }
    Ok(None)
}
