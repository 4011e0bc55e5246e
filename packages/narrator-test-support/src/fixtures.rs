//! Seating and engine fixtures.

use narrator::{
    ActionOutcome, ActionView, EngineConfig, Game, Intent, NarratorInput, NightEngine,
    PlayerState, RoleCatalog,
};
use tracing::debug;

const NAMES: [&str; 12] = [
    "Ann", "Bob", "Cid", "Dee", "Eve", "Fay", "Gus", "Hal", "Ivy", "Jo", "Kit", "Lou",
];

/// Seat players `P1..Pn` with the given roles, in order.
pub fn seat(roles: &[&str]) -> Vec<PlayerState> {
    roles
        .iter()
        .enumerate()
        .map(|(i, role)| {
            let name = NAMES.get(i).copied().unwrap_or("Extra");
            PlayerState::new(format!("P{}", i + 1), name, *role)
        })
        .collect()
}

pub fn game(roles: &[&str]) -> Game {
    Game::new(seat(roles))
}

/// Engine over a started game with a fixed seed.
pub fn started_engine<'c>(
    catalog: &'c RoleCatalog,
    roles: &[&str],
    seed: u64,
) -> NightEngine<'c, Vec<Intent>> {
    let mut engine = NightEngine::new(catalog, game(roles), Vec::new(), &EngineConfig::seeded(seed));
    engine.start_game().expect("fresh game starts");
    engine
}

/// Resolve the open action with the first legal choice at every step.
pub fn auto_resolve(engine: &mut NightEngine<'_, Vec<Intent>>) -> ActionOutcome {
    for _ in 0..32 {
        if let Some(outcome) = engine.complete().expect("an action is open") {
            return outcome;
        }
        let prompt = engine.prompt().expect("an action is open");
        debug!(role_id = %prompt.role_id, phase = ?prompt.phase, "Auto-resolving");

        match prompt.view {
            ActionView::ChooseRedHerring {
                candidates,
                selected: None,
            } if !candidates.is_empty() => {
                engine
                    .input(&NarratorInput::ChooseRedHerring {
                        player_id: candidates[0].clone(),
                    })
                    .expect("input accepted");
            }
            ActionView::SelectPlayers {
                candidates,
                selected,
                required,
            } if selected.len() < required => {
                let next = candidates
                    .into_iter()
                    .find(|c| !selected.contains(c))
                    .expect("enough candidates");
                engine
                    .input(&NarratorInput::TogglePlayer { player_id: next })
                    .expect("input accepted");
            }
            ActionView::RoleRegistration {
                options,
                selected: None,
                ..
            } => {
                engine
                    .input(&NarratorInput::ChooseDisplayRole {
                        role_id: options[0].role_id.clone(),
                    })
                    .expect("input accepted");
            }
            _ => {
                engine.input(&NarratorInput::Proceed).expect("input accepted");
            }
        }
    }
    panic!("action did not complete");
}

/// Resolve every remaining action of the night, returning the outcomes.
pub fn resolve_night(engine: &mut NightEngine<'_, Vec<Intent>>) -> Vec<ActionOutcome> {
    let mut outcomes = Vec::new();
    while engine.next_action().is_some() {
        outcomes.push(auto_resolve(engine));
    }
    outcomes
}
