//! Automated Narrator: answers every prompt with a random legal choice.

use narrator::night::session::DisplayRoleOption;
use narrator::{ActionOutcome, ActionView, DomainError, IntentSink, NarratorInput, NightEngine};
use rand::prelude::*;
use tracing::{debug, warn};

/// Upper bound on inputs per action; every ability finishes well within it.
const MAX_STEPS: usize = 64;

pub struct RandomNarrator<R: Rng> {
    rng: R,
}

impl<R: Rng> RandomNarrator<R> {
    pub fn new(rng: R) -> Self {
        Self { rng }
    }

    /// Drive the open action to completion.
    pub fn resolve<S: IntentSink>(
        &mut self,
        engine: &mut NightEngine<'_, S>,
    ) -> Result<Option<ActionOutcome>, DomainError> {
        for _ in 0..MAX_STEPS {
            if let Some(outcome) = engine.complete()? {
                return Ok(Some(outcome));
            }
            let Some(prompt) = engine.prompt() else {
                return Ok(None);
            };
            let input = self.choose(prompt.view);
            debug!(role_id = %prompt.role_id, ?input, "Narrator input");
            engine.input(&input)?;
        }
        warn!("Action did not complete; leaving it open");
        Ok(None)
    }

    fn choose(&mut self, view: ActionView) -> NarratorInput {
        match view {
            ActionView::ChooseRedHerring {
                candidates,
                selected: None,
            } if !candidates.is_empty() => NarratorInput::RandomRedHerring,
            ActionView::SelectPlayers {
                candidates,
                selected,
                required,
            } if selected.len() < required => {
                let open: Vec<&String> = candidates.iter().filter(|c| !selected.contains(*c)).collect();
                match open.choose(&mut self.rng) {
                    Some(pick) => NarratorInput::TogglePlayer {
                        player_id: (*pick).clone(),
                    },
                    None => NarratorInput::Proceed,
                }
            }
            ActionView::AlignmentRegistration { players, values } => {
                let undecided = players.into_iter().find(|p| !values.contains_key(p));
                match undecided {
                    Some(player_id) => NarratorInput::SetAlignmentOverride {
                        player_id,
                        registers_as_evil: self.rng.random_bool(0.5),
                    },
                    None => NarratorInput::Proceed,
                }
            }
            ActionView::RoleRegistration {
                options,
                selected: None,
                ..
            } => match options.choose(&mut self.rng) {
                Some(DisplayRoleOption { role_id, .. }) => NarratorInput::ChooseDisplayRole {
                    role_id: role_id.clone(),
                },
                None => NarratorInput::Proceed,
            },
            _ => NarratorInput::Proceed,
        }
    }
}
