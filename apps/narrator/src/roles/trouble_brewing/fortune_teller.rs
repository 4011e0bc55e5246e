//! Fortune Teller: each night picks two players and learns whether either
//! is the demon. One good player, the red herring, also reads as the demon
//! for this Fortune Teller for the whole game.

use std::collections::BTreeMap;

use rand::prelude::*;
use serde_json::json;

use crate::domain::effects::{any_player_has_effect_with, EffectToAdd};
use crate::domain::history::Message;
use crate::domain::registration::can_register_as_team;
use crate::domain::state::{Expiry, PlayerId, PlayerState};
use crate::domain::teams::Team;
use crate::night::result::NightActionResult;
use crate::night::session::{
    AbilityContext, ActionPhase, ActionSession, ActionView, NarratorInput, NightAbility, PlayerInfo,
};
use crate::roles::common;
use crate::roles::RoleDefinition;

pub const ID: &str = "fortune_teller";

pub const RED_HERRING: &str = "red_herring";
const RED_HERRING_OWNER: &str = "fortuneTellerId";
const CHECKED: usize = 2;

pub const DEFINITION: RoleDefinition = RoleDefinition {
    night_order: Some(15),
    should_wake: Some(common::alive),
    night_action: Some(&FortuneTeller),
    ..RoleDefinition::passive(ID, Team::Townsfolk)
};

pub struct FortuneTeller;

impl FortuneTeller {
    fn has_red_herring(cx: &AbilityContext<'_>) -> bool {
        any_player_has_effect_with(&cx.game.state, RED_HERRING, RED_HERRING_OWNER, &cx.player.id)
    }

    /// Other players whose true team is good.
    fn red_herring_candidates(cx: &AbilityContext<'_>) -> Vec<PlayerId> {
        cx.game
            .state
            .players
            .iter()
            .filter(|p| p.id != cx.player.id)
            .filter(|p| {
                cx.catalog
                    .role_of(p)
                    .is_some_and(|r| matches!(r.team, Team::Townsfolk | Team::Outsider))
            })
            .map(|p| p.id.clone())
            .collect()
    }

    fn check_candidates(cx: &AbilityContext<'_>) -> Vec<PlayerId> {
        cx.game
            .state
            .players
            .iter()
            .filter(|p| p.id != cx.player.id)
            .map(|p| p.id.clone())
            .collect()
    }

    /// Selected players that are not the demon but could register as one.
    fn demon_prompt(cx: &AbilityContext<'_>, session: &ActionSession) -> Vec<PlayerId> {
        session
            .selected
            .iter()
            .filter(|id| {
                cx.game
                    .state
                    .player(id)
                    .and_then(|p| cx.catalog.role_of(p))
                    .is_some_and(|r| r.team != Team::Demon && can_register_as_team(r, Team::Demon))
            })
            .cloned()
            .collect()
    }

    fn reads_as_demon(cx: &AbilityContext<'_>, session: &ActionSession, player: &PlayerState) -> bool {
        if cx.catalog.role_of(player).is_some_and(|r| r.team == Team::Demon) {
            return true;
        }
        let own_red_herring = player.effects.iter().any(|e| {
            e.kind == RED_HERRING && e.data_str(RED_HERRING_OWNER) == Some(cx.player.id.as_str())
        });
        own_red_herring
            || session.registration_overrides.get(&player.id) == Some(&true)
            || session.red_herring.as_deref() == Some(player.id.as_str())
    }

    fn saw_demon(cx: &AbilityContext<'_>, session: &ActionSession) -> bool {
        session
            .selected
            .iter()
            .filter_map(|id| cx.game.state.player(id))
            .any(|p| Self::reads_as_demon(cx, session, p))
    }

    fn check_message(session: &ActionSession, saw_demon: bool) -> Message {
        let key = if saw_demon { "sawDemon" } else { "sawNoDemon" };
        let mut message = common::history_message(ID, key).param("player", &session.player_id);
        for (i, id) in session.selected.iter().enumerate() {
            message = message.param(format!("player{}", i + 1), id);
        }
        message
    }

    fn proceed(cx: &AbilityContext<'_>, session: &mut ActionSession) -> bool {
        if !FortuneTeller.can_proceed(cx, session) {
            return false;
        }
        let next = match session.phase {
            ActionPhase::RedHerringSetup => ActionPhase::NarratorSetup,
            ActionPhase::NarratorSetup if Self::demon_prompt(cx, session).is_empty() => {
                ActionPhase::PlayerView
            }
            ActionPhase::NarratorSetup => ActionPhase::RegistrationSetup,
            ActionPhase::RegistrationSetup => ActionPhase::PlayerView,
            ActionPhase::PlayerView => return false,
        };
        session.advance(next);
        true
    }
}

impl NightAbility for FortuneTeller {
    fn entry_phase(&self, cx: &AbilityContext<'_>) -> ActionPhase {
        if cx.game.is_first_night() && !Self::has_red_herring(cx) {
            ActionPhase::RedHerringSetup
        } else {
            ActionPhase::NarratorSetup
        }
    }

    fn view(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> ActionView {
        match session.phase {
            ActionPhase::RedHerringSetup => ActionView::ChooseRedHerring {
                candidates: Self::red_herring_candidates(cx),
                selected: session.red_herring.clone(),
            },
            ActionPhase::NarratorSetup => ActionView::SelectPlayers {
                candidates: Self::check_candidates(cx),
                selected: session.selected.clone(),
                required: CHECKED,
            },
            ActionPhase::RegistrationSetup => {
                common::alignment_view(Self::demon_prompt(cx, session), session)
            }
            ActionPhase::PlayerView => {
                let saw_demon = Self::saw_demon(cx, session);
                ActionView::Info(PlayerInfo::YesNo {
                    value: saw_demon,
                    message: Self::check_message(session, saw_demon),
                })
            }
        }
    }

    fn can_proceed(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> bool {
        match session.phase {
            ActionPhase::RedHerringSetup => {
                session.red_herring.is_some() || Self::red_herring_candidates(cx).is_empty()
            }
            ActionPhase::NarratorSetup | ActionPhase::PlayerView => session.selected.len() == CHECKED,
            ActionPhase::RegistrationSetup => true,
        }
    }

    fn handle(
        &self,
        cx: &AbilityContext<'_>,
        session: &mut ActionSession,
        input: &NarratorInput,
        rng: &mut dyn RngCore,
    ) -> bool {
        match (session.phase, input) {
            (ActionPhase::RedHerringSetup, NarratorInput::ChooseRedHerring { player_id }) => {
                if !Self::red_herring_candidates(cx).contains(player_id) {
                    return false;
                }
                session.red_herring = Some(player_id.clone());
                true
            }
            (ActionPhase::RedHerringSetup, NarratorInput::RandomRedHerring) => {
                let candidates = Self::red_herring_candidates(cx);
                let Some(pick) = candidates.choose(rng) else {
                    return false;
                };
                session.red_herring = Some(pick.clone());
                true
            }
            (ActionPhase::NarratorSetup, NarratorInput::TogglePlayer { player_id }) => {
                Self::check_candidates(cx).contains(player_id) && session.toggle(player_id, CHECKED)
            }
            (
                ActionPhase::RegistrationSetup,
                NarratorInput::SetAlignmentOverride {
                    player_id,
                    registers_as_evil,
                },
            ) => {
                let prompt = Self::demon_prompt(cx, session);
                common::set_override(session, &prompt, player_id, *registers_as_evil)
            }
            (_, NarratorInput::Proceed) => Self::proceed(cx, session),
            _ => false,
        }
    }

    fn complete(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> Option<NightActionResult> {
        if session.phase != ActionPhase::PlayerView || session.selected.len() != CHECKED {
            return None;
        }
        let saw_demon = Self::saw_demon(cx, session);
        let answer = if saw_demon { "yes" } else { "no" };

        let mut result = NightActionResult::default();
        if let Some(red_herring) = &session.red_herring {
            result.entries.push(common::night_action_entry(
                session,
                "assign_red_herring",
                common::history_message(ID, "redHerringAssigned")
                    .param("redHerring", red_herring)
                    .param("player", &session.player_id),
                json!({ "redHerringId": red_herring }),
            ));
            result.add_effects = BTreeMap::from([(
                red_herring.clone(),
                vec![EffectToAdd::new(RED_HERRING)
                    .data(json!({ RED_HERRING_OWNER: session.player_id }))
                    .expires(Expiry::Never)],
            )]);
        }

        result.entries.push(common::night_action_entry(
            session,
            "check",
            Self::check_message(session, saw_demon),
            json!({
                "checkedPlayers": session.selected,
                "result": answer,
                "registrationOverrides": common::overrides_field(&session.registration_overrides),
            }),
        ));
        Some(result)
    }
}
