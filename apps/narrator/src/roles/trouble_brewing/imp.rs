//! Imp: the demon. Chooses a player to attack each night after the first;
//! the attack itself is resolved by the action pipeline.

use rand::RngCore;
use serde_json::json;

use crate::domain::state::{GameState, PlayerId};
use crate::domain::teams::{Alignment, Team};
use crate::night::pipeline::Intent;
use crate::night::result::NightActionResult;
use crate::night::session::{
    AbilityContext, ActionPhase, ActionSession, ActionView, NarratorInput, NightAbility, PlayerInfo,
};
use crate::roles::common;
use crate::roles::{RoleCatalog, RoleDefinition, WinCondition};

pub const ID: &str = "imp";

pub const DEFINITION: RoleDefinition = RoleDefinition {
    night_order: Some(30),
    should_wake: Some(common::alive_after_first_night),
    win_conditions: &[
        WinCondition {
            id: "demon_dead",
            winner: Alignment::Good,
            check: demon_dead,
        },
        WinCondition {
            id: "final_two",
            winner: Alignment::Evil,
            check: final_two,
        },
    ],
    night_action: Some(&Imp),
    ..RoleDefinition::passive(ID, Team::Demon)
};

fn demon_alive(catalog: &RoleCatalog, state: &GameState) -> bool {
    state
        .alive_players()
        .any(|p| catalog.role_of(p).is_some_and(|r| r.team == Team::Demon))
}

fn demon_dead(catalog: &RoleCatalog, state: &GameState) -> bool {
    !demon_alive(catalog, state)
}

fn final_two(catalog: &RoleCatalog, state: &GameState) -> bool {
    state.alive_players().count() <= 2 && demon_alive(catalog, state)
}

pub struct Imp;

impl Imp {
    fn candidates(cx: &AbilityContext<'_>) -> Vec<PlayerId> {
        cx.game.state.alive_players().map(|p| p.id.clone()).collect()
    }
}

impl NightAbility for Imp {
    fn entry_phase(&self, _cx: &AbilityContext<'_>) -> ActionPhase {
        ActionPhase::NarratorSetup
    }

    fn view(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> ActionView {
        match session.phase {
            ActionPhase::PlayerView => ActionView::Info(PlayerInfo::Acknowledge {
                message: common::history_message(ID, "chose")
                    .param("player", &session.player_id)
                    .param("target", session.selected.join(",")),
            }),
            _ => ActionView::SelectPlayers {
                candidates: Self::candidates(cx),
                selected: session.selected.clone(),
                required: 1,
            },
        }
    }

    fn can_proceed(&self, _cx: &AbilityContext<'_>, session: &ActionSession) -> bool {
        session.selected.len() == 1
    }

    fn handle(
        &self,
        cx: &AbilityContext<'_>,
        session: &mut ActionSession,
        input: &NarratorInput,
        _rng: &mut dyn RngCore,
    ) -> bool {
        if session.phase != ActionPhase::NarratorSetup {
            return false;
        }
        match input {
            NarratorInput::TogglePlayer { player_id } => {
                Self::candidates(cx).contains(player_id) && session.toggle(player_id, 1)
            }
            NarratorInput::Proceed if session.selected.len() == 1 => {
                session.advance(ActionPhase::PlayerView);
                true
            }
            _ => false,
        }
    }

    fn complete(&self, _cx: &AbilityContext<'_>, session: &ActionSession) -> Option<NightActionResult> {
        let [target] = session.selected.as_slice() else {
            return None;
        };
        if session.phase != ActionPhase::PlayerView {
            return None;
        }

        let mut result = NightActionResult::with_entry(common::night_action_entry(
            session,
            "attack",
            common::history_message(ID, "chose")
                .param("player", &session.player_id)
                .param("target", target),
            json!({ "targetId": target }),
        ));
        result.intent = Some(Intent::Kill {
            source_id: session.player_id.clone(),
            target_id: target.clone(),
        });
        Some(result)
    }
}
