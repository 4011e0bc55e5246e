//! Monk: protects another player from the demon for the night.

use std::collections::BTreeMap;

use rand::RngCore;
use serde_json::json;

use crate::domain::effects::EffectToAdd;
use crate::domain::state::{Expiry, PlayerId};
use crate::domain::teams::Team;
use crate::night::result::NightActionResult;
use crate::night::session::{
    AbilityContext, ActionPhase, ActionSession, ActionView, NarratorInput, NightAbility, PlayerInfo,
};
use crate::roles::common;
use crate::roles::RoleDefinition;

pub const ID: &str = "monk";
pub const PROTECTED: &str = "protected";

pub const DEFINITION: RoleDefinition = RoleDefinition {
    night_order: Some(12),
    should_wake: Some(common::alive_after_first_night),
    night_action: Some(&Monk),
    ..RoleDefinition::passive(ID, Team::Townsfolk)
};

pub struct Monk;

impl Monk {
    fn candidates(cx: &AbilityContext<'_>) -> Vec<PlayerId> {
        cx.game
            .state
            .alive_players()
            .filter(|p| p.id != cx.player.id)
            .map(|p| p.id.clone())
            .collect()
    }
}

impl NightAbility for Monk {
    fn entry_phase(&self, _cx: &AbilityContext<'_>) -> ActionPhase {
        ActionPhase::NarratorSetup
    }

    fn view(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> ActionView {
        match session.phase {
            ActionPhase::PlayerView => ActionView::Info(PlayerInfo::Acknowledge {
                message: common::history_message(ID, "protected")
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
            "protect",
            common::history_message(ID, "protected")
                .param("player", &session.player_id)
                .param("target", target),
            json!({ "targetId": target }),
        ));
        result.add_effects = BTreeMap::from([(
            target.clone(),
            vec![EffectToAdd::new(PROTECTED)
                .data(json!({ "monkId": session.player_id }))
                .expires(Expiry::EndOfNight)],
        )]);
        Some(result)
    }
}
