//! Chef: learns how many pairs of evil players sit next to each other.

use rand::RngCore;
use serde_json::json;

use crate::domain::registration::AlignmentOverrides;
use crate::domain::seating::count_evil_pairs;
use crate::domain::teams::Team;
use crate::night::result::NightActionResult;
use crate::night::session::{
    AbilityContext, ActionPhase, ActionSession, ActionView, NarratorInput, NightAbility, PlayerInfo,
};
use crate::roles::common;
use crate::roles::RoleDefinition;

pub const ID: &str = "chef";

pub const DEFINITION: RoleDefinition = RoleDefinition {
    night_order: Some(13),
    should_wake: Some(common::alive_on_first_night),
    night_action: Some(&Chef),
    ..RoleDefinition::passive(ID, Team::Townsfolk)
};

pub struct Chef;

impl Chef {
    fn prompt(cx: &AbilityContext<'_>) -> Vec<String> {
        common::alignment_prompt_players(cx.catalog, cx.game.state.alive_players())
    }

    fn evil_pairs(cx: &AbilityContext<'_>, overrides: &AlignmentOverrides) -> u32 {
        count_evil_pairs(&cx.game.state, |p| {
            common::perceived_evil(cx.catalog, p, overrides)
        })
    }
}

impl NightAbility for Chef {
    fn entry_phase(&self, cx: &AbilityContext<'_>) -> ActionPhase {
        common::registration_or_view(&Self::prompt(cx))
    }

    fn view(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> ActionView {
        match session.phase {
            ActionPhase::RegistrationSetup => common::alignment_view(Self::prompt(cx), session),
            _ => {
                let count = Self::evil_pairs(cx, &session.registration_overrides);
                ActionView::Info(PlayerInfo::Count {
                    value: count,
                    message: common::history_message(ID, "sawEvilPairs")
                        .param("player", &session.player_id)
                        .param("count", count),
                })
            }
        }
    }

    fn can_proceed(&self, _cx: &AbilityContext<'_>, _session: &ActionSession) -> bool {
        true
    }

    fn handle(
        &self,
        cx: &AbilityContext<'_>,
        session: &mut ActionSession,
        input: &NarratorInput,
        _rng: &mut dyn RngCore,
    ) -> bool {
        match input {
            NarratorInput::SetAlignmentOverride {
                player_id,
                registers_as_evil,
            } => common::set_override(session, &Self::prompt(cx), player_id, *registers_as_evil),
            NarratorInput::Proceed if session.phase == ActionPhase::RegistrationSetup => {
                session.advance(ActionPhase::PlayerView);
                true
            }
            _ => false,
        }
    }

    fn complete(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> Option<NightActionResult> {
        if session.phase != ActionPhase::PlayerView {
            return None;
        }
        let evil_pairs = Self::evil_pairs(cx, &session.registration_overrides);

        Some(NightActionResult::with_entry(common::night_action_entry(
            session,
            "count_evil_pairs",
            common::history_message(ID, "sawEvilPairs")
                .param("player", &session.player_id)
                .param("count", evil_pairs),
            json!({
                "evilPairs": evil_pairs,
                "registrationOverrides": common::overrides_field(&session.registration_overrides),
            }),
        )))
    }
}
