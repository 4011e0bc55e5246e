//! Empath: learns how many of their alive neighbours are evil.

use rand::RngCore;
use serde_json::json;

use crate::domain::registration::AlignmentOverrides;
use crate::domain::seating::{alive_neighbors, unique_alive_neighbors};
use crate::domain::state::PlayerState;
use crate::domain::teams::Team;
use crate::night::result::NightActionResult;
use crate::night::session::{
    AbilityContext, ActionPhase, ActionSession, ActionView, NarratorInput, NightAbility, PlayerInfo,
};
use crate::roles::common;
use crate::roles::RoleDefinition;

pub const ID: &str = "empath";

pub const DEFINITION: RoleDefinition = RoleDefinition {
    night_order: Some(14),
    should_wake: Some(common::alive),
    night_action: Some(&Empath),
    ..RoleDefinition::passive(ID, Team::Townsfolk)
};

pub struct Empath;

impl Empath {
    fn neighbors<'a>(cx: &AbilityContext<'a>) -> Vec<&'a PlayerState> {
        unique_alive_neighbors(&cx.game.state, &cx.player.id)
    }

    fn prompt(cx: &AbilityContext<'_>) -> Vec<String> {
        common::alignment_prompt_players(cx.catalog, Self::neighbors(cx))
    }

    fn evil_neighbors(cx: &AbilityContext<'_>, overrides: &AlignmentOverrides) -> u32 {
        Self::neighbors(cx)
            .into_iter()
            .filter(|n| common::perceived_evil(cx.catalog, n, overrides))
            .count() as u32
    }
}

impl NightAbility for Empath {
    fn entry_phase(&self, cx: &AbilityContext<'_>) -> ActionPhase {
        common::registration_or_view(&Self::prompt(cx))
    }

    fn view(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> ActionView {
        match session.phase {
            ActionPhase::RegistrationSetup => common::alignment_view(Self::prompt(cx), session),
            _ => {
                let count = Self::evil_neighbors(cx, &session.registration_overrides);
                ActionView::Info(PlayerInfo::Count {
                    value: count,
                    message: common::history_message(ID, "sawEvilNeighbors")
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
        let evil_neighbors = Self::evil_neighbors(cx, &session.registration_overrides);
        let (left, right) = alive_neighbors(&cx.game.state, &cx.player.id);

        Some(NightActionResult::with_entry(common::night_action_entry(
            session,
            "count_evil_neighbors",
            common::history_message(ID, "sawEvilNeighbors")
                .param("player", &session.player_id)
                .param("count", evil_neighbors),
            json!({
                "evilNeighbors": evil_neighbors,
                "leftNeighborId": left.map(|p| &p.id),
                "rightNeighborId": right.map(|p| &p.id),
                "registrationOverrides": common::overrides_field(&session.registration_overrides),
            }),
        )))
    }
}
