//! Undertaker: learns which role was executed today.

use rand::RngCore;
use serde_json::json;

use crate::domain::game::Game;
use crate::domain::registration::{has_role_registration, possible_display_roles};
use crate::domain::state::PlayerState;
use crate::domain::teams::Team;
use crate::night::result::NightActionResult;
use crate::night::session::{
    AbilityContext, ActionPhase, ActionSession, ActionView, DisplayRoleOption, NarratorInput,
    NightAbility, PlayerInfo,
};
use crate::roles::common;
use crate::roles::RoleDefinition;

pub const ID: &str = "undertaker";

pub const DEFINITION: RoleDefinition = RoleDefinition {
    night_order: Some(40),
    should_wake: Some(wakes),
    night_action: Some(&Undertaker),
    ..RoleDefinition::passive(ID, Team::Townsfolk)
};

fn wakes(game: &Game, player: &PlayerState) -> bool {
    common::alive_after_first_night(game, player)
        && game.history.executed_player_since_last_day().is_some()
}

pub struct Undertaker;

impl Undertaker {
    fn executed<'a>(cx: &AbilityContext<'a>) -> Option<&'a PlayerState> {
        let id = cx.game.history.executed_player_since_last_day()?;
        cx.game.state.player(id)
    }

    fn options(cx: &AbilityContext<'_>, executed: &PlayerState) -> Vec<DisplayRoleOption> {
        let Some(role) = cx.catalog.role_of(executed) else {
            return Vec::new();
        };
        possible_display_roles(role, cx.catalog.roles())
            .into_iter()
            .enumerate()
            .map(|(i, r)| DisplayRoleOption {
                role_id: r.id.to_string(),
                team: r.team,
                own: i == 0,
            })
            .collect()
    }

    fn shown_role(session: &ActionSession, executed: &PlayerState) -> String {
        session
            .display_role_id
            .clone()
            .unwrap_or_else(|| executed.role_id.clone())
    }
}

impl NightAbility for Undertaker {
    fn entry_phase(&self, cx: &AbilityContext<'_>) -> ActionPhase {
        let needs_registration = Self::executed(cx)
            .and_then(|p| cx.catalog.role_of(p))
            .is_some_and(has_role_registration);
        if needs_registration {
            ActionPhase::RegistrationSetup
        } else {
            ActionPhase::PlayerView
        }
    }

    fn view(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> ActionView {
        let Some(executed) = Self::executed(cx) else {
            return ActionView::Info(PlayerInfo::Acknowledge {
                message: common::history_message(ID, "nothingToLearn"),
            });
        };
        match session.phase {
            ActionPhase::RegistrationSetup => ActionView::RoleRegistration {
                player_id: executed.id.clone(),
                options: Self::options(cx, executed),
                selected: session.display_role_id.clone(),
            },
            _ => {
                let role_id = Self::shown_role(session, executed);
                ActionView::Info(PlayerInfo::Role {
                    message: common::history_message(ID, "sawExecutedRole")
                        .param("player", &session.player_id)
                        .param("role", &role_id),
                    role_id,
                })
            }
        }
    }

    fn can_proceed(&self, _cx: &AbilityContext<'_>, session: &ActionSession) -> bool {
        match session.phase {
            ActionPhase::RegistrationSetup => session.display_role_id.is_some(),
            _ => true,
        }
    }

    fn handle(
        &self,
        cx: &AbilityContext<'_>,
        session: &mut ActionSession,
        input: &NarratorInput,
        _rng: &mut dyn RngCore,
    ) -> bool {
        if session.phase != ActionPhase::RegistrationSetup {
            return false;
        }
        match input {
            NarratorInput::ChooseDisplayRole { role_id } => {
                let allowed = Self::executed(cx)
                    .is_some_and(|p| Self::options(cx, p).iter().any(|o| &o.role_id == role_id));
                if allowed {
                    session.display_role_id = Some(role_id.clone());
                }
                allowed
            }
            NarratorInput::Proceed if session.display_role_id.is_some() => {
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
        let Some(executed) = Self::executed(cx) else {
            return Some(NightActionResult::default());
        };
        let shown = Self::shown_role(session, executed);
        let overridden = session.display_role_id.is_some().then_some(true);

        Some(NightActionResult::with_entry(common::night_action_entry(
            session,
            "saw_executed",
            common::history_message(ID, "sawExecutedRole")
                .param("player", &session.player_id)
                .param("role", &shown),
            json!({
                "executedPlayerId": executed.id,
                "executedRoleId": shown,
                "actualRoleId": executed.role_id,
                "registrationOverride": overridden,
            }),
        )))
    }
}
