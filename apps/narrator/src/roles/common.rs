//! Helpers shared by role abilities: wake predicates, perception through
//! the registration resolver, and history entry construction.

use serde_json::{json, Map, Value as JsonValue};

use crate::domain::game::Game;
use crate::domain::history::{HistoryKind, Message, PendingEntry};
use crate::domain::registration::{
    filter_players_with_alignment_registration, is_perceived_evil, AlignmentOverrides,
};
use crate::domain::state::{PlayerId, PlayerState};
use crate::night::session::{ActionPhase, ActionSession, ActionView};
use crate::roles::RoleCatalog;

pub(crate) fn alive(_game: &Game, player: &PlayerState) -> bool {
    player.is_alive()
}

pub(crate) fn alive_on_first_night(game: &Game, player: &PlayerState) -> bool {
    player.is_alive() && game.current_round() == 1
}

pub(crate) fn alive_after_first_night(game: &Game, player: &PlayerState) -> bool {
    player.is_alive() && game.current_round() > 1
}

/// Ids of `players` the Narrator must decide alignment for.
pub(crate) fn alignment_prompt_players<'p, I>(catalog: &RoleCatalog, players: I) -> Vec<PlayerId>
where
    I: IntoIterator<Item = &'p PlayerState>,
{
    filter_players_with_alignment_registration(players, |id| catalog.get(id))
        .into_iter()
        .map(|p| p.id.clone())
        .collect()
}

/// Perceived alignment; a player whose role is unknown reads as good.
pub(crate) fn perceived_evil(
    catalog: &RoleCatalog,
    player: &PlayerState,
    overrides: &AlignmentOverrides,
) -> bool {
    catalog
        .role_of(player)
        .is_some_and(|role| is_perceived_evil(role, player, Some(overrides)))
}

/// Record a Narrator override, accepted only for players in the prompt and
/// only while the session is in registration setup.
pub(crate) fn set_override(
    session: &mut ActionSession,
    prompt: &[PlayerId],
    player_id: &str,
    value: bool,
) -> bool {
    if session.phase != ActionPhase::RegistrationSetup || !prompt.iter().any(|p| p == player_id) {
        return false;
    }
    session
        .registration_overrides
        .insert(player_id.to_string(), value);
    true
}

pub(crate) fn alignment_view(prompt: Vec<PlayerId>, session: &ActionSession) -> ActionView {
    ActionView::AlignmentRegistration {
        players: prompt,
        values: session.registration_overrides.clone(),
    }
}

/// Entry phase for an ability whose only setup is an optional alignment
/// registration step.
pub(crate) fn registration_or_view(prompt: &[PlayerId]) -> ActionPhase {
    if prompt.is_empty() {
        ActionPhase::PlayerView
    } else {
        ActionPhase::RegistrationSetup
    }
}

pub(crate) fn history_message(role_id: &str, key: &str) -> Message {
    Message::new(format!("roles.{role_id}.history.{key}"))
}

/// `night_action` entry whose data carries `roleId`, `playerId`, `action`
/// and the given extra fields. `null` extras are dropped.
pub(crate) fn night_action_entry(
    session: &ActionSession,
    action: &str,
    message: Message,
    extra: JsonValue,
) -> PendingEntry {
    let mut data = Map::new();
    data.insert("roleId".into(), json!(session.role_id));
    data.insert("playerId".into(), json!(session.player_id));
    data.insert("action".into(), json!(action));
    if let JsonValue::Object(fields) = extra {
        data.extend(fields.into_iter().filter(|(_, v)| !v.is_null()));
    }
    PendingEntry::new(HistoryKind::NightAction, message, JsonValue::Object(data))
}

/// Overrides for the entry payload; `null` when none were set.
pub(crate) fn overrides_field(overrides: &AlignmentOverrides) -> JsonValue {
    if overrides.is_empty() {
        JsonValue::Null
    } else {
        json!(overrides)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn entry_data_drops_null_extras() {
        let session = ActionSession::new("chef", "P1", ActionPhase::PlayerView);
        let entry = night_action_entry(
            &session,
            "count_evil_pairs",
            history_message("chef", "sawEvilPairs").param("count", 1),
            json!({ "evilPairs": 1, "registrationOverrides": overrides_field(&AlignmentOverrides::new()) }),
        );
        assert_eq!(
            entry.data,
            json!({
                "roleId": "chef",
                "playerId": "P1",
                "action": "count_evil_pairs",
                "evilPairs": 1
            })
        );
        assert_eq!(entry.message[0].key, "roles.chef.history.sawEvilPairs");
    }

    #[test]
    fn overrides_only_for_prompted_players_in_setup() {
        let prompt = vec!["P3".to_string()];
        let mut session = ActionSession::new("empath", "P1", ActionPhase::RegistrationSetup);
        assert!(set_override(&mut session, &prompt, "P3", true));
        assert!(!set_override(&mut session, &prompt, "P2", true));

        session.advance(ActionPhase::PlayerView);
        assert!(!set_override(&mut session, &prompt, "P3", false));
        assert_eq!(session.registration_overrides.get("P3"), Some(&true));
    }
}
