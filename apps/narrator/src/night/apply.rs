//! Result application: the single transaction through which a completed
//! night action mutates the game.

use tracing::debug;

use crate::domain::effects::{add_effects, remove_effect_types};
use crate::domain::game::Game;
use crate::night::pipeline::IntentSink;
use crate::night::result::NightActionResult;

/// What one application changed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AppliedResult {
    pub entry_ids: Vec<u64>,
    pub effects_added: usize,
    pub effects_removed: usize,
    pub intent_forwarded: bool,
}

/// Apply a completed result to `game`, forwarding any intent to `sink`.
///
/// Entries are stamped after effects and state updates so their snapshot
/// is the post-action state.
pub fn apply_night_action_result<S>(
    game: &mut Game,
    result: NightActionResult,
    sink: &mut S,
) -> AppliedResult
where
    S: IntentSink + ?Sized,
{
    let mut applied = AppliedResult::default();

    for (player_id, effects) in result.add_effects {
        let count = effects.len();
        let effects = effects.into_iter().map(|e| e.into_effect());
        if add_effects(&mut game.state, &player_id, effects) {
            applied.effects_added += count;
        } else {
            debug!(game_id = %game.id, %player_id, "Skipping effects for unknown player");
        }
    }

    for (player_id, kinds) in result.remove_effects {
        applied.effects_removed += remove_effect_types(&mut game.state, &player_id, &kinds);
    }

    if let Some(updates) = result.state_updates {
        updates.merge_into(&mut game.state);
    }

    for pending in result.entries {
        let id = game.record(pending).id;
        applied.entry_ids.push(id);
    }

    if let Some(intent) = result.intent {
        debug!(game_id = %game.id, ?intent, "Forwarding intent");
        sink.submit(intent);
        applied.intent_forwarded = true;
    }

    applied
}
