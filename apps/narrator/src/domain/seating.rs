//! Seating-circle helpers. Players sit in a circle in `GameState::players`
//! order; dead players are skipped.

use crate::domain::state::{GameState, PlayerState};

/// Nearest alive player on each side of `player_id`, walking around the
/// circle. Both sides are the same player when only two are alive; both are
/// `None` when nobody else is alive or the id is unknown.
pub fn alive_neighbors<'a>(
    state: &'a GameState,
    player_id: &str,
) -> (Option<&'a PlayerState>, Option<&'a PlayerState>) {
    let players = &state.players;
    let n = players.len();
    let Some(seat) = players.iter().position(|p| p.id == player_id) else {
        return (None, None);
    };

    let left = (1..n)
        .map(|k| &players[(seat + n - k) % n])
        .find(|p| p.is_alive());
    let right = (1..n)
        .map(|k| &players[(seat + k) % n])
        .find(|p| p.is_alive());
    (left, right)
}

/// Unique alive neighbours of `player_id`, left first.
pub fn unique_alive_neighbors<'a>(state: &'a GameState, player_id: &str) -> Vec<&'a PlayerState> {
    let (left, right) = alive_neighbors(state, player_id);
    let mut out: Vec<&PlayerState> = left.into_iter().collect();
    if let Some(right) = right {
        if out.iter().all(|p| p.id != right.id) {
            out.push(right);
        }
    }
    out
}

/// Count adjacent alive pairs where both players are perceived as evil.
///
/// Walks each alive player to the next alive one, wrapping around. With
/// exactly two alive players the same pair is visited from both ends and
/// counted twice.
pub fn count_evil_pairs<F>(state: &GameState, is_evil: F) -> u32
where
    F: Fn(&PlayerState) -> bool,
{
    let alive: Vec<&PlayerState> = state.alive_players().collect();
    if alive.len() < 2 {
        return 0;
    }

    let flags: Vec<bool> = alive.iter().map(|p| is_evil(p)).collect();
    let n = flags.len();
    (0..n).filter(|&i| flags[i] && flags[(i + 1) % n]).count() as u32
}
