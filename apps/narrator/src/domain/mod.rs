//! Domain layer: game state, effects, history, perception and win rules.

pub mod effects;
pub mod game;
pub mod history;
pub mod persist;
pub mod registration;
pub mod seating;
pub mod state;
pub mod teams;
pub mod win;

#[cfg(test)]
mod test_gens;
#[cfg(test)]
mod test_prelude;
#[cfg(test)]
mod tests_effects_expiry;
#[cfg(test)]
mod tests_props_registration;
#[cfg(test)]
mod tests_props_seating;

// Re-exports for ergonomics
pub use game::Game;
pub use history::{History, HistoryEntry, HistoryKind, Message, PendingEntry};
pub use state::{Effect, Expiry, GamePhase, GameState, PlayerId, PlayerState, RoleId};
pub use teams::{Alignment, Team};
pub use win::{evaluate, WinOutcome};
