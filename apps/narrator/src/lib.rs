#![deny(clippy::wildcard_imports)]
#![cfg_attr(test, allow(clippy::wildcard_imports))]

pub mod config;
pub mod domain;
pub mod engine;
pub mod error;
pub mod errors;
pub mod night;
pub mod roles;
pub mod telemetry;

#[cfg(test)]
pub mod test_bootstrap;

// Re-exports for public API
pub use config::EngineConfig;
pub use domain::persist::{from_json, to_json, SavedGame};
pub use domain::{
    Alignment, Effect, Expiry, Game, GamePhase, GameState, History, HistoryEntry, HistoryKind,
    Message, PlayerState, Team, WinOutcome,
};
pub use engine::{ActionOutcome, NightEngine};
pub use error::EngineError;
pub use errors::{ConflictKind, DomainError, NotFoundKind, ValidationKind};
pub use night::{
    ActionPhase, ActionPrompt, ActionView, Intent, IntentSink, NarratorInput, NightSchedule,
    PlayerInfo, SlotStatus,
};
pub use roles::{RoleCatalog, RoleDefinition, RoleReveal};

// Auto-initialize logging for unit tests
#[cfg(test)]
#[ctor::ctor]
fn init_test_logging() {
    test_bootstrap::logging::init();
}
