//! Night machinery: scheduling, action sessions, and result application.

pub mod apply;
pub mod pipeline;
pub mod result;
pub mod scheduler;
pub mod session;

pub use apply::{apply_night_action_result, AppliedResult};
pub use pipeline::{Intent, IntentSink};
pub use result::{NightActionResult, StateUpdates};
pub use scheduler::{NightSchedule, NightSlot, SlotStatus};
pub use session::{
    AbilityContext, ActionPhase, ActionPrompt, ActionSession, ActionView, DisplayRoleOption,
    NarratorInput, NightAbility, PlayerInfo,
};
