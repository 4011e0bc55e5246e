//! Action sessions: the explicit, serializable state machine a woken role
//! moves through while the Narrator resolves its ability.
//!
//! Every ability uses the same four phases, skipping the ones it does not
//! need:
//!
//! 1. `red_herring_setup`: a persistent setup choice made once.
//! 2. `narrator_setup`: the Narrator selects players on behalf of the role.
//! 3. `registration_setup`: the Narrator decides how misregistering players
//!    appear to this check.
//! 4. `player_view`: the information shown to the woken player.
//!
//! Sessions hold plain data only. Behaviour lives in [`NightAbility`]
//! implementations, which are stateless and shared.

use rand::RngCore;
use serde::{Deserialize, Serialize};

use crate::domain::game::Game;
use crate::domain::history::Message;
use crate::domain::registration::AlignmentOverrides;
use crate::domain::state::{PlayerId, PlayerState, RoleId};
use crate::domain::teams::Team;
use crate::night::result::NightActionResult;
use crate::roles::RoleCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActionPhase {
    RedHerringSetup,
    NarratorSetup,
    RegistrationSetup,
    PlayerView,
}

/// In-flight resolution of one role's night ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionSession {
    pub role_id: RoleId,
    pub player_id: PlayerId,
    pub phase: ActionPhase,
    /// Phases already passed through, oldest first.
    #[serde(default)]
    pub trail: Vec<ActionPhase>,
    #[serde(default)]
    pub selected: Vec<PlayerId>,
    #[serde(default)]
    pub registration_overrides: AlignmentOverrides,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_role_id: Option<RoleId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub red_herring: Option<PlayerId>,
}

impl ActionSession {
    pub fn new(role_id: impl Into<RoleId>, player_id: impl Into<PlayerId>, phase: ActionPhase) -> Self {
        Self {
            role_id: role_id.into(),
            player_id: player_id.into(),
            phase,
            trail: Vec::new(),
            selected: Vec::new(),
            registration_overrides: AlignmentOverrides::new(),
            display_role_id: None,
            red_herring: None,
        }
    }

    /// Move forward to `next`, remembering the phase being left.
    pub fn advance(&mut self, next: ActionPhase) {
        if next > self.phase {
            self.trail.push(self.phase);
            self.phase = next;
        }
    }

    /// Go back to a phase visited earlier, dropping every choice made in
    /// that phase and the ones after it. Returns false if `phase` was never
    /// visited.
    pub fn return_to(&mut self, phase: ActionPhase) -> bool {
        let Some(idx) = self.trail.iter().position(|p| *p == phase) else {
            return false;
        };
        self.trail.truncate(idx);
        self.phase = phase;

        if phase <= ActionPhase::RedHerringSetup {
            self.red_herring = None;
        }
        if phase <= ActionPhase::NarratorSetup {
            self.selected.clear();
        }
        if phase <= ActionPhase::RegistrationSetup {
            self.registration_overrides.clear();
            self.display_role_id = None;
        }
        true
    }

    /// Add `player_id` to the selection, or remove it if already selected.
    /// Refuses additions beyond `max`.
    pub fn toggle(&mut self, player_id: &str, max: usize) -> bool {
        if let Some(idx) = self.selected.iter().position(|p| p == player_id) {
            self.selected.remove(idx);
            return true;
        }
        if self.selected.len() >= max {
            return false;
        }
        self.selected.push(player_id.to_string());
        true
    }
}

/// Input supplied by the Narrator to drive a session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum NarratorInput {
    #[serde(rename_all = "camelCase")]
    TogglePlayer { player_id: PlayerId },
    #[serde(rename_all = "camelCase")]
    SetAlignmentOverride {
        player_id: PlayerId,
        registers_as_evil: bool,
    },
    #[serde(rename_all = "camelCase")]
    ChooseDisplayRole { role_id: RoleId },
    #[serde(rename_all = "camelCase")]
    ChooseRedHerring { player_id: PlayerId },
    RandomRedHerring,
    Proceed,
    ReturnTo { phase: ActionPhase },
}

/// One selectable display identity in a role-registration prompt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisplayRoleOption {
    pub role_id: RoleId,
    pub team: Team,
    /// True only for the player's real role, always the first option.
    pub own: bool,
}

/// What the woken player is shown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PlayerInfo {
    Count { value: u32, message: Message },
    YesNo { value: bool, message: Message },
    #[serde(rename_all = "camelCase")]
    Role { role_id: RoleId, message: Message },
    Acknowledge { message: Message },
}

/// Presentation data for the current phase. Pure data, no layout.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ActionView {
    ChooseRedHerring {
        candidates: Vec<PlayerId>,
        selected: Option<PlayerId>,
    },
    SelectPlayers {
        candidates: Vec<PlayerId>,
        selected: Vec<PlayerId>,
        required: usize,
    },
    AlignmentRegistration {
        players: Vec<PlayerId>,
        values: AlignmentOverrides,
    },
    #[serde(rename_all = "camelCase")]
    RoleRegistration {
        player_id: PlayerId,
        options: Vec<DisplayRoleOption>,
        selected: Option<RoleId>,
    },
    Info(PlayerInfo),
}

/// View plus whether the session may move on from its current phase.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionPrompt {
    pub role_id: RoleId,
    pub player_id: PlayerId,
    pub phase: ActionPhase,
    pub view: ActionView,
    pub can_proceed: bool,
}

/// Read-only inputs to an ability.
#[derive(Clone, Copy)]
pub struct AbilityContext<'a> {
    pub catalog: &'a RoleCatalog,
    pub game: &'a Game,
    pub player: &'a PlayerState,
}

/// Night behaviour of an active role.
///
/// Implementations are stateless; all progress is kept in the
/// [`ActionSession`] so a night can be persisted and resumed.
pub trait NightAbility: Send + Sync {
    /// Phase a freshly woken session starts in.
    fn entry_phase(&self, cx: &AbilityContext<'_>) -> ActionPhase;

    fn view(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> ActionView;

    /// Whether `Proceed` (or completion, in the last phase) would be accepted.
    fn can_proceed(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> bool;

    /// Apply one Narrator input. Returns false when the input is refused,
    /// in which case the session is left unchanged.
    fn handle(
        &self,
        cx: &AbilityContext<'_>,
        session: &mut ActionSession,
        input: &NarratorInput,
        rng: &mut dyn RngCore,
    ) -> bool;

    /// Build the result once the session reached `player_view`.
    fn complete(&self, cx: &AbilityContext<'_>, session: &ActionSession) -> Option<NightActionResult>;
}
