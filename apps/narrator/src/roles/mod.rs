//! Role catalog and role definitions.
//!
//! How to add a role
//!
//! 1) Declare a `RoleDefinition` in its script module (team, night order,
//!    wake predicate, effects, win conditions, registration).
//! 2) If it acts at night, implement `NightAbility` for a unit struct in its
//!    own module and reference it from the definition.
//! 3) Append it to the script's static list. Declaration order is the
//!    tie-break for equal night-order ranks and the win evaluation order.
//! 4) Never reference another role by id from ability logic; ask the
//!    registration resolver instead.

mod catalog;
mod common;
pub mod trouble_brewing;

use serde::{Deserialize, Serialize};

pub use catalog::RoleCatalog;

use crate::domain::effects::EffectToAdd;
use crate::domain::game::Game;
use crate::domain::registration::RegistrationConfig;
use crate::domain::state::{Expiry, GameState, PlayerId, PlayerState, RoleId};
use crate::domain::teams::{Alignment, Team};
use crate::night::session::NightAbility;

/// Wake predicate: evaluated against the latest game snapshot.
pub type WakePredicate = fn(&Game, &PlayerState) -> bool;

/// Effect granted to a player when the game starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct InitialEffect {
    pub kind: &'static str,
    pub expires_at: Expiry,
}

impl InitialEffect {
    pub fn to_effect(self) -> EffectToAdd {
        EffectToAdd::new(self.kind).expires(self.expires_at)
    }
}

/// Win predicate contributed by a role. Must be pure. Receives the catalog
/// in play so it can resolve other players' teams.
#[derive(Debug, Clone, Copy)]
pub struct WinCondition {
    pub id: &'static str,
    pub winner: Alignment,
    pub check: fn(&RoleCatalog, &GameState) -> bool,
}

/// Static description of a role. Owned by the catalog, never mutated.
#[derive(Clone, Copy)]
pub struct RoleDefinition {
    pub id: &'static str,
    pub team: Team,
    /// Lower ranks wake first; `None` never wakes.
    pub night_order: Option<u32>,
    /// `None` means the role always wakes on its turn.
    pub should_wake: Option<WakePredicate>,
    pub initial_effects: &'static [InitialEffect],
    pub win_conditions: &'static [WinCondition],
    pub registration: Option<RegistrationConfig>,
    /// `None` for passive roles.
    pub night_action: Option<&'static dyn NightAbility>,
}

impl std::fmt::Debug for RoleDefinition {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RoleDefinition")
            .field("id", &self.id)
            .field("team", &self.team)
            .field("night_order", &self.night_order)
            .field("registration", &self.registration)
            .field("has_night_action", &self.night_action.is_some())
            .finish()
    }
}

impl RoleDefinition {
    /// Passive role with no night order and no capabilities.
    pub const fn passive(id: &'static str, team: Team) -> Self {
        Self {
            id,
            team,
            night_order: None,
            should_wake: None,
            initial_effects: &[],
            win_conditions: &[],
            registration: None,
            night_action: None,
        }
    }

    /// Whether this role wakes for `player` given the current game.
    pub fn wakes(&self, game: &Game, player: &PlayerState) -> bool {
        match self.should_wake {
            Some(pred) => pred(game, player),
            None => true,
        }
    }

    /// Data the presentation layer shows when revealing this role.
    pub fn reveal(&self, player: &PlayerState) -> RoleReveal {
        RoleReveal {
            player_id: player.id.clone(),
            role_id: self.id.to_string(),
            team: self.team,
        }
    }
}

/// Role reveal payload handed to presentation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RoleReveal {
    pub player_id: PlayerId,
    pub role_id: RoleId,
    pub team: Team,
}
