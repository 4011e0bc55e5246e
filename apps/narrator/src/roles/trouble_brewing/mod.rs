//! The Trouble Brewing script.
//!
//! Declaration order matters: it breaks ties between equal night-order
//! ranks and fixes the order in which win conditions are evaluated.

pub mod chef;
pub mod empath;
pub mod fortune_teller;
pub mod imp;
pub mod monk;
pub mod undertaker;

use crate::domain::registration::RegistrationConfig;
use crate::domain::state::Expiry;
use crate::domain::teams::Team;
use crate::roles::{InitialEffect, RoleDefinition};

pub const SAFE_FROM_DEMON: &str = "safe_from_demon";

pub const VILLAGER: RoleDefinition = RoleDefinition::passive("villager", Team::Townsfolk);

pub const SOLDIER: RoleDefinition = RoleDefinition {
    initial_effects: &[InitialEffect {
        kind: SAFE_FROM_DEMON,
        expires_at: Expiry::Never,
    }],
    ..RoleDefinition::passive("soldier", Team::Townsfolk)
};

/// Good, but may register as evil, as an evil team, or as another role.
pub const RECLUSE: RoleDefinition = RoleDefinition {
    registration: Some(RegistrationConfig {
        can_register_as_evil: true,
        can_register_as_teams: &[Team::Outsider, Team::Minion, Team::Demon],
        can_appear_as_different_role: true,
    }),
    ..RoleDefinition::passive("recluse", Team::Outsider)
};

pub const SAINT: RoleDefinition = RoleDefinition::passive("saint", Team::Outsider);

pub const BARON: RoleDefinition = RoleDefinition::passive("baron", Team::Minion);

pub static ROLES: &[RoleDefinition] = &[
    VILLAGER,
    SOLDIER,
    monk::DEFINITION,
    chef::DEFINITION,
    empath::DEFINITION,
    fortune_teller::DEFINITION,
    undertaker::DEFINITION,
    RECLUSE,
    SAINT,
    BARON,
    imp::DEFINITION,
];
