// Proptest generators for domain types.

use proptest::prelude::*;

use crate::domain::registration::{AlignmentOverrides, RegistrationConfig};
use crate::domain::state::{GameState, PlayerState};
use crate::domain::teams::Team;
use crate::roles::RoleDefinition;

const TEAM_SETS: [&[Team]; 4] = [
    &[],
    &[Team::Minion],
    &[Team::Minion, Team::Demon],
    &[Team::Outsider, Team::Minion, Team::Demon],
];

pub fn team() -> impl Strategy<Value = Team> {
    prop_oneof![
        Just(Team::Townsfolk),
        Just(Team::Outsider),
        Just(Team::Minion),
        Just(Team::Demon),
    ]
}

pub fn team_set() -> impl Strategy<Value = &'static [Team]> {
    (0..TEAM_SETS.len()).prop_map(|i| TEAM_SETS[i])
}

pub fn registration_config() -> impl Strategy<Value = RegistrationConfig> {
    (any::<bool>(), team_set(), any::<bool>()).prop_map(|(evil, teams, different)| {
        RegistrationConfig {
            can_register_as_evil: evil,
            can_register_as_teams: teams,
            can_appear_as_different_role: different,
        }
    })
}

/// A role with an arbitrary team and optional registration capability.
pub fn role() -> impl Strategy<Value = RoleDefinition> {
    (team(), proptest::option::of(registration_config())).prop_map(|(team, registration)| {
        let mut role = RoleDefinition::passive("probe", team);
        role.registration = registration;
        role
    })
}

/// A role with no alignment registration.
pub fn role_without_alignment_registration() -> impl Strategy<Value = RoleDefinition> {
    role().prop_map(|mut role| {
        if let Some(reg) = role.registration.as_mut() {
            reg.can_register_as_evil = false;
        }
        role
    })
}

/// Overrides that may or may not mention `player_id`.
pub fn overrides_for(player_id: &'static str) -> impl Strategy<Value = AlignmentOverrides> {
    (proptest::option::of(any::<bool>()), any::<bool>()).prop_map(move |(own, other)| {
        let mut map = AlignmentOverrides::new();
        if let Some(value) = own {
            map.insert(player_id.to_string(), value);
        }
        map.insert("someone_else".to_string(), other);
        map
    })
}

/// Seating circle of 0..=12 players as (alive, evil) flags. Player ids are
/// `P0`, `P1`, ...
pub fn circle() -> impl Strategy<Value = Vec<(bool, bool)>> {
    prop::collection::vec((any::<bool>(), any::<bool>()), 0..=12)
}

pub fn circle_state(flags: &[(bool, bool)]) -> GameState {
    GameState::new(
        flags
            .iter()
            .enumerate()
            .map(|(i, (alive, _))| {
                let mut p = PlayerState::new(format!("P{i}"), format!("Player {i}"), "villager");
                p.alive = *alive;
                p
            })
            .collect(),
    )
}
