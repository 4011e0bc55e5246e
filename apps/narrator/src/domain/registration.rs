//! Registration resolver: generic questions a detection ability may ask.
//!
//! A role that can register differently declares it through its
//! [`RegistrationConfig`]. Detectors never special-case other roles; they
//! only ask the functions below, and the Narrator supplies the overrides.

use std::collections::BTreeMap;

use crate::domain::state::{PlayerId, PlayerState};
use crate::domain::teams::Team;
use crate::roles::RoleDefinition;

/// Declarative misregistration capability of a role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistrationConfig {
    /// Can register as evil when alignment is checked.
    pub can_register_as_evil: bool,
    /// Teams this role can register as, for team-detection abilities.
    pub can_register_as_teams: &'static [Team],
    /// Can appear as a different role when revealed.
    pub can_appear_as_different_role: bool,
}

/// Narrator-chosen values for one resolution: player id → registers as evil
/// (or, for team checks, registers as the asked team).
pub type AlignmentOverrides = BTreeMap<PlayerId, bool>;

pub fn has_alignment_registration(role: &RoleDefinition) -> bool {
    role.registration.is_some_and(|r| r.can_register_as_evil)
}

/// Perceived alignment of `player`, honouring an override only when the role
/// actually has alignment registration.
pub fn is_perceived_evil(
    role: &RoleDefinition,
    player: &PlayerState,
    overrides: Option<&AlignmentOverrides>,
) -> bool {
    if has_alignment_registration(role) {
        if let Some(&value) = overrides.and_then(|o| o.get(&player.id)) {
            return value;
        }
    }
    role.team.is_evil()
}

/// Natural team match, or a team listed in the registration config.
pub fn can_register_as_team(role: &RoleDefinition, team: Team) -> bool {
    if role.team == team {
        return true;
    }
    role.registration.is_some_and(|r| r.can_register_as_teams.contains(&team))
}

pub fn has_role_registration(role: &RoleDefinition) -> bool {
    role.registration.is_some_and(|r| r.can_appear_as_different_role)
}

/// Roles a player may be shown as. Index 0 is always the true role.
pub fn possible_display_roles<'a>(
    own: &'a RoleDefinition,
    all: &'a [RoleDefinition],
) -> Vec<&'a RoleDefinition> {
    let Some(config) = own.registration.filter(|r| r.can_appear_as_different_role) else {
        return vec![own];
    };

    std::iter::once(own)
        .chain(
            all.iter()
                .filter(|r| r.id != own.id && config.can_register_as_teams.contains(&r.team)),
        )
        .collect()
}

/// Players whose resolved role has alignment registration. Players whose
/// role id does not resolve are left out.
pub fn filter_players_with_alignment_registration<'p, 'c, I, F>(
    players: I,
    role_lookup: F,
) -> Vec<&'p PlayerState>
where
    I: IntoIterator<Item = &'p PlayerState>,
    F: Fn(&str) -> Option<&'c RoleDefinition>,
{
    players
        .into_iter()
        .filter(|p| role_lookup(&p.role_id).is_some_and(has_alignment_registration))
        .collect()
}
