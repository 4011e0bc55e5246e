//! Property-based tests for the registration resolver.

use proptest::prelude::*;

use crate::domain::registration::{
    can_register_as_team, has_alignment_registration, has_role_registration, is_perceived_evil,
    possible_display_roles,
};
use crate::domain::state::PlayerState;
use crate::domain::{test_gens, test_prelude};
use crate::roles::RoleCatalog;

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Overrides never change perception for a role that cannot register as evil.
    #[test]
    fn prop_override_ignored_without_capability(
        role in test_gens::role_without_alignment_registration(),
        overrides in test_gens::overrides_for("P1"),
    ) {
        let player = PlayerState::new("P1", "Ann", role.id);
        prop_assert!(!has_alignment_registration(&role));
        prop_assert_eq!(
            is_perceived_evil(&role, &player, Some(&overrides)),
            role.team.is_evil()
        );
    }

    /// With the capability, an override for the player wins; otherwise the
    /// true alignment is used.
    #[test]
    fn prop_override_respected_with_capability(
        role in test_gens::role(),
        overrides in test_gens::overrides_for("P1"),
    ) {
        let mut role = role;
        if let Some(reg) = role.registration.as_mut() {
            reg.can_register_as_evil = true;
        }
        prop_assume!(role.registration.is_some());

        let player = PlayerState::new("P1", "Ann", role.id);
        let expected = overrides.get("P1").copied().unwrap_or(role.team.is_evil());
        prop_assert_eq!(is_perceived_evil(&role, &player, Some(&overrides)), expected);
        prop_assert_eq!(is_perceived_evil(&role, &player, None), role.team.is_evil());
    }

    /// A role can always register as its own team.
    #[test]
    fn prop_natural_team_always_registers(role in test_gens::role()) {
        prop_assert!(can_register_as_team(&role, role.team));
    }

    /// The true role is always first; without role registration it is the
    /// only option.
    #[test]
    fn prop_display_roles_start_with_own(role in test_gens::role()) {
        let catalog = RoleCatalog::trouble_brewing();
        let options = possible_display_roles(&role, catalog.roles());

        prop_assert_eq!(options[0].id, role.id);
        if !has_role_registration(&role) {
            prop_assert_eq!(options.len(), 1);
        } else {
            let teams = role.registration.map(|r| r.can_register_as_teams).unwrap_or(&[]);
            for option in &options[1..] {
                prop_assert!(teams.contains(&option.team));
                prop_assert_ne!(option.id, role.id);
            }
        }
    }
}

#[test]
fn recluse_display_roles_follow_catalog_order() {
    let catalog = RoleCatalog::trouble_brewing();
    let recluse = catalog.get("recluse").unwrap();
    let ids: Vec<&str> = possible_display_roles(recluse, catalog.roles())
        .iter()
        .map(|r| r.id)
        .collect();
    assert_eq!(ids, vec!["recluse", "saint", "baron", "imp"]);
}
