//! Property-based tests for seating helpers.

use proptest::prelude::*;

use crate::domain::seating::{alive_neighbors, count_evil_pairs};
use crate::domain::state::PlayerState;
use crate::domain::{test_gens, test_prelude};

fn evil_lookup(flags: &[(bool, bool)]) -> impl Fn(&PlayerState) -> bool + '_ {
    move |p| {
        p.id[1..]
            .parse::<usize>()
            .ok()
            .and_then(|i| flags.get(i))
            .is_some_and(|(_, evil)| *evil)
    }
}

proptest! {
    #![proptest_config(test_prelude::proptest_config())]

    /// Pairs never exceed the number of alive players and need two of them.
    #[test]
    fn prop_evil_pairs_bounded(flags in test_gens::circle()) {
        let state = test_gens::circle_state(&flags);
        let alive = flags.iter().filter(|(a, _)| *a).count() as u32;
        let pairs = count_evil_pairs(&state, evil_lookup(&flags));

        if alive < 2 {
            prop_assert_eq!(pairs, 0);
        } else {
            prop_assert!(pairs <= alive);
        }
    }

    /// With nobody evil there are no pairs; with everyone evil every link counts.
    #[test]
    fn prop_evil_pairs_extremes(flags in test_gens::circle()) {
        let state = test_gens::circle_state(&flags);
        let alive = flags.iter().filter(|(a, _)| *a).count() as u32;

        prop_assert_eq!(count_evil_pairs(&state, |_| false), 0);
        let expected = if alive < 2 { 0 } else { alive };
        prop_assert_eq!(count_evil_pairs(&state, |_| true), expected);
    }

    /// Neighbours are alive and never the player themself.
    #[test]
    fn prop_neighbors_alive_and_distinct(flags in test_gens::circle(), pick in any::<prop::sample::Index>()) {
        prop_assume!(!flags.is_empty());
        let state = test_gens::circle_state(&flags);
        let me = &state.players[pick.index(flags.len())];

        let (left, right) = alive_neighbors(&state, &me.id);
        for n in [left, right].into_iter().flatten() {
            prop_assert!(n.alive);
            prop_assert_ne!(&n.id, &me.id);
        }
        let others_alive = state.players.iter().any(|p| p.alive && p.id != me.id);
        prop_assert_eq!(left.is_some(), others_alive);
        prop_assert_eq!(right.is_some(), others_alive);
    }
}
