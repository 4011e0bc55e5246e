//! Acting order and wake predicates within a single night.

mod common;

use narrator::roles::trouble_brewing::{self, empath::Empath, imp, monk};
use narrator::{
    Game, GamePhase, HistoryKind, NarratorInput, PlayerState, RoleCatalog, RoleDefinition,
    SlotStatus, Team,
};
use narrator_test_support::fixtures::{auto_resolve, resolve_night, started_engine};

fn someone_protected(game: &Game, player: &PlayerState) -> bool {
    player.is_alive() && game.state.players.iter().any(|p| p.has_effect("protected"))
}

/// Wakes only if an earlier role protected someone tonight.
const WATCHER: RoleDefinition = RoleDefinition {
    night_order: Some(20),
    should_wake: Some(someone_protected),
    night_action: Some(&Empath),
    ..RoleDefinition::passive("watcher", Team::Townsfolk)
};

fn watcher_catalog(with_monk: bool) -> RoleCatalog {
    let mut roles = vec![trouble_brewing::VILLAGER];
    if with_monk {
        roles.push(monk::DEFINITION);
    }
    roles.push(WATCHER);
    roles.push(imp::DEFINITION);
    RoleCatalog::new(roles).unwrap()
}

#[test]
fn later_ranks_see_effects_applied_earlier_tonight() {
    let catalog = watcher_catalog(true);
    let mut engine = started_engine(&catalog, &["monk", "watcher", "villager", "imp", "villager"], 4);
    engine.begin_night().unwrap();
    assert!(engine.next_action().is_none());
    engine.end_night().unwrap();

    engine.begin_night().unwrap();
    let prompt = engine.next_action().unwrap();
    assert_eq!(prompt.role_id, "monk");
    engine
        .input(&NarratorInput::TogglePlayer {
            player_id: "P3".into(),
        })
        .unwrap();
    engine.input(&NarratorInput::Proceed).unwrap();
    engine.complete().unwrap().unwrap();
    assert!(engine.game().state.player("P3").unwrap().has_effect("protected"));

    let prompt = engine.next_action().unwrap();
    assert_eq!(prompt.role_id, "watcher");
    auto_resolve(&mut engine);

    let prompt = engine.next_action().unwrap();
    assert_eq!(prompt.role_id, "imp");
    auto_resolve(&mut engine);
    assert!(engine.next_action().is_none());

    engine.end_night().unwrap();
    assert!(!engine.game().state.player("P3").unwrap().has_effect("protected"));
}

#[test]
fn predicate_false_skips_without_history() {
    let catalog = watcher_catalog(false);
    let mut engine = started_engine(&catalog, &["watcher", "villager", "imp", "villager"], 4);
    engine.begin_night().unwrap();
    let before = engine.game().history.len();

    assert!(engine.next_action().is_none());
    assert_eq!(engine.game().history.len(), before);
    let statuses: Vec<SlotStatus> = engine
        .schedule()
        .unwrap()
        .slots()
        .iter()
        .map(|s| s.status)
        .collect();
    assert_eq!(statuses, vec![SlotStatus::Skipped, SlotStatus::Skipped]);
}

#[test]
fn full_night_runs_in_rank_order() {
    let catalog = RoleCatalog::trouble_brewing();
    let mut engine = started_engine(
        &catalog,
        &["imp", "undertaker", "empath", "chef", "fortune_teller", "monk", "villager"],
        9,
    );
    engine.begin_night().unwrap();
    let first: Vec<String> = resolve_night(&mut engine)
        .into_iter()
        .map(|o| o.role_id)
        .collect();
    assert_eq!(first, vec!["chef", "empath", "fortune_teller"]);
    engine.end_night().unwrap();

    engine.execute("P7").unwrap();
    engine.begin_night().unwrap();
    let second: Vec<String> = resolve_night(&mut engine)
        .into_iter()
        .map(|o| o.role_id)
        .collect();
    assert_eq!(second, vec!["monk", "empath", "fortune_teller", "imp", "undertaker"]);

    let kinds: Vec<HistoryKind> = engine
        .game()
        .history
        .entries()
        .iter()
        .map(|e| e.kind)
        .collect();
    assert_eq!(kinds.first(), Some(&HistoryKind::GameStarted));
    assert_eq!(engine.game().state.phase, GamePhase::Night);
    assert_eq!(engine.sink().len(), 1);
}
