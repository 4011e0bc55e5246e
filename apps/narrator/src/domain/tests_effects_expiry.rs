//! Effect lifetimes across phase boundaries, driven through `Game`.

use crate::domain::effects::{add_effects, effects_of};
use crate::domain::game::Game;
use crate::domain::history::HistoryKind;
use crate::domain::state::{Effect, Expiry, GamePhase, PlayerState};
use crate::errors::domain::{ConflictKind, DomainError, ValidationKind};
use crate::roles::RoleCatalog;

fn started() -> Game {
    let mut game = Game::with_id(
        "g",
        vec![
            PlayerState::new("P1", "Ann", "soldier"),
            PlayerState::new("P2", "Bob", "monk"),
            PlayerState::new("P3", "Cid", "imp"),
        ],
    );
    game.start(&RoleCatalog::trouble_brewing()).unwrap();
    game
}

fn kinds(game: &Game, id: &str) -> Vec<String> {
    effects_of(&game.state, id).iter().map(|e| e.kind.clone()).collect()
}

#[test]
fn start_grants_initial_effects() {
    let game = started();
    assert_eq!(kinds(&game, "P1"), vec!["safe_from_demon"]);
    assert!(kinds(&game, "P2").is_empty());
    assert_eq!(game.history.last().unwrap().kind, HistoryKind::GameStarted);
}

#[test]
fn end_of_night_effects_expire_when_day_starts() {
    let mut game = started();
    game.start_night().unwrap();
    add_effects(
        &mut game.state,
        "P2",
        [
            Effect::new("protected", Expiry::EndOfNight),
            Effect::new("marked", Expiry::EndOfDay),
        ],
    );

    game.start_day().unwrap();
    assert_eq!(kinds(&game, "P2"), vec!["marked"]);

    game.start_night().unwrap();
    assert!(kinds(&game, "P2").is_empty());
    assert_eq!(kinds(&game, "P1"), vec!["safe_from_demon"]);
}

#[test]
fn snapshots_record_state_after_expiry() {
    let mut game = started();
    game.start_night().unwrap();
    add_effects(&mut game.state, "P2", [Effect::new("protected", Expiry::EndOfNight)]);
    game.start_day().unwrap();

    let snapshot = game.history.latest_snapshot().unwrap();
    assert_eq!(snapshot.phase, GamePhase::Day);
    assert!(!snapshot.player("P2").unwrap().has_effect("protected"));
}

#[test]
fn rounds_advance_per_night() {
    let mut game = started();
    assert_eq!(game.start_night().unwrap(), 1);
    assert!(game.is_first_night());
    game.start_day().unwrap();
    assert_eq!(game.start_night().unwrap(), 2);
    assert!(!game.is_first_night());
}

#[test]
fn phase_misuse_is_rejected() {
    let mut game = Game::with_id("g", vec![PlayerState::new("P1", "Ann", "villager")]);
    let err = game.start_night().unwrap_err();
    assert_eq!(
        err,
        DomainError::validation(ValidationKind::PhaseMismatch, "Night can only start after setup or a day")
    );

    let mut game = started();
    assert!(matches!(
        game.start_day(),
        Err(DomainError::Validation(ValidationKind::PhaseMismatch, _))
    ));
    assert!(matches!(
        game.execute("P1"),
        Err(DomainError::Validation(ValidationKind::PhaseMismatch, _))
    ));
}

#[test]
fn execution_of_dead_or_unknown_player_fails() {
    let mut game = started();
    game.start_night().unwrap();
    game.start_day().unwrap();
    game.execute("P2").unwrap();

    assert!(matches!(
        game.execute("P2"),
        Err(DomainError::Validation(ValidationKind::PlayerDead, _))
    ));
    assert!(matches!(game.execute("ghost"), Err(DomainError::NotFound(_, _))));
    assert_eq!(game.history.executed_player_since_last_day(), Some("P2"));
}

#[test]
fn duplicate_seats_are_a_conflict() {
    let mut game = Game::with_id(
        "g",
        vec![
            PlayerState::new("P1", "Ann", "villager"),
            PlayerState::new("P1", "Ann again", "imp"),
        ],
    );
    assert!(matches!(
        game.start(&RoleCatalog::trouble_brewing()),
        Err(DomainError::Conflict(ConflictKind::DuplicatePlayerId, _))
    ));
}
