//! Fortune Teller red herring: chosen once on the first night, read as the
//! demon by that Fortune Teller for the rest of the game.

mod common;

use narrator::domain::effects::effects_of;
use narrator::{ActionPhase, ActionView, NarratorInput, NightEngine, PlayerInfo, RoleCatalog};
use narrator::Intent;
use narrator_test_support::fixtures::{resolve_night, started_engine};
use serde_json::json;

use common::last_action_of;

const SEATS: [&str; 5] = ["fortune_teller", "villager", "imp", "recluse", "saint"];

fn toggle(engine: &mut NightEngine<'_, Vec<Intent>>, id: &str) -> bool {
    engine
        .input(&NarratorInput::TogglePlayer {
            player_id: id.into(),
        })
        .unwrap()
}

fn proceed(engine: &mut NightEngine<'_, Vec<Intent>>) -> bool {
    engine.input(&NarratorInput::Proceed).unwrap()
}

/// First night: red herring on P2, then check P2 and P5.
fn first_night(engine: &mut NightEngine<'_, Vec<Intent>>) {
    engine.begin_night().unwrap();
    let prompt = engine.next_action().unwrap();
    assert_eq!(prompt.role_id, "fortune_teller");
    assert_eq!(prompt.phase, ActionPhase::RedHerringSetup);
    match &prompt.view {
        ActionView::ChooseRedHerring { candidates, selected } => {
            assert_eq!(candidates, &vec!["P2".to_string(), "P4".to_string(), "P5".to_string()]);
            assert!(selected.is_none());
        }
        other => panic!("unexpected view: {other:?}"),
    }
    assert!(!prompt.can_proceed);
    assert!(!proceed(engine));

    // The demon is never a valid red herring.
    assert!(!engine
        .input(&NarratorInput::ChooseRedHerring {
            player_id: "P3".into()
        })
        .unwrap());
    assert!(engine
        .input(&NarratorInput::ChooseRedHerring {
            player_id: "P2".into()
        })
        .unwrap());
    assert!(proceed(engine));

    assert!(toggle(engine, "P2"));
    assert!(!proceed(engine));
    assert!(toggle(engine, "P5"));
    assert!(!toggle(engine, "P4"));
    assert!(proceed(engine));

    let prompt = engine.prompt().unwrap();
    assert_eq!(prompt.phase, ActionPhase::PlayerView);
    assert!(matches!(
        prompt.view,
        ActionView::Info(PlayerInfo::YesNo { value: true, .. })
    ));
    let outcome = engine.complete().unwrap().unwrap();
    assert_eq!(outcome.applied.entry_ids.len(), 2);
    assert!(engine.next_action().is_none());
    engine.end_night().unwrap();
}

#[test]
fn red_herring_assigned_once_and_persists() {
    let catalog = RoleCatalog::trouble_brewing();
    let mut engine = started_engine(&catalog, &SEATS, 11);
    first_night(&mut engine);

    let effects = effects_of(&engine.game().state, "P2");
    assert_eq!(effects.len(), 1);
    assert_eq!(effects[0].kind, "red_herring");
    assert_eq!(effects[0].data, Some(json!({ "fortuneTellerId": "P1" })));

    let entries = engine.game().history.entries();
    let assign = entries
        .iter()
        .find(|e| e.data["action"] == json!("assign_red_herring"))
        .unwrap();
    assert_eq!(assign.data["redHerringId"], json!("P2"));
    assert!(assign.state_after.player("P2").unwrap().has_effect("red_herring"));

    // Second night: no setup, and the red herring still reads as the demon.
    engine.begin_night().unwrap();
    let prompt = engine.next_action().unwrap();
    assert_eq!(prompt.role_id, "fortune_teller");
    assert_eq!(prompt.phase, ActionPhase::NarratorSetup);
    assert!(!engine
        .input(&NarratorInput::ReturnTo {
            phase: ActionPhase::RedHerringSetup
        })
        .unwrap());

    toggle(&mut engine, "P2");
    toggle(&mut engine, "P5");
    proceed(&mut engine);
    let outcome = engine.complete().unwrap().unwrap();
    assert_eq!(outcome.applied.entry_ids.len(), 1);
    assert_eq!(effects_of(&engine.game().state, "P2").len(), 1);

    let entry = last_action_of(&engine, "fortune_teller");
    assert_eq!(entry.data["result"], json!("yes"));
    assert_eq!(entry.data["checkedPlayers"], json!(["P2", "P5"]));
    assert_eq!(entry.message[0].key, "roles.fortune_teller.history.sawDemon");
}

#[test]
fn recluse_needs_a_demon_registration_decision() {
    let catalog = RoleCatalog::trouble_brewing();
    let mut engine = started_engine(&catalog, &SEATS, 11);
    first_night(&mut engine);
    engine.begin_night().unwrap();
    engine.next_action().unwrap();

    toggle(&mut engine, "P4");
    toggle(&mut engine, "P5");
    proceed(&mut engine);

    let prompt = engine.prompt().unwrap();
    assert_eq!(prompt.phase, ActionPhase::RegistrationSetup);
    match &prompt.view {
        ActionView::AlignmentRegistration { players, .. } => {
            assert_eq!(players, &vec!["P4".to_string()]);
        }
        other => panic!("unexpected view: {other:?}"),
    }
    assert!(!engine
        .input(&NarratorInput::SetAlignmentOverride {
            player_id: "P5".into(),
            registers_as_evil: true,
        })
        .unwrap());
    assert!(engine
        .input(&NarratorInput::SetAlignmentOverride {
            player_id: "P4".into(),
            registers_as_evil: true,
        })
        .unwrap());
    proceed(&mut engine);
    engine.complete().unwrap().unwrap();

    let entry = last_action_of(&engine, "fortune_teller");
    assert_eq!(entry.data["result"], json!("yes"));
    assert_eq!(entry.data["registrationOverrides"], json!({ "P4": true }));
}

#[test]
fn unregistered_recluse_reads_as_no_demon() {
    let catalog = RoleCatalog::trouble_brewing();
    let mut engine = started_engine(&catalog, &SEATS, 11);
    first_night(&mut engine);
    engine.begin_night().unwrap();
    engine.next_action().unwrap();

    toggle(&mut engine, "P4");
    toggle(&mut engine, "P5");
    proceed(&mut engine);
    proceed(&mut engine);
    engine.complete().unwrap().unwrap();

    let entry = last_action_of(&engine, "fortune_teller");
    assert_eq!(entry.data["result"], json!("no"));
}

#[test]
fn random_red_herring_is_a_good_player() {
    let catalog = RoleCatalog::trouble_brewing();
    for seed in 0..16 {
        let mut engine = started_engine(&catalog, &SEATS, seed);
        engine.begin_night().unwrap();
        engine.next_action().unwrap();

        assert!(engine.input(&NarratorInput::RandomRedHerring).unwrap());
        let prompt = engine.prompt().unwrap();
        let ActionView::ChooseRedHerring {
            selected: Some(pick),
            ..
        } = prompt.view
        else {
            panic!("no red herring picked");
        };
        assert!(["P2", "P4", "P5"].contains(&pick.as_str()), "picked {pick}");
    }
}

#[test]
fn each_fortune_teller_has_its_own_red_herring() {
    let catalog = RoleCatalog::trouble_brewing();
    let mut engine = started_engine(
        &catalog,
        &["fortune_teller", "villager", "imp", "saint", "fortune_teller", "soldier"],
        2,
    );
    engine.begin_night().unwrap();
    let outcomes = resolve_night(&mut engine);
    assert_eq!(outcomes.len(), 2);

    // The first candidate is picked each time: P1 marks P2, P5 marks P1.
    let owners = |id: &str| -> Vec<String> {
        effects_of(&engine.game().state, id)
            .iter()
            .filter_map(|e| e.data_str("fortuneTellerId").map(str::to_string))
            .collect()
    };
    assert_eq!(owners("P2"), vec!["P1".to_string()]);
    assert_eq!(owners("P1"), vec!["P5".to_string()]);
}
