//! JSON record tree for saving and resuming a game, including a night that
//! is still in progress.

use serde::{Deserialize, Serialize};

use crate::domain::game::Game;
use crate::error::EngineError;
use crate::errors::domain::DomainError;
use crate::night::scheduler::NightSchedule;

pub const FORMAT_VERSION: u32 = 1;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedGame {
    pub version: u32,
    pub game: Game,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub night: Option<NightSchedule>,
}

pub fn to_json(game: &Game, night: Option<&NightSchedule>) -> Result<String, EngineError> {
    let saved = SavedGame {
        version: FORMAT_VERSION,
        game: game.clone(),
        night: night.cloned(),
    };
    Ok(serde_json::to_string(&saved)?)
}

pub fn from_json(input: &str) -> Result<SavedGame, EngineError> {
    let saved: SavedGame = serde_json::from_str(input)?;
    if saved.version != FORMAT_VERSION {
        return Err(DomainError::validation_other(format!(
            "unsupported save format version {}",
            saved.version
        ))
        .into());
    }
    Ok(saved)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::state::{Effect, Expiry, PlayerState};

    #[test]
    fn game_survives_round_trip() {
        let mut game = Game::with_id(
            "01J0000000000000000000000",
            vec![
                PlayerState::new("P1", "Ann", "soldier"),
                PlayerState::new("P2", "Bob", "imp"),
            ],
        );
        game.state.players[0]
            .effects
            .push(Effect::new("safe_from_demon", Expiry::Never));

        let json = to_json(&game, None).unwrap();
        let saved = from_json(&json).unwrap();
        assert_eq!(saved.game, game);
        assert!(saved.night.is_none());
    }

    #[test]
    fn malformed_input_is_a_serde_error() {
        assert!(matches!(from_json("{not json"), Err(EngineError::Serde(_))));
    }

    #[test]
    fn unknown_version_is_rejected() {
        let game = Game::with_id("g", vec![]);
        let json = to_json(&game, None).unwrap().replace("\"version\":1", "\"version\":99");
        assert!(matches!(from_json(&json), Err(EngineError::Domain(_))));
    }
}
