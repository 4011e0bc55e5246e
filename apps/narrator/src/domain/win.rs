//! Win condition evaluation.

use serde::{Deserialize, Serialize};

use crate::domain::state::{GameState, RoleId};
use crate::domain::teams::Alignment;
use crate::roles::RoleCatalog;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WinOutcome {
    pub winner: Alignment,
    pub condition_id: String,
    pub role_id: RoleId,
}

/// Run the predicates of every role present in the game, in catalog order,
/// and report the first one that holds.
///
/// Predicates are expected to be mutually exclusive; no conflict resolution
/// is attempted.
pub fn evaluate(catalog: &RoleCatalog, state: &GameState) -> Option<WinOutcome> {
    catalog
        .roles()
        .iter()
        .filter(|role| state.players.iter().any(|p| p.role_id == role.id))
        .flat_map(|role| role.win_conditions.iter().map(move |c| (role, c)))
        .find(|(_, condition)| (condition.check)(catalog, state))
        .map(|(role, condition)| WinOutcome {
            winner: condition.winner,
            condition_id: condition.id.to_string(),
            role_id: role.id.to_string(),
        })
}
