//! Night scheduler: decides who acts, in what order, and whether they wake.

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::game::Game;
use crate::domain::state::{GameState, PlayerId, RoleId};
use crate::night::session::{AbilityContext, ActionSession};
use crate::roles::RoleCatalog;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SlotStatus {
    Pending,
    Active,
    Done,
    Skipped,
}

/// One (player, role) candidate for this night.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightSlot {
    pub player_id: PlayerId,
    pub role_id: RoleId,
    pub rank: u32,
    pub status: SlotStatus,
}

/// Acting order for one night plus the currently open session.
///
/// Wake predicates are evaluated lazily when a slot comes up, so each slot
/// sees everything applied by the slots before it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NightSchedule {
    pub round: u32,
    slots: Vec<NightSlot>,
    cursor: usize,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    session: Option<ActionSession>,
}

impl NightSchedule {
    /// Collect every seated player whose role has a night-order rank.
    ///
    /// Order: ascending rank, then catalog declaration order, then seat.
    pub fn build(catalog: &RoleCatalog, state: &GameState) -> Self {
        let mut keyed: Vec<((u32, usize, usize), NightSlot)> = state
            .players
            .iter()
            .enumerate()
            .filter_map(|(seat, player)| {
                let role = catalog.role_of(player)?;
                let rank = role.night_order?;
                let position = catalog.position(role.id)?;
                Some((
                    (rank, position, seat),
                    NightSlot {
                        player_id: player.id.clone(),
                        role_id: role.id.to_string(),
                        rank,
                        status: SlotStatus::Pending,
                    },
                ))
            })
            .collect();
        keyed.sort_by_key(|(key, _)| *key);

        Self {
            round: state.round,
            slots: keyed.into_iter().map(|(_, slot)| slot).collect(),
            cursor: 0,
            session: None,
        }
    }

    pub fn slots(&self) -> &[NightSlot] {
        &self.slots
    }

    pub fn session(&self) -> Option<&ActionSession> {
        self.session.as_ref()
    }

    pub fn session_mut(&mut self) -> Option<&mut ActionSession> {
        self.session.as_mut()
    }

    /// True once every slot is done or skipped.
    pub fn is_finished(&self) -> bool {
        self.session.is_none() && self.cursor >= self.slots.len()
    }

    /// Open the next slot that wakes, skipping the rest. Returns the open
    /// session, or `None` when the night has nobody left to act.
    pub fn advance(&mut self, catalog: &RoleCatalog, game: &Game) -> Option<&ActionSession> {
        if self.session.is_some() {
            return self.session.as_ref();
        }

        while let Some(slot) = self.slots.get_mut(self.cursor) {
            let opened = Self::try_open(slot, catalog, game);
            match opened {
                Some(session) => {
                    slot.status = SlotStatus::Active;
                    self.session = Some(session);
                    return self.session.as_ref();
                }
                None => {
                    slot.status = SlotStatus::Skipped;
                    self.cursor += 1;
                }
            }
        }
        None
    }

    fn try_open(slot: &NightSlot, catalog: &RoleCatalog, game: &Game) -> Option<ActionSession> {
        let Some(player) = game.state.player(&slot.player_id) else {
            debug!(player_id = %slot.player_id, "Slot player no longer seated");
            return None;
        };
        let role = catalog.get(&slot.role_id)?;
        let Some(ability) = role.night_action else {
            debug!(role_id = role.id, "Role has a rank but no night action");
            return None;
        };
        if !role.wakes(game, player) {
            debug!(player_id = %player.id, role_id = role.id, "Does not wake");
            return None;
        }

        let cx = AbilityContext {
            catalog,
            game,
            player,
        };
        let phase = ability.entry_phase(&cx);
        debug!(player_id = %player.id, role_id = role.id, ?phase, "Wakes");
        Some(ActionSession::new(role.id, player.id.clone(), phase))
    }

    /// Close the open slot as done and hand back its session.
    pub fn finish_active(&mut self) -> Option<ActionSession> {
        let session = self.session.take()?;
        if let Some(slot) = self.slots.get_mut(self.cursor) {
            slot.status = SlotStatus::Done;
        }
        self.cursor += 1;
        Some(session)
    }
}
