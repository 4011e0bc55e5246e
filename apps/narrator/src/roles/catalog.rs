use std::collections::HashSet;

use tracing::warn;

use super::{trouble_brewing, RoleDefinition};
use crate::domain::state::PlayerState;
use crate::errors::domain::{ConflictKind, DomainError};

/// Lookup table from role id to definition, in declaration order.
#[derive(Debug, Clone)]
pub struct RoleCatalog {
    roles: Vec<RoleDefinition>,
}

impl RoleCatalog {
    /// Build a catalog, rejecting duplicate role ids.
    ///
    /// Equal night-order ranks are allowed (declaration order breaks the
    /// tie) but are logged since they usually indicate a catalog mistake.
    pub fn new<I>(roles: I) -> Result<Self, DomainError>
    where
        I: IntoIterator<Item = RoleDefinition>,
    {
        let roles: Vec<RoleDefinition> = roles.into_iter().collect();

        let mut seen = HashSet::new();
        for role in &roles {
            if !seen.insert(role.id) {
                return Err(DomainError::conflict(
                    ConflictKind::DuplicateRoleId,
                    format!("role id '{}' declared more than once", role.id),
                ));
            }
        }

        let mut ranks = HashSet::new();
        for role in &roles {
            if let Some(rank) = role.night_order {
                if !ranks.insert(rank) {
                    warn!(role_id = role.id, rank, "Night order rank shared with an earlier role");
                }
            }
        }

        Ok(Self { roles })
    }

    /// The built-in Trouble Brewing script.
    pub fn trouble_brewing() -> Self {
        Self {
            roles: trouble_brewing::ROLES.to_vec(),
        }
    }

    pub fn roles(&self) -> &[RoleDefinition] {
        &self.roles
    }

    pub fn get(&self, id: &str) -> Option<&RoleDefinition> {
        self.roles.iter().find(|r| r.id == id)
    }

    /// Declaration index of a role.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.roles.iter().position(|r| r.id == id)
    }

    pub fn role_of(&self, player: &PlayerState) -> Option<&RoleDefinition> {
        self.get(&player.role_id)
    }

    /// Roles that wake at night: ascending rank, ties in declaration order.
    pub fn night_order(&self) -> Vec<&RoleDefinition> {
        let mut ordered: Vec<&RoleDefinition> =
            self.roles.iter().filter(|r| r.night_order.is_some()).collect();
        // Stable sort keeps declaration order for equal ranks.
        ordered.sort_by_key(|r| r.night_order);
        ordered
    }
}
