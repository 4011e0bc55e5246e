use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::errors::domain::{DomainError, NotFoundKind};

/// Character type a role belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Team {
    Townsfolk,
    Outsider,
    Minion,
    Demon,
}

/// Which side a player is truly on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    Good,
    Evil,
}

impl Team {
    pub const ALL: [Team; 4] = [Team::Townsfolk, Team::Outsider, Team::Minion, Team::Demon];

    pub const fn alignment(self) -> Alignment {
        match self {
            Team::Townsfolk | Team::Outsider => Alignment::Good,
            Team::Minion | Team::Demon => Alignment::Evil,
        }
    }

    pub const fn is_evil(self) -> bool {
        matches!(self.alignment(), Alignment::Evil)
    }

    pub const fn as_str(self) -> &'static str {
        match self {
            Team::Townsfolk => "townsfolk",
            Team::Outsider => "outsider",
            Team::Minion => "minion",
            Team::Demon => "demon",
        }
    }

    /// Accepts full names and the tf/os/mn/dm shorthands.
    pub fn from_str_or_shorthand(s: &str) -> Option<Team> {
        match s.to_lowercase().as_str() {
            "townsfolk" | "tf" => Some(Team::Townsfolk),
            "outsider" | "os" => Some(Team::Outsider),
            "minion" | "mn" => Some(Team::Minion),
            "demon" | "dm" => Some(Team::Demon),
            _ => None,
        }
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Team {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Team::from_str_or_shorthand(s)
            .ok_or_else(|| DomainError::not_found(NotFoundKind::Other("team".into()), s))
    }
}
