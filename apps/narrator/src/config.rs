use std::env;

use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::error::EngineError;

pub const RNG_SEED_VAR: &str = "NARRATOR_RNG_SEED";
pub const LOG_VAR: &str = "NARRATOR_LOG";
pub const DEFAULT_LOG_FILTER: &str = "info";

/// Engine settings. Every field has a default so an empty environment is valid.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngineConfig {
    /// Seed for random Narrator helpers; `None` draws a fresh seed per engine.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rng_seed: Option<u64>,
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_log_filter() -> String {
    DEFAULT_LOG_FILTER.to_string()
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            rng_seed: None,
            log_filter: default_log_filter(),
        }
    }
}

impl EngineConfig {
    /// Read `NARRATOR_RNG_SEED` and `NARRATOR_LOG`, falling back to defaults.
    pub fn from_env() -> Result<Self, EngineError> {
        Ok(Self {
            rng_seed: rng_seed()?,
            log_filter: env::var(LOG_VAR).unwrap_or_else(|_| default_log_filter()),
        })
    }

    pub fn seeded(seed: u64) -> Self {
        Self {
            rng_seed: Some(seed),
            ..Self::default()
        }
    }

    /// Deterministic when a seed is configured.
    pub fn rng(&self) -> ChaCha8Rng {
        match self.rng_seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_rng(&mut rand::rng()),
        }
    }
}

fn rng_seed() -> Result<Option<u64>, EngineError> {
    match env::var(RNG_SEED_VAR) {
        Ok(raw) if raw.trim().is_empty() => Ok(None),
        Ok(raw) => raw.trim().parse::<u64>().map(Some).map_err(|e| {
            EngineError::config(format!("{RNG_SEED_VAR} must be an unsigned integer, got '{raw}': {e}"))
        }),
        Err(_) => Ok(None),
    }
}
