//! Tunable pregnancy gameplay settings.
//!
//! Leave and return weeks are fixed in [`crate::constants`]; only the rates
//! are tunable. Hosts and the harness may load a different set from JSON;
//! [`validate_config`] reports every problem at once.

use serde::{Deserialize, Serialize};

use crate::constants::{BASE_CONCEPTION_CHANCE, DEFAULT_FERTILITY};

/// Gameplay rates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PregnancyConfig {
    /// Fertility given to characters added to a roster.
    pub default_fertility: f32,
    /// Conception chance on a risky day before the fertility multiplier.
    pub base_conception_chance: f32,
}

impl Default for PregnancyConfig {
    fn default() -> Self {
        Self {
            default_fertility: DEFAULT_FERTILITY,
            base_conception_chance: BASE_CONCEPTION_CHANCE,
        }
    }
}

/// Configuration validation error.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Fertility must be finite and non-negative.
    InvalidFertility(f32),
    /// Conception chance must be a probability.
    InvalidConceptionChance(f32),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::InvalidFertility(v) => write!(f, "invalid default fertility {}", v),
            ConfigError::InvalidConceptionChance(v) => {
                write!(f, "conception chance {} outside [0, 1]", v)
            }
        }
    }
}

impl std::error::Error for ConfigError {}

/// Validate a configuration, returning all errors found.
pub fn validate_config(config: &PregnancyConfig) -> Vec<ConfigError> {
    let mut errors = Vec::new();

    if !config.default_fertility.is_finite() || config.default_fertility < 0.0 {
        errors.push(ConfigError::InvalidFertility(config.default_fertility));
    }
    if !(0.0..=1.0).contains(&config.base_conception_chance) {
        errors.push(ConfigError::InvalidConceptionChance(
            config.base_conception_chance,
        ));
    }

    errors
}
