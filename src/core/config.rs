//! Game configuration.
//!
//! The rule constants of a game (starting stamina, carrying capacity, the
//! movement cost curve) live in [`GameConfig`]. The defaults are the
//! standard Ruins rules; tests and variants override them via the builder.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::ConfigError;

/// Rule constants for a single game.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameConfig {
    /// Stamina every player starts with.
    pub starting_stamina: u32,

    /// Maximum total weight a player can carry.
    pub carry_capacity: u32,

    /// Flat part of a move's stamina cost.
    pub move_base_cost: u32,

    /// Every started block of this much carried weight adds 1 to a move's cost.
    pub move_weight_divisor: u32,

    /// Stamina spent on every drop, valid or not.
    pub drop_cost: u32,

    /// Upper bound on a single decision call. Exceeding it forfeits the turn.
    ///
    /// `None` disables the check, which keeps games bit-reproducible
    /// regardless of machine speed.
    pub decision_timeout: Option<Duration>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            starting_stamina: 1000,
            carry_capacity: 50,
            move_base_cost: 10,
            move_weight_divisor: 5,
            drop_cost: 1,
            decision_timeout: None,
        }
    }
}

impl GameConfig {
    /// Create the standard rules.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set starting stamina.
    #[must_use]
    pub fn with_starting_stamina(mut self, stamina: u32) -> Self {
        self.starting_stamina = stamina;
        self
    }

    /// Set carrying capacity.
    #[must_use]
    pub fn with_carry_capacity(mut self, capacity: u32) -> Self {
        self.carry_capacity = capacity;
        self
    }

    /// Set the decision time limit.
    #[must_use]
    pub fn with_decision_timeout(mut self, limit: Duration) -> Self {
        self.decision_timeout = Some(limit);
        self
    }

    /// Stamina needed to move while carrying `carry_weight`.
    ///
    /// ```
    /// use ruins::core::GameConfig;
    ///
    /// let config = GameConfig::default();
    /// assert_eq!(config.move_cost(0), 10);
    /// assert_eq!(config.move_cost(1), 11);
    /// assert_eq!(config.move_cost(10), 12);
    /// assert_eq!(config.move_cost(11), 13);
    /// ```
    #[must_use]
    pub fn move_cost(&self, carry_weight: u32) -> u32 {
        self.move_base_cost + carry_weight.div_ceil(self.move_weight_divisor)
    }

    /// Check the configuration is playable.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.starting_stamina == 0 {
            return Err(ConfigError::ZeroStamina);
        }
        if self.move_weight_divisor == 0 {
            return Err(ConfigError::ZeroWeightDivisor);
        }
        Ok(())
    }
}
