//! Tournament configuration parameters.

use serde::{Deserialize, Serialize};

use crate::core::GameConfig;
use crate::error::ConfigError;

/// Tournament configuration parameters.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentConfig {
    /// Seats per game. Also the number of finalists.
    pub game_size: usize,

    /// Pool rounds; every bot plays about this many pool games.
    pub pool_games: u32,

    /// Point lead over the runner-up that ends the final stage.
    pub required_lead: u32,

    /// Hard cap on final games.
    pub max_final_games: u32,

    /// Root seed. Every game seed and shuffle derives from it.
    pub seed: u64,

    /// Rules for every game of the tournament.
    pub game: GameConfig,
}

impl Default for TournamentConfig {
    fn default() -> Self {
        Self {
            game_size: 10,
            pool_games: 20,
            required_lead: 50,
            max_final_games: 500,
            seed: 0,
            game: GameConfig::default(),
        }
    }
}

impl TournamentConfig {
    #[must_use]
    pub fn with_game_size(mut self, size: usize) -> Self {
        self.game_size = size;
        self
    }

    #[must_use]
    pub fn with_pool_games(mut self, rounds: u32) -> Self {
        self.pool_games = rounds;
        self
    }

    #[must_use]
    pub fn with_required_lead(mut self, lead: u32) -> Self {
        self.required_lead = lead;
        self
    }

    #[must_use]
    pub fn with_max_final_games(mut self, games: u32) -> Self {
        self.max_final_games = games;
        self
    }

    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    #[must_use]
    pub fn with_game(mut self, game: GameConfig) -> Self {
        self.game = game;
        self
    }

    /// Check the tournament can run.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.game_size < 2 {
            return Err(ConfigError::GameSizeTooSmall(self.game_size));
        }
        if self.game_size > usize::from(u8::MAX) {
            return Err(ConfigError::TooManyPlayers(self.game_size));
        }
        if self.max_final_games == 0 {
            return Err(ConfigError::NoFinalGames);
        }
        self.game.validate()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = TournamentConfig::default();
        assert_eq!(config.game_size, 10);
        assert_eq!(config.pool_games, 20);
        assert_eq!(config.required_lead, 50);
        assert_eq!(config.max_final_games, 500);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_builders() {
        let config = TournamentConfig::default()
            .with_game_size(4)
            .with_pool_games(3)
            .with_required_lead(7)
            .with_max_final_games(9)
            .with_seed(11)
            .with_game(GameConfig::default().with_starting_stamina(300));
        assert_eq!(config.game_size, 4);
        assert_eq!(config.pool_games, 3);
        assert_eq!(config.required_lead, 7);
        assert_eq!(config.max_final_games, 9);
        assert_eq!(config.seed, 11);
        assert_eq!(config.game.starting_stamina, 300);
    }

    #[test]
    fn test_validate() {
        let tiny = TournamentConfig::default().with_game_size(1);
        assert_eq!(tiny.validate(), Err(ConfigError::GameSizeTooSmall(1)));

        let endless = TournamentConfig::default().with_max_final_games(0);
        assert_eq!(endless.validate(), Err(ConfigError::NoFinalGames));

        let weak = TournamentConfig::default().with_game(GameConfig::default().with_starting_stamina(0));
        assert_eq!(weak.validate(), Err(ConfigError::ZeroStamina));
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = TournamentConfig::default().with_seed(9).with_required_lead(12);
        let json = serde_json::to_string(&config).unwrap();
        let back: TournamentConfig = serde_json::from_str(&json).unwrap();
        assert_eq!(back, config);
    }
}
