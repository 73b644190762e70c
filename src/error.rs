//! Crate-level error types.
//!
//! Strategy misbehaviour is not an error here: it becomes an in-game
//! [`Fault`](crate::strategy::Fault) and a death. These types cover the
//! caller's mistakes (bad configuration, unusable replays).

use thiserror::Error;

/// Invalid game or tournament setup.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// A game needs at least one adventurer.
    #[error("no entrants given")]
    EmptyRoster,

    /// Player ids are a `u8`.
    #[error("{0} players requested, at most 255 supported")]
    TooManyPlayers(usize),

    /// Players would be dead before the first turn.
    #[error("starting stamina must be positive")]
    ZeroStamina,

    /// Move cost divides carry weight by this.
    #[error("move weight divisor must be positive")]
    ZeroWeightDivisor,

    /// Games need room for at least two competitors.
    #[error("game size must be at least 2, got {0}")]
    GameSizeTooSmall(usize),

    /// The final stage must be allowed to run at least once.
    #[error("max final games must be positive")]
    NoFinalGames,
}

/// Failure to store or rebuild a replay.
#[derive(Debug, Error)]
pub enum ReplayError {
    /// Reading or writing the replay file failed.
    #[error("replay i/o failed: {0}")]
    Io(#[from] std::io::Error),

    /// The replay bytes could not be encoded or decoded.
    #[error("replay encoding failed: {0}")]
    Encoding(#[from] bincode::Error),

    /// The replay names a bot the registry does not know.
    #[error("replay references unknown entrant {0:?}")]
    UnknownEntrant(String),

    /// The rebuilt game was rejected.
    #[error(transparent)]
    Config(#[from] ConfigError),
}
