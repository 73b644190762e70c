//! Tournaments: pool rotation and the finalist series.

pub mod config;
pub mod pool;
pub mod scheduler;

pub use config::TournamentConfig;
pub use pool::PoolBatcher;
pub use scheduler::{BotScore, PoolReport, Tournament, TournamentOutcome, TournamentReport};
