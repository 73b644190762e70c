//! # ruins
//!
//! An arena for "Ruins", a simultaneous-turn dungeon crawl played by bots.
//!
//! Adventurers start at the entrance of a ruin with a stamina budget. Each
//! turn every adventurer still inside picks one action: walk deeper, walk
//! back, bid stamina on a treasure, or drop one. All actions resolve at once.
//! Whoever makes it out with the most valuable haul wins.
//!
//! ## Design Principles
//!
//! 1. **Untrusted Strategies**: Bots only ever see a [`RoomState`] copy. An
//!    error, panic, slow or malformed answer forfeits the turn and kills the
//!    adventurer, never the game.
//!
//! 2. **Seeded Everything**: A game is a pure function of its roster, its
//!    [`GameConfig`] and a seed. Tournaments derive every game seed from one
//!    root seed.
//!
//! 3. **Configuration Over Convention**: Rule constants live in
//!    [`GameConfig`] and [`TournamentConfig`].
//!
//! 4. **No Global Logger**: Games and tournaments emit [`Event`]s into an
//!    injected [`EventSink`]; [`TracingSink`] forwards them to `tracing`.
//!
//! ## Architecture
//!
//! - **Persistent Data Structures**: Rooms and inventories are `im` vectors,
//!   so snapshots are O(1) and never alias live state.
//!
//! ## Modules
//!
//! - `core`: Players, treasures, state, actions, RNG, configuration
//! - `generation`: Treasure/room generation and name flavor
//! - `strategy`: The strategy trait and built-in bots
//! - `rules`: Turn resolution, bidding and deaths
//! - `runner`: Game loop, ranking and replays
//! - `tournament`: Pool rotation and the final series
//! - `events`: Structured events and sinks
//!
//! ```
//! use ruins::{GameConfig, GameRunner, NullSink};
//! use ruins::strategy::builtin;
//!
//! let roster = vec![builtin::eager_thief(), builtin::drunkard(), builtin::coward()];
//! let outcome = GameRunner::new(GameConfig::default(), &roster, 2024)
//!     .unwrap()
//!     .run(&mut NullSink);
//! assert_eq!(outcome.standings.len(), 3);
//! ```

pub mod core;
pub mod error;
pub mod events;
pub mod generation;
pub mod rules;
pub mod runner;
pub mod strategy;
pub mod tournament;

// Re-export commonly used types
pub use crate::core::{
    Action, ActionError, ActionRequest, Arg, Direction,
    GameConfig, GameRng, GameState, Player, PlayerId, PlayerMap,
    RoomState, Treasure,
};

pub use crate::error::{ConfigError, ReplayError};

pub use crate::events::{Actor, ClassFilter, Event, EventClass, EventSink, NullSink, RecordingSink, TracingSink};

pub use crate::generation::{Flavor, TreasureGenerator};

pub use crate::rules::{Bid, ContestResult, Death, DeathCause, TurnResolver, TurnSummary};

pub use crate::runner::{GameOutcome, GameRunner, Replay, Standing};

pub use crate::strategy::{Decision, Entrant, Fault, Strategy};

pub use crate::tournament::{
    PoolBatcher, Tournament, TournamentConfig, TournamentOutcome, TournamentReport,
};
