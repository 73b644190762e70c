//! Core engine types: players, treasures, state, actions, RNG, configuration.
//!
//! These are the building blocks the rules and runners operate on. Rule
//! constants come from [`GameConfig`] rather than being hard-coded.

pub mod action;
pub mod config;
pub mod player;
pub mod rng;
pub mod state;
pub mod treasure;

pub use action::{Action, ActionError, ActionRequest, Arg, Direction};
pub use config::GameConfig;
pub use player::{Player, PlayerId, PlayerMap};
pub use rng::GameRng;
pub use state::{GameState, RoomState};
pub use treasure::Treasure;
