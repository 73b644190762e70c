//! Game rules: turn resolution, bidding contention and death.
//!
//! [`TurnResolver`] is the only code that mutates a [`GameState`] during
//! play. Strategies never see the live state, only their own
//! [`RoomState`](crate::core::RoomState).
//!
//! [`GameState`]: crate::core::GameState

pub mod death;
pub mod resolver;

pub use death::{Death, DeathCause};
pub use resolver::{Bid, ContestResult, TurnResolver, TurnSummary};
