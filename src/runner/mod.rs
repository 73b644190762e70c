//! Game driving: the turn loop, final ranking and replays.

pub mod game;
pub mod ranking;
pub mod replay;

pub use game::GameRunner;
pub use ranking::{rank, GameOutcome, RankKey, Standing};
pub use replay::Replay;
