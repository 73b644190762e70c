//! Strategies: the plug-in interface and the built-in adventurers.

pub mod builtin;
pub mod traits;

pub use builtin::{Chad, Coward, Drunkard, EagerThief, EmoKid, GreedyBastard, MischievousKid, Scripted};
pub use traits::{Decision, Entrant, Fault, Strategy, StrategyFactory};
