//! Procedural content: treasures, rooms and narrative flavor.
//!
//! Both sources are deterministic given their stream. A game runs the
//! generator on its root stream and flavor on a context stream derived from
//! the same seed.

pub mod flavor;
pub mod generator;

pub use flavor::Flavor;
pub use generator::TreasureGenerator;
