//! Treasure: the immutable loot value moved between rooms and inventories.

use serde::{Deserialize, Serialize};

/// A piece of loot.
///
/// Treasures are created once by the generator and never mutated; they only
/// move between a room's pool and a player's inventory.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Treasure {
    /// Identifier such as `Treasure #007`.
    pub name: String,
    /// Score value.
    pub value: u32,
    /// Weight in kg, at least 1. Also the minimum bid.
    pub weight: u32,
}

impl Treasure {
    /// Create a treasure.
    pub fn new(name: impl Into<String>, value: u32, weight: u32) -> Self {
        debug_assert!(weight >= 1, "treasure weight must be at least 1");
        Self {
            name: name.into(),
            value,
            weight,
        }
    }
}

impl std::fmt::Display for Treasure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (${}, {}kg)", self.name, self.value, self.weight)
    }
}
