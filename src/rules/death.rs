//! Death causes.

use serde::{Deserialize, Serialize};

use crate::core::PlayerId;

/// Why an adventurer died. Every rule violation is fatal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DeathCause {
    /// Tried to move without enough stamina, or reached zero stamina inside.
    Exhaustion,
    /// The strategy faulted or did not answer.
    InvalidAction,
    /// Bid unreadable, below the weight or above the stamina.
    BadBid,
    /// The treasure would exceed carrying capacity.
    Overweight,
    /// Dropped an inventory slot that does not exist.
    BadDrop,
    /// Asked for a treasure slot that does not exist.
    Trap,
}

impl DeathCause {
    /// Snake-case identifier.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            DeathCause::Exhaustion => "exhaustion",
            DeathCause::InvalidAction => "invalid_action",
            DeathCause::BadBid => "bad_bid",
            DeathCause::Overweight => "overweight",
            DeathCause::BadDrop => "bad_drop",
            DeathCause::Trap => "trap",
        }
    }
}

impl std::fmt::Display for DeathCause {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A death queued during validation, carried out at commit.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Death {
    pub player: PlayerId,
    pub cause: DeathCause,
    /// Narrative following the player's name.
    pub message: String,
}

impl Death {
    pub fn new(player: PlayerId, cause: DeathCause, message: impl Into<String>) -> Self {
        Self {
            player,
            cause,
            message: message.into(),
        }
    }
}
