//! End-of-game ranking and scoring.
//!
//! Players are ordered by, in priority:
//!
//! 1. being alive
//! 2. total value carried
//! 3. lighter load
//! 4. fewer treasures
//! 5. treasure values compared from the most valuable down
//!
//! Ties after all of that keep registration order. The player ranked `k`
//! (0-based) among `n` scores `n - k` if alive with at least one treasure,
//! otherwise nothing.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::core::{GameState, Player, PlayerId};

/// Comparable summary of a player's haul. Greater is better.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RankKey {
    pub alive: bool,
    pub total_value: u32,
    pub carry_weight: u32,
    pub treasure_count: usize,
    /// Treasure values, most valuable first.
    pub values: Vec<u32>,
}

impl RankKey {
    #[must_use]
    pub fn of(player: &Player) -> Self {
        let mut values: Vec<u32> = player.inventory.iter().map(|t| t.value).collect();
        values.sort_unstable_by(|a, b| b.cmp(a));
        Self {
            alive: player.is_alive(),
            total_value: player.total_value(),
            carry_weight: player.carry_weight(),
            treasure_count: player.inventory.len(),
            values,
        }
    }
}

impl Ord for RankKey {
    fn cmp(&self, other: &Self) -> Ordering {
        self.alive
            .cmp(&other.alive)
            .then(self.total_value.cmp(&other.total_value))
            .then(other.carry_weight.cmp(&self.carry_weight))
            .then(other.treasure_count.cmp(&self.treasure_count))
            .then_with(|| self.values.cmp(&other.values))
    }
}

impl PartialOrd for RankKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// One row of the final table.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Standing {
    pub player: PlayerId,
    /// Roster slot of the entrant that played.
    pub entrant: usize,
    pub label: String,
    pub name: String,
    pub alive: bool,
    pub money: u32,
    pub treasures: usize,
    pub score: u32,
}

impl Standing {
    /// `$value`, or `DEAD`.
    #[must_use]
    pub fn money_display(&self) -> String {
        if self.alive {
            format!("${}", self.money)
        } else {
            "DEAD".to_string()
        }
    }
}

/// Rank every player of a finished game and assign scores.
#[must_use]
pub fn rank(state: &GameState) -> Vec<Standing> {
    let mut keyed: Vec<(RankKey, &Player)> = state
        .players()
        .values()
        .map(|p| (RankKey::of(p), p))
        .collect();
    keyed.sort_by(|a, b| b.0.cmp(&a.0));

    let n = keyed.len() as u32;
    keyed
        .into_iter()
        .enumerate()
        .map(|(k, (key, player))| Standing {
            player: player.id,
            entrant: player.entrant,
            label: player.label.clone(),
            name: player.name.clone(),
            alive: key.alive,
            money: key.total_value,
            treasures: key.treasure_count,
            score: if key.alive && key.treasure_count > 0 {
                n - k as u32
            } else {
                0
            },
        })
        .collect()
}

/// Result of one game.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct GameOutcome {
    pub seed: u64,
    pub turns: u32,
    /// Best first.
    pub standings: Vec<Standing>,
}

impl GameOutcome {
    /// The top-ranked player.
    #[must_use]
    pub fn winner(&self) -> Option<&Standing> {
        self.standings.first()
    }

    /// Score of the player seated from roster slot `entrant`.
    #[must_use]
    pub fn score_of(&self, entrant: usize) -> Option<u32> {
        self.standings
            .iter()
            .find(|s| s.entrant == entrant)
            .map(|s| s.score)
    }

    /// Standing of `player`.
    #[must_use]
    pub fn standing(&self, player: PlayerId) -> Option<&Standing> {
        self.standings.iter().find(|s| s.player == player)
    }
}
