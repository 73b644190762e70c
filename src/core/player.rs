//! Players: identifiers, per-player storage and the adventurer entity.
//!
//! ## PlayerId
//!
//! Type-safe player identifier supporting 1-255 players, assigned in
//! registration order.
//!
//! ## PlayerMap
//!
//! Per-player data storage backed by `Vec` for O(1) access.
//!
//! ## Player
//!
//! The mutable in-game adventurer: location, stamina, inventory and the
//! strategy steering it.

use im::Vector;
use serde::{Deserialize, Serialize};
use std::ops::{Index, IndexMut};
use std::panic::{self, AssertUnwindSafe};
use std::time::{Duration, Instant};

use super::action::{Action, ActionError};
use super::state::RoomState;
use super::treasure::Treasure;
use crate::strategy::{Decision, Fault, Strategy};

/// Player identifier supporting 1-255 players.
///
/// Player indices are 0-based: the first registered player is `PlayerId(0)`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct PlayerId(pub u8);

impl PlayerId {
    /// Create a new player ID.
    #[must_use]
    pub const fn new(id: u8) -> Self {
        Self(id)
    }

    /// Get the raw player index (0-based).
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }

    /// Iterate over all player IDs for a game with `player_count` players.
    ///
    /// ```
    /// use ruins::core::PlayerId;
    ///
    /// let players: Vec<_> = PlayerId::all(4).collect();
    /// assert_eq!(players.len(), 4);
    /// assert_eq!(players[3], PlayerId::new(3));
    /// ```
    pub fn all(player_count: usize) -> impl Iterator<Item = PlayerId> {
        (0..player_count as u8).map(PlayerId)
    }
}

impl std::fmt::Display for PlayerId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Player {}", self.0)
    }
}

/// Per-player data storage with O(1) access.
///
/// ```
/// use ruins::core::{PlayerId, PlayerMap};
///
/// let mut stamina: PlayerMap<u32> = PlayerMap::with_value(3, 1000);
/// stamina[PlayerId::new(1)] -= 15;
/// assert_eq!(stamina[PlayerId::new(1)], 985);
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct PlayerMap<T> {
    data: Vec<T>,
}

impl<T> PlayerMap<T> {
    /// Create a new PlayerMap with values from a factory function.
    pub fn new(player_count: usize, factory: impl Fn(PlayerId) -> T) -> Self {
        assert!(player_count > 0, "Must have at least 1 player");
        assert!(player_count <= 255, "At most 255 players supported");

        let data = (0..player_count as u8)
            .map(|i| factory(PlayerId(i)))
            .collect();

        Self { data }
    }

    /// Wrap an already-built vector, one entry per player in registration order.
    pub fn from_vec(data: Vec<T>) -> Self {
        assert!(!data.is_empty(), "Must have at least 1 player");
        assert!(data.len() <= 255, "At most 255 players supported");
        Self { data }
    }

    /// Create a new PlayerMap with all entries set to the same value.
    pub fn with_value(player_count: usize, value: T) -> Self
    where
        T: Clone,
    {
        Self::new(player_count, |_| value.clone())
    }

    /// Get the number of players.
    #[must_use]
    pub fn player_count(&self) -> usize {
        self.data.len()
    }

    /// Get a reference to a player's data.
    #[must_use]
    pub fn get(&self, player: PlayerId) -> &T {
        &self.data[player.index()]
    }

    /// Get a mutable reference to a player's data.
    pub fn get_mut(&mut self, player: PlayerId) -> &mut T {
        &mut self.data[player.index()]
    }

    /// Iterate over (PlayerId, &T) pairs.
    pub fn iter(&self) -> impl Iterator<Item = (PlayerId, &T)> {
        self.data
            .iter()
            .enumerate()
            .map(|(i, v)| (PlayerId(i as u8), v))
    }

    /// Iterate over values in registration order.
    pub fn values(&self) -> impl Iterator<Item = &T> {
        self.data.iter()
    }

    /// Iterate over all player IDs.
    pub fn player_ids(&self) -> impl Iterator<Item = PlayerId> {
        (0..self.data.len() as u8).map(PlayerId)
    }
}

impl<T> Index<PlayerId> for PlayerMap<T> {
    type Output = T;

    fn index(&self, player: PlayerId) -> &Self::Output {
        self.get(player)
    }
}

impl<T> IndexMut<PlayerId> for PlayerMap<T> {
    fn index_mut(&mut self, player: PlayerId) -> &mut Self::Output {
        self.get_mut(player)
    }
}

/// An adventurer inside one game.
///
/// Room `0` means the player has left the ruins; rooms are 1-based otherwise.
pub struct Player {
    /// Registration slot.
    pub id: PlayerId,
    /// Generated character name, unique within the game.
    pub name: String,
    /// Label of the entrant (bot kind) controlling this player.
    pub label: String,
    /// Index of the entrant in the roster the game was built from.
    pub entrant: usize,
    /// Current room (0 = exited).
    pub room: u32,
    /// Remaining stamina.
    pub stamina: u32,
    /// Owned treasures, in acquisition order.
    pub inventory: Vector<Treasure>,
    strategy: Box<dyn Strategy>,
}

impl Player {
    /// Create a player standing in room 1.
    pub fn new(
        id: PlayerId,
        name: impl Into<String>,
        label: impl Into<String>,
        entrant: usize,
        stamina: u32,
        strategy: Box<dyn Strategy>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            label: label.into(),
            entrant,
            room: 1,
            stamina,
            inventory: Vector::new(),
            strategy,
        }
    }

    /// Eligible to act: has stamina and is still inside.
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.stamina > 0 && self.room > 0
    }

    /// Not dead: either has stamina or made it out.
    #[must_use]
    pub fn is_alive(&self) -> bool {
        self.stamina > 0 || self.room == 0
    }

    /// Sum of inventory weights.
    #[must_use]
    pub fn carry_weight(&self) -> u32 {
        self.inventory.iter().map(|t| t.weight).sum()
    }

    /// Sum of inventory values.
    #[must_use]
    pub fn total_value(&self) -> u32 {
        self.inventory.iter().map(|t| t.value).sum()
    }

    /// Let the strategy prepare before the first turn.
    pub fn enter(&mut self) -> Result<(), Fault> {
        let strategy = &mut self.strategy;
        match panic::catch_unwind(AssertUnwindSafe(|| strategy.on_enter())) {
            Ok(Ok(())) => Ok(()),
            Ok(Err(err)) => Err(Fault::Raised(format!("{err:#}"))),
            Err(payload) => Err(Fault::Panicked(panic_message(payload.as_ref()))),
        }
    }

    /// Ask the strategy for this turn's action.
    ///
    /// Errors, panics, missing or malformed answers and (when `limit` is set)
    /// slow answers all come back as [`Decision::Fault`].
    pub fn decide(&mut self, view: &RoomState, limit: Option<Duration>) -> Decision {
        let started = Instant::now();
        let strategy = &mut self.strategy;
        let outcome = panic::catch_unwind(AssertUnwindSafe(|| strategy.decide(view)));
        let elapsed = started.elapsed();

        let decision = match outcome {
            Ok(Ok(Some(request))) => Decision::Act(Action::from(request)),
            Ok(Ok(None)) => Decision::Fault(Fault::NoAction),
            Ok(Err(err)) => match err.downcast::<ActionError>() {
                Ok(malformed) => Decision::Fault(Fault::Malformed(malformed)),
                Err(err) => Decision::Fault(Fault::Raised(format!("{err:#}"))),
            },
            Err(payload) => Decision::Fault(Fault::Panicked(panic_message(payload.as_ref()))),
        };

        match limit {
            Some(limit) if elapsed > limit => Decision::Fault(Fault::TimedOut { elapsed, limit }),
            _ => decision,
        }
    }
}

impl std::fmt::Display for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} ({})", self.name, self.label)
    }
}

impl std::fmt::Debug for Player {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Player")
            .field("id", &self.id)
            .field("name", &self.name)
            .field("label", &self.label)
            .field("room", &self.room)
            .field("stamina", &self.stamina)
            .field("inventory", &self.inventory)
            .finish_non_exhaustive()
    }
}

fn panic_message(payload: &(dyn std::any::Any + Send)) -> String {
    if let Some(s) = payload.downcast_ref::<&str>() {
        (*s).to_string()
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.clone()
    } else {
        "non-string panic payload".to_string()
    }
}
