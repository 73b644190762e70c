//! Game state: the live dungeon and the per-player view of it.
//!
//! ## RoomState
//!
//! What one adventurer sees when asked for an action:
//! - Current room number and the treasures lying in it
//! - Names of the other active adventurers in the same room
//! - Own inventory and stamina
//!
//! ## GameState
//!
//! Complete game state:
//! - Players in registration order
//! - Rooms generated so far (index 0 holds room 1)
//! - Treasure generator and flavor source
//!
//! Rooms and inventories are `im` persistent vectors, so handing out a
//! snapshot is O(1) and never aliases later mutation.

use im::Vector;
use serde::{Deserialize, Serialize};

use super::config::GameConfig;
use super::player::{Player, PlayerId, PlayerMap};
use super::rng::GameRng;
use super::treasure::Treasure;
use crate::error::ConfigError;
use crate::generation::{Flavor, TreasureGenerator};
use crate::strategy::Entrant;

/// One adventurer's view of the game for a single decision.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RoomState {
    /// Current room (1-based).
    pub room: u32,
    /// Treasures in the room, indexed as `Take` expects.
    pub treasures: Vector<Treasure>,
    /// Names of the other active adventurers in the room.
    pub players: Vec<String>,
    /// Own treasures, indexed as `Drop` expects.
    pub inventory: Vector<Treasure>,
    /// Own remaining stamina.
    pub stamina: u32,
}

impl RoomState {
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
}

impl std::fmt::Display for RoomState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "Room #{}", self.room)?;
        writeln!(f, "  Treasures:")?;
        for treasure in &self.treasures {
            writeln!(f, "    {treasure}")?;
        }
        writeln!(f, "  Other Players:")?;
        for player in &self.players {
            writeln!(f, "    {player}")?;
        }
        writeln!(f, "  Your Inventory:")?;
        for treasure in &self.inventory {
            writeln!(f, "    {treasure}")?;
        }
        write!(f, "  Stamina: {}", self.stamina)
    }
}

/// Complete state of one game.
///
/// Built from a roster of entrants and a seed. The seed fully determines the
/// dungeon, the adventurer names and every strategy's private stream.
pub struct GameState {
    config: GameConfig,
    players: PlayerMap<Player>,
    rooms: Vec<Vector<Treasure>>,
    generator: TreasureGenerator,
    flavor: Flavor,

    /// Turns resolved so far (0 before the first turn).
    pub turn_number: u32,
}

impl GameState {
    /// Seat one player per entrant and generate room 1.
    ///
    /// Names come from the flavor stream, private strategy streams are forks
    /// of the root stream, and the root stream itself then feeds treasure
    /// generation.
    pub fn new(config: GameConfig, entrants: &[Entrant], seed: u64) -> Result<Self, ConfigError> {
        config.validate()?;
        if entrants.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        if entrants.len() > usize::from(u8::MAX) {
            return Err(ConfigError::TooManyPlayers(entrants.len()));
        }

        let mut root = GameRng::new(seed);
        let mut flavor = Flavor::new(root.for_context("flavor"));
        let players = entrants
            .iter()
            .enumerate()
            .map(|(slot, entrant)| {
                let name = flavor.adventurer_name();
                let strategy = entrant.instantiate(&name, root.fork());
                Player::new(
                    PlayerId::new(slot as u8),
                    name,
                    entrant.label(),
                    slot,
                    config.starting_stamina,
                    strategy,
                )
            })
            .collect();

        let mut state = Self {
            config,
            players: PlayerMap::from_vec(players),
            rooms: Vec::new(),
            generator: TreasureGenerator::new(root),
            flavor,
            turn_number: 0,
        };
        state.ensure_room(1);
        Ok(state)
    }

    /// Rule constants.
    #[must_use]
    pub fn config(&self) -> &GameConfig {
        &self.config
    }

    /// Generate rooms up to and including `room`, in order.
    pub fn ensure_room(&mut self, room: u32) {
        while (self.rooms.len() as u32) < room {
            let next = self.rooms.len() as u32 + 1;
            let contents = self.generator.generate_room(next);
            self.rooms.push(contents);
        }
    }

    /// Contents of `room`. Panics if the room was never generated.
    #[must_use]
    pub fn room(&self, room: u32) -> &Vector<Treasure> {
        &self.rooms[Self::room_slot(room)]
    }

    /// Mutable contents of `room`. Panics if the room was never generated.
    pub fn room_mut(&mut self, room: u32) -> &mut Vector<Treasure> {
        &mut self.rooms[Self::room_slot(room)]
    }

    fn room_slot(room: u32) -> usize {
        debug_assert!(room >= 1, "room 0 is outside the ruins");
        room as usize - 1
    }

    /// All rooms generated so far; index 0 is room 1.
    #[must_use]
    pub fn rooms(&self) -> &[Vector<Treasure>] {
        &self.rooms
    }

    /// Build `player`'s view. The player must be inside the ruins.
    #[must_use]
    pub fn snapshot(&self, player: PlayerId) -> RoomState {
        let me = &self.players[player];
        RoomState {
            room: me.room,
            treasures: self.room(me.room).clone(),
            players: self
                .players
                .values()
                .filter(|other| other.id != player && other.is_active() && other.room == me.room)
                .map(|other| other.name.clone())
                .collect(),
            inventory: me.inventory.clone(),
            stamina: me.stamina,
        }
    }

    #[must_use]
    pub fn player(&self, player: PlayerId) -> &Player {
        &self.players[player]
    }

    pub fn player_mut(&mut self, player: PlayerId) -> &mut Player {
        &mut self.players[player]
    }

    /// All players in registration order.
    #[must_use]
    pub fn players(&self) -> &PlayerMap<Player> {
        &self.players
    }

    #[must_use]
    pub fn player_count(&self) -> usize {
        self.players.player_count()
    }

    /// Ids of players still able to act, in registration order.
    #[must_use]
    pub fn active_players(&self) -> Vec<PlayerId> {
        self.players
            .iter()
            .filter(|(_, p)| p.is_active())
            .map(|(id, _)| id)
            .collect()
    }

    /// Whether the game still has someone to play.
    #[must_use]
    pub fn any_active(&self) -> bool {
        self.players.values().any(Player::is_active)
    }

    /// Treasures in rooms plus treasures carried.
    #[must_use]
    pub fn treasure_count(&self) -> usize {
        let in_rooms: usize = self.rooms.iter().map(Vector::len).sum();
        let carried: usize = self.players.values().map(|p| p.inventory.len()).sum();
        in_rooms + carried
    }

    /// Treasures created so far.
    #[must_use]
    pub fn treasures_generated(&self) -> u32 {
        self.generator.generated()
    }

    pub fn flavor_mut(&mut self) -> &mut Flavor {
        &mut self.flavor
    }
}

impl std::fmt::Debug for GameState {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GameState")
            .field("turn_number", &self.turn_number)
            .field("players", &self.players)
            .field("rooms", &self.rooms.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::strategy::builtin;

    fn roster(n: usize) -> Vec<Entrant> {
        (0..n).map(|_| builtin::chad()).collect()
    }

    #[test]
    fn test_new_game_layout() {
        let state = GameState::new(GameConfig::default(), &roster(3), 7).unwrap();
        assert_eq!(state.player_count(), 3);
        assert_eq!(state.rooms().len(), 1);
        assert_eq!(state.turn_number, 0);
        for player in state.players().values() {
            assert_eq!(player.room, 1);
            assert_eq!(player.stamina, 1000);
            assert!(player.inventory.is_empty());
        }
        assert_eq!(state.treasure_count() as u32, state.treasures_generated());
    }

    #[test]
    fn test_roster_limits() {
        assert_eq!(
            GameState::new(GameConfig::default(), &[], 1).unwrap_err(),
            ConfigError::EmptyRoster
        );
        assert_eq!(
            GameState::new(GameConfig::default(), &roster(256), 1).unwrap_err(),
            ConfigError::TooManyPlayers(256)
        );
        let bad = GameConfig::default().with_starting_stamina(0);
        assert_eq!(GameState::new(bad, &roster(2), 1).unwrap_err(), ConfigError::ZeroStamina);
    }

    #[test]
    fn test_ensure_room_fills_gaps() {
        let mut state = GameState::new(GameConfig::default(), &roster(1), 3).unwrap();
        state.ensure_room(4);
        assert_eq!(state.rooms().len(), 4);
        let third = state.room(3).clone();
        state.ensure_room(2);
        assert_eq!(state.room(3), &third);
    }

    #[test]
    fn test_same_seed_same_game() {
        let a = GameState::new(GameConfig::default(), &roster(4), 99).unwrap();
        let b = GameState::new(GameConfig::default(), &roster(4), 99).unwrap();
        assert_eq!(a.room(1), b.room(1));
        let names_a: Vec<_> = a.players().values().map(|p| p.name.clone()).collect();
        let names_b: Vec<_> = b.players().values().map(|p| p.name.clone()).collect();
        assert_eq!(names_a, names_b);
    }

    #[test]
    fn test_snapshot_is_decoupled() {
        let mut state = GameState::new(GameConfig::default(), &roster(3), 11).unwrap();
        let me = PlayerId::new(0);
        let view = state.snapshot(me);
        assert_eq!(view.players.len(), 2);
        assert_eq!(view.treasures, *state.room(1));

        state.room_mut(1).clear();
        state.player_mut(PlayerId::new(1)).stamina = 0;
        assert!(!view.treasures.is_empty());

        let later = state.snapshot(me);
        assert!(later.treasures.is_empty());
        assert_eq!(later.players.len(), 1, "inactive players are hidden");
    }

    #[test]
    fn test_room_state_rendering() {
        let view = RoomState {
            room: 2,
            treasures: Vector::from(vec![Treasure::new("Treasure #004", 23, 4)]),
            players: vec!["Jon Snow".into()],
            inventory: Vector::new(),
            stamina: 970,
        };
        let expected = "Room #2\n  Treasures:\n    Treasure #004 ($23, 4kg)\n  Other Players:\n    Jon Snow\n  Your Inventory:\n  Stamina: 970";
        assert_eq!(view.to_string(), expected);
        assert_eq!(view.carry_weight(), 0);
    }
}
