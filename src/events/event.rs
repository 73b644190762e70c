//! Structured events emitted by games and tournaments.
//!
//! Every noteworthy thing a game or tournament does becomes an [`Event`].
//! Events carry plain data (names, numbers, treasures) so that sinks can
//! store them past the end of the game, and render the classic narrative
//! line through `Display`.

use serde::{Deserialize, Serialize};

use crate::core::{Action, PlayerId, Treasure};
use crate::rules::DeathCause;

/// Severity/kind of an event, used for filtering and log levels.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum EventClass {
    Tourney,
    Major,
    Minor,
    Good,
    Bad,
    Warning,
    Error,
    Info,
    Debug,
    Score,
    Pool,
    Final,
    Winner,
}

impl EventClass {
    /// Every class, in declaration order.
    pub const ALL: [EventClass; 13] = [
        EventClass::Tourney,
        EventClass::Major,
        EventClass::Minor,
        EventClass::Good,
        EventClass::Bad,
        EventClass::Warning,
        EventClass::Error,
        EventClass::Info,
        EventClass::Debug,
        EventClass::Score,
        EventClass::Pool,
        EventClass::Final,
        EventClass::Winner,
    ];
}

/// Who an event is about: registration slot plus display name.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Actor {
    pub id: PlayerId,
    /// `Name (Label)`.
    pub name: String,
}

impl std::fmt::Display for Actor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.name)
    }
}

/// Something that happened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Event {
    // === Game ===
    GameStarted { seed: u64 },
    Competitor { player: Actor },
    TurnBegan { turn: u32 },
    /// `action` is `None` when the strategy faulted.
    ActionChosen { turn: u32, player: Actor, action: Option<Action> },
    StrategyFault { turn: u32, player: Actor, fault: String },
    Moved { turn: u32, player: Actor, room: u32 },
    Escaped { turn: u32, player: Actor, stamina: u32, treasures: usize, value: u32 },
    Took { turn: u32, player: Actor, treasure: Treasure, contested: bool },
    Resisted { turn: u32, player: Actor, treasure: String },
    Dropped { turn: u32, player: Actor, room: u32, treasure: Treasure },
    Died { turn: u32, player: Actor, cause: DeathCause, message: String },
    Deposited { turn: u32, player: Actor, room: u32, treasures: Vec<Treasure> },
    GameEnded { turns: u32 },
    GameWon { player: Actor },
    /// One row of the end-of-game table; `money` is `None` for the dead.
    Scored { label: String, name: String, money: Option<u32>, score: u32 },

    // === Tournament ===
    PoolStarted { entrants: usize, game_size: usize },
    PoolRoundStarted { round: u32, rounds: u32 },
    GamesPlayed { label: String, games: u32, expected: u32 },
    PoolStanding { label: String, score: u32, mean: f64 },
    PaddedWithBaseline { seats: usize },
    FinalGameStarted { game: u32 },
    FinalGameLimitReached { games: u32 },
    InsufficientCompetitors,
    LeadAchieved { lead: u32 },
    TournamentConcluded,
    FinalStanding { label: String, score: u32, mean: f64 },
    TournamentWon { label: String },
}

impl Event {
    /// The class used for filtering and log levels.
    #[must_use]
    pub fn class(&self) -> EventClass {
        match self {
            Event::GameStarted { .. } | Event::GameEnded { .. } => EventClass::Major,
            Event::TurnBegan { .. } | Event::Escaped { .. } => EventClass::Minor,
            Event::ActionChosen { .. } | Event::Deposited { .. } => EventClass::Debug,
            Event::StrategyFault { .. } => EventClass::Error,
            Event::Died { .. } | Event::InsufficientCompetitors => EventClass::Bad,
            Event::GameWon { .. } => EventClass::Good,
            Event::Scored { .. } => EventClass::Score,
            Event::Competitor { .. }
            | Event::Moved { .. }
            | Event::Took { .. }
            | Event::Resisted { .. }
            | Event::Dropped { .. } => EventClass::Info,

            Event::GamesPlayed { games, expected, .. } => {
                if games == expected {
                    EventClass::Debug
                } else {
                    EventClass::Warning
                }
            }
            Event::PoolStanding { .. } => EventClass::Pool,
            Event::FinalStanding { .. } => EventClass::Final,
            Event::TournamentWon { .. } => EventClass::Winner,
            Event::PaddedWithBaseline { .. } | Event::FinalGameLimitReached { .. } => {
                EventClass::Warning
            }
            Event::PoolStarted { .. }
            | Event::PoolRoundStarted { .. }
            | Event::FinalGameStarted { .. }
            | Event::LeadAchieved { .. }
            | Event::TournamentConcluded => EventClass::Tourney,
        }
    }

    /// Turn the event happened in, for events raised while turns resolve.
    #[must_use]
    pub fn turn(&self) -> Option<u32> {
        match self {
            Event::TurnBegan { turn }
            | Event::ActionChosen { turn, .. }
            | Event::StrategyFault { turn, .. }
            | Event::Moved { turn, .. }
            | Event::Escaped { turn, .. }
            | Event::Took { turn, .. }
            | Event::Resisted { turn, .. }
            | Event::Dropped { turn, .. }
            | Event::Died { turn, .. }
            | Event::Deposited { turn, .. } => Some(*turn),
            _ => None,
        }
    }

    /// Whether this event belongs to the tournament layer rather than a game.
    #[must_use]
    pub fn is_tournament(&self) -> bool {
        matches!(
            self,
            Event::PoolStarted { .. }
                | Event::PoolRoundStarted { .. }
                | Event::GamesPlayed { .. }
                | Event::PoolStanding { .. }
                | Event::PaddedWithBaseline { .. }
                | Event::FinalGameStarted { .. }
                | Event::FinalGameLimitReached { .. }
                | Event::InsufficientCompetitors
                | Event::LeadAchieved { .. }
                | Event::TournamentConcluded
                | Event::FinalStanding { .. }
                | Event::TournamentWon { .. }
        )
    }
}

impl std::fmt::Display for Event {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Event::GameStarted { seed } => write!(f, "A new game begins! (seed {seed})"),
            Event::Competitor { player } => write!(f, "* {player}"),
            Event::TurnBegan { turn } => write!(f, "Turn {turn} begins!"),
            Event::ActionChosen { player, action, .. } => match action {
                Some(action) => write!(f, "{player} {action}"),
                None => write!(f, "{player} None"),
            },
            Event::StrategyFault { player, fault, .. } => write!(f, "{player} faulted: {fault}"),
            Event::Moved { player, room, .. } => write!(f, "{player} moved into room #{room}"),
            Event::Escaped { player, stamina, treasures, value, .. } => write!(
                f,
                "{player} exited the ruins with {stamina} stamina and {treasures} treasures, \
                 totaling ${value} in value."
            ),
            Event::Took { player, treasure, contested: false, .. } => {
                write!(f, "{player} took {treasure}")
            }
            Event::Took { player, treasure, contested: true, .. } => {
                write!(f, "{player} fought hard and took {treasure}")
            }
            Event::Resisted { player, treasure, .. } => write!(
                f,
                "{player} attempted to take {treasure}, but was met with resistance."
            ),
            Event::Dropped { player, room, treasure, .. } => {
                write!(f, "{player} Dropped a treasure into room #{room}: {treasure}")
            }
            Event::Died { player, message, .. } => write!(f, "{player} {message}"),
            Event::Deposited { player, room, treasures, .. } => {
                write!(f, "{} dropped these items into room {room}:", player.name)?;
                for treasure in treasures {
                    write!(f, " {treasure};")?;
                }
                Ok(())
            }
            Event::GameEnded { turns } => write!(f, "The game has ended! ({turns} turns)"),
            Event::GameWon { player } => write!(f, "{player} won the game"),
            Event::Scored { label, name, money, score } => match money {
                Some(money) => write!(f, "{label:<16} | {name:<28} | {:>6} | {score:>3}", format!("${money}")),
                None => write!(f, "{label:<16} | {name:<28} | {:>6} | {score:>3}", "DEAD"),
            },

            Event::PoolStarted { entrants, game_size } => write!(
                f,
                "Since there are more than {game_size} bots in the tournament ({entrants}), \
                 a pool will be run to determine which bots will compete in the final series."
            ),
            Event::PoolRoundStarted { round, rounds } => {
                write!(f, "Starting round {round} of {rounds} of the pool")
            }
            Event::GamesPlayed { label, games, .. } => write!(f, "{label} played {games} games."),
            Event::PoolStanding { label, score, mean } | Event::FinalStanding { label, score, mean } => {
                write!(f, "{label:<16} | {score:>6} | {mean:>8.3}")
            }
            Event::PaddedWithBaseline { seats } => write!(
                f,
                "Since there aren't enough bots, {seats} remaining slots will be filled in with Drunkards"
            ),
            Event::FinalGameStarted { game } => write!(f, "Starting game {game} of the final round."),
            Event::FinalGameLimitReached { games } => {
                write!(f, "Maximum number of finalist games run! ({games})")
            }
            Event::InsufficientCompetitors => {
                write!(f, "There aren't enough competitors. Exiting.")
            }
            Event::LeadAchieved { lead } => write!(
                f,
                "The first place bot has achieved a {lead} point lead over the second place bot!"
            ),
            Event::TournamentConcluded => write!(f, "The tournament has completed successfully!"),
            Event::TournamentWon { label } => write!(f, "The winner of the tournament is {label}!"),
        }
    }
}
