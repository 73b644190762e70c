//! Driving a single game to completion.

use super::ranking::{rank, GameOutcome};
use super::replay::Replay;
use crate::core::{GameConfig, GameState};
use crate::error::{ConfigError, ReplayError};
use crate::events::{Actor, Event, EventSink};
use crate::rules::{Death, DeathCause, TurnResolver, TurnSummary};
use crate::strategy::Entrant;

/// Runs one game from entry to final ranking.
///
/// ```
/// use ruins::core::GameConfig;
/// use ruins::events::NullSink;
/// use ruins::runner::GameRunner;
/// use ruins::strategy::builtin;
///
/// let roster = vec![builtin::coward(), builtin::eager_thief()];
/// let runner = GameRunner::new(GameConfig::default(), &roster, 42).unwrap();
/// let outcome = runner.run(&mut NullSink);
/// assert_eq!(outcome.standings.len(), 2);
/// ```
#[derive(Debug)]
pub struct GameRunner {
    state: GameState,
    seed: u64,
    roster: Vec<String>,
    entered: bool,
}

impl GameRunner {
    /// Set up a game with one player per entrant.
    pub fn new(config: GameConfig, entrants: &[Entrant], seed: u64) -> Result<Self, ConfigError> {
        Ok(Self {
            state: GameState::new(config, entrants, seed)?,
            seed,
            roster: entrants.iter().map(|e| e.label().to_string()).collect(),
            entered: false,
        })
    }

    /// Rebuild a recorded game, looking entrants up in `registry` by label.
    pub fn from_replay(replay: &Replay, registry: &[Entrant]) -> Result<Self, ReplayError> {
        let entrants = replay.entrants(registry)?;
        Ok(Self::new(replay.config.clone(), &entrants, replay.seed)?)
    }

    /// Record of this game's setup.
    #[must_use]
    pub fn replay(&self) -> Replay {
        Replay {
            roster: self.roster.clone(),
            seed: self.seed,
            config: self.state.config().clone(),
        }
    }

    #[must_use]
    pub fn seed(&self) -> u64 {
        self.seed
    }

    #[must_use]
    pub fn state(&self) -> &GameState {
        &self.state
    }

    /// Announce the competitors and let every strategy prepare.
    ///
    /// A strategy that fails here is dead before the first turn. Calling
    /// this more than once has no further effect.
    pub fn enter(&mut self, sink: &mut dyn EventSink) {
        if self.entered {
            return;
        }
        self.entered = true;

        sink.emit(&Event::GameStarted { seed: self.seed });
        let ids: Vec<_> = self.state.players().player_ids().collect();
        for id in ids {
            let player = self.state.player_mut(id);
            let actor = Actor {
                id,
                name: player.to_string(),
            };
            sink.emit(&Event::Competitor { player: actor.clone() });

            if let Err(fault) = player.enter() {
                sink.emit(&Event::StrategyFault {
                    turn: 0,
                    player: actor,
                    fault: fault.to_string(),
                });
                let death = Death::new(id, DeathCause::InvalidAction, "is dead on arrival.");
                TurnResolver::kill(&mut self.state, &death, sink);
            }
        }
    }

    /// Resolve one turn, entering first if needed. `None` once nobody is left to act.
    pub fn step(&mut self, sink: &mut dyn EventSink) -> Option<TurnSummary> {
        self.enter(sink);
        if !self.state.any_active() {
            return None;
        }
        Some(TurnResolver::resolve(&mut self.state, sink))
    }

    /// Play until no one can act, then rank and score.
    pub fn run(mut self, sink: &mut dyn EventSink) -> GameOutcome {
        while self.step(sink).is_some() {}
        self.finish(sink)
    }

    fn finish(&self, sink: &mut dyn EventSink) -> GameOutcome {
        let turns = self.state.turn_number;
        sink.emit(&Event::GameEnded { turns });

        let standings = rank(&self.state);
        if let Some(top) = standings.first() {
            sink.emit(&Event::GameWon {
                player: Actor {
                    id: top.player,
                    name: self.state.player(top.player).to_string(),
                },
            });
        }
        for standing in &standings {
            sink.emit(&Event::Scored {
                label: standing.label.clone(),
                name: standing.name.clone(),
                money: standing.alive.then_some(standing.money),
                score: standing.score,
            });
        }

        tracing::debug!(target: "ruins::game", seed = self.seed, turns, "game finished");
        GameOutcome {
            seed: self.seed,
            turns,
            standings,
        }
    }
}
