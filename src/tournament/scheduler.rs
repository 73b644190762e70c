//! Tournament scheduling: pool stage, padding and the final series.
//!
//! With more entrants than seats per game, a pool stage of `pool_games`
//! shuffled rounds ranks everybody and the top `game_size` advance. The
//! finalists then play together, game after game, until one leads the
//! runner-up by `required_lead` points or `max_final_games` is reached.
//!
//! Every shuffle and game seed is drawn from one root stream, so a seed and a
//! roster order reproduce the whole tournament.

use serde::{Deserialize, Serialize};

use super::config::TournamentConfig;
use super::pool::PoolBatcher;
use crate::core::GameRng;
use crate::error::ConfigError;
use crate::events::{Event, EventSink};
use crate::runner::GameRunner;
use crate::strategy::{builtin, Entrant};

/// A seat in a game: a roster slot, or the baseline filler.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Seat {
    Entrant(usize),
    Baseline,
}

/// Accumulated score of one entrant.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BotScore {
    /// Roster slot.
    pub entrant: usize,
    pub label: String,
    pub score: u32,
    /// Score per game played in the stage.
    pub mean: f64,
}

/// Results of the pool stage.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PoolReport {
    /// Games played, by roster slot.
    pub games_played: Vec<u32>,
    /// Best first.
    pub standings: Vec<BotScore>,
    /// Roster slots that advanced, best first.
    pub finalists: Vec<usize>,
}

/// How the final series ended.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum TournamentOutcome {
    /// The leader pulled `lead` points clear.
    Decided { winner: usize, lead: u32 },
    /// The game cap was hit first; `leader` was ahead by `lead`.
    Inconclusive { leader: usize, lead: u32 },
    /// Fewer than two scoring finalists.
    Aborted,
}

/// Everything a tournament produced.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct TournamentReport {
    pub pool: Option<PoolReport>,
    /// Final series standings of the scoring finalists, best first.
    pub finals: Vec<BotScore>,
    pub final_games: u32,
    pub outcome: TournamentOutcome,
}

impl TournamentReport {
    /// Roster slot of the winner, or of the leader when inconclusive.
    #[must_use]
    pub fn top(&self) -> Option<usize> {
        match self.outcome {
            TournamentOutcome::Decided { winner, .. } => Some(winner),
            TournamentOutcome::Inconclusive { leader, .. } => Some(leader),
            TournamentOutcome::Aborted => None,
        }
    }

    /// Label of [`top`](Self::top).
    #[must_use]
    pub fn top_label(&self) -> Option<&str> {
        let top = self.top()?;
        self.finals
            .iter()
            .find(|s| s.entrant == top)
            .map(|s| s.label.as_str())
    }
}

/// Runs a full tournament over a roster of entrants.
#[derive(Debug)]
pub struct Tournament {
    entrants: Vec<Entrant>,
    config: TournamentConfig,
    baseline: Entrant,
}

impl Tournament {
    pub fn new(entrants: Vec<Entrant>, config: TournamentConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        if entrants.is_empty() {
            return Err(ConfigError::EmptyRoster);
        }
        Ok(Self {
            entrants,
            config,
            baseline: builtin::drunkard(),
        })
    }

    /// Fill empty seats with `baseline` instead of the drunkard.
    #[must_use]
    pub fn with_baseline(mut self, baseline: Entrant) -> Self {
        self.baseline = baseline.as_baseline();
        self
    }

    #[must_use]
    pub fn config(&self) -> &TournamentConfig {
        &self.config
    }

    #[must_use]
    pub fn entrants(&self) -> &[Entrant] {
        &self.entrants
    }

    /// Run the pool stage if needed, then the final series.
    pub fn run(&self, sink: &mut dyn EventSink) -> Result<TournamentReport, ConfigError> {
        let mut rng = GameRng::new(self.config.seed);
        let game_size = self.config.game_size;
        let count = self.entrants.len();

        let (pool, seats) = if count > game_size {
            let report = self.run_pool(&mut rng, sink)?;
            let seats = report.finalists.iter().map(|&i| Seat::Entrant(i)).collect();
            (Some(report), seats)
        } else {
            let mut seats: Vec<Seat> = (0..count).map(Seat::Entrant).collect();
            if count < game_size {
                sink.emit(&Event::PaddedWithBaseline {
                    seats: game_size - count,
                });
                seats.resize(game_size, Seat::Baseline);
            }
            (None, seats)
        };

        let scoring: Vec<usize> = seats
            .iter()
            .filter_map(|seat| match seat {
                Seat::Entrant(i) if !self.entrants[*i].is_baseline() => Some(*i),
                _ => None,
            })
            .collect();
        let mut scores = vec![0u32; count];
        let mut games = 0u32;

        let outcome = loop {
            if scoring.len() < 2 {
                sink.emit(&Event::InsufficientCompetitors);
                break TournamentOutcome::Aborted;
            }

            games += 1;
            sink.emit(&Event::FinalGameStarted { game: games });
            self.play(&seats, &mut rng, &mut scores, sink)?;

            let ranked = self.standings(&scoring, &scores, games);
            let lead = ranked[0].score - ranked[1].score;
            if games >= self.config.max_final_games {
                sink.emit(&Event::FinalGameLimitReached { games });
                break TournamentOutcome::Inconclusive {
                    leader: ranked[0].entrant,
                    lead,
                };
            }
            if lead >= self.config.required_lead {
                sink.emit(&Event::LeadAchieved { lead });
                break TournamentOutcome::Decided {
                    winner: ranked[0].entrant,
                    lead,
                };
            }
        };

        let finals = self.standings(&scoring, &scores, games);
        if outcome != TournamentOutcome::Aborted {
            sink.emit(&Event::TournamentConcluded);
            for standing in &finals {
                sink.emit(&Event::FinalStanding {
                    label: standing.label.clone(),
                    score: standing.score,
                    mean: standing.mean,
                });
            }
            sink.emit(&Event::TournamentWon {
                label: finals[0].label.clone(),
            });
        }
        tracing::info!(target: "ruins::tournament", final_games = games, ?outcome, "tournament finished");

        Ok(TournamentReport {
            pool,
            finals,
            final_games: games,
            outcome,
        })
    }

    fn run_pool(&self, rng: &mut GameRng, sink: &mut dyn EventSink) -> Result<PoolReport, ConfigError> {
        let count = self.entrants.len();
        let rounds = self.config.pool_games;
        sink.emit(&Event::PoolStarted {
            entrants: count,
            game_size: self.config.game_size,
        });

        let mut order: Vec<usize> = (0..count).collect();
        let mut batcher = PoolBatcher::new(self.config.game_size);
        let mut games_played = vec![0u32; count];
        let mut scores = vec![0u32; count];

        for round in 0..rounds {
            sink.emit(&Event::PoolRoundStarted {
                round: round + 1,
                rounds,
            });
            rng.shuffle(&mut order);
            for game in batcher.round(&order) {
                for &i in &game {
                    games_played[i] += 1;
                }
                let seats: Vec<Seat> = game.into_iter().map(Seat::Entrant).collect();
                self.play(&seats, rng, &mut scores, sink)?;
            }
        }

        for (entrant, &games) in self.entrants.iter().zip(&games_played) {
            sink.emit(&Event::GamesPlayed {
                label: entrant.label().to_string(),
                games,
                expected: rounds,
            });
        }

        let everyone: Vec<usize> = (0..count).collect();
        let standings = self.standings(&everyone, &scores, rounds);
        for standing in &standings {
            sink.emit(&Event::PoolStanding {
                label: standing.label.clone(),
                score: standing.score,
                mean: standing.mean,
            });
        }
        let finalists = standings
            .iter()
            .take(self.config.game_size)
            .map(|s| s.entrant)
            .collect();

        Ok(PoolReport {
            games_played,
            standings,
            finalists,
        })
    }

    /// Play one game and credit the non-baseline seats.
    fn play(
        &self,
        seats: &[Seat],
        rng: &mut GameRng,
        scores: &mut [u32],
        sink: &mut dyn EventSink,
    ) -> Result<(), ConfigError> {
        let entrants: Vec<Entrant> = seats
            .iter()
            .map(|seat| match seat {
                Seat::Entrant(i) => self.entrants[*i].clone(),
                Seat::Baseline => self.baseline.clone(),
            })
            .collect();
        let seed = rng.next_u64();
        let outcome = GameRunner::new(self.config.game.clone(), &entrants, seed)?.run(sink);

        for standing in &outcome.standings {
            if let Seat::Entrant(i) = seats[standing.entrant] {
                if !self.entrants[i].is_baseline() {
                    scores[i] += standing.score;
                }
            }
        }
        Ok(())
    }

    /// `members` ranked by score, stable on the given order.
    fn standings(&self, members: &[usize], scores: &[u32], games: u32) -> Vec<BotScore> {
        let mut ranked: Vec<BotScore> = members
            .iter()
            .map(|&i| BotScore {
                entrant: i,
                label: self.entrants[i].label().to_string(),
                score: scores[i],
                mean: if games == 0 {
                    0.0
                } else {
                    f64::from(scores[i]) / f64::from(games)
                },
            })
            .collect();
        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::NullSink;

    #[test]
    fn test_rejects_empty_roster() {
        let err = Tournament::new(vec![], TournamentConfig::default()).unwrap_err();
        assert_eq!(err, ConfigError::EmptyRoster);
    }

    #[test]
    fn test_single_entrant_aborts() {
        let tournament = Tournament::new(vec![builtin::chad()], TournamentConfig::default()).unwrap();
        let report = tournament.run(&mut NullSink).unwrap();
        assert_eq!(report.outcome, TournamentOutcome::Aborted);
        assert_eq!(report.final_games, 0);
        assert_eq!(report.top(), None);
    }

    #[test]
    fn test_cap_is_inconclusive() {
        let config = TournamentConfig::default()
            .with_game_size(2)
            .with_max_final_games(3)
            .with_required_lead(1_000);
        let tournament = Tournament::new(vec![builtin::eager_thief(), builtin::coward()], config).unwrap();
        let report = tournament.run(&mut NullSink).unwrap();
        assert_eq!(report.final_games, 3);
        assert!(matches!(report.outcome, TournamentOutcome::Inconclusive { .. }));
        assert!(report.pool.is_none());
    }
}
