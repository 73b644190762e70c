//! The strategy plug-in interface.
//!
//! A strategy is anything that can look at a [`RoomState`] and answer with an
//! [`ActionRequest`]. Strategies are untrusted: whatever goes wrong inside one
//! (an error, a panic, a missing or malformed answer, a slow answer) is turned
//! into a [`Fault`] at the player boundary and never escapes into the
//! resolver.

use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;

use crate::core::{Action, ActionError, ActionRequest, GameRng, RoomState};

/// Decision-maker controlling one adventurer.
pub trait Strategy {
    /// Choose this turn's action from the player's view.
    ///
    /// `Ok(None)` and `Err(_)` both forfeit the turn, which is fatal.
    fn decide(&mut self, view: &RoomState) -> anyhow::Result<Option<ActionRequest>>;

    /// Called once before the first turn. Failing here is fatal.
    fn on_enter(&mut self) -> anyhow::Result<()> {
        Ok(())
    }
}

/// Why a strategy produced no usable action.
#[derive(Clone, Debug, PartialEq, Error)]
pub enum Fault {
    /// The strategy returned an error.
    #[error("strategy raised: {0}")]
    Raised(String),
    /// The strategy panicked.
    #[error("strategy panicked: {0}")]
    Panicked(String),
    /// The strategy answered with nothing.
    #[error("strategy returned no action")]
    NoAction,
    /// The answer could not be read as an action.
    #[error("malformed action: {0}")]
    Malformed(#[from] ActionError),
    /// The answer came too late.
    #[error("decision took {elapsed:?}, limit is {limit:?}")]
    TimedOut { elapsed: Duration, limit: Duration },
}

/// Outcome of asking a strategy for an action.
#[derive(Clone, Debug, PartialEq)]
pub enum Decision {
    /// A well-shaped action, still to be validated by the rules.
    Act(Action),
    /// No usable action; the player forfeits with a fatal move.
    Fault(Fault),
}

impl Decision {
    /// The action, if there is one.
    #[must_use]
    pub fn action(&self) -> Option<&Action> {
        match self {
            Decision::Act(action) => Some(action),
            Decision::Fault(_) => None,
        }
    }
}

impl From<Action> for Decision {
    fn from(action: Action) -> Self {
        Decision::Act(action)
    }
}

/// Builds a fresh strategy for one game from a character name and a private stream.
pub type StrategyFactory = dyn Fn(&str, GameRng) -> Box<dyn Strategy> + Send + Sync;

/// A bot kind taking part in games and tournaments.
///
/// Entrants are cheap to clone; every game instantiates its own strategy.
#[derive(Clone)]
pub struct Entrant {
    label: String,
    factory: Arc<StrategyFactory>,
    baseline: bool,
}

impl Entrant {
    /// Register a bot kind under `label`.
    pub fn new(
        label: impl Into<String>,
        factory: impl Fn(&str, GameRng) -> Box<dyn Strategy> + Send + Sync + 'static,
    ) -> Self {
        Self {
            label: label.into(),
            factory: Arc::new(factory),
            baseline: false,
        }
    }

    /// Mark this entrant as a seat filler whose scores are never counted.
    #[must_use]
    pub fn as_baseline(mut self) -> Self {
        self.baseline = true;
        self
    }

    /// Bot kind label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Whether this entrant only fills seats.
    #[must_use]
    pub fn is_baseline(&self) -> bool {
        self.baseline
    }

    /// Build the strategy for one character.
    #[must_use]
    pub fn instantiate(&self, name: &str, rng: GameRng) -> Box<dyn Strategy> {
        (self.factory)(name, rng)
    }
}

impl std::fmt::Debug for Entrant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Entrant")
            .field("label", &self.label)
            .field("baseline", &self.baseline)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Direction;

    struct Forward;

    impl Strategy for Forward {
        fn decide(&mut self, _view: &RoomState) -> anyhow::Result<Option<ActionRequest>> {
            Ok(Some(ActionRequest::Next))
        }
    }

    #[test]
    fn test_entrant_instantiates() {
        let entrant = Entrant::new("Forward", |_, _| Box::new(Forward));
        assert_eq!(entrant.label(), "Forward");
        assert!(!entrant.is_baseline());
        assert!(entrant.clone().as_baseline().is_baseline());

        let mut strategy = entrant.instantiate("Jon Snow", GameRng::new(1));
        let view = RoomState {
            room: 1,
            treasures: Default::default(),
            players: vec![],
            inventory: Default::default(),
            stamina: 10,
        };
        assert_eq!(strategy.decide(&view).unwrap(), Some(ActionRequest::Next));
        assert!(strategy.on_enter().is_ok());
    }

    #[test]
    fn test_decision_action() {
        let act = Decision::from(Action::Move(Direction::Next));
        assert_eq!(act.action(), Some(&Action::Move(Direction::Next)));
        assert_eq!(Decision::Fault(Fault::NoAction).action(), None);
    }

    #[test]
    fn test_fault_messages() {
        assert_eq!(Fault::NoAction.to_string(), "strategy returned no action");
        let fault = Fault::from(ActionError::UnknownKind("jump".into()));
        assert_eq!(fault.to_string(), "malformed action: unknown action kind \"jump\"");
    }
}
