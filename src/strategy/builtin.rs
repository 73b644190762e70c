//! Built-in adventurers.
//!
//! [`Drunkard`] is the baseline random walker used to fill empty tournament
//! seats. The others are small fixed-behaviour bots useful as sparring
//! partners and in tests. [`Scripted`] plays back a fixed list of answers.

use anyhow::anyhow;
use serde_json::Value;
use std::collections::VecDeque;

use super::traits::{Entrant, Strategy};
use crate::core::{ActionRequest, GameConfig, GameRng, RoomState};

fn standard_move_cost(view: &RoomState) -> u32 {
    GameConfig::default().move_cost(view.carry_weight())
}

/// Heads home once the remaining stamina only covers the walk back (plus one room).
fn should_turn_back(view: &RoomState) -> bool {
    view.stamina / standard_move_cost(view) <= view.room + 1
}

/// Wanders at random and grabs whatever it stumbles over.
pub struct Drunkard {
    rng: GameRng,
}

impl Drunkard {
    /// Create a drunkard with its private stream.
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Strategy for Drunkard {
    fn decide(&mut self, view: &RoomState) -> anyhow::Result<Option<ActionRequest>> {
        if should_turn_back(view) {
            return Ok(Some(ActionRequest::Previous));
        }

        let mut options = vec![ActionRequest::Next];
        if view.room > 1 {
            options.push(ActionRequest::Previous);
        }
        let take_weight = if view.treasures.is_empty() { 0 } else { 5 };
        let roll = self.rng.gen_range_usize(0..options.len() + take_weight);
        if roll < options.len() {
            return Ok(Some(options.swap_remove(roll)));
        }

        let which = self.rng.gen_range_usize(0..view.treasures.len());
        let treasure = &view.treasures[which];
        if treasure.weight + view.carry_weight() > GameConfig::default().carry_capacity {
            if view.inventory.is_empty() {
                return Ok(Some(ActionRequest::Next));
            }
            let slot = self.rng.gen_range_usize(0..view.inventory.len());
            return Ok(Some(ActionRequest::drop(slot)));
        }

        let raise = if view.players.is_empty() {
            0
        } else {
            self.rng.gen_range_usize(0..5) as u32
        };
        Ok(Some(ActionRequest::take(which, treasure.weight + raise)))
    }
}

/// Takes the first treasure it can carry, outbidding the crowd a little.
pub struct EagerThief {
    rng: GameRng,
}

impl EagerThief {
    #[must_use]
    pub fn new(rng: GameRng) -> Self {
        Self { rng }
    }
}

impl Strategy for EagerThief {
    fn decide(&mut self, view: &RoomState) -> anyhow::Result<Option<ActionRequest>> {
        if should_turn_back(view) {
            return Ok(Some(ActionRequest::Previous));
        }
        match view.treasures.front() {
            Some(first) if view.carry_weight() + first.weight < 50 => {
                let raise = self.rng.gen_range_usize(0..view.players.len() * 2 + 1) as u32;
                Ok(Some(ActionRequest::take(0usize, first.weight + raise)))
            }
            _ => Ok(Some(ActionRequest::Next)),
        }
    }
}

/// Always goes deeper.
pub struct Chad;

impl Strategy for Chad {
    fn decide(&mut self, _view: &RoomState) -> anyhow::Result<Option<ActionRequest>> {
        Ok(Some(ActionRequest::Next))
    }
}

/// Always heads for the exit.
pub struct Coward;

impl Strategy for Coward {
    fn decide(&mut self, _view: &RoomState) -> anyhow::Result<Option<ActionRequest>> {
        Ok(Some(ActionRequest::Previous))
    }
}

/// Bids weight + 5 on the first treasure in sight, never looks back.
pub struct GreedyBastard;

impl Strategy for GreedyBastard {
    fn decide(&mut self, view: &RoomState) -> anyhow::Result<Option<ActionRequest>> {
        Ok(Some(match view.treasures.front() {
            Some(first) => ActionRequest::take(0usize, first.weight + 5),
            None => ActionRequest::Next,
        }))
    }
}

/// Keeps trying to drop the first inventory slot.
pub struct EmoKid;

impl Strategy for EmoKid {
    fn decide(&mut self, _view: &RoomState) -> anyhow::Result<Option<ActionRequest>> {
        Ok(Some(ActionRequest::drop(0usize)))
    }
}

/// Answers with text where numbers belong.
pub struct MischievousKid;

impl Strategy for MischievousKid {
    fn decide(&mut self, _view: &RoomState) -> anyhow::Result<Option<ActionRequest>> {
        Ok(Some(ActionRequest::take("5", "1")))
    }
}

/// Plays back a fixed list of JSON answers, one per turn.
///
/// `null` answers nothing; anything else goes through
/// [`ActionRequest::from_json`]. Once the script runs out the fallback is
/// used, or nothing if there is none.
#[derive(Clone, Debug, Default)]
pub struct Scripted {
    steps: VecDeque<Value>,
    fallback: Option<ActionRequest>,
    fail_on_enter: bool,
}

impl Scripted {
    /// Script of raw JSON answers.
    #[must_use]
    pub fn new(steps: impl IntoIterator<Item = Value>) -> Self {
        Self {
            steps: steps.into_iter().collect(),
            fallback: None,
            fail_on_enter: false,
        }
    }

    /// Script of typed answers.
    #[must_use]
    pub fn requests(steps: impl IntoIterator<Item = ActionRequest>) -> Self {
        Self::new(steps.into_iter().map(|r| request_to_json(&r)))
    }

    /// Answer to repeat once the script is exhausted.
    #[must_use]
    pub fn then(mut self, fallback: ActionRequest) -> Self {
        self.fallback = Some(fallback);
        self
    }

    /// Refuse to enter the ruins.
    #[must_use]
    pub fn failing_on_enter(mut self) -> Self {
        self.fail_on_enter = true;
        self
    }

    /// Wrap this script as an entrant; each game replays it from the start.
    #[must_use]
    pub fn entrant(self, label: impl Into<String>) -> Entrant {
        Entrant::new(label, move |_, _| Box::new(self.clone()))
    }
}

impl Strategy for Scripted {
    fn decide(&mut self, _view: &RoomState) -> anyhow::Result<Option<ActionRequest>> {
        match self.steps.pop_front() {
            Some(Value::Null) => Ok(None),
            Some(step) => Ok(Some(ActionRequest::from_json(&step)?)),
            None => Ok(self.fallback.clone()),
        }
    }

    fn on_enter(&mut self) -> anyhow::Result<()> {
        if self.fail_on_enter {
            Err(anyhow!("refused to enter"))
        } else {
            Ok(())
        }
    }
}

fn request_to_json(request: &ActionRequest) -> Value {
    let arg = |a: &crate::core::Arg| serde_json::to_value(a).unwrap_or(Value::Null);
    match request {
        ActionRequest::Next => Value::from("next"),
        ActionRequest::Previous => Value::from("previous"),
        ActionRequest::Take { index, bid } => Value::Array(vec!["take".into(), arg(index), arg(bid)]),
        ActionRequest::Drop { index } => Value::Array(vec!["drop".into(), arg(index)]),
    }
}

/// The baseline random walker, flagged so its scores are never counted.
#[must_use]
pub fn drunkard() -> Entrant {
    Entrant::new("Drunkard", |_, rng| Box::new(Drunkard::new(rng))).as_baseline()
}

#[must_use]
pub fn eager_thief() -> Entrant {
    Entrant::new("EagerThief", |_, rng| Box::new(EagerThief::new(rng)))
}

#[must_use]
pub fn chad() -> Entrant {
    Entrant::new("Chad", |_, _| Box::new(Chad))
}

#[must_use]
pub fn coward() -> Entrant {
    Entrant::new("Coward", |_, _| Box::new(Coward))
}

#[must_use]
pub fn greedy_bastard() -> Entrant {
    Entrant::new("GreedyBastard", |_, _| Box::new(GreedyBastard))
}

#[must_use]
pub fn emo_kid() -> Entrant {
    Entrant::new("EmoKid", |_, _| Box::new(EmoKid))
}

#[must_use]
pub fn mischievous_kid() -> Entrant {
    Entrant::new("MischievousKid", |_, _| Box::new(MischievousKid))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::Treasure;
    use im::Vector;
    use serde_json::json;

    fn view(room: u32, stamina: u32, treasures: Vec<Treasure>) -> RoomState {
        RoomState {
            room,
            treasures: Vector::from(treasures),
            players: vec![],
            inventory: Vector::new(),
            stamina,
        }
    }

    #[test]
    fn test_drunkard_turns_back_when_tired() {
        let mut bot = Drunkard::new(GameRng::new(1));
        // 30 stamina at cost 10 covers 3 moves; room 2 needs to leave now.
        let answer = bot.decide(&view(2, 30, vec![])).unwrap();
        assert_eq!(answer, Some(ActionRequest::Previous));
    }

    #[test]
    fn test_drunkard_bids_at_least_weight() {
        let mut bot = Drunkard::new(GameRng::new(4));
        let treasures = vec![Treasure::new("Treasure #001", 10, 3), Treasure::new("Treasure #002", 5, 8)];
        for _ in 0..100 {
            match bot.decide(&view(1, 1000, treasures.clone())).unwrap() {
                Some(ActionRequest::Take { index, bid }) => {
                    let index = index.coerce().unwrap() as usize;
                    assert_eq!(bid.coerce().unwrap(), i64::from(treasures[index].weight));
                }
                Some(ActionRequest::Next) => {}
                other => panic!("unexpected answer {other:?}"),
            }
        }
    }

    #[test]
    fn test_eager_thief_takes_first() {
        let mut bot = EagerThief::new(GameRng::new(2));
        let answer = bot
            .decide(&view(1, 1000, vec![Treasure::new("Treasure #001", 10, 3)]))
            .unwrap();
        assert_eq!(answer, Some(ActionRequest::take(0usize, 3u32)));
    }

    #[test]
    fn test_simple_bots() {
        let empty = view(1, 1000, vec![]);
        assert_eq!(Chad.decide(&empty).unwrap(), Some(ActionRequest::Next));
        assert_eq!(Coward.decide(&empty).unwrap(), Some(ActionRequest::Previous));
        assert_eq!(GreedyBastard.decide(&empty).unwrap(), Some(ActionRequest::Next));
        assert_eq!(EmoKid.decide(&empty).unwrap(), Some(ActionRequest::drop(0usize)));
        assert_eq!(MischievousKid.decide(&empty).unwrap(), Some(ActionRequest::take("5", "1")));
    }

    #[test]
    fn test_scripted_plays_back() {
        let mut bot = Scripted::new(vec![json!("next"), Value::Null, json!(["drop", "x"]), json!("fly")])
            .then(ActionRequest::Previous);
        let v = view(1, 100, vec![]);

        assert_eq!(bot.decide(&v).unwrap(), Some(ActionRequest::Next));
        assert_eq!(bot.decide(&v).unwrap(), None);
        assert_eq!(bot.decide(&v).unwrap(), Some(ActionRequest::drop("x")));
        assert!(bot.decide(&v).is_err());
        assert_eq!(bot.decide(&v).unwrap(), Some(ActionRequest::Previous));
    }

    #[test]
    fn test_scripted_requests_roundtrip() {
        let mut bot = Scripted::requests(vec![ActionRequest::take(1usize, 7u32), ActionRequest::Previous]);
        let v = view(1, 100, vec![]);
        assert_eq!(bot.decide(&v).unwrap(), Some(ActionRequest::take(1usize, 7u32)));
        assert_eq!(bot.decide(&v).unwrap(), Some(ActionRequest::Previous));
        assert_eq!(bot.decide(&v).unwrap(), None);
    }

    #[test]
    fn test_baseline_flag() {
        assert!(drunkard().is_baseline());
        assert!(!chad().is_baseline());
    }
}
