//! Action representation.
//!
//! Strategies answer with an [`ActionRequest`], the loosely-typed shape a bot
//! hands back (`"next"`, `"previous"`, `("take", index, bid)`,
//! `("drop", index)`). The request becomes an [`Action`] at the player
//! boundary. Numeric arguments stay as raw [`Arg`]s until the resolver
//! validates them, because a bid that cannot be read as an integer is an
//! in-game death rather than a malformed answer.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

/// An argument as supplied by a strategy, coerced to an integer on use.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Arg {
    /// An integer.
    Int(i64),
    /// A float; truncated toward zero when coerced.
    Float(f64),
    /// Text holding a base-10 integer, surrounding whitespace allowed.
    Text(String),
}

impl Arg {
    /// Integer value of this argument, or `None` if it has none.
    ///
    /// ```
    /// use ruins::core::Arg;
    ///
    /// assert_eq!(Arg::from(" 12 ").coerce(), Some(12));
    /// assert_eq!(Arg::Float(7.9).coerce(), Some(7));
    /// assert_eq!(Arg::from("lots").coerce(), None);
    /// ```
    #[must_use]
    pub fn coerce(&self) -> Option<i64> {
        match self {
            Arg::Int(n) => Some(*n),
            Arg::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            Arg::Float(_) => None,
            Arg::Text(s) => s.trim().parse().ok(),
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n
                .as_i64()
                .map(Arg::Int)
                .or_else(|| n.as_f64().map(Arg::Float)),
            Value::String(s) => Some(Arg::Text(s.clone())),
            _ => None,
        }
    }
}

impl From<i64> for Arg {
    fn from(n: i64) -> Self {
        Arg::Int(n)
    }
}

impl From<u32> for Arg {
    fn from(n: u32) -> Self {
        Arg::Int(i64::from(n))
    }
}

impl From<usize> for Arg {
    fn from(n: usize) -> Self {
        Arg::Int(n as i64)
    }
}

impl From<&str> for Arg {
    fn from(s: &str) -> Self {
        Arg::Text(s.to_string())
    }
}

impl std::fmt::Display for Arg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Arg::Int(n) => write!(f, "{n}"),
            Arg::Float(x) => write!(f, "{x}"),
            Arg::Text(s) => write!(f, "{s:?}"),
        }
    }
}

/// The shape of an answer that could not be understood as an action.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ActionError {
    /// The kind tag is not one of next/previous/take/drop.
    #[error("unknown action kind {0:?}")]
    UnknownKind(String),
    /// The kind was recognised but got the wrong number of arguments.
    #[error("{kind} takes {expected} argument(s), got {found}")]
    WrongArity {
        kind: &'static str,
        expected: usize,
        found: usize,
    },
    /// An argument was neither a number nor text.
    #[error("argument {0} is neither a number nor text")]
    BadArgument(String),
    /// The value is not a string or a list at all.
    #[error("not an action: {0}")]
    NotAnAction(String),
}

/// An action as answered by a strategy.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum ActionRequest {
    /// Go one room deeper.
    Next,
    /// Go one room back toward the exit.
    Previous,
    /// Bid on a treasure in the current room.
    Take { index: Arg, bid: Arg },
    /// Put an inventory item down in the current room.
    Drop { index: Arg },
}

impl ActionRequest {
    /// Take the treasure at `index`, bidding `bid` stamina.
    pub fn take(index: impl Into<Arg>, bid: impl Into<Arg>) -> Self {
        ActionRequest::Take {
            index: index.into(),
            bid: bid.into(),
        }
    }

    /// Drop the inventory item at `index`.
    pub fn drop(index: impl Into<Arg>) -> Self {
        ActionRequest::Drop { index: index.into() }
    }

    /// Decode the JSON wire form used by out-of-process bots.
    ///
    /// Accepted shapes: `"next"`, `"previous"`, `["take", index, bid]` and
    /// `["drop", index]`. Anything else is an [`ActionError`].
    ///
    /// ```
    /// use ruins::core::ActionRequest;
    /// use serde_json::json;
    ///
    /// let take = ActionRequest::from_json(&json!(["take", 0, "12"])).unwrap();
    /// assert_eq!(take, ActionRequest::take(0i64, "12"));
    /// assert!(ActionRequest::from_json(&json!(["take", 0])).is_err());
    /// ```
    pub fn from_json(value: &Value) -> Result<Self, ActionError> {
        match value {
            Value::String(s) => match s.as_str() {
                "next" => Ok(ActionRequest::Next),
                "previous" => Ok(ActionRequest::Previous),
                other => Err(ActionError::UnknownKind(other.to_string())),
            },
            Value::Array(items) => {
                let (kind, args) = items
                    .split_first()
                    .ok_or_else(|| ActionError::NotAnAction(value.to_string()))?;
                let kind = kind
                    .as_str()
                    .ok_or_else(|| ActionError::NotAnAction(value.to_string()))?;
                let args = args
                    .iter()
                    .map(|a| Arg::from_json(a).ok_or_else(|| ActionError::BadArgument(a.to_string())))
                    .collect::<Result<Vec<_>, _>>()?;

                match (kind, args.as_slice()) {
                    ("take", [index, bid]) => Ok(ActionRequest::take(index.clone(), bid.clone())),
                    ("take", _) => Err(ActionError::WrongArity {
                        kind: "take",
                        expected: 2,
                        found: args.len(),
                    }),
                    ("drop", [index]) => Ok(ActionRequest::drop(index.clone())),
                    ("drop", _) => Err(ActionError::WrongArity {
                        kind: "drop",
                        expected: 1,
                        found: args.len(),
                    }),
                    (other, _) => Err(ActionError::UnknownKind(other.to_string())),
                }
            }
            other => Err(ActionError::NotAnAction(other.to_string())),
        }
    }
}

/// Direction of a move.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Direction {
    /// Deeper (+1).
    Next,
    /// Toward the exit (-1).
    Previous,
}

impl Direction {
    /// The room reached from `room` in this direction.
    ///
    /// `room` must be at least 1 (only players inside can move).
    #[must_use]
    pub fn apply(self, room: u32) -> u32 {
        match self {
            Direction::Next => room + 1,
            Direction::Previous => room - 1,
        }
    }
}

/// A validated-shape action awaiting resolution.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum Action {
    /// Move one room.
    Move(Direction),
    /// Bid on treasure `index` of the current room.
    Take { index: Arg, bid: Arg },
    /// Drop inventory item `index`.
    Drop { index: Arg },
}

impl From<ActionRequest> for Action {
    fn from(request: ActionRequest) -> Self {
        match request {
            ActionRequest::Next => Action::Move(Direction::Next),
            ActionRequest::Previous => Action::Move(Direction::Previous),
            ActionRequest::Take { index, bid } => Action::Take { index, bid },
            ActionRequest::Drop { index } => Action::Drop { index },
        }
    }
}

impl std::fmt::Display for Action {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Action::Move(Direction::Next) => write!(f, "Move(1)"),
            Action::Move(Direction::Previous) => write!(f, "Move(-1)"),
            Action::Take { index, bid } => write!(f, "Take(treasure={index}, bid={bid})"),
            Action::Drop { index } => write!(f, "Drop(treasure={index})"),
        }
    }
}
