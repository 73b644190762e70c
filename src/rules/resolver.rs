//! Turn resolution.
//!
//! A turn runs in four phases:
//!
//! 1. **Collect**: every active player answers against the frozen state, in
//!    registration order. Nothing in the game changes until all have answered.
//! 2. **Validate**: each answer is checked and its provisional effect applied
//!    (moves happen, bids are escrowed, drops leave the inventory). Rule
//!    violations queue a death.
//! 3. **Bids**: each contested treasure goes to a strictly highest bidder, or
//!    to nobody on a tie at the top. Escrow is never refunded.
//! 4. **Commit**: queued drops land in their rooms, taken treasures leave
//!    theirs, and queued deaths deposit the victims' inventories.
//!
//! Treasure is conserved: apart from freshly generated rooms, the number of
//! treasures across rooms and inventories never changes.

use smallvec::SmallVec;
use std::collections::{BTreeMap, BTreeSet};

use super::death::{Death, DeathCause};
use crate::core::{Action, Arg, GameState, PlayerId, Treasure};
use crate::events::{Actor, Event, EventSink};
use crate::strategy::Decision;

/// An escrowed bid on one treasure slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Bid {
    pub amount: u32,
    pub player: PlayerId,
}

/// How a treasure slot's bids were settled.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContestResult {
    pub winner: Option<PlayerId>,
    /// Bidders who lost, highest bid first.
    pub resisted: Vec<PlayerId>,
}

/// What happened in one resolved turn.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TurnSummary {
    pub turn: u32,
    /// Deaths in the order they were carried out.
    pub deaths: Vec<Death>,
    pub escaped: Vec<PlayerId>,
    /// Treasures that changed hands through bidding.
    pub taken: usize,
}

/// Resolves simultaneous turns on a [`GameState`].
pub struct TurnResolver;

impl TurnResolver {
    /// Play one full turn: collect, validate, settle bids, commit.
    pub fn resolve(state: &mut GameState, sink: &mut dyn EventSink) -> TurnSummary {
        state.turn_number += 1;
        sink.emit(&Event::TurnBegan { turn: state.turn_number });
        let decisions = Self::collect(state);
        Self::apply(state, decisions, sink)
    }

    /// Ask every active player for an action against the current state.
    pub fn collect(state: &mut GameState) -> Vec<(PlayerId, Decision)> {
        let limit = state.config().decision_timeout;
        state
            .active_players()
            .into_iter()
            .map(|id| {
                let view = state.snapshot(id);
                (id, state.player_mut(id).decide(&view, limit))
            })
            .collect()
    }

    /// Validate and resolve already-collected decisions.
    pub fn apply(
        state: &mut GameState,
        decisions: Vec<(PlayerId, Decision)>,
        sink: &mut dyn EventSink,
    ) -> TurnSummary {
        let turn = state.turn_number;
        let count_before = state.treasure_count();
        let generated_before = state.treasures_generated();

        let mut deaths: Vec<Death> = Vec::new();
        let mut escaped = Vec::new();
        let mut bids: BTreeMap<(u32, usize), SmallVec<[Bid; 4]>> = BTreeMap::new();
        let mut drops: BTreeMap<u32, Vec<Treasure>> = BTreeMap::new();
        let acted: Vec<PlayerId> = decisions.iter().map(|(id, _)| *id).collect();

        for (id, decision) in decisions {
            let actor = actor(state, id);
            sink.emit(&Event::ActionChosen {
                turn,
                player: actor.clone(),
                action: decision.action().cloned(),
            });

            let action = match decision {
                Decision::Act(action) => action,
                Decision::Fault(fault) => {
                    sink.emit(&Event::StrategyFault {
                        turn,
                        player: actor,
                        fault: fault.to_string(),
                    });
                    let trap = state.flavor_mut().trap();
                    deaths.push(Death::new(
                        id,
                        DeathCause::InvalidAction,
                        format!("{trap} (Invalid action.)"),
                    ));
                    continue;
                }
            };

            match action {
                Action::Move(direction) => {
                    let cost = state.config().move_cost(state.player(id).carry_weight());
                    let player = state.player_mut(id);
                    if player.stamina < cost {
                        deaths.push(Death::new(id, DeathCause::Exhaustion, "died of exhaustion"));
                        continue;
                    }
                    player.stamina -= cost;
                    player.room = direction.apply(player.room);
                    let (room, stamina) = (player.room, player.stamina);

                    if room == 0 {
                        let player = state.player(id);
                        sink.emit(&Event::Escaped {
                            turn,
                            player: actor,
                            stamina,
                            treasures: player.inventory.len(),
                            value: player.total_value(),
                        });
                        escaped.push(id);
                        continue;
                    }
                    state.ensure_room(room);
                    if stamina == 0 {
                        deaths.push(Death::new(
                            id,
                            DeathCause::Exhaustion,
                            format!("collapsed in the doorway to room #{room} and died of exhaustion"),
                        ));
                    } else {
                        sink.emit(&Event::Moved { turn, player: actor, room });
                    }
                }

                Action::Take { index, bid } => match Self::validate_take(state, id, &index, &bid) {
                    Ok((slot, amount)) => {
                        let player = state.player_mut(id);
                        player.stamina -= amount;
                        bids.entry((player.room, slot))
                            .or_default()
                            .push(Bid { amount, player: id });
                    }
                    Err(death) => deaths.push(death),
                },

                Action::Drop { index } => {
                    let drop_cost = state.config().drop_cost;
                    let player = state.player_mut(id);
                    player.stamina = player.stamina.saturating_sub(drop_cost);
                    match slot_in(&index, player.inventory.len()) {
                        Some(slot) => {
                            let room = player.room;
                            let treasure = player.inventory.remove(slot);
                            sink.emit(&Event::Dropped {
                                turn,
                                player: actor,
                                room,
                                treasure: treasure.clone(),
                            });
                            drops.entry(room).or_default().push(treasure);
                        }
                        None => deaths.push(Death::new(
                            id,
                            DeathCause::BadDrop,
                            "was bitten by a venomous spider and died moments later. (Invalid drop)",
                        )),
                    }
                }
            }
        }

        let mut taken: BTreeMap<u32, BTreeSet<usize>> = BTreeMap::new();
        for ((room, slot), entries) in &bids {
            let treasure = state.room(*room)[*slot].clone();
            let contest = Self::settle_contest(entries);
            if let Some(winner) = contest.winner {
                state.player_mut(winner).inventory.push_back(treasure.clone());
                taken.entry(*room).or_default().insert(*slot);
                sink.emit(&Event::Took {
                    turn,
                    player: actor(state, winner),
                    treasure: treasure.clone(),
                    contested: entries.len() > 1,
                });
            }
            for loser in contest.resisted {
                sink.emit(&Event::Resisted {
                    turn,
                    player: actor(state, loser),
                    treasure: treasure.name.clone(),
                });
            }
        }

        for (room, items) in drops {
            state.room_mut(room).extend(items);
        }
        for (room, slots) in &taken {
            let contents = state.room_mut(*room);
            for slot in slots.iter().rev() {
                contents.remove(*slot);
            }
        }

        // Spending the last stamina on a bid or a drop is as fatal as walking.
        let queued: BTreeSet<PlayerId> = deaths.iter().map(|d| d.player).collect();
        for id in acted {
            let player = state.player(id);
            if player.room > 0 && player.stamina == 0 && !queued.contains(&id) {
                deaths.push(Death::new(
                    id,
                    DeathCause::Exhaustion,
                    "collapsed from exertion and died of exhaustion",
                ));
            }
        }

        for death in &deaths {
            Self::kill(state, death, sink);
        }

        debug_assert_eq!(
            state.treasure_count(),
            count_before + (state.treasures_generated() - generated_before) as usize,
            "treasure was created or destroyed in turn {turn}"
        );

        TurnSummary {
            turn,
            deaths,
            escaped,
            taken: taken.values().map(BTreeSet::len).sum(),
        }
    }

    /// Check a take in rule order, returning the slot and bid on success.
    fn validate_take(
        state: &mut GameState,
        id: PlayerId,
        index: &Arg,
        bid: &Arg,
    ) -> Result<(usize, u32), Death> {
        let Some(amount) = bid.coerce() else {
            let trap = state.flavor_mut().trap();
            return Err(Death::new(id, DeathCause::BadBid, format!("{trap} (Non-integer bid)")));
        };
        let Some(raw_index) = index.coerce() else {
            let trap = state.flavor_mut().trap();
            return Err(Death::new(
                id,
                DeathCause::Trap,
                format!("{trap} (Non-integer treasure index)"),
            ));
        };

        let player = state.player(id);
        let room = state.room(player.room);
        let slot = match usize::try_from(raw_index) {
            Ok(slot) if slot < room.len() => slot,
            _ => {
                let trap = state.flavor_mut().trap();
                return Err(Death::new(
                    id,
                    DeathCause::Trap,
                    format!("{trap} (Invalid treasure index)"),
                ));
            }
        };

        let target = &room[slot];
        let (name, weight) = (target.name.clone(), target.weight);
        if amount < i64::from(weight) {
            let trap = state.flavor_mut().trap();
            return Err(Death::new(
                id,
                DeathCause::BadBid,
                format!("tried to lift {name} but {trap} (Bid too low)"),
            ));
        }
        if amount > i64::from(player.stamina) {
            return Err(Death::new(
                id,
                DeathCause::BadBid,
                format!(
                    "went all out to take {name}, but had a heart attack and collapsed. (Bid too high)"
                ),
            ));
        }
        if weight + player.carry_weight() > state.config().carry_capacity {
            let trap = state.flavor_mut().trap();
            return Err(Death::new(
                id,
                DeathCause::Overweight,
                format!("{trap} (Treasure too heavy)"),
            ));
        }

        // amount lies in weight..=stamina, so it fits
        Ok((slot, amount as u32))
    }

    /// Pick the winner among the bids on one treasure.
    ///
    /// A lone bidder always wins. Otherwise the strictly highest bid wins and
    /// a tie at the top leaves the treasure where it is. Everyone else is
    /// resisted.
    ///
    /// ```
    /// use ruins::core::PlayerId;
    /// use ruins::rules::{Bid, TurnResolver};
    ///
    /// let bid = |amount, p| Bid { amount, player: PlayerId::new(p) };
    ///
    /// let result = TurnResolver::settle_contest(&[bid(12, 0), bid(15, 1)]);
    /// assert_eq!(result.winner, Some(PlayerId::new(1)));
    ///
    /// let tie = TurnResolver::settle_contest(&[bid(12, 0), bid(12, 1), bid(8, 2)]);
    /// assert_eq!(tie.winner, None);
    /// assert_eq!(tie.resisted.len(), 3);
    /// ```
    #[must_use]
    pub fn settle_contest(bids: &[Bid]) -> ContestResult {
        if let [only] = bids {
            return ContestResult {
                winner: Some(only.player),
                resisted: Vec::new(),
            };
        }

        let mut ranked: SmallVec<[Bid; 4]> = bids.iter().copied().collect();
        ranked.sort_by(|a, b| b.amount.cmp(&a.amount));
        let clear_winner = match ranked.as_slice() {
            [first, second, ..] => first.amount > second.amount,
            _ => false,
        };

        let mut losers = ranked.into_iter().map(|b| b.player);
        let winner = if clear_winner { losers.next() } else { None };
        ContestResult {
            winner,
            resisted: losers.collect(),
        }
    }

    /// Carry out a death: stamina drops to zero and the whole inventory is
    /// left in the current room.
    pub fn kill(state: &mut GameState, death: &Death, sink: &mut dyn EventSink) {
        let turn = state.turn_number;
        let actor = actor(state, death.player);
        sink.emit(&Event::Died {
            turn,
            player: actor.clone(),
            cause: death.cause,
            message: death.message.clone(),
        });

        let player = state.player_mut(death.player);
        player.stamina = 0;
        if player.inventory.is_empty() {
            return;
        }
        let room = player.room;
        let dropped = std::mem::take(&mut player.inventory);
        sink.emit(&Event::Deposited {
            turn,
            player: actor,
            room,
            treasures: dropped.iter().cloned().collect(),
        });
        state.room_mut(room).append(dropped);
    }
}

fn actor(state: &GameState, id: PlayerId) -> Actor {
    Actor {
        id,
        name: state.player(id).to_string(),
    }
}

/// Coerced index if it names a slot of a sequence of `len` items.
fn slot_in(index: &Arg, len: usize) -> Option<usize> {
    index
        .coerce()
        .and_then(|i| usize::try_from(i).ok())
        .filter(|&i| i < len)
}
