//! Pool-stage batching.
//!
//! Each round walks a freshly shuffled roster and fills games of exactly
//! `game_size` seats. A bot that already waits in the batch being filled is
//! held back to the next round instead, and so is whatever is left over when
//! the round ends. Over many rounds every bot plays (nearly) once per round.

/// Splits shuffled rosters into full games, carrying leftovers between rounds.
#[derive(Clone, Debug)]
pub struct PoolBatcher {
    game_size: usize,
    carryover: Vec<usize>,
}

impl PoolBatcher {
    #[must_use]
    pub fn new(game_size: usize) -> Self {
        debug_assert!(game_size > 0);
        Self {
            game_size,
            carryover: Vec::new(),
        }
    }

    /// Bots waiting for the next round.
    #[must_use]
    pub fn leftover(&self) -> &[usize] {
        &self.carryover
    }

    /// Batch one round. `shuffled` is the full roster in this round's order.
    ///
    /// ```
    /// use ruins::tournament::PoolBatcher;
    ///
    /// let mut batcher = PoolBatcher::new(2);
    /// let games = batcher.round(&[0, 1, 2]);
    /// assert_eq!(games, vec![vec![0, 1]]);
    /// assert_eq!(batcher.leftover(), &[2]);
    ///
    /// // 2 is already waiting, so its new copy is held back to the end.
    /// let games = batcher.round(&[2, 0, 1]);
    /// assert_eq!(games, vec![vec![2, 0], vec![2, 1]]);
    /// assert!(batcher.leftover().is_empty());
    /// ```
    pub fn round(&mut self, shuffled: &[usize]) -> Vec<Vec<usize>> {
        let mut games = Vec::new();
        let mut batch = std::mem::take(&mut self.carryover);

        for &bot in shuffled {
            while batch.len() >= self.game_size {
                games.push(batch.drain(..self.game_size).collect());
            }
            if batch.contains(&bot) {
                self.carryover.push(bot);
            } else {
                batch.push(bot);
            }
        }

        self.carryover.append(&mut batch);
        while self.carryover.len() >= self.game_size {
            games.push(self.carryover.drain(..self.game_size).collect());
        }
        games
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exact_multiple_has_no_leftover() {
        let mut batcher = PoolBatcher::new(3);
        let games = batcher.round(&[5, 4, 3, 2, 1, 0]);
        assert_eq!(games, vec![vec![5, 4, 3], vec![2, 1, 0]]);
        assert!(batcher.leftover().is_empty());
    }

    #[test]
    fn test_waiting_bot_is_held_back() {
        let mut batcher = PoolBatcher::new(3);
        assert!(batcher.round(&[0, 1]).is_empty());
        assert_eq!(batcher.leftover(), &[0, 1]);

        // 0 and 1 already wait in the batch, so their second copies are held back.
        let games = batcher.round(&[1, 2, 0]);
        assert_eq!(games, vec![vec![0, 1, 2]]);
        assert_eq!(batcher.leftover(), &[1, 0]);
    }

    #[test]
    fn test_games_never_repeat_a_bot() {
        let mut batcher = PoolBatcher::new(4);
        let mut order: Vec<usize> = (0..11).collect();
        for round in 0..30 {
            order.rotate_left(round % 11);
            for game in batcher.round(&order) {
                let mut seats = game.clone();
                seats.sort_unstable();
                seats.dedup();
                assert_eq!(seats.len(), 4, "duplicate seat in {game:?}");
            }
        }
    }
}
