use rand::seq::SliceRandom;
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;

use crate::cards::{full_deck, Card};
use crate::errors::GameError;

/// The 52-card deck owned by a single round. Cards are drawn from the end of
/// the sequence and never return until [`Deck::reset`] or [`Deck::shuffle`].
///
/// # Examples
///
/// ```
/// use shellpoker_engine::deck::Deck;
///
/// let mut a = Deck::new_with_seed(7);
/// let mut b = Deck::new_with_seed(7);
/// a.shuffle();
/// b.shuffle();
/// assert_eq!(a.draw(5).unwrap(), b.draw(5).unwrap());
/// assert_eq!(a.remaining(), 47);
/// ```
#[derive(Debug)]
pub struct Deck {
    cards: Vec<Card>,
    rng: ChaCha20Rng,
}

impl Deck {
    pub fn new_with_seed(seed: u64) -> Self {
        // Keep initial order until shuffle is called explicitly
        Self {
            cards: full_deck(),
            rng: ChaCha20Rng::seed_from_u64(seed),
        }
    }

    /// A deck seeded from the thread RNG.
    pub fn new_random() -> Self {
        Self::new_with_seed(rand::random())
    }

    /// Restores all 52 cards and permutes them uniformly.
    pub fn shuffle(&mut self) {
        self.cards = full_deck();
        self.cards.shuffle(&mut self.rng);
    }

    /// Removes and returns the last `n` cards, last card first.
    pub fn draw(&mut self, n: usize) -> Result<Vec<Card>, GameError> {
        if n > self.cards.len() {
            return Err(GameError::InsufficientCards {
                requested: n,
                remaining: self.cards.len(),
            });
        }
        let mut out = Vec::with_capacity(n);
        for _ in 0..n {
            if let Some(c) = self.cards.pop() {
                out.push(c);
            }
        }
        Ok(out)
    }

    pub fn draw_one(&mut self) -> Result<Card, GameError> {
        self.cards.pop().ok_or(GameError::InsufficientCards {
            requested: 1,
            remaining: 0,
        })
    }

    pub fn burn(&mut self) -> Result<(), GameError> {
        self.draw_one().map(|_| ())
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn draw_takes_from_the_end() {
        let mut deck = Deck::new_with_seed(1);
        let last = *full_deck().last().unwrap();
        assert_eq!(deck.draw(1).unwrap(), vec![last]);
        assert_eq!(deck.remaining(), 51);
    }

    #[test]
    fn overdraw_is_an_error_and_leaves_deck_intact() {
        let mut deck = Deck::new_with_seed(1);
        deck.draw(50).unwrap();
        let err = deck.draw(3).unwrap_err();
        assert_eq!(
            err,
            GameError::InsufficientCards {
                requested: 3,
                remaining: 2
            }
        );
        assert_eq!(deck.remaining(), 2);
    }
}
