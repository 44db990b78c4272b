use itertools::iproduct;
use rand::seq::SliceRandom;
use strum::IntoEnumIterator;

use crate::card::{Card, Rank, Suit};

/// The full shuffled pack. Cards are dealt from the top (the end of the
/// vector); the card left at the bottom fixes the trump suit for the whole
/// game, even after the pack runs out.
pub struct Deck {
    cards: Vec<Card>,
    trump_suit: Suit,
}

impl Deck {
    pub fn new() -> Self {
        let mut cards: Vec<Card> = iproduct!(Suit::iter(), Rank::iter())
            .map(|(suit, rank)| Card { suit, rank })
            .collect();
        cards.shuffle(&mut rand::thread_rng());
        let trump_suit = cards[0].suit;
        Deck { cards, trump_suit }
    }

    /// Removes up to `count` cards from the top. Returns fewer once the pack
    /// is exhausted; callers check the returned length.
    pub fn deal(&mut self, count: usize) -> Vec<Card> {
        let take = count.min(self.cards.len());
        self.cards.split_off(self.cards.len() - take)
    }

    pub fn remaining(&self) -> usize {
        self.cards.len()
    }

    pub fn trump_suit(&self) -> Suit {
        self.trump_suit
    }
}

#[cfg(test)]
impl Deck {
    /// A pack in a known order with a fixed trump, for scripted games.
    pub fn rigged(cards: Vec<Card>, trump_suit: Suit) -> Self {
        Deck { cards, trump_suit }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use crate::card::{Card, Rank, Suit};
    use crate::deck::Deck;

    #[test]
    fn fresh_deck_holds_36_distinct_cards() {
        let deck = Deck::new();
        assert_eq!(deck.remaining(), 36);
        let distinct: HashSet<Card> = deck.cards.iter().copied().collect();
        assert_eq!(distinct.len(), 36);
    }

    #[test]
    fn trump_comes_from_the_bottom_card() {
        for _ in 0..16 {
            let deck = Deck::new();
            assert_eq!(deck.trump_suit(), deck.cards[0].suit);
        }
    }

    #[test]
    fn deal_takes_from_the_top() {
        let cards = vec![
            Card { suit: Suit::Hearts, rank: Rank::Six },
            Card { suit: Suit::Hearts, rank: Rank::Seven },
            Card { suit: Suit::Hearts, rank: Rank::Eight },
        ];
        let mut deck = Deck::rigged(cards, Suit::Hearts);

        let dealt = deck.deal(2);
        assert_eq!(
            dealt,
            vec![
                Card { suit: Suit::Hearts, rank: Rank::Seven },
                Card { suit: Suit::Hearts, rank: Rank::Eight },
            ]
        );
        assert_eq!(deck.remaining(), 1);
    }

    #[test]
    fn deal_short_counts_once_exhausted() {
        let mut deck = Deck::new();
        assert_eq!(deck.deal(30).len(), 30);
        assert_eq!(deck.deal(10).len(), 6);
        assert_eq!(deck.remaining(), 0);
        assert!(deck.deal(6).is_empty());
    }

    #[test]
    fn trump_survives_exhaustion() {
        let mut deck = Deck::new();
        let trump = deck.trump_suit();
        deck.deal(36);
        assert_eq!(deck.trump_suit(), trump);
    }
}
