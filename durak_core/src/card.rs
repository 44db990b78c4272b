use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumIter};

#[derive(
    Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize, Display, EnumIter,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Suit {
    Hearts,
    Diamonds,
    Clubs,
    Spades,
}

/// Declaration order is the rank order: 6 is lowest, ace is highest.
#[derive(
    Debug, PartialEq, Eq, PartialOrd, Ord, Copy, Clone, Hash, Serialize, Deserialize, Display,
    EnumIter,
)]
pub enum Rank {
    #[serde(rename = "6")]
    #[strum(serialize = "6")]
    Six,
    #[serde(rename = "7")]
    #[strum(serialize = "7")]
    Seven,
    #[serde(rename = "8")]
    #[strum(serialize = "8")]
    Eight,
    #[serde(rename = "9")]
    #[strum(serialize = "9")]
    Nine,
    #[serde(rename = "10")]
    #[strum(serialize = "10")]
    Ten,
    #[serde(rename = "J")]
    #[strum(serialize = "J")]
    Jack,
    #[serde(rename = "Q")]
    #[strum(serialize = "Q")]
    Queen,
    #[serde(rename = "K")]
    #[strum(serialize = "K")]
    King,
    #[serde(rename = "A")]
    #[strum(serialize = "A")]
    Ace,
}

#[derive(Debug, PartialEq, Eq, Copy, Clone, Hash, Serialize, Deserialize)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
}

impl Card {
    /// Whether this card, played as a cover, beats `attack`. Rank decides
    /// within a suit; a trump covers any non-trump regardless of rank.
    pub fn beats(&self, attack: &Card, trump: Suit) -> bool {
        if self.suit == attack.suit {
            self.rank > attack.rank
        } else {
            self.suit == trump && attack.suit != trump
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::card::{Card, Rank, Suit};
    use itertools::iproduct;
    use strum::IntoEnumIterator;

    fn card(suit: Suit, rank: Rank) -> Card {
        Card { suit, rank }
    }

    #[test]
    fn rank_order_runs_from_six_to_ace() {
        let ranks: Vec<Rank> = Rank::iter().collect();
        assert!(ranks.windows(2).all(|w| w[0] < w[1]));
        assert_eq!(ranks.first(), Some(&Rank::Six));
        assert_eq!(ranks.last(), Some(&Rank::Ace));
    }

    #[test]
    fn same_suit_higher_rank_beats() {
        let nine = card(Suit::Spades, Rank::Nine);
        let seven = card(Suit::Spades, Rank::Seven);
        assert!(nine.beats(&seven, Suit::Clubs));
        assert!(!seven.beats(&nine, Suit::Clubs));
    }

    #[test]
    fn trump_beats_any_non_trump_regardless_of_rank() {
        let trump_six = card(Suit::Clubs, Rank::Six);
        let ace = card(Suit::Hearts, Rank::Ace);
        assert!(trump_six.beats(&ace, Suit::Clubs));
        assert!(!ace.beats(&trump_six, Suit::Clubs));
    }

    #[test]
    fn trump_against_trump_falls_back_to_rank() {
        let low = card(Suit::Clubs, Rank::Eight);
        let high = card(Suit::Clubs, Rank::Queen);
        assert!(high.beats(&low, Suit::Clubs));
        assert!(!low.beats(&high, Suit::Clubs));
    }

    #[test]
    fn off_suit_non_trump_never_beats() {
        let attack = card(Suit::Hearts, Rank::Six);
        let cover = card(Suit::Diamonds, Rank::Ace);
        assert!(!cover.beats(&attack, Suit::Clubs));
    }

    #[test]
    fn beat_relation_over_all_ordered_pairs() {
        for trump in Suit::iter() {
            for (attack, cover) in iproduct!(
                iproduct!(Suit::iter(), Rank::iter()),
                iproduct!(Suit::iter(), Rank::iter())
            ) {
                let attack = card(attack.0, attack.1);
                let cover = card(cover.0, cover.1);
                let expected = (cover.suit == attack.suit && cover.rank > attack.rank)
                    || (cover.suit == trump && attack.suit != trump);
                assert_eq!(
                    cover.beats(&attack, trump),
                    expected,
                    "cover {:?} vs attack {:?}, trump {:?}",
                    cover,
                    attack,
                    trump
                );
            }
        }
    }

    #[test]
    fn wire_names_match_the_table_talk() {
        assert_eq!(serde_json::to_string(&Suit::Hearts).unwrap(), "\"hearts\"");
        assert_eq!(serde_json::to_string(&Rank::Ten).unwrap(), "\"10\"");
        assert_eq!(serde_json::to_string(&Rank::Ace).unwrap(), "\"A\"");
        assert_eq!(Rank::Jack.to_string(), "J");
        assert_eq!(Suit::Spades.to_string(), "spades");
    }
}
