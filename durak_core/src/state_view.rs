use serde::{Deserialize, Serialize};

use crate::card::{Card, Suit};
use crate::game_state::{GameState, Phase};
use crate::player::{PlayerId, Role};
use crate::table::TableSlot;

/// What one participant is allowed to see. Only the viewer's own hand is
/// spelled out; the opponent appears as a card count. Table, trump and pack
/// size are public.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StateView {
    pub players: Vec<PlayerView>,
    pub table: Vec<TableSlot>,
    pub trump_suit: Suit,
    pub deck_remaining: usize,
    pub current_turn: Option<PlayerId>,
    pub phase: Phase,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerView {
    pub id: PlayerId,
    pub name: String,
    pub role: Option<Role>,
    pub hand_size: usize,
    pub hand: Option<Vec<Card>>,
}

impl GameState {
    /// Pure read accessor; never mutates and never exposes the opponent's
    /// card faces.
    pub fn project(&self, for_player: PlayerId) -> StateView {
        StateView {
            players: self
                .players
                .iter()
                .map(|p| PlayerView {
                    id: p.id,
                    name: p.name.clone(),
                    role: p.role,
                    hand_size: p.hand.len(),
                    hand: (p.id == for_player).then(|| p.hand.clone()),
                })
                .collect(),
            table: self.table.clone(),
            trump_suit: self.trump_suit(),
            deck_remaining: self.deck.remaining(),
            current_turn: self.current_turn,
            phase: self.phase,
        }
    }
}

#[cfg(test)]
mod tests {
    use itertools::iproduct;
    use strum::IntoEnumIterator;

    use crate::card::{Card, Rank, Suit};
    use crate::deck::Deck;
    use crate::game_state::{GameState, Phase};
    use crate::player::Role;

    #[test]
    fn projection_shows_own_hand_and_hides_the_opponents() {
        let cards: Vec<Card> = iproduct!(Suit::iter(), Rank::iter())
            .map(|(suit, rank)| Card { suit, rank })
            .take(13)
            .collect();
        let mut game = GameState::with_deck(Deck::rigged(cards, Suit::Clubs));
        game.join(1, "Alice").unwrap();
        game.join(2, "Bob").unwrap();

        let view = game.project(2);

        assert_eq!(view.phase, Phase::Playing);
        assert_eq!(view.current_turn, Some(1));
        assert_eq!(view.trump_suit, Suit::Clubs);
        assert_eq!(view.deck_remaining, game.deck.remaining());

        let alice = &view.players[0];
        assert_eq!(alice.role, Some(Role::Attacker));
        assert_eq!(alice.hand_size, 6);
        assert_eq!(alice.hand, None);

        let bob = &view.players[1];
        assert_eq!(bob.role, Some(Role::Defender));
        assert_eq!(bob.hand_size, 6);
        assert_eq!(bob.hand.as_deref(), Some(game.players[1].hand.as_slice()));
    }

    #[test]
    fn projection_for_a_stranger_hides_every_hand() {
        let mut game = GameState::new();
        game.join(1, "Alice").unwrap();
        game.join(2, "Bob").unwrap();

        let view = game.project(99);
        assert!(view.players.iter().all(|p| p.hand.is_none()));
    }
}
