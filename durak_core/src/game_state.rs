use serde::{Deserialize, Serialize};
use strum_macros::Display;

use crate::card::{Card, Rank, Suit};
use crate::deck::Deck;
use crate::player::{PlayerId, Role};
use crate::table::TableSlot;

#[derive(Debug, PartialEq, Eq, Copy, Clone, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Phase {
    Waiting,
    Playing,
    Finished,
}

pub struct PlayerState {
    pub(crate) id: PlayerId,
    pub(crate) name: String,
    pub(crate) hand: Vec<Card>,
    pub(crate) role: Option<Role>,
}

impl PlayerState {
    pub(crate) fn new(id: PlayerId, name: String) -> Self {
        PlayerState {
            id,
            name,
            hand: vec![],
            role: None,
        }
    }
}

/// The authoritative state machine for one two-player game. It owns the
/// deck, both hands and the table, and is only ever mutated through the
/// operations in `game_logic`; it performs no I/O and knows nothing about
/// connections beyond the opaque player tokens.
pub struct GameState {
    pub(crate) players: Vec<PlayerState>,
    pub(crate) table: Vec<TableSlot>,
    pub(crate) discard: Vec<Card>,
    pub(crate) deck: Deck,
    pub(crate) phase: Phase,
    pub(crate) current_turn: Option<PlayerId>,
    pub(crate) winner: Option<PlayerId>,
}

impl GameState {
    pub fn new() -> Self {
        GameState {
            players: vec![],
            table: vec![],
            discard: vec![],
            deck: Deck::new(),
            phase: Phase::Waiting,
            current_turn: None,
            winner: None,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn trump_suit(&self) -> Suit {
        self.deck.trump_suit()
    }

    pub fn current_turn(&self) -> Option<PlayerId> {
        self.current_turn
    }

    pub fn is_finished(&self) -> bool {
        self.phase == Phase::Finished
    }

    /// Meaningful once finished; `None` on a finished game means a draw.
    pub fn winner(&self) -> Option<PlayerId> {
        self.winner
    }

    pub(crate) fn player_pos(&self, id: PlayerId) -> Option<usize> {
        self.players.iter().position(|p| p.id == id)
    }

    pub(crate) fn id_with_role(&self, role: Role) -> Option<PlayerId> {
        self.players
            .iter()
            .find(|p| p.role == Some(role))
            .map(|p| p.id)
    }

    /// Throw-in legality: both attack and cover ranks already laid qualify.
    pub(crate) fn rank_on_table(&self, rank: Rank) -> bool {
        self.table
            .iter()
            .flat_map(|slot| slot.cards())
            .any(|card| card.rank == rank)
    }

    pub(crate) fn all_slots_defended(&self) -> bool {
        self.table.iter().all(|slot| slot.is_defended())
    }
}

#[cfg(test)]
impl GameState {
    pub fn with_deck(deck: Deck) -> Self {
        GameState {
            deck,
            ..GameState::new()
        }
    }
}
