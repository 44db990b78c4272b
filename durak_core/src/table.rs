use std::iter::once;

use serde::{Deserialize, Serialize};

use crate::card::Card;
use crate::player::PlayerId;

/// A round never holds more than six attacks.
pub const MAX_TABLE_SLOTS: usize = 6;

/// One attack lying on the table, together with its cover once the defender
/// has beaten it. Slots keep the order the attacks were laid in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TableSlot {
    pub attack_card: Card,
    pub attacker_id: PlayerId,
    pub defend_card: Option<Card>,
    pub defender_id: Option<PlayerId>,
}

impl TableSlot {
    pub fn open(attack_card: Card, attacker_id: PlayerId) -> Self {
        TableSlot {
            attack_card,
            attacker_id,
            defend_card: None,
            defender_id: None,
        }
    }

    pub fn is_defended(&self) -> bool {
        self.defend_card.is_some()
    }

    /// Every card sitting in this slot, attack first.
    pub fn cards(&self) -> impl Iterator<Item = Card> {
        once(self.attack_card).chain(self.defend_card)
    }
}
