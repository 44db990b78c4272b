use crate::card::Card;
use crate::deck::Deck;
use crate::game_state::{GameState, Phase, PlayerState};
use crate::player::{PlayerId, Role};
use crate::rejection::Rejection;
use crate::table::{TableSlot, MAX_TABLE_SLOTS};
use crate::utils::{SliceExtensions, VecExtensions};

/// Hands are dealt and refilled to this size while the pack lasts.
const HAND_SIZE: usize = 6;

impl GameState {
    pub fn join(&mut self, id: PlayerId, name: &str) -> Result<(), Rejection> {
        if self.players.len() >= 2 {
            return Err(Rejection::GameFull);
        }
        self.players.push(PlayerState::new(id, name.to_string()));
        if self.players.len() == 2 {
            self.start_game();
        }
        Ok(())
    }

    pub fn leave(&mut self, id: PlayerId) -> Result<(), Rejection> {
        self.players
            .remove_first_where(|p| p.id == id)
            .ok_or(Rejection::PlayerNotFound)?;
        if self.players.len() < 2 {
            self.reset_round();
        }
        Ok(())
    }

    pub fn attack(&mut self, id: PlayerId, card_index: usize) -> Result<(), Rejection> {
        if self.phase != Phase::Playing {
            return Err(Rejection::GameNotInProgress);
        }
        let pos = self.player_pos(id).ok_or(Rejection::PlayerNotFound)?;
        if self.current_turn != Some(id) {
            return Err(Rejection::NotYourTurn);
        }
        if self.players[pos].role != Some(Role::Attacker) {
            return Err(Rejection::WrongRole);
        }
        let card = *self.players[pos]
            .hand
            .get(card_index)
            .ok_or(Rejection::InvalidCardIndex)?;
        if self.table.len() >= MAX_TABLE_SLOTS {
            return Err(Rejection::TableFull);
        }
        if !self.table.is_empty() && !self.rank_on_table(card.rank) {
            return Err(Rejection::RankMismatch);
        }
        let defender = self
            .id_with_role(Role::Defender)
            .ok_or(Rejection::GameNotInProgress)?;

        self.players[pos].hand.remove(card_index);
        self.table.push(TableSlot::open(card, id));
        self.current_turn = Some(defender);
        self.check_finished();
        Ok(())
    }

    pub fn defend(
        &mut self,
        id: PlayerId,
        card_index: usize,
        target_slot_index: usize,
    ) -> Result<(), Rejection> {
        if self.phase != Phase::Playing {
            return Err(Rejection::GameNotInProgress);
        }
        let pos = self.player_pos(id).ok_or(Rejection::PlayerNotFound)?;
        if self.current_turn != Some(id) {
            return Err(Rejection::NotYourTurn);
        }
        if self.players[pos].role != Some(Role::Defender) {
            return Err(Rejection::WrongRole);
        }
        let card = *self.players[pos]
            .hand
            .get(card_index)
            .ok_or(Rejection::InvalidCardIndex)?;
        let slot = self
            .table
            .get(target_slot_index)
            .ok_or(Rejection::InvalidTargetIndex)?;
        if slot.is_defended() {
            return Err(Rejection::AlreadyDefended);
        }
        if !card.beats(&slot.attack_card, self.deck.trump_suit()) {
            return Err(Rejection::CannotBeat);
        }

        self.players[pos].hand.remove(card_index);
        let slot = &mut self.table[target_slot_index];
        slot.defend_card = Some(card);
        slot.defender_id = Some(id);

        if self.all_slots_defended() {
            // Round beaten: the table goes to the discard, the defender takes
            // over the attack and leads after both hands are refilled.
            self.discard
                .extend(self.table.drain(..).flat_map(|slot| slot.cards()));
            self.swap_roles();
            self.current_turn = self.id_with_role(Role::Attacker);
            self.refill_hands();
        } else {
            self.current_turn = self.id_with_role(Role::Attacker);
        }
        self.check_finished();
        Ok(())
    }

    pub fn pick_up(&mut self, id: PlayerId) -> Result<(), Rejection> {
        if self.phase != Phase::Playing {
            return Err(Rejection::GameNotInProgress);
        }
        let pos = self.player_pos(id).ok_or(Rejection::PlayerNotFound)?;
        if self.current_turn != Some(id) {
            return Err(Rejection::NotYourTurn);
        }
        if self.players[pos].role != Some(Role::Defender) {
            return Err(Rejection::WrongRole);
        }

        let taken: Vec<Card> = self.table.drain(..).flat_map(|slot| slot.cards()).collect();
        self.players[pos].hand.extend(taken);
        // No role swap: the defender failed to beat and keeps defending.
        self.current_turn = self.id_with_role(Role::Attacker);
        self.refill_hands();
        self.check_finished();
        Ok(())
    }

    fn start_game(&mut self) {
        self.phase = Phase::Playing;
        for player in &mut self.players {
            let dealt = self.deck.deal(HAND_SIZE);
            player.hand.extend(dealt);
        }
        self.players[0].role = Some(Role::Attacker);
        self.players[1].role = Some(Role::Defender);
        self.current_turn = Some(self.players[0].id);
    }

    /// Back to waiting; the round is discarded entirely so the next pairing
    /// starts from a fresh pack.
    fn reset_round(&mut self) {
        self.phase = Phase::Waiting;
        self.table.clear();
        self.discard.clear();
        self.deck = Deck::new();
        self.current_turn = None;
        self.winner = None;
        for player in &mut self.players {
            player.role = None;
            player.hand.clear();
        }
    }

    fn swap_roles(&mut self) {
        for player in &mut self.players {
            player.role = player.role.map(|role| role.opposite());
        }
    }

    /// Attacker first, then defender, matching the opening deal's order.
    fn refill_hands(&mut self) {
        for role in [Role::Attacker, Role::Defender] {
            if let Some(pos) = self.players.iter().position(|p| p.role == Some(role)) {
                let need = HAND_SIZE.saturating_sub(self.players[pos].hand.len());
                let dealt = self.deck.deal(need);
                self.players[pos].hand.extend(dealt);
            }
        }
    }

    /// Runs after every successful move: the first empty hand once the pack
    /// is gone wins. Both hands emptying on the same move is a draw.
    fn check_finished(&mut self) {
        if self.phase != Phase::Playing || self.deck.remaining() > 0 {
            return;
        }
        let done: Vec<PlayerId> = self
            .players
            .iter()
            .filter(|p| p.hand.is_empty())
            .map(|p| p.id)
            .collect();
        if done.is_empty() {
            return;
        }
        self.phase = Phase::Finished;
        self.winner = done.single_element().copied();
    }
}
