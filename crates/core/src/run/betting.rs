use super::*;
use crate::{Event, EventBus, Rank, SpecialEffect, SpecialTrigger, ValuePolicy};

impl RunState {
    pub fn place_bet(&mut self, amount: i64, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::Betting {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        if amount < self.min_bet() {
            return Err(RunError::BetBelowMinimum);
        }
        if amount > self.state.chips {
            return Err(RunError::NotEnoughChips);
        }
        self.state.current_bet = amount;
        self.state.last_bet = amount;
        events.push(Event::BetPlaced { amount });
        Ok(())
    }

    pub fn deal(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::Betting {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        if self.state.current_bet <= 0 {
            return Err(RunError::NoBetPlaced);
        }
        self.state.phase = Phase::Dealing;
        self.state.outcome = None;
        self.state.doubled_down = false;
        self.split = None;
        self.player_hand.clear();
        self.dealer_hand.clear();
        if self.state.blind_hands_remaining > 0 {
            self.state.blind_hands_remaining -= 1;
            self.blind_hand = true;
        }
        self.stats.record_wager(self.state.current_bet);

        let first_floor = if self.stacked_deck_armed || self.loaded_dice_armed {
            Some(10)
        } else {
            None
        };
        let second_floor = if self.loaded_dice_armed { Some(10) } else { None };
        self.stacked_deck_armed = false;
        self.loaded_dice_armed = false;

        self.draw_player_card(first_floor, events)?;
        self.draw_dealer_card(true)?;
        self.draw_player_card(second_floor, events)?;
        let hole_visible = self.boss_def().map(|boss| boss.hole_card_visible).unwrap_or(false);
        self.draw_dealer_card(hole_visible)?;

        if self.dealers_tell_armed {
            self.dealers_tell_armed = false;
            if self.dealer_hand[0].value() <= 6 {
                self.reveal_hole_card(events);
            }
        }

        events.push(Event::HandDealt {
            player_total: self.player_total().total,
            dealer_upcard: self.dealer_hand[0].value(),
        });

        let player_natural = crate::is_blackjack(&self.player_hand, &self.content);
        let dealer_natural = crate::is_blackjack(&self.dealer_hand, &self.content);
        if player_natural || dealer_natural {
            self.reveal_hole_card(events);
            let outcome = match (player_natural, dealer_natural) {
                (true, true) => crate::Outcome::Push,
                (true, false) => crate::Outcome::Blackjack,
                _ => crate::Outcome::Lose,
            };
            self.state.phase = Phase::Resolution;
            self.settle_single(outcome, events);
            return Ok(());
        }

        self.state.phase = Phase::PlayerTurn;
        self.state.message = "Hit, stand, double, or split.".to_string();
        Ok(())
    }

    /// Fix the value of a player-chosen variable card in the active hand.
    pub fn choose_card_value(&mut self, index: usize, value: i64) -> Result<(), RunError> {
        if self.state.phase != Phase::PlayerTurn {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        let hand = self.active_hand();
        let card = hand.get(index).ok_or(RunError::InvalidSelection)?;
        let def = card
            .special
            .as_deref()
            .and_then(|id| self.content.special_by_id(id))
            .ok_or(RunError::InvalidSelection)?;
        let ValuePolicy::Choice { min, max } = def.value else {
            return Err(RunError::InvalidSelection);
        };
        if value < min || value > max {
            return Err(RunError::InvalidSelection);
        }
        let mut preview = hand.clone();
        preview[index].value_override = Some(value);
        if crate::is_bust(&preview, &self.content) {
            return Err(RunError::InvalidSelection);
        }
        self.active_hand_mut()[index].value_override = Some(value);
        Ok(())
    }

    /// Draw into the active hand, resolving copy values, blind-hand facing,
    /// per-rank challenge taxes, and on-draw special effects.
    pub(super) fn draw_player_card(
        &mut self,
        floor: Option<i64>,
        events: &mut EventBus,
    ) -> Result<(), RunError> {
        let card = self.draw_from_player_pile(floor)?;
        self.admit_player_card(card, events);
        Ok(())
    }

    pub(super) fn admit_player_card(&mut self, mut card: Card, events: &mut EventBus) {
        if let Some(id) = card.special.as_deref() {
            let copies_last = self
                .content
                .special_by_id(id)
                .map(|def| def.value == ValuePolicy::CopyLast)
                .unwrap_or(false);
            if copies_last && card.value_override.is_none() {
                card.value_override =
                    Some(self.last_drawn_value.unwrap_or_else(|| card.rank.base_value()));
            }
        }
        if card.special.is_none() && self.cursed_ace == Some(card.suit) && card.rank == Rank::Ace {
            // The cursed ace is hard 1 for the whole stage.
            card.value_override = Some(1);
        }
        self.last_drawn_value = Some(card.value());
        if self.blind_hand {
            card.face_up = false;
        }
        for (rank, chips) in self.challenge_rules().card_draw_costs {
            if card.rank == rank {
                self.state.chips = (self.state.chips - chips).max(0);
                self.state.message = format!("The house taxes that {}.", rank.symbol());
            }
        }
        if card.special.is_none() {
            if let Some(pos) = self
                .poisoned_cards
                .iter()
                .position(|&(suit, rank, _)| suit == card.suit && rank == card.rank)
            {
                let (_, _, chips) = self.poisoned_cards.remove(pos);
                self.state.chips = (self.state.chips - chips).max(0);
                self.state.message = format!("Poison on {} drains {} chips.", card.label(), chips);
            }
        }
        if let Some(def) = card
            .special
            .as_deref()
            .and_then(|id| self.content.special_by_id(id))
            .cloned()
        {
            if def.trigger == SpecialTrigger::OnDraw {
                let mut chip_delta = 0;
                match def.effect {
                    SpecialEffect::ChipBonus(amount) => {
                        chip_delta = amount;
                        self.state.chips += amount;
                    }
                    SpecialEffect::EdgeBonus(amount) => self.gain_edge(amount, events),
                    SpecialEffect::DealerExtraHit => self.dealer_pressured = true,
                    SpecialEffect::RevealHole => self.reveal_hole_card(events),
                    _ => {}
                }
                events.push(Event::SpecialTriggered {
                    id: def.id,
                    chip_delta,
                });
            }
        }
        let label = card.label();
        self.active_hand_mut().push(card);
        let total = self.active_total().total;
        events.push(Event::PlayerDrew { label, total });
    }

    fn draw_from_player_pile(&mut self, floor: Option<i64>) -> Result<Card, RunError> {
        if self.deck.is_empty() {
            // Mid-hand exhaustion on a lean deck; rebuild rather than stall.
            self.rebuild_player_deck();
        }
        let card = match floor {
            Some(min) => self
                .deck
                .draw_at_least(min)
                .or_else(|| self.deck.draw_card()),
            None => self.deck.draw_card(),
        };
        card.ok_or(RunError::DeckExhausted)
    }
}
