use super::*;
use crate::{Event, EventBus, Outcome, BUST_LIMIT};

impl RunState {
    pub(super) fn draw_dealer_card(&mut self, face_up: bool) -> Result<(), RunError> {
        let mut card = if self.boss_deck.is_some() {
            if self.boss_deck.as_ref().is_some_and(Deck::is_empty) {
                self.reshuffle_boss_deck();
            }
            self.boss_deck.as_mut().and_then(Deck::draw_card)
        } else {
            if self.deck.is_empty() {
                self.rebuild_player_deck();
            }
            self.deck.draw_card()
        }
        .ok_or(RunError::DeckExhausted)?;
        card.face_up = face_up;
        self.dealer_hand.push(card);
        Ok(())
    }

    pub(super) fn reshuffle_boss_deck(&mut self) {
        let Some(def) = self.boss_def().cloned() else {
            return;
        };
        let mut deck = Deck::from_cards(def.deck);
        deck.shuffle(&mut self.rng);
        self.boss_deck = Some(deck);
    }

    pub(super) fn reveal_hole_card(&mut self, events: &mut EventBus) {
        if let Some(card) = self.dealer_hand.get_mut(1) {
            if !card.face_up {
                card.face_up = true;
                events.push(Event::HoleCardRevealed { label: card.label() });
            }
        }
    }

    pub(super) fn reveal_player_cards(&mut self) {
        for card in &mut self.player_hand {
            card.face_up = true;
        }
        if let Some(split) = &mut self.split {
            for hand in &mut split.hands {
                for card in hand {
                    card.face_up = true;
                }
            }
        }
    }

    /// Play out the dealer's hand and settle every live player hand. Emits
    /// one `DealerDrew` per hit so a frontend can pace the reveal.
    pub(super) fn dealer_turn(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        self.state.phase = Phase::DealerTurn;
        self.reveal_hole_card(events);
        self.reveal_player_cards();
        let (stand_value, hits_soft_17) = self.dealer_behavior();
        if self.dealer_frozen {
            self.state.message = "The dealer is frozen and stands pat.".to_string();
        } else {
            loop {
                let value = self.dealer_total();
                let must_hit = value.total < stand_value
                    || (hits_soft_17 && value.soft && value.total == stand_value);
                if !must_hit {
                    break;
                }
                self.draw_dealer_card(true)?;
                let drawn = self.dealer_hand[self.dealer_hand.len() - 1].label();
                events.push(Event::DealerDrew {
                    label: drawn,
                    total: self.dealer_total().total,
                });
            }
            if self.dealer_pressured && self.dealer_total().total <= BUST_LIMIT {
                self.draw_dealer_card(true)?;
                let drawn = self.dealer_hand[self.dealer_hand.len() - 1].label();
                events.push(Event::DealerDrew {
                    label: drawn,
                    total: self.dealer_total().total,
                });
            }
        }
        self.state.phase = Phase::Resolution;
        if self.split.is_some() {
            self.decide_split_outcomes();
            self.settle_split(events);
        } else {
            let outcome = self.decide_outcome(self.active_total().total);
            self.settle_single(outcome, events);
        }
        Ok(())
    }

    /// Showdown for a standing player total against the finished dealer hand.
    pub(super) fn decide_outcome(&self, player_total: i64) -> Outcome {
        let dealer = self.dealer_total().total;
        if dealer > BUST_LIMIT {
            return Outcome::Win;
        }
        let rules = self.showdown_rules();
        crate::resolve_showdown(player_total, dealer, &rules).outcome
    }

    fn decide_split_outcomes(&mut self) {
        let Some(split) = &self.split else {
            return;
        };
        let totals: Vec<(usize, i64)> = split
            .hands
            .iter()
            .enumerate()
            .filter(|(idx, _)| split.outcomes[*idx].is_none())
            .map(|(idx, hand)| (idx, crate::evaluate(hand, &self.content).total))
            .collect();
        for (idx, total) in totals {
            let outcome = self.decide_outcome(total);
            if let Some(split) = &mut self.split {
                split.outcomes[idx] = Some(outcome);
            }
        }
    }
}
