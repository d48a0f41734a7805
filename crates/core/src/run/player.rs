use super::*;
use crate::{Event, EventBus, HandValue, Outcome, TraitKind, BUST_LIMIT};

impl RunState {
    pub fn player_total(&self) -> HandValue {
        crate::evaluate(&self.player_hand, &self.content)
    }

    pub fn dealer_total(&self) -> HandValue {
        crate::evaluate(&self.dealer_hand, &self.content)
    }

    pub(super) fn active_total(&self) -> HandValue {
        crate::evaluate(self.active_hand(), &self.content)
    }

    pub fn hit(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::PlayerTurn {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        let limit = self.challenge_rules().max_hand_size;
        let over_limit = limit
            .map(|limit| self.active_hand().len() >= limit)
            .unwrap_or(false);
        self.draw_player_card(None, events)?;
        let total = self.active_total().total;
        if over_limit || total > BUST_LIMIT {
            return self.handle_player_bust(events);
        }
        if self.deck_trait() == Some(TraitKind::SlowBurn) {
            self.state.chips += 1;
            events.push(Event::TraitTriggered { chip_delta: 1 });
        }
        if total == BUST_LIMIT {
            // Auto-stand goes through `stand` so stand bonuses still pay.
            return self.stand(events);
        }
        Ok(())
    }

    pub fn stand(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::PlayerTurn {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        let total = self.active_total().total;
        if self.deck_trait() == Some(TraitKind::PowerStance) && (total == 20 || total == BUST_LIMIT)
        {
            self.state.chips += 2;
            events.push(Event::TraitTriggered { chip_delta: 2 });
        }
        self.stand_from_turn(events)
    }

    pub fn can_double_down(&self) -> bool {
        self.state.phase == Phase::PlayerTurn
            && self.active_hand().len() == 2
            && self.state.chips >= self.active_bet()
            && !self.challenge_rules().disable_double
            && !self.active_doubled()
    }

    pub fn double_down(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::PlayerTurn {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        if self.challenge_rules().disable_double {
            return Err(RunError::ActionDisabled);
        }
        if !self.can_double_down() {
            return Err(RunError::CannotDoubleDown);
        }
        let extra = self.active_bet();
        match &mut self.split {
            Some(split) => {
                split.bets[split.active] *= 2;
                split.doubled[split.active] = true;
            }
            None => {
                self.state.current_bet *= 2;
                self.state.doubled_down = true;
            }
        }
        self.stats.doubles_played += 1;
        self.stats.record_wager(extra);
        self.draw_player_card(None, events)?;
        if self.active_total().total > BUST_LIMIT {
            return self.handle_player_bust(events);
        }
        self.stand_from_turn(events)
    }

    pub fn can_split(&self) -> bool {
        self.state.phase == Phase::PlayerTurn
            && self.split.is_none()
            && self.player_hand.len() == 2
            && self.player_hand[0].rank == self.player_hand[1].rank
            && self.state.chips >= self.state.current_bet
            && !self.challenge_rules().disable_split
    }

    pub fn split(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::PlayerTurn {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        if self.challenge_rules().disable_split {
            return Err(RunError::ActionDisabled);
        }
        if !self.can_split() {
            return Err(RunError::CannotSplit);
        }
        let second = self.player_hand.pop().ok_or(RunError::CannotSplit)?;
        let first = self.player_hand.pop().ok_or(RunError::CannotSplit)?;
        let split_aces = first.rank == crate::Rank::Ace;
        let bet = self.state.current_bet;
        self.split = Some(crate::SplitState {
            hands: [vec![first], vec![second]],
            bets: [bet, bet],
            doubled: [false, false],
            outcomes: [None, None],
            active: 0,
            split_aces,
        });
        self.stats.splits_played += 1;
        self.stats.record_wager(bet);
        self.draw_player_card(None, events)?;
        if let Some(split) = &mut self.split {
            split.active = 1;
        }
        self.draw_player_card(None, events)?;
        if let Some(split) = &mut self.split {
            split.active = 0;
        }
        if split_aces {
            // One card each, then both hands stand automatically.
            if let Some(split) = &mut self.split {
                split.active = 1;
            }
            self.state.message = "Aces split. One card each.".to_string();
            return self.dealer_turn(events);
        }
        self.state.message = "Playing first split hand.".to_string();
        Ok(())
    }

    /// Stand on the active hand: advance to the next split hand or hand the
    /// turn to the dealer.
    pub(super) fn stand_from_turn(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if let Some(split) = &mut self.split {
            if split.active == 0 {
                split.active = 1;
                self.state.message = "Playing second split hand.".to_string();
                return Ok(());
            }
        }
        self.dealer_turn(events)
    }

    /// A hand that went over the limit. Bust-prevention powers get one shot
    /// at cancelling or softening it before the hand is marked lost.
    pub(super) fn handle_player_bust(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.try_safety_net(events) {
            if self.active_total().total <= BUST_LIMIT {
                self.state.message = "Safety Net caught that card.".to_string();
                if self.active_doubled() {
                    return self.stand_from_turn(events);
                }
                return Ok(());
            }
        }
        self.try_insurance_refund(events);
        self.stats.busts += 1;
        if let Some(split) = &mut self.split {
            split.outcomes[split.active] = Some(Outcome::Lose);
            if split.active == 0 {
                split.active = 1;
                self.state.message = "Bust. Playing second split hand.".to_string();
                return Ok(());
            }
            let any_live = split.outcomes[0].is_none();
            if any_live {
                return self.dealer_turn(events);
            }
            self.reveal_hole_card(events);
            self.state.phase = Phase::Resolution;
            self.settle_split(events);
            return Ok(());
        }
        self.reveal_hole_card(events);
        self.state.phase = Phase::Resolution;
        self.settle_single(Outcome::Lose, events);
        Ok(())
    }
}
