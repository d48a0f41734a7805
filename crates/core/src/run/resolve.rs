use super::*;
use crate::{
    BossReward, ChipLedger, Event, EventBus, Outcome, PayoutOverride, RuleSource, SpecialCardDef,
    SpecialEffect, SpecialTrigger, TraitKind,
};

impl RunState {
    pub(super) fn settle_single(&mut self, outcome: Outcome, events: &mut EventBus) {
        self.reveal_player_cards();
        let bet = self.state.current_bet;
        let cards = self.player_hand.clone();
        let doubled = self.state.doubled_down;
        let delta = self.settle_hand(outcome, bet, doubled, &cards, events);
        self.state.outcome = Some(outcome);
        self.state.chips = (self.state.chips + delta).max(0);
        self.stats.record_outcome(outcome, delta);
        self.state.message = match outcome {
            Outcome::Blackjack => format!("Blackjack! +{} chips.", delta),
            Outcome::Win => format!("You win. +{} chips.", delta),
            Outcome::Push => "Push.".to_string(),
            Outcome::Lose => format!("You lose. {} chips.", delta),
        };
        events.push(Event::HandResolved {
            outcome,
            chip_delta: delta,
            chips: self.state.chips,
        });
        self.after_resolution(outcome.is_win(), events);
    }

    pub(super) fn settle_split(&mut self, events: &mut EventBus) {
        self.reveal_player_cards();
        let Some(split) = self.split.clone() else {
            return;
        };
        let mut total_delta = 0;
        let mut any_win = false;
        let mut all_push = true;
        for idx in 0..2 {
            let outcome = split.outcomes[idx].unwrap_or(Outcome::Push);
            let delta = self.settle_hand(
                outcome,
                split.bets[idx],
                split.doubled[idx],
                &split.hands[idx],
                events,
            );
            total_delta += delta;
            any_win |= outcome.is_win();
            all_push &= outcome == Outcome::Push;
            self.stats.record_outcome(outcome, delta);
            events.push(Event::SplitHandResolved {
                hand: idx,
                outcome,
                chip_delta: delta,
            });
        }
        let overall = if any_win {
            Outcome::Win
        } else if all_push {
            Outcome::Push
        } else {
            Outcome::Lose
        };
        self.state.outcome = Some(overall);
        self.state.chips = (self.state.chips + total_delta).max(0);
        self.state.message = format!("Split hands settle for {} chips.", total_delta);
        events.push(Event::HandResolved {
            outcome: overall,
            chip_delta: total_delta,
            chips: self.state.chips,
        });
        self.after_resolution(any_win, events);
    }

    /// Chip delta for one settled hand: base payout through the override
    /// pipeline, then every summed adjustment from specials and modifiers.
    fn settle_hand(
        &mut self,
        outcome: Outcome,
        bet: i64,
        doubled: bool,
        cards: &[Card],
        events: &mut EventBus,
    ) -> i64 {
        let rules = self.challenge_rules();
        let deck_trait = self.deck_trait();
        let specials: Vec<SpecialCardDef> =
            self.specials_in(cards).into_iter().cloned().collect();
        let mut ledger = ChipLedger::default();
        let base = match outcome {
            Outcome::Blackjack => {
                let mut payout = PayoutOverride::baseline(self.config.table.blackjack_payout);
                if deck_trait == Some(TraitKind::AceInTheHole) {
                    payout.apply(2.0, RuleSource::DeckTrait);
                }
                for def in &specials {
                    if def.trigger == SpecialTrigger::OnBlackjack {
                        if let SpecialEffect::BonusPayout { payout: mult } = def.effect {
                            payout.apply(mult, RuleSource::Special);
                        }
                    }
                }
                let mut win = (bet as f64 * payout.multiplier).floor() as i64;
                if let Some(tax) = rules.win_tax {
                    win = (win as f64 * tax).floor() as i64;
                }
                win
            }
            Outcome::Win => {
                let mut payout = PayoutOverride::baseline(1.0);
                // All or Nothing pays against the bet as placed, before the
                // double staked it again.
                let mut stake = bet;
                if doubled && deck_trait == Some(TraitKind::AllOrNothing) {
                    payout.apply(3.0, RuleSource::DeckTrait);
                    stake = bet / 2;
                }
                let mut win = (stake as f64 * payout.multiplier).floor() as i64;
                if let Some(tax) = rules.win_tax {
                    win = (win as f64 * tax).floor() as i64;
                }
                win
            }
            Outcome::Push => 0,
            Outcome::Lose => {
                if let Some(boss) = self.boss_def() {
                    if boss.extra_chip_loss > 0 {
                        ledger.add(RuleSource::Boss, -boss.extra_chip_loss);
                    }
                }
                if doubled && deck_trait == Some(TraitKind::AllOrNothing) {
                    let surcharge = ((bet / 2) as f64 * 0.25).ceil() as i64;
                    ledger.add(RuleSource::DeckTrait, -surcharge);
                }
                -bet
            }
        };
        for def in &specials {
            let fires = match (def.trigger, outcome) {
                (SpecialTrigger::OnWin, Outcome::Win | Outcome::Blackjack) => true,
                (SpecialTrigger::OnLose, Outcome::Lose) => true,
                (SpecialTrigger::OnBlackjack, Outcome::Blackjack) => true,
                _ => false,
            };
            if !fires {
                continue;
            }
            let mut chip_delta = 0;
            match def.effect {
                SpecialEffect::ChipBonus(amount) => {
                    chip_delta = amount;
                    ledger.add(RuleSource::Special, amount);
                }
                SpecialEffect::EdgeBonus(amount) => self.gain_edge(amount, events),
                SpecialEffect::BetRefund { percent } => {
                    let refund = bet * percent as i64 / 100;
                    chip_delta = refund;
                    ledger.add(RuleSource::Special, refund);
                }
                _ => {}
            }
            events.push(Event::SpecialTriggered {
                id: def.id.clone(),
                chip_delta,
            });
        }
        if outcome == Outcome::Lose && self.insurance_refund > 0 {
            ledger.add(RuleSource::Power, self.insurance_refund);
            self.insurance_refund = 0;
        }
        base + ledger.total()
    }

    fn after_resolution(&mut self, won: bool, events: &mut EventBus) {
        let regen_blocked = self.challenge_rules().edge_on_win_only && !won;
        if !regen_blocked {
            self.gain_edge(self.config.edge.regen_per_hand, events);
        }
        self.stats.record_chips(self.state.chips);
        if won {
            self.state.stage_wins += 1;
        }
        if self.state.chips <= 0 {
            if let Some(restore) = self.try_resurrect() {
                self.state.chips = restore;
                self.state.message =
                    format!("The phoenix rises. Back to {} chips.", restore);
            } else {
                self.state.phase = Phase::GameOver;
                self.finalize_run(false, events);
                return;
            }
        }
        if self.state.stage_wins >= self.config.wins_required(self.state.stage) {
            self.stage_cleared(events);
        }
    }

    fn stage_cleared(&mut self, events: &mut EventBus) {
        self.stats.stages_cleared += 1;
        self.gain_edge(self.config.edge.stage_clear_bonus, events);
        events.push(Event::StageCleared {
            stage: self.state.stage,
        });
        let mut victory = self.state.stage >= self.config.max_stage();
        if let Some(boss) = self.boss_def().cloned() {
            self.stats.bosses_defeated += 1;
            for reward in &boss.rewards {
                match *reward {
                    BossReward::Chips(amount) => self.state.chips += amount,
                    BossReward::MaxEdgeBoost(amount) => self.state.max_edge += amount,
                    BossReward::Victory => victory = true,
                }
            }
            self.pending_rare_offers = boss.rare_card_offers;
            self.active_boss = None;
            self.boss_deck = None;
            events.push(Event::BossDefeated { id: boss.id });
        }
        if victory {
            self.state.phase = Phase::GameOver;
            self.set_screen(Screen::Victory, events);
            self.finalize_run(true, events);
            return;
        }
        self.set_screen(Screen::StageComplete, events);
        self.state.message = format!("Stage {} cleared.", self.state.stage);
    }

    fn try_resurrect(&mut self) -> Option<i64> {
        if self.resurrect_spent {
            return None;
        }
        let restore = self
            .deck
            .draw
            .iter()
            .chain(self.player_hand.iter())
            .chain(self.added_cards.iter())
            .filter_map(|card| card.special.as_deref())
            .filter_map(|id| self.content.special_by_id(id))
            .find_map(|def| match def.effect {
                SpecialEffect::Resurrect { restore } => Some(restore),
                _ => None,
            });
        if restore.is_some() {
            self.resurrect_spent = true;
        }
        restore
    }

    /// Clear the table for the next bet. Lean piles are rebuilt between
    /// hands so a hand can never start on fumes.
    pub fn reset_hand(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::Resolution {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        self.player_hand.clear();
        self.dealer_hand.clear();
        self.split = None;
        self.state.current_bet = 0;
        self.state.outcome = None;
        self.state.doubled_down = false;
        self.clear_hand_effects();
        if self.boss_deck.is_some() {
            if self
                .boss_deck
                .as_ref()
                .is_some_and(|deck| deck.len() < self.config.deck.boss_reshuffle_threshold)
            {
                self.reshuffle_boss_deck();
            }
        }
        if self.deck.len() < self.config.deck.regen_threshold {
            self.rebuild_player_deck();
        }
        self.state.phase = Phase::Betting;
        self.state.message = format!(
            "Stage {}: {} of {} wins. Place your bet.",
            self.state.stage,
            self.state.stage_wins,
            self.config.wins_required(self.state.stage)
        );
        events.push(Event::EdgeChanged {
            edge: self.state.edge,
        });
        Ok(())
    }

    pub(super) fn finalize_run(&mut self, victory: bool, events: &mut EventBus) {
        let duration_ms = self
            .run_started
            .take()
            .map(|started| started.elapsed().as_millis() as u64);
        let stage = self.state.stage;
        let deck_id = self.active_deck.clone().unwrap_or_default();
        let (earnings, unlocked) = self.meta.absorb_run(
            &self.content,
            &self.stats,
            &deck_id,
            stage,
            victory,
            duration_ms,
        );
        let dust_earned: i64 = earnings.iter().map(|entry| entry.amount).sum();
        if victory {
            self.set_screen(Screen::Victory, events);
            self.state.message = format!("The house falls. +{} dust.", dust_earned);
        } else {
            self.set_screen(Screen::GameOver, events);
            self.state.message = format!("Out of chips. +{} dust.", dust_earned);
        }
        self.state.phase = Phase::GameOver;
        events.push(Event::RunEnded {
            victory,
            dust_earned,
        });
        for id in unlocked {
            events.push(Event::DeckUnlocked { id });
        }
    }

    pub(super) fn set_screen(&mut self, screen: Screen, events: &mut EventBus) {
        if self.state.screen != screen {
            self.state.screen = screen;
            events.push(Event::ScreenChanged { screen });
        }
    }
}
