use super::*;
use crate::{Event, EventBus, PowerDef, PowerEffect, PowerTiming, ValuePolicy, BUST_LIMIT};

impl RunState {
    fn effective_power_cost(&self, def: &PowerDef) -> i64 {
        def.cost + self.challenge_rules().edge_cost_increase
    }

    /// Everything except timing: equipped, not blocked, uses left, edge up.
    fn power_gate(&self, def: &PowerDef) -> Result<(), RunError> {
        if !self.equipped_powers.iter().any(|id| id == &def.id) {
            return Err(RunError::PowerNotEquipped(def.id.clone()));
        }
        if self.state.blocked_power.as_deref() == Some(def.id.as_str()) {
            return Err(RunError::PowerBlocked(def.id.clone()));
        }
        let (hand, stage, run) = self.power_uses(&def.id);
        let exhausted = def.uses_per_hand.is_some_and(|cap| hand >= cap)
            || def.uses_per_stage.is_some_and(|cap| stage >= cap)
            || def.uses_per_run.is_some_and(|cap| run >= cap);
        if exhausted {
            return Err(RunError::PowerExhausted(def.id.clone()));
        }
        if self.state.edge < self.effective_power_cost(def) {
            return Err(RunError::NotEnoughEdge);
        }
        Ok(())
    }

    fn power_timing_ok(&self, def: &PowerDef) -> bool {
        match def.timing {
            PowerTiming::PreDeal => self.state.phase == Phase::Betting,
            // Pre-dealer powers arm an effect consumed when the dealer acts.
            PowerTiming::PlayerTurn | PowerTiming::PreDealer => {
                self.state.phase == Phase::PlayerTurn
            }
            PowerTiming::OnBust => false,
        }
    }

    pub fn can_use_power(&self, id: &str) -> bool {
        let Some(def) = self.content.power_by_id(id) else {
            return false;
        };
        self.power_timing_ok(def) && self.power_gate(def).is_ok()
    }

    pub fn use_power(&mut self, id: &str, events: &mut EventBus) -> Result<(), RunError> {
        let def = self
            .content
            .power_by_id(id)
            .cloned()
            .ok_or_else(|| RunError::UnknownPower(id.to_string()))?;
        self.power_gate(&def)?;
        if !self.power_timing_ok(&def) {
            return Err(RunError::PowerNotUsableNow(def.id));
        }
        match def.effect {
            PowerEffect::Swap if self.swap_armed => {
                return Err(RunError::PowerNotUsableNow(def.id))
            }
            PowerEffect::LuckyDraw if self.lucky_draw.is_some() => {
                return Err(RunError::PowerNotUsableNow(def.id))
            }
            PowerEffect::DoubleAgent if self.split.is_some() => {
                return Err(RunError::PowerNotUsableNow(def.id))
            }
            _ => {}
        }
        let cost = self.effective_power_cost(&def);
        self.spend_edge(cost, events);
        self.record_power_use(&def.id);
        self.stats.record_power_use(cost);
        events.push(Event::PowerUsed {
            id: def.id.clone(),
            cost,
        });
        self.execute_power(&def, events)
    }

    fn execute_power(&mut self, def: &PowerDef, events: &mut EventBus) -> Result<(), RunError> {
        match def.effect {
            PowerEffect::Peek => self.reveal_hole_card(events),
            PowerEffect::CardCount => {
                self.card_count = Some(self.deck.count_value(10));
                self.state.message =
                    format!("{} ten-value cards left in your deck.", self.deck.count_value(10));
            }
            PowerEffect::QuickPeek => {
                self.quick_peek = self.deck.peek_top().cloned();
            }
            PowerEffect::Swap => self.swap_armed = true,
            PowerEffect::Pressure => self.dealer_pressured = true,
            PowerEffect::LuckyDraw => {
                if self.deck.len() < 2 {
                    self.rebuild_player_deck();
                }
                let first = self.deck.draw_card().ok_or(RunError::DeckExhausted)?;
                let second = self.deck.draw_card().ok_or(RunError::DeckExhausted)?;
                self.lucky_draw = Some([first, second]);
            }
            PowerEffect::Freeze => self.dealer_frozen = true,
            PowerEffect::StackedDeck => self.stacked_deck_armed = true,
            PowerEffect::DealersTell => self.dealers_tell_armed = true,
            PowerEffect::LoadedDice => self.loaded_dice_armed = true,
            PowerEffect::DoubleAgent => {
                std::mem::swap(&mut self.player_hand, &mut self.dealer_hand);
                for card in &mut self.player_hand {
                    card.face_up = true;
                }
                if let Some(card) = self.dealer_hand.get_mut(1) {
                    card.face_up = false;
                }
                self.state.message = "Hands traded under the table.".to_string();
            }
            PowerEffect::PerfectShuffle => {
                let mut deck = std::mem::take(&mut self.deck);
                deck.shuffle(&mut self.rng);
                self.deck = deck;
            }
            // Auto-triggered from the bust path, never by intent.
            PowerEffect::SafetyNet | PowerEffect::InsurancePlus => {}
            // TODO: implement hand rewind for these two; needs a pre-deal
            // snapshot of the deck and both hands.
            PowerEffect::SecondChance | PowerEffect::TimeWarp => {
                events.push(Event::PowerFizzled {
                    id: def.id.clone(),
                });
                self.state.message = format!("{} sputters and fails.", def.name);
            }
        }
        Ok(())
    }

    /// Resolve a pending lucky draw: keep one card, bury the other.
    pub fn select_lucky_card(
        &mut self,
        choice: usize,
        events: &mut EventBus,
    ) -> Result<(), RunError> {
        if self.state.phase != Phase::PlayerTurn {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        if self.lucky_draw.is_none() {
            return Err(RunError::NothingPending);
        }
        if choice > 1 {
            return Err(RunError::InvalidSelection);
        }
        let [first, second] = self.lucky_draw.take().ok_or(RunError::NothingPending)?;
        let (chosen, rejected) = if choice == 0 {
            (first, second)
        } else {
            (second, first)
        };
        self.deck.push_bottom(rejected);
        self.admit_player_card(chosen, events);
        let total = self.active_total().total;
        if total > BUST_LIMIT {
            return self.handle_player_bust(events);
        }
        if total == BUST_LIMIT {
            return self.stand(events);
        }
        Ok(())
    }

    /// Trade a hand card for the top of the deck. The replaced card goes
    /// back on top, so it is the next card drawn.
    pub fn execute_swap(&mut self, card_index: usize, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.phase != Phase::PlayerTurn {
            return Err(RunError::InvalidPhase(self.state.phase));
        }
        if !self.swap_armed {
            return Err(RunError::NothingPending);
        }
        if card_index >= self.active_hand().len() {
            return Err(RunError::InvalidSelection);
        }
        if self.deck.is_empty() {
            self.rebuild_player_deck();
        }
        let mut replacement = self.deck.draw_card().ok_or(RunError::DeckExhausted)?;
        self.swap_armed = false;
        if let Some(id) = replacement.special.as_deref() {
            let copies_last = self
                .content
                .special_by_id(id)
                .map(|def| def.value == ValuePolicy::CopyLast)
                .unwrap_or(false);
            if copies_last && replacement.value_override.is_none() {
                replacement.value_override = Some(
                    self.last_drawn_value
                        .unwrap_or_else(|| replacement.rank.base_value()),
                );
            }
        }
        if self.blind_hand {
            replacement.face_up = false;
        }
        self.last_drawn_value = Some(replacement.value());
        let old = std::mem::replace(&mut self.active_hand_mut()[card_index], replacement);
        self.deck.push_top(old);
        if self.active_total().total > BUST_LIMIT {
            return self.handle_player_bust(events);
        }
        Ok(())
    }

    /// Automatic bust cancel: pull the busting card back out of the hand.
    pub(super) fn try_safety_net(&mut self, events: &mut EventBus) -> bool {
        self.try_on_bust_power(PowerEffect::SafetyNet, events)
            .map(|_| {
                if let Some(card) = self.active_hand_mut().pop() {
                    self.deck.push_bottom(card);
                }
            })
            .is_some()
    }

    /// Automatic bust soften: half the bet comes back when the hand settles.
    pub(super) fn try_insurance_refund(&mut self, events: &mut EventBus) {
        if self
            .try_on_bust_power(PowerEffect::InsurancePlus, events)
            .is_some()
        {
            self.insurance_refund = self.active_bet() / 2;
        }
    }

    fn try_on_bust_power(&mut self, effect: PowerEffect, events: &mut EventBus) -> Option<()> {
        let def = self
            .equipped_powers
            .iter()
            .filter_map(|id| self.content.power_by_id(id))
            .find(|def| def.effect == effect && def.timing == PowerTiming::OnBust)
            .cloned()?;
        if self.power_gate(&def).is_err() {
            return None;
        }
        let cost = self.effective_power_cost(&def);
        self.spend_edge(cost, events);
        self.record_power_use(&def.id);
        self.stats.record_power_use(cost);
        self.stats.clutch_saves += 1;
        events.push(Event::PowerUsed { id: def.id, cost });
        Some(())
    }
}
