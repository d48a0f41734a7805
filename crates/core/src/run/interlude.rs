use super::*;
use crate::{Event, EventBus, Rank, Rarity, Suit, TraitKind};

impl RunState {
    /// Leave the stage-complete screen and start the between-stage flow:
    /// power pick, card reward, deck shop, then challenges for the new stage.
    pub fn advance_stage(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.screen != Screen::StageComplete {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        self.state.stage += 1;
        self.state.stage_wins = 0;
        self.clear_stage_power_uses();
        self.adaptable_swap_used = false;
        self.state.blocked_power = None;
        let cap = self.config.power_tier_cap(self.state.stage);
        self.power_options = self.content.pick_powers(
            cap,
            &self.collected_powers,
            self.config.power_choices,
            &mut self.rng,
        );
        if self.power_options.is_empty() {
            self.offer_card_rewards(events);
        } else {
            self.set_screen(Screen::PowerSelection, events);
        }
        Ok(())
    }

    pub fn select_power(&mut self, id: &str, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.screen != Screen::PowerSelection {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        if !self.power_options.iter().any(|option| option == id) {
            return Err(RunError::InvalidSelection);
        }
        self.collected_powers.push(id.to_string());
        if self.equipped_powers.len() < self.config.max_equipped_powers {
            self.equipped_powers.push(id.to_string());
        }
        self.power_options.clear();
        self.offer_card_rewards(events);
        Ok(())
    }

    pub fn skip_power_selection(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.screen != Screen::PowerSelection {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        self.power_options.clear();
        self.offer_card_rewards(events);
        Ok(())
    }

    /// Swap a collected power into the equipped loadout.
    pub fn equip_power(&mut self, id: &str) -> Result<(), RunError> {
        if !self.collected_powers.iter().any(|power| power == id) {
            return Err(RunError::UnknownPower(id.to_string()));
        }
        if self.equipped_powers.iter().any(|power| power == id) {
            return Ok(());
        }
        if self.equipped_powers.len() >= self.config.max_equipped_powers {
            return Err(RunError::InvalidSelection);
        }
        self.equipped_powers.push(id.to_string());
        Ok(())
    }

    pub fn unequip_power(&mut self, id: &str) -> Result<(), RunError> {
        let idx = self
            .equipped_powers
            .iter()
            .position(|power| power == id)
            .ok_or_else(|| RunError::PowerNotEquipped(id.to_string()))?;
        self.equipped_powers.remove(idx);
        Ok(())
    }

    /// Deal out the stage's card-reward offers: standard cards with
    /// stage-weighted ranks, each rank offered at most once. Beating a boss
    /// forces rare special slots; later stages occasionally swap the last
    /// slot for a special card.
    fn offer_card_rewards(&mut self, events: &mut EventBus) {
        self.reward_options.clear();
        let forced_rare = self.pending_rare_offers;
        self.pending_rare_offers = 0;
        let count = self.config.shop.reward_options.max(forced_rare);
        let mut offered_ranks = Vec::new();
        for slot in 0..count {
            if slot < forced_rare {
                if let Some(id) = self.pick_unlocked_special(Rarity::Rare) {
                    self.reward_options.push(RewardOption::Special(id));
                    continue;
                }
            }
            let rank = self.roll_reward_rank(&offered_ranks);
            offered_ranks.push(rank);
            let suit = Suit::ALL[(self.rng.next_u64() % 4) as usize];
            self.reward_options
                .push(RewardOption::Standard(Card::standard(suit, rank)));
        }
        if self.state.stage >= 3 && self.rng.percent(10) {
            let rarity = self.roll_reward_rarity();
            if let Some(id) = self.pick_unlocked_special(rarity) {
                if let Some(last) = self.reward_options.last_mut() {
                    *last = RewardOption::Special(id);
                }
            }
        }
        if self.reward_options.is_empty() {
            self.set_screen(Screen::DeckShop, events);
        } else {
            self.set_screen(Screen::CardReward, events);
        }
    }

    /// Rank weights drift toward ten-value cards as the run goes on.
    fn roll_reward_rank(&mut self, offered: &[Rank]) -> Rank {
        const LOW: [Rank; 5] = [Rank::Two, Rank::Three, Rank::Four, Rank::Five, Rank::Six];
        const MID: [Rank; 4] = [Rank::Seven, Rank::Eight, Rank::Nine, Rank::Ace];
        const HIGH: [Rank; 4] = [Rank::Ten, Rank::Jack, Rank::Queen, Rank::King];
        let (low_weight, mid_weight) = match self.state.stage {
            0..=2 => (40u64, 40u64),
            3..=4 => (30, 40),
            5..=6 => (25, 35),
            _ => (20, 30),
        };
        let roll = self.rng.next_u64() % 100;
        let band: &[Rank] = if roll < low_weight {
            &LOW
        } else if roll < low_weight + mid_weight {
            &MID
        } else {
            &HIGH
        };
        let fresh: Vec<Rank> = band
            .iter()
            .copied()
            .filter(|rank| !offered.contains(rank))
            .collect();
        if let Some(idx) = self.rng.pick_index(fresh.len()) {
            return fresh[idx];
        }
        // Band exhausted: fall back to any rank not yet on offer.
        let remaining: Vec<Rank> = Rank::ALL
            .iter()
            .copied()
            .filter(|rank| !offered.contains(rank))
            .collect();
        match self.rng.pick_index(remaining.len()) {
            Some(idx) => remaining[idx],
            None => band[(self.rng.next_u64() % band.len() as u64) as usize],
        }
    }

    fn roll_reward_rarity(&mut self) -> Rarity {
        let roll = self.rng.next_u64() % 100;
        match self.state.stage {
            0..=3 => Rarity::Common,
            4..=5 => {
                if roll < 25 {
                    Rarity::Rare
                } else {
                    Rarity::Common
                }
            }
            _ => {
                if roll < 10 {
                    Rarity::Legendary
                } else if roll < 40 {
                    Rarity::Rare
                } else {
                    Rarity::Common
                }
            }
        }
    }

    fn pick_unlocked_special(&mut self, rarity: Rarity) -> Option<String> {
        let pool: Vec<String> = self
            .content
            .specials
            .iter()
            .filter(|def| def.rarity == rarity && self.meta.special_unlocked(&def.id))
            .map(|def| def.id.clone())
            .collect();
        match self.rng.pick_index(pool.len()) {
            Some(idx) => Some(pool[idx].clone()),
            None if rarity != Rarity::Common => self.pick_unlocked_special(Rarity::Common),
            None => None,
        }
    }

    pub fn select_card_reward(
        &mut self,
        index: usize,
        events: &mut EventBus,
    ) -> Result<(), RunError> {
        if self.state.screen != Screen::CardReward {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        let option = self
            .reward_options
            .get(index)
            .cloned()
            .ok_or(RunError::InvalidSelection)?;
        match option {
            RewardOption::Standard(card) => {
                self.state.message = format!("{} shuffled into your deck.", card.label());
                self.add_standard_to_deck(card);
            }
            RewardOption::Special(id) => {
                let def = self
                    .content
                    .special_by_id(&id)
                    .cloned()
                    .ok_or_else(|| RunError::UnknownSpecialCard(id.clone()))?;
                self.add_card_to_deck(&def);
                self.state.message = format!("{} shuffled into your deck.", def.name);
            }
        }
        self.reward_options.clear();
        self.set_screen(Screen::DeckShop, events);
        Ok(())
    }

    pub fn skip_card_reward(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.screen != Screen::CardReward {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        self.reward_options.clear();
        self.set_screen(Screen::DeckShop, events);
        Ok(())
    }

    /// Base cost after the stage's shop inflation, if any.
    pub fn shop_cost(&self, base: i64) -> i64 {
        base * self.challenge_rules().shop_cost_multiplier as i64
    }

    pub fn purchase_special(&mut self, id: &str, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.screen != Screen::DeckShop {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        let def = self
            .content
            .special_by_id(id)
            .cloned()
            .ok_or_else(|| RunError::UnknownSpecialCard(id.to_string()))?;
        if !self.meta.special_unlocked(id) {
            return Err(RunError::SpecialCardLocked(id.to_string()));
        }
        let cost = self.shop_cost(def.shop_cost);
        if self.state.chips < cost {
            return Err(RunError::NotEnoughChips);
        }
        self.state.chips -= cost;
        self.stats.chips_spent += cost;
        self.add_card_to_deck(&def);
        self.state.message = format!("Bought {} for {} chips.", def.name, cost);
        events.push(Event::SpecialTriggered {
            id: def.id,
            chip_delta: -cost,
        });
        Ok(())
    }

    /// Permanently remove one standard card from the deck recipe.
    pub fn remove_deck_card(
        &mut self,
        suit: Suit,
        rank: crate::Rank,
    ) -> Result<(), RunError> {
        if self.state.screen != Screen::DeckShop {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        if self.deck_size_after_edits() <= self.config.shop.min_deck_size {
            return Err(RunError::DeckAtMinimumSize);
        }
        let in_recipe = self
            .remaining_recipe()
            .iter()
            .any(|card| card.suit == suit && card.rank == rank);
        if !in_recipe {
            return Err(RunError::InvalidSelection);
        }
        let cost = self.shop_cost(self.config.shop.remove_card_cost);
        if self.state.chips < cost {
            return Err(RunError::NotEnoughChips);
        }
        self.state.chips -= cost;
        self.stats.chips_spent += cost;
        self.remove_recipe_card(suit, rank);
        Ok(())
    }

    /// Free once-per-stage card swap for decks with the adaptable trait:
    /// drop a chosen standard card, gain a random one.
    pub fn adaptable_swap(&mut self, suit: Suit, rank: crate::Rank) -> Result<(), RunError> {
        if self.state.screen != Screen::DeckShop {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        if self.deck_trait() != Some(TraitKind::Adaptable) {
            return Err(RunError::ActionDisabled);
        }
        if self.adaptable_swap_used {
            return Err(RunError::SwapAlreadyUsed);
        }
        let in_recipe = self
            .remaining_recipe()
            .iter()
            .any(|card| card.suit == suit && card.rank == rank);
        if !in_recipe {
            return Err(RunError::InvalidSelection);
        }
        self.adaptable_swap_used = true;
        self.remove_recipe_card(suit, rank);
        let new_suit = Suit::ALL[(self.rng.next_u64() % 4) as usize];
        let new_rank = crate::Rank::ALL[(self.rng.next_u64() % 13) as usize];
        self.add_standard_to_deck(Card::standard(new_suit, new_rank));
        self.state.message = format!(
            "Swapped out {}{} for {}{}.",
            rank.symbol(),
            suit.symbol(),
            new_rank.symbol(),
            new_suit.symbol()
        );
        Ok(())
    }

    pub fn leave_shop(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.screen != Screen::DeckShop {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        let count = self.config.challenge_count(self.state.stage);
        self.active_challenges = self.content.pick_challenges(count, &mut self.rng);
        self.stats.challenges_faced += self.active_challenges.len() as u32;
        for id in self.active_challenges.clone() {
            events.push(Event::ChallengeApplied { id });
        }
        if self.active_challenges.is_empty() {
            self.enter_stage(events);
        } else {
            self.set_screen(Screen::ChallengeScreen, events);
        }
        Ok(())
    }

    /// Buy a challenge off the table before the stage starts.
    pub fn remove_challenge(&mut self, id: &str, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.screen != Screen::ChallengeScreen {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        let def = self
            .content
            .challenge_by_id(id)
            .ok_or_else(|| RunError::UnknownChallenge(id.to_string()))?;
        let cost = def.remove_cost;
        let idx = self
            .active_challenges
            .iter()
            .position(|active| active == id)
            .ok_or(RunError::InvalidSelection)?;
        if self.state.chips < cost {
            return Err(RunError::NotEnoughChips);
        }
        self.state.chips -= cost;
        self.stats.chips_spent += cost;
        self.stats.challenges_removed += 1;
        self.active_challenges.remove(idx);
        events.push(Event::ChallengeRemoved {
            id: id.to_string(),
            cost,
        });
        Ok(())
    }

    pub fn proceed_to_stage(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.screen != Screen::ChallengeScreen {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        self.enter_stage(events);
        Ok(())
    }

    /// Acknowledge the boss intro and sit down at the table.
    pub fn begin_boss_stage(&mut self, events: &mut EventBus) -> Result<(), RunError> {
        if self.state.screen != Screen::BossIntro {
            return Err(RunError::WrongScreen(self.state.screen));
        }
        self.start_stage_play(events);
        Ok(())
    }

    fn enter_stage(&mut self, events: &mut EventBus) {
        self.poisoned_cards.clear();
        self.cursed_ace = None;
        for id in self.active_challenges.clone() {
            let Some(def) = self.content.challenge_by_id(&id).cloned() else {
                continue;
            };
            match def.effect {
                crate::ChallengeEffect::StageStartChipLoss(amount) => {
                    self.state.chips = (self.state.chips - amount).max(0);
                }
                crate::ChallengeEffect::BlindHands(count) => {
                    self.state.blind_hands_remaining = count;
                }
                crate::ChallengeEffect::BlockRandomPower => {
                    if let Some(idx) = self.rng.pick_index(self.equipped_powers.len()) {
                        self.state.blocked_power = Some(self.equipped_powers[idx].clone());
                    }
                }
                crate::ChallengeEffect::PoisonRandomCards { count, chips } => {
                    for _ in 0..count {
                        if let Some(idx) = self.rng.pick_index(self.deck.len()) {
                            let card = &self.deck.draw[idx];
                            self.poisoned_cards.push((card.suit, card.rank, chips));
                        }
                    }
                }
                crate::ChallengeEffect::CursedAce => {
                    let suits: Vec<Suit> = self
                        .deck
                        .draw
                        .iter()
                        .filter(|card| card.special.is_none() && card.rank == Rank::Ace)
                        .map(|card| card.suit)
                        .collect();
                    self.cursed_ace = match self.rng.pick_index(suits.len()) {
                        Some(idx) => Some(suits[idx]),
                        None => Some(Suit::Spades),
                    };
                }
                _ => {}
            }
        }
        if self.config.is_boss_stage(self.state.stage) {
            if let Some(boss) = self
                .content
                .boss_for_stage(self.state.stage)
                .cloned()
            {
                self.active_boss = Some(boss.id.clone());
                self.state.chips = (self.state.chips - boss.entry_chip_penalty).max(0);
                let mut deck = Deck::from_cards(boss.deck);
                deck.shuffle(&mut self.rng);
                self.boss_deck = Some(deck);
                self.state.message = boss.intro;
                events.push(Event::BossEngaged { id: boss.id });
                self.set_screen(Screen::BossIntro, events);
                return;
            }
        }
        self.start_stage_play(events);
    }

    fn start_stage_play(&mut self, events: &mut EventBus) {
        self.player_hand.clear();
        self.dealer_hand.clear();
        self.split = None;
        self.state.current_bet = 0;
        self.state.outcome = None;
        self.state.doubled_down = false;
        self.clear_hand_effects();
        if self.deck.len() < self.config.deck.regen_threshold {
            self.rebuild_player_deck();
        }
        self.state.phase = Phase::Betting;
        self.state.message = format!(
            "Stage {}: win {} hands.",
            self.state.stage,
            self.config.wins_required(self.state.stage)
        );
        self.set_screen(Screen::Game, events);
    }

    fn add_card_to_deck(&mut self, def: &crate::SpecialCardDef) {
        let card = self.content.instantiate_special(def, &mut self.rng);
        self.added_cards.push(card.clone());
        self.stats.cards_added += 1;
        self.insert_into_pile(card);
    }

    fn add_standard_to_deck(&mut self, card: Card) {
        self.added_cards.push(card.clone());
        self.stats.cards_added += 1;
        self.insert_into_pile(card);
    }

    fn remove_recipe_card(&mut self, suit: Suit, rank: crate::Rank) {
        self.removed_cards.push(Card::standard(suit, rank));
        self.stats.cards_removed += 1;
        if let Some(idx) = self
            .deck
            .draw
            .iter()
            .position(|card| card.special.is_none() && card.suit == suit && card.rank == rank)
        {
            self.deck.draw.remove(idx);
        }
    }

    fn insert_into_pile(&mut self, card: Card) {
        let pos = self
            .rng
            .pick_index(self.deck.len() + 1)
            .unwrap_or(0);
        self.deck.draw.insert(pos, card);
    }
}
