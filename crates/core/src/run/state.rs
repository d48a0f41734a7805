use super::*;
use crate::{BossDef, Event, EventBus, StarterDeckDef, TiePolicy, TraitKind};

impl RunState {
    pub fn new(config: GameConfig, content: Content, meta: MetaProgress, seed: u64) -> Self {
        Self {
            config,
            content,
            rng: RngState::from_seed(seed),
            meta,
            deck: Deck::default(),
            boss_deck: None,
            player_hand: Vec::new(),
            dealer_hand: Vec::new(),
            split: None,
            state: GameState::new(),
            stats: RunStats::default(),
            active_deck: None,
            collected_powers: Vec::new(),
            equipped_powers: Vec::new(),
            active_challenges: Vec::new(),
            active_boss: None,
            power_options: Vec::new(),
            reward_options: Vec::new(),
            removed_cards: Vec::new(),
            added_cards: Vec::new(),
            quick_peek: None,
            card_count: None,
            swap_armed: false,
            lucky_draw: None,
            dealer_frozen: false,
            dealer_pressured: false,
            last_drawn_value: None,
            poisoned_cards: Vec::new(),
            cursed_ace: None,
            power_uses_hand: HashMap::new(),
            power_uses_stage: HashMap::new(),
            power_uses_run: HashMap::new(),
            stacked_deck_armed: false,
            loaded_dice_armed: false,
            dealers_tell_armed: false,
            blind_hand: false,
            insurance_refund: 0,
            adaptable_swap_used: false,
            pending_rare_offers: 0,
            resurrect_spent: false,
            run_started: None,
        }
    }

    /// Starter deck ids the current profile may pick from.
    pub fn available_decks(&self) -> Vec<&StarterDeckDef> {
        self.content
            .decks
            .iter()
            .filter(|deck| self.meta.deck_unlocked(&deck.id))
            .collect()
    }

    pub fn start_run(&mut self, deck_id: &str, events: &mut EventBus) -> Result<(), RunError> {
        let def = self
            .content
            .deck_by_id(deck_id)
            .ok_or_else(|| RunError::UnknownDeck(deck_id.to_string()))?
            .clone();
        if !self.meta.deck_unlocked(deck_id) {
            return Err(RunError::DeckLocked(deck_id.to_string()));
        }
        self.state = GameState::new();
        self.state.chips = def.starting_chips;
        self.state.edge = def.starting_edge;
        self.state.max_edge = def.max_edge;
        self.state.screen = Screen::Game;
        self.state.phase = Phase::Betting;
        self.state.message = format!("Stage 1. Place your bet ({} chips).", self.state.chips);
        self.stats = RunStats::default();
        self.stats.record_chips(self.state.chips);
        self.active_deck = Some(def.id.clone());
        self.collected_powers.clear();
        self.equipped_powers.clear();
        self.active_challenges.clear();
        self.active_boss = None;
        self.boss_deck = None;
        self.power_options.clear();
        self.reward_options.clear();
        self.removed_cards.clear();
        self.added_cards.clear();
        self.power_uses_hand.clear();
        self.power_uses_stage.clear();
        self.power_uses_run.clear();
        self.split = None;
        self.player_hand.clear();
        self.dealer_hand.clear();
        self.clear_hand_effects();
        self.adaptable_swap_used = false;
        self.pending_rare_offers = 0;
        self.resurrect_spent = false;
        self.last_drawn_value = None;
        self.poisoned_cards.clear();
        self.cursed_ace = None;
        self.run_started = Some(Instant::now());
        self.rebuild_player_deck();
        events.push(Event::RunStarted {
            deck: def.id,
            seed: self.rng.seed(),
            chips: self.state.chips,
        });
        events.push(Event::ScreenChanged {
            screen: Screen::Game,
        });
        Ok(())
    }

    /// Abandon any run in progress and return to the lobby. Meta progression
    /// is kept; the abandoned run earns nothing.
    pub fn reset_game(&mut self, events: &mut EventBus) {
        self.active_deck = None;
        self.state = GameState::new();
        self.state.screen = Screen::Lobby;
        self.player_hand.clear();
        self.dealer_hand.clear();
        self.split = None;
        self.boss_deck = None;
        self.active_boss = None;
        self.active_challenges.clear();
        self.clear_hand_effects();
        events.push(Event::ScreenChanged {
            screen: Screen::Lobby,
        });
    }

    pub(super) fn active_deck_def(&self) -> Option<&StarterDeckDef> {
        let id = self.active_deck.as_deref()?;
        self.content.deck_by_id(id)
    }

    pub(super) fn deck_trait(&self) -> Option<TraitKind> {
        self.active_deck_def().map(|deck| deck.deck_trait)
    }

    pub(super) fn boss_def(&self) -> Option<&BossDef> {
        let id = self.active_boss.as_deref()?;
        self.content.boss_by_id(id)
    }

    /// Stand value and soft-17 behavior for the current dealer.
    pub(super) fn dealer_behavior(&self) -> (i64, bool) {
        match self.boss_def() {
            Some(boss) => (boss.stand_value, boss.hits_soft_17),
            None => (self.config.table.dealer_stand_value, false),
        }
    }

    pub(super) fn showdown_rules(&self) -> crate::ShowdownRules {
        crate::ShowdownRules {
            dealer_wins_pushes: self.challenge_rules().dealer_wins_pushes,
            tie_policy: self
                .boss_def()
                .map(|boss| boss.tie_policy)
                .unwrap_or(TiePolicy::Push),
        }
    }

    /// Table minimum, overridden by a stage challenge when present.
    pub fn min_bet(&self) -> i64 {
        self.challenge_rules()
            .min_bet
            .unwrap_or(self.config.table.min_bet)
    }

    pub(super) fn gain_edge(&mut self, amount: i64, events: &mut EventBus) {
        if amount <= 0 {
            return;
        }
        let next = (self.state.edge + amount).min(self.state.max_edge);
        if next != self.state.edge {
            self.state.edge = next;
            events.push(Event::EdgeChanged {
                edge: self.state.edge,
            });
        }
    }

    pub(super) fn spend_edge(&mut self, amount: i64, events: &mut EventBus) {
        self.state.edge = (self.state.edge - amount).max(0);
        events.push(Event::EdgeChanged {
            edge: self.state.edge,
        });
    }

    /// The starter recipe minus removed cards, before run additions.
    pub(super) fn remaining_recipe(&self) -> Vec<Card> {
        let mut recipe: Vec<Card> = self
            .active_deck_def()
            .map(|deck| deck.recipe.clone())
            .unwrap_or_default();
        for removed in &self.removed_cards {
            if let Some(idx) = recipe
                .iter()
                .position(|card| card.suit == removed.suit && card.rank == removed.rank)
            {
                recipe.remove(idx);
            }
        }
        recipe
    }

    pub(super) fn deck_size_after_edits(&self) -> usize {
        self.remaining_recipe().len() + self.added_cards.len()
    }

    /// Rebuild the draw pile from the edited recipe and shuffle it. Only done
    /// between hands so in-play cards are never duplicated mid-hand.
    pub(super) fn rebuild_player_deck(&mut self) {
        let mut cards = self.remaining_recipe();
        let starter_specials: Vec<String> = self
            .active_deck_def()
            .map(|deck| deck.specials.clone())
            .unwrap_or_default();
        for id in starter_specials {
            if let Some(def) = self.content.special_by_id(&id).cloned() {
                cards.push(self.content.instantiate_special(&def, &mut self.rng));
            }
        }
        cards.extend(self.added_cards.iter().cloned());
        let mut deck = Deck::from_cards(cards);
        deck.shuffle(&mut self.rng);
        self.deck = deck;
    }

    /// Anything scoped to a single hand.
    pub(super) fn clear_hand_effects(&mut self) {
        self.quick_peek = None;
        self.card_count = None;
        self.swap_armed = false;
        self.lucky_draw = None;
        self.dealer_frozen = false;
        self.dealer_pressured = false;
        self.stacked_deck_armed = false;
        self.loaded_dice_armed = false;
        self.dealers_tell_armed = false;
        self.blind_hand = false;
        self.insurance_refund = 0;
        self.power_uses_hand.clear();
    }

    pub(super) fn active_hand(&self) -> &Vec<Card> {
        match &self.split {
            Some(split) => split.active_hand(),
            None => &self.player_hand,
        }
    }

    pub(super) fn active_hand_mut(&mut self) -> &mut Vec<Card> {
        match &mut self.split {
            Some(split) => split.active_hand_mut(),
            None => &mut self.player_hand,
        }
    }

    pub(super) fn active_bet(&self) -> i64 {
        match &self.split {
            Some(split) => split.bets[split.active],
            None => self.state.current_bet,
        }
    }

    pub(super) fn active_doubled(&self) -> bool {
        match &self.split {
            Some(split) => split.doubled[split.active],
            None => self.state.doubled_down,
        }
    }

    /// Special card definitions present in a hand, in draw order.
    pub(super) fn specials_in<'a>(&'a self, cards: &'a [Card]) -> Vec<&'a crate::SpecialCardDef> {
        cards
            .iter()
            .filter_map(|card| card.special.as_deref())
            .filter_map(|id| self.content.special_by_id(id))
            .collect()
    }

    pub(super) fn record_power_use(&mut self, id: &str) {
        *self.power_uses_hand.entry(id.to_string()).or_insert(0) += 1;
        *self.power_uses_stage.entry(id.to_string()).or_insert(0) += 1;
        *self.power_uses_run.entry(id.to_string()).or_insert(0) += 1;
    }

    pub(super) fn power_uses(&self, id: &str) -> (u32, u32, u32) {
        (
            self.power_uses_hand.get(id).copied().unwrap_or(0),
            self.power_uses_stage.get(id).copied().unwrap_or(0),
            self.power_uses_run.get(id).copied().unwrap_or(0),
        )
    }

    pub(super) fn clear_stage_power_uses(&mut self) {
        self.power_uses_stage.clear();
    }
}
