use crate::{
    Card, ChallengeEffect, Content, Deck, GameConfig, GameState, MetaProgress, Phase, Rank,
    RngState, RunStats, Screen, SplitState, Suit,
};
use std::collections::HashMap;
use std::time::Instant;
use thiserror::Error;

mod state;
mod betting;
mod player;
mod dealer;
mod resolve;
mod powers;
mod interlude;

#[derive(Debug, Error)]
pub enum RunError {
    #[error("invalid phase: {0:?}")]
    InvalidPhase(Phase),
    #[error("wrong screen: {0:?}")]
    WrongScreen(Screen),
    #[error("no run in progress")]
    NoRunInProgress,
    #[error("no bet placed")]
    NoBetPlaced,
    #[error("bet below table minimum")]
    BetBelowMinimum,
    #[error("not enough chips")]
    NotEnoughChips,
    #[error("not enough edge")]
    NotEnoughEdge,
    #[error("unknown power: {0}")]
    UnknownPower(String),
    #[error("unknown special card: {0}")]
    UnknownSpecialCard(String),
    #[error("unknown challenge: {0}")]
    UnknownChallenge(String),
    #[error("unknown deck: {0}")]
    UnknownDeck(String),
    #[error("deck is locked: {0}")]
    DeckLocked(String),
    #[error("special card is locked: {0}")]
    SpecialCardLocked(String),
    #[error("power not equipped: {0}")]
    PowerNotEquipped(String),
    #[error("power exhausted: {0}")]
    PowerExhausted(String),
    #[error("power blocked this stage: {0}")]
    PowerBlocked(String),
    #[error("power cannot be used now: {0}")]
    PowerNotUsableNow(String),
    #[error("action disabled by a challenge")]
    ActionDisabled,
    #[error("invalid selection")]
    InvalidSelection,
    #[error("nothing pending")]
    NothingPending,
    #[error("cannot double down")]
    CannotDoubleDown,
    #[error("cannot split")]
    CannotSplit,
    #[error("deck cannot shrink further")]
    DeckAtMinimumSize,
    #[error("draw pile exhausted")]
    DeckExhausted,
    #[error("swap already used this stage")]
    SwapAlreadyUsed,
}

/// One slot on the card-reward screen: usually a standard card with a
/// stage-weighted rank, occasionally a special card.
#[derive(Debug, Clone, PartialEq)]
pub enum RewardOption {
    Standard(Card),
    Special(String),
}

/// Aggregate view of the active stage challenges. Rebuilt on demand from the
/// challenge ids so removing a challenge needs no bookkeeping.
#[derive(Debug, Default, Clone)]
pub struct ChallengeRules {
    pub min_bet: Option<i64>,
    pub disable_double: bool,
    pub disable_split: bool,
    pub max_hand_size: Option<usize>,
    pub dealer_wins_pushes: bool,
    pub win_tax: Option<f64>,
    pub shop_cost_multiplier: u32,
    pub edge_cost_increase: i64,
    pub edge_on_win_only: bool,
    pub card_draw_costs: Vec<(Rank, i64)>,
}

/// A whole single-player run: table state, decks, powers, stage modifiers,
/// and meta progression. Intents return `Err` without touching state.
#[derive(Debug)]
pub struct RunState {
    pub config: GameConfig,
    pub content: Content,
    pub rng: RngState,
    pub meta: MetaProgress,
    pub deck: Deck,
    pub boss_deck: Option<Deck>,
    pub player_hand: Vec<Card>,
    pub dealer_hand: Vec<Card>,
    pub split: Option<SplitState>,
    pub state: GameState,
    pub stats: RunStats,
    pub active_deck: Option<String>,
    pub collected_powers: Vec<String>,
    pub equipped_powers: Vec<String>,
    pub active_challenges: Vec<String>,
    pub active_boss: Option<String>,
    /// Power ids offered on the power-selection screen.
    pub power_options: Vec<String>,
    /// Cards offered on the card-reward screen.
    pub reward_options: Vec<RewardOption>,
    /// Permanent deck edits, reapplied whenever the pile is rebuilt.
    pub removed_cards: Vec<Card>,
    pub added_cards: Vec<Card>,
    /// Top of the draw pile, previewed for this hand.
    pub quick_peek: Option<Card>,
    pub card_count: Option<usize>,
    pub swap_armed: bool,
    pub lucky_draw: Option<[Card; 2]>,
    pub dealer_frozen: bool,
    pub dealer_pressured: bool,
    pub last_drawn_value: Option<i64>,
    /// Stage-scoped card curses rolled at stage entry.
    pub poisoned_cards: Vec<(Suit, Rank, i64)>,
    pub cursed_ace: Option<Suit>,
    power_uses_hand: HashMap<String, u32>,
    power_uses_stage: HashMap<String, u32>,
    power_uses_run: HashMap<String, u32>,
    stacked_deck_armed: bool,
    loaded_dice_armed: bool,
    dealers_tell_armed: bool,
    blind_hand: bool,
    insurance_refund: i64,
    adaptable_swap_used: bool,
    pending_rare_offers: usize,
    resurrect_spent: bool,
    run_started: Option<Instant>,
}

impl RunState {
    pub(crate) fn challenge_rules(&self) -> ChallengeRules {
        let mut rules = ChallengeRules {
            shop_cost_multiplier: 1,
            ..ChallengeRules::default()
        };
        for id in &self.active_challenges {
            let Some(def) = self.content.challenge_by_id(id) else {
                continue;
            };
            match def.effect {
                ChallengeEffect::MinBet(amount) => rules.min_bet = Some(amount),
                ChallengeEffect::StageStartChipLoss(_) => {}
                ChallengeEffect::ShopCostMultiplier(mult) => rules.shop_cost_multiplier = mult,
                ChallengeEffect::WinPayoutMultiplier(factor) => rules.win_tax = Some(factor),
                ChallengeEffect::DisableDouble => rules.disable_double = true,
                ChallengeEffect::DisableSplit => rules.disable_split = true,
                ChallengeEffect::MaxHandSize(limit) => rules.max_hand_size = Some(limit),
                ChallengeEffect::DealerWinsPushes => rules.dealer_wins_pushes = true,
                ChallengeEffect::BlindHands(_) => {}
                ChallengeEffect::CardDrawCost { rank, chips } => {
                    rules.card_draw_costs.push((rank, chips))
                }
                ChallengeEffect::EdgeCostIncrease(amount) => rules.edge_cost_increase += amount,
                ChallengeEffect::BlockRandomPower => {}
                ChallengeEffect::EdgeOnWinOnly => rules.edge_on_win_only = true,
                ChallengeEffect::PoisonRandomCards { .. } => {}
                ChallengeEffect::CursedAce => {}
            }
        }
        rules
    }
}
