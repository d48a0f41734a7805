use crate::{Card, Rank, RngState};
use serde::{Deserialize, Serialize};

/// When a power may be activated.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PowerTiming {
    /// During betting, before cards are dealt.
    PreDeal,
    /// During the player's turn.
    PlayerTurn,
    /// During the player's turn, arming an effect for the dealer's turn.
    PreDealer,
    /// Checked automatically when the player would bust.
    OnBust,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum PowerEffect {
    Peek,
    CardCount,
    InsurancePlus,
    QuickPeek,
    Swap,
    Pressure,
    LuckyDraw,
    SafetyNet,
    Freeze,
    SecondChance,
    StackedDeck,
    DealersTell,
    LoadedDice,
    DoubleAgent,
    TimeWarp,
    PerfectShuffle,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PowerDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub cost: i64,
    pub tier: u8,
    pub timing: PowerTiming,
    pub effect: PowerEffect,
    #[serde(default)]
    pub uses_per_hand: Option<u32>,
    #[serde(default)]
    pub uses_per_stage: Option<u32>,
    #[serde(default)]
    pub uses_per_run: Option<u32>,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Rarity {
    Common,
    Rare,
    Legendary,
}

/// How a special card's play value is fixed when it enters a hand.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ValuePolicy {
    Fixed(i64),
    /// Player picks within the range; defaults to `min` until chosen.
    Choice { min: i64, max: i64 },
    /// Copies the value of the previously drawn card.
    CopyLast,
    Random { min: i64, max: i64 },
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SpecialTrigger {
    OnDraw,
    OnWin,
    OnLose,
    OnBlackjack,
    Passive,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum SpecialEffect {
    ChipBonus(i64),
    EdgeBonus(i64),
    /// Refund this percentage of the bet when the hand loses.
    BetRefund { percent: u32 },
    /// Replace the blackjack payout multiplier for this hand.
    BonusPayout { payout: f64 },
    /// The card cannot cause a bust; the evaluator drops its value.
    BustImmune,
    /// Once per run, a run that would end at zero chips restores this many.
    Resurrect { restore: i64 },
    /// The dealer must take one extra hit this hand.
    DealerExtraHit,
    /// Reveal the dealer's hole card.
    RevealHole,
    /// The card's value policy is its whole effect.
    None,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpecialCardDef {
    pub id: String,
    pub name: String,
    pub description: String,
    pub rarity: Rarity,
    pub rank: Rank,
    pub value: ValuePolicy,
    pub trigger: SpecialTrigger,
    pub effect: SpecialEffect,
    pub shop_cost: i64,
    pub unlock_cost: i64,
    #[serde(default)]
    pub start_unlocked: bool,
}

impl SpecialCardDef {
    pub fn bust_immune(&self) -> bool {
        matches!(self.effect, SpecialEffect::BustImmune)
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq)]
pub enum ChallengeEffect {
    MinBet(i64),
    StageStartChipLoss(i64),
    ShopCostMultiplier(u32),
    /// Winning payouts are multiplied by this factor, floored.
    WinPayoutMultiplier(f64),
    DisableDouble,
    DisableSplit,
    /// Drawing a card beyond this count busts the hand outright.
    MaxHandSize(usize),
    DealerWinsPushes,
    /// The first N hands of the stage are played with the player's cards face down.
    BlindHands(u32),
    /// Drawing this rank costs chips.
    CardDrawCost { rank: Rank, chips: i64 },
    EdgeCostIncrease(i64),
    /// One random equipped power is disabled for the stage.
    BlockRandomPower,
    /// Edge regenerates only after won hands.
    EdgeOnWinOnly,
    /// Random cards in the deck are poisoned for the stage; drawing one
    /// costs chips.
    PoisonRandomCards { count: usize, chips: i64 },
    /// One ace in the deck counts as 1 for the stage, never 11.
    CursedAce,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChallengeDef {
    pub id: String,
    pub name: String,
    pub description: String,
    /// Chips to buy the challenge off before the stage starts.
    pub remove_cost: i64,
    pub effect: ChallengeEffect,
}

/// How the boss settles hands that would normally push.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TiePolicy {
    Push,
    /// Ties at exactly this total count as losses.
    LoseAt(i64),
    AllLose,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum BossReward {
    Chips(i64),
    MaxEdgeBoost(i64),
    /// Beating this boss ends the run in victory.
    Victory,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BossDef {
    pub id: String,
    pub name: String,
    pub title: String,
    pub intro: String,
    pub stage: u8,
    /// Dedicated dealer pile for the encounter.
    pub deck: Vec<Card>,
    pub stand_value: i64,
    pub hits_soft_17: bool,
    pub tie_policy: TiePolicy,
    pub hole_card_visible: bool,
    /// Extra chips lost on top of the bet for each losing hand.
    pub extra_chip_loss: i64,
    /// Chips taken from the player when the encounter begins.
    pub entry_chip_penalty: i64,
    pub rewards: Vec<BossReward>,
    /// Rare special cards offered after the boss falls.
    pub rare_card_offers: usize,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TraitKind {
    /// +1 chip for every hit that does not bust.
    SlowBurn,
    /// +2 chips when standing on 20 or 21.
    PowerStance,
    /// Blackjack pays 2:1.
    AceInTheHole,
    /// Doubled-down wins pay 3:1, doubled-down losses cost 25% extra.
    AllOrNothing,
    /// One free card swap from the shop each stage.
    Adaptable,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum UnlockRule {
    Default,
    TotalVictories(u32),
    BlackjacksInOneRun(u32),
    ReachStage(u8),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StarterDeckDef {
    pub id: String,
    pub name: String,
    pub tagline: String,
    pub starting_chips: i64,
    pub starting_edge: i64,
    pub max_edge: i64,
    /// Standard cards in the deck.
    pub recipe: Vec<Card>,
    /// Special card ids included in the deck, one entry per copy.
    pub specials: Vec<String>,
    pub deck_trait: TraitKind,
    pub unlock: UnlockRule,
    pub dust_cost: i64,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Content {
    pub powers: Vec<PowerDef>,
    pub specials: Vec<SpecialCardDef>,
    pub challenges: Vec<ChallengeDef>,
    pub bosses: Vec<BossDef>,
    pub decks: Vec<StarterDeckDef>,
}

impl Content {
    pub fn power_by_id(&self, id: &str) -> Option<&PowerDef> {
        self.powers.iter().find(|power| power.id == id)
    }

    pub fn special_by_id(&self, id: &str) -> Option<&SpecialCardDef> {
        self.specials.iter().find(|special| special.id == id)
    }

    pub fn challenge_by_id(&self, id: &str) -> Option<&ChallengeDef> {
        self.challenges.iter().find(|challenge| challenge.id == id)
    }

    pub fn boss_for_stage(&self, stage: u8) -> Option<&BossDef> {
        self.bosses.iter().find(|boss| boss.stage == stage)
    }

    pub fn boss_by_id(&self, id: &str) -> Option<&BossDef> {
        self.bosses.iter().find(|boss| boss.id == id)
    }

    pub fn deck_by_id(&self, id: &str) -> Option<&StarterDeckDef> {
        self.decks.iter().find(|deck| deck.id == id)
    }

    /// Distinct powers at or below the tier cap, excluding already-collected ids.
    pub fn pick_powers(
        &self,
        tier_cap: u8,
        exclude: &[String],
        count: usize,
        rng: &mut RngState,
    ) -> Vec<String> {
        let mut pool: Vec<&PowerDef> = self
            .powers
            .iter()
            .filter(|power| power.tier <= tier_cap)
            .filter(|power| !exclude.iter().any(|id| id == &power.id))
            .collect();
        rng.shuffle(&mut pool);
        pool.truncate(count);
        pool.into_iter().map(|power| power.id.clone()).collect()
    }

    /// Distinct challenges for a stage entry.
    pub fn pick_challenges(&self, count: usize, rng: &mut RngState) -> Vec<String> {
        let mut pool: Vec<&ChallengeDef> = self.challenges.iter().collect();
        rng.shuffle(&mut pool);
        pool.truncate(count);
        pool.into_iter().map(|challenge| challenge.id.clone()).collect()
    }

    pub fn pick_special(&self, rarity: Rarity, rng: &mut RngState) -> Option<&SpecialCardDef> {
        let pool: Vec<&SpecialCardDef> = self
            .specials
            .iter()
            .filter(|special| special.rarity == rarity)
            .collect();
        let idx = rng.pick_index(pool.len())?;
        Some(pool[idx])
    }

    /// Build a deck card from a special card definition. Fixed and random
    /// values are resolved here; choices start at their minimum and copies
    /// are resolved when the card is drawn.
    pub fn instantiate_special(&self, def: &SpecialCardDef, rng: &mut RngState) -> Card {
        let mut card = Card::special(crate::Suit::Spades, def.rank, &def.id);
        card.value_override = match def.value {
            ValuePolicy::Fixed(value) => Some(value),
            ValuePolicy::Choice { min, .. } => Some(min),
            ValuePolicy::CopyLast => None,
            ValuePolicy::Random { min, max } => Some(rng.range_inclusive(min, max)),
        };
        card
    }
}
