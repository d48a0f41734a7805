use ascent_core::{Rank, Rarity, SpecialCardDef, SpecialEffect, SpecialTrigger, ValuePolicy};

struct Entry {
    id: &'static str,
    name: &'static str,
    description: &'static str,
    rarity: Rarity,
    rank: Rank,
    value: ValuePolicy,
    trigger: SpecialTrigger,
    effect: SpecialEffect,
    shop_cost: i64,
    unlock_cost: i64,
    start_unlocked: bool,
}

impl Entry {
    fn build(self) -> SpecialCardDef {
        SpecialCardDef {
            id: self.id.to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            rarity: self.rarity,
            rank: self.rank,
            value: self.value,
            trigger: self.trigger,
            effect: self.effect,
            shop_cost: self.shop_cost,
            unlock_cost: self.unlock_cost,
            start_unlocked: self.start_unlocked,
        }
    }
}

pub fn builtin_special_cards() -> Vec<SpecialCardDef> {
    use Rarity::*;
    use SpecialEffect::*;
    use SpecialTrigger::*;
    [
        Entry {
            id: "lucky_seven",
            name: "Lucky 7",
            description: "+3 chips when drawn.",
            rarity: Common,
            rank: Rank::Seven,
            value: ValuePolicy::Fixed(7),
            trigger: OnDraw,
            effect: ChipBonus(3),
            shop_cost: 15,
            unlock_cost: 0,
            start_unlocked: true,
        },
        Entry {
            id: "chip_five",
            name: "Chip 5",
            description: "+2 chips when drawn.",
            rarity: Common,
            rank: Rank::Five,
            value: ValuePolicy::Fixed(5),
            trigger: OnDraw,
            effect: ChipBonus(2),
            shop_cost: 12,
            unlock_cost: 0,
            start_unlocked: true,
        },
        Entry {
            id: "steady_six",
            name: "Steady 6",
            description: "+1 edge when drawn.",
            rarity: Common,
            rank: Rank::Six,
            value: ValuePolicy::Fixed(6),
            trigger: OnDraw,
            effect: EdgeBonus(1),
            shop_cost: 15,
            unlock_cost: 0,
            start_unlocked: true,
        },
        Entry {
            id: "safe_four",
            name: "Safe 4",
            description: "Can never bust you.",
            rarity: Common,
            rank: Rank::Four,
            value: ValuePolicy::Fixed(4),
            trigger: Passive,
            effect: BustImmune,
            shop_cost: 18,
            unlock_cost: 0,
            start_unlocked: true,
        },
        Entry {
            id: "loaded_three",
            name: "Loaded 3",
            description: "+4 chips if the hand wins.",
            rarity: Common,
            rank: Rank::Three,
            value: ValuePolicy::Fixed(3),
            trigger: OnWin,
            effect: ChipBonus(4),
            shop_cost: 15,
            unlock_cost: 0,
            start_unlocked: true,
        },
        Entry {
            id: "wild_card",
            name: "Wild Card",
            description: "Worth any value from 1 to 10. You choose.",
            rarity: Rare,
            rank: Rank::Ace,
            value: ValuePolicy::Choice { min: 1, max: 10 },
            trigger: Passive,
            effect: None,
            shop_cost: 35,
            unlock_cost: 0,
            start_unlocked: true,
        },
        Entry {
            id: "golden_ten",
            name: "Golden 10",
            description: "+5 chips when drawn.",
            rarity: Rare,
            rank: Rank::Ten,
            value: ValuePolicy::Fixed(10),
            trigger: OnDraw,
            effect: ChipBonus(5),
            shop_cost: 25,
            unlock_cost: 150,
            start_unlocked: true,
        },
        Entry {
            id: "mirror_card",
            name: "Mirror Card",
            description: "Copies the value of the card drawn before it.",
            rarity: Rare,
            rank: Rank::Eight,
            value: ValuePolicy::CopyLast,
            trigger: Passive,
            effect: None,
            shop_cost: 30,
            unlock_cost: 200,
            start_unlocked: false,
        },
        Entry {
            id: "pressure_king",
            name: "Pressure King",
            description: "The dealer takes an extra hit this hand.",
            rarity: Rare,
            rank: Rank::King,
            value: ValuePolicy::Fixed(10),
            trigger: OnDraw,
            effect: DealerExtraHit,
            shop_cost: 30,
            unlock_cost: 200,
            start_unlocked: false,
        },
        Entry {
            id: "insight_jack",
            name: "Insight Jack",
            description: "Reveals the dealer's hole card when drawn.",
            rarity: Rare,
            rank: Rank::Jack,
            value: ValuePolicy::Fixed(10),
            trigger: OnDraw,
            effect: RevealHole,
            shop_cost: 28,
            unlock_cost: 180,
            start_unlocked: false,
        },
        Entry {
            id: "recovery_nine",
            name: "Recovery 9",
            description: "Refunds a quarter of your bet on a loss.",
            rarity: Rare,
            rank: Rank::Nine,
            value: ValuePolicy::Fixed(9),
            trigger: OnLose,
            effect: BetRefund { percent: 25 },
            shop_cost: 26,
            unlock_cost: 160,
            start_unlocked: false,
        },
        Entry {
            id: "vampire_ace",
            name: "Vampire Ace",
            description: "+3 chips drained from the house on a win.",
            rarity: Rare,
            rank: Rank::Ace,
            value: ValuePolicy::Fixed(11),
            trigger: OnWin,
            effect: ChipBonus(3),
            shop_cost: 30,
            unlock_cost: 220,
            start_unlocked: false,
        },
        Entry {
            id: "perfect_ten",
            name: "Perfect 10",
            description: "A ten that can never bust you.",
            rarity: Legendary,
            rank: Rank::Ten,
            value: ValuePolicy::Fixed(10),
            trigger: Passive,
            effect: BustImmune,
            shop_cost: 50,
            unlock_cost: 400,
            start_unlocked: false,
        },
        Entry {
            id: "loaded_ace",
            name: "Loaded Ace",
            description: "Blackjacks with this ace pay 3:1.",
            rarity: Legendary,
            rank: Rank::Ace,
            value: ValuePolicy::Fixed(11),
            trigger: OnBlackjack,
            effect: BonusPayout { payout: 3.0 },
            shop_cost: 55,
            unlock_cost: 450,
            start_unlocked: false,
        },
        Entry {
            id: "chaos_card",
            name: "Chaos Card",
            description: "Worth a random value from 1 to 13 each time it is shuffled in.",
            rarity: Legendary,
            rank: Rank::Seven,
            value: ValuePolicy::Random { min: 1, max: 13 },
            trigger: Passive,
            effect: None,
            shop_cost: 40,
            unlock_cost: 350,
            start_unlocked: false,
        },
        Entry {
            id: "phoenix_card",
            name: "Phoenix Card",
            description: "Once per run, rise from zero chips back to 25.",
            rarity: Legendary,
            rank: Rank::Nine,
            value: ValuePolicy::Fixed(9),
            trigger: Passive,
            effect: Resurrect { restore: 25 },
            shop_cost: 60,
            unlock_cost: 500,
            start_unlocked: false,
        },
    ]
    .into_iter()
    .map(Entry::build)
    .collect()
}
