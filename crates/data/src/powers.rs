use ascent_core::{PowerDef, PowerEffect, PowerTiming};

fn power(
    id: &str,
    name: &str,
    description: &str,
    cost: i64,
    tier: u8,
    timing: PowerTiming,
    effect: PowerEffect,
) -> PowerDef {
    PowerDef {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        cost,
        tier,
        timing,
        effect,
        uses_per_hand: Some(1),
        uses_per_stage: None,
        uses_per_run: None,
    }
}

pub fn builtin_powers() -> Vec<PowerDef> {
    use PowerEffect::*;
    use PowerTiming::*;
    let mut powers = vec![
        power("peek", "Peek", "See the dealer's hole card.", 2, 1, PlayerTurn, Peek),
        power(
            "card_count",
            "Card Count",
            "Count the ten-value cards left in your deck.",
            1,
            1,
            PlayerTurn,
            CardCount,
        ),
        power(
            "insurance_plus",
            "Insurance+",
            "When you bust, half your bet comes back.",
            1,
            1,
            OnBust,
            InsurancePlus,
        ),
        power(
            "quick_peek",
            "Quick Peek",
            "Glance at the top card of your deck before dealing.",
            1,
            1,
            PreDeal,
            QuickPeek,
        ),
        power(
            "swap",
            "Swap",
            "Trade one of your cards for the top of the deck.",
            3,
            2,
            PlayerTurn,
            Swap,
        ),
        power(
            "pressure",
            "Pressure",
            "Force the dealer to take one extra hit.",
            2,
            2,
            PreDealer,
            Pressure,
        ),
        power(
            "lucky_draw",
            "Lucky Draw",
            "Draw two cards and keep one.",
            3,
            2,
            PlayerTurn,
            LuckyDraw,
        ),
        power(
            "safety_net",
            "Safety Net",
            "The card that would bust you slides back into the deck.",
            2,
            2,
            OnBust,
            SafetyNet,
        ),
        power(
            "freeze",
            "Freeze",
            "The dealer stands pat this hand.",
            3,
            3,
            PreDealer,
            Freeze,
        ),
        power(
            "second_chance",
            "Second Chance",
            "Replay the hand from the deal.",
            4,
            3,
            PlayerTurn,
            SecondChance,
        ),
        power(
            "stacked_deck",
            "Stacked Deck",
            "Your first card next hand is a ten-value.",
            3,
            3,
            PreDeal,
            StackedDeck,
        ),
        power(
            "dealers_tell",
            "Dealer's Tell",
            "If the dealer shows 6 or less, their hole card is revealed.",
            2,
            3,
            PreDeal,
            DealersTell,
        ),
        power(
            "loaded_dice",
            "Loaded Dice",
            "Both of your next starting cards are ten-values.",
            5,
            4,
            PreDeal,
            LoadedDice,
        ),
        power(
            "double_agent",
            "Double Agent",
            "Trade hands with the dealer.",
            4,
            4,
            PlayerTurn,
            DoubleAgent,
        ),
        power(
            "time_warp",
            "Time Warp",
            "Rewind your last draw.",
            5,
            4,
            PlayerTurn,
            TimeWarp,
        ),
        power(
            "perfect_shuffle",
            "Perfect Shuffle",
            "Reshuffle your deck before the deal.",
            4,
            4,
            PreDeal,
            PerfectShuffle,
        ),
    ];
    for def in &mut powers {
        match def.effect {
            PowerEffect::LoadedDice | PowerEffect::DoubleAgent | PowerEffect::PerfectShuffle => {
                def.uses_per_stage = Some(1);
            }
            PowerEffect::TimeWarp => {
                def.uses_per_hand = None;
                def.uses_per_run = Some(1);
            }
            _ => {}
        }
    }
    powers
}
