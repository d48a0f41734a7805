use ascent_core::{ChallengeDef, ChallengeEffect, Rank};

fn challenge(
    id: &str,
    name: &str,
    description: &str,
    remove_cost: i64,
    effect: ChallengeEffect,
) -> ChallengeDef {
    ChallengeDef {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        remove_cost,
        effect,
    }
}

pub fn builtin_challenges() -> Vec<ChallengeDef> {
    use ChallengeEffect::*;
    vec![
        challenge(
            "high_stakes",
            "High Stakes",
            "Minimum bet is 15 chips.",
            20,
            MinBet(15),
        ),
        challenge(
            "tax_collector",
            "Tax Collector",
            "Pay 5 chips when the stage begins.",
            15,
            StageStartChipLoss(5),
        ),
        challenge(
            "inflation",
            "Inflation",
            "Shop prices are doubled.",
            20,
            ShopCostMultiplier(2),
        ),
        challenge(
            "winners_tax",
            "Winner's Tax",
            "All winning payouts are cut by 10%.",
            25,
            WinPayoutMultiplier(0.9),
        ),
        challenge(
            "no_doubles",
            "No Doubles",
            "Doubling down is not allowed.",
            15,
            DisableDouble,
        ),
        challenge(
            "no_splits",
            "No Splits",
            "Splitting pairs is not allowed.",
            15,
            DisableSplit,
        ),
        challenge(
            "short_stack",
            "Short Stack",
            "Drawing a fifth card busts the hand.",
            25,
            MaxHandSize(4),
        ),
        challenge(
            "dealers_advantage",
            "Dealer's Advantage",
            "The dealer wins all pushes.",
            30,
            DealerWinsPushes,
        ),
        challenge(
            "cold_deck",
            "Cold Deck",
            "Your first two hands are dealt face down.",
            20,
            BlindHands(2),
        ),
        challenge(
            "heavy_kings",
            "Heavy Kings",
            "Drawing a king costs 5 chips.",
            20,
            CardDrawCost {
                rank: Rank::King,
                chips: 5,
            },
        ),
        challenge(
            "edge_drain",
            "Edge Drain",
            "Every power costs 1 extra edge.",
            25,
            EdgeCostIncrease(1),
        ),
        challenge(
            "power_block",
            "Power Block",
            "One of your equipped powers is jammed this stage.",
            30,
            BlockRandomPower,
        ),
        challenge(
            "slow_charge",
            "Slow Charge",
            "Edge only regenerates after a won hand.",
            25,
            EdgeOnWinOnly,
        ),
        challenge(
            "poison_cards",
            "Poison Cards",
            "Two random cards in your deck cost 3 chips when drawn.",
            14,
            PoisonRandomCards { count: 2, chips: 3 },
        ),
        challenge(
            "cursed_ace",
            "Cursed Ace",
            "One ace in your deck counts as 1, never 11.",
            12,
            CursedAce,
        ),
    ]
}
