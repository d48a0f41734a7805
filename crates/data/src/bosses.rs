use ascent_core::{BossDef, BossReward, Card, Rank, Suit, TiePolicy};

fn cards(layout: &[(Suit, Rank)]) -> Vec<Card> {
    layout.iter()
        .map(|&(suit, rank)| Card::standard(suit, rank))
        .collect()
}

pub fn builtin_bosses() -> Vec<BossDef> {
    use Rank::*;
    use Suit::*;
    vec![
        BossDef {
            id: "pit_boss".to_string(),
            name: "The Pit Boss".to_string(),
            title: "Keeper of the Floor".to_string(),
            intro: "Nobody walks the floor without paying respect.".to_string(),
            stage: 4,
            deck: cards(&[
                (Spades, Ten),
                (Hearts, Ten),
                (Clubs, Nine),
                (Diamonds, Nine),
                (Spades, Eight),
                (Hearts, Eight),
                (Clubs, Seven),
                (Diamonds, Seven),
                (Spades, Six),
                (Hearts, Six),
                (Clubs, King),
                (Diamonds, Queen),
                (Spades, Jack),
                (Hearts, Five),
                (Clubs, Four),
                (Diamonds, Ace),
            ]),
            stand_value: 17,
            hits_soft_17: false,
            tie_policy: TiePolicy::LoseAt(17),
            hole_card_visible: false,
            extra_chip_loss: 0,
            entry_chip_penalty: 0,
            rewards: vec![BossReward::Chips(25)],
            rare_card_offers: 3,
        },
        BossDef {
            id: "the_shark".to_string(),
            name: "The Shark".to_string(),
            title: "Blood in the Water".to_string(),
            intro: "Every chip you lose, the Shark takes a bite extra.".to_string(),
            stage: 6,
            deck: cards(&[
                (Spades, Ten),
                (Hearts, Ten),
                (Clubs, Ten),
                (Diamonds, King),
                (Spades, King),
                (Hearts, Queen),
                (Clubs, Queen),
                (Diamonds, Jack),
                (Spades, Nine),
                (Hearts, Nine),
                (Clubs, Eight),
                (Diamonds, Ace),
                (Spades, Ace),
                (Hearts, Seven),
            ]),
            stand_value: 17,
            hits_soft_17: true,
            tie_policy: TiePolicy::Push,
            hole_card_visible: false,
            extra_chip_loss: 5,
            entry_chip_penalty: 0,
            rewards: vec![BossReward::Chips(35), BossReward::MaxEdgeBoost(1)],
            rare_card_offers: 2,
        },
        BossDef {
            id: "the_house".to_string(),
            name: "The House".to_string(),
            title: "The House Always Wins".to_string(),
            intro: "All ties go to the House. Its cards are face up. It does not care.".to_string(),
            stage: 8,
            deck: cards(&[
                (Spades, Ten),
                (Hearts, Ten),
                (Clubs, Ten),
                (Diamonds, Ten),
                (Spades, King),
                (Hearts, King),
                (Clubs, Queen),
                (Diamonds, Queen),
                (Spades, Jack),
                (Hearts, Jack),
                (Clubs, Nine),
                (Diamonds, Nine),
                (Spades, Eight),
                (Hearts, Seven),
                (Clubs, Ace),
                (Diamonds, Ace),
                (Spades, Ace),
                (Hearts, Six),
            ]),
            stand_value: 17,
            hits_soft_17: false,
            tie_policy: TiePolicy::AllLose,
            hole_card_visible: true,
            extra_chip_loss: 0,
            entry_chip_penalty: 10,
            rewards: vec![BossReward::Victory],
            rare_card_offers: 0,
        },
    ]
}
