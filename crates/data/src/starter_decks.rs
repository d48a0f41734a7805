use ascent_core::{Card, Rank, StarterDeckDef, Suit, TraitKind, UnlockRule};

fn cards(layout: &[(Suit, Rank)]) -> Vec<Card> {
    layout.iter()
        .map(|&(suit, rank)| Card::standard(suit, rank))
        .collect()
}

pub fn builtin_starter_decks() -> Vec<StarterDeckDef> {
    use Rank::*;
    use Suit::*;
    vec![
        StarterDeckDef {
            id: "grinder".to_string(),
            name: "The Grinder".to_string(),
            tagline: "Low cards, long game.".to_string(),
            starting_chips: 50,
            starting_edge: 5,
            max_edge: 8,
            recipe: cards(&[
                (Spades, Two),
                (Hearts, Two),
                (Spades, Three),
                (Hearts, Three),
                (Spades, Four),
                (Hearts, Four),
                (Spades, Five),
                (Hearts, Five),
                (Spades, Six),
                (Hearts, Six),
                (Spades, Seven),
                (Hearts, Seven),
                (Spades, Ace),
                (Hearts, Ace),
            ]),
            specials: Vec::new(),
            deck_trait: TraitKind::SlowBurn,
            unlock: UnlockRule::Default,
            dust_cost: 0,
        },
        StarterDeckDef {
            id: "high_roller".to_string(),
            name: "The High Roller".to_string(),
            tagline: "Big cards, bigger swings.".to_string(),
            starting_chips: 45,
            starting_edge: 5,
            max_edge: 8,
            recipe: cards(&[
                (Clubs, Nine),
                (Diamonds, Nine),
                (Clubs, Ten),
                (Diamonds, Ten),
                (Clubs, Jack),
                (Diamonds, Jack),
                (Clubs, Queen),
                (Diamonds, Queen),
                (Clubs, King),
                (Diamonds, King),
                (Clubs, Ace),
                (Diamonds, Ace),
            ]),
            specials: Vec::new(),
            deck_trait: TraitKind::PowerStance,
            unlock: UnlockRule::TotalVictories(3),
            dust_cost: 500,
        },
        StarterDeckDef {
            id: "ace_hunter".to_string(),
            name: "The Ace Hunter".to_string(),
            tagline: "Four aces and the cards to pair them.".to_string(),
            starting_chips: 50,
            starting_edge: 5,
            max_edge: 8,
            recipe: cards(&[
                (Spades, Ace),
                (Hearts, Ace),
                (Clubs, Ace),
                (Diamonds, Ace),
                (Spades, Five),
                (Hearts, Five),
                (Spades, Six),
                (Hearts, Six),
                (Spades, Ten),
                (Hearts, Ten),
                (Spades, King),
                (Hearts, King),
            ]),
            specials: Vec::new(),
            deck_trait: TraitKind::AceInTheHole,
            unlock: UnlockRule::BlackjacksInOneRun(10),
            dust_cost: 750,
        },
        StarterDeckDef {
            id: "gambler".to_string(),
            name: "The Gambler".to_string(),
            tagline: "Wild cards and gold, nothing held back.".to_string(),
            starting_chips: 40,
            starting_edge: 6,
            max_edge: 8,
            recipe: cards(&[
                (Clubs, Two),
                (Clubs, Seven),
                (Diamonds, Seven),
                (Clubs, Eight),
                (Diamonds, Eight),
                (Clubs, Ten),
                (Diamonds, Ten),
                (Clubs, Jack),
                (Clubs, Ace),
                (Diamonds, Ace),
            ]),
            specials: vec![
                "wild_card".to_string(),
                "wild_card".to_string(),
                "golden_ten".to_string(),
                "golden_ten".to_string(),
            ],
            deck_trait: TraitKind::AllOrNothing,
            unlock: UnlockRule::ReachStage(5),
            dust_cost: 1000,
        },
        StarterDeckDef {
            id: "foundation".to_string(),
            name: "The Foundation".to_string(),
            tagline: "A bigger stack and a flexible deck.".to_string(),
            starting_chips: 55,
            starting_edge: 5,
            max_edge: 8,
            recipe: cards(&[
                (Spades, Three),
                (Hearts, Three),
                (Spades, Five),
                (Hearts, Five),
                (Spades, Six),
                (Hearts, Six),
                (Spades, Seven),
                (Hearts, Seven),
                (Spades, Nine),
                (Hearts, Nine),
                (Spades, Ten),
                (Hearts, Ten),
                (Spades, Queen),
                (Hearts, Queen),
                (Spades, Ace),
                (Hearts, Ace),
            ]),
            specials: Vec::new(),
            deck_trait: TraitKind::Adaptable,
            unlock: UnlockRule::TotalVictories(1),
            dust_cost: 1500,
        },
    ]
}
