use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Suit {
    Spades,
    Hearts,
    Clubs,
    Diamonds,
}

impl Suit {
    pub const ALL: [Suit; 4] = [Suit::Spades, Suit::Hearts, Suit::Clubs, Suit::Diamonds];

    pub fn symbol(self) -> &'static str {
        match self {
            Suit::Spades => "\u{2660}",
            Suit::Hearts => "\u{2665}",
            Suit::Clubs => "\u{2663}",
            Suit::Diamonds => "\u{2666}",
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub enum Rank {
    Ace,
    Two,
    Three,
    Four,
    Five,
    Six,
    Seven,
    Eight,
    Nine,
    Ten,
    Jack,
    Queen,
    King,
}

impl Rank {
    pub const ALL: [Rank; 13] = [
        Rank::Ace,
        Rank::Two,
        Rank::Three,
        Rank::Four,
        Rank::Five,
        Rank::Six,
        Rank::Seven,
        Rank::Eight,
        Rank::Nine,
        Rank::Ten,
        Rank::Jack,
        Rank::Queen,
        Rank::King,
    ];

    /// Table value before any ace adjustment or per-card override.
    pub fn base_value(self) -> i64 {
        match self {
            Rank::Ace => 11,
            Rank::Two => 2,
            Rank::Three => 3,
            Rank::Four => 4,
            Rank::Five => 5,
            Rank::Six => 6,
            Rank::Seven => 7,
            Rank::Eight => 8,
            Rank::Nine => 9,
            Rank::Ten | Rank::Jack | Rank::Queen | Rank::King => 10,
        }
    }

    pub fn symbol(self) -> &'static str {
        match self {
            Rank::Ace => "A",
            Rank::Two => "2",
            Rank::Three => "3",
            Rank::Four => "4",
            Rank::Five => "5",
            Rank::Six => "6",
            Rank::Seven => "7",
            Rank::Eight => "8",
            Rank::Nine => "9",
            Rank::Ten => "10",
            Rank::Jack => "J",
            Rank::Queen => "Q",
            Rank::King => "K",
        }
    }
}

/// A card in play. Special cards carry the id of their catalog entry and,
/// once their value is fixed (fixed-value specials, resolved choices, copies),
/// a `value_override` that replaces the printed rank value.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Hash)]
pub struct Card {
    pub suit: Suit,
    pub rank: Rank,
    #[serde(default = "face_up_default")]
    pub face_up: bool,
    #[serde(default)]
    pub special: Option<String>,
    #[serde(default)]
    pub value_override: Option<i64>,
}

fn face_up_default() -> bool {
    true
}

impl Card {
    pub fn standard(suit: Suit, rank: Rank) -> Self {
        Self {
            suit,
            rank,
            face_up: true,
            special: None,
            value_override: None,
        }
    }

    pub fn special(suit: Suit, rank: Rank, id: &str) -> Self {
        Self {
            suit,
            rank,
            face_up: true,
            special: Some(id.to_string()),
            value_override: None,
        }
    }

    pub fn value(&self) -> i64 {
        self.value_override.unwrap_or_else(|| self.rank.base_value())
    }

    /// An ace currently counting as 11; the evaluator may downgrade it to 1.
    pub fn is_soft_ace(&self) -> bool {
        self.rank == Rank::Ace && self.value() == 11
    }

    pub fn label(&self) -> String {
        format!("{}{}", self.rank.symbol(), self.suit.symbol())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn override_replaces_rank_value() {
        let mut card = Card::special(Suit::Hearts, Rank::King, "wild");
        assert_eq!(card.value(), 10);
        card.value_override = Some(4);
        assert_eq!(card.value(), 4);
    }

    #[test]
    fn overridden_ace_is_not_soft() {
        let mut ace = Card::standard(Suit::Spades, Rank::Ace);
        assert!(ace.is_soft_ace());
        ace.value_override = Some(1);
        assert!(!ace.is_soft_ace());
    }
}
