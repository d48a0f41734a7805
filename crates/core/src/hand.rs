use crate::{Card, Content};
use serde::{Deserialize, Serialize};

pub const BUST_LIMIT: i64 = 21;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub struct HandValue {
    pub total: i64,
    /// At least one ace still counting as 11.
    pub soft: bool,
}

/// Sum card values, downgrade aces from 11 to 1 while busting, then let a
/// single bust-immune special card drop its own value if the hand would
/// still bust. Idempotent: same cards, same result.
pub fn evaluate(cards: &[Card], content: &Content) -> HandValue {
    let mut total: i64 = cards.iter().map(Card::value).sum();
    let mut soft_aces = cards.iter().filter(|card| card.is_soft_ace()).count();
    while total > BUST_LIMIT && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }
    if total > BUST_LIMIT {
        if let Some(card) = cards.iter().find(|card| is_bust_immune(card, content)) {
            total -= card.value();
        }
    }
    HandValue {
        total,
        soft: soft_aces > 0,
    }
}

pub fn is_bust_immune(card: &Card, content: &Content) -> bool {
    card.special
        .as_deref()
        .and_then(|id| content.special_by_id(id))
        .map(|def| def.bust_immune())
        .unwrap_or(false)
}

pub fn is_bust(cards: &[Card], content: &Content) -> bool {
    evaluate(cards, content).total > BUST_LIMIT
}

/// A natural: exactly two cards totalling twenty-one.
pub fn is_blackjack(cards: &[Card], content: &Content) -> bool {
    cards.len() == 2 && evaluate(cards, content).total == BUST_LIMIT
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Rank, Suit};

    fn empty_content() -> Content {
        Content::default()
    }

    fn card(rank: Rank) -> Card {
        Card::standard(Suit::Spades, rank)
    }

    #[test]
    fn ace_downgrades_to_avoid_bust() {
        let content = empty_content();
        let hand = [card(Rank::Ace), card(Rank::Nine), card(Rank::Five)];
        let value = evaluate(&hand, &content);
        assert_eq!(value.total, 15);
        assert!(!value.soft);
    }

    #[test]
    fn two_aces_downgrade_one_at_a_time() {
        let content = empty_content();
        let hand = [card(Rank::Ace), card(Rank::Ace), card(Rank::Nine)];
        let value = evaluate(&hand, &content);
        assert_eq!(value.total, 21);
        assert!(value.soft);
    }

    #[test]
    fn soft_seventeen_is_flagged_soft() {
        let content = empty_content();
        let hand = [card(Rank::Ace), card(Rank::Six)];
        let value = evaluate(&hand, &content);
        assert_eq!(value.total, 17);
        assert!(value.soft);
    }

    #[test]
    fn natural_blackjack_needs_two_cards() {
        let content = empty_content();
        assert!(is_blackjack(&[card(Rank::Ace), card(Rank::King)], &content));
        assert!(!is_blackjack(
            &[card(Rank::Seven), card(Rank::Seven), card(Rank::Seven)],
            &content
        ));
    }

    #[test]
    fn evaluate_is_idempotent() {
        let content = empty_content();
        let hand = [card(Rank::Ace), card(Rank::Ace), card(Rank::King)];
        let first = evaluate(&hand, &content);
        let second = evaluate(&hand, &content);
        assert_eq!(first, second);
    }
}
