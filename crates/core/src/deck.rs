use crate::{Card, Rank, RngState, Suit};

/// Draw pile only. Blackjack hands burn through cards quickly and lean runs
/// rebuild the pile from the deck recipe instead of recycling a discard.
#[derive(Debug, Default, Clone)]
pub struct Deck {
    pub draw: Vec<Card>,
}

impl Deck {
    pub fn standard52() -> Self {
        let mut draw = Vec::with_capacity(52);
        for suit in Suit::ALL {
            for rank in Rank::ALL {
                draw.push(Card::standard(suit, rank));
            }
        }
        Self { draw }
    }

    pub fn from_cards(draw: Vec<Card>) -> Self {
        Self { draw }
    }

    pub fn shuffle(&mut self, rng: &mut RngState) {
        rng.shuffle(&mut self.draw);
    }

    pub fn len(&self) -> usize {
        self.draw.len()
    }

    pub fn is_empty(&self) -> bool {
        self.draw.is_empty()
    }

    /// Top of the pile is the end of the vec.
    pub fn draw_card(&mut self) -> Option<Card> {
        self.draw.pop()
    }

    pub fn peek_top(&self) -> Option<&Card> {
        self.draw.last()
    }

    pub fn push_top(&mut self, card: Card) {
        self.draw.push(card);
    }

    pub fn push_bottom(&mut self, card: Card) {
        self.draw.insert(0, card);
    }

    /// Remove the topmost card whose value is at least `floor`.
    pub fn draw_at_least(&mut self, floor: i64) -> Option<Card> {
        let idx = self.draw.iter().rposition(|card| card.value() >= floor)?;
        Some(self.draw.remove(idx))
    }

    pub fn count_value(&self, value: i64) -> usize {
        self.draw.iter().filter(|card| card.value() == value).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard52_has_unique_cards() {
        let deck = Deck::standard52();
        assert_eq!(deck.len(), 52);
        let mut seen = std::collections::HashSet::new();
        for card in &deck.draw {
            assert!(seen.insert((card.suit, card.rank)));
        }
    }

    #[test]
    fn shuffle_is_a_permutation() {
        let mut deck = Deck::standard52();
        let mut rng = RngState::from_seed(31);
        deck.shuffle(&mut rng);
        assert_eq!(deck.len(), 52);
        let mut seen = std::collections::HashSet::new();
        while let Some(card) = deck.draw_card() {
            assert!(seen.insert((card.suit, card.rank)));
        }
        assert_eq!(seen.len(), 52);
    }

    #[test]
    fn draw_at_least_skips_low_cards() {
        let mut deck = Deck::from_cards(vec![
            Card::standard(Suit::Spades, Rank::King),
            Card::standard(Suit::Hearts, Rank::Three),
        ]);
        let card = deck.draw_at_least(10).unwrap();
        assert_eq!(card.rank, Rank::King);
        assert_eq!(deck.len(), 1);
    }
}
