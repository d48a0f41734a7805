use crate::Card;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Phase {
    Betting,
    Dealing,
    PlayerTurn,
    DealerTurn,
    Resolution,
    GameOver,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Screen {
    Title,
    Lobby,
    Game,
    StageComplete,
    PowerSelection,
    CardReward,
    DeckShop,
    ChallengeScreen,
    BossIntro,
    Victory,
    GameOver,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum Outcome {
    Win,
    Lose,
    Push,
    Blackjack,
}

impl Outcome {
    pub fn is_win(self) -> bool {
        matches!(self, Outcome::Win | Outcome::Blackjack)
    }
}

/// Two sub-hands after a split, resolved left to right.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SplitState {
    pub hands: [Vec<Card>; 2],
    pub bets: [i64; 2],
    /// Double-down is tracked per hand; doubling one does not spend the other's.
    pub doubled: [bool; 2],
    pub outcomes: [Option<Outcome>; 2],
    pub active: usize,
    pub split_aces: bool,
}

impl SplitState {
    pub fn active_hand(&self) -> &Vec<Card> {
        &self.hands[self.active]
    }

    pub fn active_hand_mut(&mut self) -> &mut Vec<Card> {
        &mut self.hands[self.active]
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameState {
    pub phase: Phase,
    pub screen: Screen,
    pub chips: i64,
    pub current_bet: i64,
    pub last_bet: i64,
    pub outcome: Option<Outcome>,
    pub message: String,
    pub doubled_down: bool,
    pub stage: u8,
    pub stage_wins: u32,
    pub edge: i64,
    pub max_edge: i64,
    /// Remaining hands this stage dealt with the player's cards face down.
    pub blind_hands_remaining: u32,
    /// Power disabled for the stage by a challenge.
    pub blocked_power: Option<String>,
}

impl GameState {
    pub fn new() -> Self {
        Self {
            phase: Phase::Betting,
            screen: Screen::Title,
            chips: 0,
            current_bet: 0,
            last_bet: 0,
            outcome: None,
            message: String::new(),
            doubled_down: false,
            stage: 1,
            stage_wins: 0,
            edge: 0,
            max_edge: 0,
            blind_hands_remaining: 0,
            blocked_power: None,
        }
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}
