use crate::Outcome;
use serde::{Deserialize, Serialize};

/// Per-run counters, folded into [`crate::MetaProgress`] when the run ends.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct RunStats {
    pub hands_played: u32,
    pub hands_won: u32,
    pub hands_lost: u32,
    pub hands_pushed: u32,
    pub blackjacks: u32,
    pub busts: u32,
    pub splits_played: u32,
    pub doubles_played: u32,
    pub biggest_win: i64,
    pub biggest_loss: i64,
    pub current_win_streak: u32,
    pub longest_win_streak: u32,
    pub total_chips_wagered: i64,
    pub total_chips_won: i64,
    pub total_chips_lost: i64,
    pub peak_chips: i64,
    pub chips_spent: i64,
    pub cards_added: u32,
    pub cards_removed: u32,
    pub challenges_removed: u32,
    pub powers_used: u32,
    pub edge_spent: i64,
    pub challenges_faced: u32,
    pub bosses_defeated: u32,
    pub stages_cleared: u32,
    /// Busts cancelled or softened at the last moment.
    pub clutch_saves: u32,
}

impl RunStats {
    pub fn record_outcome(&mut self, outcome: Outcome, chip_delta: i64) {
        self.hands_played += 1;
        match outcome {
            Outcome::Win => self.hands_won += 1,
            Outcome::Blackjack => {
                self.hands_won += 1;
                self.blackjacks += 1;
            }
            Outcome::Lose => self.hands_lost += 1,
            Outcome::Push => self.hands_pushed += 1,
        }
        if outcome.is_win() {
            self.current_win_streak += 1;
            self.longest_win_streak = self.longest_win_streak.max(self.current_win_streak);
        } else if outcome == Outcome::Lose {
            self.current_win_streak = 0;
        }
        if chip_delta > 0 {
            self.total_chips_won += chip_delta;
            self.biggest_win = self.biggest_win.max(chip_delta);
        } else if chip_delta < 0 {
            self.total_chips_lost += -chip_delta;
            self.biggest_loss = self.biggest_loss.max(-chip_delta);
        }
    }

    pub fn record_wager(&mut self, amount: i64) {
        self.total_chips_wagered += amount;
    }

    pub fn record_chips(&mut self, chips: i64) {
        self.peak_chips = self.peak_chips.max(chips);
    }

    pub fn record_power_use(&mut self, edge_cost: i64) {
        self.powers_used += 1;
        self.edge_spent += edge_cost;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn win_streak_survives_pushes() {
        let mut stats = RunStats::default();
        stats.record_outcome(Outcome::Win, 10);
        stats.record_outcome(Outcome::Push, 0);
        stats.record_outcome(Outcome::Blackjack, 15);
        assert_eq!(stats.current_win_streak, 2);
        stats.record_outcome(Outcome::Lose, -10);
        assert_eq!(stats.current_win_streak, 0);
        assert_eq!(stats.longest_win_streak, 2);
    }

    #[test]
    fn biggest_loss_stored_positive() {
        let mut stats = RunStats::default();
        stats.record_outcome(Outcome::Lose, -25);
        assert_eq!(stats.biggest_loss, 25);
    }

    #[test]
    fn chip_totals_accumulate_by_sign() {
        let mut stats = RunStats::default();
        stats.record_outcome(Outcome::Win, 10);
        stats.record_outcome(Outcome::Blackjack, 15);
        stats.record_outcome(Outcome::Lose, -20);
        stats.record_outcome(Outcome::Push, 0);
        assert_eq!(stats.total_chips_won, 25);
        assert_eq!(stats.total_chips_lost, 20);
    }
}
