use crate::{Content, RunStats, UnlockRule};
use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MetaError {
    #[error("unknown deck: {0}")]
    UnknownDeck(String),
    #[error("unknown special card: {0}")]
    UnknownSpecialCard(String),
    #[error("already unlocked")]
    AlreadyUnlocked,
    #[error("not enough dust")]
    NotEnoughDust,
}

/// One line of the end-of-run dust breakdown.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct DustEarning {
    pub source: String,
    pub amount: i64,
}

/// Itemized dust for a finished run. Losses still pay out a consolation
/// amount scaled by the stage reached.
pub fn dust_for_run(stats: &RunStats, stage_reached: u8, victory: bool) -> Vec<DustEarning> {
    let mut earnings = Vec::new();
    let mut add = |source: &str, amount: i64| {
        if amount > 0 {
            earnings.push(DustEarning {
                source: source.to_string(),
                amount,
            });
        }
    };
    add("hands played", stats.hands_played as i64);
    add("hands won", stats.hands_won as i64);
    add("blackjacks", stats.blackjacks as i64 * 2);
    add("stages cleared", stats.stages_cleared as i64 * 5);
    add("bosses defeated", stats.bosses_defeated as i64 * 15);
    if victory {
        add("victory", 50);
    } else {
        add("consolation", stage_reached as i64 * 5);
    }
    earnings
}

#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MetaStats {
    pub total_runs: u32,
    pub total_victories: u32,
    pub highest_stage_reached: u8,
    pub most_blackjacks_in_run: u32,
    pub total_hands_played: u32,
    pub total_dust_earned: i64,
    pub fastest_victory_ms: Option<u64>,
}

/// Lifetime record for one starter deck.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct DeckStats {
    pub runs: u32,
    pub victories: u32,
    pub total_stages: u32,
    pub best_stage: u8,
    pub hands_played: u32,
    pub hands_won: u32,
    pub blackjacks: u32,
    pub best_chips: i64,
    pub fastest_victory_ms: Option<u64>,
}

impl DeckStats {
    pub fn win_rate(&self) -> f64 {
        if self.hands_played == 0 {
            return 0.0;
        }
        self.hands_won as f64 / self.hands_played as f64
    }

    pub fn average_stage(&self) -> f64 {
        if self.runs == 0 {
            return 0.0;
        }
        self.total_stages as f64 / self.runs as f64
    }
}

/// Cross-run progression: dust wallet, lifetime stats, and unlock sets.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MetaProgress {
    pub dust: i64,
    pub stats: MetaStats,
    #[serde(default)]
    pub deck_stats: HashMap<String, DeckStats>,
    pub unlocked_decks: HashSet<String>,
    pub unlocked_specials: HashSet<String>,
}

impl MetaProgress {
    /// Fresh profile with the default unlocks from the content catalogs.
    pub fn new_profile(content: &Content) -> Self {
        let mut progress = Self::default();
        for deck in &content.decks {
            if deck.unlock == UnlockRule::Default {
                progress.unlocked_decks.insert(deck.id.clone());
            }
        }
        for special in &content.specials {
            if special.start_unlocked {
                progress.unlocked_specials.insert(special.id.clone());
            }
        }
        progress
    }

    pub fn deck_unlocked(&self, id: &str) -> bool {
        self.unlocked_decks.contains(id)
    }

    pub fn special_unlocked(&self, id: &str) -> bool {
        self.unlocked_specials.contains(id)
    }

    pub fn unlock_deck_with_dust(&mut self, content: &Content, id: &str) -> Result<(), MetaError> {
        let deck = content
            .deck_by_id(id)
            .ok_or_else(|| MetaError::UnknownDeck(id.to_string()))?;
        if self.deck_unlocked(id) {
            return Err(MetaError::AlreadyUnlocked);
        }
        if self.dust < deck.dust_cost {
            return Err(MetaError::NotEnoughDust);
        }
        self.dust -= deck.dust_cost;
        self.unlocked_decks.insert(deck.id.clone());
        Ok(())
    }

    pub fn unlock_special_with_dust(
        &mut self,
        content: &Content,
        id: &str,
    ) -> Result<(), MetaError> {
        let special = content
            .special_by_id(id)
            .ok_or_else(|| MetaError::UnknownSpecialCard(id.to_string()))?;
        if self.special_unlocked(id) {
            return Err(MetaError::AlreadyUnlocked);
        }
        if self.dust < special.unlock_cost {
            return Err(MetaError::NotEnoughDust);
        }
        self.dust -= special.unlock_cost;
        self.unlocked_specials.insert(special.id.clone());
        Ok(())
    }

    /// Fold a finished run into lifetime stats, credit dust, and unlock any
    /// decks whose achievement condition is now met. Returns the dust
    /// breakdown and the ids of newly unlocked decks.
    pub fn absorb_run(
        &mut self,
        content: &Content,
        stats: &RunStats,
        deck_id: &str,
        stage_reached: u8,
        victory: bool,
        duration_ms: Option<u64>,
    ) -> (Vec<DustEarning>, Vec<String>) {
        self.stats.total_runs += 1;
        self.stats.total_hands_played += stats.hands_played;
        self.stats.highest_stage_reached = self.stats.highest_stage_reached.max(stage_reached);
        self.stats.most_blackjacks_in_run = self.stats.most_blackjacks_in_run.max(stats.blackjacks);
        if victory {
            self.stats.total_victories += 1;
            if let Some(ms) = duration_ms {
                self.stats.fastest_victory_ms = Some(match self.stats.fastest_victory_ms {
                    Some(best) => best.min(ms),
                    None => ms,
                });
            }
        }
        let deck = self.deck_stats.entry(deck_id.to_string()).or_default();
        deck.runs += 1;
        deck.total_stages += stage_reached as u32;
        deck.best_stage = deck.best_stage.max(stage_reached);
        deck.hands_played += stats.hands_played;
        deck.hands_won += stats.hands_won;
        deck.blackjacks += stats.blackjacks;
        deck.best_chips = deck.best_chips.max(stats.peak_chips);
        if victory {
            deck.victories += 1;
            if let Some(ms) = duration_ms {
                deck.fastest_victory_ms = Some(match deck.fastest_victory_ms {
                    Some(best) => best.min(ms),
                    None => ms,
                });
            }
        }
        let earnings = dust_for_run(stats, stage_reached, victory);
        let earned: i64 = earnings.iter().map(|entry| entry.amount).sum();
        self.dust += earned;
        self.stats.total_dust_earned += earned;
        let unlocked = self.check_achievement_unlocks(content);
        (earnings, unlocked)
    }

    fn check_achievement_unlocks(&mut self, content: &Content) -> Vec<String> {
        let mut newly = Vec::new();
        for deck in &content.decks {
            if self.deck_unlocked(&deck.id) {
                continue;
            }
            let met = match deck.unlock {
                UnlockRule::Default => true,
                UnlockRule::TotalVictories(n) => self.stats.total_victories >= n,
                UnlockRule::BlackjacksInOneRun(n) => self.stats.most_blackjacks_in_run >= n,
                UnlockRule::ReachStage(s) => self.stats.highest_stage_reached >= s,
            };
            if met {
                self.unlocked_decks.insert(deck.id.clone());
                newly.push(deck.id.clone());
            }
        }
        newly
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stats_with(hands: u32, wins: u32, blackjacks: u32) -> RunStats {
        RunStats {
            hands_played: hands,
            hands_won: wins,
            blackjacks,
            ..RunStats::default()
        }
    }

    #[test]
    fn losing_run_earns_consolation_dust() {
        let earnings = dust_for_run(&stats_with(10, 4, 1), 3, false);
        let total: i64 = earnings.iter().map(|entry| entry.amount).sum();
        // 10 hands + 4 wins + 2 blackjack + 15 consolation
        assert_eq!(total, 31);
        assert!(earnings.iter().any(|entry| entry.source == "consolation"));
    }

    #[test]
    fn victory_replaces_consolation() {
        let earnings = dust_for_run(&stats_with(0, 0, 0), 8, true);
        assert_eq!(
            earnings,
            vec![DustEarning {
                source: "victory".to_string(),
                amount: 50
            }]
        );
    }

    #[test]
    fn per_deck_records_accumulate_across_runs() {
        let content = Content::default();
        let mut progress = MetaProgress::default();
        let mut stats = stats_with(10, 6, 2);
        stats.peak_chips = 120;
        progress.absorb_run(&content, &stats, "grinder", 5, false, None);
        let mut second = stats_with(6, 5, 1);
        second.peak_chips = 90;
        progress.absorb_run(&content, &second, "grinder", 8, true, Some(90_000));
        let deck = &progress.deck_stats["grinder"];
        assert_eq!(deck.runs, 2);
        assert_eq!(deck.victories, 1);
        assert_eq!(deck.best_stage, 8);
        assert_eq!(deck.average_stage(), 6.5);
        assert_eq!(deck.hands_played, 16);
        assert_eq!(deck.hands_won, 11);
        assert_eq!(deck.blackjacks, 3);
        assert_eq!(deck.best_chips, 120);
        assert_eq!(deck.fastest_victory_ms, Some(90_000));
        assert!((deck.win_rate() - 11.0 / 16.0).abs() < 1e-9);
    }

    #[test]
    fn dust_unlock_spends_and_rejects_rebuy() {
        let content = crate::Content {
            decks: vec![crate::StarterDeckDef {
                id: "high_roller".to_string(),
                name: "High Roller".to_string(),
                tagline: String::new(),
                starting_chips: 45,
                starting_edge: 5,
                max_edge: 8,
                recipe: Vec::new(),
                specials: Vec::new(),
                deck_trait: crate::TraitKind::PowerStance,
                unlock: UnlockRule::TotalVictories(3),
                dust_cost: 500,
            }],
            ..Content::default()
        };
        let mut progress = MetaProgress::new_profile(&content);
        progress.dust = 600;
        progress
            .unlock_deck_with_dust(&content, "high_roller")
            .unwrap();
        assert_eq!(progress.dust, 100);
        assert!(matches!(
            progress.unlock_deck_with_dust(&content, "high_roller"),
            Err(MetaError::AlreadyUnlocked)
        ));
    }
}
