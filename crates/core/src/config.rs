use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StageRule {
    pub stage: u8,
    pub wins_required: u32,
    pub boss: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdgeRule {
    pub starting: i64,
    pub cap: i64,
    pub regen_per_hand: i64,
    pub stage_clear_bonus: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TableRule {
    pub starting_chips: i64,
    pub min_bet: i64,
    pub blackjack_payout: f64,
    pub dealer_stand_value: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ShopRule {
    pub remove_card_cost: i64,
    pub min_deck_size: usize,
    pub reward_options: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeckRule {
    /// Rebuild the player pile between hands below this count.
    pub regen_threshold: usize,
    /// Reshuffle a boss pile between hands below this count.
    pub boss_reshuffle_threshold: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GameConfig {
    pub stages: Vec<StageRule>,
    pub table: TableRule,
    pub edge: EdgeRule,
    pub shop: ShopRule,
    pub deck: DeckRule,
    pub max_equipped_powers: usize,
    pub power_choices: usize,
}

impl GameConfig {
    pub fn standard() -> Self {
        Self {
            stages: vec![
                StageRule { stage: 1, wins_required: 3, boss: false },
                StageRule { stage: 2, wins_required: 3, boss: false },
                StageRule { stage: 3, wins_required: 4, boss: false },
                StageRule { stage: 4, wins_required: 4, boss: true },
                StageRule { stage: 5, wins_required: 5, boss: false },
                StageRule { stage: 6, wins_required: 5, boss: true },
                StageRule { stage: 7, wins_required: 6, boss: false },
                StageRule { stage: 8, wins_required: 6, boss: true },
            ],
            table: TableRule {
                starting_chips: 50,
                min_bet: 5,
                blackjack_payout: 1.5,
                dealer_stand_value: 17,
            },
            edge: EdgeRule {
                starting: 5,
                cap: 8,
                regen_per_hand: 1,
                stage_clear_bonus: 2,
            },
            shop: ShopRule {
                remove_card_cost: 10,
                min_deck_size: 8,
                reward_options: 3,
            },
            deck: DeckRule {
                regen_threshold: 10,
                boss_reshuffle_threshold: 4,
            },
            max_equipped_powers: 3,
            power_choices: 3,
        }
    }

    pub fn stage_rule(&self, stage: u8) -> Option<&StageRule> {
        self.stages.iter().find(|rule| rule.stage == stage)
    }

    pub fn wins_required(&self, stage: u8) -> u32 {
        self.stage_rule(stage).map(|rule| rule.wins_required).unwrap_or(u32::MAX)
    }

    pub fn is_boss_stage(&self, stage: u8) -> bool {
        self.stage_rule(stage).map(|rule| rule.boss).unwrap_or(false)
    }

    pub fn max_stage(&self) -> u8 {
        self.stages.iter().map(|rule| rule.stage).max().unwrap_or(1)
    }

    /// Highest power tier offered at a given stage.
    pub fn power_tier_cap(&self, stage: u8) -> u8 {
        match stage {
            0..=3 => 2,
            4..=6 => 3,
            _ => 4,
        }
    }

    /// Number of stage challenges rolled when entering a stage.
    pub fn challenge_count(&self, stage: u8) -> usize {
        match stage {
            0..=3 => 0,
            4..=5 => 1,
            6..=7 => 2,
            _ => 3,
        }
    }
}

impl Default for GameConfig {
    fn default() -> Self {
        Self::standard()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn stage_table_covers_eight_stages() {
        let config = GameConfig::standard();
        assert_eq!(config.max_stage(), 8);
        assert_eq!(config.wins_required(1), 3);
        assert_eq!(config.wins_required(8), 6);
        assert!(config.is_boss_stage(4));
        assert!(config.is_boss_stage(6));
        assert!(config.is_boss_stage(8));
        assert!(!config.is_boss_stage(7));
    }

    #[test]
    fn challenge_count_scales_with_stage() {
        let config = GameConfig::standard();
        assert_eq!(config.challenge_count(3), 0);
        assert_eq!(config.challenge_count(4), 1);
        assert_eq!(config.challenge_count(7), 2);
        assert_eq!(config.challenge_count(8), 3);
    }
}
