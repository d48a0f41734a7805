use crate::{Outcome, TiePolicy};
use serde::{Deserialize, Serialize};

/// Rule sources in ascending precedence. When two sources set the same
/// field, the higher one wins; chip adjustments always sum instead.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord)]
pub enum RuleSource {
    Baseline,
    DeckTrait,
    Power,
    Special,
    Challenge,
    Boss,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct OutcomeDecision {
    pub outcome: Outcome,
    pub source: RuleSource,
}

impl OutcomeDecision {
    pub fn baseline(outcome: Outcome) -> Self {
        Self {
            outcome,
            source: RuleSource::Baseline,
        }
    }

    pub fn apply(&mut self, outcome: Outcome, source: RuleSource) {
        if source >= self.source {
            self.outcome = outcome;
            self.source = source;
        }
    }
}

/// A payout multiplier that can be replaced by a higher-precedence source.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PayoutOverride {
    pub multiplier: f64,
    pub source: RuleSource,
}

impl PayoutOverride {
    pub fn baseline(multiplier: f64) -> Self {
        Self {
            multiplier,
            source: RuleSource::Baseline,
        }
    }

    pub fn apply(&mut self, multiplier: f64, source: RuleSource) {
        if source >= self.source {
            self.multiplier = multiplier;
            self.source = source;
        }
    }
}

/// Chip adjustments from any source, summed at settlement.
#[derive(Debug, Default, Clone)]
pub struct ChipLedger {
    entries: Vec<(RuleSource, i64)>,
}

impl ChipLedger {
    pub fn add(&mut self, source: RuleSource, amount: i64) {
        if amount != 0 {
            self.entries.push((source, amount));
        }
    }

    pub fn total(&self) -> i64 {
        self.entries.iter().map(|(_, amount)| amount).sum()
    }
}

/// Table-level overrides collected before a showdown is settled.
#[derive(Debug, Clone, Copy)]
pub struct ShowdownRules {
    pub dealer_wins_pushes: bool,
    pub tie_policy: TiePolicy,
}

impl Default for ShowdownRules {
    fn default() -> Self {
        Self {
            dealer_wins_pushes: false,
            tie_policy: TiePolicy::Push,
        }
    }
}

/// Compare standing totals once the dealer has finished. Busts on either
/// side are settled before this point.
pub fn resolve_showdown(player: i64, dealer: i64, rules: &ShowdownRules) -> OutcomeDecision {
    let baseline = if player > dealer {
        Outcome::Win
    } else if player < dealer {
        Outcome::Lose
    } else {
        Outcome::Push
    };
    let mut decision = OutcomeDecision::baseline(baseline);
    if decision.outcome == Outcome::Push {
        if rules.dealer_wins_pushes {
            decision.apply(Outcome::Lose, RuleSource::Challenge);
        }
        match rules.tie_policy {
            TiePolicy::Push => {}
            TiePolicy::LoseAt(total) => {
                if player == total {
                    decision.apply(Outcome::Lose, RuleSource::Boss);
                }
            }
            TiePolicy::AllLose => decision.apply(Outcome::Lose, RuleSource::Boss),
        }
    }
    decision
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn higher_totals_win() {
        let rules = ShowdownRules::default();
        assert_eq!(resolve_showdown(20, 18, &rules).outcome, Outcome::Win);
        assert_eq!(resolve_showdown(17, 19, &rules).outcome, Outcome::Lose);
        assert_eq!(resolve_showdown(18, 18, &rules).outcome, Outcome::Push);
    }

    #[test]
    fn boss_tie_policy_outranks_baseline_push() {
        let rules = ShowdownRules {
            dealer_wins_pushes: false,
            tie_policy: TiePolicy::AllLose,
        };
        let decision = resolve_showdown(19, 19, &rules);
        assert_eq!(decision.outcome, Outcome::Lose);
        assert_eq!(decision.source, RuleSource::Boss);
    }

    #[test]
    fn tie_at_specific_total_only() {
        let rules = ShowdownRules {
            dealer_wins_pushes: false,
            tie_policy: TiePolicy::LoseAt(17),
        };
        assert_eq!(resolve_showdown(17, 17, &rules).outcome, Outcome::Lose);
        assert_eq!(resolve_showdown(20, 20, &rules).outcome, Outcome::Push);
    }

    #[test]
    fn higher_source_replaces_lower() {
        let mut decision = OutcomeDecision::baseline(Outcome::Push);
        decision.apply(Outcome::Lose, RuleSource::Challenge);
        decision.apply(Outcome::Push, RuleSource::DeckTrait);
        assert_eq!(decision.outcome, Outcome::Lose);
        assert_eq!(decision.source, RuleSource::Challenge);
    }

    #[test]
    fn ledger_sums_instead_of_overriding() {
        let mut ledger = ChipLedger::default();
        ledger.add(RuleSource::Special, 3);
        ledger.add(RuleSource::DeckTrait, 1);
        ledger.add(RuleSource::Boss, -5);
        assert_eq!(ledger.total(), -1);
    }
}
