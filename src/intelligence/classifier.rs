use std::fmt;

use serde::{Deserialize, Serialize};

/// Wallet classification categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Classification {
    /// Holds a large share of total supply.
    Whale,
    #[serde(rename = "Large Holder")]
    LargeHolder,
    #[serde(rename = "Active Trader")]
    ActiveTrader,
    #[serde(rename = "Active Staker")]
    ActiveStaker,
    #[serde(rename = "DeFi User")]
    DefiUser,
    Staker,
    #[serde(rename = "Regular User")]
    RegularUser,
}

impl Classification {
    pub const ALL: [Classification; 7] = [
        Classification::Whale,
        Classification::LargeHolder,
        Classification::ActiveTrader,
        Classification::ActiveStaker,
        Classification::DefiUser,
        Classification::Staker,
        Classification::RegularUser,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Classification::Whale => "Whale",
            Classification::LargeHolder => "Large Holder",
            Classification::ActiveTrader => "Active Trader",
            Classification::ActiveStaker => "Active Staker",
            Classification::DefiUser => "DeFi User",
            Classification::Staker => "Staker",
            Classification::RegularUser => "Regular User",
        }
    }
}

impl fmt::Display for Classification {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything a classification rule may look at.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassificationInput {
    pub whale_score: f64,
    pub influence_score: f64,
    pub defi_participation: bool,
    pub staking_amount: f64,
    pub staking_tx_count: usize,
    pub tx_count: usize,
}

/// A single condition over [`ClassificationInput`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "when", content = "value", rename_all = "snake_case")]
pub enum RulePredicate {
    WhaleScoreAtLeast(f64),
    WhaleScoreAbove(f64),
    InfluenceAtLeast(f64),
    DefiParticipation,
    StakingAmountAbove(f64),
    StakingTxCountAbove(usize),
    TxCountAbove(usize),
}

impl RulePredicate {
    pub fn matches(&self, input: &ClassificationInput) -> bool {
        match *self {
            RulePredicate::WhaleScoreAtLeast(t) => input.whale_score >= t,
            RulePredicate::WhaleScoreAbove(t) => input.whale_score > t,
            RulePredicate::InfluenceAtLeast(t) => input.influence_score >= t,
            RulePredicate::DefiParticipation => input.defi_participation,
            RulePredicate::StakingAmountAbove(t) => input.staking_amount > t,
            RulePredicate::StakingTxCountAbove(n) => input.staking_tx_count > n,
            RulePredicate::TxCountAbove(n) => input.tx_count > n,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRule {
    pub predicate: RulePredicate,
    pub label: Classification,
}

impl ClassificationRule {
    pub const fn new(predicate: RulePredicate, label: Classification) -> Self {
        Self { predicate, label }
    }
}

/// Ordered rules plus the label returned when none match.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleSet {
    pub rules: Vec<ClassificationRule>,
    pub fallback: Classification,
}

impl RuleSet {
    /// Precedence used when scoring caller-supplied wallet data.
    pub fn standard() -> Self {
        use Classification::*;
        use RulePredicate::*;

        Self {
            rules: vec![
                ClassificationRule::new(WhaleScoreAtLeast(0.8), Whale),
                ClassificationRule::new(WhaleScoreAtLeast(0.5), LargeHolder),
                ClassificationRule::new(InfluenceAtLeast(0.7), ActiveTrader),
                ClassificationRule::new(DefiParticipation, DefiUser),
                ClassificationRule::new(StakingAmountAbove(0.0), Staker),
            ],
            fallback: RegularUser,
        }
    }

    /// Precedence used for wallets resolved from live chain data.
    pub fn live() -> Self {
        use Classification::*;
        use RulePredicate::*;

        Self {
            rules: vec![
                ClassificationRule::new(WhaleScoreAbove(0.8), Whale),
                ClassificationRule::new(WhaleScoreAbove(0.5), LargeHolder),
                ClassificationRule::new(StakingTxCountAbove(10), ActiveStaker),
                ClassificationRule::new(TxCountAbove(100), ActiveTrader),
            ],
            fallback: RegularUser,
        }
    }

    /// First matching rule wins; total by construction.
    pub fn classify(&self, input: &ClassificationInput) -> Classification {
        self.rules
            .iter()
            .find(|rule| rule.predicate.matches(input))
            .map(|rule| rule.label)
            .unwrap_or(self.fallback)
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn input() -> ClassificationInput {
        ClassificationInput {
            whale_score: 0.1,
            influence_score: 0.1,
            defi_participation: false,
            staking_amount: 0.0,
            staking_tx_count: 0,
            tx_count: 0,
        }
    }

    #[test]
    fn test_standard_precedence() {
        let rules = RuleSet::standard();

        let whale = ClassificationInput { whale_score: 0.9, defi_participation: true, ..input() };
        assert_eq!(rules.classify(&whale), Classification::Whale);

        let boundary = ClassificationInput { whale_score: 0.8, ..input() };
        assert_eq!(rules.classify(&boundary), Classification::Whale);

        let large = ClassificationInput { whale_score: 0.5, influence_score: 0.9, ..input() };
        assert_eq!(rules.classify(&large), Classification::LargeHolder);

        let trader = ClassificationInput { influence_score: 0.7, defi_participation: true, ..input() };
        assert_eq!(rules.classify(&trader), Classification::ActiveTrader);

        let defi = ClassificationInput { defi_participation: true, staking_amount: 10.0, ..input() };
        assert_eq!(rules.classify(&defi), Classification::DefiUser);

        let staker = ClassificationInput { staking_amount: 10.0, ..input() };
        assert_eq!(rules.classify(&staker), Classification::Staker);

        assert_eq!(rules.classify(&input()), Classification::RegularUser);
    }

    #[test]
    fn test_live_precedence_uses_strict_thresholds() {
        let rules = RuleSet::live();

        let boundary = ClassificationInput { whale_score: 0.8, ..input() };
        assert_eq!(rules.classify(&boundary), Classification::LargeHolder);

        let staker = ClassificationInput { staking_tx_count: 11, tx_count: 500, ..input() };
        assert_eq!(rules.classify(&staker), Classification::ActiveStaker);

        let trader = ClassificationInput { staking_tx_count: 10, tx_count: 101, ..input() };
        assert_eq!(rules.classify(&trader), Classification::ActiveTrader);

        // DeFi and plain staking are not part of the live precedence.
        let defi = ClassificationInput { defi_participation: true, staking_amount: 5.0, ..input() };
        assert_eq!(rules.classify(&defi), Classification::RegularUser);
    }

    #[test]
    fn test_classify_is_total_over_a_grid() {
        let sets = [RuleSet::standard(), RuleSet::live()];
        for rules in &sets {
            for w in [0.0, 0.1, 0.3, 0.5, 0.7, 0.8, 0.9, 1.0] {
                for i in [0.0, 0.5, 0.7, 1.0] {
                    for defi in [false, true] {
                        let label = rules.classify(&ClassificationInput {
                            whale_score: w,
                            influence_score: i,
                            defi_participation: defi,
                            staking_amount: 1.0,
                            staking_tx_count: 3,
                            tx_count: 200,
                        });
                        assert!(Classification::ALL.contains(&label));
                    }
                }
            }
        }
    }

    #[test]
    fn test_empty_rule_set_falls_back() {
        let rules = RuleSet { rules: vec![], fallback: Classification::RegularUser };
        let whale = ClassificationInput { whale_score: 1.0, ..input() };
        assert_eq!(rules.classify(&whale), Classification::RegularUser);
    }

    #[test]
    fn test_classification_serializes_display_label() {
        let json = serde_json::to_string(&Classification::LargeHolder).unwrap();
        assert_eq!(json, "\"Large Holder\"");
        assert_eq!(Classification::DefiUser.to_string(), "DeFi User");
    }
}
