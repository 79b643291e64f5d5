pub mod assessment;
pub mod chain;
pub mod classifier;
pub mod comparator;
pub mod engine;
pub mod network;
pub mod patterns;
pub mod policy;
pub mod scorer;
pub mod stats;

pub use assessment::{Recommendation, RecommendationSet};
pub use chain::{AddressPredicate, RewardParams};
pub use classifier::{Classification, ClassificationRule, RulePredicate, RuleSet};
pub use engine::ScoringEngine;
pub use network::HealthModel;
pub use policy::{ChainParams, PolicyName, ScoringPolicy};
pub use scorer::OverallWeights;
