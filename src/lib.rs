pub mod api;
pub mod config;
pub mod domain;
pub mod observability;
pub mod rules;

pub use config::Config;
pub use domain::{ActionDecision, CardTransaction, FraudDecision, ScoredTransaction, Variant};
pub use rules::{AmountFlagRule, Evaluator, RuleSet, TieredActionRule};
