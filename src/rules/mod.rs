pub mod amount_flag;
pub mod tiered;
pub mod traits;

pub use amount_flag::{AmountFlagRule, FRAUD_AMOUNT_THRESHOLD, MIN_VALID_AMOUNT};
pub use tiered::{TieredActionRule, MANUAL_REVIEW_AMOUNT_THRESHOLD, RISK_SCORE_REJECT_THRESHOLD};
pub use traits::Evaluator;

use crate::domain::Variant;

/// The evaluators a deployment serves.
///
/// Evaluators are stateless so both are always constructed; `enabled`
/// decides which ones get an endpoint.
#[derive(Debug, Clone)]
pub struct RuleSet {
    pub tiered: TieredActionRule,
    pub amount_flag: AmountFlagRule,
    pub enabled: Vec<Variant>,
}

impl RuleSet {
    /// Build a rule set serving the given variants.
    pub fn new(variants: &[Variant]) -> Self {
        let mut enabled: Vec<Variant> = Vec::with_capacity(variants.len());
        for variant in variants {
            if !enabled.contains(variant) {
                enabled.push(*variant);
            }
        }

        RuleSet {
            tiered: TieredActionRule::new(),
            amount_flag: AmountFlagRule::new(),
            enabled,
        }
    }

    /// Rule set serving every variant.
    pub fn all() -> Self {
        RuleSet::new(&Variant::ALL)
    }

    pub fn is_enabled(&self, variant: Variant) -> bool {
        self.enabled.contains(&variant)
    }

    pub fn is_empty(&self) -> bool {
        self.enabled.is_empty()
    }
}
