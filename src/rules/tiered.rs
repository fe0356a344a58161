use crate::domain::{Action, ActionDecision, ScoredTransaction, Variant};
use crate::rules::traits::Evaluator;

/// Risk scores strictly above this are rejected.
pub const RISK_SCORE_REJECT_THRESHOLD: f64 = 0.85;

/// Amounts strictly above this go to manual review.
pub const MANUAL_REVIEW_AMOUNT_THRESHOLD: f64 = 50_000.0;

/// Three-tier action rule.
///
/// Checks run in strict priority order and the first match wins:
/// high risk score rejects, then a high amount sends the transaction to
/// manual review, otherwise it is approved.
#[derive(Debug, Default, Clone, Copy)]
pub struct TieredActionRule;

impl TieredActionRule {
    pub fn new() -> Self {
        TieredActionRule
    }

    fn action_for(tx: &ScoredTransaction) -> Action {
        if tx.risk_score > RISK_SCORE_REJECT_THRESHOLD {
            Action::Reject
        } else if tx.amount > MANUAL_REVIEW_AMOUNT_THRESHOLD {
            Action::ManualReview
        } else {
            Action::Approve
        }
    }
}

impl Evaluator for TieredActionRule {
    type Transaction = ScoredTransaction;
    type Decision = ActionDecision;

    fn id(&self) -> &str {
        "TIERED_ACTION"
    }

    fn variant(&self) -> Variant {
        Variant::Tiered
    }

    fn evaluate(&self, tx: &ScoredTransaction) -> ActionDecision {
        ActionDecision::new(tx.transaction_id.clone(), Self::action_for(tx))
    }
}
