use crate::domain::{CardTransaction, FraudDecision, FraudReason, Variant};
use crate::rules::traits::Evaluator;

/// Amounts strictly above this are flagged as fraud.
pub const FRAUD_AMOUNT_THRESHOLD: f64 = 5_000.0;

/// Amounts at or below this are flagged as invalid.
pub const MIN_VALID_AMOUNT: f64 = 0.0;

/// Boolean fraud flag rule.
///
/// Both checks always run, in order. When the invalid amount check
/// matches it overwrites whatever the threshold check decided.
#[derive(Debug, Default, Clone, Copy)]
pub struct AmountFlagRule;

impl AmountFlagRule {
    pub fn new() -> Self {
        AmountFlagRule
    }

    fn reason_for(tx: &CardTransaction) -> FraudReason {
        let mut reason = FraudReason::Ok;

        if tx.amount > FRAUD_AMOUNT_THRESHOLD {
            reason = FraudReason::AmountThreshold;
        }

        // Not an else-if: this check runs unconditionally.
        if tx.amount <= MIN_VALID_AMOUNT {
            reason = FraudReason::InvalidAmount;
        }

        reason
    }
}

impl Evaluator for AmountFlagRule {
    type Transaction = CardTransaction;
    type Decision = FraudDecision;

    fn id(&self) -> &str {
        "AMOUNT_FLAG"
    }

    fn variant(&self) -> Variant {
        Variant::FraudFlag
    }

    fn evaluate(&self, tx: &CardTransaction) -> FraudDecision {
        FraudDecision::new(tx.transaction_id.clone(), Self::reason_for(tx))
    }
}
