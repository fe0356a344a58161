use std::fmt::Debug;

use crate::domain::Variant;

/// Trait for stateless transaction evaluators.
///
/// Evaluators run synchronously in the request path. They hold no state,
/// perform no I/O and return exactly one decision for every input, so a
/// single instance can be shared across any number of concurrent requests.
pub trait Evaluator: Send + Sync + Debug {
    /// Transaction shape this evaluator judges.
    type Transaction;

    /// Decision record it produces.
    type Decision;

    /// Unique identifier for this evaluator.
    fn id(&self) -> &str;

    /// The deployable policy this evaluator implements.
    fn variant(&self) -> Variant;

    /// Evaluate a transaction.
    fn evaluate(&self, tx: &Self::Transaction) -> Self::Decision;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct EchoEvaluator;

    impl Evaluator for EchoEvaluator {
        type Transaction = String;
        type Decision = String;

        fn id(&self) -> &str {
            "ECHO"
        }

        fn variant(&self) -> Variant {
            Variant::Tiered
        }

        fn evaluate(&self, tx: &String) -> String {
            tx.clone()
        }
    }

    fn assert_shareable<T: Send + Sync + 'static>(_: &T) {}

    #[test]
    fn test_evaluator_trait() {
        let evaluator = EchoEvaluator;

        assert_eq!(evaluator.id(), "ECHO");
        assert_eq!(evaluator.evaluate(&"tx".to_string()), "tx");
        assert_shareable(&evaluator);
    }
}
