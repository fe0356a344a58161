pub mod decision;
pub mod transaction;
pub mod variant;

pub use decision::{Action, ActionDecision, ActionReason, FraudDecision, FraudReason};
pub use transaction::{CardId, CardTransaction, ScoredTransaction, TransactionId, UserId};
pub use variant::Variant;
