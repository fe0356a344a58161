use serde::{Deserialize, Serialize};
use std::fmt;

/// Caller-supplied transaction identifier, echoed back verbatim.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TransactionId(pub String);

impl TransactionId {
    pub fn new(id: impl Into<String>) -> Self {
        TransactionId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TransactionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Unique user identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UserId(pub String);

impl UserId {
    pub fn new(id: impl Into<String>) -> Self {
        UserId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Payment card identifier.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CardId(pub String);

impl CardId {
    pub fn new(id: impl Into<String>) -> Self {
        CardId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Transaction carrying an upstream risk score.
///
/// Input to the tiered action rule. The score is conceptually in `[0, 1]`
/// but the range is not enforced; out-of-range values are judged as data.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredTransaction {
    pub transaction_id: TransactionId,
    pub amount: f64,
    pub user_id: UserId,
    pub risk_score: f64,
}

/// Card transaction without a risk score.
///
/// Input to the amount flag rule. Zero and negative amounts are valid
/// values here; rejecting them is the rule's job.
#[derive(Debug, Clone, PartialEq)]
pub struct CardTransaction {
    pub transaction_id: TransactionId,
    pub amount: f64,
    pub card_id: CardId,
}
