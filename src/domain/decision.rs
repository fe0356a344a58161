use serde::{Deserialize, Serialize};
use std::fmt;

use super::transaction::TransactionId;

/// Outcome of the tiered action rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Action {
    /// Transaction approved
    Approve,
    /// Requires manual review
    ManualReview,
    /// Transaction rejected
    Reject,
}

impl Action {
    /// The single justification attached to this action.
    #[inline]
    pub fn reason(&self) -> ActionReason {
        match self {
            Action::Approve => ActionReason::AllChecksPassed,
            Action::ManualReview => ActionReason::HighTransactionAmount,
            Action::Reject => ActionReason::HighRiskScore,
        }
    }

    /// Wire name of this action.
    pub fn as_str(&self) -> &'static str {
        match self {
            Action::Approve => "APPROVE",
            Action::ManualReview => "MANUAL_REVIEW",
            Action::Reject => "REJECT",
        }
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Human-readable justification for an [`Action`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ActionReason {
    #[serde(rename = "High risk score")]
    HighRiskScore,
    #[serde(rename = "High transaction amount")]
    HighTransactionAmount,
    #[serde(rename = "All checks passed")]
    AllChecksPassed,
}

impl ActionReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            ActionReason::HighRiskScore => "High risk score",
            ActionReason::HighTransactionAmount => "High transaction amount",
            ActionReason::AllChecksPassed => "All checks passed",
        }
    }
}

impl fmt::Display for ActionReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of the tiered action rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActionDecision {
    pub transaction_id: TransactionId,
    pub action: Action,
    pub reason: ActionReason,
}

impl ActionDecision {
    /// Create a decision; the reason follows from the action.
    pub fn new(transaction_id: TransactionId, action: Action) -> Self {
        ActionDecision {
            transaction_id,
            action,
            reason: action.reason(),
        }
    }
}

/// Justification code of the amount flag rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FraudReason {
    /// Amount above the fraud threshold
    AmountThreshold,
    /// Zero or negative amount
    InvalidAmount,
    /// No check matched
    Ok,
}

impl FraudReason {
    /// Returns true if this reason marks the transaction as fraudulent.
    #[inline]
    pub fn is_fraud(&self) -> bool {
        !matches!(self, FraudReason::Ok)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FraudReason::AmountThreshold => "amount_threshold",
            FraudReason::InvalidAmount => "invalid_amount",
            FraudReason::Ok => "ok",
        }
    }
}

impl Default for FraudReason {
    fn default() -> Self {
        FraudReason::Ok
    }
}

impl fmt::Display for FraudReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Verdict of the amount flag rule.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FraudDecision {
    pub transaction_id: TransactionId,
    pub is_fraud: bool,
    pub reason: FraudReason,
}

impl FraudDecision {
    /// Create a decision; the fraud flag follows from the reason.
    pub fn new(transaction_id: TransactionId, reason: FraudReason) -> Self {
        FraudDecision {
            transaction_id,
            is_fraud: reason.is_fraud(),
            reason,
        }
    }
}
