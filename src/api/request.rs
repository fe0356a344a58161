use serde::de::{self, Deserializer, IgnoredAny, MapAccess, Visitor};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::{CardId, CardTransaction, ScoredTransaction, TransactionId, UserId};

/// Request body for `/evaluate`.
///
/// Decoding is lenient: keys match field names case-insensitively, a
/// `null` value leaves the field at its zero value, unknown keys are
/// skipped, and a `null` body decodes to an all-default request. When a
/// key appears more than once the last non-null value wins.
#[derive(Debug, Default, Serialize)]
pub struct EvaluateRequest {
    pub transaction_id: String,
    pub amount: f64,
    pub user_id: String,
    /// Upstream risk score, conceptually in [0, 1]
    pub risk_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum EvaluateField {
    TransactionId,
    Amount,
    UserId,
    RiskScore,
}

impl EvaluateField {
    const ALL: [(&'static str, EvaluateField); 4] = [
        ("transaction_id", EvaluateField::TransactionId),
        ("amount", EvaluateField::Amount),
        ("user_id", EvaluateField::UserId),
        ("risk_score", EvaluateField::RiskScore),
    ];

    fn from_key(key: &str) -> Option<Self> {
        Self::ALL
            .iter()
            .find(|(name, _)| fold_eq(key, name))
            .map(|(_, field)| *field)
    }
}

/// Simple case folding over a lowercase ASCII field name.
///
/// U+212A KELVIN SIGN folds to `k` and U+017F LONG S folds to `s`.
fn fold_eq(key: &str, name: &str) -> bool {
    let mut key_chars = key.chars();
    for expected in name.chars() {
        let folded = match key_chars.next() {
            Some('\u{212A}') => 'k',
            Some('\u{017F}') => 's',
            Some(c) => c.to_ascii_lowercase(),
            None => return false,
        };
        if folded != expected {
            return false;
        }
    }
    key_chars.next().is_none()
}

impl<'de> Deserialize<'de> for EvaluateRequest {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(EvaluateRequestVisitor)
    }
}

struct EvaluateRequestVisitor;

impl<'de> Visitor<'de> for EvaluateRequestVisitor {
    type Value = EvaluateRequest;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a transaction object")
    }

    fn visit_unit<E>(self) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(EvaluateRequest::default())
    }

    fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
    where
        A: MapAccess<'de>,
    {
        let mut req = EvaluateRequest::default();

        while let Some(key) = map.next_key::<String>()? {
            match EvaluateField::from_key(&key) {
                Some(EvaluateField::TransactionId) => {
                    if let Some(v) = map.next_value::<Option<String>>()? {
                        req.transaction_id = v;
                    }
                }
                Some(EvaluateField::Amount) => {
                    if let Some(v) = map.next_value::<Option<f64>>()? {
                        req.amount = v;
                    }
                }
                Some(EvaluateField::UserId) => {
                    if let Some(v) = map.next_value::<Option<String>>()? {
                        req.user_id = v;
                    }
                }
                Some(EvaluateField::RiskScore) => {
                    if let Some(v) = map.next_value::<Option<f64>>()? {
                        req.risk_score = v;
                    }
                }
                None => {
                    map.next_value::<IgnoredAny>()?;
                }
            }
        }

        Ok(req)
    }
}

impl EvaluateRequest {
    /// Convert to a ScoredTransaction for rule evaluation.
    pub fn into_transaction(self) -> ScoredTransaction {
        ScoredTransaction {
            transaction_id: TransactionId::new(self.transaction_id),
            amount: self.amount,
            user_id: UserId::new(self.user_id),
            risk_score: self.risk_score,
        }
    }
}

/// Request body for `/rule`.
#[derive(Debug, Serialize, Deserialize)]
pub struct RuleRequest {
    pub transaction_id: String,
    pub amount: f64,
    pub card_id: String,
}

impl RuleRequest {
    /// Convert to a CardTransaction for rule evaluation.
    pub fn into_transaction(self) -> CardTransaction {
        CardTransaction {
            transaction_id: TransactionId::new(self.transaction_id),
            amount: self.amount,
            card_id: CardId::new(self.card_id),
        }
    }
}
