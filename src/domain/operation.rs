use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Cents, cents_as_string};

/// Operation kind: credits increase a statement's balance, debits decrease it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OperationKind {
    Credit,
    Debit,
}

impl OperationKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            OperationKind::Credit => "credit",
            OperationKind::Debit => "debit",
        }
    }
}

impl std::fmt::Display for OperationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A single statement entry. Operations are immutable: the statement is
/// append-only and entries are never edited or removed, so corrections only
/// ever happen through further operations.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Operation {
    #[serde(rename = "type")]
    pub kind: OperationKind,
    /// Amount in cents (always positive; the kind carries the direction)
    #[serde(rename = "amount", with = "cents_as_string")]
    pub amount_cents: Cents,
    /// Free-form label supplied on deposits. Debits carry none.
    pub description: Option<String>,
    /// When the operation was recorded
    pub timestamp: DateTime<Utc>,
}

impl Operation {
    /// Create a credit entry.
    pub fn credit(
        amount_cents: Cents,
        description: Option<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        assert!(amount_cents > 0, "Operation amount must be positive");
        Self {
            kind: OperationKind::Credit,
            amount_cents,
            description,
            timestamp,
        }
    }

    /// Create a debit entry.
    pub fn debit(amount_cents: Cents, timestamp: DateTime<Utc>) -> Self {
        assert!(amount_cents > 0, "Operation amount must be positive");
        Self {
            kind: OperationKind::Debit,
            amount_cents,
            description: None,
            timestamp,
        }
    }

    pub fn is_credit(&self) -> bool {
        self.kind == OperationKind::Credit
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credit_carries_description() {
        let op = Operation::credit(5000, Some("salary".into()), Utc::now());

        assert_eq!(op.kind, OperationKind::Credit);
        assert_eq!(op.amount_cents, 5000);
        assert_eq!(op.description.as_deref(), Some("salary"));
        assert!(op.is_credit());
    }

    #[test]
    fn test_debit_has_no_description() {
        let op = Operation::debit(3000, Utc::now());

        assert_eq!(op.kind, OperationKind::Debit);
        assert_eq!(op.amount_cents, 3000);
        assert_eq!(op.description, None);
        assert!(!op.is_credit());
    }

    #[test]
    fn test_kind_wire_names() {
        assert_eq!(OperationKind::Credit.as_str(), "credit");
        assert_eq!(OperationKind::Debit.as_str(), "debit");
        assert_eq!(
            serde_json::to_string(&OperationKind::Credit).unwrap(),
            "\"credit\""
        );
    }

    #[test]
    fn test_operation_wire_shape() {
        let op = Operation::credit(10050, Some("salary".into()), Utc::now());
        let value = serde_json::to_value(&op).unwrap();

        assert_eq!(value["type"], "credit");
        assert_eq!(value["amount"], "100.50");
        assert_eq!(value["description"], "salary");
        assert!(value["timestamp"].is_string());

        let back: Operation = serde_json::from_value(value).unwrap();
        assert_eq!(back, op);
    }

    #[test]
    #[should_panic(expected = "Operation amount must be positive")]
    fn test_operation_requires_positive_amount() {
        Operation::credit(0, None, Utc::now());
    }
}
