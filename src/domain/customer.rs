use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::{Cents, Operation, compute_balance};

/// Internal opaque identifier, generated at registration.
pub type CustomerId = Uuid;

/// External business key used by callers to resolve a customer (a national
/// tax number). Unique across the directory and immutable for the lifetime
/// of the customer; distinct from [`CustomerId`], which callers never supply.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TaxId(String);

impl TaxId {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for TaxId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<&str> for TaxId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

/// A registered customer with an owned snapshot of their statement.
///
/// The live record lives inside the directory behind its own lock; this is
/// the read-only view handed out to callers, so nothing outside the
/// directory ever observes a statement mid-mutation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Customer {
    pub id: CustomerId,
    pub tax_id: TaxId,
    pub name: String,
    /// Append-only, in insertion order
    pub statement: Vec<Operation>,
    pub created_at: DateTime<Utc>,
}

impl Customer {
    /// Net value of the snapshot's statement (credits minus debits).
    pub fn balance(&self) -> Cents {
        compute_balance(&self.statement)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tax_id_is_a_plain_string_key() {
        let a = TaxId::new("12345678900");
        let b = TaxId::from("12345678900");

        assert_eq!(a, b);
        assert_eq!(a.as_str(), "12345678900");
        assert_eq!(a.to_string(), "12345678900");
    }

    #[test]
    fn test_snapshot_balance() {
        let customer = Customer {
            id: Uuid::new_v4(),
            tax_id: TaxId::new("111"),
            name: "Alice".into(),
            statement: vec![
                Operation::credit(10000, Some("salary".into()), Utc::now()),
                Operation::debit(6000, Utc::now()),
            ],
            created_at: Utc::now(),
        };

        assert_eq!(customer.balance(), 4000);
    }
}
