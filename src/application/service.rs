use std::sync::Arc;

use chrono::NaiveDate;

use crate::domain::{Cents, Customer, Operation, TaxId, parse_cents};
use crate::storage::{CustomerDirectory, CustomerRecord};

use super::AppError;

/// Application service providing the customer and ledger use cases.
/// This is the primary interface for any client (HTTP, tests, etc.).
pub struct LedgerService {
    directory: CustomerDirectory,
}

impl LedgerService {
    /// Create a new ledger service over the given directory.
    pub fn new(directory: CustomerDirectory) -> Self {
        Self { directory }
    }

    /// Resolve the customer record for a tax id. Every per-customer use case
    /// starts with this precondition; an unknown tax id is CustomerNotFound.
    fn resolve(&self, tax_id: &str) -> Result<Arc<CustomerRecord>, AppError> {
        self.directory
            .find_by_tax_id(&TaxId::new(tax_id))
            .ok_or_else(|| AppError::CustomerNotFound(tax_id.to_string()))
    }

    // ========================
    // Customer operations
    // ========================

    /// Register a new customer with an empty statement.
    pub fn register_customer(&self, tax_id: &str, name: &str) -> Result<Customer, AppError> {
        let record = self
            .directory
            .register(TaxId::new(tax_id), name.to_string())
            .ok_or_else(|| AppError::CustomerAlreadyExists(tax_id.to_string()))?;

        tracing::info!("registered customer {} with tax id {}", record.id(), tax_id);
        Ok(record.snapshot())
    }

    /// List every customer with their nested statement, in registration
    /// order.
    pub fn list_customers(&self) -> Vec<Customer> {
        self.directory.list_all()
    }

    /// Replace a customer's name.
    pub fn rename_customer(&self, tax_id: &str, name: &str) -> Result<Customer, AppError> {
        let record = self.resolve(tax_id)?;
        record.rename(name.to_string());
        Ok(record.snapshot())
    }

    /// Remove a customer. Their statement history becomes unreachable.
    pub fn remove_customer(&self, tax_id: &str) -> Result<(), AppError> {
        let record = self.resolve(tax_id)?;
        // A concurrent removal may have won between resolve and here.
        if !self.directory.remove(record.id()) {
            return Err(AppError::CustomerNotFound(tax_id.to_string()));
        }
        tracing::info!("removed customer {}", tax_id);
        Ok(())
    }

    // ========================
    // Ledger operations
    // ========================

    /// Record a credit on the customer's statement. The customer resolves
    /// before the amount is looked at, so an unknown tax id reports
    /// CustomerNotFound even when the amount is malformed.
    pub fn deposit(
        &self,
        tax_id: &str,
        amount: &str,
        description: Option<String>,
    ) -> Result<Operation, AppError> {
        let record = self.resolve(tax_id)?;

        // Validate amount
        let amount_cents = parse_amount(amount)?;
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        match record.credit(amount_cents, description) {
            Ok(operation) => {
                tracing::info!("credited {} cents to {}", operation.amount_cents, tax_id);
                Ok(operation)
            }
            Err(err) => {
                tracing::warn!("rejected deposit to {}: {}", tax_id, err);
                Err(err.into())
            }
        }
    }

    /// Record a debit if the customer's balance covers it. Resolution order
    /// matches [`Self::deposit`]; the statement is unchanged when the
    /// withdrawal is rejected.
    pub fn withdraw(&self, tax_id: &str, amount: &str) -> Result<Operation, AppError> {
        let record = self.resolve(tax_id)?;

        // Validate amount
        let amount_cents = parse_amount(amount)?;
        if amount_cents <= 0 {
            return Err(AppError::InvalidAmount(
                "Amount must be positive".to_string(),
            ));
        }

        match record.debit(amount_cents) {
            Ok(operation) => {
                tracing::info!("debited {} cents from {}", amount_cents, tax_id);
                Ok(operation)
            }
            Err(err) => {
                tracing::warn!("rejected withdrawal from {}: {}", tax_id, err);
                Err(err.into())
            }
        }
    }

    /// Current balance for the customer.
    pub fn balance(&self, tax_id: &str) -> Result<Cents, AppError> {
        Ok(self.resolve(tax_id)?.balance())
    }

    /// Full statement for the customer, in append order.
    pub fn statement(&self, tax_id: &str) -> Result<Vec<Operation>, AppError> {
        Ok(self.resolve(tax_id)?.statement())
    }

    /// Statement filtered to one calendar day, given as `YYYY-MM-DD`.
    /// Anything else, including an empty string, is InvalidDate.
    pub fn statement_on(&self, tax_id: &str, date: &str) -> Result<Vec<Operation>, AppError> {
        let record = self.resolve(tax_id)?;
        let day = NaiveDate::parse_from_str(date, "%Y-%m-%d")
            .map_err(|_| AppError::InvalidDate(date.to_string()))?;
        Ok(record.statement_on(day))
    }
}

/// Parse a wire amount into cents. Amounts arrive as decimal strings, so a
/// malformed one surfaces as a structured InvalidAmount instead of a body
/// rejection; responses format cents back through the serde adapter on
/// [`crate::domain::Operation`].
fn parse_amount(amount: &str) -> Result<Cents, AppError> {
    parse_cents(amount).map_err(|err| AppError::InvalidAmount(err.to_string()))
}
