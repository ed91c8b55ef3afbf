use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};
use parking_lot::{Mutex, RwLock};
use uuid::Uuid;

use crate::domain::{
    Cents, Customer, CustomerId, DepositError, Operation, TaxId, WithdrawalError, check_deposit,
    check_withdrawal, compute_balance, operations_on,
};

/// Mutable slice of a customer record. Everything that can change after
/// registration lives here, behind the record's mutex.
#[derive(Debug)]
struct CustomerState {
    name: String,
    statement: Vec<Operation>,
}

/// One registered customer. Identity fields never change; `state` is guarded
/// so a balance check and the append it authorizes form one critical section.
#[derive(Debug)]
pub struct CustomerRecord {
    id: CustomerId,
    tax_id: TaxId,
    created_at: DateTime<Utc>,
    state: Mutex<CustomerState>,
}

impl CustomerRecord {
    fn new(tax_id: TaxId, name: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            tax_id,
            created_at: Utc::now(),
            state: Mutex::new(CustomerState {
                name,
                statement: Vec::new(),
            }),
        }
    }

    /// Internal identifier, assigned at registration.
    pub fn id(&self) -> CustomerId {
        self.id
    }

    /// Business key the boundary resolves customers by.
    pub fn tax_id(&self) -> &TaxId {
        &self.tax_id
    }

    /// Replace the customer's name. Statement and identity are untouched.
    pub fn rename(&self, name: String) {
        self.state.lock().name = name;
    }

    /// Append a credit if the balance stays representable. Check and append
    /// run under the same lock, and the timestamp is taken inside the
    /// critical section, so statement order follows timestamp order for any
    /// one customer. The statement is unchanged on rejection.
    pub fn credit(
        &self,
        amount_cents: Cents,
        description: Option<String>,
    ) -> Result<Operation, DepositError> {
        let mut state = self.state.lock();
        check_deposit(&state.statement, amount_cents)?;
        let operation = Operation::credit(amount_cents, description, Utc::now());
        state.statement.push(operation.clone());
        Ok(operation)
    }

    /// Append a debit if the current balance covers it. Check and append run
    /// under the same lock, so two concurrent withdrawals cannot both pass
    /// the balance check. The statement is unchanged on rejection.
    pub fn debit(&self, amount_cents: Cents) -> Result<Operation, WithdrawalError> {
        let mut state = self.state.lock();
        check_withdrawal(&state.statement, amount_cents)?;
        let operation = Operation::debit(amount_cents, Utc::now());
        state.statement.push(operation.clone());
        Ok(operation)
    }

    /// Current balance of the statement.
    pub fn balance(&self) -> Cents {
        compute_balance(&self.state.lock().statement)
    }

    /// Copy of the full statement, in append order.
    pub fn statement(&self) -> Vec<Operation> {
        self.state.lock().statement.clone()
    }

    /// Copy of the operations recorded on the given UTC calendar day.
    pub fn statement_on(&self, day: NaiveDate) -> Vec<Operation> {
        operations_on(&self.state.lock().statement, day)
    }

    /// Owned snapshot of the whole record.
    pub fn snapshot(&self) -> Customer {
        let state = self.state.lock();
        Customer {
            id: self.id,
            tax_id: self.tax_id.clone(),
            name: state.name.clone(),
            statement: state.statement.clone(),
            created_at: self.created_at,
        }
    }
}

/// In-memory directory of registered customers, in registration order.
///
/// The directory lock serializes registrations, lookups and removals; each
/// record carries its own lock for statement operations, so ledger activity
/// on different customers proceeds in parallel. Lock order is always
/// directory first, then record.
#[derive(Debug, Default)]
pub struct CustomerDirectory {
    records: RwLock<Vec<Arc<CustomerRecord>>>,
}

impl CustomerDirectory {
    /// Create an empty directory.
    pub fn new() -> Self {
        Self::default()
    }

    // ========================
    // Mutations
    // ========================

    /// Insert a new customer if the tax id is free. Returns `None` when a
    /// customer with the same tax id already exists; the directory is
    /// unchanged in that case. Check and insert share the write lock.
    pub fn register(&self, tax_id: TaxId, name: String) -> Option<Arc<CustomerRecord>> {
        let mut records = self.records.write();
        if records.iter().any(|record| record.tax_id == tax_id) {
            return None;
        }
        let record = Arc::new(CustomerRecord::new(tax_id, name));
        records.push(Arc::clone(&record));
        Some(record)
    }

    /// Remove the customer with the given id. Removal is keyed on identity,
    /// never on position. Returns whether a record was removed.
    pub fn remove(&self, id: CustomerId) -> bool {
        let mut records = self.records.write();
        let before = records.len();
        records.retain(|record| record.id != id);
        records.len() < before
    }

    // ========================
    // Lookups
    // ========================

    /// Resolve a customer by tax id. Pure read.
    pub fn find_by_tax_id(&self, tax_id: &TaxId) -> Option<Arc<CustomerRecord>> {
        self.records
            .read()
            .iter()
            .find(|record| record.tax_id == *tax_id)
            .cloned()
    }

    /// Snapshot of every customer, in registration order.
    pub fn list_all(&self) -> Vec<Customer> {
        self.records
            .read()
            .iter()
            .map(|record| record.snapshot())
            .collect()
    }
}
