use chrono::NaiveDate;

use super::{Cents, Operation, OperationKind, format_cents};

/// Compute the balance of a statement.
/// Balance = sum of credit amounts - sum of debit amounts
pub fn compute_balance(statement: &[Operation]) -> Cents {
    statement.iter().fold(0, |balance, operation| {
        match operation.kind {
            OperationKind::Credit => balance + operation.amount_cents,
            OperationKind::Debit => balance - operation.amount_cents,
        }
    })
}

/// Return the operations recorded on the given calendar day, in statement
/// order.
///
/// Timestamps are stored as UTC instants and the comparison uses the UTC
/// calendar date of each operation, so a given `day` selects the window
/// `[00:00:00, 24:00:00)` UTC. Callers parse and validate the requested
/// date before getting here.
pub fn operations_on(statement: &[Operation], day: NaiveDate) -> Vec<Operation> {
    statement
        .iter()
        .filter(|operation| operation.timestamp.date_naive() == day)
        .cloned()
        .collect()
}

/// Validate that a withdrawal is covered by the statement's current balance.
///
/// This is the check half of the ledger's check-then-append rule; the caller
/// must hold the statement lock across both halves so two concurrent
/// withdrawals cannot both observe the same balance.
pub fn check_withdrawal(
    statement: &[Operation],
    amount_cents: Cents,
) -> Result<(), WithdrawalError> {
    let balance = compute_balance(statement);
    if balance < amount_cents {
        return Err(WithdrawalError::InsufficientFunds {
            balance,
            requested: amount_cents,
        });
    }
    Ok(())
}

/// Validate that a deposit keeps the balance representable in cents.
///
/// Like [`check_withdrawal`], this is the check half of a check-then-append
/// pair and must run under the statement lock. With every committed credit
/// passing this check and every committed debit covered by the balance, the
/// running balance stays within `0..=i64::MAX` at every point of the
/// statement, so [`compute_balance`] never overflows.
pub fn check_deposit(statement: &[Operation], amount_cents: Cents) -> Result<(), DepositError> {
    let balance = compute_balance(statement);
    if balance.checked_add(amount_cents).is_none() {
        return Err(DepositError::BalanceOverflow {
            balance,
            requested: amount_cents,
        });
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WithdrawalError {
    InsufficientFunds { balance: Cents, requested: Cents },
}

impl std::fmt::Display for WithdrawalError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WithdrawalError::InsufficientFunds { balance, requested } => {
                write!(
                    f,
                    "Withdrawal of {} exceeds balance of {}",
                    format_cents(*requested),
                    format_cents(*balance)
                )
            }
        }
    }
}

impl std::error::Error for WithdrawalError {}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DepositError {
    BalanceOverflow { balance: Cents, requested: Cents },
}

impl std::fmt::Display for DepositError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DepositError::BalanceOverflow { balance, requested } => {
                write!(
                    f,
                    "Deposit of {} would overflow balance of {}",
                    format_cents(*requested),
                    format_cents(*balance)
                )
            }
        }
    }
}

impl std::error::Error for DepositError {}
