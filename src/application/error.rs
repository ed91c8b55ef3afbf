use thiserror::Error;

use crate::domain::{Cents, DepositError, WithdrawalError, format_cents};

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Customer not found: {0}")]
    CustomerNotFound(String),

    #[error("Customer already exists: {0}")]
    CustomerAlreadyExists(String),

    #[error(
        "Insufficient funds: balance {}, requested {}",
        format_cents(*.balance),
        format_cents(*.requested)
    )]
    InsufficientFunds { balance: Cents, requested: Cents },

    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    #[error("Invalid date: {0}")]
    InvalidDate(String),
}

impl From<WithdrawalError> for AppError {
    fn from(err: WithdrawalError) -> Self {
        match err {
            WithdrawalError::InsufficientFunds { balance, requested } => {
                AppError::InsufficientFunds { balance, requested }
            }
        }
    }
}

impl From<DepositError> for AppError {
    fn from(err: DepositError) -> Self {
        AppError::InvalidAmount(err.to_string())
    }
}
