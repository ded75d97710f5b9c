use rust_decimal::Decimal;
use thiserror::Error;

use crate::domain::beneficio::BeneficioId;

/// Result type used across the crate.
pub type Result<T> = std::result::Result<T, LedgerError>;

/// Error taxonomy for the benefit ledger.
///
/// Every caller-facing variant is recovered at the HTTP boundary and mapped to
/// a status plus message. `InvariantViolation` is the exception: it signals a
/// logic bug (a balance would have gone negative under correct locking), is
/// logged for operator attention, and is never retried.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum LedgerError {
    #[error("validation failed: {0}")]
    Validation(String),

    #[error("beneficio {0} not found")]
    NotFound(BeneficioId),

    #[error("cannot transfer a beneficio to itself")]
    SameAccount,

    #[error("transfer amount must be positive")]
    InvalidAmount,

    #[error("beneficio {0} is inactive")]
    Inactive(BeneficioId),

    #[error("insufficient funds: balance is {balance}, requested {requested}")]
    InsufficientFunds { balance: Decimal, requested: Decimal },

    /// Lock contention or a concurrently altered precondition. Retryable.
    #[error("conflict: {0}")]
    Conflict(String),

    #[error("invariant violated: {0}")]
    InvariantViolation(String),
}

impl LedgerError {
    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self::Conflict(msg.into())
    }

    pub fn invariant(msg: impl Into<String>) -> Self {
        Self::InvariantViolation(msg.into())
    }
}
