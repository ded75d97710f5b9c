use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::error::{LedgerError, Result};

/// Identifier of a `Beneficio` record.
///
/// Assigned by the store from a monotonic counter; never reused after a
/// deletion.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct BeneficioId(pub u64);

impl fmt::Display for BeneficioId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

/// Non-negative monetary balance.
///
/// Wraps `rust_decimal::Decimal` so balances are exact across arbitrarily many
/// transfers. All mutation goes through `checked_apply`, which rejects any
/// result below zero.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
pub struct Balance(pub Decimal);

impl Balance {
    pub const ZERO: Self = Self(Decimal::ZERO);

    pub fn new(value: Decimal) -> Self {
        Self(value)
    }

    pub fn value(&self) -> Decimal {
        self.0
    }

    /// Adjusts the balance by a signed delta.
    ///
    /// Fails with `InvariantViolation` if the result would be negative or the
    /// addition overflows.
    pub fn checked_apply(&self, delta: Decimal) -> Result<Balance> {
        let next = self
            .0
            .checked_add(delta)
            .ok_or_else(|| LedgerError::invariant("balance arithmetic overflow"))?;
        if next < Decimal::ZERO {
            return Err(LedgerError::invariant(format!(
                "balance would become negative ({next})"
            )));
        }
        Ok(Balance(next))
    }
}

/// Strictly positive transfer amount.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Serialize, Deserialize)]
pub struct Amount(Decimal);

impl Amount {
    pub fn new(value: Decimal) -> Result<Self> {
        if value > Decimal::ZERO {
            Ok(Self(value))
        } else {
            Err(LedgerError::InvalidAmount)
        }
    }

    pub fn value(&self) -> Decimal {
        self.0
    }
}

impl TryFrom<Decimal> for Amount {
    type Error = LedgerError;

    fn try_from(value: Decimal) -> Result<Self> {
        Self::new(value)
    }
}

/// A named monetary allotment.
///
/// Inactive records stay visible in listings but are not eligible as either
/// side of a transfer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Beneficio {
    pub id: BeneficioId,
    pub name: String,
    pub description: String,
    pub balance: Balance,
    pub active: bool,
}

impl Beneficio {
    /// Adjusts the balance by a signed delta.
    ///
    /// Only the transfer engine calls this, and only while holding this
    /// record's lock.
    pub fn apply_delta(&mut self, delta: Decimal) -> Result<()> {
        self.balance = self.balance.checked_apply(delta)?;
        Ok(())
    }
}

/// Input for creating a record. The store assigns the id.
#[derive(Debug, Clone)]
pub struct NewBeneficio {
    pub name: String,
    pub description: String,
    pub balance: Decimal,
    pub active: bool,
}

/// Full administrative update of a record (everything but the id).
#[derive(Debug, Clone)]
pub struct BeneficioUpdate {
    pub name: String,
    pub description: String,
    pub balance: Decimal,
    pub active: bool,
}
