use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;

use super::beneficio::{Balance, BeneficioId};

/// Confirmation of an applied transfer.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TransferReceipt {
    pub from: BeneficioId,
    pub to: BeneficioId,
    pub amount: Decimal,
    /// Source balance after the debit.
    pub from_balance: Balance,
    /// Target balance after the credit.
    pub to_balance: Balance,
    pub applied_at: DateTime<Utc>,
}
