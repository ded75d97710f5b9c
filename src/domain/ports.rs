use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::OwnedMutexGuard;

use super::beneficio::{Beneficio, BeneficioId, BeneficioUpdate, NewBeneficio};
use crate::error::Result;

/// Exclusive handle on a single record, held for the duration of a transfer
/// critical section.
pub type BeneficioGuard = OwnedMutexGuard<Beneficio>;

/// Keyed storage for `Beneficio` records.
///
/// Balances are owned by the store; the transfer engine may mutate one only
/// through a guard obtained from `lock_pair`.
#[async_trait]
pub trait BeneficioStore: Send + Sync {
    /// Fails with `Validation` on an empty name or a negative initial balance.
    async fn create(&self, new: NewBeneficio) -> Result<Beneficio>;

    /// Consistent point-in-time snapshot of every record, inactive included.
    /// A partially-applied transfer is never observable.
    async fn get_all(&self) -> Result<Vec<Beneficio>>;

    async fn get(&self, id: BeneficioId) -> Result<Beneficio>;

    /// Administrative full update. Fails with `Conflict` while the record is
    /// locked by an in-flight transfer.
    async fn update(&self, id: BeneficioId, changes: BeneficioUpdate) -> Result<Beneficio>;

    /// Removes the record; its balance leaves the system. Fails with
    /// `Conflict` while the record is locked by an in-flight transfer.
    async fn delete(&self, id: BeneficioId) -> Result<()>;

    /// Acquires both records' locks in ascending-id order, each within
    /// `wait`. Guards are returned in argument order. A timeout surfaces as
    /// `Conflict`; an unknown id as `NotFound`.
    ///
    /// Engine-only primitive.
    async fn lock_pair(
        &self,
        a: BeneficioId,
        b: BeneficioId,
        wait: Duration,
    ) -> Result<(BeneficioGuard, BeneficioGuard)>;

    /// Existence re-check for validation under lock. Engine-only primitive.
    async fn contains(&self, id: BeneficioId) -> bool;
}

pub type BeneficioStoreRef = Arc<dyn BeneficioStore>;
