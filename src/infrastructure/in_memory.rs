use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use rust_decimal::Decimal;
use tokio::sync::{Mutex, RwLock};
use tokio::time::timeout;

use crate::domain::beneficio::{Balance, Beneficio, BeneficioId, BeneficioUpdate, NewBeneficio};
use crate::domain::ports::{BeneficioGuard, BeneficioStore};
use crate::error::{LedgerError, Result};

type RecordMap = HashMap<BeneficioId, Arc<Mutex<Beneficio>>>;

/// Thread-safe in-memory store for `Beneficio` records.
///
/// Each record lives behind its own `tokio::sync::Mutex`; those mutexes are
/// the transfer locks. The map-level `RwLock` is only ever held for brief,
/// non-awaiting sections, so CRUD on unrelated records never waits behind a
/// transfer.
#[derive(Default)]
pub struct InMemoryBeneficioStore {
    records: RwLock<RecordMap>,
    next_id: AtomicU64,
}

impl InMemoryBeneficioStore {
    /// Creates a new, empty store.
    pub fn new() -> Self {
        Self::default()
    }

    fn validate_name(name: &str) -> Result<()> {
        if name.trim().is_empty() {
            return Err(LedgerError::validation("nome must not be empty"));
        }
        Ok(())
    }

    fn validate_balance(balance: Decimal) -> Result<()> {
        if balance < Decimal::ZERO {
            return Err(LedgerError::validation(format!(
                "valor must not be negative (got {balance})"
            )));
        }
        Ok(())
    }

    async fn record(&self, id: BeneficioId) -> Result<Arc<Mutex<Beneficio>>> {
        self.records
            .read()
            .await
            .get(&id)
            .cloned()
            .ok_or(LedgerError::NotFound(id))
    }

    fn locked_by_transfer(id: BeneficioId) -> LedgerError {
        LedgerError::conflict(format!("beneficio {id} is locked by an in-flight transfer"))
    }

    fn lock_timeout(id: BeneficioId) -> LedgerError {
        LedgerError::conflict(format!("timed out waiting for lock on beneficio {id}"))
    }
}

#[async_trait]
impl BeneficioStore for InMemoryBeneficioStore {
    async fn create(&self, new: NewBeneficio) -> Result<Beneficio> {
        Self::validate_name(&new.name)?;
        Self::validate_balance(new.balance)?;

        let id = BeneficioId(self.next_id.fetch_add(1, Ordering::Relaxed) + 1);
        let beneficio = Beneficio {
            id,
            name: new.name,
            description: new.description,
            balance: Balance::new(new.balance),
            active: new.active,
        };

        let mut records = self.records.write().await;
        records.insert(id, Arc::new(Mutex::new(beneficio.clone())));
        Ok(beneficio)
    }

    async fn get_all(&self) -> Result<Vec<Beneficio>> {
        let mut handles: Vec<(BeneficioId, Arc<Mutex<Beneficio>>)> = {
            let records = self.records.read().await;
            records.iter().map(|(id, rec)| (*id, rec.clone())).collect()
        };
        handles.sort_by_key(|(id, _)| *id);

        // Ascending-id acquisition matches the transfer lock order, and
        // holding every guard at once yields a cut in which no transfer is
        // half applied.
        let mut guards = Vec::with_capacity(handles.len());
        for (id, rec) in handles {
            guards.push((id, rec.lock_owned().await));
        }

        // Records deleted while the guards were still being acquired are
        // dropped from the snapshot.
        let records = self.records.read().await;
        Ok(guards
            .into_iter()
            .filter(|(id, _)| records.contains_key(id))
            .map(|(_, guard)| (*guard).clone())
            .collect())
    }

    async fn get(&self, id: BeneficioId) -> Result<Beneficio> {
        let rec = self.record(id).await?;
        let guard = rec.lock().await;
        if !self.records.read().await.contains_key(&id) {
            return Err(LedgerError::NotFound(id));
        }
        Ok(guard.clone())
    }

    async fn update(&self, id: BeneficioId, changes: BeneficioUpdate) -> Result<Beneficio> {
        Self::validate_name(&changes.name)?;
        Self::validate_balance(changes.balance)?;

        let rec = self.record(id).await?;
        let mut guard = rec
            .try_lock()
            .map_err(|_| Self::locked_by_transfer(id))?;
        if !self.records.read().await.contains_key(&id) {
            return Err(LedgerError::NotFound(id));
        }

        guard.name = changes.name;
        guard.description = changes.description;
        guard.balance = Balance::new(changes.balance);
        guard.active = changes.active;
        Ok(guard.clone())
    }

    async fn delete(&self, id: BeneficioId) -> Result<()> {
        let rec = self.record(id).await?;
        // Holding the record lock across the removal keeps a racing transfer
        // from mutating the record mid-delete; the engine re-checks existence
        // under its own guards.
        let _guard = rec
            .try_lock_owned()
            .map_err(|_| Self::locked_by_transfer(id))?;

        let mut records = self.records.write().await;
        match records.remove(&id) {
            Some(_) => Ok(()),
            None => Err(LedgerError::NotFound(id)),
        }
    }

    async fn lock_pair(
        &self,
        a: BeneficioId,
        b: BeneficioId,
        wait: Duration,
    ) -> Result<(BeneficioGuard, BeneficioGuard)> {
        let (first, second) = if a <= b { (a, b) } else { (b, a) };
        let (first_rec, second_rec) = {
            let records = self.records.read().await;
            (
                records
                    .get(&first)
                    .cloned()
                    .ok_or(LedgerError::NotFound(first))?,
                records
                    .get(&second)
                    .cloned()
                    .ok_or(LedgerError::NotFound(second))?,
            )
        };

        let first_guard = timeout(wait, first_rec.lock_owned())
            .await
            .map_err(|_| Self::lock_timeout(first))?;
        let second_guard = timeout(wait, second_rec.lock_owned())
            .await
            .map_err(|_| Self::lock_timeout(second))?;

        if a <= b {
            Ok((first_guard, second_guard))
        } else {
            Ok((second_guard, first_guard))
        }
    }

    async fn contains(&self, id: BeneficioId) -> bool {
        self.records.read().await.contains_key(&id)
    }
}
