use std::time::Duration;

use chrono::Utc;
use rust_decimal::Decimal;
use tracing::{error, info, warn};

use crate::domain::beneficio::{Amount, Beneficio, BeneficioId};
use crate::domain::ports::{BeneficioGuard, BeneficioStore, BeneficioStoreRef};
use crate::domain::transfer::TransferReceipt;
use crate::error::{LedgerError, Result};

/// Bounds on lock acquisition during a transfer.
#[derive(Debug, Clone)]
pub struct TransferPolicy {
    /// Bounded wait for each record lock.
    pub lock_wait: Duration,
    /// Re-acquisition attempts after a timed-out lock before the transfer is
    /// aborted as a conflict.
    pub lock_retries: u32,
    /// Initial backoff between attempts; doubles each retry.
    pub retry_backoff: Duration,
}

impl Default for TransferPolicy {
    fn default() -> Self {
        Self {
            lock_wait: Duration::from_millis(250),
            lock_retries: 3,
            retry_backoff: Duration::from_millis(20),
        }
    }
}

/// Executes transfers as single atomic, all-or-nothing state changes across
/// exactly two records.
pub struct TransferEngine {
    store: BeneficioStoreRef,
    policy: TransferPolicy,
}

impl TransferEngine {
    pub fn new(store: BeneficioStoreRef, policy: TransferPolicy) -> Self {
        Self { store, policy }
    }

    /// Moves `amount` from one record to the other.
    ///
    /// Preconditions are checked in order (distinct ids, positive amount,
    /// both ids known, both records active, sufficient source funds), then
    /// re-checked under lock before anything is written. Any failure leaves
    /// both balances exactly as they were.
    pub async fn transfer(
        &self,
        from: BeneficioId,
        to: BeneficioId,
        amount: Decimal,
    ) -> Result<TransferReceipt> {
        if from == to {
            return Err(LedgerError::SameAccount);
        }
        let amount = Amount::new(amount)?;

        self.precheck(from, to, amount).await?;

        let (mut from_guard, mut to_guard) = self
            .lock_with_retry(from, to)
            .await
            .map_err(Self::deleted_race)?;

        // Values may have changed between the unlocked reads and lock
        // acquisition. Checks must hold under lock, or two interleaved
        // transfers could both pass the precheck and overdraw the source.
        if !self.store.contains(from).await {
            return Err(Self::deleted_race(LedgerError::NotFound(from)));
        }
        if !self.store.contains(to).await {
            return Err(Self::deleted_race(LedgerError::NotFound(to)));
        }
        Self::check_eligibility(&from_guard, &to_guard, amount)?;

        from_guard
            .apply_delta(-amount.value())
            .inspect_err(Self::log_invariant)?;
        if let Err(err) = to_guard.apply_delta(amount.value()) {
            Self::log_invariant(&err);
            // Roll the debit back before the guards drop.
            if let Err(undo) = from_guard.apply_delta(amount.value()) {
                error!(%undo, "failed to roll back debit after credit failure");
            }
            return Err(err);
        }

        let receipt = TransferReceipt {
            from,
            to,
            amount: amount.value(),
            from_balance: from_guard.balance,
            to_balance: to_guard.balance,
            applied_at: Utc::now(),
        };
        info!(%from, %to, amount = %receipt.amount, "transfer applied");
        Ok(receipt)
    }

    async fn precheck(&self, from: BeneficioId, to: BeneficioId, amount: Amount) -> Result<()> {
        let from_rec = self.store.get(from).await?;
        let to_rec = self.store.get(to).await?;
        Self::check_eligibility(&from_rec, &to_rec, amount)
    }

    fn check_eligibility(from: &Beneficio, to: &Beneficio, amount: Amount) -> Result<()> {
        if !from.active {
            return Err(LedgerError::Inactive(from.id));
        }
        if !to.active {
            return Err(LedgerError::Inactive(to.id));
        }
        if from.balance.value() < amount.value() {
            return Err(LedgerError::InsufficientFunds {
                balance: from.balance.value(),
                requested: amount.value(),
            });
        }
        Ok(())
    }

    async fn lock_with_retry(
        &self,
        from: BeneficioId,
        to: BeneficioId,
    ) -> Result<(BeneficioGuard, BeneficioGuard)> {
        let mut backoff = self.policy.retry_backoff;
        let mut attempt = 0u32;
        loop {
            match self.store.lock_pair(from, to, self.policy.lock_wait).await {
                Err(LedgerError::Conflict(reason)) if attempt < self.policy.lock_retries => {
                    attempt += 1;
                    warn!(%from, %to, attempt, %reason, "lock contention on transfer pair, backing off");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                }
                other => return other,
            }
        }
    }

    /// A record that passed the precheck but is gone at lock time lost a race
    /// with an administrative delete; callers may retry.
    fn deleted_race(err: LedgerError) -> LedgerError {
        match err {
            LedgerError::NotFound(id) => {
                LedgerError::conflict(format!("beneficio {id} was deleted concurrently"))
            }
            other => other,
        }
    }

    fn log_invariant(err: &LedgerError) {
        if matches!(err, LedgerError::InvariantViolation(_)) {
            error!(%err, "transfer aborted by invariant violation");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::beneficio::{Balance, NewBeneficio};
    use crate::domain::ports::BeneficioStore;
    use crate::infrastructure::in_memory::InMemoryBeneficioStore;
    use proptest::prelude::*;
    use rust_decimal_macros::dec;
    use std::sync::Arc;

    fn setup() -> (Arc<InMemoryBeneficioStore>, TransferEngine) {
        let store = Arc::new(InMemoryBeneficioStore::new());
        let engine = TransferEngine::new(store.clone(), TransferPolicy::default());
        (store, engine)
    }

    async fn seed(
        store: &Arc<InMemoryBeneficioStore>,
        name: &str,
        balance: Decimal,
        active: bool,
    ) -> Beneficio {
        store
            .create(NewBeneficio {
                name: name.to_string(),
                description: String::new(),
                balance,
                active,
            })
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_transfer_moves_balance_and_returns_receipt() {
        let (store, engine) = setup();
        let a = seed(&store, "A", dec!(100.0), true).await;
        let b = seed(&store, "B", dec!(50.0), true).await;

        let receipt = engine.transfer(a.id, b.id, dec!(30.0)).await.unwrap();
        assert_eq!(receipt.from, a.id);
        assert_eq!(receipt.to, b.id);
        assert_eq!(receipt.amount, dec!(30.0));
        assert_eq!(receipt.from_balance, Balance::new(dec!(70.0)));
        assert_eq!(receipt.to_balance, Balance::new(dec!(80.0)));

        assert_eq!(store.get(a.id).await.unwrap().balance, Balance::new(dec!(70.0)));
        assert_eq!(store.get(b.id).await.unwrap().balance, Balance::new(dec!(80.0)));
    }

    #[tokio::test]
    async fn test_insufficient_funds_leaves_state_untouched() {
        let (store, engine) = setup();
        let a = seed(&store, "A", dec!(70.0), true).await;
        let b = seed(&store, "B", dec!(50.0), true).await;

        let err = engine.transfer(a.id, b.id, dec!(1000.0)).await.unwrap_err();
        assert_eq!(
            err,
            LedgerError::InsufficientFunds {
                balance: dec!(70.0),
                requested: dec!(1000.0),
            }
        );

        assert_eq!(store.get(a.id).await.unwrap().balance, Balance::new(dec!(70.0)));
        assert_eq!(store.get(b.id).await.unwrap().balance, Balance::new(dec!(50.0)));
    }

    #[tokio::test]
    async fn test_same_account_rejected() {
        let (store, engine) = setup();
        let a = seed(&store, "A", dec!(100.0), true).await;

        let err = engine.transfer(a.id, a.id, dec!(10.0)).await.unwrap_err();
        assert_eq!(err, LedgerError::SameAccount);
    }

    #[tokio::test]
    async fn test_non_positive_amount_rejected() {
        let (store, engine) = setup();
        let a = seed(&store, "A", dec!(100.0), true).await;
        let b = seed(&store, "B", dec!(50.0), true).await;

        assert_eq!(
            engine.transfer(a.id, b.id, dec!(0.0)).await.unwrap_err(),
            LedgerError::InvalidAmount
        );
        assert_eq!(
            engine.transfer(a.id, b.id, dec!(-5.0)).await.unwrap_err(),
            LedgerError::InvalidAmount
        );
    }

    #[tokio::test]
    async fn test_not_found_names_the_missing_id() {
        let (store, engine) = setup();
        let a = seed(&store, "A", dec!(100.0), true).await;

        let err = engine.transfer(a.id, BeneficioId(42), dec!(10.0)).await.unwrap_err();
        assert_eq!(err, LedgerError::NotFound(BeneficioId(42)));

        let err = engine.transfer(BeneficioId(43), a.id, dec!(10.0)).await.unwrap_err();
        assert_eq!(err, LedgerError::NotFound(BeneficioId(43)));
    }

    #[tokio::test]
    async fn test_inactive_records_rejected() {
        let (store, engine) = setup();
        let a = seed(&store, "A", dec!(100.0), false).await;
        let b = seed(&store, "B", dec!(50.0), true).await;

        assert_eq!(
            engine.transfer(a.id, b.id, dec!(10.0)).await.unwrap_err(),
            LedgerError::Inactive(a.id)
        );
        assert_eq!(
            engine.transfer(b.id, a.id, dec!(10.0)).await.unwrap_err(),
            LedgerError::Inactive(a.id)
        );
    }

    proptest! {
        #![proptest_config(ProptestConfig {
            cases: 64,
            ..ProptestConfig::default()
        })]

        /// Property: over any sequence of transfer attempts, successful or
        /// not, the sum of all balances never changes and no balance goes
        /// negative.
        #[test]
        fn transfers_conserve_total_balance(
            moves in prop::collection::vec((0usize..3, 0usize..3, 1i64..500), 1..40)
        ) {
            let rt = tokio::runtime::Runtime::new().unwrap();
            rt.block_on(async {
                let (store, engine) = setup();
                let mut ids = Vec::new();
                for (name, balance) in [("A", dec!(100.0)), ("B", dec!(250.5)), ("C", dec!(0.0))] {
                    ids.push(seed(&store, name, balance, true).await.id);
                }
                let initial_total = dec!(350.5);

                for (from, to, cents) in moves {
                    let amount = Decimal::new(cents, 2);
                    let _ = engine.transfer(ids[from], ids[to], amount).await;
                }

                let all = store.get_all().await.unwrap();
                let total: Decimal = all.iter().map(|b| b.balance.value()).sum();
                assert_eq!(total, initial_total);
                assert!(all.iter().all(|b| b.balance.value() >= Decimal::ZERO));
            });
        }
    }
}
