use std::sync::Arc;

use beneficio_ledger::application::engine::{TransferEngine, TransferPolicy};
use beneficio_ledger::domain::beneficio::{Beneficio, NewBeneficio};
use beneficio_ledger::domain::ports::{BeneficioStore, BeneficioStoreRef};
use beneficio_ledger::infrastructure::in_memory::InMemoryBeneficioStore;
use rust_decimal::Decimal;

pub fn setup() -> (Arc<InMemoryBeneficioStore>, TransferEngine) {
    let store = Arc::new(InMemoryBeneficioStore::new());
    let store_ref: BeneficioStoreRef = store.clone();
    let engine = TransferEngine::new(store_ref, TransferPolicy::default());
    (store, engine)
}

pub async fn seed(store: &Arc<InMemoryBeneficioStore>, name: &str, balance: Decimal) -> Beneficio {
    store
        .create(NewBeneficio {
            name: name.to_string(),
            description: String::new(),
            balance,
            active: true,
        })
        .await
        .unwrap()
}
