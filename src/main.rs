use std::sync::Arc;

use beneficio_ledger::application::engine::TransferEngine;
use beneficio_ledger::config::Config;
use beneficio_ledger::domain::ports::BeneficioStoreRef;
use beneficio_ledger::infrastructure::in_memory::InMemoryBeneficioStore;
use beneficio_ledger::interfaces::http::{AppState, build_router};
use clap::Parser;
use miette::{IntoDiagnostic, Result};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let config = Config::parse();

    let store: BeneficioStoreRef = Arc::new(InMemoryBeneficioStore::new());
    let engine = TransferEngine::new(store.clone(), config.transfer_policy());
    let app = build_router(AppState { store, engine });

    let listener = tokio::net::TcpListener::bind(config.bind)
        .await
        .into_diagnostic()?;
    tracing::info!("listening on {}", listener.local_addr().into_diagnostic()?);

    axum::serve(listener, app).await.into_diagnostic()?;
    Ok(())
}
