//! HTTP gateway (axum router + handlers).
//!
//! Handlers translate requests into store/engine calls and map errors to
//! statuses; no business logic lives here. Layout:
//! - `routes.rs`: routes + handlers
//! - `dto.rs`: request/response DTOs and the Portuguese wire names
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};

use crate::application::engine::TransferEngine;
use crate::domain::ports::BeneficioStoreRef;

pub mod dto;
pub mod errors;
pub mod routes;

/// Shared state handed to every handler.
pub struct AppState {
    pub store: BeneficioStoreRef,
    pub engine: TransferEngine,
}

/// Builds the full router (public entrypoint used by `main.rs` and the HTTP
/// tests).
pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(routes::health))
        .merge(routes::router())
        .layer(Extension(Arc::new(state)))
}
