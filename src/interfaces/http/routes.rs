use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};

use crate::domain::beneficio::BeneficioId;
use crate::domain::ports::BeneficioStore;
use crate::interfaces::http::{AppState, dto, errors};

pub fn router() -> Router {
    Router::new()
        .route(
            "/api/v1/beneficios",
            get(list_beneficios).post(create_beneficio),
        )
        .route("/api/v1/beneficios/transfer", post(transfer))
        .route(
            "/api/v1/beneficios/:id",
            get(get_beneficio)
                .put(update_beneficio)
                .delete(delete_beneficio),
        )
}

pub async fn health() -> axum::response::Response {
    (StatusCode::OK, Json(serde_json::json!({"status": "ok"}))).into_response()
}

pub async fn list_beneficios(
    Extension(state): Extension<Arc<AppState>>,
) -> axum::response::Response {
    match state.store.get_all().await {
        Ok(all) => {
            let items: Vec<dto::BeneficioDto> = all.into_iter().map(Into::into).collect();
            (StatusCode::OK, Json(items)).into_response()
        }
        Err(err) => errors::error_to_response(err),
    }
}

pub async fn create_beneficio(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::CreateBeneficioRequest>,
) -> axum::response::Response {
    match state.store.create(body.into()).await {
        Ok(created) => {
            (StatusCode::CREATED, Json(dto::BeneficioDto::from(created))).into_response()
        }
        Err(err) => errors::error_to_response(err),
    }
}

pub async fn get_beneficio(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    match state.store.get(BeneficioId(id)).await {
        Ok(found) => (StatusCode::OK, Json(dto::BeneficioDto::from(found))).into_response(),
        Err(err) => errors::error_to_response(err),
    }
}

pub async fn update_beneficio(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<u64>,
    Json(body): Json<dto::UpdateBeneficioRequest>,
) -> axum::response::Response {
    match state.store.update(BeneficioId(id), body.into()).await {
        Ok(updated) => (StatusCode::OK, Json(dto::BeneficioDto::from(updated))).into_response(),
        Err(err) => errors::error_to_response(err),
    }
}

pub async fn delete_beneficio(
    Extension(state): Extension<Arc<AppState>>,
    Path(id): Path<u64>,
) -> axum::response::Response {
    match state.store.delete(BeneficioId(id)).await {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(err) => errors::error_to_response(err),
    }
}

pub async fn transfer(
    Extension(state): Extension<Arc<AppState>>,
    Json(body): Json<dto::TransferRequest>,
) -> axum::response::Response {
    match state
        .engine
        .transfer(BeneficioId(body.from_id), BeneficioId(body.to_id), body.amount)
        .await
    {
        Ok(_) => (
            StatusCode::OK,
            "Transferência realizada com sucesso".to_string(),
        )
            .into_response(),
        Err(err) => errors::transfer_error_to_response(err),
    }
}
