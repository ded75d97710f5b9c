use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use crate::error::LedgerError;

fn status_for(err: &LedgerError) -> (StatusCode, &'static str) {
    match err {
        LedgerError::Validation(_) => (StatusCode::BAD_REQUEST, "validation_error"),
        LedgerError::SameAccount => (StatusCode::BAD_REQUEST, "same_account"),
        LedgerError::InvalidAmount => (StatusCode::BAD_REQUEST, "invalid_amount"),
        LedgerError::Inactive(_) => (StatusCode::BAD_REQUEST, "inactive"),
        LedgerError::NotFound(_) => (StatusCode::NOT_FOUND, "not_found"),
        LedgerError::InsufficientFunds { .. } => (StatusCode::CONFLICT, "insufficient_funds"),
        LedgerError::Conflict(_) => (StatusCode::CONFLICT, "conflict"),
        LedgerError::InvariantViolation(_) => {
            (StatusCode::INTERNAL_SERVER_ERROR, "invariant_violation")
        }
    }
}

pub fn error_to_response(err: LedgerError) -> axum::response::Response {
    let (status, code) = status_for(&err);
    json_error(status, code, err.to_string())
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// The transfer route answers in plain text; the front-end surfaces the body
/// verbatim.
pub fn transfer_error_to_response(err: LedgerError) -> axum::response::Response {
    let (status, _) = status_for(&err);
    (status, format!("Erro na transferência: {err}")).into_response()
}
