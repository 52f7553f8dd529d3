use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use doctor_listing_core::DomainError;
use doctor_listing_infra::doctor_store::StoreError;

/// Body message for every unexpected failure. Details go to the log only.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

pub fn domain_error_to_response(err: DomainError) -> axum::response::Response {
    match err {
        DomainError::Validation(msg) => json_error(StatusCode::BAD_REQUEST, msg),
    }
}

pub fn store_error_to_response(operation: &'static str, err: StoreError) -> axum::response::Response {
    tracing::error!(operation, error = %err, "unexpected storage failure");
    json_error(StatusCode::INTERNAL_SERVER_ERROR, INTERNAL_ERROR_MESSAGE)
}

pub fn json_error(status: StatusCode, message: impl Into<String>) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": message.into(),
        })),
    )
        .into_response()
}
