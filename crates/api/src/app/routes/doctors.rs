use std::sync::Arc;

use axum::{
    body::Bytes,
    extract::{Extension, Query},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};

use doctor_listing_core::NewDoctor;

use crate::app::{dto, errors};
use crate::app::services::AppServices;

pub fn router() -> Router {
    Router::new()
        .route("/add-doctor", post(add_doctor))
        .route("/list-doctor-with-filter", get(list_doctors))
}

/// Validate and store one doctor record. Identical submissions create
/// duplicate records.
pub async fn add_doctor(
    Extension(services): Extension<Arc<AppServices>>,
    body: Bytes,
) -> axum::response::Response {
    let candidate = match dto::parse_json_body(&body) {
        Ok(v) => v,
        Err(resp) => return resp,
    };

    let new_doctor = match NewDoctor::from_json(&candidate) {
        Ok(d) => d,
        Err(e) => {
            tracing::debug!(error = %e, "rejected doctor record");
            return errors::domain_error_to_response(e);
        }
    };

    let doctor = match services.store().insert(new_doctor).await {
        Ok(d) => d,
        Err(e) => return errors::store_error_to_response("add_doctor", e),
    };

    tracing::info!(doctor_id = %doctor.id, specialty = %doctor.specialty, "doctor added");

    (
        StatusCode::CREATED,
        Json(serde_json::json!({
            "message": "Doctor added successfully!",
            "id": doctor.id.to_string(),
        })),
    )
        .into_response()
}

pub async fn list_doctors(
    Extension(services): Extension<Arc<AppServices>>,
    Query(pairs): Query<Vec<(String, String)>>,
) -> axum::response::Response {
    let query = dto::ListDoctorsQuery::from_pairs(pairs);
    let filter = query.filter();
    let pagination = query.pagination();

    match services.store().list(&filter, pagination).await {
        Ok(page) => (StatusCode::OK, Json(dto::page_to_json(page))).into_response(),
        Err(e) => errors::store_error_to_response("list_doctors", e),
    }
}
