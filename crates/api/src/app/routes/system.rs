use axum::{http::StatusCode, response::IntoResponse, Json};

/// Fixed readiness confirmation; inspects no state.
pub async fn health() -> impl IntoResponse {
    (
        StatusCode::OK,
        Json(serde_json::json!({ "message": "Server is running" })),
    )
}
