use axum::Router;

pub mod doctors;
pub mod system;

/// Router for the doctor endpoints.
pub fn router() -> Router {
    doctors::router()
}
