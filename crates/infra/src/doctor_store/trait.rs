use std::sync::Arc;

use doctor_listing_core::{Doctor, DoctorFilter, DoctorPage, NewDoctor, Pagination};
use thiserror::Error;

/// Storage-layer failure. Never caused by the client.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("storage backend unavailable: {0}")]
    Unavailable(String),

    #[error("query failed: {0}")]
    Query(String),

    #[error("failed to decode stored record: {0}")]
    Decode(String),
}

/// Persistence for doctor records.
///
/// Records are only ever appended and read; there is no update or delete.
///
/// ## Listing contract
///
/// `list` returns the records matching `filter`, sorted by name ascending
/// (byte-wise, ties in insertion order), windowed by `pagination`. The
/// returned `total` counts every match regardless of the window.
#[async_trait::async_trait]
pub trait DoctorStore: Send + Sync {
    /// Persist a validated record and return it with its assigned id.
    async fn insert(&self, doctor: NewDoctor) -> Result<Doctor, StoreError>;

    async fn list(
        &self,
        filter: &DoctorFilter,
        pagination: Pagination,
    ) -> Result<DoctorPage, StoreError>;

    /// Short backend name for logs.
    fn kind(&self) -> &'static str;
}

#[async_trait::async_trait]
impl<S> DoctorStore for Arc<S>
where
    S: DoctorStore + ?Sized,
{
    async fn insert(&self, doctor: NewDoctor) -> Result<Doctor, StoreError> {
        (**self).insert(doctor).await
    }

    async fn list(
        &self,
        filter: &DoctorFilter,
        pagination: Pagination,
    ) -> Result<DoctorPage, StoreError> {
        (**self).list(filter, pagination).await
    }

    fn kind(&self) -> &'static str {
        (**self).kind()
    }
}
