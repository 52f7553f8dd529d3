use std::sync::Arc;

use doctor_listing_infra::{
    config::AppConfig,
    doctor_store::{DoctorStore, InMemoryDoctorStore, PostgresDoctorStore, StoreError},
};

/// Shared handles available to every handler.
#[derive(Clone)]
pub struct AppServices {
    store: Arc<dyn DoctorStore>,
}

impl AppServices {
    pub fn new(store: Arc<dyn DoctorStore>) -> Self {
        Self { store }
    }

    /// Services backed by a fresh, empty in-memory store (dev/test).
    pub fn in_memory() -> Self {
        Self::new(Arc::new(InMemoryDoctorStore::new()))
    }

    pub fn store(&self) -> &dyn DoctorStore {
        self.store.as_ref()
    }
}

/// Wire the store selected by `config`.
///
/// The Postgres store is connected and its table created before the server
/// accepts requests.
pub async fn build_services(config: &AppConfig) -> Result<AppServices, StoreError> {
    if !config.use_persistent_store {
        tracing::warn!("USE_PERSISTENT_STORES=false; records are kept in memory and lost on exit");
        return Ok(AppServices::in_memory());
    }

    let store = PostgresDoctorStore::connect(&config.database_url).await?;
    store.ensure_schema().await?;
    tracing::info!(store = store.kind(), "connected to doctor store");

    Ok(AppServices::new(Arc::new(store)))
}
