//! Doctor record storage.
//!
//! The API talks to a [`DoctorStore`]; the backend is chosen at startup.

pub mod in_memory;
pub mod postgres;
pub mod r#trait;

pub use in_memory::InMemoryDoctorStore;
pub use postgres::PostgresDoctorStore;
pub use r#trait::{DoctorStore, StoreError};
