//! `doctor-listing-core` — domain foundation for the doctor directory.
//!
//! This crate contains **pure domain** types and validation (no infrastructure concerns).

pub mod doctor;
pub mod error;
pub mod id;
pub mod query;

pub use doctor::{Doctor, NewDoctor};
pub use error::{DomainError, DomainResult};
pub use id::DoctorId;
pub use query::{DoctorFilter, DoctorPage, Pagination};
