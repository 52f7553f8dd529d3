//! Infrastructure layer: doctor storage backends and configuration.

pub mod config;
pub mod doctor_store;
