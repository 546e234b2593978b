//! oncomir-common — Shared types, errors, and configuration used across all oncomir crates.

pub mod error;
pub mod entities;
pub mod config;

// Re-export commonly used types
pub use error::{OncomirError, Result};
pub use entities::{Cohort, Modality, Partition};
pub use config::{CohortSourceConfig, EntitySelection, NetworkConfig, OncomirConfig};
