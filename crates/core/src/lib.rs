//! `humidor-core`: shared building blocks for the humidor engine.
//!
//! This crate contains **pure domain** primitives (no storage, no rendering).

pub mod config;
pub mod error;
pub mod id;
pub mod value_object;

pub use config::EngineConfig;
pub use error::{DomainError, DomainResult};
pub use id::CigarId;
pub use value_object::ValueObject;
