//! Finbook Core - Domain entities, record codecs, and the sync engine.
//!
//! This crate contains the core business logic for Finbook.
//! It is database-agnostic and defines traits that are implemented
//! by the `storage-sqlite` crate.

pub mod account_descriptions;
pub mod account_types;
pub mod accounts;
pub mod banks;
pub mod errors;
pub mod payment_methods;
pub mod payments;
pub mod sync;
pub mod utils;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
