//! SQLite storage implementation for Finbook.
//!
//! This crate provides all database-related functionality using Diesel ORM
//! with SQLite. It implements the sync-store trait defined in
//! `finbook-core` and contains:
//! - Database connection pooling and management
//! - Diesel migrations
//! - Per-table sync repositories
//! - Database-specific model types (with Diesel derives)
//!
//! This crate is the only place in the application where Diesel
//! dependencies exist; `core` stays database-agnostic and works with
//! traits.

pub mod db;
pub mod errors;
pub mod schema;

// Sync repositories, one per synchronized table
pub mod account_descriptions;
pub mod account_types;
pub mod accounts;
pub mod banks;
pub mod payment_methods;
pub mod payments;

// Re-export database utilities
pub use db::{create_pool, get_connection, init, run_migrations, DbConnection, DbPool, WriteHandle};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

// Re-export from finbook-core for convenience
pub use finbook_core::errors::{DatabaseError, Error, Result};
