//! SQLite storage implementation for prefkeep.
//!
//! This crate provides all database-related functionality using Diesel ORM with SQLite.
//! It implements the settings repository trait defined in `prefkeep-core` and contains:
//! - Database file setup and connection pooling
//! - Embedded Diesel migrations
//! - The single writer actor that serializes every write
//! - Database-specific model types (with Diesel derives)
//!
//! # Architecture
//!
//! This crate is the only place in the workspace where Diesel dependencies exist.
//!
//! ```text
//!          core (domain)
//!                │
//!                ▼
//!       storage-sqlite (this crate)
//!                │
//!                ▼
//!            SQLite DB
//! ```

pub mod db;
pub mod errors;
pub mod schema;
pub mod settings;

// Re-export database utilities
pub use db::{
    create_pool, get_connection, get_db_path, init, run_migrations, spawn_writer, DbConnection,
    DbPool, WriteHandle,
};

// Re-export storage errors and conversion helpers
pub use errors::{IntoCore, StorageError};

pub use settings::SettingsRepository;

// Re-export from prefkeep-core for convenience
pub use prefkeep_core::errors::{DatabaseError, Error, Result};
