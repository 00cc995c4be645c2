//! Core error types for prefkeep.
//!
//! This module defines storage-agnostic error types. Storage-specific errors
//! (from Diesel, SQLite, etc.) are converted to these types by the storage layer.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Type alias for Result using our Error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Root error type for the settings subsystem.
#[derive(Error, Debug)]
pub enum Error {
    #[error("Database operation failed: {0}")]
    Database(#[from] DatabaseError),

    #[error("Data file operation failed: {0}")]
    DataFile(#[from] DataFileError),

    #[error("Input validation failed: {0}")]
    Validation(#[from] ValidationError),

    #[error("Unexpected error: {0}")]
    Unexpected(String),
}

impl Error {
    /// Whether the error indicates a broken installation rather than a
    /// recoverable user-facing failure.
    pub fn is_fatal(&self) -> bool {
        matches!(self, Error::DataFile(e) if e.is_fatal())
    }

    /// True when an insert hit an existing id.
    pub fn is_duplicate_key(&self) -> bool {
        matches!(self, Error::Database(DatabaseError::UniqueViolation(_)))
    }
}

/// Storage-agnostic error type for settings store operations.
///
/// This enum uses `String` for all error details, allowing the storage layer
/// to convert storage-specific errors into this format.
#[derive(Error, Debug)]
pub enum DatabaseError {
    /// Failed to establish a database connection.
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    /// Failed to create or configure the connection pool.
    #[error("Failed to create database pool: {0}")]
    PoolCreationFailed(String),

    /// A database query failed to execute.
    #[error("Database query failed: {0}")]
    QueryFailed(String),

    /// The requested record was not found.
    #[error("Record not found: {0}")]
    NotFound(String),

    /// A record with the same id already exists.
    #[error("Unique constraint violation: {0}")]
    UniqueViolation(String),

    /// Database migration failed.
    #[error("Database migration failed: {0}")]
    MigrationFailed(String),

    /// Internal/unexpected database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

/// Failures of import, export and clear on managed data files.
#[derive(Error, Debug)]
pub enum DataFileError {
    #[error("No file path was provided")]
    NoPathProvided,

    #[error("'{}' is not a regular file", path.display())]
    NotAFile { path: PathBuf },

    #[error("Unable to read '{}': {source}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to write '{}': {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// A managed file could not be read for export.
    #[error("Managed data file '{}' is unreadable: {source}", path.display())]
    ManagedRead {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unable to export to '{}': {source}", path.display())]
    ExportWrite {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("Unknown file: {0}")]
    UnknownKind(String),
}

impl DataFileError {
    pub fn is_fatal(&self) -> bool {
        matches!(
            self,
            DataFileError::ManagedRead { .. } | DataFileError::ExportWrite { .. }
        )
    }

    /// Text shown to the user for recoverable failures.
    pub fn user_message(&self) -> String {
        match self {
            DataFileError::NoPathProvided | DataFileError::NotAFile { .. } => {
                "Incorrect filetype. Import Aborted.".to_string()
            }
            DataFileError::Read { .. } => {
                "Unable to read file.  File may be corrupt or have invalid permissions.".to_string()
            }
            DataFileError::Write { .. } => {
                "Unable to create file.  Please check your permissions and try again.".to_string()
            }
            DataFileError::UnknownKind(kind) => format!("Unknown file: {}", kind),
            DataFileError::ManagedRead { .. } | DataFileError::ExportWrite { .. } => {
                self.to_string()
            }
        }
    }
}

/// Validation errors for caller input.
#[derive(Error, Debug)]
pub enum ValidationError {
    #[error("Required field '{0}' is missing")]
    MissingField(String),
}
