//! prefkeep Core - settings persistence and managed data files.
//!
//! This crate contains the business logic of the settings subsystem.
//! It is storage-agnostic and defines the repository trait that is
//! implemented by the `storage-sqlite` crate, plus the collaborator
//! traits (presentation layer, file picker, notifications, client
//! bootstrap) the host application plugs in.

pub mod constants;
pub mod data_files;
pub mod errors;
pub mod events;
pub mod settings;
pub mod theme;

// Re-export error types
pub use errors::Error;
pub use errors::Result;
