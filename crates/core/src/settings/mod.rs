//! Settings records, their store, and the services built on top of them.

mod client_bootstrap;
mod defaults_initializer;
mod settings_context;
mod settings_model;
mod settings_service;
mod settings_traits;

#[cfg(test)]
mod test_support;

pub use client_bootstrap::{ClientBootstrap, NoOpClientBootstrap};
pub use defaults_initializer::{DefaultsInitializer, InitOutcome};
pub use settings_context::SettingsContext;
pub use settings_model::*;
pub use settings_service::{SettingsService, SettingsServiceTrait};
pub use settings_traits::SettingsRepositoryTrait;
