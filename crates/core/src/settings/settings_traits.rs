//! Repository trait for settings.

use async_trait::async_trait;

use crate::errors::Result;
use crate::settings::{Setting, SettingsFilter, UpdateOptions, UpdateResult};

/// Persistent key-value store of settings records.
///
/// Writes are durable before the returned future resolves.
#[async_trait]
pub trait SettingsRepositoryTrait: Send + Sync {
    /// All records matching `filter`, ordered by id. An empty store yields
    /// an empty vector.
    async fn find(&self, filter: &SettingsFilter) -> Result<Vec<Setting>>;

    /// Adds a record. Fails with a unique violation when the id exists.
    async fn insert(&self, record: Setting) -> Result<Setting>;

    /// Adds every record in one atomic write. If any insert fails, none of
    /// the records is stored.
    async fn insert_all(&self, records: Vec<Setting>) -> Result<Vec<Setting>>;

    /// Replaces the value of every record matching `filter`.
    async fn update(
        &self,
        filter: &SettingsFilter,
        new_value: &str,
        options: UpdateOptions,
    ) -> Result<UpdateResult>;
}
