//! In-memory doubles shared by the settings tests.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use crate::errors::{DatabaseError, Error, Result, ValidationError};
use crate::settings::{
    ClientBootstrap, Setting, SettingsFilter, SettingsRepositoryTrait, UpdateOptions,
    UpdateResult,
};

#[derive(Default)]
pub struct MockSettingsRepository {
    records: RwLock<Vec<Setting>>,
    fail_writes: AtomicBool,
    inserts: AtomicUsize,
    fail_insert_at: AtomicUsize,
}

impl MockSettingsRepository {
    pub fn new(records: Vec<Setting>) -> Self {
        Self {
            records: RwLock::new(records),
            ..Default::default()
        }
    }

    pub fn records(&self) -> Vec<Setting> {
        self.records.read().unwrap().clone()
    }

    pub fn value_of(&self, id: &str) -> Option<String> {
        self.records()
            .into_iter()
            .find(|s| s.id == id)
            .map(|s| s.value)
    }

    pub fn count_of(&self, id: &str) -> usize {
        self.records().iter().filter(|s| s.id == id).count()
    }

    pub fn insert_calls(&self) -> usize {
        self.inserts.load(Ordering::SeqCst)
    }

    pub fn fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Fails the `n`th record insert (1-based, counted across calls) once.
    pub fn fail_insert_number(&self, n: usize) {
        self.fail_insert_at.store(n, Ordering::SeqCst);
    }

    /// Counts one record insert and fails it when it is the scripted one.
    fn attempt_insert(&self) -> Result<()> {
        let n = self.inserts.fetch_add(1, Ordering::SeqCst) + 1;
        if self
            .fail_insert_at
            .compare_exchange(n, 0, Ordering::SeqCst, Ordering::SeqCst)
            .is_ok()
        {
            return Err(DatabaseError::QueryFailed("database or disk is full".to_string()).into());
        }
        Ok(())
    }

    fn check_writable(&self) -> Result<()> {
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(DatabaseError::QueryFailed("disk I/O error".to_string()).into());
        }
        Ok(())
    }
}

#[async_trait]
impl SettingsRepositoryTrait for MockSettingsRepository {
    async fn find(&self, filter: &SettingsFilter) -> Result<Vec<Setting>> {
        Ok(self
            .records
            .read()
            .unwrap()
            .iter()
            .filter(|s| filter.matches(s))
            .cloned()
            .collect())
    }

    async fn insert(&self, record: Setting) -> Result<Setting> {
        self.insert_all(vec![record])
            .await
            .map(|mut inserted| inserted.remove(0))
    }

    async fn insert_all(&self, batch: Vec<Setting>) -> Result<Vec<Setting>> {
        self.check_writable()?;
        let mut records = self.records.write().unwrap();
        // Stage on a copy so a failure part-way leaves the store untouched.
        let mut staged = records.clone();
        for record in &batch {
            self.attempt_insert()?;
            if staged.iter().any(|s| s.id == record.id) {
                return Err(DatabaseError::UniqueViolation(record.id.clone()).into());
            }
            staged.push(record.clone());
        }
        *records = staged;
        Ok(batch)
    }

    async fn update(
        &self,
        filter: &SettingsFilter,
        new_value: &str,
        options: UpdateOptions,
    ) -> Result<UpdateResult> {
        self.check_writable()?;
        let mut records = self.records.write().unwrap();
        let mut num_replaced = 0;
        for record in records.iter_mut().filter(|s| filter.matches(s)) {
            record.value = new_value.to_string();
            num_replaced += 1;
        }
        if num_replaced == 0 && options.upsert {
            let id = filter
                .id
                .clone()
                .ok_or_else(|| Error::from(ValidationError::MissingField("id".to_string())))?;
            records.push(Setting::new(id, new_value));
            return Ok(UpdateResult {
                num_replaced: 0,
                upserted: true,
            });
        }
        Ok(UpdateResult {
            num_replaced,
            upserted: false,
        })
    }
}

#[derive(Clone, Default)]
pub struct RecordingBootstrap {
    calls: Arc<Mutex<Vec<String>>>,
}

impl RecordingBootstrap {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

impl ClientBootstrap for RecordingBootstrap {
    fn settings_ready(&self, api_key: &str) {
        self.calls.lock().unwrap().push(api_key.to_string());
    }
}
