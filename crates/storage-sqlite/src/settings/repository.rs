use async_trait::async_trait;
use diesel::prelude::*;
use diesel::sqlite::Sqlite;
use log::debug;
use std::sync::Arc;
use tokio::task;

use super::model::AppSettingDB;
use crate::db::{get_connection, DbPool, WriteHandle};
use crate::errors::IntoCore;
use crate::schema::app_settings;
use prefkeep_core::errors::{Error, Result, ValidationError};
use prefkeep_core::settings::{
    Setting, SettingsFilter, SettingsRepositoryTrait, UpdateOptions, UpdateResult,
};

pub struct SettingsRepository {
    pool: Arc<DbPool>,
    writer: WriteHandle,
}

impl SettingsRepository {
    pub fn new(pool: Arc<DbPool>, writer: WriteHandle) -> Self {
        SettingsRepository { pool, writer }
    }
}

fn filtered<'a>(filter: &SettingsFilter) -> app_settings::BoxedQuery<'a, Sqlite> {
    let mut query = app_settings::table.into_boxed();
    if let Some(id) = &filter.id {
        query = query.filter(app_settings::id.eq(id.clone()));
    }
    if let Some(value) = &filter.value {
        query = query.filter(app_settings::value.eq(value.clone()));
    }
    query.order(app_settings::id.asc())
}

fn load_matching(conn: &mut SqliteConnection, filter: &SettingsFilter) -> Result<Vec<Setting>> {
    let rows = filtered(filter).load::<AppSettingDB>(conn).into_core()?;
    Ok(rows.into_iter().map(Setting::from).collect())
}

#[async_trait]
impl SettingsRepositoryTrait for SettingsRepository {
    async fn find(&self, filter: &SettingsFilter) -> Result<Vec<Setting>> {
        let pool = Arc::clone(&self.pool);
        let filter = filter.clone();

        task::spawn_blocking(move || {
            let mut conn = get_connection(&pool)?;
            load_matching(&mut conn, &filter)
        })
        .await
        .map_err(|e| Error::Unexpected(format!("Settings query task failed: {}", e)))?
    }

    async fn insert(&self, record: Setting) -> Result<Setting> {
        self.writer
            .exec(move |conn| {
                diesel::insert_into(app_settings::table)
                    .values(AppSettingDB::from(record.clone()))
                    .execute(conn)
                    .into_core()?;
                debug!("Inserted setting '{}'", record.id);
                Ok(record)
            })
            .await
    }

    async fn insert_all(&self, records: Vec<Setting>) -> Result<Vec<Setting>> {
        self.writer
            .exec(move |conn| {
                for record in &records {
                    diesel::insert_into(app_settings::table)
                        .values(AppSettingDB::from(record.clone()))
                        .execute(conn)
                        .into_core()?;
                }
                debug!("Inserted {} settings in one transaction", records.len());
                Ok(records)
            })
            .await
    }

    async fn update(
        &self,
        filter: &SettingsFilter,
        new_value: &str,
        options: UpdateOptions,
    ) -> Result<UpdateResult> {
        let filter = filter.clone();
        let new_value = new_value.to_string();

        self.writer
            .exec(move |conn| {
                let ids: Vec<String> = load_matching(conn, &filter)?
                    .into_iter()
                    .map(|s| s.id)
                    .collect();

                if ids.is_empty() {
                    if !options.upsert {
                        return Ok(UpdateResult::default());
                    }
                    let id = filter.id.clone().ok_or_else(|| {
                        Error::from(ValidationError::MissingField("id".to_string()))
                    })?;
                    diesel::insert_into(app_settings::table)
                        .values(AppSettingDB {
                            id,
                            value: new_value,
                        })
                        .execute(conn)
                        .into_core()?;
                    return Ok(UpdateResult {
                        num_replaced: 0,
                        upserted: true,
                    });
                }

                let num_replaced = diesel::update(
                    app_settings::table.filter(app_settings::id.eq_any(&ids)),
                )
                .set(app_settings::value.eq(&new_value))
                .execute(conn)
                .into_core()?;

                Ok(UpdateResult {
                    num_replaced,
                    upserted: false,
                })
            })
            .await
    }
}
