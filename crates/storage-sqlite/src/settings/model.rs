//! Database model for settings records.

use diesel::prelude::*;
use prefkeep_core::settings::Setting;

/// Database row of the settings key-value table
#[derive(Queryable, Insertable, Debug, Clone, PartialEq, Eq)]
#[diesel(table_name = crate::schema::app_settings)]
pub struct AppSettingDB {
    pub id: String,
    pub value: String,
}

impl From<AppSettingDB> for Setting {
    fn from(db: AppSettingDB) -> Self {
        Setting {
            id: db.id,
            value: db.value,
        }
    }
}

impl From<Setting> for AppSettingDB {
    fn from(setting: Setting) -> Self {
        AppSettingDB {
            id: setting.id,
            value: setting.value,
        }
    }
}
