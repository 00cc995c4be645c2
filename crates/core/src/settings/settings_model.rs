use serde::{Deserialize, Serialize};

use crate::constants::{API_KEY_SETTING_ID, THEME_SETTING_ID};
use crate::theme::Theme;

/// A single persisted setting. `id` is unique across the store.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Setting {
    pub id: String,
    pub value: String,
}

impl Setting {
    pub fn new(id: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            value: value.into(),
        }
    }

    /// The recognized kind of this record, if any.
    pub fn kind(&self) -> Option<SettingKind> {
        SettingKind::from_id(&self.id)
    }
}

/// Setting ids the business logic understands. Other ids are kept in the
/// store but ignored.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SettingKind {
    Theme,
    ApiKey,
}

impl SettingKind {
    pub fn id(&self) -> &'static str {
        match self {
            SettingKind::Theme => THEME_SETTING_ID,
            SettingKind::ApiKey => API_KEY_SETTING_ID,
        }
    }

    pub fn from_id(id: &str) -> Option<Self> {
        match id {
            THEME_SETTING_ID => Some(SettingKind::Theme),
            API_KEY_SETTING_ID => Some(SettingKind::ApiKey),
            _ => None,
        }
    }
}

/// Exact-match filter over setting fields. The empty filter matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SettingsFilter {
    pub id: Option<String>,
    pub value: Option<String>,
}

impl SettingsFilter {
    pub fn all() -> Self {
        Self::default()
    }

    pub fn by_id(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            value: None,
        }
    }

    pub fn by_kind(kind: SettingKind) -> Self {
        Self::by_id(kind.id())
    }

    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    pub fn matches(&self, setting: &Setting) -> bool {
        self.id.as_deref().map_or(true, |id| id == setting.id)
            && self.value.as_deref().map_or(true, |v| v == setting.value)
    }
}

/// Options for `SettingsRepositoryTrait::update`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateOptions {
    /// Insert a record when nothing matches. Requires an id in the filter.
    pub upsert: bool,
}

impl UpdateOptions {
    pub fn upsert() -> Self {
        Self { upsert: true }
    }
}

/// What an update changed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct UpdateResult {
    pub num_replaced: usize,
    pub upserted: bool,
}

impl UpdateResult {
    /// Nothing matched and nothing was inserted.
    pub fn is_noop(&self) -> bool {
        self.num_replaced == 0 && !self.upserted
    }
}

/// Values written on first run and restored on request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SettingsDefaults {
    pub theme: Theme,
    pub api_key: String,
}

impl SettingsDefaults {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            theme: Theme::Light,
            api_key: api_key.into(),
        }
    }

    /// The two records a first run inserts, theme first.
    pub fn records(&self) -> [Setting; 2] {
        [
            Setting::new(SettingKind::Theme.id(), self.theme.as_str()),
            Setting::new(SettingKind::ApiKey.id(), self.api_key.clone()),
        ]
    }
}

/// Payload for rendering the settings screen.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettingsView {
    pub is_checked: bool,
    pub api_key_value: String,
}
