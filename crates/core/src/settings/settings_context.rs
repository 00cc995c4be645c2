use std::sync::{Arc, PoisonError, RwLock};

use crate::settings::SettingsDefaults;
use crate::theme::Theme;

#[derive(Debug)]
struct SettingsState {
    current_theme: Theme,
    api_key: String,
}

/// Process-wide projection of the recognized settings.
///
/// Cheap to clone; all clones share one state. Only the theme manager and
/// the settings services write to it, and only after a successful store
/// write (or, for the theme, after the stylesheet swap).
#[derive(Debug, Clone)]
pub struct SettingsContext {
    state: Arc<RwLock<SettingsState>>,
}

impl SettingsContext {
    pub fn new(current_theme: Theme, api_key: impl Into<String>) -> Self {
        Self {
            state: Arc::new(RwLock::new(SettingsState {
                current_theme,
                api_key: api_key.into(),
            })),
        }
    }

    pub fn from_defaults(defaults: &SettingsDefaults) -> Self {
        Self::new(defaults.theme, defaults.api_key.clone())
    }

    pub fn current_theme(&self) -> Theme {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .current_theme
    }

    pub fn api_key(&self) -> String {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .api_key
            .clone()
    }

    pub(crate) fn set_current_theme(&self, theme: Theme) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .current_theme = theme;
    }

    pub(crate) fn set_api_key(&self, api_key: String) {
        self.state
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .api_key = api_key;
    }
}
