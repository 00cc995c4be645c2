use async_trait::async_trait;
use log::{debug, error, warn};
use std::sync::Arc;

use super::SettingsRepositoryTrait;
use crate::errors::Result;
use crate::events::{Notification, NotificationSink};
use crate::settings::{
    SettingKind, SettingsContext, SettingsDefaults, SettingsFilter, SettingsView, UpdateOptions,
};
use crate::theme::{Theme, ThemeManager};

/// User-driven settings operations behind the settings screen.
#[async_trait]
pub trait SettingsServiceTrait: Send + Sync {
    /// Persists the settings screen. An empty API key input restores the
    /// built-in default key.
    async fn update_from_ui(&self, theme_checked: bool, api_key_input: &str) -> Result<()>;

    /// Applies the theme for the toggle state without persisting it.
    fn toggle_theme(&self, checked: bool) -> Theme;

    /// Builds the render payload for the settings screen.
    async fn settings_view(&self) -> Result<SettingsView>;

    /// Get a single setting value. Returns None if no record exists.
    async fn get_setting_value(&self, kind: SettingKind) -> Result<Option<String>>;
}

pub struct SettingsService {
    repository: Arc<dyn SettingsRepositoryTrait>,
    theme_manager: Arc<ThemeManager>,
    context: SettingsContext,
    defaults: SettingsDefaults,
    notifier: Arc<dyn NotificationSink>,
}

impl SettingsService {
    pub fn new(
        repository: Arc<dyn SettingsRepositoryTrait>,
        theme_manager: Arc<ThemeManager>,
        context: SettingsContext,
        defaults: SettingsDefaults,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        SettingsService {
            repository,
            theme_manager,
            context,
            defaults,
            notifier,
        }
    }

    async fn persist(&self, theme: Theme, api_key_input: &str) -> Result<()> {
        let theme_update = self
            .repository
            .update(
                &SettingsFilter::by_kind(SettingKind::Theme),
                theme.as_str(),
                UpdateOptions::default(),
            )
            .await?;
        if theme_update.is_noop() {
            warn!("No theme record to update; store was not initialized");
        }

        let api_key = if api_key_input.is_empty() {
            self.defaults.api_key.clone()
        } else {
            api_key_input.to_string()
        };
        let api_key_update = self
            .repository
            .update(
                &SettingsFilter::by_kind(SettingKind::ApiKey),
                &api_key,
                UpdateOptions::default(),
            )
            .await?;
        if api_key_update.is_noop() {
            warn!("No apiKey record to update; store was not initialized");
        } else {
            self.context.set_api_key(api_key);
        }

        debug!(
            "Persisted theme={} ({} replaced), apiKey ({} replaced)",
            theme, theme_update.num_replaced, api_key_update.num_replaced
        );
        Ok(())
    }
}

#[async_trait]
impl SettingsServiceTrait for SettingsService {
    async fn update_from_ui(&self, theme_checked: bool, api_key_input: &str) -> Result<()> {
        let theme = Theme::from_toggle(theme_checked);
        match self.persist(theme, api_key_input).await {
            Ok(()) => {
                self.notifier.notify(Notification::SettingsSaved);
                Ok(())
            }
            Err(e) => {
                error!("Failed to save settings: {}", e);
                self.notifier
                    .notify(Notification::failure("Unable to save settings."));
                Err(e)
            }
        }
    }

    fn toggle_theme(&self, checked: bool) -> Theme {
        self.theme_manager.apply(Theme::from_toggle(checked))
    }

    async fn settings_view(&self) -> Result<SettingsView> {
        let stored_key = self.get_setting_value(SettingKind::ApiKey).await?;
        let api_key_value = stored_key
            .filter(|key| *key != self.defaults.api_key)
            .unwrap_or_default();

        Ok(SettingsView {
            is_checked: self.context.current_theme().is_dark(),
            api_key_value,
        })
    }

    async fn get_setting_value(&self, kind: SettingKind) -> Result<Option<String>> {
        let records = self
            .repository
            .find(&SettingsFilter::by_kind(kind))
            .await?;
        Ok(records.into_iter().next().map(|s| s.value))
    }
}
