use log::{debug, info};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::errors::Result;
use crate::settings::{
    ClientBootstrap, SettingKind, SettingsContext, SettingsDefaults, SettingsFilter,
    SettingsRepositoryTrait,
};
use crate::theme::ThemeManager;

/// What a call to `DefaultsInitializer::initialize` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InitOutcome {
    /// The store was empty and the defaults were written.
    FirstRun,
    /// Existing records were loaded into the settings context.
    Loaded { records: usize },
}

/// Seeds an empty store with defaults, or loads stored settings into the
/// settings context, then tells the network client it can start.
pub struct DefaultsInitializer {
    repository: Arc<dyn SettingsRepositoryTrait>,
    theme_manager: Arc<ThemeManager>,
    context: SettingsContext,
    defaults: SettingsDefaults,
    bootstrap: Arc<dyn ClientBootstrap>,
    init_lock: Mutex<()>,
    ready_signalled: AtomicBool,
}

impl DefaultsInitializer {
    pub fn new(
        repository: Arc<dyn SettingsRepositoryTrait>,
        theme_manager: Arc<ThemeManager>,
        context: SettingsContext,
        defaults: SettingsDefaults,
        bootstrap: Arc<dyn ClientBootstrap>,
    ) -> Self {
        Self {
            repository,
            theme_manager,
            context,
            defaults,
            bootstrap,
            init_lock: Mutex::new(()),
            ready_signalled: AtomicBool::new(false),
        }
    }

    /// Runs one initialization pass.
    ///
    /// Any stored record means the store is initialized, even when only one
    /// of `theme`/`apiKey` is present; the missing one is not re-created.
    pub async fn initialize(&self) -> Result<InitOutcome> {
        let _guard = self.init_lock.lock().await;

        let docs = self.repository.find(&SettingsFilter::all()).await?;

        let outcome = if docs.is_empty() {
            info!("Settings store is empty, writing defaults");
            self.repository
                .insert_all(Vec::from(self.defaults.records()))
                .await?;
            self.context.set_api_key(self.defaults.api_key.clone());
            self.theme_manager.apply(self.defaults.theme);
            InitOutcome::FirstRun
        } else {
            for setting in &docs {
                match setting.kind() {
                    Some(SettingKind::Theme) => {
                        self.theme_manager.apply_theme(&setting.value);
                    }
                    Some(SettingKind::ApiKey) => {
                        self.context.set_api_key(setting.value.clone());
                    }
                    None => debug!("Ignoring unrecognized setting '{}'", setting.id),
                }
            }
            info!("Loaded {} stored settings", docs.len());
            InitOutcome::Loaded {
                records: docs.len(),
            }
        };

        if !self.ready_signalled.swap(true, Ordering::SeqCst) {
            self.bootstrap.settings_ready(&self.context.api_key());
        }

        Ok(outcome)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::MockNotificationSink;
    use crate::settings::test_support::{MockSettingsRepository, RecordingBootstrap};
    use crate::settings::Setting;
    use crate::theme::{StylesheetSlot, Theme};

    struct Fixture {
        initializer: DefaultsInitializer,
        repository: Arc<MockSettingsRepository>,
        context: SettingsContext,
        slot: Arc<StylesheetSlot>,
        bootstrap: RecordingBootstrap,
    }

    fn fixture(records: Vec<Setting>) -> Fixture {
        let defaults = SettingsDefaults::new("built-in-key");
        let repository = Arc::new(MockSettingsRepository::new(records));
        let context = SettingsContext::from_defaults(&defaults);
        let slot = Arc::new(StylesheetSlot::default());
        let theme_manager = Arc::new(ThemeManager::new(
            slot.clone(),
            context.clone(),
            Arc::new(MockNotificationSink::new()),
        ));
        let bootstrap = RecordingBootstrap::default();
        let initializer = DefaultsInitializer::new(
            repository.clone(),
            theme_manager,
            context.clone(),
            defaults,
            Arc::new(bootstrap.clone()),
        );
        Fixture {
            initializer,
            repository,
            context,
            slot,
            bootstrap,
        }
    }

    #[tokio::test]
    async fn test_first_run_inserts_both_defaults() {
        let f = fixture(vec![]);

        let outcome = f.initializer.initialize().await.unwrap();

        assert_eq!(outcome, InitOutcome::FirstRun);
        assert_eq!(f.repository.value_of("theme").as_deref(), Some("light"));
        assert_eq!(
            f.repository.value_of("apiKey").as_deref(),
            Some("built-in-key")
        );
        assert_eq!(f.context.current_theme(), Theme::Light);
        assert_eq!(f.slot.active(), Theme::Light.stylesheet());
        assert_eq!(f.bootstrap.calls(), vec!["built-in-key".to_string()]);
    }

    #[tokio::test]
    async fn test_repeated_initialization_never_duplicates() {
        let f = fixture(vec![]);

        for _ in 0..3 {
            f.initializer.initialize().await.unwrap();
        }

        assert_eq!(f.repository.count_of("theme"), 1);
        assert_eq!(f.repository.count_of("apiKey"), 1);
        assert_eq!(f.repository.insert_calls(), 2);
        assert_eq!(f.bootstrap.calls().len(), 1);
    }

    #[tokio::test]
    async fn test_loads_stored_values() {
        let f = fixture(vec![
            Setting::new("theme", "dark"),
            Setting::new("apiKey", "user-key"),
            Setting::new("region", "CA"),
        ]);

        let outcome = f.initializer.initialize().await.unwrap();

        assert_eq!(outcome, InitOutcome::Loaded { records: 3 });
        assert_eq!(f.context.current_theme(), Theme::Dark);
        assert_eq!(f.slot.active().href(), "style/darkTheme.css");
        assert_eq!(f.context.api_key(), "user-key");
        assert_eq!(f.repository.insert_calls(), 0);
        assert_eq!(f.repository.value_of("region").as_deref(), Some("CA"));
        assert_eq!(f.bootstrap.calls(), vec!["user-key".to_string()]);
    }

    #[tokio::test]
    async fn test_partial_store_is_not_repaired() {
        let f = fixture(vec![Setting::new("theme", "dark")]);

        let outcome = f.initializer.initialize().await.unwrap();

        assert_eq!(outcome, InitOutcome::Loaded { records: 1 });
        assert_eq!(f.repository.count_of("apiKey"), 0);
        assert_eq!(f.repository.insert_calls(), 0);
        // falls back to the configured default held by the context
        assert_eq!(f.context.api_key(), "built-in-key");
    }

    #[tokio::test]
    async fn test_unknown_stored_theme_applies_light() {
        let f = fixture(vec![Setting::new("theme", "sepia")]);

        f.initializer.initialize().await.unwrap();

        assert_eq!(f.context.current_theme(), Theme::Light);
        assert_eq!(f.slot.active(), Theme::Light.stylesheet());
    }

    #[tokio::test]
    async fn test_failed_insert_propagates_without_signalling() {
        let f = fixture(vec![]);
        f.repository.fail_writes(true);

        let result = f.initializer.initialize().await;

        assert!(result.is_err());
        assert!(f.bootstrap.calls().is_empty());
        assert!(f.repository.records().is_empty());
    }

    #[tokio::test]
    async fn test_failed_seed_leaves_store_empty_and_retries() {
        let f = fixture(vec![]);
        f.repository.fail_insert_number(2);

        let first = f.initializer.initialize().await;

        assert!(first.is_err());
        assert!(f.repository.records().is_empty());
        assert!(f.bootstrap.calls().is_empty());

        let second = f.initializer.initialize().await.unwrap();

        assert_eq!(second, InitOutcome::FirstRun);
        assert_eq!(f.repository.value_of("theme").as_deref(), Some("light"));
        assert_eq!(
            f.repository.value_of("apiKey").as_deref(),
            Some("built-in-key")
        );
        assert_eq!(f.bootstrap.calls(), vec!["built-in-key".to_string()]);
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 2)]
    async fn test_concurrent_initialization_seeds_once() {
        let f = fixture(vec![]);

        let (a, b) = tokio::join!(f.initializer.initialize(), f.initializer.initialize());

        let mut outcomes = vec![a.unwrap(), b.unwrap()];
        outcomes.sort_by_key(|o| matches!(o, InitOutcome::Loaded { .. }));
        assert_eq!(
            outcomes,
            vec![InitOutcome::FirstRun, InitOutcome::Loaded { records: 2 }]
        );
        assert_eq!(f.repository.insert_calls(), 2);
        assert_eq!(f.repository.count_of("theme"), 1);
        assert_eq!(f.repository.count_of("apiKey"), 1);
        assert_eq!(f.bootstrap.calls().len(), 1);
    }
}
