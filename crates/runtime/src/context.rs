use async_trait::async_trait;
use std::sync::Arc;

use crate::config::{Config, DEFAULT_API_KEY_VAR};
use prefkeep_core::{
    data_files::{DataFileManager, FileFilter, FilePicker, FileSelection},
    events::{NoOpNotificationSink, NotificationSink},
    settings::{
        ClientBootstrap, DefaultsInitializer, InitOutcome, NoOpClientBootstrap, SettingsContext,
        SettingsService, SettingsServiceTrait,
    },
    theme::{PresentationLayer, StylesheetSlot, ThemeManager},
};
use prefkeep_storage_sqlite::{db, settings::SettingsRepository};

/// Host-provided pieces the services talk to.
pub struct Collaborators {
    pub presentation: Arc<dyn PresentationLayer>,
    pub notifier: Arc<dyn NotificationSink>,
    pub file_picker: Arc<dyn FilePicker>,
    pub client_bootstrap: Arc<dyn ClientBootstrap>,
}

impl Collaborators {
    /// Collaborators for running without a UI: an in-memory stylesheet slot,
    /// no notifications, a picker that always cancels, no network client.
    pub fn headless() -> Self {
        Self {
            presentation: Arc::new(StylesheetSlot::default()),
            notifier: Arc::new(NoOpNotificationSink),
            file_picker: Arc::new(HeadlessFilePicker),
            client_bootstrap: Arc::new(NoOpClientBootstrap),
        }
    }
}

/// File picker for hosts without dialogs. Every prompt is cancelled.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeadlessFilePicker;

#[async_trait]
impl FilePicker for HeadlessFilePicker {
    async fn choose_open_file(&self, _filters: &[FileFilter]) -> FileSelection {
        FileSelection::Cancelled
    }

    async fn choose_save_file(&self, _filters: &[FileFilter]) -> FileSelection {
        FileSelection::Cancelled
    }
}

pub struct AppContext {
    pub db_path: String,
    pub settings: SettingsContext,
    pub settings_service: Arc<dyn SettingsServiceTrait>,
    pub theme_manager: Arc<ThemeManager>,
    pub data_files: Arc<DataFileManager>,
    pub initializer: Arc<DefaultsInitializer>,
    /// Result of the startup initialization pass.
    pub init_outcome: InitOutcome,
}

/// Opens the settings database, runs the defaults initializer and builds
/// the services. Returns only after stored settings are in the context and
/// the client bootstrap has been signalled.
pub async fn build_context(
    config: &Config,
    collaborators: Collaborators,
) -> anyhow::Result<Arc<AppContext>> {
    let db_path = db::init(&config.data_dir)?;
    tracing::info!("Settings database in use: {}", db_path);

    if config.default_api_key.is_empty() {
        tracing::warn!(
            "{} is not set; the default API key is empty",
            DEFAULT_API_KEY_VAR
        );
    }

    let pool = db::create_pool(&db_path)?;
    db::run_migrations(&pool)?;
    let writer = db::spawn_writer((*pool).clone());
    let repository = Arc::new(SettingsRepository::new(pool, writer));

    let defaults = config.settings_defaults();
    let settings = SettingsContext::from_defaults(&defaults);

    let theme_manager = Arc::new(ThemeManager::new(
        collaborators.presentation,
        settings.clone(),
        collaborators.notifier.clone(),
    ));

    let initializer = Arc::new(DefaultsInitializer::new(
        repository.clone(),
        theme_manager.clone(),
        settings.clone(),
        defaults.clone(),
        collaborators.client_bootstrap,
    ));
    let init_outcome = initializer.initialize().await?;
    tracing::info!("Settings initialized: {:?}", init_outcome);

    let settings_service: Arc<dyn SettingsServiceTrait> = Arc::new(SettingsService::new(
        repository,
        theme_manager.clone(),
        settings.clone(),
        defaults,
        collaborators.notifier.clone(),
    ));

    let data_files = Arc::new(DataFileManager::new(
        config.data_dir.clone(),
        collaborators.file_picker,
        collaborators.notifier,
    ));

    Ok(Arc::new(AppContext {
        db_path,
        settings,
        settings_service,
        theme_manager,
        data_files,
        initializer,
        init_outcome,
    }))
}
