use prefkeep_core::settings::SettingsDefaults;
use std::path::PathBuf;

pub const DATA_DIR_VAR: &str = "PREFKEEP_DATA_DIR";
pub const DEFAULT_API_KEY_VAR: &str = "PREFKEEP_DEFAULT_API_KEY";
pub const LOG_FORMAT_VAR: &str = "PREFKEEP_LOG_FORMAT";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

impl LogFormat {
    /// Anything other than `json` (any case) is plain text.
    pub fn parse(value: &str) -> Self {
        if value.trim().eq_ignore_ascii_case("json") {
            LogFormat::Json
        } else {
            LogFormat::Text
        }
    }
}

#[derive(Debug, Clone)]
pub struct Config {
    /// Holds the settings database and the managed data files.
    pub data_dir: PathBuf,
    /// Written on first run and restored when the user clears the key.
    pub default_api_key: String,
    pub log_format: LogFormat,
}

impl Config {
    pub fn new(data_dir: impl Into<PathBuf>, default_api_key: impl Into<String>) -> Self {
        Self {
            data_dir: data_dir.into(),
            default_api_key: default_api_key.into(),
            log_format: LogFormat::default(),
        }
    }

    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();
        let data_dir = std::env::var(DATA_DIR_VAR)
            .map(PathBuf::from)
            .unwrap_or_else(|_| default_data_dir());
        // Runtime value wins over the one baked in at build time.
        let default_api_key = std::env::var(DEFAULT_API_KEY_VAR)
            .ok()
            .or_else(|| option_env!("PREFKEEP_DEFAULT_API_KEY").map(str::to_string))
            .unwrap_or_default();
        let log_format = std::env::var(LOG_FORMAT_VAR)
            .map(|v| LogFormat::parse(&v))
            .unwrap_or_default();
        Self {
            data_dir,
            default_api_key,
            log_format,
        }
    }

    pub fn settings_defaults(&self) -> SettingsDefaults {
        SettingsDefaults::new(self.default_api_key.clone())
    }
}

fn default_data_dir() -> PathBuf {
    dirs::data_dir()
        .map(|dir| dir.join("prefkeep"))
        .unwrap_or_else(|| PathBuf::from("./data"))
}
