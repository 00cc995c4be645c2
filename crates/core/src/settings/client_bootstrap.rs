use log::debug;

/// The network client that starts once settings are loaded.
pub trait ClientBootstrap: Send + Sync {
    /// Called once, after defaults initialization, with the resolved API key.
    fn settings_ready(&self, api_key: &str);
}

/// Bootstrap that only logs; used when no network client is attached.
#[derive(Clone, Default)]
pub struct NoOpClientBootstrap;

impl ClientBootstrap for NoOpClientBootstrap {
    fn settings_ready(&self, _api_key: &str) {
        debug!("Settings ready; no network client attached");
    }
}
