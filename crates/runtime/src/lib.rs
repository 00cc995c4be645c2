//! Startup wiring for prefkeep.
//!
//! The host application calls [`Config::from_env`], [`init_tracing`] and
//! then [`build_context`], which opens the settings database, runs the
//! defaults initializer and hands back the services the UI talks to.

mod config;
mod context;
mod logging;

pub use config::{Config, LogFormat, DATA_DIR_VAR, DEFAULT_API_KEY_VAR, LOG_FORMAT_VAR};
pub use context::{build_context, AppContext, Collaborators, HeadlessFilePicker};
pub use logging::init_tracing;
