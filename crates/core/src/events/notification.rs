//! Notification types.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::data_files::DataFileKind;
use crate::theme::Theme;

/// Outcomes the UI renderer displays to the user.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Notification {
    /// A theme was swapped into the presentation layer.
    ThemeApplied { theme: Theme },

    /// Settings from the settings screen were persisted.
    SettingsSaved,

    /// An external file replaced a managed data file.
    FileImported { kind: DataFileKind },

    /// A managed data file was copied to a user-chosen location.
    FileExported { kind: DataFileKind, path: PathBuf },

    /// A managed data file was truncated.
    FileCleared { kind: DataFileKind },

    /// A recoverable failure the user should see.
    Failure { message: String },
}

impl Notification {
    pub fn failure(message: impl Into<String>) -> Self {
        Self::Failure {
            message: message.into(),
        }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self, Notification::Failure { .. })
    }

    /// Text for the toast.
    pub fn message(&self) -> String {
        match self {
            Notification::ThemeApplied { theme } => format!("Theme set to {}.", theme),
            Notification::SettingsSaved => "Settings have been saved.".to_string(),
            Notification::FileImported { kind } => format!(
                "{} have been successfully imported. Please restart for the changes to take effect.",
                kind.label()
            ),
            Notification::FileExported { kind, .. } => {
                format!("{} have been successfully exported", kind.label())
            }
            Notification::FileCleared { .. } => {
                "File has been cleared. Restart to see the changes".to_string()
            }
            Notification::Failure { message } => message.clone(),
        }
    }
}
