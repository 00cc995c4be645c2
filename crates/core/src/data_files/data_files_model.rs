use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::constants::{
    DATA_FILE_EXTENSION, HISTORY_FILE_NAME, SAVED_FILE_NAME, SUBSCRIPTIONS_FILE_NAME,
};
use crate::errors::DataFileError;

/// The data files the application manages on the user's behalf.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DataFileKind {
    Subscriptions,
    History,
    Saved,
}

impl DataFileKind {
    pub const ALL: [DataFileKind; 3] = [
        DataFileKind::Subscriptions,
        DataFileKind::History,
        DataFileKind::Saved,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            DataFileKind::Subscriptions => "subscriptions",
            DataFileKind::History => "history",
            DataFileKind::Saved => "saved",
        }
    }

    /// File name inside the data directory.
    pub fn file_name(&self) -> &'static str {
        match self {
            DataFileKind::Subscriptions => SUBSCRIPTIONS_FILE_NAME,
            DataFileKind::History => HISTORY_FILE_NAME,
            DataFileKind::Saved => SAVED_FILE_NAME,
        }
    }

    /// Plural label used in user-facing messages.
    pub fn label(&self) -> &'static str {
        match self {
            DataFileKind::Subscriptions => "Subscriptions",
            DataFileKind::History => "History entries",
            DataFileKind::Saved => "Saved items",
        }
    }

    pub(crate) fn index(&self) -> usize {
        match self {
            DataFileKind::Subscriptions => 0,
            DataFileKind::History => 1,
            DataFileKind::Saved => 2,
        }
    }
}

impl FromStr for DataFileKind {
    type Err = DataFileError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "subscriptions" => Ok(DataFileKind::Subscriptions),
            "history" => Ok(DataFileKind::History),
            "saved" => Ok(DataFileKind::Saved),
            other => Err(DataFileError::UnknownKind(other.to_string())),
        }
    }
}

impl fmt::Display for DataFileKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Restricts the picker to files with the given extensions.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileFilter {
    pub name: String,
    pub extensions: Vec<String>,
}

impl FileFilter {
    pub fn database() -> Self {
        Self {
            name: "Database File".to_string(),
            extensions: vec![DATA_FILE_EXTENSION.to_string()],
        }
    }
}

/// Result of a picker-driven import or export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransferOutcome {
    Completed,
    /// The user dismissed the picker; nothing was touched.
    Cancelled,
}
