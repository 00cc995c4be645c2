use async_trait::async_trait;
use std::path::PathBuf;

use super::FileFilter;

/// What the user did with a file dialog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileSelection {
    Selected(PathBuf),
    Cancelled,
}

/// Native open/save dialogs provided by the host application.
#[async_trait]
pub trait FilePicker: Send + Sync {
    async fn choose_open_file(&self, filters: &[FileFilter]) -> FileSelection;

    async fn choose_save_file(&self, filters: &[FileFilter]) -> FileSelection;
}
