use log::{error, info, warn};
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tokio::fs;
use tokio::sync::Mutex;
use tokio::task;

use super::{DataFileKind, FileFilter, FilePicker, FileSelection, TransferOutcome};
use crate::constants::TEMP_FILE_SUFFIX;
use crate::errors::{DataFileError, Error, Result};
use crate::events::{Notification, NotificationSink};

/// Moves whole data files in and out of the data directory.
///
/// File contents are opaque. Every write lands in a sibling temp file first
/// and is renamed over the target only once fully synced, so no reader ever
/// sees a half-written file. Writes to one managed file are serialized.
pub struct DataFileManager {
    data_dir: PathBuf,
    picker: Arc<dyn FilePicker>,
    notifier: Arc<dyn NotificationSink>,
    locks: [Mutex<()>; 3],
}

impl DataFileManager {
    pub fn new(
        data_dir: impl Into<PathBuf>,
        picker: Arc<dyn FilePicker>,
        notifier: Arc<dyn NotificationSink>,
    ) -> Self {
        Self {
            data_dir: data_dir.into(),
            picker,
            notifier,
            locks: [Mutex::new(()), Mutex::new(()), Mutex::new(())],
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn managed_path(&self, kind: DataFileKind) -> PathBuf {
        self.data_dir.join(kind.file_name())
    }

    /// Replaces the managed file for `target` with the contents of `source`.
    ///
    /// The source is never modified. On failure the managed file keeps its
    /// previous content and the user is notified.
    pub async fn import_file(&self, source: &Path, target: DataFileKind) -> Result<()> {
        match self.copy_into_managed(source, target).await {
            Ok(()) => {
                self.notifier
                    .notify(Notification::FileImported { kind: target });
                Ok(())
            }
            Err(e) => Err(self.user_failure(e)),
        }
    }

    /// Copies the managed file for `source` to `target_path`.
    ///
    /// The managed file is internal, so failing to read it (or to write the
    /// copy) is escalated as a fatal error rather than shown as a toast.
    pub async fn export_file(&self, target_path: &Path, source: DataFileKind) -> Result<()> {
        let managed = self.managed_path(source);
        let contents = {
            let _guard = self.lock_for(source).lock().await;
            fs::read(&managed)
                .await
                .map_err(|e| self.fatal(DataFileError::ManagedRead {
                    path: managed.clone(),
                    source: e,
                }))?
        };

        let size = contents.len();
        write_atomically(target_path, contents).await.map_err(|e| {
            self.fatal(DataFileError::ExportWrite {
                path: target_path.to_path_buf(),
                source: e,
            })
        })?;

        info!(
            "Exported {} ({} bytes) to {}",
            managed.display(),
            size,
            target_path.display()
        );
        self.notifier.notify(Notification::FileExported {
            kind: source,
            path: target_path.to_path_buf(),
        });
        Ok(())
    }

    /// Truncates the managed file named by `kind`. Unknown names are
    /// reported without touching the file system.
    pub async fn clear_file(&self, kind: &str) -> Result<()> {
        match kind.parse::<DataFileKind>() {
            Ok(kind) => self.clear(kind).await,
            Err(e) => Err(self.user_failure(e)),
        }
    }

    /// Truncates the managed file for `kind`, creating it if missing.
    pub async fn clear(&self, kind: DataFileKind) -> Result<()> {
        let managed = self.managed_path(kind);
        let written = {
            let _guard = self.lock_for(kind).lock().await;
            write_atomically(&managed, Vec::new()).await
        };

        match written {
            Ok(()) => {
                info!("Cleared {}", managed.display());
                self.notifier.notify(Notification::FileCleared { kind });
                Ok(())
            }
            Err(e) => Err(self.user_failure(DataFileError::Write {
                path: managed,
                source: e,
            })),
        }
    }

    /// Asks the user for a `.db` file and imports it into `target`.
    pub async fn import_with_picker(&self, target: DataFileKind) -> Result<TransferOutcome> {
        match self
            .picker
            .choose_open_file(&[FileFilter::database()])
            .await
        {
            FileSelection::Cancelled => {
                info!("Import of {} aborted", target);
                Ok(TransferOutcome::Cancelled)
            }
            FileSelection::Selected(path) => {
                self.import_file(&path, target).await?;
                Ok(TransferOutcome::Completed)
            }
        }
    }

    /// Asks the user where to save and exports `source` there.
    pub async fn export_with_picker(&self, source: DataFileKind) -> Result<TransferOutcome> {
        match self
            .picker
            .choose_save_file(&[FileFilter::database()])
            .await
        {
            FileSelection::Cancelled => {
                info!("Export of {} aborted", source);
                Ok(TransferOutcome::Cancelled)
            }
            FileSelection::Selected(path) => {
                self.export_file(&path, source).await?;
                Ok(TransferOutcome::Completed)
            }
        }
    }

    async fn copy_into_managed(
        &self,
        source: &Path,
        target: DataFileKind,
    ) -> std::result::Result<(), DataFileError> {
        if source.as_os_str().is_empty() {
            return Err(DataFileError::NoPathProvided);
        }
        let contents = read_regular_file(source).await?;
        let size = contents.len();

        let managed = self.managed_path(target);
        let _guard = self.lock_for(target).lock().await;
        write_atomically(&managed, contents)
            .await
            .map_err(|e| DataFileError::Write {
                path: managed.clone(),
                source: e,
            })?;

        info!(
            "Imported {} ({} bytes) into {}",
            source.display(),
            size,
            managed.display()
        );
        Ok(())
    }

    fn lock_for(&self, kind: DataFileKind) -> &Mutex<()> {
        &self.locks[kind.index()]
    }

    fn user_failure(&self, err: DataFileError) -> Error {
        warn!("Data file operation failed: {}", err);
        self.notifier
            .notify(Notification::failure(err.user_message()));
        err.into()
    }

    fn fatal(&self, err: DataFileError) -> Error {
        error!("Data file operation failed fatally: {}", err);
        err.into()
    }
}

async fn read_regular_file(path: &Path) -> std::result::Result<Vec<u8>, DataFileError> {
    let metadata = fs::metadata(path).await.map_err(|e| DataFileError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    if !metadata.is_file() {
        return Err(DataFileError::NotAFile {
            path: path.to_path_buf(),
        });
    }
    fs::read(path).await.map_err(|e| DataFileError::Read {
        path: path.to_path_buf(),
        source: e,
    })
}

fn scratch_prefix(path: &Path) -> String {
    let name = path
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    format!(".{}.", name)
}

/// Writes `contents` to a uniquely named sibling of `path`, syncs it, then
/// renames it over `path`. The scratch file is removed on failure.
async fn write_atomically(path: &Path, contents: Vec<u8>) -> io::Result<()> {
    let dir = match path.parent().filter(|p| !p.as_os_str().is_empty()) {
        Some(parent) => {
            fs::create_dir_all(parent).await?;
            parent.to_path_buf()
        }
        None => PathBuf::from("."),
    };
    let prefix = scratch_prefix(path);
    let target = path.to_path_buf();

    task::spawn_blocking(move || -> io::Result<()> {
        let mut scratch = tempfile::Builder::new()
            .prefix(&prefix)
            .suffix(TEMP_FILE_SUFFIX)
            .tempfile_in(&dir)?;
        scratch.write_all(&contents)?;
        scratch.as_file().sync_all()?;
        scratch.persist(&target).map_err(|e| e.error)?;
        Ok(())
    })
    .await
    .map_err(io::Error::other)?
}
