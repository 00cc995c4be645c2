//! Import, export and clear of the managed data files.

mod data_file_manager;
mod data_files_model;
mod file_picker;

pub use data_file_manager::DataFileManager;
pub use data_files_model::*;
pub use file_picker::{FilePicker, FileSelection};
