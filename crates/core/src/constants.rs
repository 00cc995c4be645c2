/// Record id of the persisted theme name
pub const THEME_SETTING_ID: &str = "theme";

/// Record id of the persisted API key
pub const API_KEY_SETTING_ID: &str = "apiKey";

/// Managed data file names, relative to the data directory
pub const SUBSCRIPTIONS_FILE_NAME: &str = "subscriptions.db";
pub const HISTORY_FILE_NAME: &str = "videohistory.db";
pub const SAVED_FILE_NAME: &str = "savedvideos.db";

/// Extension offered by the file picker for data files
pub const DATA_FILE_EXTENSION: &str = "db";

/// Suffix of the uniquely named scratch file used for write-then-rename
pub const TEMP_FILE_SUFFIX: &str = ".tmp";
