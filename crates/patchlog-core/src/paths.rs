//! Filesystem locations of the installation state.

use dirs::home_dir;
use std::path::{Path, PathBuf};

/// Environment variable overriding the patchlog home directory.
pub const HOME_ENV: &str = "PATCHLOG_HOME";

/// File name of the state database inside the home directory.
pub const DB_FILE: &str = "state.db";

/// Returns the patchlog home directory, or None if the user's home cannot be resolved.
pub fn try_patchlog_home() -> Option<PathBuf> {
    if let Ok(val) = std::env::var(HOME_ENV) {
        return Some(PathBuf::from(val));
    }
    home_dir().map(|h| h.join(".patchlog"))
}

/// `SQLite` database path inside a given home: <home>/state.db
pub fn db_path_in(home: &Path) -> PathBuf {
    home.join(DB_FILE)
}

/// `SQLite` database path under the default home: ~/.patchlog/state.db
pub fn try_db_path() -> Option<PathBuf> {
    try_patchlog_home().map(|home| db_path_in(&home))
}
