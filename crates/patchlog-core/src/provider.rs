//! Installed identity provider.
//!
//! The query engine never touches storage directly: it asks an
//! [`IdentityProvider`] for the identity's [`TargetInfo`] once per query.
//! [`InstalledIdentity`] is the provider backed by the on-disk state database.

use std::path::{Path, PathBuf};

use patchlog_schema::Identity;

use crate::error::LoadError;
use crate::paths::db_path_in;
use crate::store::{DbError, HistoryRecord, StateDb};

/// Target metadata of an installed identity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetInfo {
    /// The installed identity.
    pub identity: Identity,
    /// Most recent cumulative patch, or `base`.
    pub cumulative_patch_id: String,
    /// One-off patches applied on top of the cumulative patch, most recent first.
    pub patch_ids: Vec<String>,
    /// Every applied patch, oldest first.
    pub records: Vec<HistoryRecord>,
}

/// Source of an identity's installation state.
pub trait IdentityProvider {
    /// Name of the identity this provider serves.
    fn identity_name(&self) -> &str;

    /// Load the identity's target info in a single read.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] describing why the state could not be loaded.
    fn load_target_info(&self) -> Result<TargetInfo, LoadError>;
}

/// An identity installed under a patchlog home directory.
#[derive(Debug, Clone)]
pub struct InstalledIdentity {
    name: String,
    db_path: PathBuf,
}

impl InstalledIdentity {
    /// Provider for `name`, reading the database at `db_path`.
    pub fn new(name: impl Into<String>, db_path: impl Into<PathBuf>) -> Self {
        Self {
            name: name.into(),
            db_path: db_path.into(),
        }
    }

    /// Provider for `name` using the state database inside `home`.
    pub fn in_home(name: impl Into<String>, home: &Path) -> Self {
        Self::new(name, db_path_in(home))
    }

    /// Path of the backing state database.
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }
}

impl IdentityProvider for InstalledIdentity {
    fn identity_name(&self) -> &str {
        &self.name
    }

    fn load_target_info(&self) -> Result<TargetInfo, LoadError> {
        if !self.db_path.exists() {
            return Err(LoadError::MissingState(self.db_path.clone()));
        }

        tracing::debug!(
            "Loading target info for '{}' from {}",
            self.name,
            self.db_path.display()
        );
        let db = StateDb::open_read_only(&self.db_path)?;
        db.load_target_info(&self.name).map_err(|e| match e {
            DbError::IdentityNotFound(name) => LoadError::UnknownIdentity(name),
            other => LoadError::Db(other),
        })
    }
}
