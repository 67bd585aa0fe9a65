//! Failure model for history queries.

use std::path::PathBuf;

use thiserror::Error;

use crate::store::DbError;

/// Why an identity's installation state could not be turned into a history.
#[derive(Error, Debug)]
pub enum LoadError {
    /// The state database does not exist.
    #[error("Installation state not found at {}", .0.display())]
    MissingState(PathBuf),

    /// The identity is not registered in the state database.
    #[error("Identity '{0}' is not installed")]
    UnknownIdentity(String),

    /// The state database could not be read.
    #[error(transparent)]
    Db(#[from] DbError),

    /// A history record is unreadable.
    #[error("Corrupt history record for patch '{patch_id}': {reason}")]
    CorruptRecord {
        /// Patch id of the broken record.
        patch_id: String,
        /// What was wrong with it.
        reason: String,
    },
}

/// Errors reported by the query orchestration.
#[derive(Error, Debug)]
pub enum QueryError {
    /// The identity's target info or history could not be loaded. Fatal to the query.
    #[error("Failed to load patch info for identity '{identity}'")]
    HistoryLoad {
        /// Name of the identity being queried.
        identity: String,
        /// Underlying cause.
        #[source]
        source: LoadError,
    },

    /// No history entry has the requested patch id. Recoverable.
    #[error("Patch '{patch_id}' not found in history")]
    PatchNotFound {
        /// Requested patch id.
        patch_id: String,
    },

    /// A full read reached the single-patch lookup; the dispatcher must handle it.
    #[error("Full resource reads are handled by the request dispatcher")]
    FullReadNotHandled,
}

impl QueryError {
    /// Wrap a load failure for `identity`.
    pub fn history_load(identity: impl Into<String>, source: LoadError) -> Self {
        Self::HistoryLoad {
            identity: identity.into(),
            source,
        }
    }

    /// True for outcomes the caller is expected to handle (patch not found).
    pub fn is_recoverable(&self) -> bool {
        matches!(self, Self::PatchNotFound { .. })
    }
}
