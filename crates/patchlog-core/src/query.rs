//! Query orchestration.
//!
//! A request either asks for one patch by id or for a full read of the
//! installation. Only the by-id arm is answered here; the full read belongs
//! to the request dispatcher (see [`crate::summary`]).

use patchlog_schema::QueryResult;

use crate::error::QueryError;
use crate::history::HistorySequence;
use crate::project::project;
use crate::provider::IdentityProvider;

/// What the caller asked for.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// No patch id: dump the whole resource.
    FullRead,
    /// Look up a single patch.
    ByPatchId {
        /// Requested patch id.
        patch_id: String,
        /// Include the per-element breakdown.
        verbose: bool,
    },
}

impl Query {
    /// Choose the arm from an optional patch id.
    pub fn from_request(patch_id: Option<String>, verbose: bool) -> Self {
        match patch_id {
            Some(patch_id) => Self::ByPatchId { patch_id, verbose },
            None => Self::FullRead,
        }
    }
}

/// Completed single-patch query.
///
/// A not-found outcome is still a completed query: it carries no result and
/// reports a recoverable [`QueryError::PatchNotFound`] instead.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum QueryOutcome {
    /// The patch is in the history.
    Found(QueryResult),
    /// The patch id has no history entry.
    NotFound {
        /// Requested patch id.
        patch_id: String,
    },
}

impl QueryOutcome {
    /// Outcome for a patch id absent from the history.
    pub fn not_found(patch_id: impl Into<String>) -> Self {
        Self::NotFound {
            patch_id: patch_id.into(),
        }
    }

    /// The projected result, if the patch was found.
    pub fn result(&self) -> Option<&QueryResult> {
        match self {
            Self::Found(result) => Some(result),
            Self::NotFound { .. } => None,
        }
    }

    /// The recoverable failure, if the patch was not found.
    pub fn failure(&self) -> Option<QueryError> {
        match self {
            Self::Found(_) => None,
            Self::NotFound { patch_id } => Some(QueryError::PatchNotFound {
                patch_id: patch_id.clone(),
            }),
        }
    }

    /// Human-readable failure description.
    pub fn failure_description(&self) -> Option<String> {
        self.failure().as_ref().map(ToString::to_string)
    }

    /// True if a result is present.
    pub fn is_found(&self) -> bool {
        matches!(self, Self::Found(_))
    }

    /// Collapse into a `Result`, turning the recoverable failure into an error.
    ///
    /// # Errors
    ///
    /// Returns [`QueryError::PatchNotFound`] when the patch was not found.
    pub fn into_result(self) -> Result<QueryResult, QueryError> {
        match self {
            Self::Found(result) => Ok(result),
            Self::NotFound { patch_id } => Err(QueryError::PatchNotFound { patch_id }),
        }
    }
}

/// Look up `patch_id` in the provider's identity history.
///
/// A missing patch is not an error: the returned outcome has no result and a
/// [`QueryError::PatchNotFound`] failure instead.
///
/// # Errors
///
/// Returns [`QueryError::HistoryLoad`] if the target info or history cannot
/// be loaded; nothing is looked up in that case.
pub fn query_patch<P>(
    provider: &P,
    patch_id: &str,
    verbose: bool,
) -> Result<QueryOutcome, QueryError>
where
    P: IdentityProvider + ?Sized,
{
    let name = provider.identity_name();
    let info = provider
        .load_target_info()
        .map_err(|e| QueryError::history_load(name, e))?;

    let sequence = HistorySequence::build(&info.identity, &info)
        .map_err(|e| QueryError::history_load(name, e))?;

    match sequence.find_by_patch_id(patch_id) {
        Some(entry) => {
            tracing::debug!("Found patch '{patch_id}' for '{name}'");
            Ok(QueryOutcome::Found(project(entry, verbose)))
        }
        None => Ok(QueryOutcome::not_found(patch_id)),
    }
}

/// Run a query.
///
/// # Errors
///
/// Returns [`QueryError::FullReadNotHandled`] for [`Query::FullRead`], and
/// whatever [`query_patch`] returns otherwise.
pub fn execute<P>(provider: &P, query: &Query) -> Result<QueryOutcome, QueryError>
where
    P: IdentityProvider + ?Sized,
{
    match query {
        Query::FullRead => Err(QueryError::FullReadNotHandled),
        Query::ByPatchId { patch_id, verbose } => query_patch(provider, patch_id, *verbose),
    }
}
