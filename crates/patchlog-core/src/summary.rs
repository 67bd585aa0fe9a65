//! Full read of an installation's patching state.
//!
//! This is what the request dispatcher shows when no patch id is given: the
//! identity, its current cumulative level, the active one-off patches and
//! the complete history.

use serde::Serialize;

use crate::error::QueryError;
use crate::history::HistorySequence;
use crate::provider::IdentityProvider;

/// One row of the history listing.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct HistoryItem {
    /// Patch id.
    pub patch_id: String,
    /// Patch type name.
    #[serde(rename = "type")]
    pub patch_type: String,
    /// Unix timestamp (seconds) of application.
    pub applied_at: i64,
}

/// Patching state of one identity.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub struct InstallationSummary {
    /// Identity name.
    pub identity_name: String,
    /// Identity version.
    pub identity_version: String,
    /// Current cumulative patch id (`base` if none).
    pub cumulative_patch_id: String,
    /// Active one-off patches, most recent first.
    pub patches: Vec<String>,
    /// Every applied patch, most recent first.
    pub history: Vec<HistoryItem>,
}

/// Read the whole patching state of the provider's identity.
///
/// # Errors
///
/// Returns [`QueryError::HistoryLoad`] if the target info or history cannot be loaded.
pub fn read_installation<P>(provider: &P) -> Result<InstallationSummary, QueryError>
where
    P: IdentityProvider + ?Sized,
{
    let name = provider.identity_name();
    let info = provider
        .load_target_info()
        .map_err(|e| QueryError::history_load(name, e))?;
    let sequence = HistorySequence::build(&info.identity, &info)
        .map_err(|e| QueryError::history_load(name, e))?;

    let history = sequence
        .iter()
        .map(|entry| HistoryItem {
            patch_id: entry.patch_id().to_string(),
            patch_type: entry.patch_type().name().to_string(),
            applied_at: entry.applied_at(),
        })
        .collect();

    Ok(InstallationSummary {
        identity_name: info.identity.name,
        identity_version: info.identity.version,
        cumulative_patch_id: info.cumulative_patch_id,
        patches: info.patch_ids,
        history,
    })
}
