//! Patch history of an installed identity.
//!
//! A [`HistorySequence`] is materialized from scratch for every query and
//! holds the identity's applied patches most recent first. It is never
//! mutated after construction; lookups are plain scans over the slice.

use patchlog_schema::{Identity, PatchMetadata, PatchType};

use crate::error::LoadError;
use crate::provider::TargetInfo;
use crate::store::HistoryRecord;

/// One applied patch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistoryEntry {
    patch_id: String,
    patch_type: PatchType,
    metadata: PatchMetadata,
    applied_at: i64,
}

impl HistoryEntry {
    /// Create an entry.
    pub fn new(
        patch_id: impl Into<String>,
        patch_type: PatchType,
        metadata: PatchMetadata,
        applied_at: i64,
    ) -> Self {
        Self {
            patch_id: patch_id.into(),
            patch_type,
            metadata,
            applied_at,
        }
    }

    /// Decode a stored history row.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::CorruptRecord`] if the type name is unknown or the
    /// metadata is not valid JSON for [`PatchMetadata`].
    pub fn from_record(record: &HistoryRecord) -> Result<Self, LoadError> {
        let corrupt = |reason: String| LoadError::CorruptRecord {
            patch_id: record.patch_id.clone(),
            reason,
        };

        let patch_type =
            PatchType::from_name(&record.patch_type).map_err(|e| corrupt(e.to_string()))?;
        let metadata: PatchMetadata =
            serde_json::from_str(&record.metadata).map_err(|e| corrupt(e.to_string()))?;

        Ok(Self::new(
            record.patch_id.clone(),
            patch_type,
            metadata,
            record.applied_at,
        ))
    }

    /// Patch id.
    pub fn patch_id(&self) -> &str {
        &self.patch_id
    }

    /// One-off or cumulative.
    pub fn patch_type(&self) -> PatchType {
        self.patch_type
    }

    /// Recorded patch metadata.
    pub fn metadata(&self) -> &PatchMetadata {
        &self.metadata
    }

    /// Unix timestamp (seconds) the patch was applied at.
    pub fn applied_at(&self) -> i64 {
        self.applied_at
    }
}

/// Applied patches of one identity, most recently applied first.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HistorySequence {
    identity: Identity,
    entries: Vec<HistoryEntry>,
}

impl HistorySequence {
    /// Build the sequence from an identity's target info.
    ///
    /// Records come in application order and are reversed. Entries whose
    /// metadata names another identity are kept but logged.
    ///
    /// # Errors
    ///
    /// Returns [`LoadError::CorruptRecord`] for the first record that cannot be decoded.
    pub fn build(identity: &Identity, info: &TargetInfo) -> Result<Self, LoadError> {
        let mut entries = Vec::with_capacity(info.records.len());
        for record in info.records.iter().rev() {
            let entry = HistoryEntry::from_record(record)?;
            if entry.metadata.identity.name != identity.name {
                tracing::warn!(
                    "Patch '{}' in history of '{}' was built for '{}'",
                    entry.patch_id,
                    identity.name,
                    entry.metadata.identity.name
                );
            }
            entries.push(entry);
        }

        tracing::debug!(
            "Built history of '{}' with {} entries",
            identity.name,
            entries.len()
        );
        Ok(Self {
            identity: identity.clone(),
            entries,
        })
    }

    /// Wrap entries that are already ordered most recent first.
    pub fn from_entries(identity: Identity, entries: Vec<HistoryEntry>) -> Self {
        Self { identity, entries }
    }

    /// Identity the history belongs to.
    pub fn identity(&self) -> &Identity {
        &self.identity
    }

    /// Entries, most recent first.
    pub fn entries(&self) -> &[HistoryEntry] {
        &self.entries
    }

    /// Iterate entries, most recent first.
    pub fn iter(&self) -> std::slice::Iter<'_, HistoryEntry> {
        self.entries.iter()
    }

    /// Number of applied patches.
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// True if nothing was ever applied.
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// See [`find_by_patch_id`].
    pub fn find_by_patch_id(&self, patch_id: &str) -> Option<&HistoryEntry> {
        find_by_patch_id(self, patch_id)
    }
}

impl<'a> IntoIterator for &'a HistorySequence {
    type Item = &'a HistoryEntry;
    type IntoIter = std::slice::Iter<'a, HistoryEntry>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Find the entry for `patch_id`.
///
/// Scans in sequence order and stops at the first match, so if an id ever
/// appears twice the most recently applied entry wins.
pub fn find_by_patch_id<'a>(
    sequence: &'a HistorySequence,
    patch_id: &str,
) -> Option<&'a HistoryEntry> {
    let found = sequence.iter().find(|entry| {
        tracing::trace!("Scanning history entry '{}'", entry.patch_id);
        entry.patch_id == patch_id
    });
    if found.is_none() {
        tracing::debug!(
            "Patch '{patch_id}' not among {} entries of '{}'",
            sequence.len(),
            sequence.identity.name
        );
    }
    found
}
