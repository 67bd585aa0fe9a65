//! Projection of a history entry into a [`QueryResult`].

use patchlog_schema::{ElementInfo, PatchElement, QueryResult};

use crate::history::HistoryEntry;

/// Project `entry` into a query result.
///
/// The element breakdown is only produced when `verbose` is set; otherwise
/// `elements` is `None`, which is a different shape from an empty list.
pub fn project(entry: &HistoryEntry, verbose: bool) -> QueryResult {
    let metadata = entry.metadata();
    let identity = &metadata.identity;

    QueryResult {
        patch_id: entry.patch_id().to_string(),
        patch_type: entry.patch_type().name().to_string(),
        description: metadata.description.clone(),
        link: metadata.link.clone(),
        identity_name: identity.name.clone(),
        identity_version: identity.version.clone(),
        elements: verbose.then(|| metadata.elements.iter().map(project_element).collect()),
    }
}

fn project_element(element: &PatchElement) -> ElementInfo {
    ElementInfo {
        id: element.id.clone(),
        kind: element.provider.kind.tag().to_string(),
        name: element.provider.name.clone(),
        description: element.description.clone(),
    }
}
