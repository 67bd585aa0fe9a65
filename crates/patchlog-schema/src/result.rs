//! Projected answer to a single-patch query.
//!
//! Field names follow the management attribute names (`patch-id`,
//! `identity-name`, ...) so the JSON form can be handed to any consumer
//! expecting that tree.

use serde::{Deserialize, Serialize};

/// Attribute names used in serialized output.
pub mod attr {
    /// Patch or element id.
    pub const PATCH_ID: &str = "patch-id";
    /// Patch type name or element kind tag.
    pub const TYPE: &str = "type";
    /// Description.
    pub const DESCRIPTION: &str = "description";
    /// Optional link.
    pub const LINK: &str = "link";
    /// Identity name.
    pub const IDENTITY_NAME: &str = "identity-name";
    /// Identity version.
    pub const IDENTITY_VERSION: &str = "identity-version";
    /// Verbose element list.
    pub const ELEMENTS: &str = "elements";
    /// Add-on or layer name of an element.
    pub const NAME: &str = "name";
}

/// Projection of one patch element (verbose mode only).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ElementInfo {
    /// Element id.
    #[serde(rename = "patch-id")]
    pub id: String,

    /// `add-on` or `layer`.
    #[serde(rename = "type")]
    pub kind: String,

    /// Add-on or layer name.
    pub name: String,

    /// Element description.
    pub description: String,
}

/// Projection of a matched history entry.
///
/// `link` and `elements` are absent rather than empty when not set: a
/// non-verbose result has no `elements` key at all.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueryResult {
    /// Patch id.
    #[serde(rename = "patch-id")]
    pub patch_id: String,

    /// Patch type name (`one-off` or `cumulative`).
    #[serde(rename = "type")]
    pub patch_type: String,

    /// Patch description.
    pub description: String,

    /// Link from the patch metadata, when it defines one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub link: Option<String>,

    /// Name of the identity the patch was built for.
    #[serde(rename = "identity-name")]
    pub identity_name: String,

    /// Version of the identity the patch was built for.
    #[serde(rename = "identity-version")]
    pub identity_version: String,

    /// Per-element breakdown, present only for verbose queries.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub elements: Option<Vec<ElementInfo>>,
}
