//! Shared data model for patchlog.
//!
//! The types here describe what an installation's patch history looks like
//! (`Identity`, `PatchMetadata`, `PatchElement`) and the shape of a projected
//! query answer (`QueryResult`). They are plain values: the core crate builds
//! them, the CLI serializes them.

pub mod result;
pub mod types;

// Re-exports
pub use result::{ElementInfo, QueryResult};
pub use types::*;

/// Cumulative patch id reported for an identity that never had a cumulative patch applied.
pub const BASE_PATCH_ID: &str = "base";
