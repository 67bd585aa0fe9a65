//! patchlog-core - patch history queries
//!
//! Answers "what was patch X applied to this installation?" from an
//! already-materialized installation state. Nothing here applies, creates
//! or rolls back patches.
//!
//! # Architecture
//!
//! - **Provider**: [`IdentityProvider`] loads an identity's [`TargetInfo`] in a
//!   single read. [`InstalledIdentity`] reads it from the `SQLite` state database.
//! - **History**: [`HistorySequence`] is rebuilt per query, most recent first.
//! - **Lookup**: [`find_by_patch_id`] is a first-match linear scan.
//! - **Projection**: [`project`] turns an entry into a [`QueryResult`].
//! - **Orchestration**: [`query_patch`] ties the above together; a missing
//!   patch is a recoverable [`QueryOutcome::NotFound`], a load failure is a
//!   fatal [`QueryError::HistoryLoad`].
//!
//! # Directory Layout
//!
//! ```text
//! ~/.patchlog/
//! └── state.db    # SQLite database (identities + history)
//! ```

pub mod error;
pub mod history;
pub mod paths;
pub mod project;
pub mod provider;
pub mod query;
pub mod store;
pub mod summary;

pub use error::{LoadError, QueryError};
pub use history::{HistoryEntry, HistorySequence, find_by_patch_id};
pub use paths::*;
pub use patchlog_schema::QueryResult;
pub use project::project;
pub use provider::{IdentityProvider, InstalledIdentity, TargetInfo};
pub use query::{Query, QueryOutcome, execute, query_patch};
pub use store::StateDb;
pub use summary::{InstallationSummary, read_installation};
