//! Installation state storage.

pub mod db;
pub mod history;

pub use db::{DbError, IdentityRecord, StateDb};
pub use history::HistoryRecord;
