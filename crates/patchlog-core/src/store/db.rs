//! `SQLite` state database
//!
//! Tracks registered identities and the patches applied to each of them.
//! The query path only ever opens this database read-only.

use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use patchlog_schema::{BASE_PATCH_ID, Identity, PatchMetadata, PatchType};
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use thiserror::Error;

use super::history::HistoryRecord;
use crate::provider::TargetInfo;

/// Errors raised by the state database.
#[derive(Error, Debug)]
pub enum DbError {
    /// Underlying `SQLite` failure.
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),

    /// No identity with this name is registered.
    #[error("Identity not found: {0}")]
    IdentityNotFound(String),

    /// The patch id is already present in this identity's history.
    #[error("Patch '{patch_id}' is already recorded for identity '{identity}'")]
    DuplicatePatch {
        /// Identity name.
        identity: String,
        /// Offending patch id.
        patch_id: String,
    },

    /// Patch metadata could not be encoded for storage.
    #[error("Failed to encode patch metadata: {0}")]
    Serialize(#[from] serde_json::Error),
}

/// Registered identity record
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IdentityRecord {
    /// Identity name.
    pub name: String,
    /// Installed version.
    pub version: String,
    /// Unix timestamp (seconds) of registration.
    pub registered_at: i64,
}

/// State database for an installation
#[derive(Debug)]
pub struct StateDb {
    conn: Connection,
}

impl StateDb {
    /// Open or create the database at `path`, creating the schema if needed.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the file cannot be opened or the schema cannot be created.
    pub fn open_at(path: &Path) -> Result<Self, DbError> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).ok();
        }
        let conn = Connection::open(path)?;

        let db = Self { conn };
        db.init_schema()?;
        Ok(db)
    }

    /// Open an existing database without write access.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] if the file does not exist or is not a database.
    pub fn open_read_only(path: &Path) -> Result<Self, DbError> {
        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )?;
        Ok(Self { conn })
    }

    /// Initialize database schema
    fn init_schema(&self) -> Result<(), DbError> {
        self.conn.execute_batch(
            "
            CREATE TABLE IF NOT EXISTS identities (
                name TEXT PRIMARY KEY,
                version TEXT NOT NULL,
                registered_at INTEGER NOT NULL
            );

            CREATE TABLE IF NOT EXISTS history (
                seq INTEGER PRIMARY KEY AUTOINCREMENT,
                identity TEXT NOT NULL REFERENCES identities(name) ON DELETE CASCADE,
                patch_id TEXT NOT NULL,
                patch_type TEXT NOT NULL,
                metadata TEXT NOT NULL,
                applied_at INTEGER NOT NULL,
                UNIQUE (identity, patch_id)
            );

            CREATE INDEX IF NOT EXISTS idx_history_identity ON history(identity);
            ",
        )?;
        Ok(())
    }

    /// Register an identity, or update the version of an existing one.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] on write failure.
    pub fn register_identity(&self, identity: &Identity) -> Result<(), DbError> {
        self.conn.execute(
            "INSERT INTO identities (name, version, registered_at) VALUES (?1, ?2, ?3)
             ON CONFLICT(name) DO UPDATE SET version = excluded.version",
            params![identity.name, identity.version, unix_now()],
        )?;
        Ok(())
    }

    /// Append a patch to an identity's history. Returns its sequence number.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::IdentityNotFound`] for an unregistered identity,
    /// [`DbError::DuplicatePatch`] if the id is already in this history, or
    /// [`DbError::Sqlite`] on write failure.
    pub fn record_patch(
        &self,
        identity: &str,
        patch_id: &str,
        patch_type: PatchType,
        metadata: &PatchMetadata,
    ) -> Result<i64, DbError> {
        if self.get_identity(identity)?.is_none() {
            return Err(DbError::IdentityNotFound(identity.to_string()));
        }

        let exists: Option<i64> = self
            .conn
            .query_row(
                "SELECT seq FROM history WHERE identity = ?1 AND patch_id = ?2",
                params![identity, patch_id],
                |row| row.get(0),
            )
            .optional()?;
        if exists.is_some() {
            return Err(DbError::DuplicatePatch {
                identity: identity.to_string(),
                patch_id: patch_id.to_string(),
            });
        }

        let json = serde_json::to_string(metadata)?;
        self.conn.execute(
            "INSERT INTO history (identity, patch_id, patch_type, metadata, applied_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![identity, patch_id, patch_type.name(), json, unix_now()],
        )?;
        Ok(self.conn.last_insert_rowid())
    }

    /// Get an identity by name
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] on read failure.
    pub fn get_identity(&self, name: &str) -> Result<Option<IdentityRecord>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, version, registered_at FROM identities WHERE name = ?1")?;

        let mut rows = stmt.query(params![name])?;

        if let Some(row) = rows.next()? {
            Ok(Some(IdentityRecord {
                name: row.get(0)?,
                version: row.get(1)?,
                registered_at: row.get(2)?,
            }))
        } else {
            Ok(None)
        }
    }

    /// List all registered identities, ordered by name.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] on read failure.
    pub fn list_identities(&self) -> Result<Vec<IdentityRecord>, DbError> {
        let mut stmt = self
            .conn
            .prepare("SELECT name, version, registered_at FROM identities ORDER BY name")?;

        let identities = stmt.query_map([], |row| {
            Ok(IdentityRecord {
                name: row.get(0)?,
                version: row.get(1)?,
                registered_at: row.get(2)?,
            })
        })?;

        identities.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// All history rows of an identity, oldest first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::Sqlite`] on read failure.
    pub fn history_records(&self, identity: &str) -> Result<Vec<HistoryRecord>, DbError> {
        let mut stmt = self.conn.prepare(
            "SELECT seq, patch_id, patch_type, metadata, applied_at
             FROM history WHERE identity = ?1 ORDER BY seq ASC",
        )?;

        let records = stmt.query_map(params![identity], |row| {
            Ok(HistoryRecord {
                seq: row.get(0)?,
                patch_id: row.get(1)?,
                patch_type: row.get(2)?,
                metadata: row.get(3)?,
                applied_at: row.get(4)?,
            })
        })?;

        records.collect::<Result<Vec<_>, _>>().map_err(Into::into)
    }

    /// Load everything needed to answer history queries for one identity.
    ///
    /// The cumulative patch id is the most recent cumulative patch (or
    /// `base`); the active one-offs are those applied after it, most recent
    /// first.
    ///
    /// # Errors
    ///
    /// Returns [`DbError::IdentityNotFound`] for an unregistered identity or
    /// [`DbError::Sqlite`] on read failure.
    pub fn load_target_info(&self, identity: &str) -> Result<TargetInfo, DbError> {
        let Some(record) = self.get_identity(identity)? else {
            return Err(DbError::IdentityNotFound(identity.to_string()));
        };
        let records = self.history_records(identity)?;

        let mut cumulative_patch_id = BASE_PATCH_ID.to_string();
        let mut patch_ids = Vec::new();
        for rec in &records {
            if rec.patch_type == PatchType::Cumulative.name() {
                cumulative_patch_id.clone_from(&rec.patch_id);
                patch_ids.clear();
            } else {
                patch_ids.push(rec.patch_id.clone());
            }
        }
        patch_ids.reverse();

        Ok(TargetInfo {
            identity: Identity::new(record.name, record.version),
            cumulative_patch_id,
            patch_ids,
            records,
        })
    }
}

fn unix_now() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map_or(0, |d| d.as_secs() as i64)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn eap() -> Identity {
        Identity::new("eap", "6.2.0")
    }

    fn meta(desc: &str) -> PatchMetadata {
        PatchMetadata::new(desc, eap())
    }

    #[test]
    fn test_register_and_list() {
        let dir = tempdir().unwrap();
        let db = StateDb::open_at(&dir.path().join("state.db")).unwrap();

        db.register_identity(&Identity::new("wildfly", "8.0.0")).unwrap();
        db.register_identity(&eap()).unwrap();
        db.register_identity(&Identity::new("eap", "6.3.0")).unwrap();

        let identities = db.list_identities().unwrap();
        assert_eq!(identities.len(), 2);
        assert_eq!(identities[0].name, "eap");
        assert_eq!(identities[0].version, "6.3.0");
        assert_eq!(identities[1].name, "wildfly");
    }

    #[test]
    fn test_history_in_application_order() {
        let dir = tempdir().unwrap();
        let db = StateDb::open_at(&dir.path().join("state.db")).unwrap();
        db.register_identity(&eap()).unwrap();

        let s1 = db
            .record_patch("eap", "p1", PatchType::OneOff, &meta("first"))
            .unwrap();
        let s2 = db
            .record_patch("eap", "p2", PatchType::OneOff, &meta("second"))
            .unwrap();
        assert!(s2 > s1);

        let records = db.history_records("eap").unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.patch_id.as_str()).collect();
        assert_eq!(ids, ["p1", "p2"]);
        assert_eq!(records[0].patch_type, "one-off");

        let stored: PatchMetadata = serde_json::from_str(&records[1].metadata).unwrap();
        assert_eq!(stored.description, "second");
    }

    #[test]
    fn test_duplicate_patch_rejected() {
        let dir = tempdir().unwrap();
        let db = StateDb::open_at(&dir.path().join("state.db")).unwrap();
        db.register_identity(&eap()).unwrap();

        db.record_patch("eap", "p1", PatchType::OneOff, &meta("a"))
            .unwrap();
        let err = db
            .record_patch("eap", "p1", PatchType::OneOff, &meta("b"))
            .unwrap_err();
        assert!(matches!(err, DbError::DuplicatePatch { .. }));
    }

    #[test]
    fn test_record_requires_identity() {
        let dir = tempdir().unwrap();
        let db = StateDb::open_at(&dir.path().join("state.db")).unwrap();

        let err = db
            .record_patch("ghost", "p1", PatchType::OneOff, &meta("a"))
            .unwrap_err();
        assert!(matches!(err, DbError::IdentityNotFound(name) if name == "ghost"));
    }

    #[test]
    fn test_target_info_tracks_cumulative_level() {
        let dir = tempdir().unwrap();
        let db = StateDb::open_at(&dir.path().join("state.db")).unwrap();
        db.register_identity(&eap()).unwrap();

        let info = db.load_target_info("eap").unwrap();
        assert_eq!(info.cumulative_patch_id, BASE_PATCH_ID);
        assert!(info.patch_ids.is_empty());

        db.record_patch("eap", "one-a", PatchType::OneOff, &meta("a"))
            .unwrap();
        db.record_patch("eap", "cp1", PatchType::Cumulative, &meta("cp"))
            .unwrap();
        db.record_patch("eap", "one-b", PatchType::OneOff, &meta("b"))
            .unwrap();
        db.record_patch("eap", "one-c", PatchType::OneOff, &meta("c"))
            .unwrap();

        let info = db.load_target_info("eap").unwrap();
        assert_eq!(info.identity, eap());
        assert_eq!(info.cumulative_patch_id, "cp1");
        assert_eq!(info.patch_ids, ["one-c", "one-b"]);
        assert_eq!(info.records.len(), 4);
    }

    #[test]
    fn test_read_only_open_sees_committed_history() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("state.db");
        {
            let db = StateDb::open_at(&path).unwrap();
            db.register_identity(&eap()).unwrap();
            db.record_patch("eap", "p1", PatchType::OneOff, &meta("a"))
                .unwrap();
        }

        let db = StateDb::open_read_only(&path).unwrap();
        assert_eq!(db.history_records("eap").unwrap().len(), 1);
        assert!(db.register_identity(&eap()).is_err());
    }

    #[test]
    fn test_read_only_open_of_missing_file_fails() {
        let dir = tempdir().unwrap();
        assert!(StateDb::open_read_only(&dir.path().join("absent.db")).is_err());
    }
}
