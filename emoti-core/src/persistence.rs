//! SQLite persistence for pet state and diary entries.
//!
//! The pet is serialised to JSON and stored in a per-device SQLite database,
//! keyed by user. The schema is intentionally simple:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS pets (
//!     user_id    TEXT PRIMARY KEY,
//!     data       BLOB NOT NULL,
//!     updated_at TEXT NOT NULL,
//!     checksum   TEXT
//! );
//! CREATE TABLE IF NOT EXISTS diary_entries (
//!     user_id    TEXT NOT NULL,
//!     timestamp  TEXT NOT NULL,
//!     event      TEXT NOT NULL,
//!     mood       TEXT NOT NULL,
//!     PRIMARY KEY (user_id, timestamp)
//! );
//! ```
//!
//! - WAL mode for concurrent reads.
//! - JSON inside a BLOB column keeps the schema stable across model changes.
//! - Optional CRC-32 checksum detects save corruption.
//! - Pet writes are last-write-wins upserts keyed by user: callers must
//!   serialize mutations to one pet through a single owner (see
//!   [`crate::session::PetSession`]); the store itself never merges.

use std::path::{Path, PathBuf};

use chrono::Utc;
use rusqlite::{params, Connection, OpenFlags};
use tracing::{debug, info, warn};

use crate::config::PersistenceConfig;
use crate::diary::DiaryEntry;
use crate::error::{PetError, Result};
use crate::pet::Pet;
use crate::types::UserId;

// ---------------------------------------------------------------------------
// CRC-32 checksum helper
// ---------------------------------------------------------------------------

/// Compute a CRC-32 checksum of `data` and return it as lowercase hex.
fn crc32_hex(data: &[u8]) -> String {
    let crc = crc32_compute(data);
    format!("{crc:08x}")
}

/// Basic CRC-32 (ISO 3309 / ITU-T V.42) computation.
fn crc32_compute(data: &[u8]) -> u32 {
    const POLY: u32 = 0xEDB8_8320;
    let mut crc: u32 = 0xFFFF_FFFF;
    for &byte in data {
        crc ^= u32::from(byte);
        for _ in 0..8 {
            if crc & 1 == 1 {
                crc = (crc >> 1) ^ POLY;
            } else {
                crc >>= 1;
            }
        }
    }
    !crc
}

// ---------------------------------------------------------------------------
// PetStore
// ---------------------------------------------------------------------------

/// Handle to an open SQLite database that stores pets and diaries.
///
/// # Usage
///
/// ```no_run
/// # use emoti_core::persistence::PetStore;
/// # use emoti_core::config::PersistenceConfig;
/// # use emoti_core::types::UserId;
/// # use emoti_core::pet::Pet;
/// let store = PetStore::open("emoti.db", &PersistenceConfig::default())?;
/// let user = UserId::new();
/// let pet = Pet::new("Momo", chrono::Utc::now())?;
/// store.save_pet(&user, &pet)?;
/// let loaded = store.load_pet(&user)?;
/// # Ok::<(), emoti_core::error::PetError>(())
/// ```
pub struct PetStore {
    conn: Connection,
    config: PersistenceConfig,
    db_path: PathBuf,
}

impl std::fmt::Debug for PetStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PetStore")
            .field("db_path", &self.db_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS pets (
    user_id    TEXT PRIMARY KEY,
    data       BLOB NOT NULL,
    updated_at TEXT NOT NULL,
    checksum   TEXT
);
CREATE TABLE IF NOT EXISTS diary_entries (
    user_id    TEXT NOT NULL,
    timestamp  TEXT NOT NULL,
    event      TEXT NOT NULL,
    mood       TEXT NOT NULL,
    PRIMARY KEY (user_id, timestamp)
);";

impl PetStore {
    /// Open (or create) an SQLite database at `path`.
    ///
    /// The schema is created if it does not exist; WAL mode is enabled when
    /// `config.wal_mode` is `true`.
    ///
    /// # Errors
    /// Returns [`PetError::Database`] on SQLite failures.
    pub fn open<P: AsRef<Path>>(path: P, config: &PersistenceConfig) -> Result<Self> {
        let db_path = path.as_ref().to_path_buf();
        let flags = OpenFlags::SQLITE_OPEN_READ_WRITE
            | OpenFlags::SQLITE_OPEN_CREATE
            | OpenFlags::SQLITE_OPEN_NO_MUTEX;

        let conn = Connection::open_with_flags(&db_path, flags)?;

        if config.wal_mode {
            conn.execute_batch("PRAGMA journal_mode = WAL;")?;
        }
        conn.execute_batch("PRAGMA synchronous = NORMAL;")?;
        conn.execute_batch("PRAGMA busy_timeout = 5000;")?;
        conn.execute_batch(SCHEMA)?;

        info!(
            path = %db_path.display(),
            wal = config.wal_mode,
            "Pet store opened"
        );

        Ok(Self {
            conn,
            config: config.clone(),
            db_path,
        })
    }

    /// Open an in-memory database (useful for tests).
    ///
    /// # Errors
    /// Returns [`PetError::Database`] on SQLite failures.
    pub fn open_in_memory(config: &PersistenceConfig) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn,
            config: config.clone(),
            db_path: PathBuf::from(":memory:"),
        })
    }

    // ------------------------------------------------------------------
    // Pet CRUD
    // ------------------------------------------------------------------

    /// Save (upsert) a user's pet. Last write wins.
    ///
    /// The pet is serialised to JSON; if `config.checksum_enabled` is true,
    /// a CRC-32 of the JSON bytes is stored alongside the data.
    ///
    /// # Errors
    /// Returns [`PetError::Serialization`] if JSON encoding fails, or
    /// [`PetError::Database`] on SQLite failures.
    pub fn save_pet(&self, user_id: &UserId, pet: &Pet) -> Result<()> {
        let json = serde_json::to_vec(pet).map_err(|e| PetError::Serialization(e.to_string()))?;

        let checksum = if self.config.checksum_enabled {
            Some(crc32_hex(&json))
        } else {
            None
        };

        let now = Utc::now().to_rfc3339();
        let id_str = user_id.0.to_string();

        self.conn.execute(
            "INSERT INTO pets (user_id, data, updated_at, checksum)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id) DO UPDATE SET
                data = excluded.data,
                updated_at = excluded.updated_at,
                checksum = excluded.checksum",
            params![id_str, json, now, checksum],
        )?;

        debug!(user = %user_id, pet = %pet.name, bytes = json.len(), "Saved pet");
        Ok(())
    }

    /// Load a user's pet.
    ///
    /// Returns `Ok(None)` if no pet is stored for this user. If checksums
    /// are enabled and the stored checksum doesn't match, a warning is
    /// logged but the data is still returned.
    ///
    /// # Errors
    /// Returns [`PetError::Serialization`] if JSON decoding fails, or
    /// [`PetError::Database`] on SQLite failures.
    pub fn load_pet(&self, user_id: &UserId) -> Result<Option<Pet>> {
        let id_str = user_id.0.to_string();

        let mut stmt = self
            .conn
            .prepare_cached("SELECT data, checksum FROM pets WHERE user_id = ?1")?;

        let result: Option<(Vec<u8>, Option<String>)> = stmt
            .query_row(params![id_str], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;

        let Some((data, stored_checksum)) = result else {
            debug!(user = %user_id, "No stored pet");
            return Ok(None);
        };

        if self.config.checksum_enabled {
            if let Some(ref expected) = stored_checksum {
                let actual = crc32_hex(&data);
                if *expected != actual {
                    warn!(
                        user = %user_id,
                        expected = %expected,
                        actual = %actual,
                        "Checksum mismatch — possible save corruption"
                    );
                }
            }
        }

        let pet: Pet =
            serde_json::from_slice(&data).map_err(|e| PetError::Serialization(e.to_string()))?;

        debug!(user = %user_id, pet = %pet.name, "Loaded pet");
        Ok(Some(pet))
    }

    /// Delete a user's pet. Returns `true` if a row was actually deleted.
    ///
    /// # Errors
    /// Returns [`PetError::Database`] on SQLite failures.
    pub fn delete_pet(&self, user_id: &UserId) -> Result<bool> {
        let id_str = user_id.0.to_string();
        let deleted = self
            .conn
            .execute("DELETE FROM pets WHERE user_id = ?1", params![id_str])?;
        Ok(deleted > 0)
    }

    // ------------------------------------------------------------------
    // Diary
    // ------------------------------------------------------------------

    /// Append a diary entry for a user.
    ///
    /// # Errors
    /// Returns [`PetError::Database`] on SQLite failures.
    pub fn append_diary(&self, user_id: &UserId, entry: &DiaryEntry) -> Result<()> {
        self.conn.execute(
            "INSERT INTO diary_entries (user_id, timestamp, event, mood)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(user_id, timestamp) DO UPDATE SET
                event = excluded.event,
                mood = excluded.mood",
            params![
                user_id.0.to_string(),
                entry.timestamp.to_rfc3339(),
                entry.event,
                entry.mood.as_str()
            ],
        )?;
        debug!(user = %user_id, event = %entry.event, "Diary entry appended");
        Ok(())
    }

    /// Load a user's diary entries, oldest first.
    ///
    /// Returns an empty vec when nothing is stored.
    ///
    /// # Errors
    /// Returns [`PetError::Database`] on SQLite failures, or
    /// [`PetError::Serialization`] for unreadable rows.
    pub fn load_diary(&self, user_id: &UserId) -> Result<Vec<DiaryEntry>> {
        let mut stmt = self.conn.prepare_cached(
            "SELECT timestamp, event, mood FROM diary_entries
             WHERE user_id = ?1 ORDER BY timestamp ASC",
        )?;

        let rows = stmt.query_map(params![user_id.0.to_string()], |row| {
            let timestamp: String = row.get(0)?;
            let event: String = row.get(1)?;
            let mood: String = row.get(2)?;
            Ok((timestamp, event, mood))
        })?;

        let mut entries = Vec::new();
        for row in rows {
            let (timestamp, event, mood) = row?;
            let timestamp = chrono::DateTime::parse_from_rfc3339(&timestamp)
                .map_err(|e| PetError::Serialization(e.to_string()))?
                .with_timezone(&Utc);
            let mood = serde_json::from_value(serde_json::Value::String(mood))
                .map_err(|e| PetError::Serialization(e.to_string()))?;
            entries.push(DiaryEntry {
                timestamp,
                event,
                mood,
            });
        }

        debug!(user = %user_id, count = entries.len(), "Loaded diary");
        Ok(entries)
    }

    // ------------------------------------------------------------------
    // Account deletion
    // ------------------------------------------------------------------

    /// Remove everything stored for a user: pet and diary.
    ///
    /// This is the whole-account deletion path — the only way a pet is ever
    /// deleted.
    ///
    /// # Errors
    /// Returns [`PetError::Database`] on SQLite failures.
    pub fn delete_account(&self, user_id: &UserId) -> Result<()> {
        let id_str = user_id.0.to_string();
        self.conn.execute(
            "DELETE FROM diary_entries WHERE user_id = ?1",
            params![id_str],
        )?;
        self.conn
            .execute("DELETE FROM pets WHERE user_id = ?1", params![id_str])?;
        info!(user = %user_id, "Account data deleted");
        Ok(())
    }

    // ------------------------------------------------------------------
    // Utility
    // ------------------------------------------------------------------

    /// Return the path to the database file (or `:memory:`).
    #[must_use]
    pub fn db_path(&self) -> &Path {
        &self.db_path
    }

    /// Run an integrity check on the database.
    ///
    /// Returns `Ok(true)` if the database passes the check.
    ///
    /// # Errors
    /// Returns [`PetError::Database`] if the check itself fails.
    pub fn integrity_check(&self) -> Result<bool> {
        let result: String = self
            .conn
            .query_row("PRAGMA integrity_check", [], |row| row.get(0))?;
        Ok(result == "ok")
    }
}

/// Extension trait that adds an `.optional()` combinator to `rusqlite::Result`.
///
/// Converts `Err(QueryReturnedNoRows)` into `Ok(None)`.
trait OptionalExt<T> {
    /// Convert `QueryReturnedNoRows` into `Ok(None)`.
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error>;
}

impl<T> OptionalExt<T> for std::result::Result<T, rusqlite::Error> {
    fn optional(self) -> std::result::Result<Option<T>, rusqlite::Error> {
        match self {
            Ok(val) => Ok(Some(val)),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
