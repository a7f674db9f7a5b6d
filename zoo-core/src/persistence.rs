//! Profile persistence — the star balance and language preference.
//!
//! Only these two fields survive across sessions. Animal vitals and unlock
//! flags are session-scoped and reseeded from content on every start.
//!
//! The SQLite backend is a small key/value table:
//!
//! ```sql
//! CREATE TABLE IF NOT EXISTS profile_kv (
//!     key        TEXT PRIMARY KEY,
//!     value      TEXT NOT NULL,
//!     updated_at TEXT NOT NULL,
//!     checksum   TEXT
//! );
//! ```

use std::path::{Path, PathBuf};

use chrono::Utc;
use parking_lot::Mutex;
use rusqlite::{Connection, OpenFlags, OptionalExtension, params};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::config::PersistenceConfig;
use crate::error::{Result, ZooError};
use crate::types::Language;

const KEY_STARS: &str = "stars";
const KEY_LANGUAGE: &str = "language";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS profile_kv (
    key        TEXT PRIMARY KEY,
    value      TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    checksum   TEXT
);";

/// The persisted slice of player state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SavedProfile {
    /// Star balance.
    pub stars: u32,
    /// UI language preference.
    pub language: Language,
}

/// Key/value persistence collaborator for the saved profile.
pub trait ProfileStore: Send {
    /// Load the saved profile, or `None` on first run.
    ///
    /// # Errors
    /// Backend-specific failures.
    fn load(&self) -> Result<Option<SavedProfile>>;

    /// Persist the profile, replacing any previous save.
    ///
    /// # Errors
    /// Backend-specific failures.
    fn save(&self, profile: &SavedProfile) -> Result<()>;
}

// ---------------------------------------------------------------------------
// In-memory store
// ---------------------------------------------------------------------------

/// Volatile store for tests and hosts without a disk.
#[derive(Debug, Default)]
pub struct MemoryProfileStore {
    slot: Mutex<Option<SavedProfile>>,
}

impl MemoryProfileStore {
    /// Empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl ProfileStore for MemoryProfileStore {
    fn load(&self) -> Result<Option<SavedProfile>> {
        Ok(*self.slot.lock())
    }

    fn save(&self, profile: &SavedProfile) -> Result<()> {
        *self.slot.lock() = Some(*profile);
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// CRC-32 checksum helper
// ---------------------------------------------------------------------------

fn crc32_hex(data: &[u8]) -> String {
    format!("{:08x}", crc32_compute(data))
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
// SQLite store
// ---------------------------------------------------------------------------

/// SQLite-backed profile store.
pub struct SqliteProfileStore {
    conn: Mutex<Connection>,
    config: PersistenceConfig,
    db_path: PathBuf,
}

impl std::fmt::Debug for SqliteProfileStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SqliteProfileStore")
            .field("db_path", &self.db_path)
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}

impl SqliteProfileStore {
    /// Open (or create) a profile database at `path`.
    ///
    /// # Errors
    /// Returns [`ZooError::Database`] on SQLite failures.
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

        info!(path = %db_path.display(), wal = config.wal_mode, "Profile store opened");

        Ok(Self {
            conn: Mutex::new(conn),
            config: config.clone(),
            db_path,
        })
    }

    /// Open the store at `config.path`.
    ///
    /// # Errors
    /// Returns [`ZooError::Database`] on SQLite failures.
    pub fn from_config(config: &PersistenceConfig) -> Result<Self> {
        Self::open(&config.path, config)
    }

    /// Open an in-memory database (useful for tests).
    ///
    /// # Errors
    /// Returns [`ZooError::Database`] on SQLite failures.
    pub fn open_in_memory(config: &PersistenceConfig) -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
            config: config.clone(),
            db_path: PathBuf::from(":memory:"),
        })
    }

    /// Path to the database file (`:memory:` for in-memory stores).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn read_value(conn: &Connection, key: &str, verify: bool) -> Result<Option<String>> {
        let row: Option<(String, Option<String>)> = conn
            .prepare_cached("SELECT value, checksum FROM profile_kv WHERE key = ?1")?
            .query_row(params![key], |row| Ok((row.get(0)?, row.get(1)?)))
            .optional()?;

        let Some((value, stored_checksum)) = row else {
            return Ok(None);
        };

        if verify {
            if let Some(expected) = stored_checksum {
                let actual = crc32_hex(value.as_bytes());
                if expected != actual {
                    warn!(
                        key,
                        expected = %expected,
                        actual = %actual,
                        "Checksum mismatch — possible save corruption"
                    );
                }
            }
        }
        Ok(Some(value))
    }
}

impl ProfileStore for SqliteProfileStore {
    fn load(&self) -> Result<Option<SavedProfile>> {
        let conn = self.conn.lock();
        let verify = self.config.checksum_enabled;
        let stars = Self::read_value(&conn, KEY_STARS, verify)?;
        let language = Self::read_value(&conn, KEY_LANGUAGE, verify)?;

        if stars.is_none() && language.is_none() {
            return Ok(None);
        }

        let stars = match stars {
            Some(raw) => raw
                .parse::<u32>()
                .map_err(|e| ZooError::Serialization(format!("stars '{raw}': {e}")))?,
            None => 0,
        };
        let language = language.map_or_else(Language::default, |raw| {
            raw.parse().unwrap_or_else(|e| {
                warn!(error = %e, "Unknown saved language, using default");
                Language::default()
            })
        });

        debug!(stars, language = %language, "Profile loaded");
        Ok(Some(SavedProfile { stars, language }))
    }

    fn save(&self, profile: &SavedProfile) -> Result<()> {
        let conn = self.conn.lock();
        let now = Utc::now().to_rfc3339();
        let tx = conn.unchecked_transaction()?;
        {
            let mut stmt = tx.prepare_cached(
                "INSERT INTO profile_kv (key, value, updated_at, checksum)
                 VALUES (?1, ?2, ?3, ?4)
                 ON CONFLICT(key) DO UPDATE SET
                    value = excluded.value,
                    updated_at = excluded.updated_at,
                    checksum = excluded.checksum",
            )?;
            for (key, value) in [
                (KEY_STARS, profile.stars.to_string()),
                (KEY_LANGUAGE, profile.language.code().to_string()),
            ] {
                let checksum = self
                    .config
                    .checksum_enabled
                    .then(|| crc32_hex(value.as_bytes()));
                stmt.execute(params![key, value, now, checksum])?;
            }
        }
        tx.commit()?;

        debug!(stars = profile.stars, language = %profile.language, "Profile saved");
        Ok(())
    }
}
