// 💾 Save File - four independent blobs in one SQLite key/value table
//
// Keys mirror the session's persisted pieces: pet (JSON), balance (JSON
// number), transactions (JSON array), last_update (RFC 3339). Read once at
// session start, written after every state change. Missing or malformed
// blobs mean "no existing pet" - first-run setup, never a fatal error.

use anyhow::{Context, Result};
use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;

use crate::ledger::Ledger;
use crate::pet::Pet;
use crate::session::{SavedSession, Session, STARTING_BALANCE};

const KEY_PET: &str = "pet";
const KEY_BALANCE: &str = "balance";
const KEY_TRANSACTIONS: &str = "transactions";
const KEY_LAST_UPDATE: &str = "last_update";

pub struct SaveFile {
    conn: Connection,
}

impl SaveFile {
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .with_context(|| format!("Failed to open save file: {:?}", path.as_ref()))?;
        setup(&conn)?;
        Ok(SaveFile { conn })
    }

    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        setup(&conn)?;
        Ok(SaveFile { conn })
    }

    /// Load the persisted session, if any. A missing or unparsable pet blob
    /// is first-run; a damaged secondary blob falls back to its default
    /// rather than discarding the pet.
    pub fn load(&self) -> Result<Option<SavedSession>> {
        let Some(raw_pet) = self.get(KEY_PET)? else {
            return Ok(None);
        };
        let Ok(pet) = serde_json::from_str::<Pet>(&raw_pet) else {
            return Ok(None);
        };

        let balance = self
            .get(KEY_BALANCE)?
            .and_then(|raw| serde_json::from_str::<f64>(&raw).ok())
            .unwrap_or(STARTING_BALANCE);

        let ledger = self
            .get(KEY_TRANSACTIONS)?
            .and_then(|raw| serde_json::from_str::<Ledger>(&raw).ok())
            .unwrap_or_default();

        let last_update = self
            .get(KEY_LAST_UPDATE)?
            .and_then(|raw| DateTime::parse_from_rfc3339(&raw).ok())
            .map(|dt| dt.with_timezone(&Utc));

        Ok(Some(SavedSession {
            pet,
            balance,
            ledger,
            last_update,
        }))
    }

    /// Upsert all four blobs from the current session state.
    pub fn save(&self, session: &Session) -> Result<()> {
        let pet = serde_json::to_string(session.pet()).context("Failed to serialize pet")?;
        let balance = serde_json::to_string(&session.balance())?;
        let transactions =
            serde_json::to_string(session.ledger()).context("Failed to serialize ledger")?;

        self.put(KEY_PET, &pet)?;
        self.put(KEY_BALANCE, &balance)?;
        self.put(KEY_TRANSACTIONS, &transactions)?;
        self.put(KEY_LAST_UPDATE, &session.last_update().to_rfc3339())?;
        Ok(())
    }

    /// Remove all four blobs (the reset surface).
    pub fn clear(&self) -> Result<()> {
        self.conn
            .execute("DELETE FROM save_slots", [])
            .context("Failed to clear save file")?;
        Ok(())
    }

    fn put(&self, key: &str, value: &str) -> Result<()> {
        self.conn
            .execute(
                "INSERT INTO save_slots (key, value) VALUES (?1, ?2)
                 ON CONFLICT(key) DO UPDATE SET value = excluded.value",
                params![key, value],
            )
            .with_context(|| format!("Failed to write save slot: {}", key))?;
        Ok(())
    }

    fn get(&self, key: &str) -> Result<Option<String>> {
        let value = self
            .conn
            .query_row(
                "SELECT value FROM save_slots WHERE key = ?1",
                params![key],
                |row| row.get(0),
            )
            .optional()
            .with_context(|| format!("Failed to read save slot: {}", key))?;
        Ok(value)
    }
}

fn setup(conn: &Connection) -> Result<()> {
    // WAL mode for crash recovery
    conn.pragma_update(None, "journal_mode", "WAL")?;

    conn.execute(
        "CREATE TABLE IF NOT EXISTS save_slots (
            key TEXT PRIMARY KEY,
            value TEXT NOT NULL
        )",
        [],
    )?;

    Ok(())
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pet::PetType;
    use chrono::TimeZone;

    fn t0() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 1, 1, 12, 0, 0).unwrap()
    }

    fn test_session() -> Session {
        let mut session = Session::new("Biscuit", PetType::Cat, t0());
        session.earn(10.0, "Walked the neighbor's dog", t0());
        session
    }

    #[test]
    fn test_empty_save_file_loads_as_first_run() {
        let store = SaveFile::open_in_memory().unwrap();
        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let store = SaveFile::open_in_memory().unwrap();
        let session = test_session();

        store.save(&session).unwrap();
        let saved = store.load().unwrap().unwrap();

        assert_eq!(saved.pet, *session.pet());
        assert_eq!(saved.balance, 110.0);
        assert_eq!(saved.ledger, *session.ledger());
        assert_eq!(saved.last_update, Some(t0()));
    }

    #[test]
    fn test_save_overwrites_previous_state() {
        let store = SaveFile::open_in_memory().unwrap();
        let mut session = test_session();

        store.save(&session).unwrap();
        session.earn(20.0, "Mowed the lawn", t0());
        store.save(&session).unwrap();

        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.balance, 130.0);
        assert_eq!(saved.ledger.len(), 2);
    }

    #[test]
    fn test_corrupted_pet_blob_loads_as_first_run() {
        let store = SaveFile::open_in_memory().unwrap();
        store.save(&test_session()).unwrap();

        store.put(KEY_PET, "{not valid json").unwrap();

        assert!(store.load().unwrap().is_none());
    }

    #[test]
    fn test_corrupted_secondary_blobs_fall_back_to_defaults() {
        let store = SaveFile::open_in_memory().unwrap();
        store.save(&test_session()).unwrap();

        store.put(KEY_BALANCE, "???").unwrap();
        store.put(KEY_TRANSACTIONS, "???").unwrap();
        store.put(KEY_LAST_UPDATE, "yesterday-ish").unwrap();

        let saved = store.load().unwrap().unwrap();
        assert_eq!(saved.pet.name, "Biscuit");
        assert_eq!(saved.balance, STARTING_BALANCE);
        assert!(saved.ledger.is_empty());
        assert!(saved.last_update.is_none());
    }

    #[test]
    fn test_clear_erases_all_blobs() {
        let store = SaveFile::open_in_memory().unwrap();
        store.save(&test_session()).unwrap();

        store.clear().unwrap();

        assert!(store.load().unwrap().is_none());
        assert!(store.get(KEY_BALANCE).unwrap().is_none());
        assert!(store.get(KEY_TRANSACTIONS).unwrap().is_none());
        assert!(store.get(KEY_LAST_UPDATE).unwrap().is_none());
    }
}
