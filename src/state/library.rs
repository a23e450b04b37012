use rusqlite::{params, Connection};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use super::data::CatalogEntry;
use crate::error::Result;

/// The Library manages the SQLite catalog database.
/// It stores one row per generated QR code image: id, filename, filepath.
///
/// Every operation opens its own short-lived connection and closes it on
/// drop, so no connection or transaction ever spans two user intents.
pub struct Library {
    db_path: PathBuf,
}

impl Library {
    /// Open (or create) the catalog database at `db_path` and make sure
    /// the schema exists.
    ///
    /// Storage being unavailable here is fatal to startup; the caller
    /// decides how to abort.
    pub fn open(db_path: PathBuf) -> Result<Self> {
        // Ensure the parent directory exists
        if let Some(parent) = db_path.parent() {
            fs::create_dir_all(parent)?;
        }

        let library = Library { db_path };
        library.ensure_schema()?;

        info!(path = %library.db_path.display(), "catalog database ready");
        Ok(library)
    }

    /// Default location for the database file:
    /// - Linux: ~/.local/share/qr-studio/qr_studio.db
    /// - macOS: ~/Library/Application Support/qr-studio/qr_studio.db
    /// - Windows: %APPDATA%\qr-studio\qr_studio.db
    pub fn default_path() -> PathBuf {
        let mut path = dirs::data_dir()
            .or_else(|| dirs::home_dir())
            .expect("Could not determine user data directory");

        path.push("qr-studio");
        path.push("qr_studio.db");
        path
    }

    /// Path to the database file
    pub fn path(&self) -> &Path {
        &self.db_path
    }

    fn connect(&self) -> Result<Connection> {
        Ok(Connection::open(&self.db_path)?)
    }

    /// Idempotently create the entry table
    fn ensure_schema(&self) -> Result<()> {
        self.connect()?.execute(
            "CREATE TABLE IF NOT EXISTS qr_codes (
                id       INTEGER PRIMARY KEY AUTOINCREMENT,
                filename TEXT NOT NULL,
                filepath TEXT NOT NULL
            )",
            [],
        )?;
        Ok(())
    }

    /// Append a new entry and return its assigned id
    pub fn insert(&self, filename: &str, filepath: &str) -> Result<i64> {
        let conn = self.connect()?;
        conn.execute(
            "INSERT INTO qr_codes (filename, filepath) VALUES (?1, ?2)",
            params![filename, filepath],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// All entries in insertion order. Full scan, no pagination.
    pub fn all_entries(&self) -> Result<Vec<CatalogEntry>> {
        let conn = self.connect()?;
        let mut stmt = conn.prepare("SELECT id, filename, filepath FROM qr_codes ORDER BY id")?;

        let rows = stmt.query_map([], |row| {
            Ok(CatalogEntry {
                id: row.get(0)?,
                filename: row.get(1)?,
                filepath: row.get(2)?,
            })
        })?;

        let mut entries = Vec::new();
        for entry in rows {
            entries.push(entry?);
        }

        Ok(entries)
    }

    /// Remove the entry with `id`. A missing id is a no-op, not an error.
    pub fn delete(&self, id: i64) -> Result<()> {
        self.connect()?
            .execute("DELETE FROM qr_codes WHERE id = ?1", params![id])?;
        Ok(())
    }

    /// Number of entries in the catalog (used for the startup status line)
    pub fn entry_count(&self) -> Result<i64> {
        let count = self
            .connect()?
            .query_row("SELECT COUNT(*) FROM qr_codes", [], |row| row.get(0))?;
        Ok(count)
    }
}
