//! SQLite-backed contribution ledger.
//!
//! Two tables: `contributions` is an append-only per-user/per-day ledger of
//! extracted receipt totals, `settings` is a last-write-wins key/value store
//! used for scheduler bookkeeping. Days are stored as ISO-8601 text so the
//! week-window queries can use plain `BETWEEN` comparisons.

use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use chrono::{Local, NaiveDate};
use rusqlite::{params, Connection};
use tokio::sync::Mutex;
use tracing::{debug, info};

use tallyforge_core::week_range;

pub struct ContributionStore {
    conn: Mutex<Connection>,
}

impl ContributionStore {
    /// Create or open a ledger database at the given path.
    pub fn open(path: impl AsRef<Path>) -> Result<Self> {
        let conn = Connection::open(path.as_ref())
            .context("Failed to open ledger database")?;

        conn.execute_batch(
            "PRAGMA journal_mode=WAL;
             CREATE TABLE IF NOT EXISTS contributions (
                 user_id TEXT NOT NULL,
                 day     TEXT NOT NULL,
                 value   REAL NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_contributions_day ON contributions(day);
             CREATE TABLE IF NOT EXISTS settings (
                 key   TEXT PRIMARY KEY,
                 value TEXT
             );",
        )
        .context("Failed to initialize ledger schema")?;

        info!("Contribution ledger opened at {:?}", path.as_ref());
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Open an in-memory ledger (for tests).
    pub fn in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory()?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS contributions (
                 user_id TEXT NOT NULL,
                 day     TEXT NOT NULL,
                 value   REAL NOT NULL
             );
             CREATE INDEX IF NOT EXISTS idx_contributions_day ON contributions(day);
             CREATE TABLE IF NOT EXISTS settings (
                 key   TEXT PRIMARY KEY,
                 value TEXT
             );",
        )?;
        Ok(Self { conn: Mutex::new(conn) })
    }

    /// Append a contribution dated today for the given user.
    ///
    /// The value is taken as the parser produced it; negative totals are
    /// stored as-is.
    pub async fn record(&self, user_id: &str, value: f64) -> Result<()> {
        self.record_on(user_id, Local::now().date_naive(), value).await
    }

    /// Append a contribution for an explicit day.
    pub async fn record_on(&self, user_id: &str, day: NaiveDate, value: f64) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT INTO contributions (user_id, day, value) VALUES (?1, ?2, ?3)",
            params![user_id, day.to_string(), value],
        )
        .context("Failed to insert contribution")?;
        debug!(user_id, %day, value, "Recorded contribution");
        Ok(())
    }

    /// Sum of contribution values per user for the current Monday–Friday
    /// window. Users with no rows this week are absent from the map.
    pub async fn weekly_totals(&self) -> Result<HashMap<String, f64>> {
        let (monday, friday) = week_range(Local::now().date_naive());
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare(
            "SELECT user_id, SUM(value) FROM contributions
             WHERE day BETWEEN ?1 AND ?2
             GROUP BY user_id",
        )?;
        let rows = stmt
            .query_map(params![monday.to_string(), friday.to_string()], |row| {
                Ok((row.get::<_, String>(0)?, row.get::<_, f64>(1)?))
            })?
            .collect::<std::result::Result<HashMap<_, _>, _>>()
            .context("Failed to query weekly totals")?;
        Ok(rows)
    }

    /// One user's total for the current week window; 0.0 when no rows.
    pub async fn user_weekly_total(&self, user_id: &str) -> Result<f64> {
        let (monday, friday) = week_range(Local::now().date_naive());
        let conn = self.conn.lock().await;
        let total: Option<f64> = conn.query_row(
            "SELECT SUM(value) FROM contributions
             WHERE user_id = ?1 AND day BETWEEN ?2 AND ?3",
            params![user_id, monday.to_string(), friday.to_string()],
            |row| row.get(0),
        )?;
        Ok(total.unwrap_or(0.0))
    }

    /// Delete all contributions inside the current week window.
    /// Irreversible; calling it again is a no-op. Returns rows deleted.
    pub async fn clear_current_week(&self) -> Result<usize> {
        let (monday, friday) = week_range(Local::now().date_naive());
        let conn = self.conn.lock().await;
        let deleted = conn
            .execute(
                "DELETE FROM contributions WHERE day BETWEEN ?1 AND ?2",
                params![monday.to_string(), friday.to_string()],
            )
            .context("Failed to clear week")?;
        info!(%monday, %friday, deleted, "Cleared current week");
        Ok(deleted)
    }

    /// Read a settings value.
    pub async fn get_setting(&self, key: &str) -> Result<Option<String>> {
        let conn = self.conn.lock().await;
        let mut stmt = conn.prepare("SELECT value FROM settings WHERE key = ?1")?;
        let mut rows = stmt.query(params![key])?;
        match rows.next()? {
            Some(row) => Ok(row.get(0)?),
            None => Ok(None),
        }
    }

    /// Write a settings value (insert-or-replace).
    pub async fn set_setting(&self, key: &str, value: &str) -> Result<()> {
        let conn = self.conn.lock().await;
        conn.execute(
            "INSERT OR REPLACE INTO settings (key, value) VALUES (?1, ?2)",
            params![key, value],
        )
        .context("Failed to write setting")?;
        Ok(())
    }
}
