use crate::error::{Result, StorageError};
use crate::RecordStore;
use chrono::NaiveDate;
use rusqlite::{params, Connection, OptionalExtension, Row};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use vitalwatch_common::types::{DailyRecord, UserInfo};

const SCHEMA: &str = "
CREATE TABLE IF NOT EXISTS roles (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL UNIQUE
);
CREATE TABLE IF NOT EXISTS users (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    name TEXT NOT NULL,
    age INTEGER,
    email TEXT,
    role_id INTEGER REFERENCES roles(id)
);
CREATE TABLE IF NOT EXISTS daily_records (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    user_id INTEGER NOT NULL REFERENCES users(id),
    date TEXT NOT NULL,
    sleep_hours REAL,
    mood INTEGER,
    physical_activity TEXT,
    food TEXT,
    symptoms TEXT,
    blood_pressure TEXT,
    glucose REAL,
    bpm INTEGER,
    weight REAL
);
CREATE INDEX IF NOT EXISTS idx_daily_records_user_date
    ON daily_records(user_id, date);
INSERT OR IGNORE INTO roles (name) VALUES ('admin'), ('user');
";

const RECORD_COLUMNS: &str = "id, user_id, date, sleep_hours, mood, physical_activity, food, \
                              symptoms, blood_pressure, glucose, bpm, weight";

pub struct SqliteRecordStore {
    conn: Mutex<Connection>,
}

impl SqliteRecordStore {
    /// Opens (creating if needed) the database at `path`.
    pub fn open(path: &Path) -> Result<Self> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent)?;
        }
        let conn = Connection::open(path)?;
        conn.execute_batch("PRAGMA journal_mode=WAL;")?;
        let store = Self::init(conn)?;
        tracing::info!(path = %path.display(), "Record store opened");
        Ok(store)
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch("PRAGMA foreign_keys=ON;")?;
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    /// Lock the connection, recovering from a poisoned Mutex if necessary.
    fn lock_conn(&self) -> MutexGuard<'_, Connection> {
        self.conn
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Registers a user under `role` (`"admin"` or `"user"`) and returns its ID.
    pub fn insert_user(
        &self,
        name: &str,
        age: Option<i32>,
        email: Option<&str>,
        role: &str,
    ) -> Result<i64> {
        let conn = self.lock_conn();
        let role_id: i64 = conn
            .query_row("SELECT id FROM roles WHERE name = ?1", params![role], |row| {
                row.get(0)
            })
            .optional()?
            .ok_or_else(|| StorageError::UnknownRole(role.to_string()))?;
        conn.execute(
            "INSERT INTO users (name, age, email, role_id) VALUES (?1, ?2, ?3, ?4)",
            params![name, age, email, role_id],
        )?;
        Ok(conn.last_insert_rowid())
    }

    /// Persists a record and returns its row ID. Any `id` already set on the
    /// record is ignored.
    pub fn insert_record(&self, record: &DailyRecord) -> Result<i64> {
        let conn = self.lock_conn();
        conn.execute(
            "INSERT INTO daily_records (user_id, date, sleep_hours, mood, physical_activity, food,
                                        symptoms, blood_pressure, glucose, bpm, weight)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
            params![
                record.user_id,
                record.date,
                record.sleep_hours,
                record.mood,
                record.physical_activity,
                record.food,
                record.symptoms,
                record.blood_pressure,
                record.glucose,
                record.bpm,
                record.weight,
            ],
        )?;
        Ok(conn.last_insert_rowid())
    }
}

fn record_from_row(row: &Row<'_>) -> rusqlite::Result<DailyRecord> {
    Ok(DailyRecord {
        id: row.get("id")?,
        user_id: row.get("user_id")?,
        date: row.get("date")?,
        sleep_hours: row.get("sleep_hours")?,
        mood: row.get("mood")?,
        physical_activity: row.get("physical_activity")?,
        food: row.get("food")?,
        symptoms: row.get("symptoms")?,
        blood_pressure: row.get("blood_pressure")?,
        glucose: row.get("glucose")?,
        bpm: row.get("bpm")?,
        weight: row.get("weight")?,
    })
}

impl RecordStore for SqliteRecordStore {
    fn get_all_user_ids(&self) -> Result<Vec<i64>> {
        let conn = self.lock_conn();
        let mut stmt = conn.prepare_cached("SELECT id FROM users ORDER BY id")?;
        let ids = stmt
            .query_map([], |row| row.get(0))?
            .collect::<rusqlite::Result<Vec<i64>>>()?;
        Ok(ids)
    }

    fn get_records_for_analysis(&self, user_id: i64, limit: usize) -> Result<Vec<DailyRecord>> {
        let limit = i64::try_from(limit).unwrap_or(i64::MAX);
        let conn = self.lock_conn();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {RECORD_COLUMNS} FROM daily_records
             WHERE user_id = ?1
             ORDER BY date DESC, id DESC
             LIMIT ?2"
        ))?;
        let mut records = stmt
            .query_map(params![user_id, limit], record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        records.reverse();
        Ok(records)
    }

    fn get_records_in_range(
        &self,
        user_id: i64,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<DailyRecord>> {
        let conn = self.lock_conn();
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {RECORD_COLUMNS} FROM daily_records
             WHERE user_id = ?1 AND date >= ?2 AND date <= ?3
             ORDER BY date ASC, id ASC"
        ))?;
        let records = stmt
            .query_map(params![user_id, from, to], record_from_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(records)
    }

    fn get_user_by_id(&self, user_id: i64) -> Result<Option<UserInfo>> {
        let conn = self.lock_conn();
        let user = conn
            .query_row(
                "SELECT users.id, users.name, users.age, users.email, roles.name AS role_name
                 FROM users
                 LEFT JOIN roles ON users.role_id = roles.id
                 WHERE users.id = ?1",
                params![user_id],
                |row| {
                    Ok(UserInfo {
                        id: row.get("id")?,
                        name: row.get("name")?,
                        age: row.get("age")?,
                        email: row.get("email")?,
                        role_name: row.get("role_name")?,
                    })
                },
            )
            .optional()?;
        Ok(user)
    }
}
