//! SQLite-backed record store: one table, JSON bodies keyed by collection.
//! Used by: state.

use std::sync::Mutex;

use chrono::Utc;
use rusqlite::{Connection, OptionalExtension};

use super::{Body, Collection, DataStore, Record};
use crate::error::{lock_err, Error, Result};

const RESERVED: [&str; 3] = ["id", "createdAt", "updatedAt"];

pub struct SqliteStore {
    conn: Mutex<Connection>,
}

impl SqliteStore {
    pub fn open(path: &str) -> Result<Self> {
        let conn = Connection::open(path)?;
        conn.execute_batch(
            "CREATE TABLE IF NOT EXISTS records (
                id TEXT PRIMARY KEY,
                collection TEXT NOT NULL,
                body TEXT NOT NULL,
                created_at TEXT NOT NULL,
                updated_at TEXT NOT NULL
            );
            CREATE INDEX IF NOT EXISTS records_collection ON records (collection)",
        )?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn open_in_memory() -> Result<Self> {
        Self::open(":memory:")
    }

    fn fetch(conn: &Connection, collection: Collection, id: &str) -> Result<Record> {
        conn.query_row(
            "SELECT id, body, created_at, updated_at FROM records WHERE collection = ?1 AND id = ?2",
            (collection.as_str(), id),
            |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            },
        )
        .optional()?
        .ok_or_else(|| Error::NotFound(format!("{}/{}", collection.as_str(), id)))
        .and_then(into_record)
    }
}

fn strip_reserved(mut body: Body) -> Body {
    for key in RESERVED {
        body.remove(key);
    }
    body
}

fn into_record((id, body, created_at, updated_at): (String, String, String, String)) -> Result<Record> {
    Ok(Record {
        id,
        created_at,
        updated_at,
        body: serde_json::from_str(&body)?,
    })
}

impl DataStore for SqliteStore {
    fn insert(&self, collection: Collection, body: Body) -> Result<Record> {
        let body = strip_reserved(body);
        let id = uuid::Uuid::new_v4().to_string();
        let now = Utc::now().to_rfc3339();
        let conn = self.conn.lock().map_err(lock_err("store"))?;
        conn.execute(
            "INSERT INTO records (id, collection, body, created_at, updated_at) VALUES (?1, ?2, ?3, ?4, ?4)",
            (&id, collection.as_str(), serde_json::to_string(&body)?, &now),
        )?;
        Ok(Record {
            id,
            created_at: now.clone(),
            updated_at: now,
            body,
        })
    }

    fn list(&self, collection: Collection, limit: usize) -> Result<Vec<Record>> {
        let conn = self.conn.lock().map_err(lock_err("store"))?;
        let mut stmt = conn.prepare(
            "SELECT id, body, created_at, updated_at FROM records
             WHERE collection = ?1 ORDER BY rowid DESC LIMIT ?2",
        )?;
        let rows = stmt
            .query_map((collection.as_str(), limit as i64), |row| {
                Ok((
                    row.get::<_, String>(0)?,
                    row.get::<_, String>(1)?,
                    row.get::<_, String>(2)?,
                    row.get::<_, String>(3)?,
                ))
            })?
            .collect::<std::result::Result<Vec<_>, _>>()?;
        rows.into_iter().map(into_record).collect()
    }

    fn get(&self, collection: Collection, id: &str) -> Result<Record> {
        let conn = self.conn.lock().map_err(lock_err("store"))?;
        Self::fetch(&conn, collection, id)
    }

    fn update(&self, collection: Collection, id: &str, patch: Body) -> Result<Record> {
        let conn = self.conn.lock().map_err(lock_err("store"))?;
        let mut record = Self::fetch(&conn, collection, id)?;
        record.body.extend(strip_reserved(patch));
        record.updated_at = Utc::now().to_rfc3339();
        conn.execute(
            "UPDATE records SET body = ?1, updated_at = ?2 WHERE collection = ?3 AND id = ?4",
            (
                serde_json::to_string(&record.body)?,
                &record.updated_at,
                collection.as_str(),
                id,
            ),
        )?;
        Ok(record)
    }

    fn delete(&self, collection: Collection, id: &str) -> Result<()> {
        let conn = self.conn.lock().map_err(lock_err("store"))?;
        let removed = conn.execute(
            "DELETE FROM records WHERE collection = ?1 AND id = ?2",
            (collection.as_str(), id),
        )?;
        if removed == 0 {
            return Err(Error::NotFound(format!("{}/{}", collection.as_str(), id)));
        }
        Ok(())
    }
}
