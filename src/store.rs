// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use std::sync::Arc;
use std::sync::Mutex;
use std::sync::MutexGuard;

use chrono::Utc;
use rusqlite::Connection;
use rusqlite::OptionalExtension;
use rusqlite::Transaction;

use crate::error::ErrorReport;
use crate::error::Fallible;

/// Key-value byte storage that survives restarts.
pub trait Store: Send + Sync {
    fn get(&self, key: &str) -> Fallible<Option<Vec<u8>>>;

    fn set(&self, key: &str, value: &[u8]) -> Fallible<()>;
}

/// A [`Store`] backed by a single SQLite table.
#[derive(Clone)]
pub struct Database {
    conn: Arc<Mutex<Connection>>,
}

impl Database {
    pub fn new(database_path: &str) -> Fallible<Self> {
        let mut conn = Connection::open(database_path)?;
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                log::debug!("Creating schema in {database_path}");
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        let conn = Arc::new(Mutex::new(conn));
        Ok(Self { conn })
    }

    fn acquire(&self) -> Fallible<MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|_| ErrorReport::new("database lock poisoned"))
    }
}

impl Store for Database {
    fn get(&self, key: &str) -> Fallible<Option<Vec<u8>>> {
        let conn = self.acquire()?;
        let sql = "select value from kv where key = ?;";
        let value: Option<Vec<u8>> = conn
            .query_row(sql, [key], |row| row.get(0))
            .optional()?;
        Ok(value)
    }

    fn set(&self, key: &str, value: &[u8]) -> Fallible<()> {
        let mut conn = self.acquire()?;
        let tx = conn.transaction()?;
        let sql = "insert into kv (key, value, updated_at) values (?, ?, ?) on conflict (key) do update set value = excluded.value, updated_at = excluded.updated_at;";
        let updated_at = Utc::now().to_rfc3339();
        tx.execute(sql, (key, value, updated_at))?;
        tx.commit()?;
        Ok(())
    }
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["kv"], |row| row.get(0))?;
    Ok(count > 0)
}


#[cfg(test)]
mod tests {
    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_get_missing_key() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("komorebi.db");
        let db = Database::new(path.to_str().unwrap())?;
        assert_eq!(db.get("nothing")?, None);
        Ok(())
    }

    #[test]
    fn test_set_then_get() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("komorebi.db");
        let db = Database::new(path.to_str().unwrap())?;
        db.set("greeting", b"hello")?;
        assert_eq!(db.get("greeting")?, Some(b"hello".to_vec()));
        db.set("greeting", b"bye")?;
        assert_eq!(db.get("greeting")?, Some(b"bye".to_vec()));
        Ok(())
    }

    #[test]
    fn test_values_survive_reopening() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("komorebi.db");
        let path = path.to_str().unwrap();
        {
            let db = Database::new(path)?;
            db.set("k", b"v")?;
        }
        let db = Database::new(path)?;
        assert_eq!(db.get("k")?, Some(b"v".to_vec()));
        Ok(())
    }
}
