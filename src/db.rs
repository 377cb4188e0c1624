// Copyright 2026 The wordmill authors
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

use std::collections::HashMap;
use std::path::Path;

use rusqlite::Connection;
use rusqlite::Row;
use rusqlite::Transaction;

use crate::error::Fallible;
use crate::error::fail;
use crate::types::direction::Direction;
use crate::types::grade::Grade;
use crate::types::record::PerformanceRecord;
use crate::types::timestamp::Timestamp;

pub const DB_FILE_NAME: &str = "progress.sqlite3";

/// The performance store: a durable mapping from `(direction, word)` to a
/// performance record.
pub struct Database {
    conn: Connection,
}

/// Open the store in the word directory. A store that cannot be opened is
/// replaced with an empty in-memory one: progress tracking is best-effort
/// and never blocks drilling.
pub fn open_store(directory: &Path) -> Fallible<Database> {
    let path = directory.join(DB_FILE_NAME);
    let Some(path) = path.to_str() else {
        return fail("invalid database path.");
    };
    match Database::open(path) {
        Ok(db) => Ok(db),
        Err(e) => {
            log::warn!("could not open {path} ({e}); progress will not be saved");
            Database::in_memory()
        }
    }
}

impl Database {
    pub fn open(database_path: &str) -> Fallible<Self> {
        let conn = Connection::open(database_path)?;
        Self::from_connection(conn)
    }

    /// An in-memory store, used for tests and as the fallback when the store
    /// on disk cannot be opened.
    pub fn in_memory() -> Fallible<Self> {
        let conn = Connection::open_in_memory()?;
        Self::from_connection(conn)
    }

    fn from_connection(mut conn: Connection) -> Fallible<Self> {
        {
            let tx = conn.transaction()?;
            if !probe_schema_exists(&tx)? {
                tx.execute_batch(include_str!("schema.sql"))?;
                tx.commit()?;
            }
        }
        Ok(Self { conn })
    }

    /// Load every record for a direction. Malformed rows are skipped with a
    /// warning: a row that cannot be read means the word is treated as new,
    /// never that drilling is blocked.
    pub fn records(&self, direction: Direction) -> Fallible<HashMap<String, PerformanceRecord>> {
        let mut records = HashMap::new();
        let sql = "select word, last_grade, last_reviewed_at, streak from records where direction = ?;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query([direction])?;
        while let Some(row) = rows.next()? {
            match read_record(row) {
                Ok((word, record)) => {
                    records.insert(word, record);
                }
                Err(e) => {
                    log::warn!("skipping malformed record: {e}");
                }
            }
        }
        Ok(records)
    }

    /// Get the record for a single word, if it has ever been graded under
    /// this direction.
    pub fn record(
        &self,
        direction: Direction,
        word: &str,
    ) -> Fallible<Option<PerformanceRecord>> {
        let sql = "select word, last_grade, last_reviewed_at, streak from records where direction = ? and word = ?;";
        let mut stmt = self.conn.prepare(sql)?;
        let mut rows = stmt.query((direction, word))?;
        if let Some(row) = rows.next()? {
            match read_record(row) {
                Ok((_, record)) => Ok(Some(record)),
                Err(e) => {
                    log::warn!("skipping malformed record: {e}");
                    Ok(None)
                }
            }
        } else {
            Ok(None)
        }
    }

    /// Write the record for a word. A single insert-or-replace, so each
    /// grading event is atomic per key.
    pub fn upsert(
        &self,
        direction: Direction,
        word: &str,
        record: &PerformanceRecord,
    ) -> Fallible<()> {
        let sql = "insert or replace into records (direction, word, last_grade, last_reviewed_at, streak) values (?, ?, ?, ?, ?);";
        self.conn.execute(
            sql,
            (
                direction,
                word,
                record.last_grade,
                record.last_reviewed_at,
                record.streak,
            ),
        )?;
        Ok(())
    }

    /// Delete all progress for a direction. Returns the number of records
    /// deleted.
    pub fn reset(&self, direction: Direction) -> Fallible<usize> {
        let count = self
            .conn
            .execute("delete from records where direction = ?;", [direction])?;
        Ok(count)
    }

    pub fn record_count(&self, direction: Direction) -> Fallible<usize> {
        let sql = "select count(*) from records where direction = ?;";
        let count: i64 = self.conn.query_row(sql, [direction], |row| row.get(0))?;
        Ok(count as usize)
    }
}

fn read_record(row: &Row) -> rusqlite::Result<(String, PerformanceRecord)> {
    let word: String = row.get(0)?;
    let last_grade: Grade = row.get(1)?;
    let last_reviewed_at: Timestamp = row.get(2)?;
    let streak: u32 = row.get(3)?;
    Ok((
        word,
        PerformanceRecord {
            last_grade,
            last_reviewed_at,
            streak,
        },
    ))
}

fn probe_schema_exists(tx: &Transaction) -> Fallible<bool> {
    let sql = "select count(*) from sqlite_master where type='table' AND name=?;";
    let count: i64 = tx.query_row(sql, ["records"], |row| row.get(0))?;
    Ok(count > 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(streak: u32, grade: Grade, millis: i64) -> PerformanceRecord {
        PerformanceRecord {
            last_grade: grade,
            last_reviewed_at: Timestamp::from_millis(millis),
            streak,
        }
    }

    #[test]
    fn test_missing_record_is_none() -> Fallible<()> {
        let db = Database::in_memory()?;
        assert_eq!(db.record(Direction::Forward, "der Hund")?, None);
        assert!(db.records(Direction::Forward)?.is_empty());
        Ok(())
    }

    #[test]
    fn test_upsert_and_read_back() -> Fallible<()> {
        let db = Database::in_memory()?;
        let first = record(1, Grade::Easy, 1_000);
        db.upsert(Direction::Forward, "der Hund", &first)?;
        assert_eq!(db.record(Direction::Forward, "der Hund")?, Some(first));

        // Updating overwrites in place.
        let second = record(0, Grade::Hard, 2_000);
        db.upsert(Direction::Forward, "der Hund", &second)?;
        assert_eq!(db.record(Direction::Forward, "der Hund")?, Some(second));
        assert_eq!(db.record_count(Direction::Forward)?, 1);
        Ok(())
    }

    #[test]
    fn test_directions_are_independent() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.upsert(Direction::Forward, "der Hund", &record(1, Grade::Easy, 1_000))?;
        assert_eq!(db.record(Direction::Reverse, "der Hund")?, None);
        assert_eq!(db.record_count(Direction::Reverse)?, 0);
        Ok(())
    }

    #[test]
    fn test_reset_is_scoped_to_direction() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.upsert(Direction::Forward, "der Hund", &record(1, Grade::Easy, 1_000))?;
        db.upsert(Direction::Forward, "die Katze", &record(3, Grade::Easy, 2_000))?;
        db.upsert(Direction::Reverse, "der Hund", &record(0, Grade::Hard, 3_000))?;
        assert_eq!(db.reset(Direction::Forward)?, 2);
        assert_eq!(db.record_count(Direction::Forward)?, 0);
        assert_eq!(db.record_count(Direction::Reverse)?, 1);
        Ok(())
    }

    #[test]
    fn test_malformed_rows_are_skipped() -> Fallible<()> {
        let db = Database::in_memory()?;
        db.upsert(Direction::Forward, "der Hund", &record(1, Grade::Easy, 1_000))?;
        db.conn.execute(
            "insert into records (direction, word, last_grade, last_reviewed_at, streak) values ('forward', 'die Katze', 'meh', 0, 0);",
            [],
        )?;
        let records = db.records(Direction::Forward)?;
        assert_eq!(records.len(), 1);
        assert!(records.contains_key("der Hund"));
        Ok(())
    }
}
