//! Durable storage for score records.
//!
//! The [`ScoreStore`] trait decouples form orchestration from the storage
//! engine. [`SqliteScoreStore`] is the production backend; every implementation
//! must list records newest first (descending id).

use std::path::Path;

use anyhow::{Context, Result};
use rusqlite::types::Type;
use rusqlite::{Connection, OptionalExtension, Row, params};
use tracing::{debug, info, instrument};

use crate::core::types::{RecordId, ScoreFields, ScoreRecord, Track};

/// Name of the backing table.
pub const TABLE_NAME: &str = "student_scores";

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS student_scores (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    student_name TEXT NOT NULL,
    biology REAL NOT NULL,
    physics REAL NOT NULL,
    english REAL NOT NULL,
    recommended_track TEXT NOT NULL
);";

const SELECT_COLUMNS: &str =
    "SELECT id, student_name, biology, physics, english, recommended_track FROM student_scores";

/// Outcome of a mutation addressed by id.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mutation {
    /// Exactly the addressed row was changed.
    Applied,
    /// No row has the given id; nothing changed.
    NotFound,
}

impl Mutation {
    fn from_rows_affected(rows: usize) -> Self {
        if rows == 0 {
            Mutation::NotFound
        } else {
            Mutation::Applied
        }
    }
}

/// Abstraction over score record storage backends.
///
/// Stores perform no validation; callers pass fields that already passed
/// [`crate::core::validation::validate`] and a track computed from them.
pub trait ScoreStore {
    /// Persist a new record and return its freshly assigned id.
    fn create(&mut self, fields: &ScoreFields, track: Track) -> Result<RecordId>;

    /// Fetch a single record by id.
    fn get(&self, id: RecordId) -> Result<Option<ScoreRecord>>;

    /// Overwrite every mutable field of the record with `id`.
    fn update(&mut self, id: RecordId, fields: &ScoreFields, track: Track) -> Result<Mutation>;

    /// Remove the record with `id`.
    fn delete(&mut self, id: RecordId) -> Result<Mutation>;

    /// Every record, ordered by id descending.
    fn list_all(&self) -> Result<Vec<ScoreRecord>>;
}

/// SQLite-backed [`ScoreStore`] holding one connection for its lifetime.
pub struct SqliteScoreStore {
    conn: Connection,
}

impl SqliteScoreStore {
    /// Open (or create) the database file and ensure the table exists.
    pub fn open(path: &Path) -> Result<Self> {
        debug!(path = %path.display(), "opening score database");
        let conn = Connection::open(path)
            .with_context(|| format!("open sqlite database {}", path.display()))?;
        Self::init(conn)
    }

    /// Open a private in-memory database.
    pub fn open_in_memory() -> Result<Self> {
        let conn = Connection::open_in_memory().context("open in-memory sqlite database")?;
        Self::init(conn)
    }

    fn init(conn: Connection) -> Result<Self> {
        conn.execute_batch(SCHEMA)
            .with_context(|| format!("create table {TABLE_NAME}"))?;
        Ok(Self { conn })
    }
}

impl ScoreStore for SqliteScoreStore {
    #[instrument(skip_all, fields(track = %track))]
    fn create(&mut self, fields: &ScoreFields, track: Track) -> Result<RecordId> {
        let tx = self
            .conn
            .transaction()
            .context("begin insert transaction")?;
        tx.execute(
            "INSERT INTO student_scores (student_name, biology, physics, english, recommended_track)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                fields.student_name,
                fields.biology,
                fields.physics,
                fields.english,
                track.label()
            ],
        )
        .context("insert score record")?;
        let id = RecordId(tx.last_insert_rowid());
        tx.commit().context("commit insert transaction")?;
        info!(%id, "score record created");
        Ok(id)
    }

    fn get(&self, id: RecordId) -> Result<Option<ScoreRecord>> {
        self.conn
            .query_row(
                &format!("{SELECT_COLUMNS} WHERE id = ?1"),
                params![id.0],
                parse_record_row,
            )
            .optional()
            .with_context(|| format!("load score record {id}"))
    }

    #[instrument(skip_all, fields(%id, track = %track))]
    fn update(&mut self, id: RecordId, fields: &ScoreFields, track: Track) -> Result<Mutation> {
        let rows = self
            .conn
            .execute(
                "UPDATE student_scores
                 SET student_name = ?1, biology = ?2, physics = ?3, english = ?4, recommended_track = ?5
                 WHERE id = ?6",
                params![
                    fields.student_name,
                    fields.biology,
                    fields.physics,
                    fields.english,
                    track.label(),
                    id.0
                ],
            )
            .with_context(|| format!("update score record {id}"))?;
        let outcome = Mutation::from_rows_affected(rows);
        debug!(rows, ?outcome, "score record update finished");
        Ok(outcome)
    }

    #[instrument(skip_all, fields(%id))]
    fn delete(&mut self, id: RecordId) -> Result<Mutation> {
        let rows = self
            .conn
            .execute("DELETE FROM student_scores WHERE id = ?1", params![id.0])
            .with_context(|| format!("delete score record {id}"))?;
        let outcome = Mutation::from_rows_affected(rows);
        debug!(rows, ?outcome, "score record delete finished");
        Ok(outcome)
    }

    fn list_all(&self) -> Result<Vec<ScoreRecord>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{SELECT_COLUMNS} ORDER BY id DESC"))
            .context("prepare score listing")?;
        let rows = stmt
            .query_map([], parse_record_row)
            .context("query score records")?;
        let records = rows
            .collect::<rusqlite::Result<Vec<_>>>()
            .context("read score records")?;
        debug!(count = records.len(), "score records listed");
        Ok(records)
    }
}

fn parse_record_row(row: &Row<'_>) -> rusqlite::Result<ScoreRecord> {
    let label: String = row.get(5)?;
    let recommended_track = label
        .parse::<Track>()
        .map_err(|err| rusqlite::Error::FromSqlConversionFailure(5, Type::Text, Box::new(err)))?;
    Ok(ScoreRecord {
        id: RecordId(row.get(0)?),
        student_name: row.get(1)?,
        biology: row.get(2)?,
        physics: row.get(3)?,
        english: row.get(4)?,
        recommended_track,
    })
}
