//! Test-only helpers for constructing score fields and stores.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tempfile::TempDir;

use crate::core::types::ScoreFields;
use crate::core::validation::RawFields;
use crate::io::store::SqliteScoreStore;

/// Create validated-shape fields directly, bypassing validation.
pub fn fields(name: &str, biology: f64, physics: f64, english: f64) -> ScoreFields {
    ScoreFields {
        student_name: name.to_string(),
        biology,
        physics,
        english,
    }
}

/// Create raw form input from string slices.
pub fn raw(name: &str, biology: &str, physics: &str, english: &str) -> RawFields {
    RawFields::new(name, biology, physics, english)
}

/// SQLite store backed by a file inside a temp directory.
///
/// Keep the returned [`TempStore`] alive for as long as the store is used.
pub struct TempStore {
    dir: TempDir,
    pub store: SqliteScoreStore,
}

impl TempStore {
    pub fn new() -> Result<Self> {
        let dir = tempfile::tempdir().context("create temp dir")?;
        let store = SqliteScoreStore::open(&dir.path().join("scores.db"))?;
        Ok(Self { dir, store })
    }

    /// Path of the backing database file.
    pub fn db_path(&self) -> PathBuf {
        self.dir.path().join("scores.db")
    }

    /// Open a second, independent handle on the same database file.
    pub fn reopen(&self) -> Result<SqliteScoreStore> {
        SqliteScoreStore::open(&self.db_path())
    }
}
