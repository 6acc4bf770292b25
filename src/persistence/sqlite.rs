//! SQLite position store
//!
//! One table, `fen_strings(id INTEGER PRIMARY KEY, fen_string TEXT)`, with
//! rows appended in play order. The most recent row is the most recent
//! position.

use std::str::FromStr;

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use tracing::debug;

use super::error::PersistenceResult;

pub struct FenStore {
    pool: SqlitePool,
}

impl FenStore {
    /// Open (creating if missing) the database at `database_url`
    ///
    /// `sqlite::memory:` gives a private in-memory store.
    pub async fn connect(database_url: &str) -> PersistenceResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)?.create_if_missing(true);
        // A single connection keeps in-memory databases shared across queries.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await?;
        Self::from_pool(pool).await
    }

    /// Wrap an existing pool and make sure the table exists.
    pub async fn from_pool(pool: SqlitePool) -> PersistenceResult<Self> {
        sqlx::query(
            "CREATE TABLE IF NOT EXISTS fen_strings (
                id INTEGER PRIMARY KEY,
                fen_string TEXT
            );",
        )
        .execute(&pool)
        .await?;
        Ok(Self { pool })
    }

    /// Append a position; returns its row id.
    pub async fn insert_latest(&self, fen: &str) -> PersistenceResult<i64> {
        let result = sqlx::query("INSERT INTO fen_strings (fen_string) VALUES (?)")
            .bind(fen)
            .execute(&self.pool)
            .await?;
        debug!("[PERSIST] Stored position #{}", result.last_insert_rowid());
        Ok(result.last_insert_rowid())
    }

    pub async fn fetch_most_recent(&self) -> PersistenceResult<Option<String>> {
        let fen = sqlx::query_scalar::<_, String>(
            "SELECT fen_string FROM fen_strings ORDER BY id DESC LIMIT 1",
        )
        .fetch_optional(&self.pool)
        .await?;
        Ok(fen)
    }

    /// Remove every row holding exactly `fen`; returns the number removed.
    pub async fn delete_by_value(&self, fen: &str) -> PersistenceResult<u64> {
        let result = sqlx::query("DELETE FROM fen_strings WHERE fen_string = ?")
            .bind(fen)
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn clear_all(&self) -> PersistenceResult<u64> {
        let result = sqlx::query("DELETE FROM fen_strings")
            .execute(&self.pool)
            .await?;
        Ok(result.rows_affected())
    }

    pub async fn count(&self) -> PersistenceResult<i64> {
        let count = sqlx::query_scalar::<_, i64>("SELECT COUNT(*) FROM fen_strings")
            .fetch_one(&self.pool)
            .await?;
        Ok(count)
    }
}
