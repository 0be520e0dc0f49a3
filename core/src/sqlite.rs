//! SQLite-backed `TodoStore`.

use std::str::FromStr;
use std::time::Duration;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::StoreError;
use crate::store::TodoStore;
use crate::types::{NewTodo, Todo};

/// DDL for the single `todo` table. Safe to run on every startup.
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS todo (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    title VARCHAR(200) NOT NULL,
    completed BOOLEAN NOT NULL DEFAULT 0
);
"#;

#[derive(Debug, Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
}

impl SqliteStore {
    /// Open (creating if missing) the database at `database_url` and apply
    /// the schema.
    ///
    /// `sqlite::memory:` URLs get a single connection that is never recycled;
    /// otherwise every pooled connection would see its own empty database.
    pub async fn connect(database_url: &str) -> Result<Self, StoreError> {
        let in_memory = database_url.contains(":memory:");

        let mut connect_opts = SqliteConnectOptions::from_str(database_url)?
            .create_if_missing(true)
            .busy_timeout(Duration::from_secs(5));
        if !in_memory {
            connect_opts = connect_opts
                .journal_mode(SqliteJournalMode::Wal)
                .synchronous(SqliteSynchronous::Normal);
        }

        let mut pool_opts = SqlitePoolOptions::new();
        if in_memory {
            pool_opts = pool_opts
                .max_connections(1)
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }
        let pool = pool_opts.connect_with(connect_opts).await?;

        let store = Self { pool };
        store.apply_schema().await?;
        info!(database_url, "todo store ready");
        Ok(store)
    }

    pub async fn apply_schema(&self) -> Result<(), StoreError> {
        for stmt in SQLITE_INIT.split(';') {
            let s = stmt.trim();
            if s.is_empty() {
                continue;
            }
            sqlx::query(s).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl TodoStore for SqliteStore {
    async fn list(&self) -> Result<Vec<Todo>, StoreError> {
        let rows = sqlx::query_as::<_, Todo>(
            r#"
        SELECT id, title, completed
        FROM todo
        ORDER BY id
        "#,
        )
        .fetch_all(&self.pool)
        .await?;

        debug!(count = rows.len(), "listed todos");
        Ok(rows)
    }

    async fn find(&self, id: i64) -> Result<Option<Todo>, StoreError> {
        let row = sqlx::query_as::<_, Todo>(
            r#"
        SELECT id, title, completed
        FROM todo
        WHERE id = ?
        "#,
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row)
    }

    async fn create(&self, new: NewTodo) -> Result<Todo, StoreError> {
        let id: i64 = sqlx::query_scalar(
            r#"
        INSERT INTO todo (title, completed)
        VALUES (?, ?)
        RETURNING id
        "#,
        )
        .bind(new.title.as_str())
        .bind(new.completed)
        .fetch_one(&self.pool)
        .await?;

        Ok(Todo {
            id,
            title: new.title,
            completed: new.completed,
        })
    }

    async fn save(&self, todo: &Todo) -> Result<bool, StoreError> {
        let result = sqlx::query(
            r#"
        UPDATE todo
        SET title = ?, completed = ?
        WHERE id = ?
        "#,
        )
        .bind(todo.title.as_str())
        .bind(todo.completed)
        .bind(todo.id)
        .execute(&self.pool)
        .await?;

        Ok(result.rows_affected() > 0)
    }

    async fn delete(&self, id: i64) -> Result<bool, StoreError> {
        let result = sqlx::query("DELETE FROM todo WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await?;

        Ok(result.rows_affected() > 0)
    }
}
