//! PgSnippetStore: PostgreSQL-backed snippet persistence.
//!
//! All timestamps are computed by the database (`now()`), so `created` and
//! `expires` never depend on the application host clock.

use async_trait::async_trait;
use sqlx::PgPool;
use sqlx::postgres::PgPoolOptions;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::SnippetStore;
use crate::types::{LATEST_LIMIT, Snippet, SnippetId};

/// Convert any `Display` error into a `StoreError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StoreError::$variant(e.to_string())
    };
}

const CREATE_TABLE: &str = "CREATE TABLE IF NOT EXISTS snippets (
    id      BIGSERIAL PRIMARY KEY,
    title   VARCHAR(100) NOT NULL,
    content TEXT NOT NULL,
    created TIMESTAMPTZ NOT NULL,
    expires TIMESTAMPTZ NOT NULL
)";

const CREATE_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_snippets_created ON snippets (created)";

const INSERT: &str = "INSERT INTO snippets (title, content, created, expires)
     VALUES ($1, $2, now(), now() + make_interval(days => $3))
     RETURNING id";

const GET: &str = "SELECT id, title, content, created, expires FROM snippets
     WHERE expires > now() AND id = $1";

const LATEST: &str = "SELECT id, title, content, created, expires FROM snippets
     WHERE expires > now() ORDER BY id DESC LIMIT $1";

const PURGE: &str = "DELETE FROM snippets WHERE expires <= now()";

/// Snippet store backed by a PostgreSQL connection pool.
#[derive(Clone)]
pub struct PgSnippetStore {
    pool: PgPool,
}

impl PgSnippetStore {
    /// Open a pool against `dsn`. Fails if no connection can be established.
    pub async fn connect(dsn: &str, max_connections: u32) -> StoreResult<Self> {
        let pool = PgPoolOptions::new()
            .max_connections(max_connections)
            .connect(dsn)
            .await
            .map_err(map_err!(Connect))?;
        debug!(max_connections, "postgres pool opened");
        Ok(Self { pool })
    }

    /// Wrap an existing pool.
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Create the `snippets` table and its index if they don't exist yet.
    pub async fn migrate(&self) -> StoreResult<()> {
        sqlx::query(CREATE_TABLE)
            .execute(&self.pool)
            .await
            .map_err(map_err!(Migrate))?;
        sqlx::query(CREATE_INDEX)
            .execute(&self.pool)
            .await
            .map_err(map_err!(Migrate))?;
        debug!("snippets schema ready");
        Ok(())
    }

    /// Close every pooled connection.
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[async_trait]
impl SnippetStore for PgSnippetStore {
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i32,
    ) -> StoreResult<SnippetId> {
        let id: SnippetId = sqlx::query_scalar(INSERT)
            .bind(title)
            .bind(content)
            .bind(expires_days)
            .fetch_one(&self.pool)
            .await
            .map_err(map_err!(Query))?;
        debug!(id, expires_days, "snippet inserted");
        Ok(id)
    }

    async fn get(&self, id: SnippetId) -> StoreResult<Snippet> {
        sqlx::query_as::<_, Snippet>(GET)
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(map_err!(Query))?
            .ok_or(StoreError::NotFound(id))
    }

    async fn latest(&self) -> StoreResult<Vec<Snippet>> {
        sqlx::query_as::<_, Snippet>(LATEST)
            .bind(LATEST_LIMIT as i64)
            .fetch_all(&self.pool)
            .await
            .map_err(map_err!(Query))
    }

    async fn purge_expired(&self) -> StoreResult<u64> {
        let result = sqlx::query(PURGE)
            .execute(&self.pool)
            .await
            .map_err(map_err!(Query))?;
        Ok(result.rows_affected())
    }
}
