//! MemorySnippetStore: in-process snippet store.
//!
//! Mirrors the PostgreSQL semantics (monotonic ids, query-time expiry,
//! newest-first listing) without a database. The clock is injectable so
//! tests can move time past a snippet's expiry.

use std::collections::BTreeMap;
use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Utc};
use tokio::sync::RwLock;
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use crate::store::SnippetStore;
use crate::types::{LATEST_LIMIT, Snippet, SnippetId};

/// Source of "now" for expiry decisions.
pub type Clock = Arc<dyn Fn() -> DateTime<Utc> + Send + Sync>;

#[derive(Default)]
struct Rows {
    last_id: SnippetId,
    snippets: BTreeMap<SnippetId, Snippet>,
}

/// Thread-safe in-memory snippet store.
#[derive(Clone)]
pub struct MemorySnippetStore {
    rows: Arc<RwLock<Rows>>,
    clock: Clock,
}

impl Default for MemorySnippetStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemorySnippetStore {
    /// Create an empty store using the system clock.
    pub fn new() -> Self {
        Self::with_clock(Utc::now)
    }

    /// Create an empty store that reads the current time from `clock`.
    pub fn with_clock<F>(clock: F) -> Self
    where
        F: Fn() -> DateTime<Utc> + Send + Sync + 'static,
    {
        Self {
            rows: Arc::new(RwLock::new(Rows::default())),
            clock: Arc::new(clock),
        }
    }

    /// Number of rows held, expired ones included.
    pub async fn len(&self) -> usize {
        self.rows.read().await.snippets.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl SnippetStore for MemorySnippetStore {
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i32,
    ) -> StoreResult<SnippetId> {
        let lifetime = TimeDelta::try_days(i64::from(expires_days))
            .ok_or(StoreError::InvalidExpiry(expires_days))?;
        let created = (self.clock)();
        let expires = created
            .checked_add_signed(lifetime)
            .ok_or(StoreError::InvalidExpiry(expires_days))?;

        let mut rows = self.rows.write().await;
        rows.last_id += 1;
        let id = rows.last_id;
        rows.snippets.insert(
            id,
            Snippet {
                id,
                title: title.to_string(),
                content: content.to_string(),
                created,
                expires,
            },
        );
        debug!(id, expires_days, "snippet inserted");
        Ok(id)
    }

    async fn get(&self, id: SnippetId) -> StoreResult<Snippet> {
        let now = (self.clock)();
        let rows = self.rows.read().await;
        rows.snippets
            .get(&id)
            .filter(|s| s.is_live_at(now))
            .cloned()
            .ok_or(StoreError::NotFound(id))
    }

    async fn latest(&self) -> StoreResult<Vec<Snippet>> {
        let now = (self.clock)();
        let rows = self.rows.read().await;
        Ok(rows
            .snippets
            .values()
            .rev()
            .filter(|s| s.is_live_at(now))
            .take(LATEST_LIMIT)
            .cloned()
            .collect())
    }

    async fn purge_expired(&self) -> StoreResult<u64> {
        let now = (self.clock)();
        let mut rows = self.rows.write().await;
        let before = rows.snippets.len();
        rows.snippets.retain(|_, s| s.is_live_at(now));
        Ok((before - rows.snippets.len()) as u64)
    }
}
