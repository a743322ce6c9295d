//! The `SnippetStore` capability shared by every backend.

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::{Snippet, SnippetId};

/// CRUD operations over the `snippets` table.
///
/// Inputs are assumed to be validated by the caller: `title` non-blank and
/// at most 100 characters, `content` non-blank, `expires_days` one of the
/// permitted expiry periods.
#[async_trait]
pub trait SnippetStore: Send + Sync + 'static {
    /// Insert a snippet expiring `expires_days` from now. Returns its id.
    async fn insert(
        &self,
        title: &str,
        content: &str,
        expires_days: i32,
    ) -> StoreResult<SnippetId>;

    /// Fetch a live snippet by id.
    ///
    /// Returns [`StoreError::NotFound`](crate::StoreError::NotFound) when the
    /// id is unknown or the snippet has expired.
    async fn get(&self, id: SnippetId) -> StoreResult<Snippet>;

    /// Up to [`LATEST_LIMIT`](crate::LATEST_LIMIT) live snippets, newest id first.
    async fn latest(&self) -> StoreResult<Vec<Snippet>>;

    /// Physically delete expired snippets. Returns the number removed.
    async fn purge_expired(&self) -> StoreResult<u64>;
}
