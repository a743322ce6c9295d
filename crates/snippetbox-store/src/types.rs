//! Domain types for the snippet store.

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};

/// Store-assigned snippet identifier. Positive, monotonically increasing.
pub type SnippetId = i64;

/// Maximum number of snippets returned by [`crate::SnippetStore::latest`].
pub const LATEST_LIMIT: usize = 10;

/// A stored text note.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Snippet {
    pub id: SnippetId,
    pub title: String,
    pub content: String,
    /// Set by the store at insert time.
    pub created: DateTime<Utc>,
    /// `created` plus the requested number of days.
    pub expires: DateTime<Utc>,
}

impl Snippet {
    /// Whether the snippet is still visible at `now`.
    pub fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires > now
    }

    /// Time between creation and expiry.
    pub fn lifetime(&self) -> TimeDelta {
        self.expires - self.created
    }
}
