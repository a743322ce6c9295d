//! Periodic deletion of expired snippets.
//!
//! Expired snippets are already invisible to readers; the reaper only keeps
//! the table from growing without bound. It is opt-in.

use std::sync::Arc;
use std::time::Duration;

use tokio::sync::watch;
use tracing::{debug, info, warn};

use crate::error::StoreResult;
use crate::store::SnippetStore;

/// Background task that calls [`SnippetStore::purge_expired`] on an interval.
pub struct Reaper {
    store: Arc<dyn SnippetStore>,
    interval: Duration,
}

impl Reaper {
    pub fn new(store: Arc<dyn SnippetStore>, interval: Duration) -> Self {
        Self { store, interval }
    }

    /// Run a single purge pass.
    pub async fn reap_once(&self) -> StoreResult<u64> {
        let removed = self.store.purge_expired().await?;
        debug!(removed, "expired snippets purged");
        Ok(removed)
    }

    /// Purge on every tick until `shutdown` changes.
    pub async fn run(&self, mut shutdown: watch::Receiver<bool>) {
        info!(interval_secs = self.interval.as_secs(), "expiry reaper started");

        loop {
            tokio::select! {
                _ = tokio::time::sleep(self.interval) => {
                    if let Err(e) = self.reap_once().await {
                        warn!(error = %e, "expiry reaper pass failed");
                    }
                }
                _ = shutdown.changed() => {
                    info!("expiry reaper shutting down");
                    break;
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::MemorySnippetStore;
    use chrono::{TimeDelta, Utc};
    use std::sync::Mutex;

    #[tokio::test]
    async fn reap_once_purges_expired() {
        let now = Arc::new(Mutex::new(Utc::now()));
        let clock = now.clone();
        let store = MemorySnippetStore::with_clock(move || *clock.lock().unwrap());
        store.insert("gone", "c", 1).await.unwrap();
        store.insert("kept", "c", 7).await.unwrap();
        *now.lock().unwrap() += TimeDelta::days(2);

        let reaper = Reaper::new(Arc::new(store.clone()), Duration::from_secs(60));

        assert_eq!(reaper.reap_once().await.unwrap(), 1);
        assert_eq!(store.len().await, 1);
    }

    #[tokio::test]
    async fn run_stops_on_shutdown() {
        let store = MemorySnippetStore::new();
        let reaper = Reaper::new(Arc::new(store), Duration::from_millis(5));
        let (tx, rx) = watch::channel(false);

        let handle = tokio::spawn(async move { reaper.run(rx).await });
        tokio::time::sleep(Duration::from_millis(20)).await;
        tx.send(true).unwrap();

        tokio::time::timeout(Duration::from_secs(1), handle)
            .await
            .expect("reaper did not stop")
            .unwrap();
    }
}
