//! Off-chain Content Cache
//!
//! URI-keyed cache of fetched metadata documents. Every entry carries its own
//! time-to-live; entries stored without one use the cache's default
//! expiration. Clones share the same storage.

use moka::{Expiry, future::Cache};
use std::time::{Duration, Instant};
use tokio::task::JoinHandle;

use super::offchain::OffchainContent;
use crate::constants::CACHE_SWEEP_INTERVAL;

#[derive(Clone, Debug)]
struct CachedContent {
    content: OffchainContent,
    ttl: Duration,
}

struct PerEntryTtl;

impl Expiry<String, CachedContent> for PerEntryTtl {
    fn expire_after_create(
        &self,
        _key: &String,
        value: &CachedContent,
        _created_at: Instant,
    ) -> Option<Duration> {
        Some(value.ttl)
    }

    fn expire_after_update(
        &self,
        _key: &String,
        value: &CachedContent,
        _updated_at: Instant,
        _duration_until_expiry: Option<Duration>,
    ) -> Option<Duration> {
        Some(value.ttl)
    }
}

#[derive(Clone)]
pub struct ContentCache {
    inner: Cache<String, CachedContent>,
    default_ttl: Duration,
}

impl ContentCache {
    pub fn new(default_ttl: Duration) -> Self {
        let inner = Cache::builder().expire_after(PerEntryTtl).build();
        Self { inner, default_ttl }
    }

    pub async fn get(&self, uri: &str) -> Option<OffchainContent> {
        self.inner.get(uri).await.map(|cached| cached.content)
    }

    /// Store `content` for `uri`, replacing any previous entry and its TTL.
    pub async fn set(&self, uri: &str, content: OffchainContent, ttl: Duration) {
        self.inner
            .insert(uri.to_string(), CachedContent { content, ttl })
            .await;
    }

    /// Store `content` under the default expiration.
    pub async fn set_default(&self, uri: &str, content: OffchainContent) {
        self.set(uri, content, self.default_ttl).await;
    }

    /// Number of entries not yet evicted. Expired entries may still be counted
    /// until the next sweep.
    pub fn entry_count(&self) -> u64 {
        self.inner.entry_count()
    }

    /// Evict expired entries now.
    pub async fn sweep(&self) {
        self.inner.run_pending_tasks().await;
    }

    /// Spawn a task that sweeps the cache every `interval`. The task runs until
    /// the returned handle is aborted. A zero interval falls back to
    /// [`CACHE_SWEEP_INTERVAL`].
    pub fn start_sweeper(&self, interval: Duration) -> JoinHandle<()> {
        let interval = if interval.is_zero() {
            log::warn!(
                "Zero cache sweep interval, using {:?}",
                CACHE_SWEEP_INTERVAL
            );
            CACHE_SWEEP_INTERVAL
        } else {
            interval
        };
        let cache = self.clone();
        tokio::spawn(async move {
            let mut ticker = tokio::time::interval(interval);
            // the first tick completes immediately
            ticker.tick().await;
            loop {
                ticker.tick().await;
                cache.sweep().await;
                log::debug!(
                    "Swept content cache, {} entries remain",
                    cache.entry_count()
                );
            }
        })
    }
}
