//! TTL cache for search-rank lookups.
//!
//! An explicit cache object with checked get/set, constructed once per
//! process and shared by `Arc` — deliberately not module-level singleton
//! state. Entries are evicted lazily on read: a stale entry is removed
//! when observed, never purged proactively, and overwritten on the next
//! set. The cache is the only shared mutable state in the enrichment path.

use std::collections::HashMap;
use std::time::{Duration, Instant};

use tokio::sync::Mutex;

use crate::client::SearchHit;

struct CacheEntry {
    stored_at: Instant,
    hits: Vec<SearchHit>,
}

pub struct RankingCache {
    ttl: Duration,
    entries: Mutex<HashMap<String, CacheEntry>>,
}

impl RankingCache {
    #[must_use]
    pub fn new(ttl: Duration) -> Self {
        Self {
            ttl,
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Cache key for a lookup: `(keyword, kind, blog_id)`.
    #[must_use]
    pub fn key(keyword: &str, kind: &str, blog_id: &str) -> String {
        format!("{keyword}_{kind}_{blog_id}")
    }

    /// Fetch a fresh entry, removing it when stale.
    pub async fn get(&self, key: &str) -> Option<Vec<SearchHit>> {
        let mut entries = self.entries.lock().await;
        match entries.get(key) {
            Some(entry) if entry.stored_at.elapsed() < self.ttl => Some(entry.hits.clone()),
            Some(_) => {
                entries.remove(key);
                None
            }
            None => None,
        }
    }

    pub async fn set(&self, key: String, hits: Vec<SearchHit>) {
        let mut entries = self.entries.lock().await;
        entries.insert(
            key,
            CacheEntry {
                stored_at: Instant::now(),
                hits,
            },
        );
    }

    /// Number of live-or-stale entries currently held.
    pub async fn len(&self) -> usize {
        self.entries.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.entries.lock().await.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(position: u32) -> SearchHit {
        SearchHit {
            title: format!("결과 {position}"),
            link: format!("https://blog.naver.com/someone/{position}"),
            position,
        }
    }

    #[tokio::test]
    async fn fresh_entries_are_returned() {
        let cache = RankingCache::new(Duration::from_secs(300));
        let key = RankingCache::key("맛집", "rank", "blog1");
        cache.set(key.clone(), vec![hit(1), hit(2)]).await;

        let hits = cache.get(&key).await.expect("entry should be fresh");
        assert_eq!(hits.len(), 2);
        assert_eq!(hits[0].position, 1);
    }

    #[tokio::test]
    async fn stale_entries_are_evicted_on_read() {
        let cache = RankingCache::new(Duration::ZERO);
        let key = RankingCache::key("맛집", "rank", "blog1");
        cache.set(key.clone(), vec![hit(1)]).await;

        assert!(cache.get(&key).await.is_none(), "zero TTL is instantly stale");
        assert!(cache.is_empty().await, "stale entry must be removed on read");
    }

    #[tokio::test]
    async fn keys_separate_keyword_kind_and_blog() {
        let cache = RankingCache::new(Duration::from_secs(300));
        cache
            .set(RankingCache::key("맛집", "rank", "blog1"), vec![hit(1)])
            .await;

        assert!(cache
            .get(&RankingCache::key("맛집", "rank", "blog2"))
            .await
            .is_none());
        assert!(cache
            .get(&RankingCache::key("맛집", "traffic", "blog1"))
            .await
            .is_none());
        assert_eq!(cache.len().await, 1);
    }
}
