use super::company::CompanyContext;
use lru::LruCache;
use std::num::NonZeroUsize;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::Mutex;

/// Recently read company pages, keyed by URL. The least recently used entry is evicted once
/// `capacity` is reached and entries older than `ttl` are never returned. A zero capacity
/// disables caching.
#[derive(Clone)]
pub struct ContextCache {
    entries: Option<Arc<Mutex<LruCache<String, (Instant, CompanyContext)>>>>,
    ttl: Duration,
}

impl ContextCache {
    pub fn new(capacity: usize, ttl: Duration) -> Self {
        Self {
            entries: NonZeroUsize::new(capacity)
                .map(|capacity| Arc::new(Mutex::new(LruCache::new(capacity)))),
            ttl,
        }
    }

    pub async fn get(&self, url: &str) -> Option<CompanyContext> {
        let mut entries = self.entries.as_ref()?.lock().await;

        let expired = match entries.get(url) {
            Some((stored_at, context)) if stored_at.elapsed() < self.ttl => {
                return Some(context.clone())
            }
            Some(_) => true,
            None => false,
        };
        if expired {
            tracing::debug!("Cached context for {url} expired");
            entries.pop(url);
        }

        None
    }

    pub async fn insert(&self, context: CompanyContext) {
        let Some(entries) = self.entries.as_ref() else {
            return;
        };

        let key = context.url.to_string();
        let evicted = entries
            .lock()
            .await
            .push(key.clone(), (Instant::now(), context));
        if let Some((evicted_url, _)) = evicted.filter(|(evicted_url, _)| *evicted_url != key) {
            tracing::debug!("Evicted cached context for {evicted_url}");
        }
    }

    pub async fn len(&self) -> usize {
        match self.entries.as_ref() {
            Some(entries) => entries.lock().await.len(),
            None => 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use reqwest::Url;

    fn context(url: &str) -> CompanyContext {
        CompanyContext {
            name: "Acme".to_string(),
            url: Url::parse(url).unwrap(),
            text: format!("text of {url}"),
            links: vec![],
        }
    }

    #[tokio::test]
    async fn returns_cached_context() {
        let cache = ContextCache::new(10, Duration::from_secs(60));
        cache.insert(context("https://acme.com/")).await;

        let cached = cache.get("https://acme.com/").await.unwrap();
        assert_eq!(cached.text, "text of https://acme.com/");
        assert!(cache.get("https://other.com/").await.is_none());
    }

    #[tokio::test]
    async fn evicts_oldest_entry() {
        let cache = ContextCache::new(2, Duration::from_secs(60));
        cache.insert(context("https://a.com/")).await;
        cache.insert(context("https://b.com/")).await;
        cache.insert(context("https://c.com/")).await;

        assert_eq!(cache.len().await, 2);
        assert!(cache.get("https://a.com/").await.is_none());
        assert!(cache.get("https://c.com/").await.is_some());
    }

    #[tokio::test]
    async fn reinserting_refreshes_position() {
        let cache = ContextCache::new(2, Duration::from_secs(60));
        cache.insert(context("https://a.com/")).await;
        cache.insert(context("https://b.com/")).await;
        cache.insert(context("https://a.com/")).await;
        cache.insert(context("https://c.com/")).await;

        assert!(cache.get("https://a.com/").await.is_some());
        assert!(cache.get("https://b.com/").await.is_none());
    }

    #[tokio::test]
    async fn reading_an_entry_keeps_it_alive() {
        let cache = ContextCache::new(2, Duration::from_secs(60));
        cache.insert(context("https://a.com/")).await;
        cache.insert(context("https://b.com/")).await;
        assert!(cache.get("https://a.com/").await.is_some());
        cache.insert(context("https://c.com/")).await;

        assert!(cache.get("https://a.com/").await.is_some());
        assert!(cache.get("https://b.com/").await.is_none());
    }

    #[tokio::test]
    async fn expired_entries_are_dropped() {
        let cache = ContextCache::new(10, Duration::ZERO);
        cache.insert(context("https://acme.com/")).await;

        assert!(cache.get("https://acme.com/").await.is_none());
        assert_eq!(cache.len().await, 0);
    }

    #[tokio::test]
    async fn zero_capacity_disables_caching() {
        let cache = ContextCache::new(0, Duration::from_secs(60));
        cache.insert(context("https://acme.com/")).await;

        assert_eq!(cache.len().await, 0);
    }
}
