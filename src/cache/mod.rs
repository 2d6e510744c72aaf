pub mod blob;
pub mod collect;

use std::sync::Arc;

use async_trait::async_trait;
use chrono::Utc;
use tracing::{info, warn};

use crate::models::error::NewsError;
use crate::models::news::{NewsEnvelope, NewsPayload, NewsResponse, NewsSource, MAX_ARTICLES};

/// One fifth of a day, in milliseconds. A cached payload older than this is
/// considered stale.
pub const FETCH_INTERVAL_MS: i64 = 24 * 60 * 60 * 1000 / 5;

/// Read/write access to the single cached payload.
#[async_trait]
pub trait NewsStore: Send + Sync {
    async fn read(&self) -> Result<Option<NewsPayload>, NewsError>;
    async fn write(&self, payload: &NewsPayload) -> Result<(), NewsError>;
}

/// Upstream news feed.
#[async_trait]
pub trait NewsProvider: Send + Sync {
    async fn fetch_latest(&self) -> Result<NewsEnvelope, NewsError>;
}

/// Decides between serving the cached payload and refreshing it from the
/// provider. Holds no state of its own beyond the interval; the cache lives
/// entirely in the store, which is how concurrent invocations share it.
/// There is no coordination between concurrent refreshers: on a simultaneous
/// miss each one fetches and writes, last writer wins.
pub struct NewsCacheRefresher {
    store: Arc<dyn NewsStore>,
    provider: Arc<dyn NewsProvider>,
    fetch_interval_ms: i64,
}

impl NewsCacheRefresher {
    pub fn new(
        store: Arc<dyn NewsStore>,
        provider: Arc<dyn NewsProvider>,
        fetch_interval_ms: i64,
    ) -> Self {
        Self {
            store,
            provider,
            fetch_interval_ms,
        }
    }

    /// Returns the cached payload if it is fresh enough, otherwise fetches
    /// from the provider, persists the result and returns it. `force` skips
    /// the freshness check entirely.
    ///
    /// Cache-read failures degrade to a cache miss. A store write failure
    /// after a successful fetch fails the whole call and discards the
    /// fetched payload.
    pub async fn get_or_refresh(&self, force: bool) -> Result<NewsResponse, NewsError> {
        let cached = match self.store.read().await {
            Ok(cached) => cached,
            Err(err) => {
                warn!("cache read failed, treating cache as empty: {err}");
                None
            }
        };
        let now = Utc::now().timestamp_millis();

        if !force {
            if let Some(cached) = cached {
                if now - cached.last_fetched < self.fetch_interval_ms {
                    return Ok(NewsResponse {
                        payload: cached,
                        source: NewsSource::BlobCache,
                    });
                }
            }
        }

        let envelope = self.provider.fetch_latest().await?;
        let mut articles = match envelope {
            NewsEnvelope {
                success: true,
                result: Some(articles),
            } => articles,
            _ => {
                return Err(NewsError::Upstream(
                    "CollectAPI yanıtı beklenen formatta değil.".to_string(),
                ))
            }
        };
        articles.truncate(MAX_ARTICLES);

        let payload = NewsPayload {
            articles,
            last_fetched: now,
        };
        self.store.write(&payload).await?;
        info!(article_count = payload.articles.len(), "news cache refreshed");

        Ok(NewsResponse {
            payload,
            source: NewsSource::CollectApi,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::news::Article;
    use serde_json::Map;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use tokio::sync::Mutex;

    fn article(i: usize) -> Article {
        Article {
            name: format!("headline {i}"),
            url: format!("https://example.com/{i}"),
            source: "test-wire".to_string(),
            extra: Map::new(),
        }
    }

    fn payload(article_count: usize, last_fetched: i64) -> NewsPayload {
        NewsPayload {
            articles: (0..article_count).map(article).collect(),
            last_fetched,
        }
    }

    struct FakeStore {
        cached: Mutex<Option<NewsPayload>>,
        fail_read: bool,
        fail_write: bool,
        writes: AtomicUsize,
    }

    impl FakeStore {
        fn empty() -> Self {
            Self::with(None)
        }

        fn with(cached: Option<NewsPayload>) -> Self {
            Self {
                cached: Mutex::new(cached),
                fail_read: false,
                fail_write: false,
                writes: AtomicUsize::new(0),
            }
        }

        fn failing_read() -> Self {
            Self {
                fail_read: true,
                ..Self::empty()
            }
        }

        fn failing_write() -> Self {
            Self {
                fail_write: true,
                ..Self::empty()
            }
        }

        fn write_count(&self) -> usize {
            self.writes.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NewsStore for FakeStore {
        async fn read(&self) -> Result<Option<NewsPayload>, NewsError> {
            if self.fail_read {
                return Err(NewsError::Store("list failed".to_string()));
            }
            Ok(self.cached.lock().await.clone())
        }

        async fn write(&self, payload: &NewsPayload) -> Result<(), NewsError> {
            if self.fail_write {
                return Err(NewsError::Store("put failed".to_string()));
            }
            self.writes.fetch_add(1, Ordering::SeqCst);
            *self.cached.lock().await = Some(payload.clone());
            Ok(())
        }
    }

    struct FakeProvider {
        success: bool,
        article_count: usize,
        calls: AtomicUsize,
    }

    impl FakeProvider {
        fn with_articles(article_count: usize) -> Self {
            Self {
                success: true,
                article_count,
                calls: AtomicUsize::new(0),
            }
        }

        fn failing_envelope() -> Self {
            Self {
                success: false,
                ..Self::with_articles(0)
            }
        }

        fn call_count(&self) -> usize {
            self.calls.load(Ordering::SeqCst)
        }
    }

    #[async_trait]
    impl NewsProvider for FakeProvider {
        async fn fetch_latest(&self) -> Result<NewsEnvelope, NewsError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(NewsEnvelope {
                success: self.success,
                result: Some((0..self.article_count).map(article).collect()),
            })
        }
    }

    fn refresher(
        store: Arc<FakeStore>,
        provider: Arc<FakeProvider>,
        interval_ms: i64,
    ) -> NewsCacheRefresher {
        NewsCacheRefresher::new(store, provider, interval_ms)
    }

    #[tokio::test]
    async fn fresh_cache_is_served_without_network() {
        let now = Utc::now().timestamp_millis();
        let cached = payload(3, now - 1000);
        let store = Arc::new(FakeStore::with(Some(cached.clone())));
        let provider = Arc::new(FakeProvider::with_articles(20));

        let result = refresher(store.clone(), provider.clone(), FETCH_INTERVAL_MS)
            .get_or_refresh(false)
            .await
            .unwrap();

        assert_eq!(result.source, NewsSource::BlobCache);
        assert_eq!(result.payload, cached);
        assert_eq!(provider.call_count(), 0);
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn stale_cache_triggers_refresh() {
        // 7 hours old, interval is 4.8 hours
        let now = Utc::now().timestamp_millis();
        let store = Arc::new(FakeStore::with(Some(payload(3, now - 7 * 3600 * 1000))));
        let provider = Arc::new(FakeProvider::with_articles(5));

        let result = refresher(store.clone(), provider.clone(), FETCH_INTERVAL_MS)
            .get_or_refresh(false)
            .await
            .unwrap();

        assert_eq!(result.source, NewsSource::CollectApi);
        assert_eq!(result.payload.articles.len(), 5);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn empty_cache_fetches_and_truncates_to_fifteen() {
        let before = Utc::now().timestamp_millis();
        let store = Arc::new(FakeStore::empty());
        let provider = Arc::new(FakeProvider::with_articles(20));

        let result = refresher(store.clone(), provider, FETCH_INTERVAL_MS)
            .get_or_refresh(false)
            .await
            .unwrap();

        assert_eq!(result.payload.articles.len(), 15);
        assert!(result.payload.last_fetched >= before);
        assert_eq!(store.write_count(), 1);

        let persisted = store.read().await.unwrap().unwrap();
        assert_eq!(persisted, result.payload);
    }

    #[tokio::test]
    async fn force_bypasses_fresh_cache() {
        let now = Utc::now().timestamp_millis();
        let store = Arc::new(FakeStore::with(Some(payload(3, now))));
        let provider = Arc::new(FakeProvider::with_articles(4));

        let result = refresher(store.clone(), provider.clone(), FETCH_INTERVAL_MS)
            .get_or_refresh(true)
            .await
            .unwrap();

        assert_eq!(result.source, NewsSource::CollectApi);
        assert_eq!(provider.call_count(), 1);
        assert_eq!(store.write_count(), 1);
    }

    #[tokio::test]
    async fn read_failure_degrades_to_cache_miss() {
        let store = Arc::new(FakeStore::failing_read());
        let provider = Arc::new(FakeProvider::with_articles(2));

        let result = refresher(store, provider.clone(), FETCH_INTERVAL_MS)
            .get_or_refresh(false)
            .await
            .unwrap();

        assert_eq!(result.source, NewsSource::CollectApi);
        assert_eq!(result.payload.articles.len(), 2);
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn non_success_envelope_fails_without_write() {
        let store = Arc::new(FakeStore::empty());
        let provider = Arc::new(FakeProvider::failing_envelope());

        let err = refresher(store.clone(), provider, FETCH_INTERVAL_MS)
            .get_or_refresh(false)
            .await
            .unwrap_err();

        assert!(matches!(err, NewsError::Upstream(_)));
        assert_eq!(store.write_count(), 0);
    }

    #[tokio::test]
    async fn write_failure_fails_the_whole_refresh() {
        let store = Arc::new(FakeStore::failing_write());
        let provider = Arc::new(FakeProvider::with_articles(3));

        let err = refresher(store, provider, FETCH_INTERVAL_MS)
            .get_or_refresh(false)
            .await
            .unwrap_err();

        assert!(matches!(err, NewsError::Store(_)));
    }

    #[tokio::test]
    async fn synthetic_interval_controls_freshness() {
        let now = Utc::now().timestamp_millis();
        let store = Arc::new(FakeStore::with(Some(payload(1, now - 500))));
        let provider = Arc::new(FakeProvider::with_articles(1));

        // 200ms TTL: a payload 500ms old is already stale
        let result = refresher(store, provider.clone(), 200)
            .get_or_refresh(false)
            .await
            .unwrap();

        assert_eq!(result.source, NewsSource::CollectApi);
        assert_eq!(provider.call_count(), 1);
    }
}
