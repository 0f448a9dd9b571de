//! Quote fetcher
//!
//! The fetch/cache/fallback core. One quote per calendar day, memoized in
//! the store; Bible-endpoint failures substitute the general quote path;
//! `daily_quote` never fails outward and degrades to the fixed fallback
//! quote when everything else is unreachable.

use reqwest::Client;
use serde::Deserialize;
use std::sync::Arc;
use uuid::Uuid;

use super::bible;
use super::cache::QuoteCache;
use super::selector::SourceSelector;
use super::types::{Quote, QuoteSource};
use super::{Clock, QuoteError, QuoteResult, Randomness, SystemClock, ThreadRandomness};
use crate::config::ApiConfig;
use crate::store::Store;

/// Quote retrieval over the two remote APIs
pub struct QuoteFetcher {
    client: Client,
    quote_api_url: String,
    bible_api_url: String,
    cache: QuoteCache,
    selector: SourceSelector,
    rng: Arc<dyn Randomness>,
}

impl QuoteFetcher {
    /// Create a fetcher with the system clock and thread-local RNG
    pub fn new(config: &ApiConfig, store: Arc<Store>) -> Self {
        Self::with_providers(
            config,
            store,
            Arc::new(SystemClock),
            Arc::new(ThreadRandomness),
        )
    }

    /// Create a fetcher with injected clock and randomness providers
    pub fn with_providers(
        config: &ApiConfig,
        store: Arc<Store>,
        clock: Arc<dyn Clock>,
        rng: Arc<dyn Randomness>,
    ) -> Self {
        let client = Client::builder()
            .timeout(std::time::Duration::from_millis(config.request_timeout_ms))
            .build()
            .expect("Failed to create HTTP client");

        let cache = QuoteCache::new(store.clone(), clock);
        let selector = SourceSelector::new(store, cache.clone());

        Self {
            client,
            quote_api_url: config.quote_api_url.clone(),
            bible_api_url: config.bible_api_url.clone(),
            cache,
            selector,
            rng,
        }
    }

    /// The quote cache behind this fetcher
    pub fn cache(&self) -> &QuoteCache {
        &self.cache
    }

    /// The source preference behind this fetcher
    pub fn selector(&self) -> &SourceSelector {
        &self.selector
    }

    /// The quote for the current calendar day.
    ///
    /// Computed and cached on the first call of the day; later same-day
    /// calls return the cached quote without touching the network. Never
    /// fails outward: any internal error yields the fixed fallback quote.
    pub async fn daily_quote(&self) -> Quote {
        match self.daily_quote_inner().await {
            Ok(quote) => quote,
            Err(e) => {
                tracing::warn!("Daily quote fetch failed, using fallback: {}", e);
                Quote::fallback()
            }
        }
    }

    async fn daily_quote_inner(&self) -> QuoteResult<Quote> {
        if let Some(cached) = self.cache.cached_daily() {
            tracing::debug!("Daily quote served from cache: {}", cached.id);
            return Ok(cached);
        }

        let source = self.selector.get();
        tracing::info!("Fetching daily quote (source: {})", source);

        let quote = self.fetch_for_source(source).await?;

        self.cache.store_daily(&quote)?;
        self.cache.remember(&quote);

        Ok(quote)
    }

    /// A fresh quote, independent of the daily slot.
    ///
    /// The result is appended to the recent list. Bible-endpoint failures
    /// still substitute the general path, but a general-path failure
    /// propagates to the caller.
    pub async fn random_quote(&self) -> QuoteResult<Quote> {
        let source = self.selector.get();
        let quote = self.fetch_for_source(source).await?;
        self.cache.remember(&quote);
        Ok(quote)
    }

    /// One random general quote carrying the given tag. Not appended to
    /// the recent list.
    pub async fn quote_by_tag(&self, tag: &str) -> QuoteResult<Quote> {
        let url = format!(
            "{}/random?tags={}",
            self.quote_api_url,
            urlencoding::encode(tag)
        );
        self.fetch_general_from(&url).await
    }

    async fn fetch_for_source(&self, source: QuoteSource) -> QuoteResult<Quote> {
        match source {
            QuoteSource::Bible => self.fetch_bible().await,
            _ => self.fetch_general().await,
        }
    }

    /// Bible path with substitution: any failure here composes a quote from
    /// the general path instead of retrying the Bible endpoint.
    async fn fetch_bible(&self) -> QuoteResult<Quote> {
        match self.fetch_bible_verse().await {
            Ok(quote) => Ok(quote),
            Err(e) => {
                tracing::warn!("Bible verse fetch failed ({}), using general quote", e);
                self.fetch_general().await
            }
        }
    }

    async fn fetch_bible_verse(&self) -> QuoteResult<Quote> {
        let reference = bible::random_reference(self.rng.as_ref());
        let url = format!("{}/{}", self.bible_api_url, reference.request_path());
        tracing::debug!("Fetching Bible verse: {}", url);

        let response = self.client.get(&url).send().await?;
        if !response.status().is_success() {
            return Err(QuoteError::Api {
                status: response.status().as_u16(),
            });
        }

        let payload: BibleVersePayload = response.json().await?;
        let text = payload.text.trim();
        if text.is_empty() {
            return Err(QuoteError::EmptyPayload);
        }

        let verse_ref = payload
            .reference
            .unwrap_or_else(|| reference.display());
        let meaning = bible::meaning_for_verse(&verse_ref);

        Ok(Quote {
            id: format!("bible-{}", Uuid::new_v4()),
            content: text.to_string(),
            author: verse_ref,
            tags: vec!["bible".to_string(), "scripture".to_string()],
            source: QuoteSource::Bible,
            meaning: Some(meaning),
        })
    }

    async fn fetch_general(&self) -> QuoteResult<Quote> {
        let url = format!("{}/random", self.quote_api_url);
        self.fetch_general_from(&url).await
    }

    async fn fetch_general_from(&self, url: &str) -> QuoteResult<Quote> {
        tracing::debug!("Fetching general quote: {}", url);

        let response = self.client.get(url).send().await?;
        if !response.status().is_success() {
            return Err(QuoteError::Api {
                status: response.status().as_u16(),
            });
        }

        let payload: GeneralQuotePayload = response.json().await?;
        Ok(payload.into_quote())
    }
}

// ============================================
// Response DTOs
// ============================================

#[derive(Debug, Deserialize)]
struct GeneralQuotePayload {
    #[serde(rename = "_id", default)]
    id: Option<String>,
    content: String,
    author: String,
    #[serde(default)]
    tags: Vec<String>,
}

impl GeneralQuotePayload {
    fn into_quote(self) -> Quote {
        Quote {
            id: self
                .id
                .unwrap_or_else(|| format!("general-{}", Uuid::new_v4())),
            content: self.content,
            author: self.author,
            tags: self.tags,
            source: QuoteSource::General,
            meaning: None,
        }
    }
}

#[derive(Debug, Deserialize)]
struct BibleVersePayload {
    #[serde(default)]
    text: String,
    reference: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use std::collections::VecDeque;
    use std::sync::Mutex;
    use tempfile::TempDir;

    struct FixedClock(NaiveDate);

    impl Clock for FixedClock {
        fn today(&self) -> NaiveDate {
            self.0
        }
    }

    /// Returns scripted values (modulo the requested bound), then repeats
    /// the last one if the script runs out.
    struct Scripted(Mutex<VecDeque<usize>>);

    impl Scripted {
        fn new(values: &[usize]) -> Self {
            Self(Mutex::new(values.iter().copied().collect()))
        }
    }

    impl Randomness for Scripted {
        fn pick(&self, upper: usize) -> usize {
            let mut script = self.0.lock().unwrap();
            let next = if script.len() > 1 {
                script.pop_front().unwrap()
            } else {
                *script.front().expect("empty script")
            };
            next % upper
        }
    }

    fn fetcher_at(base_url: &str, rng: Arc<dyn Randomness>) -> (TempDir, QuoteFetcher) {
        let dir = TempDir::new().unwrap();
        let store = Arc::new(Store::open(dir.path().join("store.json")).unwrap());
        let config = ApiConfig {
            quote_api_url: base_url.to_string(),
            bible_api_url: base_url.to_string(),
            request_timeout_ms: 2000,
        };
        let clock = Arc::new(FixedClock(NaiveDate::from_ymd_opt(2026, 8, 28).unwrap()));
        let fetcher = QuoteFetcher::with_providers(&config, store, clock, rng);
        (dir, fetcher)
    }

    const GENERAL_BODY: &str =
        r#"{"_id":"gq-1","content":"Stay curious.","author":"Anonymous","tags":["wisdom"]}"#;

    // Scripted picks 8, 2, 15 select John (book index 8), chapter 3, verse 16
    const JOHN_3_16: &[usize] = &[8, 2, 15];

    #[tokio::test]
    async fn test_daily_quote_memoized_for_the_day() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("GET", "/random")
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(GENERAL_BODY)
            .expect(1)
            .create_async()
            .await;

        let (_dir, fetcher) = fetcher_at(&server.url(), Arc::new(Scripted::new(&[0])));
        fetcher.selector().set(QuoteSource::General).unwrap();

        let first = fetcher.daily_quote().await;
        let second = fetcher.daily_quote().await;

        assert_eq!(first.id, "gq-1");
        assert_eq!(first.id, second.id);
        // Exactly one network call: the second was a cache hit
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_daily_quote_appends_to_recent() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/random")
            .with_status(200)
            .with_body(GENERAL_BODY)
            .create_async()
            .await;

        let (_dir, fetcher) = fetcher_at(&server.url(), Arc::new(Scripted::new(&[0])));
        fetcher.selector().set(QuoteSource::General).unwrap();

        let quote = fetcher.daily_quote().await;
        let recent = fetcher.cache().recent();
        assert_eq!(recent.len(), 1);
        assert_eq!(recent[0].id, quote.id);
    }

    #[tokio::test]
    async fn test_bible_verse_success() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/John+3:16")
            .with_status(200)
            .with_body(r#"{"text":"For God so loved the world...\n","reference":"John 3:16"}"#)
            .create_async()
            .await;

        let (_dir, fetcher) = fetcher_at(&server.url(), Arc::new(Scripted::new(JOHN_3_16)));
        let quote = fetcher.random_quote().await.unwrap();

        assert_eq!(quote.source, QuoteSource::Bible);
        assert_eq!(quote.author, "John 3:16");
        assert_eq!(quote.content, "For God so loved the world...");
        assert_eq!(quote.tags, vec!["bible", "scripture"]);
        assert!(quote
            .meaning
            .as_deref()
            .unwrap()
            .starts_with("John reveals the divine nature"));
    }

    #[tokio::test]
    async fn test_bible_verse_without_reference_uses_request_reference() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/John+3:16")
            .with_status(200)
            .with_body(r#"{"text":"For God so loved the world..."}"#)
            .create_async()
            .await;

        let (_dir, fetcher) = fetcher_at(&server.url(), Arc::new(Scripted::new(JOHN_3_16)));
        let quote = fetcher.random_quote().await.unwrap();

        assert_eq!(quote.author, "John 3:16");
    }

    #[tokio::test]
    async fn test_empty_verse_text_substitutes_general_quote() {
        let mut server = mockito::Server::new_async().await;
        let _bible = server
            .mock("GET", "/John+3:16")
            .with_status(200)
            .with_body(r#"{"text":"","reference":"John 3:16"}"#)
            .create_async()
            .await;
        let _general = server
            .mock("GET", "/random")
            .with_status(200)
            .with_body(GENERAL_BODY)
            .create_async()
            .await;

        let (_dir, fetcher) = fetcher_at(&server.url(), Arc::new(Scripted::new(JOHN_3_16)));
        // Source preference stays at the bible default
        let quote = fetcher.random_quote().await.unwrap();

        assert_eq!(quote.source, QuoteSource::General);
        assert_eq!(quote.id, "gq-1");
    }

    #[tokio::test]
    async fn test_bible_error_status_substitutes_general_quote() {
        let mut server = mockito::Server::new_async().await;
        let _bible = server
            .mock("GET", "/John+3:16")
            .with_status(404)
            .create_async()
            .await;
        let _general = server
            .mock("GET", "/random")
            .with_status(200)
            .with_body(GENERAL_BODY)
            .create_async()
            .await;

        let (_dir, fetcher) = fetcher_at(&server.url(), Arc::new(Scripted::new(JOHN_3_16)));
        let quote = fetcher.random_quote().await.unwrap();

        assert_eq!(quote.source, QuoteSource::General);
    }

    #[tokio::test]
    async fn test_general_failure_propagates_from_random_quote() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/random")
            .with_status(500)
            .create_async()
            .await;

        let (_dir, fetcher) = fetcher_at(&server.url(), Arc::new(Scripted::new(&[0])));
        fetcher.selector().set(QuoteSource::General).unwrap();

        let err = fetcher.random_quote().await.unwrap_err();
        assert!(matches!(err, QuoteError::Api { status: 500 }));
        // Nothing was appended on failure
        assert!(fetcher.cache().recent().is_empty());
    }

    #[tokio::test]
    async fn test_daily_quote_falls_back_when_unreachable() {
        // Nothing listens here; both paths fail with a connect error
        let (_dir, fetcher) = fetcher_at("http://127.0.0.1:1", Arc::new(Scripted::new(&[0])));

        let quote = fetcher.daily_quote().await;
        assert_eq!(quote.source, QuoteSource::Fallback);
        assert_eq!(quote.author, "Chinese Proverb");
    }

    #[tokio::test]
    async fn test_source_change_refetches_same_day() {
        let mut server = mockito::Server::new_async().await;
        let _general = server
            .mock("GET", "/random")
            .with_status(200)
            .with_body(GENERAL_BODY)
            .create_async()
            .await;
        let _bible = server
            .mock("GET", "/John+3:16")
            .with_status(200)
            .with_body(r#"{"text":"For God so loved the world...","reference":"John 3:16"}"#)
            .create_async()
            .await;

        let (_dir, fetcher) = fetcher_at(&server.url(), Arc::new(Scripted::new(JOHN_3_16)));
        fetcher.selector().set(QuoteSource::General).unwrap();

        let first = fetcher.daily_quote().await;
        assert_eq!(first.source, QuoteSource::General);

        // Switching the source clears today's slot; the next call fetches fresh
        fetcher.selector().set(QuoteSource::Bible).unwrap();
        let second = fetcher.daily_quote().await;
        assert_eq!(second.source, QuoteSource::Bible);
        assert_ne!(first.id, second.id);
    }

    #[tokio::test]
    async fn test_quote_by_tag_encodes_and_skips_recent() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/random")
            .match_query(mockito::Matcher::UrlEncoded(
                "tags".into(),
                "self care".into(),
            ))
            .with_status(200)
            .with_body(GENERAL_BODY)
            .create_async()
            .await;

        let (_dir, fetcher) = fetcher_at(&server.url(), Arc::new(Scripted::new(&[0])));
        let quote = fetcher.quote_by_tag("self care").await.unwrap();

        assert_eq!(quote.source, QuoteSource::General);
        assert!(fetcher.cache().recent().is_empty());
    }

    #[tokio::test]
    async fn test_general_payload_without_id_gets_local_id() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("GET", "/random")
            .with_status(200)
            .with_body(r#"{"content":"Less is more.","author":"Ludwig Mies van der Rohe"}"#)
            .create_async()
            .await;

        let (_dir, fetcher) = fetcher_at(&server.url(), Arc::new(Scripted::new(&[0])));
        fetcher.selector().set(QuoteSource::General).unwrap();

        let quote = fetcher.random_quote().await.unwrap();
        assert!(quote.id.starts_with("general-"));
        assert!(quote.tags.is_empty());
    }
}
