//! New York Times API adapter (Top Stories, Most Popular, Article Search)

use async_trait::async_trait;
use newsfront_domain::payloads::{SearchEnvelope, TopStory};
use newsfront_domain::sections::{filter_stories, section_for_query};
use newsfront_domain::{Clock, NewsApiError, NewsSource, SearchSort, SystemClock};
use reqwest::{Client, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::sync::Arc;
use std::time::Duration;

use crate::cache::{DEFAULT_MAX_ENTRIES, TtlCache};
use crate::http::{
    DEFAULT_TIMEOUT, RetryPolicy, Sleeper, TokioSleeper, build_client, error_body,
    send_with_retry,
};

pub const DEFAULT_BASE_URL: &str = "https://api.nytimes.com/svc";

/// Tuning for the news client
#[derive(Debug, Clone)]
pub struct NewsApiConfig {
    pub timeout: Duration,
    /// TTL of top-story and most-popular lists
    pub list_ttl: Duration,
    /// TTL of article search pages
    pub search_ttl: Duration,
    pub max_cache_entries: usize,
    pub retry: RetryPolicy,
}

impl Default for NewsApiConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            list_ttl: Duration::from_secs(2 * 60 * 60),
            search_ttl: Duration::from_secs(5 * 60),
            max_cache_entries: DEFAULT_MAX_ENTRIES,
            retry: RetryPolicy::default(),
        }
    }
}

/// Caching, retrying client for the NYT developer APIs
pub struct NewsApiClient {
    client: Client,
    api_key: SecretString,
    base_url: String,
    config: NewsApiConfig,
    sleeper: Arc<dyn Sleeper>,
    stories: TtlCache<Vec<TopStory>>,
    searches: TtlCache<SearchEnvelope>,
}

impl NewsApiClient {
    pub fn new(api_key: SecretString, config: NewsApiConfig) -> Self {
        Self::with_base_url(api_key, DEFAULT_BASE_URL.to_string(), config)
    }

    pub fn with_base_url(api_key: SecretString, base_url: String, config: NewsApiConfig) -> Self {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        Self {
            client: build_client(config.timeout),
            api_key,
            base_url: base_url.trim_end_matches('/').to_string(),
            stories: TtlCache::new(clock.clone(), config.max_cache_entries),
            searches: TtlCache::new(clock, config.max_cache_entries),
            sleeper: Arc::new(TokioSleeper),
            config,
        }
    }

    /// Use `clock` for cache expiry; drops anything already cached
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.stories = TtlCache::new(clock.clone(), self.config.max_cache_entries);
        self.searches = TtlCache::new(clock, self.config.max_cache_entries);
        self
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    /// Forget every cached response
    pub fn clear_cache(&self) {
        self.stories.clear();
        self.searches.clear();
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        url: &str,
        query: &[(&str, String)],
    ) -> Result<T, NewsApiError> {
        let request = self
            .client
            .get(url)
            .query(&[("api-key", self.api_key.expose_secret())])
            .query(query);

        let response = send_with_retry(request, &self.config.retry, self.sleeper.as_ref())
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    NewsApiError::Timeout
                } else {
                    NewsApiError::Network(e.to_string())
                }
            })?;

        let status = response.status();
        if status == StatusCode::TOO_MANY_REQUESTS {
            return Err(NewsApiError::RateLimited);
        }
        if !status.is_success() {
            return Err(NewsApiError::Status {
                status: status.as_u16(),
                body: error_body(response).await,
            });
        }

        response
            .json()
            .await
            .map_err(|e| NewsApiError::InvalidResponse(e.to_string()))
    }
}

#[derive(Deserialize)]
struct ResultsResponse {
    #[serde(default)]
    results: Option<Vec<TopStory>>,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    response: Option<SearchEnvelope>,
}

#[async_trait]
impl NewsSource for NewsApiClient {
    async fn top_stories(&self, section: &str) -> Result<Vec<TopStory>, NewsApiError> {
        let key = format!("top-stories-{}", section);
        self.stories
            .get_or_try_compute(&key, self.config.list_ttl, || async {
                let url = format!("{}/topstories/v2/{}.json", self.base_url, section);
                let body: ResultsResponse = self.get_json(&url, &[]).await?;
                let stories = body.results.unwrap_or_default();
                tracing::info!(section = %section, count = stories.len(), "Fetched top stories");
                Ok::<_, NewsApiError>(stories)
            })
            .await
    }

    async fn most_popular(&self, period: u32) -> Result<Vec<TopStory>, NewsApiError> {
        let key = format!("most-popular-{}", period);
        self.stories
            .get_or_try_compute(&key, self.config.list_ttl, || async {
                let url = format!("{}/mostpopular/v2/viewed/{}.json", self.base_url, period);
                let body: ResultsResponse = self.get_json(&url, &[]).await?;
                let stories = body.results.unwrap_or_default();
                tracing::info!(period = period, count = stories.len(), "Fetched most popular");
                Ok::<_, NewsApiError>(stories)
            })
            .await
    }

    async fn search(
        &self,
        query: &str,
        page: u32,
        sort: SearchSort,
    ) -> Result<SearchEnvelope, NewsApiError> {
        let key = format!("search-{}-{}-{}", query, page, sort);
        self.searches
            .get_or_try_compute(&key, self.config.search_ttl, || async {
                let url = format!("{}/search/v2/articlesearch.json", self.base_url);
                let params = [
                    ("q", query.to_string()),
                    ("page", page.to_string()),
                    ("sort", sort.to_string()),
                ];
                let body: SearchResponse = self.get_json(&url, &params).await?;
                let envelope = body.response.unwrap_or_else(SearchEnvelope::empty);
                tracing::info!(
                    query = %query,
                    page = page,
                    hits = envelope.meta.hits,
                    "Searched articles"
                );
                Ok::<_, NewsApiError>(envelope)
            })
            .await
    }

    async fn search_top_stories(&self, query: &str) -> Result<Vec<TopStory>, NewsApiError> {
        let key = format!("search-top-stories-{}", query);
        self.stories
            .get_or_try_compute(&key, self.config.list_ttl, || async {
                let section = section_for_query(query);
                tracing::debug!(query = %query, section = %section, "Mapped query to section");
                let stories = self.top_stories(section).await?;
                Ok::<_, NewsApiError>(filter_stories(stories, query))
            })
            .await
    }
}
