//! Port definitions (traits) for external dependencies
//!
//! These traits define the boundaries between the domain and the two upstream
//! providers. Adapters implement them against the real HTTP APIs; tests use
//! in-process fakes.

use async_trait::async_trait;
use thiserror::Error;
use time::OffsetDateTime;

use crate::model::SearchSort;
use crate::payloads::{ContentDocument, SearchEnvelope, TopStory};
use crate::routes::article_id_from_url;
use crate::sections::{filter_stories, section_for_query};

/// Error type for news API operations
#[derive(Debug, Error)]
pub enum NewsApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout")]
    Timeout,
    #[error("Rate limited")]
    RateLimited,
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

/// Port for the news provider (top stories, most popular, article search)
#[async_trait]
pub trait NewsSource: Send + Sync {
    /// Curated current articles for a named section
    async fn top_stories(&self, section: &str) -> Result<Vec<TopStory>, NewsApiError>;

    /// Most viewed articles over the trailing `period` days
    async fn most_popular(&self, period: u32) -> Result<Vec<TopStory>, NewsApiError>;

    /// Full-text article search
    async fn search(
        &self,
        query: &str,
        page: u32,
        sort: SearchSort,
    ) -> Result<SearchEnvelope, NewsApiError>;

    /// Keyword search over the top stories of the section the query maps to.
    ///
    /// Falls back to the whole section when nothing in it mentions the query.
    async fn search_top_stories(&self, query: &str) -> Result<Vec<TopStory>, NewsApiError> {
        let section = section_for_query(query);
        let stories = self.top_stories(section).await?;
        Ok(filter_stories(stories, query))
    }

    /// Look an article up by its canonical URL
    async fn article_by_url(&self, url: &str) -> Result<Option<TopStory>, NewsApiError> {
        let id = article_id_from_url(url);
        if id.is_empty() {
            return Ok(None);
        }

        let envelope = self
            .search(&format!("_id:{}", id), 0, SearchSort::default())
            .await?;

        Ok(envelope.docs.into_iter().next().map(TopStory::from))
    }
}

/// Error type for content API operations
#[derive(Debug, Error)]
pub enum ContentApiError {
    #[error("Network error: {0}")]
    Network(String),
    #[error("Timeout")]
    Timeout,
    #[error("Authentication failed: {0}")]
    Auth(String),
    #[error("API returned {status}: {body}")]
    Status { status: u16, body: String },
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
    #[error("Repository has no master ref")]
    MissingRef,
}

/// Port for the headless CMS
#[async_trait]
pub trait ContentSource: Send + Sync {
    /// Every document carrying `tag`, across all pages
    async fn all_by_tag(&self, tag: &str) -> Result<Vec<ContentDocument>, ContentApiError>;

    /// Articles in a category, newest first
    async fn by_category(&self, category: &str)
    -> Result<Vec<ContentDocument>, ContentApiError>;

    /// A single article by its UID; `Ok(None)` when it doesn't exist
    async fn by_uid(&self, uid: &str) -> Result<Option<ContentDocument>, ContentApiError>;

    /// Featured articles, newest first, at most `limit`
    async fn featured(&self, limit: usize) -> Result<Vec<ContentDocument>, ContentApiError>;

    /// Featured image URLs of the `count` newest articles.
    ///
    /// Never fails: upstream errors are logged and yield an empty list.
    async fn recent_image_urls(&self, count: usize) -> Vec<String>;
}

/// Port for time/clock operations (enables deterministic testing)
pub trait Clock: Send + Sync {
    /// Get the current time
    fn now(&self) -> OffsetDateTime;
}

/// Real clock implementation
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> OffsetDateTime {
        OffsetDateTime::now_utc()
    }
}
