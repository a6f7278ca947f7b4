//! Domain models and value objects

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::payloads::{ContentDocument, SearchDoc, TopStory};

/// Local asset shown when an article has no usable image
pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";
pub const UNTITLED: &str = "Untitled";
pub const UNKNOWN_AUTHOR: &str = "Unknown Author";
pub const NO_DESCRIPTION: &str = "No description available.";
pub const GENERAL_CATEGORY: &str = "GENERAL";
/// Upper bound on `UnifiedArticle::tags`
pub const MAX_TAGS: usize = 3;
pub const WORDS_PER_MINUTE: usize = 200;

/// Provider-agnostic article, the only shape the page layer sees
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UnifiedArticle {
    /// Never empty; synthesized when the provider gives no identifier
    pub id: String,
    pub title: String,
    pub description: String,
    /// Absolute URL, or `PLACEHOLDER_IMAGE`
    pub image_url: String,
    pub author: String,
    /// Long-form publish date, e.g. "January 15, 2024"
    pub time: String,
    /// "{n}min read", n >= 1
    pub read_time: String,
    pub category: String,
    /// At most `MAX_TAGS` distinct entries
    pub tags: Vec<String>,
    pub likes: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

/// An upstream article tagged with the provider shape it arrived in
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderArticle {
    TopStory(TopStory),
    SearchDoc(SearchDoc),
    Content(ContentDocument),
}

/// Sort order accepted by the article search endpoint
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum SearchSort {
    #[default]
    Newest,
    Oldest,
    Relevance,
}

impl SearchSort {
    pub fn as_str(&self) -> &'static str {
        match self {
            SearchSort::Newest => "newest",
            SearchSort::Oldest => "oldest",
            SearchSort::Relevance => "relevance",
        }
    }
}

impl fmt::Display for SearchSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SearchSort {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "newest" => Ok(SearchSort::Newest),
            "oldest" => Ok(SearchSort::Oldest),
            "relevance" => Ok(SearchSort::Relevance),
            other => Err(format!("unknown sort order: {}", other)),
        }
    }
}

/// Data for the home page
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HomePage {
    pub featured_articles: Vec<UnifiedArticle>,
    /// Recent CMS featured images for the hero backdrop
    pub hero_images: Vec<String>,
    pub latest_stories: Vec<UnifiedArticle>,
    pub opinion_stories: Vec<UnifiedArticle>,
    pub health_stories: Vec<UnifiedArticle>,
    pub editor_picks: Vec<UnifiedArticle>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breaking_news: Option<UnifiedArticle>,
    /// Sources that failed and were rendered as empty
    pub degraded: Vec<String>,
}

/// Data for a category listing
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryPage {
    pub category: String,
    pub display_name: String,
    pub section: String,
    pub articles: Vec<UnifiedArticle>,
    pub degraded: Vec<String>,
}

/// One page of search results
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchPage {
    pub query: String,
    pub results: Vec<UnifiedArticle>,
    pub total_hits: usize,
    /// 1-based
    pub page: usize,
    pub total_pages: usize,
    pub degraded: Vec<String>,
}

/// Most viewed articles over a trailing period
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopularPage {
    /// Trailing window in days
    pub period: u32,
    pub articles: Vec<UnifiedArticle>,
    pub degraded: Vec<String>,
}

/// Where an article page's content came from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArticleOrigin {
    Content,
    News,
    NotFound,
    Error,
}

/// Data for an article detail page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ArticlePage {
    pub article: UnifiedArticle,
    pub origin: ArticleOrigin,
    pub degraded: Vec<String>,
}
