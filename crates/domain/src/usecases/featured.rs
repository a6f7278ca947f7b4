//! Featured list mixing CMS and news articles

use rand::seq::SliceRandom;
use thiserror::Error;

use crate::adapt::{adapt_content_document, adapt_top_story};
use crate::model::UnifiedArticle;
use crate::ports::{ContentApiError, ContentSource, NewsApiError, NewsSource};
use crate::sections::DEFAULT_SECTION;

/// CMS tag marking editorially featured documents
pub const FEATURED_TAG: &str = "featured";

#[derive(Debug, Error)]
pub enum FeaturedError {
    #[error("Content API: {0}")]
    Content(#[from] ContentApiError),
    #[error("News API: {0}")]
    News(#[from] NewsApiError),
}

/// Use case assembling the featured list for the home page
pub struct FeaturedUseCase<'a, N: ?Sized, C: ?Sized> {
    news: &'a N,
    content: &'a C,
}

impl<'a, N, C> FeaturedUseCase<'a, N, C>
where
    N: NewsSource + ?Sized,
    C: ContentSource + ?Sized,
{
    pub fn new(news: &'a N, content: &'a C) -> Self {
        Self { news, content }
    }

    /// Featured CMS documents topped up with home-section top stories,
    /// shuffled, and cut to `count`.
    ///
    /// The order is deliberately random so neither provider always leads.
    pub async fn combined(&self, count: usize) -> Result<Vec<UnifiedArticle>, FeaturedError> {
        let documents = self.content.all_by_tag(FEATURED_TAG).await?;
        let mut articles: Vec<UnifiedArticle> =
            documents.iter().map(adapt_content_document).collect();

        let remaining = count.saturating_sub(articles.len());
        if remaining > 0 {
            let stories = self.news.top_stories(DEFAULT_SECTION).await?;
            articles.extend(stories.iter().take(remaining).map(adapt_top_story));
        }

        tracing::debug!(
            cms = documents.len(),
            total = articles.len(),
            requested = count,
            "Combined featured articles"
        );

        articles.shuffle(&mut rand::rng());
        articles.truncate(count);
        Ok(articles)
    }
}
