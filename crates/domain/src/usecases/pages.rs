//! Page controllers: assemble the data each site page renders
//!
//! Every page is built even when an upstream fails. Failed sources contribute
//! empty lists and are named in the page's `degraded` field.

use std::sync::Arc;

use thiserror::Error;

use crate::adapt::{adapt_content_document, adapt_top_story, long_date};
use crate::model::{
    ArticleOrigin, ArticlePage, CategoryPage, HomePage, PLACEHOLDER_IMAGE, PopularPage, SearchPage,
    UnifiedArticle,
};
use crate::ports::{Clock, ContentApiError, ContentSource, NewsApiError, NewsSource};
use crate::routes::{decode_slug, paginate, resolve_search_query};
use crate::sections::{DEFAULT_SECTION, category_display_name, section_for_category};
use crate::usecases::featured::{FeaturedError, FeaturedUseCase};

/// Sections shown on the home page besides the default one
pub const OPINION_SECTION: &str = "opinion";
pub const HEALTH_SECTION: &str = "health";

/// Why a page section came back empty
#[derive(Debug, Error)]
pub enum PageError {
    #[error(transparent)]
    Featured(#[from] FeaturedError),
    #[error(transparent)]
    News(#[from] NewsApiError),
    #[error(transparent)]
    Content(#[from] ContentApiError),
}

/// Sizes of the page sections
#[derive(Debug, Clone)]
pub struct PageConfig {
    /// Articles in the home page hero
    pub featured_count: usize,
    /// Cards per section preview on the home page
    pub section_preview: usize,
    pub editor_pick_count: usize,
    pub search_page_size: usize,
    /// Most Popular window in days (1, 7 or 30)
    pub popular_period: u32,
    /// CMS images offered to the home page hero
    pub hero_image_count: usize,
}

impl Default for PageConfig {
    fn default() -> Self {
        Self {
            featured_count: 1,
            section_preview: 6,
            editor_pick_count: 2,
            search_page_size: 9,
            popular_period: 7,
            hero_image_count: 10,
        }
    }
}

/// Search page parameters as they arrive from the route
#[derive(Debug, Clone, Default)]
pub struct SearchRequest {
    pub query: Option<String>,
    pub q: Option<String>,
    pub tag: Option<String>,
    /// 1-based; out-of-range values are clamped
    pub page: usize,
}

/// Builds site pages from the two content sources
pub struct PageService<N: ?Sized, C: ?Sized, K: ?Sized> {
    news: Arc<N>,
    content: Arc<C>,
    clock: Arc<K>,
    config: PageConfig,
}

impl<N, C, K> PageService<N, C, K>
where
    N: NewsSource + ?Sized,
    C: ContentSource + ?Sized,
    K: Clock + ?Sized,
{
    pub fn new(news: Arc<N>, content: Arc<C>, clock: Arc<K>, config: PageConfig) -> Self {
        Self {
            news,
            content,
            clock,
            config,
        }
    }

    pub fn config(&self) -> &PageConfig {
        &self.config
    }

    /// Home page: featured hero, hero images, section previews, editor picks,
    /// breaking news
    pub async fn home(&self) -> HomePage {
        let mut degraded = Vec::new();

        // Featured first: it may read the home section, which the join below
        // then gets from the client cache.
        let featured = FeaturedUseCase::new(self.news.as_ref(), self.content.as_ref())
            .combined(self.config.featured_count)
            .await;
        let featured_articles = settle("featured", featured, &mut degraded);

        let (home, opinion, health, hero_images) = futures::join!(
            self.news.top_stories(DEFAULT_SECTION),
            self.news.top_stories(OPINION_SECTION),
            self.news.top_stories(HEALTH_SECTION),
            self.content.recent_image_urls(self.config.hero_image_count),
        );
        let home = settle(DEFAULT_SECTION, home, &mut degraded);
        let opinion = settle(OPINION_SECTION, opinion, &mut degraded);
        let health = settle(HEALTH_SECTION, health, &mut degraded);

        let preview = self.config.section_preview;

        let page = HomePage {
            featured_articles,
            hero_images,
            latest_stories: home.iter().take(preview).map(adapt_top_story).collect(),
            opinion_stories: opinion.iter().take(preview).map(adapt_top_story).collect(),
            health_stories: health.iter().take(preview).map(adapt_top_story).collect(),
            editor_picks: home
                .iter()
                .skip(preview)
                .take(self.config.editor_pick_count)
                .map(adapt_top_story)
                .collect(),
            breaking_news: home.first().map(adapt_top_story),
            degraded,
        };

        tracing::info!(
            featured = page.featured_articles.len(),
            latest = page.latest_stories.len(),
            degraded = ?page.degraded,
            "Built home page"
        );
        page
    }

    /// Category listing: CMS articles in the category, then the section's top stories
    pub async fn category(&self, slug: &str) -> CategoryPage {
        let mut degraded = Vec::new();
        let section = section_for_category(slug);

        let (documents, stories) = futures::join!(
            self.content.by_category(slug),
            self.news.top_stories(section),
        );
        let documents = settle("content", documents, &mut degraded);
        let stories = settle(section, stories, &mut degraded);

        let articles: Vec<UnifiedArticle> = documents
            .iter()
            .map(adapt_content_document)
            .chain(stories.iter().map(adapt_top_story))
            .collect();

        tracing::info!(
            category = %slug,
            section = %section,
            count = articles.len(),
            "Built category page"
        );

        CategoryPage {
            category: slug.to_string(),
            display_name: category_display_name(slug),
            section: section.to_string(),
            articles,
            degraded,
        }
    }

    /// One page of keyword search over the matching section's top stories.
    ///
    /// A blank query renders an empty page without touching the network.
    pub async fn search(&self, request: &SearchRequest) -> SearchPage {
        let query = resolve_search_query(
            request.query.as_deref(),
            request.q.as_deref(),
            request.tag.as_deref(),
        );
        if query.trim().is_empty() {
            return SearchPage {
                page: 1,
                ..Default::default()
            };
        }

        let mut degraded = Vec::new();
        let stories = self.news.search_top_stories(&query).await;
        let stories = settle("search", stories, &mut degraded);

        let all: Vec<UnifiedArticle> = stories.iter().map(adapt_top_story).collect();
        let (results, page, total_pages) =
            paginate(&all, request.page, self.config.search_page_size);

        tracing::info!(
            query = %query,
            hits = all.len(),
            page = page,
            "Built search page"
        );

        SearchPage {
            query,
            results,
            total_hits: all.len(),
            page,
            total_pages,
            degraded,
        }
    }

    /// Most viewed articles over `period` days, or the configured default
    pub async fn popular(&self, period: Option<u32>) -> PopularPage {
        let period = period.unwrap_or(self.config.popular_period);
        let mut degraded = Vec::new();

        let stories = self.news.most_popular(period).await;
        let articles = settle("popular", stories, &mut degraded)
            .iter()
            .map(adapt_top_story)
            .collect();

        PopularPage {
            period,
            articles,
            degraded,
        }
    }

    /// Article detail: CMS document by UID, else news article by URL.
    ///
    /// Never fails; a missing article or a failed lookup renders a
    /// placeholder article instead.
    pub async fn article(&self, slug: &str) -> ArticlePage {
        let mut degraded = Vec::new();

        let document = self.content.by_uid(slug).await;
        if let Some(document) = settle("content", document, &mut degraded) {
            return ArticlePage {
                article: adapt_content_document(&document),
                origin: ArticleOrigin::Content,
                degraded,
            };
        }

        let url = decode_slug(slug);
        let story = self.news.article_by_url(&url).await;
        match settle("news", story, &mut degraded) {
            Some(story) => ArticlePage {
                article: adapt_top_story(&story),
                origin: ArticleOrigin::News,
                degraded,
            },
            None if degraded.is_empty() => {
                tracing::info!(slug = %slug, "Article not found");
                ArticlePage {
                    article: self.placeholder_article(
                        "not-found",
                        "Article not found",
                        "The requested article could not be found.",
                    ),
                    origin: ArticleOrigin::NotFound,
                    degraded,
                }
            }
            None => ArticlePage {
                article: self.placeholder_article(
                    "error",
                    "Error loading article",
                    "There was an error loading this article.",
                ),
                origin: ArticleOrigin::Error,
                degraded,
            },
        }
    }

    fn placeholder_article(&self, id: &str, title: &str, description: &str) -> UnifiedArticle {
        UnifiedArticle {
            id: id.to_string(),
            title: title.to_string(),
            description: description.to_string(),
            image_url: PLACEHOLDER_IMAGE.to_string(),
            author: "Unknown".to_string(),
            time: long_date(self.clock.now().date()),
            read_time: "1min read".to_string(),
            category: "ERROR".to_string(),
            tags: vec![],
            likes: 0,
            url: None,
        }
    }
}

/// Unwrap a source result, or record the source as degraded and use the default
fn settle<T: Default>(
    source: &str,
    result: Result<T, impl Into<PageError>>,
    degraded: &mut Vec<String>,
) -> T {
    match result {
        Ok(value) => value,
        Err(e) => {
            let e: PageError = e.into();
            tracing::warn!(source = %source, error = %e, "Source unavailable, rendering empty");
            degraded.push(source.to_string());
            T::default()
        }
    }
}
