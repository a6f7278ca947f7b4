//! Canned sources for development and tests

use async_trait::async_trait;
use newsfront_domain::payloads::{
    ContentData, ContentDocument, Headline, ImageField, RichTextBlock, SearchByline, SearchDoc,
    SearchEnvelope, SearchMeta, StoryMedia, TopStory,
};
use newsfront_domain::{ContentApiError, ContentSource, NewsApiError, NewsSource, SearchSort};
use std::collections::HashMap;

/// News source serving fixed stories per section
pub struct StubNewsSource {
    sections: HashMap<String, Vec<TopStory>>,
    error: Option<String>,
}

impl StubNewsSource {
    /// A few stories in `home`, `opinion`, `health`, `politics` and `science`
    pub fn sample() -> Self {
        let sections = ["home", "opinion", "health", "politics", "science"]
            .into_iter()
            .map(|section| (section.to_string(), sample_stories(section, 8)))
            .collect();
        Self {
            sections,
            error: None,
        }
    }

    pub fn with_sections(sections: HashMap<String, Vec<TopStory>>) -> Self {
        Self {
            sections,
            error: None,
        }
    }

    /// Every call fails with a network error carrying `message`
    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            sections: HashMap::new(),
            error: Some(message.into()),
        }
    }

    fn check(&self) -> Result<(), NewsApiError> {
        match &self.error {
            Some(message) => Err(NewsApiError::Network(message.clone())),
            None => Ok(()),
        }
    }
}

impl Default for StubNewsSource {
    fn default() -> Self {
        Self::sample()
    }
}

#[async_trait]
impl NewsSource for StubNewsSource {
    async fn top_stories(&self, section: &str) -> Result<Vec<TopStory>, NewsApiError> {
        self.check()?;
        Ok(self.sections.get(section).cloned().unwrap_or_default())
    }

    async fn most_popular(&self, _period: u32) -> Result<Vec<TopStory>, NewsApiError> {
        self.check()?;
        let mut all: Vec<TopStory> = self.sections.values().flatten().cloned().collect();
        all.sort_by(|a, b| a.uri.cmp(&b.uri));
        all.truncate(10);
        Ok(all)
    }

    async fn search(
        &self,
        query: &str,
        _page: u32,
        _sort: SearchSort,
    ) -> Result<SearchEnvelope, NewsApiError> {
        self.check()?;

        // `_id:` lookups come from article pages
        let wanted_id = query.strip_prefix("_id:");
        let docs: Vec<SearchDoc> = self
            .sections
            .values()
            .flatten()
            .filter(|story| match wanted_id {
                Some(id) => story.url.as_deref().is_some_and(|url| url.contains(id)),
                None => story
                    .title
                    .as_deref()
                    .is_some_and(|t| t.to_lowercase().contains(&query.to_lowercase())),
            })
            .map(search_doc_for)
            .collect();

        Ok(SearchEnvelope {
            meta: SearchMeta {
                hits: docs.len() as u64,
                offset: 0,
                time: 0,
            },
            docs,
        })
    }
}

/// Content source serving fixed documents
pub struct StubContentSource {
    documents: Vec<ContentDocument>,
    error: Option<String>,
}

impl StubContentSource {
    /// Three articles, one tagged `featured`
    pub fn sample() -> Self {
        Self::with_documents(vec![
            sample_document("welcome-to-newsfront", "Welcome to newsfront", "news", true),
            sample_document("city-budget-explained", "The city budget, explained", "politics", false),
            sample_document("spring-recipes", "Five spring recipes", "food", false),
        ])
    }

    pub fn with_documents(documents: Vec<ContentDocument>) -> Self {
        Self {
            documents,
            error: None,
        }
    }

    pub fn with_error(message: impl Into<String>) -> Self {
        Self {
            documents: Vec::new(),
            error: Some(message.into()),
        }
    }

    fn check(&self) -> Result<(), ContentApiError> {
        match &self.error {
            Some(message) => Err(ContentApiError::Network(message.clone())),
            None => Ok(()),
        }
    }

    fn newest_first(&self) -> Vec<ContentDocument> {
        let mut documents = self.documents.clone();
        documents.sort_by(|a, b| b.first_publication_date.cmp(&a.first_publication_date));
        documents
    }
}

impl Default for StubContentSource {
    fn default() -> Self {
        Self::sample()
    }
}

#[async_trait]
impl ContentSource for StubContentSource {
    async fn all_by_tag(&self, tag: &str) -> Result<Vec<ContentDocument>, ContentApiError> {
        self.check()?;
        Ok(self
            .documents
            .iter()
            .filter(|d| d.tags.iter().any(|t| t == tag))
            .cloned()
            .collect())
    }

    async fn by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ContentDocument>, ContentApiError> {
        self.check()?;
        Ok(self
            .newest_first()
            .into_iter()
            .filter(|d| d.data.category.as_deref() == Some(category))
            .collect())
    }

    async fn by_uid(&self, uid: &str) -> Result<Option<ContentDocument>, ContentApiError> {
        self.check()?;
        Ok(self
            .documents
            .iter()
            .find(|d| d.uid.as_deref() == Some(uid))
            .cloned())
    }

    async fn featured(&self, limit: usize) -> Result<Vec<ContentDocument>, ContentApiError> {
        self.check()?;
        Ok(self
            .newest_first()
            .into_iter()
            .filter(|d| d.tags.iter().any(|t| t == "featured"))
            .take(limit)
            .collect())
    }

    async fn recent_image_urls(&self, count: usize) -> Vec<String> {
        if let Err(e) = self.check() {
            tracing::warn!(error = %e, "Failed to fetch content images");
            return Vec::new();
        }
        self.newest_first()
            .iter()
            .take(count)
            .filter_map(|d| d.featured_image_url().map(str::to_string))
            .filter(|url| !url.is_empty())
            .collect()
    }
}

fn sample_stories(section: &str, count: usize) -> Vec<TopStory> {
    (1..=count)
        .map(|n| TopStory {
            title: Some(format!("{} story {}", capitalize(section), n)),
            abstract_text: Some(format!(
                "Sample {} reporting used when no live news source is configured.",
                section
            )),
            url: Some(format!(
                "https://www.nytimes.com/2024/01/{:02}/{}/sample-{}-{}.html",
                n, section, section, n
            )),
            byline: Some("By Sample Desk".to_string()),
            published_date: Some(format!("2024-01-{:02}T08:00:00-05:00", n)),
            section: Some(section.to_string()),
            multimedia: vec![StoryMedia {
                url: Some(format!("images/sample/{}-{}.jpg", section, n)),
                format: Some("mediumThreeByTwo440".to_string()),
                ..Default::default()
            }],
            des_facet: vec![capitalize(section)],
            uri: Some(format!("nyt://article/sample-{}-{}", section, n)),
            ..Default::default()
        })
        .collect()
}

fn sample_document(uid: &str, title: &str, category: &str, featured: bool) -> ContentDocument {
    let text = |t: &str| RichTextBlock {
        kind: Some("paragraph".to_string()),
        text: Some(t.to_string()),
    };
    ContentDocument {
        id: format!("stub-{}", uid),
        uid: Some(uid.to_string()),
        doc_type: "article".to_string(),
        tags: if featured {
            vec!["featured".to_string()]
        } else {
            vec![]
        },
        first_publication_date: Some("2024-01-10T09:00:00+0000".to_string()),
        last_publication_date: None,
        data: ContentData {
            title: vec![text(title)],
            excerpt: vec![text("A sample article from the content repository.")],
            featured_image: Some(ImageField {
                url: Some(format!("https://images.prismic.io/sample/{}.jpg", uid)),
                alt: None,
            }),
            author: Some("Newsroom".to_string()),
            category: Some(category.to_string()),
            tags: vec![capitalize(category)],
            url: None,
            content: vec![text("Sample body text.")],
        },
    }
}

/// Rebuild a search hit from a story so `_id:` lookups resolve
fn search_doc_for(story: &TopStory) -> SearchDoc {
    SearchDoc {
        id: story.uri.clone(),
        uri: story.uri.clone(),
        web_url: story.url.clone(),
        abstract_text: story.abstract_text.clone(),
        headline: Some(Headline {
            main: story.title.clone(),
            ..Default::default()
        }),
        byline: Some(SearchByline {
            original: story.byline.clone(),
            organization: None,
        }),
        pub_date: story.published_date.clone(),
        section_name: story.section.clone(),
        ..Default::default()
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
