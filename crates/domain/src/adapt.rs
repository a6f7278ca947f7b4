//! Mapping of provider payloads onto `UnifiedArticle`
//!
//! Every function here is pure apart from the last-resort identifier for
//! payloads that carry nothing to derive one from. Missing or malformed
//! fields fall back to per-field defaults; adaptation never fails.

use time::format_description::well_known::Rfc3339;
use time::macros::format_description;
use time::{Date, OffsetDateTime};
use uuid::Uuid;

use crate::model::{
    GENERAL_CATEGORY, MAX_TAGS, NO_DESCRIPTION, PLACEHOLDER_IMAGE, ProviderArticle, UNKNOWN_AUTHOR,
    UNTITLED, UnifiedArticle, WORDS_PER_MINUTE,
};
use crate::payloads::{
    ContentDocument, PopularMedia, RichTextBlock, SearchDoc, SearchMultimedia, TopStory,
};
use crate::routes::link_for;

/// Host that relative news image paths are served from
pub const NYT_STATIC_BASE: &str = "https://static01.nyt.com/";

/// Top Stories renditions preferred for cards, in order
const PREFERRED_STORY_FORMATS: [&str; 3] =
    ["mediumThreeByTwo210", "mediumThreeByTwo440", "Standard Thumbnail"];

const PREFERRED_POPULAR_FORMATS: [&str; 2] = ["mediumThreeByTwo440", "mediumThreeByTwo210"];

/// Adapt any provider article
pub fn adapt(article: &ProviderArticle) -> UnifiedArticle {
    match article {
        ProviderArticle::TopStory(story) => adapt_top_story(story),
        ProviderArticle::SearchDoc(doc) => adapt_search_doc(doc),
        ProviderArticle::Content(document) => adapt_content_document(document),
    }
}

/// Adapt a Top Stories / Most Popular article
pub fn adapt_top_story(story: &TopStory) -> UnifiedArticle {
    let abstract_text = non_blank(story.abstract_text.as_deref());
    let words = abstract_text.map(word_count).unwrap_or(0);

    let image_url = story_image(story)
        .or_else(|| popular_image(&story.media))
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    let id = non_blank(story.id.as_deref())
        .or_else(|| non_blank(story.uri.as_deref()))
        .or_else(|| non_blank(story.url.as_deref().and_then(last_path_segment)))
        .map(str::to_string)
        .unwrap_or_else(|| {
            synthesize_id(&[
                story.title.as_deref(),
                story.url.as_deref(),
                story.published_date.as_deref(),
            ])
        });

    UnifiedArticle {
        id,
        title: non_blank(story.title.as_deref())
            .unwrap_or(UNTITLED)
            .to_string(),
        description: abstract_text.unwrap_or(NO_DESCRIPTION).to_string(),
        image_url,
        author: author_from_byline(story.byline.as_deref()),
        time: format_publish_date(story.published_date.as_deref()),
        read_time: read_time(words),
        category: category_from(story.section.as_deref()),
        tags: collect_tags([
            (story.des_facet.as_slice(), 2),
            (story.org_facet.as_slice(), 1),
            (story.per_facet.as_slice(), 1),
        ]),
        likes: 0,
        url: non_blank(story.url.as_deref()).map(str::to_string),
    }
}

/// Adapt an Article Search document
pub fn adapt_search_doc(doc: &SearchDoc) -> UnifiedArticle {
    let words = doc.word_count.unwrap_or(0) as usize;
    let title = doc.headline.as_ref().and_then(|h| h.main.as_deref());

    let id = non_blank(doc.id.as_deref())
        .or_else(|| non_blank(doc.uri.as_deref()))
        .map(str::to_string)
        .unwrap_or_else(|| {
            synthesize_id(&[title, doc.web_url.as_deref(), doc.pub_date.as_deref()])
        });

    let keywords: Vec<String> = doc
        .keywords
        .iter()
        .filter_map(|k| k.value.clone())
        .collect();

    UnifiedArticle {
        id,
        title: non_blank(title).unwrap_or(UNTITLED).to_string(),
        description: non_blank(doc.abstract_text.as_deref())
            .or_else(|| non_blank(doc.snippet.as_deref()))
            .or_else(|| non_blank(doc.lead_paragraph.as_deref()))
            .unwrap_or(NO_DESCRIPTION)
            .to_string(),
        image_url: search_image(doc.multimedia.as_ref())
            .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string()),
        author: author_from_byline(doc.byline.as_ref().and_then(|b| b.original.as_deref())),
        time: format_publish_date(doc.pub_date.as_deref()),
        read_time: read_time(words),
        category: category_from(doc.section_name.as_deref()),
        tags: collect_tags([(keywords.as_slice(), MAX_TAGS)]),
        likes: 0,
        url: non_blank(doc.web_url.as_deref()).map(str::to_string),
    }
}

/// Adapt a CMS document
pub fn adapt_content_document(document: &ContentDocument) -> UnifiedArticle {
    let data = &document.data;
    let body = data
        .content
        .iter()
        .map(|block| block.text.as_deref().unwrap_or_default())
        .collect::<Vec<_>>()
        .join(" ");

    let first_text = |blocks: &[RichTextBlock]| -> Option<String> {
        blocks
            .first()
            .and_then(|b| non_blank(b.text.as_deref()))
            .map(str::to_string)
    };

    let image_url = document
        .featured_image_url()
        .filter(|url| is_absolute(url))
        .map(str::to_string)
        .unwrap_or_else(|| PLACEHOLDER_IMAGE.to_string());

    let id = non_blank(document.uid.as_deref())
        .or_else(|| non_blank(Some(document.id.as_str())))
        .map(str::to_string)
        .unwrap_or_else(|| {
            synthesize_id(&[
                data.title.first().and_then(|b| b.text.as_deref()),
                document.first_publication_date.as_deref(),
            ])
        });

    UnifiedArticle {
        id,
        title: first_text(&data.title).unwrap_or_else(|| UNTITLED.to_string()),
        description: first_text(&data.excerpt).unwrap_or_else(|| NO_DESCRIPTION.to_string()),
        image_url,
        author: author_from_byline(data.author.as_deref()),
        time: format_publish_date(document.first_publication_date.as_deref()),
        read_time: read_time(word_count(&body)),
        category: category_from(data.category.as_deref()),
        tags: collect_tags([(data.tags.as_slice(), MAX_TAGS)]),
        likes: 0,
        url: non_blank(data.url.as_deref())
            .map(str::to_string)
            .or_else(|| Some(link_for(document)).filter(|link| link != "/")),
    }
}

/// "{n}min read" for `words` words at `WORDS_PER_MINUTE`, never below one minute
pub fn read_time(words: usize) -> String {
    let minutes = words.div_ceil(WORDS_PER_MINUTE).max(1);
    format!("{}min read", minutes)
}

pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Author name with the leading "By " removed
pub fn author_from_byline(byline: Option<&str>) -> String {
    let Some(byline) = non_blank(byline) else {
        return UNKNOWN_AUTHOR.to_string();
    };

    let name = byline
        .strip_prefix("By")
        .filter(|rest| rest.is_empty() || rest.starts_with(char::is_whitespace))
        .unwrap_or(byline)
        .trim();
    if name.is_empty() {
        UNKNOWN_AUTHOR.to_string()
    } else {
        name.to_string()
    }
}

/// "January 15, 2024" from any of the date shapes the providers send.
///
/// The date is taken in the offset the timestamp carries. Unparseable input
/// is passed through unchanged; a missing date yields an empty string.
pub fn format_publish_date(raw: Option<&str>) -> String {
    let Some(raw) = non_blank(raw) else {
        return String::new();
    };

    match parse_publish_date(raw) {
        Some(date) => long_date(date),
        None => {
            tracing::debug!(raw = %raw, "Unrecognized publish date");
            raw.to_string()
        }
    }
}

/// "January 15, 2024"
pub fn long_date(date: Date) -> String {
    date.format(format_description!(
        "[month repr:long] [day padding:none], [year]"
    ))
    .unwrap_or_else(|_| date.to_string())
}

fn parse_publish_date(raw: &str) -> Option<Date> {
    if let Ok(ts) = OffsetDateTime::parse(raw, &Rfc3339) {
        return Some(ts.date());
    }

    // Search API and CMS timestamps: 2024-01-15T12:00:00+0000
    let compact_offset = format_description!(
        "[year]-[month]-[day]T[hour]:[minute]:[second][offset_hour sign:mandatory][offset_minute]"
    );
    if let Ok(ts) = OffsetDateTime::parse(raw, compact_offset) {
        return Some(ts.date());
    }

    Date::parse(raw, format_description!("[year]-[month]-[day]")).ok()
}

fn category_from(section: Option<&str>) -> String {
    non_blank(section)
        .map(str::to_uppercase)
        .unwrap_or_else(|| GENERAL_CATEGORY.to_string())
}

/// Concatenate capped slices of each facet group, drop blanks and repeats,
/// and cap the result at `MAX_TAGS`
fn collect_tags<'a, const N: usize>(groups: [(&'a [String], usize); N]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(MAX_TAGS);
    for tag in groups
        .into_iter()
        .flat_map(|(values, cap)| values.iter().take(cap))
    {
        let tag = tag.trim();
        if tag.is_empty() || tags.iter().any(|t| t == tag) {
            continue;
        }
        tags.push(tag.to_string());
        if tags.len() == MAX_TAGS {
            break;
        }
    }
    tags
}

fn story_image(story: &TopStory) -> Option<String> {
    let chosen = story
        .multimedia
        .iter()
        .find(|m| {
            m.format
                .as_deref()
                .is_some_and(|f| PREFERRED_STORY_FORMATS.contains(&f))
        })
        .or_else(|| story.multimedia.first())?;

    resolve_image_url(chosen.url.as_deref()?, NYT_STATIC_BASE)
}

fn popular_image(media: &[PopularMedia]) -> Option<String> {
    let renditions: Vec<_> = media.iter().flat_map(|m| m.metadata.iter()).collect();

    let chosen = PREFERRED_POPULAR_FORMATS
        .iter()
        .find_map(|format| {
            renditions
                .iter()
                .find(|r| r.format.as_deref() == Some(*format))
        })
        .or_else(|| renditions.last())?;

    resolve_image_url(chosen.url.as_deref()?, NYT_STATIC_BASE)
}

fn search_image(multimedia: Option<&SearchMultimedia>) -> Option<String> {
    let url = match multimedia? {
        SearchMultimedia::Crops(crops) => crops
            .iter()
            .find(|c| {
                matches!(c.crop_name.as_deref(), Some("default" | "thumbnail"))
                    || c.kind.as_deref() == Some("image")
            })?
            .url
            .as_deref(),
        SearchMultimedia::Bundle(bundle) => [bundle.default.as_ref(), bundle.thumbnail.as_ref()]
            .into_iter()
            .flatten()
            .find_map(|image| non_blank(image.url.as_deref())),
        SearchMultimedia::Unknown(_) => None,
    }?;

    resolve_image_url(url, NYT_STATIC_BASE)
}

/// Absolute URL for an image path, or `None` if the path is blank
pub fn resolve_image_url(url: &str, base: &str) -> Option<String> {
    let url = url.trim();
    if url.is_empty() {
        None
    } else if is_absolute(url) {
        Some(url.to_string())
    } else if let Some(rest) = url.strip_prefix("//") {
        Some(format!("https://{}", rest))
    } else {
        Some(format!("{}{}", base, url.trim_start_matches('/')))
    }
}

fn is_absolute(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}

fn last_path_segment(url: &str) -> Option<&str> {
    url.trim_end_matches('/').rsplit('/').next()
}

/// Stable identifier derived from whatever the payload does carry, so that
/// adapting the same payload twice yields the same id. Only a payload with no
/// usable field at all gets a random one.
fn synthesize_id(parts: &[Option<&str>]) -> String {
    let seed: Vec<&str> = parts.iter().filter_map(|p| non_blank(*p)).collect();
    if seed.is_empty() {
        Uuid::new_v4().to_string()
    } else {
        Uuid::new_v5(&Uuid::NAMESPACE_URL, seed.join("\n").as_bytes()).to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::payloads::{
        ContentData, Headline, ImageField, ImageRef, Keyword, MediaBundle, MediaMetadata,
        SearchCrop, StoryMedia,
    };
    use serde_json::json;

    fn words(n: usize) -> String {
        vec!["word"; n].join(" ")
    }

    fn sample_story() -> TopStory {
        serde_json::from_value(json!({
            "title": "Senate passes budget",
            "abstract": "The Senate passed the budget late on Friday.",
            "url": "https://www.nytimes.com/2024/01/15/us/politics/budget.html",
            "byline": "By Jane Doe",
            "published_date": "2024-01-15T05:00:07-05:00",
            "section": "politics",
            "subsection": "",
            "multimedia": [
                {"url": "https://static01.nyt.com/images/large.jpg", "format": "Super Jumbo"},
                {"url": "images/thumb.jpg", "format": "mediumThreeByTwo210"}
            ],
            "des_facet": ["Budgets", "Senate", "Taxes"],
            "org_facet": ["Senate", "Treasury"],
            "per_facet": ["Doe, John"],
            "uri": "nyt://article/1234"
        }))
        .unwrap()
    }

    fn sample_search_doc() -> SearchDoc {
        serde_json::from_value(json!({
            "_id": "nyt://article/5678",
            "web_url": "https://www.nytimes.com/2024/01/16/world/story.html",
            "snippet": "A snippet",
            "lead_paragraph": "A lead",
            "headline": {"main": "World story"},
            "byline": {"original": "By John Roe"},
            "keywords": [
                {"name": "subject", "value": "Diplomacy"},
                {"name": "glocations", "value": "Paris"},
                {"name": "subject", "value": "Diplomacy"},
                {"name": "persons", "value": "Roe, John"},
                {"name": "subject", "value": "Trade"}
            ],
            "pub_date": "2024-01-16T12:00:00+0000",
            "section_name": "World",
            "word_count": 401,
            "multimedia": [
                {"url": "images/2024/01/16/wide.jpg", "crop_name": "superJumbo", "type": "other"},
                {"url": "/images/2024/01/16/thumb.jpg", "crop_name": "thumbnail", "type": "image"}
            ]
        }))
        .unwrap()
    }

    fn sample_document() -> ContentDocument {
        serde_json::from_value(json!({
            "id": "YabC1",
            "uid": "local-festival",
            "type": "article",
            "tags": ["featured"],
            "first_publication_date": "2024-03-02T09:30:00+0000",
            "data": {
                "title": [{"type": "heading1", "text": "Local festival returns"}],
                "excerpt": [{"type": "paragraph", "text": "Crowds are expected."}],
                "featured_image": {"url": "https://images.prismic.io/repo/festival.jpg"},
                "author": "Sam Lee",
                "category": "culture",
                "tags": ["Music", "Food", "Music", "Art", "Dance"],
                "url": "https://example.com/festival",
                "content": [{"type": "paragraph", "text": words(450)}]
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_adapt_top_story() {
        let article = adapt_top_story(&sample_story());

        assert_eq!(article.id, "nyt://article/1234");
        assert_eq!(article.title, "Senate passes budget");
        assert_eq!(article.author, "Jane Doe");
        assert_eq!(article.time, "January 15, 2024");
        assert_eq!(article.read_time, "1min read");
        assert_eq!(article.category, "POLITICS");
        assert_eq!(article.image_url, "https://static01.nyt.com/images/thumb.jpg");
        assert_eq!(article.tags, vec!["Budgets", "Senate", "Doe, John"]);
        assert_eq!(article.likes, 0);
        assert_eq!(
            article.url.as_deref(),
            Some("https://www.nytimes.com/2024/01/15/us/politics/budget.html")
        );
    }

    #[test]
    fn test_adapt_top_story_falls_back_to_first_multimedia() {
        let mut story = sample_story();
        story.multimedia = vec![StoryMedia {
            url: Some("images/only.jpg".to_string()),
            format: Some("superJumbo".to_string()),
            ..Default::default()
        }];

        let article = adapt_top_story(&story);

        assert_eq!(article.image_url, "https://static01.nyt.com/images/only.jpg");
    }

    #[test]
    fn test_adapt_most_popular_media_metadata() {
        let mut story = sample_story();
        story.multimedia.clear();
        story.media = vec![PopularMedia {
            kind: Some("image".to_string()),
            metadata: vec![
                MediaMetadata {
                    url: Some("https://static01.nyt.com/thumb.jpg".to_string()),
                    format: Some("Standard Thumbnail".to_string()),
                    ..Default::default()
                },
                MediaMetadata {
                    url: Some("https://static01.nyt.com/440.jpg".to_string()),
                    format: Some("mediumThreeByTwo440".to_string()),
                    ..Default::default()
                },
            ],
        }];

        assert_eq!(
            adapt_top_story(&story).image_url,
            "https://static01.nyt.com/440.jpg"
        );
    }

    #[test]
    fn test_byline_example_end_to_end() {
        let story = TopStory {
            byline: Some("By Jane Doe".to_string()),
            abstract_text: Some(words(200)),
            multimedia: vec![],
            ..Default::default()
        };

        let article = adapt_top_story(&story);

        assert_eq!(article.author, "Jane Doe");
        assert_eq!(article.read_time, "1min read");
        assert_eq!(article.image_url, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_missing_images_use_placeholder() {
        let story = TopStory::default();
        assert_eq!(adapt_top_story(&story).image_url, PLACEHOLDER_IMAGE);

        let blank_url = TopStory {
            multimedia: vec![StoryMedia {
                url: Some("  ".to_string()),
                ..Default::default()
            }],
            ..Default::default()
        };
        assert_eq!(adapt_top_story(&blank_url).image_url, PLACEHOLDER_IMAGE);

        let doc = SearchDoc::default();
        assert_eq!(adapt_search_doc(&doc).image_url, PLACEHOLDER_IMAGE);

        let no_crop_match = SearchDoc {
            multimedia: Some(SearchMultimedia::Crops(vec![SearchCrop {
                url: Some("images/x.jpg".to_string()),
                crop_name: Some("superJumbo".to_string()),
                kind: Some("video".to_string()),
                ..Default::default()
            }])),
            ..Default::default()
        };
        assert_eq!(adapt_search_doc(&no_crop_match).image_url, PLACEHOLDER_IMAGE);

        let document = ContentDocument {
            id: "X".to_string(),
            ..Default::default()
        };
        assert_eq!(adapt_content_document(&document).image_url, PLACEHOLDER_IMAGE);

        let empty_image = ContentDocument {
            id: "X".to_string(),
            data: ContentData {
                featured_image: Some(ImageField {
                    url: Some(String::new()),
                    alt: None,
                }),
                ..Default::default()
            },
            ..Default::default()
        };
        assert_eq!(adapt_content_document(&empty_image).image_url, PLACEHOLDER_IMAGE);
    }

    #[test]
    fn test_read_time_formula() {
        for w in [0usize, 1, 199, 200, 201, 399, 400, 401, 1000, 12_345] {
            let expected = w.div_ceil(200).max(1);
            assert_eq!(read_time(w), format!("{}min read", expected), "w = {}", w);
        }
    }

    #[test]
    fn test_adapt_search_doc() {
        let article = adapt_search_doc(&sample_search_doc());

        assert_eq!(article.id, "nyt://article/5678");
        assert_eq!(article.title, "World story");
        assert_eq!(article.description, "A snippet");
        assert_eq!(article.author, "John Roe");
        assert_eq!(article.time, "January 16, 2024");
        assert_eq!(article.read_time, "3min read");
        assert_eq!(article.category, "WORLD");
        assert_eq!(
            article.image_url,
            "https://static01.nyt.com/images/2024/01/16/thumb.jpg"
        );
        // Only the first three keywords are considered, duplicates collapse
        assert_eq!(article.tags, vec!["Diplomacy", "Paris"]);
    }

    #[test]
    fn test_adapt_search_doc_bundle_image() {
        let doc = SearchDoc {
            multimedia: Some(SearchMultimedia::Bundle(MediaBundle {
                default: None,
                thumbnail: Some(ImageRef {
                    url: Some("https://static01.nyt.com/t.jpg".to_string()),
                    ..Default::default()
                }),
                ..Default::default()
            })),
            ..Default::default()
        };

        assert_eq!(adapt_search_doc(&doc).image_url, "https://static01.nyt.com/t.jpg");
    }

    #[test]
    fn test_adapt_search_doc_description_fallbacks() {
        let mut doc = sample_search_doc();
        doc.snippet = None;
        assert_eq!(adapt_search_doc(&doc).description, "A lead");

        doc.lead_paragraph = Some("   ".to_string());
        assert_eq!(adapt_search_doc(&doc).description, NO_DESCRIPTION);
    }

    #[test]
    fn test_adapt_content_document() {
        let article = adapt_content_document(&sample_document());

        assert_eq!(article.id, "local-festival");
        assert_eq!(article.title, "Local festival returns");
        assert_eq!(article.description, "Crowds are expected.");
        assert_eq!(article.author, "Sam Lee");
        assert_eq!(article.time, "March 2, 2024");
        assert_eq!(article.read_time, "3min read");
        assert_eq!(article.category, "CULTURE");
        // Capped to the first three before repeats collapse
        assert_eq!(article.tags, vec!["Music", "Food"]);
        assert_eq!(article.url.as_deref(), Some("https://example.com/festival"));
    }

    #[test]
    fn test_content_url_falls_back_to_site_path() {
        let mut document = sample_document();
        document.data.url = None;
        document.doc_type = "article".to_string();

        let article = adapt_content_document(&document);

        assert_eq!(article.url.as_deref(), Some("/article/local-festival"));
    }

    #[test]
    fn test_defaults_for_empty_payloads() {
        for article in [
            adapt_top_story(&TopStory::default()),
            adapt_search_doc(&SearchDoc::default()),
            adapt_content_document(&ContentDocument::default()),
        ] {
            assert!(!article.id.is_empty());
            assert_eq!(article.title, UNTITLED);
            assert_eq!(article.description, NO_DESCRIPTION);
            assert_eq!(article.author, UNKNOWN_AUTHOR);
            assert_eq!(article.category, GENERAL_CATEGORY);
            assert_eq!(article.read_time, "1min read");
            assert!(article.tags.is_empty());
            assert_eq!(article.url, None);
        }
    }

    #[test]
    fn test_id_fallback_chain() {
        let story = TopStory {
            url: Some("https://www.nytimes.com/2024/01/15/us/slug-here.html".to_string()),
            ..Default::default()
        };
        assert_eq!(adapt_top_story(&story).id, "slug-here.html");

        let untitled = TopStory {
            title: Some("Only a title".to_string()),
            ..Default::default()
        };
        let first = adapt_top_story(&untitled).id;
        assert!(!first.is_empty());
        assert_eq!(first, adapt_top_story(&untitled).id);
    }

    #[test]
    fn test_tags_never_exceed_max() {
        let many: Vec<String> = (0..10).map(|i| format!("tag{}", i)).collect();
        let story = TopStory {
            des_facet: many.clone(),
            org_facet: many.clone(),
            per_facet: many.clone(),
            ..Default::default()
        };
        let doc = SearchDoc {
            keywords: many
                .iter()
                .map(|v| Keyword {
                    name: Some("subject".to_string()),
                    value: Some(v.clone()),
                    rank: None,
                })
                .collect(),
            ..Default::default()
        };
        let document = ContentDocument {
            id: "X".to_string(),
            data: ContentData {
                tags: many.clone(),
                ..Default::default()
            },
            ..Default::default()
        };

        assert!(adapt_top_story(&story).tags.len() <= MAX_TAGS);
        assert!(adapt_search_doc(&doc).tags.len() <= MAX_TAGS);
        assert!(adapt_content_document(&document).tags.len() <= MAX_TAGS);
    }

    #[test]
    fn test_adapters_are_idempotent() {
        let story = sample_story();
        assert_eq!(adapt_top_story(&story), adapt_top_story(&story));

        let doc = sample_search_doc();
        assert_eq!(adapt_search_doc(&doc), adapt_search_doc(&doc));

        let document = sample_document();
        assert_eq!(
            adapt_content_document(&document),
            adapt_content_document(&document)
        );

        let no_ids = SearchDoc {
            headline: Some(Headline {
                main: Some("Untracked".to_string()),
                ..Default::default()
            }),
            ..Default::default()
        };
        assert_eq!(adapt_search_doc(&no_ids), adapt_search_doc(&no_ids));
    }

    #[test]
    fn test_adapt_dispatches_on_variant() {
        let story = sample_story();
        assert_eq!(
            adapt(&ProviderArticle::TopStory(story.clone())),
            adapt_top_story(&story)
        );

        let document = sample_document();
        assert_eq!(
            adapt(&ProviderArticle::Content(document.clone())),
            adapt_content_document(&document)
        );

        let doc = sample_search_doc();
        assert_eq!(
            adapt(&ProviderArticle::SearchDoc(doc.clone())),
            adapt_search_doc(&doc)
        );
    }

    #[test]
    fn test_author_from_byline() {
        assert_eq!(author_from_byline(Some("By Jane Doe")), "Jane Doe");
        assert_eq!(author_from_byline(Some("Jane Doe")), "Jane Doe");
        assert_eq!(author_from_byline(Some("By ")), UNKNOWN_AUTHOR);
        assert_eq!(author_from_byline(Some("Byron Katz")), "Byron Katz");
        assert_eq!(author_from_byline(None), UNKNOWN_AUTHOR);
    }

    #[test]
    fn test_format_publish_date_shapes() {
        assert_eq!(
            format_publish_date(Some("2024-01-15T05:00:07-05:00")),
            "January 15, 2024"
        );
        assert_eq!(
            format_publish_date(Some("2024-07-04T12:00:00+0000")),
            "July 4, 2024"
        );
        assert_eq!(format_publish_date(Some("2024-12-31")), "December 31, 2024");
        assert_eq!(format_publish_date(Some("yesterday")), "yesterday");
        assert_eq!(format_publish_date(None), "");
    }

    #[test]
    fn test_resolve_image_url() {
        assert_eq!(
            resolve_image_url("https://a/b.jpg", NYT_STATIC_BASE).as_deref(),
            Some("https://a/b.jpg")
        );
        assert_eq!(
            resolve_image_url("//cdn/b.jpg", NYT_STATIC_BASE).as_deref(),
            Some("https://cdn/b.jpg")
        );
        assert_eq!(
            resolve_image_url("/images/b.jpg", NYT_STATIC_BASE).as_deref(),
            Some("https://static01.nyt.com/images/b.jpg")
        );
        assert_eq!(resolve_image_url("  ", NYT_STATIC_BASE), None);
    }

    #[test]
    fn test_content_body_word_count_joins_blocks() {
        let document = ContentDocument {
            id: "X".to_string(),
            data: ContentData {
                content: vec![
                    RichTextBlock {
                        kind: None,
                        text: Some(words(150)),
                    },
                    RichTextBlock {
                        kind: None,
                        text: None,
                    },
                    RichTextBlock {
                        kind: None,
                        text: Some(words(100)),
                    },
                ],
                ..Default::default()
            },
            ..Default::default()
        };

        assert_eq!(adapt_content_document(&document).read_time, "2min read");
    }
}
