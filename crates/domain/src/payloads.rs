//! Upstream payload shapes
//!
//! Each provider's article is declared explicitly: fields the provider always
//! sends are plain values, everything else is `Option` or a lenient list. The
//! news API in particular is inconsistent about empty collections (it sends
//! `null`, `""`, or omits the key), so list fields accept all three.

use serde::{Deserialize, Deserializer, Serialize};

/// Accept a JSON array, or treat `null`, a string, or any other junk as empty
fn lenient_list<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum ListOrJunk<T> {
        List(Vec<T>),
        Junk(serde_json::Value),
    }

    Ok(match Option::<ListOrJunk<T>>::deserialize(deserializer)? {
        Some(ListOrJunk::List(items)) => items,
        Some(ListOrJunk::Junk(_)) | None => Vec::new(),
    })
}

/// Treat an explicit `null` like a missing field
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

// ---------------------------------------------------------------------------
// News API: Top Stories / Most Popular
// ---------------------------------------------------------------------------

/// An article as returned by the Top Stories and Most Popular endpoints
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TopStory {
    pub title: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub url: Option<String>,
    pub byline: Option<String>,
    pub published_date: Option<String>,
    pub section: Option<String>,
    pub subsection: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub multimedia: Vec<StoryMedia>,
    /// Most Popular nests its images one level deeper than Top Stories
    #[serde(default, deserialize_with = "lenient_list")]
    pub media: Vec<PopularMedia>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub des_facet: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub org_facet: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub per_facet: Vec<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub geo_facet: Vec<String>,
    pub uri: Option<String>,
    #[serde(rename = "_id")]
    pub id: Option<String>,
}

/// One rendition of a Top Stories image
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StoryMedia {
    pub url: Option<String>,
    pub format: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub subtype: Option<String>,
    pub caption: Option<String>,
    pub copyright: Option<String>,
}

/// A Most Popular media item, holding several renditions
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PopularMedia {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    #[serde(
        rename = "media-metadata",
        default,
        deserialize_with = "lenient_list"
    )]
    pub metadata: Vec<MediaMetadata>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaMetadata {
    pub url: Option<String>,
    pub format: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

// ---------------------------------------------------------------------------
// News API: Article Search
// ---------------------------------------------------------------------------

/// The `response` object of an Article Search call
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchEnvelope {
    #[serde(default, deserialize_with = "lenient_list")]
    pub docs: Vec<SearchDoc>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub meta: SearchMeta,
}

impl SearchEnvelope {
    /// An envelope with no documents and zeroed metadata
    pub fn empty() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMeta {
    #[serde(default)]
    pub hits: u64,
    #[serde(default)]
    pub offset: u64,
    #[serde(default)]
    pub time: u64,
}

/// A single Article Search document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchDoc {
    #[serde(rename = "_id")]
    pub id: Option<String>,
    pub uri: Option<String>,
    pub web_url: Option<String>,
    #[serde(rename = "abstract")]
    pub abstract_text: Option<String>,
    pub snippet: Option<String>,
    pub lead_paragraph: Option<String>,
    pub headline: Option<Headline>,
    pub byline: Option<SearchByline>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub keywords: Vec<Keyword>,
    pub pub_date: Option<String>,
    pub section_name: Option<String>,
    pub news_desk: Option<String>,
    pub document_type: Option<String>,
    pub word_count: Option<u64>,
    pub multimedia: Option<SearchMultimedia>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Headline {
    pub main: Option<String>,
    pub kicker: Option<String>,
    pub print_headline: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchByline {
    pub original: Option<String>,
    pub organization: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Keyword {
    pub name: Option<String>,
    pub value: Option<String>,
    pub rank: Option<u32>,
}

/// Article Search multimedia, which has shipped in two incompatible shapes
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SearchMultimedia {
    /// Legacy list of crops, each tagged with a `crop_name`
    Crops(Vec<SearchCrop>),
    /// Current object form with named renditions
    Bundle(MediaBundle),
    Unknown(serde_json::Value),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SearchCrop {
    pub url: Option<String>,
    pub crop_name: Option<String>,
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub subtype: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
    pub caption: Option<String>,
    pub credit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MediaBundle {
    pub default: Option<ImageRef>,
    pub thumbnail: Option<ImageRef>,
    pub caption: Option<String>,
    pub credit: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageRef {
    pub url: Option<String>,
    pub height: Option<u32>,
    pub width: Option<u32>,
}

/// Host that relative multimedia paths of a search document hang off
pub const NYT_WEB_BASE: &str = "https://www.nytimes.com/";

fn absolute_on(base: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        url.to_string()
    } else {
        format!("{}{}", base, url.trim_start_matches('/'))
    }
}

impl From<SearchDoc> for TopStory {
    /// Reshape a search hit so it can flow through the top-story adapter
    fn from(doc: SearchDoc) -> Self {
        let multimedia = match doc.multimedia {
            Some(SearchMultimedia::Crops(crops)) => crops
                .into_iter()
                .filter_map(|crop| {
                    let url = crop.url.filter(|u| !u.trim().is_empty())?;
                    Some(StoryMedia {
                        url: Some(absolute_on(NYT_WEB_BASE, &url)),
                        format: crop.kind.clone(),
                        height: crop.height,
                        width: crop.width,
                        kind: crop.kind,
                        subtype: crop.subtype,
                        caption: crop.caption,
                        copyright: crop.credit,
                    })
                })
                .collect(),
            Some(SearchMultimedia::Bundle(bundle)) => [bundle.default, bundle.thumbnail]
                .into_iter()
                .flatten()
                .filter_map(|image| {
                    let url = image.url.filter(|u| !u.trim().is_empty())?;
                    Some(StoryMedia {
                        url: Some(absolute_on(NYT_WEB_BASE, &url)),
                        format: Some("image".to_string()),
                        height: image.height,
                        width: image.width,
                        kind: Some("image".to_string()),
                        subtype: None,
                        caption: bundle.caption.clone(),
                        copyright: bundle.credit.clone(),
                    })
                })
                .collect(),
            Some(SearchMultimedia::Unknown(_)) | None => Vec::new(),
        };

        let facet = |name: &str| -> Vec<String> {
            doc.keywords
                .iter()
                .filter(|k| k.name.as_deref() == Some(name))
                .filter_map(|k| k.value.clone())
                .collect()
        };

        Self {
            title: doc.headline.as_ref().and_then(|h| h.main.clone()),
            abstract_text: doc.abstract_text.clone().or_else(|| doc.snippet.clone()),
            url: doc.web_url.clone(),
            byline: doc.byline.as_ref().and_then(|b| b.original.clone()),
            published_date: doc.pub_date.clone(),
            section: doc.section_name.clone(),
            subsection: doc.news_desk.clone(),
            multimedia,
            media: Vec::new(),
            des_facet: facet("subject"),
            org_facet: facet("organizations"),
            per_facet: facet("persons"),
            geo_facet: facet("glocations"),
            uri: doc.uri.clone(),
            id: doc.id.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// Content API
// ---------------------------------------------------------------------------

/// A document from the headless CMS
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentDocument {
    pub id: String,
    pub uid: Option<String>,
    #[serde(rename = "type", default)]
    pub doc_type: String,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,
    pub first_publication_date: Option<String>,
    pub last_publication_date: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub data: ContentData,
}

/// Custom fields of an `article` document
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ContentData {
    #[serde(default, deserialize_with = "lenient_list")]
    pub title: Vec<RichTextBlock>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub excerpt: Vec<RichTextBlock>,
    pub featured_image: Option<ImageField>,
    pub author: Option<String>,
    pub category: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub tags: Vec<String>,
    pub url: Option<String>,
    #[serde(default, deserialize_with = "lenient_list")]
    pub content: Vec<RichTextBlock>,
}

/// One block of a rich-text field
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RichTextBlock {
    #[serde(rename = "type")]
    pub kind: Option<String>,
    pub text: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ImageField {
    pub url: Option<String>,
    pub alt: Option<String>,
}

impl ContentDocument {
    /// URL of the featured image, if the document has a non-empty one
    pub fn featured_image_url(&self) -> Option<&str> {
        self.data
            .featured_image
            .as_ref()
            .and_then(|image| image.url.as_deref())
            .map(str::trim)
            .filter(|url| !url.is_empty())
    }
}
