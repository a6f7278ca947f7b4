//! Section lookup tables for the news provider

use crate::payloads::TopStory;

/// Section used when nothing more specific applies
pub const DEFAULT_SECTION: &str = "home";

/// Query keyword to section, checked in order; the first keyword contained in
/// the lower-cased query wins.
///
/// Matching is by substring, so "business" has to precede "us".
pub const SECTION_KEYWORDS: &[(&str, &str)] = &[
    ("politics", "politics"),
    ("election", "politics"),
    ("elections", "politics"),
    ("vote", "politics"),
    ("government", "politics"),
    ("business", "business"),
    ("economy", "business"),
    ("technology", "technology"),
    ("tech", "technology"),
    ("science", "science"),
    ("health", "health"),
    ("medical", "health"),
    ("sports", "sports"),
    ("arts", "arts"),
    ("movies", "movies"),
    ("theater", "theater"),
    ("world", "world"),
    ("international", "world"),
    ("us", "us"),
    ("opinion", "opinion"),
    ("food", "food"),
    ("travel", "travel"),
    ("magazine", "magazine"),
    ("realestate", "realestate"),
    ("fashion", "fashion"),
    ("style", "fashion"),
    ("insider", "insider"),
    ("sundayreview", "sundayreview"),
    ("upshot", "upshot"),
];

/// Category page slug to (section, display name)
pub const CATEGORIES: &[(&str, &str, &str)] = &[
    ("corona-updates", "health", "Corona Updates"),
    ("politics", "politics", "Politics"),
    ("business", "business", "Business"),
    ("sports", "sports", "Sports"),
    ("world", "world", "World"),
    ("travel", "travel", "Travel"),
    ("podcasts", "podcasts", "Podcasts"),
    ("technology", "technology", "Technology"),
    ("science", "science", "Science"),
    ("health", "health", "Health"),
    ("arts", "arts", "Arts"),
];

/// Section whose top stories best answer `query`
pub fn section_for_query(query: &str) -> &'static str {
    let query = query.trim().to_lowercase();
    SECTION_KEYWORDS
        .iter()
        .find(|(keyword, _)| query.contains(keyword))
        .map(|(_, section)| *section)
        .unwrap_or(DEFAULT_SECTION)
}

/// Section backing a category page slug
pub fn section_for_category(slug: &str) -> &'static str {
    CATEGORIES
        .iter()
        .find(|(s, _, _)| *s == slug)
        .map(|(_, section, _)| *section)
        .unwrap_or(DEFAULT_SECTION)
}

/// Human-readable category name; unknown slugs are shown as-is
pub fn category_display_name(slug: &str) -> String {
    CATEGORIES
        .iter()
        .find(|(s, _, _)| *s == slug)
        .map(|(_, _, name)| name.to_string())
        .unwrap_or_else(|| slug.to_string())
}

/// Keep the stories whose title or abstract mention `query`.
///
/// A blank query, or one that matches nothing, returns `stories` unchanged.
pub fn filter_stories(stories: Vec<TopStory>, query: &str) -> Vec<TopStory> {
    let needle = query.trim().to_lowercase();
    if needle.is_empty() {
        return stories;
    }

    let matches: Vec<TopStory> = stories
        .iter()
        .filter(|story| {
            let haystack = format!(
                "{} {}",
                story.title.as_deref().unwrap_or_default(),
                story.abstract_text.as_deref().unwrap_or_default()
            )
            .to_lowercase();
            haystack.contains(&needle)
        })
        .cloned()
        .collect();

    if matches.is_empty() {
        tracing::debug!(query = %query, "No local match, returning whole section");
        stories
    } else {
        matches
    }
}
