//! Route helpers shared by the page controllers

use crate::payloads::ContentDocument;

/// Pick the search query from the first non-empty of `query`, `q`, `tag`
pub fn resolve_search_query(query: Option<&str>, q: Option<&str>, tag: Option<&str>) -> String {
    [query, q, tag]
        .into_iter()
        .flatten()
        .find(|value| !value.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// Identifier the news search API knows an article by, from its URL
pub fn article_id_from_url(url: &str) -> String {
    let last = url.rsplit('/').next().unwrap_or_default();
    last.replacen(".html", "", 1)
}

/// Percent-decode a route slug, keeping it verbatim if it isn't valid UTF-8
pub fn decode_slug(slug: &str) -> String {
    urlencoding::decode(slug)
        .map(|decoded| decoded.into_owned())
        .unwrap_or_else(|_| slug.to_string())
}

/// Site path for a CMS document
pub fn link_for(document: &ContentDocument) -> String {
    match (document.doc_type.as_str(), document.uid.as_deref()) {
        ("article", Some(uid)) => format!("/article/{}", uid),
        ("category", Some(uid)) => format!("/category/{}", uid),
        _ => "/".to_string(),
    }
}

/// Slice one 1-based page out of `items`.
///
/// Returns the page contents, the clamped page number, and the page count.
pub fn paginate<T: Clone>(items: &[T], page: usize, per_page: usize) -> (Vec<T>, usize, usize) {
    let per_page = per_page.max(1);
    let total_pages = items.len().div_ceil(per_page);
    let page = page.clamp(1, total_pages.max(1));
    let start = (page - 1) * per_page;
    let slice = items.iter().skip(start).take(per_page).cloned().collect();
    (slice, page, total_pages)
}
