//! Prismic content API adapter

use async_trait::async_trait;
use newsfront_domain::payloads::ContentDocument;
use newsfront_domain::{ContentApiError, ContentSource};
use reqwest::{Client, Response, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use std::sync::Arc;
use std::time::Duration;

use crate::http::{
    DEFAULT_TIMEOUT, RetryPolicy, Sleeper, TokioSleeper, build_client, error_body,
    send_with_retry,
};

/// Largest page the documents endpoint serves
pub const MAX_PAGE_SIZE: usize = 100;

const NEWEST_FIRST: &str = "[document.first_publication_date desc]";

/// Content API base for a repository name
pub fn repository_url(repository: &str) -> String {
    format!("https://{}.cdn.prismic.io", repository)
}

#[derive(Debug, Clone)]
pub struct ContentApiConfig {
    pub timeout: Duration,
    pub retry: RetryPolicy,
}

impl Default for ContentApiConfig {
    fn default() -> Self {
        Self {
            timeout: DEFAULT_TIMEOUT,
            retry: RetryPolicy::default(),
        }
    }
}

/// Document query: predicates, ordering and paging
#[derive(Debug, Clone, Default)]
struct DocumentQuery {
    predicates: Vec<String>,
    orderings: Option<&'static str>,
    page_size: usize,
}

impl DocumentQuery {
    fn new() -> Self {
        Self {
            page_size: MAX_PAGE_SIZE,
            ..Default::default()
        }
    }

    /// `[[at(path, value)]]` with `value` JSON-encoded
    fn at(mut self, path: &str, value: serde_json::Value) -> Self {
        self.predicates.push(format!("[[at({}, {})]]", path, value));
        self
    }

    fn articles(self) -> Self {
        self.at("document.type", serde_json::json!("article"))
    }

    fn newest_first(mut self) -> Self {
        self.orderings = Some(NEWEST_FIRST);
        self
    }

    fn page_size(mut self, size: usize) -> Self {
        self.page_size = size.clamp(1, MAX_PAGE_SIZE);
        self
    }
}

/// Client for a Prismic repository's REST API
pub struct ContentApiClient {
    client: Client,
    access_token: Option<SecretString>,
    base_url: String,
    config: ContentApiConfig,
    sleeper: Arc<dyn Sleeper>,
}

impl ContentApiClient {
    pub fn new(
        repository: &str,
        access_token: Option<SecretString>,
        config: ContentApiConfig,
    ) -> Self {
        Self::with_base_url(repository_url(repository), access_token, config)
    }

    pub fn with_base_url(
        base_url: String,
        access_token: Option<SecretString>,
        config: ContentApiConfig,
    ) -> Self {
        Self {
            client: build_client(config.timeout),
            access_token,
            base_url: base_url.trim_end_matches('/').to_string(),
            config,
            sleeper: Arc::new(TokioSleeper),
        }
    }

    pub fn with_sleeper(mut self, sleeper: Arc<dyn Sleeper>) -> Self {
        self.sleeper = sleeper;
        self
    }

    async fn get(&self, url: &str, query: &[(&str, String)]) -> Result<Response, ContentApiError> {
        let mut request = self.client.get(url).query(query);
        if let Some(token) = &self.access_token {
            request = request.header(
                "Authorization",
                format!("Bearer {}", token.expose_secret()),
            );
        }

        let response = send_with_retry(request, &self.config.retry, self.sleeper.as_ref())
            .await
            .map_err(|e| {
                if e.is_timeout() {
                    ContentApiError::Timeout
                } else {
                    ContentApiError::Network(e.to_string())
                }
            })?;

        match response.status() {
            status if status.is_success() => Ok(response),
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                Err(ContentApiError::Auth(error_body(response).await))
            }
            status => Err(ContentApiError::Status {
                status: status.as_u16(),
                body: error_body(response).await,
            }),
        }
    }

    /// Current master ref; every document query is pinned to it
    async fn master_ref(&self) -> Result<String, ContentApiError> {
        let url = format!("{}/api/v2", self.base_url);
        let root: ApiRoot = self
            .get(&url, &[])
            .await?
            .json()
            .await
            .map_err(|e| ContentApiError::InvalidResponse(e.to_string()))?;

        root.refs
            .into_iter()
            .find(|r| r.is_master_ref)
            .map(|r| r.reference)
            .ok_or(ContentApiError::MissingRef)
    }

    async fn fetch_page(
        &self,
        reference: &str,
        query: &DocumentQuery,
        page: u32,
    ) -> Result<SearchResponse, ContentApiError> {
        let url = format!("{}/api/v2/documents/search", self.base_url);

        let mut params: Vec<(&str, String)> = vec![("ref", reference.to_string())];
        params.extend(query.predicates.iter().map(|p| ("q", p.clone())));
        if let Some(orderings) = query.orderings {
            params.push(("orderings", orderings.to_string()));
        }
        params.push(("pageSize", query.page_size.to_string()));
        params.push(("page", page.to_string()));

        self.get(&url, &params)
            .await?
            .json()
            .await
            .map_err(|e| ContentApiError::InvalidResponse(e.to_string()))
    }

    /// First page of `query`
    async fn query_first(
        &self,
        query: &DocumentQuery,
    ) -> Result<Vec<ContentDocument>, ContentApiError> {
        let reference = self.master_ref().await?;
        Ok(self.fetch_page(&reference, query, 1).await?.results)
    }

    /// Every page of `query`, concatenated
    async fn query_all(
        &self,
        query: &DocumentQuery,
    ) -> Result<Vec<ContentDocument>, ContentApiError> {
        let reference = self.master_ref().await?;
        let mut documents = Vec::new();
        let mut page = 1;

        loop {
            let response = self.fetch_page(&reference, query, page).await?;
            documents.extend(response.results);
            if page >= response.total_pages {
                break;
            }
            page += 1;
        }

        Ok(documents)
    }
}

#[derive(Deserialize)]
struct ApiRoot {
    #[serde(default)]
    refs: Vec<RefEntry>,
}

#[derive(Deserialize)]
struct RefEntry {
    #[serde(rename = "ref")]
    reference: String,
    #[serde(rename = "isMasterRef", default)]
    is_master_ref: bool,
}

#[derive(Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Vec<ContentDocument>,
    #[serde(default)]
    total_pages: u32,
}

#[async_trait]
impl ContentSource for ContentApiClient {
    async fn all_by_tag(&self, tag: &str) -> Result<Vec<ContentDocument>, ContentApiError> {
        let query = DocumentQuery::new().at("document.tags", serde_json::json!([tag]));
        let documents = self.query_all(&query).await?;
        tracing::info!(tag = %tag, count = documents.len(), "Fetched tagged documents");
        Ok(documents)
    }

    async fn by_category(
        &self,
        category: &str,
    ) -> Result<Vec<ContentDocument>, ContentApiError> {
        let query = DocumentQuery::new()
            .articles()
            .at("my.article.category", serde_json::json!(category))
            .newest_first();
        let documents = self.query_all(&query).await?;
        tracing::info!(
            category = %category,
            count = documents.len(),
            "Fetched category documents"
        );
        Ok(documents)
    }

    async fn by_uid(&self, uid: &str) -> Result<Option<ContentDocument>, ContentApiError> {
        let query = DocumentQuery::new()
            .articles()
            .at("my.article.uid", serde_json::json!(uid))
            .page_size(1);
        let document = self.query_first(&query).await?.into_iter().next();
        tracing::debug!(uid = %uid, found = document.is_some(), "Looked up document");
        Ok(document)
    }

    async fn featured(&self, limit: usize) -> Result<Vec<ContentDocument>, ContentApiError> {
        if limit == 0 {
            return Ok(Vec::new());
        }
        let query = DocumentQuery::new()
            .articles()
            .at("document.tags", serde_json::json!(["featured"]))
            .newest_first()
            .page_size(limit);
        let mut documents = self.query_first(&query).await?;
        documents.truncate(limit);
        Ok(documents)
    }

    async fn recent_image_urls(&self, count: usize) -> Vec<String> {
        if count == 0 {
            return Vec::new();
        }
        let query = DocumentQuery::new()
            .articles()
            .newest_first()
            .page_size(count);

        match self.query_first(&query).await {
            Ok(documents) => documents
                .iter()
                .filter_map(|d| d.featured_image_url())
                .filter(|url| !url.trim().is_empty())
                .map(str::to_string)
                .collect(),
            Err(e) => {
                tracing::warn!(
                    error = %e,
                    base_url = %self.base_url,
                    has_token = self.access_token.is_some(),
                    "Failed to fetch content images"
                );
                Vec::new()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::http::testing::RecordingSleeper;
    use serde_json::json;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn mount_root(server: &MockServer) {
        Mock::given(method("GET"))
            .and(path("/api/v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "refs": [
                    {"id": "preview", "ref": "preview-ref", "isMasterRef": false},
                    {"id": "master", "ref": "master-ref", "isMasterRef": true}
                ]
            })))
            .mount(server)
            .await;
    }

    fn doc(uid: &str, image: Option<&str>) -> serde_json::Value {
        json!({
            "id": format!("id-{}", uid),
            "uid": uid,
            "type": "article",
            "tags": ["featured"],
            "first_publication_date": "2024-01-15T10:00:00+0000",
            "data": {
                "title": [{"type": "heading1", "text": format!("Title {}", uid)}],
                "featured_image": image.map(|url| json!({"url": url, "alt": null}))
            }
        })
    }

    fn client(server: &MockServer, token: Option<&str>) -> ContentApiClient {
        ContentApiClient::with_base_url(
            server.uri(),
            token.map(|t| SecretString::new(t.into())),
            ContentApiConfig::default(),
        )
        .with_sleeper(Arc::new(RecordingSleeper::default()))
    }

    #[test]
    fn test_repository_url() {
        assert_eq!(repository_url("my-news"), "https://my-news.cdn.prismic.io");
    }

    #[test]
    fn test_predicates_are_json_quoted() {
        let query = DocumentQuery::new()
            .articles()
            .at("my.article.uid", json!("say \"hi\""));
        assert_eq!(
            query.predicates,
            vec![
                r#"[[at(document.type, "article")]]"#.to_string(),
                r#"[[at(my.article.uid, "say \"hi\"")]]"#.to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_all_by_tag_walks_every_page() {
        let mock_server = MockServer::start().await;
        mount_root(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("ref", "master-ref"))
            .and(query_param("q", r#"[[at(document.tags, ["featured"])]]"#))
            .and(query_param("page", "1"))
            .and(header("Authorization", "Bearer cms-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 1,
                "total_pages": 2,
                "results": [doc("a", None), doc("b", None)]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("page", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "page": 2,
                "total_pages": 2,
                "results": [doc("c", None)]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let documents = client(&mock_server, Some("cms-token"))
            .all_by_tag("featured")
            .await
            .unwrap();

        let uids: Vec<_> = documents.iter().filter_map(|d| d.uid.as_deref()).collect();
        assert_eq!(uids, vec!["a", "b", "c"]);
    }

    #[tokio::test]
    async fn test_by_category_orders_newest_first() {
        let mock_server = MockServer::start().await;
        mount_root(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("q", r#"[[at(document.type, "article")]]"#))
            .and(query_param("q", r#"[[at(my.article.category, "politics")]]"#))
            .and(query_param("orderings", NEWEST_FIRST))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_pages": 1,
                "results": [doc("senate", None)]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let documents = client(&mock_server, None)
            .by_category("politics")
            .await
            .unwrap();

        assert_eq!(documents.len(), 1);
    }

    #[tokio::test]
    async fn test_by_uid_absent_is_none() {
        let mock_server = MockServer::start().await;
        mount_root(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("q", r#"[[at(my.article.uid, "nope")]]"#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_pages": 0,
                "results": []
            })))
            .mount(&mock_server)
            .await;

        let document = client(&mock_server, None).by_uid("nope").await.unwrap();

        assert!(document.is_none());
    }

    #[tokio::test]
    async fn test_featured_respects_limit() {
        let mock_server = MockServer::start().await;
        mount_root(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .and(query_param("pageSize", "2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_pages": 3,
                "results": [doc("a", None), doc("b", None)]
            })))
            .expect(1)
            .mount(&mock_server)
            .await;

        let documents = client(&mock_server, None).featured(2).await.unwrap();

        assert_eq!(documents.len(), 2);
    }

    #[tokio::test]
    async fn test_recent_image_urls_skips_missing_images() {
        let mock_server = MockServer::start().await;
        mount_root(&mock_server).await;

        Mock::given(method("GET"))
            .and(path("/api/v2/documents/search"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "total_pages": 1,
                "results": [
                    doc("a", Some("https://images.prismic.io/a.jpg")),
                    doc("b", None),
                    doc("c", Some(""))
                ]
            })))
            .mount(&mock_server)
            .await;

        let urls = client(&mock_server, None).recent_image_urls(10).await;

        assert_eq!(urls, vec!["https://images.prismic.io/a.jpg"]);
    }

    #[tokio::test]
    async fn test_recent_image_urls_swallows_errors() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(500))
            .mount(&mock_server)
            .await;

        let urls = client(&mock_server, None).recent_image_urls(10).await;

        assert!(urls.is_empty());
    }

    #[tokio::test]
    async fn test_missing_master_ref() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"refs": []})))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server, None).all_by_tag("featured").await;

        assert!(matches!(result, Err(ContentApiError::MissingRef)));
    }

    #[tokio::test]
    async fn test_bad_token_is_auth_error() {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v2"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid access token"))
            .mount(&mock_server)
            .await;

        let result = client(&mock_server, Some("wrong")).by_uid("x").await;

        assert!(matches!(result, Err(ContentApiError::Auth(_))));
    }
}
