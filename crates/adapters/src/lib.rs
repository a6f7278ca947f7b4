//! newsfront adapters crate
//!
//! This crate contains infrastructure adapters implementing the domain ports:
//! - `http`: Client construction and fetch-with-retry
//! - `cache`: TTL cache used by the news client
//! - `news_api`: New York Times API client
//! - `content_api`: Prismic content API client
//! - `stub`: Canned sources for development and tests

pub mod cache;
pub mod content_api;
pub mod http;
pub mod news_api;
pub mod stub;

pub use cache::TtlCache;
pub use content_api::{ContentApiClient, ContentApiConfig};
pub use http::{RetryPolicy, Sleeper, TokioSleeper};
pub use news_api::{NewsApiClient, NewsApiConfig};
pub use stub::{StubContentSource, StubNewsSource};
