//! Application use cases / business logic

pub mod featured;
pub mod pages;

pub use featured::{FEATURED_TAG, FeaturedError, FeaturedUseCase};
pub use pages::{PageConfig, PageError, PageService, SearchRequest};
