//! Wiring of configured sources into the page service

use anyhow::{Result, bail};
use newsfront_adapters::{ContentApiClient, NewsApiClient, StubContentSource, StubNewsSource};
use newsfront_domain::usecases::PageService;
use newsfront_domain::{ContentSource, NewsSource, SystemClock};
use secrecy::SecretString;
use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{AppConfig, PLACEHOLDER_API_KEY, PLACEHOLDER_REPOSITORY, env_value, load_secret};

pub type Pages = PageService<dyn NewsSource, dyn ContentSource, SystemClock>;

/// Load configuration and build the page service it describes
pub fn load_pages(config_path: Option<PathBuf>) -> Result<Pages> {
    let config = AppConfig::load(config_path.as_deref())?;
    build_pages(&config)
}

pub fn build_pages(config: &AppConfig) -> Result<Pages> {
    Ok(PageService::new(
        build_news_source(config)?,
        build_content_source(config)?,
        Arc::new(SystemClock),
        config.pages.page_config(),
    ))
}

pub(crate) fn build_news_source(config: &AppConfig) -> Result<Arc<dyn NewsSource>> {
    match config.news.provider.as_str() {
        "nytimes" => {
            let api_key = load_secret(&config.news.api_key_env, PLACEHOLDER_API_KEY);
            Ok(Arc::new(NewsApiClient::with_base_url(
                api_key,
                config.news.base_url.clone(),
                config.news_api_config(),
            )))
        }
        "stub" => Ok(Arc::new(StubNewsSource::sample())),
        other => bail!("Unknown news provider: {} (expected nytimes or stub)", other),
    }
}

pub(crate) fn build_content_source(config: &AppConfig) -> Result<Arc<dyn ContentSource>> {
    match config.content.provider.as_str() {
        "prismic" => {
            let repository = config.content.resolved_repository();
            if repository == PLACEHOLDER_REPOSITORY {
                tracing::warn!(
                    env_var = %config.content.repository_env,
                    "Content repository not configured, CMS sections will be empty"
                );
            }
            let token = env_value(&config.content.access_token_env)
                .map(|t| SecretString::new(t.into()));
            let base_url = config.content.base_url.trim();
            let client = if base_url.is_empty() {
                ContentApiClient::new(&repository, token, config.content_api_config())
            } else {
                ContentApiClient::with_base_url(
                    base_url.to_string(),
                    token,
                    config.content_api_config(),
                )
            };
            Ok(Arc::new(client))
        }
        "stub" => Ok(Arc::new(StubContentSource::sample())),
        other => bail!("Unknown content provider: {} (expected prismic or stub)", other),
    }
}
