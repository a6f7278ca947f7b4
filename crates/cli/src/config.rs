//! Configuration loading and management

use anyhow::{Context, Result};
use newsfront_adapters::{ContentApiConfig, NewsApiConfig, RetryPolicy};
use newsfront_domain::usecases::PageConfig;
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Stand-in news API key that lets requests go out and fail upstream
pub const PLACEHOLDER_API_KEY: &str = "your-api-key";
/// Stand-in CMS repository name
pub const PLACEHOLDER_REPOSITORY: &str = "your-repo-name";

/// Top-level configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub news: NewsConfig,

    #[serde(default)]
    pub content: ContentConfig,

    #[serde(default)]
    pub cache: CacheConfig,

    #[serde(default)]
    pub retry: RetryConfig,

    #[serde(default)]
    pub pages: PagesConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewsConfig {
    /// nytimes or stub
    #[serde(default = "default_news_provider")]
    pub provider: String,

    #[serde(default = "default_news_base_url")]
    pub base_url: String,

    #[serde(default = "default_news_api_key_env")]
    pub api_key_env: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContentConfig {
    /// prismic or stub
    #[serde(default = "default_content_provider")]
    pub provider: String,

    /// Repository name; the env var named by `repository_env` wins when set
    #[serde(default = "default_repository")]
    pub repository: String,

    #[serde(default = "default_repository_env")]
    pub repository_env: String,

    #[serde(default = "default_access_token_env")]
    pub access_token_env: String,

    /// Overrides the repository's CDN URL when non-empty
    #[serde(default)]
    pub base_url: String,

    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CacheConfig {
    #[serde(default = "default_list_ttl")]
    pub list_ttl_secs: u64,

    #[serde(default = "default_search_ttl")]
    pub search_ttl_secs: u64,

    #[serde(default = "default_max_entries")]
    pub max_entries: usize,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RetryConfig {
    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    #[serde(default = "default_base_delay_ms")]
    pub base_delay_ms: u64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PagesConfig {
    #[serde(default = "default_featured_count")]
    pub featured_count: usize,

    #[serde(default = "default_section_preview")]
    pub section_preview: usize,

    #[serde(default = "default_editor_pick_count")]
    pub editor_pick_count: usize,

    #[serde(default = "default_search_page_size")]
    pub search_page_size: usize,

    #[serde(default = "default_popular_period")]
    pub popular_period: u32,

    #[serde(default = "default_hero_image_count")]
    pub hero_image_count: usize,
}

// Default value functions
fn default_news_provider() -> String {
    "nytimes".to_string()
}

fn default_news_base_url() -> String {
    newsfront_adapters::news_api::DEFAULT_BASE_URL.to_string()
}

fn default_news_api_key_env() -> String {
    "NYT_API_KEY".to_string()
}

fn default_timeout() -> u64 {
    30
}

fn default_content_provider() -> String {
    "prismic".to_string()
}

fn default_repository() -> String {
    PLACEHOLDER_REPOSITORY.to_string()
}

fn default_repository_env() -> String {
    "PRISMIC_REPOSITORY_NAME".to_string()
}

fn default_access_token_env() -> String {
    "PRISMIC_ACCESS_TOKEN".to_string()
}

fn default_list_ttl() -> u64 {
    2 * 60 * 60
}

fn default_search_ttl() -> u64 {
    5 * 60
}

fn default_max_entries() -> usize {
    newsfront_adapters::cache::DEFAULT_MAX_ENTRIES
}

fn default_max_attempts() -> u32 {
    3
}

fn default_base_delay_ms() -> u64 {
    1000
}

fn default_featured_count() -> usize {
    1
}

fn default_section_preview() -> usize {
    6
}

fn default_editor_pick_count() -> usize {
    2
}

fn default_search_page_size() -> usize {
    9
}

fn default_popular_period() -> u32 {
    7
}

fn default_hero_image_count() -> usize {
    10
}

impl Default for NewsConfig {
    fn default() -> Self {
        Self {
            provider: default_news_provider(),
            base_url: default_news_base_url(),
            api_key_env: default_news_api_key_env(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for ContentConfig {
    fn default() -> Self {
        Self {
            provider: default_content_provider(),
            repository: default_repository(),
            repository_env: default_repository_env(),
            access_token_env: default_access_token_env(),
            base_url: String::new(),
            timeout_secs: default_timeout(),
        }
    }
}

impl Default for CacheConfig {
    fn default() -> Self {
        Self {
            list_ttl_secs: default_list_ttl(),
            search_ttl_secs: default_search_ttl(),
            max_entries: default_max_entries(),
        }
    }
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: default_max_attempts(),
            base_delay_ms: default_base_delay_ms(),
        }
    }
}

impl Default for PagesConfig {
    fn default() -> Self {
        Self {
            featured_count: default_featured_count(),
            section_preview: default_section_preview(),
            editor_pick_count: default_editor_pick_count(),
            search_page_size: default_search_page_size(),
            popular_period: default_popular_period(),
            hero_image_count: default_hero_image_count(),
        }
    }
}

impl RetryConfig {
    pub fn policy(&self) -> RetryPolicy {
        RetryPolicy {
            max_attempts: self.max_attempts,
            base_delay: Duration::from_millis(self.base_delay_ms),
        }
    }
}

impl PagesConfig {
    pub fn page_config(&self) -> PageConfig {
        PageConfig {
            featured_count: self.featured_count,
            section_preview: self.section_preview,
            editor_pick_count: self.editor_pick_count,
            search_page_size: self.search_page_size,
            popular_period: self.popular_period,
            hero_image_count: self.hero_image_count,
        }
    }
}

impl AppConfig {
    /// Load configuration from file and environment
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        let mut builder = config::Config::builder();

        // Try default config path if none specified
        let default_path = PathBuf::from("./config.toml");
        let path = config_path.unwrap_or(&default_path);

        if path.exists() {
            builder = builder.add_source(config::File::from(path));
        } else if config_path.is_some() {
            // User specified a path that doesn't exist
            anyhow::bail!("Config file not found: {}", path.display());
        }

        // Add environment variable overrides
        builder = builder.add_source(
            config::Environment::with_prefix("NEWSFRONT")
                .separator("__")
                .try_parsing(true),
        );

        let config = builder.build().context("Failed to build configuration")?;

        config
            .try_deserialize()
            .context("Failed to deserialize configuration")
    }

    pub fn news_api_config(&self) -> NewsApiConfig {
        NewsApiConfig {
            timeout: Duration::from_secs(self.news.timeout_secs),
            list_ttl: Duration::from_secs(self.cache.list_ttl_secs),
            search_ttl: Duration::from_secs(self.cache.search_ttl_secs),
            max_cache_entries: self.cache.max_entries,
            retry: self.retry.policy(),
        }
    }

    pub fn content_api_config(&self) -> ContentApiConfig {
        ContentApiConfig {
            timeout: Duration::from_secs(self.content.timeout_secs),
            retry: self.retry.policy(),
        }
    }

    /// Generate example configuration as TOML string
    pub fn example_toml() -> String {
        r#"# newsfront configuration
#
# Every key can be overridden from the environment, e.g.
# NEWSFRONT__NEWS__PROVIDER=stub or NEWSFRONT__CACHE__LIST_TTL_SECS=600

[news]
provider = "nytimes"  # nytimes, stub
base_url = "https://api.nytimes.com/svc"
api_key_env = "NYT_API_KEY"
timeout_secs = 30

[content]
provider = "prismic"  # prismic, stub
repository = "your-repo-name"
repository_env = "PRISMIC_REPOSITORY_NAME"
access_token_env = "PRISMIC_ACCESS_TOKEN"
# base_url = "https://your-repo-name.cdn.prismic.io"
timeout_secs = 30

[cache]
list_ttl_secs = 7200
search_ttl_secs = 300
max_entries = 256

[retry]
max_attempts = 3
base_delay_ms = 1000

[pages]
featured_count = 1
section_preview = 6
editor_pick_count = 2
search_page_size = 9
popular_period = 7  # 1, 7 or 30
hero_image_count = 10
"#
        .to_string()
    }
}

/// Non-empty value of an environment variable
pub fn env_value(env_var: &str) -> Option<String> {
    if env_var.is_empty() {
        return None;
    }
    std::env::var(env_var)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// Read a secret from `env_var`, falling back to `placeholder` so the
/// request is still made and the page degrades instead of the command failing
pub fn load_secret(env_var: &str, placeholder: &str) -> SecretString {
    match env_value(env_var) {
        Some(value) => SecretString::new(value.into()),
        None => {
            tracing::warn!(
                env_var = %env_var,
                "Secret not set, using placeholder; upstream calls will be rejected"
            );
            SecretString::new(placeholder.into())
        }
    }
}

impl ContentConfig {
    /// Repository name from the environment, else from the config file
    pub fn resolved_repository(&self) -> String {
        env_value(&self.repository_env).unwrap_or_else(|| self.repository.clone())
    }
}
