//! Doctor command - validate configuration and show status

use anyhow::Result;
use newsfront_domain::sections::DEFAULT_SECTION;
use serde::Serialize;
use std::path::PathBuf;

use crate::app::{build_content_source, build_news_source};
use crate::args::DoctorArgs;
use crate::config::{AppConfig, PLACEHOLDER_REPOSITORY, env_value};

/// Featured documents requested by the online check
const FEATURED_SAMPLE: usize = 5;

#[derive(Debug, Serialize)]
struct DoctorReport {
    config: CheckResult,
    news: CheckResult,
    content: CheckResult,
    cache: CheckResult,
    pages: CheckResult,
    #[serde(skip_serializing_if = "Option::is_none")]
    upstream: Option<CheckResult>,
    overall: String,
}

#[derive(Debug, Serialize)]
struct CheckResult {
    status: String,
    message: String,
    details: Option<serde_json::Value>,
}

impl CheckResult {
    fn ok(message: impl Into<String>) -> Self {
        Self::with_status("ok", message)
    }

    fn warn(message: impl Into<String>) -> Self {
        Self::with_status("warn", message)
    }

    fn error(message: impl Into<String>) -> Self {
        Self::with_status("error", message)
    }

    fn with_status(status: &str, message: impl Into<String>) -> Self {
        Self {
            status: status.to_string(),
            message: message.into(),
            details: None,
        }
    }

    fn with_details(mut self, details: serde_json::Value) -> Self {
        self.details = Some(details);
        self
    }

    fn is_ok(&self) -> bool {
        self.status == "ok"
    }

    fn is_error(&self) -> bool {
        self.status == "error"
    }
}

pub async fn execute(args: DoctorArgs, config_path: Option<PathBuf>) -> Result<()> {
    let mut report = DoctorReport {
        config: CheckResult::error("Not checked"),
        news: CheckResult::error("Not checked"),
        content: CheckResult::error("Not checked"),
        cache: CheckResult::error("Not checked"),
        pages: CheckResult::error("Not checked"),
        upstream: None,
        overall: "error".to_string(),
    };

    match AppConfig::load(config_path.as_deref()) {
        Ok(config) => {
            report.config = CheckResult::ok("Configuration loaded successfully");
            report.news = check_news(&config);
            report.content = check_content(&config);
            report.cache = check_cache(&config);
            report.pages = check_pages(&config);
            if args.online {
                report.upstream = Some(check_upstream(&config).await);
            }
        }
        Err(e) => {
            report.config = CheckResult::error(format!("Failed to load config: {}", e));
        }
    }

    let mut checks = vec![
        &report.config,
        &report.news,
        &report.content,
        &report.cache,
        &report.pages,
    ];
    checks.extend(report.upstream.as_ref());

    let has_error = checks.iter().any(|c| c.is_error());
    let all_ok = checks.iter().all(|c| c.is_ok());

    report.overall = if has_error {
        "error".to_string()
    } else if all_ok {
        "ok".to_string()
    } else {
        "warn".to_string()
    };

    if args.output.json {
        println!("{}", serde_json::to_string_pretty(&report)?);
    } else {
        print_report(&report);
    }

    if report.overall == "error" {
        std::process::exit(1);
    }

    Ok(())
}

fn check_news(config: &AppConfig) -> CheckResult {
    let news = &config.news;
    match news.provider.as_str() {
        "stub" => CheckResult::ok("Provider: stub (offline)"),
        "nytimes" => {
            if news.base_url.trim().is_empty() {
                return CheckResult::error("News base_url is empty");
            }
            if news.api_key_env.is_empty() {
                return CheckResult::error("No API key env var configured for nytimes");
            }
            let details = serde_json::json!({ "base_url": news.base_url });
            let result = match env_value(&news.api_key_env) {
                Some(_) => CheckResult::ok(format!(
                    "Provider: nytimes, API key: {} (set)",
                    news.api_key_env
                )),
                None => CheckResult::warn(format!(
                    "Provider: nytimes, API key: {} (not set, requests will be rejected)",
                    news.api_key_env
                )),
            };
            result.with_details(details)
        }
        other => CheckResult::error(format!("Unknown news provider: {}", other)),
    }
}

fn check_content(config: &AppConfig) -> CheckResult {
    let content = &config.content;
    match content.provider.as_str() {
        "stub" => CheckResult::ok("Provider: stub (offline)"),
        "prismic" => {
            let repository = content.resolved_repository();
            if repository.trim().is_empty() {
                return CheckResult::error("Content repository name is empty");
            }
            if repository == PLACEHOLDER_REPOSITORY {
                return CheckResult::warn(format!(
                    "Provider: prismic, repository not configured (set {})",
                    content.repository_env
                ));
            }
            let token = if env_value(&content.access_token_env).is_some() {
                "set"
            } else {
                "not set, public access"
            };
            CheckResult::ok(format!(
                "Provider: prismic, Repository: {}, Token: {} ({})",
                repository, content.access_token_env, token
            ))
        }
        other => CheckResult::error(format!("Unknown content provider: {}", other)),
    }
}

fn check_cache(config: &AppConfig) -> CheckResult {
    let cache = &config.cache;
    if cache.max_entries == 0 {
        return CheckResult::warn("Cache max_entries is 0, caching disabled");
    }
    CheckResult::ok(format!(
        "Lists: {}s, Searches: {}s, Max entries: {}",
        cache.list_ttl_secs, cache.search_ttl_secs, cache.max_entries
    ))
}

fn check_pages(config: &AppConfig) -> CheckResult {
    let pages = &config.pages;
    if !matches!(pages.popular_period, 1 | 7 | 30) {
        return CheckResult::error(format!(
            "popular_period must be 1, 7 or 30, got {}",
            pages.popular_period
        ));
    }
    if pages.search_page_size == 0 {
        return CheckResult::error("search_page_size must be at least 1");
    }
    CheckResult::ok(format!(
        "Featured: {}, Preview: {}, Editor picks: {}, Search page: {}",
        pages.featured_count, pages.section_preview, pages.editor_pick_count, pages.search_page_size
    ))
}

async fn check_upstream(config: &AppConfig) -> CheckResult {
    let news = match build_news_source(config) {
        Ok(news) => news,
        Err(e) => return CheckResult::error(e.to_string()),
    };
    let content = match build_content_source(config) {
        Ok(content) => content,
        Err(e) => return CheckResult::error(e.to_string()),
    };

    let (stories, featured) = tokio::join!(
        news.top_stories(DEFAULT_SECTION),
        content.featured(FEATURED_SAMPLE),
    );

    match (stories, featured) {
        (Ok(stories), Ok(featured)) => CheckResult::ok(format!(
            "News: {} {} stories, Content: {} featured",
            stories.len(),
            DEFAULT_SECTION,
            featured.len()
        ))
        .with_details(serde_json::json!({
            "featured": featured.iter().filter_map(|d| d.uid.as_deref()).collect::<Vec<_>>(),
        })),
        (Err(e), _) => CheckResult::error(format!("News API unreachable: {}", e)),
        (_, Err(e)) => CheckResult::error(format!("Content API unreachable: {}", e)),
    }
}

fn print_report(report: &DoctorReport) {
    println!("newsfront Doctor Report");
    println!("=======================");
    println!();

    print_check("Config", &report.config);
    print_check("News API", &report.news);
    print_check("Content API", &report.content);
    print_check("Cache", &report.cache);
    print_check("Pages", &report.pages);
    if let Some(upstream) = &report.upstream {
        print_check("Upstream", upstream);
    }

    println!();
    println!(
        "{} Overall: {}",
        symbol(&report.overall),
        report.overall.to_uppercase()
    );

    if report.overall == "ok" {
        println!();
        println!("Ready! Try: newsfront home");
    }
}

fn print_check(name: &str, result: &CheckResult) {
    println!("{} {}: {}", symbol(&result.status), name, result.message);
}

fn symbol(status: &str) -> &'static str {
    match status {
        "ok" => "✓",
        "warn" => "⚠",
        _ => "✗",
    }
}
