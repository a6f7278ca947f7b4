//! Home command - featured, latest and section previews

use anyhow::Result;
use std::path::PathBuf;

use super::output::{print_card, print_degraded, print_heading, print_json, print_section};
use crate::app;
use crate::args::OutputArgs;

pub async fn execute(args: OutputArgs, config_path: Option<PathBuf>) -> Result<()> {
    let pages = app::load_pages(config_path)?;
    let page = pages.home().await;

    tracing::info!(
        featured = page.featured_articles.len(),
        latest = page.latest_stories.len(),
        degraded = ?page.degraded,
        "Home page assembled"
    );

    if args.json {
        return print_json(&page);
    }

    print_heading("Home");
    if let Some(breaking) = &page.breaking_news {
        println!();
        println!("Breaking:");
        print_card(breaking);
    }
    print_section("Featured", &page.featured_articles);
    if !page.hero_images.is_empty() {
        println!();
        println!("Hero images ({})", page.hero_images.len());
        for url in &page.hero_images {
            println!("  {}", url);
        }
    }
    print_section("Latest", &page.latest_stories);
    print_section("Opinion", &page.opinion_stories);
    print_section("Health", &page.health_stories);
    print_section("Editor's picks", &page.editor_picks);
    print_degraded(&page.degraded);

    Ok(())
}
