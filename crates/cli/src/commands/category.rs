//! Category command - CMS and news articles for one category

use anyhow::Result;
use std::path::PathBuf;

use super::output::{print_degraded, print_heading, print_json, print_section};
use crate::app;
use crate::args::CategoryArgs;

pub async fn execute(args: CategoryArgs, config_path: Option<PathBuf>) -> Result<()> {
    let pages = app::load_pages(config_path)?;
    let page = pages.category(&args.slug).await;

    tracing::info!(
        category = %page.category,
        section = %page.section,
        articles = page.articles.len(),
        "Category page assembled"
    );

    if args.output.json {
        return print_json(&page);
    }

    print_heading(&page.display_name);
    println!("Section: {}", page.section);
    print_section("Articles", &page.articles);
    print_degraded(&page.degraded);

    Ok(())
}
