//! Article command - detail page by CMS UID or news URL

use anyhow::Result;
use newsfront_domain::ArticleOrigin;
use std::path::PathBuf;

use super::output::{print_degraded, print_heading, print_json};
use crate::app;
use crate::args::ArticleArgs;

pub async fn execute(args: ArticleArgs, config_path: Option<PathBuf>) -> Result<()> {
    let pages = app::load_pages(config_path)?;
    let page = pages.article(&args.slug).await;

    tracing::info!(slug = %args.slug, origin = ?page.origin, "Article page assembled");

    if args.output.json {
        return print_json(&page);
    }

    let article = &page.article;
    match page.origin {
        ArticleOrigin::NotFound => {
            println!("Article not found: {}", args.slug);
            return Ok(());
        }
        ArticleOrigin::Error => {
            println!("Article could not be loaded: {}", args.slug);
            print_degraded(&page.degraded);
            return Ok(());
        }
        ArticleOrigin::Content | ArticleOrigin::News => {}
    }

    print_heading(&article.title);
    println!(
        "{} · {} · {} · {}",
        article.category, article.author, article.time, article.read_time
    );
    if !article.tags.is_empty() {
        println!("Tags: {}", article.tags.join(", "));
    }
    println!();
    println!("{}", article.description);
    println!();
    println!("Image: {}", article.image_url);
    if let Some(url) = &article.url {
        println!("Source: {}", url);
    }
    print_degraded(&page.degraded);

    Ok(())
}
