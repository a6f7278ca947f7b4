//! Shared printing for page commands

use anyhow::Result;
use newsfront_domain::UnifiedArticle;
use serde::Serialize;

pub fn print_json<T: Serialize>(page: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(page)?);
    Ok(())
}

pub fn print_heading(title: &str) {
    println!("{}", title);
    println!("{}", "=".repeat(title.chars().count()));
}

pub fn print_section(title: &str, articles: &[UnifiedArticle]) {
    println!();
    println!("{} ({})", title, articles.len());
    if articles.is_empty() {
        println!("  (none)");
        return;
    }
    for article in articles {
        print_card(article);
    }
}

pub fn print_card(article: &UnifiedArticle) {
    println!("  • {} [{}]", article.title, article.category);
    println!(
        "    {} · {} · {}",
        article.author, article.time, article.read_time
    );
    if let Some(url) = &article.url {
        println!("    {}", url);
    }
}

/// Name the sources that failed while building the page
pub fn print_degraded(degraded: &[String]) {
    if degraded.is_empty() {
        return;
    }
    println!();
    println!("⚠ Unavailable: {}", degraded.join(", "));
}
