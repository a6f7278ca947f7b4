//! Search command - paginated keyword search over top stories

use anyhow::Result;
use newsfront_domain::usecases::SearchRequest;
use std::path::PathBuf;

use super::output::{print_degraded, print_heading, print_json, print_section};
use crate::app;
use crate::args::SearchArgs;

pub async fn execute(args: SearchArgs, config_path: Option<PathBuf>) -> Result<()> {
    let pages = app::load_pages(config_path)?;
    let request = SearchRequest {
        query: args.query,
        q: args.q,
        tag: args.tag,
        page: args.page,
    };
    let page = pages.search(&request).await;

    tracing::info!(
        query = %page.query,
        hits = page.total_hits,
        page = page.page,
        "Search page assembled"
    );

    if args.output.json {
        return print_json(&page);
    }

    if page.query.is_empty() {
        println!("No query given. Pass --query, --q or --tag.");
        return Ok(());
    }

    print_heading(&format!("Search: {}", page.query));
    println!(
        "{} result(s), page {} of {}",
        page.total_hits,
        page.page,
        page.total_pages.max(1)
    );
    print_section("Results", &page.results);
    print_degraded(&page.degraded);

    Ok(())
}
