//! Popular command - most viewed articles over a window

use anyhow::Result;
use std::path::PathBuf;

use super::output::{print_degraded, print_heading, print_json, print_section};
use crate::app;
use crate::args::PopularArgs;

pub async fn execute(args: PopularArgs, config_path: Option<PathBuf>) -> Result<()> {
    let pages = app::load_pages(config_path)?;
    let page = pages.popular(args.period).await;

    if args.output.json {
        return print_json(&page);
    }

    print_heading(&format!("Most popular, last {} day(s)", page.period));
    print_section("Articles", &page.articles);
    print_degraded(&page.degraded);

    Ok(())
}
