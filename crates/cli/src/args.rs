//! CLI argument definitions

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

/// newsfront: fetch, adapt and assemble news page data from a news API and a headless CMS
#[derive(Parser, Debug)]
#[command(name = "newsfront")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Path to configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Home page: featured, latest, opinion, health, editor picks
    Home(OutputArgs),

    /// Category listing
    Category(CategoryArgs),

    /// Keyword search over top stories
    Search(SearchArgs),

    /// Article detail by CMS UID or news URL
    Article(ArticleArgs),

    /// Most viewed articles
    Popular(PopularArgs),

    /// Configuration management
    Config(ConfigArgs),

    /// Validate configuration and show status
    Doctor(DoctorArgs),
}

#[derive(Args, Debug)]
pub struct OutputArgs {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args, Debug)]
pub struct DoctorArgs {
    /// Also query each configured source
    #[arg(long)]
    pub online: bool,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct CategoryArgs {
    /// Category slug, e.g. corona-updates
    pub slug: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct SearchArgs {
    /// Search query
    #[arg(long)]
    pub query: Option<String>,

    /// Alias for --query
    #[arg(long)]
    pub q: Option<String>,

    /// Alias for --query
    #[arg(long)]
    pub tag: Option<String>,

    /// Result page (1-based)
    #[arg(long, default_value_t = 1)]
    pub page: usize,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct ArticleArgs {
    /// CMS UID, or a percent-encoded news article URL
    pub slug: String,

    #[command(flatten)]
    pub output: OutputArgs,
}

#[derive(Args, Debug)]
pub struct PopularArgs {
    /// Window in days (1, 7 or 30)
    #[arg(long, value_parser = parse_period)]
    pub period: Option<u32>,

    #[command(flatten)]
    pub output: OutputArgs,
}

fn parse_period(value: &str) -> Result<u32, String> {
    match value.parse::<u32>() {
        Ok(period @ (1 | 7 | 30)) => Ok(period),
        _ => Err(format!("period must be 1, 7 or 30, got {}", value)),
    }
}

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommands,
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Generate example configuration file
    Init {
        /// Path to write config file
        #[arg(long, default_value = "./config.toml")]
        path: PathBuf,

        /// Overwrite existing file
        #[arg(long)]
        force: bool,
    },

    /// Print the effective configuration as TOML
    Show,
}
