//! Command-line interface definitions for the poem scraper.
//!
//! All options have defaults, so running the binary with no arguments scrapes
//! the built-in author list into `data/`.

use crate::models::{PaginationStyle, ScrapeConfig};
use clap::Parser;
use url::Url;

/// Site the poems are scraped from.
pub const DEFAULT_SITE_URL: &str = "https://virshi.com.ua";

/// Author slugs scraped when `--authors` is not given.
pub const DEFAULT_AUTHORS: [&str; 13] = [
    "taras-shevchenko",
    "ivan-franko",
    "lesya-ukrayinka",
    "lina-kostenko",
    "vasyl-symonenko",
    "volodymyr-sosyura",
    "maksym-rylskyj",
    "vasyl-stus",
    "leonid-glibov",
    "oleksandr-oles",
    "pavlo-tychyna",
    "pavlo-glazovyj",
    "grygorij-skovoroda",
];

/// Command-line arguments.
///
/// # Examples
///
/// ```sh
/// # Scrape the default authors into ./data
/// virshi_scrape
///
/// # Two authors, custom output location
/// virshi_scrape -o out -f poems.json.gz -a '["vasyl-stus", "lina-kostenko"]'
/// ```
#[derive(Parser, Debug)]
#[command(author, version, about)]
pub struct Cli {
    /// Directory for the per-author JSON files and the corpus
    #[arg(short, long, default_value = "data")]
    pub output_dir: String,

    /// File name of the gzip JSON-lines corpus inside the output directory
    #[arg(short = 'f', long, default_value = "ukrainian_poems.json.gz")]
    pub output_file: String,

    /// JSON array of author slugs, e.g. '["ivan-franko"]'
    #[arg(short, long, value_parser = parse_authors)]
    pub authors: Option<AuthorList>,

    /// Site root the author slugs are resolved against
    #[arg(long, default_value = DEFAULT_SITE_URL, value_parser = parse_site_url)]
    pub base_url: String,

    /// How index page URLs past the first are built
    #[arg(long, value_enum, default_value_t = PaginationStyle::Cumulative)]
    pub pagination: PaginationStyle,
}

impl Cli {
    /// The authors to scrape: `--authors` if given and non-empty, else the defaults.
    pub fn authors(&self) -> Vec<String> {
        match &self.authors {
            Some(AuthorList(authors)) if !authors.is_empty() => authors.clone(),
            _ => DEFAULT_AUTHORS.iter().map(|a| a.to_string()).collect(),
        }
    }

    pub fn scrape_config(&self) -> ScrapeConfig {
        ScrapeConfig {
            site_url: self.base_url.trim_end_matches('/').to_string(),
            pagination: self.pagination,
        }
    }
}

/// Author slugs as given on the command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthorList(pub Vec<String>);

fn parse_authors(raw: &str) -> Result<AuthorList, String> {
    serde_json::from_str(raw)
        .map(AuthorList)
        .map_err(|e| format!("expected a JSON array of strings: {e}"))
}

fn parse_site_url(raw: &str) -> Result<String, String> {
    let url = Url::parse(raw).map_err(|e| format!("invalid URL: {e}"))?;
    match url.scheme() {
        "http" | "https" => Ok(raw.to_string()),
        other => Err(format!("unsupported scheme: {other}")),
    }
}
