//! Data models for scraped poems and scrape configuration.
//!
//! - [`PoemRecord`]: one poem as written to the author files and the corpus
//! - [`ScrapeConfig`]: site and pagination settings shared by every author task
//! - [`PaginationStyle`]: how index page URLs are built past page one

use clap::ValueEnum;
use serde::{Deserialize, Serialize};

/// A single poem scraped from a poem page.
///
/// Field names are the JSON keys used in both the per-author files and the
/// gzip corpus.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PoemRecord {
    /// Slug of the author whose index pages led to this poem.
    pub author: String,
    /// The href the poem was fetched from, as found on the index page.
    pub source_link: String,
    /// Last non-empty path segment of `source_link`.
    pub title: String,
    /// Paragraph texts of the poem container joined with `\n`.
    pub text: String,
}

impl PoemRecord {
    /// Build a record, deriving the title from the link.
    pub fn new(author: &str, source_link: &str, text: String) -> Self {
        Self {
            author: author.to_string(),
            source_link: source_link.to_string(),
            title: title_from_link(source_link),
            text,
        }
    }
}

/// Last non-empty `/`-separated segment of `link`, or an empty string.
///
/// `https://virshi.com.ua/kateryna/` yields `kateryna`.
pub fn title_from_link(link: &str) -> String {
    link.split('/')
        .rfind(|segment| !segment.is_empty())
        .unwrap_or_default()
        .to_string()
}

/// How the link collector builds URLs for index pages after the first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum PaginationStyle {
    /// Append `page/{n}/` to the previous page's URL, so page three is
    /// requested as `{base}page/2/page/3/`.
    #[default]
    Cumulative,
    /// Rebuild each page URL from the base: `{base}page/{n}/`.
    Numbered,
}

/// Settings shared by every author task.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScrapeConfig {
    /// Site root without a trailing slash, e.g. `https://virshi.com.ua`.
    pub site_url: String,
    pub pagination: PaginationStyle,
}

impl ScrapeConfig {
    /// Index URL for an author: `{site_url}/{slug}/`.
    pub fn author_url(&self, slug: &str) -> String {
        format!("{}/{}/", self.site_url.trim_end_matches('/'), slug)
    }
}
