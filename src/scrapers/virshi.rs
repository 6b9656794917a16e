//! virshi.com.ua poem scraper.
//!
//! Scraping an author happens in two phases:
//!
//! 1. **Link collection**: walk the author's numbered index pages and keep
//!    every anchor whose href mentions the author slug.
//! 2. **Poem extraction**: fetch each collected link and read the paragraphs
//!    inside `div.poem-text`.
//!
//! # URL Pattern
//!
//! An author's index lives at `https://virshi.com.ua/{slug}/`, with further
//! pages under `page/{n}/`. See [`PaginationStyle`] for how those are built.

use crate::fetch::{Fetch, FetchOutcome};
use crate::models::{PaginationStyle, PoemRecord};
use itertools::Itertools;
use once_cell::sync::Lazy;
use scraper::{Html, Selector};
use std::error::Error;
use tracing::{debug, info, instrument, warn};

/// Highest index page number requested.
pub const MAX_INDEX_PAGE: u32 = 99;

static ANCHOR_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("a").unwrap());
static POEM_TEXT_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.poem-text").unwrap());
static PARAGRAPH_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("p").unwrap());

/// Hrefs of every anchor on the page that contain `slug`, in document order.
pub fn find_author_links(slug: &str, html: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    document
        .select(&ANCHOR_SELECTOR)
        .filter_map(|a| a.value().attr("href"))
        .filter(|href| href.contains(slug))
        .map(str::to_string)
        .collect()
}

/// Poem text of the first `div.poem-text` on the page.
///
/// Returns `None` when the page has no such container.
pub fn extract_poem_text(html: &str) -> Option<String> {
    let document = Html::parse_document(html);
    let container = document.select(&POEM_TEXT_SELECTOR).next()?;
    Some(
        container
            .select(&PARAGRAPH_SELECTOR)
            .map(|p| p.text().collect::<String>())
            .join("\n"),
    )
}

/// URL of index page `page_num`, given the URL used for the previous page.
fn next_index_url(
    style: PaginationStyle,
    base_url: &str,
    previous_url: &str,
    page_num: u32,
) -> String {
    match style {
        PaginationStyle::Cumulative => format!("{previous_url}page/{page_num}/"),
        PaginationStyle::Numbered => format!("{base_url}page/{page_num}/"),
    }
}

/// Collect every link mentioning `slug` across the author's index pages.
///
/// Pages 1 through [`MAX_INDEX_PAGE`] are fetched in order and the loop ends
/// at the first [`FetchOutcome::EndOfPages`]. Matches are kept raw and
/// duplicates are preserved.
#[instrument(level = "info", skip(fetcher, style), fields(style = ?style))]
pub async fn get_author_links<F: Fetch>(
    fetcher: &F,
    base_url: &str,
    slug: &str,
    style: PaginationStyle,
) -> Result<Vec<String>, Box<dyn Error>> {
    let mut all_links = Vec::new();
    let mut url = base_url.to_string();

    for page_num in 1..=MAX_INDEX_PAGE {
        if page_num > 1 {
            url = next_index_url(style, base_url, &url, page_num);
        }

        let body = match fetcher.fetch(&url).await? {
            FetchOutcome::Page(body) => body,
            FetchOutcome::EndOfPages { status } => {
                debug!(page_num, status, %url, "Pagination ended");
                break;
            }
        };

        let links = find_author_links(slug, &body);
        debug!(page_num, count = links.len(), %url, "Scanned index page");
        all_links.extend(links);
    }

    info!(count = all_links.len(), author = %slug, "Found links");
    Ok(all_links)
}

/// True for anything under the author's index URL: the index itself, its
/// pagination pages and other site pages such as feeds.
fn is_index_link(link: &str, base_url: &str) -> bool {
    link.starts_with(base_url)
}

/// Fetch each poem link and build a [`PoemRecord`] from its text container.
///
/// Links under `base_url` (index, pagination and other site pages) are skipped. Links answering with an
/// unsuccessful status, or whose page has no `div.poem-text`, are logged and
/// left out. Transport errors propagate.
#[instrument(level = "info", skip(fetcher, links), fields(links = links.len()))]
pub async fn scrape_poems<F: Fetch>(
    fetcher: &F,
    base_url: &str,
    slug: &str,
    links: &[String],
) -> Result<Vec<PoemRecord>, Box<dyn Error>> {
    let mut poems = Vec::new();

    for link in links {
        if is_index_link(link, base_url) {
            continue;
        }

        let body = match fetcher.fetch(link).await? {
            FetchOutcome::Page(body) => body,
            FetchOutcome::EndOfPages { status } => {
                warn!(%link, status, "Poem page unavailable; skipping");
                continue;
            }
        };

        match extract_poem_text(&body) {
            Some(text) => poems.push(PoemRecord::new(slug, link, text)),
            None => warn!(%link, "No poem text container; skipping"),
        }
    }

    info!(count = poems.len(), author = %slug, "Found poems");
    Ok(poems)
}
