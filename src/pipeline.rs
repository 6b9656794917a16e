//! Per-author orchestration and the parallel author fan-out.
//!
//! [`save_author_file`] runs one author end to end: collect links, extract
//! poems, write `{slug}.json`. [`write_author_files`] runs it for every
//! configured author with a bounded number in flight and waits for all of
//! them before returning.

use crate::fetch::Fetch;
use crate::models::{PoemRecord, ScrapeConfig};
use crate::outputs::json::write_author_file;
use crate::scrapers::virshi::{get_author_links, scrape_poems};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::error::Error;
use tracing::{info, instrument};

/// Scrape one author and write their poems to `{output_dir}/{slug}.json`.
///
/// # Returns
///
/// Every poem written to the file.
#[instrument(level = "info", skip(fetcher, config))]
pub async fn save_author_file<F: Fetch>(
    fetcher: &F,
    config: &ScrapeConfig,
    slug: &str,
    output_dir: &str,
) -> Result<Vec<PoemRecord>, Box<dyn Error>> {
    let base_url = config.author_url(slug);
    let links = get_author_links(fetcher, &base_url, slug, config.pagination).await?;
    let poems = scrape_poems(fetcher, &base_url, slug, &links).await?;

    write_author_file(&poems, output_dir, slug).await?;
    info!(author = %slug, count = poems.len(), "Finished writing author file");

    Ok(poems)
}

/// Run [`save_author_file`] for every author, at most `workers` at a time.
///
/// Authors complete in no particular order. The first failing author aborts
/// the whole fan-out and its error is returned; unfinished authors are dropped.
///
/// # Returns
///
/// The number of poems written per author, in completion order.
#[instrument(level = "info", skip(fetcher, config, authors), fields(authors = authors.len()))]
pub async fn write_author_files<F: Fetch>(
    fetcher: &F,
    config: &ScrapeConfig,
    authors: &[String],
    output_dir: &str,
    workers: usize,
) -> Result<Vec<(String, usize)>, Box<dyn Error>> {
    info!(workers, "Dispatching author tasks");

    stream::iter(authors)
        .map(|slug| async move {
            let poems = save_author_file(fetcher, config, slug, output_dir).await?;
            Ok::<_, Box<dyn Error>>((slug.clone(), poems.len()))
        })
        .buffer_unordered(workers.max(1))
        .try_collect()
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fetch::testing::ScriptedFetcher;
    use crate::models::PaginationStyle;
    use crate::outputs::json::{author_file_path, read_author_file};
    use crate::outputs::testing::scratch_dir;

    const SITE: &str = "https://virshi.com.ua";

    fn config() -> ScrapeConfig {
        ScrapeConfig {
            site_url: SITE.to_string(),
            pagination: PaginationStyle::Cumulative,
        }
    }

    fn poem(text: &str) -> String {
        format!(r#"<div class="poem-text"><p>{text}</p></div>"#)
    }

    /// Index page for `slug` linking to itself, its page two and the given poems.
    fn index(slug: &str, poems: &[&str]) -> String {
        let mut html = format!(
            r#"<a href="{SITE}/{slug}/">home</a><a href="{SITE}/{slug}/page/2/">next</a>"#
        );
        for p in poems {
            html.push_str(&format!(r#"<a href="{SITE}/{p}/">{p}</a>"#));
        }
        html
    }

    #[tokio::test]
    async fn test_save_author_file_end_to_end() {
        let dir = scratch_dir("pipeline_single");
        let fetcher = ScriptedFetcher::new()
            .page(
                &format!("{SITE}/poet-x/"),
                &index("poet-x", &["poet-x-one", "unrelated"]),
            )
            .page(&format!("{SITE}/poet-x/page/2/"), &index("poet-x", &["poet-x-two"]))
            .page(&format!("{SITE}/poet-x-one/"), &poem("first"))
            .page(&format!("{SITE}/poet-x-two/"), &poem("second"));

        let poems = save_author_file(&fetcher, &config(), "poet-x", &dir)
            .await
            .unwrap();

        let titles: Vec<_> = poems.iter().map(|p| p.title.as_str()).collect();
        assert_eq!(titles, vec!["poet-x-one", "poet-x-two"]);
        assert!(poems.iter().all(|p| p.author == "poet-x"));

        let on_disk = read_author_file(&author_file_path(&dir, "poet-x"))
            .await
            .unwrap();
        assert_eq!(on_disk, poems);
    }

    #[tokio::test]
    async fn test_write_author_files_all_authors() {
        let dir = scratch_dir("pipeline_many");
        let fetcher = ScriptedFetcher::new()
            .page(&format!("{SITE}/poet-a/"), &index("poet-a", &["poet-a-song"]))
            .page(&format!("{SITE}/poet-a-song/"), &poem("a"))
            .page(&format!("{SITE}/poet-b/"), &index("poet-b", &["poet-b-x", "poet-b-y"]))
            .page(&format!("{SITE}/poet-b-x/"), &poem("x"))
            .page(&format!("{SITE}/poet-b-y/"), &poem("y"));
        let authors = vec!["poet-a".to_string(), "poet-b".to_string(), "poet-c".to_string()];

        let mut counts = write_author_files(&fetcher, &config(), &authors, &dir, 2)
            .await
            .unwrap();
        counts.sort();

        assert_eq!(
            counts,
            vec![
                ("poet-a".to_string(), 1),
                ("poet-b".to_string(), 2),
                ("poet-c".to_string(), 0),
            ]
        );
        for author in &authors {
            let records = read_author_file(&author_file_path(&dir, author))
                .await
                .unwrap();
            assert!(records.iter().all(|r| &r.author == author));
        }
    }

    #[tokio::test]
    async fn test_write_author_files_propagates_failure() {
        let dir = scratch_dir("pipeline_failure");
        let fetcher = ScriptedFetcher::new()
            .page(&format!("{SITE}/poet-a/"), &index("poet-a", &["poet-a-song"]))
            .transport_error(&format!("{SITE}/poet-a-song/"), "connection reset");
        let authors = vec!["poet-a".to_string()];

        let result = write_author_files(&fetcher, &config(), &authors, &dir, 4).await;

        assert!(result.is_err());
        assert!(!author_file_path(&dir, "poet-a").exists());
    }
}
