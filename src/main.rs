//! # virshi_scrape
//!
//! Scrapes Ukrainian poetry from [virshi.com.ua](https://virshi.com.ua),
//! grouped by author, into per-author JSON files and a combined
//! gzip-compressed JSON-lines corpus.
//!
//! ## Usage
//!
//! ```sh
//! virshi_scrape -o data -f ukrainian_poems.json.gz -a '["vasyl-stus"]'
//! ```
//!
//! ## Architecture
//!
//! 1. **Link collection**: walk each author's numbered index pages
//! 2. **Extraction**: fetch every poem page and read its text container
//! 3. **Author output**: write `{output_dir}/{slug}.json` (authors run in parallel)
//! 4. **Corpus**: merge all author files into one gzip JSON-lines file

use clap::Parser;
use std::error::Error;
use tracing::{debug, error, info, instrument};
use tracing_subscriber::{EnvFilter, fmt as tfmt};

mod cli;
mod fetch;
mod models;
mod outputs;
mod pipeline;
mod scrapers;
mod utils;

use cli::Cli;
use fetch::HttpFetcher;
use outputs::corpus::write_poems_file;
use pipeline::write_author_files;
use utils::{ensure_writable_dir, worker_count};

#[tokio::main]
#[instrument]
async fn main() -> Result<(), Box<dyn Error>> {
    // --- Tracing init ---
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tfmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_file(false)
        .with_line_number(false)
        .with_timer(tracing_subscriber::fmt::time::UtcTime::rfc_3339())
        .init();

    let start_time = std::time::Instant::now();
    info!("virshi_scrape starting up");

    let args = Cli::parse();
    let authors = args.authors();
    let config = args.scrape_config();
    debug!(?args.output_dir, ?args.output_file, ?config, "Parsed CLI arguments");

    if let Err(e) = ensure_writable_dir(&args.output_dir).await {
        error!(
            path = %args.output_dir,
            error = %e,
            "Output directory is not writable (fix perms or choose a different path)"
        );
        return Err(e);
    }

    // ---- Scrape every author ----
    let fetcher = HttpFetcher::new()?;
    let workers = worker_count();
    let counts = write_author_files(&fetcher, &config, &authors, &args.output_dir, workers).await?;
    for (author, count) in &counts {
        debug!(%author, count, "Author complete");
    }

    // ---- Corpus ----
    let total = write_poems_file(&args.output_file, &args.output_dir).await?;

    let elapsed = start_time.elapsed();
    info!(
        authors = counts.len(),
        poems = total,
        secs = elapsed.as_secs(),
        mins = elapsed.as_secs() / 60,
        "Execution complete"
    );

    Ok(())
}
