//! HTTP fetching with a fixed browser user agent.
//!
//! Every request made by the scraper goes through the [`Fetch`] trait. The
//! production implementation, [`HttpFetcher`], wraps a `reqwest` client; tests
//! drive the pipeline with a scripted implementation instead.
//!
//! # Outcomes
//!
//! A fetch never treats an unsuccessful status as an error. Any non-2xx
//! response comes back as [`FetchOutcome::EndOfPages`], which the pagination
//! loop consumes as its only termination signal and the poem extractor
//! consumes as "skip this link". Transport failures (DNS, refused
//! connections, broken bodies) are real errors and propagate.

use reqwest::Client;
use reqwest::header::{HeaderMap, HeaderValue, USER_AGENT};
use std::error::Error;
use std::time::Instant;
use tracing::{debug, instrument};

/// User agent sent with every request.
pub const BROWSER_USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_11_5) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/50.0.2661.102 Safari/537.36";

/// Result of a single GET.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FetchOutcome {
    /// 2xx response with its decoded body.
    Page(String),
    /// Any other status. Ends pagination; skips a poem link.
    EndOfPages { status: u16 },
}

/// Something that can GET a URL.
pub trait Fetch {
    /// Fetch `url`, mapping unsuccessful statuses to [`FetchOutcome::EndOfPages`].
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, Box<dyn Error>>;
}

/// [`Fetch`] backed by a shared `reqwest` client.
///
/// No timeout and no retry are configured; redirects follow the client's
/// default policy.
#[derive(Debug, Clone)]
pub struct HttpFetcher {
    client: Client,
}

impl HttpFetcher {
    /// Build a client that sends [`BROWSER_USER_AGENT`] on every request.
    pub fn new() -> Result<Self, Box<dyn Error>> {
        let mut headers = HeaderMap::new();
        headers.insert(USER_AGENT, HeaderValue::from_static(BROWSER_USER_AGENT));
        let client = Client::builder().default_headers(headers).build()?;
        Ok(Self { client })
    }
}

impl Fetch for HttpFetcher {
    #[instrument(level = "debug", skip(self))]
    async fn fetch(&self, url: &str) -> Result<FetchOutcome, Box<dyn Error>> {
        let t0 = Instant::now();
        let response = self.client.get(url).send().await?;
        let status = response.status();

        if !status.is_success() {
            debug!(
                status = status.as_u16(),
                elapsed_ms = t0.elapsed().as_millis() as u64,
                "Unsuccessful status"
            );
            return Ok(FetchOutcome::EndOfPages {
                status: status.as_u16(),
            });
        }

        let body = response.text().await?;
        debug!(
            bytes = body.len(),
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "Fetched page"
        );
        Ok(FetchOutcome::Page(body))
    }
}


#[cfg(test)]
mod tests {
    use super::testing::ScriptedFetcher;
    use super::*;

    #[test]
    fn test_http_fetcher_builds() {
        assert!(HttpFetcher::new().is_ok());
    }

    #[test]
    fn test_user_agent_is_a_valid_header() {
        assert!(HeaderValue::from_str(BROWSER_USER_AGENT).is_ok());
    }

    #[tokio::test]
    async fn test_scripted_fetcher_defaults_to_not_found() {
        let fetcher = ScriptedFetcher::new().page("https://a/", "<p>x</p>");

        assert_eq!(
            fetcher.fetch("https://a/").await.unwrap(),
            FetchOutcome::Page("<p>x</p>".to_string())
        );
        assert_eq!(
            fetcher.fetch("https://b/").await.unwrap(),
            FetchOutcome::EndOfPages { status: 404 }
        );
        assert_eq!(fetcher.requests(), vec!["https://a/", "https://b/"]);
    }
}
