//! Loading pages over HTTP or from saved markup.

use std::path::Path;
use std::time::Duration;

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, ACCEPT_LANGUAGE, UPGRADE_INSECURE_REQUESTS};
use tracing::{debug, info};

use crate::error::FetchError;
use crate::types::Page;

// Shopping sites serve a stripped page to obvious bots
const USER_AGENT: &str = "Mozilla/5.0 (Macintosh; Intel Mac OS X 10_15_7) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/120.0.0.0 Safari/537.36";

/// Fetches product pages with browser-like headers.
#[derive(Debug, Clone)]
pub struct PageFetcher {
    client: reqwest::Client,
}

impl PageFetcher {
    pub fn new() -> Result<Self, FetchError> {
        let mut headers = HeaderMap::new();
        headers.insert(
            ACCEPT,
            HeaderValue::from_static("text/html,application/xhtml+xml,application/xml;q=0.9,*/*;q=0.8"),
        );
        headers.insert(ACCEPT_LANGUAGE, HeaderValue::from_static("en-US,en;q=0.5"));
        headers.insert(UPGRADE_INSECURE_REQUESTS, HeaderValue::from_static("1"));

        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(30))
            .user_agent(USER_AGENT)
            .default_headers(headers)
            .redirect(reqwest::redirect::Policy::limited(5))
            .build()?;

        Ok(Self { client })
    }

    /// Download `url` as a top-level page.
    pub async fn fetch(&self, url: &str) -> Result<Page, FetchError> {
        let mut page = Page::new(url, String::new())?;

        info!(url = %page.url, "Fetching page");
        let response = self.client.get(page.url.clone()).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                status: status.as_u16(),
                url: url.to_string(),
            });
        }

        page.html = response.text().await?;
        debug!(url = %page.url, bytes = page.html.len(), "Fetched page");
        Ok(page)
    }
}

/// Read saved markup from `path`, attributing it to `url`.
pub async fn load_saved(url: &str, path: &Path) -> Result<Page, FetchError> {
    let html = tokio::fs::read_to_string(path).await?;
    debug!(path = %path.display(), bytes = html.len(), "Loaded saved page");
    Ok(Page::new(url, html)?)
}
