//! A loaded shopping page.

use url::Url;

/// A page snapshot: where it came from, its markup, and whether it is the
/// top-level document or embedded in another page.
#[derive(Debug, Clone)]
pub struct Page {
    pub url: Url,
    pub html: String,
    pub top_level: bool,
}

impl Page {
    /// Create a top-level page.
    pub fn new(url: &str, html: impl Into<String>) -> Result<Self, url::ParseError> {
        Ok(Self {
            url: Url::parse(url)?,
            html: html.into(),
            top_level: true,
        })
    }

    /// Mark the page as embedded (e.g. loaded in a frame).
    pub fn embedded(mut self) -> Self {
        self.top_level = false;
        self
    }

    /// Whether the host contains `marker` (e.g. `amazon.` matches
    /// `www.amazon.co.uk`).
    pub fn is_on_host(&self, marker: &str) -> bool {
        self.url
            .host_str()
            .map(|host| host.to_ascii_lowercase().contains(&marker.to_ascii_lowercase()))
            .unwrap_or(false)
    }
}
