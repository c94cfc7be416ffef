//! Review discovery and text extraction.
//!
//! Markup on review pages is inconsistent and sometimes embeds script or
//! templated widgets inside the review body. Extraction therefore tries a
//! selector aimed at user-authored text first, then falls back to broader
//! containers whose text is read from a detached, sanitized copy.

use std::collections::HashSet;

use scraper::{ElementRef, Html, Selector};
use tracing::{debug, info};

use crate::error::ExtractError;
use crate::types::{CandidateReview, ElementHandle, SelectorConfig};

/// Everything the orchestrator needs from one parse of a page.
#[derive(Debug, Clone, Default)]
pub struct PageScan {
    /// Review elements found on the page
    pub discovered: usize,

    /// Reviews with enough text to score, in document order
    pub candidates: Vec<CandidateReview>,

    /// First configured anchor present on the page
    pub anchor: Option<String>,
}

/// Compiled selectors for review extraction.
#[derive(Debug, Clone)]
pub struct ReviewExtractor {
    reviews: Selector,
    primary: Selector,
    fallbacks: Vec<Selector>,
    noise: Vec<Selector>,
    anchors: Vec<(String, Selector)>,
    min_text_chars: usize,
}

fn compile(selector: &str) -> Result<Selector, ExtractError> {
    Selector::parse(selector).map_err(|e| ExtractError::InvalidSelector {
        selector: selector.to_string(),
        reason: format!("{:?}", e),
    })
}

impl ReviewExtractor {
    pub fn new(config: &SelectorConfig, min_text_chars: usize) -> Result<Self, ExtractError> {
        if config.reviews.is_empty() {
            return Err(ExtractError::EmptySelectorList { name: "reviews" });
        }

        Ok(Self {
            reviews: compile(&config.reviews.join(", "))?,
            primary: compile(&config.primary_text)?,
            fallbacks: config
                .fallback_text
                .iter()
                .map(|s| compile(s))
                .collect::<Result<_, _>>()?,
            noise: config
                .noise
                .iter()
                .map(|s| compile(s))
                .collect::<Result<_, _>>()?,
            anchors: config
                .anchors
                .iter()
                .map(|s| compile(s).map(|sel| (s.clone(), sel)))
                .collect::<Result<_, _>>()?,
            min_text_chars,
        })
    }

    /// Recover the review text under `root`, or `None` if no strategy
    /// yields any.
    pub fn extract(&self, root: ElementRef<'_>) -> Option<String> {
        if let Some(el) = root.select(&self.primary).next() {
            let text = el.text().collect::<String>();
            let text = text.trim();
            if !text.is_empty() {
                return Some(text.to_string());
            }
        }

        for selector in &self.fallbacks {
            let Some(el) = root.select(selector).next() else {
                continue;
            };
            if el.text().all(|t| t.trim().is_empty()) {
                continue;
            }
            let text = self.sanitized_text(el);
            if !text.is_empty() {
                return Some(text);
            }
        }

        None
    }

    /// Text of a detached copy of `element` with noise subtrees removed.
    /// The live document is never touched.
    fn sanitized_text(&self, element: ElementRef<'_>) -> String {
        let copy = Html::parse_fragment(&element.html());

        let stripped: HashSet<_> = self
            .noise
            .iter()
            .flat_map(|selector| copy.select(selector))
            .map(|el| el.id())
            .collect();

        let mut text = String::new();
        for node in copy.root_element().descendants() {
            let Some(fragment) = node.value().as_text() else {
                continue;
            };
            if node.ancestors().any(|a| stripped.contains(&a.id())) {
                continue;
            }
            text.push_str(fragment);
        }

        text.trim().to_string()
    }

    /// Parse `html`, collect review elements and extract scorable text.
    pub fn scan(&self, html: &str) -> PageScan {
        let document = Html::parse_document(html);

        let mut scan = PageScan {
            anchor: self.find_anchor(&document),
            ..PageScan::default()
        };

        for (position, element) in document.select(&self.reviews).enumerate() {
            scan.discovered += 1;
            match self.extract(element) {
                Some(text) if text.chars().count() > self.min_text_chars => {
                    debug!(
                        element = position,
                        preview = %preview(&text, 50),
                        "Extracted review text"
                    );
                    scan.candidates.push(CandidateReview {
                        element: ElementHandle(position),
                        text,
                    });
                }
                Some(_) => debug!(element = position, "Skipping very short review element"),
                None => debug!(element = position, "Could not extract review text"),
            }
        }

        info!(
            discovered = scan.discovered,
            candidates = scan.candidates.len(),
            anchor = scan.anchor.as_deref().unwrap_or("<none>"),
            "Scanned page for reviews"
        );
        scan
    }

    fn find_anchor(&self, document: &Html) -> Option<String> {
        self.anchors
            .iter()
            .find(|(_, selector)| document.select(selector).next().is_some())
            .map(|(name, _)| name.clone())
    }
}

/// First `max_chars` characters of `text`, for log lines and previews.
pub(crate) fn preview(text: &str, max_chars: usize) -> String {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => format!("{}...", &text[..idx]),
        None => text.to_string(),
    }
}
