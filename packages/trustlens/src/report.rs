//! Text rendering of run summaries and of stored results.

use colored::{ColoredString, Colorize};

use crate::extract::preview;
use crate::traits::UiBlock;
use crate::types::{average_score, ReviewResult, ScoreBand};

pub const NO_ANALYSIS: &str = "No review analysis available or analysis failed.";
pub const RETRY_HINT: &str = "Try analyzing again: trustlens analyze <URL>";
pub const NO_ISSUES: &str = "No major issues flagged.";

const PREVIEW_CHARS: usize = 150;

fn paint(text: String, band: ScoreBand) -> ColoredString {
    match band {
        ScoreBand::Low => text.green().bold(),
        ScoreBand::Medium => text.yellow().bold(),
        ScoreBand::High => text.red().bold(),
    }
}

/// Terminal rendering of a summary block and its per-review badges.
pub fn render_block(block: &UiBlock) -> String {
    let mut out = String::new();
    out.push_str(&format!("{}\n", "TrustLens Review Analysis".bold()));
    out.push_str(&format!("{}\n", paint(block.headline(), block.band)));
    for badge in &block.badges {
        out.push_str(&format!(
            "  review element #{:<3} {}\n",
            badge.element.position(),
            paint(format!("{}%", badge.score), badge.band)
        ));
    }
    out.push_str(&format!("{}\n", block.footnote().dimmed()));
    out
}

/// One stored review as listed in the details view.
#[derive(Debug, Clone, PartialEq)]
pub struct ReviewEntry {
    /// 1-based position in the stored results
    pub number: usize,
    pub score: u8,
    pub band: ScoreBand,
    pub preview: String,
    pub issues: Vec<String>,
}

/// Details of the last stored run.
#[derive(Debug, Clone, PartialEq)]
pub enum DetailsView {
    /// Nothing stored; shown with a retry hint, never as a blank screen
    Empty,
    Reviews {
        average: u8,
        entries: Vec<ReviewEntry>,
    },
}

impl DetailsView {
    pub fn from_stored(stored: Option<Vec<ReviewResult>>) -> Self {
        let results = match stored {
            Some(results) if !results.is_empty() => results,
            _ => return DetailsView::Empty,
        };

        let average = average_score(results.iter().map(|r| r.suspicion_score));
        let entries = results
            .iter()
            .enumerate()
            .map(|(i, review)| ReviewEntry {
                number: i + 1,
                score: review.suspicion_score,
                band: review.band(),
                preview: if review.text.is_empty() {
                    "[Review text missing]".to_string()
                } else {
                    preview(&review.text, PREVIEW_CHARS)
                },
                issues: review
                    .issues
                    .iter()
                    .map(|issue| format!("{} (Weight: {:.0}%)", issue.criterion, issue.weight_percent))
                    .collect(),
            })
            .collect();

        DetailsView::Reviews { average, entries }
    }

    pub fn render(&self) -> String {
        let (average, entries) = match self {
            DetailsView::Empty => return format!("{}\n{}\n", NO_ANALYSIS, RETRY_HINT.dimmed()),
            DetailsView::Reviews { average, entries } => (*average, entries),
        };

        let mut out = format!(
            "Overall Suspicion Score: {}  ({} review(s))\n",
            paint(format!("{}%", average), ScoreBand::from_score(average)),
            entries.len()
        );

        for entry in entries {
            out.push_str(&format!(
                "\n{}  {}\n  {}\n",
                format!("Review {}", entry.number).bold(),
                paint(format!("{}%", entry.score), entry.band),
                entry.preview
            ));
            if entry.issues.is_empty() {
                out.push_str(&format!("  {}\n", NO_ISSUES.italic()));
            } else {
                out.push_str("  Potential Issues Detected:\n");
                for issue in &entry.issues {
                    out.push_str(&format!("    - {}\n", issue));
                }
            }
        }
        out
    }
}
