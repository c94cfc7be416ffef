//! Presentation collaborator.

use std::sync::Arc;

use crate::error::PresentError;
use crate::types::{AnalysisRun, ElementHandle, ScoreBand};

/// Per-review score badge.
#[derive(Debug, Clone, PartialEq)]
pub struct Badge {
    pub element: ElementHandle,
    pub score: u8,
    pub band: ScoreBand,
}

/// The summary block shown for one run, plus the badges for its reviews.
#[derive(Debug, Clone, PartialEq)]
pub struct UiBlock {
    /// Stable identifier; a new block replaces any block with the same id
    pub id: String,

    /// Selector of the container the block is attached to
    pub anchor: String,

    pub average_score: u8,
    pub band: ScoreBand,
    pub review_count: usize,
    pub badges: Vec<Badge>,
}

impl UiBlock {
    pub fn from_run(id: impl Into<String>, anchor: impl Into<String>, run: &AnalysisRun) -> Self {
        Self {
            id: id.into(),
            anchor: anchor.into(),
            average_score: run.average_suspicion_score,
            band: run.band(),
            review_count: run.reviews.len(),
            badges: run
                .reviews
                .iter()
                .map(|r| Badge {
                    element: r.element,
                    score: r.result.suspicion_score,
                    band: r.result.band(),
                })
                .collect(),
        }
    }

    pub fn headline(&self) -> String {
        format!("Product Suspicion Score: {}%", self.average_score)
    }

    pub fn footnote(&self) -> String {
        format!(
            "Analysis based on {} review(s). Score reflects potential flags.",
            self.review_count
        )
    }
}

/// Where run summaries are shown.
///
/// The orchestrator always calls [`remove_block`](Presenter::remove_block)
/// with the stable block id before [`insert_block`](Presenter::insert_block),
/// so a surface never shows two summaries.
pub trait Presenter: Send + Sync {
    /// Remove the block with `block_id`. Returns whether one was present.
    fn remove_block(&self, block_id: &str) -> bool;

    fn insert_block(&self, block: UiBlock) -> Result<(), PresentError>;
}

impl<T: Presenter + ?Sized> Presenter for Arc<T> {
    fn remove_block(&self, block_id: &str) -> bool {
        (**self).remove_block(block_id)
    }

    fn insert_block(&self, block: UiBlock) -> Result<(), PresentError> {
        (**self).insert_block(block)
    }
}
