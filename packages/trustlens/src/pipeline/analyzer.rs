//! End-to-end analysis of one page.
//!
//! ```text
//! Page ──gate──► scan (extract candidates)
//!                   │
//!                   ├─► score #0 ─┐
//!                   ├─► score #1 ─┼─► settle all ─► keep successes (discovery order)
//!                   └─► score #n ─┘                     │
//!                                                       ├─► present (remove old block, insert new)
//!                                                       └─► persist (overwrite)
//! ```

use chrono::Utc;
use futures::future::join_all;
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use crate::error::ExtractError;
use crate::extract::{PageScan, ReviewExtractor};
use crate::scoring::Scorer;
use crate::traits::{Judge, Presenter, ResultStore, UiBlock};
use crate::types::{AnalysisRun, AnalyzerConfig, Page, RunOutcome, ScoredReview, SkipReason};

/// Drives extraction, concurrent scoring, aggregation and handoff.
///
/// At most one run is in flight per analyzer; a call to [`run`](Self::run)
/// while another is active returns [`RunOutcome::AlreadyRunning`] without
/// touching the presenter or the store.
pub struct Analyzer<J, S, P> {
    config: AnalyzerConfig,
    extractor: ReviewExtractor,
    scorer: Scorer<J>,
    store: S,
    presenter: P,
    in_flight: Mutex<()>,
}

impl<J, S, P> Analyzer<J, S, P>
where
    J: Judge,
    S: ResultStore,
    P: Presenter,
{
    pub fn new(config: AnalyzerConfig, judge: J, store: S, presenter: P) -> Result<Self, ExtractError> {
        let extractor = ReviewExtractor::new(&config.selectors, config.min_text_chars)?;
        let scorer = Scorer::new(judge)
            .with_max_text_chars(config.max_text_chars)
            .with_timeout(config.provider_timeout);

        Ok(Self {
            config,
            extractor,
            scorer,
            store,
            presenter,
            in_flight: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &AnalyzerConfig {
        &self.config
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn presenter(&self) -> &P {
        &self.presenter
    }

    /// Whether `page` should be analyzed at all.
    pub fn gate(&self, page: &Page) -> Option<SkipReason> {
        if !page.top_level {
            Some(SkipReason::Embedded)
        } else if !page.is_on_host(&self.config.target_host) {
            Some(SkipReason::OffTarget)
        } else {
            None
        }
    }

    /// Analyze `page` and publish the results.
    pub async fn run(&self, page: &Page) -> RunOutcome {
        if let Some(reason) = self.gate(page) {
            info!(url = %page.url, ?reason, "Page not eligible for analysis");
            return RunOutcome::Skipped(reason);
        }

        let Ok(_guard) = self.in_flight.try_lock() else {
            info!(url = %page.url, "Analysis already in progress, ignoring request");
            return RunOutcome::AlreadyRunning;
        };

        let started_at = Utc::now();
        let PageScan {
            discovered,
            candidates,
            anchor,
        } = self.extractor.scan(&page.html);

        if candidates.is_empty() {
            info!(url = %page.url, discovered, "No reviews with analyzable text");
            return RunOutcome::NothingAnalyzable {
                discovered,
                candidates: 0,
                failed: 0,
            };
        }

        info!(
            url = %page.url,
            candidates = candidates.len(),
            "Starting review analysis"
        );

        let dispatched = candidates.len();
        let settled = join_all(candidates.into_iter().enumerate().map(|(index, candidate)| async move {
            let outcome = self.scorer.score(&candidate.text).await;
            (index, candidate.element, outcome)
        }))
        .await;

        let mut tagged: Vec<(usize, ScoredReview)> = Vec::with_capacity(dispatched);
        let mut failed = 0;
        for (index, element, outcome) in settled {
            match outcome {
                Ok(result) => tagged.push((index, ScoredReview { element, result })),
                Err(failure) => {
                    failed += 1;
                    warn!(
                        element = element.position(),
                        kind = failure.kind(),
                        error = %failure,
                        "Review could not be scored"
                    );
                }
            }
        }
        tagged.sort_by_key(|(index, _)| *index);
        let reviews: Vec<ScoredReview> = tagged.into_iter().map(|(_, review)| review).collect();

        if reviews.is_empty() {
            info!(url = %page.url, failed, "Could not successfully analyze any reviews");
            return RunOutcome::NothingAnalyzable {
                discovered,
                candidates: dispatched,
                failed,
            };
        }

        let run = AnalysisRun::new(page.url.as_str(), started_at, dispatched, reviews);
        info!(
            run_id = %run.id,
            analyzed = run.reviews.len(),
            failed,
            average = run.average_suspicion_score,
            "Review analysis complete"
        );

        self.present(&run, anchor.as_deref());
        self.persist(&run).await;

        RunOutcome::Completed(run)
    }

    /// Replace the summary block. Without an anchor the previous block is
    /// left in place. Failures are logged and do not affect persistence.
    fn present(&self, run: &AnalysisRun, anchor: Option<&str>) {
        let Some(anchor) = anchor else {
            error!("Could not find suitable target container for the summary block");
            return;
        };

        let block_id = &self.config.ui_block_id;
        if self.presenter.remove_block(block_id) {
            info!(block_id = %block_id, "Removed previous summary block");
        }

        if let Err(e) = self
            .presenter
            .insert_block(UiBlock::from_run(block_id.as_str(), anchor, run))
        {
            error!(error = %e, "Failed to present analysis");
        }
    }

    /// Overwrite the stored results. Failures are logged and do not affect
    /// presentation.
    async fn persist(&self, run: &AnalysisRun) {
        if let Err(e) = self.store.save_analysis(&run.results()).await {
            error!(run_id = %run.id, error = %e, "Error saving analysis");
        }
    }
}
