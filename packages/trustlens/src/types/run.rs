//! One end-to-end analysis of a page.

use chrono::{DateTime, Utc};
use uuid::Uuid;

use super::review::{ReviewResult, ScoreBand, ScoredReview};

/// The results of one page visit, replaced wholesale by the next run.
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisRun {
    pub id: Uuid,
    pub page_url: String,
    pub started_at: DateTime<Utc>,
    pub completed_at: DateTime<Utc>,

    /// Successfully scored reviews, in element discovery order
    pub reviews: Vec<ScoredReview>,

    /// Candidates dispatched to the scorer (successes plus failures)
    pub dispatched: usize,

    pub average_suspicion_score: u8,
}

impl AnalysisRun {
    pub fn new(
        page_url: impl Into<String>,
        started_at: DateTime<Utc>,
        dispatched: usize,
        reviews: Vec<ScoredReview>,
    ) -> Self {
        let average = average_score(reviews.iter().map(|r| r.result.suspicion_score));
        Self {
            id: Uuid::new_v4(),
            page_url: page_url.into(),
            started_at,
            completed_at: Utc::now(),
            reviews,
            dispatched,
            average_suspicion_score: average,
        }
    }

    /// Owned copies of the per-review results, for the persistence handoff.
    pub fn results(&self) -> Vec<ReviewResult> {
        self.reviews.iter().map(|r| r.result.clone()).collect()
    }

    pub fn failed(&self) -> usize {
        self.dispatched.saturating_sub(self.reviews.len())
    }

    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.average_suspicion_score)
    }
}

/// Mean of the scores rounded half-up, or 0 when there are none.
pub fn average_score(scores: impl IntoIterator<Item = u8>) -> u8 {
    let (sum, count) = scores
        .into_iter()
        .fold((0u64, 0u64), |(sum, count), s| (sum + u64::from(s), count + 1));
    if count == 0 {
        return 0;
    }
    ((sum * 2 + count) / (count * 2)) as u8
}

/// Why a run did nothing at all.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The page is not on the target site
    OffTarget,
    /// The page is embedded in another page (frame)
    Embedded,
}

/// What a call to the orchestrator produced.
#[derive(Debug, Clone, PartialEq)]
pub enum RunOutcome {
    /// At least one review was scored; presentation and persistence were attempted
    Completed(AnalysisRun),

    /// Nothing could be scored; no visible effect
    NothingAnalyzable {
        discovered: usize,
        candidates: usize,
        failed: usize,
    },

    /// Gate rejected the page
    Skipped(SkipReason),

    /// Another run for this analyzer was still in flight
    AlreadyRunning,
}

impl RunOutcome {
    pub fn run(&self) -> Option<&AnalysisRun> {
        match self {
            RunOutcome::Completed(run) => Some(run),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_average_rounds_half_up() {
        assert_eq!(average_score([10, 11]), 11);
        assert_eq!(average_score([10, 10, 11]), 10);
        assert_eq!(average_score([38, 100, 0]), 46);
        assert_eq!(average_score([100, 100]), 100);
    }

    #[test]
    fn test_average_of_nothing_is_zero() {
        assert_eq!(average_score(std::iter::empty()), 0);
    }
}
