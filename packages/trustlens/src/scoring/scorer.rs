//! One review in, one result or tagged failure out.

use std::time::Duration;

use tracing::{debug, warn};

use super::prompt::truncate_review;
use super::weights::evaluate;
use crate::error::{ScoreFailure, ScoreResult};
use crate::traits::Judge;
use crate::types::{config::DEFAULT_PROVIDER_TIMEOUT, ReviewResult, DEFAULT_MAX_TEXT_CHARS};

/// Scores single reviews through a [`Judge`].
///
/// Steps run strictly in sequence for one review: truncate, judge (bounded
/// by a timeout), weight, derive issues.
pub struct Scorer<J> {
    judge: J,
    max_text_chars: usize,
    timeout: Duration,
}

impl<J: Judge> Scorer<J> {
    pub fn new(judge: J) -> Self {
        Self {
            judge,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            timeout: DEFAULT_PROVIDER_TIMEOUT,
        }
    }

    pub fn with_max_text_chars(mut self, max: usize) -> Self {
        self.max_text_chars = max;
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn judge(&self) -> &J {
        &self.judge
    }

    /// Score `text`. The returned result carries the full, untruncated text.
    pub async fn score(&self, text: &str) -> ScoreResult<ReviewResult> {
        let payload = truncate_review(text, self.max_text_chars);

        let scores = match tokio::time::timeout(self.timeout, self.judge.judge(&payload)).await {
            Ok(outcome) => outcome?,
            Err(_) => {
                warn!(
                    timeout_secs = self.timeout.as_secs_f64(),
                    "Provider call timed out"
                );
                return Err(ScoreFailure::transport(format!(
                    "provider did not answer within {:?}",
                    self.timeout
                )));
            }
        };

        let result = evaluate(text, &scores);
        debug!(
            score = result.suspicion_score,
            issues = result.issues.len(),
            "Review scored"
        );
        Ok(result)
    }
}
