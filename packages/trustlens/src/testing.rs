//! Testing utilities including mock implementations.
//!
//! These let applications and tests drive the analysis pipeline without
//! calling a real language model or touching disk.

use std::sync::{Arc, RwLock};
use std::time::Duration;

use async_trait::async_trait;

use crate::error::{ScoreFailure, ScoreResult, StoreError, StoreResult};
use crate::traits::{Judge, ResultStore};
use crate::types::{ReviewResult, SubScores};

/// What the mock does for review text containing a given needle.
#[derive(Debug, Clone)]
enum Rule {
    Scores(SubScores),
    Fail(ScoreFailure),
    Delay(Duration),
}

/// A mock judge for testing.
///
/// Responses are chosen by substring: the first rule whose needle occurs in
/// the review text applies. Delay rules stack with the rule that follows.
/// Every received text is recorded for assertions.
#[derive(Default, Clone)]
pub struct MockJudge {
    rules: Arc<RwLock<Vec<(String, Rule)>>>,
    default_scores: Option<SubScores>,
    received: Arc<RwLock<Vec<String>>>,
}

impl MockJudge {
    /// A judge that scores everything 0.0 unless told otherwise.
    pub fn new() -> Self {
        Self::default()
    }

    /// Scores for text that matches no rule.
    pub fn with_default_scores(mut self, scores: SubScores) -> Self {
        self.default_scores = Some(scores);
        self
    }

    /// Return `scores` for text containing `needle`.
    pub fn with_scores(self, needle: impl Into<String>, scores: SubScores) -> Self {
        self.push(needle, Rule::Scores(scores))
    }

    /// Fail text containing `needle`.
    pub fn with_failure(self, needle: impl Into<String>, failure: ScoreFailure) -> Self {
        self.push(needle, Rule::Fail(failure))
    }

    /// Wait `delay` before answering text containing `needle`.
    pub fn with_delay(self, needle: impl Into<String>, delay: Duration) -> Self {
        self.push(needle, Rule::Delay(delay))
    }

    fn push(self, needle: impl Into<String>, rule: Rule) -> Self {
        self.rules.write().unwrap().push((needle.into(), rule));
        self
    }

    /// Texts received so far, in call order.
    pub fn received(&self) -> Vec<String> {
        self.received.read().unwrap().clone()
    }

    pub fn call_count(&self) -> usize {
        self.received.read().unwrap().len()
    }
}

#[async_trait]
impl Judge for MockJudge {
    async fn judge(&self, text: &str) -> ScoreResult<SubScores> {
        self.received.write().unwrap().push(text.to_string());

        let matching: Vec<Rule> = self
            .rules
            .read()
            .unwrap()
            .iter()
            .filter(|(needle, _)| text.contains(needle.as_str()))
            .map(|(_, rule)| rule.clone())
            .collect();

        for rule in matching {
            match rule {
                Rule::Delay(delay) => tokio::time::sleep(delay).await,
                Rule::Scores(scores) => return Ok(scores),
                Rule::Fail(failure) => return Err(failure),
            }
        }

        Ok(self
            .default_scores
            .unwrap_or_else(|| SubScores::new(0.0, 0.0, 0.0, 0.0)))
    }
}

/// A store whose writes always fail. Reads return nothing.
#[derive(Debug, Default, Clone)]
pub struct FailingStore {
    attempts: Arc<RwLock<usize>>,
}

impl FailingStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn attempts(&self) -> usize {
        *self.attempts.read().unwrap()
    }
}

#[async_trait]
impl ResultStore for FailingStore {
    async fn save_analysis(&self, _results: &[ReviewResult]) -> StoreResult<()> {
        *self.attempts.write().unwrap() += 1;
        Err(StoreError::Unavailable("mock store refuses writes".into()))
    }

    async fn load_analysis(&self) -> StoreResult<Option<Vec<ReviewResult>>> {
        Ok(None)
    }
}

/// A product page with one review element per text, laid out the way the
/// default selectors expect.
pub fn review_page_html(reviews: &[&str]) -> String {
    let mut html = String::from("<html><body><div id=\"centerCol\"><h1>Kettle</h1></div>");
    for text in reviews {
        html.push_str(&format!(
            "<div data-hook=\"review\"><div data-hook=\"review-body\"><span>{}</span></div></div>",
            text
        ));
    }
    html.push_str("</body></html>");
    html
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_mock_judge_rules() {
        let judge = MockJudge::new()
            .with_scores("great", SubScores::new(1.0, 0.0, 0.0, 0.0))
            .with_failure("broken", ScoreFailure::transport("down"));

        assert_eq!(
            judge.judge("great stuff").await.unwrap(),
            SubScores::new(1.0, 0.0, 0.0, 0.0)
        );
        assert!(judge.judge("broken stuff").await.is_err());
        assert_eq!(
            judge.judge("other").await.unwrap(),
            SubScores::new(0.0, 0.0, 0.0, 0.0)
        );
        assert_eq!(judge.call_count(), 3);
    }

    #[test]
    fn test_review_page_html_has_anchor_and_reviews() {
        let html = review_page_html(&["one review", "two review"]);
        assert!(html.contains("id=\"centerCol\""));
        assert_eq!(html.matches("data-hook=\"review\"").count(), 2);
    }
}
