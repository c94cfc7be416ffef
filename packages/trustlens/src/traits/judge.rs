//! Per-review judgment provider.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::ScoreResult;
use crate::types::SubScores;

/// Produces the four sub-scores for one review's text.
///
/// Implementations either call the language model directly or forward the
/// request to the process that holds the provider credentials. Each call
/// is independent; no ordering holds between the replies of concurrent
/// calls.
#[async_trait]
pub trait Judge: Send + Sync {
    async fn judge(&self, text: &str) -> ScoreResult<SubScores>;
}

#[async_trait]
impl<T: Judge + ?Sized> Judge for Arc<T> {
    async fn judge(&self, text: &str) -> ScoreResult<SubScores> {
        (**self).judge(text).await
    }
}
