//! Persistence collaborator.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::types::ReviewResult;

/// Holds the results of the most recent run. A save replaces whatever was
/// stored before; results from different runs are never merged.
#[async_trait]
pub trait ResultStore: Send + Sync {
    async fn save_analysis(&self, results: &[ReviewResult]) -> StoreResult<()>;

    /// The last saved results, or `None` if nothing was ever saved.
    async fn load_analysis(&self) -> StoreResult<Option<Vec<ReviewResult>>>;
}

#[async_trait]
impl<T: ResultStore + ?Sized> ResultStore for Arc<T> {
    async fn save_analysis(&self, results: &[ReviewResult]) -> StoreResult<()> {
        (**self).save_analysis(results).await
    }

    async fn load_analysis(&self) -> StoreResult<Option<Vec<ReviewResult>>> {
        (**self).load_analysis().await
    }
}
