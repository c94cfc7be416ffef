//! In-memory storage implementation for testing and development.

use std::sync::RwLock;

use async_trait::async_trait;

use crate::error::StoreResult;
use crate::traits::ResultStore;
use crate::types::ReviewResult;

/// Holds the last saved results in memory.
///
/// Useful for testing and development. Not suitable for production
/// as data is lost on restart.
#[derive(Debug, Default)]
pub struct MemoryStore {
    latest: RwLock<Option<Vec<ReviewResult>>>,
    saves: RwLock<usize>,
}

impl MemoryStore {
    /// Create a new empty memory store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of successful saves.
    pub fn save_count(&self) -> usize {
        *self.saves.read().unwrap()
    }

    /// Snapshot of the stored results.
    pub fn latest(&self) -> Option<Vec<ReviewResult>> {
        self.latest.read().unwrap().clone()
    }
}

#[async_trait]
impl ResultStore for MemoryStore {
    async fn save_analysis(&self, results: &[ReviewResult]) -> StoreResult<()> {
        *self.latest.write().unwrap() = Some(results.to_vec());
        *self.saves.write().unwrap() += 1;
        Ok(())
    }

    async fn load_analysis(&self) -> StoreResult<Option<Vec<ReviewResult>>> {
        Ok(self.latest())
    }
}
