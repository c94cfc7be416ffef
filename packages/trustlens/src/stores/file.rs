//! JSON file storage.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::error::StoreResult;
use crate::traits::ResultStore;
use crate::types::ReviewResult;

/// On-disk layout: a single key holding the latest results. Entries are
/// read as raw JSON so one bad entry does not hide the rest.
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct StoredAnalysis<T> {
    #[serde(default)]
    review_analysis: Option<T>,
}

/// Keeps the latest results in one JSON file. Each save rewrites the file
/// through a temporary sibling and a rename, so readers never see a
/// half-written file.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl ResultStore for FileStore {
    async fn save_analysis(&self, results: &[ReviewResult]) -> StoreResult<()> {
        let body = serde_json::to_vec_pretty(&StoredAnalysis {
            review_analysis: Some(results),
        })?;

        let temp = self.temp_path();
        tokio::fs::write(&temp, body).await?;
        tokio::fs::rename(&temp, &self.path).await?;

        debug!(path = %self.path.display(), reviews = results.len(), "Saved analysis");
        Ok(())
    }

    async fn load_analysis(&self) -> StoreResult<Option<Vec<ReviewResult>>> {
        let bytes = match tokio::fs::read(&self.path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(e.into()),
        };

        let stored: StoredAnalysis<Vec<serde_json::Value>> = serde_json::from_slice(&bytes)?;
        let Some(entries) = stored.review_analysis else {
            return Ok(None);
        };

        let results = entries
            .into_iter()
            .enumerate()
            .filter_map(|(index, entry)| match serde_json::from_value(entry) {
                Ok(result) => Some(result),
                Err(e) => {
                    warn!(index, error = %e, "Skipping invalid stored review entry");
                    None
                }
            })
            .collect();
        Ok(Some(results))
    }
}
