//! The privileged side of the pipeline.
//!
//! Provider credentials and the result store live in a separate task that
//! the page-facing code can only reach through a message channel. Each
//! request carries its own reply slot, so every request gets at most one
//! reply. Analysis requests run concurrently and may be answered in any
//! order; saves are applied one at a time in arrival order.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::{mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::{ScoreFailure, ScoreResult, StoreError, StoreResult};
use crate::traits::{Judge, ResultStore};
use crate::types::{ReviewResult, SubScores};

/// Requests buffered before senders wait.
const CHANNEL_CAPACITY: usize = 64;

/// A message to the broker.
#[derive(Debug)]
pub enum BrokerRequest {
    /// Score one review's text
    AnalyzeWithGemini {
        text: String,
        reply: oneshot::Sender<ScoreResult<SubScores>>,
    },

    /// Replace the stored results
    SaveAnalysis {
        data: Vec<ReviewResult>,
        reply: oneshot::Sender<StoreResult<()>>,
    },

    /// Read the stored results
    GetAnalysis {
        reply: oneshot::Sender<StoreResult<Option<Vec<ReviewResult>>>>,
    },
}

impl BrokerRequest {
    pub fn action(&self) -> &'static str {
        match self {
            BrokerRequest::AnalyzeWithGemini { .. } => "analyzeWithGemini",
            BrokerRequest::SaveAnalysis { .. } => "saveAnalysis",
            BrokerRequest::GetAnalysis { .. } => "getAnalysis",
        }
    }
}

/// Start a broker owning `judge` and `store`.
///
/// The task runs until every [`BrokerHandle`] is dropped.
pub fn spawn<J, S>(judge: J, store: S) -> (BrokerHandle, JoinHandle<()>)
where
    J: Judge + 'static,
    S: ResultStore + 'static,
{
    let (tx, rx) = mpsc::channel(CHANNEL_CAPACITY);
    let task = tokio::spawn(serve(rx, Arc::new(judge), Arc::new(store)));
    (BrokerHandle { tx }, task)
}

async fn serve<J, S>(mut rx: mpsc::Receiver<BrokerRequest>, judge: Arc<J>, store: Arc<S>)
where
    J: Judge + 'static,
    S: ResultStore + 'static,
{
    info!("Broker started");

    while let Some(request) = rx.recv().await {
        debug!(action = request.action(), "Broker request");

        match request {
            BrokerRequest::AnalyzeWithGemini { text, reply } => {
                if text.trim().is_empty() {
                    let outcome = Err(ScoreFailure::transport("No text provided for analysis."));
                    if reply.send(outcome).is_err() {
                        debug!("Requester went away before the analysis reply");
                    }
                    continue;
                }

                let judge = judge.clone();
                tokio::spawn(async move {
                    let outcome = judge.judge(&text).await;
                    if reply.send(outcome).is_err() {
                        debug!("Requester went away before the analysis reply");
                    }
                });
            }
            BrokerRequest::SaveAnalysis { data, reply } => {
                let outcome = store.save_analysis(&data).await;
                if let Err(e) = &outcome {
                    error!(error = %e, "Error saving analysis");
                }
                if reply.send(outcome).is_err() {
                    debug!("Requester went away before the save reply");
                }
            }
            BrokerRequest::GetAnalysis { reply } => {
                if reply.send(store.load_analysis().await).is_err() {
                    debug!("Requester went away before the stored analysis reply");
                }
            }
        }
    }

    info!("Broker channel closed, shutting down");
}

/// Page-side handle to a running broker. Cheap to clone.
#[derive(Debug, Clone)]
pub struct BrokerHandle {
    tx: mpsc::Sender<BrokerRequest>,
}

impl BrokerHandle {
    async fn request<T>(
        &self,
        build: impl FnOnce(oneshot::Sender<T>) -> BrokerRequest,
    ) -> Option<T> {
        let (reply, response) = oneshot::channel();
        if self.tx.send(build(reply)).await.is_err() {
            return None;
        }
        response.await.ok()
    }
}

#[async_trait]
impl Judge for BrokerHandle {
    async fn judge(&self, text: &str) -> ScoreResult<SubScores> {
        let text = text.to_string();
        self.request(|reply| BrokerRequest::AnalyzeWithGemini { text, reply })
            .await
            .unwrap_or_else(|| {
                error!("Connection error sending analysis request to broker");
                Err(ScoreFailure::transport(
                    "Could not establish connection. Receiving end does not exist.",
                ))
            })
    }
}

#[async_trait]
impl ResultStore for BrokerHandle {
    async fn save_analysis(&self, results: &[ReviewResult]) -> StoreResult<()> {
        let data = results.to_vec();
        self.request(|reply| BrokerRequest::SaveAnalysis { data, reply })
            .await
            .unwrap_or_else(|| Err(StoreError::Unavailable("broker is not running".into())))
    }

    async fn load_analysis(&self) -> StoreResult<Option<Vec<ReviewResult>>> {
        self.request(|reply| BrokerRequest::GetAnalysis { reply })
            .await
            .unwrap_or_else(|| Err(StoreError::Unavailable("broker is not running".into())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stores::MemoryStore;
    use crate::testing::MockJudge;
    use std::time::Duration;

    #[tokio::test]
    async fn test_analyze_round_trip() {
        let judge = MockJudge::new().with_scores("mug", SubScores::new(0.9, 0.1, 0.0, 0.0));
        let (handle, _task) = spawn(judge, MemoryStore::new());

        let scores = handle.judge("Lovely mug").await.unwrap();
        assert_eq!(scores, SubScores::new(0.9, 0.1, 0.0, 0.0));
    }

    #[tokio::test]
    async fn test_empty_text_never_reaches_provider() {
        let judge = MockJudge::new();
        let (handle, _task) = spawn(judge.clone(), MemoryStore::new());

        let err = handle.judge("   ").await.unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert_eq!(judge.call_count(), 0);
    }

    #[tokio::test]
    async fn test_concurrent_requests_do_not_block_each_other() {
        let judge = MockJudge::new()
            .with_delay("slow", Duration::from_millis(200))
            .with_scores("slow", SubScores::new(1.0, 1.0, 1.0, 1.0));
        let (handle, _task) = spawn(judge, MemoryStore::new());

        let slow = handle.judge("slow review");
        let fast = async {
            let scores = handle.judge("fast review").await;
            (scores, tokio::time::Instant::now())
        };
        let started = tokio::time::Instant::now();
        let (slow, (fast, fast_done)) = tokio::join!(slow, fast);

        assert!(slow.is_ok());
        assert!(fast.is_ok());
        assert!(fast_done.duration_since(started) < Duration::from_millis(200));
    }

    #[tokio::test]
    async fn test_save_and_load_through_broker() {
        let (handle, _task) = spawn(MockJudge::new(), MemoryStore::new());
        let results = vec![ReviewResult {
            text: "stored".into(),
            issues: vec![],
            suspicion_score: 12,
        }];

        assert_eq!(handle.load_analysis().await.unwrap(), None);
        handle.save_analysis(&results).await.unwrap();
        assert_eq!(handle.load_analysis().await.unwrap(), Some(results));
    }

    #[tokio::test]
    async fn test_stopped_broker_is_transport_failure() {
        let (handle, task) = spawn(MockJudge::new(), MemoryStore::new());
        task.abort();
        let _ = task.await;

        let err = handle.judge("anyone there?").await.unwrap_err();
        assert_eq!(err.kind(), "transport");
        assert!(matches!(
            handle.load_analysis().await,
            Err(StoreError::Unavailable(_))
        ));
    }

    #[tokio::test]
    async fn test_abandoned_requests_do_not_stop_the_broker() {
        let store = Arc::new(MemoryStore::new());
        let (handle, _task) = spawn(MockJudge::new(), store.clone());

        let (reply, response) = oneshot::channel();
        drop(response);
        handle
            .tx
            .send(BrokerRequest::SaveAnalysis {
                data: vec![ReviewResult {
                    text: "nobody waits for this".into(),
                    issues: vec![],
                    suspicion_score: 5,
                }],
                reply,
            })
            .await
            .unwrap();

        let (reply, response) = oneshot::channel();
        drop(response);
        handle
            .tx
            .send(BrokerRequest::AnalyzeWithGemini {
                text: " ".into(),
                reply,
            })
            .await
            .unwrap();

        let stored = handle.load_analysis().await.unwrap().unwrap();
        assert_eq!(stored[0].text, "nobody waits for this");
        assert_eq!(store.save_count(), 1);
    }

    #[test]
    fn test_action_names() {
        let (reply, _rx) = oneshot::channel();
        let request = BrokerRequest::GetAnalysis { reply };
        assert_eq!(request.action(), "getAnalysis");
    }
}
