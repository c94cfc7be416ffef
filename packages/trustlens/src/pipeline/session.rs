//! A live page and the listener that re-runs analysis on request.

use std::sync::Arc;

use tokio::sync::{broadcast, mpsc, oneshot};
use tokio::task::JoinHandle;
use tracing::{debug, info};

use super::analyzer::Analyzer;
use crate::error::SessionError;
use crate::traits::{Judge, Presenter, ResultStore};
use crate::types::{Page, RunOutcome};

/// Acknowledgement text sent back for every accepted trigger.
pub const ANALYSIS_TRIGGERED: &str = "analysis triggered";

/// What caused a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Trigger {
    /// The page finished loading
    PageLoad,
    /// A user asked for a fresh analysis (`rerunAnalysis`)
    Rerun,
}

/// A message to a page session.
#[derive(Debug)]
pub enum SessionMessage {
    Analyze {
        trigger: Trigger,
        reply: oneshot::Sender<Ack>,
    },
}

/// Reply to a trigger. Sent as soon as the run is started, not when it ends.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ack {
    pub status: String,
}

/// Handle to a running session.
#[derive(Debug, Clone)]
pub struct SessionHandle {
    tx: mpsc::Sender<SessionMessage>,
    outcomes: broadcast::Sender<RunOutcome>,
}

impl SessionHandle {
    /// Ask for an analysis. Resolves once the session has started the run.
    pub async fn trigger(&self, trigger: Trigger) -> Result<Ack, SessionError> {
        let (reply, ack) = oneshot::channel();
        self.tx
            .send(SessionMessage::Analyze { trigger, reply })
            .await
            .map_err(|_| SessionError::Closed)?;
        ack.await.map_err(|_| SessionError::Closed)
    }

    /// Shorthand for a [`Trigger::Rerun`].
    pub async fn rerun(&self) -> Result<Ack, SessionError> {
        self.trigger(Trigger::Rerun).await
    }

    /// Outcomes of runs started after this call.
    pub fn subscribe(&self) -> broadcast::Receiver<RunOutcome> {
        self.outcomes.subscribe()
    }
}

/// Owns one page and serves analysis triggers for it.
pub struct PageSession;

impl PageSession {
    /// Start listening for triggers on `page`.
    ///
    /// Each accepted trigger starts a run in its own task and is
    /// acknowledged immediately. Overlapping triggers are resolved by the
    /// analyzer's single-run guard.
    pub fn spawn<J, S, P>(
        analyzer: Arc<Analyzer<J, S, P>>,
        page: Page,
    ) -> (SessionHandle, JoinHandle<()>)
    where
        J: Judge + 'static,
        S: ResultStore + 'static,
        P: Presenter + 'static,
    {
        let (tx, mut rx) = mpsc::channel(8);
        let (outcomes, _) = broadcast::channel(16);
        let handle = SessionHandle {
            tx,
            outcomes: outcomes.clone(),
        };
        let page = Arc::new(page);

        let task = tokio::spawn(async move {
            while let Some(SessionMessage::Analyze { trigger, reply }) = rx.recv().await {
                match trigger {
                    Trigger::PageLoad => info!(url = %page.url, "Page loaded, starting analysis"),
                    Trigger::Rerun => info!(url = %page.url, "Rerun analysis requested"),
                }

                let analyzer = analyzer.clone();
                let page = page.clone();
                let outcomes = outcomes.clone();
                tokio::spawn(async move {
                    let outcome = analyzer.run(&page).await;
                    if outcomes.send(outcome).is_err() {
                        debug!("No subscribers for run outcome");
                    }
                });

                let ack = Ack {
                    status: ANALYSIS_TRIGGERED.to_string(),
                };
                if reply.send(ack).is_err() {
                    debug!("Trigger sender went away before the acknowledgement");
                }
            }
            debug!("Session channel closed");
        });

        (handle, task)
    }
}
