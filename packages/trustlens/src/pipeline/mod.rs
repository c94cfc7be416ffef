//! Orchestration: the per-page analyzer and the session that re-runs it.

pub mod analyzer;
pub mod session;

pub use analyzer::Analyzer;
pub use session::{Ack, PageSession, SessionHandle, SessionMessage, Trigger, ANALYSIS_TRIGGERED};
