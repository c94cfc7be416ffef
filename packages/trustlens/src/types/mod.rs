//! Domain types.

pub mod config;
pub mod page;
pub mod review;
pub mod run;

pub use config::{
    AnalyzerConfig, SelectorConfig, DEFAULT_MAX_TEXT_CHARS, DEFAULT_PROVIDER_TIMEOUT, UI_BLOCK_ID,
};
pub use page::Page;
pub use review::{
    CandidateReview, Criterion, ElementHandle, Issue, ReviewResult, ScoreBand, ScoredReview,
    SubScores,
};
pub use run::{average_score, AnalysisRun, RunOutcome, SkipReason};
