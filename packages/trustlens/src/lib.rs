//! Review authenticity scoring for shopping pages
//!
//! Finds the customer reviews on a product page, asks a language model to
//! rate each one on four fixed criteria, folds those into a 0-100 suspicion
//! score, and publishes an average for the page.
//!
//! # Usage
//!
//! ```rust,ignore
//! use trustlens::{Analyzer, AnalyzerConfig, MemoryStore, MemorySurface, Page};
//! use trustlens::testing::MockJudge;
//!
//! let analyzer = Analyzer::new(
//!     AnalyzerConfig::default(),
//!     MockJudge::new(),
//!     MemoryStore::new(),
//!     MemorySurface::new(),
//! )?;
//!
//! let page = Page::new("https://www.amazon.com/dp/B000", html)?;
//! if let Some(run) = analyzer.run(&page).await.run() {
//!     println!("{}%", run.average_suspicion_score);
//! }
//! ```
//!
//! # Modules
//!
//! - [`extract`] - Review discovery and text extraction
//! - [`scoring`] - Prompting, reply parsing and the weighted score
//! - [`broker`] - Privileged task owning credentials and storage
//! - [`pipeline`] - Per-page analyzer and the session that re-runs it
//! - [`stores`] - Result storage (MemoryStore, FileStore)
//! - [`presenters`] - Presentation surfaces
//! - [`report`] - Terminal rendering of runs and stored results
//! - [`testing`] - Mock implementations for testing

pub mod broker;
pub mod config;
pub mod error;
pub mod extract;
pub mod fetch;
pub mod pipeline;
pub mod presenters;
pub mod report;
pub mod scoring;
pub mod stores;
pub mod testing;
pub mod traits;
pub mod types;

// Re-export core types at crate root
pub use error::{ExtractError, FetchError, PresentError, ScoreFailure, SessionError, StoreError};
pub use traits::{Badge, Judge, Presenter, ResultStore, UiBlock};
pub use types::{
    average_score, AnalysisRun, AnalyzerConfig, CandidateReview, Criterion, ElementHandle, Issue,
    Page, ReviewResult, RunOutcome, ScoreBand, ScoredReview, SelectorConfig, SkipReason, SubScores,
    UI_BLOCK_ID,
};

pub use broker::BrokerHandle;
pub use config::Config;
pub use extract::{PageScan, ReviewExtractor};
pub use fetch::PageFetcher;
pub use pipeline::{Analyzer, PageSession, SessionHandle, Trigger};
pub use presenters::{MemorySurface, TerminalPresenter};
pub use report::DetailsView;
pub use scoring::{GeminiJudge, Scorer};
pub use stores::{FileStore, MemoryStore};
