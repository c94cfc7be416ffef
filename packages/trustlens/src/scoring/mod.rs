//! Per-review scoring.
//!
//! - [`prompt`] - truncation and the scoring instruction
//! - [`parse`] - isolating and validating the provider's JSON reply
//! - [`weights`] - fixed-weight composite score and issue thresholds
//! - [`gemini`] - the Gemini-backed [`Judge`](crate::traits::Judge)
//! - [`scorer`] - one review in, one [`ReviewResult`](crate::types::ReviewResult) or failure out

pub mod gemini;
pub mod parse;
pub mod prompt;
pub mod scorer;
pub mod weights;

pub use gemini::{is_usable_key, GeminiJudge, API_KEY_PLACEHOLDER};
pub use parse::{isolate_json_object, parse_sub_scores};
pub use prompt::{scoring_prompt, truncate_review, TRUNCATION_MARKER};
pub use scorer::Scorer;
pub use weights::{detect_issues, evaluate, raw_score, suspicion_score};
