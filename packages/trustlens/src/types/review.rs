//! Per-review types: sub-scores, criteria, issues and results.

use serde::{Deserialize, Serialize};

/// Four independent provider judgments for one review, each in `[0.0, 1.0]`.
///
/// Field names on the wire match what the provider is asked to return.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SubScores {
    #[serde(rename = "superlativesPunctuationScore")]
    pub superlatives_punctuation: f64,

    #[serde(rename = "genericContentScore")]
    pub generic_content: f64,

    #[serde(rename = "aiWrittenScore")]
    pub ai_written: f64,

    #[serde(rename = "behaviorPatternsScore")]
    pub behavior_patterns: f64,
}

impl SubScores {
    pub fn new(
        superlatives_punctuation: f64,
        generic_content: f64,
        ai_written: f64,
        behavior_patterns: f64,
    ) -> Self {
        Self {
            superlatives_punctuation,
            generic_content,
            ai_written,
            behavior_patterns,
        }
    }

    /// The raw value for one criterion.
    pub fn get(&self, criterion: Criterion) -> f64 {
        match criterion {
            Criterion::SuperlativesPunctuation => self.superlatives_punctuation,
            Criterion::GenericContent => self.generic_content,
            Criterion::AiWritten => self.ai_written,
            Criterion::BehaviorPatterns => self.behavior_patterns,
        }
    }
}

/// A scoring criterion with its fixed weight and alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Criterion {
    #[serde(rename = "Superlatives/Punctuation")]
    SuperlativesPunctuation,
    #[serde(rename = "Generic Content")]
    GenericContent,
    #[serde(rename = "Potential AI Content")]
    AiWritten,
    #[serde(rename = "Textual Patterns")]
    BehaviorPatterns,
}

impl Criterion {
    /// All criteria in issue-reporting order.
    pub const ALL: [Criterion; 4] = [
        Criterion::SuperlativesPunctuation,
        Criterion::GenericContent,
        Criterion::AiWritten,
        Criterion::BehaviorPatterns,
    ];

    /// Linear weight in the composite score. The four weights sum to 1.0.
    pub const fn weight(self) -> f64 {
        match self {
            Criterion::SuperlativesPunctuation => 0.40,
            Criterion::GenericContent => 0.30,
            Criterion::AiWritten => 0.15,
            Criterion::BehaviorPatterns => 0.15,
        }
    }

    /// Raw value at or above which an [`Issue`] is raised.
    ///
    /// Phrasing cues alert at 0.5, superlative/genericness cues at 0.6.
    pub const fn alert_threshold(self) -> f64 {
        match self {
            Criterion::SuperlativesPunctuation | Criterion::GenericContent => 0.6,
            Criterion::AiWritten | Criterion::BehaviorPatterns => 0.5,
        }
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Criterion::SuperlativesPunctuation => "Superlatives/Punctuation",
            Criterion::GenericContent => "Generic Content",
            Criterion::AiWritten => "Potential AI Content",
            Criterion::BehaviorPatterns => "Textual Patterns",
        }
    }

    /// JSON field the provider reports this criterion under.
    pub const fn field_name(self) -> &'static str {
        match self {
            Criterion::SuperlativesPunctuation => "superlativesPunctuationScore",
            Criterion::GenericContent => "genericContentScore",
            Criterion::AiWritten => "aiWrittenScore",
            Criterion::BehaviorPatterns => "behaviorPatternsScore",
        }
    }
}

impl std::fmt::Display for Criterion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// A flag raised when a sub-score crosses its criterion's alert threshold.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Issue {
    pub criterion: Criterion,
    pub raw_score: f64,
    pub weight_percent: f64,
}

/// Scored outcome for one review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewResult {
    pub text: String,
    #[serde(default)]
    pub issues: Vec<Issue>,
    pub suspicion_score: u8,
}

impl ReviewResult {
    pub fn band(&self) -> ScoreBand {
        ScoreBand::from_score(self.suspicion_score)
    }
}

/// Opaque handle to a discovered review element: its position among the
/// review elements of the page, in document order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ElementHandle(pub(crate) usize);

impl ElementHandle {
    pub fn position(self) -> usize {
        self.0
    }
}

/// A review element whose text is long enough to be scored.
#[derive(Debug, Clone, PartialEq)]
pub struct CandidateReview {
    pub element: ElementHandle,
    pub text: String,
}

/// A successfully scored review together with the element it came from.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoredReview {
    pub element: ElementHandle,
    pub result: ReviewResult,
}

/// Display band for a suspicion score.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScoreBand {
    /// Below 40
    Low,
    /// 40 to 69
    Medium,
    /// 70 and above
    High,
}

impl ScoreBand {
    pub fn from_score(score: u8) -> Self {
        if score >= 70 {
            ScoreBand::High
        } else if score >= 40 {
            ScoreBand::Medium
        } else {
            ScoreBand::Low
        }
    }

    pub fn color_name(self) -> &'static str {
        match self {
            ScoreBand::Low => "green",
            ScoreBand::Medium => "orange",
            ScoreBand::High => "red",
        }
    }
}
