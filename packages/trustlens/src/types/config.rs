//! Configuration types for extraction, scoring and orchestration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

/// Maximum review characters sent to the provider.
pub const DEFAULT_MAX_TEXT_CHARS: usize = 15_000;

/// Per-review provider ceiling.
pub const DEFAULT_PROVIDER_TIMEOUT: Duration = Duration::from_secs(30);

/// Stable id of the injected summary block.
pub const UI_BLOCK_ID: &str = "trustlens-ui-block";

/// CSS selectors used to locate reviews, their text and the UI anchor.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectorConfig {
    /// Elements that each hold one review. Matched as a single selector list,
    /// so an element matching several entries is collected once.
    pub reviews: Vec<String>,

    /// Selector expected to hit only user-authored text.
    pub primary_text: String,

    /// Tried in order when the primary selector yields nothing.
    pub fallback_text: Vec<String>,

    /// Stripped from fallback matches before reading their text.
    pub noise: Vec<String>,

    /// Containers the summary block may be attached to, in priority order.
    pub anchors: Vec<String>,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            reviews: vec![
                r#"[data-hook="review"]"#.into(),
                ".review".into(),
                ".customer-review".into(),
            ],
            primary_text: r#"[data-hook="review-body"] span"#.into(),
            fallback_text: vec![
                r#"[data-hook="review-body"]"#.into(),
                ".review-text-content".into(),
                ".review-text".into(),
            ],
            noise: vec!["script".into(), r#"div[id^="expander"]"#.into()],
            anchors: vec![
                "#rightCol".into(),
                "#centerCol".into(),
                "#desktop_buybox".into(),
                "#buybox".into(),
                "#detailBulletsWrapper_feature_div".into(),
            ],
        }
    }
}

/// Configuration for one analyzer.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzerConfig {
    pub selectors: SelectorConfig,

    /// Host substring a page must contain to be analyzed (e.g. `amazon.`).
    pub target_host: String,

    /// Reviews with this many characters or fewer are discarded.
    pub min_text_chars: usize,

    pub max_text_chars: usize,

    #[serde(with = "duration_secs")]
    pub provider_timeout: Duration,

    pub ui_block_id: String,
}

impl Default for AnalyzerConfig {
    fn default() -> Self {
        Self {
            selectors: SelectorConfig::default(),
            target_host: "amazon.".into(),
            min_text_chars: 10,
            max_text_chars: DEFAULT_MAX_TEXT_CHARS,
            provider_timeout: DEFAULT_PROVIDER_TIMEOUT,
            ui_block_id: UI_BLOCK_ID.into(),
        }
    }
}

impl AnalyzerConfig {
    pub fn with_target_host(mut self, host: impl Into<String>) -> Self {
        self.target_host = host.into();
        self
    }

    pub fn with_max_text_chars(mut self, max: usize) -> Self {
        self.max_text_chars = max;
        self
    }

    pub fn with_provider_timeout(mut self, timeout: Duration) -> Self {
        self.provider_timeout = timeout;
        self
    }
}

mod duration_secs {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(d: &Duration, s: S) -> Result<S::Ok, S::Error> {
        s.serialize_u64(d.as_secs())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(d: D) -> Result<Duration, D::Error> {
        u64::deserialize(d).map(Duration::from_secs)
    }
}
