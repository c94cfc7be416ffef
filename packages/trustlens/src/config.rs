use std::env;
use std::path::PathBuf;
use std::time::Duration;

use anyhow::{Context, Result};
use dotenvy::dotenv;
use gemini_client::{GeminiClient, DEFAULT_BASE_URL, DEFAULT_MODEL};
use secrecy::SecretString;

use crate::scoring::{is_usable_key, GeminiJudge};
use crate::types::{AnalyzerConfig, DEFAULT_MAX_TEXT_CHARS, DEFAULT_PROVIDER_TIMEOUT};

/// Application configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct Config {
    /// Missing is allowed; every review then fails with a config failure
    pub gemini_api_key: Option<SecretString>,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub max_text_chars: usize,
    pub provider_timeout: Duration,
    pub target_host: String,
    pub store_path: PathBuf,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self> {
        // Load .env file if present (development)
        let _ = dotenv();

        Ok(Self {
            gemini_api_key: env::var("GEMINI_API_KEY").ok().map(SecretString::from),
            gemini_model: env::var("GEMINI_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string()),
            gemini_base_url: env::var("GEMINI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_BASE_URL.to_string()),
            max_text_chars: env::var("TRUSTLENS_MAX_TEXT_CHARS")
                .unwrap_or_else(|_| DEFAULT_MAX_TEXT_CHARS.to_string())
                .parse()
                .context("TRUSTLENS_MAX_TEXT_CHARS must be a valid number")?,
            provider_timeout: env::var("TRUSTLENS_PROVIDER_TIMEOUT_SECS")
                .unwrap_or_else(|_| DEFAULT_PROVIDER_TIMEOUT.as_secs().to_string())
                .parse()
                .map(Duration::from_secs)
                .context("TRUSTLENS_PROVIDER_TIMEOUT_SECS must be a valid number")?,
            target_host: env::var("TRUSTLENS_TARGET_HOST").unwrap_or_else(|_| "amazon.".to_string()),
            store_path: env::var("TRUSTLENS_STORE_PATH")
                .unwrap_or_else(|_| "trustlens-analysis.json".to_string())
                .into(),
        })
    }

    pub fn analyzer_config(&self) -> AnalyzerConfig {
        AnalyzerConfig::default()
            .with_target_host(self.target_host.clone())
            .with_max_text_chars(self.max_text_chars)
            .with_provider_timeout(self.provider_timeout)
    }

    /// Build the provider-backed judge. A missing, blank or placeholder key
    /// yields an unconfigured judge rather than an error.
    pub fn gemini_judge(&self) -> Result<GeminiJudge> {
        let Some(key) = self.gemini_api_key.as_ref().filter(|key| is_usable_key(key)) else {
            return Ok(GeminiJudge::unconfigured());
        };

        let client = GeminiClient::new(key.clone())
            .with_base_url(self.gemini_base_url.clone())
            .with_model(self.gemini_model.clone())
            // Leave headroom so the per-review deadline fires first
            .with_timeout(self.provider_timeout + Duration::from_secs(5))
            .context("Failed to build Gemini HTTP client")?;

        Ok(GeminiJudge::new(client))
    }
}
