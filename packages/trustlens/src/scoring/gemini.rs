//! Gemini-backed judge.

use async_trait::async_trait;
use gemini_client::{GeminiClient, GenerateContentRequest, GenerationConfig};
use secrecy::{ExposeSecret, SecretString};
use tracing::{debug, error};

use super::parse::parse_sub_scores;
use super::prompt::scoring_prompt;
use crate::error::{ScoreFailure, ScoreResult};
use crate::extract::preview;
use crate::traits::Judge;
use crate::types::SubScores;

/// Placeholder shipped in sample configuration; treated as unset.
pub const API_KEY_PLACEHOLDER: &str = "PASTE_YOUR_KEY_HERE";

/// Whether `api_key` is an actual credential rather than blank or the
/// sample placeholder.
pub fn is_usable_key(api_key: &SecretString) -> bool {
    let key = api_key.expose_secret().trim();
    !key.is_empty() && key != API_KEY_PLACEHOLDER
}

/// Scores reviews with Gemini. Holds the provider credential, so it belongs
/// in the privileged process (see [`crate::broker`]).
#[derive(Debug, Clone)]
pub struct GeminiJudge {
    client: Option<GeminiClient>,
}

impl GeminiJudge {
    /// A judge calling Gemini through `client`. Check the key with
    /// [`is_usable_key`] first.
    pub fn new(client: GeminiClient) -> Self {
        Self {
            client: Some(client),
        }
    }

    /// A judge without credentials. Every call fails with
    /// [`ScoreFailure::Config`].
    pub fn unconfigured() -> Self {
        Self { client: None }
    }

    pub fn is_configured(&self) -> bool {
        self.client.is_some()
    }
}

/// One-shot scoring request asking for a bare JSON reply.
fn scoring_request(text: &str) -> GenerateContentRequest {
    GenerateContentRequest::prompt(scoring_prompt(text)).generation_config(GenerationConfig {
        response_mime_type: Some("application/json".into()),
        ..Default::default()
    })
}

#[async_trait]
impl Judge for GeminiJudge {
    async fn judge(&self, text: &str) -> ScoreResult<SubScores> {
        let Some(client) = &self.client else {
            error!("Gemini API key not configured");
            return Err(ScoreFailure::config("API Key not configured."));
        };

        let reply = client.generate_text(scoring_request(text)).await?;

        match parse_sub_scores(&reply) {
            Ok(scores) => {
                debug!(?scores, "Gemini sub-scores");
                Ok(scores)
            }
            Err(failure) => {
                error!(
                    kind = failure.kind(),
                    error = %failure,
                    reply = %preview(&reply, 200),
                    "Could not read sub-scores from Gemini reply"
                );
                Err(failure)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_placeholder_and_blank_keys_are_unusable() {
        assert!(!is_usable_key(&SecretString::from(API_KEY_PLACEHOLDER)));
        assert!(!is_usable_key(&SecretString::from("  ")));
        assert!(is_usable_key(&SecretString::from("real-key")));
    }

    #[test]
    fn test_scoring_request_asks_for_json() {
        let json = serde_json::to_value(scoring_request("Solid kettle")).unwrap();

        assert_eq!(json["generationConfig"]["responseMimeType"], "application/json");
        assert!(json["contents"][0]["parts"][0]["text"]
            .as_str()
            .unwrap()
            .contains("Solid kettle"));
    }

    #[test]
    fn test_debug_output_hides_key() {
        let judge = GeminiJudge::new(GeminiClient::new("super-secret"));
        assert!(!format!("{:?}", judge).contains("super-secret"));
    }

    #[tokio::test]
    async fn test_unconfigured_judge_fails_with_config() {
        let err = GeminiJudge::unconfigured()
            .judge("A perfectly ordinary review")
            .await
            .unwrap_err();

        assert_eq!(err.kind(), "config");
    }
}
