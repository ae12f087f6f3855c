//! Gemini provider implementation
//!
//! This module implements the GenerationProvider trait for the Google
//! Gemini generative-language REST API. It performs non-streaming
//! `generateContent` calls with a small bounded number of immediate
//! retries (no backoff) and supports model listing for the `models list`
//! command.

use crate::config::GeminiConfig;
use crate::error::{FolioError, Result};
use crate::providers::{GenerationProvider, ModelInfo};

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Default public Gemini API base URL
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";

/// Gemini API provider
///
/// Connects to the Gemini REST API (or a mock server via the `api_base`
/// config override) to generate answers for assembled prompts. Transport
/// failures and 5xx responses are retried immediately up to the configured
/// bound; 4xx responses fail without retry since a client error will not
/// heal on re-send.
///
/// # Examples
///
/// ```no_run
/// use folioqa::config::GeminiConfig;
/// use folioqa::providers::{GeminiProvider, GenerationProvider};
///
/// # async fn example() -> folioqa::error::Result<()> {
/// let config = GeminiConfig::default();
/// let provider = GeminiProvider::new(config, "api-key".to_string())?;
/// let answer = provider.generate("Say hello").await?;
/// # Ok(())
/// # }
/// ```
pub struct GeminiProvider {
    client: Client,
    config: GeminiConfig,
    api_key: String,
}

/// Request body for the generateContent endpoint
#[derive(Debug, Serialize)]
struct GenerateContentRequest {
    contents: Vec<Content>,
}

/// A content block in Gemini wire format
#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

/// A single text part
#[derive(Debug, Serialize, Deserialize)]
struct Part {
    #[serde(default)]
    text: String,
}

/// Response body from the generateContent endpoint
#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

/// One generation candidate
#[derive(Debug, Deserialize)]
struct Candidate {
    content: Option<Content>,
}

/// Response body from the models listing endpoint
#[derive(Debug, Deserialize)]
struct ListModelsResponse {
    #[serde(default)]
    models: Vec<GeminiModel>,
}

/// Model metadata in Gemini wire format
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct GeminiModel {
    name: String,
    #[serde(default)]
    display_name: String,
    #[serde(default)]
    description: String,
    #[serde(default)]
    input_token_limit: u64,
    #[serde(default)]
    output_token_limit: u64,
}

impl From<GeminiModel> for ModelInfo {
    fn from(model: GeminiModel) -> Self {
        Self {
            name: model.name,
            display_name: model.display_name,
            description: model.description,
            input_token_limit: model.input_token_limit,
            output_token_limit: model.output_token_limit,
        }
    }
}

impl GeminiProvider {
    /// Create a new Gemini provider instance
    ///
    /// # Arguments
    ///
    /// * `config` - Gemini configuration (model, api_base, retries, timeout)
    /// * `api_key` - API key for the generative-language service
    ///
    /// # Errors
    ///
    /// Returns error if the API key is empty or HTTP client initialization
    /// fails
    pub fn new(config: GeminiConfig, api_key: String) -> Result<Self> {
        if api_key.trim().is_empty() {
            return Err(FolioError::MissingCredentials("gemini".to_string()).into());
        }

        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_seconds))
            .user_agent(concat!("folioqa/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FolioError::Provider(format!("Failed to create HTTP client: {}", e)))?;

        tracing::info!(
            "Initialized Gemini provider: model={}, api_base={}",
            config.model,
            config.api_base
        );

        Ok(Self {
            client,
            config,
            api_key,
        })
    }

    /// URL of the generateContent endpoint for the configured model
    fn generate_url(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.config.api_base.trim_end_matches('/'),
            self.config.model
        )
    }

    /// URL of the model listing endpoint
    fn models_url(&self) -> String {
        format!(
            "{}/v1beta/models",
            self.config.api_base.trim_end_matches('/')
        )
    }

    /// Send one generateContent request and extract the answer text
    async fn generate_once(&self, prompt: &str) -> Result<String> {
        let request = GenerateContentRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .client
            .post(self.generate_url())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| FolioError::ProviderUnavailable(format!("Gemini request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if status.is_server_error() {
                return Err(FolioError::ProviderUnavailable(format!(
                    "Gemini API returned {}: {}",
                    status, body
                ))
                .into());
            }
            // 4xx: bad key, quota, malformed request. Retrying will not help.
            return Err(FolioError::Provider(format!(
                "Gemini API rejected request with {}: {}",
                status, body
            ))
            .into());
        }

        let parsed: GenerateContentResponse = response
            .json()
            .await
            .map_err(|e| FolioError::Provider(format!("Failed to parse Gemini response: {}", e)))?;

        extract_answer(parsed)
    }
}

/// Pull the answer text out of a parsed generateContent response
///
/// Takes the first candidate's first non-empty part. A response with no
/// candidates or no usable text is a provider error, not an empty answer.
fn extract_answer(response: GenerateContentResponse) -> Result<String> {
    let text = response
        .candidates
        .into_iter()
        .next()
        .and_then(|c| c.content)
        .and_then(|content| {
            content
                .parts
                .into_iter()
                .map(|p| p.text)
                .find(|t| !t.is_empty())
        });

    match text {
        Some(answer) => Ok(answer),
        None => Err(FolioError::Provider(
            "Gemini response contained no candidate text".to_string(),
        )
        .into()),
    }
}

/// Whether a generate failure is worth an immediate retry
///
/// Transport errors and 5xx responses are retried; 4xx rejections and
/// malformed payloads are not.
fn is_retryable(error: &anyhow::Error) -> bool {
    matches!(
        error.downcast_ref::<FolioError>(),
        Some(FolioError::ProviderUnavailable(_))
    )
}

#[async_trait]
impl GenerationProvider for GeminiProvider {
    fn name(&self) -> &str {
        "gemini"
    }

    fn model(&self) -> String {
        self.config.model.clone()
    }

    async fn generate(&self, prompt: &str) -> Result<String> {
        let attempts = self.config.max_retries + 1;
        let mut last_error = None;

        for attempt in 1..=attempts {
            match self.generate_once(prompt).await {
                Ok(answer) => {
                    tracing::debug!(
                        "Gemini responded on attempt {}/{} ({} chars)",
                        attempt,
                        attempts,
                        answer.len()
                    );
                    return Ok(answer);
                }
                Err(e) if attempt < attempts && is_retryable(&e) => {
                    tracing::warn!(
                        "Gemini attempt {}/{} failed, retrying immediately: {}",
                        attempt,
                        attempts,
                        e
                    );
                    last_error = Some(e);
                }
                Err(e) => return Err(e),
            }
        }

        // Unreachable unless attempts == 0, which max_retries + 1 prevents
        Err(last_error.unwrap_or_else(|| {
            FolioError::Provider("Gemini request failed with no attempts".to_string()).into()
        }))
    }

    async fn list_models(&self) -> Result<Vec<ModelInfo>> {
        let response = self
            .client
            .get(self.models_url())
            .header("x-goog-api-key", &self.api_key)
            .send()
            .await
            .map_err(|e| FolioError::Provider(format!("Gemini models request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(FolioError::Provider(format!(
                "Gemini models API returned {}: {}",
                status, body
            ))
            .into());
        }

        let parsed: ListModelsResponse = response.json().await.map_err(|e| {
            FolioError::Provider(format!("Failed to parse Gemini models response: {}", e))
        })?;

        Ok(parsed.models.into_iter().map(ModelInfo::from).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn provider_with_base(api_base: &str) -> GeminiProvider {
        let config = GeminiConfig {
            api_base: api_base.to_string(),
            ..Default::default()
        };
        GeminiProvider::new(config, "test-key".to_string()).unwrap()
    }

    #[test]
    fn test_new_rejects_empty_api_key() {
        let result = GeminiProvider::new(GeminiConfig::default(), "  ".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_generate_url_includes_model() {
        let provider = provider_with_base("http://localhost:9999");
        assert_eq!(
            provider.generate_url(),
            format!(
                "http://localhost:9999/v1beta/models/{}:generateContent",
                GeminiConfig::default().model
            )
        );
    }

    #[test]
    fn test_urls_tolerate_trailing_slash() {
        let provider = provider_with_base("http://localhost:9999/");
        assert!(!provider.models_url().contains("//v1beta"));
        assert_eq!(provider.models_url(), "http://localhost:9999/v1beta/models");
    }

    #[test]
    fn test_extract_answer_first_candidate_text() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": "hello"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_answer(response).unwrap(), "hello");
    }

    #[test]
    fn test_extract_answer_skips_empty_parts() {
        let response: GenerateContentResponse = serde_json::from_str(
            r#"{"candidates": [{"content": {"parts": [{"text": ""}, {"text": "second"}]}}]}"#,
        )
        .unwrap();
        assert_eq!(extract_answer(response).unwrap(), "second");
    }

    #[test]
    fn test_extract_answer_no_candidates_is_error() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": []}"#).unwrap();
        assert!(extract_answer(response).is_err());
    }

    #[test]
    fn test_extract_answer_missing_content_is_error() {
        let response: GenerateContentResponse =
            serde_json::from_str(r#"{"candidates": [{}]}"#).unwrap();
        assert!(extract_answer(response).is_err());
    }

    #[test]
    fn test_gemini_model_camel_case_mapping() {
        let model: GeminiModel = serde_json::from_str(
            r#"{
                "name": "models/gemini-flash-lite-latest",
                "displayName": "Gemini Flash Lite",
                "inputTokenLimit": 1000000,
                "outputTokenLimit": 8192
            }"#,
        )
        .unwrap();
        let info = ModelInfo::from(model);
        assert_eq!(info.display_name, "Gemini Flash Lite");
        assert_eq!(info.input_token_limit, 1_000_000);
    }

    #[test]
    fn test_is_retryable_classification() {
        let transient: anyhow::Error =
            FolioError::ProviderUnavailable("connection refused".to_string()).into();
        let terminal: anyhow::Error =
            FolioError::Provider("400 Bad Request: nope".to_string()).into();
        assert!(is_retryable(&transient));
        assert!(!is_retryable(&terminal));
    }
}
