//! Client for the hosted generative-language API.
//!
//! Thin wrapper over the `generateContent` REST endpoint. The chat service
//! owns model selection and fallback; this client only performs one call
//! and surfaces failures as errors.

use serde::{Deserialize, Serialize};

use crate::config::GENAI_API_BASE;
use crate::errors::{AppError, AppResult};

#[cfg(any(test, feature = "test-utils"))]
use mockall::automock;

/// Generative-language client trait for dependency injection.
#[cfg_attr(any(test, feature = "test-utils"), automock)]
#[async_trait::async_trait]
pub trait GenerativeClient: Send + Sync {
    /// Ask one model to complete a prompt, returning the first candidate text.
    async fn generate(&self, model: &str, prompt: &str) -> AppResult<String>;
}

/// Request body for `models/{model}:generateContent`
#[derive(Debug, Serialize)]
struct GenerateRequest {
    contents: Vec<Content>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Content {
    parts: Vec<Part>,
}

#[derive(Debug, Serialize, Deserialize)]
struct Part {
    text: String,
}

/// Response body, reduced to the fields we read
#[derive(Debug, Deserialize)]
struct GenerateResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Debug, Deserialize)]
struct Candidate {
    content: Content,
}

/// HTTP client for the generative-language API
pub struct GenAiClient {
    http: reqwest::Client,
    api_key: Option<String>,
    base_url: String,
}

impl GenAiClient {
    /// Create a client; `api_key` may be absent, in which case every call fails
    /// and callers fall back locally.
    pub fn new(api_key: Option<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            api_key,
            base_url: GENAI_API_BASE.to_string(),
        }
    }

    /// Override the base URL (used by tests against a local stub).
    #[cfg(any(test, feature = "test-utils"))]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }
}

#[async_trait::async_trait]
impl GenerativeClient for GenAiClient {
    async fn generate(&self, model: &str, prompt: &str) -> AppResult<String> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::upstream("No API key configured"))?;

        let url = format!(
            "{}/models/{}:generateContent?key={}",
            self.base_url, model, api_key
        );

        let body = GenerateRequest {
            contents: vec![Content {
                parts: vec![Part {
                    text: prompt.to_string(),
                }],
            }],
        };

        let response = self
            .http
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(|e| AppError::upstream(format!("Request to {} failed: {}", model, e)))?;

        if !response.status().is_success() {
            return Err(AppError::upstream(format!(
                "Model {} returned status {}",
                model,
                response.status()
            )));
        }

        let parsed: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AppError::upstream(format!("Invalid response from {}: {}", model, e)))?;

        parsed
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| AppError::upstream(format!("Model {} returned no candidates", model)))
    }
}
