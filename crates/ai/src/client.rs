use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;
use serde_json::json;
use thiserror::Error;

const MAX_ERROR_BODY: usize = 300;

#[derive(Debug, Error)]
pub enum ClientError {
    #[error("AI generation is not configured")]
    NotConfigured,

    #[error("AI request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("AI provider returned {status}: {body}")]
    Status { status: u16, body: String },

    #[error("AI provider returned no text")]
    EmptyResponse,
}

/// Anything able to turn a prompt into free text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<String, ClientError>;
}

#[derive(Debug, Clone)]
pub struct ClientOptions {
    pub api_key: Option<String>,
    pub base_url: String,
    pub model: String,
    pub timeout_secs: u64,
    pub temperature: f32,
}

/// `generateContent` client for Gemini-style endpoints
#[derive(Clone)]
pub struct GeminiClient {
    http: reqwest::Client,
    options: ClientOptions,
}

#[derive(Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<Candidate>,
}

#[derive(Deserialize)]
struct Candidate {
    content: Option<Content>,
}

#[derive(Deserialize)]
struct Content {
    #[serde(default)]
    parts: Vec<Part>,
}

#[derive(Deserialize)]
struct Part {
    text: Option<String>,
}

impl GeminiClient {
    pub fn new(options: ClientOptions) -> Result<Self, ClientError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(options.timeout_secs))
            .build()?;

        Ok(Self { http, options })
    }

    pub fn is_configured(&self) -> bool {
        self.api_key().is_some()
    }

    fn api_key(&self) -> Option<&str> {
        self.options
            .api_key
            .as_deref()
            .map(str::trim)
            .filter(|key| !key.is_empty())
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/v1beta/models/{}:generateContent",
            self.options.base_url.trim_end_matches('/'),
            self.options.model
        )
    }
}

#[async_trait]
impl TextGenerator for GeminiClient {
    async fn generate(&self, prompt: &str) -> Result<String, ClientError> {
        let Some(api_key) = self.api_key() else {
            return Err(ClientError::NotConfigured);
        };

        let body = json!({
            "contents": [{ "parts": [{ "text": prompt }] }],
            "generationConfig": {
                "temperature": self.options.temperature,
                "responseMimeType": "application/json",
            },
        });

        let response = self
            .http
            .post(self.endpoint())
            .header("x-goog-api-key", api_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();

            return Err(ClientError::Status {
                status: status.as_u16(),
                body: body.chars().take(MAX_ERROR_BODY).collect(),
            });
        }

        let response: GenerateContentResponse = response.json().await?;

        let text = response
            .candidates
            .into_iter()
            .next()
            .and_then(|candidate| candidate.content)
            .map(|content| content.parts)
            .unwrap_or_default()
            .into_iter()
            .filter_map(|part| part.text)
            .collect::<String>();

        if text.trim().is_empty() {
            return Err(ClientError::EmptyResponse);
        }

        tracing::debug!(model = %self.options.model, len = text.len(), "AI text received");

        Ok(text)
    }
}
