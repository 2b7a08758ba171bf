//! Language model client used by chat-model agents.
//!
//! Talks to the Gemini `generateContent` endpoint. Only plain text in and
//! text out; no tools, no streaming.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

use crate::error::{Result, RunnerError};

/// Gemini API base URL.
const GEMINI_API_URL: &str = "https://generativelanguage.googleapis.com/v1beta";

/// Something that answers a prompt under a system instruction.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Returns the model's text reply.
    async fn complete(&self, system: &str, prompt: &str) -> Result<String>;
}

/// Gemini API client.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
}

impl GeminiClient {
    /// Creates a client for the given key and model.
    pub fn new(api_key: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            client: reqwest::Client::new(),
            api_key: api_key.into(),
            model: model.into(),
            base_url: GEMINI_API_URL.to_string(),
        }
    }

    /// Points the client at another server.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Model identifier.
    pub fn model(&self) -> &str {
        &self.model
    }

    fn endpoint(&self) -> String {
        format!(
            "{}/models/{}:generateContent",
            self.base_url.trim_end_matches('/'),
            self.model
        )
    }
}

#[async_trait]
impl ChatModel for GeminiClient {
    async fn complete(&self, system: &str, prompt: &str) -> Result<String> {
        let request = GenerateRequest::new(system, prompt);
        trace!(model = %self.model, prompt_len = prompt.len(), "sending generateContent request");

        let response = self
            .client
            .post(self.endpoint())
            .header("x-goog-api-key", &self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| RunnerError::Model(format!("HTTP request failed: {}", e)))?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RunnerError::Model(format!(
                "Gemini API error {}: {}",
                status, text
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| RunnerError::Model(format!("Failed to parse response: {}", e)))?;

        let text = body
            .text()
            .ok_or_else(|| RunnerError::Model("response contained no text".into()))?;
        debug!(model = %self.model, reply_len = text.len(), "model replied");
        Ok(text)
    }
}

/// `generateContent` request body.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GenerateRequest {
    /// System instruction.
    pub system_instruction: Content,
    /// Conversation turns.
    pub contents: Vec<Content>,
}

impl GenerateRequest {
    /// A single user turn under a system instruction.
    pub fn new(system: &str, prompt: &str) -> Self {
        Self {
            system_instruction: Content {
                role: None,
                parts: vec![Part {
                    text: Some(system.to_string()),
                }],
            },
            contents: vec![Content {
                role: Some("user".into()),
                parts: vec![Part {
                    text: Some(prompt.to_string()),
                }],
            }],
        }
    }
}

/// A turn of content.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Content {
    /// Speaker.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub role: Option<String>,
    /// Content parts.
    #[serde(default)]
    pub parts: Vec<Part>,
}

/// One part of a turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Part {
    /// Text, if this is a text part.
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub text: Option<String>,
}

/// `generateContent` response body.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    /// Candidate replies.
    #[serde(default)]
    pub candidates: Vec<Candidate>,
}

/// One candidate reply.
#[derive(Debug, Clone, Deserialize)]
pub struct Candidate {
    /// Reply content.
    pub content: Option<Content>,
}

impl GenerateResponse {
    /// Concatenated text of the first candidate.
    pub fn text(&self) -> Option<String> {
        let content = self.candidates.first()?.content.as_ref()?;
        let text: String = content
            .parts
            .iter()
            .filter_map(|p| p.text.as_deref())
            .collect();
        if text.is_empty() {
            None
        } else {
            Some(text)
        }
    }
}
