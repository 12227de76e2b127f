//! One request/response round trip with the generative-language endpoint.
//!
//! [`ExchangeClient`] is the seam the rest of the crate talks to; the UI and
//! the one-shot command use [`GeminiClient`], tests substitute their own.

use std::error::Error as StdError;
use std::fmt;

use async_trait::async_trait;
use tracing::{debug, warn};

use crate::api::{GenerateContentRequest, GenerateContentResponse};
use crate::utils::url::construct_api_url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExchangeError {
    /// The request could not be sent, or the body was not JSON.
    Transport(String),
    /// The body was JSON but carried no usable reply text.
    EmptyResponse,
}

impl ExchangeError {
    /// Stable label used in log records.
    pub fn kind(&self) -> &'static str {
        match self {
            ExchangeError::Transport(_) => "transport",
            ExchangeError::EmptyResponse => "empty_response",
        }
    }
}

impl fmt::Display for ExchangeError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExchangeError::Transport(detail) => write!(f, "Transport error: {detail}"),
            ExchangeError::EmptyResponse => write!(f, "Response contained no reply text"),
        }
    }
}

impl StdError for ExchangeError {}

#[async_trait]
pub trait ExchangeClient: Send + Sync {
    async fn exchange(
        &self,
        instruction_prompt: &str,
        user_text: &str,
    ) -> Result<String, ExchangeError>;
}

/// Text sent as the single user part: the persona prompt, a newline, the message.
pub fn compose_prompt(instruction_prompt: &str, user_text: &str) -> String {
    format!("{instruction_prompt}\n{user_text}")
}

pub fn build_request(instruction_prompt: &str, user_text: &str) -> GenerateContentRequest {
    GenerateContentRequest::single_user_turn(compose_prompt(instruction_prompt, user_text))
}

/// Pull `candidates[0].content.parts[0].text` out of a parsed envelope.
pub fn extract_reply(response: GenerateContentResponse) -> Result<String, ExchangeError> {
    response
        .candidates
        .and_then(|candidates| candidates.into_iter().next())
        .and_then(|candidate| candidate.content)
        .and_then(|content| content.parts)
        .and_then(|parts| parts.into_iter().next())
        .and_then(|part| part.text)
        .ok_or(ExchangeError::EmptyResponse)
}

/// Best-effort one-line summary of an API error body, for logs.
pub(crate) fn extract_error_summary(value: &serde_json::Value) -> Option<String> {
    let summary = value
        .pointer("/error/message")
        .and_then(|v| v.as_str())
        .map(str::to_owned)
        .or_else(|| {
            value.get("error").and_then(|v| match v {
                serde_json::Value::String(s) => Some(s.to_string()),
                _ => None,
            })
        })
        .or_else(|| {
            value
                .get("message")
                .and_then(|v| v.as_str().map(str::to_owned))
        });

    summary
        .map(|text| text.split_whitespace().collect::<Vec<_>>().join(" "))
        .filter(|text| !text.is_empty())
}

/// Parse a raw response body into reply text.
pub fn parse_reply_body(body: &str) -> Result<String, ExchangeError> {
    let value: serde_json::Value = serde_json::from_str(body)
        .map_err(|e| ExchangeError::Transport(format!("response was not JSON: {e}")))?;

    if let Some(summary) = extract_error_summary(&value) {
        warn!(summary = %summary, "API returned an error envelope");
    }

    let envelope: GenerateContentResponse = serde_json::from_value(value).map_err(|e| {
        warn!(error = %e, "response envelope has an unexpected shape");
        ExchangeError::EmptyResponse
    })?;
    extract_reply(envelope)
}

/// Client for the `models/{model}:generateContent` endpoint.
#[derive(Clone)]
pub struct GeminiClient {
    client: reqwest::Client,
    base_url: String,
    model: String,
    api_key: String,
}

impl GeminiClient {
    pub fn new(
        client: reqwest::Client,
        base_url: impl Into<String>,
        model: impl Into<String>,
        api_key: impl Into<String>,
    ) -> Self {
        Self {
            client,
            base_url: base_url.into(),
            model: model.into(),
            api_key: api_key.into(),
        }
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn endpoint_url(&self) -> String {
        construct_api_url(
            &self.base_url,
            &format!("models/{}:generateContent", self.model),
        )
    }
}

#[async_trait]
impl ExchangeClient for GeminiClient {
    async fn exchange(
        &self,
        instruction_prompt: &str,
        user_text: &str,
    ) -> Result<String, ExchangeError> {
        let request = build_request(instruction_prompt, user_text);
        let url = self.endpoint_url();
        debug!(url = %url, model = %self.model, "sending exchange");

        let mut http_request = self
            .client
            .post(&url)
            .header("Content-Type", "application/json");
        if !self.api_key.is_empty() {
            http_request = http_request.query(&[("key", self.api_key.as_str())]);
        }

        let response = http_request
            .json(&request)
            .send()
            .await
            .map_err(|e| ExchangeError::Transport(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| ExchangeError::Transport(e.to_string()))?;
        debug!(status = %status, bytes = body.len(), "exchange response received");

        parse_reply_body(&body)
    }
}
