use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use strum::AsRefStr;
use tracing::{debug, error};

use crate::reply::{self, ExtractionRules};

pub const DEFAULT_API_URL: &str = "https://api.gmi-serving.com/v1/chat/completions";
pub const DEFAULT_MODEL: &str = "deepseek-ai/DeepSeek-R1-0528";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
const MIN_API_KEY_LEN: usize = 10;

/// Why a live reply could not be used. [`ApiFailure::code`] is printed after
/// `API_FAILED:`.
#[derive(Debug, thiserror::Error, AsRefStr)]
pub enum ApiFailure {
    #[strum(serialize = "INVALID_API_KEY")]
    #[error("invalid or missing API key (length: {0})")]
    MissingOrShortCredential(usize),
    #[strum(serialize = "NETWORK_ERROR")]
    #[error("network error: {0}")]
    NetworkFailure(#[source] reqwest::Error),
    #[strum(serialize = "HTTP_ERROR")]
    #[error("API returned status code {status}: {message}")]
    NonSuccessStatus { status: StatusCode, message: String },
    #[strum(serialize = "INVALID_JSON")]
    #[error("failed to parse JSON response: {0}")]
    UnparsableBody(#[source] serde_json::Error),
    #[strum(serialize = "NO_CHOICES")]
    #[error("no choices in API response")]
    MissingChoices,
    #[strum(serialize = "INVALID_CONTENT")]
    #[error("invalid response content: {0:?}")]
    InvalidOrTooShortContent(String),
}

impl ApiFailure {
    pub fn code(&self) -> &str {
        self.as_ref()
    }
}

#[derive(Debug, Serialize)]
pub struct Message {
    pub role: String,
    pub content: String,
}

impl Message {
    pub fn system(content: impl Into<String>) -> Self {
        Self {
            role: "system".to_owned(),
            content: content.into(),
        }
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_owned(),
            content: content.into(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ChatRequest {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    pub stream: bool,
}

#[derive(Debug, Deserialize)]
pub struct ChatResponse {
    pub choices: Option<Vec<Choice>>,
    pub error: Option<serde_json::Value>,
}

#[derive(Debug, Deserialize)]
pub struct Choice {
    #[serde(default)]
    pub message: ResponseMessage,
}

#[derive(Debug, Default, Deserialize)]
pub struct ResponseMessage {
    pub content: Option<String>,
    pub reasoning_content: Option<String>,
}

impl ChatResponse {
    /// The raw reply candidate of the first choice, before acceptance checks.
    pub fn reply(&self, rules: &ExtractionRules) -> Result<Option<String>, ApiFailure> {
        let choice = self
            .choices
            .as_deref()
            .and_then(<[Choice]>::first)
            .ok_or(ApiFailure::MissingChoices)?;
        Ok(reply::select_reply(
            choice.message.content.as_deref(),
            choice.message.reasoning_content.as_deref(),
            rules,
        ))
    }

    fn error_message(&self) -> String {
        self.error
            .as_ref()
            .and_then(|error| error.get("message"))
            .and_then(serde_json::Value::as_str)
            .unwrap_or("Unknown error")
            .to_owned()
    }
}

pub struct ApiClient {
    http: reqwest::Client,
    url: String,
    model: String,
    api_key: Option<String>,
    max_tokens: Option<u32>,
}

impl ApiClient {
    pub fn new(
        url: impl Into<String>,
        model: impl Into<String>,
        api_key: Option<String>,
        timeout: Duration,
    ) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            http,
            url: url.into(),
            model: model.into(),
            api_key,
            max_tokens: None,
        })
    }

    pub fn with_max_tokens(mut self, max_tokens: Option<u32>) -> Self {
        self.max_tokens = max_tokens;
        self
    }

    pub fn request(&self, messages: Vec<Message>, temperature: f32) -> ChatRequest {
        ChatRequest {
            model: self.model.clone(),
            messages,
            temperature,
            max_tokens: self.max_tokens,
            stream: false,
        }
    }

    fn api_key(&self) -> Result<&str, ApiFailure> {
        match self.api_key.as_deref().map(str::trim) {
            Some(key) if key.chars().count() >= MIN_API_KEY_LEN => Ok(key),
            key => Err(ApiFailure::MissingOrShortCredential(
                key.map_or(0, |key| key.chars().count()),
            )),
        }
    }

    /// Sends one request. No retries: the first failure is final.
    pub async fn complete(&self, request: &ChatRequest) -> Result<ChatResponse, ApiFailure> {
        let api_key = self.api_key()?;

        debug!(
            "Sending request to {} (model: {}, messages: {})",
            self.url,
            request.model,
            request.messages.len()
        );

        let response = self
            .http
            .post(&self.url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(request)
            .send()
            .await
            .map_err(ApiFailure::NetworkFailure)?;

        let status = response.status();
        let body = response.text().await.map_err(ApiFailure::NetworkFailure)?;
        debug!("API response status: {status}");

        let parsed = serde_json::from_str::<ChatResponse>(&body).map_err(|error| {
            error!(
                "Raw response text: {}",
                body.chars().take(500).collect::<String>()
            );
            ApiFailure::UnparsableBody(error)
        })?;

        if status != StatusCode::OK {
            return Err(ApiFailure::NonSuccessStatus {
                status,
                message: parsed.error_message(),
            });
        }

        Ok(parsed)
    }
}
