use std::time::Duration;

use async_trait::async_trait;
use serde_json::{json, Value};
use tracing::debug;

use crate::error::{Result, TripError};

pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-3.5-turbo";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(120);
pub const MISSING_API_KEY: &str =
    "API key is required. Set OPENAI_API_KEY environment variable or use --api-key";

/// Anything that can answer a single system + user chat turn
#[async_trait]
pub trait ChatBackend: Send + Sync + std::fmt::Debug {
    /// Return the text content of the first choice.
    async fn complete(&self, system: &str, user: &str) -> Result<String>;
}

/// Client for an OpenAI-compatible `/chat/completions` endpoint.
///
/// Sends exactly one request per call; there is no retry.
#[derive(Clone, Debug)]
pub struct OpenAIClient {
    api_key: Option<String>,
    base_url: String,
    model: String,
    timeout: Duration,
}

impl Default for OpenAIClient {
    fn default() -> Self {
        Self {
            api_key: None,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: DEFAULT_MODEL.to_string(),
            timeout: DEFAULT_TIMEOUT,
        }
    }
}

impl OpenAIClient {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::default().with_api_key(api_key)
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = Some(api_key.into());
        self
    }

    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Send one request; fails with a config error before any I/O when no key is set.
    pub async fn chat_completion(&self, body: &Value) -> Result<Value> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| TripError::Config(MISSING_API_KEY.to_string()))?;

        let client = reqwest::Client::builder()
            .timeout(self.timeout)
            .build()
            .map_err(|err| TripError::Http(format!("failed to build HTTP client: {err}")))?;

        let request_url = build_chat_url(&self.base_url);
        debug!(target: "travel::completion", url = %request_url, model = %self.model);

        let response = client
            .post(&request_url)
            .bearer_auth(api_key)
            .header("Content-Type", "application/json")
            .json(body)
            .send()
            .await
            .map_err(|err| TripError::Http(format!("request failed: {err}")))?;

        let status = response.status();
        let response_text = response
            .text()
            .await
            .map_err(|err| TripError::Http(format!("failed to read response: {err}")))?;

        if !status.is_success() {
            let message = serde_json::from_str::<Value>(&response_text)
                .ok()
                .and_then(|body| {
                    body.get("error")
                        .and_then(|error| error.get("message"))
                        .and_then(Value::as_str)
                        .map(str::to_string)
                })
                .unwrap_or(response_text);

            return Err(TripError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let response_json: Value = serde_json::from_str(&response_text)?;

        if let Some(error) = response_json.get("error") {
            let message = error
                .get("message")
                .and_then(Value::as_str)
                .map(str::to_string)
                .unwrap_or_else(|| error.to_string());
            return Err(TripError::Api {
                status: status.as_u16(),
                message,
            });
        }

        Ok(response_json)
    }
}

#[async_trait]
impl ChatBackend for OpenAIClient {
    async fn complete(&self, system: &str, user: &str) -> Result<String> {
        let body = ChatCompletionRequest::new(&self.model)
            .with_system(system)
            .with_user(user)
            .into_value();

        let response = self.chat_completion(&body).await?;
        first_choice_content(&response)
    }
}

fn build_chat_url(base_url: &str) -> String {
    let trimmed = base_url.trim_end_matches('/');
    if trimmed.ends_with("/chat/completions") {
        trimmed.to_string()
    } else {
        format!("{}/chat/completions", trimmed)
    }
}

fn first_choice_content(response: &Value) -> Result<String> {
    response
        .get("choices")
        .and_then(|choices| choices.get(0))
        .and_then(|choice| choice.get("message"))
        .and_then(|message| message.get("content"))
        .and_then(Value::as_str)
        .map(str::to_string)
        .ok_or_else(|| {
            TripError::Validation("completion response has no message content".to_string())
        })
}

#[derive(Clone, Debug)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<Value>,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
        }
    }

    pub fn with_system(mut self, content: &str) -> Self {
        self.messages
            .push(json!({ "role": "system", "content": content }));
        self
    }

    pub fn with_user(mut self, content: &str) -> Self {
        self.messages.push(json!({ "role": "user", "content": content }));
        self
    }

    pub fn into_value(self) -> Value {
        json!({
            "model": self.model,
            "messages": self.messages,
        })
    }
}
