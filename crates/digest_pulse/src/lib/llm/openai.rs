use std::{fmt, time::Duration};

use reqwest_middleware::{ClientBuilder, ClientWithMiddleware};
use reqwest_retry::{policies::ExponentialBackoff, RetryTransientMiddleware};
use serde::Deserialize;

use crate::Summarizer;

/// Everything needed to reach an OpenAI-compatible chat completions endpoint.
#[derive(Clone)]
pub struct ModelConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub temperature: f32,
    pub max_tokens: Option<u32>,
    /// Retries for transient HTTP failures (connect errors, 429, 5xx)
    pub max_retries: u32,
    pub timeout: Duration,
}

impl ModelConfig {
    pub const DEFAULT_BASE_URL: &str = "https://api.openai.com/v1";
    pub const DEFAULT_MODEL: &str = "gpt-4o-mini";

    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            base_url: Self::DEFAULT_BASE_URL.into(),
            model: Self::DEFAULT_MODEL.into(),
            temperature: 0.7,
            max_tokens: None,
            max_retries: 3,
            timeout: Duration::from_secs(120),
        }
    }

    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }

    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }
}

impl fmt::Debug for ModelConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ModelConfig")
            .field("api_key", &"<redacted>")
            .field("base_url", &self.base_url)
            .field("model", &self.model)
            .field("temperature", &self.temperature)
            .field("max_tokens", &self.max_tokens)
            .field("max_retries", &self.max_retries)
            .field("timeout", &self.timeout)
            .finish()
    }
}

#[derive(Clone)]
pub struct ChatClient {
    client: ClientWithMiddleware,
    config: ModelConfig,
}

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("HTTP error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("HTTP middleware error: {0}")]
    Middleware(#[from] reqwest_middleware::Error),
    #[error("API error: {status} - {message}")]
    Api { status: u16, message: String },
    #[error("No content in completion response")]
    EmptyResponse,
}

impl ChatClient {
    const SUMMARIZER_SYSTEM_PROMPT: &str = include_str!("./prompts/system_summarizer.txt");
    const ASSISTANT_SYSTEM_PROMPT: &str = include_str!("./prompts/system_assistant.txt");
    const SUMMARIZE_PROMPT: &str = include_str!("./prompts/summarize.txt");
    const REFINE_PROMPT: &str = include_str!("./prompts/refine.txt");

    pub fn new(config: ModelConfig) -> Self {
        let retry_policy = ExponentialBackoff::builder().build_with_max_retries(config.max_retries);
        let client = ClientBuilder::new(reqwest::Client::new())
            .with(RetryTransientMiddleware::new_with_policy(retry_policy))
            .build();

        Self { client, config }
    }

    pub fn config(&self) -> &ModelConfig {
        &self.config
    }

    #[tracing::instrument(skip_all, fields(model = %self.config.model))]
    pub async fn send_completion_request(
        &self,
        system_prompt: &str,
        user_content: impl Into<String>,
    ) -> Result<CompletionResponse, ChatError> {
        let mut body = serde_json::json!({
            "model": self.config.model,
            "temperature": self.config.temperature,
            "messages": [
                {
                    "role": "system",
                    "content": system_prompt
                },
                {
                    "role": "user",
                    "content": user_content.into()
                }
            ]
        });
        if let Some(max_tokens) = self.config.max_tokens {
            body["max_tokens"] = serde_json::json!(max_tokens);
        }

        let resp = self
            .client
            .post(format!(
                "{}/chat/completions",
                self.config.base_url.trim_end_matches('/')
            ))
            .bearer_auth(&self.config.api_key)
            .timeout(self.config.timeout)
            .json(&body)
            .send()
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to make http request"))?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let message = resp.text().await.unwrap_or_default();
            tracing::error!(status, %message, "Completion request was rejected");
            return Err(ChatError::Api { status, message });
        }

        Ok(resp.json::<CompletionResponse>().await?)
    }

    /// Sends one system + user exchange and returns the reply text.
    async fn complete(
        &self,
        system_prompt: &str,
        user_content: String,
    ) -> Result<String, ChatError> {
        let response = self
            .send_completion_request(system_prompt, user_content)
            .await?;

        let choice = response.choices.into_iter().next();
        if let Some(reason) = choice.as_ref().and_then(|c| c.finish_reason.as_deref()) {
            if reason == "length" {
                tracing::warn!("Completion was cut off by the token limit");
            }
        }

        choice
            .and_then(|c| c.message.content)
            .filter(|content| !content.trim().is_empty())
            .map(|content| content.trim().to_string())
            .ok_or(ChatError::EmptyResponse)
    }

    /// Single-turn question answering.
    #[tracing::instrument(skip(self))]
    pub async fn ask(&self, question: &str) -> Result<String, ChatError> {
        self.complete(Self::ASSISTANT_SYSTEM_PROMPT, format!("Question: {question}"))
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to answer question"))
    }
}

#[derive(Debug, Deserialize)]
pub struct CompletionResponse {
    #[serde(default)]
    pub id: Option<String>,
    pub choices: Vec<CompletionChoice>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionChoice {
    #[serde(default)]
    pub index: u32,
    pub message: CompletionMessage,
    #[serde(default)]
    pub finish_reason: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CompletionMessage {
    pub role: String,
    pub content: Option<String>,
}

impl Summarizer for ChatClient {
    type Error = ChatError;

    async fn summarize_one(&self, text: &str) -> Result<String, Self::Error> {
        let prompt = render_prompt(Self::SUMMARIZE_PROMPT, &[("text", text)]);
        self.complete(Self::SUMMARIZER_SYSTEM_PROMPT, prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to summarize content"))
    }

    async fn refine(&self, existing_summary: &str, text: &str) -> Result<String, Self::Error> {
        let prompt = render_prompt(
            Self::REFINE_PROMPT,
            &[("existing_summary", existing_summary), ("text", text)],
        );
        self.complete(Self::SUMMARIZER_SYSTEM_PROMPT, prompt)
            .await
            .inspect_err(|e| tracing::error!(error = %e, "Failed to refine summary"))
    }
}

/// Substitutes `{name}` placeholders in one pass, so placeholder-like text
/// inside a value is never expanded again.
fn render_prompt(template: &str, vars: &[(&str, &str)]) -> String {
    let mut out = String::with_capacity(template.len());
    let mut rest = template;

    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let tail = &rest[open + 1..];

        let var = vars
            .iter()
            .find(|(name, _)| tail.starts_with(name) && tail[name.len()..].starts_with('}'));

        match var {
            Some((name, value)) => {
                out.push_str(value);
                rest = &tail[name.len() + 1..];
            }
            None => {
                out.push('{');
                rest = tail;
            }
        }
    }
    out.push_str(rest);
    out
}
