use async_trait::async_trait;
use log::{debug, error};
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{SecondaryTranslator, check_status, http_client, request_error};
use crate::errors::ProviderError;
use crate::translation::prompts::Prompt;

/// Client for OpenAI chat completions and the services speaking the same API
/// (Mistral, DeepSeek, OpenWebUI)
#[derive(Debug)]
pub struct OpenAI {
    /// Service name used in logs and errors
    label: String,
    client: Client,
    /// Base URL up to and including the version segment
    endpoint: String,
    api_key: String,
    model: String,
    temperature: f32,
}

/// Chat completions request
#[derive(Debug, Serialize)]
pub struct ChatCompletionRequest {
    model: String,
    messages: Vec<ChatMessage>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Chat message format
#[derive(Debug, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Role of the message sender (system, user, assistant)
    pub role: String,
    /// Content of the message; absent for refusals and tool calls
    #[serde(default)]
    pub content: Option<String>,
}

/// Chat completions response
#[derive(Debug, Deserialize)]
pub struct ChatCompletionResponse {
    pub choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
pub struct ChatChoice {
    pub message: ChatMessage,
}

impl ChatCompletionRequest {
    pub fn new(model: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            messages: Vec::new(),
            temperature: None,
        }
    }

    /// Add a message to the request
    pub fn add_message(mut self, role: impl Into<String>, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role: role.into(),
            content: Some(content.into()),
        });
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }
}

impl OpenAI {
    pub fn new(
        label: &str,
        endpoint: &str,
        api_key: &str,
        model: &str,
        temperature: f32,
        timeout_secs: u64,
    ) -> Self {
        Self {
            label: label.to_string(),
            client: http_client(timeout_secs),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            model: model.to_string(),
            temperature,
        }
    }

    /// Send a chat completions request
    pub async fn complete(&self, request: &ChatCompletionRequest) -> Result<ChatCompletionResponse, ProviderError> {
        let url = format!("{}/chat/completions", self.endpoint);

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| request_error(&self.label, e))?;

        let response = check_status(&self.label, response).await.inspect_err(|e| {
            error!("{} API error: {}", self.label, e);
        })?;

        response.json::<ChatCompletionResponse>().await.map_err(|e| {
            ProviderError::ParseError(format!("Failed to parse {} API response: {}", self.label, e))
        })
    }

    /// Text of the first choice
    pub fn extract_text_from_response(response: &ChatCompletionResponse) -> Option<String> {
        response
            .choices
            .first()
            .and_then(|choice| choice.message.content.clone())
    }
}

#[async_trait]
impl SecondaryTranslator for OpenAI {
    /// Every chat-completions service shares the OpenAI prompt dialect
    fn service_name(&self) -> &str {
        "openai"
    }

    async fn respond(&self, prompt: &Prompt) -> Result<Option<String>, ProviderError> {
        let request = ChatCompletionRequest::new(&self.model)
            .add_message("system", &prompt.instructions)
            .add_message("user", &prompt.input)
            .temperature(self.temperature);

        let response = self.complete(&request).await?;
        let text = Self::extract_text_from_response(&response);
        debug!("{} answer: {:?}", self.label, text);

        Ok(text.filter(|t| !t.trim().is_empty()))
    }
}
