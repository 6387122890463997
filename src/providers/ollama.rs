use async_trait::async_trait;
use log::{debug, error};
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};
use std::time::Duration;

use super::{SecondaryTranslator, http_client, status_error};
use crate::errors::ProviderError;
use crate::translation::prompts::Prompt;

/// Ollama client for interacting with Ollama API
#[derive(Debug)]
pub struct Ollama {
    /// Base URL of the Ollama API
    base_url: String,
    /// HTTP client for making requests
    client: Client,
    model: String,
    temperature: f32,
    /// Maximum number of retry attempts
    max_retries: u32,
    /// Base backoff time in milliseconds for exponential backoff
    backoff_base_ms: u64,
}

/// Generate request for the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Model name to use for generation
    model: String,
    /// Prompt to generate from
    prompt: String,
    /// System message to guide the model
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<String>,
    /// Additional model parameters
    #[serde(skip_serializing_if = "Option::is_none")]
    options: Option<GenerationOptions>,
    /// Whether to stream the response
    #[serde(skip_serializing_if = "Option::is_none")]
    stream: Option<bool>,
}

/// Generation options for the Ollama API
#[derive(Debug, Default, Serialize, Deserialize)]
pub struct GenerationOptions {
    /// Temperature for generation (default: 0.8)
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
}

/// Generation response from the Ollama API
#[derive(Debug, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Model name
    #[serde(default)]
    pub model: String,
    /// Generated text
    pub response: String,
    /// Whether the generation is complete
    #[serde(default)]
    pub done: bool,
}

impl GenerationRequest {
    /// Create a new generation request
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            options: None,
            stream: None,
        }
    }

    /// Set the system message
    pub fn system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    /// Set the temperature
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.options.get_or_insert_with(GenerationOptions::default).temperature = Some(temperature);
        self
    }

    /// Disable streaming
    pub fn no_stream(mut self) -> Self {
        self.stream = Some(false);
        self
    }
}

impl Ollama {
    /// Create a new Ollama client from a complete URL
    pub fn from_url(url: &str, model: &str, temperature: f32, timeout_secs: u64) -> Self {
        Self {
            base_url: url.trim_end_matches('/').to_string(),
            client: http_client(timeout_secs),
            model: model.to_string(),
            temperature,
            max_retries: 3,
            backoff_base_ms: 1000,
        }
    }

    /// Generate text from the Ollama API with retry logic
    ///
    /// Server and network errors are retried with exponential backoff; client
    /// errors are returned immediately.
    pub async fn generate(&self, request: &GenerationRequest) -> Result<GenerationResponse, ProviderError> {
        let url = format!("{}/api/generate", self.base_url);

        let mut attempt = 0;
        let mut last_error = None;

        while attempt <= self.max_retries {
            match self.client.post(&url).json(request).send().await {
                Ok(response) => {
                    let status = response.status();
                    if status.is_success() {
                        let response_text = response.text().await.map_err(|e| {
                            ProviderError::ParseError(format!("Failed to get response text from Ollama API: {}", e))
                        })?;
                        return parse_generation(&response_text);
                    }

                    let error_text = response
                        .text()
                        .await
                        .unwrap_or_else(|_| "Failed to get error response text".to_string());
                    if status.is_server_error() && status != StatusCode::NOT_IMPLEMENTED {
                        error!(
                            "Ollama API error ({}): {} - attempt {}/{}",
                            status,
                            error_text,
                            attempt + 1,
                            self.max_retries + 1
                        );
                        last_error = Some(status_error("Ollama", status, error_text));
                    } else {
                        error!("Ollama API error ({}): {}", status, error_text);
                        return Err(status_error("Ollama", status, error_text));
                    }
                }
                Err(e) => {
                    error!(
                        "Ollama API network error: {} - attempt {}/{}",
                        e,
                        attempt + 1,
                        self.max_retries + 1
                    );
                    last_error = Some(ProviderError::ConnectionError(format!(
                        "Failed to send request to Ollama API: {}",
                        e
                    )));
                }
            }

            attempt += 1;

            // If we have more retries left, wait with exponential backoff
            if attempt <= self.max_retries {
                let backoff_ms = self.backoff_base_ms * (1u64 << (attempt - 1));
                tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
            }
        }

        Err(last_error.unwrap_or_else(|| {
            ProviderError::RequestFailed(format!(
                "Ollama API request failed after {} attempts",
                self.max_retries + 1
            ))
        }))
    }
}

/// Parse a generate response, accepting streamed (JSON lines) bodies too
fn parse_generation(text: &str) -> Result<GenerationResponse, ProviderError> {
    if let Ok(response) = serde_json::from_str::<GenerationResponse>(text) {
        return Ok(response);
    }

    let mut full_response = String::new();
    let mut model = String::new();
    let mut parsed_any = false;
    for line in text.lines().filter(|l| !l.trim().is_empty()) {
        if let Ok(part) = serde_json::from_str::<GenerationResponse>(line) {
            full_response.push_str(&part.response);
            model = part.model;
            parsed_any = true;
        }
    }

    if parsed_any {
        Ok(GenerationResponse {
            model,
            response: full_response,
            done: true,
        })
    } else {
        let preview: String = text.chars().take(500).collect();
        error!("Failed to parse Ollama API response. Raw response (first 500 chars): {}", preview);
        Err(ProviderError::ParseError(
            "Failed to parse Ollama API response. Response contains invalid JSON.".to_string(),
        ))
    }
}

#[async_trait]
impl SecondaryTranslator for Ollama {
    fn service_name(&self) -> &str {
        "ollama"
    }

    async fn respond(&self, prompt: &Prompt) -> Result<Option<String>, ProviderError> {
        let request = GenerationRequest::new(&self.model, &prompt.input)
            .system(&prompt.instructions)
            .temperature(self.temperature)
            .no_stream();

        let response = self.generate(&request).await?;
        debug!("Ollama answer ({}): {}", response.model, response.response);

        Ok(Some(response.response).filter(|t| !t.trim().is_empty()))
    }
}
