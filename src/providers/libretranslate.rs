use async_trait::async_trait;
use log::warn;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{PrimaryTranslator, http_client, request_error, service_language_code, status_error};
use crate::errors::ProviderError;

/// LibreTranslate (Argos) server client
#[derive(Debug)]
pub struct LibreTranslate {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: &'a str,
    source: &'a str,
    target: &'a str,
    format: &'a str,
    #[serde(skip_serializing_if = "str::is_empty")]
    api_key: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl LibreTranslate {
    pub fn new(endpoint: &str, api_key: &str, timeout_secs: u64) -> Self {
        Self {
            client: http_client(timeout_secs),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

#[async_trait]
impl PrimaryTranslator for LibreTranslate {
    fn name(&self) -> &str {
        "libretranslate"
    }

    async fn translate(
        &self,
        term: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Option<String>, ProviderError> {
        let (Some(source), Some(target)) = (
            service_language_code(source_language),
            service_language_code(target_language),
        ) else {
            return Ok(None);
        };

        let request = TranslateRequest {
            q: term,
            source: &source,
            target: &target,
            format: "text",
            api_key: &self.api_key,
        };
        let response = self
            .client
            .post(format!("{}/translate", self.endpoint))
            .json(&request)
            .send()
            .await
            .map_err(|e| request_error("LibreTranslate", e))?;

        let status = response.status();
        if status == StatusCode::BAD_REQUEST {
            let body = response.text().await.unwrap_or_default();
            warn!("LibreTranslate: unsupported pair {} -> {}: {}", source, target, body);
            return Ok(None);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(status_error("LibreTranslate", status, body));
        }

        let body = response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse LibreTranslate response: {}", e)))?;
        Ok(body.translated_text.filter(|t| !t.trim().is_empty()))
    }
}
