use async_trait::async_trait;
use log::debug;
use reqwest::{Client, StatusCode};
use serde::{Deserialize, Serialize};

use super::{PrimaryTranslator, http_client, request_error, service_language_code, status_error};
use crate::errors::ProviderError;

/// Google Cloud Translation (basic, v2) client
#[derive(Debug)]
pub struct GoogleTranslate {
    client: Client,
    endpoint: String,
    api_key: String,
}

#[derive(Debug, Serialize)]
struct TranslateRequest<'a> {
    q: Vec<&'a str>,
    source: &'a str,
    target: &'a str,
    format: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResponse {
    data: TranslateData,
}

#[derive(Debug, Deserialize)]
struct TranslateData {
    #[serde(default)]
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    #[serde(rename = "translatedText")]
    translated_text: String,
}

impl GoogleTranslate {
    pub fn new(endpoint: &str, api_key: &str, timeout_secs: u64) -> Self {
        Self {
            client: http_client(timeout_secs),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
        }
    }
}

/// Bad requests naming a language mean the pair is unsupported
fn is_unsupported_language(status: StatusCode, body: &str) -> bool {
    status == StatusCode::BAD_REQUEST
        && (body.contains("language pair") || body.contains("language is invalid") || body.contains("Invalid Value"))
}

#[async_trait]
impl PrimaryTranslator for GoogleTranslate {
    fn name(&self) -> &str {
        "google"
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
            q: vec![term],
            source: &source,
            target: &target,
            format: "text",
        };
        let response = self
            .client
            .post(&self.endpoint)
            .query(&[("key", self.api_key.as_str())])
            .json(&request)
            .send()
            .await
            .map_err(|e| request_error("Google", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if is_unsupported_language(status, &body) {
                debug!("Google: unsupported pair {} -> {}", source, target);
                return Ok(None);
            }
            return Err(status_error("Google", status, body));
        }

        let body = response
            .json::<TranslateResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Google response: {}", e)))?;
        match body.data.translations.into_iter().next() {
            Some(translation) => Ok(Some(translation.translated_text)),
            None => Err(ProviderError::ParseError(
                "Google: no translations returned".to_string(),
            )),
        }
    }
}
