use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::{Deserialize, Serialize};

use super::{PrimaryTranslator, http_client, request_error, service_language_code, status_error};
use crate::errors::ProviderError;

/// Error codes for unsupported source and target languages
const UNSUPPORTED_LANGUAGE_CODES: &[u64] = &[400035, 400036];

/// Microsoft Translator (v3) client
#[derive(Debug)]
pub struct MicrosoftTranslator {
    client: Client,
    endpoint: String,
    api_key: String,
    region: String,
}

#[derive(Debug, Serialize)]
struct TextItem<'a> {
    #[serde(rename = "Text")]
    text: &'a str,
}

#[derive(Debug, Deserialize)]
struct TranslateResult {
    translations: Vec<Translation>,
}

#[derive(Debug, Deserialize)]
struct Translation {
    text: String,
}

#[derive(Debug, Deserialize)]
struct ErrorBody {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    code: u64,
    #[serde(default)]
    message: String,
}

impl MicrosoftTranslator {
    pub fn new(endpoint: &str, api_key: &str, region: &str, timeout_secs: u64) -> Self {
        Self {
            client: http_client(timeout_secs),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            region: region.to_string(),
        }
    }
}

/// Error code of a Translator error body, if it has one
fn error_code(body: &str) -> Option<u64> {
    serde_json::from_str::<ErrorBody>(body)
        .ok()
        .map(|e| {
            debug!("Microsoft error {}: {}", e.error.code, e.error.message);
            e.error.code
        })
}

#[async_trait]
impl PrimaryTranslator for MicrosoftTranslator {
    fn name(&self) -> &str {
        "microsoft"
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

        let mut request = self
            .client
            .post(format!("{}/translate", self.endpoint))
            .query(&[("api-version", "3.0"), ("from", source.as_str()), ("to", target.as_str())])
            .header("Ocp-Apim-Subscription-Key", &self.api_key)
            .json(&[TextItem { text: term }]);
        if !self.region.is_empty() {
            request = request.header("Ocp-Apim-Subscription-Region", &self.region);
        }

        let response = request
            .send()
            .await
            .map_err(|e| request_error("Microsoft", e))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if error_code(&body).is_some_and(|code| UNSUPPORTED_LANGUAGE_CODES.contains(&code)) {
                return Ok(None);
            }
            return Err(status_error("Microsoft", status, body));
        }

        let results = response
            .json::<Vec<TranslateResult>>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse Microsoft response: {}", e)))?;
        Ok(results
            .into_iter()
            .next()
            .and_then(|r| r.translations.into_iter().next())
            .map(|t| t.text))
    }
}
