use async_trait::async_trait;
use log::debug;
use reqwest::Client;
use serde::Deserialize;
use serde_json::Value;
use url::Url;

use super::{PrimaryTranslator, check_status, http_client, request_error, service_language_code};
use crate::errors::ProviderError;

/// Marker of the daily quota warning MyMemory returns instead of a translation
const QUOTA_WARNING: &str = "YOU USED ALL AVAILABLE FREE TRANSLATIONS";

/// MyMemory translation memory API
#[derive(Debug)]
pub struct MyMemory {
    client: Client,
    endpoint: String,
    /// Contact email; raises the free daily quota
    email: String,
}

#[derive(Debug, Deserialize)]
struct MyMemoryResponse {
    #[serde(rename = "responseData")]
    response_data: Option<ResponseData>,
    /// Number or string depending on the outcome
    #[serde(rename = "responseStatus", default)]
    response_status: Value,
    #[serde(rename = "responseDetails", default)]
    response_details: Value,
}

#[derive(Debug, Deserialize)]
struct ResponseData {
    #[serde(rename = "translatedText")]
    translated_text: Option<String>,
}

impl MyMemory {
    pub fn new(endpoint: &str, email: &str, timeout_secs: u64) -> Self {
        Self {
            client: http_client(timeout_secs),
            endpoint: endpoint.trim_end_matches('/').to_string(),
            email: email.to_string(),
        }
    }

    fn request_url(&self, term: &str, source: &str, target: &str) -> Result<Url, ProviderError> {
        let langpair = format!("{}|{}", source, target);
        let mut params = vec![("q", term), ("langpair", langpair.as_str())];
        if !self.email.is_empty() {
            params.push(("de", self.email.as_str()));
        }
        Url::parse_with_params(&format!("{}/get", self.endpoint), &params)
            .map_err(|e| ProviderError::RequestFailed(format!("MyMemory: invalid endpoint: {}", e)))
    }
}

/// Interpret a decoded MyMemory body
fn interpret(body: MyMemoryResponse) -> Result<Option<String>, ProviderError> {
    let status = match &body.response_status {
        Value::Number(n) => n.as_u64().unwrap_or(0),
        Value::String(s) => s.trim().parse().unwrap_or(0),
        _ => 0,
    };
    let details = body.response_details.as_str().unwrap_or_default();
    let text = body.response_data.and_then(|d| d.translated_text).unwrap_or_default();

    if status == 429 || details.contains(QUOTA_WARNING) || text.contains(QUOTA_WARNING) {
        return Err(ProviderError::RateLimitExceeded(format!("MyMemory: {}", details)));
    }
    if status != 200 {
        // Invalid language pairs are reported with status 403
        debug!("MyMemory status {}: {}", status, details);
        return Ok(None);
    }

    let text = text.trim();
    Ok(if text.is_empty() { None } else { Some(text.to_string()) })
}

#[async_trait]
impl PrimaryTranslator for MyMemory {
    fn name(&self) -> &str {
        "mymemory"
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
            debug!("MyMemory: unsupported pair {} -> {}", source_language, target_language);
            return Ok(None);
        };

        let url = self.request_url(term, &source, &target)?;
        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| request_error("MyMemory", e))?;
        let response = check_status("MyMemory", response).await?;

        let body = response
            .json::<MyMemoryResponse>()
            .await
            .map_err(|e| ProviderError::ParseError(format!("Failed to parse MyMemory response: {}", e)))?;
        interpret(body)
    }
}
