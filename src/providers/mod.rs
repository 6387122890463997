/*!
 * Provider implementations for the translation services.
 *
 * Two families of services take part in a run:
 * - Primary translators (machine translation APIs): MyMemory, Google Cloud
 *   Translation, Microsoft Translator, LibreTranslate
 * - Secondary translators (language models): Ollama, OpenAI and the
 *   OpenAI-compatible services, Anthropic
 *
 * Services are described by the enums in `app_config` and only built, once,
 * when a run selects them.
 */

use async_trait::async_trait;
use reqwest::{Client, Response, StatusCode};
use std::fmt::Debug;
use std::time::Duration;

use crate::app_config::{PrimaryService, ProviderConfig, SecondaryService};
use crate::errors::ProviderError;
use crate::translation::prompts::Prompt;

pub mod anthropic;
pub mod google;
pub mod libretranslate;
pub mod microsoft;
pub mod mock;
pub mod mymemory;
pub mod ollama;
pub mod openai;

/// A machine translation service
///
/// `Ok(None)` means the service has no translation, e.g. for an unsupported
/// language pair. Errors other than `RateLimitExceeded` are treated the same
/// way by callers.
#[async_trait]
pub trait PrimaryTranslator: Send + Sync + Debug {
    /// Short identifier used in logs
    fn name(&self) -> &str;

    /// Translate a single term
    async fn translate(
        &self,
        term: &str,
        source_language: &str,
        target_language: &str,
    ) -> Result<Option<String>, ProviderError>;
}

/// A language model answering structured prompts
///
/// The same call serves translation with context and rating of candidates.
#[async_trait]
pub trait SecondaryTranslator: Send + Sync + Debug {
    /// Service kind used to pick the prompt formatter
    fn service_name(&self) -> &str;

    /// Send a prompt and return the raw answer text
    async fn respond(&self, prompt: &Prompt) -> Result<Option<String>, ProviderError>;
}

/// Build a primary translator from its configuration
pub fn build_primary(
    service: PrimaryService,
    config: &ProviderConfig,
) -> Result<Box<dyn PrimaryTranslator>, ProviderError> {
    let timeout = config.timeout_secs;
    Ok(match service {
        PrimaryService::MyMemory => Box::new(mymemory::MyMemory::new(
            &config.endpoint,
            &config.api_key,
            timeout,
        )),
        PrimaryService::Google => Box::new(google::GoogleTranslate::new(
            &config.endpoint,
            require_key(service.display_name(), &config.api_key)?,
            timeout,
        )),
        PrimaryService::Microsoft => Box::new(microsoft::MicrosoftTranslator::new(
            &config.endpoint,
            require_key(service.display_name(), &config.api_key)?,
            &config.region,
            timeout,
        )),
        PrimaryService::LibreTranslate => Box::new(libretranslate::LibreTranslate::new(
            &config.endpoint,
            &config.api_key,
            timeout,
        )),
        PrimaryService::Dummy => Box::new(mock::DummyTranslator),
        PrimaryService::DummyNone => Box::new(mock::DummyNoneTranslator),
    })
}

/// Build the secondary translator from its configuration
pub fn build_secondary(
    service: SecondaryService,
    config: &ProviderConfig,
    temperature: f32,
) -> Result<Box<dyn SecondaryTranslator>, ProviderError> {
    let timeout = config.timeout_secs;
    Ok(match service {
        SecondaryService::Ollama => Box::new(ollama::Ollama::from_url(
            &config.endpoint,
            &config.model,
            temperature,
            timeout,
        )),
        SecondaryService::Anthropic => Box::new(anthropic::Anthropic::new(
            require_key(service.display_name(), &config.api_key)?,
            &config.endpoint,
            &config.model,
            temperature,
            timeout,
        )),
        SecondaryService::OpenAI
        | SecondaryService::Mistral
        | SecondaryService::DeepSeek
        | SecondaryService::OpenWebUI => Box::new(openai::OpenAI::new(
            service.display_name(),
            &config.endpoint,
            require_key(service.display_name(), &config.api_key)?,
            &config.model,
            temperature,
            timeout,
        )),
        SecondaryService::Dummy => Box::new(mock::DummySecondary),
    })
}

fn require_key<'a>(service: &str, key: &'a str) -> Result<&'a str, ProviderError> {
    if key.is_empty() {
        return Err(ProviderError::AuthenticationError(format!(
            "API key is required for {}",
            service
        )));
    }
    Ok(key)
}

/// HTTP client with the given timeout
pub(crate) fn http_client(timeout_secs: u64) -> Client {
    Client::builder()
        .timeout(Duration::from_secs(timeout_secs))
        .build()
        .unwrap_or_default()
}

/// Map a transport failure onto the provider error kinds
pub(crate) fn request_error(service: &str, error: reqwest::Error) -> ProviderError {
    if error.is_connect() || error.is_timeout() {
        ProviderError::ConnectionError(format!("{}: {}", service, error))
    } else {
        ProviderError::RequestFailed(format!("{}: {}", service, error))
    }
}

/// Turn a non-success response into the matching provider error
pub(crate) async fn check_status(service: &str, response: Response) -> Result<Response, ProviderError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Failed to get error response text".to_string());
    Err(status_error(service, status, body))
}

pub(crate) fn status_error(service: &str, status: StatusCode, body: String) -> ProviderError {
    match status {
        StatusCode::TOO_MANY_REQUESTS => {
            ProviderError::RateLimitExceeded(format!("{} ({}): {}", service, status, body))
        }
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            ProviderError::AuthenticationError(format!("{} ({}): {}", service, status, body))
        }
        _ => ProviderError::ApiError {
            status_code: status.as_u16(),
            message: format!("{}: {}", service, body),
        },
    }
}

/// Language code sent to machine translation APIs, `None` if the tag is not a language
pub(crate) fn service_language_code(tag: &str) -> Option<String> {
    crate::language_utils::normalize_to_part1_or_part2t(tag).ok()
}
