/*!
 * Offline translator implementations.
 *
 * - `DummyTranslator` / `DummyNoneTranslator` / `DummySecondary`: selectable
 *   services for dry runs without network access
 * - `MockPrimary` / `MockSecondary`: scriptable translators for tests
 */

use async_trait::async_trait;
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use super::{PrimaryTranslator, SecondaryTranslator};
use crate::errors::ProviderError;
use crate::translation::prompts::Prompt;

/// Prefix of the prompt line carrying the term
const TERM_LINE_PREFIX: &str = "Term to translate:";

/// Primary translator answering `<term>_<target>_dummy`
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyTranslator;

#[async_trait]
impl PrimaryTranslator for DummyTranslator {
    fn name(&self) -> &str {
        "dummy"
    }

    async fn translate(
        &self,
        term: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<Option<String>, ProviderError> {
        Ok(Some(format!("{}_{}_dummy", term, target_language)))
    }
}

/// Primary translator that never has a translation
#[derive(Debug, Clone, Copy, Default)]
pub struct DummyNoneTranslator;

#[async_trait]
impl PrimaryTranslator for DummyNoneTranslator {
    fn name(&self) -> &str {
        "dummynone"
    }

    async fn translate(&self, _: &str, _: &str, _: &str) -> Result<Option<String>, ProviderError> {
        Ok(None)
    }
}

/// Secondary translator answering `<term>_dummy` for single-term prompts
#[derive(Debug, Clone, Copy, Default)]
pub struct DummySecondary;

#[async_trait]
impl SecondaryTranslator for DummySecondary {
    fn service_name(&self) -> &str {
        "dummy"
    }

    async fn respond(&self, prompt: &Prompt) -> Result<Option<String>, ProviderError> {
        Ok(prompt
            .input
            .lines()
            .find_map(|line| line.trim().strip_prefix(TERM_LINE_PREFIX))
            .map(str::trim)
            .filter(|label| !label.is_empty())
            .map(|label| format!("{}_dummy", label)))
    }
}

/// Behavior mode for the mock primary translator
#[derive(Debug, Clone, PartialEq)]
pub enum MockBehavior {
    /// Always returns the same text
    Fixed(String),
    /// Returns `<term>_<target>`
    Echo,
    /// Always returns no translation
    Nothing,
    /// Always fails with an API error
    Failing,
    /// Fails every Nth request, echoes otherwise
    Intermittent { fail_every: usize },
    /// Always signals an exhausted quota
    RateLimited,
}

/// Mock primary translator for testing aggregation behavior
#[derive(Debug, Clone)]
pub struct MockPrimary {
    name: String,
    behavior: MockBehavior,
    /// Request counter, shared between clones
    request_count: Arc<AtomicUsize>,
}

impl MockPrimary {
    pub fn new(name: &str, behavior: MockBehavior) -> Self {
        Self {
            name: name.to_string(),
            behavior,
            request_count: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Handle on the number of `translate` calls
    pub fn call_counter(&self) -> Arc<AtomicUsize> {
        Arc::clone(&self.request_count)
    }
}

#[async_trait]
impl PrimaryTranslator for MockPrimary {
    fn name(&self) -> &str {
        &self.name
    }

    async fn translate(
        &self,
        term: &str,
        _source_language: &str,
        target_language: &str,
    ) -> Result<Option<String>, ProviderError> {
        let count = self.request_count.fetch_add(1, Ordering::SeqCst);

        match &self.behavior {
            MockBehavior::Fixed(text) => Ok(Some(text.clone())),
            MockBehavior::Echo => Ok(Some(format!("{}_{}", term, target_language))),
            MockBehavior::Nothing => Ok(None),
            MockBehavior::Failing => Err(ProviderError::ApiError {
                message: "Simulated provider failure".to_string(),
                status_code: 500,
            }),
            MockBehavior::Intermittent { fail_every } => {
                if count % fail_every == fail_every - 1 {
                    Err(ProviderError::ApiError {
                        message: format!("Simulated intermittent failure (request #{})", count + 1),
                        status_code: 503,
                    })
                } else {
                    Ok(Some(format!("{}_{}", term, target_language)))
                }
            }
            MockBehavior::RateLimited => Err(ProviderError::RateLimitExceeded(
                "Simulated quota exhaustion".to_string(),
            )),
        }
    }
}

/// Scripted secondary translator.
///
/// Answers are consumed in order; once the script is exhausted the responder
/// (if any) is used, otherwise no answer is given. Every prompt is recorded.
#[derive(Debug, Default)]
pub struct MockSecondary {
    service_name: String,
    script: Mutex<VecDeque<Result<Option<String>, ProviderError>>>,
    responder: Option<fn(&Prompt) -> Option<String>>,
    prompts: Mutex<Vec<Prompt>>,
}

impl MockSecondary {
    pub fn new(service_name: &str) -> Self {
        Self {
            service_name: service_name.to_string(),
            ..Default::default()
        }
    }

    /// Queue plain answers
    pub fn with_answers(self, answers: &[&str]) -> Self {
        self.script
            .lock()
            .extend(answers.iter().map(|a| Ok(Some(a.to_string()))));
        self
    }

    /// Queue an arbitrary result
    pub fn with_result(self, result: Result<Option<String>, ProviderError>) -> Self {
        self.script.lock().push_back(result);
        self
    }

    /// Answer prompts the script does not cover
    pub fn with_responder(mut self, responder: fn(&Prompt) -> Option<String>) -> Self {
        self.responder = Some(responder);
        self
    }

    pub fn call_count(&self) -> usize {
        self.prompts.lock().len()
    }

    /// Prompts received so far
    pub fn prompts(&self) -> Vec<Prompt> {
        self.prompts.lock().clone()
    }
}

#[async_trait]
impl SecondaryTranslator for MockSecondary {
    fn service_name(&self) -> &str {
        &self.service_name
    }

    async fn respond(&self, prompt: &Prompt) -> Result<Option<String>, ProviderError> {
        self.prompts.lock().push(prompt.clone());

        let scripted = self.script.lock().pop_front();
        match scripted {
            Some(result) => result,
            None => Ok(self.responder.and_then(|responder| responder(prompt))),
        }
    }
}
