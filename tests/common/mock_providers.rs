/*!
 * Helpers around the library's mock translators
 *
 * The pipeline owns its secondary translator, so tests hand it a
 * `SharedSecondary` and keep a second handle to inspect the calls.
 */

use async_trait::async_trait;
use std::sync::Arc;

use skos_translator::errors::ProviderError;
use skos_translator::providers::mock::{MockBehavior, MockPrimary, MockSecondary};
use skos_translator::providers::{PrimaryTranslator, SecondaryTranslator};
use skos_translator::translation::prompts::Prompt;

/// Secondary translator handle shared between a test and the pipeline
#[derive(Debug, Clone)]
pub struct SharedSecondary(pub Arc<MockSecondary>);

impl SharedSecondary {
    pub fn new(mock: MockSecondary) -> Self {
        Self(Arc::new(mock))
    }

    pub fn call_count(&self) -> usize {
        self.0.call_count()
    }

    pub fn prompts(&self) -> Vec<Prompt> {
        self.0.prompts()
    }
}

#[async_trait]
impl SecondaryTranslator for SharedSecondary {
    fn service_name(&self) -> &str {
        self.0.service_name()
    }

    async fn respond(&self, prompt: &Prompt) -> Result<Option<String>, ProviderError> {
        self.0.respond(prompt).await
    }
}

/// Boxed primary translators that all return the same text
pub fn fixed_primaries(texts: &[&str]) -> Vec<Box<dyn PrimaryTranslator>> {
    texts
        .iter()
        .enumerate()
        .map(|(i, text)| {
            Box::new(MockPrimary::new(&format!("fixed-{}", i), MockBehavior::Fixed(text.to_string())))
                as Box<dyn PrimaryTranslator>
        })
        .collect()
}

/// Reviewer responder picking the first listed candidate with full confidence
pub fn pick_first_candidate(prompt: &Prompt) -> Option<String> {
    let marker = "coming from translation systems are: \n";
    let start = prompt.input.find(marker)? + marker.len();
    let candidate = prompt.input[start..].lines().next()?.trim();
    if candidate.is_empty() {
        return None;
    }
    Some(format!("{}; 1", candidate))
}
