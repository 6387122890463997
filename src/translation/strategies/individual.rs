/*!
 * One prompt per source label.
 */

use async_trait::async_trait;
use log::{debug, info};

use super::{SecondaryOutput, SecondaryStrategy, ask, build_prompt};
use crate::errors::ProviderError;
use crate::providers::SecondaryTranslator;
use crate::translation::context::TermContext;
use crate::translation::prompts::PromptComponent;

/// Translates every label on its own, with the best context for its language
#[derive(Debug, Clone, Copy, Default)]
pub struct IndividualStrategy;

impl IndividualStrategy {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl SecondaryStrategy for IndividualStrategy {
    fn name(&self) -> &str {
        "individual"
    }

    async fn translate(
        &self,
        term: &TermContext<'_>,
        translator: &dyn SecondaryTranslator,
    ) -> Result<SecondaryOutput, ProviderError> {
        let mut output = SecondaryOutput::PerLanguage(Vec::new());

        for (source_language, texts) in term.labels.iter() {
            for text in texts.iter().filter(|t| !t.trim().is_empty()) {
                let mut components = vec![PromptComponent::TermLabel(text.clone())];
                if let Some(description) = term.description_for(source_language) {
                    debug!("Using term description for '{}' ({}): {}", text, source_language, description);
                    components.push(PromptComponent::TermDescription(description));
                } else if let Some(context) = term.fallback_context() {
                    debug!("No term description for '{}' ({}), using general context", text, source_language);
                    components.push(PromptComponent::GeneralContext(context.to_string()));
                }

                let prompt = build_prompt(&components, term, translator);
                debug!("Individual prompt: {:?}", prompt);

                let translation = ask(translator, &prompt).await?;
                info!(
                    "Secondary translation '{}' ({}) -> {:?} ({})",
                    text, source_language, translation, term.target_language
                );
                output.set(source_language, translation);
            }
        }

        Ok(output)
    }
}
