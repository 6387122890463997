/*!
 * All labels of a term in one prompt.
 */

use async_trait::async_trait;
use log::{debug, info};

use super::{SecondaryOutput, SecondaryStrategy, ask, build_prompt};
use crate::errors::ProviderError;
use crate::language_utils::display_name;
use crate::providers::SecondaryTranslator;
use crate::translation::context::TermContext;
use crate::translation::prompts::{PromptComponent, PromptTemplate};

/// Builds one section per source language and asks for a single translation
#[derive(Debug, Clone, Copy, Default)]
pub struct BatchStrategy;

impl BatchStrategy {
    pub fn new() -> Self {
        Self
    }

    fn section(term: &TermContext<'_>, language: &str, texts: &[String]) -> String {
        let labels: String = texts.iter().map(|text| format!("- {}\n", text)).collect();
        let context = term
            .description_for(language)
            .or_else(|| term.fallback_context().map(str::to_string))
            .map(|context| PromptTemplate::fill(PromptTemplate::BATCH_CONTEXT, &[("context", context.as_str())]))
            .unwrap_or_default();
        let language_name = display_name(language);

        PromptTemplate::fill(
            PromptTemplate::BATCH_SECTION,
            &[
                ("language_name", language_name.as_str()),
                ("labels", labels.as_str()),
                ("context", context.as_str()),
            ],
        )
    }
}

#[async_trait]
impl SecondaryStrategy for BatchStrategy {
    fn name(&self) -> &str {
        "batch"
    }

    async fn translate(
        &self,
        term: &TermContext<'_>,
        translator: &dyn SecondaryTranslator,
    ) -> Result<SecondaryOutput, ProviderError> {
        let sections: Vec<String> = term
            .labels
            .iter()
            .map(|(language, texts)| Self::section(term, language, texts))
            .collect();

        let prompt = build_prompt(&[PromptComponent::Raw(sections.join("\n"))], term, translator);
        debug!("Batch prompt: {:?}", prompt);

        let translation = ask(translator, &prompt).await?;
        info!("Batch translation for {} -> {:?} ({})", term.concept, translation, term.target_language);
        Ok(SecondaryOutput::Single(translation))
    }
}
