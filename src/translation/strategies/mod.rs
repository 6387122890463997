/*!
 * Secondary translation strategies.
 *
 * A strategy turns the labels of one property into one or more language
 * model translations:
 * - `individual`: one prompt per source label
 * - `batch`: all labels in a single prompt
 * - `hierarchy`: prompts built from the broader-concept chain
 */

use async_trait::async_trait;
use log::warn;
use std::fmt::Debug;

use super::candidates::CandidateSet;
use super::context::TermContext;
use super::prompts::{Prompt, PromptComponent, ServiceKind, compose, format_for};
use crate::app_config::StrategyKind;
use crate::errors::ProviderError;
use crate::providers::SecondaryTranslator;

pub mod batch;
pub mod hierarchy;
pub mod individual;

pub use batch::BatchStrategy;
pub use hierarchy::HierarchyStrategy;
pub use individual::IndividualStrategy;

/// Characters stripped from both ends of a model answer
const RESPONSE_TRIM: &[char] = &[' ', '\t', '\n', '\r', '\'', '"'];

/// What a strategy produced
#[derive(Debug, Clone, PartialEq)]
pub enum SecondaryOutput {
    /// One translation for the whole term
    Single(Option<String>),
    /// One translation per source language, in label order
    PerLanguage(Vec<(String, Option<String>)>),
}

impl SecondaryOutput {
    /// Record the translation for a language, replacing an earlier one
    pub fn set(&mut self, language: &str, translation: Option<String>) {
        match self {
            Self::Single(value) => *value = translation,
            Self::PerLanguage(entries) => match entries.iter_mut().find(|(lang, _)| lang == language) {
                Some((_, value)) => *value = translation,
                None => entries.push((language.to_string(), translation)),
            },
        }
    }

    /// Non-empty translations as a candidate set. A single translation is
    /// filed under the `none` language.
    pub fn candidates(&self) -> CandidateSet {
        let mut set = CandidateSet::new();
        match self {
            Self::Single(value) => {
                if let Some(text) = value {
                    set.push(crate::language_utils::UNSPECIFIED_LANGUAGE, text);
                }
            }
            Self::PerLanguage(entries) => {
                for (lang, value) in entries {
                    if let Some(text) = value {
                        set.push(lang, text);
                    }
                }
            }
        }
        set
    }

    pub fn is_empty(&self) -> bool {
        self.candidates().is_empty()
    }
}

/// A way of asking the secondary service for a translation
#[async_trait]
pub trait SecondaryStrategy: Send + Sync + Debug {
    fn name(&self) -> &str;

    /// Translate the labels of a term
    async fn translate(
        &self,
        term: &TermContext<'_>,
        translator: &dyn SecondaryTranslator,
    ) -> Result<SecondaryOutput, ProviderError>;
}

/// Create the strategy selected in the configuration
pub fn build_strategy(kind: StrategyKind, separate_language_prompts: bool) -> Box<dyn SecondaryStrategy> {
    match kind {
        StrategyKind::Individual => Box::new(IndividualStrategy::new()),
        StrategyKind::Batch => Box::new(BatchStrategy::new()),
        StrategyKind::Hierarchy => Box::new(HierarchyStrategy::new(separate_language_prompts)),
    }
}

/// Compose components and format them for the translator's service
pub(crate) fn build_prompt(
    components: &[PromptComponent],
    term: &TermContext<'_>,
    translator: &dyn SecondaryTranslator,
) -> Prompt {
    format_for(
        ServiceKind::from_name(translator.service_name()),
        &compose(components),
        &term.target_language_name(),
    )
}

/// Send a prompt and clean the answer.
///
/// Only a rate limit is returned as an error; other failures are logged and
/// give `None`.
pub(crate) async fn ask(
    translator: &dyn SecondaryTranslator,
    prompt: &Prompt,
) -> Result<Option<String>, ProviderError> {
    match translator.respond(prompt).await {
        Ok(Some(text)) => Ok(clean_response(&text)),
        Ok(None) => Ok(None),
        Err(e) if e.is_fatal() => Err(e),
        Err(e) => {
            warn!("{} request failed: {}", translator.service_name(), e);
            Ok(None)
        }
    }
}

/// Strip quotes and whitespace; an empty answer becomes `None`
pub fn clean_response(text: &str) -> Option<String> {
    let cleaned = text.trim_matches(RESPONSE_TRIM);
    if cleaned.is_empty() {
        None
    } else {
        Some(cleaned.to_string())
    }
}
