/*!
 * Prompts built from the broader-concept chain.
 *
 * The chain is walked upwards along the first `skos:broader` parent only and
 * rendered top-level first, with the term itself as the last entry. Concepts
 * without a broader parent are handed to the individual strategy.
 */

use async_trait::async_trait;
use log::{debug, info, warn};
use std::collections::HashSet;

use super::{IndividualStrategy, SecondaryOutput, SecondaryStrategy, ask, build_prompt};
use crate::errors::ProviderError;
use crate::language_utils::{display_name, is_english, tags_equal};
use crate::providers::SecondaryTranslator;
use crate::translation::context::TermContext;
use crate::translation::prompts::{PromptComponent, PromptTemplate};
use crate::vocabulary::{Concept, ConceptGraph, LanguageValues, PREF_LABEL};

/// Chain entry for a concept without any preferred label
pub const NO_LABEL: &str = "[No label]";

/// Language used when the term has no preferred labels at all
const FALLBACK_LANGUAGE: &str = "en";

#[derive(Debug, Clone, Copy)]
pub struct HierarchyStrategy {
    /// One prompt per language instead of a combined one
    separate_language_prompts: bool,
    fallback: IndividualStrategy,
}

impl Default for HierarchyStrategy {
    fn default() -> Self {
        Self::new(true)
    }
}

impl HierarchyStrategy {
    pub fn new(separate_language_prompts: bool) -> Self {
        Self {
            separate_language_prompts,
            fallback: IndividualStrategy::new(),
        }
    }

    /// Languages of the term's preferred labels, or English
    fn available_languages(term: &TermContext<'_>) -> Vec<String> {
        match term.properties.get(PREF_LABEL) {
            Some(labels) if !labels.is_empty() => labels.languages().map(str::to_string).collect(),
            _ => vec![FALLBACK_LANGUAGE.to_string()],
        }
    }

    async fn translate_combined(
        &self,
        term: &TermContext<'_>,
        translator: &dyn SecondaryTranslator,
        languages: &[String],
    ) -> Result<SecondaryOutput, ProviderError> {
        let target_name = term.target_language_name();
        let sections: Vec<String> = languages
            .iter()
            .map(|language| {
                let mut chain = broader_chain(term.graph, term.concept, language);
                if let Some(label) = term.properties.get(PREF_LABEL).and_then(|l| pick_label(l, language)) {
                    chain.push(label);
                }
                let language_name = display_name(language);
                let header = PromptTemplate::fill(
                    PromptTemplate::HIERARCHY_COMBINED_SECTION,
                    &[("language_name", language_name.as_str()), ("language", language.as_str())],
                );
                format!("{}\n{}\n", header, chain.join("\n"))
            })
            .collect();

        let text = format!(
            "{}{}{}",
            PromptTemplate::fill(
                PromptTemplate::HIERARCHY_COMBINED_HEADER,
                &[("target_language", target_name.as_str())]
            ),
            sections.join("\n"),
            PromptTemplate::HIERARCHY_COMBINED_FOOTER
        );

        let prompt = build_prompt(&[PromptComponent::Raw(text)], term, translator);
        debug!("Combined hierarchy prompt: {:?}", prompt);

        let translation = ask(translator, &prompt).await?;
        info!("Hierarchy translation for {} -> {:?} ({})", term.concept, translation, term.target_language);
        Ok(SecondaryOutput::Single(translation))
    }

    async fn translate_per_language(
        &self,
        term: &TermContext<'_>,
        translator: &dyn SecondaryTranslator,
        languages: &[String],
    ) -> Result<SecondaryOutput, ProviderError> {
        let target_name = term.target_language_name();
        let mut output = SecondaryOutput::PerLanguage(Vec::new());

        for language in languages {
            let current = term.properties.get(PREF_LABEL).and_then(|l| pick_label(l, language));
            let mut chain = broader_chain(term.graph, term.concept, language);
            if let Some(label) = &current {
                chain.push(label.clone());
            }

            let language_name = display_name(language);
            let label = current.as_deref().unwrap_or(NO_LABEL);
            let header = PromptTemplate::fill(
                PromptTemplate::HIERARCHY_LANGUAGE_HEADER,
                &[
                    ("language_name", language_name.as_str()),
                    ("label", label),
                    ("target_language", target_name.as_str()),
                ],
            );
            let section = PromptTemplate::fill(
                PromptTemplate::HIERARCHY_LANGUAGE_SECTION,
                &[("language_name", language_name.as_str())],
            );

            let components = [
                PromptComponent::Raw(header),
                PromptComponent::BroaderChain(format!("{}\n{}", section, chain.join("\n"))),
                PromptComponent::Raw(PromptTemplate::HIERARCHY_LANGUAGE_FOOTER.to_string()),
            ];
            let prompt = build_prompt(&components, term, translator);
            debug!("Hierarchy prompt for {}: {:?}", language, prompt);

            let translation = ask(translator, &prompt).await?;
            info!(
                "Hierarchy translation '{}' ({}) -> {:?} ({})",
                label, language, translation, term.target_language
            );
            output.set(language, translation);
        }

        Ok(output)
    }
}

#[async_trait]
impl SecondaryStrategy for HierarchyStrategy {
    fn name(&self) -> &str {
        "hierarchy"
    }

    async fn translate(
        &self,
        term: &TermContext<'_>,
        translator: &dyn SecondaryTranslator,
    ) -> Result<SecondaryOutput, ProviderError> {
        if term.graph.broader(term.concept).is_none() {
            info!("No broader concept for {}, using the individual strategy", term.concept);
            return self.fallback.translate(term, translator).await;
        }

        let languages = Self::available_languages(term);
        if self.separate_language_prompts {
            self.translate_per_language(term, translator, &languages).await
        } else {
            self.translate_combined(term, translator, &languages).await
        }
    }
}

/// Preferred label in the desired language, else English, else any language
pub fn pick_label(labels: &LanguageValues, desired_language: &str) -> Option<String> {
    let first_where = |matches: &dyn Fn(&str) -> bool| {
        labels
            .iter()
            .find(|(lang, _)| matches(lang))
            .and_then(|(_, texts)| texts.first())
            .cloned()
    };

    first_where(&|lang: &str| tags_equal(lang, desired_language))
        .or_else(|| first_where(&is_english))
        .or_else(|| labels.first_available().map(|(_, text)| text.to_string()))
}

/// Labels of the broader ancestors, top-level first.
///
/// Ancestors without a preferred label appear as `NO_LABEL`. The walk stops
/// at the first concept seen twice.
pub fn broader_chain(graph: &dyn ConceptGraph, concept: &Concept, desired_language: &str) -> Vec<String> {
    let mut chain = Vec::new();
    let mut visited = HashSet::from([concept.clone()]);
    let mut current = concept.clone();

    while let Some(parent) = graph.broader(&current) {
        if !visited.insert(parent.clone()) {
            warn!("Broader cycle detected at {}, stopping the hierarchy walk", parent);
            break;
        }
        let label = graph
            .term_properties(&parent)
            .get(PREF_LABEL)
            .and_then(|labels| pick_label(labels, desired_language))
            .unwrap_or_else(|| NO_LABEL.to_string());
        chain.push(label);
        current = parent;
    }

    chain.reverse();
    chain
}
