/*!
 * What the secondary strategies and the arbiter know about a term.
 */

use crate::language_utils::{display_name, is_english, tags_equal};
use crate::vocabulary::{Concept, ConceptGraph, LanguageValues, TermProperties};

/// Everything needed to prompt a language model about one property of a concept
#[derive(Clone, Copy)]
pub struct TermContext<'a> {
    pub concept: &'a Concept,
    pub graph: &'a dyn ConceptGraph,
    /// Labels of the property being translated
    pub labels: &'a LanguageValues,
    pub properties: &'a TermProperties,
    pub vocabulary_context: Option<&'a str>,
    pub user_context: Option<&'a str>,
    pub target_language: &'a str,
}

impl<'a> TermContext<'a> {
    /// Display name of the target language ("German")
    pub fn target_language_name(&self) -> String {
        display_name(self.target_language)
    }

    /// Best description for a source language
    pub fn description_for(&self, source_language: &str) -> Option<String> {
        choose_term_context(&self.properties.descriptions(), source_language)
    }

    /// Vocabulary context, then user context
    pub fn fallback_context(&self) -> Option<&'a str> {
        self.vocabulary_context
            .filter(|c| !c.trim().is_empty())
            .or(self.user_context.filter(|c| !c.trim().is_empty()))
    }
}

impl std::fmt::Debug for TermContext<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TermContext")
            .field("concept", self.concept)
            .field("labels", self.labels)
            .field("target_language", &self.target_language)
            .finish()
    }
}

/// Pick a description: exact language first, then English, then whatever comes first.
pub fn choose_term_context(descriptions: &LanguageValues, source_language: &str) -> Option<String> {
    let usable = |texts: &[String]| {
        texts
            .iter()
            .map(|t| t.trim())
            .find(|t| !t.is_empty())
            .map(str::to_string)
    };

    descriptions
        .iter()
        .filter(|(lang, _)| tags_equal(lang, source_language))
        .find_map(|(_, texts)| usable(texts))
        .or_else(|| {
            descriptions
                .iter()
                .filter(|(lang, _)| is_english(lang))
                .find_map(|(_, texts)| usable(texts))
        })
        .or_else(|| descriptions.iter().find_map(|(_, texts)| usable(texts)))
}
