/*!
 * Fixed prompt texts.
 *
 * Placeholders use `{name}` syntax and are filled by `PromptTemplate::render`.
 */

use once_cell::sync::Lazy;
use regex::{Captures, Regex};

static PLACEHOLDER_REGEX: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{(\w+)\}").unwrap());

/// A prompt text with `{placeholder}` variables.
#[derive(Debug, Clone)]
pub struct PromptTemplate {
    /// The template string with placeholders
    template: String,
}

impl PromptTemplate {
    /// Translator persona shared by every formatter.
    pub const TRANSLATOR_PERSONA: &'static str =
        "You are a machine translation system that translates a term from any language to {target_language}.\n ";

    /// Extra directive for chat-completion style services.
    pub const CONTEXT_DIRECTIVE: &'static str = "To determine the correct context, use the provided additional details. \
Return only the translated term and nothing else.";

    /// Input wrapper for services that get a short system prompt.
    pub const WRAPPED_INPUT: &'static str = "Here is the term to translate and additional information for better precision \
and to determine the correct context: \n{body}\nReturn only the translated term in {target_language} and nothing else.";

    /// Batch strategy: one section per source language.
    pub const BATCH_SECTION: &'static str = "Label (in {language_name}) of term to translate:\n{labels}{context}";
    pub const BATCH_CONTEXT: &'static str = "Context: {context}\n";

    /// Hierarchy strategy, combined mode.
    pub const HIERARCHY_COMBINED_HEADER: &'static str = "Give me a single translation to {target_language}.\n\
Here are the hierarchy chains for the term in different languages.\n\n";
    pub const HIERARCHY_COMBINED_SECTION: &'static str = "Hierarchy (from top to bottom) for {language_name} ({language}):";
    pub const HIERARCHY_COMBINED_FOOTER: &'static str = "\nReturn only the translated term.";

    /// Hierarchy strategy, one prompt per language.
    pub const HIERARCHY_LANGUAGE_HEADER: &'static str =
        "Give me a single translation of the {language_name} term {label} to the {target_language} language.";
    pub const HIERARCHY_LANGUAGE_SECTION: &'static str = "Hierarchy (from top to bottom with the last entry being the term \
that you should translate) for {language_name}:";
    pub const HIERARCHY_LANGUAGE_FOOTER: &'static str = "\nReturn only the translated term in this format: translated term";

    /// Arbitration reviewer instructions.
    pub const REVIEWER_INSTRUCTIONS: &'static str = "You are a professional translation review system that assesses the quality \
of translations of a single term given in different source languages. The translations are already given by a translation \
system. Give me the best fitting translation out of the given list and a confidence how sure you are that the translation \
is accurate on a scale from 0 to 1. If no possible translation seems to be fitting, return None as best fitting translation \
and a confidence of 0.
Criteria for high accuracy are:
- The best fitting translation is already found in the already given possible translations.
- In the current context, there is no possible translation that has a different meaning.

Only give me the best fitting translation and the confidence in this format:
best fitting translation; confidence
Return only the best fitting translation and confidence.
";

    /// Arbitration reviewer input. `{context_section}` is either the term
    /// descriptions or the additional context block.
    pub const REVIEWER_INPUT: &'static str = "Choose the best fitting translation to {target_language}. \
The source term given in different languages is: \n{labels}\n\n\
The possible translations to {target_language} coming from translation systems are: \n{candidates}\n\n\
{context_section}\
Return the best fitting translation and the confidence in this format:\n<best fitting translation>; <confidence>";

    /// Create a new prompt template.
    pub fn new(template: &str) -> Self {
        Self {
            template: template.to_string(),
        }
    }

    /// Replace every `{name}` with its value. Unknown placeholders stay as they are.
    ///
    /// Substitution is a single pass, so braces inside inserted values are kept verbatim.
    pub fn render(&self, variables: &[(&str, &str)]) -> String {
        PLACEHOLDER_REGEX
            .replace_all(&self.template, |caps: &Captures| {
                variables
                    .iter()
                    .find(|(name, _)| *name == &caps[1])
                    .map(|(_, value)| value.to_string())
                    .unwrap_or_else(|| caps[0].to_string())
            })
            .into_owned()
    }

    /// Shorthand for `PromptTemplate::new(template).render(variables)`.
    pub fn fill(template: &str, variables: &[(&str, &str)]) -> String {
        Self::new(template).render(variables)
    }
}
