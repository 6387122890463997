/*!
 * Language model arbitration between candidate translations.
 *
 * The reviewer sees the source labels, every distinct candidate and the best
 * available descriptions, and answers `<translation>; <confidence>`. An answer
 * is only accepted when it names one of the candidates and the confidence
 * lies in [0, 1].
 */

use log::{debug, info, warn};
use once_cell::sync::Lazy;
use regex::Regex;

use super::TranslationDecision;
use super::candidates::CandidateSet;
use super::context::TermContext;
use super::prompts::{Prompt, PromptTemplate};
use super::strategies::SecondaryOutput;
use crate::app_config::MAX_RETRIES_LIMIT;
use crate::errors::ProviderError;
use crate::providers::SecondaryTranslator;
use crate::vocabulary::Label;

/// First `text; number` pair of an answer
static ANSWER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?m)^\s*(.*?)\s*;\s*([0-9]+(?:\.[0-9]+)?)").unwrap());

const QUOTES: &[char] = &['\'', '"'];

/// Scorer that lets the secondary service pick among the candidates
#[derive(Debug, Clone, Copy)]
pub struct LlmArbiter {
    max_retries: u32,
}

impl Default for LlmArbiter {
    fn default() -> Self {
        Self::new(1)
    }
}

impl LlmArbiter {
    /// `max_retries` is capped at `MAX_RETRIES_LIMIT`
    pub fn new(max_retries: u32) -> Self {
        if max_retries > MAX_RETRIES_LIMIT {
            warn!("max_retries {} capped at {}", max_retries, MAX_RETRIES_LIMIT);
        }
        Self {
            max_retries: max_retries.min(MAX_RETRIES_LIMIT),
        }
    }

    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    /// Arbitrate with the configured number of retries
    pub async fn calculate(
        &self,
        translator: &dyn SecondaryTranslator,
        term: &TermContext<'_>,
        primary: &CandidateSet,
        secondary: &SecondaryOutput,
    ) -> Result<TranslationDecision, ProviderError> {
        self.calculate_with_retries(translator, term, primary, secondary, self.max_retries)
            .await
    }

    /// Arbitrate with an explicit number of retries.
    ///
    /// Gives `TranslationDecision::none()` when no attempt produced a valid
    /// answer. Only a rate limit is returned as an error.
    pub async fn calculate_with_retries(
        &self,
        translator: &dyn SecondaryTranslator,
        term: &TermContext<'_>,
        primary: &CandidateSet,
        secondary: &SecondaryOutput,
        retries: u32,
    ) -> Result<TranslationDecision, ProviderError> {
        let candidates = merge_candidates(primary, &secondary.candidates());
        let prompt = build_review_prompt(term, &candidates);
        let attempts = retries.min(MAX_RETRIES_LIMIT) + 1;
        let mut last_response: Option<String> = None;
        let mut attempted = false;

        for attempt in 1..=attempts {
            debug!("Arbitration attempt {}/{}", attempt, attempts);
            attempted = true;

            let response = match translator.respond(&prompt).await {
                Ok(Some(response)) => response,
                Ok(None) => {
                    warn!("Reviewer returned no answer; skipping this attempt");
                    continue;
                }
                Err(e) if e.is_fatal() => return Err(e),
                Err(e) => {
                    warn!("Reviewer request failed: {}", e);
                    continue;
                }
            };
            let response = response.trim().to_string();

            match parse_answer(&response) {
                Some((translation, confidence)) => {
                    if !candidates.is_empty() && !contains_ignore_case(&candidates, &translation) {
                        info!("Reviewer chose '{}' which is not a candidate; retrying", translation);
                    } else if !(0.0..=1.0).contains(&confidence) {
                        info!("Reviewer confidence {} is out of range; retrying", confidence);
                    } else {
                        return Ok(TranslationDecision::new(translation, confidence));
                    }
                }
                None => info!("Reviewer answer does not match '<translation>; <confidence>'"),
            }
            last_response = Some(response);
        }

        if !attempted {
            info!("Arbitration failed: no attempts made");
        } else {
            info!("Arbitration failed after {} attempt(s)", attempts);
            debug!("Last reviewer answer: {:?}", last_response);
        }
        Ok(TranslationDecision::none())
    }
}

/// Distinct candidates (case-sensitive), primary first, in encounter order
pub fn merge_candidates(primary: &CandidateSet, secondary: &CandidateSet) -> Vec<String> {
    let mut merged: Vec<String> = Vec::new();
    for candidate in primary.values().chain(secondary.values()) {
        if !merged.iter().any(|c| c == candidate) {
            merged.push(candidate.to_string());
        }
    }
    merged
}

/// Extract the translation and confidence from a reviewer answer
pub fn parse_answer(response: &str) -> Option<(String, f64)> {
    let captures = ANSWER_REGEX.captures(response)?;
    let translation = captures.get(1)?.as_str().trim().trim_matches(QUOTES).trim();
    let confidence = captures
        .get(2)?
        .as_str()
        .trim()
        .trim_matches(QUOTES)
        .parse::<f64>()
        .ok()?;
    Some((translation.to_string(), confidence))
}

fn contains_ignore_case(candidates: &[String], text: &str) -> bool {
    let needle = text.to_lowercase();
    candidates.iter().any(|c| c.trim().to_lowercase() == needle)
}

/// Best description for each label language, each text listed once
fn term_descriptions(term: &TermContext<'_>) -> Vec<String> {
    let mut seen: Vec<String> = Vec::new();
    let mut lines: Vec<String> = Vec::new();
    for language in term.labels.languages() {
        if let Some(description) = term.description_for(language) {
            if !seen.contains(&description) {
                lines.push(Label::new(description.clone(), language).to_string());
                seen.push(description);
            }
        }
    }
    lines
}

fn build_review_prompt(term: &TermContext<'_>, candidates: &[String]) -> Prompt {
    let labels = term
        .labels
        .labels()
        .iter()
        .map(Label::to_string)
        .collect::<Vec<_>>()
        .join("\n");

    let descriptions = term_descriptions(term);
    let context_section = if !descriptions.is_empty() {
        format!("Term descriptions are: \n{}\n\n", descriptions.join("\n"))
    } else if let Some(context) = term.fallback_context() {
        format!("Additional context is: \n{}\n\n", context)
    } else {
        String::new()
    };

    let target_name = term.target_language_name();
    let candidate_lines = candidates.join("\n");
    let input = PromptTemplate::fill(
        PromptTemplate::REVIEWER_INPUT,
        &[
            ("target_language", target_name.as_str()),
            ("labels", labels.as_str()),
            ("candidates", candidate_lines.as_str()),
            ("context_section", context_section.as_str()),
        ],
    );
    Prompt::new(PromptTemplate::REVIEWER_INSTRUCTIONS, input)
}
