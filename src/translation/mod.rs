/*!
 * Translation arbitration for vocabulary labels.
 *
 * This module is organized into several submodules:
 * - `candidates`: candidate translations grouped by source language
 * - `aggregator`: collection of primary translator output
 * - `consensus`: case-insensitive majority vote
 * - `context`: choice of the description handed to the language model
 * - `prompts`: prompt components, formatters and fixed texts
 * - `strategies`: the secondary (language model) translation strategies
 * - `arbitration`: language model review of all candidates
 * - `pipeline`: per-concept control flow
 */

pub mod aggregator;
pub mod arbitration;
pub mod candidates;
pub mod consensus;
pub mod context;
pub mod pipeline;
pub mod prompts;
pub mod strategies;

pub use aggregator::aggregate;
pub use arbitration::LlmArbiter;
pub use candidates::CandidateSet;
pub use consensus::FrequencyConsensus;
pub use context::TermContext;
pub use pipeline::{DecisionStage, PipelineConfig, PipelineStats, PropertyOutcome, TranslationPipeline};
pub use strategies::{SecondaryOutput, SecondaryStrategy, build_strategy};

/// Result of a scorer: a translation and how sure the scorer is about it
#[derive(Debug, Clone, PartialEq, Default)]
pub struct TranslationDecision {
    pub translation: Option<String>,
    pub confidence: Option<f64>,
}

impl TranslationDecision {
    pub fn new(translation: impl Into<String>, confidence: f64) -> Self {
        Self {
            translation: Some(translation.into()),
            confidence: Some(confidence),
        }
    }

    /// No translation, confidence 0.0
    pub fn empty() -> Self {
        Self {
            translation: None,
            confidence: Some(0.0),
        }
    }

    /// No translation and no confidence
    pub fn none() -> Self {
        Self::default()
    }

    /// A non-blank translation with a non-zero confidence
    pub fn is_usable(&self) -> bool {
        let has_text = self.translation.as_deref().is_some_and(|t| !t.trim().is_empty());
        let has_confidence = self.confidence.is_some_and(|c| c > 0.0);
        has_text && has_confidence
    }
}
