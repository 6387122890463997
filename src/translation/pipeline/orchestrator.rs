/*!
 * Pipeline orchestrator deciding the translation of each concept property.
 *
 * Per (concept, property) the decision moves through:
 * `NeedsTranslation -> PrimaryAggregated -> {Accepted | NeedsSecondary}
 *  -> {SecondaryReconciled | NeedsArbitration} -> Accepted`
 *
 * Accepted translations are appended as new literals; existing literals are
 * never touched.
 */

use log::{debug, info};
use std::fmt;
use std::time::{Duration, Instant};

use crate::errors::{ProviderError, TranslationError};
use crate::providers::{PrimaryTranslator, SecondaryTranslator};
use crate::translation::aggregator::aggregate;
use crate::translation::arbitration::LlmArbiter;
use crate::translation::consensus::FrequencyConsensus;
use crate::translation::context::TermContext;
use crate::translation::strategies::{SecondaryOutput, SecondaryStrategy};
use crate::vocabulary::{Concept, ConceptGraph, PREF_LABEL, TermProperties};

/// Configuration for the translation pipeline.
#[derive(Debug, Clone)]
pub struct PipelineConfig {
    /// Target language tag
    pub target_language: String,

    /// Free-text context supplied by the user
    pub user_context: Option<String>,

    /// Minimum consensus confidence for accepting primary candidates
    pub threshold: f64,

    /// Primary candidates required before the consensus is trusted
    pub min_primary_translations: usize,

    /// Properties to translate, by SKOS local name
    pub properties: Vec<String>,
}

impl Default for PipelineConfig {
    fn default() -> Self {
        Self {
            target_language: "en".to_string(),
            user_context: None,
            threshold: 0.66,
            min_primary_translations: 5,
            properties: vec![PREF_LABEL.to_string()],
        }
    }
}

impl PipelineConfig {
    /// Create a new pipeline configuration.
    pub fn new(target_language: &str) -> Self {
        Self {
            target_language: target_language.to_string(),
            ..Default::default()
        }
    }

    pub fn with_user_context(mut self, context: Option<String>) -> Self {
        self.user_context = context.filter(|c| !c.trim().is_empty());
        self
    }

    pub fn with_threshold(mut self, threshold: f64) -> Self {
        self.threshold = threshold;
        self
    }

    pub fn with_min_primary_translations(mut self, min: usize) -> Self {
        self.min_primary_translations = min;
        self
    }

    pub fn with_properties(mut self, properties: &[&str]) -> Self {
        self.properties = properties.iter().map(|p| p.to_string()).collect();
        self
    }
}

/// Why a property was left alone
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The concept has no value for the property
    MissingProperty,
    /// A value in the target language exists already
    AlreadyTranslated,
}

/// Which step produced an accepted translation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DecisionStage {
    PrimaryConsensus,
    SecondaryReconciled,
    Arbitration,
    SecondaryConsensus,
}

impl fmt::Display for DecisionStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::PrimaryConsensus => "primary consensus",
            Self::SecondaryReconciled => "secondary reconciled",
            Self::Arbitration => "arbitration",
            Self::SecondaryConsensus => "secondary consensus",
        };
        f.write_str(name)
    }
}

/// Result for one (concept, property) pair
#[derive(Debug, Clone, PartialEq)]
pub enum PropertyOutcome {
    Skipped(SkipReason),
    Accepted {
        translation: String,
        confidence: f64,
        stage: DecisionStage,
    },
    /// Every step failed; nothing is written
    Unresolved,
}

/// Progress information during pipeline execution.
#[derive(Debug, Clone)]
pub struct PipelineProgress {
    /// Concepts finished so far
    pub concepts_processed: usize,

    /// Concepts in the graph
    pub total_concepts: usize,

    /// Concept currently being processed
    pub current: Concept,
}

/// Counters of a pipeline run
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PipelineStats {
    pub concepts: usize,
    pub skipped: usize,
    pub primary_consensus: usize,
    pub secondary_reconciled: usize,
    pub arbitration: usize,
    pub secondary_consensus: usize,
    pub unresolved: usize,
    pub duration: Duration,
}

impl PipelineStats {
    pub fn new() -> Self {
        Self::default()
    }

    /// Count one property outcome
    pub fn record(&mut self, outcome: &PropertyOutcome) {
        match outcome {
            PropertyOutcome::Skipped(_) => self.skipped += 1,
            PropertyOutcome::Unresolved => self.unresolved += 1,
            PropertyOutcome::Accepted { stage, .. } => match stage {
                DecisionStage::PrimaryConsensus => self.primary_consensus += 1,
                DecisionStage::SecondaryReconciled => self.secondary_reconciled += 1,
                DecisionStage::Arbitration => self.arbitration += 1,
                DecisionStage::SecondaryConsensus => self.secondary_consensus += 1,
            },
        }
    }

    /// Literals added during the run
    pub fn accepted(&self) -> usize {
        self.primary_consensus + self.secondary_reconciled + self.arbitration + self.secondary_consensus
    }

    /// One-line summary of the run
    pub fn summary(&self) -> String {
        let mut parts = Vec::new();

        parts.push(format!("Duration: {:.2}s", self.duration.as_secs_f32()));
        parts.push(format!("Concepts: {}", self.concepts));
        parts.push(format!(
            "Added: {} (primary {}, reconciled {}, arbitration {}, secondary {})",
            self.accepted(),
            self.primary_consensus,
            self.secondary_reconciled,
            self.arbitration,
            self.secondary_consensus
        ));
        parts.push(format!("Skipped: {}", self.skipped));
        if self.unresolved > 0 {
            parts.push(format!("Unresolved: {}", self.unresolved));
        }

        parts.join(" | ")
    }
}

/// The translation pipeline orchestrator.
pub struct TranslationPipeline {
    config: PipelineConfig,
    primary: Vec<Box<dyn PrimaryTranslator>>,
    secondary: Box<dyn SecondaryTranslator>,
    strategy: Box<dyn SecondaryStrategy>,
    arbiter: LlmArbiter,
    consensus: FrequencyConsensus,
}

impl TranslationPipeline {
    /// Create a new pipeline from its collaborators.
    pub fn new(
        config: PipelineConfig,
        primary: Vec<Box<dyn PrimaryTranslator>>,
        secondary: Box<dyn SecondaryTranslator>,
        strategy: Box<dyn SecondaryStrategy>,
        arbiter: LlmArbiter,
    ) -> Self {
        Self {
            config,
            primary,
            secondary,
            strategy,
            arbiter,
            consensus: FrequencyConsensus::new(),
        }
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Translate every concept of the graph in document order.
    ///
    /// Stops at the first fatal error (rate limit or graph write failure).
    pub async fn process_graph(
        &self,
        graph: &mut dyn ConceptGraph,
        progress_callback: Option<Box<dyn Fn(PipelineProgress) + Send>>,
    ) -> Result<PipelineStats, TranslationError> {
        let start_time = Instant::now();
        let concepts = graph.concepts();
        let vocabulary_context = graph.vocabulary_context();
        let mut stats = PipelineStats::new();

        info!("Total concepts: {}", concepts.len());

        for (index, concept) in concepts.iter().enumerate() {
            for outcome in self
                .translate_concept(graph, concept, vocabulary_context.as_deref())
                .await?
            {
                stats.record(&outcome);
            }
            stats.concepts += 1;

            if let Some(ref callback) = progress_callback {
                callback(PipelineProgress {
                    concepts_processed: index + 1,
                    total_concepts: concepts.len(),
                    current: concept.clone(),
                });
            }
        }

        stats.duration = start_time.elapsed();
        Ok(stats)
    }

    /// Translate the configured properties of one concept and write the results
    pub async fn translate_concept(
        &self,
        graph: &mut dyn ConceptGraph,
        concept: &Concept,
        vocabulary_context: Option<&str>,
    ) -> Result<Vec<PropertyOutcome>, TranslationError> {
        debug!("Processing concept: {}", concept);
        let properties = graph.term_properties(concept);
        let mut outcomes = Vec::with_capacity(self.config.properties.len());

        for property in &self.config.properties {
            let outcome = self
                .translate_property(&*graph, concept, &properties, property, vocabulary_context)
                .await?;

            match &outcome {
                PropertyOutcome::Accepted {
                    translation,
                    confidence,
                    stage,
                } => {
                    graph.add_literal(concept, property, translation, &self.config.target_language)?;
                    info!(
                        "{} {}: '{}' ({}) with confidence {:.2} via {}",
                        concept, property, translation, self.config.target_language, confidence, stage
                    );
                }
                PropertyOutcome::Unresolved => {
                    info!("{} {}: no translation found", concept, property);
                }
                PropertyOutcome::Skipped(reason) => {
                    debug!("{} {}: skipped ({:?})", concept, property, reason);
                }
            }
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Decide the translation of one property without writing it
    pub async fn translate_property(
        &self,
        graph: &dyn ConceptGraph,
        concept: &Concept,
        properties: &TermProperties,
        property: &str,
        vocabulary_context: Option<&str>,
    ) -> Result<PropertyOutcome, ProviderError> {
        let target = self.config.target_language.as_str();

        let Some(labels) = properties.get(property) else {
            return Ok(PropertyOutcome::Skipped(SkipReason::MissingProperty));
        };
        if labels.contains_language(target) {
            return Ok(PropertyOutcome::Skipped(SkipReason::AlreadyTranslated));
        }

        let min = self.config.min_primary_translations;
        let primary = aggregate(labels, target, &self.primary, min).await?;

        if primary.total() >= min {
            let decision = self.consensus.calculate(&primary);
            if let (Some(translation), Some(confidence)) = (&decision.translation, decision.confidence) {
                if confidence >= self.config.threshold {
                    return Ok(PropertyOutcome::Accepted {
                        translation: translation.clone(),
                        confidence,
                        stage: DecisionStage::PrimaryConsensus,
                    });
                }
            }
            info!(
                "Low confidence ({:?}) for {} {}, using secondary translation",
                decision.confidence, concept, property
            );
        } else {
            info!(
                "Only {} of {} primary candidates for {} {}, using secondary translation",
                primary.total(),
                min,
                concept,
                property
            );
        }

        let term = TermContext {
            concept,
            graph,
            labels,
            properties,
            vocabulary_context,
            user_context: self.config.user_context.as_deref(),
            target_language: target,
        };
        let secondary = self.strategy.translate(&term, self.secondary.as_ref()).await?;

        let reconciled = match &secondary {
            SecondaryOutput::Single(translation) => translation.clone(),
            SecondaryOutput::PerLanguage(_) => self.consensus.calculate(&secondary.candidates()).translation,
        };
        if let Some(translation) = reconciled {
            if primary.contains_ignore_case(&translation) {
                return Ok(PropertyOutcome::Accepted {
                    translation,
                    confidence: 1.0,
                    stage: DecisionStage::SecondaryReconciled,
                });
            }
        }

        let arbitrated = self
            .arbiter
            .calculate_with_retries(self.secondary.as_ref(), &term, &primary, &secondary, 0)
            .await?;
        if arbitrated.is_usable() {
            if let (Some(translation), Some(confidence)) = (arbitrated.translation, arbitrated.confidence) {
                return Ok(PropertyOutcome::Accepted {
                    translation,
                    confidence,
                    stage: DecisionStage::Arbitration,
                });
            }
        }

        let fallback = self.consensus.calculate(&secondary.candidates());
        Ok(match (fallback.translation, fallback.confidence) {
            (Some(translation), Some(confidence)) => PropertyOutcome::Accepted {
                translation,
                confidence,
                stage: DecisionStage::SecondaryConsensus,
            },
            _ => PropertyOutcome::Unresolved,
        })
    }
}

impl fmt::Debug for TranslationPipeline {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TranslationPipeline")
            .field("config", &self.config)
            .field("primary", &self.primary)
            .field("secondary", &self.secondary)
            .field("strategy", &self.strategy)
            .finish()
    }
}
