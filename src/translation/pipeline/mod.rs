/*!
 * Translation pipeline for vocabulary labels.
 *
 * For every concept and translatable property the pipeline:
 * 1. **Skips** properties that already have a value in the target language
 * 2. **Aggregates** primary translator candidates and accepts a clear consensus
 * 3. **Escalates** to the secondary strategy and reconciles its output with
 *    the primary candidates
 * 4. **Arbitrates** between all candidates with the secondary service, falling
 *    back to the consensus of the secondary output
 */

pub mod orchestrator;

pub use orchestrator::{
    DecisionStage, PipelineConfig, PipelineProgress, PipelineStats, PropertyOutcome, SkipReason,
    TranslationPipeline,
};
