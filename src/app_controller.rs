use anyhow::{Context, Result, anyhow};
use indicatif::{ProgressBar, ProgressStyle};
use log::{debug, info};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};

use crate::app_config::Config;
use crate::file_utils::{FileManager, OutputNaming};
use crate::providers::{PrimaryTranslator, build_primary, build_secondary};
use crate::translation::pipeline::PipelineProgress;
use crate::translation::{LlmArbiter, PipelineConfig, PipelineStats, TranslationPipeline, build_strategy};
use crate::vocabulary::{ConceptGraph, SkosGraph};

// @module: Application controller for vocabulary translation

/// Main application controller for vocabulary translation
pub struct Controller {
    // @field: App configuration
    config: Config,
}

impl Controller {
    // @method: Create a new controller with the given configuration
    pub fn with_config(config: Config) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Build the services selected in the configuration and wire them into a pipeline
    pub fn build_pipeline(&self) -> Result<TranslationPipeline> {
        let primary = self
            .config
            .primary_services
            .iter()
            .map(|service| {
                build_primary(*service, &self.config.primary_provider_config(*service))
                    .with_context(|| format!("Failed to set up {}", service.display_name()))
            })
            .collect::<Result<Vec<Box<dyn PrimaryTranslator>>>>()?;

        let secondary_config = self.config.secondary_provider_config();
        let secondary = build_secondary(self.config.secondary_service, &secondary_config, self.config.temperature)
            .with_context(|| format!("Failed to set up {}", self.config.secondary_service.display_name()))?;

        let settings = &self.config.pipeline;
        let pipeline_config = PipelineConfig::new(&self.config.target_language)
            .with_user_context(self.config.user_context.clone())
            .with_threshold(settings.low_confidence_threshold)
            .with_min_primary_translations(settings.min_primary_translations);

        info!(
            "Primary: {} | Secondary: {} ({}) | Strategy: {}",
            self.config
                .primary_services
                .iter()
                .map(|s| s.display_name())
                .collect::<Vec<_>>()
                .join(", "),
            self.config.secondary_service.display_name(),
            secondary_config.model,
            settings.strategy.display_name()
        );

        Ok(TranslationPipeline::new(
            pipeline_config,
            primary,
            secondary,
            build_strategy(settings.strategy, settings.separate_language_prompts),
            LlmArbiter::new(settings.max_retries),
        ))
    }

    /// Translate a vocabulary file and write the enriched graph.
    ///
    /// Returns the path of the written file.
    pub async fn run(&self, input_file: PathBuf, output_file: Option<PathBuf>) -> Result<PathBuf> {
        let start_time = Instant::now();

        if !FileManager::file_exists(&input_file) {
            return Err(anyhow!("Input file does not exist: {:?}", input_file));
        }

        let mut graph = SkosGraph::load(&input_file)
            .with_context(|| format!("Failed to load vocabulary {:?}", input_file))?;
        debug!("Loaded {} statements from {:?}", graph.len(), input_file);

        let pipeline = self.build_pipeline()?;
        let stats = self.translate_with_progress(&pipeline, &mut graph).await?;

        let output_path = output_file.unwrap_or_else(|| self.default_output_path(&input_file));
        graph
            .save(&output_path)
            .with_context(|| format!("Failed to write {:?}", output_path))?;

        info!("{}", stats.summary());
        info!(
            "Success: {} ({})",
            output_path.display(),
            Self::format_duration(start_time.elapsed())
        );
        Ok(output_path)
    }

    async fn translate_with_progress(
        &self,
        pipeline: &TranslationPipeline,
        graph: &mut SkosGraph,
    ) -> Result<PipelineStats> {
        let progress_bar = ProgressBar::new(graph.concepts().len() as u64);
        let template_result = ProgressStyle::default_bar()
            .template("{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} concepts ({percent}%) {msg} {eta}")
            .or_else(|_| ProgressStyle::default_bar().template("{spinner} [{elapsed_precise}] [{bar:40}] {pos}/{len} ({percent}%) {msg}"))
            .unwrap_or_else(|_| ProgressStyle::default_bar());
        progress_bar.set_style(template_result.progress_chars("█▓▒░"));
        progress_bar.set_message("Translating");

        let pb = progress_bar.clone();
        let stats = pipeline
            .process_graph(
                graph,
                Some(Box::new(move |progress: PipelineProgress| {
                    pb.set_position(progress.concepts_processed as u64);
                    pb.set_message(progress.current.to_string());
                })),
            )
            .await;

        progress_bar.finish_and_clear();
        Ok(stats?)
    }

    fn default_output_path(&self, input_file: &Path) -> PathBuf {
        if !self.config.detailed_output_name {
            return FileManager::generate_output_path(input_file);
        }

        let primary_services: Vec<String> = self
            .config
            .primary_services
            .iter()
            .map(|s| s.to_lowercase_string())
            .collect();
        let secondary_service = self.config.secondary_service.to_lowercase_string();
        let strategy = self.config.pipeline.strategy.to_lowercase_string();
        let naming = OutputNaming {
            target_language: &self.config.target_language,
            threshold: self.config.pipeline.low_confidence_threshold,
            primary_services: &primary_services,
            secondary_service: &secondary_service,
            strategy: &strategy,
            temperature: self.config.temperature,
        };
        FileManager::generate_detailed_output_path(input_file, &naming)
    }

    // Format duration in a human-readable format (HH:MM:SS)
    fn format_duration(duration: Duration) -> String {
        let total_seconds = duration.as_secs();
        let hours = total_seconds / 3600;
        let minutes = (total_seconds % 3600) / 60;
        let seconds = total_seconds % 60;

        if hours > 0 {
            format!("{}h {}m {}s", hours, minutes, seconds)
        } else if minutes > 0 {
            format!("{}m {}s", minutes, seconds)
        } else {
            format!("{}.{:03}s", seconds, duration.subsec_millis())
        }
    }
}
