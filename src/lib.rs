/*!
 * # skos-translator
 *
 * A Rust library that adds missing labels in a target language to SKOS
 * vocabularies.
 *
 * ## Features
 *
 * - Read and write vocabularies as Turtle, N-Triples, N-Quads, TriG or RDF/XML
 * - Ask several machine translation services for each label:
 *   - MyMemory
 *   - Google Cloud Translation
 *   - Microsoft Translator
 *   - LibreTranslate
 * - Accept the translation the services agree on
 * - Let a language model settle disagreements:
 *   - Ollama (local LLM)
 *   - OpenAI API and compatible services (Mistral, DeepSeek, Open WebUI)
 *   - Anthropic API
 * - Individual, batch and hierarchy prompting strategies
 * - BCP 47 / ISO 639 language tag support
 *
 * ## Architecture
 *
 * The library is organized in these main modules:
 * - `app_config`: Configuration management
 * - `vocabulary`: Concepts, labels and the RDF-backed concept graph
 * - `translation`: Candidate aggregation, consensus, prompting and arbitration:
 *   - `translation::strategies`: Secondary translation strategies
 *   - `translation::arbitration`: Language model review of candidates
 *   - `translation::pipeline`: Per-concept decision flow
 * - `file_utils`: File system operations
 * - `app_controller`: Main application controller
 * - `language_utils`: Language tag utilities
 * - `providers`: Clients for machine translation and language model services
 * - `errors`: Custom error types for the application
 */

// Global lints configuration
// These lints will be allowed but not auto-fixed
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::redundant_closure_for_method_calls)]

// Public modules
pub mod app_config;
pub mod app_controller;
pub mod errors;
pub mod file_utils;
pub mod language_utils;
pub mod providers;
pub mod translation;
pub mod vocabulary;

// Re-export main types for easier usage
pub use app_config::Config;
pub use app_controller::Controller;
pub use errors::{GraphError, ProviderError, TranslationError};
pub use language_utils::{get_language_name, language_codes_match, normalize_to_part2t};
pub use translation::{PipelineConfig, PipelineStats, TranslationPipeline};
pub use vocabulary::{Concept, ConceptGraph, SkosGraph};
