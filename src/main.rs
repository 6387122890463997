// Module-specific lints configuration
#![allow(clippy::uninlined_format_args)]

use anyhow::{Context, Result};
use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};
use log::{Level, LevelFilter, Log, Metadata, Record, SetLoggerError, warn};
use parking_lot::Mutex;
use std::fs::File;
use std::io::{BufReader, Write};
use std::path::{Path, PathBuf};

use skos_translator::app_config::{self, Config, PrimaryService, SecondaryService, StrategyKind};
use skos_translator::app_controller::Controller;

/// CLI Wrapper for LogLevel to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliLogLevel {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<CliLogLevel> for app_config::LogLevel {
    fn from(cli_level: CliLogLevel) -> Self {
        match cli_level {
            CliLogLevel::Error => app_config::LogLevel::Error,
            CliLogLevel::Warn => app_config::LogLevel::Warn,
            CliLogLevel::Info => app_config::LogLevel::Info,
            CliLogLevel::Debug => app_config::LogLevel::Debug,
            CliLogLevel::Trace => app_config::LogLevel::Trace,
        }
    }
}

/// CLI Wrapper for StrategyKind to implement ValueEnum
#[derive(Debug, Clone, ValueEnum)]
enum CliStrategy {
    Individual,
    Batch,
    Hierarchy,
}

impl From<CliStrategy> for StrategyKind {
    fn from(cli_strategy: CliStrategy) -> Self {
        match cli_strategy {
            CliStrategy::Individual => StrategyKind::Individual,
            CliStrategy::Batch => StrategyKind::Batch,
            CliStrategy::Hierarchy => StrategyKind::Hierarchy,
        }
    }
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate shell completions for skos-translator
    Completions {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// SKOS vocabulary label translator
///
/// Adds missing labels in a target language to every concept of a SKOS
/// vocabulary, combining machine translation services with a language model.
#[derive(Parser, Debug)]
#[command(name = "skos-translator")]
#[command(version)]
#[command(about = "Translate the labels of SKOS vocabularies")]
#[command(long_about = "skos-translator asks several machine translation services for each missing label,
keeps the answer they agree on, and lets a language model settle the rest.

EXAMPLES:
    skos-translator -i thesaurus.ttl -l en                         # Translate into English with conf.json
    skos-translator -i thesaurus.ttl -l fr -p google -p microsoft  # Use two primary services
    skos-translator -i thesaurus.ttl -l en -s openai --model gpt-4o-mini
    skos-translator -i thesaurus.ttl -l en --strategy hierarchy    # Give the model the broader concepts
    skos-translator completions bash > skos-translator.bash        # Generate bash completions

CONFIGURATION:
    Configuration is stored in conf.json by default. You can specify a different
    config file with --config. If the config file doesn't exist, a default one
    will be created automatically. Command line options override the file.

SERVICES:
    primary   - mymemory, google, microsoft, libretranslate, dummy, dummynone
    secondary - ollama, openai, anthropic, mistral, deepseek, openwebui, dummy")]
struct CommandLineOptions {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Input vocabulary file (Turtle, N-Triples, N-Quads, TriG or RDF/XML)
    #[arg(short, long, value_name = "FILE")]
    input: Option<PathBuf>,

    /// Target language tag (e.g., 'en', 'de', 'pt-BR')
    #[arg(short = 'l', long)]
    target_language: Option<String>,

    /// Extra context handed to the language model
    #[arg(long)]
    context: Option<String>,

    /// Consensus needed to accept the primary translations directly
    #[arg(long)]
    threshold: Option<f64>,

    /// Primary translation service, repeat for several
    #[arg(short, long = "primary", value_name = "SERVICE")]
    primary: Vec<PrimaryService>,

    /// Secondary (language model) service
    #[arg(short, long, value_name = "SERVICE")]
    secondary: Option<SecondaryService>,

    /// Model name of the secondary service
    #[arg(long)]
    model: Option<String>,

    /// Prompting strategy of the secondary service
    #[arg(long, value_enum)]
    strategy: Option<CliStrategy>,

    /// Put all languages in a single hierarchy prompt
    #[arg(long)]
    combined_hierarchy_prompt: bool,

    /// Primary translations needed before the consensus is trusted
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=8))]
    min_primary_translations: Option<u8>,

    /// Retries of the arbitration prompt on unusable answers
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=10))]
    max_retries: Option<u8>,

    /// Sampling temperature of the secondary service
    #[arg(long)]
    temperature: Option<f32>,

    /// Output file (defaults to <input>_updated.<ext>)
    #[arg(short, long, value_name = "FILE")]
    output: Option<PathBuf>,

    /// Configuration file path
    #[arg(long = "config", default_value = "conf.json")]
    config_path: String,

    /// Set logging level
    #[arg(long, value_enum)]
    log_level: Option<CliLogLevel>,

    /// Also write log records to this file
    #[arg(long, value_name = "FILE")]
    log_file: Option<PathBuf>,
}

// @struct: Custom logger implementation
struct CustomLogger {
    level: LevelFilter,
    file: Option<Mutex<File>>,
}

impl CustomLogger {
    // @initializes: Global logger
    fn init(level: LevelFilter, file: Option<File>) -> Result<(), SetLoggerError> {
        let logger = Box::new(CustomLogger {
            level,
            file: file.map(Mutex::new),
        });
        log::set_boxed_logger(logger)?;
        log::set_max_level(level);
        Ok(())
    }

    // @returns: Emoji for log level
    fn get_emoji_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "❌ ",
            Level::Warn => "🚧 ",
            Level::Info => " ",
            Level::Debug => "🔍 ",
            Level::Trace => "📋 ",
        }
    }

    // @returns: ANSI color of the level
    fn get_color_for_level(level: Level) -> &'static str {
        match level {
            Level::Error => "\x1B[1;31m",
            Level::Warn => "\x1B[1;33m",
            Level::Info => "\x1B[1;32m",
            Level::Debug => "\x1B[1;36m",
            Level::Trace => "\x1B[1;35m",
        }
    }
}

impl Log for CustomLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= self.level && metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let now = chrono::Local::now().format("%H:%M:%S.%3f");
        let emoji = Self::get_emoji_for_level(record.level());

        let _ = writeln!(
            std::io::stderr(),
            "{}{} {} {}\x1B[0m",
            Self::get_color_for_level(record.level()),
            now,
            emoji,
            record.args()
        );

        if let Some(file) = &self.file {
            let _ = writeln!(file.lock(), "{} {:<5} {}", now, record.level(), record.args());
        }
    }

    fn flush(&self) {
        let _ = std::io::stderr().flush();
        if let Some(file) = &self.file {
            let _ = file.lock().flush();
        }
    }
}

fn level_filter(level: &app_config::LogLevel) -> LevelFilter {
    match level {
        app_config::LogLevel::Error => LevelFilter::Error,
        app_config::LogLevel::Warn => LevelFilter::Warn,
        app_config::LogLevel::Info => LevelFilter::Info,
        app_config::LogLevel::Debug => LevelFilter::Debug,
        app_config::LogLevel::Trace => LevelFilter::Trace,
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = CommandLineOptions::parse();

    if let Some(Commands::Completions { shell }) = cli.command {
        let mut cmd = CommandLineOptions::command();
        generate(shell, &mut cmd, "skos-translator", &mut std::io::stdout());
        return Ok(());
    }

    // The logger accepts everything; the effective level is the global max level
    let log_file = match &cli.log_file {
        Some(path) => Some(File::create(path).with_context(|| format!("Failed to create log file: {:?}", path))?),
        None => None,
    };
    CustomLogger::init(LevelFilter::Trace, log_file)?;
    log::set_max_level(LevelFilter::Info);
    if let Some(cmd_log_level) = &cli.log_level {
        log::set_max_level(level_filter(&cmd_log_level.clone().into()));
    }

    let mut config = load_or_create_config(&cli.config_path, cli.log_level.clone())?;
    apply_overrides(&mut config, &cli);
    config.validate().context("Configuration validation failed")?;

    if cli.log_level.is_none() {
        log::set_max_level(level_filter(&config.log_level));
    }

    let input = cli
        .input
        .clone()
        .context("An input file is required (-i <FILE>)")?;
    let controller = Controller::with_config(config)?;
    controller.run(input, cli.output.clone()).await?;
    Ok(())
}

/// Read the configuration file, writing a default one when it is missing
fn load_or_create_config(config_path: &str, log_level: Option<CliLogLevel>) -> Result<Config> {
    if Path::new(config_path).exists() {
        let file = File::open(config_path).context(format!("Failed to open config file: {}", config_path))?;
        let reader = BufReader::new(file);
        return serde_json::from_reader(reader).context(format!("Failed to parse config file: {}", config_path));
    }

    warn!("Config file not found at '{}', creating default config.", config_path);
    let mut config = Config::default();
    if let Some(log_level) = log_level {
        config.log_level = log_level.into();
    }

    let config_json = serde_json::to_string_pretty(&config).context("Failed to serialize default config to JSON")?;
    std::fs::write(config_path, config_json)
        .context(format!("Failed to write default config to file: {}", config_path))?;
    Ok(config)
}

/// Command line options take precedence over the configuration file
fn apply_overrides(config: &mut Config, cli: &CommandLineOptions) {
    if let Some(target_language) = &cli.target_language {
        config.target_language = target_language.clone();
    }
    if let Some(context) = &cli.context {
        config.user_context = Some(context.clone());
    }
    if let Some(threshold) = cli.threshold {
        config.pipeline.low_confidence_threshold = threshold;
    }
    if !cli.primary.is_empty() {
        config.primary_services = cli.primary.clone();
    }
    if let Some(secondary) = cli.secondary {
        config.secondary_service = secondary;
    }
    // After the secondary service so the model lands on the selected one
    if let Some(model) = &cli.model {
        config.set_secondary_model(model);
    }
    if let Some(strategy) = &cli.strategy {
        config.pipeline.strategy = strategy.clone().into();
    }
    if cli.combined_hierarchy_prompt {
        config.pipeline.separate_language_prompts = false;
    }
    if let Some(min) = cli.min_primary_translations {
        config.pipeline.min_primary_translations = min as usize;
    }
    if let Some(retries) = cli.max_retries {
        config.pipeline.max_retries = retries as u32;
    }
    if let Some(temperature) = cli.temperature {
        config.temperature = temperature;
    }
    if let Some(log_level) = &cli.log_level {
        config.log_level = log_level.clone().into();
    }
}
