use anyhow::{anyhow, Result};
use serde::{Deserialize, Serialize};
use std::default::Default;

/// Application configuration module
/// This module handles the application configuration including loading,
/// validating and saving configuration settings.
/// Represents the application configuration
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Config {
    /// Target language tag (BCP 47, e.g. "de", "pt-BR")
    pub target_language: String,

    /// Free text describing the vocabulary, used when nothing better is available
    #[serde(default)]
    pub user_context: Option<String>,

    /// Arbitration pipeline settings
    #[serde(default)]
    pub pipeline: PipelineSettings,

    /// Primary translation services, in priority order
    #[serde(default = "default_primary_services")]
    pub primary_services: Vec<PrimaryService>,

    /// Language model service used for secondary translation and arbitration
    #[serde(default)]
    pub secondary_service: SecondaryService,

    /// Connection settings per service
    #[serde(default = "default_available_providers")]
    pub available_providers: Vec<ProviderConfig>,

    /// Sampling temperature for the secondary service
    #[serde(default)]
    pub temperature: f32,

    /// Encode the run parameters into the output file name
    #[serde(default)]
    pub detailed_output_name: bool,

    /// Log level
    #[serde(default)]
    pub log_level: LogLevel,
}

/// Secondary strategy type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StrategyKind {
    /// One call per source label
    #[default]
    Individual,
    /// All labels in one call
    Batch,
    /// Labels embedded in their broader-concept chain
    Hierarchy,
}

impl StrategyKind {
    // @returns: Capitalized strategy name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Individual => "Individual",
            Self::Batch => "Batch",
            Self::Hierarchy => "Hierarchy",
        }
    }

    pub fn to_lowercase_string(&self) -> String {
        self.display_name().to_lowercase()
    }
}

impl std::fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for StrategyKind {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "individual" => Ok(Self::Individual),
            "batch" => Ok(Self::Batch),
            "hierarchy" => Ok(Self::Hierarchy),
            _ => Err(anyhow!("Invalid secondary strategy: {}", s)),
        }
    }
}

/// Primary (machine translation) service type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum PrimaryService {
    // @provider: MyMemory public API
    MyMemory,
    // @provider: Google Cloud Translation (v2, API key)
    Google,
    // @provider: Microsoft Translator (v3)
    Microsoft,
    // @provider: LibreTranslate / Argos server
    LibreTranslate,
    // @provider: Offline stand-in returning `<term>_<target>_dummy`
    Dummy,
    // @provider: Offline stand-in that never returns anything
    DummyNone,
}

impl PrimaryService {
    pub fn display_name(&self) -> &str {
        match self {
            Self::MyMemory => "MyMemory",
            Self::Google => "Google Cloud Translation",
            Self::Microsoft => "Microsoft Translator",
            Self::LibreTranslate => "LibreTranslate",
            Self::Dummy => "Dummy",
            Self::DummyNone => "Dummy (none)",
        }
    }

    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::MyMemory => "mymemory".to_string(),
            Self::Google => "google".to_string(),
            Self::Microsoft => "microsoft".to_string(),
            Self::LibreTranslate => "libretranslate".to_string(),
            Self::Dummy => "dummy".to_string(),
            Self::DummyNone => "dummynone".to_string(),
        }
    }

    /// Whether the service cannot work without an API key
    pub fn requires_api_key(&self) -> bool {
        matches!(self, Self::Google | Self::Microsoft)
    }

    /// Environment variable consulted when the config has no key
    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::Google => Some("GOOGLE_API_KEY"),
            Self::Microsoft => Some("MICROSOFT_API_KEY"),
            Self::LibreTranslate => Some("LIBRETRANSLATE_API_KEY"),
            Self::MyMemory => Some("MYMEMORY_EMAIL"),
            Self::Dummy | Self::DummyNone => None,
        }
    }
}

impl std::fmt::Display for PrimaryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

impl std::str::FromStr for PrimaryService {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "mymemory" => Ok(Self::MyMemory),
            "google" => Ok(Self::Google),
            "microsoft" => Ok(Self::Microsoft),
            "libretranslate" | "argos" => Ok(Self::LibreTranslate),
            "dummy" => Ok(Self::Dummy),
            "dummynone" => Ok(Self::DummyNone),
            _ => Err(anyhow!("Primary translation service {} is currently not implemented", s)),
        }
    }
}

/// Secondary (language model) service type
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SecondaryService {
    // @provider: Ollama
    #[default]
    Ollama,
    // @provider: OpenAI
    OpenAI,
    // @provider: Anthropic
    Anthropic,
    // @provider: Mistral (OpenAI-compatible)
    Mistral,
    // @provider: DeepSeek (OpenAI-compatible)
    DeepSeek,
    // @provider: Open WebUI (OpenAI-compatible)
    OpenWebUI,
    // @provider: Offline stand-in
    Dummy,
}

impl SecondaryService {
    // @returns: Capitalized provider name
    pub fn display_name(&self) -> &str {
        match self {
            Self::Ollama => "Ollama",
            Self::OpenAI => "OpenAI",
            Self::Anthropic => "Anthropic",
            Self::Mistral => "Mistral",
            Self::DeepSeek => "DeepSeek",
            Self::OpenWebUI => "Open WebUI",
            Self::Dummy => "Dummy",
        }
    }

    // @returns: Lowercase provider identifier
    pub fn to_lowercase_string(&self) -> String {
        match self {
            Self::Ollama => "ollama".to_string(),
            Self::OpenAI => "openai".to_string(),
            Self::Anthropic => "anthropic".to_string(),
            Self::Mistral => "mistral".to_string(),
            Self::DeepSeek => "deepseek".to_string(),
            Self::OpenWebUI => "openwebui".to_string(),
            Self::Dummy => "dummy".to_string(),
        }
    }

    pub fn requires_api_key(&self) -> bool {
        !matches!(self, Self::Ollama | Self::Dummy)
    }

    pub fn api_key_env(&self) -> Option<&'static str> {
        match self {
            Self::OpenAI => Some("OPENAI_API_KEY"),
            Self::Anthropic => Some("ANTHROPIC_API_KEY"),
            Self::Mistral => Some("MISTRAL_API_KEY"),
            Self::DeepSeek => Some("DEEPSEEK_API_KEY"),
            Self::OpenWebUI => Some("OPENWEBUI_API_KEY"),
            Self::Ollama | Self::Dummy => None,
        }
    }

    /// Inclusive temperature range accepted by the service
    pub fn temperature_range(&self) -> (f32, f32) {
        match self {
            Self::Anthropic => (0.0, 1.0),
            Self::Mistral => (0.0, 1.5),
            _ => (0.0, 2.0),
        }
    }
}

// Implement Display trait for SecondaryService
impl std::fmt::Display for SecondaryService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_lowercase_string())
    }
}

// Implement FromStr trait for SecondaryService
impl std::str::FromStr for SecondaryService {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_lowercase().as_str() {
            "ollama" => Ok(Self::Ollama),
            "openai" => Ok(Self::OpenAI),
            "anthropic" => Ok(Self::Anthropic),
            "mistral" => Ok(Self::Mistral),
            "deepseek" => Ok(Self::DeepSeek),
            "openwebui" => Ok(Self::OpenWebUI),
            "dummy" => Ok(Self::Dummy),
            _ => Err(anyhow!("Invalid provider type: {}", s)),
        }
    }
}

/// Provider configuration wrapper
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct ProviderConfig {
    // @field: Service identifier (matches the lowercase service name)
    #[serde(rename = "type")]
    pub provider_type: String,

    // @field: Model name (language model services only)
    #[serde(default = "String::new")]
    pub model: String,

    // @field: API key
    #[serde(default = "String::new")]
    pub api_key: String,

    // @field: Service URL
    #[serde(default = "String::new")]
    pub endpoint: String,

    // @field: Azure region (Microsoft Translator only)
    #[serde(default = "String::new")]
    pub region: String,

    // @field: Timeout seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl ProviderConfig {
    fn bare(provider_type: &str, model: &str, endpoint: &str) -> Self {
        Self {
            provider_type: provider_type.to_string(),
            model: model.to_string(),
            api_key: String::new(),
            endpoint: endpoint.to_string(),
            region: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }

    // @returns: Secondary provider config with defaults
    pub fn for_secondary(service: SecondaryService) -> Self {
        match service {
            SecondaryService::Ollama => Self::bare("ollama", "llama3.2:3b", "http://localhost:11434"),
            SecondaryService::OpenAI => Self::bare("openai", "gpt-4o-mini", "https://api.openai.com/v1"),
            SecondaryService::Anthropic => Self {
                timeout_secs: default_anthropic_timeout_secs(),
                ..Self::bare("anthropic", "claude-3-5-haiku-20241022", "https://api.anthropic.com")
            },
            SecondaryService::Mistral => Self::bare("mistral", "mistral-small-latest", "https://api.mistral.ai/v1"),
            SecondaryService::DeepSeek => Self::bare("deepseek", "deepseek-chat", "https://api.deepseek.com/v1"),
            SecondaryService::OpenWebUI => Self::bare("openwebui", "gemma3:12b", "http://localhost:3000/api"),
            SecondaryService::Dummy => Self::bare("dummy", "dummy_model", ""),
        }
    }

    // @returns: Primary provider config with defaults
    pub fn for_primary(service: PrimaryService) -> Self {
        match service {
            PrimaryService::MyMemory => Self::bare("mymemory", "", "https://api.mymemory.translated.net"),
            PrimaryService::Google => Self::bare("google", "", "https://translation.googleapis.com/language/translate/v2"),
            PrimaryService::Microsoft => Self {
                region: "germanywestcentral".to_string(),
                ..Self::bare("microsoft", "", "https://api.cognitive.microsofttranslator.com")
            },
            PrimaryService::LibreTranslate => Self::bare("libretranslate", "", "http://localhost:5000"),
            PrimaryService::Dummy => Self::bare("dummy", "", ""),
            PrimaryService::DummyNone => Self::bare("dummynone", "", ""),
        }
    }
}

/// Settings of the arbitration pipeline
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PipelineSettings {
    /// Minimum consensus confidence for accepting primary translations directly
    #[serde(default = "default_threshold")]
    pub low_confidence_threshold: f64,

    /// Number of primary candidates to collect before scoring (1-8)
    #[serde(default = "default_min_primary_translations")]
    pub min_primary_translations: usize,

    /// Extra arbitration attempts after the first one (0-10)
    #[serde(default = "default_max_retries")]
    pub max_retries: u32,

    /// Secondary strategy
    #[serde(default)]
    pub strategy: StrategyKind,

    /// Hierarchy strategy: one prompt per language instead of a combined one
    #[serde(default = "default_true")]
    pub separate_language_prompts: bool,
}

impl Default for PipelineSettings {
    fn default() -> Self {
        Self {
            low_confidence_threshold: default_threshold(),
            min_primary_translations: default_min_primary_translations(),
            max_retries: default_max_retries(),
            strategy: StrategyKind::default(),
            separate_language_prompts: true,
        }
    }
}

/// Log verbosity level
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Default)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    Error,
    Warn,
    #[default]
    Info,
    Debug,
    Trace,
}

/// Highest accepted `max_retries`
pub const MAX_RETRIES_LIMIT: u32 = 10;

/// Accepted range of `min_primary_translations`
pub const MIN_PRIMARY_TRANSLATIONS_RANGE: std::ops::RangeInclusive<usize> = 1..=8;

fn default_timeout_secs() -> u64 {
    30
}

fn default_anthropic_timeout_secs() -> u64 {
    60
}

fn default_threshold() -> f64 {
    0.66
}

fn default_min_primary_translations() -> usize {
    5
}

fn default_max_retries() -> u32 {
    1
}

fn default_true() -> bool {
    true
}

fn default_primary_services() -> Vec<PrimaryService> {
    vec![PrimaryService::MyMemory]
}

fn default_available_providers() -> Vec<ProviderConfig> {
    let primaries = [
        PrimaryService::MyMemory,
        PrimaryService::Google,
        PrimaryService::Microsoft,
        PrimaryService::LibreTranslate,
    ]
    .into_iter()
    .map(ProviderConfig::for_primary);
    let secondaries = [
        SecondaryService::Ollama,
        SecondaryService::OpenAI,
        SecondaryService::Anthropic,
        SecondaryService::Mistral,
        SecondaryService::DeepSeek,
        SecondaryService::OpenWebUI,
    ]
    .into_iter()
    .map(ProviderConfig::for_secondary);
    primaries.chain(secondaries).collect()
}

impl Config {
    /// Validate the configuration for consistency and required values
    pub fn validate(&self) -> Result<()> {
        crate::language_utils::validate_language_code(&self.target_language)?;

        let threshold = self.pipeline.low_confidence_threshold;
        if !(0.0..=1.0).contains(&threshold) {
            return Err(anyhow!("Threshold must be between 0 and 1, got {}", threshold));
        }
        if !MIN_PRIMARY_TRANSLATIONS_RANGE.contains(&self.pipeline.min_primary_translations) {
            return Err(anyhow!(
                "Minimum number of primary translations must be between 1 and 8, got {}",
                self.pipeline.min_primary_translations
            ));
        }
        if self.pipeline.max_retries > MAX_RETRIES_LIMIT {
            return Err(anyhow!(
                "Max retries must be between 0 and {}, got {}",
                MAX_RETRIES_LIMIT,
                self.pipeline.max_retries
            ));
        }
        if self.primary_services.is_empty() {
            return Err(anyhow!("At least one primary translation service is required"));
        }

        let (low, high) = self.secondary_service.temperature_range();
        if !(low..=high).contains(&self.temperature) {
            return Err(anyhow!(
                "Temperature for {} must be between {} and {} (inclusive)",
                self.secondary_service.display_name(),
                low,
                high
            ));
        }

        if self.secondary_service.requires_api_key() && self.secondary_api_key().is_empty() {
            return Err(anyhow!(
                "API key is required for {} provider",
                self.secondary_service.display_name()
            ));
        }
        for service in &self.primary_services {
            if service.requires_api_key() && self.primary_api_key(*service).is_empty() {
                return Err(anyhow!("API key is required for {} provider", service.display_name()));
            }
        }

        Ok(())
    }

    /// Get a provider configuration by its identifier
    pub fn get_provider_config(&self, provider_type: &str) -> Option<&ProviderConfig> {
        self.available_providers
            .iter()
            .find(|p| p.provider_type == provider_type)
    }

    /// Connection settings of the secondary service, falling back to defaults
    pub fn secondary_provider_config(&self) -> ProviderConfig {
        let defaults = ProviderConfig::for_secondary(self.secondary_service);
        let mut config = self
            .get_provider_config(&self.secondary_service.to_lowercase_string())
            .cloned()
            .unwrap_or_else(|| defaults.clone());
        if config.model.is_empty() {
            config.model = defaults.model;
        }
        if config.endpoint.is_empty() {
            config.endpoint = defaults.endpoint;
        }
        config.api_key = self.secondary_api_key();
        config
    }

    /// Connection settings of a primary service, falling back to defaults
    pub fn primary_provider_config(&self, service: PrimaryService) -> ProviderConfig {
        let defaults = ProviderConfig::for_primary(service);
        let mut config = self
            .get_provider_config(&service.to_lowercase_string())
            .cloned()
            .unwrap_or_else(|| defaults.clone());
        if config.endpoint.is_empty() {
            config.endpoint = defaults.endpoint;
        }
        if config.region.is_empty() {
            config.region = std::env::var("MICROSOFT_REGION").unwrap_or(defaults.region);
        }
        config.api_key = self.primary_api_key(service);
        config
    }

    /// Set the model of the secondary service
    pub fn set_secondary_model(&mut self, model: &str) {
        let provider_type = self.secondary_service.to_lowercase_string();
        match self
            .available_providers
            .iter_mut()
            .find(|p| p.provider_type == provider_type)
        {
            Some(provider) => provider.model = model.to_string(),
            None => {
                let mut provider = ProviderConfig::for_secondary(self.secondary_service);
                provider.model = model.to_string();
                self.available_providers.push(provider);
            }
        }
    }

    fn secondary_api_key(&self) -> String {
        let configured = self
            .get_provider_config(&self.secondary_service.to_lowercase_string())
            .map(|p| p.api_key.clone())
            .unwrap_or_default();
        key_or_env(configured, self.secondary_service.api_key_env())
    }

    fn primary_api_key(&self, service: PrimaryService) -> String {
        let configured = self
            .get_provider_config(&service.to_lowercase_string())
            .map(|p| p.api_key.clone())
            .unwrap_or_default();
        key_or_env(configured, service.api_key_env())
    }
}

fn key_or_env(configured: String, env: Option<&str>) -> String {
    if !configured.is_empty() {
        return configured;
    }
    env.and_then(|name| std::env::var(name).ok()).unwrap_or_default()
}

/// Default implementation for Config
impl Default for Config {
    fn default() -> Self {
        Config {
            target_language: "en".to_string(),
            user_context: None,
            pipeline: PipelineSettings::default(),
            primary_services: default_primary_services(),
            secondary_service: SecondaryService::default(),
            available_providers: default_available_providers(),
            temperature: 0.0,
            detailed_output_name: false,
            log_level: LogLevel::default(),
        }
    }
}
