/*!
 * Tests for app configuration functionality
 */

use anyhow::Result;
use skos_translator::app_config::{
    Config, LogLevel, PrimaryService, ProviderConfig, SecondaryService, StrategyKind,
};

/// Test default configuration values
#[test]
fn test_default_config_withNoParameters_shouldHaveCorrectValues() {
    let config = Config::default();

    assert_eq!(config.target_language, "en");
    assert_eq!(config.secondary_service, SecondaryService::Ollama);
    assert_eq!(config.primary_services, vec![PrimaryService::MyMemory]);
    assert_eq!(config.log_level, LogLevel::Info);
    assert!(!config.detailed_output_name);
    assert!(config.get_provider_config("ollama").is_some());
    assert!(config.get_provider_config("libretranslate").is_some());
}

/// Test the JSON file round trip used by the CLI
#[test]
fn test_config_serialization_shouldRoundTripThroughJson() -> Result<()> {
    let mut config = Config::default();
    config.target_language = "fr".to_string();
    config.user_context = Some("Physics".to_string());
    config.pipeline.strategy = StrategyKind::Batch;
    config.primary_services = vec![PrimaryService::Dummy, PrimaryService::LibreTranslate];

    let json = serde_json::to_string_pretty(&config)?;
    assert!(json.contains("\"libretranslate\""));
    assert!(json.contains("\"batch\""));

    let parsed: Config = serde_json::from_str(&json)?;
    assert_eq!(parsed.target_language, "fr");
    assert_eq!(parsed.user_context.as_deref(), Some("Physics"));
    assert_eq!(parsed.pipeline.strategy, StrategyKind::Batch);
    assert_eq!(parsed.primary_services, config.primary_services);
    Ok(())
}

/// Test validation of the pipeline settings
#[test]
fn test_validate_withOutOfRangeSettings_shouldFail() {
    let mut config = Config::default();
    config.pipeline.low_confidence_threshold = 1.2;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.pipeline.min_primary_translations = 0;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.pipeline.min_primary_translations = 9;
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.primary_services.clear();
    assert!(config.validate().is_err());

    let mut config = Config::default();
    config.target_language = "klingon".to_string();
    assert!(config.validate().is_err());
}

/// Test that a configured key satisfies services that need one
#[test]
fn test_validate_withConfiguredApiKey_shouldSucceed() {
    let mut config = Config::default();
    config.secondary_service = SecondaryService::OpenAI;
    config.available_providers.retain(|p| p.provider_type != "openai");
    config.available_providers.push(ProviderConfig {
        api_key: "sk-test".to_string(),
        ..ProviderConfig::for_secondary(SecondaryService::OpenAI)
    });

    assert!(config.validate().is_ok());
    assert_eq!(config.secondary_provider_config().api_key, "sk-test");
}

/// Test the model override applied from the command line
#[test]
fn test_setSecondaryModel_shouldOnlyTouchSelectedService() {
    let mut config = Config::default();
    config.secondary_service = SecondaryService::Mistral;
    config.set_secondary_model("mistral-large-latest");

    assert_eq!(config.secondary_provider_config().model, "mistral-large-latest");
    assert_eq!(config.get_provider_config("ollama").map(|p| p.model.as_str()), Some("llama3.2:3b"));
}

/// Test service name parsing
#[test]
fn test_serviceFromStr_shouldAcceptKnownNamesOnly() {
    assert_eq!("Google".parse::<PrimaryService>().unwrap(), PrimaryService::Google);
    assert_eq!("argos".parse::<PrimaryService>().unwrap(), PrimaryService::LibreTranslate);
    assert_eq!("deepseek".parse::<SecondaryService>().unwrap(), SecondaryService::DeepSeek);
    assert!("deepl".parse::<PrimaryService>().is_err());
    assert!("individual".parse::<SecondaryService>().is_err());
}
