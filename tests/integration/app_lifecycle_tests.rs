/*!
 * Integration tests for complete file to file runs
 *
 * These tests use the offline dummy services so no request leaves the machine.
 */

use anyhow::Result;
use oxrdfio::RdfFormat;

use crate::common;
use skos_translator::app_config::{Config, PrimaryService, SecondaryService, StrategyKind};
use skos_translator::app_controller::Controller;
use skos_translator::vocabulary::{Concept, ConceptGraph, PREF_LABEL, SkosGraph};

fn offline_config() -> Config {
    let mut config = Config::default();
    config.target_language = "en".to_string();
    config.primary_services = vec![PrimaryService::Dummy];
    config.secondary_service = SecondaryService::Dummy;
    config.pipeline.min_primary_translations = 1;
    config.pipeline.low_confidence_threshold = 0.5;
    config
}

/// Test a run that accepts every primary translation
#[tokio::test]
async fn test_controller_run_shouldWriteTranslatedVocabulary() -> Result<()> {
    common::init_logging();
    let dir = common::create_temp_dir()?;
    let input = common::create_test_vocabulary(dir.path(), "physics.ttl")?;

    let controller = Controller::with_config(offline_config())?;
    let output = controller.run(input.clone(), None).await?;

    assert_eq!(output, dir.path().join("physics_updated.ttl"));
    let graph = SkosGraph::load(&output)?;
    assert_eq!(graph.format(), RdfFormat::Turtle);

    let force = graph.term_properties(&Concept::new("http://example.org/physics/force"));
    let labels = force.get(PREF_LABEL).unwrap();
    assert_eq!(labels.first("de"), Some("Kraft"));
    assert_eq!(labels.first("en"), Some("Kraft_en_dummy"));

    // The input file is left alone
    let original = SkosGraph::load(&input)?;
    assert_eq!(original.len() + 3, graph.len());
    Ok(())
}

/// Test that running over an already translated file adds nothing
#[tokio::test]
async fn test_controller_run_onOwnOutput_shouldAddNothing() -> Result<()> {
    common::init_logging();
    let dir = common::create_temp_dir()?;
    let input = common::create_test_vocabulary(dir.path(), "physics.ttl")?;
    let controller = Controller::with_config(offline_config())?;

    let first = controller.run(input, None).await?;
    let second = controller.run(first.clone(), Some(dir.path().join("second.ttl"))).await?;

    assert_eq!(SkosGraph::load(&first)?.len(), SkosGraph::load(&second)?.len());
    Ok(())
}

/// Test the secondary path with the offline language model
#[tokio::test]
async fn test_controller_run_withoutPrimaryTranslations_shouldUseSecondary() -> Result<()> {
    common::init_logging();
    let dir = common::create_temp_dir()?;
    let input = common::create_test_vocabulary(dir.path(), "physics.ttl")?;
    let mut config = offline_config();
    config.primary_services = vec![PrimaryService::DummyNone];
    config.pipeline.strategy = StrategyKind::Individual;

    let output = Controller::with_config(config)?
        .run(input, Some(dir.path().join("out.ttl")))
        .await?;

    let graph = SkosGraph::load(&output)?;
    let force = graph.term_properties(&Concept::new("http://example.org/physics/force"));
    // The dummy model cannot review candidates, so its own answer wins by consensus
    assert_eq!(force.get(PREF_LABEL).unwrap().first("en"), Some("Kraft_dummy"));
    Ok(())
}

/// Test the detailed output naming
#[tokio::test]
async fn test_controller_run_withDetailedName_shouldEncodeParameters() -> Result<()> {
    common::init_logging();
    let dir = common::create_temp_dir()?;
    let input = common::create_test_vocabulary(dir.path(), "physics.ttl")?;
    let mut config = offline_config();
    config.detailed_output_name = true;

    let output = Controller::with_config(config)?.run(input, None).await?;

    let name = output.file_name().unwrap().to_string_lossy().to_string();
    assert!(name.starts_with("physics_en_t0.5_dummy_dummy_individual_temp0_"));
    assert!(name.ends_with(".ttl"));
    assert!(output.exists());
    Ok(())
}

/// Test that input problems are reported before any translation
#[tokio::test]
async fn test_controller_run_withBadInput_shouldFail() -> Result<()> {
    common::init_logging();
    let dir = common::create_temp_dir()?;
    let controller = Controller::with_config(offline_config())?;

    assert!(controller.run(dir.path().join("missing.ttl"), None).await.is_err());

    let unsupported = common::create_test_file(dir.path(), "physics.json", "{}")?;
    assert!(controller.run(unsupported, None).await.is_err());

    let broken = common::create_test_file(dir.path(), "broken.ttl", "<http://example.org/a> a ")?;
    assert!(controller.run(broken, None).await.is_err());
    Ok(())
}

/// Test that invalid configurations are rejected up front
#[test]
fn test_controller_withInvalidConfig_shouldFail() {
    let mut config = offline_config();
    config.target_language = "zz".to_string();
    assert!(Controller::with_config(config).is_err());
}
