/*!
 * Tests for file utility functions
 */

use anyhow::Result;
use oxrdfio::RdfFormat;
use std::path::{Path, PathBuf};

use crate::common;
use skos_translator::errors::GraphError;
use skos_translator::file_utils::{FileManager, OutputNaming};

/// Test format detection from the extension
#[test]
fn test_detectRdfFormat_withKnownExtensions_shouldMapToSyntax() -> Result<()> {
    assert_eq!(FileManager::detect_rdf_format(Path::new("a.ttl"))?, RdfFormat::Turtle);
    assert_eq!(FileManager::detect_rdf_format(Path::new("a.NT"))?, RdfFormat::NTriples);
    assert_eq!(FileManager::detect_rdf_format(Path::new("a.nq"))?, RdfFormat::NQuads);
    assert_eq!(FileManager::detect_rdf_format(Path::new("a.trig"))?, RdfFormat::TriG);
    assert_eq!(FileManager::detect_rdf_format(Path::new("a.owl"))?, RdfFormat::RdfXml);
    Ok(())
}

/// Test that unknown extensions are rejected before any parsing
#[test]
fn test_detectRdfFormat_withUnknownExtension_shouldFail() {
    let result = FileManager::detect_rdf_format(Path::new("vocabulary.json"));
    assert!(matches!(result, Err(GraphError::UnsupportedFormat(_))));
    assert!(FileManager::detect_rdf_format(Path::new("vocabulary")).is_err());
}

/// Test the default output name
#[test]
fn test_generateOutputPath_shouldKeepDirectoryAndExtension() {
    let output = FileManager::generate_output_path("/data/thesaurus.ttl");
    assert_eq!(output, PathBuf::from("/data/thesaurus_updated.ttl"));
}

/// Test the detailed output name
#[test]
fn test_generateDetailedOutputPath_shouldEncodeRunParameters() {
    let primary = vec!["google".to_string(), "mymemory".to_string()];
    let naming = OutputNaming {
        target_language: "en",
        threshold: 0.5,
        primary_services: &primary,
        secondary_service: "openai",
        strategy: "hierarchy",
        temperature: 0.2,
    };

    let output = FileManager::generate_detailed_output_path("/data/thesaurus.rdf", &naming);
    let name = output.file_name().unwrap().to_string_lossy().to_string();

    assert!(name.starts_with("thesaurus_en_t0.5_google-mymemory_openai_hierarchy_temp0.2_"));
    assert!(name.ends_with(".rdf"));
    assert_eq!(output.parent(), Some(Path::new("/data")));
}

/// Test existence checks against a real directory
#[test]
fn test_fileExists_shouldRejectDirectories() -> Result<()> {
    let dir = common::create_temp_dir()?;
    let file = common::create_test_vocabulary(dir.path(), "vocab.ttl")?;

    assert!(FileManager::file_exists(&file));
    assert!(!FileManager::file_exists(dir.path()));
    assert!(!FileManager::file_exists(dir.path().join("missing.ttl")));
    Ok(())
}
