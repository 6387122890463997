/*!
 * Common test utilities for the skos-translator test suite
 */

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

pub mod mock_providers;

/// Small physics vocabulary with a two-level hierarchy
pub const PHYSICS_TURTLE: &str = r#"@prefix skos: <http://www.w3.org/2004/02/skos/core#> .
@prefix dct: <http://purl.org/dc/terms/> .
@prefix ex: <http://example.org/physics/> .

ex:scheme a skos:ConceptScheme ;
    dct:description "Terms of classical mechanics" .

ex:physics a skos:Concept ;
    skos:prefLabel "Physik"@de .

ex:mechanics a skos:Concept ;
    skos:prefLabel "Mechanik"@de ;
    skos:broader ex:physics .

ex:force a skos:Concept ;
    skos:prefLabel "Kraft"@de ;
    skos:definition "Ursache einer Beschleunigung"@de ;
    skos:broader ex:mechanics .
"#;

/// Route log output through the test harness
pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// Creates a temporary directory for test files
pub fn create_temp_dir() -> Result<TempDir> {
    Ok(TempDir::new()?)
}

/// Creates a test file with the given content in the specified directory
pub fn create_test_file(dir: &Path, filename: &str, content: &str) -> Result<PathBuf> {
    let file_path = dir.join(filename);
    fs::write(&file_path, content)?;
    Ok(file_path)
}

/// Writes the physics vocabulary as Turtle
pub fn create_test_vocabulary(dir: &Path, filename: &str) -> Result<PathBuf> {
    create_test_file(dir, filename, PHYSICS_TURTLE)
}
