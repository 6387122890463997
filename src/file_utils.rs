use std::path::{Path, PathBuf};

use chrono::Local;
use oxrdfio::RdfFormat;

use crate::errors::GraphError;

// @module: File and path utilities

/// Parameters encoded into a detailed output file name
#[derive(Debug, Clone)]
pub struct OutputNaming<'a> {
    pub target_language: &'a str,
    pub threshold: f64,
    pub primary_services: &'a [String],
    pub secondary_service: &'a str,
    pub strategy: &'a str,
    pub temperature: f32,
}

// @struct: File operations utility
pub struct FileManager;

impl FileManager {
    // @checks: File existence
    pub fn file_exists<P: AsRef<Path>>(path: P) -> bool {
        path.as_ref().exists() && path.as_ref().is_file()
    }

    /// RDF syntax implied by a file extension
    pub fn detect_rdf_format(path: &Path) -> Result<RdfFormat, GraphError> {
        let extension = path
            .extension()
            .map(|e| e.to_string_lossy().to_lowercase())
            .unwrap_or_default();
        match extension.as_str() {
            "ttl" | "turtle" => Ok(RdfFormat::Turtle),
            "nt" => Ok(RdfFormat::NTriples),
            "nq" => Ok(RdfFormat::NQuads),
            "trig" => Ok(RdfFormat::TriG),
            "n3" => Ok(RdfFormat::N3),
            "rdf" | "xml" | "owl" => Ok(RdfFormat::RdfXml),
            _ => Err(GraphError::UnsupportedFormat(format!(
                "{} (expected .ttl, .nt, .nq, .trig, .n3, .rdf, .xml or .owl)",
                path.display()
            ))),
        }
    }

    // @generates: `<stem>_updated.<ext>` next to the input
    pub fn generate_output_path<P: AsRef<Path>>(input_file: P) -> PathBuf {
        let input_file = input_file.as_ref();
        Self::with_stem_suffix(input_file, "_updated")
    }

    // @generates: Output path carrying the run parameters and a timestamp
    pub fn generate_detailed_output_path<P: AsRef<Path>>(input_file: P, naming: &OutputNaming<'_>) -> PathBuf {
        let timestamp = Local::now().format("%Y%m%d-%H%M%S");
        let suffix = format!(
            "_{}_t{}_{}_{}_{}_temp{}_{}",
            naming.target_language,
            naming.threshold,
            naming.primary_services.join("-"),
            naming.secondary_service,
            naming.strategy,
            naming.temperature,
            timestamp
        );
        Self::with_stem_suffix(input_file.as_ref(), &suffix)
    }

    fn with_stem_suffix(input_file: &Path, suffix: &str) -> PathBuf {
        let stem = input_file.file_stem().unwrap_or_default().to_string_lossy();
        let mut name = format!("{}{}", stem, suffix);
        if let Some(ext) = input_file.extension() {
            name.push('.');
            name.push_str(&ext.to_string_lossy());
        }
        input_file.with_file_name(name)
    }
}
