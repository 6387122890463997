/*!
 * Error types for the skos-translator application.
 *
 * This module contains custom error types for different parts of the application,
 * using the thiserror crate for ergonomic error definitions.
 */

use thiserror::Error;

/// Errors that can occur when working with translation services
#[derive(Error, Debug)]
pub enum ProviderError {
    /// Error when making an API request fails
    #[error("API request failed: {0}")]
    RequestFailed(String),

    /// Error when parsing an API response fails
    #[error("Failed to parse API response: {0}")]
    ParseError(String),

    /// Error returned by the API itself
    #[error("API responded with error: {status_code} - {message}")]
    ApiError {
        /// HTTP status code
        status_code: u16,
        /// Error message from the API
        message: String,
    },

    /// Error establishing or maintaining a connection
    #[error("Connection error: {0}")]
    ConnectionError(String),

    /// The service refuses further requests for this run
    #[error("Rate limit exceeded: {0}")]
    RateLimitExceeded(String),

    /// Error with authentication
    #[error("Authentication error: {0}")]
    AuthenticationError(String),

    /// The service cannot translate between the given languages
    #[error("Unsupported language pair: {source_language} -> {target_language}")]
    UnsupportedLanguage {
        source_language: String,
        target_language: String,
    },
}

impl ProviderError {
    /// Whether this error must abort the whole run instead of degrading to "no candidate".
    pub fn is_fatal(&self) -> bool {
        matches!(self, Self::RateLimitExceeded(_))
    }
}

/// Errors raised while reading, querying or writing a vocabulary graph
#[derive(Error, Debug)]
pub enum GraphError {
    /// The file extension does not map to a known RDF syntax
    #[error("Unsupported vocabulary format: {0}")]
    UnsupportedFormat(String),

    /// The document could not be parsed
    #[error("Failed to parse vocabulary: {0}")]
    Parse(String),

    /// Reading or writing the document failed
    #[error("Vocabulary I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The concept is not part of the graph
    #[error("Unknown concept: {0}")]
    UnknownConcept(String),

    /// A namespace prefix of the input cannot be written back
    #[error("Invalid namespace prefix: {0}")]
    InvalidPrefix(String),

    /// A literal could not be constructed, e.g. because of a malformed language tag
    #[error("Invalid literal: {0}")]
    InvalidLiteral(String),
}

/// Errors that can occur during translation
#[derive(Error, Debug)]
pub enum TranslationError {
    /// Error from the provider API
    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    /// Error from the vocabulary graph
    #[error("Vocabulary error: {0}")]
    Graph(#[from] GraphError),
}

impl TranslationError {
    /// Whether the run has to stop
    pub fn is_fatal(&self) -> bool {
        match self {
            Self::Provider(e) => e.is_fatal(),
            Self::Graph(_) => true,
        }
    }
}
