/*!
 * Vocabulary data model and graph access.
 *
 * - `Concept`: opaque handle of a SKOS concept (IRI or blank node)
 * - `Label`: a text with its language tag
 * - `LanguageValues` / `TermProperties`: per-property, per-language label texts
 *   in document order
 * - `ConceptGraph`: the accessor the translation pipeline reads from and writes to
 * - `skos`: the RDF-backed implementation
 */

use std::collections::HashMap;
use std::fmt;

use crate::errors::GraphError;

pub mod skos;

pub use skos::SkosGraph;

/// SKOS namespace
pub const SKOS_NS: &str = "http://www.w3.org/2004/02/skos/core#";

/// Property holding the labels that get translated
pub const PREF_LABEL: &str = "prefLabel";
pub const ALT_LABEL: &str = "altLabel";
pub const DEFINITION: &str = "definition";
pub const NOTE: &str = "note";
pub const SCOPE_NOTE: &str = "scopeNote";
pub const EXAMPLE: &str = "example";

/// Literal-valued SKOS properties extracted for every concept
pub const TERM_PROPERTIES: &[&str] = &[PREF_LABEL, ALT_LABEL, DEFINITION, NOTE, SCOPE_NOTE, EXAMPLE];

/// Properties read as term descriptions, in priority order
pub const DESCRIPTION_PROPERTIES: &[&str] = &[DEFINITION, NOTE];

/// Handle of a concept inside a graph.
///
/// Named nodes keep their IRI, blank nodes are written `_:id`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Concept {
    id: String,
}

impl Concept {
    pub fn new(id: impl Into<String>) -> Self {
        Self { id: id.into() }
    }

    pub fn id(&self) -> &str {
        &self.id
    }
}

impl fmt::Display for Concept {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.id)
    }
}

/// A label text together with its language tag
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Label {
    pub text: String,
    pub language: String,
}

impl Label {
    pub fn new(text: impl Into<String>, language: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            language: language.into(),
        }
    }
}

impl fmt::Display for Label {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.text, self.language)
    }
}

/// Values of one property grouped by language.
///
/// Languages keep the order in which they were first seen, texts keep document
/// order and may repeat.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LanguageValues {
    entries: Vec<(String, Vec<String>)>,
}

impl LanguageValues {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a text under a language
    pub fn push(&mut self, language: impl Into<String>, text: impl Into<String>) {
        let language = language.into();
        let text = text.into();
        match self.entries.iter_mut().find(|(lang, _)| *lang == language) {
            Some((_, texts)) => texts.push(text),
            None => self.entries.push((language, vec![text])),
        }
    }

    /// Builder form of `push`
    pub fn with(mut self, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(language, text);
        self
    }

    /// Texts recorded for an exact language tag
    pub fn get(&self, language: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(lang, _)| lang == language)
            .map(|(_, texts)| texts.as_slice())
    }

    /// First text of an exact language tag
    pub fn first(&self, language: &str) -> Option<&str> {
        self.get(language).and_then(|texts| texts.first()).map(String::as_str)
    }

    /// First text of the first language, whatever it is
    pub fn first_available(&self) -> Option<(&str, &str)> {
        self.entries
            .iter()
            .find_map(|(lang, texts)| texts.first().map(|t| (lang.as_str(), t.as_str())))
    }

    /// Whether a language is present, comparing tags case-insensitively
    pub fn contains_language(&self, language: &str) -> bool {
        self.entries
            .iter()
            .any(|(lang, _)| crate::language_utils::tags_equal(lang, language))
    }

    pub fn languages(&self) -> impl Iterator<Item = &str> {
        self.entries.iter().map(|(lang, _)| lang.as_str())
    }

    /// Iterate over (language, texts) pairs
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries
            .iter()
            .map(|(lang, texts)| (lang.as_str(), texts.as_slice()))
    }

    /// Flatten into labels, language by language
    pub fn labels(&self) -> Vec<Label> {
        self.iter()
            .flat_map(|(lang, texts)| texts.iter().map(move |t| Label::new(t.clone(), lang)))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }
}

/// Literal properties of one concept, keyed by SKOS local name
#[derive(Debug, Clone, Default, PartialEq)]
pub struct TermProperties {
    properties: HashMap<String, LanguageValues>,
}

impl TermProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, property: &str, language: impl Into<String>, text: impl Into<String>) {
        self.properties
            .entry(property.to_string())
            .or_default()
            .push(language, text);
    }

    pub fn with(mut self, property: &str, language: impl Into<String>, text: impl Into<String>) -> Self {
        self.push(property, language, text);
        self
    }

    pub fn get(&self, property: &str) -> Option<&LanguageValues> {
        self.properties.get(property)
    }

    /// Whether the property already has a value in the language
    pub fn has_language(&self, property: &str, language: &str) -> bool {
        self.get(property)
            .is_some_and(|values| values.contains_language(language))
    }

    /// Description texts (`definition`, then `note`) merged per language
    pub fn descriptions(&self) -> LanguageValues {
        let mut merged = LanguageValues::new();
        for property in DESCRIPTION_PROPERTIES {
            if let Some(values) = self.get(property) {
                for (lang, texts) in values.iter() {
                    for text in texts {
                        merged.push(lang, text.clone());
                    }
                }
            }
        }
        merged
    }
}

/// Read/write access to a concept scheme.
///
/// The pipeline only ever adds literals; it never removes or replaces them.
pub trait ConceptGraph: Send + Sync {
    /// All concepts in document order
    fn concepts(&self) -> Vec<Concept>;

    /// Literal properties of a concept. Untagged literals are reported under
    /// `DEFAULT_LABEL_LANGUAGE`.
    fn term_properties(&self, concept: &Concept) -> TermProperties;

    /// Description of the concept scheme, if any
    fn vocabulary_context(&self) -> Option<String>;

    /// First `skos:broader` parent.
    ///
    /// Only one parent is followed even for polyhierarchies.
    fn broader(&self, concept: &Concept) -> Option<Concept>;

    /// Attach a language-tagged literal to a concept
    fn add_literal(
        &mut self,
        concept: &Concept,
        property: &str,
        text: &str,
        language: &str,
    ) -> Result<(), GraphError>;
}
