/*!
 * Candidate translations grouped by the source language they came from.
 */

/// Ordered source-language -> candidates mapping.
///
/// Candidates are stored exactly as the translator returned them. Empty and
/// whitespace-only candidates are dropped, so a language present in the set
/// always has at least one candidate.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CandidateSet {
    entries: Vec<(String, Vec<String>)>,
}

impl CandidateSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a candidate under its source language. Returns false for blank text.
    pub fn push(&mut self, source_language: &str, candidate: &str) -> bool {
        if candidate.trim().is_empty() {
            return false;
        }
        match self.entries.iter_mut().find(|(lang, _)| lang == source_language) {
            Some((_, candidates)) => candidates.push(candidate.to_string()),
            None => self
                .entries
                .push((source_language.to_string(), vec![candidate.to_string()])),
        }
        true
    }

    /// Builder form of `push`
    pub fn with(mut self, source_language: &str, candidate: &str) -> Self {
        self.push(source_language, candidate);
        self
    }

    /// Number of candidates across all languages
    pub fn total(&self) -> usize {
        self.entries.iter().map(|(_, c)| c.len()).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, source_language: &str) -> Option<&[String]> {
        self.entries
            .iter()
            .find(|(lang, _)| lang == source_language)
            .map(|(_, c)| c.as_slice())
    }

    /// Iterate over (language, candidates) pairs in insertion order
    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.entries.iter().map(|(lang, c)| (lang.as_str(), c.as_slice()))
    }

    /// All candidates, flattened in insertion order
    pub fn values(&self) -> impl Iterator<Item = &str> {
        self.entries
            .iter()
            .flat_map(|(_, c)| c.iter().map(String::as_str))
    }

    /// Case-insensitive membership test
    pub fn contains_ignore_case(&self, text: &str) -> bool {
        let needle = text.trim().to_lowercase();
        self.values().any(|candidate| candidate.trim().to_lowercase() == needle)
    }
}
