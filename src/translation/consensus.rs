/*!
 * Frequency consensus over candidate translations.
 *
 * Candidates are compared case-insensitively; the winner is reported in the
 * casing it had when first seen. Ties go to the candidate seen first.
 */

use log::debug;

use super::TranslationDecision;
use super::candidates::CandidateSet;

/// Majority vote scorer
#[derive(Debug, Clone, Copy, Default)]
pub struct FrequencyConsensus;

impl FrequencyConsensus {
    pub fn new() -> Self {
        Self
    }

    /// Pick the most frequent candidate.
    ///
    /// Confidence is the winner's share of all candidates. An empty set gives
    /// no translation and a confidence of 0.0.
    pub fn calculate(&self, candidates: &CandidateSet) -> TranslationDecision {
        self.calculate_values(candidates.values())
    }

    /// Same vote over a plain sequence of candidates
    pub fn calculate_values<'a>(&self, values: impl IntoIterator<Item = &'a str>) -> TranslationDecision {
        // (lowercase key, first-seen form, count) in encounter order
        let mut tally: Vec<(String, &str, usize)> = Vec::new();
        let mut total = 0usize;

        for value in values {
            if value.trim().is_empty() {
                continue;
            }
            let key = value.to_lowercase();
            match tally.iter_mut().find(|(k, _, _)| *k == key) {
                Some((_, _, count)) => *count += 1,
                None => tally.push((key, value, 1)),
            }
            total += 1;
        }

        let mut winner: Option<(&str, usize)> = None;
        for (_, original, count) in &tally {
            if winner.is_none_or(|(_, best)| *count > best) {
                winner = Some((*original, *count));
            }
        }

        match winner {
            Some((original, count)) => {
                let confidence = count as f64 / total as f64;
                debug!("Consensus '{}' with {}/{} votes", original, count, total);
                TranslationDecision::new(original, confidence)
            }
            None => TranslationDecision::empty(),
        }
    }
}
