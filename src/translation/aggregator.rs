/*!
 * Collection of primary translation candidates.
 */

use log::{debug, warn};

use super::candidates::CandidateSet;
use crate::errors::ProviderError;
use crate::providers::PrimaryTranslator;
use crate::vocabulary::LanguageValues;

/// Query the primary translators for every source label of a property.
///
/// Translators run in the given order. After each translator the running
/// total is compared with `min_candidates` and the remaining translators are
/// skipped once it is reached. Failing translators contribute nothing; only a
/// rate limit aborts.
pub async fn aggregate(
    labels: &LanguageValues,
    target_language: &str,
    translators: &[Box<dyn PrimaryTranslator>],
    min_candidates: usize,
) -> Result<CandidateSet, ProviderError> {
    let mut candidates = CandidateSet::new();

    for translator in translators {
        for (source_language, texts) in labels.iter() {
            for text in texts.iter().filter(|t| !t.trim().is_empty()) {
                match translator.translate(text, source_language, target_language).await {
                    Ok(Some(translation)) => {
                        if candidates.push(source_language, &translation) {
                            debug!(
                                "{}: '{}' ({}) -> '{}' ({})",
                                translator.name(),
                                text,
                                source_language,
                                translation,
                                target_language
                            );
                        }
                    }
                    Ok(None) => {
                        debug!("{}: no translation for '{}' ({})", translator.name(), text, source_language);
                    }
                    Err(e) if e.is_fatal() => return Err(e),
                    Err(e) => {
                        warn!("{} failed for '{}' ({}): {}", translator.name(), text, source_language, e);
                    }
                }
            }
        }

        if candidates.total() >= min_candidates {
            debug!(
                "Collected {} primary candidates (minimum {}), skipping remaining translators",
                candidates.total(),
                min_candidates
            );
            break;
        }
    }

    Ok(candidates)
}
