/*!
 * Language tag helpers.
 *
 * Vocabulary literals carry BCP 47 tags (`de`, `en-US`, `pt-BR`) while the
 * translation services and prompts need ISO 639 codes and readable names.
 * Everything here looks at the primary subtag only.
 */

use anyhow::{Result, anyhow};
use isolang::Language;

/// Language assigned to literals that carry no tag.
pub const DEFAULT_LABEL_LANGUAGE: &str = "en-US";

/// Pseudo tag used for labels whose language is unknown.
pub const UNSPECIFIED_LANGUAGE: &str = "none";

/// ISO 639-2/B codes that differ from their 639-2/T counterpart.
const BIBLIOGRAPHIC_CODES: &[(&str, &str)] = &[
    ("alb", "sqi"),
    ("arm", "hye"),
    ("baq", "eus"),
    ("bur", "mya"),
    ("chi", "zho"),
    ("cze", "ces"),
    ("dut", "nld"),
    ("fre", "fra"),
    ("geo", "kat"),
    ("ger", "deu"),
    ("gre", "ell"),
    ("ice", "isl"),
    ("mac", "mkd"),
    ("may", "msa"),
    ("per", "fas"),
    ("rum", "ron"),
    ("slo", "slk"),
    ("wel", "cym"),
];

/// Lowercased primary subtag of a BCP 47 tag (`en-US` -> `en`).
pub fn primary_subtag(tag: &str) -> String {
    tag.trim()
        .split(['-', '_'])
        .next()
        .unwrap_or_default()
        .to_lowercase()
}

/// Resolve a tag to its isolang entry.
fn lookup(tag: &str) -> Option<Language> {
    let code = primary_subtag(tag);
    match code.len() {
        2 => Language::from_639_1(&code),
        3 => {
            let terminology = BIBLIOGRAPHIC_CODES
                .iter()
                .find(|(b, _)| *b == code)
                .map(|(_, t)| *t)
                .unwrap_or(code.as_str());
            Language::from_639_3(terminology)
        }
        _ => None,
    }
}

/// Validate that a tag names a known language
pub fn validate_language_code(tag: &str) -> Result<()> {
    lookup(tag)
        .map(|_| ())
        .ok_or_else(|| anyhow!("Invalid language code: {}", tag))
}

/// Normalize a tag to its ISO 639-2/T (3-letter) code
pub fn normalize_to_part2t(tag: &str) -> Result<String> {
    lookup(tag)
        .map(|lang| lang.to_639_3().to_string())
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", tag))
}

/// Normalize a tag to ISO 639-1 when the language has one, 639-2/T otherwise.
///
/// Used for web translation APIs, which expect two-letter codes.
pub fn normalize_to_part1_or_part2t(tag: &str) -> Result<String> {
    let lang = lookup(tag).ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", tag))?;
    Ok(lang
        .to_639_1()
        .map(str::to_string)
        .unwrap_or_else(|| lang.to_639_3().to_string()))
}

/// Check if two tags name the same language, ignoring region and script
pub fn language_codes_match(first: &str, second: &str) -> bool {
    match (lookup(first), lookup(second)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Whether the tag is any English variant (`en`, `en-GB`, untagged `en-US`)
pub fn is_english(tag: &str) -> bool {
    primary_subtag(tag) == "en"
}

/// Exact tag comparison, case-insensitive as BCP 47 requires.
pub fn tags_equal(first: &str, second: &str) -> bool {
    first.trim().eq_ignore_ascii_case(second.trim())
}

/// Get the English language name from a tag
pub fn get_language_name(tag: &str) -> Result<String> {
    lookup(tag)
        .map(|lang| lang.to_name().to_string())
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", tag))
}

/// Human readable name for prompts. Never fails.
///
/// `none` becomes "unspecified language", unknown tags are returned verbatim.
pub fn display_name(tag: &str) -> String {
    if tag.trim().is_empty() || tags_equal(tag, UNSPECIFIED_LANGUAGE) {
        return "unspecified language".to_string();
    }
    get_language_name(tag).unwrap_or_else(|_| tag.to_string())
}
