/*!
 * Tests for language tag utility functions
 */

use anyhow::Result;
use skos_translator::language_utils::{
    display_name, get_language_name, language_codes_match, normalize_to_part1_or_part2t, normalize_to_part2t,
    is_english, tags_equal, validate_language_code,
};

/// Test validation of language tags
#[test]
fn test_validate_language_code_withValidTags_shouldSucceed() {
    assert!(validate_language_code("en").is_ok());
    assert!(validate_language_code("de-AT").is_ok());
    assert!(validate_language_code("pt_BR").is_ok());
    assert!(validate_language_code("deu").is_ok());
    assert!(validate_language_code("ger").is_ok());
    assert!(validate_language_code(" FR ").is_ok());

    assert!(validate_language_code("xyz").is_err());
    assert!(validate_language_code("e").is_err());
    assert!(validate_language_code("").is_err());
}

/// Test normalization to the codes the web services expect
#[test]
fn test_normalize_withRegionalTags_shouldUsePrimarySubtag() -> Result<()> {
    assert_eq!(normalize_to_part2t("en-GB")?, "eng");
    assert_eq!(normalize_to_part2t("fre")?, "fra");
    assert_eq!(normalize_to_part1_or_part2t("de-CH")?, "de");
    assert_eq!(normalize_to_part1_or_part2t("deu")?, "de");
    assert!(normalize_to_part1_or_part2t("none").is_err());
    Ok(())
}

/// Test tag comparison
#[test]
fn test_tagComparison_shouldDistinguishExactAndLanguageMatches() {
    assert!(tags_equal("en-US", "en-us"));
    assert!(!tags_equal("en-US", "en"));

    assert!(language_codes_match("en-US", "en"));
    assert!(language_codes_match("ger", "de"));
    assert!(!language_codes_match("de", "fr"));
    assert!(!language_codes_match("none", "none"));
}

/// Test names used in prompts
#[test]
fn test_languageNames_shouldBeEnglishNames() -> Result<()> {
    assert_eq!(get_language_name("fr")?, "French");
    assert_eq!(get_language_name("es-MX")?, "Spanish");
    assert!(get_language_name("zz").is_err());
    assert_eq!(display_name("zz"), "zz");
    assert_eq!(display_name(""), "unspecified language");
    Ok(())
}

/// Test English detection across regional variants
#[test]
fn test_is_english_withRegionalVariants_shouldMatchPrimarySubtag() {
    assert!(is_english("en"));
    assert!(is_english("en-GB"));
    assert!(is_english("EN-us"));
    assert!(!is_english("eng-x"));
    assert!(!is_english("de"));
}
