/*!
 * Tests for language code utilities
 */

use vidsum::language_utils::{SummaryLanguage, get_language_name, language_codes_match, normalize_to_part2t};

/// Test normalizing the three code flavours
#[test]
fn test_normalize_to_part2t_withVariousCodes_shouldReturnPart2t() {
    assert_eq!(normalize_to_part2t("en").unwrap(), "eng");
    assert_eq!(normalize_to_part2t("DE").unwrap(), "deu");
    assert_eq!(normalize_to_part2t("fra").unwrap(), "fra");
    assert_eq!(normalize_to_part2t("ger").unwrap(), "deu");
    assert!(normalize_to_part2t("xx").is_err());
    assert!(normalize_to_part2t("english").is_err());
}

/// Test matching across code flavours
#[test]
fn test_language_codes_match_withEquivalentCodes_shouldMatch() {
    assert!(language_codes_match("fr", "fre"));
    assert!(language_codes_match("nl", "dut"));
    assert!(!language_codes_match("en", "de"));
    assert!(!language_codes_match("zz", "zz"));
}

/// Test English names
#[test]
fn test_get_language_name_withCode_shouldReturnName() {
    assert_eq!(get_language_name("de").unwrap(), "German");
    assert_eq!(get_language_name("spa").unwrap(), "Spanish");
}

/// Test resolving configuration spellings
#[test]
fn test_summary_language_resolve_withNamesAndCodes_shouldResolve() {
    assert_eq!(SummaryLanguage::resolve("english").unwrap(), SummaryLanguage::English);
    assert_eq!(SummaryLanguage::resolve(" German ").unwrap(), SummaryLanguage::German);
    assert_eq!(SummaryLanguage::resolve("en").unwrap(), SummaryLanguage::English);
    assert_eq!(SummaryLanguage::resolve("ger").unwrap(), SummaryLanguage::German);
    assert_eq!(SummaryLanguage::resolve("pt").unwrap(), SummaryLanguage::Portuguese);
    assert_eq!("fr".parse::<SummaryLanguage>().unwrap(), SummaryLanguage::French);
}

/// Test languages without a stemmer
#[test]
fn test_summary_language_resolve_withUnsupportedLanguage_shouldFail() {
    let err = SummaryLanguage::resolve("ja").unwrap_err();
    assert!(err.to_string().contains("Japanese"));
    assert!(SummaryLanguage::resolve("klingonese").is_err());
}

/// Test name and code tables stay consistent
#[test]
fn test_summary_language_all_shouldRoundTripThroughResolve() {
    for language in SummaryLanguage::ALL {
        assert_eq!(SummaryLanguage::resolve(language.name()).unwrap(), language);
        assert_eq!(language.to_string(), language.name());
        assert_eq!(language.iso_code().len(), 3);
    }
}
