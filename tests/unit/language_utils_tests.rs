/*!
 * Tests for ISO language code utilities
 */

use pdftwai::language_utils::{self, LanguageCodeType};

/// Two and three letter codes resolve to English names
#[test]
fn test_get_language_name_withValidCodes_shouldReturnEnglishName() {
    assert_eq!(language_utils::get_language_name("es").unwrap(), "Spanish");
    assert_eq!(language_utils::get_language_name("deu").unwrap(), "German");
    assert_eq!(language_utils::get_language_name("pt-BR").unwrap(), "Portuguese");
}

/// Unknown codes are rejected by the strict lookups
#[test]
fn test_get_language_name_withInvalidCode_shouldFail() {
    assert!(language_utils::get_language_name("zz").is_err());
    assert!(language_utils::validate_language_code("english").is_err());
}

/// Prompts fall back to the raw code when it cannot be resolved
#[test]
fn test_display_name_withUnknownCode_shouldPassThrough() {
    assert_eq!(language_utils::display_name("fr"), "French");
    assert_eq!(language_utils::display_name(" xyzzy "), "xyzzy");
}

/// Validation reports which ISO part the code belongs to
#[test]
fn test_validate_language_code_shouldDistinguishParts() {
    assert_eq!(language_utils::validate_language_code("it").unwrap(), LanguageCodeType::Part1);
    assert_eq!(language_utils::validate_language_code("ita").unwrap(), LanguageCodeType::Part3);
}

/// Web codes keep the region subtag in canonical case
#[test]
fn test_to_web_code_withRegion_shouldNormalizeCase() {
    assert_eq!(language_utils::to_web_code("PT_br").unwrap(), "pt-BR");
    assert_eq!(language_utils::to_web_code("spa").unwrap(), "es");
    assert!(language_utils::to_web_code("??").is_err());
}
