use anyhow::{Result, anyhow};
use isolang::Language;

/// Language utilities for ISO language code handling
///
/// Target languages are given as ISO 639-1 (2-letter) or ISO 639-3 (3-letter)
/// codes, optionally with a region subtag (`pt-BR`, `zh-CN`). The web translator
/// wants the short form, the language-model prompts want an English name.
/// Language code type
#[derive(Debug, PartialEq, Eq)]
pub enum LanguageCodeType {
    /// ISO 639-1 (2-letter) code
    Part1,
    /// ISO 639-3 (3-letter) code
    Part3,
}

/// Whether the code asks for automatic source detection
pub fn is_auto(code: &str) -> bool {
    let code = code.trim();
    code.is_empty() || code.eq_ignore_ascii_case("auto")
}

/// Split `pt-BR` / `zh_CN` into the primary subtag and the optional region
fn split_region(code: &str) -> (String, Option<String>) {
    let code = code.trim();
    match code.split_once(['-', '_']) {
        Some((primary, region)) if !region.is_empty() => {
            (primary.to_lowercase(), Some(region.to_uppercase()))
        }
        _ => (code.to_lowercase(), None),
    }
}

fn lookup(primary: &str) -> Option<Language> {
    match primary.len() {
        2 => Language::from_639_1(primary),
        3 => Language::from_639_3(primary),
        _ => None,
    }
}

/// Validate if a language code is a valid ISO 639-1 or ISO 639-3 code
pub fn validate_language_code(code: &str) -> Result<LanguageCodeType> {
    let (primary, _) = split_region(code);

    match lookup(&primary) {
        Some(_) if primary.len() == 2 => Ok(LanguageCodeType::Part1),
        Some(_) => Ok(LanguageCodeType::Part3),
        None => Err(anyhow!("Invalid language code: {}", code)),
    }
}

/// Normalize a language code to the short form the web translator accepts
///
/// Falls back to ISO 639-3 when the language has no 2-letter code. The region
/// subtag is kept (`zh-CN`).
pub fn to_web_code(code: &str) -> Result<String> {
    let (primary, region) = split_region(code);
    let lang = lookup(&primary)
        .ok_or_else(|| anyhow!("Cannot normalize invalid language code: {}", code))?;

    let base = lang.to_639_1()
        .map(|c| c.to_string())
        .unwrap_or_else(|| lang.to_639_3().to_string());

    Ok(match region {
        Some(region) => format!("{}-{}", base, region),
        None => base,
    })
}

/// Get the English language name from a code
pub fn get_language_name(code: &str) -> Result<String> {
    let (primary, _) = split_region(code);
    let lang = lookup(&primary)
        .ok_or_else(|| anyhow!("Failed to get language from code: {}", code))?;

    Ok(lang.to_name().to_string())
}

/// Name for use in prompts; unknown codes are passed through verbatim
pub fn display_name(code: &str) -> String {
    get_language_name(code).unwrap_or_else(|_| code.trim().to_string())
}
