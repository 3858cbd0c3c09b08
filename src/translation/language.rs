//! Language code validation and supported languages.

use crate::error::ConfigError;
use crate::ui::Style;

/// Code for automatic source-language detection. Valid only as `from`.
pub const AUTO_DETECT: &str = "auto";

/// Language codes accepted by the Baidu translation API and their names.
pub const SUPPORTED_LANGUAGES: &[(&str, &str)] = &[
    ("zh", "Chinese (Simplified)"),
    ("cht", "Chinese (Traditional)"),
    ("yue", "Cantonese"),
    ("wyw", "Classical Chinese"),
    ("en", "English"),
    ("jp", "Japanese"),
    ("kor", "Korean"),
    ("fra", "French"),
    ("spa", "Spanish"),
    ("th", "Thai"),
    ("ara", "Arabic"),
    ("ru", "Russian"),
    ("pt", "Portuguese"),
    ("de", "German"),
    ("it", "Italian"),
    ("el", "Greek"),
    ("nl", "Dutch"),
    ("pl", "Polish"),
    ("bul", "Bulgarian"),
    ("est", "Estonian"),
    ("dan", "Danish"),
    ("fin", "Finnish"),
    ("cs", "Czech"),
    ("rom", "Romanian"),
    ("slo", "Slovenian"),
    ("swe", "Swedish"),
    ("hu", "Hungarian"),
    ("vie", "Vietnamese"),
];

/// Prints all supported language codes to stdout.
pub fn print_languages() {
    println!("{}", Style::header("Supported language codes"));
    println!(
        "  {:5} {}",
        Style::code(AUTO_DETECT),
        Style::secondary("Auto-detect (source only)")
    );
    for (code, name) in SUPPORTED_LANGUAGES {
        println!("  {:5} {}", Style::code(code), Style::secondary(name));
    }
}

fn is_supported(lang: &str) -> bool {
    SUPPORTED_LANGUAGES.iter().any(|(code, _)| *code == lang)
}

/// Validates a source language code. `auto` is accepted.
pub fn validate_source_language(lang: &str) -> Result<(), ConfigError> {
    if lang == AUTO_DETECT || is_supported(lang) {
        Ok(())
    } else {
        Err(ConfigError::InvalidLanguage(lang.to_string()))
    }
}

/// Validates a target language code. `auto` is rejected.
pub fn validate_target_language(lang: &str) -> Result<(), ConfigError> {
    if is_supported(lang) {
        Ok(())
    } else {
        Err(ConfigError::InvalidLanguage(lang.to_string()))
    }
}
