//! Chinese span extraction.
//!
//! A span is a maximal run of characters in the CJK Unified Ideographs block
//! U+4E00..=U+9FA5. Punctuation such as `，` or `。` is outside that range and
//! therefore splits spans.

use regex::Regex;
use std::sync::LazyLock;

#[allow(clippy::unwrap_used)]
static CHINESE_RUN: LazyLock<Regex> =
    // unwrap is safe: pattern is a compile-time constant
    LazyLock::new(|| Regex::new(r"[\x{4E00}-\x{9FA5}]+").unwrap());

/// Returns every maximal run of Chinese ideographs in `text`, left to right.
///
/// An empty result means there is nothing to translate.
pub fn find_chinese_spans(text: &str) -> Vec<&str> {
    CHINESE_RUN.find_iter(text).map(|m| m.as_str()).collect()
}
