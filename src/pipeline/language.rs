//! Natural-language detection for titles and descriptions.

use unicode_segmentation::UnicodeSegmentation;

use crate::models::Language;

/// Latin words needed before text counts as English.
const MIN_ENGLISH_WORDS: usize = 3;

fn is_cjk(c: char) -> bool {
    ('\u{4e00}'..='\u{9fa5}').contains(&c)
}

/// Detect whether a title/description pair is Chinese, English or both.
pub fn detect_language(title: &str, description: &str) -> Language {
    let text = format!("{title} {description}");

    let has_chinese = text.chars().any(is_cjk);
    let latin_words = text
        .unicode_words()
        .filter(|w| w.chars().any(|c| c.is_ascii_alphabetic()))
        .count();
    let has_english = latin_words > MIN_ENGLISH_WORDS;

    match (has_chinese, has_english) {
        (true, true) => Language::Mixed,
        (true, false) => Language::Zh,
        (false, true) => Language::En,
        (false, false) => Language::Unknown,
    }
}
