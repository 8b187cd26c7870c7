//! Founder record tokenization.

use lazy_static::lazy_static;
use regex::Regex;
use unicode_normalization::UnicodeNormalization;

lazy_static! {
    // Word runs, or runs of anything that is neither word nor space
    static ref WORDPUNCT: Regex = Regex::new(r"\w+|[^\w\s]+").unwrap();
}

/// Split a raw founder record into lowercase tokens.
///
/// Hanging dashes are stripped from every token; a bare dash becomes an
/// empty token rather than being dropped, so token positions are stable.
pub fn tokenize(record: &str) -> Vec<String> {
    let normalized = record.trim().nfc().collect::<String>().to_lowercase();
    WORDPUNCT
        .find_iter(&normalized)
        .map(|m| m.as_str().trim_matches('-').to_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_words_and_punctuation() {
        assert_eq!(
            tokenize("  Шевчук Анатолій, київська обл., буд. 33."),
            vec!["шевчук", "анатолій", ",", "київська", "обл", ".,", "буд", ".", "33", "."]
        );
    }

    #[test]
    fn test_tokenize_strips_hanging_dashes() {
        assert_eq!(tokenize("власник - Іван"), vec!["власник", "", "іван"]);
        assert_eq!(tokenize("(контролер)"), vec!["(", "контролер", ")"]);
    }

    #[test]
    fn test_tokenize_composes_combining_marks() {
        // "й" spelled as "и" + combining breve
        let decomposed = "Андрі\u{0438}\u{0306}";
        assert_eq!(tokenize(decomposed), vec!["андрій"]);
    }

    #[test]
    fn test_tokenize_empty() {
        assert!(tokenize("").is_empty());
        assert!(tokenize("   ").is_empty());
    }
}
