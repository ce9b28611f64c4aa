//! Answer normalization.
//!
//! Readings are compared in a single canonical form: no whitespace anywhere,
//! and katakana folded onto hiragana. The same function builds the accepted
//! reading sets and normalizes player submissions.

/// First katakana codepoint that has a hiragana counterpart (ァ).
const KATAKANA_START: u32 = 0x30A1;
/// Last katakana codepoint that has a hiragana counterpart (ヶ).
const KATAKANA_END: u32 = 0x30F6;
/// Distance between a katakana codepoint and its hiragana counterpart.
const KATAKANA_TO_HIRAGANA_OFFSET: u32 = 0x60;

/// Normalize raw text into its comparable form.
///
/// Total: an empty (or all-whitespace) input yields an empty string, which
/// never matches a non-empty accepted reading.
pub fn normalize(text: &str) -> String {
    text.chars()
        .filter(|c| !c.is_whitespace())
        .map(fold_katakana)
        .collect()
}

fn fold_katakana(c: char) -> char {
    let code = c as u32;
    if (KATAKANA_START..=KATAKANA_END).contains(&code) {
        char::from_u32(code - KATAKANA_TO_HIRAGANA_OFFSET).unwrap_or(c)
    } else {
        c
    }
}

/// Split a space-separated reading list and normalize each entry, dropping
/// empties.
pub fn normalize_reading_list(readings: &[String]) -> Vec<String> {
    readings
        .iter()
        .flat_map(|r| r.split_whitespace())
        .map(normalize)
        .filter(|r| !r.is_empty())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_katakana_folds_to_hiragana() {
        assert_eq!(normalize("ヤマ"), "やま");
        assert_eq!(normalize("サン"), "さん");
    }

    #[test]
    fn test_hiragana_is_unchanged() {
        assert_eq!(normalize("やま"), "やま");
    }

    #[test]
    fn test_whitespace_removed_everywhere() {
        assert_eq!(normalize("  や ま  "), "やま");
        // Full-width (ideographic) space
        assert_eq!(normalize("\u{3000}サ\u{3000}ン\u{3000}"), "さん");
        assert_eq!(normalize("\tや\nま"), "やま");
    }

    #[test]
    fn test_range_boundaries() {
        assert_eq!(normalize("ァ"), "ぁ");
        assert_eq!(normalize("ヶ"), "ゖ");
        // Long vowel mark and middle dot are outside the folded range
        assert_eq!(normalize("ー"), "ー");
        assert_eq!(normalize("・"), "・");
    }

    #[test]
    fn test_empty_input() {
        assert_eq!(normalize(""), "");
        assert_eq!(normalize("   "), "");
    }

    #[test]
    fn test_ascii_passes_through() {
        assert_eq!(normalize(" yama "), "yama");
    }

    #[test]
    fn test_reading_list_splits_and_drops_empties() {
        let raw = vec!["サン ザン".to_string(), "".to_string(), "やま".to_string()];
        assert_eq!(normalize_reading_list(&raw), vec!["さん", "ざん", "やま"]);
    }
}
