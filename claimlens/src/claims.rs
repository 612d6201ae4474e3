/// Maximum length of a search query derived from a headline.
const MAX_QUERY_CHARS: usize = 25;

/// Reduce a headline to a short query string for the secondary search.
///
/// Returns the first 25 characters of `text`, or `text` unchanged when it is
/// already short enough. No word-boundary awareness: truncation may split
/// mid-word. Counted in characters so multibyte input cannot split a UTF-8
/// sequence.
pub fn extract_claim(text: &str) -> String {
    if text.chars().count() > MAX_QUERY_CHARS {
        text.chars().take(MAX_QUERY_CHARS).collect()
    } else {
        text.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_text_is_unchanged() {
        assert_eq!(extract_claim(""), "");
        assert_eq!(extract_claim("Short headline"), "Short headline");
        // Exactly at the limit
        let exact = "a".repeat(25);
        assert_eq!(extract_claim(&exact), exact);
    }

    #[test]
    fn long_text_is_truncated_to_25_chars() {
        let headline = "Court filing reveals new testimony today";
        assert_eq!(headline.chars().count(), 40);

        let query = extract_claim(headline);
        assert_eq!(query.chars().count(), 25);
        // Mid-word truncation is expected behavior, not a bug
        assert_eq!(query, "Court filing reveals new ");
    }

    #[test]
    fn truncation_counts_characters_not_bytes() {
        let headline = "Überraschende Wende im Prozess um den Konzern";
        let query = extract_claim(headline);
        assert_eq!(query.chars().count(), 25);
        assert!(headline.starts_with(&query));
    }
}
