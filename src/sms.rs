//! URL extraction from text-message bodies.
//!
//! The message store itself is an external collaborator; this module only
//! consumes an ordered sequence of message body strings and pulls out every
//! URL-shaped substring. No scoring happens here — each extracted URL is a
//! candidate for the analysis pipeline.

use regex::Regex;
use std::sync::LazyLock;

/// URL-shaped tokens: scheme-prefixed or bare `www.` forms.
const LINK_PATTERN: &str = r#"(?i)\b(?:https?://|www\.)[^\s<>"']+"#;

/// Trailing sentence punctuation that is part of the message, not the URL.
const TRAILING_PUNCTUATION: &[char] = &['.', ',', ';', ':', '!', '?', ')'];

static LINK_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(LINK_PATTERN).unwrap_or_else(|e| {
        log::error!("Failed to compile link pattern: {e}");
        Regex::new("$^").expect("fallback pattern is valid")
    })
});

/// Extracts every URL-shaped substring from a sequence of message bodies.
///
/// Order-preserving across and within bodies; duplicates are kept, since the
/// caller decides which candidates to submit for analysis. Trailing sentence
/// punctuation is stripped from each match.
pub fn extract_links<'a, I>(bodies: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    bodies
        .into_iter()
        .flat_map(|body| {
            LINK_RE
                .find_iter(body)
                .map(|m| m.as_str().trim_end_matches(TRAILING_PUNCTUATION).to_string())
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extracts_single_link_from_message() {
        let links = extract_links(["Check this out http://bit.ly/abc123 now"]);
        assert_eq!(links, vec!["http://bit.ly/abc123"]);
    }

    #[test]
    fn test_preserves_order_and_duplicates() {
        let links = extract_links([
            "first https://a.example.com then https://b.example.com",
            "again https://a.example.com",
        ]);
        assert_eq!(
            links,
            vec![
                "https://a.example.com",
                "https://b.example.com",
                "https://a.example.com"
            ]
        );
    }

    #[test]
    fn test_strips_trailing_punctuation() {
        let links = extract_links(["Visit https://example.com/offer, it expires today!"]);
        assert_eq!(links, vec!["https://example.com/offer"]);
    }

    #[test]
    fn test_matches_www_prefixed_links() {
        let links = extract_links(["go to www.example.com for details"]);
        assert_eq!(links, vec!["www.example.com"]);
    }

    #[test]
    fn test_no_links_yields_empty_sequence() {
        let links = extract_links(["plain text message", "another one"]);
        assert!(links.is_empty());
    }
}
