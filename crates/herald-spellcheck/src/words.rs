//! Word splitting and identifier detection

use regex::Regex;
use std::sync::LazyLock;

static NON_LETTERS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[^a-zA-Z]+").expect("Invalid regex"));

static PASCAL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^(?:[A-Z]{2,}.+|[A-Z][a-z]+[A-Z].*)$").expect("Invalid regex"));

static CAMEL_CASE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[a-z]+[A-Z]+.*$").expect("Invalid regex"));

static ALL_CAPS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[^a-z]+$").expect("Invalid regex"));

/// Split a phrase on every run of non-letters
///
/// The phrase itself is appended as the last element and empty pieces are
/// dropped, so `"serde_json"` yields `["serde", "json", "serde_json"]`.
pub fn split_out_words(phrase: &str) -> Vec<String> {
    NON_LETTERS
        .split(phrase)
        .chain(std::iter::once(phrase))
        .filter(|w| !w.is_empty())
        .map(str::to_string)
        .collect()
}

/// `HTTPServer`, `JsonValue`
pub(crate) fn is_pascal_case(word: &str) -> bool {
    PASCAL_CASE.is_match(word)
}

/// `parseArgs`
pub(crate) fn is_camel_case(word: &str) -> bool {
    CAMEL_CASE.is_match(word)
}

/// `README`, `V2`
pub(crate) fn is_all_caps(word: &str) -> bool {
    ALL_CAPS.is_match(word)
}

/// Whether a word looks like an identifier rather than prose
pub(crate) fn is_identifier(word: &str) -> bool {
    is_all_caps(word) || is_camel_case(word) || is_pascal_case(word)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_split_out_words() {
        assert_eq!(
            split_out_words("serde_json"),
            vec!["serde", "json", "serde_json"]
        );
        assert_eq!(split_out_words("plain"), vec!["plain", "plain"]);
        assert!(split_out_words("").is_empty());
        assert_eq!(split_out_words("--"), vec!["--"]);
    }

    #[test]
    fn test_identifier_shapes() {
        assert!(is_pascal_case("HTTPServer"));
        assert!(is_pascal_case("JsonValue"));
        assert!(!is_pascal_case("Hello"));

        assert!(is_camel_case("parseArgs"));
        assert!(!is_camel_case("parse"));

        assert!(is_all_caps("README"));
        assert!(is_all_caps("V2"));
        assert!(!is_all_caps("Readme"));
        assert!(!is_all_caps("v2"));

        assert!(!is_identifier("teh"));
        assert!(!is_identifier("Teh"));
    }
}
