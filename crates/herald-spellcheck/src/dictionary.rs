//! Dictionaries used to find misspelled words

use std::collections::HashSet;
use std::ops::Range;
use std::path::Path;

use regex::Regex;
use std::sync::LazyLock;
use tracing::{debug, instrument};

use crate::Result;
use herald_core::error::SpellcheckError;

/// Largest edit distance a suggestion may have
const MAX_SUGGESTION_DISTANCE: usize = 2;

static WORD_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"[A-Za-z]+(?:'[A-Za-z]+)*").expect("Invalid regex"));

/// Source of spelling decisions
pub trait Dictionary: Send + Sync {
    /// Byte ranges of `text` that are misspelled
    fn misspellings(&self, text: &str) -> Vec<Range<usize>>;

    /// Likely corrections for a misspelled word, best first
    fn suggestions(&self, word: &str) -> Vec<String>;
}

/// Dictionary backed by a newline-separated word list
#[derive(Debug, Clone, Default)]
pub struct WordList {
    words: Vec<String>,
    index: HashSet<String>,
}

impl WordList {
    /// Load a word list such as `/usr/share/dict/words`
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|e| match e.kind() {
            std::io::ErrorKind::NotFound => SpellcheckError::DictionaryNotFound(path.to_path_buf()),
            _ => SpellcheckError::Io(e),
        })?;

        let list = Self::from_words(content.lines());
        if list.is_empty() {
            return Err(SpellcheckError::EmptyDictionary(path.to_path_buf()));
        }

        debug!(word_count = list.len(), "loaded word list");
        Ok(list)
    }

    /// Build a word list from words
    pub fn from_words<I, S>(words: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut list = Self::default();
        for word in words {
            let word = word.as_ref().trim().to_lowercase();
            if !word.is_empty() && list.index.insert(word.clone()) {
                list.words.push(word);
            }
        }
        list
    }

    /// Number of distinct words
    pub fn len(&self) -> usize {
        self.words.len()
    }

    /// Check if the list has no words
    pub fn is_empty(&self) -> bool {
        self.words.is_empty()
    }

    /// Check a single word, ignoring case
    pub fn contains(&self, word: &str) -> bool {
        self.index.contains(&word.to_lowercase())
    }
}

impl Dictionary for WordList {
    fn misspellings(&self, text: &str) -> Vec<Range<usize>> {
        WORD_REGEX
            .find_iter(text)
            .filter(|m| !self.contains(m.as_str()))
            .map(|m| m.range())
            .collect()
    }

    fn suggestions(&self, word: &str) -> Vec<String> {
        let word = word.to_lowercase();
        let mut scored: Vec<(usize, &String)> = self
            .words
            .iter()
            .filter(|candidate| candidate.len().abs_diff(word.len()) <= MAX_SUGGESTION_DISTANCE)
            .filter_map(|candidate| {
                let distance = edit_distance(&word, candidate);
                (distance > 0 && distance <= MAX_SUGGESTION_DISTANCE).then_some((distance, candidate))
            })
            .collect();

        scored.sort();
        scored.into_iter().map(|(_, w)| w.clone()).collect()
    }
}

/// Levenshtein distance
fn edit_distance(a: &str, b: &str) -> usize {
    let b: Vec<char> = b.chars().collect();
    let mut previous: Vec<usize> = (0..=b.len()).collect();
    let mut current = vec![0; b.len() + 1];

    for (i, ca) in a.chars().enumerate() {
        current[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let substitution = previous[j] + usize::from(ca != *cb);
            current[j + 1] = substitution.min(previous[j + 1] + 1).min(current[j] + 1);
        }
        std::mem::swap(&mut previous, &mut current);
    }

    previous[b.len()]
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn words() -> WordList {
        WordList::from_words(["the", "then", "quick", "brown", "fox", "don't", "ten"])
    }

    #[test]
    fn test_misspellings() {
        let text = "teh quick brwn fox";
        let ranges = words().misspellings(text);
        let found: Vec<_> = ranges.into_iter().map(|r| &text[r]).collect();
        assert_eq!(found, vec!["teh", "brwn"]);
    }

    #[test]
    fn test_contractions_are_one_word() {
        let list = words();
        assert_eq!(list.misspellings("Don't stop").len(), 1);
        assert!(list.misspellings("Don't").is_empty());
    }

    #[test]
    fn test_suggestions_ordered_by_distance() {
        let suggestions = words().suggestions("teh");
        assert_eq!(suggestions, vec!["ten", "the", "then"]);
        assert!(words().suggestions("zzzzzzzz").is_empty());
        assert!(!words().suggestions("the").contains(&"the".to_string()));
    }

    #[test]
    fn test_edit_distance() {
        assert_eq!(edit_distance("kitten", "sitting"), 3);
        assert_eq!(edit_distance("", "abc"), 3);
        assert_eq!(edit_distance("same", "same"), 0);
    }

    #[test]
    fn test_load_word_list() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "Alpha\nbeta\n\nbeta").unwrap();

        let list = WordList::load(file.path()).unwrap();
        assert_eq!(list.len(), 2);
        assert!(list.contains("ALPHA"));
    }

    #[test]
    fn test_load_missing_or_empty() {
        let err = WordList::load(Path::new("/nonexistent/words")).unwrap_err();
        assert!(matches!(err, SpellcheckError::DictionaryNotFound(_)));

        let file = NamedTempFile::new().unwrap();
        let err = WordList::load(file.path()).unwrap_err();
        assert!(matches!(err, SpellcheckError::EmptyDictionary(_)));
    }
}
