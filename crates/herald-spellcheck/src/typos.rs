//! Typo detection

use tracing::debug;

use crate::dictionary::Dictionary;
use crate::ignore::IgnoreWords;
use crate::words::is_identifier;

/// Find likely typos in a commit message
///
/// Each misspelled range is trimmed and split on apostrophes. Identifiers
/// (camelCase, PascalCase, ALL CAPS) are dropped, the rest lower-cased and
/// checked against `ignore`. Typos are returned once each, in message order.
pub fn find_typos(message: &str, dictionary: &dyn Dictionary, ignore: &IgnoreWords) -> Vec<String> {
    let mut typos: Vec<String> = Vec::new();

    for range in dictionary.misspellings(message) {
        let Some(slice) = message.get(range) else {
            continue;
        };

        for word in slice.trim().split('\'') {
            if word.is_empty() || is_identifier(word) {
                continue;
            }
            let word = word.to_lowercase();
            if !ignore.contains(&word) && !typos.contains(&word) {
                typos.push(word);
            }
        }
    }

    debug!(typo_count = typos.len(), "spellchecked message");
    typos
}
