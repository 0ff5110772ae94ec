//! Typo warning report

use std::fmt;

use crate::dictionary::Dictionary;

const HEADLINE: &str = "WARNING: there may be misspelled words in your commit message!";
const HINT: &str = "Commit messages can be fixed before push with `git commit -S --amend`";
const RULE: &str = "---";

/// Typos with their suggestions, ready to print
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TypoReport {
    shown: Vec<(String, Vec<String>)>,
    total: usize,
}

impl TypoReport {
    /// Build a report listing at most `max_typos` typos with `max_suggestions` each
    pub fn new(
        typos: &[String],
        dictionary: &dyn Dictionary,
        max_typos: usize,
        max_suggestions: usize,
    ) -> Self {
        let shown = typos
            .iter()
            .take(max_typos)
            .map(|typo| {
                let mut suggestions = dictionary.suggestions(typo);
                suggestions.truncate(max_suggestions);
                (typo.clone(), suggestions)
            })
            .collect();

        Self {
            shown,
            total: typos.len(),
        }
    }

    /// Check if there is nothing to report
    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Total number of typos found
    pub fn total(&self) -> usize {
        self.total
    }

    /// Report lines; empty when there are no typos
    pub fn lines(&self) -> Vec<String> {
        if self.is_empty() {
            return Vec::new();
        }

        let mut lines = vec![HEADLINE.to_string(), HINT.to_string(), RULE.to_string()];
        for (typo, suggestions) in &self.shown {
            if suggestions.is_empty() {
                lines.push(typo.clone());
            } else {
                lines.push(format!("{} (did you mean {}?)", typo, suggestions.join(", ")));
            }
        }

        let hidden = self.total - self.shown.len();
        if hidden > 0 {
            lines.push(format!("{} more...", hidden));
        }
        lines.push(RULE.to_string());
        lines
    }
}

impl fmt::Display for TypoReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for line in self.lines() {
            writeln!(f, "{}", line)?;
        }
        Ok(())
    }
}
