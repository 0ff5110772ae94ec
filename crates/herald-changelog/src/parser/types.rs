//! Parser configuration types

use regex::Regex;

use herald_core::config::ParserConfig;
use herald_core::error::ChangelogError;

/// Compiled parser options
#[derive(Debug, Clone)]
pub struct ParserOptions {
    /// Merge header pattern
    pub merge_pattern: Regex,
    /// Names for the merge pattern's capture groups
    pub merge_correspondence: Vec<String>,
    /// Matches a line opening a breaking-change note
    pub note_pattern: Regex,
    /// Matches an action reference such as `Closes #12`
    pub action_pattern: Regex,
    /// Matches a bare issue reference such as `#12`
    pub issue_pattern: Regex,
}

impl ParserOptions {
    /// Compile options from configuration
    pub fn from_config(config: &ParserConfig) -> Result<Self, ChangelogError> {
        let compile = |field: &str, pattern: &str| {
            Regex::new(pattern).map_err(|source| ChangelogError::InvalidPattern {
                field: field.to_string(),
                source,
            })
        };

        let keywords = alternation(&config.note_keywords);
        let actions = alternation(&config.reference_actions);
        let prefixes = alternation(&config.issue_prefixes);
        let issue = format!(r"(?:(?P<owner>[\w.-]+)/(?P<repository>[\w.-]+))?(?P<prefix>{prefixes})(?P<issue>\d+)");

        Ok(Self {
            merge_pattern: compile("parser.merge_pattern", &config.merge_pattern)?,
            merge_correspondence: config.merge_correspondence.clone(),
            note_pattern: compile(
                "parser.note_keywords",
                &format!(r"^[\s*]*(?P<title>{keywords})[:\s]+(?P<text>.*)$"),
            )?,
            action_pattern: compile(
                "parser.reference_actions",
                &format!(r"(?i)\b(?P<action>{actions})\s+{issue}"),
            )?,
            issue_pattern: compile("parser.issue_prefixes", &issue)?,
        })
    }
}

impl Default for ParserOptions {
    fn default() -> Self {
        // The built-in configuration only contains literal words
        Self::from_config(&ParserConfig::default()).expect("default parser patterns compile")
    }
}

/// Escaped `a|b|c` alternation
fn alternation(words: &[String]) -> String {
    words
        .iter()
        .map(|w| regex::escape(w))
        .collect::<Vec<_>>()
        .join("|")
}
