//! Configuration types

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::PathBuf;

/// Main configuration for Herald
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Version of the config schema
    #[serde(rename = "$schema", skip_serializing_if = "Option::is_none")]
    pub schema: Option<String>,

    /// Git configuration
    pub git: GitConfig,

    /// Changelog configuration
    pub changelog: ChangelogConfig,

    /// Commit parser configuration
    pub parser: ParserConfig,

    /// Commit message spellcheck configuration
    pub spellcheck: SpellcheckConfig,
}

/// Git configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct GitConfig {
    /// Remote used to derive repository links
    pub remote: String,
}

impl Default for GitConfig {
    fn default() -> Self {
        Self {
            remote: "origin".to_string(),
        }
    }
}

/// Changelog configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ChangelogConfig {
    /// Changelog file path
    pub file: PathBuf,

    /// Title written at the top of the changelog file
    pub title: String,

    /// Types whose reverts still show up in the changelog
    pub visible_revert_types: Vec<String>,

    /// Subject substrings that exclude a commit from the changelog
    pub skip_markers: Vec<String>,

    /// Custom commit types and the section label they render under
    pub custom_types: BTreeMap<String, String>,

    /// Repository URL override (otherwise derived from the git remote)
    pub repository_url: Option<String>,
}

impl Default for ChangelogConfig {
    fn default() -> Self {
        let mut custom_types = BTreeMap::new();
        custom_types.insert("build".to_string(), "Build System".to_string());

        Self {
            file: PathBuf::from("CHANGELOG.md"),
            title: DEFAULT_CHANGELOG_TITLE.to_string(),
            visible_revert_types: ["feat", "fix", "perf", "build"]
                .iter()
                .map(|t| t.to_string())
                .collect(),
            skip_markers: ["[skip ci]", "[ci skip]", "[skip github]", "[github skip]"]
                .iter()
                .map(|m| m.to_string())
                .collect(),
            custom_types,
            repository_url: None,
        }
    }
}

/// Default changelog title
pub const DEFAULT_CHANGELOG_TITLE: &str = "# Changelog\n\n\
All notable changes to this project will be documented in this file.\n\n\
The format is based on [Conventional Commits](https://conventionalcommits.org),\n\
and this project adheres to [Semantic Versioning](https://semver.org).";

/// Commit parser configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct ParserConfig {
    /// Pattern identifying merge commit headers
    pub merge_pattern: String,

    /// Names assigned to the merge pattern's capture groups, in order
    pub merge_correspondence: Vec<String>,

    /// Footer keywords that start a breaking-change note
    pub note_keywords: Vec<String>,

    /// Footer verbs that turn an issue mention into an action reference
    pub reference_actions: Vec<String>,

    /// Prefixes marking an issue number
    pub issue_prefixes: Vec<String>,
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            merge_pattern: r"^Merge pull request #(\d+) from (.*)$".to_string(),
            merge_correspondence: vec!["id".to_string(), "source".to_string()],
            note_keywords: ["BREAKING CHANGE", "BREAKING CHANGES", "BREAKING"]
                .iter()
                .map(|k| k.to_string())
                .collect(),
            reference_actions: [
                "close", "closes", "closed", "fix", "fixes", "fixed", "resolve", "resolves",
                "resolved",
            ]
            .iter()
            .map(|a| a.to_string())
            .collect(),
            issue_prefixes: vec!["#".to_string()],
        }
    }
}

/// Commit message spellcheck configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpellcheckConfig {
    /// Newline-separated word list used as the dictionary
    pub dictionary: PathBuf,

    /// Project-local ignore list (one word per line)
    pub ignore_file: PathBuf,

    /// Maximum number of typos listed in the warning
    pub max_typos: usize,

    /// Maximum number of suggestions listed per typo
    pub max_suggestions: usize,
}

impl Default for SpellcheckConfig {
    fn default() -> Self {
        Self {
            dictionary: PathBuf::from("/usr/share/dict/words"),
            ignore_file: PathBuf::from(".spellcheckignore"),
            max_typos: 5,
            max_suggestions: 5,
        }
    }
}
