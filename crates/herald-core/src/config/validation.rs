//! Configuration validation

use regex::Regex;
use tracing::debug;

use crate::error::{ConfigError, Result};

use super::types::Config;

/// Merge capture names the parser knows how to fill
const MERGE_FIELDS: [&str; 2] = ["id", "source"];

/// Validate configuration
pub fn validate_config(config: &Config) -> Result<()> {
    debug!("validating configuration");
    validate_git(config)?;
    validate_changelog(config)?;
    validate_parser(config)?;
    validate_spellcheck(config)?;
    debug!("configuration validation passed");
    Ok(())
}

fn invalid(field: impl Into<String>, message: impl Into<String>) -> ConfigError {
    ConfigError::InvalidValue {
        field: field.into(),
        message: message.into(),
    }
}

fn validate_git(config: &Config) -> Result<()> {
    if config.git.remote.is_empty() {
        return Err(invalid("git.remote", "remote cannot be empty").into());
    }

    Ok(())
}

fn validate_changelog(config: &Config) -> Result<()> {
    let changelog = &config.changelog;

    if changelog.file.as_os_str().is_empty() {
        return Err(invalid("changelog.file", "file cannot be empty").into());
    }

    if let Some(i) = changelog
        .visible_revert_types
        .iter()
        .position(|t| t.is_empty() || !t.chars().all(|c| c.is_ascii_alphanumeric()))
    {
        return Err(invalid(
            format!("changelog.visible_revert_types[{}]", i),
            "types must be non-empty alphanumeric words",
        )
        .into());
    }

    if changelog.skip_markers.iter().any(String::is_empty) {
        return Err(invalid("changelog.skip_markers", "markers cannot be empty").into());
    }

    for (name, label) in &changelog.custom_types {
        if label.trim().is_empty() {
            return Err(invalid(
                format!("changelog.custom_types.{}", name),
                "label cannot be empty",
            )
            .into());
        }
    }

    Ok(())
}

fn validate_parser(config: &Config) -> Result<()> {
    let parser = &config.parser;

    let pattern = Regex::new(&parser.merge_pattern)
        .map_err(|e| invalid("parser.merge_pattern", e.to_string()))?;

    let groups = pattern.captures_len() - 1;
    if parser.merge_correspondence.len() > groups {
        return Err(invalid(
            "parser.merge_correspondence",
            format!(
                "{} names given but merge_pattern has {} groups",
                parser.merge_correspondence.len(),
                groups
            ),
        )
        .into());
    }

    if let Some(unknown) = parser
        .merge_correspondence
        .iter()
        .find(|name| !MERGE_FIELDS.contains(&name.as_str()))
    {
        return Err(invalid(
            "parser.merge_correspondence",
            format!("unknown field '{}', must be one of: {}", unknown, MERGE_FIELDS.join(", ")),
        )
        .into());
    }

    if parser.note_keywords.is_empty() || parser.note_keywords.iter().any(String::is_empty) {
        return Err(invalid("parser.note_keywords", "at least one non-empty keyword required").into());
    }

    if parser.issue_prefixes.iter().any(String::is_empty) {
        return Err(invalid("parser.issue_prefixes", "prefixes cannot be empty").into());
    }

    Ok(())
}

fn validate_spellcheck(config: &Config) -> Result<()> {
    if config.spellcheck.max_typos == 0 {
        return Err(invalid("spellcheck.max_typos", "must be at least 1").into());
    }

    Ok(())
}
