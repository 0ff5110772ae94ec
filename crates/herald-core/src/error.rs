//! Error types for Herald

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using HeraldError
pub type Result<T> = std::result::Result<T, HeraldError>;

/// Main error type for Herald operations
#[derive(Debug, Error)]
pub enum HeraldError {
    /// Configuration-related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Git-related errors
    #[error(transparent)]
    Git(#[from] GitError),

    /// Changelog-related errors
    #[error(transparent)]
    Changelog(#[from] ChangelogError),

    /// Spellcheck-related errors
    #[error(transparent)]
    Spellcheck(#[from] SpellcheckError),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Configuration file not found
    #[error("Configuration file not found at {0}")]
    NotFound(PathBuf),

    /// Failed to parse configuration
    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    /// Invalid configuration value
    #[error("Invalid configuration: {field} - {message}")]
    InvalidValue { field: String, message: String },

    /// YAML parsing error
    #[error("YAML parsing error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    TomlError(#[from] toml::de::Error),

    /// IO error
    #[error("IO error reading config: {0}")]
    Io(#[from] std::io::Error),
}

/// Git-related errors
#[derive(Debug, Error)]
pub enum GitError {
    /// Repository not found
    #[error("Git repository not found at {0}")]
    RepositoryNotFound(PathBuf),

    /// Not a git repository
    #[error("Not a git repository: {0}")]
    NotARepository(PathBuf),

    /// Failed to open repository
    #[error("Failed to open repository: {0}")]
    OpenFailed(String),

    /// No commits found
    #[error("No commits found in repository")]
    NoCommits,

    /// Remote not found
    #[error("Remote not found: {0}")]
    RemoteNotFound(String),

    /// Commit message file missing
    #[error("Commit message file not found at {0}")]
    MessageFileNotFound(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Git2 library error
    #[error("Git error: {0}")]
    Git2(#[from] git2::Error),
}

/// Changelog-related errors
#[derive(Debug, Error)]
pub enum ChangelogError {
    /// A configured pattern failed to compile
    #[error("Invalid pattern for {field}: {source}")]
    InvalidPattern {
        field: String,
        #[source]
        source: regex::Error,
    },

    /// Failed to write changelog
    #[error("Failed to write changelog to {path}: {source}")]
    WriteFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Spellcheck-related errors
#[derive(Debug, Error)]
pub enum SpellcheckError {
    /// Word list could not be loaded
    #[error("Dictionary not found at {0}")]
    DictionaryNotFound(PathBuf),

    /// Dictionary file exists but holds no words
    #[error("Dictionary at {0} is empty")]
    EmptyDictionary(PathBuf),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl HeraldError {
    /// Create a new "other" error with a message
    pub fn other<S: Into<String>>(msg: S) -> Self {
        Self::Other(msg.into())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_value_message() {
        let err: HeraldError = ConfigError::InvalidValue {
            field: "parser.merge_pattern".to_string(),
            message: "unclosed group".to_string(),
        }
        .into();
        assert_eq!(
            err.to_string(),
            "Invalid configuration: parser.merge_pattern - unclosed group"
        );
    }

    #[test]
    fn test_other_error() {
        let err = HeraldError::other("boom");
        assert!(matches!(err, HeraldError::Other(ref m) if m == "boom"));
    }
}
