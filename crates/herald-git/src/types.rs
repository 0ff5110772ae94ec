//! Git types

use chrono::{DateTime, Utc};
use semver::Version;
use serde::{Deserialize, Serialize};

/// Information about a git commit
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CommitInfo {
    /// Commit hash (full)
    pub hash: String,
    /// Short hash (first 7 characters)
    pub short_hash: String,
    /// Commit message (first line)
    pub message: String,
    /// Remainder of the commit message after the first paragraph
    pub body: Option<String>,
    /// Message exactly as stored in git, when read from a repository
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub raw_message: Option<String>,
    /// Author name
    pub author: String,
    /// Author email
    pub author_email: String,
    /// Committer timestamp
    pub timestamp: DateTime<Utc>,
    /// Names of tags pointing at this commit
    pub tags: Vec<String>,
}

impl CommitInfo {
    /// Create a new CommitInfo
    pub fn new(
        hash: impl Into<String>,
        message: impl Into<String>,
        author: impl Into<String>,
        author_email: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        let hash = hash.into();
        let short_hash = hash.chars().take(7).collect();

        Self {
            hash,
            short_hash,
            message: message.into(),
            body: None,
            raw_message: None,
            author: author.into(),
            author_email: author_email.into(),
            timestamp,
            tags: Vec::new(),
        }
    }

    /// Set the commit body
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Keep the message as stored in git
    pub fn with_raw_message(mut self, raw: impl Into<String>) -> Self {
        self.raw_message = Some(raw.into());
        self
    }

    /// Attach a tag name
    pub fn with_tag(mut self, tag: impl Into<String>) -> Self {
        self.tags.push(tag.into());
        self
    }

    /// Get the full message including body
    ///
    /// The raw message wins when present, so lines directly under the
    /// subject are kept as written.
    pub fn full_message(&self) -> String {
        if let Some(raw) = &self.raw_message {
            return raw.trim_end().to_string();
        }
        match &self.body {
            Some(body) if !body.is_empty() => format!("{}\n\n{}", self.message, body),
            _ => self.message.clone(),
        }
    }
}

/// Information about a git tag
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TagInfo {
    /// Tag name
    pub name: String,
    /// Commit hash the tag points to
    pub commit_hash: String,
    /// Tag message (for annotated tags)
    pub message: Option<String>,
    /// Extracted version from tag name
    pub version: Option<String>,
}

impl TagInfo {
    /// Create a new TagInfo
    pub fn new(name: impl Into<String>, commit_hash: impl Into<String>) -> Self {
        let name = name.into();
        let version = clean_version(&name).map(|v| v.to_string());

        Self {
            name,
            commit_hash: commit_hash.into(),
            message: None,
            version,
        }
    }

    /// Set the tag message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    /// Parsed semantic version of this tag, if it is one
    pub fn semver(&self) -> Option<Version> {
        self.version.as_deref().and_then(|v| Version::parse(v).ok())
    }
}

/// Parse a tag or version string as semver, tolerating a leading `v`, `V` or `=`
pub fn clean_version(tag: &str) -> Option<Version> {
    let trimmed = tag.trim();
    let stripped = trimmed
        .strip_prefix(|c: char| matches!(c, 'v' | 'V' | '='))
        .unwrap_or(trimmed);
    Version::parse(stripped).ok()
}

/// Check whether a string is a valid semantic version (optionally `v`-prefixed)
pub fn is_valid_semver(version: &str) -> bool {
    clean_version(version).is_some()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_clean_version() {
        assert_eq!(clean_version("v1.0.0"), Some(Version::new(1, 0, 0)));
        assert_eq!(clean_version("1.2.3"), Some(Version::new(1, 2, 3)));
        assert_eq!(clean_version(" =2.0.0 "), Some(Version::new(2, 0, 0)));
        assert!(clean_version("1.0").is_none());
        assert!(clean_version("release-1").is_none());
        assert!(clean_version("Archived Releases").is_none());
    }

    #[test]
    fn test_tag_info_version() {
        let tag = TagInfo::new("v1.4.0-beta.1", "abc");
        assert_eq!(tag.version.as_deref(), Some("1.4.0-beta.1"));
        assert!(tag.semver().is_some());

        let tag = TagInfo::new("nightly", "abc");
        assert!(tag.version.is_none());
    }

    #[test]
    fn test_commit_info() {
        let commit = CommitInfo::new(
            "abc1234567890",
            "feat: add feature",
            "Author",
            "author@example.com",
            Utc::now(),
        )
        .with_tag("v1.0.0");
        assert_eq!(commit.short_hash, "abc1234");
        assert_eq!(commit.message, "feat: add feature");
        assert_eq!(commit.tags, vec!["v1.0.0"]);
    }

    #[test]
    fn test_full_message() {
        let commit = CommitInfo::new("abc", "fix: x", "A", "a@b.c", Utc::now());
        assert_eq!(commit.full_message(), "fix: x");

        let commit = commit.with_body("Closes #4");
        assert_eq!(commit.full_message(), "fix: x\n\nCloses #4");

        let commit = commit.with_raw_message("fix: x\nCloses #4\n");
        assert_eq!(commit.full_message(), "fix: x\nCloses #4");
    }
}
