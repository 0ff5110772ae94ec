//! Changelog types

use serde::{Deserialize, Serialize};

/// Number of characters in an abbreviated commit hash
pub const SHORT_HASH_LEN: usize = 7;

/// Abbreviate a commit hash
pub fn short_hash(hash: &str) -> String {
    hash.chars().take(SHORT_HASH_LEN).collect()
}

/// A commit record produced by a [`CommitParser`](crate::parser::CommitParser)
///
/// Fields that the parser could not fill stay `None` or empty; the transform
/// pipeline never assumes any of them is present.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ParsedCommit {
    /// Commit hash
    pub hash: String,
    /// Abbreviated hash, filled in by the field transform
    pub short_hash: Option<String>,
    /// Conventional type tag, later rewritten to a section label
    pub commit_type: Option<String>,
    /// Scope (optional, in parentheses)
    pub scope: Option<String>,
    /// Description after the type prefix
    pub subject: Option<String>,
    /// Header line the type and subject were read from
    pub header: Option<String>,
    /// Free-form body
    pub body: Option<String>,
    /// Footer block (notes and references)
    pub footer: Option<String>,
    /// Merge header, when the commit is a pull request merge
    pub merge: Option<String>,
    /// Pull request number captured from the merge header
    pub id: Option<String>,
    /// Branch captured from the merge header
    pub source: Option<String>,
    /// Breaking-change annotations, in message order
    pub notes: Vec<Note>,
    /// Issues referenced by the message
    pub references: Vec<Reference>,
    /// Users mentioned with `@name`
    pub mentions: Vec<String>,
    /// The commit this one reverts
    pub revert: Option<Revert>,
    /// Tag decoration of the commit
    pub git_tags: Option<String>,
    /// Commit date as `YYYY-MM-DD`
    pub committer_date: Option<String>,
    /// Release version tagged on this commit
    pub version: Option<String>,
}

/// A breaking-change annotation
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Note {
    /// Keyword that introduced the note
    pub title: String,
    /// Note text
    pub text: String,
}

/// An issue reference
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Reference {
    /// Closing verb (`closes`, `fixes`...), absent for plain mentions
    pub action: Option<String>,
    /// Owner of a cross-repository reference
    pub owner: Option<String>,
    /// Repository of a cross-repository reference
    pub repository: Option<String>,
    /// Issue number
    pub issue: String,
    /// Text the reference was read from
    pub raw: String,
    /// Issue prefix (`#`)
    pub prefix: String,
}

/// Identity of a reverted commit
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Revert {
    /// Header of the reverted commit
    pub header: String,
    /// Hash of the reverted commit
    pub hash: String,
}

/// Single entry that stands in for every release made before conventional
/// commits were adopted
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SynthesizedSummary {
    /// Nested list of archived versions
    pub subject: String,
    /// Hash of the earliest release commit
    pub hash: String,
    /// Abbreviated hash
    pub short_hash: String,
}

impl SynthesizedSummary {
    /// Version label the summary is filed under
    pub const VERSION: &'static str = "Archived Releases";

    /// Date label the summary is filed under
    pub const DATE: &'static str = "pre-CI/CD";
}

/// Output of the commit transformer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum TransformedCommit {
    /// A regular commit with its fields rewritten for display
    Parsed(ParsedCommit),
    /// The archived-releases summary
    Summary(SynthesizedSummary),
}

impl TransformedCommit {
    /// Section label; the summary has none
    pub fn commit_type(&self) -> Option<&str> {
        match self {
            Self::Parsed(c) => c.commit_type.as_deref(),
            Self::Summary(_) => None,
        }
    }

    /// Display subject
    pub fn subject(&self) -> Option<&str> {
        match self {
            Self::Parsed(c) => c.subject.as_deref(),
            Self::Summary(s) => Some(&s.subject),
        }
    }

    /// Scope, if any
    pub fn scope(&self) -> Option<&str> {
        match self {
            Self::Parsed(c) => c.scope.as_deref(),
            Self::Summary(_) => None,
        }
    }

    /// Full commit hash
    pub fn hash(&self) -> &str {
        match self {
            Self::Parsed(c) => &c.hash,
            Self::Summary(s) => &s.hash,
        }
    }

    /// Abbreviated hash
    pub fn short_hash(&self) -> Option<&str> {
        match self {
            Self::Parsed(c) => c.short_hash.as_deref(),
            Self::Summary(s) => Some(&s.short_hash),
        }
    }

    /// Release version carried by this commit
    pub fn version(&self) -> Option<&str> {
        match self {
            Self::Parsed(c) => c.version.as_deref(),
            Self::Summary(_) => Some(SynthesizedSummary::VERSION),
        }
    }

    /// Date label
    pub fn committer_date(&self) -> Option<&str> {
        match self {
            Self::Parsed(c) => c.committer_date.as_deref(),
            Self::Summary(_) => Some(SynthesizedSummary::DATE),
        }
    }

    /// Breaking-change notes
    pub fn notes(&self) -> &[Note] {
        match self {
            Self::Parsed(c) => &c.notes,
            Self::Summary(_) => &[],
        }
    }

    /// Issue references
    pub fn references(&self) -> &[Reference] {
        match self {
            Self::Parsed(c) => &c.references,
            Self::Summary(_) => &[],
        }
    }

    /// Whether this is the archived-releases summary
    pub fn is_summary(&self) -> bool {
        matches!(self, Self::Summary(_))
    }
}

/// Read-only repository state shared by a transformation pass
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Context {
    /// Web host, e.g. `https://github.com`
    pub host: Option<String>,
    /// Repository owner
    pub owner: Option<String>,
    /// Repository name
    pub repository: Option<String>,
    /// Full repository URL, used when owner/repository are unknown
    pub repo_url: Option<String>,
    /// Label for commits newer than the latest release
    pub version: Option<String>,
    /// Date for commits newer than the latest release
    pub date: Option<String>,
    /// Semantic-version tags, most recent first
    pub git_semver_tags: Vec<String>,
}

impl Context {
    /// Browsable repository URL, if one is known
    pub fn repository_url(&self) -> Option<String> {
        match (&self.repository, &self.host, &self.owner) {
            (Some(repository), Some(host), Some(owner)) => {
                Some(format!("{}/{}/{}", host, owner, repository))
            }
            _ => self.repo_url.clone(),
        }
    }

    /// Version of the oldest semver tag, with its one-character prefix removed
    pub fn first_release_version(&self) -> Option<&str> {
        let tag = self.git_semver_tags.last()?;
        let mut chars = tag.chars();
        chars.next()?;
        Some(chars.as_str())
    }
}

/// A breaking change listed under a release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BreakingChange {
    /// Scope of the commit that introduced it
    pub scope: Option<String>,
    /// Note text
    pub text: String,
}

/// A section in a changelog
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Section {
    /// Section title; untitled sections hold the archived summary
    pub title: Option<String>,
    /// Commits in this section
    pub commits: Vec<TransformedCommit>,
}

impl Section {
    /// Create a new section
    pub fn new(title: Option<String>) -> Self {
        Self {
            title,
            commits: Vec::new(),
        }
    }

    /// Add a commit to the section
    pub fn add_commit(&mut self, commit: TransformedCommit) {
        self.commits.push(commit);
    }

    /// Check if section is empty
    pub fn is_empty(&self) -> bool {
        self.commits.is_empty()
    }
}

/// A changelog entry for a version
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChangelogEntry {
    /// Version label
    pub version: Option<String>,
    /// Release date label
    pub date: Option<String>,
    /// Sections in first-seen order
    pub sections: Vec<Section>,
    /// Breaking changes (highlighted separately)
    pub breaking_changes: Vec<BreakingChange>,
}

impl ChangelogEntry {
    /// Create a new changelog entry
    pub fn new(version: Option<String>, date: Option<String>) -> Self {
        Self {
            version,
            date,
            sections: Vec::new(),
            breaking_changes: Vec::new(),
        }
    }

    /// File a commit under the section matching its label
    pub fn add_commit(&mut self, commit: TransformedCommit) {
        for note in commit.notes() {
            self.breaking_changes.push(BreakingChange {
                scope: commit.scope().filter(|s| !s.is_empty()).map(str::to_string),
                text: note.text.clone(),
            });
        }

        let title = commit.commit_type();
        match self
            .sections
            .iter_mut()
            .find(|s| s.title.as_deref() == title)
        {
            Some(section) => section.add_commit(commit),
            None => {
                let mut section = Section::new(title.map(str::to_string));
                section.add_commit(commit);
                self.sections.push(section);
            }
        }
    }

    /// Check if entry has any content
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty() && self.breaking_changes.is_empty()
    }
}
