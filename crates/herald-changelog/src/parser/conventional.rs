//! Conventional Commits parser
//!
//! Parses commits following the Conventional Commits specification:
//! https://www.conventionalcommits.org/

use regex::Regex;
use std::sync::LazyLock;
use tracing::trace;

use super::{CommitParser, ParserOptions};
use crate::types::{Note, ParsedCommit, Reference, Revert};
use herald_core::config::ParserConfig;
use herald_core::error::ChangelogError;
use herald_git::types::clean_version;
use herald_git::CommitInfo;

/// Regex for parsing conventional commit headers
static HEADER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(
        r"^(?P<type>\w+)(?:\((?P<scope>[^)]*)\))?(?P<breaking>!)?: (?P<subject>.+)$",
    )
    .expect("Invalid regex")
});

/// Regex for revert messages, as written by `git revert`
static REVERT_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"(?is)^(?:Revert|revert:)\s"?(?P<header>.+?)"?\s*This reverts commit (?P<hash>\w*)\."#)
        .expect("Invalid regex")
});

/// Regex for `@user` mentions; an `@` inside a word (an email) is not one
static MENTION_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\B@(?P<name>[\w-]+)").expect("Invalid regex"));

/// Title given to notes produced by a `!` in the header
const BANG_NOTE_TITLE: &str = "BREAKING CHANGE";

/// Parser for Conventional Commits format
pub struct ConventionalParser {
    options: ParserOptions,
}

impl ConventionalParser {
    /// Create a new parser with default configuration
    pub fn new() -> Self {
        Self {
            options: ParserOptions::default(),
        }
    }

    /// Create a parser from configuration
    pub fn with_config(config: &ParserConfig) -> Result<Self, ChangelogError> {
        Ok(Self {
            options: ParserOptions::from_config(config)?,
        })
    }

    /// Parse a full commit message into a record without git metadata
    pub fn parse_message(&self, message: &str) -> ParsedCommit {
        let mut record = ParsedCommit::default();
        let mut lines = message.lines().map(str::trim_end).skip_while(|l| l.is_empty());

        let mut header = lines.next().unwrap_or_default();

        if let Some(caps) = self.options.merge_pattern.captures(header) {
            record.merge = Some(header.to_string());
            for (name, group) in self.options.merge_correspondence.iter().zip(caps.iter().skip(1)) {
                let value = group.map(|m| m.as_str().to_string());
                match name.as_str() {
                    "id" => record.id = value,
                    "source" => record.source = value,
                    _ => {}
                }
            }
            header = lines.find(|l| !l.is_empty()).unwrap_or_default();
        }

        if !header.is_empty() {
            record.header = Some(header.to_string());
        }

        let mut bang = false;
        if let Some(caps) = HEADER_REGEX.captures(header) {
            record.commit_type = caps.name("type").map(|m| m.as_str().to_string());
            record.scope = caps.name("scope").map(|m| m.as_str().to_string());
            record.subject = caps.name("subject").map(|m| m.as_str().to_string());
            bang = caps.name("breaking").is_some();
        }

        for caps in self.options.issue_pattern.captures_iter(header) {
            record.references.push(self.reference(&caps, None, header));
        }

        self.parse_rest(lines, &mut record);

        if bang && record.notes.is_empty() {
            record.notes.push(Note {
                title: BANG_NOTE_TITLE.to_string(),
                text: record.subject.clone().unwrap_or_default(),
            });
        }

        if let Some(caps) = REVERT_REGEX.captures(message.trim_start()) {
            record.revert = Some(Revert {
                header: caps["header"].to_string(),
                hash: caps["hash"].to_string(),
            });
        }

        record.mentions = MENTION_REGEX
            .captures_iter(message)
            .map(|c| c["name"].to_string())
            .collect();

        record
    }

    /// Split the lines after the header into body, footer, notes and references
    fn parse_rest<'a>(&self, lines: impl Iterator<Item = &'a str>, record: &mut ParsedCommit) {
        enum Block {
            Body,
            Footer,
            Note,
        }

        let mut block = Block::Body;
        let mut body = Vec::new();
        let mut footer = Vec::new();

        for line in lines {
            if let Some(caps) = self.options.note_pattern.captures(line) {
                record.notes.push(Note {
                    title: caps["title"].to_string(),
                    text: caps["text"].to_string(),
                });
                footer.push(line);
                block = Block::Note;
                continue;
            }

            let actions: Vec<_> = self.options.action_pattern.captures_iter(line).collect();
            if !actions.is_empty() {
                for caps in &actions {
                    let action = caps.name("action").map(|m| m.as_str().to_string());
                    record.references.push(self.reference(caps, action, line));
                }
                footer.push(line);
                block = Block::Footer;
                continue;
            }

            match block {
                Block::Body => body.push(line),
                Block::Footer => footer.push(line),
                Block::Note => {
                    footer.push(line);
                    if let Some(note) = record.notes.last_mut() {
                        note.text.push('\n');
                        note.text.push_str(line);
                    }
                }
            }
        }

        for note in &mut record.notes {
            note.text = note.text.trim().to_string();
        }

        record.body = join_block(&body);
        record.footer = join_block(&footer);
    }

    fn reference(
        &self,
        caps: &regex::Captures<'_>,
        action: Option<String>,
        raw: &str,
    ) -> Reference {
        let text = |name: &str| caps.name(name).map(|m| m.as_str().to_string());
        Reference {
            action,
            owner: text("owner"),
            repository: text("repository"),
            issue: text("issue").unwrap_or_default(),
            raw: raw.to_string(),
            prefix: text("prefix").unwrap_or_default(),
        }
    }
}

impl Default for ConventionalParser {
    fn default() -> Self {
        Self::new()
    }
}

fn join_block(lines: &[&str]) -> Option<String> {
    let text = lines.join("\n").trim().to_string();
    if text.is_empty() {
        None
    } else {
        Some(text)
    }
}

impl CommitParser for ConventionalParser {
    fn parse(&self, commit: &CommitInfo) -> ParsedCommit {
        let mut record = self.parse_message(&commit.full_message());

        record.hash = commit.hash.clone();
        record.committer_date = Some(commit.timestamp.format("%Y-%m-%d").to_string());

        if !commit.tags.is_empty() {
            record.git_tags = Some(format!(" (tag: {})", commit.tags.join(", tag: ")));
            record.version = commit
                .tags
                .iter()
                .find_map(|t| clean_version(t))
                .map(|v| v.to_string());
        }

        trace!(hash = %record.hash, commit_type = ?record.commit_type, version = ?record.version, "parsed commit");
        record
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn make_commit(message: &str) -> CommitInfo {
        let mut lines = message.splitn(2, "\n\n");
        let summary = lines.next().unwrap_or_default();
        let commit = CommitInfo::new(
            "abc1234567890",
            summary,
            "Test Author",
            "test@example.com",
            Utc.with_ymd_and_hms(2021, 3, 4, 12, 0, 0).unwrap(),
        );
        match lines.next() {
            Some(body) => commit.with_body(body),
            None => commit,
        }
    }

    #[test]
    fn test_parse_simple_feat() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit("feat: add new feature"));

        assert_eq!(parsed.commit_type.as_deref(), Some("feat"));
        assert_eq!(parsed.subject.as_deref(), Some("add new feature"));
        assert_eq!(parsed.header.as_deref(), Some("feat: add new feature"));
        assert!(parsed.scope.is_none());
        assert!(parsed.notes.is_empty());
        assert_eq!(parsed.committer_date.as_deref(), Some("2021-03-04"));
        assert_eq!(parsed.hash, "abc1234567890");
    }

    #[test]
    fn test_parse_with_scope() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit("fix(parser): handle edge case"));

        assert_eq!(parsed.commit_type.as_deref(), Some("fix"));
        assert_eq!(parsed.scope.as_deref(), Some("parser"));
        assert_eq!(parsed.subject.as_deref(), Some("handle edge case"));
    }

    #[test]
    fn test_parse_breaking_change_marker() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit("feat!: drop node 10"));

        assert_eq!(parsed.notes.len(), 1);
        assert_eq!(parsed.notes[0].title, "BREAKING CHANGE");
        assert_eq!(parsed.notes[0].text, "drop node 10");
    }

    #[test]
    fn test_parse_non_conventional() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit("Just a regular commit message"));

        assert!(parsed.commit_type.is_none());
        assert!(parsed.subject.is_none());
        assert_eq!(
            parsed.header.as_deref(),
            Some("Just a regular commit message")
        );
    }

    #[test]
    fn test_parse_body_and_footer() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit(
            "feat: add feature\n\nThis is the body\n\nWith more text.\n\nCloses #123, fixes acme/tools#9",
        ));

        assert_eq!(
            parsed.body.as_deref(),
            Some("This is the body\n\nWith more text.")
        );
        assert_eq!(
            parsed.footer.as_deref(),
            Some("Closes #123, fixes acme/tools#9")
        );
        assert_eq!(parsed.references.len(), 2);
        assert_eq!(parsed.references[0].action.as_deref(), Some("Closes"));
        assert_eq!(parsed.references[0].issue, "123");
        assert_eq!(parsed.references[1].owner.as_deref(), Some("acme"));
        assert_eq!(parsed.references[1].repository.as_deref(), Some("tools"));
    }

    #[test]
    fn test_parse_breaking_change_footer() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit(
            "refactor(core): rework config\n\nBREAKING CHANGE: config moved\nto a new file",
        ));

        assert_eq!(parsed.notes.len(), 1);
        assert_eq!(parsed.notes[0].title, "BREAKING CHANGE");
        assert_eq!(parsed.notes[0].text, "config moved\nto a new file");
        assert!(parsed.body.is_none());
    }

    #[test]
    fn test_parse_header_issue_reference() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit("fix: crash on empty input (#42)"));

        assert_eq!(parsed.references.len(), 1);
        assert!(parsed.references[0].action.is_none());
        assert_eq!(parsed.references[0].issue, "42");
    }

    #[test]
    fn test_parse_merge_commit() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit(
            "Merge pull request #17 from acme/feature-x\n\nfeat: add x",
        ));

        assert_eq!(
            parsed.merge.as_deref(),
            Some("Merge pull request #17 from acme/feature-x")
        );
        assert_eq!(parsed.id.as_deref(), Some("17"));
        assert_eq!(parsed.source.as_deref(), Some("acme/feature-x"));
        assert_eq!(parsed.commit_type.as_deref(), Some("feat"));
        assert_eq!(parsed.subject.as_deref(), Some("add x"));
    }

    #[test]
    fn test_parse_revert() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit(
            "Revert \"feat: add x\"\n\nThis reverts commit 0123456789abcdef.",
        ));

        let revert = parsed.revert.unwrap();
        assert_eq!(revert.header, "feat: add x");
        assert_eq!(revert.hash, "0123456789abcdef");
        assert!(parsed.commit_type.is_none());
    }

    #[test]
    fn test_parse_typed_revert() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit(
            "revert: \"fix: stop retrying\"\n\nThis reverts commit abcdef0.",
        ));

        assert_eq!(parsed.commit_type.as_deref(), Some("revert"));
        assert_eq!(parsed.subject.as_deref(), Some("\"fix: stop retrying\""));
        assert_eq!(parsed.revert.unwrap().hash, "abcdef0");
    }

    #[test]
    fn test_parse_mentions() {
        let parser = ConventionalParser::new();
        let parsed = parser.parse(&make_commit("docs: thank @octocat and @a-b"));
        assert_eq!(parsed.mentions, vec!["octocat", "a-b"]);
    }

    #[test]
    fn test_email_is_not_a_mention() {
        let parser = ConventionalParser::new();
        let parsed =
            parser.parse_message("fix: thing\n\nSigned-off-by: Jane <jane@example.com>");
        assert!(parsed.mentions.is_empty());

        let parsed = parser.parse_message("fix: thing\n\nreported by @octo, see jane@example.com");
        assert_eq!(parsed.mentions, vec!["octo"]);
    }

    #[test]
    fn test_note_directly_under_header() {
        let parser = ConventionalParser::new();
        let commit = make_commit("fix: stop crash")
            .with_raw_message("fix: stop crash\nBREAKING CHANGE: removed flag\n");
        let parsed = parser.parse(&commit);

        assert_eq!(parsed.subject.as_deref(), Some("stop crash"));
        assert_eq!(parsed.notes.len(), 1);
        assert_eq!(parsed.notes[0].title, "BREAKING CHANGE");
        assert_eq!(parsed.notes[0].text, "removed flag");
    }

    #[test]
    fn test_parse_tags_and_version() {
        let parser = ConventionalParser::new();
        let commit = make_commit("Release")
            .with_tag("latest")
            .with_tag("v0.3.1");
        let parsed = parser.parse(&commit);

        assert_eq!(
            parsed.git_tags.as_deref(),
            Some(" (tag: latest, tag: v0.3.1)")
        );
        assert_eq!(parsed.version.as_deref(), Some("0.3.1"));
        assert!(parsed.commit_type.is_none());
    }

    #[test]
    fn test_custom_merge_correspondence() {
        let config = ParserConfig {
            merge_pattern: r"^Merged in (\S+) \(pull request #(\d+)\)$".to_string(),
            merge_correspondence: vec!["source".to_string(), "id".to_string()],
            ..Default::default()
        };
        let parser = ConventionalParser::with_config(&config).unwrap();
        let parsed = parser.parse_message("Merged in topic (pull request #5)\nfix: y");

        assert_eq!(parsed.source.as_deref(), Some("topic"));
        assert_eq!(parsed.id.as_deref(), Some("5"));
        assert_eq!(parsed.subject.as_deref(), Some("y"));
    }
}
