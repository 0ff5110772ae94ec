//! Angular-style field transform

use regex::Regex;
use std::sync::LazyLock;

use super::FieldTransform;
use crate::types::{short_hash, Context, ParsedCommit};

/// Title every breaking-change note is filed under
pub const BREAKING_TITLE: &str = "BREAKING CHANGES";

static ISSUE_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9]+)").expect("Invalid regex"));

static USER_REGEX: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\B@([a-z0-9](?:-?[a-z0-9/]){0,38})").expect("Invalid regex")
});

/// Maps conventional types to section labels and links issues and users
///
/// `feat`, `fix`, `perf` and reverts always make it into the changelog.
/// Other types are only kept when they carry breaking-change notes.
#[derive(Debug, Clone, Copy, Default)]
pub struct AngularTransform;

impl AngularTransform {
    /// Create the transform
    pub fn new() -> Self {
        Self
    }

    fn label(commit: &ParsedCommit) -> Option<Option<String>> {
        let keep = !commit.notes.is_empty();
        let label = match commit.commit_type.as_deref() {
            Some("feat") => "Features",
            Some("fix") => "Bug Fixes",
            Some("perf") => "Performance Improvements",
            Some("revert") => "Reverts",
            _ if commit.revert.is_some() => "Reverts",
            _ if !keep => return None,
            Some("docs") => "Documentation",
            Some("style") => "Styles",
            Some("refactor") => "Code Refactoring",
            Some("test") => "Tests",
            Some("build") => "Build System",
            Some("ci") => "Continuous Integration",
            other => return Some(other.map(str::to_string)),
        };
        Some(Some(label.to_string()))
    }
}

impl FieldTransform for AngularTransform {
    fn transform(&self, mut commit: ParsedCommit, context: &Context) -> Option<ParsedCommit> {
        for note in &mut commit.notes {
            note.title = BREAKING_TITLE.to_string();
        }

        commit.commit_type = Self::label(&commit)?;

        if commit.scope.as_deref() == Some("*") {
            commit.scope = Some(String::new());
        }

        commit.short_hash = Some(short_hash(&commit.hash));

        let mut issues = Vec::new();
        if let Some(mut subject) = commit.subject.take() {
            if let Some(url) = context.repository_url() {
                subject = ISSUE_REGEX
                    .replace_all(&subject, |caps: &regex::Captures<'_>| {
                        issues.push(caps[1].to_string());
                        format!("[#{}]({}/issues/{})", &caps[1], url, &caps[1])
                    })
                    .into_owned();
            }

            if let Some(host) = context.host.as_deref() {
                subject = USER_REGEX
                    .replace_all(&subject, |caps: &regex::Captures<'_>| {
                        let user = &caps[1];
                        if user.contains('/') {
                            format!("@{}", user)
                        } else {
                            format!("[@{}]({}/{})", user, host, user)
                        }
                    })
                    .into_owned();
            }

            commit.subject = Some(subject);
        }

        commit
            .references
            .retain(|reference| !issues.contains(&reference.issue));

        Some(commit)
    }
}
