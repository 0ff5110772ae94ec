//! Markdown changelog formatter

use tracing::{debug, instrument};

use super::ChangelogFormatter;
use crate::transform::BREAKING_TITLE;
use crate::types::{ChangelogEntry, Context, Reference, TransformedCommit};

/// Version label used when an entry has none
const UNRELEASED: &str = "Unreleased";

/// Markdown changelog formatter
#[derive(Debug, Clone, Copy, Default)]
pub struct MarkdownFormatter;

impl MarkdownFormatter {
    /// Create a new markdown formatter
    pub fn new() -> Self {
        Self
    }

    fn header(entry: &ChangelogEntry) -> String {
        let version = entry.version.as_deref().unwrap_or(UNRELEASED);
        match entry.date.as_deref() {
            Some(date) => format!("## {} ({})\n\n", version, date),
            None => format!("## {}\n\n", version),
        }
    }

    fn commit_line(commit: &TransformedCommit, context: &Context, url: Option<&str>) -> String {
        let mut line = String::from("*");

        if let Some(scope) = commit.scope().filter(|s| !s.is_empty()) {
            line.push_str(&format!(" **{}:**", scope));
        }
        if let Some(subject) = commit.subject() {
            line.push(' ');
            line.push_str(subject);
        }

        if let Some(short) = commit.short_hash() {
            match url {
                Some(url) => {
                    line.push_str(&format!(" ([{}]({}/commit/{}))", short, url, commit.hash()))
                }
                None => line.push_str(&format!(" ({})", short)),
            }
        }

        let closes: Vec<String> = commit
            .references()
            .iter()
            .filter(|r| r.action.is_some())
            .map(|r| Self::reference(r, context.host.as_deref(), url))
            .collect();
        if !closes.is_empty() {
            line.push_str(", closes ");
            line.push_str(&closes.join(" "));
        }

        line.push('\n');
        line
    }

    fn reference(reference: &Reference, host: Option<&str>, url: Option<&str>) -> String {
        let (label, base) = match (&reference.owner, &reference.repository) {
            (Some(owner), Some(repository)) => (
                format!("{}/{}{}{}", owner, repository, reference.prefix, reference.issue),
                host.map(|host| format!("{}/{}/{}", host, owner, repository)),
            ),
            _ => (
                format!("{}{}", reference.prefix, reference.issue),
                url.map(str::to_string),
            ),
        };

        match base {
            Some(base) => format!("[{}]({}/issues/{})", label, base, reference.issue),
            None => label,
        }
    }
}

impl ChangelogFormatter for MarkdownFormatter {
    #[instrument(skip_all, fields(version = ?entry.version, section_count = entry.sections.len()))]
    fn format(&self, entry: &ChangelogEntry, context: &Context) -> String {
        let url = context.repository_url();
        let url = url.as_deref();
        let mut output = Self::header(entry);

        if !entry.breaking_changes.is_empty() {
            output.push_str(&format!("### {}\n\n", BREAKING_TITLE));
            for note in &entry.breaking_changes {
                match &note.scope {
                    Some(scope) => output.push_str(&format!("* **{}:** {}\n", scope, note.text)),
                    None => output.push_str(&format!("* {}\n", note.text)),
                }
            }
            output.push('\n');
        }

        for section in &entry.sections {
            if section.is_empty() {
                continue;
            }

            if let Some(title) = &section.title {
                output.push_str(&format!("### {}\n\n", title));
            }
            for commit in &section.commits {
                output.push_str(&Self::commit_line(commit, context, url));
            }
            output.push('\n');
        }

        debug!(output_len = output.len(), "markdown changelog formatted");
        output
    }

    fn extension(&self) -> &'static str {
        "md"
    }
}
