//! Changelog generation

use herald_core::config::Config;
use herald_core::error::ChangelogError;
use herald_git::CommitInfo;
use tracing::{debug, info, instrument};

use crate::formatter::{ChangelogFormatter, MarkdownFormatter};
use crate::parser::{CommitParser, ConventionalParser};
use crate::transform::{CommitTransformer, TransformState};
use crate::types::{ChangelogEntry, Context, ParsedCommit, TransformedCommit};

/// Version and date labelling a release block
#[derive(Debug, Clone, Default)]
struct BlockKey {
    version: Option<String>,
    date: Option<String>,
}

impl BlockKey {
    fn of_raw(commit: &ParsedCommit) -> Self {
        Self {
            version: commit.version.clone(),
            date: commit.committer_date.clone(),
        }
    }

    fn of_transformed(commit: &TransformedCommit) -> Self {
        Self {
            version: commit.version().map(str::to_string),
            date: commit.committer_date().map(str::to_string),
        }
    }

    fn of_context(context: &Context) -> Self {
        Self {
            version: context.version.clone(),
            date: context.date.clone(),
        }
    }
}

/// Changelog generator
///
/// Parses commits, runs them through the [`CommitTransformer`] and splits the
/// result into one [`ChangelogEntry`] per release.
pub struct ChangelogGenerator {
    parser: Box<dyn CommitParser>,
    transformer: CommitTransformer,
    formatter: Box<dyn ChangelogFormatter>,
    title: String,
}

impl ChangelogGenerator {
    /// Create a new generator with the conventional parser and markdown formatter
    pub fn new(config: &Config) -> Result<Self, ChangelogError> {
        Ok(Self {
            parser: Box::new(ConventionalParser::with_config(&config.parser)?),
            transformer: CommitTransformer::new(&config.changelog)?,
            formatter: Box::new(MarkdownFormatter::new()),
            title: config.changelog.title.clone(),
        })
    }

    /// Use a custom parser
    pub fn with_parser<P: CommitParser + 'static>(mut self, parser: P) -> Self {
        self.parser = Box::new(parser);
        self
    }

    /// Use a custom formatter
    pub fn with_formatter<F: ChangelogFormatter + 'static>(mut self, formatter: F) -> Self {
        self.formatter = Box::new(formatter);
        self
    }

    /// Use a custom transformer
    pub fn with_transformer(mut self, transformer: CommitTransformer) -> Self {
        self.transformer = transformer;
        self
    }

    /// Parse commits into records
    pub fn parse(&self, commits: &[CommitInfo]) -> Vec<ParsedCommit> {
        commits.iter().map(|c| self.parser.parse(c)).collect()
    }

    /// Split records (newest first) into release entries
    ///
    /// Every pass starts from a fresh [`TransformState`], so writing the same
    /// records twice gives the same entries.
    #[instrument(skip_all, fields(commit_count = commits.len()))]
    pub fn write(&self, commits: Vec<ParsedCommit>, context: &Context) -> Vec<ChangelogEntry> {
        let mut state = TransformState::new();
        let mut entries = Vec::new();
        let mut open: Vec<TransformedCommit> = Vec::new();
        let mut saved: Option<BlockKey> = None;

        for commit in commits {
            let raw_key = BlockKey::of_raw(&commit);
            let transformed = self.transformer.transform(commit, context, &mut state);
            let key = transformed
                .as_ref()
                .map(BlockKey::of_transformed)
                .unwrap_or(raw_key);

            if state.generate_on(key.version.as_deref()) {
                let label = saved
                    .replace(key)
                    .unwrap_or_else(|| BlockKey::of_context(context));
                close_block(&mut entries, label, std::mem::take(&mut open));
            }

            if let Some(commit) = transformed {
                open.push(commit);
            }
        }

        let label = saved.unwrap_or_else(|| BlockKey::of_context(context));
        close_block(&mut entries, label, open);

        info!(entry_count = entries.len(), "changelog entries built");
        entries
    }

    /// Parse and split commits (newest first) into release entries
    pub fn generate(&self, commits: &[CommitInfo], context: &Context) -> Vec<ChangelogEntry> {
        self.write(self.parse(commits), context)
    }

    /// Format a single entry
    pub fn format(&self, entry: &ChangelogEntry, context: &Context) -> String {
        self.formatter.format(entry, context)
    }

    /// Format the whole document under the configured title
    pub fn format_document(&self, entries: &[ChangelogEntry], context: &Context) -> String {
        self.formatter.format_document(&self.title, entries, context)
    }

    /// Generate and format in one step
    #[instrument(skip_all, fields(commit_count = commits.len()))]
    pub fn generate_formatted(&self, commits: &[CommitInfo], context: &Context) -> String {
        let entries = self.generate(commits, context);
        let output = self.format_document(&entries, context);
        debug!(output_len = output.len(), "changelog formatted");
        output
    }
}

fn close_block(entries: &mut Vec<ChangelogEntry>, key: BlockKey, commits: Vec<TransformedCommit>) {
    if commits.is_empty() {
        debug!(version = ?key.version, "skipping empty block");
        return;
    }

    let mut entry = ChangelogEntry::new(key.version, key.date);
    for commit in commits {
        entry.add_commit(commit);
    }
    debug!(
        version = ?entry.version,
        section_count = entry.sections.len(),
        breaking_count = entry.breaking_changes.len(),
        "closed release block"
    );
    entries.push(entry);
}
