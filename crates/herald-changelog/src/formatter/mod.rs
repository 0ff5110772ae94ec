//! Changelog formatters

mod markdown;

pub use markdown::MarkdownFormatter;

use crate::types::{ChangelogEntry, Context};

/// Trait for changelog formatters
pub trait ChangelogFormatter: Send + Sync {
    /// Format a changelog entry to string
    fn format(&self, entry: &ChangelogEntry, context: &Context) -> String;

    /// Get the file extension for this format
    fn extension(&self) -> &'static str;

    /// Format a whole document: the title followed by every entry
    fn format_document(&self, title: &str, entries: &[ChangelogEntry], context: &Context) -> String {
        let mut output = String::new();
        if !title.is_empty() {
            output.push_str(title.trim_end());
            output.push_str("\n\n");
        }
        for entry in entries {
            output.push_str(&self.format(entry, context));
        }
        output
    }
}
