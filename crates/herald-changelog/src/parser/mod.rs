//! Commit parsing

mod conventional;
mod types;

pub use conventional::ConventionalParser;
pub use types::*;

use crate::types::ParsedCommit;
use herald_git::CommitInfo;

/// Trait for commit parsers
pub trait CommitParser: Send + Sync {
    /// Parse a commit into a structured record
    ///
    /// Commits that do not follow the expected format still produce a record;
    /// the fields that could not be read are left empty.
    fn parse(&self, commit: &CommitInfo) -> ParsedCommit;
}
