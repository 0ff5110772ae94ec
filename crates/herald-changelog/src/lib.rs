//! Herald Changelog - Changelog generation from conventional commits
//!
//! Commits are parsed into [`ParsedCommit`] records, rewritten by the
//! [`CommitTransformer`] and grouped into [`ChangelogEntry`] blocks that a
//! formatter renders.

pub mod formatter;
pub mod generator;
pub mod parser;
pub mod transform;
pub mod types;

pub use formatter::{ChangelogFormatter, MarkdownFormatter};
pub use generator::ChangelogGenerator;
pub use parser::{CommitParser, ConventionalParser};
pub use transform::{
    AngularTransform, CommitTransformer, FieldTransform, GenerationFlag, TransformState,
};
pub use types::{
    ChangelogEntry, Context, Note, ParsedCommit, Reference, Revert, Section, SynthesizedSummary,
    TransformedCommit,
};
