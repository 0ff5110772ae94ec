//! Commit transformation
//!
//! A [`FieldTransform`] normalises a single record (labels, links, short
//! hash). The [`CommitTransformer`] wraps it with the changelog policy: skip
//! markers, revert filtering, custom types and the archived-releases summary.

mod angular;
mod commit;
mod state;

pub use angular::{AngularTransform, BREAKING_TITLE};
pub use commit::CommitTransformer;
pub use state::{GenerationFlag, TransformState};

use crate::types::{Context, ParsedCommit};

/// Per-record field rewriting
pub trait FieldTransform: Send + Sync {
    /// Rewrite a record for display, or drop it by returning `None`
    fn transform(&self, commit: ParsedCommit, context: &Context) -> Option<ParsedCommit>;
}
