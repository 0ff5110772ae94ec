//! Mutable state threaded through one transformation pass

use tracing::debug;

use crate::types::ParsedCommit;
use herald_git::types::is_valid_semver;

/// Whether the next commit may open a new release block
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GenerationFlag {
    /// Open a block when the commit carries a valid version
    #[default]
    Yes,
    /// Do not open a block
    No,
    /// Open a block unconditionally
    Always,
}

/// Legacy-release accumulator and generation flag for one pass
///
/// Create one per pass (or [`reset`](Self::reset) it) and hand it to every
/// [`CommitTransformer::transform`](super::CommitTransformer::transform) call
/// in stream order.
#[derive(Debug, Clone, Default)]
pub struct TransformState {
    legacy_releases: Vec<ParsedCommit>,
    generation: GenerationFlag,
}

impl TransformState {
    /// Fresh state: no legacy releases, generation enabled
    pub fn new() -> Self {
        Self::default()
    }

    /// Return to the fresh state
    pub fn reset(&mut self) {
        self.legacy_releases.clear();
        self.generation = GenerationFlag::Yes;
    }

    /// Legacy releases collected so far, in classification order
    pub fn legacy_releases(&self) -> &[ParsedCommit] {
        &self.legacy_releases
    }

    /// Current generation flag
    pub fn generation(&self) -> GenerationFlag {
        self.generation
    }

    pub(crate) fn record_legacy(&mut self, commit: ParsedCommit) {
        self.legacy_releases.push(commit);
        self.generation = GenerationFlag::No;
    }

    pub(crate) fn take_legacy(&mut self) -> Vec<ParsedCommit> {
        self.generation = GenerationFlag::Always;
        std::mem::take(&mut self.legacy_releases)
    }

    /// Decide whether the commit keyed by `version` opens a release block
    ///
    /// The flag is consumed: it always returns to [`GenerationFlag::Yes`].
    pub fn generate_on(&mut self, version: Option<&str>) -> bool {
        let decision = match self.generation {
            GenerationFlag::Always => true,
            GenerationFlag::Yes => version.is_some_and(is_valid_semver),
            GenerationFlag::No => false,
        };
        debug!(flag = ?self.generation, ?version, decision, "generate_on");
        self.generation = GenerationFlag::Yes;
        decision
    }
}
