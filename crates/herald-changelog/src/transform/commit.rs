//! Changelog policy applied on top of the field transform

use std::collections::BTreeMap;

use regex::{Regex, RegexBuilder};
use tracing::{debug, instrument};

use super::{AngularTransform, FieldTransform, TransformState};
use crate::types::{short_hash, Context, ParsedCommit, SynthesizedSummary, TransformedCommit};
use herald_core::config::ChangelogConfig;
use herald_core::error::ChangelogError;

/// Type tag custom types are routed through so the field transform keeps them
const FAKE_FIX_TYPE: &str = "fix";

/// Label the field transform gives to reverts
const REVERTS_LABEL: &str = "Reverts";

/// Decides whether each commit contributes a changelog entry and rewrites it
pub struct CommitTransformer {
    base: Box<dyn FieldTransform>,
    skip_markers: Vec<String>,
    visible_reverts: Vec<Regex>,
    custom_types: BTreeMap<String, String>,
}

impl CommitTransformer {
    /// Create a transformer using the angular field transform
    pub fn new(config: &ChangelogConfig) -> Result<Self, ChangelogError> {
        let visible_reverts = config
            .visible_revert_types
            .iter()
            .map(|t| {
                RegexBuilder::new(&format!(r"^\W?{}: ", regex::escape(t)))
                    .case_insensitive(true)
                    .build()
                    .map_err(|source| ChangelogError::InvalidPattern {
                        field: "changelog.visible_revert_types".to_string(),
                        source,
                    })
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Self {
            base: Box::new(AngularTransform::new()),
            skip_markers: config.skip_markers.clone(),
            visible_reverts,
            custom_types: config.custom_types.clone(),
        })
    }

    /// Use a custom field transform
    pub fn with_base<T: FieldTransform + 'static>(mut self, base: T) -> Self {
        self.base = Box::new(base);
        self
    }

    /// Transform one commit
    ///
    /// Returns `None` when the commit contributes nothing to the changelog.
    /// Commits must be fed in stream order with the same `state`.
    #[instrument(skip_all, fields(hash = %commit.hash, version = ?commit.version))]
    pub fn transform(
        &self,
        commit: ParsedCommit,
        context: &Context,
        state: &mut TransformState,
    ) -> Option<TransformedCommit> {
        let first_release = match (&commit.version, context.first_release_version()) {
            (Some(version), Some(first)) => version == first,
            _ => false,
        };
        debug!(first_release, commit_type = ?commit.commit_type, "transforming commit");

        if first_release && commit.commit_type.is_none() {
            return Some(self.summarize(commit, context, state));
        }

        if commit.version.is_some() && commit.commit_type.is_none() {
            debug!("commit is a legacy release");
            state.record_legacy(commit);
            return None;
        }

        self.rewrite(commit, context).map(TransformedCommit::Parsed)
    }

    fn rewrite(&self, mut commit: ParsedCommit, context: &Context) -> Option<ParsedCommit> {
        let custom_label = commit
            .commit_type
            .as_ref()
            .and_then(|t| self.custom_types.get(t))
            .cloned();

        if custom_label.is_some() {
            debug!(commit_type = ?commit.commit_type, "routing custom commit type");
            commit.commit_type = Some(FAKE_FIX_TYPE.to_string());
        }

        let mut commit = self.base.transform(commit, context)?;

        commit.commit_type = match custom_label {
            Some(label) => Some(label),
            None => Some(sentence_case(commit.commit_type.as_deref()?)),
        };

        let subject = commit.subject.as_deref().unwrap_or_default();

        if let Some(marker) = self.skip_markers.iter().find(|m| subject.contains(m.as_str())) {
            debug!(marker = %marker, "skip marker in subject");
            return None;
        }

        if commit.commit_type.as_deref() == Some(REVERTS_LABEL) {
            let trimmed = subject.trim();
            if !self.visible_reverts.iter().any(|re| re.is_match(trimmed)) {
                debug!("revert of a hidden type dropped");
                return None;
            }
            commit.subject = Some(format!("*{}*", subject));
        }

        Some(commit)
    }

    fn summarize(
        &self,
        commit: ParsedCommit,
        context: &Context,
        state: &mut TransformState,
    ) -> TransformedCommit {
        let legacy = state.take_legacy();
        debug!(legacy_count = legacy.len(), "summarizing legacy releases");

        let url = context.repository_url().unwrap_or_default();
        let subject = legacy.into_iter().rev().fold(
            format!("Version {}", commit.version.as_deref().unwrap_or_default()),
            |subject, release| {
                format!(
                    "Version {} ([{}]({}/commit/{}))\n\n- {}",
                    release.version.as_deref().unwrap_or_default(),
                    short_hash(&release.hash),
                    url,
                    release.hash,
                    subject
                )
            },
        );

        TransformedCommit::Summary(SynthesizedSummary {
            subject,
            short_hash: short_hash(&commit.hash),
            hash: commit.hash,
        })
    }
}

/// Upper-case the first character
fn sentence_case(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Revert;

    fn transformer() -> CommitTransformer {
        CommitTransformer::new(&ChangelogConfig::default()).unwrap()
    }

    fn context() -> Context {
        Context {
            host: Some("https://github.com".to_string()),
            owner: Some("acme".to_string()),
            repository: Some("widgets".to_string()),
            git_semver_tags: vec![
                "v2.0.0".to_string(),
                "v1.0.0".to_string(),
                "v0.1.0".to_string(),
            ],
            ..Default::default()
        }
    }

    fn typed(commit_type: &str, subject: &str) -> ParsedCommit {
        ParsedCommit {
            hash: "0123456789abcdef".to_string(),
            commit_type: Some(commit_type.to_string()),
            subject: Some(subject.to_string()),
            ..Default::default()
        }
    }

    fn release(version: &str, hash: &str) -> ParsedCommit {
        ParsedCommit {
            hash: hash.to_string(),
            header: Some(format!("Release {}", version)),
            version: Some(version.to_string()),
            ..Default::default()
        }
    }

    fn parsed(out: Option<TransformedCommit>) -> ParsedCommit {
        match out {
            Some(TransformedCommit::Parsed(c)) => c,
            other => panic!("expected parsed commit, got {:?}", other),
        }
    }

    #[test]
    fn test_feature_label_and_hash() {
        let t = transformer();
        let mut state = TransformState::new();
        let out = parsed(t.transform(typed("feat", "add x"), &context(), &mut state));

        assert_eq!(out.commit_type.as_deref(), Some("Features"));
        assert_eq!(out.subject.as_deref(), Some("add x"));
        assert_eq!(out.short_hash.as_deref(), Some("0123456"));
    }

    #[test]
    fn test_skip_markers_drop_commit() {
        let t = transformer();
        let mut state = TransformState::new();
        for marker in ["[skip ci]", "[ci skip]", "[skip github]", "[github skip]"] {
            let commit = typed("fix", &format!("quick fix {}", marker));
            assert!(t.transform(commit, &context(), &mut state).is_none());
        }
    }

    /// Keeps every record untouched
    struct KeepAll;

    impl FieldTransform for KeepAll {
        fn transform(&self, commit: ParsedCommit, _context: &Context) -> Option<ParsedCommit> {
            Some(commit)
        }
    }

    #[test]
    fn test_custom_field_transform() {
        let t = transformer().with_base(KeepAll);
        let mut state = TransformState::new();

        let out = parsed(t.transform(typed("chore", "tidy"), &context(), &mut state));
        assert_eq!(out.commit_type.as_deref(), Some("Chore"));
        assert!(out.short_hash.is_none());

        let commit = typed("chore", "tidy [skip ci]");
        assert!(t.transform(commit, &context(), &mut state).is_none());
    }

    #[test]
    fn test_build_type_is_build_system() {
        let t = transformer();
        let mut state = TransformState::new();
        let out = parsed(t.transform(typed("build", "bump deps"), &context(), &mut state));
        assert_eq!(out.commit_type.as_deref(), Some("Build System"));
    }

    #[test]
    fn test_custom_types_from_config() {
        let mut config = ChangelogConfig::default();
        config
            .custom_types
            .insert("deps".to_string(), "Dependencies".to_string());
        let t = CommitTransformer::new(&config).unwrap();
        let mut state = TransformState::new();

        let out = parsed(t.transform(typed("deps", "bump serde"), &context(), &mut state));
        assert_eq!(out.commit_type.as_deref(), Some("Dependencies"));
    }

    #[test]
    fn test_breaking_chore_is_sentence_cased() {
        let t = transformer();
        let mut state = TransformState::new();
        let mut commit = typed("chore", "drop old runtime");
        commit.notes.push(crate::types::Note {
            title: "BREAKING CHANGE".to_string(),
            text: "runtime gone".to_string(),
        });

        let out = parsed(t.transform(commit, &context(), &mut state));
        assert_eq!(out.commit_type.as_deref(), Some("Chore"));
    }

    #[test]
    fn test_hidden_type_dropped() {
        let t = transformer();
        let mut state = TransformState::new();
        assert!(t
            .transform(typed("chore", "tidy"), &context(), &mut state)
            .is_none());
    }

    #[test]
    fn test_untyped_commit_with_notes_dropped() {
        let t = transformer();
        let mut state = TransformState::new();
        let mut commit = typed("x", "y");
        commit.commit_type = None;
        commit.notes.push(crate::types::Note {
            title: "BREAKING CHANGE".to_string(),
            text: "z".to_string(),
        });
        assert!(t.transform(commit, &context(), &mut state).is_none());
    }

    #[test]
    fn test_revert_of_hidden_type_dropped() {
        let t = transformer();
        let mut state = TransformState::new();
        let commit = typed("revert", "\"chore: tidy\"");
        assert!(t.transform(commit, &context(), &mut state).is_none());
    }

    #[test]
    fn test_revert_of_visible_type_kept() {
        let t = transformer();
        let mut state = TransformState::new();

        let out = parsed(t.transform(typed("revert", "FEAT: add x"), &context(), &mut state));
        assert_eq!(out.commit_type.as_deref(), Some("Reverts"));
        assert_eq!(out.subject.as_deref(), Some("*FEAT: add x*"));

        let out = parsed(t.transform(typed("revert", "\"perf: cache y\""), &context(), &mut state));
        assert_eq!(out.subject.as_deref(), Some("*\"perf: cache y\"*"));
    }

    #[test]
    fn test_git_revert_without_subject_dropped() {
        let t = transformer();
        let mut state = TransformState::new();
        let commit = ParsedCommit {
            hash: "abc".to_string(),
            header: Some("Revert \"feat: add x\"".to_string()),
            revert: Some(Revert {
                header: "feat: add x".to_string(),
                hash: "def".to_string(),
            }),
            ..Default::default()
        };
        assert!(t.transform(commit, &context(), &mut state).is_none());
    }

    #[test]
    fn test_legacy_release_accumulated() {
        let t = transformer();
        let mut state = TransformState::new();

        assert!(t
            .transform(release("0.3.0", "c3"), &context(), &mut state)
            .is_none());
        assert!(t
            .transform(release("0.2.0", "c2"), &context(), &mut state)
            .is_none());

        let versions: Vec<_> = state
            .legacy_releases()
            .iter()
            .map(|c| c.version.as_deref().unwrap())
            .collect();
        assert_eq!(versions, vec!["0.3.0", "0.2.0"]);
        assert_eq!(state.generation(), crate::GenerationFlag::No);
    }

    #[test]
    fn test_typed_first_release_is_not_summarized() {
        let t = transformer();
        let mut state = TransformState::new();
        let mut commit = typed("feat", "initial");
        commit.version = Some("0.1.0".to_string());

        let out = parsed(t.transform(commit, &context(), &mut state));
        assert_eq!(out.commit_type.as_deref(), Some("Features"));
    }

    #[test]
    fn test_summary_nests_legacy_releases() {
        let t = transformer();
        let ctx = context();
        let mut state = TransformState::new();

        t.transform(release("0.3.0", "3333333333"), &ctx, &mut state);
        t.transform(release("0.2.0", "2222222222"), &ctx, &mut state);
        let out = t
            .transform(release("0.1.0", "1111111111"), &ctx, &mut state)
            .unwrap();

        let TransformedCommit::Summary(summary) = out else {
            panic!("expected summary");
        };
        assert_eq!(
            summary.subject,
            "Version 0.3.0 ([3333333](https://github.com/acme/widgets/commit/3333333333))\n\n\
             - Version 0.2.0 ([2222222](https://github.com/acme/widgets/commit/2222222222))\n\n\
             - Version 0.1.0"
        );
        assert_eq!(summary.hash, "1111111111");
        assert_eq!(summary.short_hash, "1111111");
        assert_eq!(summary.subject.matches("](https://").count(), 2);
        assert!(state.legacy_releases().is_empty());
        assert_eq!(state.generation(), crate::GenerationFlag::Always);
    }

    #[test]
    fn test_summary_without_legacy_releases() {
        let t = transformer();
        let mut state = TransformState::new();
        let out = t
            .transform(release("0.1.0", "1111111111"), &context(), &mut state)
            .unwrap();
        assert_eq!(out.subject(), Some("Version 0.1.0"));
        assert_eq!(out.version(), Some("Archived Releases"));
    }

    #[test]
    fn test_empty_tag_list_is_not_first_release() {
        let t = transformer();
        let mut state = TransformState::new();
        let ctx = Context::default();

        assert!(t
            .transform(release("0.1.0", "1111111111"), &ctx, &mut state)
            .is_none());
        assert_eq!(state.legacy_releases().len(), 1);
    }

    #[test]
    fn test_same_input_same_output_after_reset() {
        let t = transformer();
        let ctx = context();
        let mut state = TransformState::new();

        let run = |state: &mut TransformState| {
            t.transform(release("0.2.0", "2222222222"), &ctx, state);
            t.transform(release("0.1.0", "1111111111"), &ctx, state)
        };

        let first = run(&mut state);
        state.reset();
        let second = run(&mut state);
        assert_eq!(first, second);

        state.reset();
        let a = t.transform(typed("fix", "x (#1)"), &ctx, &mut state);
        state.reset();
        let b = t.transform(typed("fix", "x (#1)"), &ctx, &mut state);
        assert_eq!(a, b);
    }

    #[test]
    fn test_sentence_case() {
        assert_eq!(sentence_case("chore"), "Chore");
        assert_eq!(sentence_case("Features"), "Features");
        assert_eq!(sentence_case(""), "");
    }
}
