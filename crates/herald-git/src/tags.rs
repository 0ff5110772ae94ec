//! Tag operations

use tracing::{debug, instrument};

use crate::repository::{GitRepo, Result};
use crate::types::TagInfo;

impl GitRepo {
    /// Get all tags, resolved to the commit they point at
    #[instrument(skip(self))]
    pub fn tags(&self) -> Result<Vec<TagInfo>> {
        let mut tags = Vec::new();

        self.repo.tag_foreach(|oid, name| {
            let name = String::from_utf8_lossy(name)
                .trim_start_matches("refs/tags/")
                .to_string();

            if let Ok(commit) = self.repo.find_commit(oid) {
                tags.push(TagInfo::new(&name, commit.id().to_string()));
            } else if let Ok(tag) = self.repo.find_tag(oid) {
                // Annotated tag
                let target = tag
                    .target()
                    .and_then(|t| t.peel_to_commit())
                    .map(|c| c.id())
                    .unwrap_or_else(|_| tag.target_id());
                let mut tag_info = TagInfo::new(&name, target.to_string());

                if let Some(msg) = tag.message() {
                    tag_info = tag_info.with_message(msg);
                }

                tags.push(tag_info);
            }

            true
        })?;

        debug!(count = tags.len(), "listed all tags");
        Ok(tags)
    }

    /// Names of all semantic-version tags, most recent version first
    #[instrument(skip(self))]
    pub fn semver_tags(&self) -> Result<Vec<String>> {
        let mut versioned: Vec<_> = self
            .tags()?
            .into_iter()
            .filter_map(|t| t.semver().map(|v| (v, t.name)))
            .collect();

        versioned.sort_by(|a, b| b.0.cmp(&a.0).then_with(|| a.1.cmp(&b.1)));

        let names: Vec<String> = versioned.into_iter().map(|(_, name)| name).collect();
        debug!(count = names.len(), oldest = ?names.last(), "listed semver tags");
        Ok(names)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use git2::{Repository, Signature};
    use std::path::Path;
    use tempfile::TempDir;

    fn setup_repo_with_tags() -> (TempDir, GitRepo) {
        let temp = TempDir::new().unwrap();
        let repo = Repository::init(temp.path()).unwrap();

        let sig = Signature::now("Test", "test@example.com").unwrap();

        std::fs::write(temp.path().join("file.txt"), "content").unwrap();
        let mut index = repo.index().unwrap();
        index.add_path(Path::new("file.txt")).unwrap();
        index.write().unwrap();

        let tree_id = index.write_tree().unwrap();
        let tree = repo.find_tree(tree_id).unwrap();

        let oid = repo
            .commit(Some("HEAD"), &sig, &sig, "Initial commit", &tree, &[])
            .unwrap();

        let commit = repo.find_commit(oid).unwrap();
        repo.tag_lightweight("v1.0.0", commit.as_object(), false)
            .unwrap();
        repo.tag_lightweight("v1.10.0", commit.as_object(), false)
            .unwrap();
        repo.tag("v1.2.0", commit.as_object(), &sig, "Release 1.2.0", false)
            .unwrap();
        repo.tag_lightweight("nightly", commit.as_object(), false)
            .unwrap();

        let git_repo = GitRepo::open(temp.path()).unwrap();
        (temp, git_repo)
    }

    #[test]
    fn test_list_tags() {
        let (_temp, repo) = setup_repo_with_tags();
        let tags = repo.tags().unwrap();
        assert_eq!(tags.len(), 4);

        let annotated = tags.iter().find(|t| t.name == "v1.2.0").unwrap();
        assert_eq!(annotated.message.as_deref(), Some("Release 1.2.0"));
        let head = repo.head_commit().unwrap().id().to_string();
        assert_eq!(annotated.commit_hash, head);
    }

    #[test]
    fn test_semver_tags_sorted_newest_first() {
        let (_temp, repo) = setup_repo_with_tags();
        let tags = repo.semver_tags().unwrap();
        assert_eq!(tags, vec!["v1.10.0", "v1.2.0", "v1.0.0"]);
    }

    #[test]
    fn test_tags_by_commit() {
        let (_temp, repo) = setup_repo_with_tags();
        let map = repo.tags_by_commit().unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map.values().next().unwrap().len(), 4);
    }
}
