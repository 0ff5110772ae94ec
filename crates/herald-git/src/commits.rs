//! Commit history operations

use std::collections::HashMap;

use chrono::{TimeZone, Utc};
use git2::{Oid, Sort};
use tracing::{debug, instrument};

use herald_core::error::GitError;

use crate::repository::{GitRepo, Result};
use crate::types::CommitInfo;

impl GitRepo {
    /// Get all commits reachable from HEAD, newest first, with their tags attached
    #[instrument(skip(self))]
    pub fn all_commits(&self) -> Result<Vec<CommitInfo>> {
        let head = self.head_commit()?;
        let mut tags = self.tags_by_commit()?;

        let mut commits = Vec::new();
        for oid in self.walk_from(head.id())? {
            let commit = self.repo.find_commit(oid)?;
            let mut info = commit_to_info(&commit);
            if let Some(names) = tags.remove(&info.hash) {
                info.tags = names;
            }
            commits.push(info);
        }

        debug!(count = commits.len(), "read commit history");
        Ok(commits)
    }

    /// Full messages of every commit reachable from `HEAD~1`, newest first
    ///
    /// Returns an empty list when HEAD has no parent.
    #[instrument(skip(self))]
    pub fn messages_before_head(&self) -> Result<Vec<String>> {
        let head = self.head_commit()?;
        let Ok(parent) = head.parent(0) else {
            return Ok(Vec::new());
        };

        let mut messages = Vec::new();
        for oid in self.walk_from(parent.id())? {
            let commit = self.repo.find_commit(oid)?;
            messages.push(commit.message().unwrap_or_default().to_string());
        }

        debug!(count = messages.len(), "read earlier commit messages");
        Ok(messages)
    }

    /// Read the message of the commit currently being created
    /// (`.git/COMMIT_EDITMSG`)
    pub fn pending_commit_message(&self) -> Result<String> {
        let path = self.git_dir().join("COMMIT_EDITMSG");
        match std::fs::read_to_string(&path) {
            Ok(message) => Ok(message),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                Err(GitError::MessageFileNotFound(path))
            }
            Err(e) => Err(GitError::Io(e)),
        }
    }

    fn walk_from(&self, start: Oid) -> Result<Vec<Oid>> {
        let mut revwalk = self.repo.revwalk()?;
        revwalk.set_sorting(Sort::TOPOLOGICAL | Sort::TIME)?;
        revwalk.push(start)?;
        revwalk
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(GitError::Git2)
    }

    /// Map of commit hash to the names of tags pointing at it
    pub fn tags_by_commit(&self) -> Result<HashMap<String, Vec<String>>> {
        let mut map: HashMap<String, Vec<String>> = HashMap::new();
        for tag in self.tags()? {
            map.entry(tag.commit_hash).or_default().push(tag.name);
        }
        Ok(map)
    }
}

/// Convert a git2 Commit to CommitInfo
fn commit_to_info(commit: &git2::Commit<'_>) -> CommitInfo {
    let hash = commit.id().to_string();
    let author = commit.author();

    let raw = commit.message().unwrap_or_default();
    let message = raw
        .lines()
        .next()
        .map(str::trim)
        .filter(|line| !line.is_empty())
        .unwrap_or("(no message)")
        .to_string();

    let timestamp = Utc
        .timestamp_opt(commit.time().seconds(), 0)
        .single()
        .unwrap_or_else(Utc::now);

    let mut info = CommitInfo::new(
        hash,
        message,
        author.name().unwrap_or("Unknown"),
        author.email().unwrap_or("unknown@example.com"),
        timestamp,
    );

    if !raw.trim().is_empty() {
        info = info.with_raw_message(raw);
    }

    match commit.body() {
        Some(body) => info.with_body(body),
        None => info,
    }
}
