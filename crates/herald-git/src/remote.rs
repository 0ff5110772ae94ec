//! Remote operations

use serde::{Deserialize, Serialize};

use herald_core::error::GitError;

use crate::repository::{GitRepo, Result};

impl GitRepo {
    /// Get the URL for a remote
    pub fn remote_url(&self, name: &str) -> Result<Option<String>> {
        match self.repo.find_remote(name) {
            Ok(remote) => Ok(remote.url().map(|s| s.to_string())),
            Err(e) if e.code() == git2::ErrorCode::NotFound => {
                Err(GitError::RemoteNotFound(name.to_string()))
            }
            Err(e) => Err(GitError::Git2(e)),
        }
    }

    /// Repository identity derived from a remote URL
    pub fn remote_info(&self, name: &str) -> Result<Option<RemoteInfo>> {
        Ok(self.remote_url(name)?.as_deref().and_then(RemoteInfo::parse))
    }
}

/// Hosting location of a repository, split from its remote URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RemoteInfo {
    /// Web host including scheme, e.g. `https://github.com`
    pub host: String,
    /// Owning user or organisation
    pub owner: String,
    /// Repository name without `.git`
    pub repository: String,
}

impl RemoteInfo {
    /// Parse `git@host:owner/repo.git`, `ssh://git@host/owner/repo` or
    /// `https://host/owner/repo(.git)`
    pub fn parse(url: &str) -> Option<Self> {
        let url = url.trim().trim_end_matches('/');

        let (host, path) = if let Some(rest) = url.split_once("://").map(|(_, rest)| rest) {
            let rest = rest.rsplit_once('@').map_or(rest, |(_, r)| r);
            rest.split_once('/')?
        } else {
            let rest = url.rsplit_once('@').map_or(url, |(_, r)| r);
            rest.split_once(':')?
        };

        // Drop an explicit port from the host
        let host = host.split(':').next()?;
        let path = path.strip_suffix(".git").unwrap_or(path);
        let (owner, repository) = path.rsplit_once('/')?;

        if host.is_empty() || owner.is_empty() || repository.is_empty() {
            return None;
        }

        Some(Self {
            host: format!("https://{}", host),
            owner: owner.to_string(),
            repository: repository.to_string(),
        })
    }

    /// Browsable repository URL
    pub fn url(&self) -> String {
        format!("{}/{}/{}", self.host, self.owner, self.repository)
    }
}
