//! Git repository operations

use std::path::{Path, PathBuf};

use git2::Repository;
use tracing::{debug, instrument};

use herald_core::error::GitError;

/// Result type for git operations
pub type Result<T> = std::result::Result<T, GitError>;

/// Handle on the repository Herald reads history from
pub struct GitRepo {
    pub(crate) repo: Repository,
    path: PathBuf,
}

impl GitRepo {
    /// Open the repository rooted at `path`
    #[instrument(skip_all, fields(path = %path.display()))]
    pub fn open(path: &Path) -> Result<Self> {
        Repository::open(path)
            .map(Self::wrap)
            .map_err(|e| match e.code() {
                git2::ErrorCode::NotFound => GitError::RepositoryNotFound(path.to_path_buf()),
                _ => GitError::OpenFailed(e.to_string()),
            })
    }

    /// Find the repository containing `start_path`, searching upwards
    #[instrument(skip_all, fields(start_path = %start_path.display()))]
    pub fn discover(start_path: &Path) -> Result<Self> {
        Repository::discover(start_path)
            .map(Self::wrap)
            .map_err(|e| match e.code() {
                git2::ErrorCode::NotFound => GitError::NotARepository(start_path.to_path_buf()),
                _ => GitError::OpenFailed(e.to_string()),
            })
    }

    fn wrap(repo: Repository) -> Self {
        let path = repo.workdir().unwrap_or_else(|| repo.path()).to_path_buf();
        debug!(path = %path.display(), "opened git repository");
        Self { repo, path }
    }

    /// Working tree root, or the git directory of a bare repository
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The `.git` directory
    pub fn git_dir(&self) -> &Path {
        self.repo.path()
    }

    /// Commit HEAD points at; an unborn branch is [`GitError::NoCommits`]
    pub fn head_commit(&self) -> Result<git2::Commit<'_>> {
        let head = self.repo.head().map_err(|e| match e.code() {
            git2::ErrorCode::UnbornBranch => GitError::NoCommits,
            _ => GitError::Git2(e),
        })?;
        head.peel_to_commit().map_err(GitError::Git2)
    }
}
