//! Herald Git - Git access for changelog and commit tooling
//!
//! This crate wraps git2 to read commit history, version tags, remote
//! metadata and the message of the commit being created.

mod commits;
mod remote;
mod repository;
mod tags;
pub mod types;

pub use remote::RemoteInfo;
pub use repository::{GitRepo, Result};
pub use types::{CommitInfo, TagInfo};
