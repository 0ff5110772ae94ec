//! Changelog command

use std::path::PathBuf;

use clap::Args;
use console::style;
use tracing::{debug, info};

use herald_changelog::{ChangelogGenerator, Context};
use herald_core::config::{load_config_or_default, Config};
use herald_core::error::{ChangelogError, GitError};
use herald_git::{CommitInfo, GitRepo, RemoteInfo};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Generate the changelog from git history
#[derive(Debug, Args)]
pub struct ChangelogCommand {
    /// Version label for commits after the latest release
    #[arg(long = "for-version", value_name = "VERSION")]
    pub for_version: Option<String>,

    /// Release date for those commits (default: today when a version is given)
    #[arg(long, value_name = "YYYY-MM-DD")]
    pub date: Option<String>,

    /// Write to file (default: print to stdout)
    #[arg(short, long)]
    pub write: bool,

    /// Output file (defaults to configured changelog file)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl ChangelogCommand {
    /// Execute the changelog command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(version = ?self.for_version, write = self.write, "executing changelog command");
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);

        let repo = GitRepo::discover(&cwd)?;
        let commits = load_commits(&repo)?;

        if commits.is_empty() {
            if !cli.quiet {
                println!("{}", style("No commits found.").yellow());
            }
            return Ok(());
        }

        let context = build_context(&repo, &config, self.for_version.clone(), self.release_date())?;
        let generator = ChangelogGenerator::new(&config)?;
        let entries = generator.generate(&commits, &context);

        if self.write {
            let output_path = self
                .output
                .clone()
                .unwrap_or_else(|| cwd.join(&config.changelog.file));
            let document = generator.format_document(&entries, &context);

            std::fs::write(&output_path, &document).map_err(|source| {
                ChangelogError::WriteFailed {
                    path: output_path.clone(),
                    source,
                }
            })?;

            if !cli.quiet {
                output::success(&format!(
                    "Changelog written to {}",
                    output::path_style().apply_to(output_path.display())
                ));
            }
            return Ok(());
        }

        match cli.format {
            OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&entries)?),
            OutputFormat::Text => print!("{}", generator.format_document(&entries, &context)),
        }

        Ok(())
    }

    fn release_date(&self) -> Option<String> {
        self.date.clone().or_else(|| {
            self.for_version
                .as_ref()
                .map(|_| chrono::Local::now().format("%Y-%m-%d").to_string())
        })
    }
}

/// Commit history, empty when HEAD has no commits yet
fn load_commits(repo: &GitRepo) -> herald_git::Result<Vec<CommitInfo>> {
    match repo.all_commits() {
        Err(GitError::NoCommits) => Ok(Vec::new()),
        result => result,
    }
}

/// Assemble the transformation context from the repository and configuration
///
/// A configured `repository_url` takes precedence over the remote.
fn build_context(
    repo: &GitRepo,
    config: &Config,
    version: Option<String>,
    date: Option<String>,
) -> herald_git::Result<Context> {
    let configured = config.changelog.repository_url.as_deref();
    let remote = match configured.and_then(RemoteInfo::parse) {
        Some(info) => Some(info),
        None => repo.remote_info(&config.git.remote).unwrap_or_else(|e| {
            debug!(remote = %config.git.remote, error = %e, "no usable remote");
            None
        }),
    };

    let git_semver_tags = repo.semver_tags()?;
    debug!(tag_count = git_semver_tags.len(), remote = ?remote, "built changelog context");

    Ok(Context {
        host: remote.as_ref().map(|r| r.host.clone()),
        owner: remote.as_ref().map(|r| r.owner.clone()),
        repository: remote.map(|r| r.repository),
        repo_url: configured.map(str::to_string),
        version,
        date,
        git_semver_tags,
    })
}
