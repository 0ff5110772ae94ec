//! Spellcheck command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::{info, warn};

use herald_core::config::{load_config_or_default, SpellcheckConfig};
use herald_git::GitRepo;
use herald_spellcheck::{find_typos, IgnoreSources, IgnoreWords, TypoReport, WordList};

use crate::cli::output;
use crate::cli::{Cli, OutputFormat};

/// Warn about likely typos in the pending commit message
///
/// Meant for a `commit-msg` hook: problems are reported but the command
/// always succeeds.
#[derive(Debug, Args)]
pub struct SpellcheckCommand {
    /// Message file to check (default: .git/COMMIT_EDITMSG)
    #[arg(value_name = "FILE")]
    pub message_file: Option<PathBuf>,

    /// Word list to check against (overrides configuration)
    #[arg(long, value_name = "PATH")]
    pub dictionary: Option<PathBuf>,
}

impl SpellcheckCommand {
    /// Execute the spellcheck command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(message_file = ?self.message_file, "executing spellcheck command");

        if let Err(e) = self.run(cli) {
            warn!(error = %e, "spellcheck skipped");
            if !cli.quiet {
                output::warning(&format!("Spellcheck skipped: {}", e));
            }
        }
        Ok(())
    }

    fn run(&self, cli: &Cli) -> anyhow::Result<()> {
        let cwd = std::env::current_dir()?;
        let (config, _) = load_config_or_default(&cwd);
        let repo = GitRepo::discover(&cwd).ok();

        let message = match (&self.message_file, &repo) {
            (Some(path), _) => std::fs::read_to_string(path)?,
            (None, Some(repo)) => repo.pending_commit_message()?,
            (None, None) => anyhow::bail!("not inside a git repository"),
        };

        let previous_messages = match &repo {
            Some(repo) => repo.messages_before_head().unwrap_or_else(|e| {
                warn!(error = %e, "could not read earlier commit messages");
                Vec::new()
            }),
            None => Vec::new(),
        };
        let project_dir = repo.as_ref().map_or(cwd.as_path(), |r| r.path());

        let (typos, report) = check_message(
            &message,
            project_dir,
            dirs::home_dir(),
            previous_messages,
            &config.spellcheck,
            self.dictionary.as_deref(),
        )?;

        match cli.format {
            OutputFormat::Json => {
                println!("{}", serde_json::json!({ "typos": typos }));
            }
            OutputFormat::Text => {
                if !cli.quiet {
                    for line in report.lines() {
                        eprintln!("{}", output::typo_style().apply_to(line));
                    }
                }
            }
        }

        Ok(())
    }
}

/// Spellcheck a message, returning the typos and their rendered report
fn check_message(
    message: &str,
    project_dir: &Path,
    home_dir: Option<PathBuf>,
    previous_messages: Vec<String>,
    config: &SpellcheckConfig,
    dictionary: Option<&Path>,
) -> anyhow::Result<(Vec<String>, TypoReport)> {
    let dictionary = WordList::load(dictionary.unwrap_or(&config.dictionary))?;

    let sources = IgnoreSources::new(project_dir)
        .with_home_dir(home_dir)
        .with_ignore_file(&config.ignore_file)
        .with_previous_messages(previous_messages);
    let ignore = IgnoreWords::collect(&sources);

    let text = strip_comments(message);
    let typos = find_typos(&text, &dictionary, &ignore);
    let report = TypoReport::new(&typos, &dictionary, config.max_typos, config.max_suggestions);

    Ok((typos, report))
}

/// Drop the `#` comment lines git adds to the message template
fn strip_comments(message: &str) -> String {
    message
        .lines()
        .filter(|line| !line.starts_with('#'))
        .collect::<Vec<_>>()
        .join("\n")
}
