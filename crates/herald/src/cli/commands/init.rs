//! Init command

use std::path::{Path, PathBuf};

use clap::Args;
use tracing::info;

use herald_core::config::defaults::{DEFAULT_CONFIG_TEMPLATE, DEFAULT_CONFIG_TOML};
use herald_core::config::Config;

use crate::cli::output;
use crate::cli::Cli;

/// Write a default Herald configuration
#[derive(Debug, Args)]
pub struct InitCommand {
    /// Force overwrite existing configuration
    #[arg(short, long)]
    pub force: bool,

    /// Output file path (`.yaml`/`.yml` writes YAML)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

impl InitCommand {
    /// Execute the init command
    pub fn execute(&self, cli: &Cli) -> anyhow::Result<()> {
        info!(force = self.force, output = ?self.output, "executing init command");
        let cwd = std::env::current_dir()?;
        let config_path = self
            .output
            .clone()
            .unwrap_or_else(|| cwd.join(DEFAULT_CONFIG_TOML));

        if config_path.exists() && !self.force {
            anyhow::bail!(
                "Configuration file already exists at {}. Use --force to overwrite.",
                config_path.display()
            );
        }

        std::fs::write(&config_path, render_config(&config_path)?)?;

        if !cli.quiet {
            output::success(&format!(
                "Created configuration at {}",
                output::path_style().apply_to(config_path.display())
            ));
            output::info("Add `herald spellcheck \"$1\"` to your commit-msg hook to check messages");
        }

        Ok(())
    }
}

/// Default configuration in the format implied by the file extension
fn render_config(path: &Path) -> anyhow::Result<String> {
    let yaml = path
        .extension()
        .is_some_and(|e| e == "yaml" || e == "yml");

    if yaml {
        Ok(serde_yaml::to_string(&Config::default())?)
    } else {
        Ok(DEFAULT_CONFIG_TEMPLATE.to_string())
    }
}
