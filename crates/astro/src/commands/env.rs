//! `astro env` subcommand group.

use std::path::PathBuf;

use astro_setup::{ENV_FILE, write_env_template};
use clap::{Args, Subcommand};

use super::{Completion, load_config};
use crate::error::CliError;
use crate::output::Output;

/// Environment file commands.
#[derive(Subcommand)]
pub(crate) enum EnvCommand {
    /// Write a placeholder `.env.local`.
    Init(InitArgs),
}

impl EnvCommand {
    /// Execute the env subcommand.
    pub(crate) fn execute(self) -> Result<Completion, CliError> {
        match self {
            Self::Init(args) => args.execute(),
        }
    }
}

/// Arguments for `env init`.
#[derive(Args)]
pub(crate) struct InitArgs {
    /// Path to configuration file (default: auto-discover astro.toml).
    #[arg(short, long, env = "ASTRO_CONFIG")]
    config: Option<PathBuf>,

    /// Overwrite an existing file.
    #[arg(long)]
    force: bool,
}

impl InitArgs {
    fn execute(self) -> Result<Completion, CliError> {
        let output = Output::new();
        let config = load_config(self.config.as_deref(), None)?;

        let path = config.project_root.join(ENV_FILE);
        write_env_template(&path, self.force)?;

        output.success(&format!("Created {}", path.display()));
        output.info("Replace the placeholder values with your credentials.");
        Ok(Completion::Clean)
    }
}
