//! `astro build` command implementation.

use std::path::PathBuf;

use astro_config::CliSettings;
use astro_shell::StaticSiteBuilder;
use astro_site::Site;
use clap::Args;

use super::{Completion, load_config, load_layout};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the build command.
#[derive(Args)]
pub(crate) struct BuildArgs {
    /// Path to configuration file (default: auto-discover astro.toml).
    #[arg(short, long, env = "ASTRO_CONFIG")]
    config: Option<PathBuf>,

    /// Output directory for the generated site (overrides config).
    #[arg(short, long)]
    output_dir: Option<PathBuf>,

    /// Pages root directory (overrides config).
    #[arg(long)]
    pages_dir: Option<PathBuf>,
}

impl BuildArgs {
    pub(crate) fn execute(self) -> Result<Completion, CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            pages_dir: self.pages_dir,
            output_dir: self.output_dir,
            ..CliSettings::default()
        };
        let config = load_config(self.config.as_deref(), Some(&cli_settings))?;

        output.info(&format!(
            "Source: {}",
            config.site_resolved.pages_dir.display()
        ));
        output.info(&format!("Output: {}", config.output_dir.display()));

        let layout = load_layout(&config)?;
        let site = Site::load(
            &config.site_resolved.pages_dir,
            &config.site_resolved.page_file,
        )?;

        let report = StaticSiteBuilder::new(&layout, &config.output_dir).build(&site)?;

        for failure in &report.failed {
            output.error(&format!("  {}: {}", failure.route, failure.reason));
        }
        if report.is_success() {
            output.success(&format!(
                "Built {} pages to {}",
                report.written.len(),
                config.output_dir.display()
            ));
        } else {
            output.warning(&format!(
                "Built {} pages, {} failed",
                report.written.len(),
                report.failed.len()
            ));
        }

        Ok(Completion::from_success(report.is_success()))
    }
}
