//! `astro scaffold` command implementation.

use std::path::PathBuf;

use astro_scaffold::{FsWriter, Scaffolder, load_descriptors};
use clap::Args;

use super::{Completion, load_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the scaffold command.
#[derive(Args)]
pub(crate) struct ScaffoldArgs {
    /// Path to configuration file (default: auto-discover astro.toml).
    #[arg(short, long, env = "ASTRO_CONFIG")]
    config: Option<PathBuf>,

    /// Page descriptor file (overrides config).
    #[arg(short, long)]
    descriptors: Option<PathBuf>,
}

impl ScaffoldArgs {
    pub(crate) fn execute(self) -> Result<Completion, CliError> {
        let output = Output::new();
        let config = load_config(self.config.as_deref(), None)?;

        let descriptors_path = self
            .descriptors
            .unwrap_or_else(|| config.scaffold_resolved.descriptors.clone());
        let pages_dir = &config.site_resolved.pages_dir;
        let pages_root = pages_dir
            .strip_prefix(&config.project_root)
            .unwrap_or(pages_dir)
            .to_string_lossy()
            .into_owned();
        let descriptors = load_descriptors(&descriptors_path, &pages_root)?;

        output.highlight(&format!(
            "Creating {} placeholder pages...",
            descriptors.len()
        ));

        let scaffolder = Scaffolder::new(FsWriter::new(&config.project_root));
        let report = scaffolder.generate(&descriptors);

        for page in &report.written {
            if page.created_dir {
                output.detail(&format!("  created directory for {}", page.route));
            }
            output.success(&format!("  {} -> {}", page.path.display(), page.route));
        }
        for failure in &report.failed {
            output.error(&format!("  {}: {}", failure.path, failure.reason));
        }

        output.separator();
        output.info(&format!(
            "Created {} pages, {} failed",
            report.written.len(),
            report.failed.len()
        ));

        Ok(Completion::from_success(report.is_success()))
    }
}
