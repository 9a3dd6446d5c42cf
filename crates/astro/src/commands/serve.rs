//! `astro serve` command implementation.

use std::path::PathBuf;

use astro_config::CliSettings;
use astro_server::{run_server, server_config_from_astro_config};
use astro_site::Site;
use clap::Args;

use super::{Completion, load_config, load_layout};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the serve command.
#[derive(Args)]
pub(crate) struct ServeArgs {
    /// Path to configuration file (default: auto-discover astro.toml).
    #[arg(short, long, env = "ASTRO_CONFIG")]
    config: Option<PathBuf>,

    /// Pages root directory (overrides config).
    #[arg(long)]
    pages_dir: Option<PathBuf>,

    /// Host to bind to (overrides config).
    #[arg(long)]
    host: Option<String>,

    /// Port to bind to (overrides config).
    #[arg(short, long)]
    port: Option<u16>,
}

impl ServeArgs {
    /// Execute the serve command.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration, navigation or pages fail to load,
    /// or the server fails to start.
    pub(crate) async fn execute(self) -> Result<Completion, CliError> {
        let output = Output::new();

        let cli_settings = CliSettings {
            host: self.host,
            port: self.port,
            pages_dir: self.pages_dir,
            ..CliSettings::default()
        };
        let config = load_config(self.config.as_deref(), Some(&cli_settings))?;

        let layout = load_layout(&config)?;
        let site = Site::load(
            &config.site_resolved.pages_dir,
            &config.site_resolved.page_file,
        )?;

        output.info(&format!(
            "Starting server on {}:{}",
            config.server.host, config.server.port
        ));
        output.info(&format!(
            "Pages directory: {} ({} pages)",
            config.site_resolved.pages_dir.display(),
            site.len()
        ));

        let server_config = server_config_from_astro_config(&config);
        run_server(server_config, site, layout).await?;

        Ok(Completion::Clean)
    }
}
