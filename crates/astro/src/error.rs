//! CLI error types.

use astro_config::ConfigError;
use astro_scaffold::ScaffoldError;
use astro_server::ServerError;
use astro_setup::{ComponentsError, EnvFileError, InstallError, PackageManifestError};
use astro_shell::BuildError;
use astro_site::{NavigationError, SiteError};

/// CLI error type. Every variant is fatal and exits with status 1.
#[derive(Debug, thiserror::Error)]
pub(crate) enum CliError {
    #[error("{0}")]
    Config(#[from] ConfigError),

    #[error("{0}")]
    Io(#[from] std::io::Error),

    #[error("{0}")]
    Navigation(#[from] NavigationError),

    #[error("{0}")]
    Site(#[from] SiteError),

    #[error("{0}")]
    Build(#[from] BuildError),

    #[error("{0}")]
    Scaffold(#[from] ScaffoldError),

    #[error("{0}")]
    Components(#[from] ComponentsError),

    #[error("{0}")]
    Install(#[from] InstallError),

    #[error("{0}")]
    Package(#[from] PackageManifestError),

    #[error("{0}")]
    EnvFile(#[from] EnvFileError),

    #[error("{0}")]
    Server(#[from] ServerError),
}
