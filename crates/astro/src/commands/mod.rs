//! CLI command implementations.

mod build;
mod env;
mod health;
mod install;
mod scaffold;
mod serve;

use std::path::Path;
use std::process::ExitCode;

use astro_config::{CliSettings, Config};
use astro_shell::{DocsLayout, VersionSwitcher};
use astro_site::NavigationTree;

use crate::error::CliError;

pub(crate) use build::BuildArgs;
pub(crate) use env::EnvCommand;
pub(crate) use health::HealthArgs;
pub(crate) use install::InstallArgs;
pub(crate) use scaffold::ScaffoldArgs;
pub(crate) use serve::ServeArgs;

/// How a command finished when it did not hit a fatal error.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Completion {
    /// Every item succeeded.
    Clean,
    /// Some items failed; the rest were processed.
    Partial,
}

impl Completion {
    pub(crate) fn from_success(success: bool) -> Self {
        if success { Self::Clean } else { Self::Partial }
    }

    /// Process exit status: 0 clean, 2 partial.
    pub(crate) fn exit_code(self) -> ExitCode {
        match self {
            Self::Clean => ExitCode::SUCCESS,
            Self::Partial => ExitCode::from(2),
        }
    }
}

/// Load `astro.toml` (explicit path or discovered) with CLI overrides.
pub(crate) fn load_config(
    path: Option<&Path>,
    settings: Option<&CliSettings>,
) -> Result<Config, CliError> {
    let config = Config::load(path, settings)?;
    tracing::debug!(
        config = ?config.config_path,
        project_root = %config.project_root.display(),
        "Loaded configuration"
    );
    Ok(config)
}

/// Build the docs shell from the site settings.
pub(crate) fn load_layout(config: &Config) -> Result<DocsLayout, CliError> {
    let site = &config.site_resolved;
    let navigation = NavigationTree::load(&site.navigation)?;
    let versions = VersionSwitcher::new(
        site.versions.clone(),
        site.initial_version().map(str::to_owned),
    );
    Ok(DocsLayout::new(site.title.clone(), navigation, versions))
}

#[cfg(test)]
mod tests {
    use std::fs;

    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_exit_codes() {
        assert_eq!(Completion::from_success(true), Completion::Clean);
        assert_eq!(Completion::from_success(false), Completion::Partial);
        assert_eq!(Completion::Clean.exit_code(), ExitCode::SUCCESS);
        assert_eq!(Completion::Partial.exit_code(), ExitCode::from(2));
    }

    #[test]
    fn test_load_layout_reads_navigation() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(
            dir.path().join("astro.toml"),
            "[site]\ntitle = \"AstroBits\"\nversions = [\"2.0.0\", \"1.0.0\"]\n",
        )
        .unwrap();
        fs::write(
            dir.path().join("navigation.yaml"),
            "sections:\n  - title: Setup\n    items:\n      - title: Install\n        url: /docs/setup/install\n",
        )
        .unwrap();
        let config = load_config(Some(&dir.path().join("astro.toml")), None).unwrap();

        let layout = load_layout(&config).unwrap();

        assert_eq!(layout.navigation().sections[0].title, "Setup");
        let html = layout.render("<p>Body</p>", &[], None);
        assert!(html.contains("<title>Documentation | AstroBits</title>"));
        assert!(html.contains("v2.0.0"));
    }

    #[test]
    fn test_load_config_missing_file_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("absent.toml");

        assert!(matches!(
            load_config(Some(&missing), None),
            Err(CliError::Config(_))
        ));
    }

    #[test]
    fn test_load_layout_missing_navigation_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("astro.toml"), "").unwrap();
        let config = load_config(Some(&dir.path().join("astro.toml")), None).unwrap();

        assert!(matches!(load_layout(&config), Err(CliError::Navigation(_))));
    }
}
