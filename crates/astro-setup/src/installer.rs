//! Component installation.
//!
//! For each [`ComponentInstallSpec`] in order: install its dependencies with
//! the package manager, then fetch the component with the registry CLI.
//! A failing spec is recorded and the batch continues. A missing
//! executable aborts the run. Dependencies already listed in
//! `package.json` with the required range are not reinstalled.

use std::path::{Path, PathBuf};
use std::time::Duration;

use astro_config::InstallConfig;
use astro_scaffold::PageWriter;
use astro_site::{Breadcrumb, FrontMatter, PageError, PageSource};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::analyzer::{DependencyState, PackageManifest, PackageManifestError};
use crate::component::ComponentInstallSpec;
use crate::dependency::DependencySpec;
use crate::manifest::{ManifestError, ensure_manifest};
use crate::runner::{CommandOutcome, CommandRunner, CommandSpec, RunError};

/// Name under which a demo page failure is reported.
const DEMO_PAGE_ITEM: &str = "demo page";

const DEMO_TEMPLATE_NAME: &str = "demo.html";
const DEMO_TEMPLATE: &str = include_str!("../templates/demo.html");

/// Fatal install error.
#[derive(Debug, thiserror::Error)]
pub enum InstallError {
    /// The package manager or registry CLI is not installed.
    #[error("Required tool is not installed: {program}")]
    ToolMissing {
        /// Missing executable.
        program: String,
    },
    /// The manifest could not be created.
    #[error(transparent)]
    Manifest(#[from] ManifestError),
    /// `package.json` exists but could not be read.
    #[error(transparent)]
    Package(#[from] PackageManifestError),
    /// No registry CLI configured.
    #[error("Registry command is empty")]
    EmptyRegistryCommand,
}

/// A component that failed to install.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedComponent {
    /// Component name.
    pub name: String,
    /// Failure description.
    pub reason: String,
}

/// Outcome of an install run, in spec order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct InstallReport {
    /// Components installed.
    pub succeeded: Vec<String>,
    /// Components that failed.
    pub failed: Vec<FailedComponent>,
    /// Whether a default manifest was written.
    pub manifest_created: bool,
    /// Demo page written, if any.
    pub demo_page: Option<PathBuf>,
}

impl InstallReport {
    /// True when nothing failed.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Installs components through a [`CommandRunner`].
pub struct Installer<'a, R, W> {
    runner: R,
    writer: W,
    config: &'a InstallConfig,
    project_root: PathBuf,
}

impl<'a, R: CommandRunner, W: PageWriter> Installer<'a, R, W> {
    /// Create an installer running commands in `project_root`.
    pub fn new(
        runner: R,
        writer: W,
        config: &'a InstallConfig,
        project_root: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            writer,
            config,
            project_root: project_root.into(),
        }
    }

    /// Underlying runner.
    pub fn runner(&self) -> &R {
        &self.runner
    }

    /// Underlying page writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Install every spec in order.
    ///
    /// # Errors
    ///
    /// Returns an error if the manifest cannot be created or a required
    /// executable is missing. Per-component failures are reported, not
    /// returned.
    pub fn install(&self, specs: &[ComponentInstallSpec]) -> Result<InstallReport, InstallError> {
        let mut report = InstallReport {
            manifest_created: ensure_manifest(&self.config.manifest)?,
            ..InstallReport::default()
        };
        let package = PackageManifest::load(&self.config.package_json)?;

        for spec in specs {
            tracing::info!(component = %spec.name, "Installing component");
            match self.install_one(spec, &package) {
                Ok(()) => {
                    tracing::info!(component = %spec.name, "Installed component");
                    report.succeeded.push(spec.name.clone());
                }
                Err(ItemError::Fatal(e)) => return Err(e),
                Err(ItemError::Failed(reason)) => {
                    tracing::warn!(component = %spec.name, %reason, "Failed to install component");
                    report.failed.push(FailedComponent {
                        name: spec.name.clone(),
                        reason,
                    });
                }
            }
        }

        if let Some(path) = &self.config.demo_page {
            let installed: Vec<_> = specs
                .iter()
                .filter(|s| report.succeeded.contains(&s.name))
                .collect();
            if !installed.is_empty() {
                match self.write_demo_page(path, &installed) {
                    Ok(()) => report.demo_page = Some(path.clone()),
                    Err(reason) => {
                        tracing::warn!(path = %path.display(), %reason, "Failed to write demo page");
                        report.failed.push(FailedComponent {
                            name: DEMO_PAGE_ITEM.to_owned(),
                            reason,
                        });
                    }
                }
            }
        }

        Ok(report)
    }

    fn install_one(
        &self,
        spec: &ComponentInstallSpec,
        package: &PackageManifest,
    ) -> Result<(), ItemError> {
        let parsed = spec
            .dependencies
            .iter()
            .map(|d| DependencySpec::parse(d).map(|dep| dep.pinned(&self.config.pins)))
            .collect::<Result<Vec<_>, _>>()
            .map_err(|e| ItemError::Failed(e.to_string()))?;

        let mut dependencies = Vec::with_capacity(parsed.len());
        for dep in parsed {
            if let DependencyState::Satisfied { installed } = package.check(&dep) {
                tracing::debug!(dependency = %dep, %installed, "Dependency already satisfied");
            } else {
                dependencies.push(dep.to_string());
            }
        }

        if !dependencies.is_empty() {
            let args = self.config.install_args.iter().cloned().chain(dependencies);
            self.run(&self.config.package_manager, args)?;
        }

        let Some((program, leading)) = self.config.registry_command.split_first() else {
            return Err(ItemError::Fatal(InstallError::EmptyRegistryCommand));
        };
        let args = leading.iter().cloned().chain([spec.registry.clone()]);
        self.run(program, args)
    }

    fn run(&self, program: &str, args: impl IntoIterator<Item = String>) -> Result<(), ItemError> {
        let command = CommandSpec::new(
            program,
            args,
            &self.project_root,
            Duration::from_secs(self.config.timeout_secs),
        );
        match self.runner.run(&command) {
            Ok(CommandOutcome::Success) => Ok(()),
            Ok(CommandOutcome::Failed(Some(code))) => Err(ItemError::Failed(format!(
                "`{}` exited with status {code}",
                command.display()
            ))),
            Ok(CommandOutcome::Failed(None)) => Err(ItemError::Failed(format!(
                "`{}` was terminated by a signal",
                command.display()
            ))),
            Ok(CommandOutcome::TimedOut) => Err(ItemError::Failed(format!(
                "`{}` timed out after {}s",
                command.display(),
                self.config.timeout_secs
            ))),
            Err(RunError::NotFound { program }) => {
                Err(ItemError::Fatal(InstallError::ToolMissing { program }))
            }
            Err(e @ RunError::Io { .. }) => Err(ItemError::Failed(e.to_string())),
        }
    }

    fn write_demo_page(&self, path: &Path, installed: &[&ComponentInstallSpec]) -> Result<(), String> {
        let content = render_demo_page(installed).map_err(|e| e.to_string())?;
        if let Some(dir) = path.parent() {
            self.writer.ensure_dir(dir).map_err(|e| e.to_string())?;
        }
        self.writer.write(path, &content).map_err(|e| e.to_string())?;
        tracing::info!(path = %path.display(), "Created demo page");
        Ok(())
    }
}

enum ItemError {
    Failed(String),
    Fatal(InstallError),
}

#[derive(Debug, thiserror::Error)]
enum DemoPageError {
    #[error(transparent)]
    Template(#[from] minijinja::Error),
    #[error(transparent)]
    Page(#[from] PageError),
}

#[derive(Serialize)]
struct DemoComponent<'a> {
    name: &'a str,
    description: Option<&'a str>,
    registry: &'a str,
}

/// Demo page listing installed components, in the page source format.
fn render_demo_page(installed: &[&ComponentInstallSpec]) -> Result<String, DemoPageError> {
    let mut env = Environment::new();
    env.add_template(DEMO_TEMPLATE_NAME, DEMO_TEMPLATE)?;
    let components: Vec<_> = installed
        .iter()
        .map(|spec| DemoComponent {
            name: &spec.name,
            description: spec.description.as_deref(),
            registry: &spec.registry,
        })
        .collect();
    let mut body = env
        .get_template(DEMO_TEMPLATE_NAME)?
        .render(context! { components => components })?;
    body.push('\n');

    Ok(PageSource {
        front: FrontMatter {
            title: Some("Installed Components".to_owned()),
            description: Some("Components fetched by the last install run".to_owned()),
            icon: Some("Package".to_owned()),
            breadcrumbs: vec![
                Breadcrumb::link("Home", "/"),
                Breadcrumb::link("Documentation", "/docs"),
                Breadcrumb::link("Components", "/docs/components"),
                Breadcrumb::current("Installed Components"),
            ],
        },
        body,
    }
    .render()?)
}

#[cfg(test)]
mod tests {
    use astro_scaffold::MemoryWriter;
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::mock::MockRunner;

    fn spec(name: &str, registry: &str, deps: &[&str]) -> ComponentInstallSpec {
        ComponentInstallSpec {
            name: name.to_owned(),
            registry: registry.to_owned(),
            dependencies: deps.iter().map(|d| (*d).to_owned()).collect(),
            description: Some(format!("{name} component")),
        }
    }

    fn specs() -> Vec<ComponentInstallSpec> {
        vec![
            spec(
                "background-beams",
                "https://ui.aceternity.com/registry/background-beams.json",
                &["framer-motion@^11.0.0", "clsx"],
            ),
            spec("bogus", "https://ui.aceternity.com/registry/does-not-exist.json", &[]),
            spec(
                "bento-grid",
                "https://ui.aceternity.com/registry/bento-grid.json",
                &["lucide-react@^0.300.0"],
            ),
        ]
    }

    fn config(root: &Path) -> InstallConfig {
        let mut config = InstallConfig::default();
        config.manifest = root.join("components.json");
        config.package_json = root.join("package.json");
        config.pins.insert("lucide-react".to_owned(), "^0.542.0".to_owned());
        config
    }

    #[test]
    fn test_invalid_registry_does_not_abort_batch() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let runner = MockRunner::new().with_outcome("does-not-exist", CommandOutcome::Failed(Some(1)));
        let installer = Installer::new(runner, MemoryWriter::new(), &config, dir.path());

        let report = installer.install(&specs()).unwrap();

        assert_eq!(report.succeeded, vec!["background-beams", "bento-grid"]);
        assert_eq!(report.failed.len(), 1);
        assert_eq!(report.failed[0].name, "bogus");
        assert!(report.failed[0].reason.contains("status 1"));
        assert!(report.manifest_created);
        assert!(dir.path().join("components.json").exists());
    }

    #[test]
    fn test_commands_in_order_with_pins() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let installer = Installer::new(MockRunner::new(), MemoryWriter::new(), &config, dir.path());

        installer.install(&specs()).unwrap();

        assert_eq!(
            installer.runner().calls(),
            vec![
                "npm install --legacy-peer-deps framer-motion@^11.0.0 clsx",
                "npx --yes shadcn@latest add --yes https://ui.aceternity.com/registry/background-beams.json",
                "npx --yes shadcn@latest add --yes https://ui.aceternity.com/registry/does-not-exist.json",
                "npm install --legacy-peer-deps lucide-react@^0.542.0",
                "npx --yes shadcn@latest add --yes https://ui.aceternity.com/registry/bento-grid.json",
            ]
        );
    }

    #[test]
    fn test_dependency_failure_skips_registry_fetch() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let runner = MockRunner::new().with_outcome("framer-motion", CommandOutcome::TimedOut);
        let installer = Installer::new(runner, MemoryWriter::new(), &config, dir.path());

        let report = installer.install(&specs()[..1]).unwrap();

        assert_eq!(report.failed[0].name, "background-beams");
        assert!(report.failed[0].reason.contains("timed out"));
        assert_eq!(installer.runner().calls().len(), 1);
    }

    #[test]
    fn test_missing_package_manager_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let runner = MockRunner::new().with_missing("npm install");
        let installer = Installer::new(runner, MemoryWriter::new(), &config, dir.path());

        let err = installer.install(&specs()).unwrap_err();

        assert!(matches!(err, InstallError::ToolMissing { ref program } if program == "npm"));
        assert_eq!(installer.runner().calls().len(), 1);
    }

    #[test]
    fn test_malformed_dependency_fails_item() {
        let dir = tempfile::tempdir().unwrap();
        let config = config(dir.path());
        let installer = Installer::new(MockRunner::new(), MemoryWriter::new(), &config, dir.path());

        let report = installer
            .install(&[spec("card", "card", &["@radix-ui"]), spec("tabs", "tabs", &[])])
            .unwrap();

        assert_eq!(report.failed[0].name, "card");
        assert_eq!(report.succeeded, vec!["tabs"]);
    }

    #[test]
    fn test_demo_page_lists_installed_components() {
        let dir = tempfile::tempdir().unwrap();
        let mut config = config(dir.path());
        let demo = dir.path().join("app/test-components/page.html");
        config.demo_page = Some(demo.clone());
        let runner = MockRunner::new().with_outcome("does-not-exist", CommandOutcome::Failed(Some(1)));
        let installer = Installer::new(runner, MemoryWriter::new(), &config, dir.path());

        let report = installer.install(&specs()).unwrap();

        assert_eq!(report.demo_page.as_deref(), Some(demo.as_path()));
        let content = installer.writer().content(&demo).unwrap();
        let page = PageSource::parse(&content).unwrap();
        assert_eq!(page.title(), "Installed Components");
        assert!(page.body.contains("data-component=\"background-beams\""));
        assert!(page.body.contains("data-component=\"bento-grid\""));
        assert!(!page.body.contains("data-component=\"bogus\""));
    }

    #[test]
    fn test_satisfied_dependencies_not_reinstalled() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(
            dir.path().join("package.json"),
            r#"{"dependencies": {"framer-motion": "^11.0.0", "clsx": "^2.1.1", "lucide-react": "^0.300.0"}}"#,
        )
        .unwrap();
        let config = config(dir.path());
        let installer = Installer::new(MockRunner::new(), MemoryWriter::new(), &config, dir.path());

        let report = installer
            .install(&[specs()[0].clone(), specs()[2].clone()])
            .unwrap();

        assert_eq!(report.succeeded, vec!["background-beams", "bento-grid"]);
        assert_eq!(
            installer.runner().calls(),
            vec![
                "npx --yes shadcn@latest add --yes https://ui.aceternity.com/registry/background-beams.json",
                "npm install --legacy-peer-deps lucide-react@^0.542.0",
                "npx --yes shadcn@latest add --yes https://ui.aceternity.com/registry/bento-grid.json",
            ]
        );
    }

    #[test]
    fn test_unreadable_package_json_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("package.json"), "{ broken").unwrap();
        let config = config(dir.path());
        let installer = Installer::new(MockRunner::new(), MemoryWriter::new(), &config, dir.path());

        let err = installer.install(&specs()).unwrap_err();

        assert!(matches!(err, InstallError::Package(_)));
        assert!(installer.runner().calls().is_empty());
    }

    #[test]
    fn test_demo_page_escapes_component_text() {
        let mut component = spec("quote's", "https://example.com/<x>.json", &[]);
        component.description = Some("Tom & Jerry's <b>cards</b>".to_owned());

        let content = render_demo_page(&[&component]).unwrap();
        let page = PageSource::parse(&content).unwrap();

        assert!(page.body.contains("data-component=\"quote&#x27;s\""));
        assert!(page.body.contains("Tom &amp; Jerry&#x27;s &lt;b&gt;cards&lt;"));
        assert!(page.body.contains("&lt;x&gt;.json"));
        assert!(!page.body.contains("<b>"));
    }

    #[test]
    fn test_existing_manifest_kept() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("components.json"), "{}").unwrap();
        let config = config(dir.path());
        let installer = Installer::new(MockRunner::new(), MemoryWriter::new(), &config, dir.path());

        let report = installer.install(&[]).unwrap();

        assert!(!report.manifest_created);
        assert!(report.is_success());
    }
}
