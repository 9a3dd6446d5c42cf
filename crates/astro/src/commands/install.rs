//! `astro install` command implementation.

use std::path::PathBuf;

use astro_scaffold::FsWriter;
use astro_setup::{
    DependencyReport, DependencyState, Installer, PackageManifest, SystemRunner, analyze,
    load_components,
};
use clap::Args;

use super::{Completion, load_config};
use crate::error::CliError;
use crate::output::Output;

/// Arguments for the install command.
#[derive(Args)]
pub(crate) struct InstallArgs {
    /// Path to configuration file (default: auto-discover astro.toml).
    #[arg(short, long, env = "ASTRO_CONFIG")]
    config: Option<PathBuf>,

    /// Install only the named components (repeatable).
    #[arg(long = "only", value_name = "NAME")]
    only: Vec<String>,

    /// Compare component dependencies with package.json and exit without
    /// installing anything.
    #[arg(long)]
    analyze: bool,
}

impl InstallArgs {
    pub(crate) fn execute(self) -> Result<Completion, CliError> {
        let output = Output::new();
        let config = load_config(self.config.as_deref(), None)?;

        let mut specs = load_components(&config.install_resolved.components)?;
        if !self.only.is_empty() {
            specs.retain(|spec| self.only.contains(&spec.name));
        }

        if self.analyze {
            let package = PackageManifest::load(&config.install_resolved.package_json)?;
            let report = analyze(&specs, &package, &config.install_resolved.pins);
            print_analysis(&output, &report);
            return Ok(Completion::from_success(report.is_success()));
        }

        output.highlight(&format!("Installing {} components...", specs.len()));

        let installer = Installer::new(
            SystemRunner,
            FsWriter::new(&config.project_root),
            &config.install_resolved,
            &config.project_root,
        );
        let report = installer.install(&specs)?;

        if report.manifest_created {
            output.info(&format!(
                "Created {}",
                config.install_resolved.manifest.display()
            ));
        }
        for name in &report.succeeded {
            output.success(&format!("  {name}"));
        }
        for failure in &report.failed {
            output.error(&format!("  {}: {}", failure.name, failure.reason));
        }
        if let Some(path) = &report.demo_page {
            output.info(&format!("Demo page: {}", path.display()));
        }

        output.separator();
        output.info(&format!(
            "Installed {} components, {} failed",
            report.succeeded.len(),
            report.failed.len()
        ));

        Ok(Completion::from_success(report.is_success()))
    }
}

fn print_analysis(output: &Output, report: &DependencyReport) {
    output.highlight("Component dependency analysis");
    output.separator();

    for component in &report.components {
        if component.is_ready() {
            output.success(&format!("✅ {}: Ready", component.name));
            continue;
        }
        output.warning(&format!("⚠️  {}: Needs update", component.name));
        for check in &component.checks {
            match &check.state {
                DependencyState::Satisfied { .. } => {}
                DependencyState::Missing => output.info(&format!("   Missing: {}", check.spec)),
                DependencyState::Conflict { installed } => {
                    output.info(&format!("   Conflict: {} (installed {installed})", check.spec));
                }
                DependencyState::Invalid { reason } => output.error(&format!("   {reason}")),
            }
        }
    }

    output.separator();
    output.info(&format!(
        "{}/{} components ready",
        report.ready_count(),
        report.components.len()
    ));
    let pending = report.to_install();
    if !pending.is_empty() {
        output.detail(&format!("To install: {}", pending.join(" ")));
    }
}
