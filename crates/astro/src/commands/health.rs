//! `astro health` command implementation.

use std::path::PathBuf;

use astro_setup::{
    ENV_FILE, HealthChecker, HealthReport, LayeredEnv, ProcessEnv, Status, SystemRunner, Verdict,
};
use clap::Args;

use super::{Completion, load_config};
use crate::error::CliError;
use crate::output::{Output, Tone};

/// Arguments for the health command.
#[derive(Args)]
pub(crate) struct HealthArgs {
    /// Path to configuration file (default: auto-discover astro.toml).
    #[arg(short, long, env = "ASTRO_CONFIG")]
    config: Option<PathBuf>,
}

impl HealthArgs {
    pub(crate) fn execute(self) -> Result<Completion, CliError> {
        let output = Output::new();
        let config = load_config(self.config.as_deref(), None)?;

        let env = LayeredEnv::from_file(&config.project_root.join(ENV_FILE), ProcessEnv)?;
        let checker = HealthChecker::new(
            SystemRunner,
            env,
            &config.project_root,
            &config.install_resolved.manifest,
            &config.install_resolved.components_dir,
        );
        let report = checker.run();

        print_report(&output, &config.site_resolved.title, &report);

        Ok(Completion::from_success(report.is_success()))
    }
}

fn status_icon(status: Status) -> &'static str {
    match status {
        Status::Working => "✅",
        Status::Warning => "⚠️ ",
        Status::Failed => "❌",
    }
}

fn status_tone(status: Status) -> Tone {
    match status {
        Status::Working => Tone::Success,
        Status::Warning => Tone::Warning,
        Status::Failed => Tone::Error,
    }
}

fn print_report(output: &Output, product: &str, report: &HealthReport) {
    output.highlight(&format!("{product} - Health Check Report"));
    output.separator();

    for category in report.categories() {
        output.info("");
        output.highlight(&format!(
            "{} ({}/{} working - {}%)",
            category.name,
            category.working,
            category.total,
            category.percentage()
        ));
        for result in report.in_category(category.name) {
            output.line(
                status_tone(result.status),
                &format!(
                    "  {} {}: {}",
                    status_icon(result.status),
                    result.name,
                    result.message
                ),
            );
        }
    }

    output.info("");
    output.highlight("Overall Health Summary");
    output.separator();
    output.info(&format!(
        "Overall Health: {}% ({}/{} services working)",
        report.overall_percentage(),
        report.count(Status::Working),
        report.results.len()
    ));
    output.success(&format!("Working: {}", report.count(Status::Working)));
    output.warning(&format!("Warnings: {}", report.count(Status::Warning)));
    output.error(&format!("Failed: {}", report.count(Status::Failed)));

    let mut recommendations = report.recommendations().peekable();
    if recommendations.peek().is_some() {
        output.info("");
        output.highlight("Recommendations");
        output.separator();
        for result in recommendations {
            output.line(
                status_tone(result.status),
                &format!("{} {}: {}", status_icon(result.status), result.name, result.message),
            );
        }
    }

    output.info("");
    match report.verdict() {
        Verdict::Excellent => output.success("Excellent! The project is ready for development."),
        Verdict::Good => {
            output.warning("Good! The project is mostly ready. Fix the warnings for the full setup.");
        }
        Verdict::NeedsAttention => {
            output.error("The project needs attention. Fix the failed services before proceeding.");
        }
    }
}
