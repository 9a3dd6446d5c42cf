//! Development environment health check.
//!
//! Checks a fixed table of services (credentials, local tools, project
//! files) and summarizes the results per category and overall.

use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::env::Environment;
use crate::manifest::Manifest;
use crate::runner::{CommandOutcome, CommandRunner, CommandSpec, RunError};

const COMMAND_TIMEOUT: Duration = Duration::from_secs(15);
const WRITE_TEST_FILE: &str = ".astro-health-write-test";

/// How a service is checked.
#[derive(Debug, Clone, Copy)]
pub enum CheckKind {
    /// Every listed variable is configured. Missing ones are a warning.
    EnvVars(&'static [&'static str]),
    /// The command exits successfully.
    Command(&'static str, &'static [&'static str]),
    /// The project directory accepts writes.
    WritableDir,
    /// The UI framework manifest exists and parses.
    Manifest,
    /// Component sources are present in the components directory.
    ComponentFiles,
}

/// A checked service.
#[derive(Debug, Clone, Copy)]
pub struct Service {
    /// Display name.
    pub name: &'static str,
    /// Report category.
    pub category: &'static str,
    /// What the service provides.
    pub description: &'static str,
    /// Check to run.
    pub check: CheckKind,
}

/// Services checked by [`HealthChecker::run`], in report order.
pub const SERVICES: &[Service] = &[
    Service {
        name: "Context7",
        category: "Documentation",
        description: "Real-time documentation access",
        check: CheckKind::EnvVars(&["CONTEXT7_API_KEY"]),
    },
    Service {
        name: "File System",
        category: "Development",
        description: "Safe file operations",
        check: CheckKind::WritableDir,
    },
    Service {
        name: "Git",
        category: "Development",
        description: "Repository operations",
        check: CheckKind::Command("git", &["status"]),
    },
    Service {
        name: "Node.js",
        category: "Development",
        description: "JavaScript runtime",
        check: CheckKind::Command("node", &["--version"]),
    },
    Service {
        name: "npm",
        category: "Development",
        description: "Package manager",
        check: CheckKind::Command("npm", &["--version"]),
    },
    Service {
        name: "GitHub",
        category: "Development",
        description: "Repository hosting API",
        check: CheckKind::EnvVars(&["GITHUB_TOKEN"]),
    },
    Service {
        name: "Shadcn/UI",
        category: "UI Libraries",
        description: "Backbone components",
        check: CheckKind::Manifest,
    },
    Service {
        name: "Aceternity UI",
        category: "UI Libraries",
        description: "Animations & effects",
        check: CheckKind::ComponentFiles,
    },
    Service {
        name: "Clerk",
        category: "Authentication",
        description: "User authentication",
        check: CheckKind::EnvVars(&["NEXT_PUBLIC_CLERK_PUBLISHABLE_KEY", "CLERK_SECRET_KEY"]),
    },
    Service {
        name: "Supabase",
        category: "Database",
        description: "Database operations",
        check: CheckKind::EnvVars(&["NEXT_PUBLIC_SUPABASE_URL", "NEXT_PUBLIC_SUPABASE_ANON_KEY"]),
    },
    Service {
        name: "Stripe",
        category: "Payments",
        description: "Payment processing",
        check: CheckKind::EnvVars(&["STRIPE_SECRET_KEY"]),
    },
    Service {
        name: "Notion",
        category: "External",
        description: "Notion API",
        check: CheckKind::EnvVars(&["NOTION_API_KEY"]),
    },
    Service {
        name: "Sentry",
        category: "Monitoring",
        description: "Error tracking",
        check: CheckKind::EnvVars(&["SENTRY_DSN"]),
    },
];

/// Result status of a check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Status {
    /// Ready to use.
    Working,
    /// Usable but not configured.
    Warning,
    /// Broken or missing.
    Failed,
}

/// Outcome for one service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceResult {
    /// Service name.
    pub name: &'static str,
    /// Report category.
    pub category: &'static str,
    /// Check status.
    pub status: Status,
    /// Human-readable detail.
    pub message: String,
}

/// Per-category tally.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategorySummary {
    /// Category name.
    pub name: &'static str,
    /// Working services.
    pub working: usize,
    /// All services in the category.
    pub total: usize,
}

impl CategorySummary {
    /// Rounded share of working services.
    #[must_use]
    pub fn percentage(&self) -> u32 {
        percentage(self.working, self.total)
    }
}

/// Overall readiness band.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// 90% or more working.
    Excellent,
    /// 70% or more working.
    Good,
    /// Below 70%.
    NeedsAttention,
}

/// Full health report.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HealthReport {
    /// Results in service order.
    pub results: Vec<ServiceResult>,
}

impl HealthReport {
    /// Categories in first-appearance order.
    #[must_use]
    pub fn categories(&self) -> Vec<CategorySummary> {
        let mut categories: Vec<CategorySummary> = Vec::new();
        for result in &self.results {
            let index = match categories.iter().position(|c| c.name == result.category) {
                Some(index) => index,
                None => {
                    categories.push(CategorySummary {
                        name: result.category,
                        working: 0,
                        total: 0,
                    });
                    categories.len() - 1
                }
            };
            categories[index].total += 1;
            if result.status == Status::Working {
                categories[index].working += 1;
            }
        }
        categories
    }

    /// Results in `category`.
    pub fn in_category<'a>(&'a self, category: &'a str) -> impl Iterator<Item = &'a ServiceResult> {
        self.results.iter().filter(move |r| r.category == category)
    }

    /// Number of results with `status`.
    #[must_use]
    pub fn count(&self, status: Status) -> usize {
        self.results.iter().filter(|r| r.status == status).count()
    }

    /// Rounded share of working services.
    #[must_use]
    pub fn overall_percentage(&self) -> u32 {
        percentage(self.count(Status::Working), self.results.len())
    }

    /// Readiness band for the overall percentage.
    #[must_use]
    pub fn verdict(&self) -> Verdict {
        match self.overall_percentage() {
            90.. => Verdict::Excellent,
            70..=89 => Verdict::Good,
            _ => Verdict::NeedsAttention,
        }
    }

    /// Failed and warning results, in service order.
    pub fn recommendations(&self) -> impl Iterator<Item = &ServiceResult> {
        self.results.iter().filter(|r| r.status != Status::Working)
    }

    /// True when no check failed. Warnings do not count as failures.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.count(Status::Failed) == 0
    }
}

fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    let rounded = (part * 100 + total / 2) / total;
    u32::try_from(rounded).unwrap_or(u32::MAX)
}

/// Runs the service checks.
pub struct HealthChecker<R, E> {
    runner: R,
    env: E,
    project_root: PathBuf,
    manifest: PathBuf,
    components_dir: PathBuf,
}

impl<R: CommandRunner, E: Environment> HealthChecker<R, E> {
    /// Create a checker for a project.
    pub fn new(
        runner: R,
        env: E,
        project_root: impl Into<PathBuf>,
        manifest: impl Into<PathBuf>,
        components_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            runner,
            env,
            project_root: project_root.into(),
            manifest: manifest.into(),
            components_dir: components_dir.into(),
        }
    }

    /// Check every service in [`SERVICES`].
    #[must_use]
    pub fn run(&self) -> HealthReport {
        self.run_services(SERVICES)
    }

    /// Check the given services in order.
    #[must_use]
    pub fn run_services(&self, services: &[Service]) -> HealthReport {
        let results = services
            .iter()
            .map(|service| {
                let (status, message) = self.run_check(service.check);
                tracing::debug!(service = service.name, ?status, %message, "Checked service");
                ServiceResult {
                    name: service.name,
                    category: service.category,
                    status,
                    message,
                }
            })
            .collect();
        HealthReport { results }
    }

    fn run_check(&self, check: CheckKind) -> (Status, String) {
        match check {
            CheckKind::EnvVars(keys) => self.check_env(keys),
            CheckKind::Command(program, args) => self.check_command(program, args),
            CheckKind::WritableDir => self.check_writable(),
            CheckKind::Manifest => self.check_manifest(),
            CheckKind::ComponentFiles => self.check_components(),
        }
    }

    fn check_env(&self, keys: &[&str]) -> (Status, String) {
        let missing: Vec<_> = keys
            .iter()
            .copied()
            .filter(|key| self.env.configured(key).is_none())
            .collect();
        if missing.is_empty() {
            (Status::Working, "Credentials configured".to_owned())
        } else {
            (Status::Warning, format!("Not configured: {}", missing.join(", ")))
        }
    }

    fn check_command(&self, program: &str, args: &[&str]) -> (Status, String) {
        let spec = CommandSpec::new(program, args.iter().copied(), &self.project_root, COMMAND_TIMEOUT)
            .quiet();
        match self.runner.run(&spec) {
            Ok(CommandOutcome::Success) => (Status::Working, format!("`{}` succeeded", spec.display())),
            Ok(CommandOutcome::Failed(code)) => (
                Status::Failed,
                format!(
                    "`{}` failed{}",
                    spec.display(),
                    code.map(|c| format!(" with status {c}")).unwrap_or_default()
                ),
            ),
            Ok(CommandOutcome::TimedOut) => (Status::Failed, format!("`{}` timed out", spec.display())),
            Err(RunError::NotFound { program }) => (Status::Failed, format!("{program} is not installed")),
            Err(e) => (Status::Failed, e.to_string()),
        }
    }

    fn check_writable(&self) -> (Status, String) {
        let test_file = self.project_root.join(WRITE_TEST_FILE);
        let result = fs::write(&test_file, "ok").and_then(|()| fs::remove_file(&test_file));
        match result {
            Ok(()) => (Status::Working, "Project directory is writable".to_owned()),
            Err(e) => (Status::Failed, format!("Cannot write to {}: {e}", self.project_root.display())),
        }
    }

    fn check_manifest(&self) -> (Status, String) {
        if !self.manifest.exists() {
            return (
                Status::Warning,
                format!("{} not found (run `astro install`)", self.manifest.display()),
            );
        }
        match Manifest::load(&self.manifest) {
            Ok(manifest) => (Status::Working, format!("Manifest present (style: {})", manifest.style)),
            Err(e) => (Status::Failed, e.to_string()),
        }
    }

    fn check_components(&self) -> (Status, String) {
        let names = component_files(&self.components_dir);
        if names.is_empty() {
            (
                Status::Warning,
                format!("No components in {}", self.components_dir.display()),
            )
        } else {
            (
                Status::Working,
                format!("{} components: {}", names.len(), names.join(", ")),
            )
        }
    }
}

/// Component source files (`.tsx`/`.jsx`) in `dir`, sorted.
fn component_files(dir: &Path) -> Vec<String> {
    let Ok(entries) = fs::read_dir(dir) else {
        return Vec::new();
    };
    let mut names: Vec<String> = entries
        .filter_map(Result::ok)
        .filter_map(|e| e.file_name().into_string().ok())
        .filter(|name| {
            Path::new(name)
                .extension()
                .is_some_and(|ext| ext == "tsx" || ext == "jsx")
        })
        .collect();
    names.sort();
    names
}
