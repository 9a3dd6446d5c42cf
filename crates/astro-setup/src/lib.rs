//! Project setup tooling for AstroBits docs.
//!
//! - [`Installer`] fetches UI components through the package manager and
//!   the component registry CLI, tolerating per-component failures.
//! - [`analyze`] compares component dependencies with `package.json`.
//! - [`HealthChecker`] checks credentials, local tools and project files.
//! - [`write_env_template`] creates a placeholder `.env.local`.
//!
//! Subprocesses run through the [`CommandRunner`] trait; [`SystemRunner`]
//! spawns real processes with a timeout, `MockRunner` (behind the `mock`
//! feature) scripts outcomes for tests.

mod analyzer;
mod component;
mod dependency;
mod env;
mod health;
mod installer;
mod manifest;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod runner;

pub use analyzer::{
    ComponentAnalysis, DependencyCheck, DependencyReport, DependencyState, PackageManifest,
    PackageManifestError, analyze,
};
pub use component::{ComponentInstallSpec, ComponentsError, load_components};
pub use dependency::{DependencyError, DependencySpec};
pub use env::{
    ENV_FILE, ENV_TEMPLATE, EnvFileError, Environment, LayeredEnv, ProcessEnv, parse_env_file,
    write_env_template,
};
pub use health::{
    CategorySummary, CheckKind, HealthChecker, HealthReport, SERVICES, Service, ServiceResult, Status,
    Verdict,
};
pub use installer::{FailedComponent, InstallError, InstallReport, Installer};
pub use manifest::{Aliases, Manifest, ManifestError, TailwindConfig, ensure_manifest};
#[cfg(any(test, feature = "mock"))]
pub use mock::MockRunner;
pub use runner::{CommandOutcome, CommandRunner, CommandSpec, RunError, SystemRunner};
