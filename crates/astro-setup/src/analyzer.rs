//! Component dependency analysis against `package.json`.
//!
//! Each dependency a component declares is compared with what the project
//! already lists. A dependency is satisfied when it is listed and, if a
//! range is required, the listed range is exactly that range. A listed
//! dependency with a different range is a conflict and gets reinstalled.

use std::collections::BTreeMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::component::ComponentInstallSpec;
use crate::dependency::DependencySpec;

/// Dependencies declared by a project's `package.json`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageManifest {
    /// Runtime dependencies.
    #[serde(default)]
    pub dependencies: BTreeMap<String, String>,
    /// Development dependencies.
    #[serde(default)]
    pub dev_dependencies: BTreeMap<String, String>,
}

/// `package.json` loading error.
#[derive(Debug, thiserror::Error)]
pub enum PackageManifestError {
    /// The file exists but could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Manifest path.
        path: PathBuf,
        /// Underlying I/O error.
        source: io::Error,
    },
    /// The file is not valid JSON.
    #[error("Invalid package manifest {}: {source}", path.display())]
    Json {
        /// Manifest path.
        path: PathBuf,
        /// Parse error.
        source: serde_json::Error,
    },
}

impl PackageManifest {
    /// Load `path`. A missing file is an empty manifest.
    ///
    /// # Errors
    ///
    /// Returns an error if the file exists but cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, PackageManifestError> {
        let content = match fs::read_to_string(path) {
            Ok(content) => content,
            Err(e) if e.kind() == io::ErrorKind::NotFound => return Ok(Self::default()),
            Err(source) => {
                return Err(PackageManifestError::Io {
                    path: path.to_owned(),
                    source,
                });
            }
        };
        serde_json::from_str(&content).map_err(|source| PackageManifestError::Json {
            path: path.to_owned(),
            source,
        })
    }

    /// Listed range for `name`. Runtime dependencies win over dev ones.
    #[must_use]
    pub fn installed(&self, name: &str) -> Option<&str> {
        self.dependencies
            .get(name)
            .or_else(|| self.dev_dependencies.get(name))
            .map(String::as_str)
    }

    /// Compare one dependency with the listed ones.
    #[must_use]
    pub fn check(&self, dependency: &DependencySpec) -> DependencyState {
        match (self.installed(&dependency.name), &dependency.range) {
            (None, _) => DependencyState::Missing,
            (Some(installed), Some(required)) if installed != required => {
                DependencyState::Conflict {
                    installed: installed.to_owned(),
                }
            }
            (Some(installed), _) => DependencyState::Satisfied {
                installed: installed.to_owned(),
            },
        }
    }
}

/// How a required dependency relates to the project.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DependencyState {
    /// Listed with a compatible range.
    Satisfied {
        /// Listed range.
        installed: String,
    },
    /// Not listed.
    Missing,
    /// Listed with a different range than required.
    Conflict {
        /// Listed range.
        installed: String,
    },
    /// The specifier could not be parsed.
    Invalid {
        /// Parse failure.
        reason: String,
    },
}

/// One dependency of a component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyCheck {
    /// Specifier after pins are applied (the raw text when invalid).
    pub spec: String,
    /// Comparison result.
    pub state: DependencyState,
}

/// Dependency checks for one component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ComponentAnalysis {
    /// Component name.
    pub name: String,
    /// Checks in declaration order.
    pub checks: Vec<DependencyCheck>,
}

impl ComponentAnalysis {
    /// True when every dependency is satisfied.
    #[must_use]
    pub fn is_ready(&self) -> bool {
        self.checks
            .iter()
            .all(|c| matches!(c.state, DependencyState::Satisfied { .. }))
    }

    /// Checks whose state matches `predicate`.
    pub fn filter<'a>(
        &'a self,
        predicate: impl Fn(&DependencyState) -> bool + 'a,
    ) -> impl Iterator<Item = &'a DependencyCheck> {
        self.checks.iter().filter(move |c| predicate(&c.state))
    }
}

/// Analysis of every component, in list order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DependencyReport {
    /// Per-component results.
    pub components: Vec<ComponentAnalysis>,
}

impl DependencyReport {
    /// Components needing no installs.
    #[must_use]
    pub fn ready_count(&self) -> usize {
        self.components.iter().filter(|c| c.is_ready()).count()
    }

    /// Unique specifiers that still need installing, in first-seen order.
    #[must_use]
    pub fn to_install(&self) -> Vec<String> {
        let mut specs: Vec<String> = Vec::new();
        let pending = self.components.iter().flat_map(|c| {
            c.filter(|s| matches!(s, DependencyState::Missing | DependencyState::Conflict { .. }))
        });
        for check in pending {
            if !specs.contains(&check.spec) {
                specs.push(check.spec.clone());
            }
        }
        specs
    }

    /// True when no specifier was invalid.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.components.iter().all(|c| {
            c.filter(|s| matches!(s, DependencyState::Invalid { .. }))
                .next()
                .is_none()
        })
    }
}

/// Compare the dependencies of `specs` with `package`, applying `pins`.
#[must_use]
pub fn analyze(
    specs: &[ComponentInstallSpec],
    package: &PackageManifest,
    pins: &BTreeMap<String, String>,
) -> DependencyReport {
    let components = specs
        .iter()
        .map(|spec| ComponentAnalysis {
            name: spec.name.clone(),
            checks: spec
                .dependencies
                .iter()
                .map(|raw| match DependencySpec::parse(raw) {
                    Ok(dep) => {
                        let dep = dep.pinned(pins);
                        DependencyCheck {
                            state: package.check(&dep),
                            spec: dep.to_string(),
                        }
                    }
                    Err(e) => DependencyCheck {
                        spec: raw.clone(),
                        state: DependencyState::Invalid {
                            reason: e.to_string(),
                        },
                    },
                })
                .collect(),
        })
        .collect();
    DependencyReport { components }
}
