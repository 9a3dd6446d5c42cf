//! Static site builder.
//!
//! Renders every page of a [`Site`] through the [`DocsLayout`] into a
//! directory of `index.html` files plus the shell stylesheet.

use std::fs;
use std::path::{Path, PathBuf};

use astro_site::Site;

use crate::layout::{DocsLayout, STYLESHEET};

/// Error returned by the static site builder.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// The output tree could not be prepared.
    #[error("Failed to prepare {}: {source}", path.display())]
    Io {
        /// Path being created or written.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
}

/// A page that could not be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedPage {
    /// Page route.
    pub route: String,
    /// Failure description.
    pub reason: String,
}

/// Outcome of a build.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct BuildReport {
    /// Files written, in route order.
    pub written: Vec<PathBuf>,
    /// Pages that failed.
    pub failed: Vec<FailedPage>,
}

impl BuildReport {
    /// True when every page was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Builds a static documentation site.
pub struct StaticSiteBuilder<'a> {
    layout: &'a DocsLayout,
    output_dir: PathBuf,
}

impl<'a> StaticSiteBuilder<'a> {
    /// Create a builder writing below `output_dir`.
    pub fn new(layout: &'a DocsLayout, output_dir: impl Into<PathBuf>) -> Self {
        Self {
            layout,
            output_dir: output_dir.into(),
        }
    }

    /// Render every page plus the 404 page and stylesheet.
    ///
    /// Individual page failures are collected in the report.
    ///
    /// # Errors
    ///
    /// Returns an error if the output directory, stylesheet or 404 page
    /// cannot be written.
    pub fn build(&self, site: &Site) -> Result<BuildReport, BuildError> {
        create_dir(&self.output_dir)?;

        let mut report = BuildReport::default();
        for page in site.pages() {
            let path = self.output_path(&page.route);
            let html = self.layout.render_page(page);
            match write_file(&path, &html) {
                Ok(()) => {
                    tracing::debug!(route = %page.route, path = %path.display(), "Wrote page");
                    report.written.push(path);
                }
                Err(e) => {
                    tracing::warn!(route = %page.route, error = %e, "Failed to write page");
                    report.failed.push(FailedPage {
                        route: page.route.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }

        let not_found = self.output_dir.join("404.html");
        write_file(&not_found, &self.layout.render_not_found("/404"))?;
        report.written.push(not_found);

        let stylesheet = self.output_dir.join("assets").join("shell.css");
        write_file(&stylesheet, STYLESHEET)?;
        report.written.push(stylesheet);

        tracing::info!(
            written = report.written.len(),
            failed = report.failed.len(),
            output = %self.output_dir.display(),
            "Build finished"
        );
        Ok(report)
    }

    /// `index.html` path for a route.
    fn output_path(&self, route: &str) -> PathBuf {
        let mut path = self.output_dir.clone();
        for segment in route.split('/').filter(|s| !s.is_empty()) {
            path.push(segment);
        }
        path.join("index.html")
    }
}

fn create_dir(path: &Path) -> Result<(), BuildError> {
    fs::create_dir_all(path).map_err(|source| BuildError::Io {
        path: path.to_owned(),
        source,
    })
}

fn write_file(path: &Path, content: &str) -> Result<(), BuildError> {
    if let Some(parent) = path.parent() {
        create_dir(parent)?;
    }
    fs::write(path, content).map_err(|source| BuildError::Io {
        path: path.to_owned(),
        source,
    })
}
