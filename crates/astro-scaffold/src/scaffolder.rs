//! Batch page generation.

use std::path::{Path, PathBuf};

use crate::ScaffoldError;
use crate::descriptor::PageDescriptor;
use crate::render::render_page;
use crate::writer::PageWriter;

/// A page that was written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldedPage {
    /// File path.
    pub path: PathBuf,
    /// Route the page is served at.
    pub route: String,
    /// Whether the page's directory had to be created.
    pub created_dir: bool,
}

/// A page that could not be generated.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldFailure {
    /// File path from the descriptor.
    pub path: String,
    /// Failure description.
    pub reason: String,
}

/// Outcome of a scaffolding run, in descriptor order.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    /// Pages written.
    pub written: Vec<ScaffoldedPage>,
    /// Pages that failed.
    pub failed: Vec<ScaffoldFailure>,
}

impl ScaffoldReport {
    /// True when every page was written.
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.failed.is_empty()
    }
}

/// Generates placeholder pages through a [`PageWriter`].
pub struct Scaffolder<W> {
    writer: W,
}

impl<W: PageWriter> Scaffolder<W> {
    /// Create a scaffolder writing through `writer`.
    pub fn new(writer: W) -> Self {
        Self { writer }
    }

    /// Underlying writer.
    pub fn writer(&self) -> &W {
        &self.writer
    }

    /// Generate every page in order.
    ///
    /// Existing files are overwritten. A failing page is recorded and the
    /// remaining pages are still generated.
    pub fn generate(&self, descriptors: &[PageDescriptor]) -> ScaffoldReport {
        let mut report = ScaffoldReport::default();
        for descriptor in descriptors {
            match self.generate_one(descriptor) {
                Ok(page) => {
                    if page.created_dir {
                        tracing::info!(dir = %parent_of(&page.path).display(), "Created directory");
                    }
                    tracing::info!(path = %page.path.display(), route = %page.route, "Created page");
                    report.written.push(page);
                }
                Err(e) => {
                    tracing::warn!(path = %descriptor.path, error = %e, "Failed to create page");
                    report.failed.push(ScaffoldFailure {
                        path: descriptor.path.clone(),
                        reason: e.to_string(),
                    });
                }
            }
        }
        report
    }

    fn generate_one(&self, descriptor: &PageDescriptor) -> Result<ScaffoldedPage, ScaffoldError> {
        let rendered = render_page(descriptor)?;
        let path = PathBuf::from(&rendered.path);

        let dir = parent_of(&path);
        let created_dir = self
            .writer
            .ensure_dir(dir)
            .map_err(|source| ScaffoldError::Io {
                path: dir.to_owned(),
                source,
            })?;
        self.writer
            .write(&path, &rendered.content)
            .map_err(|source| ScaffoldError::Io {
                path: path.clone(),
                source,
            })?;

        Ok(ScaffoldedPage {
            path,
            route: rendered.route,
            created_dir,
        })
    }
}

fn parent_of(path: &Path) -> &Path {
    path.parent().unwrap_or_else(|| Path::new(""))
}
