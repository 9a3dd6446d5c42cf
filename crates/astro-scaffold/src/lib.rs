//! Placeholder page scaffolding for AstroBits docs.
//!
//! Turns a list of [`PageDescriptor`]s into page files in the site's page
//! source format. Each page gets a hero block, a "Coming Soon" card and a
//! breadcrumb trail derived from its path. Writes go through the
//! [`PageWriter`] trait so generation can run against the filesystem
//! ([`FsWriter`]) or memory ([`MemoryWriter`], behind the `mock` feature).

use std::path::PathBuf;

use astro_site::PageError;

mod descriptor;
#[cfg(any(test, feature = "mock"))]
mod mock;
mod render;
mod scaffolder;
mod writer;

pub use descriptor::{PageDescriptor, load_descriptors};
#[cfg(any(test, feature = "mock"))]
pub use mock::MemoryWriter;
pub use render::{RenderedPage, breadcrumbs_for, render_page};
pub use scaffolder::{ScaffoldFailure, ScaffoldReport, ScaffoldedPage, Scaffolder};
pub use writer::{FsWriter, PageWriter};

/// Scaffolding error.
#[derive(Debug, thiserror::Error)]
pub enum ScaffoldError {
    /// A file or directory operation failed.
    #[error("{}: {source}", path.display())]
    Io {
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The descriptor list could not be parsed.
    #[error("Invalid descriptor file {}: {message}", path.display())]
    Descriptors {
        /// Descriptor file.
        path: PathBuf,
        /// Parse error.
        message: String,
    },
    /// A descriptor path is absolute, escapes the project, or lies outside
    /// the pages root.
    #[error("Unsafe page path {path}: {reason}")]
    UnsafePath {
        /// Descriptor path.
        path: String,
        /// What is wrong with it.
        reason: String,
    },
    /// No section segment for the breadcrumb trail.
    #[error("No documentation section in path {path}")]
    MissingSection {
        /// Descriptor path.
        path: String,
    },
    /// Template rendering failed.
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
    /// Generated front matter could not be serialized.
    #[error(transparent)]
    Page(#[from] PageError),
}
