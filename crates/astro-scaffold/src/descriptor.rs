//! Page descriptors: what a placeholder page should say and where it goes.

use std::fs;
use std::path::{Component, Path};

use astro_site::{route_for_page_path, route_for_relative_path};
use serde::Deserialize;

use crate::ScaffoldError;

/// A placeholder page to generate.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct PageDescriptor {
    /// Target file path, relative to the project root
    /// (e.g. `app/docs/mcp/servers/page.html`).
    pub path: String,
    /// Page title.
    pub title: String,
    /// One-line description shown below the title.
    pub description: String,
    /// Icon name from the site's icon set.
    pub icon: String,
    /// Section segment; derived from `path` when absent.
    #[serde(default)]
    pub section: Option<String>,
    /// Subsection segment; derived from `path` when absent.
    #[serde(default)]
    pub subsection: Option<String>,
    /// Pages root `path` must lie under, relative to the project root.
    #[serde(skip, default = "default_pages_root")]
    pub pages_root: String,
}

fn default_pages_root() -> String {
    "app".to_owned()
}

impl PageDescriptor {
    /// Create a descriptor with positional section derivation.
    pub fn new(
        path: impl Into<String>,
        title: impl Into<String>,
        description: impl Into<String>,
        icon: impl Into<String>,
    ) -> Self {
        Self {
            path: path.into(),
            title: title.into(),
            description: description.into(),
            icon: icon.into(),
            section: None,
            subsection: None,
            pages_root: default_pages_root(),
        }
    }

    /// Use `pages_root` instead of `app`.
    #[must_use]
    pub fn with_pages_root(mut self, pages_root: impl Into<String>) -> Self {
        self.pages_root = pages_root.into();
        self
    }

    /// Route the generated page is served at.
    #[must_use]
    pub fn route(&self) -> String {
        route_for_page_path(&self.path, &self.pages_root)
            .unwrap_or_else(|| route_for_relative_path(&self.path))
    }

    /// Check that `path` is relative, stays inside the project and lies
    /// under the pages root.
    ///
    /// # Errors
    ///
    /// Returns `ScaffoldError::UnsafePath` naming the first problem found.
    pub fn validate(&self) -> Result<(), ScaffoldError> {
        let unsafe_path = |reason: String| ScaffoldError::UnsafePath {
            path: self.path.clone(),
            reason,
        };
        let normalized = self.path.replace('\\', "/");
        let path = Path::new(&normalized);

        for component in path.components() {
            match component {
                Component::RootDir | Component::Prefix(_) => {
                    return Err(unsafe_path("absolute paths are not allowed".to_owned()));
                }
                Component::ParentDir => {
                    return Err(unsafe_path("'..' components are not allowed".to_owned()));
                }
                Component::CurDir | Component::Normal(_) => {}
            }
        }
        if route_for_page_path(&normalized, &self.pages_root).is_none() {
            return Err(unsafe_path(format!("not below pages root {}", self.pages_root)));
        }
        Ok(())
    }

    /// Section segment: explicit, or the first segment below `/docs`.
    #[must_use]
    pub fn section(&self) -> Option<String> {
        if let Some(section) = &self.section {
            return Some(section.clone());
        }
        self.docs_segments().first().cloned()
    }

    /// Subsection segment: explicit, or the second segment below `/docs`.
    #[must_use]
    pub fn subsection(&self) -> Option<String> {
        if let Some(subsection) = &self.subsection {
            return Some(subsection.clone());
        }
        self.docs_segments().get(1).cloned()
    }

    fn docs_segments(&self) -> Vec<String> {
        let route = self.route();
        let mut segments = route.split('/').filter(|s| !s.is_empty());
        if segments.next() != Some("docs") {
            return Vec::new();
        }
        segments.map(str::to_owned).collect()
    }
}

/// Load a YAML list of descriptors whose pages live under `pages_root`.
///
/// # Errors
///
/// Returns an error if the file cannot be read, is not a descriptor list,
/// or any descriptor path fails [`PageDescriptor::validate`].
pub fn load_descriptors(
    path: &Path,
    pages_root: &str,
) -> Result<Vec<PageDescriptor>, ScaffoldError> {
    let content = fs::read_to_string(path).map_err(|source| ScaffoldError::Io {
        path: path.to_owned(),
        source,
    })?;
    let descriptors: Vec<PageDescriptor> =
        serde_yaml::from_str(&content).map_err(|e| ScaffoldError::Descriptors {
            path: path.to_owned(),
            message: e.to_string(),
        })?;

    descriptors
        .into_iter()
        .map(|descriptor| {
            let descriptor = descriptor.with_pages_root(pages_root);
            descriptor.validate()?;
            Ok(descriptor)
        })
        .collect()
}
