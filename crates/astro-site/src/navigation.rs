//! Navigation data tree.
//!
//! The tree is static configuration: it is read once from a declarative
//! file and never mutated at runtime.
//!
//! ```yaml
//! sections:
//!   - title: Getting Started
//!     url: /docs/getting-started
//!     items:
//!       - title: Installation
//!         url: /docs/installation
//! ```

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

/// Navigation link, optionally with nested links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavItem {
    /// Display title.
    pub title: String,
    /// Absolute site path.
    pub url: String,
    /// Nested links (rendered below this one).
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub items: Vec<NavItem>,
}

/// Labeled group of links.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavSection {
    /// Group label, unique within the tree.
    pub title: String,
    /// Landing path for the section, if it has one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    /// Links in display order.
    #[serde(default)]
    pub items: Vec<NavItem>,
}

/// Sections of the documentation sidebar in display order.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavigationTree {
    /// Top-level groups.
    #[serde(default)]
    pub sections: Vec<NavSection>,
}

/// Navigation loading error.
#[derive(Debug, thiserror::Error)]
pub enum NavigationError {
    /// The file could not be read.
    #[error("Failed to read navigation file {}: {source}", path.display())]
    Io {
        /// Navigation file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The extension is neither YAML nor JSON.
    #[error("Unsupported navigation format: {} (expected .yaml, .yml or .json)", .0.display())]
    UnsupportedFormat(PathBuf),
    /// The document does not match the tree schema.
    #[error("Invalid navigation document: {0}")]
    Parse(String),
    /// The tree parsed but violates its invariants.
    #[error("Invalid navigation tree: {}", .0.join("; "))]
    Invalid(Vec<String>),
}

impl NavigationTree {
    /// Load and validate a tree from a YAML or JSON file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file is unreadable, malformed, or invalid.
    pub fn load(path: &Path) -> Result<Self, NavigationError> {
        let content = std::fs::read_to_string(path).map_err(|source| NavigationError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .map(str::to_ascii_lowercase);
        let tree = match extension.as_deref() {
            Some("yaml" | "yml") => Self::from_yaml(&content)?,
            Some("json") => Self::from_json(&content)?,
            _ => return Err(NavigationError::UnsupportedFormat(path.to_path_buf())),
        };
        tracing::debug!(path = %path.display(), sections = tree.sections.len(), "Loaded navigation");
        Ok(tree)
    }

    /// Parse and validate a YAML document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or invalid.
    pub fn from_yaml(content: &str) -> Result<Self, NavigationError> {
        let tree: Self = serde_yaml::from_str(content)
            .map_err(|e| NavigationError::Parse(e.to_string()))?;
        tree.validate()?;
        Ok(tree)
    }

    /// Parse and validate a JSON document.
    ///
    /// # Errors
    ///
    /// Returns an error if the document is malformed or invalid.
    pub fn from_json(content: &str) -> Result<Self, NavigationError> {
        let tree: Self =
            serde_json::from_str(content).map_err(|e| NavigationError::Parse(e.to_string()))?;
        tree.validate()?;
        Ok(tree)
    }

    /// Check tree invariants, reporting every violation at once.
    ///
    /// - section titles are unique and non-empty
    /// - every URL begins with `/`
    /// - every link title is non-empty
    ///
    /// # Errors
    ///
    /// Returns `NavigationError::Invalid` listing all problems found.
    pub fn validate(&self) -> Result<(), NavigationError> {
        let mut problems = Vec::new();
        let mut seen = HashSet::new();

        for section in &self.sections {
            if section.title.trim().is_empty() {
                problems.push("section with empty title".to_owned());
            } else if !seen.insert(section.title.as_str()) {
                problems.push(format!("duplicate section \"{}\"", section.title));
            }
            if let Some(url) = &section.url {
                check_url(url, &section.title, &mut problems);
            }
            validate_items(&section.items, &section.title, &mut problems);
        }

        if problems.is_empty() {
            Ok(())
        } else {
            Err(NavigationError::Invalid(problems))
        }
    }

    /// True when the tree has no sections.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sections.is_empty()
    }

    /// Iterate over every link in the tree, depth first.
    pub fn links(&self) -> impl Iterator<Item = &NavItem> {
        let mut stack: Vec<&NavItem> = self
            .sections
            .iter()
            .rev()
            .flat_map(|s| s.items.iter().rev())
            .collect();
        std::iter::from_fn(move || {
            let item = stack.pop()?;
            stack.extend(item.items.iter().rev());
            Some(item)
        })
    }
}

fn validate_items(items: &[NavItem], parent: &str, problems: &mut Vec<String>) {
    for item in items {
        if item.title.trim().is_empty() {
            problems.push(format!("link with empty title under \"{parent}\""));
        }
        check_url(&item.url, &item.title, problems);
        validate_items(&item.items, &item.title, problems);
    }
}

fn check_url(url: &str, owner: &str, problems: &mut Vec<String>) {
    if !url.starts_with('/') {
        problems.push(format!("\"{owner}\" has non-absolute url \"{url}\""));
    }
}
