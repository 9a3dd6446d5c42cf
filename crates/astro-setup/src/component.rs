//! Component install specs.

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

/// A third-party UI component to fetch and install.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ComponentInstallSpec {
    /// Component name.
    pub name: String,
    /// Registry identifier passed to the registry CLI (URL or package name).
    pub registry: String,
    /// Package-manager specifiers the component needs.
    #[serde(default)]
    pub dependencies: Vec<String>,
    /// Short description.
    #[serde(default)]
    pub description: Option<String>,
}

/// Component list loading error.
#[derive(Debug, thiserror::Error)]
pub enum ComponentsError {
    /// The file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Component list path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The file is not a component list.
    #[error("Invalid component list {}: {message}", path.display())]
    Parse {
        /// Component list path.
        path: PathBuf,
        /// Parse error.
        message: String,
    },
}

/// Load a YAML list of component install specs.
///
/// # Errors
///
/// Returns an error if the file cannot be read or parsed.
pub fn load_components(path: &Path) -> Result<Vec<ComponentInstallSpec>, ComponentsError> {
    let content = fs::read_to_string(path).map_err(|source| ComponentsError::Io {
        path: path.to_owned(),
        source,
    })?;
    serde_yaml::from_str(&content).map_err(|e| ComponentsError::Parse {
        path: path.to_owned(),
        message: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_load_components() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("components.yaml");
        fs::write(
            &path,
            "- name: bento-grid\n  registry: https://ui.aceternity.com/registry/bento-grid.json\n  \
             dependencies: [clsx, tailwind-merge]\n\
             - name: card\n  registry: card\n",
        )
        .unwrap();

        let specs = load_components(&path).unwrap();
        assert_eq!(specs.len(), 2);
        assert_eq!(specs[0].dependencies, vec!["clsx", "tailwind-merge"]);
        assert!(specs[1].dependencies.is_empty());
        assert_eq!(specs[1].description, None);
    }

    #[test]
    fn test_missing_registry_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("components.yaml");
        fs::write(&path, "- name: card\n").unwrap();
        assert!(matches!(
            load_components(&path),
            Err(ComponentsError::Parse { .. })
        ));
    }
}
