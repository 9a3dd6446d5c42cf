//! UI framework manifest (`components.json`).

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

/// Tailwind settings block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TailwindConfig {
    /// Tailwind config file.
    pub config: String,
    /// Global stylesheet.
    pub css: String,
    /// Base color palette.
    pub base_color: String,
    /// Emit CSS variables for theme colors.
    pub css_variables: bool,
    /// Utility class prefix.
    pub prefix: String,
}

/// Import aliases used by generated components.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Aliases {
    /// Components import alias.
    pub components: String,
    /// Utilities import alias.
    pub utils: String,
}

/// Manifest describing the UI framework's style and alias configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Manifest {
    /// JSON schema URL.
    #[serde(rename = "$schema")]
    pub schema: String,
    /// Component style.
    pub style: String,
    /// React server components.
    pub rsc: bool,
    /// TypeScript sources.
    pub tsx: bool,
    /// Tailwind settings.
    pub tailwind: TailwindConfig,
    /// Import aliases.
    pub aliases: Aliases,
}

impl Default for Manifest {
    fn default() -> Self {
        Self {
            schema: "https://ui.shadcn.com/schema.json".to_owned(),
            style: "default".to_owned(),
            rsc: true,
            tsx: true,
            tailwind: TailwindConfig {
                config: "tailwind.config.ts".to_owned(),
                css: "app/globals.css".to_owned(),
                base_color: "slate".to_owned(),
                css_variables: true,
                prefix: String::new(),
            },
            aliases: Aliases {
                components: "@/components".to_owned(),
                utils: "@/lib/utils".to_owned(),
            },
        }
    }
}

/// Manifest error.
#[derive(Debug, thiserror::Error)]
pub enum ManifestError {
    /// Read or write failed.
    #[error("Failed to access manifest {}: {source}", path.display())]
    Io {
        /// Manifest path.
        path: std::path::PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// The manifest is not valid JSON of the expected shape.
    #[error("Invalid manifest: {0}")]
    Json(#[from] serde_json::Error),
}

impl Manifest {
    /// Read a manifest file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or parsed.
    pub fn load(path: &Path) -> Result<Self, ManifestError> {
        let content = fs::read_to_string(path).map_err(|source| ManifestError::Io {
            path: path.to_owned(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }
}

/// Write the default manifest if `path` does not exist.
///
/// Returns `true` when a manifest was written. An existing file is never
/// touched.
///
/// # Errors
///
/// Returns an error if the manifest cannot be serialized or written.
pub fn ensure_manifest(path: &Path) -> Result<bool, ManifestError> {
    if path.exists() {
        tracing::debug!(path = %path.display(), "Manifest present");
        return Ok(false);
    }

    let mut json = serde_json::to_string_pretty(&Manifest::default())?;
    json.push('\n');
    fs::write(path, json).map_err(|source| ManifestError::Io {
        path: path.to_owned(),
        source,
    })?;
    tracing::info!(path = %path.display(), "Created manifest");
    Ok(true)
}
