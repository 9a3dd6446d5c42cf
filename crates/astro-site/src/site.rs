//! Page discovery and lookup.
//!
//! [`Site`] walks the pages root once, parses every page file and keys the
//! result by route. Loading fails on the first malformed page so broken
//! front matter never reaches a rendered page.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::page::{PageError, PageSource};
use crate::route::route_for_relative_path;

/// A loaded page.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Page {
    /// Absolute route (e.g. `/docs/mcp/servers`).
    pub route: String,
    /// File the page was read from.
    pub source_path: PathBuf,
    /// Parsed content.
    pub source: PageSource,
}

impl Page {
    /// Title shown in the document head.
    #[must_use]
    pub fn title(&self) -> &str {
        self.source.title()
    }
}

/// Site loading error.
#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    /// A page file could not be read.
    #[error("Failed to read {}: {source}", path.display())]
    Io {
        /// Page file path.
        path: PathBuf,
        /// Underlying I/O error.
        source: std::io::Error,
    },
    /// A page file is malformed.
    #[error("Invalid page {}: {source}", path.display())]
    Page {
        /// Page file path.
        path: PathBuf,
        /// Parse error.
        source: PageError,
    },
    /// Two files resolve to the same route.
    #[error("Route {route} is defined by both {} and {}", first.display(), second.display())]
    DuplicateRoute {
        /// Conflicting route.
        route: String,
        /// File that claimed the route first.
        first: PathBuf,
        /// File that claimed it second.
        second: PathBuf,
    },
}

/// All pages of the site, keyed by route.
#[derive(Debug, Default)]
pub struct Site {
    pages: BTreeMap<String, Page>,
}

impl Site {
    /// Load every file named `page_file` below `pages_dir`.
    ///
    /// A missing pages root yields an empty site.
    ///
    /// # Errors
    ///
    /// Returns an error if a page cannot be read or parsed, or if two pages
    /// claim the same route.
    pub fn load(pages_dir: &Path, page_file: &str) -> Result<Self, SiteError> {
        let mut files = Vec::new();
        if pages_dir.exists() {
            collect_page_files(pages_dir, page_file, &mut files);
        } else {
            tracing::warn!(dir = %pages_dir.display(), "Pages directory does not exist");
        }

        let mut pages = Vec::with_capacity(files.len());
        for path in files {
            let content = fs::read_to_string(&path).map_err(|source| SiteError::Io {
                path: path.clone(),
                source,
            })?;
            let source = PageSource::parse(&content).map_err(|source| SiteError::Page {
                path: path.clone(),
                source,
            })?;
            let relative = path
                .strip_prefix(pages_dir)
                .unwrap_or(&path)
                .to_string_lossy()
                .into_owned();
            pages.push(Page {
                route: route_for_relative_path(&relative),
                source_path: path,
                source,
            });
        }

        let site = Self::from_pages(pages)?;
        tracing::info!(pages = site.len(), dir = %pages_dir.display(), "Loaded site");
        Ok(site)
    }

    /// Build a site from already-parsed pages.
    ///
    /// # Errors
    ///
    /// Returns `SiteError::DuplicateRoute` if two pages share a route.
    pub fn from_pages(pages: Vec<Page>) -> Result<Self, SiteError> {
        let mut map: BTreeMap<String, Page> = BTreeMap::new();
        for page in pages {
            if let Some(existing) = map.get(&page.route) {
                return Err(SiteError::DuplicateRoute {
                    route: page.route.clone(),
                    first: existing.source_path.clone(),
                    second: page.source_path,
                });
            }
            map.insert(page.route.clone(), page);
        }
        Ok(Self { pages: map })
    }

    /// Look up a page by route. A trailing slash is ignored.
    #[must_use]
    pub fn page(&self, route: &str) -> Option<&Page> {
        let trimmed = route.trim_end_matches('/');
        let key = if trimmed.is_empty() { "/" } else { trimmed };
        self.pages.get(key)
    }

    /// Pages in route order.
    pub fn pages(&self) -> impl Iterator<Item = &Page> {
        self.pages.values()
    }

    /// Number of pages.
    #[must_use]
    pub fn len(&self) -> usize {
        self.pages.len()
    }

    /// True when no pages were found.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

/// Recursively collect page files in sorted order.
fn collect_page_files(dir: &Path, page_file: &str, out: &mut Vec<PathBuf>) {
    let Ok(entries) = fs::read_dir(dir) else {
        tracing::warn!(dir = %dir.display(), "Failed to read directory");
        return;
    };

    let mut entries: Vec<_> = entries
        .filter_map(Result::ok)
        .map(|e| (e.path(), e.file_type().is_ok_and(|t| t.is_dir())))
        .collect();
    entries.sort_by(|a, b| a.0.cmp(&b.0));

    for (path, is_dir) in entries {
        if is_dir {
            collect_page_files(&path, page_file, out);
        } else if path.file_name().is_some_and(|n| n == page_file) {
            out.push(path);
        }
    }
}
