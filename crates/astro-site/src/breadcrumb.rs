//! Breadcrumb entries and trail validation.

use serde::{Deserialize, Serialize};

/// One entry of a breadcrumb trail.
///
/// An entry without `href` is the current, non-navigable page.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breadcrumb {
    /// Display title.
    #[serde(default)]
    pub title: String,
    /// Link target, absent for the current page.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub href: Option<String>,
}

impl Breadcrumb {
    /// Create a linked entry.
    pub fn link(title: impl Into<String>, href: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: Some(href.into()),
        }
    }

    /// Create the terminal, non-linked entry.
    pub fn current(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            href: None,
        }
    }
}

/// Breadcrumb validation error.
#[derive(Debug, PartialEq, Eq, thiserror::Error)]
pub enum BreadcrumbError {
    /// Entry has an empty title.
    #[error("breadcrumb {index} has an empty title")]
    EmptyTitle {
        /// Zero-based entry position.
        index: usize,
    },
    /// A non-terminal entry lacks `href`.
    #[error("breadcrumb {index} (\"{title}\") has no href but is not the last entry")]
    MissingHref {
        /// Zero-based entry position.
        index: usize,
        /// Entry title.
        title: String,
    },
}

/// Ordered, validated breadcrumb entries.
///
/// Every title is non-empty and only the last entry may omit `href`.
/// An empty trail is valid and renders nothing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BreadcrumbTrail(Vec<Breadcrumb>);

impl BreadcrumbTrail {
    /// Validate and wrap a list of entries.
    ///
    /// # Errors
    ///
    /// Returns the first entry that violates the trail invariants.
    pub fn new(entries: Vec<Breadcrumb>) -> Result<Self, BreadcrumbError> {
        let last = entries.len().saturating_sub(1);
        for (index, crumb) in entries.iter().enumerate() {
            if crumb.title.trim().is_empty() {
                return Err(BreadcrumbError::EmptyTitle { index });
            }
            if crumb.href.is_none() && index != last {
                return Err(BreadcrumbError::MissingHref {
                    index,
                    title: crumb.title.clone(),
                });
            }
        }
        Ok(Self(entries))
    }

    /// Entries in display order.
    #[must_use]
    pub fn entries(&self) -> &[Breadcrumb] {
        &self.0
    }

    /// Number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// True when the trail has no entries.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
