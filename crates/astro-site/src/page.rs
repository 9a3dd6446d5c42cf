//! Page source format.
//!
//! A page file is a YAML front matter block fenced by `---` lines, followed
//! by the HTML fragment that becomes the page's content region:
//!
//! ```text
//! ---
//! title: Radix UI
//! breadcrumbs:
//!   - title: Home
//!     href: /
//!   - title: Radix UI
//! ---
//! <h1>Radix UI</h1>
//! ```

use serde::{Deserialize, Serialize};

use crate::breadcrumb::{Breadcrumb, BreadcrumbError, BreadcrumbTrail};

const FENCE: &str = "---";

/// Title used when a page declares none.
pub const DEFAULT_TITLE: &str = "Documentation";

/// Page metadata declared in the front matter block.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FrontMatter {
    /// Document title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// Short page summary.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Icon name from the site's icon set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    /// Breadcrumb trail shown in the header bar.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub breadcrumbs: Vec<Breadcrumb>,
}

/// Page parse error.
#[derive(Debug, thiserror::Error)]
pub enum PageError {
    /// Opening fence without a closing one.
    #[error("front matter is not terminated by a `---` line")]
    UnterminatedFrontMatter,
    /// Front matter is not valid YAML for [`FrontMatter`].
    #[error("invalid front matter: {0}")]
    FrontMatter(String),
    /// Declared breadcrumbs violate the trail invariants.
    #[error("invalid breadcrumbs: {0}")]
    Breadcrumbs(#[from] BreadcrumbError),
}

/// Parsed page file.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PageSource {
    /// Front matter metadata.
    pub front: FrontMatter,
    /// HTML body fragment.
    pub body: String,
}

impl PageSource {
    /// Parse a page file, validating its breadcrumbs.
    ///
    /// Content without an opening fence is treated as a body with empty
    /// front matter.
    ///
    /// # Errors
    ///
    /// Returns an error for unterminated or malformed front matter and for
    /// breadcrumb trails that violate their invariants.
    pub fn parse(content: &str) -> Result<Self, PageError> {
        let Some((yaml, body)) = split_front_matter(content)? else {
            return Ok(Self {
                front: FrontMatter::default(),
                body: content.to_owned(),
            });
        };

        let front: FrontMatter = if yaml.trim().is_empty() {
            FrontMatter::default()
        } else {
            serde_yaml::from_str(yaml).map_err(|e| PageError::FrontMatter(e.to_string()))?
        };
        BreadcrumbTrail::new(front.breadcrumbs.clone())?;

        Ok(Self {
            front,
            body: body.to_owned(),
        })
    }

    /// Serialize back to the on-disk format.
    ///
    /// # Errors
    ///
    /// Returns an error if the front matter cannot be serialized.
    pub fn render(&self) -> Result<String, PageError> {
        let yaml =
            serde_yaml::to_string(&self.front).map_err(|e| PageError::FrontMatter(e.to_string()))?;
        let mut out = String::with_capacity(yaml.len() + self.body.len() + 8);
        out.push_str(FENCE);
        out.push('\n');
        out.push_str(&yaml);
        out.push_str(FENCE);
        out.push('\n');
        out.push_str(&self.body);
        Ok(out)
    }

    /// Title from front matter, or the default document title.
    #[must_use]
    pub fn title(&self) -> &str {
        self.front.title.as_deref().unwrap_or(DEFAULT_TITLE)
    }

    /// Validated breadcrumb trail.
    ///
    /// # Errors
    ///
    /// Returns an error if the trail violates its invariants.
    pub fn trail(&self) -> Result<BreadcrumbTrail, BreadcrumbError> {
        BreadcrumbTrail::new(self.front.breadcrumbs.clone())
    }
}

/// Split `---` fenced YAML from the body. `Ok(None)` means no front matter.
fn split_front_matter(content: &str) -> Result<Option<(&str, &str)>, PageError> {
    let Some(rest) = content
        .strip_prefix("---\r\n")
        .or_else(|| content.strip_prefix("---\n"))
    else {
        return Ok(None);
    };

    let mut offset = 0;
    for line in rest.split_inclusive('\n') {
        if line.trim_end_matches(['\r', '\n']) == FENCE {
            let yaml = &rest[..offset];
            let body = &rest[offset + line.len()..];
            return Ok(Some((yaml, body)));
        }
        offset += line.len();
    }
    Err(PageError::UnterminatedFrontMatter)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_parse_front_matter_and_body() {
        let content = "---\ntitle: Stripe\ndescription: Payment processing\nicon: CreditCard\nbreadcrumbs:\n  - title: Home\n    href: /\n  - title: Stripe\n---\n<h1>Stripe</h1>\n";
        let page = PageSource::parse(content).unwrap();
        assert_eq!(page.title(), "Stripe");
        assert_eq!(page.front.icon.as_deref(), Some("CreditCard"));
        assert_eq!(page.front.breadcrumbs.len(), 2);
        assert_eq!(page.body, "<h1>Stripe</h1>\n");
    }

    #[test]
    fn test_no_front_matter() {
        let page = PageSource::parse("<p>plain</p>").unwrap();
        assert_eq!(page.front, FrontMatter::default());
        assert_eq!(page.title(), DEFAULT_TITLE);
        assert_eq!(page.body, "<p>plain</p>");
    }

    #[test]
    fn test_empty_front_matter() {
        let page = PageSource::parse("---\n---\nbody").unwrap();
        assert_eq!(page.front, FrontMatter::default());
        assert_eq!(page.body, "body");
    }

    #[test]
    fn test_crlf_line_endings() {
        let page = PageSource::parse("---\r\ntitle: Notion\r\n---\r\n<p>x</p>").unwrap();
        assert_eq!(page.title(), "Notion");
        assert_eq!(page.body, "<p>x</p>");
    }

    #[test]
    fn test_unterminated_front_matter() {
        let err = PageSource::parse("---\ntitle: Broken\n<p>x</p>").unwrap_err();
        assert!(matches!(err, PageError::UnterminatedFrontMatter));
    }

    #[test]
    fn test_invalid_breadcrumbs_rejected() {
        let content = "---\nbreadcrumbs:\n  - title: Home\n  - title: Docs\n---\n";
        let err = PageSource::parse(content).unwrap_err();
        assert!(matches!(err, PageError::Breadcrumbs(_)));
    }

    #[test]
    fn test_malformed_yaml() {
        let err = PageSource::parse("---\ntitle: [unclosed\n---\n").unwrap_err();
        assert!(matches!(err, PageError::FrontMatter(_)));
    }

    #[test]
    fn test_render_then_parse_keeps_content() {
        let page = PageSource {
            front: FrontMatter {
                title: Some("Clerk Auth".to_owned()),
                description: None,
                icon: Some("User".to_owned()),
                breadcrumbs: vec![Breadcrumb::link("Home", "/"), Breadcrumb::current("Clerk Auth")],
            },
            body: "<p>Clerk</p>\n".to_owned(),
        };
        let rendered = page.render().unwrap();
        assert!(rendered.starts_with("---\ntitle: Clerk Auth\n"));
        assert_eq!(PageSource::parse(&rendered).unwrap(), page);
    }
}
