//! Route derivation and classification.
//!
//! Page files map to routes by file-based convention: the directory path
//! below the pages root is the route, and a file whose stem is `page`
//! stands for its directory.

use regex::Regex;

/// Derive a route from a path that starts with `pages_root`.
///
/// With pages root `app`, `app/docs/mcp/servers/page.html` becomes
/// `/docs/mcp/servers` and `app/page.html` becomes `/`. Returns `None`
/// when `path` is not below `pages_root`.
#[must_use]
pub fn route_for_page_path(path: &str, pages_root: &str) -> Option<String> {
    let normalized_path = path.replace('\\', "/");
    let normalized_root = pages_root.replace('\\', "/");
    let path = normalized_path.trim_start_matches("./").trim_start_matches('/');
    let root = normalized_root.trim_start_matches("./").trim_matches('/');

    let relative = if root.is_empty() {
        path
    } else {
        path.strip_prefix(root)?.strip_prefix('/')?
    };
    Some(route_for_relative_path(relative))
}

/// Derive a route from a path relative to the pages root.
///
/// `docs/auth/clerk/page.html` becomes `/docs/auth/clerk`,
/// `about.html` becomes `/about`.
#[must_use]
pub fn route_for_relative_path(relative: &str) -> String {
    let normalized = relative.replace('\\', "/");
    let mut segments: Vec<&str> = normalized.split('/').filter(|s| !s.is_empty()).collect();

    if let Some(last) = segments.pop() {
        let stem = last.split_once('.').map_or(last, |(stem, _)| stem);
        if stem != "page" {
            segments.push(stem);
        }
    }

    format!("/{}", segments.join("/"))
}

/// Classification of a request path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RouteClass {
    /// Served to everyone.
    Public,
    /// Requires an authenticated session.
    Protected,
    /// Matches no rule; served without checks.
    Unclassified,
}

/// Invalid route pattern.
#[derive(Debug, thiserror::Error)]
#[error("Invalid route pattern \"{pattern}\": {source}")]
pub struct RouteError {
    /// Offending pattern.
    pub pattern: String,
    /// Regex compile error.
    pub source: regex::Error,
}

/// Public and protected route pattern lists.
///
/// Patterns are anchored at both ends and use regex groups the way
/// path-to-regexp does (`/docs(.*)` covers `/docs` and everything below).
/// Public patterns take precedence over protected ones.
#[derive(Debug)]
pub struct RouteRules {
    public: Vec<Regex>,
    protected: Vec<Regex>,
}

impl RouteRules {
    /// Compile the pattern lists.
    ///
    /// # Errors
    ///
    /// Returns the first pattern that fails to compile.
    pub fn new<S: AsRef<str>>(public: &[S], protected: &[S]) -> Result<Self, RouteError> {
        Ok(Self {
            public: compile(public)?,
            protected: compile(protected)?,
        })
    }

    /// Classify a request path (without query string).
    #[must_use]
    pub fn classify(&self, path: &str) -> RouteClass {
        if self.public.iter().any(|re| re.is_match(path)) {
            RouteClass::Public
        } else if self.protected.iter().any(|re| re.is_match(path)) {
            RouteClass::Protected
        } else {
            RouteClass::Unclassified
        }
    }
}

fn compile<S: AsRef<str>>(patterns: &[S]) -> Result<Vec<Regex>, RouteError> {
    patterns
        .iter()
        .map(|p| {
            let pattern = p.as_ref();
            Regex::new(&format!("^(?:{pattern})$")).map_err(|source| RouteError {
                pattern: pattern.to_owned(),
                source,
            })
        })
        .collect()
}
