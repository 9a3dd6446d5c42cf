//! Application state.
//!
//! Shared state for all request handlers.

use astro_shell::DocsLayout;
use astro_site::{RouteRules, Site};

/// Application state shared across all handlers.
pub(crate) struct AppState {
    /// Pages keyed by route, loaded once at startup.
    pub(crate) site: Site,
    /// Page shell wrapping every rendered page.
    pub(crate) layout: DocsLayout,
    /// Public/protected route classification.
    pub(crate) rules: RouteRules,
    /// Redirect target for protected routes without a session.
    pub(crate) sign_in_url: String,
    /// Cookie marking an authenticated session.
    pub(crate) session_cookie: String,
}
