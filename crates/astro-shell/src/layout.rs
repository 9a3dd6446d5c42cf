//! Documentation page shell.
//!
//! [`DocsLayout`] wraps page content in the chrome shared by every docs
//! page: sidebar, header bar with toggle and breadcrumbs, content region.

use std::fmt::Write;

use astro_site::{Breadcrumb, DEFAULT_TITLE, NavigationTree, Page};

use crate::breadcrumbs::render_breadcrumbs;
use crate::sidebar::{VersionSwitcher, render_sidebar};
use crate::template::{PANEL_ICON, escape_html};

/// URL path the shell stylesheet is served from.
pub const STYLESHEET_PATH: &str = "/assets/shell.css";

/// Shell stylesheet.
pub const STYLESHEET: &str = include_str!("../assets/shell.css");

/// Page shell with its site-wide context.
#[derive(Clone, Debug)]
pub struct DocsLayout {
    product_name: String,
    navigation: NavigationTree,
    versions: VersionSwitcher,
}

impl DocsLayout {
    /// Create a layout for a site.
    pub fn new(
        product_name: impl Into<String>,
        navigation: NavigationTree,
        versions: VersionSwitcher,
    ) -> Self {
        Self {
            product_name: product_name.into(),
            navigation,
            versions,
        }
    }

    /// Navigation tree shown in the sidebar.
    #[must_use]
    pub fn navigation(&self) -> &NavigationTree {
        &self.navigation
    }

    /// Render a complete HTML document around `children`.
    ///
    /// `title` defaults to "Documentation". The function has no side
    /// effects: equal inputs always render equal documents.
    #[must_use]
    pub fn render(&self, children: &str, breadcrumbs: &[Breadcrumb], title: Option<&str>) -> String {
        self.render_document(children, breadcrumbs, title.unwrap_or(DEFAULT_TITLE), None)
    }

    /// Render a loaded page, marking its route active in the sidebar.
    #[must_use]
    pub fn render_page(&self, page: &Page) -> String {
        self.render_document(
            &page.source.body,
            &page.source.front.breadcrumbs,
            page.title(),
            Some(&page.route),
        )
    }

    /// Render the not-found page inside the same chrome.
    #[must_use]
    pub fn render_not_found(&self, path: &str) -> String {
        let children = format!(
            "<div class=\"not-found\">\n<h1>Page not found</h1>\n\
             <p>No page exists at <code>{}</code>.</p>\n\
             <p><a href=\"/docs\">Back to the documentation</a></p>\n</div>",
            escape_html(path)
        );
        let crumbs = [Breadcrumb::link("Home", "/"), Breadcrumb::current("Not Found")];
        self.render_document(&children, &crumbs, "Page not found", None)
    }

    fn render_document(
        &self,
        children: &str,
        breadcrumbs: &[Breadcrumb],
        title: &str,
        active_route: Option<&str>,
    ) -> String {
        let mut html = String::with_capacity(8192 + children.len());

        html.push_str("<!DOCTYPE html>\n<html lang=\"en\">\n<head>\n");
        html.push_str("<meta charset=\"utf-8\">\n");
        html.push_str("<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\n");
        let _ = writeln!(
            html,
            "<title>{} | {}</title>",
            escape_html(title),
            escape_html(&self.product_name)
        );
        let _ = writeln!(html, "<link rel=\"stylesheet\" href=\"{STYLESHEET_PATH}\">");
        html.push_str("</head>\n<body>\n");

        // Checkbox drives the sidebar state through CSS sibling selectors
        html.push_str(
            "<input type=\"checkbox\" id=\"sidebar-toggle\" class=\"sidebar-toggle-state\" \
             aria-hidden=\"true\">\n",
        );
        html.push_str("<div class=\"sidebar-wrapper\">\n");
        render_sidebar(
            &mut html,
            &self.product_name,
            &self.navigation,
            &self.versions,
            active_route,
        );

        html.push_str("<main class=\"sidebar-inset\">\n");
        html.push_str("<header class=\"docs-header\">\n");
        let _ = writeln!(
            html,
            "<label for=\"sidebar-toggle\" class=\"sidebar-trigger\" \
             aria-label=\"Toggle Sidebar\">{PANEL_ICON}</label>"
        );
        html.push_str(
            "<div role=\"separator\" aria-orientation=\"vertical\" class=\"separator-vertical\"></div>\n",
        );
        render_breadcrumbs(&mut html, breadcrumbs);
        html.push_str("</header>\n");

        html.push_str("<div class=\"docs-content\">\n");
        html.push_str(children);
        html.push_str("\n</div>\n</main>\n</div>\n</body>\n</html>\n");
        html
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use astro_site::PageSource;
    use pretty_assertions::assert_eq;

    use super::*;

    fn layout() -> DocsLayout {
        let navigation = NavigationTree::from_yaml(
            "sections:\n  - title: Setup\n    items:\n      - title: Install\n        url: /docs/install\n",
        )
        .unwrap();
        DocsLayout::new(
            "AstroBits Core",
            navigation,
            VersionSwitcher::new(vec!["1.0.0".to_owned()], None),
        )
    }

    #[test]
    fn title_defaults_to_documentation() {
        let html = layout().render("<p>x</p>", &[], None);
        assert!(html.contains("<title>Documentation | AstroBits Core</title>"));
    }

    #[test]
    fn explicit_title_is_used() {
        let html = layout().render("<p>x</p>", &[], Some("Clerk Auth"));
        assert!(html.contains("<title>Clerk Auth | AstroBits Core</title>"));
    }

    #[test]
    fn chrome_wraps_children() {
        let html = layout().render("<h1>Install</h1>", &[Breadcrumb::current("Install")], None);

        let sidebar = html.find("<aside class=\"sidebar\"").unwrap();
        let header = html.find("<header class=\"docs-header\">").unwrap();
        let content = html.find("<div class=\"docs-content\">\n<h1>Install</h1>").unwrap();
        assert!(sidebar < header && header < content);

        assert!(html.contains("for=\"sidebar-toggle\""));
        assert!(html.contains("role=\"separator\" aria-orientation=\"vertical\""));
        assert!(html.contains("<nav aria-label=\"breadcrumb\">"));
        assert!(html.contains("href=\"/docs/install\""));
        assert!(html.contains(&format!("href=\"{STYLESHEET_PATH}\"")));
    }

    #[test]
    fn empty_breadcrumbs_render_no_trail() {
        let html = layout().render("", &[], None);
        assert!(!html.contains("aria-label=\"breadcrumb\""));
        assert!(html.contains("<header class=\"docs-header\">"));
    }

    #[test]
    fn render_is_deterministic() {
        let layout = layout();
        let crumbs = [Breadcrumb::link("Home", "/"), Breadcrumb::current("Install")];
        assert_eq!(
            layout.render("<p>a</p>", &crumbs, Some("Install")),
            layout.render("<p>a</p>", &crumbs, Some("Install"))
        );
    }

    #[test]
    fn render_page_marks_active_route() {
        let page = Page {
            route: "/docs/install".to_owned(),
            source_path: PathBuf::from("app/docs/install/page.html"),
            source: PageSource::parse("---\ntitle: Install\n---\n<h1>Install</h1>").unwrap(),
        };
        let html = layout().render_page(&page);
        assert!(html.contains("<title>Install | AstroBits Core</title>"));
        assert!(html.contains("class=\"sidebar-menu-button active\""));
        assert!(html.contains("<h1>Install</h1>"));
    }

    #[test]
    fn not_found_uses_same_chrome() {
        let html = layout().render_not_found("/docs/<missing>");
        assert!(html.contains("<aside class=\"sidebar\""));
        assert!(html.contains("/docs/&lt;missing&gt;"));
        assert!(html.contains("Not Found"));
    }

    #[test]
    fn stylesheet_is_embedded() {
        assert!(STYLESHEET.contains(".sidebar"));
        assert!(STYLESHEET.contains(".breadcrumb-list"));
    }
}
