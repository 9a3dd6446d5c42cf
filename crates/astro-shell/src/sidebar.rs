//! Sidebar rendering: version switcher, search input and navigation groups.

use std::fmt::Write;

use astro_site::{NavItem, NavigationTree};

use crate::template::{GALLERY_ICON, SEARCH_ICON, escape_html};

/// Selectable documentation versions.
///
/// Rendered as a native `<select>`: the choice lives only in the browser
/// control and is neither persisted nor reflected in routing.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VersionSwitcher {
    /// Versions in display order.
    pub versions: Vec<String>,
    /// Version selected on first render.
    pub default_version: Option<String>,
}

impl VersionSwitcher {
    /// Create a switcher, defaulting to the first version when none is given.
    pub fn new(versions: Vec<String>, default_version: Option<String>) -> Self {
        let default_version = default_version.or_else(|| versions.first().cloned());
        Self {
            versions,
            default_version,
        }
    }
}

/// Render the sidebar.
///
/// One labeled group per section, one link per item, nested items in
/// nested lists. The link matching `active_route` is marked current.
pub fn render_sidebar(
    html: &mut String,
    product_name: &str,
    navigation: &NavigationTree,
    versions: &VersionSwitcher,
    active_route: Option<&str>,
) {
    html.push_str("<aside class=\"sidebar\" data-sidebar=\"sidebar\">\n");

    html.push_str("<div class=\"sidebar-header\">\n");
    render_version_switcher(html, product_name, versions);
    render_search(html, product_name);
    html.push_str("</div>\n");

    html.push_str("<div class=\"sidebar-content\">\n");
    for section in &navigation.sections {
        let _ = writeln!(
            html,
            "<div class=\"sidebar-group\" data-section=\"{}\">",
            escape_html(&section.title)
        );
        let _ = writeln!(
            html,
            "<div class=\"sidebar-group-label\">{}</div>",
            escape_html(&section.title)
        );
        html.push_str("<ul class=\"sidebar-menu\">\n");
        render_items(html, &section.items, active_route);
        html.push_str("</ul>\n</div>\n");
    }
    html.push_str("</div>\n");

    html.push_str("</aside>\n");
}

fn render_items(html: &mut String, items: &[NavItem], active_route: Option<&str>) {
    for item in items {
        html.push_str("<li class=\"sidebar-menu-item\">");
        let is_active = active_route == Some(item.url.as_str());
        let (class, current) = if is_active {
            ("sidebar-menu-button active", " aria-current=\"page\"")
        } else {
            ("sidebar-menu-button", "")
        };
        let _ = write!(
            html,
            "<a href=\"{}\" class=\"{class}\"{current}>{}</a>",
            escape_html(&item.url),
            escape_html(&item.title),
        );
        if !item.items.is_empty() {
            html.push_str("\n<ul class=\"sidebar-menu-sub\">\n");
            render_items(html, &item.items, active_route);
            html.push_str("</ul>\n");
        }
        html.push_str("</li>\n");
    }
}

fn render_version_switcher(html: &mut String, product_name: &str, versions: &VersionSwitcher) {
    if versions.versions.is_empty() {
        return;
    }
    html.push_str("<div class=\"version-switcher\">\n");
    let _ = writeln!(html, "<div class=\"version-badge\">{GALLERY_ICON}</div>");
    let _ = writeln!(
        html,
        "<label class=\"version-label\"><span class=\"version-product\">{}</span>",
        escape_html(product_name)
    );
    html.push_str(
        "<select name=\"version\" class=\"version-select\" aria-label=\"Documentation version\">\n",
    );
    for version in &versions.versions {
        let selected = if versions.default_version.as_ref() == Some(version) {
            " selected"
        } else {
            ""
        };
        let escaped = escape_html(version);
        let _ = writeln!(html, "<option value=\"{escaped}\"{selected}>v{escaped}</option>");
    }
    html.push_str("</select>\n</label>\n</div>\n");
}

/// Decorative search input; it does not filter the navigation.
fn render_search(html: &mut String, product_name: &str) {
    html.push_str("<div class=\"sidebar-search\">\n");
    html.push_str("<label for=\"search\" class=\"sr-only\">Search</label>\n");
    let _ = writeln!(
        html,
        "<input id=\"search\" type=\"search\" class=\"sidebar-input\" \
         placeholder=\"Search {} docs...\" autocomplete=\"off\">",
        escape_html(product_name)
    );
    html.push_str(SEARCH_ICON);
    html.push_str("\n</div>\n");
}
