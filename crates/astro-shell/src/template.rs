//! Shared markup helpers.

/// Chevron used between breadcrumb entries.
pub(crate) const CHEVRON_RIGHT: &str = "<svg class=\"size-3.5\" viewBox=\"0 0 24 24\" \
     fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\"><path d=\"m9 18 6-6-6-6\"/></svg>";

/// Icon for the decorative search input.
pub(crate) const SEARCH_ICON: &str = "<svg class=\"search-icon\" viewBox=\"0 0 24 24\" \
     fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\"><circle cx=\"11\" cy=\"11\" r=\"8\"/>\
     <path d=\"m21 21-4.3-4.3\"/></svg>";

/// Icon on the sidebar toggle control.
pub(crate) const PANEL_ICON: &str = "<svg class=\"size-4\" viewBox=\"0 0 24 24\" \
     fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\"><rect width=\"18\" height=\"18\" \
     x=\"3\" y=\"3\" rx=\"2\"/><path d=\"M9 3v18\"/></svg>";

/// Product badge in the version switcher.
pub(crate) const GALLERY_ICON: &str = "<svg class=\"size-4\" viewBox=\"0 0 24 24\" \
     fill=\"none\" stroke=\"currentColor\" stroke-width=\"2\"><rect width=\"18\" height=\"14\" \
     x=\"3\" y=\"3\" rx=\"2\"/><path d=\"M4 21h16\"/></svg>";

/// Escape HTML special characters.
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
