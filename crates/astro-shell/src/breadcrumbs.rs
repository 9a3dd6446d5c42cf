//! Breadcrumb trail rendering.

use std::fmt::Write;

use astro_site::Breadcrumb;

use crate::template::{CHEVRON_RIGHT, escape_html};

/// Render a breadcrumb trail into `html`.
///
/// Every entry after the first is preceded by a separator. The first entry
/// is hidden on narrow viewports. Entries with `href` become links, the
/// others plain current-page text. An empty trail renders nothing.
pub fn render_breadcrumbs(html: &mut String, breadcrumbs: &[Breadcrumb]) {
    if breadcrumbs.is_empty() {
        return;
    }

    html.push_str("<nav aria-label=\"breadcrumb\">\n");
    html.push_str("<ol class=\"breadcrumb-list\">\n");
    for (index, crumb) in breadcrumbs.iter().enumerate() {
        if index > 0 {
            let _ = writeln!(
                html,
                "<li role=\"presentation\" aria-hidden=\"true\" \
                 class=\"breadcrumb-separator hidden md:block\">{CHEVRON_RIGHT}</li>"
            );
        }

        let item_class = if index == 0 {
            "breadcrumb-item hidden md:block"
        } else {
            "breadcrumb-item"
        };
        let _ = write!(html, "<li class=\"{item_class}\">");
        match &crumb.href {
            Some(href) => {
                let _ = write!(
                    html,
                    "<a href=\"{}\" class=\"breadcrumb-link\">{}</a>",
                    escape_html(href),
                    escape_html(&crumb.title),
                );
            }
            None => {
                let _ = write!(
                    html,
                    "<span role=\"link\" aria-disabled=\"true\" aria-current=\"page\" \
                     class=\"breadcrumb-page\">{}</span>",
                    escape_html(&crumb.title),
                );
            }
        }
        html.push_str("</li>\n");
    }
    html.push_str("</ol>\n</nav>\n");
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(crumbs: &[Breadcrumb]) -> String {
        let mut html = String::new();
        render_breadcrumbs(&mut html, crumbs);
        html
    }

    fn trail() -> Vec<Breadcrumb> {
        vec![
            Breadcrumb::link("Home", "/"),
            Breadcrumb::link("Documentation", "/docs"),
            Breadcrumb::link("Ui", "/docs/ui"),
            Breadcrumb::current("Radix UI"),
        ]
    }

    #[test]
    fn renders_one_item_per_entry_with_separators_between() {
        let html = render(&trail());
        assert_eq!(html.matches("class=\"breadcrumb-item").count(), 4);
        assert_eq!(html.matches("class=\"breadcrumb-separator").count(), 3);
        // Separator never precedes the first entry
        let first_item = html.find("class=\"breadcrumb-item").unwrap();
        let first_separator = html.find("class=\"breadcrumb-separator").unwrap();
        assert!(first_item < first_separator);
    }

    #[test]
    fn single_entry_has_no_separator() {
        let html = render(&[Breadcrumb::current("Home")]);
        assert_eq!(html.matches("class=\"breadcrumb-item").count(), 1);
        assert!(!html.contains("breadcrumb-separator"));
    }

    #[test]
    fn links_point_exactly_at_href() {
        let html = render(&trail());
        assert!(html.contains("<a href=\"/\" class=\"breadcrumb-link\">Home</a>"));
        assert!(html.contains("<a href=\"/docs/ui\" class=\"breadcrumb-link\">Ui</a>"));
        assert_eq!(html.matches("class=\"breadcrumb-link\"").count(), 3);
    }

    #[test]
    fn entry_without_href_is_plain_text() {
        let html = render(&trail());
        assert!(html.contains("aria-current=\"page\" class=\"breadcrumb-page\">Radix UI</span>"));
        assert!(!html.contains("<a href=\"\""));
    }

    #[test]
    fn first_entry_hidden_on_narrow_viewports() {
        let html = render(&trail());
        assert!(html.contains("<li class=\"breadcrumb-item hidden md:block\"><a href=\"/\""));
        assert_eq!(html.matches("<li class=\"breadcrumb-item\">").count(), 3);
    }

    #[test]
    fn empty_trail_renders_nothing() {
        assert_eq!(render(&[]), "");
    }

    #[test]
    fn titles_are_escaped() {
        let html = render(&[Breadcrumb::current("<Auth & Users>")]);
        assert!(html.contains("&lt;Auth &amp; Users&gt;"));
    }
}
