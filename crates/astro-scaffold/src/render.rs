//! Placeholder page rendering.

use astro_site::{Breadcrumb, FrontMatter, PageSource};
use minijinja::{Environment, context};
use serde::Serialize;

use crate::ScaffoldError;
use crate::descriptor::PageDescriptor;

const TEMPLATE_NAME: &str = "placeholder.html";
const TEMPLATE: &str = include_str!("../templates/placeholder.html");

#[derive(Serialize)]
struct Feature<'a> {
    icon: &'a str,
    title: &'a str,
    text: &'a str,
}

/// A generated page, ready to be written.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RenderedPage {
    /// Target file path from the descriptor.
    pub path: String,
    /// Route the page is served at.
    pub route: String,
    /// Breadcrumb trail embedded in the page.
    pub breadcrumbs: Vec<Breadcrumb>,
    /// Full page file content (front matter plus body).
    pub content: String,
}

/// Render the placeholder page for a descriptor.
///
/// Output depends only on the descriptor.
///
/// # Errors
///
/// Returns an error if the descriptor path is unsafe, no section can be
/// determined, or the template fails.
pub fn render_page(descriptor: &PageDescriptor) -> Result<RenderedPage, ScaffoldError> {
    descriptor.validate()?;
    let breadcrumbs = breadcrumbs_for(descriptor)?;
    let body = render_body(descriptor)?;

    let source = PageSource {
        front: FrontMatter {
            title: Some(descriptor.title.clone()),
            description: Some(descriptor.description.clone()),
            icon: Some(descriptor.icon.clone()),
            breadcrumbs: breadcrumbs.clone(),
        },
        body,
    };

    Ok(RenderedPage {
        path: descriptor.path.clone(),
        route: descriptor.route(),
        breadcrumbs,
        content: source.render()?,
    })
}

/// Home, Documentation, capitalized section, then the page itself.
///
/// # Errors
///
/// Returns `ScaffoldError::MissingSection` when the path has no segment
/// below `/docs` and no explicit section is set.
pub fn breadcrumbs_for(descriptor: &PageDescriptor) -> Result<Vec<Breadcrumb>, ScaffoldError> {
    let section = descriptor
        .section()
        .ok_or_else(|| ScaffoldError::MissingSection {
            path: descriptor.path.clone(),
        })?;

    Ok(vec![
        Breadcrumb::link("Home", "/"),
        Breadcrumb::link("Documentation", "/docs"),
        Breadcrumb::link(capitalize(&section), format!("/docs/{section}")),
        Breadcrumb::link(descriptor.title.clone(), descriptor.route()),
    ])
}

fn render_body(descriptor: &PageDescriptor) -> Result<String, ScaffoldError> {
    let mut env = Environment::new();
    env.add_template(TEMPLATE_NAME, TEMPLATE)?;
    let template = env.get_template(TEMPLATE_NAME)?;

    let features = [
        Feature {
            icon: &descriptor.icon,
            title: &descriptor.title,
            text: &descriptor.description,
        },
        Feature {
            icon: "FileText",
            title: "Documentation",
            text: "Comprehensive guides and examples",
        },
        Feature {
            icon: "Settings",
            title: "Configuration",
            text: "Setup and configuration options",
        },
    ];

    let mut body = template.render(context! {
        title => descriptor.title,
        description => descriptor.description,
        icon => descriptor.icon,
        features => features,
    })?;
    body.push('\n');
    Ok(body)
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;

    #[test]
    fn test_docs_x_y_trail_and_hero() {
        let desc = PageDescriptor::new("app/docs/x/y/page.tsx", "Y", "The y page", "Box");
        let page = render_page(&desc).unwrap();

        let titles: Vec<_> = page.breadcrumbs.iter().map(|b| b.title.as_str()).collect();
        assert_eq!(titles, vec!["Home", "Documentation", "X", "Y"]);
        let hrefs: Vec<_> = page
            .breadcrumbs
            .iter()
            .map(|b| b.href.as_deref().unwrap())
            .collect();
        assert_eq!(hrefs, vec!["/", "/docs", "/docs/x", "/docs/x/y"]);

        let parsed = PageSource::parse(&page.content).unwrap();
        assert!(parsed.body.contains("<h1 class=\"placeholder-title\">Y</h1>"));
        assert!(parsed.body.contains("<h2>Coming Soon</h2>"));
        assert_eq!(parsed.front.breadcrumbs, page.breadcrumbs);
        assert_eq!(parsed.title(), "Y");
    }

    #[test]
    fn test_three_feature_blurbs() {
        let desc = PageDescriptor::new("app/docs/services/stripe/page.html", "Stripe", "Payments", "CreditCard");
        let page = render_page(&desc).unwrap();
        assert_eq!(page.content.matches("class=\"placeholder-feature\"").count(), 3);
        assert!(page.content.contains("Comprehensive guides and examples"));
        assert!(page.content.contains("Setup and configuration options"));
        assert!(page.content.contains("data-icon=\"CreditCard\""));
    }

    #[test]
    fn test_output_is_deterministic() {
        let desc = PageDescriptor::new("app/docs/mcp/inspector/page.html", "MCP Inspector Guide", "Debug", "Search");
        assert_eq!(render_page(&desc).unwrap(), render_page(&desc).unwrap());
    }

    #[test]
    fn test_values_are_escaped() {
        let desc = PageDescriptor::new("app/docs/ui/magic/page.html", "Magic <UI>", "A & B", "Wand2");
        let body = PageSource::parse(&render_page(&desc).unwrap().content)
            .unwrap()
            .body;
        assert!(body.contains("Magic &lt;UI&gt;"));
        assert!(body.contains("A &amp; B"));
        assert!(!body.contains("<UI>"));
    }

    #[test]
    fn test_missing_section_fails() {
        let desc = PageDescriptor::new("app/docs/page.html", "Docs", "", "Book");
        assert!(matches!(
            render_page(&desc),
            Err(ScaffoldError::MissingSection { .. })
        ));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("mcp"), "Mcp");
        assert_eq!(capitalize(""), "");
    }
}
