//! Page shell, sidebar and breadcrumb rendering for AstroBits docs.

mod breadcrumbs;
mod builder;
mod layout;
mod sidebar;
mod template;

pub use breadcrumbs::render_breadcrumbs;
pub use builder::{BuildError, BuildReport, FailedPage, StaticSiteBuilder};
pub use layout::{DocsLayout, STYLESHEET, STYLESHEET_PATH};
pub use sidebar::{VersionSwitcher, render_sidebar};
pub use template::escape_html;
