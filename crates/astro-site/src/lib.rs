//! Site structure for the AstroBits docs engine.
//!
//! This crate provides:
//! - [`NavigationTree`]: the sidebar's section/link data, loaded from YAML or JSON
//! - [`BreadcrumbTrail`]: validated page-ancestry entries
//! - [`PageSource`]: front matter plus HTML body, the on-disk page format
//! - [`RouteRules`]: public/protected classification of request paths
//! - [`Site`]: every page under the pages root, keyed by route
//!
//! # Quick Start
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::path::Path;
//! use astro_site::{NavigationTree, Site};
//!
//! let navigation = NavigationTree::load(Path::new("navigation.yaml"))?;
//! let site = Site::load(Path::new("app"), "page.html")?;
//!
//! if let Some(page) = site.page("/docs/mcp/servers") {
//!     println!("{}", page.title());
//! }
//! # Ok(())
//! # }
//! ```

mod breadcrumb;
mod navigation;
mod page;
mod route;
mod site;

pub use breadcrumb::{Breadcrumb, BreadcrumbError, BreadcrumbTrail};
pub use navigation::{NavItem, NavSection, NavigationError, NavigationTree};
pub use page::{DEFAULT_TITLE, FrontMatter, PageError, PageSource};
pub use route::{RouteClass, RouteError, RouteRules, route_for_page_path, route_for_relative_path};
pub use site::{Page, Site, SiteError};
