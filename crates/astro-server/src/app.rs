//! Router setup.

use std::sync::Arc;

use axum::Router;
use axum::middleware::from_fn_with_state;
use axum::routing::get;

use crate::handlers;
use crate::middleware::route_guard::route_guard;
use crate::middleware::security::with_security_headers;
use crate::state::AppState;

/// Create the application router.
pub(crate) fn create_router(state: Arc<AppState>) -> Router {
    let router = Router::new()
        .route("/api/navigation", get(handlers::get_navigation))
        .route(astro_shell::STYLESHEET_PATH, get(handlers::get_stylesheet))
        .fallback(handlers::get_page)
        .layer(from_fn_with_state(Arc::clone(&state), route_guard));

    with_security_headers(router).with_state(state)
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use axum::body::{Body, to_bytes};
    use axum::http::{Request, StatusCode, header};
    use astro_shell::{DocsLayout, VersionSwitcher};
    use astro_site::{NavItem, NavSection, NavigationTree, Page, PageSource, RouteRules, Site};
    use pretty_assertions::assert_eq;
    use tower::ServiceExt;

    use super::*;

    fn page(route: &str, source: &str) -> Page {
        Page {
            route: route.to_owned(),
            source_path: PathBuf::from(format!("app{route}/page.html")),
            source: PageSource::parse(source).unwrap(),
        }
    }

    fn test_state() -> Arc<AppState> {
        let site = Site::from_pages(vec![
            page(
                "/docs/setup/install",
                "---\ntitle: Installation\nbreadcrumbs:\n  - title: Docs\n    href: /docs\n  - title: Installation\n---\n<p>Run the installer.</p>\n",
            ),
            page("/dashboard", "---\ntitle: Dashboard\n---\n<p>Keys</p>\n"),
        ])
        .unwrap();
        let navigation = NavigationTree {
            sections: vec![NavSection {
                title: "Setup".to_owned(),
                url: None,
                items: vec![NavItem {
                    title: "Install".to_owned(),
                    url: "/docs/setup/install".to_owned(),
                    items: Vec::new(),
                }],
            }],
        };
        let layout = DocsLayout::new(
            "AstroBits",
            navigation,
            VersionSwitcher::new(vec!["1.0.0".to_owned()], None),
        );
        Arc::new(AppState {
            site,
            layout,
            rules: RouteRules::new(&["/", "/docs(.*)"], &["/dashboard(.*)"]).unwrap(),
            sign_in_url: "/sign-in".to_owned(),
            session_cookie: "__session".to_owned(),
        })
    }

    async fn body_string(response: axum::response::Response) -> String {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        String::from_utf8(bytes.to_vec()).unwrap()
    }

    fn get_request(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    #[tokio::test]
    async fn test_renders_page_through_shell() {
        let app = create_router(test_state());

        let response = app.oneshot(get_request("/docs/setup/install")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = body_string(response).await;
        assert!(body.contains("<title>Installation | AstroBits</title>"));
        assert!(body.contains("<p>Run the installer.</p>"));
        assert!(body.contains("sidebar-menu-button active"));
    }

    #[tokio::test]
    async fn test_unknown_route_is_not_found() {
        let app = create_router(test_state());

        let response = app.oneshot(get_request("/docs/missing")).await.unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = body_string(response).await;
        assert!(body.contains("Page not found"));
        assert!(body.contains("/docs/missing"));
    }

    #[tokio::test]
    async fn test_navigation_json() {
        let app = create_router(test_state());

        let response = app.oneshot(get_request("/api/navigation")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let tree: NavigationTree = serde_json::from_str(&body_string(response).await).unwrap();
        assert_eq!(tree.sections[0].title, "Setup");
        assert_eq!(tree.sections[0].items[0].url, "/docs/setup/install");
    }

    #[tokio::test]
    async fn test_stylesheet_content_type() {
        let app = create_router(test_state());

        let response = app.oneshot(get_request("/assets/shell.css")).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers().get(header::CONTENT_TYPE).unwrap(),
            "text/css; charset=utf-8"
        );
    }

    #[tokio::test]
    async fn test_protected_route_redirects_without_session() {
        let app = create_router(test_state());

        let response = app.oneshot(get_request("/dashboard")).await.unwrap();

        assert_eq!(response.status(), StatusCode::TEMPORARY_REDIRECT);
        assert_eq!(response.headers().get(header::LOCATION).unwrap(), "/sign-in");
    }

    #[tokio::test]
    async fn test_protected_route_served_with_session() {
        let app = create_router(test_state());
        let request = Request::builder()
            .uri("/dashboard")
            .header(header::COOKIE, "__session=token")
            .body(Body::empty())
            .unwrap();

        let response = app.oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert!(body_string(response).await.contains("<p>Keys</p>"));
    }

    #[tokio::test]
    async fn test_security_headers() {
        let app = create_router(test_state());

        let response = app.oneshot(get_request("/docs/setup/install")).await.unwrap();

        let headers = response.headers();
        assert!(headers.contains_key("content-security-policy"));
        assert_eq!(headers.get("x-content-type-options").unwrap(), "nosniff");
        assert_eq!(headers.get("x-frame-options").unwrap(), "DENY");
        assert!(headers.contains_key("referrer-policy"));
    }
}
