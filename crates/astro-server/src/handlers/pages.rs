//! Page rendering.
//!
//! Every request not matched by an explicit route lands here. Known routes
//! render through the docs shell; anything else gets the shell's 404 page.

use std::sync::Arc;

use axum::extract::State;
use axum::http::{StatusCode, Uri};
use axum::response::{Html, IntoResponse, Response};

use crate::state::AppState;

/// Render the page registered at the request path.
pub(crate) async fn get_page(State(state): State<Arc<AppState>>, uri: Uri) -> Response {
    let path = uri.path();

    match state.site.page(path) {
        Some(page) => Html(state.layout.render_page(page)).into_response(),
        None => {
            tracing::debug!(path, "Page not found");
            (StatusCode::NOT_FOUND, Html(state.layout.render_not_found(path))).into_response()
        }
    }
}
