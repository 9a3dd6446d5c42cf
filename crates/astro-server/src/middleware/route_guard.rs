//! Route guard.
//!
//! Requests for protected routes must carry the session cookie; without it
//! they are redirected to the sign-in page. Public and unclassified routes
//! pass through.

use std::sync::Arc;

use axum::extract::{Request, State};
use axum::http::{HeaderMap, header};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use astro_site::RouteClass;

use crate::state::AppState;

/// Redirect unauthenticated requests for protected routes.
pub(crate) async fn route_guard(
    State(state): State<Arc<AppState>>,
    request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path();
    let class = state.rules.classify(path);

    if class == RouteClass::Protected && !has_cookie(request.headers(), &state.session_cookie) {
        tracing::debug!(path, "Protected route without session, redirecting");
        return Redirect::temporary(&state.sign_in_url).into_response();
    }

    next.run(request).await
}

/// True if a `Cookie` header carries a non-empty cookie called `name`.
fn has_cookie(headers: &HeaderMap, name: &str) -> bool {
    headers
        .get_all(header::COOKIE)
        .iter()
        .filter_map(|value| value.to_str().ok())
        .flat_map(|value| value.split(';'))
        .filter_map(|pair| pair.trim().split_once('='))
        .any(|(key, value)| key == name && !value.is_empty())
}
