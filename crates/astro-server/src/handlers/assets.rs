//! Shell stylesheet endpoint.

use axum::http::header;
use axum::response::IntoResponse;
use astro_shell::STYLESHEET;

/// Handle GET /assets/shell.css.
pub(crate) async fn get_stylesheet() -> impl IntoResponse {
    (
        [
            (header::CONTENT_TYPE, "text/css; charset=utf-8"),
            (header::CACHE_CONTROL, "public, max-age=3600"),
        ],
        STYLESHEET,
    )
}
