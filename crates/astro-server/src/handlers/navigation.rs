//! Navigation API endpoint.

use std::sync::Arc;

use axum::Json;
use axum::extract::State;
use astro_site::NavigationTree;

use crate::state::AppState;

/// Handle GET /api/navigation.
///
/// Returns the sidebar tree the shell renders, as JSON.
pub(crate) async fn get_navigation(State(state): State<Arc<AppState>>) -> Json<NavigationTree> {
    Json(state.layout.navigation().clone())
}
