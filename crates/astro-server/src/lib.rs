//! HTTP server for AstroBits docs.
//!
//! Serves every page through the docs shell, the navigation tree as JSON,
//! and the shell stylesheet. Protected routes require a session cookie.
//!
//! # Example
//!
//! ```ignore
//! use astro_server::{run_server, server_config_from_astro_config};
//!
//! let server_config = server_config_from_astro_config(&config);
//! run_server(server_config, site, layout).await?;
//! ```

mod app;
mod error;
mod handlers;
mod middleware;
mod state;

use std::net::SocketAddr;
use std::str::FromStr;
use std::sync::Arc;

use astro_config::Config;
use astro_shell::DocsLayout;
use astro_site::{RouteRules, Site};
use tokio::net::TcpListener;

pub use error::ServerError;

use app::create_router;
use state::AppState;

/// Server configuration.
#[derive(Clone, Debug)]
pub struct ServerConfig {
    /// Host address to bind to.
    pub host: String,
    /// Port to listen on.
    pub port: u16,
    /// Patterns served to everyone.
    pub public_routes: Vec<String>,
    /// Patterns requiring a session.
    pub protected_routes: Vec<String>,
    /// Redirect target for protected routes without a session.
    pub sign_in_url: String,
    /// Cookie marking an authenticated session.
    pub session_cookie: String,
}

/// Build the server configuration from the loaded project config.
#[must_use]
pub fn server_config_from_astro_config(config: &Config) -> ServerConfig {
    ServerConfig {
        host: config.server.host.clone(),
        port: config.server.port,
        public_routes: config.routes.public.clone(),
        protected_routes: config.routes.protected.clone(),
        sign_in_url: config.auth.sign_in_url.clone(),
        session_cookie: config.auth.session_cookie.clone(),
    }
}

/// Run the HTTP server until Ctrl-C.
///
/// # Errors
///
/// Returns an error if a route pattern is invalid, the address cannot be
/// parsed, or the listener fails.
pub async fn run_server(
    config: ServerConfig,
    site: Site,
    layout: DocsLayout,
) -> Result<(), ServerError> {
    let rules = RouteRules::new(&config.public_routes, &config.protected_routes)?;

    let state = Arc::new(AppState {
        site,
        layout,
        rules,
        sign_in_url: config.sign_in_url,
        session_cookie: config.session_cookie,
    });

    let app = create_router(state);

    let addr_str = format!("{}:{}", config.host, config.port);
    let addr = SocketAddr::from_str(&addr_str).map_err(|source| ServerError::Addr {
        addr: addr_str.clone(),
        source,
    })?;
    let listener = TcpListener::bind(addr).await?;

    tracing::info!(%addr, "Server started");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for Ctrl-C");
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
