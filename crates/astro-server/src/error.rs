//! Server startup errors.

use std::io;

use astro_site::RouteError;

/// Error starting or running the HTTP server.
#[derive(Debug, thiserror::Error)]
pub enum ServerError {
    /// A public or protected route pattern does not compile.
    #[error(transparent)]
    Routes(#[from] RouteError),

    /// Host and port do not form a socket address.
    #[error("Invalid listen address {addr}: {source}")]
    Addr {
        /// Address as configured.
        addr: String,
        /// Parse failure.
        source: std::net::AddrParseError,
    },

    /// Binding or serving failed.
    #[error("Server I/O error: {0}")]
    Io(#[from] io::Error),
}
