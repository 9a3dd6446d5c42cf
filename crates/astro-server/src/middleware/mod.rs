//! Request middleware.

pub(crate) mod route_guard;
pub(crate) mod security;
