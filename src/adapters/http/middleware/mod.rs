//! HTTP middleware for axum.
//!
//! - `auth` - Bearer token middleware and the `RequireAuth` extractor
//! - `client_ip` - `ClientIp` extractor for proxied requests

pub mod auth;
pub mod client_ip;

pub use auth::{auth_middleware, AuthRejection, AuthState, RequireAuth};
pub use client_ip::ClientIp;
