//! Adapters - Implementations of port interfaces.
//!
//! - `auth` - Bearer token validation
//! - `http` - axum routers, handlers and middleware
//! - `mail` - Outbound email transports
//! - `memory` - In-memory repositories for tests and local runs
//! - `postgres` - PostgreSQL repositories

pub mod auth;
pub mod http;
pub mod mail;
pub mod memory;
pub mod postgres;
