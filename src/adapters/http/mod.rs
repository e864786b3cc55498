//! HTTP adapters - REST API implementations.
//!
//! Each feature has its own module with `dto`, `handlers` and `routes`.
//! `router` assembles them under `/api`.

pub mod admin;
pub mod error;
pub mod login;
pub mod middleware;
pub mod newsletter;
pub mod router;

pub use error::ErrorResponse;
pub use router::{api_router, with_http_layers, AppPorts, AppSettings};
