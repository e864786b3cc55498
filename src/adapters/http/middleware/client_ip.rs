//! Client address extraction.
//!
//! Order: first `X-Forwarded-For` entry, then `X-Real-IP`, then the socket
//! peer from `ConnectInfo` (present when served with
//! `into_make_service_with_connect_info`).

use std::convert::Infallible;
use std::net::SocketAddr;

use axum::extract::ConnectInfo;
use axum::http::{request::Parts, HeaderMap};

/// Best-effort client IP. `None` when nothing identifies the caller.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientIp(pub Option<String>);

impl<S> axum::extract::FromRequestParts<S> for ClientIp
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    fn from_request_parts<'life0, 'life1, 'async_trait>(
        parts: &'life0 mut Parts,
        _state: &'life1 S,
    ) -> std::pin::Pin<
        Box<dyn std::future::Future<Output = Result<Self, Self::Rejection>> + Send + 'async_trait>,
    >
    where
        'life0: 'async_trait,
        'life1: 'async_trait,
        Self: 'async_trait,
    {
        Box::pin(async move {
            let peer = parts.extensions.get::<ConnectInfo<SocketAddr>>();
            Ok(ClientIp(extract_client_ip(&parts.headers, peer)))
        })
    }
}

fn extract_client_ip(
    headers: &HeaderMap,
    connect_info: Option<&ConnectInfo<SocketAddr>>,
) -> Option<String> {
    if let Some(forwarded) = headers.get("X-Forwarded-For").and_then(|h| h.to_str().ok()) {
        if let Some(first_ip) = forwarded.split(',').next().map(str::trim) {
            if !first_ip.is_empty() {
                return Some(first_ip.to_string());
            }
        }
    }

    if let Some(real_ip) = headers.get("X-Real-IP").and_then(|h| h.to_str().ok()) {
        let real_ip = real_ip.trim();
        if !real_ip.is_empty() {
            return Some(real_ip.to_string());
        }
    }

    connect_info.map(|ci| ci.0.ip().to_string())
}
