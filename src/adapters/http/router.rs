//! Router assembly.
//!
//! `api_router` wires application handlers over a set of ports and mounts
//! every module under `/api`. Every route except the newsletter dispatch
//! runs under the configured request timeout. `with_http_layers` adds the
//! remaining tower-http stack used in production.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    http::{header, HeaderName, HeaderValue, Method},
    middleware,
    routing::get,
    Json, Router,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};
use tower_http::timeout::TimeoutLayer;
use tower_http::trace::{DefaultMakeSpan, DefaultOnResponse, TraceLayer};
use tracing::Level;

use crate::application::handlers::admin::{
    AdminGuard, CheckAdminHandler, GrantAdminHandler, RevokeAdminHandler,
};
use crate::application::handlers::login::{CheckRateLimitHandler, RecordLoginAttemptHandler};
use crate::application::handlers::newsletter::{
    GetNewsletterStatsHandler, RecordClickHandler, RecordOpenHandler, SendNewsletterHandler,
    SubscribeHandler, UnsubscribeHandler,
};
use crate::config::ServerConfig;
use crate::domain::login::ThrottlePolicy;
use crate::domain::newsletter::TrackingLinks;
use crate::ports::{
    EmailStatRepository, LoginAttemptRepository, MailTransport, PostRepository,
    ProfileRepository, SessionValidator, SubscriberRepository,
};

use super::admin::{admin_routes, AdminHandlers};
use super::login::{login_routes, LoginHandlers};
use super::middleware::auth_middleware;
use super::newsletter::{dispatch_routes, newsletter_routes, NewsletterHandlers};

/// Ports the HTTP layer runs on.
#[derive(Clone)]
pub struct AppPorts {
    pub login_attempts: Arc<dyn LoginAttemptRepository>,
    pub subscribers: Arc<dyn SubscriberRepository>,
    pub email_stats: Arc<dyn EmailStatRepository>,
    pub posts: Arc<dyn PostRepository>,
    pub profiles: Arc<dyn ProfileRepository>,
    pub mail: Arc<dyn MailTransport>,
    pub session_validator: Arc<dyn SessionValidator>,
}

/// Tunables taken from configuration.
#[derive(Debug, Clone)]
pub struct AppSettings {
    pub throttle: ThrottlePolicy,
    pub links: TrackingLinks,
    pub send_delay: Duration,
    /// Upper bound for every route except `/api/send-newsletter`
    pub request_timeout: Option<Duration>,
}

pub fn api_router(ports: AppPorts, settings: AppSettings) -> Router {
    let login = LoginHandlers::new(
        Arc::new(CheckRateLimitHandler::new(
            ports.login_attempts.clone(),
            settings.throttle,
        )),
        Arc::new(RecordLoginAttemptHandler::new(
            ports.login_attempts.clone(),
            settings.throttle,
        )),
    );

    let admin = AdminHandlers::new(
        Arc::new(CheckAdminHandler::new(ports.profiles.clone())),
        Arc::new(GrantAdminHandler::new(ports.profiles.clone())),
        Arc::new(RevokeAdminHandler::new(ports.profiles.clone())),
    );

    let send = SendNewsletterHandler::new(
        ports.posts.clone(),
        ports.subscribers.clone(),
        ports.email_stats.clone(),
        ports.mail.clone(),
        settings.links.clone(),
    )
    .with_send_delay(settings.send_delay);

    let newsletter = NewsletterHandlers::new(
        Arc::new(SubscribeHandler::new(ports.subscribers.clone())),
        Arc::new(UnsubscribeHandler::new(ports.subscribers.clone())),
        Arc::new(send),
        Arc::new(RecordOpenHandler::new(ports.email_stats.clone())),
        Arc::new(RecordClickHandler::new(
            ports.email_stats.clone(),
            settings.links.clone(),
        )),
        Arc::new(GetNewsletterStatsHandler::new(
            ports.posts.clone(),
            ports.email_stats.clone(),
        )),
        Arc::new(AdminGuard::new(ports.profiles.clone())),
        settings.links.site_url(),
    );

    let timed = Router::new()
        .nest("/auth", login_routes(login))
        .nest("/admin", admin_routes(admin))
        .merge(newsletter_routes(newsletter.clone()));
    let timed = match settings.request_timeout {
        Some(timeout) => timed.layer(TimeoutLayer::new(timeout)),
        None => timed,
    };

    let api = timed.merge(dispatch_routes(newsletter));

    Router::new()
        .route("/health", get(health))
        .nest("/api", api)
        .layer(middleware::from_fn_with_state(
            ports.session_validator,
            auth_middleware,
        ))
}

async fn health() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "status": "ok" }))
}

/// Adds request IDs, tracing and CORS.
pub fn with_http_layers(router: Router, server: &ServerConfig) -> Router {
    let request_id_header = HeaderName::from_static("x-request-id");

    router
        .layer(PropagateRequestIdLayer::new(request_id_header.clone()))
        .layer(
            TraceLayer::new_for_http()
                .make_span_with(DefaultMakeSpan::new().level(Level::INFO))
                .on_response(DefaultOnResponse::new().level(Level::INFO)),
        )
        .layer(SetRequestIdLayer::new(request_id_header, MakeRequestUuid))
        .layer(cors_layer(server))
}

fn cors_layer(server: &ServerConfig) -> CorsLayer {
    let origins: Vec<HeaderValue> = server
        .cors_origins_list()
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let allow_origin = if origins.is_empty() {
        AllowOrigin::any()
    } else {
        AllowOrigin::list(origins)
    };

    CorsLayer::new()
        .allow_origin(allow_origin)
        .allow_methods([Method::GET, Method::POST, Method::OPTIONS])
        .allow_headers([header::AUTHORIZATION, header::CONTENT_TYPE])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cors_accepts_configured_origins() {
        let server = ServerConfig {
            cors_origins: Some("https://blog.example.com, https://admin.example.com".to_string()),
            ..Default::default()
        };
        // Building the layer must not panic on a valid list.
        let _ = cors_layer(&server);
        assert_eq!(server.cors_origins_list().len(), 2);
    }
}
