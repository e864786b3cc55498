//! Quillhouse API server.

use std::net::SocketAddr;
use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use quillhouse::adapters::auth::JwtSessionValidator;
use quillhouse::adapters::http::{api_router, with_http_layers, AppPorts, AppSettings};
use quillhouse::adapters::mail::GmailMailTransport;
use quillhouse::adapters::postgres::{
    PostgresEmailStatRepository, PostgresLoginAttemptRepository, PostgresPostRepository,
    PostgresProfileRepository, PostgresSubscriberRepository,
};
use quillhouse::config::AppConfig;
use quillhouse::domain::newsletter::{LinkSigner, TrackingLinks};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let config = AppConfig::load()?;
    init_tracing(&config);
    config.validate()?;

    tracing::info!(
        environment = ?config.server.environment,
        site_url = %config.server.site_url(),
        "Loaded configuration"
    );

    // --- Database ---
    let pool = config.database.connect().await?;
    tracing::info!(url = %config.database.redacted_url(), "Database connection pool created");

    // --- Ports ---
    let ports = AppPorts {
        login_attempts: Arc::new(PostgresLoginAttemptRepository::new(pool.clone())),
        subscribers: Arc::new(PostgresSubscriberRepository::new(pool.clone())),
        email_stats: Arc::new(PostgresEmailStatRepository::new(pool.clone())),
        posts: Arc::new(PostgresPostRepository::new(pool.clone())),
        profiles: Arc::new(PostgresProfileRepository::new(pool)),
        mail: Arc::new(GmailMailTransport::new(&config.email)?),
        session_validator: Arc::new(JwtSessionValidator::from_config(&config.auth)),
    };

    let settings = AppSettings {
        throttle: config.login_throttle.policy(),
        links: TrackingLinks::new(
            config.server.site_url(),
            LinkSigner::new(config.newsletter.link_signing_secret.clone()),
        ),
        send_delay: config.newsletter.send_delay(),
        request_timeout: Some(config.server.request_timeout()),
    };

    let app = with_http_layers(api_router(ports, settings), &config.server);

    // --- Start server ---
    let addr = config.server.socket_addr()?;
    tracing::info!(%addr, "Starting server");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("Server stopped");
    Ok(())
}

/// JSON logs in production, human-readable otherwise. `RUST_LOG` wins over
/// the configured level.
fn init_tracing(config: &AppConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        EnvFilter::new(format!(
            "quillhouse={level},tower_http={level}",
            level = config.server.log_level
        ))
    });

    let registry = tracing_subscriber::registry().with(filter);
    if config.is_production() {
        registry.with(tracing_subscriber::fmt::layer().json()).init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => tracing::info!("Received SIGINT, shutting down"),
        () = terminate => tracing::info!("Received SIGTERM, shutting down"),
    }
}
