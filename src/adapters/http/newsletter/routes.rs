//! HTTP routes for newsletter endpoints, relative to `/api`.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{
    newsletter_stats, send_newsletter, subscribe, track_click, track_open, unsubscribe,
    unsubscribe_link, NewsletterHandlers,
};

pub fn newsletter_routes(handlers: NewsletterHandlers) -> Router {
    Router::new()
        .route("/newsletter/subscribe", post(subscribe))
        .route(
            "/newsletter/unsubscribe",
            get(unsubscribe_link).post(unsubscribe),
        )
        .route("/newsletter/track/open", get(track_open))
        .route("/newsletter/track/click", get(track_click))
        .route("/newsletter/stats/:post_id", get(newsletter_stats))
        .with_state(handlers)
}

/// The dispatch endpoint. It runs for as long as the recipient list needs,
/// so it is mounted outside the request timeout.
pub fn dispatch_routes(handlers: NewsletterHandlers) -> Router {
    Router::new()
        .route("/send-newsletter", post(send_newsletter))
        .with_state(handlers)
}
