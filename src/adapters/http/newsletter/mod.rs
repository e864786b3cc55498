//! HTTP adapter for subscription, dispatch and tracking endpoints.

mod dto;
mod handlers;
mod pages;
mod routes;

pub use dto::{
    ClickQuery, MessageResponse, NewsletterStatsResponse, SendNewsletterRequest,
    SendNewsletterResponse, SubscribeRequest, TokenQuery, UnsubscribeRequest,
};
pub use handlers::{NewsletterApiError, NewsletterHandlers, TRANSPARENT_GIF};
pub use routes::{dispatch_routes, newsletter_routes};
