//! HTTP handlers for newsletter endpoints.

use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderValue, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};

use crate::adapters::http::admin::AdminApiError;
use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::admin::AdminGuard;
use crate::application::handlers::newsletter::{
    GetNewsletterStatsHandler, GetNewsletterStatsQuery, RecordClickCommand, RecordClickHandler,
    RecordOpenCommand, RecordOpenHandler, SendNewsletterCommand, SendNewsletterHandler,
    SubscribeCommand, SubscribeHandler, SubscribeOutcome, UnsubscribeCommand, UnsubscribeHandler,
};
use crate::domain::foundation::{PostId, SubscriberId};
use crate::domain::newsletter::{DispatchTarget, NewsletterError};

use super::dto::{
    ClickQuery, MessageResponse, NewsletterStatsResponse, SendNewsletterRequest,
    SendNewsletterResponse, SubscribeRequest, TokenQuery, UnsubscribeRequest,
};
use super::pages::unsubscribe_page;

/// 1x1 transparent GIF served by the open tracker.
pub const TRANSPARENT_GIF: [u8; 43] = [
    0x47, 0x49, 0x46, 0x38, 0x39, 0x61, 0x01, 0x00, 0x01, 0x00, 0x80, 0x00, 0x00, 0x00, 0x00,
    0x00, 0xff, 0xff, 0xff, 0x21, 0xf9, 0x04, 0x01, 0x00, 0x00, 0x00, 0x00, 0x2c, 0x00, 0x00,
    0x00, 0x00, 0x01, 0x00, 0x01, 0x00, 0x00, 0x02, 0x02, 0x44, 0x01, 0x00, 0x3b,
];

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone)]
pub struct NewsletterHandlers {
    subscribe_handler: Arc<SubscribeHandler>,
    unsubscribe_handler: Arc<UnsubscribeHandler>,
    send_handler: Arc<SendNewsletterHandler>,
    open_handler: Arc<RecordOpenHandler>,
    click_handler: Arc<RecordClickHandler>,
    stats_handler: Arc<GetNewsletterStatsHandler>,
    admin_guard: Arc<AdminGuard>,
    site_url: String,
}

impl NewsletterHandlers {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        subscribe_handler: Arc<SubscribeHandler>,
        unsubscribe_handler: Arc<UnsubscribeHandler>,
        send_handler: Arc<SendNewsletterHandler>,
        open_handler: Arc<RecordOpenHandler>,
        click_handler: Arc<RecordClickHandler>,
        stats_handler: Arc<GetNewsletterStatsHandler>,
        admin_guard: Arc<AdminGuard>,
        site_url: impl Into<String>,
    ) -> Self {
        Self {
            subscribe_handler,
            unsubscribe_handler,
            send_handler,
            open_handler,
            click_handler,
            stats_handler,
            admin_guard,
            site_url: site_url.into(),
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Subscription
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/newsletter/subscribe
pub async fn subscribe(
    State(handlers): State<NewsletterHandlers>,
    Json(req): Json<SubscribeRequest>,
) -> Result<Response, NewsletterApiError> {
    let result = handlers
        .subscribe_handler
        .handle(SubscribeCommand { email: req.email })
        .await?;

    let response = match result.outcome {
        SubscribeOutcome::Created => (
            StatusCode::CREATED,
            Json(MessageResponse::ok("訂閱成功！感謝您的支持")),
        ),
        SubscribeOutcome::Resubscribed => (
            StatusCode::OK,
            Json(MessageResponse::ok("歡迎回來，已重新為您訂閱電子報")),
        ),
    };
    Ok(response.into_response())
}

/// GET /api/newsletter/unsubscribe?token= - Link clicked in an email
pub async fn unsubscribe_link(
    State(handlers): State<NewsletterHandlers>,
    query: Option<Query<TokenQuery>>,
) -> Response {
    let token = query.and_then(|Query(q)| q.token).unwrap_or_default();
    let site = handlers.site_url.as_str();

    let (status, title, message) = match handlers
        .unsubscribe_handler
        .handle(UnsubscribeCommand { token })
        .await
    {
        Ok(_) => (StatusCode::OK, "已取消訂閱", "您將不會再收到我們的電子報。"),
        Err(NewsletterError::AlreadyUnsubscribed) => {
            (StatusCode::OK, "已取消訂閱", "您已經取消訂閱了")
        }
        Err(NewsletterError::InvalidToken) => {
            (StatusCode::NOT_FOUND, "連結無效", "無效或已過期的連結")
        }
        Err(e) => {
            tracing::error!(error = %e, "Unsubscribe failed");
            (StatusCode::INTERNAL_SERVER_ERROR, "發生錯誤", "請稍後再試")
        }
    };

    (status, Html(unsubscribe_page(title, message, site))).into_response()
}

/// POST /api/newsletter/unsubscribe
pub async fn unsubscribe(
    State(handlers): State<NewsletterHandlers>,
    Json(req): Json<UnsubscribeRequest>,
) -> Result<Json<MessageResponse>, NewsletterApiError> {
    handlers
        .unsubscribe_handler
        .handle(UnsubscribeCommand { token: req.token })
        .await?;
    Ok(Json(MessageResponse::ok("已成功取消訂閱")))
}

// ════════════════════════════════════════════════════════════════════════════
// Dispatch and stats (admin)
// ════════════════════════════════════════════════════════════════════════════

/// POST /api/send-newsletter
pub async fn send_newsletter(
    State(handlers): State<NewsletterHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<SendNewsletterRequest>,
) -> Result<Json<SendNewsletterResponse>, NewsletterApiError> {
    handlers
        .admin_guard
        .ensure_admin(&user.id)
        .await
        .map_err(AdminApiError::from)?;

    let post_id = parse_post_id(&req.post_id)?;
    let target = match req.subscriber_ids {
        None => DispatchTarget::AllSubscribed,
        Some(ids) => {
            let ids = ids
                .iter()
                .map(|id| id.parse::<SubscriberId>())
                .collect::<Result<Vec<_>, _>>()
                .map_err(|_| NewsletterApiError::BadRequest("Invalid subscriber ID".into()))?;
            DispatchTarget::Only(ids)
        }
    };

    let report = handlers
        .send_handler
        .handle(SendNewsletterCommand { post_id, target })
        .await?;

    Ok(Json(report.into()))
}

/// GET /api/newsletter/stats/:post_id
pub async fn newsletter_stats(
    State(handlers): State<NewsletterHandlers>,
    RequireAuth(user): RequireAuth,
    Path(post_id): Path<String>,
) -> Result<Json<NewsletterStatsResponse>, NewsletterApiError> {
    handlers
        .admin_guard
        .ensure_admin(&user.id)
        .await
        .map_err(AdminApiError::from)?;

    let post_id = parse_post_id(&post_id)?;
    let stats = handlers
        .stats_handler
        .handle(GetNewsletterStatsQuery { post_id })
        .await?;

    Ok(Json(NewsletterStatsResponse::new(post_id, stats)))
}

fn parse_post_id(raw: &str) -> Result<PostId, NewsletterApiError> {
    raw.parse::<PostId>()
        .map_err(|_| NewsletterApiError::BadRequest("Invalid post ID".into()))
}

// ════════════════════════════════════════════════════════════════════════════
// Tracking
// ════════════════════════════════════════════════════════════════════════════

/// GET /api/newsletter/track/open?token=
pub async fn track_open(
    State(handlers): State<NewsletterHandlers>,
    query: Option<Query<TokenQuery>>,
) -> Response {
    if let Some(token) = query.and_then(|Query(q)| q.token) {
        if let Err(e) = handlers
            .open_handler
            .handle(RecordOpenCommand { token })
            .await
        {
            tracing::debug!(error = %e, "Open not recorded");
        }
    }

    (
        [
            (header::CONTENT_TYPE, "image/gif"),
            (header::CACHE_CONTROL, "no-store, no-cache, must-revalidate, private"),
        ],
        &TRANSPARENT_GIF[..],
    )
        .into_response()
}

/// GET /api/newsletter/track/click?token=&url=&sig=
pub async fn track_click(
    State(handlers): State<NewsletterHandlers>,
    query: Option<Query<ClickQuery>>,
) -> Response {
    let query = query.map(|Query(q)| q).unwrap_or_default();
    let result = handlers
        .click_handler
        .handle(RecordClickCommand {
            token: query.token,
            url: query.url,
            signature: query.sig,
        })
        .await;

    let location = HeaderValue::from_str(&result.redirect_to)
        .or_else(|_| HeaderValue::from_str(&handlers.site_url))
        .unwrap_or_else(|_| HeaderValue::from_static("/"));

    (StatusCode::FOUND, [(header::LOCATION, location)]).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub enum NewsletterApiError {
    Newsletter(NewsletterError),
    Admin(AdminApiError),
    BadRequest(String),
}

impl From<NewsletterError> for NewsletterApiError {
    fn from(err: NewsletterError) -> Self {
        NewsletterApiError::Newsletter(err)
    }
}

impl From<AdminApiError> for NewsletterApiError {
    fn from(err: AdminApiError) -> Self {
        NewsletterApiError::Admin(err)
    }
}

impl IntoResponse for NewsletterApiError {
    fn into_response(self) -> Response {
        let err = match self {
            NewsletterApiError::Admin(err) => return err.into_response(),
            NewsletterApiError::BadRequest(message) => {
                return ErrorResponse::bad_request(message)
                    .into_response_with(StatusCode::BAD_REQUEST)
            }
            NewsletterApiError::Newsletter(err) => err,
        };

        let status = match &err {
            NewsletterError::InvalidEmail(_)
            | NewsletterError::PostNotPublished(_)
            | NewsletterError::NoRecipients => StatusCode::BAD_REQUEST,
            NewsletterError::InvalidToken | NewsletterError::PostNotFound(_) => {
                StatusCode::NOT_FOUND
            }
            NewsletterError::AlreadySubscribed | NewsletterError::AlreadyUnsubscribed => {
                StatusCode::CONFLICT
            }
            NewsletterError::Infrastructure(msg) => {
                tracing::error!(error = %msg, "Newsletter request failed");
                return ErrorResponse::internal()
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        ErrorResponse::new(err.code(), err.to_string()).into_response_with(status)
    }
}
