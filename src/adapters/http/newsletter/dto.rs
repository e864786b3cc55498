//! HTTP DTOs for newsletter endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::PostId;
use crate::domain::newsletter::{DispatchReport, NewsletterStats};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Deserialize)]
pub struct SubscribeRequest {
    pub email: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct UnsubscribeRequest {
    pub token: String,
}

/// Query string of the unsubscribe link and the open pixel.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct TokenQuery {
    #[serde(default)]
    pub token: Option<String>,
}

/// Query string of a tracked click link.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ClickQuery {
    #[serde(default)]
    pub token: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub sig: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNewsletterRequest {
    pub post_id: String,
    /// Restrict the send to these subscribers. All subscribers when absent.
    #[serde(default)]
    pub subscriber_ids: Option<Vec<String>>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub success: bool,
    pub message: String,
}

impl MessageResponse {
    pub fn ok(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SendNewsletterResponse {
    pub success: bool,
    pub sent_count: u32,
    pub failed_count: u32,
    pub total: u32,
}

impl From<DispatchReport> for SendNewsletterResponse {
    fn from(report: DispatchReport) -> Self {
        Self {
            success: true,
            sent_count: report.sent,
            failed_count: report.failed,
            total: report.total,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewsletterStatsResponse {
    pub post_id: String,
    pub total: u64,
    pub sent: u64,
    pub failed: u64,
    pub opened: u64,
    pub clicked: u64,
    pub open_rate: f64,
    pub click_rate: f64,
}

impl NewsletterStatsResponse {
    pub fn new(post_id: PostId, stats: NewsletterStats) -> Self {
        Self {
            post_id: post_id.to_string(),
            total: stats.total,
            sent: stats.sent(),
            failed: stats.failed,
            opened: stats.opened,
            clicked: stats.clicked,
            open_rate: stats.open_rate(),
            click_rate: stats.click_rate(),
        }
    }
}
