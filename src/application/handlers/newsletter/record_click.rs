//! RecordClickHandler - Command handler behind tracked links.
//!
//! Always yields a redirect target. Only a correctly signed http(s)
//! destination is honoured; anything else lands on the site root.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::foundation::Timestamp;
use crate::domain::newsletter::{TrackingLinks, TrackingToken};
use crate::ports::EmailStatRepository;

#[derive(Debug, Clone, Default)]
pub struct RecordClickCommand {
    pub token: String,
    pub url: String,
    pub signature: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordClickResult {
    pub redirect_to: String,
    /// Whether this request set `clicked_at`.
    pub first_click: bool,
}

pub struct RecordClickHandler {
    stats: Arc<dyn EmailStatRepository>,
    links: TrackingLinks,
}

impl RecordClickHandler {
    pub fn new(stats: Arc<dyn EmailStatRepository>, links: TrackingLinks) -> Self {
        Self { stats, links }
    }

    pub async fn handle(&self, cmd: RecordClickCommand) -> RecordClickResult {
        let Ok(token) = TrackingToken::parse(&cmd.token) else {
            return RecordClickResult {
                redirect_to: self.links.site_url().to_string(),
                first_click: false,
            };
        };

        let redirect_to = self
            .links
            .resolve_click_target(&token, &cmd.url, &cmd.signature);
        let first_click = self.record(&token).await;

        RecordClickResult {
            redirect_to,
            first_click,
        }
    }

    async fn record(&self, token: &TrackingToken) -> bool {
        let mut stat = match self.stats.find_by_token(token).await {
            Ok(Some(stat)) => stat,
            Ok(None) => {
                debug!(token = ?token, "Click for unknown tracking token");
                return false;
            }
            Err(e) => {
                warn!(error = %e, "Failed to load email stat for click");
                return false;
            }
        };

        if !stat.mark_clicked(Timestamp::now()) {
            return false;
        }

        match self.stats.update(&stat).await {
            Ok(()) => {
                debug!(stat_id = %stat.id, post_id = %stat.post_id, "Newsletter link clicked");
                true
            }
            Err(e) => {
                warn!(stat_id = %stat.id, error = %e, "Failed to record click");
                false
            }
        }
    }
}
