//! Per-recipient send record used for open and click tracking.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmailStatId, PostId, SubscriberId, Timestamp};

use super::tokens::TrackingToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EmailStat {
    pub id: EmailStatId,
    pub post_id: PostId,
    pub subscriber_id: SubscriberId,
    pub tracking_token: TrackingToken,
    pub sent_at: Timestamp,
    pub opened_at: Option<Timestamp>,
    pub clicked_at: Option<Timestamp>,
    pub delivery_failed: bool,
}

impl EmailStat {
    pub fn new(post_id: PostId, subscriber_id: SubscriberId, tracking_token: TrackingToken) -> Self {
        Self {
            id: EmailStatId::new(),
            post_id,
            subscriber_id,
            tracking_token,
            sent_at: Timestamp::now(),
            opened_at: None,
            clicked_at: None,
            delivery_failed: false,
        }
    }

    /// Records the first open. Returns false if an open was already known.
    pub fn mark_opened(&mut self, at: Timestamp) -> bool {
        if self.opened_at.is_some() {
            return false;
        }
        self.opened_at = Some(at);
        true
    }

    /// Records the first click. A click implies an open, even when the
    /// pixel was blocked by the mail client.
    pub fn mark_clicked(&mut self, at: Timestamp) -> bool {
        self.mark_opened(at);
        if self.clicked_at.is_some() {
            return false;
        }
        self.clicked_at = Some(at);
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stat() -> EmailStat {
        EmailStat::new(PostId::new(), SubscriberId::new(), TrackingToken::generate())
    }

    #[test]
    fn first_open_wins() {
        let mut s = stat();
        let first = Timestamp::now();
        assert!(s.mark_opened(first));
        assert!(!s.mark_opened(first.plus_secs(30)));
        assert_eq!(s.opened_at, Some(first));
    }

    #[test]
    fn click_backfills_open() {
        let mut s = stat();
        let at = Timestamp::now();
        assert!(s.mark_clicked(at));
        assert_eq!(s.opened_at, Some(at));
        assert_eq!(s.clicked_at, Some(at));
        assert!(!s.mark_clicked(at.plus_secs(5)));
    }

    #[test]
    fn click_keeps_earlier_open() {
        let mut s = stat();
        let opened = Timestamp::now();
        s.mark_opened(opened);
        s.mark_clicked(opened.plus_secs(60));
        assert_eq!(s.opened_at, Some(opened));
    }
}
