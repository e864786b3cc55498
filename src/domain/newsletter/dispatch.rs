//! Tallies for newsletter sends and their tracking results.

use serde::Serialize;

use crate::domain::foundation::SubscriberId;

/// Outcome of one newsletter dispatch run.
///
/// Every recipient ends up in exactly one of `sent` or `failed`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DispatchReport {
    pub total: u32,
    pub sent: u32,
    pub failed: u32,
    #[serde(skip)]
    pub failed_recipients: Vec<SubscriberId>,
}

impl DispatchReport {
    pub fn record_sent(&mut self) {
        self.total += 1;
        self.sent += 1;
    }

    pub fn record_failed(&mut self, subscriber_id: SubscriberId) {
        self.total += 1;
        self.failed += 1;
        self.failed_recipients.push(subscriber_id);
    }
}

/// Aggregated tracking counters for one post.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct NewsletterStats {
    pub total: u64,
    pub failed: u64,
    pub opened: u64,
    pub clicked: u64,
}

impl NewsletterStats {
    pub fn sent(&self) -> u64 {
        self.total.saturating_sub(self.failed)
    }

    pub fn open_rate(&self) -> f64 {
        ratio(self.opened, self.sent())
    }

    pub fn click_rate(&self) -> f64 {
        ratio(self.clicked, self.sent())
    }
}

fn ratio(part: u64, whole: u64) -> f64 {
    if whole == 0 {
        0.0
    } else {
        part as f64 / whole as f64
    }
}

/// Which subscribers a dispatch should reach.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DispatchTarget {
    AllSubscribed,
    /// Only these ids, and only those still subscribed.
    Only(Vec<SubscriberId>),
}
