//! EmailStatRepository port: one row per newsletter email sent.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EmailStatId, PostId};
use crate::domain::newsletter::{EmailStat, NewsletterStats, TrackingToken};

#[async_trait]
pub trait EmailStatRepository: Send + Sync {
    async fn insert(&self, stat: &EmailStat) -> Result<(), DomainError>;

    /// Flag a send whose delivery did not go through.
    async fn mark_failed(&self, id: &EmailStatId) -> Result<(), DomainError>;

    async fn find_by_token(&self, token: &TrackingToken) -> Result<Option<EmailStat>, DomainError>;

    /// Persist `opened_at` / `clicked_at` of an existing row.
    async fn update(&self, stat: &EmailStat) -> Result<(), DomainError>;

    /// Aggregate counts over every row for `post_id`.
    async fn stats_for_post(&self, post_id: &PostId) -> Result<NewsletterStats, DomainError>;
}
