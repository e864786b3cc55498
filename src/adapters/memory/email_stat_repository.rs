//! In-memory email tracking rows.

use async_trait::async_trait;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EmailStatId, ErrorCode, PostId};
use crate::domain::newsletter::{EmailStat, NewsletterStats, TrackingToken};
use crate::ports::EmailStatRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryEmailStatRepository {
    stats: Arc<RwLock<Vec<EmailStat>>>,
    reject_inserts: Arc<AtomicBool>,
}

impl InMemoryEmailStatRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes subsequent `insert` calls fail.
    pub fn set_reject_inserts(&self, reject: bool) {
        self.reject_inserts.store(reject, Ordering::SeqCst);
    }

    pub async fn all(&self) -> Vec<EmailStat> {
        self.stats.read().await.clone()
    }

    pub async fn for_post(&self, post_id: &PostId) -> Vec<EmailStat> {
        self.stats
            .read()
            .await
            .iter()
            .filter(|s| &s.post_id == post_id)
            .cloned()
            .collect()
    }
}

#[async_trait]
impl EmailStatRepository for InMemoryEmailStatRepository {
    async fn insert(&self, stat: &EmailStat) -> Result<(), DomainError> {
        if self.reject_inserts.load(Ordering::SeqCst) {
            return Err(DomainError::database("email_stats insert rejected"));
        }
        self.stats.write().await.push(stat.clone());
        Ok(())
    }

    async fn mark_failed(&self, id: &EmailStatId) -> Result<(), DomainError> {
        let mut stats = self.stats.write().await;
        match stats.iter_mut().find(|s| &s.id == id) {
            Some(stat) => {
                stat.delivery_failed = true;
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::NotFound,
                format!("email stat {} not found", id),
            )),
        }
    }

    async fn find_by_token(&self, token: &TrackingToken) -> Result<Option<EmailStat>, DomainError> {
        let stats = self.stats.read().await;
        Ok(stats.iter().find(|s| &s.tracking_token == token).cloned())
    }

    async fn update(&self, stat: &EmailStat) -> Result<(), DomainError> {
        let mut stats = self.stats.write().await;
        match stats.iter_mut().find(|s| s.id == stat.id) {
            Some(existing) => {
                existing.opened_at = stat.opened_at;
                existing.clicked_at = stat.clicked_at;
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::NotFound,
                format!("email stat {} not found", stat.id),
            )),
        }
    }

    async fn stats_for_post(&self, post_id: &PostId) -> Result<NewsletterStats, DomainError> {
        let stats = self.stats.read().await;
        Ok(stats
            .iter()
            .filter(|s| &s.post_id == post_id)
            .fold(NewsletterStats::default(), |mut acc, s| {
                acc.total += 1;
                if s.delivery_failed {
                    acc.failed += 1;
                }
                if s.opened_at.is_some() {
                    acc.opened += 1;
                }
                if s.clicked_at.is_some() {
                    acc.clicked += 1;
                }
                acc
            }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::{SubscriberId, Timestamp};

    #[tokio::test]
    async fn stats_aggregate_per_post() {
        let repo = InMemoryEmailStatRepository::new();
        let post = PostId::new();

        let mut opened = EmailStat::new(post, SubscriberId::new(), TrackingToken::generate());
        opened.mark_clicked(Timestamp::now());
        let failed = EmailStat::new(post, SubscriberId::new(), TrackingToken::generate());
        let other_post = EmailStat::new(PostId::new(), SubscriberId::new(), TrackingToken::generate());

        repo.insert(&opened).await.unwrap();
        repo.insert(&failed).await.unwrap();
        repo.insert(&other_post).await.unwrap();
        repo.mark_failed(&failed.id).await.unwrap();

        let stats = repo.stats_for_post(&post).await.unwrap();
        assert_eq!(
            stats,
            NewsletterStats {
                total: 2,
                failed: 1,
                opened: 1,
                clicked: 1
            }
        );
    }

    #[tokio::test]
    async fn rejected_insert_leaves_no_row() {
        let repo = InMemoryEmailStatRepository::new();
        repo.set_reject_inserts(true);
        let stat = EmailStat::new(PostId::new(), SubscriberId::new(), TrackingToken::generate());
        assert!(repo.insert(&stat).await.is_err());
        assert!(repo.all().await.is_empty());
    }
}
