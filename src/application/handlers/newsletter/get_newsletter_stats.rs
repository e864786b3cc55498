//! GetNewsletterStatsHandler - Query handler for per-post delivery and
//! engagement counts.

use std::sync::Arc;

use crate::domain::foundation::PostId;
use crate::domain::newsletter::{NewsletterError, NewsletterStats};
use crate::ports::{EmailStatRepository, PostRepository};

#[derive(Debug, Clone)]
pub struct GetNewsletterStatsQuery {
    pub post_id: PostId,
}

pub struct GetNewsletterStatsHandler {
    posts: Arc<dyn PostRepository>,
    stats: Arc<dyn EmailStatRepository>,
}

impl GetNewsletterStatsHandler {
    pub fn new(posts: Arc<dyn PostRepository>, stats: Arc<dyn EmailStatRepository>) -> Self {
        Self { posts, stats }
    }

    pub async fn handle(
        &self,
        query: GetNewsletterStatsQuery,
    ) -> Result<NewsletterStats, NewsletterError> {
        if self.posts.find_by_id(&query.post_id).await?.is_none() {
            return Err(NewsletterError::PostNotFound(query.post_id));
        }
        Ok(self.stats.stats_for_post(&query.post_id).await?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryEmailStatRepository, InMemoryPostRepository};
    use crate::domain::foundation::{SubscriberId, Timestamp};
    use crate::domain::newsletter::{EmailStat, NewsletterPost, TrackingToken};

    fn post() -> NewsletterPost {
        NewsletterPost {
            id: PostId::new(),
            title: "t".into(),
            slug: "t".into(),
            excerpt: None,
            content: String::new(),
            is_published: true,
            email_sent: true,
            email_sent_at: Some(Timestamp::now()),
        }
    }

    #[tokio::test]
    async fn returns_counts_for_existing_post() {
        let posts = Arc::new(InMemoryPostRepository::new());
        let stats = Arc::new(InMemoryEmailStatRepository::new());
        let p = post();
        posts.add(p.clone()).await;

        let mut opened = EmailStat::new(p.id, SubscriberId::new(), TrackingToken::generate());
        opened.mark_opened(Timestamp::now());
        stats.insert(&opened).await.unwrap();
        stats
            .insert(&EmailStat::new(p.id, SubscriberId::new(), TrackingToken::generate()))
            .await
            .unwrap();

        let handler = GetNewsletterStatsHandler::new(posts, stats);
        let result = handler
            .handle(GetNewsletterStatsQuery { post_id: p.id })
            .await
            .unwrap();

        assert_eq!(result.total, 2);
        assert_eq!(result.opened, 1);
        assert!((result.open_rate() - 0.5).abs() < f64::EPSILON);
    }

    #[tokio::test]
    async fn unknown_post_is_not_found() {
        let handler = GetNewsletterStatsHandler::new(
            Arc::new(InMemoryPostRepository::new()),
            Arc::new(InMemoryEmailStatRepository::new()),
        );
        let result = handler
            .handle(GetNewsletterStatsQuery {
                post_id: PostId::new(),
            })
            .await;
        assert!(matches!(result, Err(NewsletterError::PostNotFound(_))));
    }
}
