//! In-memory posts.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, ErrorCode, PostId, Timestamp};
use crate::domain::newsletter::NewsletterPost;
use crate::ports::PostRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryPostRepository {
    posts: Arc<RwLock<HashMap<PostId, NewsletterPost>>>,
}

impl InMemoryPostRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, post: NewsletterPost) {
        self.posts.write().await.insert(post.id, post);
    }

    pub async fn get(&self, id: &PostId) -> Option<NewsletterPost> {
        self.posts.read().await.get(id).cloned()
    }
}

#[async_trait]
impl PostRepository for InMemoryPostRepository {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<NewsletterPost>, DomainError> {
        Ok(self.posts.read().await.get(id).cloned())
    }

    async fn mark_email_sent(&self, id: &PostId, at: Timestamp) -> Result<(), DomainError> {
        let mut posts = self.posts.write().await;
        let post = posts.get_mut(id).ok_or_else(|| {
            DomainError::new(ErrorCode::PostNotFound, format!("post {} not found", id))
        })?;
        post.email_sent = true;
        post.email_sent_at = Some(at);
        Ok(())
    }
}
