//! PostRepository port. The newsletter only reads posts and flips their
//! "emailed" flag; authoring lives elsewhere.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, PostId, Timestamp};
use crate::domain::newsletter::NewsletterPost;

#[async_trait]
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<NewsletterPost>, DomainError>;

    /// Record that the post went out as a newsletter at `at`.
    async fn mark_email_sent(&self, id: &PostId, at: Timestamp) -> Result<(), DomainError>;
}
