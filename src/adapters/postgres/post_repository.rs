//! PostgreSQL implementation of PostRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, ErrorCode, PostId, Timestamp};
use crate::domain::newsletter::NewsletterPost;
use crate::ports::PostRepository;

pub struct PostgresPostRepository {
    pool: PgPool,
}

impl PostgresPostRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct PostRow {
    id: Uuid,
    title: String,
    slug: String,
    excerpt: Option<String>,
    content: String,
    is_published: bool,
    email_sent: bool,
    email_sent_at: Option<DateTime<Utc>>,
}

impl From<PostRow> for NewsletterPost {
    fn from(row: PostRow) -> Self {
        NewsletterPost {
            id: PostId::from_uuid(row.id),
            title: row.title,
            slug: row.slug,
            excerpt: row.excerpt,
            content: row.content,
            is_published: row.is_published,
            email_sent: row.email_sent,
            email_sent_at: row.email_sent_at.map(Timestamp::from_datetime),
        }
    }
}

#[async_trait]
impl PostRepository for PostgresPostRepository {
    async fn find_by_id(&self, id: &PostId) -> Result<Option<NewsletterPost>, DomainError> {
        let row: Option<PostRow> = sqlx::query_as(
            r#"
            SELECT id, title, slug, excerpt, content, is_published, email_sent, email_sent_at
            FROM posts
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find post: {}", e)))?;

        Ok(row.map(NewsletterPost::from))
    }

    async fn mark_email_sent(&self, id: &PostId, at: Timestamp) -> Result<(), DomainError> {
        let result = sqlx::query(
            "UPDATE posts SET email_sent = TRUE, email_sent_at = $2 WHERE id = $1",
        )
        .bind(id.as_uuid())
        .bind(at.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to mark post emailed: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::PostNotFound, "Post not found"));
        }
        Ok(())
    }
}
