//! PostgreSQL implementation of EmailStatRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{
    DomainError, EmailStatId, ErrorCode, PostId, SubscriberId, Timestamp,
};
use crate::domain::newsletter::{EmailStat, NewsletterStats, TrackingToken};
use crate::ports::EmailStatRepository;

pub struct PostgresEmailStatRepository {
    pool: PgPool,
}

impl PostgresEmailStatRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct EmailStatRow {
    id: Uuid,
    post_id: Uuid,
    subscriber_id: Uuid,
    tracking_token: String,
    sent_at: DateTime<Utc>,
    opened_at: Option<DateTime<Utc>>,
    clicked_at: Option<DateTime<Utc>>,
    delivery_failed: bool,
}

impl TryFrom<EmailStatRow> for EmailStat {
    type Error = DomainError;

    fn try_from(row: EmailStatRow) -> Result<Self, Self::Error> {
        Ok(EmailStat {
            id: EmailStatId::from_uuid(row.id),
            post_id: PostId::from_uuid(row.post_id),
            subscriber_id: SubscriberId::from_uuid(row.subscriber_id),
            tracking_token: TrackingToken::parse(&row.tracking_token).map_err(|e| {
                DomainError::database(format!("Invalid stored tracking token: {}", e))
            })?,
            sent_at: Timestamp::from_datetime(row.sent_at),
            opened_at: row.opened_at.map(Timestamp::from_datetime),
            clicked_at: row.clicked_at.map(Timestamp::from_datetime),
            delivery_failed: row.delivery_failed,
        })
    }
}

#[derive(Debug, sqlx::FromRow)]
struct StatsRow {
    total: i64,
    failed: i64,
    opened: i64,
    clicked: i64,
}

#[async_trait]
impl EmailStatRepository for PostgresEmailStatRepository {
    async fn insert(&self, stat: &EmailStat) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO email_stats (
                id, post_id, subscriber_id, tracking_token, sent_at,
                opened_at, clicked_at, delivery_failed
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            "#,
        )
        .bind(stat.id.as_uuid())
        .bind(stat.post_id.as_uuid())
        .bind(stat.subscriber_id.as_uuid())
        .bind(stat.tracking_token.as_str())
        .bind(stat.sent_at.as_datetime())
        .bind(stat.opened_at.as_ref().map(|t| *t.as_datetime()))
        .bind(stat.clicked_at.as_ref().map(|t| *t.as_datetime()))
        .bind(stat.delivery_failed)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to save email stat: {}", e)))?;

        Ok(())
    }

    async fn mark_failed(&self, id: &EmailStatId) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE email_stats SET delivery_failed = TRUE WHERE id = $1")
            .bind(id.as_uuid())
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to flag email stat: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::NotFound, "Email stat not found"));
        }
        Ok(())
    }

    async fn find_by_token(&self, token: &TrackingToken) -> Result<Option<EmailStat>, DomainError> {
        let row: Option<EmailStatRow> = sqlx::query_as(
            r#"
            SELECT id, post_id, subscriber_id, tracking_token, sent_at,
                   opened_at, clicked_at, delivery_failed
            FROM email_stats
            WHERE tracking_token = $1
            "#,
        )
        .bind(token.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find email stat: {}", e)))?;

        row.map(EmailStat::try_from).transpose()
    }

    async fn update(&self, stat: &EmailStat) -> Result<(), DomainError> {
        // COALESCE keeps the first timestamp if a concurrent request got there first.
        let result = sqlx::query(
            r#"
            UPDATE email_stats SET
                opened_at = COALESCE(opened_at, $2),
                clicked_at = COALESCE(clicked_at, $3)
            WHERE id = $1
            "#,
        )
        .bind(stat.id.as_uuid())
        .bind(stat.opened_at.as_ref().map(|t| *t.as_datetime()))
        .bind(stat.clicked_at.as_ref().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update email stat: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::NotFound, "Email stat not found"));
        }
        Ok(())
    }

    async fn stats_for_post(&self, post_id: &PostId) -> Result<NewsletterStats, DomainError> {
        let row: StatsRow = sqlx::query_as(
            r#"
            SELECT COUNT(*) AS total,
                   COUNT(*) FILTER (WHERE delivery_failed) AS failed,
                   COUNT(opened_at) AS opened,
                   COUNT(clicked_at) AS clicked
            FROM email_stats
            WHERE post_id = $1
            "#,
        )
        .bind(post_id.as_uuid())
        .fetch_one(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to aggregate email stats: {}", e)))?;

        Ok(NewsletterStats {
            total: row.total.max(0) as u64,
            failed: row.failed.max(0) as u64,
            opened: row.opened.max(0) as u64,
            clicked: row.clicked.max(0) as u64,
        })
    }
}
