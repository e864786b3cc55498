//! PostgreSQL implementation of SubscriberRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::domain::foundation::{DomainError, EmailAddress, ErrorCode, SubscriberId, Timestamp};
use crate::domain::newsletter::{Subscriber, UnsubscribeToken};
use crate::ports::SubscriberRepository;

pub struct PostgresSubscriberRepository {
    pool: PgPool,
}

impl PostgresSubscriberRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

/// Database row representation of a subscriber.
#[derive(Debug, sqlx::FromRow)]
struct SubscriberRow {
    id: Uuid,
    email: String,
    is_subscribed: bool,
    unsubscribe_token: String,
    subscribed_at: DateTime<Utc>,
    unsubscribed_at: Option<DateTime<Utc>>,
}

impl TryFrom<SubscriberRow> for Subscriber {
    type Error = DomainError;

    fn try_from(row: SubscriberRow) -> Result<Self, Self::Error> {
        Ok(Subscriber {
            id: SubscriberId::from_uuid(row.id),
            email: EmailAddress::parse(&row.email).map_err(|e| {
                DomainError::database(format!("Invalid stored email: {}", e))
            })?,
            is_subscribed: row.is_subscribed,
            unsubscribe_token: UnsubscribeToken::parse(&row.unsubscribe_token).map_err(|e| {
                DomainError::database(format!("Invalid stored unsubscribe token: {}", e))
            })?,
            subscribed_at: Timestamp::from_datetime(row.subscribed_at),
            unsubscribed_at: row.unsubscribed_at.map(Timestamp::from_datetime),
        })
    }
}

const SELECT_SUBSCRIBER: &str = r#"
    SELECT id, email, is_subscribed, unsubscribe_token, subscribed_at, unsubscribed_at
    FROM subscribers
"#;

fn rows_to_subscribers(rows: Vec<SubscriberRow>) -> Result<Vec<Subscriber>, DomainError> {
    rows.into_iter().map(Subscriber::try_from).collect()
}

#[async_trait]
impl SubscriberRepository for PostgresSubscriberRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Subscriber>, DomainError> {
        let row: Option<SubscriberRow> =
            sqlx::query_as(&format!("{} WHERE email = $1", SELECT_SUBSCRIBER))
                .bind(email.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to find subscriber: {}", e)))?;

        row.map(Subscriber::try_from).transpose()
    }

    async fn find_by_unsubscribe_token(
        &self,
        token: &UnsubscribeToken,
    ) -> Result<Option<Subscriber>, DomainError> {
        let row: Option<SubscriberRow> =
            sqlx::query_as(&format!("{} WHERE unsubscribe_token = $1", SELECT_SUBSCRIBER))
                .bind(token.as_str())
                .fetch_optional(&self.pool)
                .await
                .map_err(|e| DomainError::database(format!("Failed to find subscriber: {}", e)))?;

        row.map(Subscriber::try_from).transpose()
    }

    async fn insert(&self, subscriber: &Subscriber) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO subscribers (
                id, email, is_subscribed, unsubscribe_token, subscribed_at, unsubscribed_at
            ) VALUES ($1, $2, $3, $4, $5, $6)
            "#,
        )
        .bind(subscriber.id.as_uuid())
        .bind(subscriber.email.as_str())
        .bind(subscriber.is_subscribed)
        .bind(subscriber.unsubscribe_token.as_str())
        .bind(subscriber.subscribed_at.as_datetime())
        .bind(subscriber.unsubscribed_at.as_ref().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| {
            if let sqlx::Error::Database(db_err) = &e {
                if db_err.constraint() == Some("subscribers_email_key") {
                    return DomainError::new(ErrorCode::AlreadyExists, "Subscriber already exists");
                }
            }
            DomainError::database(format!("Failed to save subscriber: {}", e))
        })?;

        Ok(())
    }

    async fn update(&self, subscriber: &Subscriber) -> Result<(), DomainError> {
        let result = sqlx::query(
            r#"
            UPDATE subscribers SET
                is_subscribed = $2,
                unsubscribe_token = $3,
                subscribed_at = $4,
                unsubscribed_at = $5
            WHERE id = $1
            "#,
        )
        .bind(subscriber.id.as_uuid())
        .bind(subscriber.is_subscribed)
        .bind(subscriber.unsubscribe_token.as_str())
        .bind(subscriber.subscribed_at.as_datetime())
        .bind(subscriber.unsubscribed_at.as_ref().map(|t| *t.as_datetime()))
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to update subscriber: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(
                ErrorCode::SubscriberNotFound,
                "Subscriber not found",
            ));
        }

        Ok(())
    }

    async fn list_subscribed(&self) -> Result<Vec<Subscriber>, DomainError> {
        let rows: Vec<SubscriberRow> = sqlx::query_as(&format!(
            "{} WHERE is_subscribed ORDER BY subscribed_at ASC",
            SELECT_SUBSCRIBER
        ))
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to list subscribers: {}", e)))?;

        rows_to_subscribers(rows)
    }

    async fn find_subscribed_by_ids(
        &self,
        ids: &[SubscriberId],
    ) -> Result<Vec<Subscriber>, DomainError> {
        let uuids: Vec<Uuid> = ids.iter().map(|id| *id.as_uuid()).collect();

        let rows: Vec<SubscriberRow> = sqlx::query_as(&format!(
            "{} WHERE id = ANY($1) AND is_subscribed ORDER BY subscribed_at ASC",
            SELECT_SUBSCRIBER
        ))
        .bind(uuids)
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load subscribers: {}", e)))?;

        rows_to_subscribers(rows)
    }
}
