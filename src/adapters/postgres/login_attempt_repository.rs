//! PostgreSQL implementation of LoginAttemptRepository.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::domain::foundation::{DomainError, EmailAddress, Timestamp};
use crate::domain::login::LoginAttempt;
use crate::ports::LoginAttemptRepository;

pub struct PostgresLoginAttemptRepository {
    pool: PgPool,
}

impl PostgresLoginAttemptRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl LoginAttemptRepository for PostgresLoginAttemptRepository {
    async fn insert(&self, attempt: &LoginAttempt) -> Result<(), DomainError> {
        sqlx::query(
            r#"
            INSERT INTO login_attempts (id, email, attempted_at, success, ip_address)
            VALUES ($1, $2, $3, $4, $5)
            "#,
        )
        .bind(attempt.id.as_uuid())
        .bind(attempt.email.as_str())
        .bind(attempt.attempted_at.as_datetime())
        .bind(attempt.success)
        .bind(&attempt.ip_address)
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to record login attempt: {}", e)))?;

        Ok(())
    }

    async fn failed_since(
        &self,
        email: &EmailAddress,
        since: Timestamp,
    ) -> Result<Vec<Timestamp>, DomainError> {
        let rows: Vec<(DateTime<Utc>,)> = sqlx::query_as(
            r#"
            SELECT attempted_at
            FROM login_attempts
            WHERE email = $1 AND NOT success AND attempted_at > $2
            ORDER BY attempted_at ASC
            "#,
        )
        .bind(email.as_str())
        .bind(since.as_datetime())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to load login attempts: {}", e)))?;

        Ok(rows
            .into_iter()
            .map(|(at,)| Timestamp::from_datetime(at))
            .collect())
    }

    async fn delete_failed_since(
        &self,
        email: &EmailAddress,
        since: Timestamp,
    ) -> Result<u64, DomainError> {
        let result = sqlx::query(
            r#"
            DELETE FROM login_attempts
            WHERE email = $1 AND NOT success AND attempted_at > $2
            "#,
        )
        .bind(email.as_str())
        .bind(since.as_datetime())
        .execute(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to clear login attempts: {}", e)))?;

        Ok(result.rows_affected())
    }
}
