//! PostgreSQL implementation of ProfileRepository.

use async_trait::async_trait;
use sqlx::PgPool;

use crate::domain::account::Profile;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::ProfileRepository;

pub struct PostgresProfileRepository {
    pool: PgPool,
}

impl PostgresProfileRepository {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, sqlx::FromRow)]
struct ProfileRow {
    user_id: String,
    display_name: Option<String>,
    is_admin: bool,
}

impl TryFrom<ProfileRow> for Profile {
    type Error = DomainError;

    fn try_from(row: ProfileRow) -> Result<Self, Self::Error> {
        Ok(Profile {
            user_id: UserId::new(row.user_id)
                .map_err(|e| DomainError::database(format!("Invalid user_id: {}", e)))?,
            display_name: row.display_name,
            is_admin: row.is_admin,
        })
    }
}

#[async_trait]
impl ProfileRepository for PostgresProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        let row: Option<ProfileRow> = sqlx::query_as(
            "SELECT user_id, display_name, is_admin FROM profiles WHERE user_id = $1",
        )
        .bind(user_id.as_str())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| DomainError::database(format!("Failed to find profile: {}", e)))?;

        row.map(Profile::try_from).transpose()
    }

    async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
        let result = sqlx::query("UPDATE profiles SET is_admin = $2 WHERE user_id = $1")
            .bind(profile.user_id.as_str())
            .bind(profile.is_admin)
            .execute(&self.pool)
            .await
            .map_err(|e| DomainError::database(format!("Failed to update profile: {}", e)))?;

        if result.rows_affected() == 0 {
            return Err(DomainError::new(ErrorCode::ProfileNotFound, "Profile not found"));
        }
        Ok(())
    }
}
