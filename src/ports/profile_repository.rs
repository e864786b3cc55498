//! ProfileRepository port for site profiles and their admin flag.

use async_trait::async_trait;

use crate::domain::{
    account::Profile,
    foundation::{DomainError, UserId},
};

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Find profile by user ID
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError>;

    /// Persist the admin flag of an existing profile
    async fn update(&self, profile: &Profile) -> Result<(), DomainError>;

    /// Whether `user_id` has a profile with the admin flag set.
    async fn is_admin(&self, user_id: &UserId) -> Result<bool, DomainError> {
        Ok(self.find(user_id).await?.map(|p| p.is_admin).unwrap_or(false))
    }
}
