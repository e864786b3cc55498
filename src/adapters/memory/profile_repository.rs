//! In-memory profiles.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::account::Profile;
use crate::domain::foundation::{DomainError, ErrorCode, UserId};
use crate::ports::ProfileRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<UserId, Profile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn add(&self, profile: Profile) {
        self.profiles
            .write()
            .await
            .insert(profile.user_id.clone(), profile);
    }

    /// Adds an admin profile for `user_id`.
    pub async fn add_admin(&self, user_id: &str) {
        if let Ok(id) = UserId::new(user_id) {
            let mut profile = Profile::new(id, None);
            profile.is_admin = true;
            self.add(profile).await;
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    async fn find(&self, user_id: &UserId) -> Result<Option<Profile>, DomainError> {
        Ok(self.profiles.read().await.get(user_id).cloned())
    }

    async fn update(&self, profile: &Profile) -> Result<(), DomainError> {
        let mut profiles = self.profiles.write().await;
        match profiles.get_mut(&profile.user_id) {
            Some(existing) => {
                existing.is_admin = profile.is_admin;
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::ProfileNotFound,
                format!("profile {} not found", profile.user_id),
            )),
        }
    }
}
