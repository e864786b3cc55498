//! AdminGuard - shared admin check used by every admin-only operation.

use std::sync::Arc;

use crate::domain::account::AdminError;
use crate::domain::foundation::UserId;
use crate::ports::ProfileRepository;

#[derive(Clone)]
pub struct AdminGuard {
    profiles: Arc<dyn ProfileRepository>,
}

impl AdminGuard {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// `Ok` when `user_id` has a profile with the admin flag set.
    pub async fn ensure_admin(&self, user_id: &UserId) -> Result<(), AdminError> {
        if self.profiles.is_admin(user_id).await? {
            Ok(())
        } else {
            Err(AdminError::Forbidden)
        }
    }
}
