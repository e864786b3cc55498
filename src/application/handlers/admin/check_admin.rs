//! CheckAdminHandler - Query handler reporting the caller's admin flag.

use std::sync::Arc;

use crate::domain::account::AdminError;
use crate::domain::foundation::UserId;
use crate::ports::ProfileRepository;

#[derive(Debug, Clone)]
pub struct CheckAdminQuery {
    pub user_id: UserId,
}

pub struct CheckAdminHandler {
    profiles: Arc<dyn ProfileRepository>,
}

impl CheckAdminHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self { profiles }
    }

    /// Users without a profile are not admins.
    pub async fn handle(&self, query: CheckAdminQuery) -> Result<bool, AdminError> {
        Ok(self.profiles.is_admin(&query.user_id).await?)
    }
}
