//! RevokeAdminHandler - Command handler removing admin rights.

use std::sync::Arc;

use tracing::info;

use crate::domain::account::{AdminError, Profile};
use crate::domain::foundation::UserId;
use crate::ports::ProfileRepository;

use super::AdminGuard;

#[derive(Debug, Clone)]
pub struct RevokeAdminCommand {
    /// Admin performing the change.
    pub actor: UserId,
    pub target: UserId,
}

pub struct RevokeAdminHandler {
    profiles: Arc<dyn ProfileRepository>,
    guard: AdminGuard,
}

impl RevokeAdminHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            guard: AdminGuard::new(profiles.clone()),
            profiles,
        }
    }

    pub async fn handle(&self, cmd: RevokeAdminCommand) -> Result<Profile, AdminError> {
        self.guard.ensure_admin(&cmd.actor).await?;

        if cmd.actor == cmd.target {
            return Err(AdminError::CannotRevokeSelf);
        }

        let mut profile = self
            .profiles
            .find(&cmd.target)
            .await?
            .ok_or_else(|| AdminError::ProfileNotFound(cmd.target.clone()))?;

        profile.revoke_admin(&cmd.actor)?;
        self.profiles.update(&profile).await?;

        info!(actor = %cmd.actor, target = %cmd.target, "Admin role revoked");
        Ok(profile)
    }
}
