//! GrantAdminHandler - Command handler promoting a profile to admin.

use std::sync::Arc;

use tracing::info;

use crate::domain::account::{AdminError, Profile};
use crate::domain::foundation::UserId;
use crate::ports::ProfileRepository;

use super::AdminGuard;

#[derive(Debug, Clone)]
pub struct GrantAdminCommand {
    /// Admin performing the change.
    pub actor: UserId,
    pub target: UserId,
}

pub struct GrantAdminHandler {
    profiles: Arc<dyn ProfileRepository>,
    guard: AdminGuard,
}

impl GrantAdminHandler {
    pub fn new(profiles: Arc<dyn ProfileRepository>) -> Self {
        Self {
            guard: AdminGuard::new(profiles.clone()),
            profiles,
        }
    }

    pub async fn handle(&self, cmd: GrantAdminCommand) -> Result<Profile, AdminError> {
        self.guard.ensure_admin(&cmd.actor).await?;

        let mut profile = self
            .profiles
            .find(&cmd.target)
            .await?
            .ok_or_else(|| AdminError::ProfileNotFound(cmd.target.clone()))?;

        profile.grant_admin()?;
        self.profiles.update(&profile).await?;

        info!(actor = %cmd.actor, target = %cmd.target, "Admin role granted");
        Ok(profile)
    }
}
