//! Site profile attached to an auth-provider user.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::UserId;

use super::errors::AdminError;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Profile {
    pub user_id: UserId,
    pub display_name: Option<String>,
    pub is_admin: bool,
}

impl Profile {
    pub fn new(user_id: UserId, display_name: Option<String>) -> Self {
        Self {
            user_id,
            display_name,
            is_admin: false,
        }
    }

    pub fn grant_admin(&mut self) -> Result<(), AdminError> {
        if self.is_admin {
            return Err(AdminError::AlreadyAdmin(self.user_id.clone()));
        }
        self.is_admin = true;
        Ok(())
    }

    /// Revokes admin rights. `actor` is the admin performing the change;
    /// nobody may demote themselves.
    pub fn revoke_admin(&mut self, actor: &UserId) -> Result<(), AdminError> {
        if &self.user_id == actor {
            return Err(AdminError::CannotRevokeSelf);
        }
        if !self.is_admin {
            return Err(AdminError::NotAdmin(self.user_id.clone()));
        }
        self.is_admin = false;
        Ok(())
    }
}
