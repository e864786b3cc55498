//! HTTP DTOs for admin role endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::account::Profile;

#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRoleRequest {
    pub user_id: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminCheckResponse {
    pub is_admin: bool,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminRoleResponse {
    pub user_id: String,
    pub is_admin: bool,
}

impl From<Profile> for AdminRoleResponse {
    fn from(profile: Profile) -> Self {
        Self {
            user_id: profile.user_id.to_string(),
            is_admin: profile.is_admin,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::foundation::UserId;

    #[test]
    fn role_request_uses_camel_case() {
        let req: AdminRoleRequest = serde_json::from_str(r#"{"userId": "user-9"}"#).unwrap();
        assert_eq!(req.user_id, "user-9");
    }

    #[test]
    fn role_response_from_profile() {
        let mut profile = Profile::new(UserId::new("user-9").unwrap(), None);
        profile.grant_admin().unwrap();

        let body = serde_json::to_value(AdminRoleResponse::from(profile)).unwrap();
        assert_eq!(body, serde_json::json!({"userId": "user-9", "isAdmin": true}));
    }
}
