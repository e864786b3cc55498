//! HTTP handlers for admin role endpoints.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};

use crate::adapters::http::error::ErrorResponse;
use crate::adapters::http::middleware::RequireAuth;
use crate::application::handlers::admin::{
    CheckAdminHandler, CheckAdminQuery, GrantAdminCommand, GrantAdminHandler, RevokeAdminCommand,
    RevokeAdminHandler,
};
use crate::domain::account::AdminError;
use crate::domain::foundation::UserId;

use super::dto::{AdminCheckResponse, AdminRoleRequest, AdminRoleResponse};

#[derive(Clone)]
pub struct AdminHandlers {
    check_handler: Arc<CheckAdminHandler>,
    grant_handler: Arc<GrantAdminHandler>,
    revoke_handler: Arc<RevokeAdminHandler>,
}

impl AdminHandlers {
    pub fn new(
        check_handler: Arc<CheckAdminHandler>,
        grant_handler: Arc<GrantAdminHandler>,
        revoke_handler: Arc<RevokeAdminHandler>,
    ) -> Self {
        Self {
            check_handler,
            grant_handler,
            revoke_handler,
        }
    }
}

/// GET /api/admin/check
pub async fn check_admin(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
) -> Result<Json<AdminCheckResponse>, AdminApiError> {
    let is_admin = handlers
        .check_handler
        .handle(CheckAdminQuery { user_id: user.id })
        .await?;
    Ok(Json(AdminCheckResponse { is_admin }))
}

/// POST /api/admin/grant
pub async fn grant_admin(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AdminRoleRequest>,
) -> Result<Json<AdminRoleResponse>, AdminApiError> {
    let target = parse_target(req.user_id)?;
    let profile = handlers
        .grant_handler
        .handle(GrantAdminCommand {
            actor: user.id,
            target,
        })
        .await?;
    Ok(Json(profile.into()))
}

/// POST /api/admin/revoke
pub async fn revoke_admin(
    State(handlers): State<AdminHandlers>,
    RequireAuth(user): RequireAuth,
    Json(req): Json<AdminRoleRequest>,
) -> Result<Json<AdminRoleResponse>, AdminApiError> {
    let target = parse_target(req.user_id)?;
    let profile = handlers
        .revoke_handler
        .handle(RevokeAdminCommand {
            actor: user.id,
            target,
        })
        .await?;
    Ok(Json(profile.into()))
}

fn parse_target(raw: String) -> Result<UserId, AdminApiError> {
    UserId::new(raw).map_err(|e| AdminApiError::BadRequest(e.to_string()))
}

// ════════════════════════════════════════════════════════════════════════════
// Error handling
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug)]
pub enum AdminApiError {
    Admin(AdminError),
    BadRequest(String),
}

impl From<AdminError> for AdminApiError {
    fn from(err: AdminError) -> Self {
        AdminApiError::Admin(err)
    }
}

impl IntoResponse for AdminApiError {
    fn into_response(self) -> Response {
        let err = match self {
            AdminApiError::BadRequest(message) => {
                return ErrorResponse::bad_request(message)
                    .into_response_with(StatusCode::BAD_REQUEST)
            }
            AdminApiError::Admin(err) => err,
        };

        let status = match &err {
            AdminError::Forbidden => StatusCode::FORBIDDEN,
            AdminError::ProfileNotFound(_) => StatusCode::NOT_FOUND,
            AdminError::AlreadyAdmin(_) | AdminError::NotAdmin(_) => StatusCode::CONFLICT,
            AdminError::CannotRevokeSelf => StatusCode::BAD_REQUEST,
            AdminError::Infrastructure(msg) => {
                tracing::error!(error = %msg, "Admin request failed");
                return ErrorResponse::internal()
                    .into_response_with(StatusCode::INTERNAL_SERVER_ERROR);
            }
        };

        ErrorResponse::new(err.code(), err.to_string()).into_response_with(status)
    }
}
