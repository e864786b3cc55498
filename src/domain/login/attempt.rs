//! Login attempt record.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmailAddress, LoginAttemptId, Timestamp};

/// One login attempt as reported by the sign-in form.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LoginAttempt {
    pub id: LoginAttemptId,
    pub email: EmailAddress,
    pub attempted_at: Timestamp,
    pub success: bool,
    /// Client address as seen by the edge proxy, if known.
    pub ip_address: Option<String>,
}

impl LoginAttempt {
    pub fn record(email: EmailAddress, success: bool, ip_address: Option<String>) -> Self {
        Self::record_at(email, success, ip_address, Timestamp::now())
    }

    pub fn record_at(
        email: EmailAddress,
        success: bool,
        ip_address: Option<String>,
        attempted_at: Timestamp,
    ) -> Self {
        Self {
            id: LoginAttemptId::new(),
            email,
            attempted_at,
            success,
            ip_address: ip_address.filter(|ip| !ip.trim().is_empty()),
        }
    }
}
