//! HTTP adapter for login throttling and password strength.

mod dto;
mod handlers;
mod routes;

pub use dto::{
    CheckRateLimitRequest, PasswordStrengthRequest, RateLimitResponse,
    RecordLoginAttemptRequest, SuccessResponse,
};
pub use handlers::{LoginApiError, LoginHandlers};
pub use routes::login_routes;
