//! Newsletter errors.
//!
//! | Error | HTTP Status |
//! |-------|-------------|
//! | InvalidEmail | 400 |
//! | InvalidToken | 404 |
//! | AlreadySubscribed | 409 |
//! | AlreadyUnsubscribed | 409 |
//! | PostNotFound | 404 |
//! | PostNotPublished | 400 |
//! | NoRecipients | 400 |
//! | Infrastructure | 500 |

use thiserror::Error;

use crate::domain::foundation::{DomainError, ErrorCode, PostId, ValidationError};

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum NewsletterError {
    #[error("請輸入有效的電子郵件地址")]
    InvalidEmail(#[source] ValidationError),

    #[error("無效或已過期的連結")]
    InvalidToken,

    #[error("您已經訂閱過電子報了")]
    AlreadySubscribed,

    #[error("您已經取消訂閱了")]
    AlreadyUnsubscribed,

    #[error("Post not found: {0}")]
    PostNotFound(PostId),

    #[error("Post {0} is not published")]
    PostNotPublished(PostId),

    #[error("No subscribers to send to")]
    NoRecipients,

    #[error("Newsletter storage failed: {0}")]
    Infrastructure(String),
}

impl NewsletterError {
    pub fn infrastructure(message: impl Into<String>) -> Self {
        NewsletterError::Infrastructure(message.into())
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            NewsletterError::InvalidEmail(_) => ErrorCode::InvalidEmail,
            NewsletterError::InvalidToken => ErrorCode::SubscriberNotFound,
            NewsletterError::AlreadySubscribed => ErrorCode::AlreadySubscribed,
            NewsletterError::AlreadyUnsubscribed => ErrorCode::AlreadyUnsubscribed,
            NewsletterError::PostNotFound(_) => ErrorCode::PostNotFound,
            NewsletterError::PostNotPublished(_) | NewsletterError::NoRecipients => {
                ErrorCode::ValidationFailed
            }
            NewsletterError::Infrastructure(_) => ErrorCode::DatabaseError,
        }
    }
}

impl From<DomainError> for NewsletterError {
    fn from(err: DomainError) -> Self {
        NewsletterError::Infrastructure(err.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscription_state_errors_have_distinct_codes() {
        assert_eq!(
            NewsletterError::AlreadySubscribed.code(),
            ErrorCode::AlreadySubscribed
        );
        assert_eq!(
            NewsletterError::AlreadyUnsubscribed.code(),
            ErrorCode::AlreadyUnsubscribed
        );
    }

    #[test]
    fn storage_failures_become_infrastructure() {
        let err = NewsletterError::from(DomainError::database("connection reset"));
        assert!(matches!(err, NewsletterError::Infrastructure(_)));
        assert_eq!(err.code(), ErrorCode::DatabaseError);
    }
}
