//! SubscriberRepository port for newsletter subscribers.

use async_trait::async_trait;

use crate::domain::foundation::{DomainError, EmailAddress, SubscriberId};
use crate::domain::newsletter::{Subscriber, UnsubscribeToken};

#[async_trait]
pub trait SubscriberRepository: Send + Sync {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Subscriber>, DomainError>;

    async fn find_by_unsubscribe_token(
        &self,
        token: &UnsubscribeToken,
    ) -> Result<Option<Subscriber>, DomainError>;

    /// Insert a new subscriber.
    ///
    /// Returns `ErrorCode::AlreadyExists` when the email is already stored.
    async fn insert(&self, subscriber: &Subscriber) -> Result<(), DomainError>;

    /// Overwrite subscription state and token of an existing subscriber.
    async fn update(&self, subscriber: &Subscriber) -> Result<(), DomainError>;

    /// All currently subscribed addresses, oldest first.
    async fn list_subscribed(&self) -> Result<Vec<Subscriber>, DomainError>;

    /// The subset of `ids` that is currently subscribed, oldest first.
    async fn find_subscribed_by_ids(
        &self,
        ids: &[SubscriberId],
    ) -> Result<Vec<Subscriber>, DomainError>;
}
