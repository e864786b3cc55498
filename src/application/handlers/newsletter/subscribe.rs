//! SubscribeHandler - Command handler for newsletter sign-ups.

use std::sync::Arc;

use tracing::info;

use crate::domain::foundation::{EmailAddress, ErrorCode};
use crate::domain::newsletter::{NewsletterError, Subscriber};
use crate::ports::SubscriberRepository;

#[derive(Debug, Clone)]
pub struct SubscribeCommand {
    pub email: String,
}

/// Whether the address is new or came back after unsubscribing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SubscribeOutcome {
    Created,
    Resubscribed,
}

#[derive(Debug, Clone)]
pub struct SubscribeResult {
    pub subscriber: Subscriber,
    pub outcome: SubscribeOutcome,
}

pub struct SubscribeHandler {
    subscribers: Arc<dyn SubscriberRepository>,
}

impl SubscribeHandler {
    pub fn new(subscribers: Arc<dyn SubscriberRepository>) -> Self {
        Self { subscribers }
    }

    pub async fn handle(&self, cmd: SubscribeCommand) -> Result<SubscribeResult, NewsletterError> {
        let email = EmailAddress::parse(&cmd.email).map_err(NewsletterError::InvalidEmail)?;

        if let Some(mut existing) = self.subscribers.find_by_email(&email).await? {
            existing.resubscribe()?;
            self.subscribers.update(&existing).await?;
            info!(subscriber_id = %existing.id, "Subscriber resubscribed");
            return Ok(SubscribeResult {
                subscriber: existing,
                outcome: SubscribeOutcome::Resubscribed,
            });
        }

        let subscriber = Subscriber::new(email);
        self.subscribers.insert(&subscriber).await.map_err(|e| {
            // Lost a race with a concurrent sign-up for the same address.
            if e.code == ErrorCode::AlreadyExists {
                NewsletterError::AlreadySubscribed
            } else {
                NewsletterError::from(e)
            }
        })?;
        info!(subscriber_id = %subscriber.id, "New newsletter subscriber");

        Ok(SubscribeResult {
            subscriber,
            outcome: SubscribeOutcome::Created,
        })
    }
}
