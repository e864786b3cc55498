//! UnsubscribeHandler - Command handler for one-click unsubscribe links.

use std::sync::Arc;

use tracing::info;

use crate::domain::newsletter::{NewsletterError, Subscriber, UnsubscribeToken};
use crate::ports::SubscriberRepository;

#[derive(Debug, Clone)]
pub struct UnsubscribeCommand {
    pub token: String,
}

pub struct UnsubscribeHandler {
    subscribers: Arc<dyn SubscriberRepository>,
}

impl UnsubscribeHandler {
    pub fn new(subscribers: Arc<dyn SubscriberRepository>) -> Self {
        Self { subscribers }
    }

    pub async fn handle(&self, cmd: UnsubscribeCommand) -> Result<Subscriber, NewsletterError> {
        let token =
            UnsubscribeToken::parse(&cmd.token).map_err(|_| NewsletterError::InvalidToken)?;

        let mut subscriber = self
            .subscribers
            .find_by_unsubscribe_token(&token)
            .await?
            .ok_or(NewsletterError::InvalidToken)?;

        subscriber.unsubscribe()?;
        self.subscribers.update(&subscriber).await?;
        info!(subscriber_id = %subscriber.id, "Subscriber unsubscribed");

        Ok(subscriber)
    }
}
