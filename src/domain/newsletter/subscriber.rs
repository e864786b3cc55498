//! Newsletter subscriber aggregate.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{EmailAddress, SubscriberId, Timestamp};

use super::errors::NewsletterError;
use super::tokens::UnsubscribeToken;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subscriber {
    pub id: SubscriberId,
    pub email: EmailAddress,
    pub is_subscribed: bool,
    pub unsubscribe_token: UnsubscribeToken,
    pub subscribed_at: Timestamp,
    pub unsubscribed_at: Option<Timestamp>,
}

impl Subscriber {
    /// A brand new, active subscription.
    pub fn new(email: EmailAddress) -> Self {
        Self {
            id: SubscriberId::new(),
            email,
            is_subscribed: true,
            unsubscribe_token: UnsubscribeToken::generate(),
            subscribed_at: Timestamp::now(),
            unsubscribed_at: None,
        }
    }

    /// Turns a lapsed subscription back on.
    ///
    /// The unsubscribe token is rotated so links from earlier emails no
    /// longer act on the renewed subscription.
    pub fn resubscribe(&mut self) -> Result<(), NewsletterError> {
        if self.is_subscribed {
            return Err(NewsletterError::AlreadySubscribed);
        }
        self.is_subscribed = true;
        self.unsubscribe_token = UnsubscribeToken::generate();
        self.subscribed_at = Timestamp::now();
        self.unsubscribed_at = None;
        Ok(())
    }

    pub fn unsubscribe(&mut self) -> Result<(), NewsletterError> {
        if !self.is_subscribed {
            return Err(NewsletterError::AlreadyUnsubscribed);
        }
        self.is_subscribed = false;
        self.unsubscribed_at = Some(Timestamp::now());
        Ok(())
    }
}
