//! In-memory subscriber store.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::domain::foundation::{DomainError, EmailAddress, ErrorCode, SubscriberId};
use crate::domain::newsletter::{Subscriber, UnsubscribeToken};
use crate::ports::SubscriberRepository;

#[derive(Debug, Clone, Default)]
pub struct InMemorySubscriberRepository {
    subscribers: Arc<RwLock<HashMap<SubscriberId, Subscriber>>>,
}

impl InMemorySubscriberRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_subscribers(subscribers: Vec<Subscriber>) -> Self {
        let repo = Self::new();
        {
            let mut map = repo.subscribers.write().await;
            for s in subscribers {
                map.insert(s.id, s);
            }
        }
        repo
    }

    pub async fn get(&self, id: &SubscriberId) -> Option<Subscriber> {
        self.subscribers.read().await.get(id).cloned()
    }

    pub async fn count(&self) -> usize {
        self.subscribers.read().await.len()
    }
}

fn oldest_first(mut list: Vec<Subscriber>) -> Vec<Subscriber> {
    list.sort_by(|a, b| a.subscribed_at.cmp(&b.subscribed_at));
    list
}

#[async_trait]
impl SubscriberRepository for InMemorySubscriberRepository {
    async fn find_by_email(&self, email: &EmailAddress) -> Result<Option<Subscriber>, DomainError> {
        let map = self.subscribers.read().await;
        Ok(map.values().find(|s| &s.email == email).cloned())
    }

    async fn find_by_unsubscribe_token(
        &self,
        token: &UnsubscribeToken,
    ) -> Result<Option<Subscriber>, DomainError> {
        let map = self.subscribers.read().await;
        Ok(map.values().find(|s| &s.unsubscribe_token == token).cloned())
    }

    async fn insert(&self, subscriber: &Subscriber) -> Result<(), DomainError> {
        let mut map = self.subscribers.write().await;
        if map.values().any(|s| s.email == subscriber.email) {
            return Err(DomainError::new(
                ErrorCode::AlreadyExists,
                format!("subscriber {} already exists", subscriber.email),
            ));
        }
        map.insert(subscriber.id, subscriber.clone());
        Ok(())
    }

    async fn update(&self, subscriber: &Subscriber) -> Result<(), DomainError> {
        let mut map = self.subscribers.write().await;
        match map.get_mut(&subscriber.id) {
            Some(existing) => {
                *existing = subscriber.clone();
                Ok(())
            }
            None => Err(DomainError::new(
                ErrorCode::SubscriberNotFound,
                format!("subscriber {} not found", subscriber.id),
            )),
        }
    }

    async fn list_subscribed(&self) -> Result<Vec<Subscriber>, DomainError> {
        let map = self.subscribers.read().await;
        Ok(oldest_first(
            map.values().filter(|s| s.is_subscribed).cloned().collect(),
        ))
    }

    async fn find_subscribed_by_ids(
        &self,
        ids: &[SubscriberId],
    ) -> Result<Vec<Subscriber>, DomainError> {
        let map = self.subscribers.read().await;
        Ok(oldest_first(
            ids.iter()
                .filter_map(|id| map.get(id))
                .filter(|s| s.is_subscribed)
                .cloned()
                .collect(),
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn subscriber(email: &str) -> Subscriber {
        Subscriber::new(EmailAddress::parse(email).unwrap())
    }

    #[tokio::test]
    async fn duplicate_email_is_rejected() {
        let repo = InMemorySubscriberRepository::new();
        repo.insert(&subscriber("a@x.io")).await.unwrap();
        let err = repo.insert(&subscriber("a@x.io")).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::AlreadyExists);
    }

    #[tokio::test]
    async fn listing_skips_unsubscribed() {
        let mut gone = subscriber("gone@x.io");
        gone.unsubscribe().unwrap();
        let active = subscriber("active@x.io");
        let repo =
            InMemorySubscriberRepository::with_subscribers(vec![gone.clone(), active.clone()]).await;

        let listed = repo.list_subscribed().await.unwrap();
        assert_eq!(listed, vec![active.clone()]);

        let by_ids = repo.find_subscribed_by_ids(&[gone.id, active.id]).await.unwrap();
        assert_eq!(by_ids, vec![active]);
    }

    #[tokio::test]
    async fn find_by_token_uses_current_token() {
        let s = subscriber("a@x.io");
        let repo = InMemorySubscriberRepository::with_subscribers(vec![s.clone()]).await;
        let found = repo.find_by_unsubscribe_token(&s.unsubscribe_token).await.unwrap();
        assert_eq!(found.map(|f| f.id), Some(s.id));
    }
}
