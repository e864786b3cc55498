//! RecordOpenHandler - Command handler behind the tracking pixel.

use std::sync::Arc;

use tracing::debug;

use crate::domain::foundation::Timestamp;
use crate::domain::newsletter::{NewsletterError, TrackingToken};
use crate::ports::EmailStatRepository;

#[derive(Debug, Clone)]
pub struct RecordOpenCommand {
    pub token: String,
}

pub struct RecordOpenHandler {
    stats: Arc<dyn EmailStatRepository>,
}

impl RecordOpenHandler {
    pub fn new(stats: Arc<dyn EmailStatRepository>) -> Self {
        Self { stats }
    }

    /// Returns `true` when this was the first recorded open.
    pub async fn handle(&self, cmd: RecordOpenCommand) -> Result<bool, NewsletterError> {
        let token = TrackingToken::parse(&cmd.token).map_err(|_| NewsletterError::InvalidToken)?;

        let mut stat = self
            .stats
            .find_by_token(&token)
            .await?
            .ok_or(NewsletterError::InvalidToken)?;

        if !stat.mark_opened(Timestamp::now()) {
            return Ok(false);
        }

        self.stats.update(&stat).await?;
        debug!(stat_id = %stat.id, post_id = %stat.post_id, "Newsletter opened");
        Ok(true)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::InMemoryEmailStatRepository;
    use crate::domain::foundation::{PostId, SubscriberId};
    use crate::domain::newsletter::EmailStat;

    async fn setup() -> (Arc<InMemoryEmailStatRepository>, RecordOpenHandler, EmailStat) {
        let repo = Arc::new(InMemoryEmailStatRepository::new());
        let stat = EmailStat::new(PostId::new(), SubscriberId::new(), TrackingToken::generate());
        repo.insert(&stat).await.unwrap();
        (repo.clone(), RecordOpenHandler::new(repo), stat)
    }

    fn cmd(token: &str) -> RecordOpenCommand {
        RecordOpenCommand {
            token: token.to_string(),
        }
    }

    #[tokio::test]
    async fn first_open_is_recorded_once() {
        let (repo, handler, stat) = setup().await;

        assert!(handler.handle(cmd(stat.tracking_token.as_str())).await.unwrap());
        let first = repo.all().await[0].opened_at;
        assert!(first.is_some());

        assert!(!handler.handle(cmd(stat.tracking_token.as_str())).await.unwrap());
        assert_eq!(repo.all().await[0].opened_at, first);
    }

    #[tokio::test]
    async fn unknown_token_is_invalid() {
        let (_, handler, _) = setup().await;
        assert!(matches!(
            handler.handle(cmd("unknown")).await,
            Err(NewsletterError::InvalidToken)
        ));
    }
}
