//! SendNewsletterHandler - Command handler that emails a published post to
//! subscribers.
//!
//! Recipients are processed one at a time with a fixed pause between sends.
//! Each recipient gets a fresh tracking token and an `email_stats` row
//! before the message goes out. A failure for one recipient is counted and
//! logged; the loop always runs to the end and then flags the post as
//! emailed. The loop runs on a spawned task so it outlives the request.

use std::sync::Arc;
use std::time::Duration;

use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::foundation::{DomainError, PostId, Timestamp};
use crate::domain::newsletter::{
    render_newsletter, DispatchReport, DispatchTarget, EmailStat, NewsletterError,
    NewsletterPost, Subscriber, TrackingLinks, TrackingToken,
};
use crate::ports::{
    EmailStatRepository, MailError, MailTransport, OutgoingEmail, PostRepository,
    SubscriberRepository,
};

/// Default pause between two consecutive sends.
pub const DEFAULT_SEND_DELAY: Duration = Duration::from_millis(100);

#[derive(Debug, Clone)]
pub struct SendNewsletterCommand {
    pub post_id: PostId,
    pub target: DispatchTarget,
}

/// Why a single recipient was not delivered.
#[derive(Debug, Error)]
enum DeliveryFailure {
    #[error("tracking row could not be stored: {0}")]
    Tracking(DomainError),

    #[error(transparent)]
    Mail(#[from] MailError),
}

pub struct SendNewsletterHandler {
    posts: Arc<dyn PostRepository>,
    subscribers: Arc<dyn SubscriberRepository>,
    dispatcher: Dispatcher,
}

impl SendNewsletterHandler {
    pub fn new(
        posts: Arc<dyn PostRepository>,
        subscribers: Arc<dyn SubscriberRepository>,
        stats: Arc<dyn EmailStatRepository>,
        mail: Arc<dyn MailTransport>,
        links: TrackingLinks,
    ) -> Self {
        Self {
            dispatcher: Dispatcher {
                posts: posts.clone(),
                stats,
                mail,
                links,
                send_delay: DEFAULT_SEND_DELAY,
            },
            posts,
            subscribers,
        }
    }

    pub fn with_send_delay(mut self, delay: Duration) -> Self {
        self.dispatcher.send_delay = delay;
        self
    }

    /// Validates the post and recipient list, then runs the send loop on its
    /// own task. Dropping the returned future (client disconnect, upstream
    /// timeout) does not stop a dispatch that has already started.
    pub async fn handle(&self, cmd: SendNewsletterCommand) -> Result<DispatchReport, NewsletterError> {
        let post = self
            .posts
            .find_by_id(&cmd.post_id)
            .await?
            .ok_or(NewsletterError::PostNotFound(cmd.post_id))?;

        if !post.is_published {
            return Err(NewsletterError::PostNotPublished(post.id));
        }

        let recipients = match &cmd.target {
            DispatchTarget::AllSubscribed => self.subscribers.list_subscribed().await?,
            DispatchTarget::Only(ids) => self.subscribers.find_subscribed_by_ids(ids).await?,
        };

        if recipients.is_empty() {
            return Err(NewsletterError::NoRecipients);
        }

        let dispatcher = self.dispatcher.clone();
        tokio::spawn(async move { dispatcher.run(post, recipients).await })
            .await
            .map_err(|e| {
                NewsletterError::infrastructure(format!("newsletter dispatch task failed: {}", e))
            })
    }
}

/// Owned state for the send loop.
#[derive(Clone)]
struct Dispatcher {
    posts: Arc<dyn PostRepository>,
    stats: Arc<dyn EmailStatRepository>,
    mail: Arc<dyn MailTransport>,
    links: TrackingLinks,
    send_delay: Duration,
}

impl Dispatcher {
    async fn run(&self, post: NewsletterPost, recipients: Vec<Subscriber>) -> DispatchReport {
        info!(
            post_id = %post.id,
            recipients = recipients.len(),
            "Sending newsletter"
        );

        let mut report = DispatchReport::default();
        for (i, subscriber) in recipients.iter().enumerate() {
            if i > 0 && !self.send_delay.is_zero() {
                tokio::time::sleep(self.send_delay).await;
            }

            match self.deliver(&post, subscriber).await {
                Ok(()) => report.record_sent(),
                Err(e) => {
                    warn!(
                        post_id = %post.id,
                        subscriber_id = %subscriber.id,
                        error = %e,
                        "Newsletter delivery failed"
                    );
                    report.record_failed(subscriber.id);
                }
            }
        }

        if let Err(e) = self.posts.mark_email_sent(&post.id, Timestamp::now()).await {
            error!(post_id = %post.id, error = %e, "Failed to mark post as emailed");
        }

        info!(
            post_id = %post.id,
            sent = report.sent,
            failed = report.failed,
            "Newsletter dispatch finished"
        );

        report
    }

    async fn deliver(
        &self,
        post: &NewsletterPost,
        subscriber: &Subscriber,
    ) -> Result<(), DeliveryFailure> {
        let token = TrackingToken::generate();
        let stat = EmailStat::new(post.id, subscriber.id, token.clone());
        self.stats
            .insert(&stat)
            .await
            .map_err(DeliveryFailure::Tracking)?;

        let rendered = render_newsletter(post, subscriber, &token, &self.links);
        let email = OutgoingEmail::new(subscriber.email.clone(), rendered);

        if let Err(e) = self.mail.send(&email).await {
            if let Err(mark_err) = self.stats.mark_failed(&stat.id).await {
                warn!(stat_id = %stat.id, error = %mark_err, "Failed to flag undelivered email");
            }
            return Err(e.into());
        }

        Ok(())
    }
}
